// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;

use crate::api::request::BookQuery;
use crate::api::request::validate;
use crate::api::response::Payload;
use crate::api::response::respond;
use crate::client::http::HttpService;
use crate::library::Library;
use crate::types::book::BookInfo;
use crate::types::book::BookList;
use crate::types::mode::Mode;
use crate::types::review::Review;

/// A failed request. The message is what the server said, and is shown to
/// the user as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    pub message: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// The four requests the page makes, one per mode.
#[allow(async_fn_in_trait)]
pub trait BookService {
    async fn books(&self) -> ServiceResult<BookList>;
    async fn description(&self, folder: &str) -> ServiceResult<String>;
    async fn info(&self, folder: &str) -> ServiceResult<BookInfo>;
    async fn reviews(&self, folder: &str) -> ServiceResult<Vec<Review>>;

    /// Where the browser should load a book's cover from.
    fn cover_url(&self, folder: &str) -> String;
}

/// Percent-encodes a folder name for use as a URL path segment.
pub fn encode_folder(folder: &str) -> String {
    utf8_percent_encode(folder, NON_ALPHANUMERIC).to_string()
}

/// Answers requests in-process, through the same validation as the HTTP
/// endpoint.
#[derive(Debug, Clone)]
pub struct LocalService {
    library: Library,
}

impl LocalService {
    pub fn new(library: Library) -> Self {
        Self { library }
    }

    fn call(&self, mode: Mode, folder: Option<&str>) -> ServiceResult<Payload> {
        let query = BookQuery::new(mode, folder);
        validate(&self.library, query)
            .and_then(|request| respond(&self.library, request))
            .map_err(|e| ServiceError::new(e.to_string()))
    }
}

fn mismatch(mode: Mode) -> ServiceError {
    ServiceError::new(format!("Error: Unexpected response to the {mode} request."))
}

impl BookService for LocalService {
    async fn books(&self) -> ServiceResult<BookList> {
        match self.call(Mode::Books, None)? {
            Payload::Books(list) => Ok(list),
            _ => Err(mismatch(Mode::Books)),
        }
    }

    async fn description(&self, folder: &str) -> ServiceResult<String> {
        match self.call(Mode::Description, Some(folder))? {
            Payload::Description(text) => Ok(text),
            _ => Err(mismatch(Mode::Description)),
        }
    }

    async fn info(&self, folder: &str) -> ServiceResult<BookInfo> {
        match self.call(Mode::Info, Some(folder))? {
            Payload::Info(info) => Ok(info),
            _ => Err(mismatch(Mode::Info)),
        }
    }

    async fn reviews(&self, folder: &str) -> ServiceResult<Vec<Review>> {
        match self.call(Mode::Reviews, Some(folder))? {
            Payload::Reviews(reviews) => Ok(reviews),
            _ => Err(mismatch(Mode::Reviews)),
        }
    }

    fn cover_url(&self, folder: &str) -> String {
        format!("/books/{}/cover.jpg", encode_folder(folder))
    }
}

/// Where the pages get their data from.
#[derive(Debug, Clone)]
pub enum Source {
    Local(LocalService),
    Remote(HttpService),
}

impl BookService for Source {
    async fn books(&self) -> ServiceResult<BookList> {
        match self {
            Source::Local(service) => service.books().await,
            Source::Remote(service) => service.books().await,
        }
    }

    async fn description(&self, folder: &str) -> ServiceResult<String> {
        match self {
            Source::Local(service) => service.description(folder).await,
            Source::Remote(service) => service.description(folder).await,
        }
    }

    async fn info(&self, folder: &str) -> ServiceResult<BookInfo> {
        match self {
            Source::Local(service) => service.info(folder).await,
            Source::Remote(service) => service.info(folder).await,
        }
    }

    async fn reviews(&self, folder: &str) -> ServiceResult<Vec<Review>> {
        match self {
            Source::Local(service) => service.reviews(folder).await,
            Source::Remote(service) => service.reviews(folder).await,
        }
    }

    fn cover_url(&self, folder: &str) -> String {
        match self {
            Source::Local(service) => service.cover_url(folder),
            Source::Remote(service) => service.cover_url(folder),
        }
    }
}
