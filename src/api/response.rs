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

use axum::Json;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::api::error::ApiError;
use crate::api::request::Request;
use crate::library::Library;
use crate::types::book::BookInfo;
use crate::types::book::BookList;
use crate::types::review::Review;

/// The successful answer to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Books(BookList),
    Description(String),
    Info(BookInfo),
    Reviews(Vec<Review>),
}

/// Reads what `request` asks for from the library.
pub fn respond(library: &Library, request: Request) -> Result<Payload, ApiError> {
    let payload = match request {
        Request::Books => Payload::Books(BookList {
            books: library.books()?,
        }),
        Request::Description(folder) => Payload::Description(library.description(&folder)?),
        Request::Info(folder) => Payload::Info(library.info(&folder)?),
        Request::Reviews(folder) => Payload::Reviews(library.reviews(&folder)?),
    };
    Ok(payload)
}

impl IntoResponse for Payload {
    fn into_response(self) -> Response {
        match self {
            Payload::Books(list) => Json(list).into_response(),
            Payload::Description(text) => {
                let headers: [(HeaderName, &'static str); 1] = [(CONTENT_TYPE, "text/plain")];
                (StatusCode::OK, headers, text).into_response()
            }
            Payload::Info(info) => Json(info).into_response(),
            Payload::Reviews(reviews) => Json(reviews).into_response(),
        }
    }
}
