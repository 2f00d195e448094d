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

use reqwest::Client;
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::client::service::BookService;
use crate::client::service::ServiceError;
use crate::client::service::ServiceResult;
use crate::client::service::encode_folder;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::book::BookInfo;
use crate::types::book::BookList;
use crate::types::mode::Mode;
use crate::types::review::Review;

/// Talks to a bestreads server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpService {
    base: Url,
    client: Client,
}

impl HttpService {
    /// `base` is the server's root URL, e.g. `http://localhost:8000/`.
    pub fn new(base: &str) -> Fallible<Self> {
        let mut base: Url =
            Url::parse(base).map_err(|e| ErrorReport::new(&format!("invalid URL {base}: {e}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            base,
            client: Client::new(),
        })
    }

    fn endpoint(&self, mode: Mode, folder: Option<&str>) -> ServiceResult<Url> {
        let mut url = self
            .base
            .join("api")
            .map_err(|e| ServiceError::new(e.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("mode", mode.as_str());
            if let Some(folder) = folder {
                pairs.append_pair("title", folder);
            }
        }
        Ok(url)
    }

    /// Sends a request and returns the body. Any status outside 2xx is a
    /// failure carrying the body as its message.
    async fn fetch(&self, mode: Mode, folder: Option<&str>) -> ServiceResult<String> {
        let url = self.endpoint(mode, folder)?;
        log::debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ServiceError::new(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::new(e.to_string()))?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(ServiceError::new(body))
        }
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        mode: Mode,
        folder: Option<&str>,
    ) -> ServiceResult<T> {
        let body = self.fetch(mode, folder).await?;
        serde_json::from_str(&body).map_err(|e| ServiceError::new(e.to_string()))
    }
}

impl BookService for HttpService {
    async fn books(&self) -> ServiceResult<BookList> {
        self.fetch_json(Mode::Books, None).await
    }

    async fn description(&self, folder: &str) -> ServiceResult<String> {
        self.fetch(Mode::Description, Some(folder)).await
    }

    async fn info(&self, folder: &str) -> ServiceResult<BookInfo> {
        self.fetch_json(Mode::Info, Some(folder)).await
    }

    async fn reviews(&self, folder: &str) -> ServiceResult<Vec<Review>> {
        self.fetch_json(Mode::Reviews, Some(folder)).await
    }

    fn cover_url(&self, folder: &str) -> String {
        format!("{}books/{}/cover.jpg", self.base, encode_folder(folder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() -> Fallible<()> {
        let service = HttpService::new("http://localhost:8000")?;
        let url = service.endpoint(Mode::Info, Some("harry potter")).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api?mode=info&title=harry+potter"
        );
        let url = service.endpoint(Mode::Books, None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api?mode=books");
        Ok(())
    }

    #[test]
    fn test_base_with_path() -> Fallible<()> {
        let service = HttpService::new("http://example.com/bestreads")?;
        let url = service.endpoint(Mode::Books, None).unwrap();
        assert_eq!(url.as_str(), "http://example.com/bestreads/api?mode=books");
        assert_eq!(
            service.cover_url("hobbit"),
            "http://example.com/bestreads/books/hobbit/cover.jpg"
        );
        Ok(())
    }

    #[test]
    fn test_invalid_base() {
        assert!(HttpService::new("not a url").is_err());
    }

    #[tokio::test]
    async fn test_connection_refused_is_a_failure() -> Fallible<()> {
        let port = portpicker::pick_unused_port().unwrap();
        let service = HttpService::new(&format!("http://127.0.0.1:{port}/"))?;
        let result = service.books().await;
        assert!(result.is_err());
        Ok(())
    }
}
