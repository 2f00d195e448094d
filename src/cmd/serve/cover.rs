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

use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::response::Response;
use tokio::fs::read;

use crate::library::COVER_FILE;
use crate::library::Library;

pub async fn cover_handler(
    State(library): State<Library>,
    Path(folder): Path<String>,
) -> Response {
    let Some(path) = library.book_file(&folder, COVER_FILE) else {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    };
    match read(&path).await {
        Ok(bytes) => {
            let headers: [(HeaderName, &'static str); 1] = [(CONTENT_TYPE, "image/jpeg")];
            (StatusCode::OK, headers, bytes).into_response()
        }
        Err(e) => {
            log::error!("Failed to read {path:?}: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
