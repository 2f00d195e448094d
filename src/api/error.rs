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

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::error::ErrorReport;

/// Everything a request to the endpoint can fail with. The messages are
/// shown verbatim to the user.
#[derive(Debug)]
pub enum ApiError {
    /// `mode` is missing, or not one of the four known modes.
    InvalidMode,
    /// The mode needs a `title`, and there isn't one.
    MissingTitle,
    /// The title does not name a folder with the mode's marker file.
    InvalidBook,
    /// The files are there, but reading them failed.
    Unreadable(ErrorReport),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidMode | ApiError::MissingTitle | ApiError::InvalidBook => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unreadable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            ApiError::InvalidMode => {
                "Error: Please provide a mode of description, info, reviews, or books."
            }
            ApiError::MissingTitle => {
                "Error: Please remember to add the title parameter when using a mode of description, info or reviews."
            }
            ApiError::InvalidBook => "Error: Please provide a valid book name.",
            ApiError::Unreadable(_) => "Error: Could not read the book data.",
        };
        write!(f, "{message}")
    }
}

impl From<ErrorReport> for ApiError {
    fn from(value: ErrorReport) -> Self {
        ApiError::Unreadable(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Unreadable(report) => log::error!("{report}"),
            _ => log::debug!("Rejected request: {self}"),
        }
        (self.status(), self.to_string()).into_response()
    }
}
