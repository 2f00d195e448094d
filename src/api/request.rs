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

use std::collections::HashMap;

use crate::api::error::ApiError;
use crate::library::Library;
use crate::types::mode::Mode;

/// The raw query parameters of a request.
#[derive(Debug, Default, Clone)]
pub struct BookQuery {
    pub mode: Option<String>,
    pub title: Option<String>,
}

impl BookQuery {
    pub fn new(mode: Mode, title: Option<&str>) -> Self {
        Self {
            mode: Some(mode.as_str().to_string()),
            title: title.map(str::to_string),
        }
    }

    pub fn from_params(mut params: HashMap<String, String>) -> Self {
        Self {
            mode: params.remove("mode"),
            title: params.remove("title"),
        }
    }
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Books,
    Description(String),
    Info(String),
    Reviews(String),
}

/// Checks the query, in order: the mode, then the presence of a title, then
/// the mode's marker file in the title's folder.
pub fn validate(library: &Library, query: BookQuery) -> Result<Request, ApiError> {
    let mode: Mode = query
        .mode
        .as_deref()
        .and_then(|mode| mode.parse().ok())
        .ok_or(ApiError::InvalidMode)?;
    if !mode.needs_title() {
        return Ok(Request::Books);
    }
    let title: String = query.title.ok_or(ApiError::MissingTitle)?;
    if !library.has_marker(mode, &title) {
        return Err(ApiError::InvalidBook);
    }
    let request = match mode {
        Mode::Books => Request::Books,
        Mode::Description => Request::Description(title),
        Mode::Info => Request::Info(title),
        Mode::Reviews => Request::Reviews(title),
    };
    Ok(request)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn library() -> Library {
        Library::new(PathBuf::from("./test/books")).unwrap()
    }

    fn query(mode: Option<&str>, title: Option<&str>) -> BookQuery {
        BookQuery {
            mode: mode.map(str::to_string),
            title: title.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_mode() {
        let result = validate(&library(), query(None, Some("hobbit")));
        assert!(matches!(result, Err(ApiError::InvalidMode)));
    }

    #[test]
    fn test_unknown_mode_beats_missing_title() {
        let result = validate(&library(), query(Some("cover"), None));
        assert!(matches!(result, Err(ApiError::InvalidMode)));
    }

    #[test]
    fn test_missing_title() {
        for mode in ["description", "info", "reviews"] {
            let result = validate(&library(), query(Some(mode), None));
            assert!(matches!(result, Err(ApiError::MissingTitle)));
        }
    }

    #[test]
    fn test_books_ignores_title() {
        let result = validate(&library(), query(Some("books"), Some("doesnotexist")));
        assert_eq!(result.unwrap(), Request::Books);
    }

    #[test]
    fn test_invalid_book() {
        let result = validate(&library(), query(Some("info"), Some("doesnotexist")));
        assert!(matches!(result, Err(ApiError::InvalidBook)));
        let result = validate(&library(), query(Some("info"), Some("../books/hobbit")));
        assert!(matches!(result, Err(ApiError::InvalidBook)));
        let result = validate(&library(), query(Some("info"), Some("")));
        assert!(matches!(result, Err(ApiError::InvalidBook)));
    }

    #[test]
    fn test_reviewless_book_is_still_valid_for_info() {
        let result = validate(&library(), query(Some("info"), Some("hobbit")));
        assert_eq!(result.unwrap(), Request::Info("hobbit".to_string()));
        let result = validate(&library(), query(Some("description"), Some("hobbit")));
        assert_eq!(result.unwrap(), Request::Description("hobbit".to_string()));
        let result = validate(&library(), query(Some("reviews"), Some("hobbit")));
        assert!(matches!(result, Err(ApiError::InvalidBook)));
    }

    #[test]
    fn test_from_params() {
        let params = HashMap::from([
            ("mode".to_string(), "reviews".to_string()),
            ("title".to_string(), "harrypotter".to_string()),
            ("extra".to_string(), "ignored".to_string()),
        ]);
        let result = validate(&library(), BookQuery::from_params(params));
        assert_eq!(result.unwrap(), Request::Reviews("harrypotter".to_string()));
    }
}
