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

use serde::Deserialize;
use serde::Serialize;

/// An entry in the book list: the title shown to the user, and the folder
/// that identifies the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub title: String,
    pub folder: String,
}

/// The response body of the `books` mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookList {
    pub books: Vec<BookSummary>,
}

/// The first three lines of a book's `info.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInfo {
    pub title: String,
    pub author: String,
    pub stars: String,
}

impl BookInfo {
    pub const FIELDS: usize = 3;

    pub fn from_lines(content: &str) -> Self {
        let [title, author, stars] = positional_fields::<3>(content);
        Self {
            title,
            author,
            stars,
        }
    }
}

/// Reads the first `N` lines of a file, trimmed. Lines that are not there
/// come back as the empty string.
pub fn positional_fields<const N: usize>(content: &str) -> [String; N] {
    let mut lines = content.lines();
    std::array::from_fn(|_| lines.next().unwrap_or_default().trim().to_string())
}
