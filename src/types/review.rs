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

use crate::types::book::positional_fields;

/// A review, read from a `review*.txt` file: reviewer, score, and text, one
/// per line in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub name: String,
    pub score: String,
    pub text: String,
}

impl Review {
    pub const FIELDS: usize = 3;

    pub fn from_lines(content: &str) -> Self {
        let [name, score, text] = positional_fields::<3>(content);
        Self { name, score, text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_from_lines() {
        let review = Review::from_lines("Alice\n4\nGreat read.\n");
        assert_eq!(review.name, "Alice");
        assert_eq!(review.score, "4");
        assert_eq!(review.text, "Great read.");
    }

    #[test]
    fn test_review_field_order_in_json() {
        let review = Review::from_lines("Bob\n2\nMeh.");
        let json = serde_json::to_string(&review).unwrap();
        assert_eq!(json, r#"{"name":"Bob","score":"2","text":"Meh."}"#);
    }
}
