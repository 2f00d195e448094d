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
use std::str::FromStr;

/// Selects which piece of book data a request returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Books,
    Description,
    Info,
    Reviews,
}

impl Mode {
    /// Does this mode need a `title` parameter?
    pub fn needs_title(&self) -> bool {
        !matches!(self, Mode::Books)
    }

    /// The file whose presence in a book folder makes the title valid for
    /// this mode.
    pub fn marker(&self) -> Option<&'static str> {
        match self {
            Mode::Books => None,
            Mode::Description => Some("description.txt"),
            Mode::Info => Some("info.txt"),
            Mode::Reviews => Some("review1.txt"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Books => "books",
            Mode::Description => "description",
            Mode::Info => "info",
            Mode::Reviews => "reviews",
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, PartialEq)]
pub struct UnknownMode;

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "books" => Ok(Mode::Books),
            "description" => Ok(Mode::Description),
            "info" => Ok(Mode::Info),
            "reviews" => Ok(Mode::Reviews),
            _ => Err(UnknownMode),
        }
    }
}
