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
use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use crate::error::Fallible;
use crate::error::fail;
use crate::library::COVER_FILE;
use crate::library::DESCRIPTION_FILE;
use crate::library::INFO_FILE;
use crate::library::Library;
use crate::types::book::BookInfo;
use crate::types::mode::Mode;
use crate::types::review::Review;

#[derive(Debug, PartialEq)]
pub enum Problem {
    MissingInfo,
    ShortInfo { lines: usize },
    MissingDescription,
    MissingCover,
    /// The reviews mode rejects a book without a first review.
    NoReviews,
    MalformedReview { file: String, lines: usize },
    /// The file is there, but is not readable UTF-8 text.
    Unreadable { file: String },
}

impl Display for Problem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Problem::MissingInfo => write!(f, "missing {INFO_FILE}"),
            Problem::ShortInfo { lines } => write!(
                f,
                "{INFO_FILE} has {lines} lines, expected at least {}",
                BookInfo::FIELDS
            ),
            Problem::MissingDescription => write!(f, "missing {DESCRIPTION_FILE}"),
            Problem::MissingCover => write!(f, "missing {COVER_FILE}"),
            Problem::NoReviews => write!(f, "no reviews"),
            Problem::MalformedReview { file, lines } => write!(
                f,
                "{file} has {lines} lines, expected {}",
                Review::FIELDS
            ),
            Problem::Unreadable { file } => write!(f, "{file} is not readable text"),
        }
    }
}

/// Finds every problem in every folder of the library, in folder order.
pub fn find_problems(library: &Library) -> Fallible<Vec<(String, Problem)>> {
    let mut problems = Vec::new();
    for folder in library.directories()? {
        for problem in check_folder(library, &folder)? {
            problems.push((folder.clone(), problem));
        }
    }
    Ok(problems)
}

fn check_folder(library: &Library, folder: &str) -> Fallible<Vec<Problem>> {
    let mut problems = Vec::new();
    match library.book_file(folder, INFO_FILE) {
        Some(path) => match count_lines(&path) {
            Some(lines) if lines < BookInfo::FIELDS => {
                problems.push(Problem::ShortInfo { lines });
            }
            Some(_) => {}
            None => problems.push(unreadable(&path)),
        },
        None => problems.push(Problem::MissingInfo),
    }
    match library.book_file(folder, DESCRIPTION_FILE) {
        Some(path) => {
            if count_lines(&path).is_none() {
                problems.push(unreadable(&path));
            }
        }
        None => problems.push(Problem::MissingDescription),
    }
    if library.book_file(folder, COVER_FILE).is_none() {
        problems.push(Problem::MissingCover);
    }
    if !library.has_marker(Mode::Reviews, folder) {
        problems.push(Problem::NoReviews);
    }
    for path in library.review_files(folder)? {
        match count_lines(&path) {
            Some(lines) if lines != Review::FIELDS => {
                let file = file_name(&path);
                problems.push(Problem::MalformedReview { file, lines });
            }
            Some(_) => {}
            None => problems.push(unreadable(&path)),
        }
    }
    Ok(problems)
}

/// The number of lines in a text file, or `None` if it can't be read as
/// UTF-8 text.
fn count_lines(path: &Path) -> Option<usize> {
    match read_to_string(path) {
        Ok(content) => Some(content.lines().count()),
        Err(e) => {
            log::debug!("Failed to read {path:?}: {e}");
            None
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn unreadable(path: &Path) -> Problem {
    Problem::Unreadable {
        file: file_name(path),
    }
}

pub fn check_library(directory: Option<String>) -> Fallible<()> {
    let directory: PathBuf = match directory {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(crate::config::DEFAULT_BOOKS),
    };
    let library = Library::new(directory)?;
    let problems = find_problems(&library)?;
    if problems.is_empty() {
        println!("ok");
        return Ok(());
    }
    for (folder, problem) in &problems {
        println!("{folder}: {problem}");
    }
    fail(&format!("found {} problems.", problems.len()))
}
