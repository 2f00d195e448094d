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

use std::fs::read_to_string;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::book::BookInfo;
use crate::types::book::BookSummary;
use crate::types::book::positional_fields;
use crate::types::mode::Mode;
use crate::types::review::Review;

pub const INFO_FILE: &str = "info.txt";
pub const DESCRIPTION_FILE: &str = "description.txt";
pub const COVER_FILE: &str = "cover.jpg";

/// A directory of books: one folder per book, each holding plain text files.
///
/// Nothing is cached. Every call goes back to the disk.
#[derive(Debug, Clone)]
pub struct Library {
    root: PathBuf,
}

impl Library {
    pub fn new(root: PathBuf) -> Fallible<Self> {
        if !root.is_dir() {
            return fail("books directory does not exist.");
        }
        Ok(Self {
            root: root.canonicalize()?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every directory under the root, in file name order.
    pub fn directories(&self) -> Fallible<Vec<String>> {
        let mut folders = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                continue;
            }
            match entry.file_name().to_str() {
                Some(folder) => folders.push(folder.to_string()),
                None => log::warn!("Skipping non UTF-8 folder {:?}.", entry.path()),
            }
        }
        Ok(folders)
    }

    /// The folders of every book, in file name order. A folder is a book if
    /// it has an `info.txt`.
    pub fn folders(&self) -> Fallible<Vec<String>> {
        let mut folders = Vec::new();
        for folder in self.directories()? {
            if self.book_file(&folder, INFO_FILE).is_some() {
                folders.push(folder);
            } else {
                log::debug!("Skipping {folder}: no {INFO_FILE}.");
            }
        }
        Ok(folders)
    }

    pub fn books(&self) -> Fallible<Vec<BookSummary>> {
        let mut books = Vec::new();
        for folder in self.folders()? {
            let content = read_to_string(self.root.join(&folder).join(INFO_FILE))?;
            let [title] = positional_fields::<1>(&content);
            books.push(BookSummary { title, folder });
        }
        Ok(books)
    }

    /// Resolves a user-provided folder name to its directory. Returns `None`
    /// for anything that is not a single plain path component, or that does
    /// not exist.
    pub fn book_dir(&self, folder: &str) -> Option<PathBuf> {
        let mut components = Path::new(folder).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == folder => {}
            _ => return None,
        }
        let path = self.root.join(folder);
        if path.is_dir() && !path.is_symlink() {
            Some(path)
        } else {
            None
        }
    }

    /// Resolves a file inside a book folder. Symbolic links and anything that
    /// is not a regular file are rejected.
    pub fn book_file(&self, folder: &str, name: &str) -> Option<PathBuf> {
        let path = self.book_dir(folder)?.join(name);
        if path.is_file() && !path.is_symlink() {
            Some(path)
        } else {
            None
        }
    }

    /// Is `folder` a valid title for `mode`? Every mode checks its own
    /// marker file.
    pub fn has_marker(&self, mode: Mode, folder: &str) -> bool {
        match mode.marker() {
            Some(marker) => self.book_file(folder, marker).is_some(),
            None => true,
        }
    }

    pub fn description(&self, folder: &str) -> Fallible<String> {
        let content = self.read(folder, DESCRIPTION_FILE)?;
        Ok(content.trim().to_string())
    }

    pub fn info(&self, folder: &str) -> Fallible<BookInfo> {
        let content = self.read(folder, INFO_FILE)?;
        Ok(BookInfo::from_lines(&content))
    }

    /// Every `review*.txt` file in the folder, in file name order.
    pub fn reviews(&self, folder: &str) -> Fallible<Vec<Review>> {
        let mut reviews = Vec::new();
        for path in self.review_files(folder)? {
            let content = read_to_string(path)?;
            reviews.push(Review::from_lines(&content));
        }
        Ok(reviews)
    }

    pub fn review_files(&self, folder: &str) -> Fallible<Vec<PathBuf>> {
        let Some(dir) = self.book_dir(folder) else {
            return fail("no such book.");
        };
        let mut files = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if entry.file_type().is_file() && is_review_file(entry.file_name().to_str()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn read(&self, folder: &str, name: &str) -> Fallible<String> {
        match self.book_file(folder, name) {
            Some(path) => Ok(read_to_string(path)?),
            None => fail(&format!("{folder}/{name} does not exist.")),
        }
    }
}

fn is_review_file(name: Option<&str>) -> bool {
    name.is_some_and(|name| name.starts_with("review") && name.ends_with(".txt"))
}

#[cfg(test)]
mod tests {
    use std::fs::create_dir;
    use std::fs::write;
    use std::os::unix::fs::symlink;

    use super::*;
    use crate::helper::create_tmp_directory;

    fn fixture() -> Library {
        Library::new(PathBuf::from("./test/books")).unwrap()
    }

    #[test]
    fn test_non_existent_directory() {
        assert!(Library::new(PathBuf::from("./derpherp")).is_err());
    }

    #[test]
    fn test_books_in_name_order() -> Fallible<()> {
        let books = fixture().books()?;
        let folders: Vec<&str> = books.iter().map(|b| b.folder.as_str()).collect();
        assert_eq!(folders, vec!["harrypotter", "hobbit", "mockingbird"]);
        assert_eq!(books[0].title, "Harry Potter and the Sorcerer's Stone");
        Ok(())
    }

    #[test]
    fn test_folders_without_info_are_not_books() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        create_dir(dir.join("real"))?;
        write(dir.join("real").join(INFO_FILE), "Real\nSomeone\n3\n")?;
        create_dir(dir.join("empty"))?;
        write(dir.join("stray.txt"), "not a book")?;
        let library = Library::new(dir)?;
        assert_eq!(library.folders()?, vec!["real".to_string()]);
        Ok(())
    }

    #[test]
    fn test_info() -> Fallible<()> {
        let info = fixture().info("hobbit")?;
        assert_eq!(info.title, "The Hobbit");
        assert_eq!(info.author, "J.R.R. Tolkien");
        assert_eq!(info.stars, "4.5");
        Ok(())
    }

    #[test]
    fn test_description_is_trimmed() -> Fallible<()> {
        let description = fixture().description("mockingbird")?;
        assert!(description.starts_with("The unforgettable novel"));
        assert!(!description.ends_with('\n'));
        Ok(())
    }

    #[test]
    fn test_reviews_in_name_order() -> Fallible<()> {
        let reviews = fixture().reviews("harrypotter")?;
        let names: Vec<&str> = reviews.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Amanda", "Carla", "Bert"]);
        assert_eq!(reviews[0].score, "5");
        Ok(())
    }

    #[test]
    fn test_markers_are_independent() {
        let library = fixture();
        assert!(library.has_marker(Mode::Description, "hobbit"));
        assert!(library.has_marker(Mode::Info, "hobbit"));
        assert!(!library.has_marker(Mode::Reviews, "hobbit"));
        assert!(library.has_marker(Mode::Reviews, "harrypotter"));
        assert!(library.has_marker(Mode::Books, "anything"));
    }

    #[test]
    fn test_book_dir_rejects_traversal() {
        let library = fixture();
        assert!(library.book_dir("").is_none());
        assert!(library.book_dir(".").is_none());
        assert!(library.book_dir("..").is_none());
        assert!(library.book_dir("../books/hobbit").is_none());
        assert!(library.book_dir("hobbit/").is_none());
        assert!(library.book_dir("/etc").is_none());
        assert!(library.book_dir("doesnotexist").is_none());
        assert!(library.book_dir("hobbit").is_some());
    }

    #[test]
    fn test_symlinked_marker_is_rejected() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        create_dir(dir.join("book"))?;
        let outside = create_tmp_directory()?.join("secret.txt");
        write(&outside, "secret")?;
        symlink(&outside, dir.join("book").join(DESCRIPTION_FILE))?;
        let library = Library::new(dir)?;
        assert!(!library.has_marker(Mode::Description, "book"));
        Ok(())
    }
}
