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
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;

pub const CONFIG_FILE: &str = "bestreads.toml";
pub const DEFAULT_BOOKS: &str = "books";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

/// The contents of `bestreads.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub books: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub upstream: Option<String>,
    pub open: Option<bool>,
}

impl ConfigFile {
    pub fn parse(content: &str) -> Fallible<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads the configuration from `path` if given, which must exist.
    /// Otherwise, loads `bestreads.toml` from the current directory if it is
    /// there.
    pub fn load(path: Option<&Path>) -> Fallible<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return fail("configuration file does not exist.");
                }
                log::debug!("Loading configuration from {path:?}.");
                Self::parse(&read_to_string(path)?)
            }
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.exists() {
                    log::debug!("Loading configuration from {CONFIG_FILE}.");
                    Self::parse(&read_to_string(path)?)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Command line values. These take precedence over the file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub books: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub upstream: Option<String>,
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// The directory holding one folder per book.
    pub books: PathBuf,
    pub host: String,
    pub port: u16,
    /// Render pages from a remote server's API instead of `books`.
    pub upstream: Option<String>,
    /// Open the page in a browser once the server is up.
    pub open: bool,
}

impl ServerConfig {
    pub fn resolve(file: ConfigFile, overrides: Overrides) -> Self {
        Self {
            books: overrides
                .books
                .or(file.books)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BOOKS)),
            host: overrides
                .host
                .or(file.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
            upstream: overrides.upstream.or(file.upstream),
            open: overrides.open || file.open.unwrap_or(false),
        }
    }

    pub fn bind(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use super::*;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::resolve(ConfigFile::default(), Overrides::default());
        assert_eq!(config.books, PathBuf::from("books"));
        assert_eq!(config.bind(), "127.0.0.1:8000");
        assert_eq!(config.upstream, None);
        assert!(!config.open);
    }

    #[test]
    fn test_parse() -> Fallible<()> {
        let file = ConfigFile::parse("books = \"/srv/books\"\nport = 9000\nopen = true\n")?;
        assert_eq!(file.books, Some(PathBuf::from("/srv/books")));
        assert_eq!(file.port, Some(9000));
        assert_eq!(file.open, Some(true));
        assert_eq!(file.host, None);
        Ok(())
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(ConfigFile::parse("colour = \"blue\"\n").is_err());
    }

    #[test]
    fn test_overrides_win() -> Fallible<()> {
        let file = ConfigFile::parse("host = \"0.0.0.0\"\nport = 9000\n")?;
        let overrides = Overrides {
            port: Some(9001),
            ..Overrides::default()
        };
        let config = ServerConfig::resolve(file, overrides);
        assert_eq!(config.bind(), "0.0.0.0:9001");
        Ok(())
    }

    #[test]
    fn test_load_explicit_path() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("custom.toml");
        write(&path, "upstream = \"http://books.example.com/\"\n")?;
        let file = ConfigFile::load(Some(&path))?;
        assert_eq!(file.upstream.as_deref(), Some("http://books.example.com/"));
        Ok(())
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = ConfigFile::load(Some(Path::new("./derpherp.toml")));
        assert!(result.is_err());
    }
}
