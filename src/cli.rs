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

use std::path::PathBuf;

use clap::Parser;

use crate::cmd::check::check_library;
use crate::cmd::serve::server::start_server;
use crate::config::ConfigFile;
use crate::config::Overrides;
use crate::config::ServerConfig;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Serve the book pages and the book data endpoint.
    Serve {
        /// Path to a configuration file. Defaults to `bestreads.toml`, if present.
        #[arg(long)]
        config: Option<PathBuf>,
        /// The directory holding one folder per book.
        #[arg(long)]
        books: Option<PathBuf>,
        /// The host to bind to.
        #[arg(long)]
        host: Option<String>,
        /// The port to listen on.
        #[arg(long)]
        port: Option<u16>,
        /// Render pages from the API of another bestreads server.
        #[arg(long)]
        upstream: Option<String>,
        /// Open the page in the browser once the server is up.
        #[arg(long)]
        open: bool,
    },
    /// Check a books directory for missing or malformed files.
    Check {
        /// Optional path to the books directory.
        directory: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve {
            config,
            books,
            host,
            port,
            upstream,
            open,
        } => {
            let file = ConfigFile::load(config.as_deref())?;
            let overrides = Overrides {
                books,
                host,
                port,
                upstream,
                open,
            };
            start_server(ServerConfig::resolve(file, overrides)).await
        }
        Command::Check { directory } => check_library(directory),
    }
}
