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

use std::time::Duration;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::signal::ctrl_c;
use tokio::time::sleep;

use crate::api::handler::api_handler;
use crate::client::http::HttpService;
use crate::client::service::LocalService;
use crate::client::service::Source;
use crate::cmd::serve::cover::cover_handler;
use crate::cmd::serve::page::back_page;
use crate::cmd::serve::page::book_page;
use crate::cmd::serve::page::list_page;
use crate::cmd::serve::state::ServerState;
use crate::config::ServerConfig;
use crate::error::Fallible;
use crate::library::Library;

/// Builds the application. Without an upstream, the pages are rendered from
/// the local books directory, which is also served at `/api`.
pub fn app(config: &ServerConfig) -> Fallible<Router> {
    let (data, source) = match &config.upstream {
        Some(upstream) => {
            log::info!("Rendering pages from {upstream}.");
            (Router::new(), Source::Remote(HttpService::new(upstream)?))
        }
        None => {
            let library = Library::new(config.books.clone())?;
            log::info!("Serving books from {:?}.", library.root());
            let data = Router::new()
                .route("/api", get(api_handler))
                .route("/books/{folder}/cover.jpg", get(cover_handler))
                .with_state(library.clone());
            (data, Source::Local(LocalService::new(library)))
        }
    };
    let pages = Router::new()
        .route("/", get(list_page))
        .route("/back", get(back_page))
        .route("/book/{folder}", get(book_page))
        .route("/style.css", get(stylesheet))
        .with_state(ServerState { source });
    Ok(pages.merge(data).fallback(not_found_handler))
}

pub async fn start_server(config: ServerConfig) -> Fallible<()> {
    let app = app(&config)?;
    let bind = config.bind();

    if config.open {
        let url = format!("http://{bind}/");
        let target = bind.clone();
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(&target).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            if let Err(e) = open::that(&url) {
                log::warn!("Failed to open {url}: {e}");
            }
        });
    }

    log::info!("Starting server on {bind}");
    let listener = TcpListener::bind(&bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = ctrl_c().await;
            log::info!("Shutting down.");
        })
        .await?;
    Ok(())
}

async fn stylesheet() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
