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

use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;

use crate::client::controller::Controller;
use crate::client::controller::Event;
use crate::client::view::render_page;
use crate::cmd::serve::state::ServerState;

pub async fn list_page(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    show(state, Event::Load).await
}

pub async fn back_page(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    show(state, Event::Back).await
}

pub async fn book_page(
    State(state): State<ServerState>,
    Path(folder): Path<String>,
) -> (StatusCode, Html<String>) {
    show(state, Event::Open(folder)).await
}

async fn show(state: ServerState, event: Event) -> (StatusCode, Html<String>) {
    let mut controller = Controller::new(state.source);
    controller.handle(event).await;
    let html = render_page(&controller.into_view());
    (StatusCode::OK, Html(html.into_string()))
}
