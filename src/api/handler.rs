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

use axum::extract::Query;
use axum::extract::State;

use crate::api::error::ApiError;
use crate::api::request::BookQuery;
use crate::api::request::validate;
use crate::api::response::Payload;
use crate::api::response::respond;
use crate::library::Library;

pub async fn api_handler(
    State(library): State<Library>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Payload, ApiError> {
    let query = BookQuery::from_params(params);
    log::debug!("API request: {query:?}");
    let request = validate(&library, query)?;
    respond(&library, request)
}
