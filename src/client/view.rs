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

use maud::Markup;
use maud::html;

use crate::client::controller::BookCard;
use crate::client::controller::BookDetail;
use crate::client::controller::View;
use crate::client::service::encode_folder;
use crate::client::template::page_template;

/// Renders a whole page for the given view.
pub fn render_page(view: &View) -> Markup {
    page_template(render(view))
}

pub fn render(view: &View) -> Markup {
    match view {
        View::Empty => html! {},
        View::List(books) => render_list(books),
        View::Detail(book) => render_detail(book),
        View::Error(message) => render_error(message),
    }
}

fn render_list(books: &[BookCard]) -> Markup {
    html! {
        div #allbooks {
            @for book in books {
                a.book href=(format!("/book/{}", encode_folder(&book.folder))) {
                    img src=(book.cover_url) alt=(book.folder);
                    p { (book.title) }
                }
            }
        }
    }
}

fn render_detail(book: &BookDetail) -> Markup {
    html! {
        div #singlebook {
            img #cover src=(book.cover_url) alt=(book.folder);
            div.details {
                h2 #title { (book.info.title) }
                p #author { (book.info.author) }
                p {
                    span #stars { (book.info.stars) }
                    " stars"
                }
                p #description { (book.description) }
                div #reviews {
                    @for review in &book.reviews {
                        h3 {
                            (review.name)
                            span { " " (review.score) }
                        }
                        p { (review.text) }
                    }
                }
            }
        }
    }
}

fn render_error(message: &str) -> Markup {
    html! {
        div #error-message {
            p #error-text { (message) }
        }
    }
}
