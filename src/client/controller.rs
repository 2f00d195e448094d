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

use crate::client::service::BookService;
use crate::types::book::BookInfo;
use crate::types::review::Review;

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The page was opened.
    Load,
    /// A book in the list was clicked.
    Open(String),
    /// The back button was clicked.
    Back,
}

/// A book as it appears in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCard {
    pub title: String,
    pub folder: String,
    pub cover_url: String,
}

/// Everything shown about a single book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetail {
    pub folder: String,
    pub cover_url: String,
    pub info: BookInfo,
    pub description: String,
    pub reviews: Vec<Review>,
}

/// What the page is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Empty,
    List(Vec<BookCard>),
    Detail(BookDetail),
    Error(String),
}

/// Turns events into requests, and request results into views.
pub struct Controller<S: BookService> {
    service: S,
    view: View,
}

impl<S: BookService> Controller<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            view: View::Empty,
        }
    }

    #[cfg(test)]
    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn into_view(self) -> View {
        self.view
    }

    pub async fn handle(&mut self, event: Event) {
        log::debug!("Handling {event:?}");
        match event {
            Event::Load | Event::Back => self.show_list().await,
            Event::Open(folder) => self.show_book(folder).await,
        }
    }

    /// The list is always requested, but only rendered if it isn't already
    /// on screen.
    async fn show_list(&mut self) {
        match self.service.books().await {
            Ok(list) => {
                if !matches!(self.view, View::List(_)) {
                    let cards = list
                        .books
                        .into_iter()
                        .map(|book| BookCard {
                            cover_url: self.service.cover_url(&book.folder),
                            title: book.title,
                            folder: book.folder,
                        })
                        .collect();
                    self.view = View::List(cards);
                }
            }
            Err(e) => self.view = View::Error(e.message),
        }
    }

    async fn show_book(&mut self, folder: String) {
        let (description, info, reviews) = tokio::join!(
            self.service.description(&folder),
            self.service.info(&folder),
            self.service.reviews(&folder),
        );
        self.view = match (description, info, reviews) {
            (Ok(description), Ok(info), Ok(reviews)) => View::Detail(BookDetail {
                cover_url: self.service.cover_url(&folder),
                folder,
                info,
                description,
                reviews,
            }),
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => View::Error(e.message),
        };
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::client::service::ServiceError;
    use crate::client::service::ServiceResult;
    use crate::types::book::BookList;
    use crate::types::book::BookSummary;

    /// Records every request, and fails the ones about `broken`.
    struct FakeService {
        requests: Mutex<Vec<String>>,
        books_fail: bool,
    }

    impl FakeService {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                books_fail: false,
            }
        }

        fn record(&self, request: &str) {
            self.requests.lock().unwrap().push(request.to_string());
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }

        fn check(&self, folder: &str) -> ServiceResult<()> {
            if folder == "broken" {
                Err(ServiceError::new("Error: Please provide a valid book name."))
            } else {
                Ok(())
            }
        }
    }

    impl BookService for &FakeService {
        async fn books(&self) -> ServiceResult<BookList> {
            self.record("books");
            if self.books_fail {
                return Err(ServiceError::new("Error: Something broke."));
            }
            Ok(BookList {
                books: vec![BookSummary {
                    title: "The Hobbit".to_string(),
                    folder: "hobbit".to_string(),
                }],
            })
        }

        async fn description(&self, folder: &str) -> ServiceResult<String> {
            self.record(&format!("description {folder}"));
            self.check(folder)?;
            Ok("In a hole in the ground.".to_string())
        }

        async fn info(&self, folder: &str) -> ServiceResult<BookInfo> {
            self.record(&format!("info {folder}"));
            self.check(folder)?;
            Ok(BookInfo {
                title: "The Hobbit".to_string(),
                author: "J.R.R. Tolkien".to_string(),
                stars: "4.5".to_string(),
            })
        }

        async fn reviews(&self, folder: &str) -> ServiceResult<Vec<Review>> {
            self.record(&format!("reviews {folder}"));
            self.check(folder)?;
            Ok(vec![
                Review::from_lines("Ann\n5\nLovely."),
                Review::from_lines("Ben\n3\nLong."),
            ])
        }

        fn cover_url(&self, folder: &str) -> String {
            format!("/books/{folder}/cover.jpg")
        }
    }

    #[tokio::test]
    async fn test_load_issues_one_request() {
        let service = FakeService::new();
        let mut controller = Controller::new(&service);
        controller.handle(Event::Load).await;
        assert_eq!(service.requests(), vec!["books"]);
        let View::List(cards) = controller.view() else {
            panic!("expected the list view");
        };
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].cover_url, "/books/hobbit/cover.jpg");
    }

    #[tokio::test]
    async fn test_open_issues_three_requests() {
        let service = FakeService::new();
        let mut controller = Controller::new(&service);
        controller.handle(Event::Load).await;
        controller.handle(Event::Open("hobbit".to_string())).await;
        let mut requests = service.requests();
        requests.sort();
        assert_eq!(
            requests,
            vec!["books", "description hobbit", "info hobbit", "reviews hobbit"]
        );
        let View::Detail(detail) = controller.view() else {
            panic!("expected the detail view");
        };
        assert_eq!(detail.info.author, "J.R.R. Tolkien");
        assert_eq!(detail.description, "In a hole in the ground.");
        let names: Vec<&str> = detail.reviews.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Ben"]);
    }

    #[tokio::test]
    async fn test_back_requests_the_list_again() {
        let service = FakeService::new();
        let mut controller = Controller::new(&service);
        controller.handle(Event::Load).await;
        controller.handle(Event::Open("hobbit".to_string())).await;
        controller.handle(Event::Back).await;
        assert_eq!(service.requests().last().unwrap(), "books");
        assert!(matches!(controller.view(), View::List(_)));
    }

    #[tokio::test]
    async fn test_back_on_the_list_still_requests() {
        let service = FakeService::new();
        let mut controller = Controller::new(&service);
        controller.handle(Event::Load).await;
        let before = controller.view().clone();
        controller.handle(Event::Back).await;
        assert_eq!(service.requests(), vec!["books", "books"]);
        assert_eq!(controller.view(), &before);
    }

    #[tokio::test]
    async fn test_failure_shows_the_error() {
        let service = FakeService::new();
        let mut controller = Controller::new(&service);
        controller.handle(Event::Load).await;
        controller.handle(Event::Open("broken".to_string())).await;
        assert_eq!(service.requests().len(), 4);
        assert_eq!(
            controller.into_view(),
            View::Error("Error: Please provide a valid book name.".to_string())
        );
    }

    #[tokio::test]
    async fn test_list_failure_shows_the_error() {
        let service = FakeService {
            books_fail: true,
            ..FakeService::new()
        };
        let mut controller = Controller::new(&service);
        controller.handle(Event::Load).await;
        assert_eq!(
            controller.view(),
            &View::Error("Error: Something broke.".to_string())
        );
    }
}
