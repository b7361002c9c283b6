// Reading List Core - Reading list tracker for mobile
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Remote catalog of import candidates
//!
//! The import workflow asks a `BookSource` for a list of title/author pairs.
//! `ApiClient` is the HTTP implementation; tests plug in canned sources.
//!
//! # Payload
//! A JSON array of objects with at least a `title` string and an optional
//! `author` string. Any other fields (`id`, `body`, `userId`, ...) are ignored.
//! ```json
//! [
//!   { "title": "Dune", "author": "Frank Herbert" },
//!   { "title": "sunt aut facere", "body": "...", "userId": 1, "id": 1 }
//! ]
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::client::ApiClient;
use crate::error::Result;

/// One import candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteBook {
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
}

impl RemoteBook {
    pub fn new<S: Into<String>>(title: S, author: Option<&str>) -> Self {
        Self {
            title: title.into(),
            author: author.map(str::to_string),
        }
    }
}

/// Source of import candidates
#[async_trait]
pub trait BookSource: Send + Sync {
    /// Fetch the full candidate list
    ///
    /// Transport failures, non-2xx responses and malformed payloads are all
    /// errors; an empty list is a successful fetch.
    async fn fetch_candidates(&self) -> Result<Vec<RemoteBook>>;
}

#[async_trait]
impl BookSource for ApiClient {
    async fn fetch_candidates(&self) -> Result<Vec<RemoteBook>> {
        self.get_json::<Vec<RemoteBook>>().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_book_ignores_unknown_fields() {
        let json = r#"[{"userId":1,"id":1,"title":"sunt aut facere","body":"quia et"}]"#;
        let books: Vec<RemoteBook> = serde_json::from_str(json).unwrap();
        assert_eq!(books, vec![RemoteBook::new("sunt aut facere", None)]);
    }

    #[test]
    fn test_remote_book_reads_author() {
        let json = r#"[{"title":"Dune","author":"Frank Herbert"}]"#;
        let books: Vec<RemoteBook> = serde_json::from_str(json).unwrap();
        assert_eq!(books[0].author.as_deref(), Some("Frank Herbert"));
    }

    #[test]
    fn test_remote_book_requires_title() {
        let json = r#"[{"author":"Nobody"}]"#;
        assert!(serde_json::from_str::<Vec<RemoteBook>>(json).is_err());
    }

    #[test]
    fn test_payload_must_be_a_list() {
        let json = r#"{"title":"Dune"}"#;
        assert!(serde_json::from_str::<Vec<RemoteBook>>(json).is_err());
    }
}
