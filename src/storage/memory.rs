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


//! In-memory book store
//!
//! Holds the authoritative collection for the lifetime of the process.
//! Each `MemoryStore` is isolated; tests build one per case.
//!
//! # Invariants
//! - Ids come from a counter that only moves forward, so a deleted id is
//!   never handed out again.
//! - The collection keeps insertion order; updates merge in place.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::storage::models::{Book, BookId, BookPatch, BookStatus};
use crate::storage::store::BookStore;

/// Starter records appended by `seed()` (title, author)
pub const SEED_BOOKS: [(&str, &str); 2] = [
    ("Clean Code", "Robert C. Martin"),
    ("Atomic Habits", "James Clear"),
];

#[derive(Debug)]
struct Inner {
    books: Vec<Book>,
    next_id: BookId,
}

impl Inner {
    fn push(&mut self, title: &str, author: Option<&str>) -> Book {
        let book = Book {
            id: self.next_id,
            title: title.to_string(),
            author: author.map(str::to_string),
            status: BookStatus::Planning,
            created_at: Utc::now(),
        };
        self.next_id += 1;
        self.books.push(book.clone());
        book
    }
}

#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                books: Vec::new(),
                next_id: 1,
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.books.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.books.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn seed(&self) -> Result<()> {
        let mut inner = self.inner.write().await;
        if !inner.books.is_empty() {
            return Ok(());
        }

        for (title, author) in SEED_BOOKS {
            inner.push(title, Some(author));
        }
        debug!(count = SEED_BOOKS.len(), "seeded book store");
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Book>> {
        Ok(self.inner.read().await.books.clone())
    }

    async fn insert(&self, title: &str, author: Option<&str>) -> Result<Book> {
        let book = self.inner.write().await.push(title, author);
        debug!(book_id = book.id, "inserted book");
        Ok(book)
    }

    async fn update(&self, id: BookId, patch: BookPatch) -> Result<Option<Book>> {
        let mut inner = self.inner.write().await;
        match inner.books.iter_mut().find(|b| b.id == id) {
            Some(book) => {
                patch.apply_to(book);
                debug!(book_id = id, "updated book");
                Ok(Some(book.clone()))
            }
            None => {
                debug!(book_id = id, "update skipped, no such book");
                Ok(None)
            }
        }
    }

    async fn delete(&self, id: BookId) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.books.len();
        inner.books.retain(|b| b.id != id);
        debug!(book_id = id, removed = before != inner.books.len(), "deleted book");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_increasing_unique_ids() {
        let store = MemoryStore::new();
        let mut ids = Vec::new();
        for i in 0..5 {
            let book = store.insert(&format!("Book {}", i), None).await.unwrap();
            assert_eq!(book.status, BookStatus::Planning);
            ids.push(book.id);
        }
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_insert_does_not_validate_title() {
        let store = MemoryStore::new();
        let book = store.insert("", None).await.unwrap();
        assert_eq!(book.title, "");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_deleted_ids_are_not_reused() {
        let store = MemoryStore::new();
        let first = store.insert("First", None).await.unwrap();
        let second = store.insert("Second", None).await.unwrap();
        store.delete(second.id).await.unwrap();

        let third = store.insert("Third", None).await.unwrap();
        assert!(third.id > second.id);
        assert!(third.id > first.id);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store = MemoryStore::new();
        store.seed().await.unwrap();
        store.seed().await.unwrap();

        let books = store.all().await.unwrap();
        assert_eq!(books.len(), SEED_BOOKS.len());
        assert_eq!(books[0].title, "Clean Code");
        assert_eq!(books[1].title, "Atomic Habits");
        assert_eq!(books[0].id, 1);
        assert_eq!(books[1].id, 2);
        assert!(books.iter().all(|b| b.status == BookStatus::Planning));
    }

    #[tokio::test]
    async fn test_seed_on_non_empty_store_is_noop() {
        let store = MemoryStore::new();
        store.insert("Refactoring", Some("Martin Fowler")).await.unwrap();
        store.seed().await.unwrap();

        let books = store.all().await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Refactoring");
    }

    #[tokio::test]
    async fn test_update_merges_status_only() {
        let store = MemoryStore::new();
        store.seed().await.unwrap();
        let before = store.all().await.unwrap();

        let updated = store
            .update(1, BookPatch::new().status(BookStatus::Reading))
            .await
            .unwrap()
            .expect("book 1 exists");
        assert_eq!(updated.status, BookStatus::Reading);

        let after = store.all().await.unwrap();
        let matching: Vec<_> = after.iter().filter(|b| b.id == 1).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].status, BookStatus::Reading);
        assert_eq!(matching[0].title, before[0].title);
        assert_eq!(matching[0].author, before[0].author);
        assert_eq!(matching[0].created_at, before[0].created_at);
        assert_eq!(after[1], before[1]);
    }

    #[tokio::test]
    async fn test_update_keeps_insertion_order() {
        let store = MemoryStore::new();
        store.seed().await.unwrap();
        store.update(1, BookPatch::new().title("Zzz")).await.unwrap();

        let titles: Vec<_> = store.all().await.unwrap().into_iter().map(|b| b.title).collect();
        assert_eq!(titles, vec!["Zzz", "Atomic Habits"]);
    }

    #[tokio::test]
    async fn test_update_unknown_id_returns_none() {
        let store = MemoryStore::new();
        store.seed().await.unwrap();
        let result = store.update(99, BookPatch::new().title("Ghost")).await.unwrap();
        assert!(result.is_none());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        store.seed().await.unwrap();

        assert!(store.delete(1).await.unwrap());
        assert!(store.delete(1).await.unwrap());

        let books = store.all().await.unwrap();
        assert!(books.iter().all(|b| b.id != 1));
        assert_eq!(books.len(), 1);
    }
}
