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


//! Book list controller
//!
//! Owns the UI-facing state for the list screen and mediates every mutation
//! through the injected `BookStore`. After each store call the local
//! collection is reconciled in place instead of reloading everything.
//!
//! # State Flow
//! 1. A method changes `all_books`, the search text, the filter or a flag
//! 2. `publish()` recomputes the filtered view
//! 3. The new `ViewState` is pushed to every `subscribe()` receiver
//!
//! All methods take `&mut self`: one logical thread of control per
//! controller, no concurrent mutations.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::api::catalog::BookSource;
use crate::controller::state::{filter_books, ViewState};
use crate::error::{ReadingListError, Result};
use crate::storage::models::{Book, BookId, BookPatch, BookStatus, StatusFilter};
use crate::storage::store::BookStore;

pub struct BookController {
    pub(crate) store: Arc<dyn BookStore>,
    pub(crate) source: Arc<dyn BookSource>,
    pub(crate) state: ViewState,
    state_tx: watch::Sender<ViewState>,
}

impl BookController {
    /// Create a controller over `store`, importing from `source`
    ///
    /// The local collection starts empty; call `initialize()` to seed the
    /// store and load it.
    pub fn new(store: Arc<dyn BookStore>, source: Arc<dyn BookSource>) -> Self {
        let (state_tx, _) = watch::channel(ViewState::default());
        Self {
            store,
            source,
            state: ViewState::default(),
            state_tx,
        }
    }

    // ========================================================================
    // STATE ACCESS
    // ========================================================================

    /// Filtered view
    pub fn books(&self) -> &[Book] {
        &self.state.books
    }

    /// Unfiltered local collection
    pub fn all_books(&self) -> &[Book] {
        &self.state.all_books
    }

    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.state.all_books.iter().find(|b| b.id == id)
    }

    pub fn search_text(&self) -> &str {
        &self.state.search_text
    }

    pub fn filter_status(&self) -> StatusFilter {
        self.state.filter_status
    }

    pub fn importing(&self) -> bool {
        self.state.importing
    }

    pub fn import_error(&self) -> Option<&str> {
        self.state.import_error.as_deref()
    }

    pub fn import_notice(&self) -> Option<&str> {
        self.state.import_notice.as_deref()
    }

    pub fn refreshing(&self) -> bool {
        self.state.refreshing
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.clone()
    }

    /// Receiver that observes every published state change
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state_tx.subscribe()
    }

    pub(crate) fn publish(&mut self) {
        self.state.books = filter_books(
            &self.state.all_books,
            &self.state.search_text,
            self.state.filter_status,
        );
        self.state_tx.send_replace(self.state.clone());
    }

    // ========================================================================
    // LOADING
    // ========================================================================

    /// Seed the store (no-op if it already has records) and load it
    pub async fn initialize(&mut self) -> Result<()> {
        self.store.seed().await?;
        self.load().await
    }

    /// Replace the local collection with the store's contents
    pub async fn load(&mut self) -> Result<()> {
        let books = self.store.all().await?;
        debug!(count = books.len(), "loaded books");
        self.state.all_books = books;
        self.publish();
        Ok(())
    }

    /// Reload from the store with the `refreshing` flag raised
    ///
    /// The flag is cleared even when the reload fails.
    pub async fn refresh(&mut self) -> Result<()> {
        self.state.refreshing = true;
        self.publish();

        let result = self.store.all().await;

        self.state.refreshing = false;
        match result {
            Ok(books) => {
                self.state.all_books = books;
                self.publish();
                Ok(())
            }
            Err(e) => {
                self.publish();
                Err(e)
            }
        }
    }

    // ========================================================================
    // VIEW SETTINGS
    // ========================================================================

    pub fn set_search_text<S: Into<String>>(&mut self, text: S) {
        self.state.search_text = text.into();
        self.publish();
    }

    pub fn set_filter_status(&mut self, filter: StatusFilter) {
        self.state.filter_status = filter;
        self.publish();
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    /// Insert a new book and append it to the local collection
    ///
    /// # Errors
    /// Returns `InvalidInput` for a blank title; the store is not called.
    pub async fn insert_book(&mut self, title: &str, author: Option<&str>) -> Result<Book> {
        if title.trim().is_empty() {
            return Err(ReadingListError::invalid_input("Title is required"));
        }
        let author = author.filter(|a| !a.trim().is_empty());

        let book = self.store.insert(title, author).await?;
        self.state.all_books.push(book.clone());
        self.publish();
        Ok(book)
    }

    /// Write every mutable field of `book` to the store
    ///
    /// The local entry with `book.id` is replaced either way; the return
    /// value is `None` if the store had no record with that id.
    pub async fn update_book(&mut self, book: &Book) -> Result<Option<Book>> {
        let updated = self.store.update(book.id, BookPatch::from(book)).await?;
        self.reconcile(updated.clone().unwrap_or_else(|| book.clone()));
        Ok(updated)
    }

    /// Remove a book; succeeds even if it was already gone
    pub async fn delete_book(&mut self, id: BookId) -> Result<bool> {
        let deleted = self.store.delete(id).await?;
        self.state.all_books.retain(|b| b.id != id);
        self.publish();
        Ok(deleted)
    }

    /// Move `book` to `next` status
    pub async fn change_status(&mut self, book: &Book, next: BookStatus) -> Result<Option<Book>> {
        let merged = book.patched(&BookPatch::new().status(next));
        let updated = self.store.update(book.id, BookPatch::from(&merged)).await?;
        self.reconcile(updated.clone().unwrap_or(merged));
        Ok(updated)
    }

    /// Advance `book` along `planning → reading → done → planning`
    pub async fn cycle_status(&mut self, book: &Book) -> Result<Option<Book>> {
        self.change_status(book, book.status.next()).await
    }

    fn reconcile(&mut self, book: Book) {
        match self.state.all_books.iter_mut().find(|b| b.id == book.id) {
            Some(slot) => *slot = book,
            None => debug!(book_id = book.id, "no local entry to replace"),
        }
        self.publish();
    }
}
