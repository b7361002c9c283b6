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


//! Store contract
//!
//! The controller only ever talks to a `BookStore` trait object. Every
//! operation is asynchronous, even for the in-memory implementation, so a
//! file- or network-backed store can be dropped in later without touching
//! the controller.
//!
//! # Failure Semantics
//! - Unknown ids are absence, not errors: `update` returns `Ok(None)` and
//!   `delete` returns `Ok(true)`.
//! - `insert` does not validate the title. The controller does that.
//! - The `Result` wrapper is for backing stores that can actually fail.

use async_trait::async_trait;

use crate::error::Result;
use crate::storage::models::{Book, BookId, BookPatch};

#[async_trait]
pub trait BookStore: Send + Sync {
    /// Append the starter set if the store is empty; no-op otherwise
    async fn seed(&self) -> Result<()>;

    /// Every record in insertion order
    async fn all(&self) -> Result<Vec<Book>>;

    /// Create a record with a fresh id, `planning` status and `created_at = now`
    async fn insert(&self, title: &str, author: Option<&str>) -> Result<Book>;

    /// Merge `patch` into the record with `id`, returning the updated record
    async fn update(&self, id: BookId, patch: BookPatch) -> Result<Option<Book>>;

    /// Remove the record with `id`; reports success whether or not it existed
    async fn delete(&self, id: BookId) -> Result<bool>;
}
