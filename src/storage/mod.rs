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


//! Book storage and models
//!
//! This module holds the authoritative record collection behind an
//! asynchronous store trait, plus the in-memory implementation the app ships
//! with. Nothing is persisted across process restarts.
//!
//! # Usage Example
//! ```no_run
//! use reading_list_core::storage::{BookStore, MemoryStore, BookPatch, BookStatus};
//!
//! # async fn example() -> reading_list_core::Result<()> {
//! let store = MemoryStore::new();
//! store.seed().await?;
//!
//! let book = store.insert("The Pragmatic Programmer", Some("Hunt & Thomas")).await?;
//! store.update(book.id, BookPatch::new().status(BookStatus::Reading)).await?;
//! # Ok(())
//! # }
//! ```

pub mod memory;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use memory::{MemoryStore, SEED_BOOKS};
pub use models::{Book, BookId, BookPatch, BookStatus, StatusFilter};
pub use store::BookStore;
