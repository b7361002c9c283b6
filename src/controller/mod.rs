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


//! View-state controller
//!
//! Derives the filtered list view, mediates mutations into the store and
//! tracks transient UI state (importing, import error, refreshing).
//!
//! # Usage Example
//! ```no_run
//! use std::sync::Arc;
//! use reading_list_core::api::ApiClient;
//! use reading_list_core::controller::BookController;
//! use reading_list_core::storage::{MemoryStore, StatusFilter};
//!
//! # async fn example() -> reading_list_core::Result<()> {
//! let mut controller = BookController::new(Arc::new(MemoryStore::new()), Arc::new(ApiClient::new()?));
//! controller.initialize().await?;
//!
//! controller.set_filter_status(StatusFilter::Planning);
//! let stats = controller.import_books_from_api().await;
//! println!("added {} books", stats.books_added);
//! # Ok(())
//! # }
//! ```

pub mod books;
pub mod import;
pub mod state;

pub use books::BookController;
pub use import::{ImportStats, NOTHING_TO_IMPORT};
pub use state::{filter_books, ViewState};
