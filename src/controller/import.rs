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


//! Import from the remote catalog
//!
//! # Process
//! 1. Raise `importing`, clear the previous error and notice
//! 2. Fetch candidates from the `BookSource`
//! 3. On fetch/parse failure, record the message as `import_error` and stop
//! 4. Otherwise snapshot the existing titles (lower-cased) and insert every
//!    candidate whose title is not in the snapshot, one insert at a time;
//!    append the new books to local state in one batch
//! 5. Lower `importing`, whatever happened
//!
//! The title snapshot is taken once, before the loop. Two candidates sharing a
//! title in the same payload are both inserted if neither existed before.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::catalog::RemoteBook;
use crate::controller::books::BookController;
use crate::storage::models::Book;

/// Notice shown when an import finds nothing new
pub const NOTHING_TO_IMPORT: &str = "No new books to import";

/// Import statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    /// Candidates returned by the source
    pub total_items: usize,

    /// Books inserted into the store
    pub books_added: usize,

    /// Candidates skipped because their title was already present
    pub books_skipped: usize,

    /// User-facing error message if the import failed
    pub error: Option<String>,
}

impl ImportStats {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookController {
    /// Import candidates from the remote catalog
    ///
    /// Never returns an error: failures end up in `import_error` (and in the
    /// returned stats) and `importing` is always lowered afterwards.
    pub async fn import_books_from_api(&mut self) -> ImportStats {
        let mut stats = ImportStats::new();

        self.state.importing = true;
        self.state.import_error = None;
        self.state.import_notice = None;
        self.publish();

        match self.source.fetch_candidates().await {
            Ok(candidates) => self.import_candidates(candidates, &mut stats).await,
            Err(e) => {
                warn!(error = %e, "import fetch failed");
                stats.error = Some(e.user_message());
            }
        }

        self.state.import_error = stats.error.clone();
        self.state.importing = false;
        self.publish();

        info!(
            total = stats.total_items,
            added = stats.books_added,
            skipped = stats.books_skipped,
            failed = stats.error.is_some(),
            "import finished"
        );
        stats
    }

    async fn import_candidates(&mut self, candidates: Vec<RemoteBook>, stats: &mut ImportStats) {
        stats.total_items = candidates.len();

        let existing_titles: HashSet<String> =
            self.state.all_books.iter().map(Book::title_key).collect();
        let mut added = Vec::new();

        for candidate in candidates {
            if existing_titles.contains(&candidate.title.to_lowercase()) {
                stats.books_skipped += 1;
                continue;
            }

            // Unlike insert_book, candidates are not validated
            match self.store.insert(&candidate.title, candidate.author.as_deref()).await {
                Ok(book) => added.push(book),
                Err(e) => {
                    // Keep what was already inserted so local state matches the store
                    warn!(error = %e, inserted = added.len(), "import insert failed");
                    stats.error = Some(e.user_message());
                    break;
                }
            }
        }

        stats.books_added = added.len();
        if added.is_empty() && stats.error.is_none() {
            self.state.import_notice = Some(NOTHING_TO_IMPORT.to_string());
        }
        self.state.all_books.extend(added);
    }
}
