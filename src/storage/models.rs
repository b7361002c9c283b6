//! Reading list models
//!
//! This module contains the book record kept by the store, its lifecycle
//! status, the partial-update patch, and the status filter used by the
//! controller's derived views.
//!
//! # Serialization
//! - Statuses and filters are serialized lowercase (`"planning"`, `"all"`)
//! - `created_at` is serialized as an RFC 3339 timestamp
//! - `BookPatch::author` distinguishes a missing field (untouched) from
//!   `null` (clear the author)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ReadingListError;

/// Store-assigned book identifier
pub type BookId = i64;

// ============================================================================
// ENUMS
// ============================================================================

/// Reading status of a book
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    #[default]
    Planning,
    Reading,
    Done,
}

impl BookStatus {
    /// All statuses in cycling order
    pub const ALL: [BookStatus; 3] = [BookStatus::Planning, BookStatus::Reading, BookStatus::Done];

    /// Next status in the cycle `planning → reading → done → planning`
    pub fn next(self) -> Self {
        match self {
            BookStatus::Planning => BookStatus::Reading,
            BookStatus::Reading => BookStatus::Done,
            BookStatus::Done => BookStatus::Planning,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Planning => "planning",
            BookStatus::Reading => "reading",
            BookStatus::Done => "done",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = ReadingListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "planning" => Ok(BookStatus::Planning),
            "reading" => Ok(BookStatus::Reading),
            "done" => Ok(BookStatus::Done),
            other => Err(ReadingListError::invalid_input(format!(
                "Unknown book status '{}'",
                other
            ))),
        }
    }
}

/// Status filter for the controller's filtered view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Planning,
    Reading,
    Done,
}

impl StatusFilter {
    /// Whether a book with `status` passes this filter
    pub fn matches(&self, status: BookStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Planning => status == BookStatus::Planning,
            StatusFilter::Reading => status == BookStatus::Reading,
            StatusFilter::Done => status == BookStatus::Done,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Planning => "planning",
            StatusFilter::Reading => "reading",
            StatusFilter::Done => "done",
        }
    }
}

impl From<BookStatus> for StatusFilter {
    fn from(status: BookStatus) -> Self {
        match status {
            BookStatus::Planning => StatusFilter::Planning,
            BookStatus::Reading => StatusFilter::Reading,
            BookStatus::Done => StatusFilter::Done,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = ReadingListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        BookStatus::from_str(s).map(StatusFilter::from)
    }
}

// ============================================================================
// MAIN ENTITIES
// ============================================================================

/// A reading list entry
///
/// Only the store constructs these. `id` and `created_at` never change after
/// insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub status: BookStatus,
    pub created_at: DateTime<Utc>,
}

impl Book {
    /// Lower-cased title used for search and import de-duplication
    pub fn title_key(&self) -> String {
        self.title.to_lowercase()
    }

    /// Copy of this book with `patch` merged in
    pub fn patched(&self, patch: &BookPatch) -> Book {
        let mut book = self.clone();
        patch.apply_to(&mut book);
        book
    }
}

/// Partial update for a book
///
/// Fields left as `None` are untouched by `apply_to`. `author` is three-state:
/// `None` leaves it alone, `Some(None)` clears it, `Some(Some(_))` sets it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub author: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BookStatus>,
}

impl BookPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: Option<String>) -> Self {
        self.author = Some(author);
        self
    }

    pub fn status(mut self, status: BookStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.status.is_none()
    }

    /// Shallow merge into `book`; `id` and `created_at` are never touched
    pub fn apply_to(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title = title.clone();
        }
        if let Some(author) = &self.author {
            book.author = author.clone();
        }
        if let Some(status) = self.status {
            book.status = status;
        }
    }
}

impl From<&Book> for BookPatch {
    /// Patch carrying every mutable field of `book`
    fn from(book: &Book) -> Self {
        Self {
            title: Some(book.title.clone()),
            author: Some(book.author.clone()),
            status: Some(book.status),
        }
    }
}

// A present-but-null field must become `Some(None)`, not `None`
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> Book {
        Book {
            id: 7,
            title: "Clean Code".to_string(),
            author: Some("Robert C. Martin".to_string()),
            status: BookStatus::Planning,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_cycle_wraps_after_three_steps() {
        let start = BookStatus::Planning;
        assert_eq!(start.next(), BookStatus::Reading);
        assert_eq!(start.next().next(), BookStatus::Done);
        assert_eq!(start.next().next().next(), BookStatus::Planning);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("reading".parse::<BookStatus>().unwrap(), BookStatus::Reading);
        assert_eq!(" DONE ".parse::<BookStatus>().unwrap(), BookStatus::Done);
        assert!("finished".parse::<BookStatus>().is_err());
    }

    #[test]
    fn test_display_honors_width() {
        assert_eq!(format!("[{:<8}]", BookStatus::Done), "[done    ]");
        assert_eq!(format!("[{:>8}]", StatusFilter::All), "[     all]");
        assert_eq!(BookStatus::Reading.to_string(), "reading");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&BookStatus::Reading).unwrap();
        assert_eq!(json, "\"reading\"");
        let parsed: BookStatus = serde_json::from_str("\"done\"").unwrap();
        assert_eq!(parsed, BookStatus::Done);
        assert!(serde_json::from_str::<BookStatus>("\"paused\"").is_err());
    }

    #[test]
    fn test_status_filter_matches() {
        assert!(StatusFilter::All.matches(BookStatus::Done));
        assert!(StatusFilter::Reading.matches(BookStatus::Reading));
        assert!(!StatusFilter::Reading.matches(BookStatus::Planning));
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("planning".parse::<StatusFilter>().unwrap(), StatusFilter::Planning);
        assert_eq!(StatusFilter::default(), StatusFilter::All);
    }

    #[test]
    fn test_patch_merges_only_present_fields() {
        let mut book = sample_book();
        let created_at = book.created_at;

        BookPatch::new().status(BookStatus::Reading).apply_to(&mut book);

        assert_eq!(book.status, BookStatus::Reading);
        assert_eq!(book.title, "Clean Code");
        assert_eq!(book.author.as_deref(), Some("Robert C. Martin"));
        assert_eq!(book.id, 7);
        assert_eq!(book.created_at, created_at);
    }

    #[test]
    fn test_patch_can_clear_author() {
        let book = sample_book().patched(&BookPatch::new().author(None));
        assert_eq!(book.author, None);
    }

    #[test]
    fn test_patch_json_distinguishes_null_from_missing() {
        let missing: BookPatch = serde_json::from_str(r#"{"status":"done"}"#).unwrap();
        assert_eq!(missing.author, None);

        let cleared: BookPatch = serde_json::from_str(r#"{"author":null}"#).unwrap();
        assert_eq!(cleared.author, Some(None));

        let set: BookPatch = serde_json::from_str(r#"{"author":"Kent Beck"}"#).unwrap();
        assert_eq!(set.author, Some(Some("Kent Beck".to_string())));
    }

    #[test]
    fn test_patch_from_full_book() {
        let book = sample_book();
        let patch = BookPatch::from(&book);
        assert!(!patch.is_empty());
        assert_eq!(patch.title.as_deref(), Some("Clean Code"));
        assert_eq!(patch.status, Some(BookStatus::Planning));
    }
}
