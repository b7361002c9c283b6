//! View state published by the controller
//!
//! `ViewState` is the snapshot the presentation layer renders from. The
//! controller publishes a fresh one after every change.

use serde::{Deserialize, Serialize};

use crate::storage::models::{Book, StatusFilter};

/// Snapshot of everything the list screen needs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Filtered view (status filter + title search)
    pub books: Vec<Book>,
    /// Unfiltered local collection
    pub all_books: Vec<Book>,
    pub search_text: String,
    pub filter_status: StatusFilter,
    pub importing: bool,
    pub import_error: Option<String>,
    /// Informational notice from the last import (e.g. nothing new)
    pub import_notice: Option<String>,
    pub refreshing: bool,
}

/// Whether `book` belongs in the filtered view
///
/// Status must pass `filter`, and the lower-cased title must contain the
/// lower-cased `search_text`. An empty search matches everything.
pub fn matches_view(book: &Book, search_text: &str, filter: StatusFilter) -> bool {
    filter.matches(book.status) && book.title_key().contains(&search_text.to_lowercase())
}

/// Filtered copy of `books`, order preserved
pub fn filter_books(books: &[Book], search_text: &str, filter: StatusFilter) -> Vec<Book> {
    books
        .iter()
        .filter(|b| matches_view(b, search_text, filter))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::models::BookStatus;
    use chrono::Utc;

    fn book(id: i64, title: &str, status: BookStatus) -> Book {
        Book {
            id,
            title: title.to_string(),
            author: None,
            status,
            created_at: Utc::now(),
        }
    }

    fn sample() -> Vec<Book> {
        vec![
            book(1, "Clean Code", BookStatus::Planning),
            book(2, "Atomic Habits", BookStatus::Planning),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let result = filter_books(&sample(), "atomic", StatusFilter::All);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 2);

        let result = filter_books(&sample(), "CODE", StatusFilter::All);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }

    #[test]
    fn test_empty_search_matches_everything() {
        assert_eq!(filter_books(&sample(), "", StatusFilter::All).len(), 2);
    }

    #[test]
    fn test_status_filter_without_matches_is_empty() {
        assert!(filter_books(&sample(), "", StatusFilter::Done).is_empty());
    }

    #[test]
    fn test_status_and_search_combine() {
        let mut books = sample();
        books.push(book(3, "Atomic Design", BookStatus::Reading));

        let result = filter_books(&books, "atomic", StatusFilter::Reading);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 3);
    }

    #[test]
    fn test_filter_preserves_order_and_input() {
        let books = sample();
        let result = filter_books(&books, "", StatusFilter::Planning);
        let ids: Vec<_> = result.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(books.len(), 2);
    }
}
