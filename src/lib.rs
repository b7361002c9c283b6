//! Native core for the reading list app
//!
//! - `storage`: in-memory book store behind an async trait
//! - `api`: HTTP source for the "import from API" action
//! - `controller`: filtered views, mutations and import orchestration
//! - `bridge`: JSON commands for the React Native layer

pub mod api;
pub mod bridge;
pub mod controller;
pub mod error;
pub mod logging;
pub mod storage;

// C FFI bridge for iOS
mod ios_bridge;

// JNI bridge for Android
#[cfg(target_os = "android")]
mod jni_bridge;

pub use api::{ApiClient, BookSource, ClientConfig, RemoteBook};
pub use controller::{BookController, ImportStats, ViewState};
pub use error::{ReadingListError, Result};
pub use logging::init_logging;
pub use storage::{Book, BookId, BookPatch, BookStatus, BookStore, MemoryStore, StatusFilter};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_version() {
        assert!(!core_version().is_empty());
    }
}
