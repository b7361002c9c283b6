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


//! JSON command bridge shared by the iOS and Android FFI layers
//!
//! # Architecture
//! JavaScript (React Native) → Swift/Kotlin module → C FFI / JNI → this module
//!
//! # Design Patterns
//! 1. **JSON Communication**: commands come in as tagged JSON, results go out as JSON
//! 2. **Error Handling**: all errors are returned as JSON error responses
//! 3. **Async Runtime**: a process-wide Tokio runtime drives the async controller
//! 4. **No Panics**: panics are caught before they cross the FFI boundary
//!
//! # Commands
//! ```json
//! { "command": "set_search", "text": "atomic" }
//! { "command": "insert", "title": "Dune", "author": "Frank Herbert" }
//! { "command": "cycle_status", "id": 3 }
//! { "command": "import" }
//! ```
//!
//! # Response Format
//! ```json
//! { "success": true, "data": { "state": { ... }, "book": { ... } } }
//! { "success": false, "error": "Error message" }
//! ```
//!
//! # Session
//! The bridge owns one `MemoryStore` for the whole process, so re-running
//! `init_session` (e.g. after a JS reload) keeps the user's books and never
//! re-seeds a non-empty store.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::info;

use crate::api::client::{ApiClient, ClientConfig};
use crate::controller::BookController;
use crate::error::{ReadingListError, Result};
use crate::logging::{init_logging, DEFAULT_LOG_FILTER};
use crate::storage::memory::MemoryStore;
use crate::storage::models::{Book, BookId, BookStatus, StatusFilter};

// Lazy static tokio runtime for async operations
lazy_static::lazy_static! {
    static ref RUNTIME: tokio::runtime::Runtime =
        tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");

    static ref STORE: Arc<MemoryStore> = Arc::new(MemoryStore::new());

    static ref CONTROLLER: Mutex<Option<BookController>> = Mutex::new(None);
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Session configuration passed to `init_session`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl BridgeConfig {
    pub fn client_config(&self) -> ClientConfig {
        let mut builder = ClientConfig::builder();
        if let Some(endpoint) = &self.endpoint {
            builder = builder.endpoint(endpoint.clone());
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }
}

/// A controller operation requested by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum BridgeCommand {
    State,
    SetSearch {
        text: String,
    },
    SetFilter {
        status: StatusFilter,
    },
    Insert {
        title: String,
        #[serde(default)]
        author: Option<String>,
    },
    Update {
        book: Book,
    },
    Delete {
        id: BookId,
    },
    ChangeStatus {
        id: BookId,
        status: BookStatus,
    },
    CycleStatus {
        id: BookId,
    },
    Refresh,
    Import,
}

/// Parse a JSON command
pub fn parse_command(command_json: &str) -> Result<BridgeCommand> {
    serde_json::from_str(command_json)
        .map_err(|e| ReadingListError::InvalidInput(format!("Invalid command JSON: {}", e)))
}

/// Run `command` against `controller`
///
/// The result always carries the post-command `state`; commands that
/// produce something extra add it next to it (`book`, `deleted`, `import`).
pub async fn dispatch(controller: &mut BookController, command: BridgeCommand) -> Result<Value> {
    let mut data = match command {
        BridgeCommand::State => json!({}),
        BridgeCommand::SetSearch { text } => {
            controller.set_search_text(text);
            json!({})
        }
        BridgeCommand::SetFilter { status } => {
            controller.set_filter_status(status);
            json!({})
        }
        BridgeCommand::Insert { title, author } => {
            let book = controller.insert_book(&title, author.as_deref()).await?;
            json!({ "book": book })
        }
        BridgeCommand::Update { book } => {
            let updated = controller.update_book(&book).await?;
            json!({ "book": updated })
        }
        BridgeCommand::Delete { id } => {
            let deleted = controller.delete_book(id).await?;
            json!({ "deleted": deleted })
        }
        BridgeCommand::ChangeStatus { id, status } => {
            let updated = match controller.book(id).cloned() {
                Some(book) => controller.change_status(&book, status).await?,
                None => None,
            };
            json!({ "book": updated })
        }
        BridgeCommand::CycleStatus { id } => {
            let updated = match controller.book(id).cloned() {
                Some(book) => controller.cycle_status(&book).await?,
                None => None,
            };
            json!({ "book": updated })
        }
        BridgeCommand::Refresh => {
            controller.refresh().await?;
            json!({})
        }
        BridgeCommand::Import => {
            let stats = controller.import_books_from_api().await;
            json!({ "import": stats })
        }
    };

    data["state"] = serde_json::to_value(controller.snapshot())?;
    Ok(data)
}

// ============================================================================
// SESSION ENTRY POINTS
// ============================================================================

/// Create (or recreate) the process-wide controller and load the store
///
/// Returns a JSON response envelope carrying the initial state.
pub fn init_session(config_json: &str) -> String {
    catch_panic(|| {
        let config: BridgeConfig = if config_json.trim().is_empty() {
            BridgeConfig::default()
        } else {
            serde_json::from_str(config_json)
                .map_err(|e| ReadingListError::InvalidInput(format!("Invalid config JSON: {}", e)))?
        };

        init_logging(config.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER))?;
        let client = ApiClient::with_config(config.client_config())?;

        let state = RUNTIME.block_on(async {
            let mut controller = BookController::new(STORE.clone(), Arc::new(client));
            controller.initialize().await?;
            let state = controller.snapshot();
            *CONTROLLER.lock().await = Some(controller);
            Ok::<_, ReadingListError>(state)
        })?;

        info!(books = state.all_books.len(), "bridge session initialized");
        Ok(success_response(json!({ "state": state })))
    })
}

/// Run one JSON command against the process-wide controller
pub fn dispatch_json(command_json: &str) -> String {
    catch_panic(|| {
        let command = parse_command(command_json)?;
        let data = RUNTIME.block_on(async {
            let mut guard = CONTROLLER.lock().await;
            let controller = guard.as_mut().ok_or_else(|| {
                ReadingListError::InvalidState("Session not initialized".to_string())
            })?;
            dispatch(controller, command).await
        })?;
        Ok(success_response(data))
    })
}

// ============================================================================
// RESPONSE HELPERS
// ============================================================================

/// Create success response JSON
pub(crate) fn success_response<T: Serialize>(data: T) -> String {
    json!({
        "success": true,
        "data": data
    })
    .to_string()
}

/// Create error response JSON
pub(crate) fn error_response(error: &str) -> String {
    json!({
        "success": false,
        "error": error
    })
    .to_string()
}

/// Wrap a function call with panic catching
pub(crate) fn catch_panic<F>(f: F) -> String
where
    F: FnOnce() -> Result<String>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => error_response(&e.user_message()),
        Err(panic_err) => {
            let panic_msg = if let Some(s) = panic_err.downcast_ref::<String>() {
                s.clone()
            } else if let Some(s) = panic_err.downcast_ref::<&str>() {
                s.to_string()
            } else {
                "Unknown panic occurred".to_string()
            };
            error_response(&format!("Rust panic: {}", panic_msg))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::catalog::{BookSource, RemoteBook};
    use async_trait::async_trait;

    struct FixedSource(Vec<RemoteBook>);

    #[async_trait]
    impl BookSource for FixedSource {
        async fn fetch_candidates(&self) -> Result<Vec<RemoteBook>> {
            Ok(self.0.clone())
        }
    }

    async fn controller() -> BookController {
        let source = FixedSource(vec![RemoteBook::new("Dune", Some("Frank Herbert"))]);
        let mut controller = BookController::new(Arc::new(MemoryStore::new()), Arc::new(source));
        controller.initialize().await.unwrap();
        controller
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command(r#"{"command":"state"}"#).unwrap(), BridgeCommand::State);
        assert_eq!(
            parse_command(r#"{"command":"set_filter","status":"reading"}"#).unwrap(),
            BridgeCommand::SetFilter { status: StatusFilter::Reading }
        );
        assert_eq!(
            parse_command(r#"{"command":"insert","title":"Dune"}"#).unwrap(),
            BridgeCommand::Insert { title: "Dune".to_string(), author: None }
        );
    }

    #[test]
    fn test_parse_command_rejects_unknown() {
        let err = parse_command(r#"{"command":"explode"}"#).unwrap_err();
        assert!(err.is_validation_error());
        assert!(parse_command(r#"{"command":"set_filter","status":"paused"}"#).is_err());
    }

    #[test]
    fn test_bridge_config_builds_client_config() {
        let config: BridgeConfig =
            serde_json::from_str(r#"{"endpoint":"http://localhost:9000/books","timeout_secs":5}"#)
                .unwrap();
        let client_config = config.client_config();
        assert_eq!(client_config.endpoint, "http://localhost:9000/books");
        assert_eq!(client_config.timeout, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_dispatch_insert_returns_book_and_state() {
        let mut controller = controller().await;
        let data = dispatch(
            &mut controller,
            BridgeCommand::Insert { title: "Refactoring".to_string(), author: None },
        )
        .await
        .unwrap();

        assert_eq!(data["book"]["title"], "Refactoring");
        assert_eq!(data["book"]["status"], "planning");
        assert_eq!(data["state"]["all_books"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_dispatch_filter_and_search() {
        let mut controller = controller().await;
        dispatch(&mut controller, BridgeCommand::SetSearch { text: "clean".to_string() })
            .await
            .unwrap();
        let data = dispatch(&mut controller, BridgeCommand::State).await.unwrap();

        assert_eq!(data["state"]["search_text"], "clean");
        assert_eq!(data["state"]["filter_status"], "all");
        assert_eq!(data["state"]["books"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_cycle_unknown_id_is_noop() {
        let mut controller = controller().await;
        let data = dispatch(&mut controller, BridgeCommand::CycleStatus { id: 404 })
            .await
            .unwrap();
        assert!(data["book"].is_null());
    }

    #[tokio::test]
    async fn test_dispatch_change_status() {
        let mut controller = controller().await;
        let data = dispatch(
            &mut controller,
            BridgeCommand::ChangeStatus { id: 2, status: BookStatus::Done },
        )
        .await
        .unwrap();
        assert_eq!(data["book"]["status"], "done");
    }

    #[tokio::test]
    async fn test_dispatch_import_reports_stats() {
        let mut controller = controller().await;
        let data = dispatch(&mut controller, BridgeCommand::Import).await.unwrap();

        assert_eq!(data["import"]["books_added"], 1);
        assert_eq!(data["state"]["importing"], false);
        assert!(data["state"]["import_error"].is_null());
    }

    #[tokio::test]
    async fn test_dispatch_insert_blank_title_fails() {
        let mut controller = controller().await;
        let result = dispatch(
            &mut controller,
            BridgeCommand::Insert { title: " ".to_string(), author: None },
        )
        .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_catch_panic_reports_panics() {
        let response = catch_panic(|| panic!("boom"));
        let value: Value = serde_json::from_str(&response).unwrap();
        assert_eq!(value["success"], false);
        assert!(value["error"].as_str().unwrap().contains("boom"));
    }

    #[test]
    fn test_session_round_trip() {
        let response: Value = serde_json::from_str(&init_session("")).unwrap();
        assert_eq!(response["success"], true);
        let seeded = response["data"]["state"]["all_books"].as_array().unwrap().len();
        assert!(seeded >= 2);

        let response: Value = serde_json::from_str(&dispatch_json(
            r#"{"command":"insert","title":"Session Book"}"#,
        ))
        .unwrap();
        assert_eq!(response["success"], true);
        assert_eq!(response["data"]["book"]["title"], "Session Book");

        // Re-init keeps the process-wide store and does not re-seed
        let response: Value = serde_json::from_str(&init_session("{}")).unwrap();
        assert_eq!(
            response["data"]["state"]["all_books"].as_array().unwrap().len(),
            seeded + 1
        );

        let response: Value = serde_json::from_str(&dispatch_json("not json")).unwrap();
        assert_eq!(response["success"], false);
    }
}
