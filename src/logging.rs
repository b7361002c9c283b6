//! Logging bootstrap
//!
//! Installs a `tracing-subscriber` fmt subscriber once per process. The filter
//! comes from `RUST_LOG` when set, otherwise from the caller.
//!
//! Safe to call from every bridge entry point: only the first call installs
//! the subscriber, later calls are no-ops.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

use crate::error::{ReadingListError, Result};

/// Filter used when neither `RUST_LOG` nor the caller provides one
pub const DEFAULT_LOG_FILTER: &str = "info";

static INIT: Once = Once::new();

/// Initialize logging with `filter` (e.g. `"debug"`, `"reading_list_core=trace"`)
///
/// # Errors
/// Returns `InvalidConfiguration` if `filter` is not a valid filter directive.
pub fn init_logging(filter: &str) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => EnvFilter::try_new(filter).map_err(|e| {
            ReadingListError::InvalidConfiguration(format!("Invalid log filter '{}': {}", filter, e))
        })?,
    };

    INIT.call_once(|| {
        // Another subscriber may already be installed by the host app
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .try_init();
    });
    Ok(())
}
