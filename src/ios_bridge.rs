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


//! C FFI bridge for iOS - Exposes the book controller to React Native
//!
//! # Architecture
//! JavaScript (React Native) → Swift (ExpoRustBridgeModule) → C FFI → Rust
//!
//! See `bridge` for the command set and response format.
//!
//! # Memory Management
//! **CRITICAL**: All string pointers returned from Rust functions MUST be freed
//! by the caller using `rust_free_string()`. Failure to do so will cause memory leaks.
//!
//! Example Swift code:
//! ```swift
//! let resultPtr = rust_books_dispatch("{\"command\":\"state\"}")
//! defer { rust_free_string(resultPtr) }
//! let jsonString = String(cString: resultPtr)
//! ```

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use crate::bridge::{dispatch_json, error_response, init_session};
use crate::error::{ReadingListError, Result};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Safely convert C string pointer to Rust String
///
/// # Safety
/// Caller must ensure ptr is a valid null-terminated C string
fn c_str_to_string(ptr: *const c_char) -> Result<String> {
    if ptr.is_null() {
        return Err(ReadingListError::InvalidInput("Null pointer received".to_string()));
    }
    unsafe {
        CStr::from_ptr(ptr)
            .to_str()
            .map(|s| s.to_string())
            .map_err(|e| ReadingListError::InvalidInput(format!("Invalid UTF-8: {}", e)))
    }
}

/// Convert Rust string to C string pointer
///
/// # Safety
/// Caller MUST free the returned pointer using `rust_free_string()`
fn string_to_c_str(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c_string) => c_string.into_raw(),
        Err(_) => {
            // error_response output never contains interior NULs
            let error_json = error_response("String contains null bytes");
            CString::new(error_json).unwrap_or_default().into_raw()
        }
    }
}

// ============================================================================
// SESSION FUNCTIONS
// ============================================================================

/// Initialize the book session
///
/// # Arguments
/// * `config_json` - `{"endpoint": "...", "timeout_secs": 30, "log_filter": "info"}`,
///   every field optional; an empty string uses defaults
///
/// # Returns
/// JSON envelope with the initial `state`
///
/// # Safety
/// Caller must free the returned string with `rust_free_string()`
#[no_mangle]
pub extern "C" fn rust_books_init(config_json: *const c_char) -> *mut c_char {
    let response = match c_str_to_string(config_json) {
        Ok(config) => init_session(&config),
        Err(e) => error_response(&e.to_string()),
    };
    string_to_c_str(response)
}

/// Run one controller command
///
/// # Arguments
/// * `command_json` - tagged command, e.g. `{"command":"delete","id":3}`
///
/// # Safety
/// Caller must free the returned string with `rust_free_string()`
#[no_mangle]
pub extern "C" fn rust_books_dispatch(command_json: *const c_char) -> *mut c_char {
    let response = match c_str_to_string(command_json) {
        Ok(command) => dispatch_json(&command),
        Err(e) => error_response(&e.to_string()),
    };
    string_to_c_str(response)
}

/// Free a string previously returned by this module
///
/// # Safety
/// `ptr` must come from one of the functions above and must not be freed twice
#[no_mangle]
pub unsafe extern "C" fn rust_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}
