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


//! JNI bridge for Android - Exposes the book controller to React Native
//!
//! # Architecture
//! JavaScript (React Native) → Kotlin (ExpoRustBridgeModule) → JNI → Rust
//!
//! Both entry points take and return JSON strings; see `bridge` for the
//! command set and response format.

use jni::objects::{JClass, JString};
use jni::sys::jstring;
use jni::JNIEnv;

use crate::bridge::{dispatch_json, error_response, init_session};
use crate::error::{ReadingListError, Result};

/// Convert JString to Rust String
fn jstring_to_string(env: &mut JNIEnv, jstr: JString) -> Result<String> {
    env.get_string(&jstr)
        .map(|s| s.into())
        .map_err(|e| ReadingListError::InvalidInput(format!("JNI string conversion failed: {}", e)))
}

/// Hand a Rust string back to the JVM; null if the JVM refuses it
fn to_jstring(env: &mut JNIEnv, response: String) -> jstring {
    match env.new_string(response) {
        Ok(s) => s.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Initialize the book session
///
/// # Arguments (JSON string)
/// ```json
/// { "endpoint": "https://...", "timeout_secs": 30, "log_filter": "info" }
/// ```
#[no_mangle]
pub extern "C" fn Java_expo_modules_rustbridge_ExpoRustBridgeModule_nativeBooksInit(
    mut env: JNIEnv,
    _class: JClass,
    config_json: JString,
) -> jstring {
    let response = match jstring_to_string(&mut env, config_json) {
        Ok(config) => init_session(&config),
        Err(e) => error_response(&e.to_string()),
    };
    to_jstring(&mut env, response)
}

/// Run one controller command
///
/// # Arguments (JSON string)
/// ```json
/// { "command": "change_status", "id": 3, "status": "reading" }
/// ```
#[no_mangle]
pub extern "C" fn Java_expo_modules_rustbridge_ExpoRustBridgeModule_nativeBooksDispatch(
    mut env: JNIEnv,
    _class: JClass,
    command_json: JString,
) -> jstring {
    let response = match jstring_to_string(&mut env, command_json) {
        Ok(command) => dispatch_json(&command),
        Err(e) => error_response(&e.to_string()),
    };
    to_jstring(&mut env, response)
}
