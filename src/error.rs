//
// (C) Copyright IBM 2026
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.
//
// Any modifications or derivative works of this code must retain this
// copyright notice, and modified files need to carry a notice indicating
// that they have been altered from the originals.

use ml_engine_api::ApiError;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for hook operations
pub type Result<T> = std::result::Result<T, HookError>;

/// Errors that can occur when using [`MlEngineHook`](crate::MlEngineHook)
#[derive(Debug, Error)]
pub enum HookError {
    /// Error returned by the remote API, unchanged
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The caller supplied a request the hook cannot address
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The API answered with a body missing a field the hook relies on
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// A long-running operation finished with an `error` field
    #[error("operation {name} failed: {error}")]
    OperationFailed { name: String, error: Value },

    /// The poll policy's attempt or time bound was reached first
    #[error("{resource} did not complete after {attempts} polls ({elapsed:?})")]
    NotCompleted {
        resource: String,
        attempts: u32,
        elapsed: Duration,
    },
}

impl HookError {
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        self.api_error().is_some_and(ApiError::is_conflict)
    }
}
