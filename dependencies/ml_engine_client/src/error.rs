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

use thiserror::Error;

/// Result type alias for ML Engine API calls
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by the ML Engine API client.
///
/// Non-success HTTP statuses are discriminated once, when the response is received:
/// `409 Conflict` becomes [`ApiError::Conflict`], every other status becomes [`ApiError::Status`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or no response was received
    #[error("request failed: {0}")]
    Request(#[from] reqwest_middleware::Error),

    /// The response body could not be read
    #[error("failed to read response body: {0}")]
    Body(#[from] reqwest::Error),

    /// The response body was not valid JSON
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The resource already exists (HTTP 409)
    #[error("conflict (status 409): {message}")]
    Conflict { message: String },

    /// Any other non-success HTTP status
    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },
}

impl ApiError {
    pub const CONFLICT: u16 = 409;
    pub const NOT_FOUND: u16 = 404;
    pub const TOO_MANY_REQUESTS: u16 = 429;

    /// Builds the error matching a non-success status code and its response body.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if status == Self::CONFLICT {
            Self::Conflict { message }
        } else {
            Self::Status { status, message }
        }
    }

    /// HTTP status carried by this error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Conflict { .. } => Some(Self::CONFLICT),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(Self::NOT_FOUND)
    }

    /// Quota exhaustion; the call may succeed if repeated later.
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(Self::TOO_MANY_REQUESTS)
    }
}
