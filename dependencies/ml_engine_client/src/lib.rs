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

//! # ml_engine_client
//!
//! This is a Rust client to interact with Google Cloud ML Engine using the v1 REST API.
//!
//! Authentication is not handled here: callers hand in an OAuth2 access token obtained elsewhere.
//!

mod client;
mod error;
mod models;

pub use client::DEFAULT_BASE_URL;
pub use client::{Client, ClientBuilder};
pub use error::{ApiError, Result};
pub use models::ListVersionsRequest;
