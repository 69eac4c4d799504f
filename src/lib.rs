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

//! # mlengine_hook
//!
//! Manage Google Cloud ML Engine models, model versions and training jobs from a workflow
//! orchestrator. [`MlEngineHook`] turns each high-level operation into calls against an
//! [`MlEngineApi`] and waits for long-running operations and jobs to finish.
//!
//! ```no_run
//! use mlengine_hook::MlEngineHook;
//! use ml_engine_api::ClientBuilder;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ClientBuilder::new("ya29.token".to_string()).build()?;
//!     let hook = MlEngineHook::new(client);
//!     let job = hook
//!         .create_job("my-project", &json!({"jobId": "train_1", "trainingInput": {}}))
//!         .await?;
//!     println!("{}", job["state"]);
//!     Ok(())
//! }
//! ```

mod api;
mod common;
pub mod config;
pub mod error;
mod hook;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod models;
pub mod paths;
pub mod poll;

pub use config::HookConfig;
pub use error::{HookError, Result};
pub use hook::MlEngineHook;
pub use ml_engine_api::{ApiError, ListVersionsRequest};
pub use models::JobState;
pub use poll::PollPolicy;

use async_trait::async_trait;
use serde_json::Value;

/// Remote ML Engine API consumed by [`MlEngineHook`].
///
/// Each method performs one call and returns the raw JSON body; failures carry the HTTP status
/// as an [`ApiError`]. `ml_engine_api::Client` is the production implementation; with the
/// `mock` feature, `mock::MockMlEngine` is an in-process one.
#[async_trait]
pub trait MlEngineApi: Send + Sync {
    async fn create_model(&self, parent: &str, model: &Value) -> ml_engine_api::Result<Value>;

    async fn get_model(&self, name: &str) -> ml_engine_api::Result<Value>;

    async fn delete_model(&self, name: &str) -> ml_engine_api::Result<Value>;

    async fn create_version(&self, parent: &str, version: &Value)
        -> ml_engine_api::Result<Value>;

    async fn set_default_version(&self, name: &str, body: &Value) -> ml_engine_api::Result<Value>;

    async fn list_versions(&self, request: &ListVersionsRequest) -> ml_engine_api::Result<Value>;

    /// Request for the page after `previous_response`, `None` once the listing is exhausted.
    fn list_versions_next(
        &self,
        previous_request: &ListVersionsRequest,
        previous_response: &Value,
    ) -> Option<ListVersionsRequest> {
        previous_request.next(previous_response)
    }

    async fn delete_version(&self, name: &str) -> ml_engine_api::Result<Value>;

    async fn get_operation(&self, name: &str) -> ml_engine_api::Result<Value>;

    async fn create_job(&self, parent: &str, job: &Value) -> ml_engine_api::Result<Value>;

    async fn get_job(&self, name: &str) -> ml_engine_api::Result<Value>;

    async fn cancel_job(&self, name: &str) -> ml_engine_api::Result<Value>;
}
