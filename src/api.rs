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

use crate::MlEngineApi;
use async_trait::async_trait;
use ml_engine_api::{Client, ListVersionsRequest, Result};
use serde_json::Value;

#[async_trait]
impl MlEngineApi for Client {
    async fn create_model(&self, parent: &str, model: &Value) -> Result<Value> {
        Client::create_model(self, parent, model).await
    }

    async fn get_model(&self, name: &str) -> Result<Value> {
        Client::get_model(self, name).await
    }

    async fn delete_model(&self, name: &str) -> Result<Value> {
        Client::delete_model(self, name).await
    }

    async fn create_version(&self, parent: &str, version: &Value) -> Result<Value> {
        Client::create_version(self, parent, version).await
    }

    async fn set_default_version(&self, name: &str, body: &Value) -> Result<Value> {
        Client::set_default_version(self, name, body).await
    }

    async fn list_versions(&self, request: &ListVersionsRequest) -> Result<Value> {
        Client::list_versions(self, request).await
    }

    async fn delete_version(&self, name: &str) -> Result<Value> {
        Client::delete_version(self, name).await
    }

    async fn get_operation(&self, name: &str) -> Result<Value> {
        Client::get_operation(self, name).await
    }

    async fn create_job(&self, parent: &str, job: &Value) -> Result<Value> {
        Client::create_job(self, parent, job).await
    }

    async fn get_job(&self, name: &str) -> Result<Value> {
        Client::get_job(self, name).await
    }

    async fn cancel_job(&self, name: &str) -> Result<Value> {
        Client::cancel_job(self, name).await
    }
}
