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

use crate::common;
use crate::config::HookConfig;
use crate::error::{HookError, Result};
use crate::models::{self, JobState};
use crate::paths;
use crate::poll::Poller;
use crate::MlEngineApi;
use log::{debug, error, info, warn};
use ml_engine_api::{Client, ListVersionsRequest};
use serde_json::{json, Value};

type ExistingJobCheck<'a> = &'a (dyn Fn(&Value) -> bool + Send + Sync);

/// Hook for Google Cloud ML Engine.
///
/// Stateless apart from its [`HookConfig`]; every method issues its remote calls in sequence
/// and, where the API answers with a long-running operation or job, polls it to completion.
pub struct MlEngineHook<A = Client> {
    api: A,
    config: HookConfig,
}

impl<A: MlEngineApi> MlEngineHook<A> {
    pub fn new(api: A) -> Self {
        common::initialize();
        Self {
            api,
            config: HookConfig::default(),
        }
    }

    pub fn with_config(mut self, config: HookConfig) -> Self {
        self.config = config;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> &HookConfig {
        &self.config
    }

    /// Launches a training job and waits for it to reach a terminal state.
    ///
    /// If a job with the same `jobId` already exists it is adopted and waited for.
    /// Returns the last polled job record, whose `state` is `SUCCEEDED`, `FAILED` or
    /// `CANCELLED`.
    ///
    /// # Errors
    ///
    /// - [`HookError::InvalidArgument`] when `job` has no string `jobId`.
    /// - [`HookError::Api`] for any create failure other than a conflict, or any polling
    ///   failure other than rate limiting.
    pub async fn create_job(&self, project_id: &str, job: &Value) -> Result<Value> {
        self.submit_job(project_id, job, None).await
    }

    /// Like [`create_job`](Self::create_job), but an already existing job is only adopted when
    /// `use_existing_job_fn` accepts it. Otherwise the conflict error from job creation is
    /// returned as is.
    pub async fn create_job_with_check<F>(
        &self,
        project_id: &str,
        job: &Value,
        use_existing_job_fn: F,
    ) -> Result<Value>
    where
        F: Fn(&Value) -> bool + Send + Sync,
    {
        let check: ExistingJobCheck<'_> = &use_existing_job_fn;
        self.submit_job(project_id, job, Some(check)).await
    }

    async fn submit_job(
        &self,
        project_id: &str,
        job: &Value,
        use_existing_job_fn: Option<ExistingJobCheck<'_>>,
    ) -> Result<Value> {
        let job_id = models::job_id(job).ok_or_else(|| {
            HookError::InvalidArgument("job must contain a string `jobId`".to_string())
        })?;
        let parent = paths::project_path(project_id);
        let job_path = paths::job_path(project_id, job_id);

        match self.api.create_job(&parent, job).await {
            Ok(created) => {
                debug!("Created job {}: {}", job_path, created);
            }
            Err(err) if err.is_conflict() => {
                let existing = self.api.get_job(&job_path).await?;
                if let Some(check) = use_existing_job_fn {
                    if !check(&existing) {
                        error!(
                            "Job with job_id {} already exists, but it does not match our expectation: {}",
                            job_id, existing
                        );
                        return Err(err.into());
                    }
                }
                info!(
                    "Job with job_id {} already exists. Will wait for it to finish",
                    job_id
                );
            }
            Err(err) => {
                error!("Failed to create job {}: {}", job_path, err);
                return Err(err.into());
            }
        }

        self.wait_for_job_done(&job_path).await
    }

    /// Fetches a training job once.
    pub async fn get_job(&self, project_id: &str, job_id: &str) -> Result<Value> {
        let job_path = paths::job_path(project_id, job_id);
        Ok(self.api.get_job(&job_path).await?)
    }

    /// Requests cancellation of a training job without waiting for it to stop.
    pub async fn cancel_job(&self, project_id: &str, job_id: &str) -> Result<Value> {
        let job_path = paths::job_path(project_id, job_id);
        info!("Cancelling job {}", job_path);
        Ok(self.api.cancel_job(&job_path).await?)
    }

    async fn wait_for_job_done(&self, job_path: &str) -> Result<Value> {
        let mut poller = Poller::new(&self.config.job_poll, job_path);
        loop {
            match self.api.get_job(job_path).await {
                Ok(job) => match JobState::of(&job) {
                    Some(state) if state.is_terminal() => {
                        info!("Job {} finished in state {}", job_path, state);
                        return Ok(job);
                    }
                    state => debug!("Job {} is in state {:?}", job_path, state),
                },
                Err(err) if err.is_rate_limited() => {
                    warn!("Quota exceeded while polling job {}: {}", job_path, err);
                }
                Err(err) => {
                    error!(
                        "Failed to get job {} after {} polls: {}",
                        job_path,
                        poller.polls(),
                        err
                    );
                    return Err(err.into());
                }
            }
            poller.wait().await?;
        }
    }

    /// Creates a version of `model_name` and waits for the creating operation to finish.
    ///
    /// The operation polled is the one named by the create response. Returns the final
    /// operation record.
    pub async fn create_version(
        &self,
        project_id: &str,
        model_name: &str,
        version_spec: &Value,
    ) -> Result<Value> {
        let parent = paths::model_path(project_id, model_name);
        let created = self.api.create_version(&parent, version_spec).await?;
        let operation_name = models::resource_name(&created).ok_or_else(|| {
            HookError::UnexpectedResponse(format!("version create returned no name: {created}"))
        })?;
        debug!("Creating version under {}: {}", parent, operation_name);
        self.wait_for_operation(operation_name).await
    }

    /// Sets `version_name` as the default version of `model_name`.
    pub async fn set_default_version(
        &self,
        project_id: &str,
        model_name: &str,
        version_name: &str,
    ) -> Result<Value> {
        let full_version_name = paths::version_path(project_id, model_name, version_name);
        let response = self
            .api
            .set_default_version(&full_version_name, &json!({}))
            .await
            .inspect_err(|err| {
                error!(
                    "Failed to set default version {}: {}",
                    full_version_name, err
                )
            })?;
        info!("Successfully set version: {} to default", response);
        Ok(response)
    }

    /// Lists every version of `model_name`, following page tokens until the last page.
    pub async fn list_versions(&self, project_id: &str, model_name: &str) -> Result<Vec<Value>> {
        let parent = paths::model_path(project_id, model_name);
        let mut result = Vec::new();
        let mut request = Some(ListVersionsRequest::new(parent, self.config.page_size));
        while let Some(current) = request {
            let response = self.api.list_versions(&current).await?;
            if let Some(versions) = response.get("versions").and_then(Value::as_array) {
                result.extend(versions.iter().cloned());
            }
            request = self.api.list_versions_next(&current, &response);
        }
        debug!("Listed {} versions of {}/{}", result.len(), project_id, model_name);
        Ok(result)
    }

    /// Deletes a version and waits for the deleting operation to finish.
    ///
    /// Returns the final polled operation record, not the delete response.
    pub async fn delete_version(
        &self,
        project_id: &str,
        model_name: &str,
        version_name: &str,
    ) -> Result<Value> {
        let full_name = paths::version_path(project_id, model_name, version_name);
        let response = self.api.delete_version(&full_name).await?;
        let operation_name = models::resource_name(&response).ok_or_else(|| {
            HookError::UnexpectedResponse(format!("version delete returned no name: {response}"))
        })?;
        let operation = self.wait_for_operation(operation_name).await?;
        info!("Version was deleted: {}", full_name);
        Ok(operation)
    }

    async fn wait_for_operation(&self, name: &str) -> Result<Value> {
        let mut poller = Poller::new(&self.config.operation_poll, name);
        loop {
            match self.api.get_operation(name).await {
                Ok(operation) => {
                    if let Some(err) = models::operation_error(&operation) {
                        error!("Operation {} failed: {}", name, err);
                        return Err(HookError::OperationFailed {
                            name: name.to_string(),
                            error: err.clone(),
                        });
                    }
                    if models::operation_done(&operation) {
                        return Ok(operation);
                    }
                }
                Err(err) if err.is_rate_limited() => {
                    warn!("Quota exceeded while polling operation {}: {}", name, err);
                }
                Err(err) => return Err(err.into()),
            }
            poller.wait().await?;
        }
    }

    /// Creates a model. `model` must carry a non-empty `name`.
    pub async fn create_model(&self, project_id: &str, model: &Value) -> Result<Value> {
        match models::resource_name(model) {
            Some(name) if !name.is_empty() => {}
            _ => {
                return Err(HookError::InvalidArgument(
                    "Model name must be provided and could not be an empty string".to_string(),
                ))
            }
        }
        let parent = paths::project_path(project_id);
        Ok(self.api.create_model(&parent, model).await?)
    }

    pub async fn get_model(&self, project_id: &str, model_name: &str) -> Result<Value> {
        let full_model_name = paths::model_path(project_id, model_name);
        Ok(self.api.get_model(&full_model_name).await?)
    }

    /// Deletes a model. With `delete_contents` its versions are deleted first, the default
    /// version last, since the API refuses to delete a model that still has versions.
    pub async fn delete_model(
        &self,
        project_id: &str,
        model_name: &str,
        delete_contents: bool,
    ) -> Result<Value> {
        if delete_contents {
            self.delete_all_versions(project_id, model_name).await?;
        }
        let full_model_name = paths::model_path(project_id, model_name);
        let response = self.api.delete_model(&full_model_name).await?;
        info!("Model was deleted: {}", full_model_name);
        Ok(response)
    }

    async fn delete_all_versions(&self, project_id: &str, model_name: &str) -> Result<()> {
        let versions = self.list_versions(project_id, model_name).await?;
        let (default_versions, other_versions): (Vec<&Value>, Vec<&Value>) =
            versions.iter().partition(|v| models::is_default_version(v));
        for version in other_versions.into_iter().chain(default_versions) {
            let name = models::resource_name(version).ok_or_else(|| {
                HookError::UnexpectedResponse(format!("version without name: {version}"))
            })?;
            // listed names are fully qualified
            let version_name = name.rsplit('/').next().unwrap_or(name);
            self.delete_version(project_id, model_name, version_name)
                .await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/hook.rs"]
mod tests;
