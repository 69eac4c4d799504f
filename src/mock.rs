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
use ml_engine_api::{ApiError, ListVersionsRequest, Result};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Remote call kinds of [`MlEngineApi`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    CreateModel,
    GetModel,
    DeleteModel,
    CreateVersion,
    SetDefaultVersion,
    ListVersions,
    ListVersionsNext,
    DeleteVersion,
    GetOperation,
    CreateJob,
    GetJob,
    CancelJob,
}

/// One recorded call, with the arguments it received.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateModel { parent: String, body: Value },
    GetModel { name: String },
    DeleteModel { name: String },
    CreateVersion { parent: String, body: Value },
    SetDefaultVersion { name: String, body: Value },
    ListVersions(ListVersionsRequest),
    ListVersionsNext {
        previous_request: ListVersionsRequest,
        previous_response: Value,
    },
    DeleteVersion { name: String },
    GetOperation { name: String },
    CreateJob { parent: String, body: Value },
    GetJob { name: String },
    CancelJob { name: String },
}

impl Call {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Call::CreateModel { .. } => Endpoint::CreateModel,
            Call::GetModel { .. } => Endpoint::GetModel,
            Call::DeleteModel { .. } => Endpoint::DeleteModel,
            Call::CreateVersion { .. } => Endpoint::CreateVersion,
            Call::SetDefaultVersion { .. } => Endpoint::SetDefaultVersion,
            Call::ListVersions(_) => Endpoint::ListVersions,
            Call::ListVersionsNext { .. } => Endpoint::ListVersionsNext,
            Call::DeleteVersion { .. } => Endpoint::DeleteVersion,
            Call::GetOperation { .. } => Endpoint::GetOperation,
            Call::CreateJob { .. } => Endpoint::CreateJob,
            Call::GetJob { .. } => Endpoint::GetJob,
            Call::CancelJob { .. } => Endpoint::CancelJob,
        }
    }
}

#[derive(Debug, Clone)]
enum Scripted {
    Ok(Value),
    Err { status: u16, message: String },
}

impl Scripted {
    fn into_result(self) -> Result<Value> {
        match self {
            Scripted::Ok(v) => Ok(v),
            Scripted::Err { status, message } => Err(ApiError::from_status(status, message)),
        }
    }
}

/// In-process [`MlEngineApi`] with scripted responses.
///
/// Responses queued for an endpoint are served in order; the last one keeps being served once
/// the queue is down to it. An endpoint with nothing scripted answers 404. Every call is
/// recorded and can be inspected with [`MockMlEngine::calls`].
///
/// This never talks to the real API; it is meant for exercising hook logic without
/// credentials or network access.
#[derive(Debug, Default)]
pub struct MockMlEngine {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    responses: HashMap<Endpoint, VecDeque<Scripted>>,
    calls: Vec<Call>,
}

impl MockMlEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response for `endpoint`.
    pub fn respond(&self, endpoint: Endpoint, body: Value) -> &Self {
        self.push(endpoint, Scripted::Ok(body))
    }

    /// Queues an HTTP failure for `endpoint`.
    pub fn fail(&self, endpoint: Endpoint, status: u16, message: &str) -> &Self {
        self.push(
            endpoint,
            Scripted::Err {
                status,
                message: message.to_string(),
            },
        )
    }

    /// All calls received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn calls_to(&self, endpoint: Endpoint) -> Vec<Call> {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.endpoint() == endpoint)
            .cloned()
            .collect()
    }

    fn push(&self, endpoint: Endpoint, response: Scripted) -> &Self {
        self.lock()
            .responses
            .entry(endpoint)
            .or_default()
            .push_back(response);
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn serve(&self, call: Call) -> Result<Value> {
        let endpoint = call.endpoint();
        let mut inner = self.lock();
        inner.calls.push(call);
        let scripted = match inner.responses.get_mut(&endpoint) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        match scripted {
            Some(s) => s.into_result(),
            None => Err(ApiError::from_status(
                ApiError::NOT_FOUND,
                format!("no response scripted for {:?}", endpoint),
            )),
        }
    }
}

#[async_trait]
impl MlEngineApi for MockMlEngine {
    async fn create_model(&self, parent: &str, model: &Value) -> Result<Value> {
        self.serve(Call::CreateModel {
            parent: parent.to_string(),
            body: model.clone(),
        })
    }

    async fn get_model(&self, name: &str) -> Result<Value> {
        self.serve(Call::GetModel {
            name: name.to_string(),
        })
    }

    async fn delete_model(&self, name: &str) -> Result<Value> {
        self.serve(Call::DeleteModel {
            name: name.to_string(),
        })
    }

    async fn create_version(&self, parent: &str, version: &Value) -> Result<Value> {
        self.serve(Call::CreateVersion {
            parent: parent.to_string(),
            body: version.clone(),
        })
    }

    async fn set_default_version(&self, name: &str, body: &Value) -> Result<Value> {
        self.serve(Call::SetDefaultVersion {
            name: name.to_string(),
            body: body.clone(),
        })
    }

    async fn list_versions(&self, request: &ListVersionsRequest) -> Result<Value> {
        self.serve(Call::ListVersions(request.clone()))
    }

    fn list_versions_next(
        &self,
        previous_request: &ListVersionsRequest,
        previous_response: &Value,
    ) -> Option<ListVersionsRequest> {
        self.lock().calls.push(Call::ListVersionsNext {
            previous_request: previous_request.clone(),
            previous_response: previous_response.clone(),
        });
        previous_request.next(previous_response)
    }

    async fn delete_version(&self, name: &str) -> Result<Value> {
        self.serve(Call::DeleteVersion {
            name: name.to_string(),
        })
    }

    async fn get_operation(&self, name: &str) -> Result<Value> {
        self.serve(Call::GetOperation {
            name: name.to_string(),
        })
    }

    async fn create_job(&self, parent: &str, job: &Value) -> Result<Value> {
        self.serve(Call::CreateJob {
            parent: parent.to_string(),
            body: job.clone(),
        })
    }

    async fn get_job(&self, name: &str) -> Result<Value> {
        self.serve(Call::GetJob {
            name: name.to_string(),
        })
    }

    async fn cancel_job(&self, name: &str) -> Result<Value> {
        self.serve(Call::CancelJob {
            name: name.to_string(),
        })
    }
}
