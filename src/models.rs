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

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// `state` of a training job.
// SCREAMING_SNAKE_CASE matches the API, e.g. "StateUnspecified" <-> "STATE_UNSPECIFIED".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    StateUnspecified,
    Queued,
    Preparing,
    Running,
    Succeeded,
    Failed,
    Cancelling,
    Cancelled,
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobState::Succeeded | JobState::Failed | JobState::Cancelled
        )
    }

    /// State of a job record. `None` when the field is missing or holds a value this crate
    /// does not know; both count as non-terminal.
    pub fn of(job: &Value) -> Option<Self> {
        job.get("state").and_then(|s| JobState::deserialize(s).ok())
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            JobState::StateUnspecified => "STATE_UNSPECIFIED",
            JobState::Queued => "QUEUED",
            JobState::Preparing => "PREPARING",
            JobState::Running => "RUNNING",
            JobState::Succeeded => "SUCCEEDED",
            JobState::Failed => "FAILED",
            JobState::Cancelling => "CANCELLING",
            JobState::Cancelled => "CANCELLED",
        };
        write!(f, "{}", name)
    }
}

/// `jobId` of a job record.
pub fn job_id(job: &Value) -> Option<&str> {
    job.get("jobId").and_then(Value::as_str)
}

/// `name` of a model, version or operation record.
pub fn resource_name(resource: &Value) -> Option<&str> {
    resource.get("name").and_then(Value::as_str)
}

pub fn is_default_version(version: &Value) -> bool {
    version
        .get("isDefault")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

pub fn operation_done(operation: &Value) -> bool {
    operation
        .get("done")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

pub fn operation_error(operation: &Value) -> Option<&Value> {
    operation.get("error").filter(|e| !e.is_null())
}
