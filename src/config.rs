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

use crate::poll::PollPolicy;

/// Page size requested from `versions.list`.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Tunables of [`MlEngineHook`](crate::MlEngineHook).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookConfig {
    /// Polling of long-running operations (version create/delete)
    pub operation_poll: PollPolicy,
    /// Polling of training jobs until they reach a terminal state
    pub job_poll: PollPolicy,
    pub page_size: u32,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            operation_poll: PollPolicy::operations(),
            job_poll: PollPolicy::jobs(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl HookConfig {
    pub fn with_operation_poll(mut self, policy: PollPolicy) -> Self {
        self.operation_poll = policy;
        self
    }

    pub fn with_job_poll(mut self, policy: PollPolicy) -> Self {
        self.job_poll = policy;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}
