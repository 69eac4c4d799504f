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

use eyre::{eyre, Result, WrapErr};
use mlengine_hook::{HookConfig, PollPolicy};
use std::env;
use std::time::Duration;

pub const ACCESS_TOKEN_VAR: &str = "MLENGINE_ACCESS_TOKEN";
pub const API_ENDPOINT_VAR: &str = "MLENGINE_API_ENDPOINT";
pub const JOB_POLL_INTERVAL_VAR: &str = "MLENGINE_JOB_POLL_INTERVAL_SECS";
pub const JOB_TIMEOUT_VAR: &str = "MLENGINE_JOB_TIMEOUT_SECS";
pub const HTTP_TIMEOUT_VAR: &str = "MLENGINE_HTTP_TIMEOUT_SECS";
pub const PAGE_SIZE_VAR: &str = "MLENGINE_PAGE_SIZE";

/// Settings read from the environment (and `.env`).
///
/// # Environment variables
///
/// * `MLENGINE_ACCESS_TOKEN`: OAuth2 access token, e.g. from `gcloud auth print-access-token`
/// * `MLENGINE_API_ENDPOINT`: overrides `https://ml.googleapis.com/v1`
/// * `MLENGINE_JOB_POLL_INTERVAL_SECS`: delay between job polls
/// * `MLENGINE_JOB_TIMEOUT_SECS`: give up waiting for a job after this long
/// * `MLENGINE_HTTP_TIMEOUT_SECS`: timeout of a single HTTP request
/// * `MLENGINE_PAGE_SIZE`: versions requested per page when listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub access_token: String,
    pub endpoint: Option<String>,
    pub job_poll_interval: Option<Duration>,
    pub job_timeout: Option<Duration>,
    pub http_timeout: Option<Duration>,
    pub page_size: Option<u32>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let seconds = |name: &str| -> Result<Option<Duration>> {
            value(name)
                .map(|v| {
                    v.trim()
                        .parse::<u64>()
                        .map(Duration::from_secs)
                        .wrap_err_with(|| format!("{name} must be a number of seconds, got '{v}'"))
                })
                .transpose()
        };

        let page_size = value(PAGE_SIZE_VAR)
            .map(|v| {
                v.trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| eyre!("{PAGE_SIZE_VAR} must be a positive number, got '{v}'"))
            })
            .transpose()?;

        let access_token =
            value(ACCESS_TOKEN_VAR).ok_or_else(|| eyre!("{ACCESS_TOKEN_VAR} is not set"))?;
        Ok(Self {
            access_token,
            endpoint: value(API_ENDPOINT_VAR),
            job_poll_interval: seconds(JOB_POLL_INTERVAL_VAR)?,
            job_timeout: seconds(JOB_TIMEOUT_VAR)?,
            http_timeout: seconds(HTTP_TIMEOUT_VAR)?,
            page_size,
        })
    }

    pub fn hook_config(&self) -> HookConfig {
        let mut job_poll = match self.job_poll_interval {
            Some(interval) => PollPolicy::fixed(interval),
            None => PollPolicy::jobs(),
        };
        if let Some(timeout) = self.job_timeout {
            job_poll = job_poll.with_max_elapsed(timeout);
        }
        let config = HookConfig::default().with_job_poll(job_poll);
        match self.page_size {
            Some(page_size) => config.with_page_size(page_size),
            None => config,
        }
    }
}
