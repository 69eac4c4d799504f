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

mod config;

use clap::{Parser, Subcommand};
use config::Settings;
use dotenv::dotenv;
use eyre::{eyre, Result, WrapErr};
use log::{debug, info};
use ml_engine_api::ClientBuilder;
use mlengine_hook::{models, MlEngineHook};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(version)]
#[command(about = "Manage ML Engine models, versions and training jobs")]
struct Args {
    /// Google Cloud project ID
    #[arg(short, long)]
    project: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a model described by a JSON file
    CreateModel {
        #[arg(short, long)]
        file: PathBuf,
    },
    GetModel {
        model: String,
    },
    /// Delete a model, optionally deleting all of its versions first
    DeleteModel {
        model: String,
        #[arg(long)]
        delete_contents: bool,
    },
    /// Create a version described by a JSON file and wait until it is ready
    CreateVersion {
        model: String,
        #[arg(short, long)]
        file: PathBuf,
    },
    SetDefaultVersion {
        model: String,
        version: String,
    },
    ListVersions {
        model: String,
    },
    /// Delete a version and wait until the deletion completes
    DeleteVersion {
        model: String,
        version: String,
    },
    /// Submit a training or prediction job described by a JSON file and wait for it to finish
    SubmitJob {
        #[arg(short, long)]
        file: PathBuf,
        /// Overrides the file's `jobId`; a random one is generated when neither is given
        #[arg(long)]
        job_id: Option<String>,
        /// Only adopt an existing job with the same id if its inputs match the file
        #[arg(long)]
        match_inputs: bool,
    },
    GetJob {
        job_id: String,
    },
    CancelJob {
        job_id: String,
    },
}

fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).wrap_err_with(|| format!("{} is not valid JSON", path.display()))
}

/// Sets `jobId` from the command line, or generates one when the file has none.
fn with_job_id(mut job: Value, job_id: Option<String>) -> Result<Value> {
    let fields = job
        .as_object_mut()
        .ok_or_else(|| eyre!("job description must be a JSON object"))?;
    match job_id {
        Some(id) => {
            fields.insert("jobId".to_string(), Value::String(id));
        }
        None if !fields.contains_key("jobId") => {
            let id = format!("mlengine_job_{}", Uuid::new_v4().simple());
            info!("No jobId given, using {}", id);
            fields.insert("jobId".to_string(), Value::String(id));
        }
        None => {}
    }
    Ok(job)
}

/// Training and prediction inputs of `expected` and `existing` are equal.
fn same_inputs(expected: &Value, existing: &Value) -> bool {
    ["trainingInput", "predictionInput"]
        .iter()
        .all(|field| expected.get(field) == existing.get(field))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = Settings::from_env()?;
    debug!(
        "endpoint={:?}, job_poll_interval={:?}, job_timeout={:?}, http_timeout={:?}",
        settings.endpoint, settings.job_poll_interval, settings.job_timeout, settings.http_timeout
    );

    let mut builder = ClientBuilder::new(settings.access_token.clone());
    if let Some(endpoint) = &settings.endpoint {
        builder.with_base_url(endpoint.clone());
    }
    if let Some(timeout) = settings.http_timeout {
        builder.with_timeout(timeout);
    }
    let client = builder
        .build()
        .map_err(|e| eyre!("failed to build API client: {e:#}"))?;
    let hook = MlEngineHook::new(client).with_config(settings.hook_config());
    let project = args.project.as_str();

    let result = match args.command {
        Command::CreateModel { file } => hook.create_model(project, &read_json(&file)?).await?,
        Command::GetModel { model } => hook.get_model(project, &model).await?,
        Command::DeleteModel {
            model,
            delete_contents,
        } => hook.delete_model(project, &model, delete_contents).await?,
        Command::CreateVersion { model, file } => {
            hook.create_version(project, &model, &read_json(&file)?)
                .await?
        }
        Command::SetDefaultVersion { model, version } => {
            hook.set_default_version(project, &model, &version).await?
        }
        Command::ListVersions { model } => {
            Value::Array(hook.list_versions(project, &model).await?)
        }
        Command::DeleteVersion { model, version } => {
            hook.delete_version(project, &model, &version).await?
        }
        Command::SubmitJob {
            file,
            job_id,
            match_inputs,
        } => {
            let job = with_job_id(read_json(&file)?, job_id)?;
            let job = if match_inputs {
                hook.create_job_with_check(project, &job, |existing| same_inputs(&job, existing))
                    .await?
            } else {
                hook.create_job(project, &job).await?
            };
            if let Some(state) = models::JobState::of(&job) {
                info!("Job finished in state {}", state);
            }
            job
        }
        Command::GetJob { job_id } => hook.get_job(project, &job_id).await?,
        Command::CancelJob { job_id } => hook.cancel_job(project, &job_id).await?,
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
