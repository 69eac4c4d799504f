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

//! Resource names as expected by the ML Engine v1 API.

/// `projects/{project_id}`
pub fn project_path(project_id: &str) -> String {
    format!("projects/{}", project_id)
}

/// `projects/{project_id}/models/{model_name}`
pub fn model_path(project_id: &str, model_name: &str) -> String {
    format!("{}/models/{}", project_path(project_id), model_name)
}

/// `projects/{project_id}/models/{model_name}/versions/{version_name}`
pub fn version_path(project_id: &str, model_name: &str, version_name: &str) -> String {
    format!("{}/versions/{}", model_path(project_id, model_name), version_name)
}

/// `projects/{project_id}/jobs/{job_id}`
pub fn job_path(project_id: &str, job_id: &str) -> String {
    format!("{}/jobs/{}", project_path(project_id), job_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_api_conventions() {
        assert_eq!(project_path("test-project"), "projects/test-project");
        assert_eq!(
            model_path("test-project", "test-model"),
            "projects/test-project/models/test-model"
        );
        assert_eq!(
            version_path("test-project", "test-model", "test-version"),
            "projects/test-project/models/test-model/versions/test-version"
        );
        assert_eq!(
            job_path("test-project", "test-job-id"),
            "projects/test-project/jobs/test-job-id"
        );
    }
}
