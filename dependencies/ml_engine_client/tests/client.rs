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
mod common;
use assert_json_diff::assert_json_eq;
use ml_engine_api::{ApiError, ClientBuilder, ListVersionsRequest, DEFAULT_BASE_URL};
use mockito::Matcher;
use reqwest_retry::policies::ExponentialBackoff;
use serde_json::json;
use std::time::Duration;

/// Test ClientBuilder.build() defaults and endpoint override.
#[test]
fn test_client_creation() {
    let client = ClientBuilder::new("token".to_string()).build().unwrap();
    assert_eq!(client.base_url(), DEFAULT_BASE_URL);

    let client = ClientBuilder::new("token".to_string())
        .with_base_url("http://localhost:8080/")
        .build()
        .unwrap();
    assert_eq!(client.base_url(), "http://localhost:8080");

    let client = ClientBuilder::new("token".to_string())
        .with_timeout(Duration::from_secs(30))
        .with_connect_timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    assert_eq!(client.base_url(), DEFAULT_BASE_URL);

    // header values cannot carry control characters
    assert!(ClientBuilder::new("bad\ntoken".to_string()).build().is_err());
}

fn retrying_client(base_url: &str) -> ml_engine_api::Client {
    let policy = ExponentialBackoff::builder()
        .retry_bounds(Duration::from_millis(1), Duration::from_millis(5))
        .build_with_max_retries(2);
    ClientBuilder::new(common::TOKEN.to_string())
        .with_base_url(base_url)
        .with_retry_policy(policy)
        .build()
        .unwrap()
}

/// Transient failures of reads are retried with the configured policy.
#[tokio::test]
async fn test_get_model_retries_transient_errors() {
    common::setup();

    let mut server = mockito::Server::new_async().await;
    let get_mock = server
        .mock("GET", "/projects/test-project/models/test-model")
        .with_status(503)
        .with_body("backend unavailable")
        .expect(3)
        .create_async()
        .await;

    let client = retrying_client(&server.url());
    let err = client
        .get_model("projects/test-project/models/test-model")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(503));

    get_mock.assert_async().await;
}

/// Creates are sent once even when retries are enabled.
#[tokio::test]
async fn test_create_version_is_not_retried() {
    common::setup();

    let mut server = mockito::Server::new_async().await;
    let create_mock = server
        .mock("POST", "/projects/test-project/models/test-model/versions")
        .with_status(503)
        .with_body("backend unavailable")
        .expect(1)
        .create_async()
        .await;

    let client = retrying_client(&server.url());
    let err = client
        .create_version(
            "projects/test-project/models/test-model",
            &json!({"name": "v1"}),
        )
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(503));

    create_mock.assert_async().await;
}

/// Test Client.create_model().
#[tokio::test]
async fn test_create_model() {
    common::setup();

    let mut server = mockito::Server::new_async().await;
    let model = json!({"name": "test-model"});

    let create_mock = server
        .mock("POST", "/projects/test-project/models")
        .match_header("authorization", "Bearer test-token")
        .match_body(Matcher::Json(model.clone()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(model.to_string())
        .create_async()
        .await;

    let client = common::client(&server.url());
    let created = client
        .create_model("projects/test-project", &model)
        .await
        .unwrap();
    assert_json_eq!(created, model);

    create_mock.assert_async().await;
}

/// Test Client.set_default_version() uses the `:setDefault` custom method.
#[tokio::test]
async fn test_set_default_version() {
    common::setup();

    let mut server = mockito::Server::new_async().await;
    let version = json!({
        "name": "projects/test-project/models/test-model/versions/v1",
        "isDefault": true
    });

    let set_default_mock = server
        .mock(
            "POST",
            "/projects/test-project/models/test-model/versions/v1:setDefault",
        )
        .match_body(Matcher::Json(json!({})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(version.to_string())
        .create_async()
        .await;

    let client = common::client(&server.url());
    let result = client
        .set_default_version("projects/test-project/models/test-model/versions/v1", &json!({}))
        .await
        .unwrap();
    assert_json_eq!(result, version);

    set_default_mock.assert_async().await;
}

/// Test Client.list_versions() sends page size and continuation token as query parameters.
#[tokio::test]
async fn test_list_versions_pages() {
    common::setup();

    let mut server = mockito::Server::new_async().await;
    let first_body = json!({"versions": [{"name": "v0"}], "nextPageToken": "TOKEN-0"});
    let second_body = json!({"versions": [{"name": "v1"}]});

    let first_mock = server
        .mock("GET", "/projects/test-project/models/test-model/versions")
        .match_query(Matcher::Exact("pageSize=100".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(first_body.to_string())
        .create_async()
        .await;
    let second_mock = server
        .mock("GET", "/projects/test-project/models/test-model/versions")
        .match_query(Matcher::Exact("pageSize=100&pageToken=TOKEN-0".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(second_body.to_string())
        .create_async()
        .await;

    let client = common::client(&server.url());
    let request = ListVersionsRequest::new("projects/test-project/models/test-model", 100);
    let first = client.list_versions(&request).await.unwrap();
    assert_json_eq!(first, first_body);

    let next = request.next(&first).unwrap();
    let second = client.list_versions(&next).await.unwrap();
    assert_json_eq!(second, second_body);
    assert!(next.next(&second).is_none());

    first_mock.assert_async().await;
    second_mock.assert_async().await;
}

/// Test Client.delete_version() and Client.get_operation().
#[tokio::test]
async fn test_delete_version_returns_operation() {
    common::setup();

    let mut server = mockito::Server::new_async().await;
    let operation = json!({"name": "projects/test-project/operations/op-1", "done": false});
    let operation_done = json!({"name": "projects/test-project/operations/op-1", "done": true});

    let delete_mock = server
        .mock(
            "DELETE",
            "/projects/test-project/models/test-model/versions/v1",
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(operation.to_string())
        .create_async()
        .await;
    let operation_mock = server
        .mock("GET", "/projects/test-project/operations/op-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(operation_done.to_string())
        .create_async()
        .await;

    let client = common::client(&server.url());
    let deleted = client
        .delete_version("projects/test-project/models/test-model/versions/v1")
        .await
        .unwrap();
    assert_json_eq!(deleted, operation);

    let polled = client
        .get_operation("projects/test-project/operations/op-1")
        .await
        .unwrap();
    assert_json_eq!(polled, operation_done);

    delete_mock.assert_async().await;
    operation_mock.assert_async().await;
}

/// A 409 from job creation is reported as a conflict carrying the API's error message.
#[tokio::test]
async fn test_create_job_conflict() {
    common::setup();

    let mut server = mockito::Server::new_async().await;
    let error_body = json!({
        "error": {
            "code": 409,
            "message": "Job already exists",
            "status": "ALREADY_EXISTS"
        }
    });

    let create_mock = server
        .mock("POST", "/projects/test-project/jobs")
        .with_status(409)
        .with_header("content-type", "application/json")
        .with_body(error_body.to_string())
        .create_async()
        .await;

    let client = common::client(&server.url());
    let err = client
        .create_job("projects/test-project", &json!({"jobId": "j1"}))
        .await
        .unwrap_err();
    assert!(err.is_conflict());
    match err {
        ApiError::Conflict { message } => assert_eq!(message, "Job already exists"),
        other => panic!("unexpected error: {other:?}"),
    }

    create_mock.assert_async().await;
}

/// Statuses other than 409 keep their code and raw body.
#[tokio::test]
async fn test_get_job_not_found() {
    common::setup();

    let mut server = mockito::Server::new_async().await;
    let get_mock = server
        .mock("GET", "/projects/test-project/jobs/missing")
        .with_status(404)
        .with_body("no such job")
        .create_async()
        .await;

    let client = common::client(&server.url());
    let err = client
        .get_job("projects/test-project/jobs/missing")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(!err.is_conflict());
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "no such job");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    get_mock.assert_async().await;
}

/// Test Client.cancel_job(); an empty success body decodes as an empty object.
#[tokio::test]
async fn test_cancel_job_empty_body() {
    common::setup();

    let mut server = mockito::Server::new_async().await;
    let cancel_mock = server
        .mock("POST", "/projects/test-project/jobs/j1:cancel")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    let client = common::client(&server.url());
    let result = client
        .cancel_job("projects/test-project/jobs/j1")
        .await
        .unwrap();
    assert_json_eq!(result, json!({}));

    cancel_mock.assert_async().await;
}
