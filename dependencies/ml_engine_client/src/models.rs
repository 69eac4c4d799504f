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

use serde_json::Value;

/// One page request of `projects.models.versions.list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListVersionsRequest {
    /// Model path, `projects/{project}/models/{model}`
    pub parent: String,
    pub page_size: u32,
    pub page_token: Option<String>,
}

impl ListVersionsRequest {
    pub fn new(parent: impl Into<String>, page_size: u32) -> Self {
        Self {
            parent: parent.into(),
            page_size,
            page_token: None,
        }
    }

    /// Request for the page following `previous_response`, or `None` when the response
    /// carries no `nextPageToken`.
    pub fn next(&self, previous_response: &Value) -> Option<Self> {
        let token = previous_response
            .get("nextPageToken")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())?;
        Some(Self {
            parent: self.parent.clone(),
            page_size: self.page_size,
            page_token: Some(token.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ListVersionsRequest;
    use serde_json::json;

    #[test]
    fn next_carries_token_forward() {
        let first = ListVersionsRequest::new("projects/p/models/m", 100);
        let next = first
            .next(&json!({"versions": [], "nextPageToken": "TOKEN-0"}))
            .unwrap();
        assert_eq!(next.parent, "projects/p/models/m");
        assert_eq!(next.page_size, 100);
        assert_eq!(next.page_token.as_deref(), Some("TOKEN-0"));
    }

    #[test]
    fn next_stops_without_token() {
        let first = ListVersionsRequest::new("projects/p/models/m", 100);
        assert_eq!(first.next(&json!({"versions": ["v"]})), None);
        assert_eq!(first.next(&json!({"nextPageToken": ""})), None);
    }
}
