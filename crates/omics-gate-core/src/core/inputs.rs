// crates/omics-gate-core/src/core/inputs.rs
// ============================================================================
// Module: Operation Inputs
// Description: Optional-field inputs for run, workflow, and repository creation.
// Purpose: Replace duck-typed input filtering with explicit omit-unset structs.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Mutation arguments arrive as sparse GraphQL input objects. Each operation
//! input is an explicit optional-field struct whose serialization omits unset
//! fields; [`StartRunInput::normalized`] and friends clear empty values the
//! frontend submits for untouched form fields, so unset fields never reach
//! the upstream service as empty strings.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Clears an optional string that is present but empty.
fn drop_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ============================================================================
// SECTION: Start Run Input
// ============================================================================

/// Input for starting a workflow run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRunInput {
    /// Workflow identifier to execute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    /// Workflow type label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_type: Option<String>,
    /// Execution role ARN; injected by the resolver, never caller-supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,
    /// Run name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Run group identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_group_id: Option<String>,
    /// Run priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Workflow parameters document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    /// Storage capacity for the run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_capacity: Option<i32>,
    /// Output location URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_uri: Option<String>,
    /// Run log level label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    /// Caller-supplied run identifier for re-runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    /// Idempotency request identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Resource tags applied to the run at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
}

impl StartRunInput {
    /// Returns the input with empty string fields cleared to unset.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.workflow_id = drop_empty(self.workflow_id);
        self.workflow_type = drop_empty(self.workflow_type);
        self.role_arn = drop_empty(self.role_arn);
        self.name = drop_empty(self.name);
        self.run_group_id = drop_empty(self.run_group_id);
        self.output_uri = drop_empty(self.output_uri);
        self.log_level = drop_empty(self.log_level);
        self.run_id = drop_empty(self.run_id);
        self.request_id = drop_empty(self.request_id);
        self.parameters = self.parameters.filter(|value| !value.is_null());
        self.tags = self.tags.filter(|tags| !tags.is_empty());
        self
    }

    /// Inserts a resource tag, creating the tag map when absent.
    pub fn insert_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.get_or_insert_with(BTreeMap::new).insert(key.into(), value.into());
    }

    /// Returns the string parameter values referenced by the run.
    ///
    /// Only top-level string values participate in the repository permission
    /// check; nested and non-string parameters cannot name an image URI.
    #[must_use]
    pub fn parameter_values(&self) -> Vec<String> {
        match &self.parameters {
            Some(Value::Object(map)) => map
                .values()
                .filter_map(Value::as_str)
                .map(ToString::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }
}

// ============================================================================
// SECTION: Create Workflow Input
// ============================================================================

/// Input for creating a workflow definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkflowInput {
    /// Workflow name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Workflow description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Workflow engine label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    /// Definition archive location URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_uri: Option<String>,
    /// Entry point within the definition archive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    /// Parameter template document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_template: Option<Value>,
    /// Default storage capacity for runs of the workflow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_capacity: Option<i32>,
    /// Idempotency request identifier; injected by the resolver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Resource tags applied to the workflow at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeMap<String, String>>,
}

impl CreateWorkflowInput {
    /// Returns the input with empty string fields cleared to unset.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.name = drop_empty(self.name);
        self.description = drop_empty(self.description);
        self.engine = drop_empty(self.engine);
        self.definition_uri = drop_empty(self.definition_uri);
        self.main = drop_empty(self.main);
        self.request_id = drop_empty(self.request_id);
        self.parameter_template = self.parameter_template.filter(|value| !value.is_null());
        self.tags = self.tags.filter(|tags| !tags.is_empty());
        self
    }

    /// Inserts a resource tag, creating the tag map when absent.
    pub fn insert_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.tags.get_or_insert_with(BTreeMap::new).insert(key.into(), value.into());
    }
}

// ============================================================================
// SECTION: Create Repository Input
// ============================================================================

/// Input for creating a container image repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRepositoryInput {
    /// Repository name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_name: Option<String>,
    /// Image tag mutability label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_tag_mutability: Option<String>,
    /// Whether images are scanned on push.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_on_push: Option<bool>,
}

impl CreateRepositoryInput {
    /// Returns the input with empty string fields cleared to unset.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.repository_name = drop_empty(self.repository_name);
        self.image_tag_mutability = drop_empty(self.image_tag_mutability);
        self
    }
}
