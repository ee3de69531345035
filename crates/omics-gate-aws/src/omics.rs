// crates/omics-gate-aws/src/omics.rs
// ============================================================================
// Module: Workflow Service
// Description: SDK-backed workflow service implementation.
// Purpose: List, describe, start, and create workflow resources.
// Dependencies: omics-gate-core, aws-sdk-omics, aws-config, serde_json
// ============================================================================

//! ## Overview
//! [`OmicsWorkflows`] implements the workflow service surface against the
//! managed workflow API. Listings route through the tag-scoped lister;
//! mutations optionally execute under per-invocation scoped credentials
//! layered onto the shared configuration. Detail operations map the upstream
//! output to JSON for direct field resolution.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_omics::Client;
use aws_sdk_omics::config::Credentials;
use aws_sdk_omics::error::DisplayErrorContext;
use aws_sdk_omics::types::RunLogLevel;
use aws_sdk_omics::types::WorkflowParameter;
use aws_sdk_omics::types::WorkflowType;
use serde_json::Value;
use serde_json::json;

use omics_gate_core::CreateWorkflowInput;
use omics_gate_core::ListingError;
use omics_gate_core::PageSource;
use omics_gate_core::ResolverError;
use omics_gate_core::ResourcePage;
use omics_gate_core::RunSummary;
use omics_gate_core::ScopedCredentials;
use omics_gate_core::StartRunInput;
use omics_gate_core::TagSet;
use omics_gate_core::TagSource;
use omics_gate_core::TaskSummary;
use omics_gate_core::TenantId;
use omics_gate_core::WorkflowService;
use omics_gate_core::WorkflowSummary;
use omics_gate_core::collect_all;
use omics_gate_core::list_scoped;
use omics_gate_core::unix_time_millis;

use crate::convert::document_to_json;
use crate::convert::format_time;
use crate::convert::json_to_document;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Provider name attached to scoped credential providers.
const SCOPED_PROVIDER_NAME: &str = "omics-gate-scoped";

// ============================================================================
// SECTION: Service
// ============================================================================

/// Workflow service backed by the managed workflow API.
#[derive(Debug, Clone)]
pub struct OmicsWorkflows {
    /// Shared SDK configuration for scoped client construction.
    shared: SdkConfig,
    /// Client operating under the invocation's base credentials.
    client: Client,
}

impl OmicsWorkflows {
    /// Creates the service from the shared SDK configuration.
    #[must_use]
    pub fn new(shared: &SdkConfig) -> Self {
        Self {
            shared: shared.clone(),
            client: Client::new(shared),
        }
    }

    /// Builds a client operating under the given scoped credentials.
    fn scoped_client(&self, credentials: &ScopedCredentials) -> Client {
        let provider = Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            Some(credentials.session_token.clone()),
            None,
            SCOPED_PROVIDER_NAME,
        );
        let config = aws_sdk_omics::config::Builder::from(&self.shared)
            .credentials_provider(provider)
            .build();
        Client::from_conf(config)
    }

    /// Selects the scoped client when credentials are present.
    fn client_for(&self, credentials: Option<&ScopedCredentials>) -> Client {
        credentials.map_or_else(|| self.client.clone(), |scoped| self.scoped_client(scoped))
    }
}

// ============================================================================
// SECTION: Page Sources
// ============================================================================

/// Page source over workflow definitions of one type.
struct WorkflowPages<'a> {
    /// Client issuing the list calls.
    client: &'a Client,
    /// Workflow type selecting the listing.
    workflow_type: WorkflowType,
}

#[async_trait]
impl PageSource for WorkflowPages<'_> {
    type Item = WorkflowSummary;

    async fn fetch_page(
        &self,
        token: Option<String>,
    ) -> Result<ResourcePage<WorkflowSummary>, ListingError> {
        let output = self
            .client
            .list_workflows()
            .r#type(self.workflow_type.clone())
            .set_starting_token(token)
            .send()
            .await
            .map_err(|err| ListingError::Page(DisplayErrorContext(&err).to_string()))?;
        let items = output
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|item| WorkflowSummary {
                arn: item.arn,
                id: item.id,
                name: item.name,
                status: item.status.map(|status| status.as_str().to_string()),
                workflow_type: item.r#type.map(|kind| kind.as_str().to_string()),
                digest: item.digest,
                creation_time: format_time(item.creation_time.as_ref()),
            })
            .collect();
        Ok(ResourcePage {
            items,
            next_token: output.next_token,
        })
    }
}

/// Page source over workflow runs.
struct RunPages<'a> {
    /// Client issuing the list calls.
    client: &'a Client,
}

#[async_trait]
impl PageSource for RunPages<'_> {
    type Item = RunSummary;

    async fn fetch_page(
        &self,
        token: Option<String>,
    ) -> Result<ResourcePage<RunSummary>, ListingError> {
        let output = self
            .client
            .list_runs()
            .set_starting_token(token)
            .send()
            .await
            .map_err(|err| ListingError::Page(DisplayErrorContext(&err).to_string()))?;
        let items = output
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|item| RunSummary {
                arn: item.arn,
                id: item.id,
                name: item.name,
                status: item.status.map(|status| status.as_str().to_string()),
                workflow_id: item.workflow_id,
                priority: item.priority,
                storage_capacity: item.storage_capacity,
                creation_time: format_time(item.creation_time.as_ref()),
                start_time: format_time(item.start_time.as_ref()),
                stop_time: format_time(item.stop_time.as_ref()),
            })
            .collect();
        Ok(ResourcePage {
            items,
            next_token: output.next_token,
        })
    }
}

/// Page source over the tasks of one run.
struct TaskPages<'a> {
    /// Client issuing the list calls.
    client: &'a Client,
    /// Run whose tasks are listed.
    run_id: &'a str,
}

#[async_trait]
impl PageSource for TaskPages<'_> {
    type Item = TaskSummary;

    async fn fetch_page(
        &self,
        token: Option<String>,
    ) -> Result<ResourcePage<TaskSummary>, ListingError> {
        let output = self
            .client
            .list_run_tasks()
            .id(self.run_id)
            .set_starting_token(token)
            .send()
            .await
            .map_err(|err| ListingError::Page(DisplayErrorContext(&err).to_string()))?;
        let items = output
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|item| TaskSummary {
                task_id: item.task_id,
                status: item.status.map(|status| status.as_str().to_string()),
                name: item.name,
                cpus: item.cpus,
                memory: item.memory,
                creation_time: format_time(item.creation_time.as_ref()),
                start_time: format_time(item.start_time.as_ref()),
                stop_time: format_time(item.stop_time.as_ref()),
            })
            .collect();
        Ok(ResourcePage {
            items,
            next_token: output.next_token,
        })
    }
}

// ============================================================================
// SECTION: Tag Sources
// ============================================================================

/// Fetches the tag set attached to a workflow-service resource by ARN.
///
/// Items without an ARN yield an empty tag set, which never matches a tenant.
async fn resource_tags(client: &Client, arn: Option<&str>) -> Result<TagSet, ListingError> {
    let Some(arn) = arn else {
        return Ok(TagSet::new());
    };
    let output = client
        .list_tags_for_resource()
        .resource_arn(arn)
        .send()
        .await
        .map_err(|err| ListingError::TagLookup(DisplayErrorContext(&err).to_string()))?;
    Ok(output.tags.into_iter().collect())
}

/// Tag source for workflow definitions.
struct WorkflowTags<'a> {
    /// Client issuing the tag lookups.
    client: &'a Client,
}

#[async_trait]
impl TagSource for WorkflowTags<'_> {
    type Item = WorkflowSummary;

    async fn tags_for(&self, item: &WorkflowSummary) -> Result<TagSet, ListingError> {
        resource_tags(self.client, item.arn.as_deref()).await
    }
}

/// Tag source for workflow runs.
struct RunTags<'a> {
    /// Client issuing the tag lookups.
    client: &'a Client,
}

#[async_trait]
impl TagSource for RunTags<'_> {
    type Item = RunSummary;

    async fn tags_for(&self, item: &RunSummary) -> Result<TagSet, ListingError> {
        resource_tags(self.client, item.arn.as_deref()).await
    }
}

// ============================================================================
// SECTION: Workflow Service Implementation
// ============================================================================

#[async_trait]
impl WorkflowService for OmicsWorkflows {
    async fn list_workflows(
        &self,
        workflow_type: &str,
        tenant: Option<&TenantId>,
    ) -> Result<Vec<WorkflowSummary>, ResolverError> {
        let pages = WorkflowPages {
            client: &self.client,
            workflow_type: WorkflowType::from(workflow_type),
        };
        let tags = WorkflowTags {
            client: &self.client,
        };
        Ok(list_scoped(&pages, &tags, tenant).await?)
    }

    async fn list_runs(
        &self,
        tenant: Option<&TenantId>,
    ) -> Result<Vec<RunSummary>, ResolverError> {
        let pages = RunPages {
            client: &self.client,
        };
        let tags = RunTags {
            client: &self.client,
        };
        Ok(list_scoped(&pages, &tags, tenant).await?)
    }

    async fn list_run_tasks(&self, run_id: &str) -> Result<Vec<TaskSummary>, ResolverError> {
        let pages = TaskPages {
            client: &self.client,
            run_id,
        };
        Ok(collect_all(&pages).await?)
    }

    async fn run_detail(&self, id: &str) -> Result<Value, ResolverError> {
        let output = self
            .client
            .get_run()
            .id(id)
            .send()
            .await
            .map_err(|err| ResolverError::Upstream(DisplayErrorContext(&err).to_string()))?;
        Ok(json!({
            "arn": output.arn,
            "id": output.id,
            "status": output.status.map(|status| status.as_str().to_string()),
            "workflowId": output.workflow_id,
            "workflowType": output.workflow_type.map(|kind| kind.as_str().to_string()),
            "runId": output.run_id,
            "roleArn": output.role_arn,
            "name": output.name,
            "runGroupId": output.run_group_id,
            "priority": output.priority,
            "definition": output.definition,
            "digest": output.digest,
            "parameters": output.parameters.as_ref().map(document_to_json),
            "storageCapacity": output.storage_capacity,
            "outputUri": output.output_uri,
            "logLevel": output.log_level.map(|level| level.as_str().to_string()),
            "startedBy": output.started_by,
            "creationTime": format_time(output.creation_time.as_ref()),
            "startTime": format_time(output.start_time.as_ref()),
            "stopTime": format_time(output.stop_time.as_ref()),
            "statusMessage": output.status_message,
            "tags": output.tags,
        }))
    }

    async fn workflow_detail(
        &self,
        id: &str,
        workflow_type: &str,
    ) -> Result<Value, ResolverError> {
        let output = self
            .client
            .get_workflow()
            .id(id)
            .r#type(WorkflowType::from(workflow_type))
            .send()
            .await
            .map_err(|err| ResolverError::Upstream(DisplayErrorContext(&err).to_string()))?;
        Ok(json!({
            "arn": output.arn,
            "id": output.id,
            "status": output.status.map(|status| status.as_str().to_string()),
            "type": output.r#type.map(|kind| kind.as_str().to_string()),
            "name": output.name,
            "description": output.description,
            "engine": output.engine.map(|engine| engine.as_str().to_string()),
            "definition": output.definition,
            "main": output.main,
            "digest": output.digest,
            "parameterTemplate": output.parameter_template.as_ref().map(parameter_template_to_json),
            "storageCapacity": output.storage_capacity,
            "creationTime": format_time(output.creation_time.as_ref()),
            "statusMessage": output.status_message,
            "tags": output.tags,
        }))
    }

    async fn start_run(
        &self,
        input: &StartRunInput,
        credentials: Option<&ScopedCredentials>,
    ) -> Result<Value, ResolverError> {
        let client = self.client_for(credentials);
        let output = client
            .start_run()
            .set_workflow_id(input.workflow_id.clone())
            .set_workflow_type(input.workflow_type.as_deref().map(WorkflowType::from))
            .set_role_arn(input.role_arn.clone())
            .set_name(input.name.clone())
            .set_run_group_id(input.run_group_id.clone())
            .set_priority(input.priority)
            .set_parameters(input.parameters.as_ref().map(json_to_document))
            .set_storage_capacity(input.storage_capacity)
            .set_output_uri(input.output_uri.clone())
            .set_log_level(input.log_level.as_deref().map(RunLogLevel::from))
            .set_run_id(input.run_id.clone())
            .set_tags(input.tags.clone().map(|tags| tags.into_iter().collect()))
            .request_id(
                input.request_id.clone().unwrap_or_else(|| unix_time_millis().to_string()),
            )
            .send()
            .await
            .map_err(|err| ResolverError::Upstream(DisplayErrorContext(&err).to_string()))?;
        Ok(json!({
            "arn": output.arn,
            "id": output.id,
            "status": output.status.map(|status| status.as_str().to_string()),
            "tags": output.tags,
        }))
    }

    async fn create_workflow(
        &self,
        input: &CreateWorkflowInput,
        credentials: Option<&ScopedCredentials>,
    ) -> Result<Value, ResolverError> {
        let client = self.client_for(credentials);
        let output = client
            .create_workflow()
            .set_name(input.name.clone())
            .set_description(input.description.clone())
            .set_engine(
                input.engine.as_deref().map(aws_sdk_omics::types::WorkflowEngine::from),
            )
            .set_definition_uri(input.definition_uri.clone())
            .set_main(input.main.clone())
            .set_parameter_template(
                input.parameter_template.as_ref().and_then(parameter_template_from_json),
            )
            .set_storage_capacity(input.storage_capacity)
            .set_tags(input.tags.clone().map(|tags| tags.into_iter().collect()))
            .request_id(
                input.request_id.clone().unwrap_or_else(|| unix_time_millis().to_string()),
            )
            .send()
            .await
            .map_err(|err| ResolverError::Upstream(DisplayErrorContext(&err).to_string()))?;
        Ok(json!({
            "arn": output.arn,
            "id": output.id,
            "status": output.status.map(|status| status.as_str().to_string()),
            "tags": output.tags,
        }))
    }
}

// ============================================================================
// SECTION: Parameter Template Mapping
// ============================================================================

/// Builds the SDK parameter template from a JSON template object.
///
/// Non-object templates and non-object entries are ignored rather than
/// rejected; the upstream service validates the final template.
fn parameter_template_from_json(value: &Value) -> Option<HashMap<String, WorkflowParameter>> {
    let map = value.as_object()?;
    let template = map
        .iter()
        .map(|(name, entry)| {
            let parameter = WorkflowParameter::builder()
                .set_description(
                    entry.get("description").and_then(Value::as_str).map(ToString::to_string),
                )
                .set_optional(entry.get("optional").and_then(Value::as_bool))
                .build();
            (name.clone(), parameter)
        })
        .collect();
    Some(template)
}

/// Maps the SDK parameter template back to a JSON template object.
fn parameter_template_to_json(template: &HashMap<String, WorkflowParameter>) -> Value {
    Value::Object(
        template
            .iter()
            .map(|(name, parameter)| {
                (
                    name.clone(),
                    json!({
                        "description": parameter.description(),
                        "optional": parameter.optional(),
                    }),
                )
            })
            .collect(),
    )
}
