// crates/omics-gate-resolvers/src/workflow_query.rs
// ============================================================================
// Module: Workflow Query Resolver
// Description: Read-side resolver over the workflow service.
// Purpose: Serve workflow, run, and task listings and details.
// Dependencies: omics-gate-core, omics-gate-config, futures, serde_json
// ============================================================================

//! ## Overview
//! The query resolver serves six fields: workflow listings, run listings,
//! task listings, run and workflow details, and the combined run-with-tasks
//! view. Listings are tenant-scoped; detail lookups resolve by identifier
//! and pass the upstream shape through unchanged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use futures::future::join_all;
use serde_json::Value;
use tracing::warn;

use omics_gate_config::GateConfig;
use omics_gate_core::ResolverError;
use omics_gate_core::ResolverEvent;
use omics_gate_core::RunWithTasks;
use omics_gate_core::TenantId;
use omics_gate_core::WorkflowService;
use omics_gate_core::unknown_field;

use crate::context::event_tenant;
use crate::context::require_string_argument;
use crate::context::respond;
use crate::context::to_response;

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Resolver for the read-side workflow fields.
#[derive(Debug, Clone)]
pub struct WorkflowQueryResolver<W> {
    /// Deployment configuration.
    config: GateConfig,
    /// Workflow service the queries run against.
    workflows: W,
}

impl<W> WorkflowQueryResolver<W>
where
    W: WorkflowService,
{
    /// Creates the resolver over the given workflow service.
    pub const fn new(config: GateConfig, workflows: W) -> Self {
        Self { config, workflows }
    }

    /// Handles one resolver event, producing the response value.
    pub async fn handle(&self, event: &ResolverEvent) -> Value {
        let tenant = event_tenant(&self.config, event);
        let result = match event.field.as_str() {
            "getListWorkflow" => self.list_workflows(event, tenant.as_ref()).await,
            "getListRunCommand" => self.list_runs(tenant.as_ref()).await,
            "getListRunTasks" => self.list_run_tasks(event).await,
            "getRunCommand" => self.run_detail(event).await,
            "getWorkflowCommand" => self.workflow_detail(event).await,
            "getListRunDetails" => self.list_run_details(tenant.as_ref()).await,
            field => return Value::String(unknown_field(field)),
        };
        respond(&event.field, result)
    }

    /// Lists workflow definitions of the requested type.
    async fn list_workflows(
        &self,
        event: &ResolverEvent,
        tenant: Option<&TenantId>,
    ) -> Result<Value, ResolverError> {
        let workflow_type = require_string_argument(event, "workflowType")?;
        let workflows = self.workflows.list_workflows(workflow_type, tenant).await?;
        to_response(&workflows)
    }

    /// Lists workflow runs.
    async fn list_runs(&self, tenant: Option<&TenantId>) -> Result<Value, ResolverError> {
        let runs = self.workflows.list_runs(tenant).await?;
        to_response(&runs)
    }

    /// Lists the tasks of the requested run.
    async fn list_run_tasks(&self, event: &ResolverEvent) -> Result<Value, ResolverError> {
        let run_id = require_string_argument(event, "id")?;
        let tasks = self.workflows.list_run_tasks(run_id).await?;
        to_response(&tasks)
    }

    /// Describes the requested run.
    async fn run_detail(&self, event: &ResolverEvent) -> Result<Value, ResolverError> {
        let id = require_string_argument(event, "id")?;
        self.workflows.run_detail(id).await
    }

    /// Describes the requested workflow.
    async fn workflow_detail(&self, event: &ResolverEvent) -> Result<Value, ResolverError> {
        let id = require_string_argument(event, "id")?;
        let workflow_type = require_string_argument(event, "workflowType")?;
        self.workflows.workflow_detail(id, workflow_type).await
    }

    /// Lists runs with their tasks attached, fanning out one task listing
    /// per run.
    ///
    /// A failed task listing keeps its run with an empty task list; one
    /// degraded run must not hide the others from the caller.
    async fn list_run_details(&self, tenant: Option<&TenantId>) -> Result<Value, ResolverError> {
        let runs = self.workflows.list_runs(tenant).await?;
        let lookups = join_all(runs.iter().map(|run| async move {
            match run.id.as_deref() {
                Some(id) => self.workflows.list_run_tasks(id).await,
                None => Ok(Vec::new()),
            }
        }))
        .await;
        let details: Vec<RunWithTasks> = runs
            .into_iter()
            .zip(lookups)
            .map(|(run, tasks)| {
                let tasks = tasks.unwrap_or_else(|err| {
                    warn!(run_id = ?run.id, error = %err, "task listing failed for run");
                    Vec::new()
                });
                RunWithTasks { run, tasks }
            })
            .collect();
        to_response(&details)
    }
}
