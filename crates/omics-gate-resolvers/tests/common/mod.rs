// crates/omics-gate-resolvers/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: In-memory service fakes and configuration fixtures.
// Purpose: Exercise the resolvers without any managed-service dependency.
// Dependencies: omics-gate-core, omics-gate-config
// ============================================================================

//! ## Overview
//! Fakes record every service call so tests can assert what the resolvers
//! sent downstream: which tenant scoped a listing, whether a run start
//! carried scoped credentials, and that denied requests never reached the
//! workflow service.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use serde_json::json;

use omics_gate_config::GateConfig;
use omics_gate_core::CreateRepositoryInput;
use omics_gate_core::CreateWorkflowInput;
use omics_gate_core::CredentialBroker;
use omics_gate_core::RegistryService;
use omics_gate_core::RepositorySummary;
use omics_gate_core::ResolverError;
use omics_gate_core::ResolverEvent;
use omics_gate_core::RoleDirectory;
use omics_gate_core::RunSummary;
use omics_gate_core::ScopedCredentials;
use omics_gate_core::StartRunInput;
use omics_gate_core::TagSet;
use omics_gate_core::TaskSummary;
use omics_gate_core::TenantId;
use omics_gate_core::TenantRole;
use omics_gate_core::WorkflowService;
use omics_gate_core::WorkflowSummary;

// ============================================================================
// SECTION: Configuration Fixtures
// ============================================================================

/// Configuration for a single-tenant deployment.
pub fn single_tenant_config() -> GateConfig {
    GateConfig {
        region: "us-east-1".to_string(),
        run_role_arn: "arn:aws:iam::123:role/run".to_string(),
        tenant_role_arn: None,
        multi_tenancy: false,
        tenant_claim_key: "custom:tenantId".to_string(),
    }
}

/// Configuration for a multi-tenant deployment.
pub fn multi_tenant_config() -> GateConfig {
    GateConfig {
        tenant_role_arn: Some("arn:aws:iam::123:role/tenant-base".to_string()),
        multi_tenancy: true,
        ..single_tenant_config()
    }
}

/// Builds a resolver event for the field with the given arguments.
pub fn event(field: &str, arguments: Value) -> ResolverEvent {
    ResolverEvent {
        field: field.to_string(),
        arguments,
        identity: None,
    }
}

/// Builds a resolver event carrying a tenant claim.
pub fn tenant_event(field: &str, arguments: Value, tenant: &str) -> ResolverEvent {
    serde_json::from_value(json!({
        "field": field,
        "arguments": arguments,
        "identity": { "claims": { "custom:tenantId": tenant } }
    }))
    .unwrap_or_default()
}

// ============================================================================
// SECTION: Workflow Service Fake
// ============================================================================

/// Recorded run start: the input and whether scoped credentials were used.
pub type RecordedStart = (StartRunInput, bool);
/// Recorded workflow creation: the input and whether scoped credentials
/// were used.
pub type RecordedCreate = (CreateWorkflowInput, bool);

/// In-memory workflow service recording every call.
///
/// Recorders are shared through [`Arc`] so a cloned probe observes calls
/// made through the instance moved into a resolver.
#[derive(Clone, Default)]
pub struct FakeWorkflows {
    /// Workflow listing returned to the resolver.
    pub workflows: Vec<WorkflowSummary>,
    /// Run listing returned to the resolver.
    pub runs: Vec<RunSummary>,
    /// Tasks keyed by run identifier.
    pub tasks_by_run: BTreeMap<String, Vec<TaskSummary>>,
    /// Run identifiers whose task listing fails.
    pub failing_task_runs: Vec<String>,
    /// Tenants passed to listing calls, in call order.
    pub listed_tenants: Arc<Mutex<Vec<Option<String>>>>,
    /// Recorded run starts.
    pub started: Arc<Mutex<Vec<RecordedStart>>>,
    /// Recorded workflow creations.
    pub created: Arc<Mutex<Vec<RecordedCreate>>>,
}

impl FakeWorkflows {
    /// Records the tenant a listing was scoped to.
    fn record_tenant(&self, tenant: Option<&TenantId>) {
        if let Ok(mut listed) = self.listed_tenants.lock() {
            listed.push(tenant.map(|t| t.as_str().to_string()));
        }
    }
}

#[async_trait]
impl WorkflowService for FakeWorkflows {
    async fn list_workflows(
        &self,
        _workflow_type: &str,
        tenant: Option<&TenantId>,
    ) -> Result<Vec<WorkflowSummary>, ResolverError> {
        self.record_tenant(tenant);
        Ok(self.workflows.clone())
    }

    async fn list_runs(
        &self,
        tenant: Option<&TenantId>,
    ) -> Result<Vec<RunSummary>, ResolverError> {
        self.record_tenant(tenant);
        Ok(self.runs.clone())
    }

    async fn list_run_tasks(&self, run_id: &str) -> Result<Vec<TaskSummary>, ResolverError> {
        if self.failing_task_runs.iter().any(|id| id == run_id) {
            return Err(ResolverError::Upstream(format!("task listing failed: {run_id}")));
        }
        Ok(self.tasks_by_run.get(run_id).cloned().unwrap_or_default())
    }

    async fn run_detail(&self, id: &str) -> Result<Value, ResolverError> {
        Ok(json!({ "id": id, "status": "COMPLETED" }))
    }

    async fn workflow_detail(
        &self,
        id: &str,
        workflow_type: &str,
    ) -> Result<Value, ResolverError> {
        Ok(json!({ "id": id, "type": workflow_type }))
    }

    async fn start_run(
        &self,
        input: &StartRunInput,
        credentials: Option<&ScopedCredentials>,
    ) -> Result<Value, ResolverError> {
        if let Ok(mut started) = self.started.lock() {
            started.push((input.clone(), credentials.is_some()));
        }
        Ok(json!({ "id": "run-new", "status": "PENDING" }))
    }

    async fn create_workflow(
        &self,
        input: &CreateWorkflowInput,
        credentials: Option<&ScopedCredentials>,
    ) -> Result<Value, ResolverError> {
        if let Ok(mut created) = self.created.lock() {
            created.push((input.clone(), credentials.is_some()));
        }
        Ok(json!({ "id": "wf-new", "status": "CREATING" }))
    }
}

// ============================================================================
// SECTION: Registry Service Fake
// ============================================================================

/// In-memory registry service recording every call.
#[derive(Clone, Default)]
pub struct FakeRegistry {
    /// Repository listing returned to the resolver.
    pub repositories: Vec<RepositorySummary>,
    /// Repository tag sets keyed by repository name.
    pub tags_by_name: BTreeMap<String, TagSet>,
    /// Tenants passed to listing calls, in call order.
    pub listed_tenants: Arc<Mutex<Vec<Option<String>>>>,
    /// Recorded repository creations with the tenant applied.
    pub created: Arc<Mutex<Vec<(CreateRepositoryInput, Option<String>)>>>,
}

#[async_trait]
impl RegistryService for FakeRegistry {
    async fn list_repositories(
        &self,
        tenant: Option<&TenantId>,
    ) -> Result<Vec<RepositorySummary>, ResolverError> {
        if let Ok(mut listed) = self.listed_tenants.lock() {
            listed.push(tenant.map(|t| t.as_str().to_string()));
        }
        Ok(self.repositories.clone())
    }

    async fn repository_tags_by_name(
        &self,
        repository_name: &str,
    ) -> Result<TagSet, ResolverError> {
        self.tags_by_name.get(repository_name).cloned().ok_or_else(|| {
            ResolverError::Upstream(format!("repository not found: {repository_name}"))
        })
    }

    async fn create_repository(
        &self,
        input: &CreateRepositoryInput,
        tenant: Option<&TenantId>,
    ) -> Result<Value, ResolverError> {
        if let Ok(mut created) = self.created.lock() {
            created.push((input.clone(), tenant.map(|t| t.as_str().to_string())));
        }
        Ok(json!({ "repository": { "repositoryName": input.repository_name } }))
    }
}

// ============================================================================
// SECTION: Role Directory and Broker Fakes
// ============================================================================

/// In-memory role directory with one optional tenant role.
#[derive(Clone, Default)]
pub struct FakeRoles {
    /// Role returned for any tenant; `None` fails the lookup closed.
    pub role: Option<TenantRole>,
}

#[async_trait]
impl RoleDirectory for FakeRoles {
    async fn tenant_role(&self, tenant: &TenantId) -> Result<TenantRole, ResolverError> {
        self.role.clone().ok_or_else(|| {
            ResolverError::AccessDenied(format!("no execution role found for tenant {tenant}"))
        })
    }
}

/// In-memory credential broker recording each exchange.
#[derive(Clone, Default)]
pub struct FakeBroker {
    /// Whether the exchange fails.
    pub fail: bool,
    /// Tenants that credentials were issued for, in call order.
    pub issued: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl CredentialBroker for FakeBroker {
    async fn assume_scoped(
        &self,
        tenant: &TenantId,
        _base_role_arn: &str,
    ) -> Result<ScopedCredentials, ResolverError> {
        if self.fail {
            return Err(ResolverError::Upstream("credential exchange failed".to_string()));
        }
        if let Ok(mut issued) = self.issued.lock() {
            issued.push(tenant.as_str().to_string());
        }
        Ok(ScopedCredentials {
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_access_key: "secret".to_string(),
            session_token: "token".to_string(),
        })
    }
}
