// crates/omics-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Omics Gate Interfaces
// Description: Backend-agnostic interfaces for workflow, registry, role, and credential services.
// Purpose: Define the contract surfaces the resolver handlers depend on.
// Dependencies: crate::core, async-trait, serde_json
// ============================================================================

//! ## Overview
//! Interfaces define how the resolvers integrate with managed cloud services
//! without embedding SDK details. Implementations must fail closed: an
//! upstream error propagates as a request-level failure and is never
//! swallowed into a success response. Detail-returning operations pass the
//! upstream result through as JSON for direct GraphQL field resolution.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::core::identity::TenantId;
use crate::core::inputs::CreateRepositoryInput;
use crate::core::inputs::CreateWorkflowInput;
use crate::core::inputs::StartRunInput;
use crate::core::resources::RepositorySummary;
use crate::core::resources::RunSummary;
use crate::core::resources::ScopedCredentials;
use crate::core::resources::TaskSummary;
use crate::core::resources::TenantRole;
use crate::core::resources::WorkflowSummary;
use crate::core::tags::TagSet;

// ============================================================================
// SECTION: Resolver Errors
// ============================================================================

/// Failures surfaced by resolver operations.
///
/// # Invariants
/// - Variants are stable for programmatic handling; the display string is
///   the user-visible failure message placed in the denial envelope.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// Upstream managed-service call failed.
    #[error("{0}")]
    Upstream(String),
    /// Permission check denied the request.
    #[error("AccessDenied: {0}")]
    AccessDenied(String),
    /// Request payload was missing or malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// Configuration required for the operation is missing.
    #[error("configuration error: {0}")]
    Config(String),
}

// ============================================================================
// SECTION: Workflow Service
// ============================================================================

/// Workflow-execution service surface consumed by the resolvers.
#[async_trait]
pub trait WorkflowService: Send + Sync {
    /// Lists workflow definitions of a type, scoped to the tenant when set.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError`] when the upstream listing fails.
    async fn list_workflows(
        &self,
        workflow_type: &str,
        tenant: Option<&TenantId>,
    ) -> Result<Vec<WorkflowSummary>, ResolverError>;

    /// Lists workflow runs, scoped to the tenant when set.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError`] when the upstream listing fails.
    async fn list_runs(&self, tenant: Option<&TenantId>)
    -> Result<Vec<RunSummary>, ResolverError>;

    /// Lists the tasks of a single run.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError`] when the upstream listing fails.
    async fn list_run_tasks(&self, run_id: &str) -> Result<Vec<TaskSummary>, ResolverError>;

    /// Describes a single run, passing the upstream shape through.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError`] when the upstream call fails.
    async fn run_detail(&self, id: &str) -> Result<Value, ResolverError>;

    /// Describes a single workflow, passing the upstream shape through.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError`] when the upstream call fails.
    async fn workflow_detail(&self, id: &str, workflow_type: &str)
    -> Result<Value, ResolverError>;

    /// Starts a workflow run, optionally under scoped credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError`] when the upstream call fails.
    async fn start_run(
        &self,
        input: &StartRunInput,
        credentials: Option<&ScopedCredentials>,
    ) -> Result<Value, ResolverError>;

    /// Creates a workflow definition, optionally under scoped credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError`] when the upstream call fails.
    async fn create_workflow(
        &self,
        input: &CreateWorkflowInput,
        credentials: Option<&ScopedCredentials>,
    ) -> Result<Value, ResolverError>;
}

// ============================================================================
// SECTION: Registry Service
// ============================================================================

/// Container-registry service surface consumed by the resolvers.
#[async_trait]
pub trait RegistryService: Send + Sync {
    /// Lists image repositories, scoped to the tenant when set.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError`] when the upstream listing fails.
    async fn list_repositories(
        &self,
        tenant: Option<&TenantId>,
    ) -> Result<Vec<RepositorySummary>, ResolverError>;

    /// Fetches the tag set of a repository resolved by name.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError`] when the repository is unknown or the tag
    /// lookup fails; the permission check must fail closed in that case.
    async fn repository_tags_by_name(&self, repository_name: &str)
    -> Result<TagSet, ResolverError>;

    /// Creates an image repository, tagging it with the tenant when set.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError`] when the upstream call fails.
    async fn create_repository(
        &self,
        input: &CreateRepositoryInput,
        tenant: Option<&TenantId>,
    ) -> Result<Value, ResolverError>;
}

// ============================================================================
// SECTION: Role Directory
// ============================================================================

/// Identity-and-access directory resolving tenant execution roles.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Resolves the tenant's execution role and its tenant tag.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError`] when no role exists under the tenant path
    /// or the role carries no tenant tag; both fail closed.
    async fn tenant_role(&self, tenant: &TenantId) -> Result<TenantRole, ResolverError>;
}

// ============================================================================
// SECTION: Credential Broker
// ============================================================================

/// Temporary-credential exchange surface used in multi-tenant mode.
#[async_trait]
pub trait CredentialBroker: Send + Sync {
    /// Exchanges the base role for tenant-scoped temporary credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError`] when the exchange fails. Callers must treat
    /// this as a request-level failure; falling back to unscoped credentials
    /// is forbidden.
    async fn assume_scoped(
        &self,
        tenant: &TenantId,
        base_role_arn: &str,
    ) -> Result<ScopedCredentials, ResolverError>;
}
