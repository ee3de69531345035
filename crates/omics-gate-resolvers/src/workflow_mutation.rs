// crates/omics-gate-resolvers/src/workflow_mutation.rs
// ============================================================================
// Module: Workflow Mutation Resolver
// Description: Write-side resolver for run starts and workflow creation.
// Purpose: Enforce tenant permissions and credential scoping on mutations.
// Dependencies: omics-gate-core, omics-gate-config, serde_json
// ============================================================================

//! ## Overview
//! The mutation resolver handles run starts and workflow creation. In
//! multi-tenant mode a run start resolves the tenant's execution role,
//! cross-checks the role's tenant tag against the container repository and
//! the referenced image URIs, then executes under scoped temporary
//! credentials. The permission check gates run starts only; workflow
//! creation is tagged and scoped but not repository-checked, because a
//! definition references no images until it runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use tracing::info;

use omics_gate_config::GateConfig;
use omics_gate_core::CreateWorkflowInput;
use omics_gate_core::CredentialBroker;
use omics_gate_core::PermissionVerdict;
use omics_gate_core::RegistryService;
use omics_gate_core::ResolverError;
use omics_gate_core::ResolverEvent;
use omics_gate_core::RoleDirectory;
use omics_gate_core::ScopedCredentials;
use omics_gate_core::StartRunInput;
use omics_gate_core::TENANT_TAG_KEY;
use omics_gate_core::TenantId;
use omics_gate_core::WorkflowService;
use omics_gate_core::check_repository_permission;
use omics_gate_core::unix_time_millis;
use omics_gate_core::unknown_field;

use crate::context::event_tenant;
use crate::context::input_argument;
use crate::context::respond;

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Resolver for the write-side workflow fields.
#[derive(Debug, Clone)]
pub struct WorkflowMutationResolver<W, R, D, B> {
    /// Deployment configuration.
    config: GateConfig,
    /// Workflow service executing the mutations.
    workflows: W,
    /// Registry service backing the repository permission check.
    registry: R,
    /// Role directory resolving tenant execution roles.
    roles: D,
    /// Credential broker for scoped credential exchange.
    broker: B,
}

impl<W, R, D, B> WorkflowMutationResolver<W, R, D, B>
where
    W: WorkflowService,
    R: RegistryService,
    D: RoleDirectory,
    B: CredentialBroker,
{
    /// Creates the resolver over the given services.
    pub const fn new(config: GateConfig, workflows: W, registry: R, roles: D, broker: B) -> Self {
        Self {
            config,
            workflows,
            registry,
            roles,
            broker,
        }
    }

    /// Handles one resolver event, producing the response value.
    pub async fn handle(&self, event: &ResolverEvent) -> Value {
        let tenant = event_tenant(&self.config, event);
        let result = match event.field.as_str() {
            "startRunCommand" => self.start_run(event, tenant.as_ref()).await,
            "createWorkflowCommand" => self.create_workflow(event, tenant.as_ref()).await,
            field => return Value::String(unknown_field(field)),
        };
        respond(&event.field, result)
    }

    /// Exchanges the base role for credentials scoped to the tenant.
    ///
    /// # Errors
    ///
    /// Fails closed: a missing base role ARN or a failed exchange fails the
    /// request rather than proceeding under the invocation's credentials.
    async fn scoped_credentials(
        &self,
        tenant: &TenantId,
    ) -> Result<ScopedCredentials, ResolverError> {
        let base_role_arn = self.config.tenant_role_arn.as_deref().ok_or_else(|| {
            ResolverError::Config("tenant role ARN is not configured".to_string())
        })?;
        self.broker.assume_scoped(tenant, base_role_arn).await
    }

    /// Starts a workflow run, enforcing the repository permission check in
    /// multi-tenant mode.
    async fn start_run(
        &self,
        event: &ResolverEvent,
        tenant: Option<&TenantId>,
    ) -> Result<Value, ResolverError> {
        let mut input: StartRunInput = input_argument::<StartRunInput>(event)?.normalized();
        let Some(tenant) = tenant else {
            input.role_arn = Some(self.config.run_role_arn.clone());
            return self.workflows.start_run(&input, None).await;
        };

        let role = self.roles.tenant_role(tenant).await?;
        input.role_arn = Some(role.arn.clone());
        input.insert_tag(TENANT_TAG_KEY, tenant.as_str());

        let repository_tags = self.registry.repository_tags_by_name(&role.tenant_tag).await?;
        let verdict = check_repository_permission(
            tenant,
            &repository_tags,
            &role.tenant_tag,
            &input.parameter_values(),
            &self.config.registry_host(),
        );
        if let PermissionVerdict::AccessDenied(reason) = verdict {
            return Err(ResolverError::AccessDenied(reason));
        }

        let credentials = self.scoped_credentials(tenant).await?;
        info!(%tenant, role_arn = %role.arn, "starting run under scoped credentials");
        self.workflows.start_run(&input, Some(&credentials)).await
    }

    /// Creates a workflow definition, tagging and scoping it in multi-tenant
    /// mode.
    async fn create_workflow(
        &self,
        event: &ResolverEvent,
        tenant: Option<&TenantId>,
    ) -> Result<Value, ResolverError> {
        let mut input: CreateWorkflowInput =
            input_argument::<CreateWorkflowInput>(event)?.normalized();
        if input.request_id.is_none() {
            input.request_id = Some(unix_time_millis().to_string());
        }
        let Some(tenant) = tenant else {
            return self.workflows.create_workflow(&input, None).await;
        };

        input.insert_tag(TENANT_TAG_KEY, tenant.as_str());
        let credentials = self.scoped_credentials(tenant).await?;
        self.workflows.create_workflow(&input, Some(&credentials)).await
    }
}
