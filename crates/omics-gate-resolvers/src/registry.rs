// crates/omics-gate-resolvers/src/registry.rs
// ============================================================================
// Module: Registry Resolver
// Description: Resolver for container repository listing and creation.
// Purpose: Serve tenant-scoped repository views and tenant-tagged creation.
// Dependencies: omics-gate-core, omics-gate-config, serde_json
// ============================================================================

//! ## Overview
//! The registry resolver serves two fields: the repository listing, scoped
//! to the tenant's tagged repositories, and repository creation, which tags
//! the new repository with the tenant so it joins the tenant's view
//! immediately. The listing response wraps the items in a `repositories`
//! object to match the field's schema shape.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;

use omics_gate_config::GateConfig;
use omics_gate_core::CreateRepositoryInput;
use omics_gate_core::RegistryService;
use omics_gate_core::ResolverError;
use omics_gate_core::ResolverEvent;
use omics_gate_core::TenantId;
use omics_gate_core::unknown_field;

use crate::context::event_tenant;
use crate::context::input_argument;
use crate::context::respond;

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Resolver for the container registry fields.
#[derive(Debug, Clone)]
pub struct RegistryResolver<R> {
    /// Deployment configuration.
    config: GateConfig,
    /// Registry service the operations run against.
    registry: R,
}

impl<R> RegistryResolver<R>
where
    R: RegistryService,
{
    /// Creates the resolver over the given registry service.
    pub const fn new(config: GateConfig, registry: R) -> Self {
        Self { config, registry }
    }

    /// Handles one resolver event, producing the response value.
    pub async fn handle(&self, event: &ResolverEvent) -> Value {
        let tenant = event_tenant(&self.config, event);
        let result = match event.field.as_str() {
            "describeRepositoriesCommand" => self.describe_repositories(tenant.as_ref()).await,
            "createRepositoryCommand" => self.create_repository(event, tenant.as_ref()).await,
            field => return Value::String(unknown_field(field)),
        };
        respond(&event.field, result)
    }

    /// Lists repositories, scoped to the tenant when set.
    async fn describe_repositories(
        &self,
        tenant: Option<&TenantId>,
    ) -> Result<Value, ResolverError> {
        let repositories = self.registry.list_repositories(tenant).await?;
        Ok(json!({ "repositories": repositories }))
    }

    /// Creates a repository, tagged with the tenant when set.
    async fn create_repository(
        &self,
        event: &ResolverEvent,
        tenant: Option<&TenantId>,
    ) -> Result<Value, ResolverError> {
        let input: CreateRepositoryInput =
            input_argument::<CreateRepositoryInput>(event)?.normalized();
        self.registry.create_repository(&input, tenant).await
    }
}
