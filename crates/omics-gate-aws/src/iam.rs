// crates/omics-gate-aws/src/iam.rs
// ============================================================================
// Module: Role Directory
// Description: SDK-backed tenant role resolution.
// Purpose: Resolve per-tenant execution roles and their tenant tags.
// Dependencies: omics-gate-core, aws-sdk-iam, aws-config
// ============================================================================

//! ## Overview
//! Tenant execution roles are provisioned under a per-tenant path. The
//! directory resolves the first role under `/{tenant}` and reads its
//! `tenantId` tag; the tag feeds the run permission check, so a role without
//! one fails the request closed instead of passing an empty tag through.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_iam::Client;
use aws_sdk_iam::error::DisplayErrorContext;

use omics_gate_core::ResolverError;
use omics_gate_core::RoleDirectory;
use omics_gate_core::TENANT_TAG_KEY;
use omics_gate_core::TenantId;
use omics_gate_core::TenantRole;

// ============================================================================
// SECTION: Directory
// ============================================================================

/// Role directory backed by the identity-and-access service.
#[derive(Debug, Clone)]
pub struct IamRoleDirectory {
    /// Client issuing the role lookups.
    client: Client,
}

impl IamRoleDirectory {
    /// Creates the directory from the shared SDK configuration.
    #[must_use]
    pub fn new(shared: &SdkConfig) -> Self {
        Self {
            client: Client::new(shared),
        }
    }
}

#[async_trait]
impl RoleDirectory for IamRoleDirectory {
    async fn tenant_role(&self, tenant: &TenantId) -> Result<TenantRole, ResolverError> {
        let listing = self
            .client
            .list_roles()
            .path_prefix(format!("/{tenant}"))
            .send()
            .await
            .map_err(|err| ResolverError::Upstream(DisplayErrorContext(&err).to_string()))?;
        let role = listing.roles.into_iter().next().ok_or_else(|| {
            ResolverError::AccessDenied(format!("no execution role found for tenant {tenant}"))
        })?;
        // ListRoles omits tags; a follow-up GetRole carries them.
        let detail = self
            .client
            .get_role()
            .role_name(&role.role_name)
            .send()
            .await
            .map_err(|err| ResolverError::Upstream(DisplayErrorContext(&err).to_string()))?;
        let tenant_tag = detail
            .role
            .and_then(|role| {
                role.tags
                    .unwrap_or_default()
                    .into_iter()
                    .find(|tag| tag.key == TENANT_TAG_KEY)
                    .map(|tag| tag.value)
            })
            .ok_or_else(|| {
                ResolverError::AccessDenied(format!(
                    "execution role {} carries no tenantId tag",
                    role.role_name
                ))
            })?;
        Ok(TenantRole {
            arn: role.arn,
            tenant_tag,
        })
    }
}
