// crates/omics-gate-core/src/core/permit.rs
// ============================================================================
// Module: Repository-Role Permission Check
// Description: Cross-check of repository and execution-role tenant tags.
// Purpose: Deny run starts whose container images belong to another tenant.
// Dependencies: crate::core::{identity, tags}
// ============================================================================

//! ## Overview
//! Before a workflow run starts in multi-tenant mode, the container image
//! repository and the execution role must belong to the same tenant, and
//! every container image URI referenced by the run parameters must carry the
//! tenant identifier in its path. The verdict is computed fresh per request
//! and never cached.
//!
//! ## Invariants
//! - The check runs only before starting a run, never before creating a
//!   workflow definition.
//! - This is defense in depth on top of IAM session-policy scoping, not a
//!   replacement for it; both must independently deny a mismatched image.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::identity::TenantId;
use crate::core::tags::TagSet;

// ============================================================================
// SECTION: Verdict
// ============================================================================

/// Outcome of the repository/role permission check.
///
/// # Invariants
/// - Computed fresh per run-start request; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PermissionVerdict {
    /// Repository and role tenant tags match and all image URIs are scoped.
    Passed,
    /// Access denied with a reason suitable for the failure envelope.
    AccessDenied(String),
}

impl PermissionVerdict {
    /// Returns true when the verdict permits the run to start.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

// ============================================================================
// SECTION: Registry Host
// ============================================================================

/// Returns the container-registry host pattern for the given region.
#[must_use]
pub fn registry_host(region: &str) -> String {
    format!("dkr.ecr.{region}.amazonaws.com")
}

// ============================================================================
// SECTION: Permission Check
// ============================================================================

/// Cross-validates repository and execution-role tenancy before a run start.
///
/// Denies when the repository's tenant tag differs from the execution role's
/// tenant tag, or when any parameter value that references the regional
/// container registry lacks the tenant identifier in its path. Parameter
/// values that do not reference the registry host are ignored.
#[must_use]
pub fn check_repository_permission(
    tenant: &TenantId,
    repository_tags: &TagSet,
    role_tenant_tag: &str,
    parameter_values: &[String],
    registry_host: &str,
) -> PermissionVerdict {
    if repository_tags.tenant_value() != Some(role_tenant_tag) {
        return PermissionVerdict::AccessDenied(
            "no matching tenantId tags between container repository and execution role"
                .to_string(),
        );
    }
    let image_uris = parameter_values.iter().filter(|value| value.contains(registry_host));
    for uri in image_uris {
        if !uri.contains(tenant.as_str()) {
            return PermissionVerdict::AccessDenied(
                "no permission to access the repository image".to_string(),
            );
        }
    }
    PermissionVerdict::Passed
}
