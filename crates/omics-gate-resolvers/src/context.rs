// crates/omics-gate-resolvers/src/context.rs
// ============================================================================
// Module: Resolver Context
// Description: Shared tenancy resolution, argument access, and responses.
// Purpose: Keep per-event plumbing identical across the resolver surfaces.
// Dependencies: omics-gate-core, omics-gate-config, serde, serde_json
// ============================================================================

//! ## Overview
//! Every resolver resolves the tenant the same way: the identity claim is
//! consulted only when multi-tenant mode is enabled, and a missing or empty
//! claim selects single-tenant behavior. Responses are likewise uniform;
//! a handler error becomes the fixed denial envelope regardless of which
//! surface produced it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use omics_gate_config::GateConfig;
use omics_gate_core::ResolverError;
use omics_gate_core::ResolverEvent;
use omics_gate_core::TenantId;
use omics_gate_core::denial_envelope;

// ============================================================================
// SECTION: Tenancy
// ============================================================================

/// Resolves the event's tenant under the deployment's tenancy mode.
///
/// Single-tenant deployments never consult the claim; multi-tenant
/// deployments treat a missing or empty claim as single-tenant behavior for
/// that caller.
#[must_use]
pub fn event_tenant(config: &GateConfig, event: &ResolverEvent) -> Option<TenantId> {
    if config.multi_tenancy {
        event.tenant_id(&config.tenant_claim_key)
    } else {
        None
    }
}

// ============================================================================
// SECTION: Arguments
// ============================================================================

/// Returns a required string argument by name.
///
/// # Errors
///
/// Returns [`ResolverError::InvalidRequest`] when the argument is missing or
/// not a string.
pub fn require_string_argument<'e>(
    event: &'e ResolverEvent,
    name: &str,
) -> Result<&'e str, ResolverError> {
    event
        .string_argument(name)
        .ok_or_else(|| ResolverError::InvalidRequest(format!("missing required argument: {name}")))
}

/// Deserializes the event's `input` argument into an operation input.
///
/// # Errors
///
/// Returns [`ResolverError::InvalidRequest`] when the argument is missing or
/// malformed.
pub fn input_argument<T>(event: &ResolverEvent) -> Result<T, ResolverError>
where
    T: DeserializeOwned,
{
    let input = event
        .argument("input")
        .ok_or_else(|| ResolverError::InvalidRequest("missing required argument: input".to_string()))?;
    serde_json::from_value(input.clone())
        .map_err(|err| ResolverError::InvalidRequest(format!("malformed input: {err}")))
}

// ============================================================================
// SECTION: Responses
// ============================================================================

/// Converts a handler result into the resolver response value.
///
/// Failures are logged and wrapped in the fixed denial envelope; the raw
/// error chain never reaches the caller beyond its display message.
#[must_use]
pub fn respond(field: &str, result: Result<Value, ResolverError>) -> Value {
    match result {
        Ok(value) => value,
        Err(err) => {
            warn!(field, error = %err, "resolver operation failed");
            denial_envelope(&err.to_string())
        }
    }
}

/// Serializes a handler payload, mapping serialization failures upstream.
///
/// # Errors
///
/// Returns [`ResolverError::Upstream`] when serialization fails.
pub fn to_response<T>(payload: &T) -> Result<Value, ResolverError>
where
    T: serde::Serialize,
{
    serde_json::to_value(payload).map_err(|err| ResolverError::Upstream(err.to_string()))
}
