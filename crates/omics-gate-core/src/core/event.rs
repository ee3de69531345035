// crates/omics-gate-core/src/core/event.rs
// ============================================================================
// Module: Resolver Event Envelope
// Description: Inbound resolver event model and outbound response envelopes.
// Purpose: Normalize the GraphQL-shaped request/response surface.
// Dependencies: crate::core::identity, serde, serde_json
// ============================================================================

//! ## Overview
//! Each resolver receives a GraphQL-shaped event carrying a `field` name,
//! named `arguments`, and an identity block with caller claims. On success
//! the raw handler result is returned as-is for field resolution; on failure
//! a fixed denial envelope carries the message with a 403 status. An
//! unmatched field is not a failure: it yields a descriptive string for
//! forward compatibility with schema changes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;

use crate::core::identity::IdentityContext;
use crate::core::identity::TenantId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Status code of the failure envelope.
const DENIAL_STATUS_CODE: u16 = 403;

// ============================================================================
// SECTION: Resolver Event
// ============================================================================

/// Inbound GraphQL-shaped resolver event.
///
/// # Invariants
/// - Exactly one handler invocation and one response per event.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ResolverEvent {
    /// Operation name routed by exact string match.
    #[serde(default)]
    pub field: String,
    /// Named operation arguments.
    #[serde(default)]
    pub arguments: Value,
    /// Identity block of the authenticated caller, when present.
    #[serde(default)]
    pub identity: Option<IdentityContext>,
}

impl ResolverEvent {
    /// Resolves the tenant identifier from the event's identity claims.
    ///
    /// A missing identity block or claim selects single-tenant mode.
    #[must_use]
    pub fn tenant_id(&self, claim_key: &str) -> Option<TenantId> {
        self.identity.as_ref().and_then(|identity| identity.tenant_id(claim_key))
    }

    /// Returns a named argument, when present.
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }

    /// Returns a named string argument, when present.
    #[must_use]
    pub fn string_argument(&self, name: &str) -> Option<&str> {
        self.argument(name).and_then(Value::as_str)
    }
}

// ============================================================================
// SECTION: Response Envelopes
// ============================================================================

/// Builds the fixed denial envelope for a failed handler.
///
/// The body is the JSON-serialized failure message; no stack traces or
/// internal identifiers leak into it.
#[must_use]
pub fn denial_envelope(message: &str) -> Value {
    json!({
        "statusCode": DENIAL_STATUS_CODE,
        "body": serde_json::to_string(message).unwrap_or_default(),
    })
}

/// Builds the graceful response for an unmatched operation name.
#[must_use]
pub fn unknown_field(field: &str) -> String {
    format!("Unknown field, unable to resolve {field}")
}
