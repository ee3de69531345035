// crates/omics-gate-core/src/core/identity.rs
// ============================================================================
// Module: Tenant Identity
// Description: Tenant identifiers and per-request identity context.
// Purpose: Derive an optional tenant from authenticated request claims.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The tenant resolver derives an optional [`TenantId`] from the identity
//! claims attached to a resolver event. A missing, absent, or empty tenant
//! claim is not an error: it signals single-tenant mode and disables all
//! downstream tag filtering and credential scoping.
//!
//! ## Invariants
//! - [`TenantId`] is never empty; construction rejects empty strings.
//! - [`IdentityContext`] is immutable for the lifetime of one invocation.
//! - Tenant comparison is exact string equality, never substring matching.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default claim key carrying the tenant identifier.
pub const DEFAULT_TENANT_CLAIM_KEY: &str = "custom:tenantId";

// ============================================================================
// SECTION: Tenant Identifier
// ============================================================================

/// Tenant identifier derived from an identity claim.
///
/// # Invariants
/// - Always non-empty; empty claim values mean "no tenancy" and never
///   construct a `TenantId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// Creates a tenant identifier from a raw claim value.
    ///
    /// Returns `None` when the value is empty, signalling single-tenant mode.
    #[must_use]
    pub fn from_claim(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw.to_string()))
        }
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Identity Context
// ============================================================================

/// Per-request identity context carried by a resolver event.
///
/// # Invariants
/// - Claims are read-only; the context never mutates after deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityContext {
    /// Claim name to claim value mapping from the authenticated caller.
    #[serde(default)]
    pub claims: BTreeMap<String, Value>,
}

impl IdentityContext {
    /// Resolves the tenant identifier from the given claim key.
    ///
    /// Returns `None` when the claim is absent, non-string, or empty. Absence
    /// must not fail the request: it selects single-tenant mode.
    #[must_use]
    pub fn tenant_id(&self, claim_key: &str) -> Option<TenantId> {
        self.claims
            .get(claim_key)
            .and_then(Value::as_str)
            .and_then(TenantId::from_claim)
    }
}
