// crates/omics-gate-core/src/core/policy.rs
// ============================================================================
// Module: Session Policy
// Description: Inline session-policy documents for scoped credential exchange.
// Purpose: Build immutable, per-invocation least-privilege policy documents.
// Dependencies: crate::core::{identity, tags}, serde
// ============================================================================

//! ## Overview
//! In multi-tenant mode the resolvers exchange the base role for temporary
//! credentials restricted by an inline session policy: read actions stay
//! broad, while create and tag actions require the request to carry a
//! tenant-matching tag. The document is built as an immutable statement
//! sequence per invocation; there is no module-level accumulator, so a
//! long-lived process cannot contaminate one request's policy with another's.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::identity::TenantId;
use crate::core::tags::TENANT_TAG_KEY;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Policy language version for session policy documents.
const POLICY_VERSION: &str = "2012-10-17";
/// Session name prefix for scoped credential exchanges.
pub const SCOPED_SESSION_NAME_PREFIX: &str = "omics-gate";
/// Read-type actions allowed on broad resource scope.
const READ_ACTIONS: &[&str] = &[
    "omics:Get*",
    "omics:List*",
    "ecr:DescribeRepositories",
    "ecr:ListTagsForResource",
    "iam:GetRole",
    "iam:ListRoles",
    "iam:PassRole",
];
/// Create/tag actions restricted by the tenant request-tag condition.
const SCOPED_WRITE_ACTIONS: &[&str] = &[
    "omics:StartRun",
    "omics:CreateWorkflow",
    "omics:TagResource",
    "ecr:CreateRepository",
];

// ============================================================================
// SECTION: Policy Document
// ============================================================================

/// Inline session policy document attached to a credential exchange.
///
/// # Invariants
/// - Statements are built once per invocation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionPolicyDocument {
    /// Policy language version.
    #[serde(rename = "Version")]
    version: &'static str,
    /// Ordered policy statements.
    #[serde(rename = "Statement")]
    statement: Vec<SessionPolicyStatement>,
}

impl SessionPolicyDocument {
    /// Returns the policy statements.
    #[must_use]
    pub fn statements(&self) -> &[SessionPolicyStatement] {
        &self.statement
    }
}

/// Single statement within a session policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionPolicyStatement {
    /// Statement effect; always `Allow` here, denial comes from omission.
    #[serde(rename = "Effect")]
    effect: &'static str,
    /// Actions covered by the statement.
    #[serde(rename = "Action")]
    action: Vec<String>,
    /// Resource scope for the statement.
    #[serde(rename = "Resource")]
    resource: String,
    /// Optional condition block keyed by condition operator.
    #[serde(rename = "Condition", skip_serializing_if = "Option::is_none")]
    condition: Option<BTreeMap<String, BTreeMap<String, String>>>,
}

impl SessionPolicyStatement {
    /// Returns the actions covered by the statement.
    #[must_use]
    pub fn actions(&self) -> &[String] {
        &self.action
    }

    /// Returns the condition block, when present.
    #[must_use]
    pub const fn condition(&self) -> Option<&BTreeMap<String, BTreeMap<String, String>>> {
        self.condition.as_ref()
    }
}

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Builds the least-privilege session policy for the given tenant.
///
/// Read actions are allowed on broad resource scope; create and tag actions
/// are allowed only when the request carries a `tenantId` tag equal to the
/// tenant. The document is a fresh value per call.
#[must_use]
pub fn session_policy(tenant: &TenantId) -> SessionPolicyDocument {
    let tenant_condition = BTreeMap::from([(
        "StringEquals".to_string(),
        BTreeMap::from([(
            format!("aws:RequestTag/{TENANT_TAG_KEY}"),
            tenant.as_str().to_string(),
        )]),
    )]);
    SessionPolicyDocument {
        version: POLICY_VERSION,
        statement: vec![
            SessionPolicyStatement {
                effect: "Allow",
                action: READ_ACTIONS.iter().map(ToString::to_string).collect(),
                resource: "*".to_string(),
                condition: None,
            },
            SessionPolicyStatement {
                effect: "Allow",
                action: SCOPED_WRITE_ACTIONS.iter().map(ToString::to_string).collect(),
                resource: "*".to_string(),
                condition: Some(tenant_condition),
            },
        ],
    }
}

/// Returns milliseconds since the unix epoch.
///
/// Used for session names and idempotency request identifiers, where the
/// requirement is uniqueness rather than security. A clock before the epoch
/// yields zero rather than failing the request.
#[must_use]
pub fn unix_time_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| elapsed.as_millis())
}
