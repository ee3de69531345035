// crates/omics-gate-core/src/core/mod.rs
// ============================================================================
// Module: Omics Gate Core Types
// Description: Canonical tenancy, authorization, and resolver envelope types.
// Purpose: Provide stable, serializable types for resolver request handling.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Core types define tenant identity, resource tag sets, permission verdicts,
//! session policies, operation inputs, and the resolver event/response
//! envelope. These types are the canonical source of truth for the resolver
//! handlers and the AWS adapters derived from them.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod event;
pub mod identity;
pub mod inputs;
pub mod permit;
pub mod policy;
pub mod resources;
pub mod tags;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use event::ResolverEvent;
pub use event::denial_envelope;
pub use event::unknown_field;
pub use identity::DEFAULT_TENANT_CLAIM_KEY;
pub use identity::IdentityContext;
pub use identity::TenantId;
pub use inputs::CreateRepositoryInput;
pub use inputs::CreateWorkflowInput;
pub use inputs::StartRunInput;
pub use permit::PermissionVerdict;
pub use permit::check_repository_permission;
pub use permit::registry_host;
pub use policy::SCOPED_SESSION_NAME_PREFIX;
pub use policy::SessionPolicyDocument;
pub use policy::session_policy;
pub use policy::unix_time_millis;
pub use resources::RepositorySummary;
pub use resources::RunSummary;
pub use resources::RunWithTasks;
pub use resources::ScopedCredentials;
pub use resources::TaskSummary;
pub use resources::TenantRole;
pub use resources::WorkflowSummary;
pub use tags::TENANT_TAG_KEY;
pub use tags::TagSet;
