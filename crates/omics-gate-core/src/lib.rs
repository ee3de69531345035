// crates/omics-gate-core/src/lib.rs
// ============================================================================
// Module: Omics Gate Core Library
// Description: Public API surface for the Omics Gate core.
// Purpose: Expose tenancy, authorization, and resolver envelope primitives.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Omics Gate core provides the multi-tenant authorization and
//! resource-scoping logic shared by the GraphQL resolver handlers: tenant
//! claim resolution, tag-scoped resource listing, session-policy
//! construction, and the repository/role permission check. It is
//! SDK-agnostic and integrates with managed cloud services through explicit
//! interfaces rather than embedding client code.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use self::core::*;

pub use interfaces::CredentialBroker;
pub use interfaces::RegistryService;
pub use interfaces::ResolverError;
pub use interfaces::RoleDirectory;
pub use interfaces::WorkflowService;
pub use runtime::ListingError;
pub use runtime::PageSource;
pub use runtime::ResourcePage;
pub use runtime::TagSource;
pub use runtime::collect_all;
pub use runtime::list_scoped;
