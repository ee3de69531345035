// crates/omics-gate-resolvers/src/lib.rs
// ============================================================================
// Module: Omics Gate Resolvers Library
// Description: GraphQL-shaped resolver handlers over the service interfaces.
// Purpose: Route operation fields to tenant-scoped service calls.
// Dependencies: omics-gate-core, omics-gate-config, serde_json
// ============================================================================

//! ## Overview
//! Each resolver handles one GraphQL-shaped event surface: workflow queries,
//! workflow mutations, and registry operations. Dispatch is by exact field
//! match; an unmatched field yields a descriptive string, and any handler
//! failure yields a fixed 403 denial envelope carrying the failure message.
//! Tenancy is resolved once per event and threaded through every service
//! call.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod context;
pub mod registry;
pub mod workflow_mutation;
pub mod workflow_query;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use context::event_tenant;
pub use context::respond;
pub use registry::RegistryResolver;
pub use workflow_mutation::WorkflowMutationResolver;
pub use workflow_query::WorkflowQueryResolver;
