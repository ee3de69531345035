// crates/omics-gate-config/src/lib.rs
// ============================================================================
// Module: Omics Gate Config Library
// Description: Environment-derived runtime configuration model.
// Purpose: Single source of truth for resolver deployment settings.
// Dependencies: omics-gate-core, serde, thiserror
// ============================================================================

//! ## Overview
//! `omics-gate-config` defines the runtime configuration the resolver
//! functions receive through their deployment environment: the region, the
//! execution role for runs, the tenancy mode, and the base role used for
//! scoped credential exchange. Validation is strict and fail-closed: a
//! multi-tenant deployment without a base role ARN is rejected at startup
//! rather than degrading to unscoped credentials.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
