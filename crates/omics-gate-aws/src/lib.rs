// crates/omics-gate-aws/src/lib.rs
// ============================================================================
// Module: Omics Gate AWS Library
// Description: SDK-backed service implementations for the resolver interfaces.
// Purpose: Bind the backend-agnostic interfaces to the managed cloud services.
// Dependencies: omics-gate-core, aws-config, aws-sdk-*, aws-smithy-types
// ============================================================================

//! ## Overview
//! `omics-gate-aws` implements the core service interfaces against the
//! managed workflow, registry, identity, and token services. Every
//! implementation fails closed: an upstream error propagates as a
//! request-level failure and never degrades into a broader-scoped call.
//! Pagination and tag filtering route through the core lister so all
//! listings share the same tenant-scoping behavior.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod convert;
pub mod ecr;
pub mod iam;
pub mod omics;
pub mod sts;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::shared_config;
pub use convert::document_to_json;
pub use convert::format_time;
pub use convert::json_to_document;
pub use ecr::EcrRegistry;
pub use iam::IamRoleDirectory;
pub use omics::OmicsWorkflows;
pub use sts::StsBroker;
