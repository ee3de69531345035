// crates/omics-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Omics Gate Runtime
// Description: Pagination accumulation and tag-scoped filtering engine.
// Purpose: Execute tenant-scoped listings against paginated cloud APIs.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules implement the tag-scoped lister: pagination accumulation
//! over continuation tokens and concurrent per-item tag filtering. All
//! listing resolvers call into the same engine logic to preserve filtering
//! invariance.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod listing;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use listing::ListingError;
pub use listing::PageSource;
pub use listing::ResourcePage;
pub use listing::TagSource;
pub use listing::collect_all;
pub use listing::list_scoped;
