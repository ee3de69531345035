// crates/omics-gate-core/src/runtime/listing.rs
// ============================================================================
// Module: Tag-Scoped Lister
// Description: Pagination accumulation and tenant tag filtering.
// Purpose: Restrict full resource listings to one tenant's resources.
// Dependencies: crate::{core, interfaces}, async-trait, futures
// ============================================================================

//! ## Overview
//! The lister accumulates every page of a paginated list operation, then,
//! when a tenant is present, fetches each item's tag set concurrently and
//! keeps only items whose tenant tag equals the tenant exactly. Without a
//! tenant the accumulated sequence is returned unfiltered.
//!
//! ## Invariants
//! - Accumulated content is independent of page boundaries.
//! - Each item is independently kept or dropped; completion order of the
//!   concurrent tag lookups never affects the outcome.
//! - A failed per-item tag lookup drops that item with a warning and never
//!   aborts the rest of the listing: an unverifiable item must not leak
//!   into a tenant's view, and one flaky lookup must not take down the
//!   whole listing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use futures::future::join_all;
use thiserror::Error;
use tracing::warn;

use crate::core::identity::TenantId;
use crate::core::tags::TagSet;
use crate::interfaces::ResolverError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors emitted by listing sources.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ListingError {
    /// A page fetch against the list operation failed.
    #[error("list operation failed: {0}")]
    Page(String),
    /// A per-item tag lookup failed.
    #[error("tag lookup failed: {0}")]
    TagLookup(String),
}

impl From<ListingError> for ResolverError {
    fn from(err: ListingError) -> Self {
        Self::Upstream(err.to_string())
    }
}

// ============================================================================
// SECTION: Source Traits
// ============================================================================

/// One page of a paginated list operation.
///
/// # Invariants
/// - Fetching with the returned token yields the next page; a `None` token
///   means the listing is exhausted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcePage<T> {
    /// Items on this page, in source API order.
    pub items: Vec<T>,
    /// Continuation token for the next page, when more pages exist.
    pub next_token: Option<String>,
}

/// Paginated list operation over one resource kind.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Item type produced by the listing.
    type Item: Send + Sync;

    /// Fetches one page, continuing from the given token.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError`] when the underlying list call fails.
    async fn fetch_page(
        &self,
        token: Option<String>,
    ) -> Result<ResourcePage<Self::Item>, ListingError>;
}

/// Per-item tag lookup for one resource kind.
#[async_trait]
pub trait TagSource: Send + Sync {
    /// Item type the tag lookup accepts.
    type Item: Send + Sync;

    /// Fetches the tag set attached to the item.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError`] when the tag lookup fails; the lister drops
    /// the item in that case.
    async fn tags_for(&self, item: &Self::Item) -> Result<TagSet, ListingError>;
}

// ============================================================================
// SECTION: Lister
// ============================================================================

/// Accumulates every page of the source into one in-memory sequence.
///
/// An empty first page without a continuation token yields an empty
/// sequence, not an error.
///
/// # Errors
///
/// Returns [`ListingError`] when any page fetch fails.
pub async fn collect_all<P>(source: &P) -> Result<Vec<P::Item>, ListingError>
where
    P: PageSource + ?Sized,
{
    let mut items = Vec::new();
    let mut token = None;
    loop {
        let page = source.fetch_page(token).await?;
        items.extend(page.items);
        match page.next_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }
    Ok(items)
}

/// Lists all items, filtered to the tenant's resources when a tenant is set.
///
/// Tag lookups are issued concurrently, one per item, and joined before
/// returning; each item independently survives exactly when its tag set's
/// tenant value equals the tenant. Items whose lookup fails are dropped with
/// a warning.
///
/// # Errors
///
/// Returns [`ListingError`] when the pagination itself fails; individual tag
/// lookup failures never fail the listing.
pub async fn list_scoped<T, P, G>(
    source: &P,
    tags: &G,
    tenant: Option<&TenantId>,
) -> Result<Vec<T>, ListingError>
where
    T: Send + Sync,
    P: PageSource<Item = T> + ?Sized,
    G: TagSource<Item = T> + ?Sized,
{
    let items = collect_all(source).await?;
    let Some(tenant) = tenant else {
        return Ok(items);
    };
    let lookups = join_all(items.iter().map(|item| tags.tags_for(item))).await;
    let mut kept = Vec::with_capacity(items.len());
    for (item, lookup) in items.into_iter().zip(lookups) {
        match lookup {
            Ok(tag_set) if tag_set.tenant_matches(tenant) => kept.push(item),
            Ok(_) => {}
            Err(err) => {
                warn!(error = %err, "dropping item after failed tag lookup");
            }
        }
    }
    Ok(kept)
}
