// crates/omics-gate-core/src/core/tags.rs
// ============================================================================
// Module: Resource Tag Sets
// Description: Tag key/value mappings attached to cloud resources.
// Purpose: Associate resources with tenants through a well-known tag key.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`TagSet`] is the tag mapping attached to a cloud resource (repository,
//! workflow, or run). Tags are the sole mechanism associating a resource with
//! a tenant, via the well-known [`TENANT_TAG_KEY`] key. Tag sets are owned by
//! the underlying cloud resources and are only read by this logic, except
//! when tagging a newly created resource at creation time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::identity::TenantId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Well-known tag key associating a resource with a tenant.
pub const TENANT_TAG_KEY: &str = "tenantId";

// ============================================================================
// SECTION: Tag Set
// ============================================================================

/// Tag key to tag value mapping attached to a cloud resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeMap<String, String>);

impl TagSet {
    /// Creates an empty tag set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts a tag, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the value for the given tag key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns the tenant tag value, when present.
    #[must_use]
    pub fn tenant_value(&self) -> Option<&str> {
        self.get(TENANT_TAG_KEY)
    }

    /// Returns true when the tenant tag value equals the tenant exactly.
    #[must_use]
    pub fn tenant_matches(&self, tenant: &TenantId) -> bool {
        self.tenant_value() == Some(tenant.as_str())
    }

    /// Returns true when the tag set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
