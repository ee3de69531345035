// crates/omics-gate-aws/src/ecr.rs
// ============================================================================
// Module: Registry Service
// Description: SDK-backed container-registry service implementation.
// Purpose: List, inspect, and create image repositories.
// Dependencies: omics-gate-core, aws-sdk-ecr, aws-config, serde_json
// ============================================================================

//! ## Overview
//! [`EcrRegistry`] implements the registry service surface. Repository
//! listings route through the tag-scoped lister; repository creation tags
//! the repository with the tenant so it joins the tenant's view immediately.
//! The by-name tag lookup backs the run permission check and fails closed
//! when the repository or its tags cannot be resolved.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_ecr::Client;
use aws_sdk_ecr::error::DisplayErrorContext;
use aws_sdk_ecr::types::ImageScanningConfiguration;
use aws_sdk_ecr::types::ImageTagMutability;
use aws_sdk_ecr::types::Repository;
use aws_sdk_ecr::types::Tag;
use serde_json::Value;
use serde_json::json;

use omics_gate_core::CreateRepositoryInput;
use omics_gate_core::ListingError;
use omics_gate_core::PageSource;
use omics_gate_core::RegistryService;
use omics_gate_core::RepositorySummary;
use omics_gate_core::ResolverError;
use omics_gate_core::ResourcePage;
use omics_gate_core::TENANT_TAG_KEY;
use omics_gate_core::TagSet;
use omics_gate_core::TagSource;
use omics_gate_core::TenantId;
use omics_gate_core::list_scoped;

use crate::convert::format_time;

// ============================================================================
// SECTION: Service
// ============================================================================

/// Registry service backed by the managed container registry.
#[derive(Debug, Clone)]
pub struct EcrRegistry {
    /// Client operating under the invocation's base credentials.
    client: Client,
}

impl EcrRegistry {
    /// Creates the service from the shared SDK configuration.
    #[must_use]
    pub fn new(shared: &SdkConfig) -> Self {
        Self {
            client: Client::new(shared),
        }
    }

    /// Fetches the tag set attached to a repository ARN.
    async fn tags_for_arn(&self, arn: &str) -> Result<TagSet, ListingError> {
        let output = self
            .client
            .list_tags_for_resource()
            .resource_arn(arn)
            .send()
            .await
            .map_err(|err| ListingError::TagLookup(DisplayErrorContext(&err).to_string()))?;
        Ok(output
            .tags
            .unwrap_or_default()
            .into_iter()
            .map(|tag| (tag.key, tag.value))
            .collect())
    }
}

/// Maps a repository to its listing summary.
fn repository_summary(repository: Repository) -> RepositorySummary {
    RepositorySummary {
        repository_arn: repository.repository_arn,
        registry_id: repository.registry_id,
        repository_name: repository.repository_name,
        repository_uri: repository.repository_uri,
        created_at: format_time(repository.created_at.as_ref()),
    }
}

// ============================================================================
// SECTION: Listing Sources
// ============================================================================

/// Page source over image repositories.
struct RepositoryPages<'a> {
    /// Client issuing the list calls.
    client: &'a Client,
}

#[async_trait]
impl PageSource for RepositoryPages<'_> {
    type Item = RepositorySummary;

    async fn fetch_page(
        &self,
        token: Option<String>,
    ) -> Result<ResourcePage<RepositorySummary>, ListingError> {
        let output = self
            .client
            .describe_repositories()
            .set_next_token(token)
            .send()
            .await
            .map_err(|err| ListingError::Page(DisplayErrorContext(&err).to_string()))?;
        let items = output
            .repositories
            .unwrap_or_default()
            .into_iter()
            .map(repository_summary)
            .collect();
        Ok(ResourcePage {
            items,
            next_token: output.next_token,
        })
    }
}

/// Tag source for image repositories.
struct RepositoryTags<'a> {
    /// Registry the tag lookups run against.
    registry: &'a EcrRegistry,
}

#[async_trait]
impl TagSource for RepositoryTags<'_> {
    type Item = RepositorySummary;

    async fn tags_for(&self, item: &RepositorySummary) -> Result<TagSet, ListingError> {
        match item.repository_arn.as_deref() {
            Some(arn) => self.registry.tags_for_arn(arn).await,
            None => Ok(TagSet::new()),
        }
    }
}

// ============================================================================
// SECTION: Registry Service Implementation
// ============================================================================

#[async_trait]
impl RegistryService for EcrRegistry {
    async fn list_repositories(
        &self,
        tenant: Option<&TenantId>,
    ) -> Result<Vec<RepositorySummary>, ResolverError> {
        let pages = RepositoryPages {
            client: &self.client,
        };
        let tags = RepositoryTags {
            registry: self,
        };
        Ok(list_scoped(&pages, &tags, tenant).await?)
    }

    async fn repository_tags_by_name(
        &self,
        repository_name: &str,
    ) -> Result<TagSet, ResolverError> {
        let output = self
            .client
            .describe_repositories()
            .repository_names(repository_name)
            .send()
            .await
            .map_err(|err| ResolverError::Upstream(DisplayErrorContext(&err).to_string()))?;
        let arn = output
            .repositories
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|repository| repository.repository_arn)
            .ok_or_else(|| {
                ResolverError::Upstream(format!("repository not found: {repository_name}"))
            })?;
        Ok(self.tags_for_arn(&arn).await?)
    }

    async fn create_repository(
        &self,
        input: &CreateRepositoryInput,
        tenant: Option<&TenantId>,
    ) -> Result<Value, ResolverError> {
        let tags = tenant
            .map(|tenant| {
                Tag::builder()
                    .key(TENANT_TAG_KEY)
                    .value(tenant.as_str())
                    .build()
                    .map(|tag| vec![tag])
                    .map_err(|err| ResolverError::InvalidRequest(err.to_string()))
            })
            .transpose()?;
        let scanning = input.scan_on_push.map(|scan_on_push| {
            ImageScanningConfiguration::builder().scan_on_push(scan_on_push).build()
        });
        let output = self
            .client
            .create_repository()
            .set_repository_name(input.repository_name.clone())
            .set_image_tag_mutability(
                input.image_tag_mutability.as_deref().map(ImageTagMutability::from),
            )
            .set_image_scanning_configuration(scanning)
            .set_tags(tags)
            .send()
            .await
            .map_err(|err| ResolverError::Upstream(DisplayErrorContext(&err).to_string()))?;
        let repository = output
            .repository
            .map(repository_summary)
            .map(serde_json::to_value)
            .transpose()
            .map_err(|err| ResolverError::Upstream(err.to_string()))?;
        Ok(json!({ "repository": repository }))
    }
}
