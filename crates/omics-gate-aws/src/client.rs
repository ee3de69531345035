// crates/omics-gate-aws/src/client.rs
// ============================================================================
// Module: Client Construction
// Description: Shared SDK configuration for all service clients.
// Purpose: Build one region-pinned configuration per invocation environment.
// Dependencies: aws-config
// ============================================================================

//! Shared client configuration.

// ============================================================================
// SECTION: Imports
// ============================================================================

use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_config::SdkConfig;

// ============================================================================
// SECTION: Configuration Loading
// ============================================================================

/// Loads the shared SDK configuration pinned to the deployment region.
///
/// All service clients derive from this configuration; scoped clients layer
/// temporary credentials on top of it without reloading the environment.
pub async fn shared_config(region: &str) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_owned()))
        .load()
        .await
}
