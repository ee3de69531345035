// crates/omics-gate-lambda/src/lib.rs
// ============================================================================
// Module: Omics Gate Lambda Library
// Description: Shared bootstrap for the resolver function entrypoints.
// Purpose: Initialize telemetry and load configuration once per function.
// Dependencies: omics-gate-aws, omics-gate-config, lambda_runtime, tracing
// ============================================================================

//! ## Overview
//! Each resolver ships as its own function binary; this library carries the
//! boilerplate they share. Telemetry is structured JSON on standard output,
//! where the function runtime collects it. Bootstrap loads and validates the
//! deployment configuration before the first event is accepted, so a
//! misconfigured function fails at startup instead of per request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use aws_config::SdkConfig;
use lambda_runtime::Error;
use tracing::info;

use omics_gate_aws::shared_config;
use omics_gate_config::GateConfig;

// ============================================================================
// SECTION: Telemetry
// ============================================================================

/// Initializes structured JSON telemetry for a function binary.
pub fn init_telemetry() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .json()
        .with_current_span(false)
        .init();
}

// ============================================================================
// SECTION: Bootstrap
// ============================================================================

/// Loads the validated configuration and the shared SDK configuration.
///
/// # Errors
///
/// Returns an error when the environment is missing required variables or
/// fails tenancy validation; the function exits rather than serving events.
pub async fn bootstrap(function: &str) -> Result<(GateConfig, SdkConfig), Error> {
    let config = GateConfig::from_env()?;
    info!(
        function,
        region = %config.region,
        multi_tenancy = config.multi_tenancy,
        "resolver function starting"
    );
    let shared = shared_config(&config.region).await;
    Ok((config, shared))
}
