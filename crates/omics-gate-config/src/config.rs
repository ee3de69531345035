// crates/omics-gate-config/src/config.rs
// ============================================================================
// Module: Gate Configuration
// Description: Environment variable parsing and fail-closed validation.
// Purpose: Carry deployment settings into the resolver functions.
// Dependencies: omics-gate-core, serde, thiserror
// ============================================================================

//! ## Overview
//! Deployment settings arrive as plain environment variables set on each
//! resolver function. [`GateConfig::from_env`] reads the process environment;
//! [`GateConfig::from_lookup`] accepts any lookup closure so tests can supply
//! environments without process-global mutation. [`GateConfig::validate`]
//! rejects configurations that would silently weaken tenant isolation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use omics_gate_core::DEFAULT_TENANT_CLAIM_KEY;
use omics_gate_core::registry_host;

// ============================================================================
// SECTION: Environment Keys
// ============================================================================

/// Environment variable carrying the deployment region.
const ENV_REGION: &str = "region";
/// Environment variable carrying the run execution role ARN.
const ENV_RUN_ROLE_ARN: &str = "runCommandRoleArn";
/// Environment variable carrying the base role ARN for scoped exchange.
const ENV_TENANT_ROLE_ARN: &str = "tenantRoleArn";
/// Environment variable toggling multi-tenant mode.
const ENV_MULTI_TENANCY: &str = "multiTenancy";
/// Environment variable overriding the tenant claim key.
const ENV_TENANT_CLAIM_KEY: &str = "tenantClaimKey";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing or empty.
    #[error("missing required environment variable: {0}")]
    MissingVariable(&'static str),
    /// The configuration combination would weaken tenant isolation.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Gate Configuration
// ============================================================================

/// Runtime configuration for the resolver functions.
///
/// # Invariants
/// - `multi_tenancy` implies `tenant_role_arn` is present after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Deployment region of the upstream services.
    pub region: String,
    /// Execution role ARN injected into single-tenant run starts.
    pub run_role_arn: String,
    /// Base role ARN exchanged for scoped credentials in multi-tenant mode.
    pub tenant_role_arn: Option<String>,
    /// Whether tenant isolation is enforced.
    pub multi_tenancy: bool,
    /// Identity claim key carrying the tenant identifier.
    pub tenant_claim_key: String,
}

impl GateConfig {
    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or the
    /// combination fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration through the given variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or the
    /// combination fails validation.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingVariable(key))
        };
        let config = Self {
            region: required(ENV_REGION)?,
            run_role_arn: required(ENV_RUN_ROLE_ARN)?,
            tenant_role_arn: lookup(ENV_TENANT_ROLE_ARN).filter(|value| !value.is_empty()),
            multi_tenancy: lookup(ENV_MULTI_TENANCY).is_some_and(|value| value == "true"),
            tenant_claim_key: lookup(ENV_TENANT_CLAIM_KEY)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_TENANT_CLAIM_KEY.to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration combination, fail-closed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when multi-tenant mode is enabled
    /// without a base role ARN for scoped credential exchange.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.multi_tenancy && self.tenant_role_arn.is_none() {
            return Err(ConfigError::Invalid(
                "multi-tenant mode requires a tenant role ARN for scoped credentials".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the container registry host for the configured region.
    #[must_use]
    pub fn registry_host(&self) -> String {
        registry_host(&self.region)
    }
}
