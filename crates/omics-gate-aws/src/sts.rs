// crates/omics-gate-aws/src/sts.rs
// ============================================================================
// Module: Credential Broker
// Description: SDK-backed scoped credential exchange.
// Purpose: Exchange the base role for tenant-scoped temporary credentials.
// Dependencies: omics-gate-core, aws-sdk-sts, aws-config, serde_json
// ============================================================================

//! ## Overview
//! In multi-tenant mode every mutation runs under temporary credentials:
//! the base role is assumed with an inline session policy restricting create
//! and tag actions to requests carrying the tenant's tag. The exchange fails
//! closed; a failed assume-role call fails the request rather than falling
//! back to the invocation's broader credentials.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sts::Client;
use aws_sdk_sts::error::DisplayErrorContext;
use tracing::debug;

use omics_gate_core::CredentialBroker;
use omics_gate_core::ResolverError;
use omics_gate_core::SCOPED_SESSION_NAME_PREFIX;
use omics_gate_core::ScopedCredentials;
use omics_gate_core::TenantId;
use omics_gate_core::session_policy;
use omics_gate_core::unix_time_millis;

// ============================================================================
// SECTION: Broker
// ============================================================================

/// Credential broker backed by the token service.
#[derive(Debug, Clone)]
pub struct StsBroker {
    /// Client issuing the assume-role calls.
    client: Client,
}

impl StsBroker {
    /// Creates the broker from the shared SDK configuration.
    #[must_use]
    pub fn new(shared: &SdkConfig) -> Self {
        Self {
            client: Client::new(shared),
        }
    }
}

#[async_trait]
impl CredentialBroker for StsBroker {
    async fn assume_scoped(
        &self,
        tenant: &TenantId,
        base_role_arn: &str,
    ) -> Result<ScopedCredentials, ResolverError> {
        let policy = serde_json::to_string(&session_policy(tenant))
            .map_err(|err| ResolverError::Config(err.to_string()))?;
        let session_name = format!("{SCOPED_SESSION_NAME_PREFIX}-{}", unix_time_millis());
        debug!(%tenant, session_name, "exchanging base role for scoped credentials");
        let output = self
            .client
            .assume_role()
            .role_arn(base_role_arn)
            .role_session_name(session_name)
            .policy(policy)
            .send()
            .await
            .map_err(|err| ResolverError::Upstream(DisplayErrorContext(&err).to_string()))?;
        let credentials = output.credentials.ok_or_else(|| {
            ResolverError::Upstream("credential exchange returned no credentials".to_string())
        })?;
        Ok(ScopedCredentials {
            access_key_id: credentials.access_key_id,
            secret_access_key: credentials.secret_access_key,
            session_token: credentials.session_token,
        })
    }
}
