// crates/omics-gate-config/tests/config_validation.rs
// ============================================================================
// Module: Config Validation Tests
// Description: Verify environment parsing and fail-closed validation.
// Purpose: Ensure misconfigured tenancy is rejected at startup.
// Dependencies: omics-gate-config
// ============================================================================

//! Gate configuration tests.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::unwrap_in_result,
    reason = "Test setup uses unwraps for clarity."
)]

use std::collections::BTreeMap;

use omics_gate_config::ConfigError;
use omics_gate_config::GateConfig;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: BTreeMap<String, String> =
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn loads_single_tenant_configuration() {
    let config = GateConfig::from_lookup(lookup_from(&[
        ("region", "us-east-1"),
        ("runCommandRoleArn", "arn:aws:iam::123:role/run"),
    ]))
    .unwrap();
    assert_eq!(config.region, "us-east-1");
    assert!(!config.multi_tenancy);
    assert_eq!(config.tenant_role_arn, None);
    assert_eq!(config.tenant_claim_key, "custom:tenantId");
}

#[test]
fn loads_multi_tenant_configuration() {
    let config = GateConfig::from_lookup(lookup_from(&[
        ("region", "eu-west-2"),
        ("runCommandRoleArn", "arn:aws:iam::123:role/run"),
        ("tenantRoleArn", "arn:aws:iam::123:role/tenant-base"),
        ("multiTenancy", "true"),
    ]))
    .unwrap();
    assert!(config.multi_tenancy);
    assert_eq!(config.tenant_role_arn.as_deref(), Some("arn:aws:iam::123:role/tenant-base"));
    assert_eq!(config.registry_host(), "dkr.ecr.eu-west-2.amazonaws.com");
}

#[test]
fn multi_tenancy_flag_requires_exact_true() {
    let config = GateConfig::from_lookup(lookup_from(&[
        ("region", "us-east-1"),
        ("runCommandRoleArn", "arn:aws:iam::123:role/run"),
        ("multiTenancy", "TRUE"),
    ]))
    .unwrap();
    assert!(!config.multi_tenancy);
}

#[test]
fn missing_region_is_rejected() {
    let result = GateConfig::from_lookup(lookup_from(&[(
        "runCommandRoleArn",
        "arn:aws:iam::123:role/run",
    )]));
    assert!(matches!(result, Err(ConfigError::MissingVariable("region"))));
}

#[test]
fn empty_run_role_arn_is_rejected() {
    let result = GateConfig::from_lookup(lookup_from(&[
        ("region", "us-east-1"),
        ("runCommandRoleArn", ""),
    ]));
    assert!(matches!(result, Err(ConfigError::MissingVariable("runCommandRoleArn"))));
}

#[test]
fn multi_tenancy_without_tenant_role_fails_closed() {
    let result = GateConfig::from_lookup(lookup_from(&[
        ("region", "us-east-1"),
        ("runCommandRoleArn", "arn:aws:iam::123:role/run"),
        ("multiTenancy", "true"),
    ]));
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn claim_key_can_be_overridden() {
    let config = GateConfig::from_lookup(lookup_from(&[
        ("region", "us-east-1"),
        ("runCommandRoleArn", "arn:aws:iam::123:role/run"),
        ("tenantClaimKey", "custom:orgId"),
    ]))
    .unwrap();
    assert_eq!(config.tenant_claim_key, "custom:orgId");
}
