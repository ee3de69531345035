// crates/omics-gate-core/tests/permit.rs
// ============================================================================
// Module: Permission Check Tests
// Description: Verify repository/role tenant cross-checks and image scoping.
// Purpose: Ensure run starts are denied on any tenant mismatch.
// Dependencies: omics-gate-core
// ============================================================================

//! Repository-role permission check tests.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::unwrap_in_result,
    reason = "Test setup uses unwraps for clarity."
)]

use omics_gate_core::PermissionVerdict;
use omics_gate_core::TENANT_TAG_KEY;
use omics_gate_core::TagSet;
use omics_gate_core::TenantId;
use omics_gate_core::check_repository_permission;
use omics_gate_core::registry_host;

fn tenant(raw: &str) -> TenantId {
    TenantId::from_claim(raw).unwrap()
}

fn tags(tenant_value: &str) -> TagSet {
    let mut tags = TagSet::new();
    tags.insert(TENANT_TAG_KEY, tenant_value);
    tags
}

const HOST: &str = "dkr.ecr.us-east-1.amazonaws.com";

#[test]
fn passes_when_tags_match_and_images_are_scoped() {
    let verdict = check_repository_permission(
        &tenant("acme"),
        &tags("acme"),
        "acme",
        &[format!("123.{HOST}/acme/tool:latest")],
        HOST,
    );
    assert_eq!(verdict, PermissionVerdict::Passed);
}

#[test]
fn denies_on_repository_role_tag_mismatch() {
    let verdict = check_repository_permission(
        &tenant("acme"),
        &tags("other"),
        "acme",
        &[format!("123.{HOST}/acme/tool:latest")],
        HOST,
    );
    assert!(matches!(verdict, PermissionVerdict::AccessDenied(_)));
}

#[test]
fn denies_on_missing_repository_tenant_tag() {
    let verdict = check_repository_permission(
        &tenant("acme"),
        &TagSet::new(),
        "acme",
        &[format!("123.{HOST}/acme/tool:latest")],
        HOST,
    );
    assert!(matches!(verdict, PermissionVerdict::AccessDenied(_)));
}

#[test]
fn denies_when_any_image_uri_lacks_tenant_substring() {
    // Repository tag matches, but one image path escapes the tenant scope.
    let verdict = check_repository_permission(
        &tenant("acme"),
        &tags("acme"),
        "acme",
        &[
            format!("123.{HOST}/acme/tool:latest"),
            format!("123.{HOST}/other/tool:latest"),
        ],
        HOST,
    );
    assert!(matches!(verdict, PermissionVerdict::AccessDenied(_)));
}

#[test]
fn ignores_parameter_values_outside_the_registry() {
    let verdict = check_repository_permission(
        &tenant("acme"),
        &tags("acme"),
        "acme",
        &[
            "s3://bucket/input.fastq".to_string(),
            format!("123.{HOST}/acme/tool:latest"),
        ],
        HOST,
    );
    assert_eq!(verdict, PermissionVerdict::Passed);
}

#[test]
fn passes_with_no_image_parameters() {
    let verdict = check_repository_permission(
        &tenant("acme"),
        &tags("acme"),
        "acme",
        &["s3://bucket/input.fastq".to_string()],
        HOST,
    );
    assert_eq!(verdict, PermissionVerdict::Passed);
}

#[test]
fn denial_messages_are_distinguishable() {
    let mismatch = check_repository_permission(&tenant("acme"), &tags("other"), "acme", &[], HOST);
    let PermissionVerdict::AccessDenied(reason) = mismatch else {
        panic!("expected denial");
    };
    assert!(reason.contains("tenantId"));

    let image = check_repository_permission(
        &tenant("acme"),
        &tags("acme"),
        "acme",
        &[format!("123.{HOST}/other/tool:latest")],
        HOST,
    );
    let PermissionVerdict::AccessDenied(reason) = image else {
        panic!("expected denial");
    };
    assert!(reason.contains("repository"));
}

#[test]
fn registry_host_follows_region() {
    assert_eq!(registry_host("eu-west-2"), "dkr.ecr.eu-west-2.amazonaws.com");
}
