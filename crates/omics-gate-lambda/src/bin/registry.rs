// crates/omics-gate-lambda/src/bin/registry.rs
// ============================================================================
// Module: Registry Function
// Description: Entrypoint for the container registry resolver.
// Purpose: Serve repository listing and creation from the GraphQL API.
// Dependencies: omics-gate-lambda, omics-gate-aws, omics-gate-resolvers
// ============================================================================

//! Registry function entrypoint.

use lambda_runtime::Error;
use lambda_runtime::LambdaEvent;
use lambda_runtime::service_fn;
use serde_json::Value;

use omics_gate_aws::EcrRegistry;
use omics_gate_core::ResolverEvent;
use omics_gate_lambda::bootstrap;
use omics_gate_lambda::init_telemetry;
use omics_gate_resolvers::RegistryResolver;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_telemetry();
    let (config, shared) = bootstrap("registry").await?;
    let resolver = RegistryResolver::new(config, EcrRegistry::new(&shared));
    let resolver = &resolver;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<ResolverEvent>| async move {
        Ok::<Value, Error>(resolver.handle(&event.payload).await)
    }))
    .await
}
