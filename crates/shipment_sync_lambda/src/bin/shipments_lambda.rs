use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use shipment_sync_lambda::config::ServiceConfig;
use shipment_sync_lambda::handlers::shipments::{handle_invocation, ApiGatewayResponse};
use shipment_sync_lambda::telemetry::init_lambda_tracing;
use tracing::info;

async fn handle_request(event: LambdaEvent<Value>) -> Result<ApiGatewayResponse, Error> {
    info!(request_id = %event.context.request_id, "function started");
    let response = handle_invocation(ServiceConfig::from_env()).await;
    info!(status_code = response.status_code, "function completed");
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_lambda_tracing();
    lambda_runtime::run(service_fn(handle_request)).await
}
