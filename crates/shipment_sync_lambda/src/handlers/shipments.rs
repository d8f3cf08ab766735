use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, info};

use crate::adapters::http_client::HttpLogisticsApi;
use crate::adapters::logistics_api::LogisticsApi;
use crate::config::{ConfigError, RunConfig, ServiceConfig};
use crate::pipeline;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

/// Builds the upstream client from configuration and runs the pipeline.
/// Configuration problems are reported in the same 500 envelope as
/// pipeline failures.
pub async fn handle_invocation(config: Result<ServiceConfig, ConfigError>) -> ApiGatewayResponse {
    let config = match config {
        Ok(value) => value,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            return internal_error_response(&err.to_string());
        }
    };

    let api = match HttpLogisticsApi::new(&config.api) {
        Ok(value) => value,
        Err(err) => {
            error!(error = %err, "failed to build logistics api client");
            return internal_error_response(&err.to_string());
        }
    };

    handle_shipments_request(&api, &config.run).await
}

pub async fn handle_shipments_request(
    api: &dyn LogisticsApi,
    run_config: &RunConfig,
) -> ApiGatewayResponse {
    info!(range = %run_config.range, "processing shipments");

    match pipeline::run(api, &run_config.range, &run_config.options).await {
        Ok(shipments) => match serde_json::to_string(&shipments) {
            Ok(body) => {
                debug!(%body, "enriched shipment data");
                info!(total = shipments.len(), "function completed successfully");
                response(200, body)
            }
            Err(err) => {
                error!(error = %err, "failed to serialize shipments");
                internal_error_response(&err.to_string())
            }
        },
        Err(err) => {
            error!(error = %err, "shipment processing failed");
            internal_error_response(&err.to_string())
        }
    }
}

pub fn internal_error_response(details: &str) -> ApiGatewayResponse {
    response(
        500,
        json!({
            "error": "Internal Server Error",
            "details": details,
        })
        .to_string(),
    )
}

fn response(status_code: u16, body: String) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: cors_headers(),
        body,
    }
}

fn cors_headers() -> Value {
    json!({
        "Content-Type": "application/json",
        "Access-Control-Allow-Origin": "*",
        "Access-Control-Allow-Credentials": true,
    })
}
