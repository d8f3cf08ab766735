use futures::future::join_all;
use futures::stream::{self, StreamExt};
use shipment_sync_core::allocation;
use shipment_sync_core::carrier::CarrierInfo;
use shipment_sync_core::contract::{EnrichedShipment, Shipment};
use shipment_sync_core::date_range::DateRange;
use shipment_sync_core::paging::{PagingError, DEFAULT_FETCH_LIMIT};
use thiserror::Error;
use tracing::{error, info};

use crate::adapters::logistics_api::{ApiError, LogisticsApi};
use crate::pipeline::{enricher, pager};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("connectivity check failed: {0}")]
    Connectivity(#[source] ApiError),
    #[error("failed to fetch shipments: {0}")]
    Fetch(#[source] ApiError),
    #[error(transparent)]
    Paging(#[from] PagingError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub fetch_limit: usize,
    /// Upper bound on in-flight carrier lookups. `None` enriches every
    /// shipment at once.
    pub enrichment_concurrency: Option<usize>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            fetch_limit: DEFAULT_FETCH_LIMIT,
            enrichment_concurrency: None,
        }
    }
}

/// Runs ping, paginated fetch, carrier enrichment and allocation coding.
///
/// Only the ping and the fetch can fail; enrichment and coding degrade to
/// sentinel values. The output preserves fetch order.
pub async fn run(
    api: &dyn LogisticsApi,
    range: &DateRange,
    options: &RunOptions,
) -> Result<Vec<EnrichedShipment>, PipelineError> {
    let pong = api.ping().await.map_err(|err| {
        error!(error = %err, "connectivity check failed");
        PipelineError::Connectivity(err)
    })?;
    info!(response = %pong, "auth validated");

    let shipments = pager::fetch_all(api, range, options.fetch_limit).await?;
    info!(total = shipments.len(), %range, "total shipments fetched");

    let carriers = enrich_carriers(api, &shipments, options.enrichment_concurrency).await;

    let enriched: Vec<_> = shipments
        .into_iter()
        .zip(carriers)
        .map(|(shipment, carrier_data)| {
            let allocation_codes = allocation::generate(&shipment);
            EnrichedShipment::new(shipment, carrier_data, allocation_codes)
        })
        .collect();
    info!(total = enriched.len(), "shipment processing completed");

    Ok(enriched)
}

async fn enrich_carriers(
    api: &dyn LogisticsApi,
    shipments: &[Shipment],
    concurrency: Option<usize>,
) -> Vec<CarrierInfo> {
    let lookups = shipments.iter().map(|shipment| {
        enricher::lookup(
            api,
            shipment.carrier_organization_qid(),
            shipment.carrier_variant(),
        )
    });

    match concurrency {
        None => join_all(lookups).await,
        Some(limit) => {
            stream::iter(lookups)
                .buffered(limit.max(1))
                .collect::<Vec<_>>()
                .await
        }
    }
}
