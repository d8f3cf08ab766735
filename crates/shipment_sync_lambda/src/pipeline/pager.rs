use shipment_sync_core::contract::Shipment;
use shipment_sync_core::date_range::DateRange;
use shipment_sync_core::paging::PagingState;
use tracing::{error, info};

use crate::adapters::logistics_api::LogisticsApi;
use crate::pipeline::PipelineError;

/// Collects up to `limit` shipments revised inside `range`, following cursors
/// until upstream runs out of pages. A failed page aborts the whole fetch.
pub async fn fetch_all(
    api: &dyn LogisticsApi,
    range: &DateRange,
    limit: usize,
) -> Result<Vec<Shipment>, PipelineError> {
    let mut state = PagingState::new(limit);

    while let Some(request) = state.next_request() {
        let page = api
            .shipment_jobs(range, &request)
            .await
            .map_err(|err| {
                error!(error = %err, after = ?request.after, "shipment page fetch failed");
                PipelineError::Fetch(err)
            })?;

        let fetched = page.data.len();
        state.absorb(page)?;
        info!(fetched, total = state.accumulated(), "fetched shipment page");
    }

    Ok(state.into_shipments())
}
