use shipment_sync_core::carrier::{CarrierInfo, CarrierVariant};
use tracing::{error, warn};

use crate::adapters::logistics_api::LogisticsApi;

/// Looks up the carrier organization of a shipment.
///
/// Never fails: a missing id yields the `Unknown` record of the requested
/// variant without a network call, and any lookup failure yields the
/// `Error` record.
pub async fn lookup(
    api: &dyn LogisticsApi,
    carrier_org_id: Option<&str>,
    variant: CarrierVariant,
) -> CarrierInfo {
    let Some(carrier_org_id) = carrier_org_id.filter(|id| !id.trim().is_empty()) else {
        warn!("missing carrierOrganizationQid, skipping carrier info fetch");
        return CarrierInfo::unknown(variant);
    };

    let organization = match api.organization(carrier_org_id).await {
        Ok(organization) => organization,
        Err(err) => {
            error!(carrier_org_id, error = %err, "failed to fetch carrier info");
            return CarrierInfo::error();
        }
    };

    match CarrierInfo::from_organization(&organization, variant) {
        Ok(info) => info,
        Err(err) => {
            error!(carrier_org_id, error = %err, "failed to read carrier info");
            CarrierInfo::error()
        }
    }
}
