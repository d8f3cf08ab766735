use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::allocation::AllocationCodes;
use crate::carrier::{CarrierInfo, CarrierVariant};

/// Bill of lading number whose shipments get the full carrier record.
pub const SPECIAL_BOL_NUMBER: &str = "BOL123";

pub const CARRIER_DATA_FIELD: &str = "carrierData";
pub const ALLOCATION_CODES_FIELD: &str = "allocationCodes";

/// Shipment job record as returned by the upstream API.
///
/// The record is kept opaque: every upstream field survives serialization
/// untouched, and only the handful of fields the pipeline reads get typed
/// accessors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Shipment {
    fields: Map<String, Value>,
}

impl Shipment {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn qid(&self) -> Option<&str> {
        self.fields.get("qid").and_then(Value::as_str)
    }

    pub fn job_type(&self) -> Option<&str> {
        self.fields.get("jobType").and_then(Value::as_str)
    }

    pub fn freight_charge_terms(&self) -> Option<&str> {
        self.job_type_info()
            .and_then(|info| info.get("freightChargeTerms"))
            .and_then(Value::as_str)
    }

    pub fn carrier_organization_qid(&self) -> Option<&str> {
        self.job_type_info()
            .and_then(|info| info.get("carrierOrganizationQid"))
            .and_then(Value::as_str)
    }

    pub fn bol_number(&self) -> Option<&str> {
        self.fields
            .get("referenceNumbers")
            .and_then(Value::as_object)
            .and_then(|numbers| numbers.get("bolNumber"))
            .and_then(Value::as_str)
    }

    /// Shipments carrying the special bill of lading get the full record,
    /// everything else the basic one.
    pub fn carrier_variant(&self) -> CarrierVariant {
        if self.bol_number() == Some(SPECIAL_BOL_NUMBER) {
            CarrierVariant::Full
        } else {
            CarrierVariant::Basic
        }
    }

    fn job_type_info(&self) -> Option<&Map<String, Value>> {
        self.fields.get("jobTypeInfo").and_then(Value::as_object)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// One page of `GET /shipment-jobs`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentPage {
    #[serde(default)]
    pub data: Vec<Shipment>,
    #[serde(default)]
    pub page_info: PageInfo,
}

/// Subset of `GET /organizations/{id}` consumed by carrier enrichment.
///
/// Fields stay as raw JSON values because upstream mixes strings and numbers
/// for carrier identifiers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(default)]
    pub legal_name: Value,
    #[serde(default)]
    pub trucking_carrier_info: Option<TruckingCarrierInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TruckingCarrierInfo {
    #[serde(default)]
    pub us_dot_number: Value,
    #[serde(default)]
    pub scac: Value,
    #[serde(default)]
    pub mc_number: Value,
}

/// Shipment with carrier data and allocation codes attached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedShipment {
    #[serde(flatten)]
    pub shipment: Shipment,
    #[serde(rename = "carrierData")]
    pub carrier_data: CarrierInfo,
    #[serde(rename = "allocationCodes")]
    pub allocation_codes: AllocationCodes,
}

impl EnrichedShipment {
    /// Attaches enrichment to a shipment. Upstream fields with the same names
    /// are replaced rather than duplicated in the output object.
    pub fn new(
        mut shipment: Shipment,
        carrier_data: CarrierInfo,
        allocation_codes: AllocationCodes,
    ) -> Self {
        shipment.fields.remove(CARRIER_DATA_FIELD);
        shipment.fields.remove(ALLOCATION_CODES_FIELD);
        Self {
            shipment,
            carrier_data,
            allocation_codes,
        }
    }
}
