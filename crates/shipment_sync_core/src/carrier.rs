//! Carrier records attached to shipments.
//!
//! The record comes in two shapes. [`CarrierVariant::Basic`] carries the
//! regulatory identifiers only, [`CarrierVariant::Full`] adds the carrier's
//! legal name. Lookups that cannot produce real data fall back to sentinel
//! strings instead of failing.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::contract::Organization;

pub const UNKNOWN: &str = "Unknown";
pub const ERROR: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierVariant {
    Basic,
    Full,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BasicCarrierInfo {
    pub us_dot_number: String,
    pub scac: String,
    pub mc_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FullCarrierInfo {
    pub legal_name: String,
    pub us_dot_number: String,
    pub scac: String,
    pub mc_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CarrierInfo {
    Full(FullCarrierInfo),
    Basic(BasicCarrierInfo),
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("organization record has no truckingCarrierInfo")]
pub struct MissingTruckingCarrierInfo;

impl CarrierInfo {
    /// Record used when the shipment names no carrier organization.
    pub fn unknown(variant: CarrierVariant) -> Self {
        Self::filled(variant, UNKNOWN)
    }

    /// Record used when the lookup failed. Always the full shape.
    pub fn error() -> Self {
        Self::filled(CarrierVariant::Full, ERROR)
    }

    pub fn from_organization(
        organization: &Organization,
        variant: CarrierVariant,
    ) -> Result<Self, MissingTruckingCarrierInfo> {
        let trucking = organization
            .trucking_carrier_info
            .as_ref()
            .ok_or(MissingTruckingCarrierInfo)?;

        let us_dot_number = field_or_unknown(&trucking.us_dot_number);
        let scac = field_or_unknown(&trucking.scac);
        let mc_number = field_or_unknown(&trucking.mc_number);

        Ok(match variant {
            CarrierVariant::Basic => Self::Basic(BasicCarrierInfo {
                us_dot_number,
                scac,
                mc_number,
            }),
            CarrierVariant::Full => Self::Full(FullCarrierInfo {
                legal_name: field_or_unknown(&organization.legal_name),
                us_dot_number,
                scac,
                mc_number,
            }),
        })
    }

    pub fn legal_name(&self) -> Option<&str> {
        match self {
            Self::Full(info) => Some(&info.legal_name),
            Self::Basic(_) => None,
        }
    }

    pub fn us_dot_number(&self) -> &str {
        match self {
            Self::Full(info) => &info.us_dot_number,
            Self::Basic(info) => &info.us_dot_number,
        }
    }

    pub fn scac(&self) -> &str {
        match self {
            Self::Full(info) => &info.scac,
            Self::Basic(info) => &info.scac,
        }
    }

    pub fn mc_number(&self) -> &str {
        match self {
            Self::Full(info) => &info.mc_number,
            Self::Basic(info) => &info.mc_number,
        }
    }

    pub fn is_error(&self) -> bool {
        *self == Self::error()
    }

    fn filled(variant: CarrierVariant, sentinel: &str) -> Self {
        match variant {
            CarrierVariant::Basic => Self::Basic(BasicCarrierInfo {
                us_dot_number: sentinel.to_string(),
                scac: sentinel.to_string(),
                mc_number: sentinel.to_string(),
            }),
            CarrierVariant::Full => Self::Full(FullCarrierInfo {
                legal_name: sentinel.to_string(),
                us_dot_number: sentinel.to_string(),
                scac: sentinel.to_string(),
                mc_number: sentinel.to_string(),
            }),
        }
    }
}

/// Renders an upstream field as a string. Null, empty, `false` and zero
/// values count as missing.
fn field_or_unknown(value: &Value) -> String {
    match value {
        Value::String(text) if !text.is_empty() => text.clone(),
        Value::Number(number) if number.as_f64() != Some(0.0) => number.to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn organization(value: Value) -> Organization {
        serde_json::from_value(value).expect("organization fixture should parse")
    }

    #[test]
    fn unknown_shapes_follow_variant() {
        let basic = serde_json::to_value(CarrierInfo::unknown(CarrierVariant::Basic))
            .expect("basic record should serialize");
        let full = serde_json::to_value(CarrierInfo::unknown(CarrierVariant::Full))
            .expect("full record should serialize");

        assert_eq!(
            basic,
            json!({"usDotNumber": "Unknown", "scac": "Unknown", "mcNumber": "Unknown"})
        );
        assert_eq!(
            full,
            json!({
                "legalName": "Unknown",
                "usDotNumber": "Unknown",
                "scac": "Unknown",
                "mcNumber": "Unknown"
            })
        );
    }

    #[test]
    fn error_record_has_all_four_fields() {
        let error = CarrierInfo::error();
        assert_eq!(error.legal_name(), Some(ERROR));
        assert_eq!(error.us_dot_number(), ERROR);
        assert_eq!(error.scac(), ERROR);
        assert_eq!(error.mc_number(), ERROR);
        assert!(error.is_error());
    }

    #[test]
    fn basic_record_omits_legal_name() {
        let org = organization(json!({
            "legalName": "Acme Freight LLC",
            "truckingCarrierInfo": {"usDotNumber": "123", "scac": "ACME", "mcNumber": "MC-1"}
        }));

        let info = CarrierInfo::from_organization(&org, CarrierVariant::Basic)
            .expect("trucking info is present");
        assert_eq!(info.legal_name(), None);
        assert_eq!(info.scac(), "ACME");
    }

    #[test]
    fn missing_fields_default_individually() {
        let org = organization(json!({
            "truckingCarrierInfo": {"usDotNumber": 987654, "scac": "", "mcNumber": null}
        }));

        let info = CarrierInfo::from_organization(&org, CarrierVariant::Full)
            .expect("trucking info is present");
        assert_eq!(info.legal_name(), Some(UNKNOWN));
        assert_eq!(info.us_dot_number(), "987654");
        assert_eq!(info.scac(), UNKNOWN);
        assert_eq!(info.mc_number(), UNKNOWN);
    }

    #[test]
    fn missing_trucking_info_is_an_error() {
        let org = organization(json!({"legalName": "No Trucks Inc"}));
        assert_eq!(
            CarrierInfo::from_organization(&org, CarrierVariant::Full),
            Err(MissingTruckingCarrierInfo)
        );
    }

    #[test]
    fn untagged_deserialization_prefers_full_shape() {
        let info: CarrierInfo = serde_json::from_value(json!({
            "legalName": "Acme",
            "usDotNumber": "1",
            "scac": "A",
            "mcNumber": "2"
        }))
        .expect("full record should parse");
        assert!(matches!(info, CarrierInfo::Full(_)));
    }
}
