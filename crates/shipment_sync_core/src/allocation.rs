//! Allocation (billing) codes derived from a shipment's freight terms and job type.

use serde::{Deserialize, Serialize};

use crate::contract::Shipment;

pub const FREIGHT_TERMS_CODES: [(&str, &str); 2] =
    [("3rd Party", "123.445"), ("Collect", "987.434")];
pub const UNKNOWN_FREIGHT_TERMS_CODE: &str = "756.434";

pub const JOB_TYPE_CODES: [(&str, &str); 2] = [("FTL", "999.123"), ("LTL", "001.456")];
pub const UNKNOWN_JOB_TYPE_CODE: &str = "000.000";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationCodes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipment_qid: Option<String>,
    pub freight_charge_terms: String,
    pub job_type: String,
}

/// Derives both allocation codes for a shipment. Unrecognized or missing
/// inputs map to the `Unknown` codes.
pub fn generate(shipment: &Shipment) -> AllocationCodes {
    AllocationCodes {
        shipment_qid: shipment.qid().map(str::to_string),
        freight_charge_terms: freight_terms_code(shipment.freight_charge_terms()).to_string(),
        job_type: job_type_code(shipment.job_type()).to_string(),
    }
}

pub fn freight_terms_code(terms: Option<&str>) -> &'static str {
    let Some(terms) = terms.filter(|value| !value.is_empty()) else {
        return UNKNOWN_FREIGHT_TERMS_CODE;
    };

    // Only the case is normalized; multi-word terms are matched as-is.
    let normalized = title_case(terms);
    FREIGHT_TERMS_CODES
        .iter()
        .find(|(key, _)| *key == normalized)
        .map(|(_, code)| *code)
        .unwrap_or(UNKNOWN_FREIGHT_TERMS_CODE)
}

pub fn job_type_code(job_type: Option<&str>) -> &'static str {
    let Some(job_type) = job_type else {
        return UNKNOWN_JOB_TYPE_CODE;
    };

    JOB_TYPE_CODES
        .iter()
        .find(|(key, _)| *key == job_type)
        .map(|(_, code)| *code)
        .unwrap_or(UNKNOWN_JOB_TYPE_CODE)
}

/// Uppercases the first character and lowercases the rest.
pub fn title_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    fn shipment(value: Value) -> Shipment {
        serde_json::from_value(value).expect("shipment fixture should parse")
    }

    #[test]
    fn collect_ftl_shipment_maps_to_known_codes() {
        let codes = generate(&shipment(json!({
            "jobTypeInfo": {"freightChargeTerms": "collect"},
            "jobType": "FTL",
            "qid": "X"
        })));

        assert_eq!(
            codes,
            AllocationCodes {
                shipment_qid: Some("X".to_string()),
                freight_charge_terms: "987.434".to_string(),
                job_type: "999.123".to_string(),
            }
        );
    }

    #[test]
    fn missing_job_type_info_and_unknown_job_type_fall_back() {
        let codes = generate(&shipment(json!({"jobType": "UNKNOWN_TYPE", "qid": "Y"})));

        assert_eq!(codes.shipment_qid.as_deref(), Some("Y"));
        assert_eq!(codes.freight_charge_terms, "756.434");
        assert_eq!(codes.job_type, "000.000");
    }

    #[test]
    fn single_word_terms_match_regardless_of_case() {
        assert_eq!(freight_terms_code(Some("COLLECT")), "987.434");
        assert_eq!(freight_terms_code(Some("cOlLeCt")), "987.434");
    }

    #[test]
    fn multi_word_terms_are_not_normalized_beyond_title_case() {
        assert_eq!(freight_terms_code(Some("3rd Party")), UNKNOWN_FREIGHT_TERMS_CODE);
        assert_eq!(freight_terms_code(Some("3RD PARTY")), UNKNOWN_FREIGHT_TERMS_CODE);
    }

    #[test]
    fn job_type_must_match_exactly() {
        assert_eq!(job_type_code(Some("FTL")), "999.123");
        assert_eq!(job_type_code(Some("LTL")), "001.456");
        assert_eq!(job_type_code(Some("ftl")), UNKNOWN_JOB_TYPE_CODE);
        assert_eq!(job_type_code(None), UNKNOWN_JOB_TYPE_CODE);
    }

    #[test]
    fn empty_or_unlisted_terms_are_unknown() {
        assert_eq!(freight_terms_code(Some("")), UNKNOWN_FREIGHT_TERMS_CODE);
        assert_eq!(freight_terms_code(Some("Prepaid")), UNKNOWN_FREIGHT_TERMS_CODE);
        assert_eq!(freight_terms_code(None), UNKNOWN_FREIGHT_TERMS_CODE);
    }

    #[test]
    fn job_info_without_terms_is_unknown() {
        let codes = generate(&shipment(json!({
            "qid": "Z",
            "jobType": "LTL",
            "jobTypeInfo": {"carrierOrganizationQid": "org-1"}
        })));

        assert_eq!(codes.freight_charge_terms, UNKNOWN_FREIGHT_TERMS_CODE);
        assert_eq!(codes.job_type, "001.456");
    }

    #[test]
    fn title_case_uppercases_first_and_lowercases_rest() {
        assert_eq!(title_case("cOLLECT"), "Collect");
        assert_eq!(title_case("3rd party"), "3rd party");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn missing_qid_is_omitted_from_serialized_codes() {
        let codes = generate(&shipment(json!({"jobType": "FTL"})));
        let value = serde_json::to_value(&codes).expect("codes should serialize");

        assert!(value.get("shipmentQid").is_none());
        assert_eq!(value["jobType"], "999.123");
    }
}
