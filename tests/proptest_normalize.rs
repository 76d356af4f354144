//! Property-based tests using proptest
//!
//! These tests check response normalization and resource URL building
//! against randomized payloads and type names.

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use proptest::prelude::*;
use serde_json::{json, Value};
use wdpro::wdpro::client::collection_name;
use wdpro::{normalize, normalize_response, Config, DisneyClient};

/// Facility ids as the API sends them, e.g. "80010176;entityType=Attraction"
fn arb_facility_id() -> impl Strategy<Value = (u64, String)> {
    (
        1u64..100_000_000_000,
        prop_oneof![
            Just(String::new()),
            "[A-Za-z]{1,12}".prop_map(|t| format!(";entityType={t}")),
            "[a-z]{1,6}",
        ],
    )
        .prop_map(|(id, suffix)| (id, format!("{id}{suffix}")))
}

/// A coordinate record with string-typed numbers
fn arb_place() -> impl Strategy<Value = Value> {
    (1i64..4096, 1i64..4096, -89.0f64..89.0, -179.0f64..179.0).prop_map(|(x, y, lat, lon)| {
        json!({
            "xyMaps": {"x": x.to_string(), "y": y.to_string()},
            "gps": {"latitude": lat.to_string(), "longitude": lon.to_string()}
        })
    })
}

fn arb_facility() -> impl Strategy<Value = Value> {
    (
        arb_facility_id(),
        prop_oneof!["Attraction", "theme-park", "Entertainment", "restaurant"],
        prop::collection::btree_map("[A-Za-z ]{1,16}", arb_place(), 0..3),
    )
        .prop_map(|((_, id), kind, places)| {
            json!({
                "id": id,
                "type": kind,
                "coordinates": places
            })
        })
}

proptest! {
    /// Ids with a numeric prefix become that number
    #[test]
    fn id_becomes_leading_number(
        (expected, id) in arb_facility_id(),
        kind in "[a-z-]{1,12}"
    ) {
        let mut value = json!({"id": id, "type": kind});
        normalize(&mut value);
        prop_assert_eq!(value["id"].as_u64(), Some(expected));
    }

    /// Ids that do not start with a digit are left alone
    #[test]
    fn non_numeric_id_untouched(id in "[A-Za-z;=][A-Za-z0-9;=]{0,20}") {
        let mut value = json!({"id": id.clone(), "type": "attraction"});
        normalize(&mut value);
        prop_assert_eq!(&value["id"], &json!(id));
    }

    /// Map links decode back to the pinned type and id
    #[test]
    fn disney_map_pins_object(facility in arb_facility()) {
        let mut value = facility;
        normalize(&mut value);

        let map = value["disneyMap"].as_str().unwrap().to_string();
        let (_, hash) = map.split_once('#').unwrap();
        let decoded: Value = serde_json::from_slice(&BASE64_STANDARD.decode(hash).unwrap()).unwrap();
        prop_assert_eq!(&decoded["options"]["pins"][0]["type"], &value["type"]);
        prop_assert_eq!(&decoded["options"]["pins"][0]["id"], &value["id"]);
    }

    /// Every place gets integer map coordinates and a Google link
    #[test]
    fn places_are_tidied(facility in arb_facility()) {
        let mut value = facility;
        normalize(&mut value);

        for place in value["coordinates"].as_object().unwrap().values() {
            prop_assert!(place["xyMaps"]["x"].is_i64());
            prop_assert!(place["xyMaps"]["y"].is_i64());
            let lat = place["gps"]["latitude"].as_f64().unwrap();
            let lon = place["gps"]["longitude"].as_f64().unwrap();
            let pair = format!("{lat},{lon}");
            prop_assert_eq!(place["gmap"].as_str().unwrap().matches(&pair).count(), 2);
        }
    }

    /// Normalizing an already normalized payload changes nothing
    #[test]
    fn normalize_is_idempotent(facility in arb_facility()) {
        let mut once = json!({"entries": [facility.clone()]});
        once["id"] = facility["id"].clone();
        once["type"] = facility["type"].clone();
        normalize_response(&mut once);

        let mut twice = once.clone();
        normalize_response(&mut twice);
        prop_assert_eq!(once, twice);
    }

    /// Collection names only ever contain lowercase letters, digits and hyphens
    #[test]
    fn collection_name_is_clean(kind in ".{0,30}") {
        let name = collection_name(&kind);
        prop_assert!(name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    /// Resource URLs are rooted at the base and end with id and sub-page
    #[test]
    fn resource_url_shape(id in any::<u64>(), kind in "[A-Za-z][A-Za-z -]{0,20}") {
        let client = DisneyClient::with_config(
            Config::default().with_api_base_url("http://localhost/facility-service"),
        )
        .unwrap();

        let url = client.resource_url(id, &kind, Some("wait-times"));
        prop_assert!(url.starts_with("http://localhost/facility-service/"));
        let expected_suffix = format!("/{}/wait-times", id);
        prop_assert!(url.ends_with(&expected_suffix));
    }
}
