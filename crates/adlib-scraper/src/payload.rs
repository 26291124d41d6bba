//! Locates the ad list inside an arbitrarily-shaped page payload.

use serde_json::Value;

/// Keys under which deployments have been observed to nest the ad list,
/// tried in order.
const AD_LIST_KEYS: [&str; 4] = ["ads", "adList", "items", "records"];

/// Extracts the list of raw ad records from a page payload.
///
/// Decision order:
/// 1. an object carrying an object under `data` is searched inside that
///    inner object for the first of [`AD_LIST_KEYS`] holding an array;
/// 2. otherwise the top-level object is searched under the same key list;
/// 3. otherwise a payload that is itself an array is returned directly;
/// 4. otherwise the result is empty.
///
/// The order is load-bearing: a list nested under `data` outranks a
/// top-level list with the same key name.
#[must_use]
pub fn extract_ads(payload: &Value) -> &[Value] {
    let inner = match payload.get("data") {
        Some(data @ Value::Object(_)) => data,
        _ => payload,
    };

    if let Value::Object(map) = inner {
        for key in AD_LIST_KEYS {
            if let Some(Value::Array(list)) = map.get(key) {
                return list;
            }
        }
    }

    if let Value::Array(list) = payload {
        return list;
    }

    &[]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finds_ads_under_data() {
        let payload = json!({"data": {"ads": [{"id": 1}]}});
        let ads = extract_ads(&payload);
        assert_eq!(ads.len(), 1);
        assert_eq!(ads[0]["id"], 1);
    }

    #[test]
    fn data_nested_list_outranks_top_level() {
        let payload = json!({
            "data": {"ads": [{"id": "inner"}]},
            "items": [{"id": "outer"}]
        });
        let ads = extract_ads(&payload);
        assert_eq!(ads.len(), 1);
        assert_eq!(ads[0]["id"], "inner");
    }

    #[test]
    fn key_order_within_one_object() {
        // `ads` is checked before `items` even when both are present.
        let payload = json!({
            "items": [{"id": "from-items"}],
            "ads": [{"id": "from-ads"}]
        });
        assert_eq!(extract_ads(&payload)[0]["id"], "from-ads");
    }

    #[test]
    fn falls_back_to_top_level_keys() {
        let payload = json!({"adList": [{"id": 2}, {"id": 3}]});
        assert_eq!(extract_ads(&payload).len(), 2);
    }

    #[test]
    fn skips_keys_whose_value_is_not_an_array() {
        let payload = json!({"ads": "not-a-list", "records": [{"id": 9}]});
        let ads = extract_ads(&payload);
        assert_eq!(ads.len(), 1);
        assert_eq!(ads[0]["id"], 9);
    }

    #[test]
    fn bare_array_payload_is_the_list() {
        let payload = json!([{"id": 1}, {"id": 2}]);
        assert_eq!(extract_ads(&payload).len(), 2);
    }

    #[test]
    fn data_present_but_no_known_key_is_empty() {
        // A `data` object with no recognized list key ends the search;
        // sibling keys outside `data` are not consulted.
        let payload = json!({"data": {"total": 10}, "ads": [{"id": 1}]});
        assert!(extract_ads(&payload).is_empty());
    }

    #[test]
    fn non_object_data_falls_back_to_top_level() {
        let payload = json!({"data": [1, 2], "records": [{"id": 4}]});
        let ads = extract_ads(&payload);
        assert_eq!(ads.len(), 1);
        assert_eq!(ads[0]["id"], 4);
    }

    #[test]
    fn unrecognized_payloads_are_empty() {
        assert!(extract_ads(&json!({"total": 0})).is_empty());
        assert!(extract_ads(&json!("nope")).is_empty());
        assert!(extract_ads(&json!(null)).is_empty());
    }
}
