//! Normalization from raw ad payloads to [`adlib_core::AdRecord`].
//!
//! ## Observed raw shapes
//!
//! Deployments of the Ad Library API disagree on field names: the same
//! attribute arrives as `adTitle`, `title`, or `ad_title` depending on the
//! deployment, and timestamps arrive in several units and formats. Each
//! canonical field therefore carries an ordered alias list, and the first
//! alias holding a non-empty value wins. Empty means empty in the loose
//! sense of [`is_empty_value`]: `null`, `""`, `0`, `false`, `[]`, and `{}`
//! all fall through to the next alias.
//!
//! Normalization is infallible by design: malformed sub-structures degrade
//! to defaults (empty strings, `None` dates, empty targeting lists) rather
//! than erroring, so one bad record can never poison a page.

use serde_json::{Map, Value};

use adlib_core::{AdRecord, AgeTargeting, GenderTargeting, LocationTargeting};

use crate::coerce::{ensure_i64, ensure_string, is_empty_value};
use crate::timestamp::parse_timestamp_ms;

const AD_ID_ALIASES: &[&str] = &["adId", "ad_id", "id"];
const AD_TITLE_ALIASES: &[&str] = &["adTitle", "title", "ad_title"];
const AD_TYPE_ALIASES: &[&str] = &["adType", "type", "ad_type"];
const AD_VIDEO_URL_ALIASES: &[&str] = &["adVideoUrl", "video_url", "creative_url"];
const AD_VIDEO_COVER_ALIASES: &[&str] = &["adVideoCover", "thumbnail_url", "cover_url"];
const AD_START_DATE_ALIASES: &[&str] = &["adStartDate", "start_time", "startDate"];
const AD_END_DATE_ALIASES: &[&str] = &["adEndDate", "end_time", "endDate"];
const ADVERTISER_ID_ALIASES: &[&str] = &["advertiserId", "advertiser_id", "account_id"];
const ADVERTISER_NAME_ALIASES: &[&str] = &["advertiserName", "advertiser_name", "account_name"];
const AD_IMPRESSIONS_ALIASES: &[&str] = &["adImpressions", "impressions", "impression_range"];
const PAID_FOR_BY_ALIASES: &[&str] = &["advertiserPaidForBy", "paid_for_by"];
const TOTAL_REGIONS_ALIASES: &[&str] = &["adTotalRegions", "total_regions"];
const ESTIMATED_AUDIENCE_ALIASES: &[&str] = &["adEstimatedAudience", "estimated_audience"];

/// The six fixed age bands, in canonical wire order.
const AGE_BANDS: [&str; 6] = ["13-17", "18-24", "25-34", "35-44", "45-54", "55+"];

/// Returns the first alias whose value is present and non-empty.
fn first_present<'a>(raw: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|key| raw.get(*key))
        .find(|value| !is_empty_value(value))
}

fn string_field(raw: &Map<String, Value>, aliases: &[&str]) -> String {
    first_present(raw, aliases).map(ensure_string).unwrap_or_default()
}

fn date_field(raw: &Map<String, Value>, aliases: &[&str]) -> Option<i64> {
    first_present(raw, aliases).and_then(parse_timestamp_ms)
}

/// Reads a boolean flag from a targeting row, treating anything non-empty
/// as set.
fn flag(row: &Map<String, Value>, key: &str) -> bool {
    row.get(key).is_some_and(|value| !is_empty_value(value))
}

/// Canonical targeting sub-records extracted from one raw `targeting` value.
#[derive(Debug, Default)]
struct NormalizedTargeting {
    location: Vec<LocationTargeting>,
    age: Vec<AgeTargeting>,
    gender: Vec<GenderTargeting>,
}

/// Iterates the object elements of `raw[key]`, yielding nothing when the
/// field is missing or not an array. Non-object elements are skipped.
fn object_rows<'a>(
    raw: &'a Map<String, Value>,
    key: &str,
) -> impl Iterator<Item = &'a Map<String, Value>> {
    raw.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .filter_map(Value::as_object)
}

/// Normalizes a raw `targeting` sub-object into the fixed canonical shape.
///
/// Output row order mirrors input order. Missing or malformed sections are
/// simply empty.
fn normalize_targeting(targeting_raw: &Map<String, Value>) -> NormalizedTargeting {
    let location = object_rows(targeting_raw, "locations")
        .map(|row| LocationTargeting {
            region: row
                .get("code")
                .or_else(|| row.get("region"))
                .map(ensure_string)
                .unwrap_or_default(),
            impressions: row.get("impressions").map(ensure_string).unwrap_or_default(),
        })
        .collect();

    let age = object_rows(targeting_raw, "age")
        .map(|row| AgeTargeting {
            region: row.get("region").map(ensure_string).unwrap_or_default(),
            band_13_17: flag(row, AGE_BANDS[0]),
            band_18_24: flag(row, AGE_BANDS[1]),
            band_25_34: flag(row, AGE_BANDS[2]),
            band_35_44: flag(row, AGE_BANDS[3]),
            band_45_54: flag(row, AGE_BANDS[4]),
            band_55_plus: flag(row, AGE_BANDS[5]),
        })
        .collect();

    let gender = object_rows(targeting_raw, "gender")
        .map(|row| GenderTargeting {
            region: row.get("region").map(ensure_string).unwrap_or_default(),
            female: flag(row, "female"),
            male: flag(row, "male"),
            unknown: flag(row, "unknown"),
        })
        .collect();

    NormalizedTargeting {
        location,
        age,
        gender,
    }
}

/// Normalizes one raw ad object into an [`AdRecord`].
///
/// Every canonical field is filled from the first non-empty alias, with
/// dates routed through [`parse_timestamp_ms`] and scalars through the
/// coercion helpers. `adTotalRegions` falls back to the number of
/// normalized location rows when no alias supplies a value.
///
/// Idempotent on already-canonical input: the canonical key is always the
/// first alias in its list.
#[must_use]
pub fn normalize_ad(raw: &Map<String, Value>) -> AdRecord {
    let targeting = match raw.get("targeting") {
        Some(Value::Object(map)) => normalize_targeting(map),
        _ => NormalizedTargeting::default(),
    };

    let ad_total_regions = first_present(raw, TOTAL_REGIONS_ALIASES).map_or_else(
        || targeting.location.len().try_into().unwrap_or(i64::MAX),
        |value| ensure_i64(value, 0),
    );

    AdRecord {
        ad_id: string_field(raw, AD_ID_ALIASES),
        ad_title: string_field(raw, AD_TITLE_ALIASES),
        ad_type: string_field(raw, AD_TYPE_ALIASES),
        ad_video_url: string_field(raw, AD_VIDEO_URL_ALIASES),
        ad_video_cover: string_field(raw, AD_VIDEO_COVER_ALIASES),
        ad_start_date: date_field(raw, AD_START_DATE_ALIASES),
        ad_end_date: date_field(raw, AD_END_DATE_ALIASES),
        advertiser_id: string_field(raw, ADVERTISER_ID_ALIASES),
        advertiser_name: string_field(raw, ADVERTISER_NAME_ALIASES),
        ad_impressions: string_field(raw, AD_IMPRESSIONS_ALIASES),
        advertiser_paid_for_by: string_field(raw, PAID_FOR_BY_ALIASES),
        ad_total_regions,
        ad_estimated_audience: string_field(raw, ESTIMATED_AUDIENCE_ALIASES),
        targeting_by_location: targeting.location,
        targeting_by_age: targeting.age,
        targeting_by_gender: targeting.gender,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
