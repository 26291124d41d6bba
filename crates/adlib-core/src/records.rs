//! Canonical ad record types shared across the workspace.
//!
//! ## Wire format
//!
//! Ad Library deployments disagree on key names and nesting, so the scraper
//! normalizes everything into these structs. The serde renames below define
//! the one wire format every exporter sees: camelCase field names, the two
//! date fields as nullable epoch-millisecond integers, and targeting rows
//! with their literal band names (`"13-17"`, …, `"55+"`).
//!
//! Every field is always present in serialized output. Only `adStartDate`
//! and `adEndDate` may be `null`; everything else defaults to an empty
//! string, zero, or an empty list when the source had no usable value.

use serde::{Deserialize, Serialize};

/// A fully normalized advertisement record.
///
/// Produced once per raw ad during a page's normalization pass and never
/// mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdRecord {
    /// Source-assigned ad ID, kept as a string to avoid precision loss.
    pub ad_id: String,
    pub ad_title: String,
    /// Creative type as reported by the source (e.g. `"video"`).
    pub ad_type: String,
    pub ad_video_url: String,
    pub ad_video_cover: String,
    /// Campaign start, epoch milliseconds. `None` when the source supplied
    /// no parseable value.
    pub ad_start_date: Option<i64>,
    /// Campaign end, epoch milliseconds.
    pub ad_end_date: Option<i64>,
    pub advertiser_id: String,
    pub advertiser_name: String,
    /// Impression count or range, kept verbatim as text (sources report
    /// both exact counts and ranges like `"10K-100K"`).
    pub ad_impressions: String,
    pub advertiser_paid_for_by: String,
    /// Number of regions the ad targeted. Falls back to the length of
    /// `targeting_by_location` when the source has no explicit value.
    pub ad_total_regions: i64,
    pub ad_estimated_audience: String,
    pub targeting_by_location: Vec<LocationTargeting>,
    pub targeting_by_age: Vec<AgeTargeting>,
    pub targeting_by_gender: Vec<GenderTargeting>,
}

impl AdRecord {
    /// Returns the number of per-region location targeting rows.
    #[must_use]
    pub fn region_count(&self) -> usize {
        self.targeting_by_location.len()
    }

    /// Returns `true` if the record carries any targeting data at all.
    #[must_use]
    pub fn has_targeting(&self) -> bool {
        !self.targeting_by_location.is_empty()
            || !self.targeting_by_age.is_empty()
            || !self.targeting_by_gender.is_empty()
    }

    /// Campaign duration in milliseconds, when both dates are known and
    /// ordered.
    #[must_use]
    pub fn duration_ms(&self) -> Option<i64> {
        match (self.ad_start_date, self.ad_end_date) {
            (Some(start), Some(end)) if end >= start => Some(end - start),
            _ => None,
        }
    }
}

/// Per-region impression row from the ad's location targeting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationTargeting {
    pub region: String,
    /// Impressions in this region, verbatim text (count or range).
    pub impressions: String,
}

/// Per-region age-band flags. A `true` flag means the ad targeted that
/// band in the region.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgeTargeting {
    pub region: String,
    #[serde(rename = "13-17")]
    pub band_13_17: bool,
    #[serde(rename = "18-24")]
    pub band_18_24: bool,
    #[serde(rename = "25-34")]
    pub band_25_34: bool,
    #[serde(rename = "35-44")]
    pub band_35_44: bool,
    #[serde(rename = "45-54")]
    pub band_45_54: bool,
    #[serde(rename = "55+")]
    pub band_55_plus: bool,
}

/// Per-region gender flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenderTargeting {
    pub region: String,
    pub female: bool,
    pub male: bool,
    pub unknown: bool,
}
