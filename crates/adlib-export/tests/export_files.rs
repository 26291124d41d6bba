//! File-level integration tests for `export_ads`.
//!
//! Each test writes into its own `tempfile::TempDir` and inspects the
//! resulting file from the outside, the way a downstream consumer would.

use std::fs;

use adlib_core::{AdRecord, AgeTargeting, GenderTargeting, LocationTargeting};
use adlib_export::{export_ads, ExportError};

fn sample_records() -> Vec<AdRecord> {
    vec![
        AdRecord {
            ad_id: "7001".to_string(),
            ad_title: "Summer Sale".to_string(),
            ad_type: "video".to_string(),
            ad_start_date: Some(1_697_328_000_000),
            ad_end_date: Some(1_699_920_000_000),
            advertiser_name: "Acme Ltd".to_string(),
            ad_total_regions: 1,
            targeting_by_location: vec![LocationTargeting {
                region: "GB".to_string(),
                impressions: "5K".to_string(),
            }],
            targeting_by_age: vec![AgeTargeting {
                region: "GB".to_string(),
                band_18_24: true,
                ..AgeTargeting::default()
            }],
            targeting_by_gender: vec![GenderTargeting {
                region: "GB".to_string(),
                female: true,
                male: true,
                unknown: false,
            }],
            ..AdRecord::default()
        },
        AdRecord {
            ad_id: "7002".to_string(),
            ad_title: "Época de rebajas".to_string(),
            ..AdRecord::default()
        },
    ]
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[test]
fn json_export_round_trips_field_for_field() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dest = dir.path().join("ads.json");
    let records = sample_records();

    export_ads(&records, "json", &dest).expect("export failed");

    let bytes = fs::read(&dest).expect("file must exist");
    let decoded: Vec<AdRecord> = serde_json::from_slice(&bytes).expect("valid JSON expected");

    assert_eq!(
        serde_json::to_value(&decoded).unwrap(),
        serde_json::to_value(&records).unwrap(),
        "re-parsed records must equal the originals field-for-field"
    );
}

#[test]
fn json_export_is_utf8_with_raw_non_ascii() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dest = dir.path().join("ads.json");

    export_ads(&sample_records(), "json", &dest).expect("export failed");

    let text = fs::read_to_string(&dest).expect("file must be UTF-8");
    assert!(text.contains("Época de rebajas"));
}

#[test]
fn json_export_overwrites_prior_content() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dest = dir.path().join("ads.json");

    export_ads(&sample_records(), "json", &dest).expect("first export failed");
    export_ads(&[], "json", &dest).expect("second export failed");

    let decoded: Vec<AdRecord> =
        serde_json::from_slice(&fs::read(&dest).expect("file must exist")).expect("valid JSON");
    assert!(decoded.is_empty(), "second run must replace the first");
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

#[test]
fn csv_export_zero_records_creates_empty_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dest = dir.path().join("ads.csv");

    export_ads(&[], "csv", &dest).expect("export failed");

    let metadata = fs::metadata(&dest).expect("file must exist");
    assert_eq!(metadata.len(), 0, "empty record set still produces a file");
}

#[test]
fn csv_export_has_one_row_per_record() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dest = dir.path().join("ads.csv");

    export_ads(&sample_records(), "csv", &dest).expect("export failed");

    let text = fs::read_to_string(&dest).expect("file must exist");
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let rows: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("rows must parse");
    assert_eq!(rows.len(), 2);

    let header = reader.headers().expect("header expected").clone();
    let id_idx = header
        .iter()
        .position(|f| f == "adId")
        .expect("adId column");
    assert_eq!(&rows[0][id_idx], "7001");
    assert_eq!(&rows[1][id_idx], "7002");
}

// ---------------------------------------------------------------------------
// XML
// ---------------------------------------------------------------------------

#[test]
fn xml_export_writes_declared_ads_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dest = dir.path().join("ads.xml");

    export_ads(&sample_records(), "xml", &dest).expect("export failed");

    let text = fs::read_to_string(&dest).expect("file must exist");
    assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(text.contains("<adId>7001</adId>"));
    assert!(text.contains("<adId>7002</adId>"));
    assert!(text.ends_with("</ads>"));
}

// ---------------------------------------------------------------------------
// Format validation & destination handling
// ---------------------------------------------------------------------------

#[test]
fn unsupported_format_errors_before_creating_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dest = dir.path().join("ads.yaml");

    let result = export_ads(&sample_records(), "yaml", &dest);

    assert!(
        matches!(result, Err(ExportError::UnsupportedFormat { ref format }) if format == "yaml"),
        "expected UnsupportedFormat, got: {result:?}"
    );
    assert!(!dest.exists(), "no file may be created for a bad format");
}

#[test]
fn format_token_is_case_insensitive() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dest = dir.path().join("ads.json");

    export_ads(&sample_records(), "JSON", &dest).expect("uppercase token must work");
    assert!(dest.exists());
}

#[test]
fn missing_parent_directories_are_created() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dest = dir.path().join("nested/deeper/ads.json");

    export_ads(&sample_records(), "json", &dest).expect("export failed");
    assert!(dest.exists());
}
