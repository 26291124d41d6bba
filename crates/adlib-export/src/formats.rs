//! Per-format serializers. Each renders the full record set into a byte
//! buffer; writing that buffer to disk in one shot is the caller's job, so
//! a serialization failure never leaves a partial file behind.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use adlib_core::AdRecord;

use crate::error::ExportError;

/// Renders records as a pretty-printed JSON array.
///
/// Nested targeting structures stay native and non-ASCII characters pass
/// through unescaped.
pub(crate) fn render_json(records: &[AdRecord]) -> Result<Vec<u8>, ExportError> {
    let mut bytes = serde_json::to_vec_pretty(records)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Renders records as RFC-4180-style CSV.
///
/// The header is the lexicographically sorted union of all wire-format keys
/// across all records. Scalar cells stringify plainly (`null` → empty);
/// targeting lists embed their compact JSON text, the same representation
/// the XML exporter uses. Zero records produce zero bytes.
pub(crate) fn render_csv(records: &[AdRecord]) -> Result<Vec<u8>, ExportError> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let rows = to_wire_objects(records)?;

    let mut header: BTreeSet<&String> = BTreeSet::new();
    for row in &rows {
        header.extend(row.keys());
    }
    let header: Vec<&String> = header.into_iter().collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&header)?;
    for row in &rows {
        writer.write_record(header.iter().map(|key| cell_text(row.get(*key))))?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))
}

/// Renders records as `<ads><ad>…</ad></ads>` with an XML declaration.
///
/// One child element per canonical field; scalar values become element
/// text (`null` → empty element), targeting lists embed their compact JSON
/// text.
pub(crate) fn render_xml(records: &[AdRecord]) -> Result<Vec<u8>, ExportError> {
    use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
    use quick_xml::Writer;

    let rows = to_wire_objects(records)?;

    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Start(BytesStart::new("ads")))
        .map_err(xml_err)?;

    for row in &rows {
        writer
            .write_event(Event::Start(BytesStart::new("ad")))
            .map_err(xml_err)?;
        for (name, value) in row {
            writer
                .write_event(Event::Start(BytesStart::new(name.as_str())))
                .map_err(xml_err)?;
            let text = cell_text(Some(value));
            if !text.is_empty() {
                writer
                    .write_event(Event::Text(BytesText::new(&text)))
                    .map_err(xml_err)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(name.as_str())))
                .map_err(xml_err)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("ad")))
            .map_err(xml_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("ads")))
        .map_err(xml_err)?;

    Ok(writer.into_inner())
}

/// Serializes each record to its wire-format JSON object.
fn to_wire_objects(records: &[AdRecord]) -> Result<Vec<Map<String, Value>>, ExportError> {
    records
        .iter()
        .map(|record| match serde_json::to_value(record)? {
            Value::Object(map) => Ok(map),
            // AdRecord is a plain struct; serde always renders it as an object.
            other => Err(ExportError::Json(serde::ser::Error::custom(format!(
                "expected object, got {other}"
            )))),
        })
        .collect()
}

/// Text form of one field value for tabular/markup output.
///
/// Scalars stringify directly, `null` and missing become empty text, and
/// sequences/maps fall back to compact JSON.
fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(nested) => nested.to_string(),
    }
}

fn xml_err<E: std::fmt::Display>(e: E) -> ExportError {
    ExportError::Xml(e.to_string())
}
