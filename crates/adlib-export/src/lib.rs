//! Export of canonical ad records to JSON, CSV, or XML files.
//!
//! The format token is validated before any file I/O, the destination's
//! parent directory is created on demand, and every format is rendered
//! fully in memory before a single write, so a failed export never leaves
//! a partial file. Re-running replaces prior content.

pub mod error;

mod formats;

pub use error::ExportError;

use std::path::Path;

use adlib_core::AdRecord;

use formats::{render_csv, render_json, render_xml};

/// Writes `records` to `destination` in the requested format.
///
/// `format` is matched case-insensitively against `"json"`, `"csv"`, and
/// `"xml"`. See the crate docs for the per-format shapes.
///
/// # Errors
///
/// - [`ExportError::UnsupportedFormat`] for any other format token,
///   returned before the destination is touched.
/// - [`ExportError::Json`] / [`ExportError::Csv`] / [`ExportError::Xml`]
///   when rendering fails.
/// - [`ExportError::Io`] when the directory or file cannot be written.
pub fn export_ads(
    records: &[AdRecord],
    format: &str,
    destination: &Path,
) -> Result<(), ExportError> {
    let bytes = match format.to_ascii_lowercase().as_str() {
        "json" => render_json(records)?,
        "csv" => render_csv(records)?,
        "xml" => render_xml(records)?,
        _ => {
            return Err(ExportError::UnsupportedFormat {
                format: format.to_owned(),
            })
        }
    };

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(destination, &bytes)?;

    tracing::debug!(
        count = records.len(),
        format,
        destination = %destination.display(),
        bytes = bytes.len(),
        "exported ad records"
    );
    Ok(())
}
