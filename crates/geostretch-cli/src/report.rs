//! Diagnostics printed after a successful conversion.

use geostretch_core::ConversionReport;

/// The four plain-text diagnostic lines.
pub fn format_report(report: &ConversionReport) -> String {
    let (rows, columns, channels) = report.shape();
    format!(
        "Saved 8-bit image as: {}\nImage shape: ({}, {}, {})\nImage dtype: {}\nNumber of bands: {}",
        report.output.display(),
        rows,
        columns,
        channels,
        report.dtype,
        report.source_band_count
    )
}

pub fn format_report_json(report: &ConversionReport) -> Result<String, String> {
    serde_json::to_string_pretty(report).map_err(|e| format!("Failed to serialize report: {}", e))
}
