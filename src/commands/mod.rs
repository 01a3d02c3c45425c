pub mod audit;
pub mod compare;
pub mod meta_audit;
pub mod rehash;
pub mod verify;

use anyhow::{Context, Result};
use fingerprint_qc::export::{ReportData, ReportExport};
use fingerprint_qc::fingerprint::Fingerprint;
use fingerprint_qc::types::ReportFormat;
use std::fmt::Display;

/// Command-line stand-in for "no fingerprint".
pub(crate) const ABSENT: &str = "-";

pub(crate) fn load(path: &str) -> Result<Fingerprint> {
    Fingerprint::load_from_file(path).with_context(|| format!("Failed to load fingerprint {}", path))
}

pub(crate) fn load_optional(path: Option<&str>) -> Result<Option<Fingerprint>> {
    match path {
        None | Some(ABSENT) => Ok(None),
        Some(path) => load(path).map(Some),
    }
}

/// Prints the text rendering or the JSON report envelope.
pub(crate) fn print_report(
    format: ReportFormat,
    text: &dyn Display,
    data: impl FnOnce() -> ReportData,
) -> Result<()> {
    match format {
        ReportFormat::Text => print!("{}", text),
        ReportFormat::Json => {
            let json = ReportExport::new(data())
                .to_json()
                .context("Failed to serialize report")?;
            println!("{}", json);
        }
    }
    Ok(())
}
