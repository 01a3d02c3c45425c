use super::print_report;
use anyhow::{bail, Context, Result};
use fingerprint_qc::audit::audit_accession;
use fingerprint_qc::config::Config;
use fingerprint_qc::export::formats::audit::AuditExport;
use fingerprint_qc::export::ReportData;
use fingerprint_qc::sources::StaticMetadata;
use fingerprint_qc::types::ReportFormat;
use std::fmt::Write;

pub fn run(dump: String, accession: String, config: &Config, format: ReportFormat) -> Result<()> {
    let metadata = StaticMetadata::load(&dump)
        .with_context(|| format!("Failed to load metadata dump {}", dump))?;
    metadata.require(&accession)?;
    let audit = audit_accession(&metadata, &accession, config)?;

    let mut text = String::new();
    match &audit.current {
        Some(current) => write!(text, "{}", current)?,
        None => writeln!(text, "{}: no current fingerprint", accession)?,
    }
    if audit.events.is_empty() {
        writeln!(text, "no history events recorded")?;
    }
    for event in &audit.events {
        match &event.outcome {
            Some(outcome) => {
                writeln!(text, "\nevent_{}", event.event.0)?;
                write!(text, "{}", outcome.comparison)?;
                writeln!(text, "reconstruction matches current: {}", outcome.matches)?;
            }
            None => writeln!(text, "\nevent_{}: incomplete, skipped", event.event.0)?,
        }
    }

    print_report(format, &text, || ReportData::Audit(AuditExport::from(&audit)))?;

    if !audit.all_passed() {
        bail!("history audit of {} failed", accession);
    }
    Ok(())
}
