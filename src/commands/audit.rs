use super::{load_optional, print_report};
use anyhow::{bail, Result};
use fingerprint_qc::audit::{reconcile, HistorySnapshots};
use fingerprint_qc::export::formats::audit::AuditExport;
use fingerprint_qc::export::ReportData;
use fingerprint_qc::types::ReportFormat;

pub fn run(
    original: Option<String>,
    added: Option<String>,
    removed: Option<String>,
    current: Option<String>,
    format: ReportFormat,
) -> Result<()> {
    let snapshots = HistorySnapshots {
        original: load_optional(original.as_deref())?,
        added: load_optional(added.as_deref())?,
        removed: load_optional(removed.as_deref())?,
    };
    let current = load_optional(current.as_deref())?;

    let outcome = reconcile(&snapshots, current.as_ref())?;

    let text = match &outcome {
        Some(outcome) => format!(
            "{}reconstruction matches current: {}\n",
            outcome.comparison, outcome.matches
        ),
        None => "history incomplete, audit skipped\n".to_string(),
    };
    print_report(format, &text, || {
        ReportData::Audit(AuditExport::single(
            current.as_ref().map(|fp| fp.provenance().to_string()),
            outcome.as_ref(),
        ))
    })?;

    if let Some(outcome) = &outcome {
        if !outcome.matches {
            bail!("history replay does not reproduce the current fingerprint");
        }
    }
    Ok(())
}
