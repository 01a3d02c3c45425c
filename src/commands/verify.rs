use super::{load, print_report};
use anyhow::{bail, Result};
use fingerprint_qc::export::formats::fingerprint::VerificationExport;
use fingerprint_qc::export::ReportData;
use fingerprint_qc::types::ReportFormat;

pub fn run(fingerprint_file: String, format: ReportFormat) -> Result<()> {
    let fp = load(&fingerprint_file)?;

    print_report(format, &fp, || {
        ReportData::Verification(VerificationExport::from(&fp))
    })?;

    if !fp.check_digest() {
        bail!("{} does not match its digest", fingerprint_file);
    }
    Ok(())
}
