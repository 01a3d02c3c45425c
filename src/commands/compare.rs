use super::{load_optional, print_report};
use anyhow::Result;
use fingerprint_qc::comparator::FingerprintComparison;
use fingerprint_qc::export::formats::comparison::ComparisonExport;
use fingerprint_qc::export::ReportData;
use fingerprint_qc::types::ReportFormat;

pub fn run(a_file: String, b_file: String, format: ReportFormat) -> Result<()> {
    let a = load_optional(Some(a_file.as_str()))?;
    let b = load_optional(Some(b_file.as_str()))?;

    let comparison = FingerprintComparison::new(a.as_ref(), b.as_ref());
    let mut text = comparison.to_string();
    if let (Some(a), Some(b)) = (&a, &b) {
        text.push_str(&format!("total diff   : {}\n", a.total_diff(b)));
    }

    print_report(format, &text, || {
        ReportData::Comparison(ComparisonExport::from_comparison(
            comparison.clone(),
            a.as_ref(),
            b.as_ref(),
        ))
    })
}
