use super::fingerprint::report_count;
use crate::comparator::FingerprintComparison;
use crate::fingerprint::Fingerprint;
use crate::types::Base;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Deserialize)]
pub struct ComparisonExport {
    #[serde(flatten)]
    pub comparison: FingerprintComparison,
    pub consistent: bool,
    /// Per-base `A - B` totals, only when both sides are present.
    pub base_diff: Option<BaseDiff>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BaseDiff {
    pub per_base: BTreeMap<char, i64>,
    /// Sum over A, C, G and T.
    pub total_diff: i64,
}

impl ComparisonExport {
    pub fn new(a: Option<&Fingerprint>, b: Option<&Fingerprint>) -> Self {
        Self::from_comparison(FingerprintComparison::new(a, b), a, b)
    }

    pub fn from_comparison(
        comparison: FingerprintComparison,
        a: Option<&Fingerprint>,
        b: Option<&Fingerprint>,
    ) -> Self {
        let base_diff = match (a, b) {
            (Some(a), Some(b)) => Some(BaseDiff {
                per_base: Base::ALL
                    .iter()
                    .map(|&base| (base.symbol(), report_count(a.diff(b, base))))
                    .collect(),
                total_diff: report_count(a.total_diff(b)),
            }),
            _ => None,
        };
        ComparisonExport {
            consistent: comparison.is_consistent(),
            comparison,
            base_diff,
        }
    }
}
