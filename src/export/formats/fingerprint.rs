use crate::fingerprint::{digest, Fingerprint};
use crate::types::Base;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Deserialize)]
pub struct VerificationExport {
    pub source: String,
    pub stored_digest: String,
    /// Digest of the current content; absent for a malformed record.
    pub computed_digest: Option<String>,
    pub valid: bool,
    pub maximum_position: Option<u64>,
    pub totals: BaseTotals,
}

/// Totals in reports are `i64`; anything beyond that range is pinned to
/// the nearest bound.
pub(crate) fn report_count(total: i128) -> i64 {
    total.clamp(i64::MIN.into(), i64::MAX.into()) as i64
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BaseTotals {
    pub per_base: BTreeMap<char, i64>,
    pub total_bases: i64,
}

impl BaseTotals {
    pub fn of(fp: &Fingerprint) -> Self {
        BaseTotals {
            per_base: Base::ALL
                .iter()
                .map(|&b| (b.symbol(), report_count(fp.total_of(b))))
                .collect(),
            total_bases: report_count(fp.total_bases()),
        }
    }
}

impl From<&Fingerprint> for VerificationExport {
    fn from(fp: &Fingerprint) -> Self {
        VerificationExport {
            source: fp.provenance().to_string(),
            stored_digest: fp.digest().to_string(),
            computed_digest: fp
                .content()
                .map(|_| digest::sha256_hex(&fp.serialize_canonical())),
            valid: fp.check_digest(),
            maximum_position: fp.max_position().ok(),
            totals: BaseTotals::of(fp),
        }
    }
}
