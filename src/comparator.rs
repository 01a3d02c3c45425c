//! Field-by-field comparison of two fingerprints, either of which may be absent.

use crate::fingerprint::Fingerprint;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ABSENT_SOURCE: &str = "None";

/// Which aspects of two fingerprints agree.
///
/// Every equality is evaluated on its own, so a digest mismatch still tells
/// whether the totals, `EoR` or maximum position moved as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintComparison {
    pub a_source: String,
    pub b_source: String,
    pub a_valid: bool,
    pub b_valid: bool,
    pub equal_digest: bool,
    pub equal_eor: bool,
    pub equal_bases: bool,
    pub equal_maxpos: bool,
}

fn describe(fp: Option<&Fingerprint>) -> (String, bool) {
    match fp {
        Some(fp) => (fp.provenance().to_string(), fp.check_digest()),
        None => (ABSENT_SOURCE.to_string(), false),
    }
}

impl FingerprintComparison {
    pub fn new(a: Option<&Fingerprint>, b: Option<&Fingerprint>) -> Self {
        let (a_source, a_valid) = describe(a);
        let (b_source, b_valid) = describe(b);

        let mut comparison = FingerprintComparison {
            a_source,
            b_source,
            a_valid,
            b_valid,
            equal_digest: false,
            equal_eor: false,
            equal_bases: false,
            equal_maxpos: false,
        };

        if let (Some(a), Some(b)) = (a, b) {
            comparison.equal_digest = a.digest() == b.digest();
            // An empty record has no EoR or maximum position to agree on.
            comparison.equal_eor = match (a.end_of_read(), b.end_of_read()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            };
            comparison.equal_bases = a.total_bases() == b.total_bases();
            comparison.equal_maxpos = match (a.max_position(), b.max_position()) {
                (Ok(x), Ok(y)) => x == y,
                _ => false,
            };
        }

        comparison
    }

    pub fn all_equal(&self) -> bool {
        self.equal_digest && self.equal_eor && self.equal_bases && self.equal_maxpos
    }

    /// Both sides verify and agree on every compared field.
    pub fn is_consistent(&self) -> bool {
        self.a_valid && self.b_valid && self.all_equal()
    }

    /// The report as ordered key/value pairs.
    pub fn report(&self) -> Vec<(&'static str, String)> {
        vec![
            ("A", self.a_source.clone()),
            ("B", self.b_source.clone()),
            ("A_valid", self.a_valid.to_string()),
            ("B_valid", self.b_valid.to_string()),
            ("equal digest", self.equal_digest.to_string()),
            ("equal EoR", self.equal_eor.to_string()),
            ("equal bases", self.equal_bases.to_string()),
            ("equal maxpos", self.equal_maxpos.to_string()),
        ]
    }
}

impl fmt::Display for FingerprintComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report();
        let width = report.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
        for (key, value) in report {
            writeln!(f, "{:<width$} : {}", key, value, width = width)?;
        }
        Ok(())
    }
}
