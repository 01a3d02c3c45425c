//! The fingerprint record: per-position base counts bound to a SHA-256 digest.

pub mod content;
pub mod digest;

pub use content::FingerprintContent;

use crate::error::{FingerprintError, Result};
use crate::types::Base;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// On-disk and on-wire layout: the content plus its digest.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct FingerprintDocument {
    fingerprint: FingerprintContent,
    #[serde(rename = "fingerprint-digest")]
    digest: String,
}

pub mod provenance {
    pub const FROM_STRING: &str = "from string";
    pub const AUDIT_SUFFIX: &str = " ... history audit";

    pub fn file(path: &std::path::Path) -> String {
        format!("file:{}", path.display())
    }

    pub fn computed(accession: &str) -> String {
        format!("acc:{} (computed)", accession)
    }

    pub fn meta(accession: &str) -> String {
        format!("acc:{} (meta)", accession)
    }
}

/// A fingerprint as loaded from some source.
///
/// The record may be invalid: malformed input produces an empty record whose
/// digest never checks out, so comparisons can treat it like any other.
#[derive(Debug, Clone)]
pub struct Fingerprint {
    content: Option<FingerprintContent>,
    digest: String,
    provenance: String,
}

impl Fingerprint {
    fn invalid(provenance: String) -> Self {
        Fingerprint {
            content: None,
            digest: String::new(),
            provenance,
        }
    }

    /// Wraps already-parsed JSON. Missing or mistyped keys and unequal vector
    /// lengths yield an empty, invalid record instead of an error.
    pub fn from_content(data: serde_json::Value, provenance: impl Into<String>) -> Self {
        let provenance = provenance.into();
        let document = match serde_json::from_value::<FingerprintDocument>(data) {
            Ok(document) => document,
            Err(e) => {
                warn!("malformed fingerprint from {}: {}", provenance, e);
                return Self::invalid(provenance);
            }
        };
        if let Err(e) = document.fingerprint.validate() {
            warn!("malformed fingerprint from {}: {}", provenance, e);
            return Self::invalid(provenance);
        }

        Fingerprint {
            content: Some(document.fingerprint),
            digest: document.digest,
            provenance,
        }
    }

    /// Builds a self-consistent record from content, computing its digest.
    pub fn from_parts(content: FingerprintContent, provenance: impl Into<String>) -> Result<Self> {
        content.validate()?;
        let mut fp = Fingerprint {
            content: Some(content),
            digest: String::new(),
            provenance: provenance.into(),
        };
        fp.update_digest();
        Ok(fp)
    }

    /// Parses JSON text. Text that is not JSON at all is an error; JSON of the
    /// wrong shape is an invalid record.
    pub fn parse(text: &str, provenance: impl Into<String>) -> Result<Self> {
        let provenance = provenance.into();
        let data: serde_json::Value =
            serde_json::from_str(text).map_err(|e| FingerprintError::parse(provenance.clone(), e))?;
        Ok(Self::from_content(data, provenance))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| FingerprintError::io(path, e))?;
        Self::parse(&text, provenance::file(path))
    }

    pub fn content(&self) -> Option<&FingerprintContent> {
        self.content.as_ref()
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn provenance(&self) -> &str {
        &self.provenance
    }

    pub fn end_of_read(&self) -> Option<&serde_json::Value> {
        self.content.as_ref().map(|c| &c.end_of_read)
    }

    pub fn append_provenance(&mut self, suffix: &str) {
        self.provenance.push_str(suffix);
    }

    /// Compact JSON of the content, the exact text the digest is taken over.
    pub fn serialize_canonical(&self) -> String {
        match &self.content {
            // Plain integers and an already-parsed JSON value always serialize.
            Some(content) => serde_json::to_string(content).unwrap_or_default(),
            None => "{}".to_string(),
        }
    }

    pub fn check_digest(&self) -> bool {
        if self.content.is_none() {
            return false;
        }
        let computed = digest::sha256_hex(&self.serialize_canonical());
        if computed != self.digest {
            debug!(
                "digest mismatch for {}: stored '{}', computed '{}'",
                self.provenance, self.digest, computed
            );
            return false;
        }
        true
    }

    pub fn is_valid(&self) -> bool {
        self.check_digest()
    }

    /// Recomputes the stored digest from the current content.
    pub fn update_digest(&mut self) {
        self.digest = match self.content {
            Some(_) => digest::sha256_hex(&self.serialize_canonical()),
            None => String::new(),
        };
        debug!("digest of {} set to {}", self.provenance, self.digest);
    }

    fn arithmetic(
        &self,
        other: &Fingerprint,
        op: impl Fn(i64, i64) -> Option<i64>,
    ) -> Result<Self> {
        let lhs = self.content.as_ref().ok_or(FingerprintError::MissingField("fingerprint"))?;
        let rhs = other.content.as_ref().ok_or(FingerprintError::MissingField("fingerprint"))?;
        let content = lhs.zip_counts(rhs, op)?;
        let mut result = Fingerprint {
            content: Some(content),
            digest: String::new(),
            provenance: self.provenance.clone(),
        };
        result.update_digest();
        Ok(result)
    }

    /// Element-wise sum of the base vectors. The result carries `self`'s
    /// provenance and a freshly computed digest.
    pub fn combine(&self, other: &Fingerprint) -> Result<Self> {
        self.arithmetic(other, i64::checked_add)
    }

    /// Element-wise difference of the base vectors. Counts are not clamped;
    /// a negative count means the inputs disagree.
    pub fn remove(&self, other: &Fingerprint) -> Result<Self> {
        self.arithmetic(other, i64::checked_sub)
    }

    /// Integrity-aware equality: both records verify and carry the same digest.
    pub fn equals(&self, other: &Fingerprint) -> bool {
        self.check_digest() && other.check_digest() && self.digest == other.digest
    }

    /// Sum of one base's counts; zero for an empty record. Totals are
    /// widened to `i128` so no count vector can overflow them.
    pub fn total_of(&self, base: Base) -> i128 {
        self.content
            .as_ref()
            .map_or(0, |c| c.counts(base).iter().map(|&n| i128::from(n)).sum())
    }

    pub fn total_bases(&self) -> i128 {
        Base::ALL.iter().map(|&b| self.total_of(b)).sum()
    }

    pub fn diff(&self, other: &Fingerprint, base: Base) -> i128 {
        self.total_of(base) - other.total_of(base)
    }

    /// Difference of the A, C, G and T totals. `N` does not count.
    pub fn total_diff(&self, other: &Fingerprint) -> i128 {
        Base::CALLED.iter().map(|&b| self.diff(other, b)).sum()
    }

    pub fn max_position(&self) -> Result<u64> {
        self.content
            .as_ref()
            .map(|c| c.maximum_position)
            .ok_or(FingerprintError::MissingField("maximum-position"))
    }

    /// The persisted form, canonicalized like the digest input so a written
    /// file reloads with a passing digest check.
    pub fn to_document(&self) -> String {
        format!(
            "{{\n    \"fingerprint\":{},\n    \"fingerprint-digest\":\"{}\"\n}}",
            self.serialize_canonical(),
            self.digest
        )
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_document()).map_err(|e| FingerprintError::io(path, e))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "source  : {}", self.provenance)?;
        writeln!(f, "digest  : {}", self.digest)?;
        writeln!(f, "valid   : {}", self.check_digest())?;
        for base in Base::ALL {
            writeln!(f, "total {} : {}", base, self.total_of(base))?;
        }
        writeln!(f, "total   : {}", self.total_bases())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn content(a: Vec<i64>) -> FingerprintContent {
        let zeros = vec![0; a.len()];
        FingerprintContent {
            maximum_position: a.len() as u64,
            a,
            c: zeros.clone(),
            g: zeros.clone(),
            t: zeros.clone(),
            n: zeros,
            end_of_read: json!(1),
            extra: Default::default(),
        }
    }

    fn fingerprint(a: Vec<i64>) -> Fingerprint {
        Fingerprint::from_parts(content(a), "test").unwrap()
    }

    #[test]
    fn test_from_parts_is_valid() {
        let fp = fingerprint(vec![1, 2]);
        assert!(fp.check_digest());
        assert_eq!(fp.digest().len(), 64);
        assert_eq!(fp.digest(), digest::sha256_hex(&fp.serialize_canonical()));
    }

    #[test]
    fn test_malformed_content_is_invalid_record() {
        let fp = Fingerprint::from_content(json!({"fingerprint-digest": "abc"}), "broken");
        assert!(fp.content().is_none());
        assert_eq!(fp.digest(), "");
        assert!(!fp.check_digest());
        assert_eq!(fp.provenance(), "broken");
        assert!(matches!(
            fp.max_position(),
            Err(FingerprintError::MissingField("maximum-position"))
        ));
        assert_eq!(fp.total_bases(), 0);
    }

    #[test]
    fn test_unequal_lengths_are_malformed() {
        let mut bad = serde_json::to_value(content(vec![1, 2])).unwrap();
        bad["N"] = json!([0]);
        let fp = Fingerprint::from_content(json!({"fingerprint": bad, "fingerprint-digest": ""}), "x");
        assert!(fp.content().is_none());
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = Fingerprint::parse("{not json", "from string").unwrap_err();
        assert!(matches!(err, FingerprintError::Parse { .. }));
    }

    #[test]
    fn test_update_digest_on_empty_record() {
        let mut fp = Fingerprint::from_content(json!([]), "empty");
        fp.update_digest();
        assert_eq!(fp.digest(), "");
        assert!(!fp.is_valid());
    }

    #[test]
    fn test_combine_and_remove() {
        let lhs = fingerprint(vec![1, 2]);
        let rhs = Fingerprint::from_parts(content(vec![0, 5]), "other").unwrap();

        let sum = lhs.combine(&rhs).unwrap();
        assert_eq!(sum.content().unwrap().a, vec![1, 7]);
        assert_eq!(sum.provenance(), "test");
        assert!(sum.check_digest());

        let diff = lhs.remove(&rhs).unwrap();
        assert_eq!(diff.content().unwrap().a, vec![1, -3]);
        assert_eq!(diff.total_of(Base::A), -2);
        assert!(diff.check_digest());

        // operands untouched
        assert_eq!(lhs.content().unwrap().a, vec![1, 2]);
        assert!(lhs.check_digest());
    }

    #[test]
    fn test_combine_length_mismatch() {
        let err = fingerprint(vec![1, 2]).combine(&fingerprint(vec![1, 2, 3])).unwrap_err();
        assert!(matches!(err, FingerprintError::Precondition(_)));
    }

    #[test]
    fn test_combine_with_empty_record() {
        let empty = Fingerprint::from_content(json!({}), "empty");
        let err = fingerprint(vec![1]).combine(&empty).unwrap_err();
        assert!(matches!(err, FingerprintError::MissingField("fingerprint")));
    }

    #[test]
    fn test_arithmetic_at_i64_bounds() {
        let big = fingerprint(vec![i64::MAX, 1]);
        let err = big.combine(&big).unwrap_err();
        assert!(matches!(err, FingerprintError::Overflow { base: 'A', position: 0 }));

        let low = fingerprint(vec![0, i64::MIN]);
        let err = low.remove(&fingerprint(vec![0, 1])).unwrap_err();
        assert!(matches!(err, FingerprintError::Overflow { base: 'A', position: 1 }));

        // the exact bounds are still reachable
        let edge = fingerprint(vec![i64::MAX - 1, i64::MIN + 1]);
        let sum = edge.combine(&fingerprint(vec![1, -1])).unwrap();
        assert_eq!(sum.content().unwrap().a, vec![i64::MAX, i64::MIN]);
        assert!(sum.check_digest());
    }

    #[test]
    fn test_totals_do_not_overflow() {
        let big = fingerprint(vec![i64::MAX, i64::MAX, i64::MAX]);
        assert_eq!(big.total_of(Base::A), 3 * i128::from(i64::MAX));
        assert_eq!(big.total_bases(), 3 * i128::from(i64::MAX));

        let low = fingerprint(vec![i64::MIN, i64::MIN]);
        assert_eq!(big.diff(&low, Base::A), 3 * i128::from(i64::MAX) - 2 * i128::from(i64::MIN));
        assert_eq!(low.total_diff(&big), big.total_diff(&low) * -1);
    }

    #[test]
    fn test_extra_content_keys_are_hashed() {
        let mut data = serde_json::to_value(content(vec![2, 2])).unwrap();
        data["read-count"] = json!(4);
        let canonical = r#"{"maximum-position":2,"A":[2,2],"C":[0,0],"G":[0,0],"T":[0,0],"N":[0,0],"EoR":1,"read-count":4}"#;
        let document = json!({"fingerprint": data, "fingerprint-digest": digest::sha256_hex(canonical)});

        let fp = Fingerprint::from_content(document, "extra");
        assert_eq!(fp.serialize_canonical(), canonical);
        assert!(fp.check_digest());
        assert!(!fp.equals(&fingerprint(vec![2, 2])));

        // extra keys ride along through arithmetic
        let sum = fp.combine(&fingerprint(vec![1, 1])).unwrap();
        assert_eq!(sum.content().unwrap().extra["read-count"], json!(4));
        assert!(sum.check_digest());
    }

    #[test]
    fn test_equals_requires_valid_digests() {
        let a = fingerprint(vec![3, 4]);
        let b = Fingerprint::from_parts(content(vec![3, 4]), "elsewhere").unwrap();
        assert!(a.equals(&b));

        let mut corrupted = b.clone();
        corrupted.digest = "0".repeat(64);
        assert!(!a.equals(&corrupted));
        assert!(!corrupted.equals(&a));
        assert!(!corrupted.equals(&corrupted));
    }

    #[test]
    fn test_totals_and_diffs() {
        let mut c = content(vec![1, 2]);
        c.c = vec![3, 0];
        c.n = vec![5, 5];
        let a = Fingerprint::from_parts(c, "a").unwrap();
        let b = fingerprint(vec![1, 1]);

        assert_eq!(a.total_of(Base::A), 3);
        assert_eq!(a.total_of(Base::N), 10);
        assert_eq!(a.total_bases(), 16);
        assert_eq!(a.diff(&b, Base::A), 1);
        assert_eq!(a.diff(&b, Base::C), 3);
        assert_eq!(a.total_diff(&b), 4);
    }

    #[test]
    fn test_document_reparses() {
        let fp = fingerprint(vec![9, 8]);
        let reloaded = Fingerprint::parse(&fp.to_document(), provenance::FROM_STRING).unwrap();
        assert_eq!(reloaded.content(), fp.content());
        assert!(reloaded.check_digest());
        assert!(reloaded.equals(&fp));
    }

    #[test]
    fn test_display_summary() {
        let text = fingerprint(vec![1, 2]).to_string();
        assert!(text.contains("source  : test"));
        assert!(text.contains("valid   : true"));
        assert!(text.contains("total A : 3"));
        assert!(text.ends_with("total   : 3\n"));
    }
}
