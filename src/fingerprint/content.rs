use crate::error::{FingerprintError, Result};
use crate::types::Base;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The hashed part of a fingerprint.
///
/// Field order is the canonical serialization order: `maximum-position`,
/// the five base vectors, `EoR`, then any further keys sorted by name.
/// Counts are signed because subtracting an inconsistent snapshot must be
/// able to go below zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerprintContent {
    #[serde(rename = "maximum-position")]
    pub maximum_position: u64,
    #[serde(rename = "A")]
    pub a: Vec<i64>,
    #[serde(rename = "C")]
    pub c: Vec<i64>,
    #[serde(rename = "G")]
    pub g: Vec<i64>,
    #[serde(rename = "T")]
    pub t: Vec<i64>,
    #[serde(rename = "N")]
    pub n: Vec<i64>,
    /// End-of-read marker. Compared for equality, never interpreted.
    #[serde(rename = "EoR")]
    pub end_of_read: serde_json::Value,
    /// Keys this crate does not interpret. Hashed and carried unchanged.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl FingerprintContent {
    pub fn counts(&self, base: Base) -> &[i64] {
        match base {
            Base::A => &self.a,
            Base::C => &self.c,
            Base::G => &self.g,
            Base::T => &self.t,
            Base::N => &self.n,
        }
    }

    fn counts_mut(&mut self, base: Base) -> &mut Vec<i64> {
        match base {
            Base::A => &mut self.a,
            Base::C => &mut self.c,
            Base::G => &mut self.g,
            Base::T => &mut self.t,
            Base::N => &mut self.n,
        }
    }

    /// Number of position buckets (the shared vector length).
    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks that all five base vectors have the same length.
    pub fn validate(&self) -> Result<()> {
        let expected = self.len();
        for base in Base::ALL {
            let len = self.counts(base).len();
            if len != expected {
                return Err(FingerprintError::Precondition(format!(
                    "base {} has {} positions, base A has {}",
                    base, len, expected
                )));
            }
        }
        Ok(())
    }

    /// Same shape and markers, every count zero.
    pub fn zeroed(&self) -> Self {
        let mut zero = self.clone();
        for base in Base::ALL {
            zero.counts_mut(base).iter_mut().for_each(|count| *count = 0);
        }
        zero
    }

    /// Applies `op` position by position to each base vector of `self` and
    /// `other`. Every other key is kept from `self`. `op` answers `None` when
    /// a count would leave the `i64` range.
    pub(crate) fn zip_counts(
        &self,
        other: &Self,
        op: impl Fn(i64, i64) -> Option<i64>,
    ) -> Result<Self> {
        let mut result = self.clone();
        for base in Base::ALL {
            let lhs = self.counts(base);
            let rhs = other.counts(base);
            if lhs.len() != rhs.len() {
                return Err(FingerprintError::Precondition(format!(
                    "base {} has {} positions on the left and {} on the right",
                    base,
                    lhs.len(),
                    rhs.len()
                )));
            }
            *result.counts_mut(base) = lhs
                .iter()
                .zip(rhs)
                .enumerate()
                .map(|(position, (&x, &y))| {
                    op(x, y).ok_or_else(|| FingerprintError::Overflow {
                        base: base.symbol(),
                        position,
                    })
                })
                .collect::<Result<_>>()?;
        }
        Ok(result)
    }
}
