//! Seams to the tools that produce and store fingerprints.
//!
//! Running those tools is the caller's business. This module defines what
//! they hand back and turns that text into [`Fingerprint`] records.

use crate::error::{FingerprintError, Result};
use crate::fingerprint::{provenance, Fingerprint};
use crate::utils::leaf_text::extract_leaf_text;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Computes a fingerprint from an accession's reads.
pub trait ReadStatsSource {
    /// JSON fingerprint text, or `None` when the tool produced nothing.
    fn produce(&self, accession: &str) -> Result<Option<String>>;
}

/// Reads single nodes out of an accession's metadata tree.
pub trait MetadataSource {
    /// XML text of the node at `query`, or `None` when there is no such node.
    fn meta_node(&self, accession: &str, query: &str) -> Result<Option<String>>;
}

pub fn compute_from_reads(
    source: &dyn ReadStatsSource,
    accession: &str,
) -> Result<Option<Fingerprint>> {
    match source.produce(accession)? {
        Some(text) => Fingerprint::parse(&text, provenance::computed(accession)).map(Some),
        None => {
            debug!("no computed fingerprint for {}", accession);
            Ok(None)
        }
    }
}

/// Joins the `fingerprint` and `digest` nodes under `metapath` into the
/// document layout understood by [`Fingerprint::parse`].
///
/// The stored values are single-quoted; the fingerprint loses its quotes and
/// the digest's quotes become JSON double quotes.
pub fn extract_from_meta(
    source: &dyn MetadataSource,
    accession: &str,
    metapath: &str,
) -> Result<Option<Fingerprint>> {
    let Some(data) = source.meta_node(accession, &format!("{}fingerprint", metapath))? else {
        debug!("no fingerprint node at {}fingerprint for {}", metapath, accession);
        return Ok(None);
    };
    let fingerprint = extract_leaf_text(&data)?;
    let fingerprint = fingerprint.trim_matches('\'');

    let Some(digest) = source.meta_node(accession, &format!("{}digest", metapath))? else {
        debug!("no digest node at {}digest for {}", metapath, accession);
        return Ok(None);
    };
    let digest = extract_leaf_text(&digest)?.replace('\'', "\"");

    let text = format!(
        "{{\n\"fingerprint\":{},\n\"fingerprint-digest\":{}\n}}",
        fingerprint, digest
    );
    Fingerprint::parse(&text, provenance::meta(accession)).map(Some)
}

/// Metadata nodes fetched ahead of time, keyed by accession then query path.
#[derive(Debug, Default, Clone)]
pub struct StaticMetadata {
    nodes: BTreeMap<String, BTreeMap<String, String>>,
}

impl StaticMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        accession: impl Into<String>,
        query: impl Into<String>,
        xml: impl Into<String>,
    ) {
        self.nodes
            .entry(accession.into())
            .or_default()
            .insert(query.into(), xml.into());
    }

    /// Parses a dump of the form `{"<accession>": {"<query>": "<xml>"}}`.
    pub fn from_json(text: &str) -> Result<Self> {
        let nodes = serde_json::from_str(text)
            .map_err(|e| FingerprintError::parse("metadata dump", e))?;
        Ok(StaticMetadata { nodes })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| FingerprintError::io(path, e))?;
        Self::from_json(&text)
    }

    pub fn accessions(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Fails with the list of known accessions when `accession` has no
    /// nodes in the dump at all.
    pub fn require(&self, accession: &str) -> Result<()> {
        if self.nodes.contains_key(accession) {
            return Ok(());
        }
        let known: Vec<&str> = self.accessions().collect();
        Err(FingerprintError::Source(format!(
            "accession {} is not in the metadata dump (dump has: {})",
            accession,
            if known.is_empty() { "nothing".to_string() } else { known.join(", ") }
        )))
    }
}

impl MetadataSource for StaticMetadata {
    fn meta_node(&self, accession: &str, query: &str) -> Result<Option<String>> {
        Ok(self
            .nodes
            .get(accession)
            .and_then(|nodes| nodes.get(query))
            .cloned())
    }
}
