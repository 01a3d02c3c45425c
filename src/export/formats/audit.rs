use crate::audit::{AccessionAudit, AuditOutcome};
use crate::comparator::FingerprintComparison;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct AuditExport {
    pub accession: Option<String>,
    pub current_source: Option<String>,
    pub events: Vec<EventExport>,
    pub all_passed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EventExport {
    /// History event number; absent for an audit run on loose files.
    pub event: Option<u32>,
    pub skipped: bool,
    pub matches: Option<bool>,
    pub reconstructed_digest: Option<String>,
    pub comparison: Option<FingerprintComparison>,
}

impl EventExport {
    pub fn new(event: Option<u32>, outcome: Option<&AuditOutcome>) -> Self {
        EventExport {
            event,
            skipped: outcome.is_none(),
            matches: outcome.map(|o| o.matches),
            reconstructed_digest: outcome.map(|o| o.reconstructed.digest().to_string()),
            comparison: outcome.map(|o| o.comparison.clone()),
        }
    }
}

impl From<&AccessionAudit> for AuditExport {
    fn from(audit: &AccessionAudit) -> Self {
        AuditExport {
            accession: Some(audit.accession.clone()),
            current_source: audit.current.as_ref().map(|fp| fp.provenance().to_string()),
            events: audit
                .events
                .iter()
                .map(|e| EventExport::new(Some(e.event.0), e.outcome.as_ref()))
                .collect(),
            all_passed: audit.all_passed(),
        }
    }
}

impl AuditExport {
    /// A single reconciliation of snapshot files.
    pub fn single(current_source: Option<String>, outcome: Option<&AuditOutcome>) -> Self {
        AuditExport {
            accession: None,
            current_source,
            events: vec![EventExport::new(None, outcome)],
            all_passed: outcome.map_or(true, |o| o.matches),
        }
    }
}
