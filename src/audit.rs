//! Reconciles recorded edit history against the live fingerprint.
//!
//! Each history event stores the fingerprint before the edit (`original`),
//! the contribution of the reads that were dropped (`removed`) and of the
//! reads that replaced them (`added`). Replaying
//! `original + added - removed` has to reproduce the current fingerprint.

use crate::comparator::FingerprintComparison;
use crate::config::Config;
use crate::error::Result;
use crate::fingerprint::{provenance, Fingerprint};
use crate::sources::{extract_from_meta, MetadataSource};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct HistorySnapshots {
    pub original: Option<Fingerprint>,
    pub added: Option<Fingerprint>,
    pub removed: Option<Fingerprint>,
}

#[derive(Debug, Clone)]
pub struct AuditOutcome {
    /// `original + added - removed`, labelled as an audit result.
    pub reconstructed: Fingerprint,
    /// Whether the reconstruction `equals` the current fingerprint.
    pub matches: bool,
    /// Current fingerprint (A) against the reconstruction (B).
    pub comparison: FingerprintComparison,
}

/// Replays one event. Returns `Ok(None)` when any snapshot was never recorded.
pub fn reconcile(
    snapshots: &HistorySnapshots,
    current: Option<&Fingerprint>,
) -> Result<Option<AuditOutcome>> {
    let (Some(original), Some(added), Some(removed)) =
        (&snapshots.original, &snapshots.added, &snapshots.removed)
    else {
        debug!("history snapshot missing, audit step skipped");
        return Ok(None);
    };

    let mut reconstructed = original.combine(added)?.remove(removed)?;
    reconstructed.append_provenance(provenance::AUDIT_SUFFIX);

    let matches = current.is_some_and(|current| reconstructed.equals(current));
    let comparison = FingerprintComparison::new(current, Some(&reconstructed));

    Ok(Some(AuditOutcome {
        reconstructed,
        matches,
        comparison,
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEvent(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Snapshot {
    Original,
    Added,
    Removed,
}

impl Snapshot {
    fn node_name(&self) -> &'static str {
        match self {
            Snapshot::Original => "original",
            Snapshot::Added => "added",
            Snapshot::Removed => "removed",
        }
    }
}

impl HistoryEvent {
    /// `<history_root>event_<n>/`
    pub fn metapath(&self, history_root: &str) -> String {
        format!("{}event_{}/", history_root, self.0)
    }

    pub fn snapshot_metapath(&self, history_root: &str, snapshot: Snapshot) -> String {
        format!("{}{}/", self.metapath(history_root), snapshot.node_name())
    }
}

/// Extracts an event's snapshots. When `original` is absent the other two
/// are not looked up.
pub fn load_snapshots(
    source: &dyn MetadataSource,
    accession: &str,
    event: HistoryEvent,
    history_root: &str,
) -> Result<HistorySnapshots> {
    let extract = |snapshot: Snapshot| {
        extract_from_meta(source, accession, &event.snapshot_metapath(history_root, snapshot))
    };

    let original = extract(Snapshot::Original)?;
    if original.is_none() {
        return Ok(HistorySnapshots::default());
    }
    Ok(HistorySnapshots {
        original,
        added: extract(Snapshot::Added)?,
        removed: extract(Snapshot::Removed)?,
    })
}

#[derive(Debug, Clone)]
pub struct EventAudit {
    pub event: HistoryEvent,
    /// `None` when the event lacks an `added` or `removed` snapshot.
    pub outcome: Option<AuditOutcome>,
}

#[derive(Debug, Clone)]
pub struct AccessionAudit {
    pub accession: String,
    pub current: Option<Fingerprint>,
    pub events: Vec<EventAudit>,
}

impl AccessionAudit {
    /// Every event that could be replayed reproduced the current fingerprint.
    pub fn all_passed(&self) -> bool {
        self.events
            .iter()
            .filter_map(|e| e.outcome.as_ref())
            .all(|outcome| outcome.matches)
    }

    pub fn audited(&self) -> usize {
        self.events.iter().filter(|e| e.outcome.is_some()).count()
    }
}

/// Audits every recorded history event of `accession`.
///
/// Events are numbered from 1 and the walk ends at the first event without
/// an `original` snapshot, or after `config.max_history_events`.
pub fn audit_accession(
    source: &dyn MetadataSource,
    accession: &str,
    config: &Config,
) -> Result<AccessionAudit> {
    let current = extract_from_meta(source, accession, &config.current_metapath)?;
    if current.is_none() {
        warn!("{} has no fingerprint at {}", accession, config.current_metapath);
    }

    let mut events = Vec::new();
    for n in 1..=config.max_history_events {
        let event = HistoryEvent(n);
        let snapshots = load_snapshots(source, accession, event, &config.history_metapath)?;
        if snapshots.original.is_none() {
            break;
        }

        let outcome = reconcile(&snapshots, current.as_ref())?;
        match &outcome {
            Some(outcome) => info!(
                "{} event_{}: reconstruction {}",
                accession,
                n,
                if outcome.matches { "matches" } else { "DIFFERS" }
            ),
            None => info!("{} event_{}: incomplete history, skipped", accession, n),
        }
        events.push(EventAudit { event, outcome });
    }

    Ok(AccessionAudit {
        accession: accession.to_string(),
        current,
        events,
    })
}

#[derive(Debug, Clone)]
pub struct QualityCheck {
    pub equal: bool,
    pub comparison: FingerprintComparison,
}

/// Stored fingerprint against one recomputed from the reads.
pub fn quality_check(stored: Option<&Fingerprint>, computed: Option<&Fingerprint>) -> QualityCheck {
    let equal = match (stored, computed) {
        (Some(stored), Some(computed)) => stored.equals(computed),
        _ => false,
    };
    QualityCheck {
        equal,
        comparison: FingerprintComparison::new(stored, computed),
    }
}
