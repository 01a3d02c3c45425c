use fingerprint_qc::audit::{audit_accession, reconcile, HistorySnapshots};
use fingerprint_qc::config::Config;
use fingerprint_qc::sources::{extract_from_meta, StaticMetadata};
use fingerprint_qc::types::Base;
use fingerprint_qc::{Fingerprint, FingerprintComparison, FingerprintContent};
use pretty_assertions::assert_eq;
use serde_json::json;

fn snapshot(a: Vec<i64>, source: &str) -> Fingerprint {
    let content = FingerprintContent {
        maximum_position: 2,
        a,
        c: vec![0, 0],
        g: vec![0, 0],
        t: vec![0, 0],
        n: vec![0, 0],
        end_of_read: json!(1),
        extra: Default::default(),
    };
    Fingerprint::from_parts(content, source).unwrap()
}

#[test]
fn replaying_an_edit_reproduces_the_live_fingerprint() {
    let original = snapshot(vec![1, 2], "original");
    let added = snapshot(vec![0, 1], "added");
    let removed = snapshot(vec![0, 0], "removed");
    let live = snapshot(vec![1, 3], "live");

    let replayed = original.combine(&added).unwrap().remove(&removed).unwrap();
    assert_eq!(replayed.content().unwrap().a, vec![1, 3]);
    assert!(replayed.check_digest());
    assert!(replayed.equals(&live));
    assert_eq!(replayed.total_of(Base::A), 4);

    let outcome = reconcile(
        &HistorySnapshots {
            original: Some(original),
            added: Some(added),
            removed: Some(removed),
        },
        Some(&live),
    )
    .unwrap()
    .unwrap();
    assert!(outcome.matches);
    assert_eq!(outcome.reconstructed.provenance(), "original ... history audit");
    assert_eq!(outcome.comparison.a_source, "live");
}

#[test]
fn inconsistent_history_goes_negative() {
    let original = snapshot(vec![1, 2], "original");
    let added = snapshot(vec![0, 0], "added");
    let removed = snapshot(vec![2, 0], "removed");

    let outcome = reconcile(
        &HistorySnapshots {
            original: Some(original.clone()),
            added: Some(added),
            removed: Some(removed),
        },
        Some(&original),
    )
    .unwrap()
    .unwrap();

    assert_eq!(outcome.reconstructed.content().unwrap().a, vec![-1, 2]);
    assert!(outcome.reconstructed.check_digest());
    assert!(!outcome.matches);
    assert!(!outcome.comparison.equal_digest);
    assert!(!outcome.comparison.equal_bases);
    assert!(outcome.comparison.equal_maxpos);
}

#[test]
fn comparing_against_nothing() {
    let present = snapshot(vec![4, 4], "meta");
    let cmp = FingerprintComparison::new(None, Some(&present));
    assert!(!cmp.a_valid);
    assert!(cmp.b_valid);
    assert!(!cmp.equal_digest);
    assert!(!cmp.equal_eor);
    assert!(!cmp.equal_bases);
    assert!(!cmp.equal_maxpos);

    let broken = Fingerprint::from_content(json!({"fingerprint": null}), "broken");
    let cmp = FingerprintComparison::new(None, Some(&broken));
    assert!(!cmp.a_valid && !cmp.b_valid);
    assert!(!cmp.all_equal());
}

fn store(meta: &mut StaticMetadata, accession: &str, metapath: &str, fp: &Fingerprint) {
    meta.insert(
        accession,
        format!("{}fingerprint", metapath),
        format!("<fingerprint>\n'{}'\n</fingerprint>\n", fp.serialize_canonical()),
    );
    meta.insert(
        accession,
        format!("{}digest", metapath),
        format!("<digest>'{}'</digest>\n", fp.digest()),
    );
}

#[test]
fn metadata_dump_audit() {
    let mut meta = StaticMetadata::new();
    store(&mut meta, "SRR5000001", "QC/current/", &snapshot(vec![1, 3], "live"));
    store(&mut meta, "SRR5000001", "QC/history/event_1/original/", &snapshot(vec![1, 2], "o"));
    store(&mut meta, "SRR5000001", "QC/history/event_1/added/", &snapshot(vec![0, 1], "a"));
    store(&mut meta, "SRR5000001", "QC/history/event_1/removed/", &snapshot(vec![0, 0], "r"));

    let current = extract_from_meta(&meta, "SRR5000001", "QC/current/")
        .unwrap()
        .unwrap();
    assert!(current.check_digest());
    assert_eq!(current.provenance(), "acc:SRR5000001 (meta)");

    let audit = audit_accession(&meta, "SRR5000001", &Config::default()).unwrap();
    assert_eq!(audit.events.len(), 1);
    assert_eq!(audit.audited(), 1);
    assert!(audit.all_passed());

    let outcome = audit.events[0].outcome.as_ref().unwrap();
    assert_eq!(
        outcome.reconstructed.provenance(),
        "acc:SRR5000001 (meta) ... history audit"
    );

    // an accession without history passes trivially
    let audit = audit_accession(&meta, "SRR0000000", &Config::default()).unwrap();
    assert!(audit.current.is_none());
    assert!(audit.events.is_empty());
}
