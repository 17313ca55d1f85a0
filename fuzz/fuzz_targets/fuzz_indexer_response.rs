#![no_main]

use conviction_analytics::{aggregate, classify};
use conviction_indexer::{decode_edges_page, decode_track_snapshot};
use conviction_types::Address;
use libfuzzer_sys::fuzz_target;

// Arbitrary indexer bodies must decode or fail cleanly, and anything that
// decodes must flow through classification and aggregation.
fuzz_target!(|data: &[u8]| {
    if let Ok((edges, raw_len)) = decode_edges_page(data, None) {
        assert!(edges.len() <= raw_len);
        let analytics = aggregate(&edges);
        assert!(analytics.total_delegates <= edges.len());
        assert!(analytics.total_delegators <= edges.len());
    }

    if let Ok(snapshot) = decode_track_snapshot(data, 0) {
        let subject = snapshot
            .edges
            .first()
            .map(|e| e.from.clone())
            .unwrap_or_else(|| Address::new(""));
        let status = classify(&subject, 0, snapshot.edges, |a| a.clone());
        assert!(!status.status.is_empty());
    }
});
