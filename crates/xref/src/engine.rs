use std::collections::BTreeSet;

use tracing::info;

use crate::config::XrefConfig;
use crate::model::{
    NamedRecord, OverlapRecord, SourceIndex, SourceStats, XrefMeta, XrefResult, XrefSummary,
};
use crate::normalize::title_case;

/// Names present in two or more sources.
///
/// Membership is exact canonical-key equality; the fuzzy matcher is never
/// consulted. `indexes` order is registration order: it orders each
/// overlap's labels and decides whose spelling becomes the display name.
pub fn cross_reference(indexes: &[SourceIndex]) -> Vec<OverlapRecord> {
    let all_keys: BTreeSet<&str> = indexes.iter().flat_map(|idx| idx.keys()).collect();

    let mut overlaps: Vec<OverlapRecord> = all_keys
        .into_iter()
        .filter_map(|key| {
            let sources: Vec<String> = indexes
                .iter()
                .filter(|idx| idx.contains_key(key))
                .map(|idx| idx.label().to_string())
                .collect();
            if sources.len() < 2 {
                return None;
            }
            Some(OverlapRecord {
                name: display_name(indexes, key),
                source_count: sources.len(),
                sources,
            })
        })
        .collect();

    overlaps.sort_by(|a, b| {
        b.source_count
            .cmp(&a.source_count)
            .then_with(|| a.name.cmp(&b.name))
    });
    overlaps
}

/// First original spelling of `key` in registration order.
fn display_name(indexes: &[SourceIndex], key: &str) -> String {
    indexes
        .iter()
        .find_map(|idx| idx.get(key).next())
        .map(|record| record.raw_name().to_string())
        .unwrap_or_else(|| title_case(key))
}

/// Cross-reference loaded sources and attach run metadata.
pub fn run(config: &XrefConfig, indexes: &[SourceIndex]) -> XrefResult {
    let overlaps = cross_reference(indexes);

    let distinct_keys = indexes
        .iter()
        .flat_map(|idx| idx.keys())
        .collect::<BTreeSet<_>>()
        .len();

    let sources: Vec<SourceStats> = indexes
        .iter()
        .map(|idx| SourceStats {
            label: idx.label().to_string(),
            kind: idx.kind(),
            present: idx.is_present(),
            records: idx.records().len(),
            skipped: idx.skipped_rows(),
            keys: idx.key_count(),
        })
        .collect();

    let sources_available = indexes.iter().filter(|idx| idx.is_present()).count();

    info!(
        sources_available,
        sources_configured = indexes.len(),
        overlaps = overlaps.len(),
        "cross-reference complete"
    );

    XrefResult {
        meta: XrefMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary: XrefSummary {
            sources_configured: indexes.len(),
            sources_available,
            distinct_keys,
            overlaps: overlaps.len(),
            sources,
        },
        overlaps,
    }
}
