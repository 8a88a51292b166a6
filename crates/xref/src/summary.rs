use serde::Serialize;

use crate::config::XrefConfig;
use crate::model::SourceIndex;

/// Row count of one dataset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetCount {
    pub dataset: String,
    pub records: usize,
    pub file: String,
}

/// Row counts for every present source plus the cross-reference output.
/// Absent sources are left out.
pub fn dataset_summary(
    config: &XrefConfig,
    indexes: &[SourceIndex],
    overlap_count: Option<usize>,
) -> Vec<DatasetCount> {
    let mut out: Vec<DatasetCount> = indexes
        .iter()
        .filter(|idx| idx.is_present())
        .map(|idx| DatasetCount {
            dataset: idx.label().to_string(),
            records: idx.total_rows(),
            file: config
                .source(idx.label())
                .map(|s| s.file.clone())
                .unwrap_or_default(),
        })
        .collect();

    if let Some(records) = overlap_count {
        out.push(DatasetCount {
            dataset: "cross_reference".into(),
            records,
            file: config.output.csv.clone(),
        });
    }
    out
}
