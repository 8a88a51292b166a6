use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EdgeGroupConfig;
use crate::model::{NamedRecord, SourceIndex};

/// One relationship between two people, keyed by their raw name strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub year: String,
}

/// Pairwise edges between records sharing a group value.
pub fn group_edges(index: &SourceIndex, group: &EdgeGroupConfig) -> Vec<EdgeRecord> {
    let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    let mut column_seen = false;

    for record in index.records() {
        let Some(value) = record.field(&group.group_by) else {
            continue;
        };
        column_seen = true;
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        if group.numeric_groups_only && !value.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        groups.entry(value).or_default().push(record.raw_name());
    }

    if !column_seen && !index.is_empty() {
        warn!(source = index.label(), column = %group.group_by, "group column not found; no edges");
    }

    let mut edges = Vec::new();
    for (value, members) in &groups {
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                edges.push(EdgeRecord {
                    source: a.to_string(),
                    target: b.to_string(),
                    relationship: group.relationship.clone(),
                    organization: group.organization.clone().unwrap_or_else(|| value.to_string()),
                    year: if group.year_from_group { value.to_string() } else { String::new() },
                });
            }
        }
    }

    debug!(
        source = index.label(),
        groups = groups.len(),
        edges = edges.len(),
        relationship = %group.relationship,
        "built group edges"
    );
    edges
}

/// Edges for every configured group, in config order. Groups naming a
/// source that was not loaded contribute nothing.
pub fn build_edges(indexes: &[SourceIndex], groups: &[EdgeGroupConfig]) -> Vec<EdgeRecord> {
    groups
        .iter()
        .flat_map(|group| match indexes.iter().find(|idx| idx.label() == group.source) {
            Some(index) => group_edges(index, group),
            None => Vec::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_csv_index;
    use crate::model::SourceKind;

    fn cohort_group() -> EdgeGroupConfig {
        EdgeGroupConfig {
            source: "skull_and_bones".into(),
            group_by: "cohort".into(),
            relationship: "Skull and Bones cohort".into(),
            organization: Some("Skull and Bones".into()),
            year_from_group: true,
            numeric_groups_only: true,
        }
    }

    #[test]
    fn cohort_pairs() {
        let csv = "\
name,cohort
Prescott Bush,1917
Averell Harriman,1913
Robert A. Lovett,1918
Henry Neil Mallon,1917
Ellery James,1917
Unknown Member,c. 1900
";
        let idx = load_csv_index("skull_and_bones", SourceKind::Society, csv, "name");
        let edges = group_edges(&idx, &cohort_group());
        // 1913 and 1918 have a single member; 1917 has three -> three pairs.
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0].source, "Prescott Bush");
        assert_eq!(edges[0].target, "Henry Neil Mallon");
        assert_eq!(edges[1].target, "Ellery James");
        assert_eq!(edges[2].source, "Henry Neil Mallon");
        assert!(edges.iter().all(|e| e.year == "1917"));
        assert!(edges.iter().all(|e| e.organization == "Skull and Bones"));
    }

    #[test]
    fn organization_defaults_to_group_value() {
        let csv = "name,company\nAlice Lee,Acme Corp\nBob Lee,Acme Corp\nCarol Wu,Globex\n";
        let idx = load_csv_index("board_interlocks", SourceKind::Board, csv, "name");
        let group = EdgeGroupConfig {
            source: "board_interlocks".into(),
            group_by: "company".into(),
            relationship: "shared_board".into(),
            organization: None,
            year_from_group: false,
            numeric_groups_only: false,
        };
        let edges = group_edges(&idx, &group);
        assert_eq!(
            edges,
            vec![EdgeRecord {
                source: "Alice Lee".into(),
                target: "Bob Lee".into(),
                relationship: "shared_board".into(),
                organization: "Acme Corp".into(),
                year: String::new(),
            }]
        );
    }

    #[test]
    fn missing_column_or_source_yields_nothing() {
        let idx = load_csv_index("skull_and_bones", SourceKind::Society, "name\nA B\nC D\n", "name");
        assert!(group_edges(&idx, &cohort_group()).is_empty());
        assert!(build_edges(&[], &[cohort_group()]).is_empty());
    }
}
