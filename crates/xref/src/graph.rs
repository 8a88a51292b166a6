//! Node/link graph for the D3 front end.

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::edges::EdgeRecord;
use crate::error::XrefError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub relationship: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

/// Whether `name` contains a stoplist token as a whole word.
fn is_excluded(name: &str, stoplist: &[String]) -> bool {
    name.split_whitespace().any(|word| {
        let word = word.trim_matches(|c: char| !c.is_alphanumeric());
        stoplist.iter().any(|stop| word.eq_ignore_ascii_case(stop))
    })
}

/// Build the graph, dropping every edge with a non-person endpoint.
pub fn build_graph(edges: &[EdgeRecord], stoplist: &[String]) -> Graph {
    let mut nodes = BTreeSet::new();
    let mut links = Vec::new();

    for edge in edges {
        if is_excluded(&edge.source, stoplist) || is_excluded(&edge.target, stoplist) {
            debug!(source = %edge.source, target = %edge.target, "edge dropped by stoplist");
            continue;
        }
        nodes.insert(edge.source.as_str());
        nodes.insert(edge.target.as_str());
        links.push(GraphLink {
            source: edge.source.clone(),
            target: edge.target.clone(),
            relationship: edge.relationship.clone(),
        });
    }

    Graph {
        nodes: nodes
            .into_iter()
            .map(|n| GraphNode { id: n.to_string(), name: n.to_string() })
            .collect(),
        links,
    }
}

/// Parse edge CSV data. Data without `source`/`target` columns has no edges.
pub fn parse_edges_csv(csv_data: &str) -> Result<Vec<EdgeRecord>, XrefError> {
    if csv_data.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers = reader.headers()?.clone();
    let idx = |name: &str| headers.iter().position(|h| h == name);
    let (Some(si), Some(ti)) = (idx("source"), idx("target")) else {
        warn!("edge data lacks source/target columns");
        return Ok(Vec::new());
    };
    let ri = idx("relationship");
    let oi = idx("organization");
    let yi = idx("year");

    let mut edges = Vec::new();
    for record in reader.records() {
        let record = record?;
        let get = |i: Option<usize>| i.and_then(|i| record.get(i)).unwrap_or("").to_string();
        let source = get(Some(si));
        let target = get(Some(ti));
        if source.is_empty() || target.is_empty() {
            continue;
        }
        edges.push(EdgeRecord {
            source,
            target,
            relationship: get(ri),
            organization: get(oi),
            year: get(yi),
        });
    }
    Ok(edges)
}

/// Read an edges file; a missing file is an empty edge list.
pub fn read_edges_csv(path: &Path) -> Result<Vec<EdgeRecord>, XrefError> {
    match std::fs::read_to_string(path) {
        Ok(data) => parse_edges_csv(&data),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no edges file");
            Ok(Vec::new())
        }
        Err(e) => Err(XrefError::Io(format!("cannot read {}: {e}", path.display()))),
    }
}

/// Read a graph JSON file written by `build_graph`; missing is empty.
pub fn read_graph_json(path: &Path) -> Result<Graph, XrefError> {
    match std::fs::read_to_string(path) {
        Ok(data) => Ok(serde_json::from_str(&data)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Graph::default()),
        Err(e) => Err(XrefError::Io(format!("cannot read {}: {e}", path.display()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_STOPLIST;

    fn stoplist() -> Vec<String> {
        DEFAULT_STOPLIST.iter().map(|s| s.to_string()).collect()
    }

    fn edge(s: &str, t: &str, rel: &str) -> EdgeRecord {
        EdgeRecord {
            source: s.into(),
            target: t.into(),
            relationship: rel.into(),
            organization: String::new(),
            year: String::new(),
        }
    }

    #[test]
    fn nodes_sorted_and_distinct() {
        let edges = vec![
            edge("Prescott Bush", "Averell Harriman", "shared_board"),
            edge("Averell Harriman", "Robert A. Lovett", "shared_board"),
        ];
        let g = build_graph(&edges, &stoplist());
        let ids: Vec<&str> = g.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["Averell Harriman", "Prescott Bush", "Robert A. Lovett"]);
        assert_eq!(g.links.len(), 2);
        assert_eq!(g.links[0].relationship, "shared_board");
    }

    #[test]
    fn stoplist_drops_whole_edge() {
        let edges = vec![
            edge("Summer Olympics", "Prescott Bush", "attended"),
            edge("Prescott Bush", "Averell Harriman", "cohort"),
            edge("Versailles Conference,", "Averell Harriman", "attended"),
        ];
        let g = build_graph(&edges, &stoplist());
        assert_eq!(g.links.len(), 1);
        assert_eq!(g.nodes.len(), 2);
    }

    #[test]
    fn stoplist_matches_words_not_substrings() {
        let edges = vec![edge("Edward Warburg", "Howard Stewart", "cohort")];
        let g = build_graph(&edges, &stoplist());
        assert_eq!(g.links.len(), 1);
    }

    #[test]
    fn parse_edges_with_optional_columns() {
        let data = "source,target\nA B,C D\n,E F\n";
        let edges = parse_edges_csv(data).unwrap();
        assert_eq!(edges, vec![edge("A B", "C D", "")]);
    }

    #[test]
    fn parse_edges_without_endpoints() {
        assert!(parse_edges_csv("from,to\nA,B\n").unwrap().is_empty());
        assert!(parse_edges_csv("").unwrap().is_empty());
    }

    #[test]
    fn missing_files_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_edges_csv(&dir.path().join("none.csv")).unwrap().is_empty());
        assert_eq!(read_graph_json(&dir.path().join("none.json")).unwrap(), Graph::default());
    }
}
