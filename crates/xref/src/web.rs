//! Graph enrichment for the web front end.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::config::WebConfig;
use crate::graph::Graph;
use crate::model::{NamedRecord, SourceIndex};

const POSITION_MAX_CHARS: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeType {
    #[serde(rename = "policy")]
    Policy,
    #[serde(rename = "secret-society")]
    SecretSociety,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EdgeType {
    #[serde(rename = "society-connection")]
    SocietyConnection,
    #[serde(rename = "policy-connection")]
    PolicyConnection,
}

#[derive(Debug, Clone, Serialize)]
pub struct WebNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub connections: usize,
    pub cohort_year: String,
    pub position: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WebEdge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    pub weight: u8,
    pub relationship: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WebNetwork {
    pub nodes: Vec<WebNode>,
    pub edges: Vec<WebEdge>,
}

/// Per-person attributes shown in the web detail panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeAttributes {
    pub cohort_year: String,
    pub position: String,
}

/// Attributes by exact raw name. The first record for a name wins.
pub fn attributes_from_index(index: &SourceIndex) -> HashMap<String, NodeAttributes> {
    let mut out = HashMap::new();
    for record in index.records() {
        let cohort_year = record
            .field("cohort_year")
            .or_else(|| record.field("cohort"))
            .unwrap_or("")
            .trim()
            .to_string();
        let position: String = record
            .field("position")
            .unwrap_or("")
            .chars()
            .take(POSITION_MAX_CHARS)
            .collect();
        out.entry(record.raw_name().to_string())
            .or_insert(NodeAttributes { cohort_year, position });
    }
    out
}

pub fn build_web_network(
    graph: &Graph,
    overlap_names: &HashSet<String>,
    attributes: &HashMap<String, NodeAttributes>,
    config: &WebConfig,
) -> WebNetwork {
    let mut connections: HashMap<&str, usize> = HashMap::new();
    for link in &graph.links {
        *connections.entry(link.source.as_str()).or_insert(0) += 1;
        if link.target != link.source {
            *connections.entry(link.target.as_str()).or_insert(0) += 1;
        }
    }

    let nodes = graph
        .nodes
        .iter()
        .map(|node| {
            let attrs = attributes.get(&node.id).cloned().unwrap_or_default();
            WebNode {
                id: node.id.clone(),
                name: node.name.clone(),
                node_type: if overlap_names.contains(&node.id) {
                    NodeType::Policy
                } else {
                    NodeType::SecretSociety
                },
                connections: connections.get(node.id.as_str()).copied().unwrap_or(0),
                cohort_year: attrs.cohort_year,
                position: attrs.position,
            }
        })
        .collect();

    let heavy_marker = config.society_markers.first();
    let edges = graph
        .links
        .iter()
        .map(|link| {
            let relationship = if link.relationship.is_empty() {
                "connection".to_string()
            } else {
                link.relationship.clone()
            };
            let society = config
                .society_markers
                .iter()
                .any(|m| relationship.contains(m.as_str()));
            let heavy = heavy_marker.is_some_and(|m| relationship.contains(m.as_str()));
            WebEdge {
                source: link.source.clone(),
                target: link.target.clone(),
                edge_type: if society {
                    EdgeType::SocietyConnection
                } else {
                    EdgeType::PolicyConnection
                },
                weight: if heavy { 3 } else { 2 },
                relationship,
            }
        })
        .collect();

    WebNetwork { nodes, edges }
}
