//! `rmatch edges`, `rmatch graph`, `rmatch web`: the network export stages.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use rostermatch_xref::config::SourceConfig;
use rostermatch_xref::edges::{build_edges, EdgeRecord};
use rostermatch_xref::graph::{build_graph, read_edges_csv, read_graph_json, Graph};
use rostermatch_xref::loader::load_source_file;
use rostermatch_xref::output::{write_edges_csv, write_file, write_json_file};
use rostermatch_xref::web::{attributes_from_index, build_web_network, NodeAttributes, WebNetwork};
use rostermatch_xref::{SourceIndex, SourceKind};

use crate::workspace::{input_err, write_err, Workspace, WorkspaceArgs};
use crate::CliError;

// ============================================================================
// edges
// ============================================================================

pub fn stage_edges(
    ws: &Workspace,
    indexes: &[SourceIndex],
    output: Option<PathBuf>,
) -> Result<Vec<EdgeRecord>, CliError> {
    let edges = build_edges(indexes, &ws.config.edges.groups);
    let path = ws.output_path(&ws.config.output.edges, output);
    write_file(&path, |w| write_edges_csv(w, &edges)).map_err(write_err)?;
    eprintln!("Created {} edges", edges.len());
    eprintln!("Saved to {}", path.display());
    Ok(edges)
}

pub fn cmd_edges(args: WorkspaceArgs, output: Option<PathBuf>) -> Result<(), CliError> {
    let ws = Workspace::resolve(&args)?;
    let indexes = ws.load_sources()?;
    stage_edges(&ws, &indexes, output)?;
    Ok(())
}

// ============================================================================
// graph
// ============================================================================

pub fn stage_graph(
    ws: &Workspace,
    edges: &[EdgeRecord],
    stoplist: &[String],
    output: Option<PathBuf>,
) -> Result<Graph, CliError> {
    let graph = build_graph(edges, stoplist);
    let path = ws.output_path(&ws.config.output.graph, output);
    write_json_file(&path, &graph).map_err(write_err)?;
    eprintln!("Network: {} nodes, {} links", graph.nodes.len(), graph.links.len());
    eprintln!("Saved to {}", path.display());
    Ok(graph)
}

pub fn cmd_graph(
    args: WorkspaceArgs,
    edges: Option<PathBuf>,
    output: Option<PathBuf>,
    exclude: Vec<String>,
) -> Result<(), CliError> {
    let ws = Workspace::resolve(&args)?;
    let edges_path = ws.output_path(&ws.config.output.edges, edges);
    let records = read_edges_csv(&edges_path).map_err(input_err)?;
    if records.is_empty() {
        tracing::warn!(path = %edges_path.display(), "no edges to build a graph from");
    }

    // --exclude replaces the configured stoplist rather than extending it
    let stoplist = if exclude.is_empty() { ws.config.graph.exclude.clone() } else { exclude };
    stage_graph(&ws, &records, &stoplist, output)?;
    Ok(())
}

// ============================================================================
// web
// ============================================================================

pub fn stage_web(
    ws: &Workspace,
    graph: &Graph,
    overlap_names: &HashSet<String>,
    attributes: &HashMap<String, NodeAttributes>,
    output: Option<PathBuf>,
) -> Result<WebNetwork, CliError> {
    let net = build_web_network(graph, overlap_names, attributes, &ws.config.web);
    let path = ws.output_path(&ws.config.output.web, output);
    write_json_file(&path, &net).map_err(write_err)?;
    eprintln!("Web data: {} nodes, {} edges", net.nodes.len(), net.edges.len());
    eprintln!("Saved to {}", path.display());
    Ok(net)
}

pub fn cmd_web(args: WorkspaceArgs, output: Option<PathBuf>) -> Result<(), CliError> {
    let ws = Workspace::resolve(&args)?;

    let graph_path = ws.data_dir.join(&ws.config.output.graph);
    let graph = read_graph_json(&graph_path).map_err(input_err)?;
    if graph.nodes.is_empty() {
        tracing::warn!(path = %graph_path.display(), "graph is empty or missing");
    }

    let overlap_names = read_overlap_names(&ws)?;
    let attributes = match ws.config.web.attributes_source {
        Some(ref label) => match ws.config.source(label) {
            Some(source) => {
                let index = load_source_file(source, &ws.data_dir).map_err(input_err)?;
                attributes_from_index(&index)
            }
            None => HashMap::new(),
        },
        None => HashMap::new(),
    };

    stage_web(&ws, &graph, &overlap_names, &attributes, output)?;
    Ok(())
}

/// Display names from a previously written cross-reference CSV.
fn read_overlap_names(ws: &Workspace) -> Result<HashSet<String>, CliError> {
    let source = SourceConfig::new("cross_reference", &ws.config.output.csv, SourceKind::Report);
    let index = load_source_file(&source, &ws.data_dir).map_err(input_err)?;
    if !index.is_present() {
        tracing::warn!(file = %source.file, "no cross-reference output; every node is typed secret-society");
    }
    Ok(index.records().iter().map(|r| r.name.clone()).collect())
}

/// Attribute lookup from already-loaded sources, used by `pipeline`.
pub fn attributes_from_loaded(ws: &Workspace, indexes: &[SourceIndex]) -> HashMap<String, NodeAttributes> {
    ws.config
        .web
        .attributes_source
        .as_deref()
        .and_then(|label| indexes.iter().find(|idx| idx.label() == label))
        .map(attributes_from_index)
        .unwrap_or_default()
}
