//! `rmatch summary` and `rmatch pipeline`.

use std::collections::HashSet;

use rostermatch_xref::output::{write_file, write_summary_csv};
use rostermatch_xref::summary::dataset_summary;
use rostermatch_xref::SourceIndex;

use crate::network::{attributes_from_loaded, stage_edges, stage_graph, stage_web};
use crate::workspace::{write_err, Workspace, WorkspaceArgs};
use crate::xref::stage_xref;
use crate::CliError;

pub fn stage_summary(
    ws: &Workspace,
    indexes: &[SourceIndex],
    overlap_count: Option<usize>,
) -> Result<(), CliError> {
    let counts = dataset_summary(&ws.config, indexes, overlap_count);
    let path = ws.data_dir.join(&ws.config.output.summary);
    write_file(&path, |w| write_summary_csv(w, &counts)).map_err(write_err)?;

    eprintln!("Dataset summary:");
    for c in &counts {
        eprintln!("  {}: {} records", c.dataset, c.records);
    }
    eprintln!("Saved to {}", path.display());
    Ok(())
}

pub fn cmd_summary(args: WorkspaceArgs) -> Result<(), CliError> {
    let ws = Workspace::resolve(&args)?;
    let indexes = ws.load_sources()?;
    // Standalone summary recounts overlaps instead of trusting a stale CSV.
    let overlaps = rostermatch_xref::cross_reference(&indexes);
    stage_summary(&ws, &indexes, Some(overlaps.len()))
}

/// Every stage in order over one load of the sources. A stage with no
/// input writes an empty artifact instead of failing.
pub fn cmd_pipeline(args: WorkspaceArgs) -> Result<(), CliError> {
    let ws = Workspace::resolve(&args)?;
    let indexes = ws.load_sources()?;

    eprintln!("[1/5] cross-reference");
    let result = stage_xref(&ws, &indexes, None)?;

    eprintln!("[2/5] network edges");
    let edges = stage_edges(&ws, &indexes, None)?;

    eprintln!("[3/5] graph");
    let graph = stage_graph(&ws, &edges, &ws.config.graph.exclude, None)?;

    eprintln!("[4/5] web data");
    let overlap_names: HashSet<String> = result.overlaps.iter().map(|o| o.name.clone()).collect();
    let attributes = attributes_from_loaded(&ws, &indexes);
    stage_web(&ws, &graph, &overlap_names, &attributes, None)?;

    eprintln!("[5/5] summary");
    stage_summary(&ws, &indexes, Some(result.overlaps.len()))?;

    tracing::info!(
        overlaps = result.overlaps.len(),
        edges = edges.len(),
        nodes = graph.nodes.len(),
        "pipeline complete"
    );
    Ok(())
}
