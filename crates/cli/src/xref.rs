//! `rmatch xref`, `rmatch lookup`, `rmatch validate`.

use std::path::{Path, PathBuf};

use rostermatch_xref::config::SourceConfig;
use rostermatch_xref::loader::load_source_file;
use rostermatch_xref::matcher::classify;
use rostermatch_xref::output::{write_file, write_json_file, write_overlaps_csv};
use rostermatch_xref::{fuzzy_match, normalize_name, MatchOutcome, NamedRecord, SourceIndex, SourceKind, XrefResult};
use serde::Serialize;

use crate::exit_codes::{EXIT_ERROR, EXIT_WRITE};
use crate::workspace::{input_err, read_config, write_err, Workspace, WorkspaceArgs};
use crate::CliError;

// ============================================================================
// xref
// ============================================================================

/// Cross-reference loaded sources and write the overlap CSV (plus JSON when
/// the config asks for it).
pub fn stage_xref(
    ws: &Workspace,
    indexes: &[SourceIndex],
    output: Option<PathBuf>,
) -> Result<XrefResult, CliError> {
    let result = rostermatch_xref::run(&ws.config, indexes);

    let csv_path = ws.output_path(&ws.config.output.csv, output);
    write_file(&csv_path, |w| write_overlaps_csv(w, &result.overlaps)).map_err(write_err)?;

    if let Some(ref json) = ws.config.output.json {
        let json_path = ws.data_dir.join(json);
        write_json_file(&json_path, &result).map_err(write_err)?;
        tracing::info!(path = %json_path.display(), "wrote cross-reference JSON");
    }

    let s = &result.summary;
    eprintln!(
        "{}/{} sources available, {} distinct names",
        s.sources_available, s.sources_configured, s.distinct_keys
    );
    eprintln!("Found {} people in 2+ sources", s.overlaps);
    eprintln!("Saved to {}", csv_path.display());
    Ok(result)
}

pub fn cmd_xref(args: WorkspaceArgs, output: Option<PathBuf>, json: bool, top: usize) -> Result<(), CliError> {
    let ws = Workspace::resolve(&args)?;
    let indexes = ws.load_sources()?;
    let result = stage_xref(&ws, &indexes, output)?;

    for o in result.overlaps.iter().take(top) {
        eprintln!("  {}: {}", o.name, o.sources_joined());
    }

    if json {
        let json_str = serde_json::to_string_pretty(&result)
            .map_err(|e| CliError::new(EXIT_WRITE, format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    }
    Ok(())
}

// ============================================================================
// lookup
// ============================================================================

#[derive(Serialize)]
struct LookupCandidate {
    key: String,
    names: Vec<String>,
    lines: Vec<u64>,
}

#[derive(Serialize)]
struct LookupOutput {
    query: String,
    normalized: String,
    outcome: MatchOutcome,
    candidates: Vec<LookupCandidate>,
}

pub fn cmd_lookup(name: String, source: PathBuf, name_column: String, json: bool) -> Result<(), CliError> {
    if name.trim().is_empty() {
        return Err(CliError::args("lookup name must not be empty"));
    }

    let index = load_single_source(&source, &name_column)?;
    if !index.is_present() {
        tracing::warn!(path = %source.display(), "source file not found; nothing to match against");
    }

    let matches = fuzzy_match(&name, index.keys());
    let outcome = classify(&name, &matches);

    let output = LookupOutput {
        query: name.clone(),
        normalized: normalize_name(&name),
        outcome,
        candidates: matches
            .iter()
            .map(|key| LookupCandidate {
                key: key.to_string(),
                names: index.get(key).map(|r| r.raw_name().to_string()).collect(),
                lines: index.get(key).map(|r| r.line).collect(),
            })
            .collect(),
    };

    if json {
        let json_str = serde_json::to_string_pretty(&output)
            .map_err(|e| CliError::new(EXIT_WRITE, format!("JSON serialization error: {e}")))?;
        println!("{json_str}");
    } else {
        for c in &output.candidates {
            println!("{}\t{}", c.key, c.names.join("; "));
        }
        eprintln!("{}: {} candidate(s)", outcome.as_str(), output.candidates.len());
    }

    match outcome {
        MatchOutcome::NoMatch => Err(CliError::new(EXIT_ERROR, format!("no match for '{name}'"))
            .with_hint("a match needs the same normalized name, or the same first initial and surname")),
        MatchOutcome::Ambiguous => {
            if !json {
                eprintln!("note: ambiguous; candidates are listed, none is chosen");
            }
            Ok(())
        }
        MatchOutcome::Exact | MatchOutcome::Fuzzy => Ok(()),
    }
}

fn load_single_source(path: &Path, name_column: &str) -> Result<SourceIndex, CliError> {
    let file = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::args(format!("not a file path: {}", path.display())))?;
    let label = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.clone());
    let base = path.parent().unwrap_or_else(|| Path::new(""));

    let mut source = SourceConfig::new(&label, &file, SourceKind::Roster);
    source.name_column = name_column.to_string();
    load_source_file(&source, base).map_err(input_err)
}

// ============================================================================
// validate
// ============================================================================

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = read_config(&config_path)?;
    eprintln!(
        "valid: '{}' with {} source(s), {} edge group(s)",
        config.name,
        config.sources.len(),
        config.edges.groups.len(),
    );
    Ok(())
}
