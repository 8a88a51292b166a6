// rostermatch CLI - cross-reference person names across roster CSVs

mod exit_codes;
mod network;
mod pipeline;
mod workspace;
mod xref;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use exit_codes::{EXIT_SUCCESS, EXIT_USAGE};
use workspace::WorkspaceArgs;

#[derive(Parser)]
#[command(name = "rmatch")]
#[command(about = "Find people who appear in two or more roster CSVs")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug). RMATCH_LOG overrides.
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Cross-reference every configured source and write the overlap CSV
    #[command(after_help = "\
Examples:
  rmatch xref
  rmatch xref -d data/ --top 5
  rmatch xref -c rosters.xref.toml --json > overlaps.json
  rmatch xref -o /tmp/overlap.csv")]
    Xref {
        #[command(flatten)]
        workspace: WorkspaceArgs,

        /// Overlap CSV path (default: the config's output.csv under the data dir)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Print the full result as JSON to stdout
        #[arg(long)]
        json: bool,

        /// How many top overlaps to print to stderr
        #[arg(long, default_value_t = 20)]
        top: usize,
    },

    /// Fuzzy-match one name against a single source file
    #[command(after_help = "\
Examples:
  rmatch lookup 'Prescott Bush Jr.' --source skull_bones_members.csv
  rmatch lookup 'J. Smith' --source board.csv --name-column director
  rmatch lookup 'Averell Harriman' -s attendees.csv --json

Exit code 1 when no candidate matches. Ambiguous matches list every
candidate and exit 0.")]
    Lookup {
        /// Name to look up
        name: String,

        /// Source CSV to match against
        #[arg(long, short = 's')]
        source: PathBuf,

        /// Column holding the person name
        #[arg(long, default_value = "name")]
        name_column: String,

        /// Print candidates as JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Build the relationship edges CSV from configured edge groups
    #[command(after_help = "\
Examples:
  rmatch edges -c rosters.xref.toml
  rmatch edges -d data/ -o /tmp/edges.csv")]
    Edges {
        #[command(flatten)]
        workspace: WorkspaceArgs,

        /// Edges CSV path (default: the config's output.edges)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Build D3 graph JSON from an edges CSV
    #[command(after_help = "\
Examples:
  rmatch graph
  rmatch graph --edges network_edges.csv -o network_d3.json
  rmatch graph --exclude olympics --exclude summit")]
    Graph {
        #[command(flatten)]
        workspace: WorkspaceArgs,

        /// Edges CSV to read (default: the config's output.edges)
        #[arg(long)]
        edges: Option<PathBuf>,

        /// Graph JSON path (default: the config's output.graph)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Drop edges whose endpoint contains this word. Repeatable;
        /// replaces the configured stoplist.
        #[arg(long, value_name = "TOKEN")]
        exclude: Vec<String>,
    },

    /// Build the web front end's network JSON
    #[command(after_help = "\
Examples:
  rmatch web
  rmatch web -c rosters.xref.toml -o site/data/network.json

Reads the graph JSON and overlap CSV written by earlier stages.")]
    Web {
        #[command(flatten)]
        workspace: WorkspaceArgs,

        /// Network JSON path (default: the config's output.web)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Write row counts of every available dataset
    #[command(after_help = "\
Examples:
  rmatch summary
  rmatch summary -d data/")]
    Summary {
        #[command(flatten)]
        workspace: WorkspaceArgs,
    },

    /// Run xref, edges, graph, web and summary in order
    #[command(after_help = "\
Examples:
  rmatch pipeline
  rmatch pipeline -c rosters.xref.toml
  RMATCH_LOG=debug rmatch pipeline -d data/")]
    Pipeline {
        #[command(flatten)]
        workspace: WorkspaceArgs,
    },

    /// Parse and validate a config file without running anything
    #[command(after_help = "\
Examples:
  rmatch validate rosters.xref.toml")]
    Validate {
        /// Config file to check
        config: PathBuf,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("RMATCH_COMMIT"), ")",
        "\nengine:  rostermatch-xref ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("RMATCH_TARGET"),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        None => {
            eprintln!("Usage: rmatch <command> [options]");
            eprintln!("       rmatch --help for more information");
            Ok(())
        }
        Some(Commands::Xref { workspace, output, json, top }) => xref::cmd_xref(workspace, output, json, top),
        Some(Commands::Lookup { name, source, name_column, json }) => {
            xref::cmd_lookup(name, source, name_column, json)
        }
        Some(Commands::Edges { workspace, output }) => network::cmd_edges(workspace, output),
        Some(Commands::Graph { workspace, edges, output, exclude }) => {
            network::cmd_graph(workspace, edges, output, exclude)
        }
        Some(Commands::Web { workspace, output }) => network::cmd_web(workspace, output),
        Some(Commands::Summary { workspace }) => pipeline::cmd_summary(workspace),
        Some(Commands::Pipeline { workspace }) => pipeline::cmd_pipeline(workspace),
        Some(Commands::Validate { config }) => xref::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

/// stderr subscriber. RMATCH_LOG takes precedence over -v.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("RMATCH_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: u8, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into(), hint: None }
    }

    pub fn args(msg: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, msg)
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
