//! Config + data directory resolution shared by every pipeline command.

use std::path::{Path, PathBuf};

use clap::Args;
use rostermatch_xref::loader::load_sources;
use rostermatch_xref::{SourceIndex, XrefConfig, XrefError};

use crate::exit_codes::{EXIT_INVALID_CONFIG, EXIT_IO, EXIT_WRITE};
use crate::CliError;

#[derive(Args, Debug, Clone)]
pub struct WorkspaceArgs {
    /// Path to an .xref.toml config (default: built-in three-source config)
    #[arg(long, short = 'c', env = "RMATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding source CSVs and outputs (overrides the config's data_dir)
    #[arg(long, short = 'd', env = "RMATCH_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

/// A resolved config and the directory its relative paths hang off.
pub struct Workspace {
    pub config: XrefConfig,
    pub data_dir: PathBuf,
}

impl Workspace {
    pub fn resolve(args: &WorkspaceArgs) -> Result<Self, CliError> {
        let (config, default_dir) = match args.config {
            Some(ref path) => {
                let config = read_config(path)?;
                let base = path.parent().unwrap_or_else(|| Path::new("."));
                let dir = config.resolve_data_dir(base);
                (config, dir)
            }
            None => (XrefConfig::builtin(), PathBuf::from(".")),
        };
        let data_dir = args.data_dir.clone().unwrap_or(default_dir);
        tracing::debug!(config = %config.name, data_dir = %data_dir.display(), "workspace resolved");
        Ok(Self { config, data_dir })
    }

    /// Output path from config, or the explicit override as given.
    pub fn output_path(&self, configured: &str, override_path: Option<PathBuf>) -> PathBuf {
        override_path.unwrap_or_else(|| self.data_dir.join(configured))
    }

    pub fn load_sources(&self) -> Result<Vec<SourceIndex>, CliError> {
        load_sources(&self.config.sources, &self.data_dir).map_err(input_err)
    }
}

pub fn read_config(path: &Path) -> Result<XrefConfig, CliError> {
    let config_str = std::fs::read_to_string(path).map_err(|e| {
        CliError::new(EXIT_IO, format!("cannot read config {}: {e}", path.display()))
    })?;
    XrefConfig::from_toml(&config_str).map_err(|e| {
        CliError::new(EXIT_INVALID_CONFIG, e.to_string())
            .with_hint(format!("run `rmatch validate {}` after fixing", path.display()))
    })
}

pub fn input_err(e: XrefError) -> CliError {
    CliError::new(EXIT_IO, e.to_string())
}

pub fn write_err(e: XrefError) -> CliError {
    CliError::new(EXIT_WRITE, e.to_string())
}
