use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::XrefError;
use crate::model::SourceKind;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct XrefConfig {
    pub name: String,
    /// Directory that source and output paths are relative to. Itself
    /// relative to the config file's directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Registration order is display-name priority.
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub edges: EdgesConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub web: WebConfig,
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub label: String,
    pub file: String,
    #[serde(default = "default_name_column")]
    pub name_column: String,
    #[serde(default)]
    pub kind: SourceKind,
}

fn default_name_column() -> String {
    "name".into()
}

impl SourceConfig {
    pub fn new(label: &str, file: &str, kind: SourceKind) -> Self {
        Self {
            label: label.into(),
            file: file.into(),
            name_column: default_name_column(),
            kind,
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_csv")]
    pub csv: String,
    #[serde(default)]
    pub json: Option<String>,
    #[serde(default = "default_edges")]
    pub edges: String,
    #[serde(default = "default_graph")]
    pub graph: String,
    #[serde(default = "default_web")]
    pub web: String,
    #[serde(default = "default_summary")]
    pub summary: String,
}

fn default_csv() -> String {
    "cross_reference.csv".into()
}
fn default_edges() -> String {
    "network_edges.csv".into()
}
fn default_graph() -> String {
    "network_d3.json".into()
}
fn default_web() -> String {
    "web/network.json".into()
}
fn default_summary() -> String {
    "dataset_summary.csv".into()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv: default_csv(),
            json: None,
            edges: default_edges(),
            graph: default_graph(),
            web: default_web(),
            summary: default_summary(),
        }
    }
}

// ---------------------------------------------------------------------------
// Edges
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EdgesConfig {
    #[serde(default)]
    pub groups: Vec<EdgeGroupConfig>,
}

/// Connect every pair of records in `source` sharing a `group_by` value.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeGroupConfig {
    pub source: String,
    pub group_by: String,
    pub relationship: String,
    /// Fixed organization name. Defaults to the group value.
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub year_from_group: bool,
    #[serde(default)]
    pub numeric_groups_only: bool,
}

// ---------------------------------------------------------------------------
// Graph + Web
// ---------------------------------------------------------------------------

pub const DEFAULT_STOPLIST: &[&str] = &["olympics", "summer", "winter", "war", "conference", "congress"];

#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

fn default_exclude() -> Vec<String> {
    DEFAULT_STOPLIST.iter().map(|s| s.to_string()).collect()
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self { exclude: default_exclude() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Source whose `cohort_year`/`position` columns enrich graph nodes.
    #[serde(default)]
    pub attributes_source: Option<String>,
    /// Relationship substrings marking a society edge. The first one also
    /// marks heavy edges.
    #[serde(default = "default_society_markers")]
    pub society_markers: Vec<String>,
}

fn default_society_markers() -> Vec<String> {
    vec!["Skull".into(), "Bones".into()]
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            attributes_source: None,
            society_markers: default_society_markers(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl XrefConfig {
    pub fn from_toml(input: &str) -> Result<Self, XrefError> {
        let config: XrefConfig =
            toml::from_str(input).map_err(|e| XrefError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Built-in config used when no config file is given: the three rosters
    /// of the collection scripts, plus cohort edges.
    pub fn builtin() -> Self {
        Self {
            name: "default".into(),
            data_dir: None,
            sources: vec![
                SourceConfig::new("senate_3plus_boards", "directors_3plus_boards.csv", SourceKind::Report),
                SourceConfig::new("skull_and_bones", "skull_bones_members.csv", SourceKind::Society),
                SourceConfig::new("bilderberg", "bilderberg_attendees.csv", SourceKind::Conference),
            ],
            output: OutputConfig::default(),
            edges: EdgesConfig {
                groups: vec![EdgeGroupConfig {
                    source: "skull_and_bones".into(),
                    group_by: "cohort".into(),
                    relationship: "Skull and Bones cohort".into(),
                    organization: Some("Skull and Bones".into()),
                    year_from_group: true,
                    numeric_groups_only: true,
                }],
            },
            graph: GraphConfig::default(),
            web: WebConfig {
                attributes_source: Some("skull_and_bones".into()),
                society_markers: default_society_markers(),
            },
        }
    }

    pub fn validate(&self) -> Result<(), XrefError> {
        let mut labels = HashSet::new();
        for source in &self.sources {
            if source.label.trim().is_empty() {
                return Err(XrefError::ConfigValidation("source label must not be empty".into()));
            }
            if source.file.trim().is_empty() {
                return Err(XrefError::ConfigValidation(format!(
                    "source '{}': file must not be empty",
                    source.label
                )));
            }
            if source.name_column.is_empty() {
                return Err(XrefError::ConfigValidation(format!(
                    "source '{}': name_column must not be empty",
                    source.label
                )));
            }
            if !labels.insert(source.label.as_str()) {
                return Err(XrefError::DuplicateSource(source.label.clone()));
            }
        }

        for (i, group) in self.edges.groups.iter().enumerate() {
            if !labels.contains(group.source.as_str()) {
                return Err(XrefError::UnknownSource(format!(
                    "edge group {i}: source '{}' not found",
                    group.source
                )));
            }
            if group.group_by.is_empty() {
                return Err(XrefError::ConfigValidation(format!(
                    "edge group {i}: group_by must not be empty"
                )));
            }
        }

        if let Some(ref attrs) = self.web.attributes_source {
            if !labels.contains(attrs.as_str()) {
                return Err(XrefError::UnknownSource(format!(
                    "web: attributes_source '{attrs}' not found"
                )));
            }
        }

        Ok(())
    }

    pub fn source(&self, label: &str) -> Option<&SourceConfig> {
        self.sources.iter().find(|s| s.label == label)
    }

    /// Resolve the data directory against the config file's directory.
    pub fn resolve_data_dir(&self, config_dir: &Path) -> PathBuf {
        match self.data_dir {
            Some(ref dir) => config_dir.join(dir),
            None => config_dir.to_path_buf(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
