use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Minimal interface shared by every scraped record.
pub trait NamedRecord {
    fn raw_name(&self) -> &str;
}

/// Evidence layer a source belongs to. Carried through as metadata only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    Roster,
    Board,
    Nonprofit,
    Society,
    Conference,
    Report,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Roster => write!(f, "roster"),
            Self::Board => write!(f, "board"),
            Self::Nonprofit => write!(f, "nonprofit"),
            Self::Society => write!(f, "society"),
            Self::Conference => write!(f, "conference"),
            Self::Report => write!(f, "report"),
        }
    }
}

/// One row of a source file.
#[derive(Debug, Clone)]
pub struct SourceRecord {
    pub kind: SourceKind,
    /// 1-based data row number (header excluded).
    pub line: u64,
    /// Name as found in the source, leading/trailing whitespace removed.
    pub name: String,
    /// Every other column of the row, keyed by header.
    pub fields: BTreeMap<String, String>,
}

impl NamedRecord for SourceRecord {
    fn raw_name(&self) -> &str {
        &self.name
    }
}

impl SourceRecord {
    pub fn field(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

/// Records of one source grouped by normalized name. Read-only once built.
#[derive(Debug, Clone)]
pub struct SourceIndex {
    label: String,
    kind: SourceKind,
    present: bool,
    records: Vec<SourceRecord>,
    by_key: BTreeMap<String, Vec<usize>>,
    skipped_rows: usize,
}

impl SourceIndex {
    pub(crate) fn new(
        label: &str,
        kind: SourceKind,
        present: bool,
        records: Vec<SourceRecord>,
        skipped_rows: usize,
    ) -> Self {
        let mut by_key: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (i, record) in records.iter().enumerate() {
            let key = crate::normalize::normalize_name(record.raw_name());
            if key.is_empty() {
                continue;
            }
            by_key.entry(key).or_default().push(i);
        }
        Self {
            label: label.to_string(),
            kind,
            present,
            records,
            by_key,
            skipped_rows,
        }
    }

    /// Index for a source whose file does not exist.
    pub fn missing(label: &str, kind: SourceKind) -> Self {
        Self::new(label, kind, false, Vec::new(), 0)
    }

    /// Build an index from records already in memory.
    pub fn from_records(label: &str, kind: SourceKind, records: Vec<SourceRecord>) -> Self {
        Self::new(label, kind, true, records, 0)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Whether the backing file existed.
    pub fn is_present(&self) -> bool {
        self.present
    }

    pub fn records(&self) -> &[SourceRecord] {
        &self.records
    }

    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Data rows seen, kept or skipped.
    pub fn total_rows(&self) -> usize {
        self.records.len() + self.skipped_rows
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Records sharing `key`, in file order.
    pub fn get(&self, key: &str) -> impl Iterator<Item = &SourceRecord> {
        self.by_key
            .get(key)
            .into_iter()
            .flatten()
            .map(move |&i| &self.records[i])
    }

    /// Normalized keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.by_key.keys().map(String::as_str)
    }

    pub fn key_count(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Overlaps
// ---------------------------------------------------------------------------

/// A normalized name present in two or more sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlapRecord {
    pub name: String,
    pub sources: Vec<String>,
    pub source_count: usize,
}

impl OverlapRecord {
    /// Source labels as written to the CSV `sources` column.
    pub fn sources_joined(&self) -> String {
        self.sources.join(", ")
    }
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SourceStats {
    pub label: String,
    pub kind: SourceKind,
    pub present: bool,
    pub records: usize,
    pub skipped: usize,
    pub keys: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct XrefSummary {
    pub sources_configured: usize,
    pub sources_available: usize,
    pub distinct_keys: usize,
    pub overlaps: usize,
    pub sources: Vec<SourceStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct XrefMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct XrefResult {
    pub meta: XrefMeta,
    pub summary: XrefSummary,
    pub overlaps: Vec<OverlapRecord>,
}
