use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use crate::config::SourceConfig;
use crate::error::XrefError;
use crate::model::{SourceIndex, SourceKind, SourceRecord};

/// Index CSV data by normalized name.
///
/// Rows with an empty or whitespace-only name, and rows that fail to decode,
/// are skipped and counted. A missing name column yields an empty index.
pub fn load_csv_index(label: &str, kind: SourceKind, csv_data: &str, name_column: &str) -> SourceIndex {
    if csv_data.trim().is_empty() {
        debug!(source = label, "empty source data");
        return SourceIndex::new(label, kind, true, Vec::new(), 0);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = match reader.headers() {
        Ok(h) => h.iter().map(|h| h.trim_start_matches('\u{feff}').to_string()).collect(),
        Err(e) => {
            warn!(source = label, error = %e, "unreadable header row; source contributes no names");
            return SourceIndex::new(label, kind, true, Vec::new(), 0);
        }
    };

    let name_idx = headers.iter().position(|h| h == name_column);
    if name_idx.is_none() {
        warn!(source = label, column = name_column, "name column not found; source contributes no names");
    }

    let mut records = Vec::new();
    let mut skipped = 0;

    for (i, result) in reader.records().enumerate() {
        let line = i as u64 + 1;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(source = label, line, error = %e, "skipping undecodable row");
                skipped += 1;
                continue;
            }
        };

        // Cell padding is dropped; inner spacing and casing stay for display.
        let name = name_idx.and_then(|ni| record.get(ni)).unwrap_or("").trim();
        if name.is_empty() {
            skipped += 1;
            continue;
        }

        let mut fields = BTreeMap::new();
        for (ci, h) in headers.iter().enumerate() {
            if Some(ci) == name_idx {
                continue;
            }
            if let Some(val) = record.get(ci) {
                fields.insert(h.clone(), val.to_string());
            }
        }

        records.push(SourceRecord {
            kind,
            line,
            name: name.to_string(),
            fields,
        });
    }

    debug!(source = label, records = records.len(), skipped, "loaded source");
    SourceIndex::new(label, kind, true, records, skipped)
}

/// Load one configured source from `base_dir`. A missing file is an empty,
/// not-present index.
pub fn load_source_file(source: &SourceConfig, base_dir: &Path) -> Result<SourceIndex, XrefError> {
    let path = base_dir.join(&source.file);
    let bytes = match std::fs::read(&path) {
        Ok(b) => b,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(source = %source.label, path = %path.display(), "source file missing");
            return Ok(SourceIndex::missing(&source.label, source.kind));
        }
        Err(e) => {
            return Err(XrefError::Io(format!("cannot read {}: {e}", path.display())));
        }
    };
    let data = String::from_utf8_lossy(&bytes);
    Ok(load_csv_index(&source.label, source.kind, &data, &source.name_column))
}

/// Load every source, one thread each, returned in registration order.
pub fn load_sources(sources: &[SourceConfig], base_dir: &Path) -> Result<Vec<SourceIndex>, XrefError> {
    std::thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|source| scope.spawn(move || load_source_file(source, base_dir)))
            .collect();

        handles
            .into_iter()
            .zip(sources)
            .map(|(handle, source)| {
                handle.join().unwrap_or_else(|_| {
                    Err(XrefError::Io(format!("loader for '{}' panicked", source.label)))
                })
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_csv_basic() {
        let csv = "\
name,cohort,position
William H. Taft,1878,President of the United States
  ,1900,blank name row
Henry Stimson,1888,Secretary of War
";
        let idx = load_csv_index("skull_and_bones", SourceKind::Society, csv, "name");
        assert_eq!(idx.records().len(), 2);
        assert_eq!(idx.skipped_rows(), 1);
        assert_eq!(idx.total_rows(), 3);
        assert!(idx.contains_key("william h. taft"));
        let rec = idx.get("henry stimson").next().unwrap();
        assert_eq!(rec.name, "Henry Stimson");
        assert_eq!(rec.line, 3);
        assert_eq!(rec.field("cohort"), Some("1888"));
        assert_eq!(rec.field("name"), None);
    }

    #[test]
    fn custom_name_column() {
        let csv = "participant,country\nDavid Rockefeller,US\n";
        let idx = load_csv_index("bilderberg", SourceKind::Conference, csv, "participant");
        assert!(idx.contains_key("david rockefeller"));
    }

    #[test]
    fn missing_name_column_is_empty() {
        let csv = "person,country\nDavid Rockefeller,US\n";
        let idx = load_csv_index("bilderberg", SourceKind::Conference, csv, "name");
        assert!(idx.is_empty());
        assert!(idx.is_present());
        assert_eq!(idx.skipped_rows(), 1);
    }

    #[test]
    fn empty_data_is_empty_index() {
        let idx = load_csv_index("a", SourceKind::Roster, "", "name");
        assert!(idx.is_empty());
        assert!(idx.is_present());
        let idx = load_csv_index("a", SourceKind::Roster, "name\n", "name");
        assert!(idx.is_empty());
    }

    #[test]
    fn ragged_rows_tolerated() {
        let csv = "name,company\nAlice Lee\nBob Lee,Acme,extra\n";
        let idx = load_csv_index("a", SourceKind::Board, csv, "name");
        assert_eq!(idx.records().len(), 2);
        assert_eq!(idx.get("alice lee").next().unwrap().field("company"), None);
        assert_eq!(idx.get("bob lee").next().unwrap().field("company"), Some("Acme"));
    }

    #[test]
    fn bom_in_header() {
        let csv = "\u{feff}name\nAlice Lee\n";
        let idx = load_csv_index("a", SourceKind::Roster, csv, "name");
        assert!(idx.contains_key("alice lee"));
    }

    #[test]
    fn missing_file_is_not_present() {
        let dir = tempfile::tempdir().unwrap();
        let source = SourceConfig::new("a", "nope.csv", SourceKind::Roster);
        let idx = load_source_file(&source, dir.path()).unwrap();
        assert!(!idx.is_present());
        assert!(idx.is_empty());
    }

    #[test]
    fn directory_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub.csv")).unwrap();
        let source = SourceConfig::new("a", "sub.csv", SourceKind::Roster);
        let err = load_source_file(&source, dir.path()).unwrap_err();
        assert!(matches!(err, XrefError::Io(_)));
    }

    #[test]
    fn load_sources_keeps_registration_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.csv"), "name\nBob Lee\n").unwrap();
        std::fs::write(dir.path().join("a.csv"), "name\nAlice Lee\n").unwrap();
        let sources = vec![
            SourceConfig::new("b", "b.csv", SourceKind::Roster),
            SourceConfig::new("missing", "missing.csv", SourceKind::Roster),
            SourceConfig::new("a", "a.csv", SourceKind::Roster),
        ];
        let indexes = load_sources(&sources, dir.path()).unwrap();
        let labels: Vec<&str> = indexes.iter().map(|i| i.label()).collect();
        assert_eq!(labels, vec!["b", "missing", "a"]);
        assert!(!indexes[1].is_present());
    }
}
