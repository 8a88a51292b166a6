//! Delimited and JSON writers for everything the pipeline persists.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::edges::EdgeRecord;
use crate::error::XrefError;
use crate::model::OverlapRecord;
use crate::summary::DatasetCount;

pub fn write_overlaps_csv<W: Write>(writer: W, overlaps: &[OverlapRecord]) -> Result<(), XrefError> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(["name", "sources", "source_count"])?;
    for o in overlaps {
        w.write_record([
            o.name.as_str(),
            o.sources_joined().as_str(),
            o.source_count.to_string().as_str(),
        ])?;
    }
    w.flush().map_err(|e| XrefError::Io(e.to_string()))
}

pub fn write_edges_csv<W: Write>(writer: W, edges: &[EdgeRecord]) -> Result<(), XrefError> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(["source", "target", "relationship", "organization", "year"])?;
    for e in edges {
        w.write_record([&e.source, &e.target, &e.relationship, &e.organization, &e.year])?;
    }
    w.flush().map_err(|e| XrefError::Io(e.to_string()))
}

pub fn write_summary_csv<W: Write>(writer: W, counts: &[DatasetCount]) -> Result<(), XrefError> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(["dataset", "records", "file"])?;
    for c in counts {
        w.write_record([c.dataset.as_str(), c.records.to_string().as_str(), c.file.as_str()])?;
    }
    w.flush().map_err(|e| XrefError::Io(e.to_string()))
}

/// Create `path`'s parent directories and hand a buffered file to `write`.
pub fn write_file<F>(path: &Path, write: F) -> Result<(), XrefError>
where
    F: FnOnce(&mut std::io::BufWriter<std::fs::File>) -> Result<(), XrefError>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| XrefError::Io(format!("cannot create {}: {e}", parent.display())))?;
        }
    }
    let file = std::fs::File::create(path)
        .map_err(|e| XrefError::Io(format!("cannot write {}: {e}", path.display())))?;
    let mut buf = std::io::BufWriter::new(file);
    write(&mut buf)?;
    buf.flush()
        .map_err(|e| XrefError::Io(format!("cannot write {}: {e}", path.display())))
}

pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), XrefError> {
    write_file(path, |w| {
        serde_json::to_writer_pretty(&mut *w, value)?;
        w.write_all(b"\n").map_err(|e| XrefError::Io(e.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_csv_layout() {
        let overlaps = vec![
            OverlapRecord {
                name: "Prescott Bush".into(),
                sources: vec!["skull_and_bones".into(), "bilderberg".into()],
                source_count: 2,
            },
            OverlapRecord {
                name: "Henry Luce".into(),
                sources: vec!["a".into(), "b".into()],
                source_count: 2,
            },
        ];
        let mut buf = Vec::new();
        write_overlaps_csv(&mut buf, &overlaps).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "name,sources,source_count\n\
             Prescott Bush,\"skull_and_bones, bilderberg\",2\n\
             Henry Luce,\"a, b\",2\n"
        );
    }

    #[test]
    fn empty_overlaps_still_have_header() {
        let mut buf = Vec::new();
        write_overlaps_csv(&mut buf, &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "name,sources,source_count\n");
    }

    #[test]
    fn write_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("web").join("network.json");
        write_json_file(&path, &serde_json::json!({"nodes": []})).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"nodes\""));
        assert!(text.ends_with('\n'));
    }
}
