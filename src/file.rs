// src/file.rs

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::model::MonsterRecord;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("cannot write {}: {source}", path.display())]
    Io { path: PathBuf, #[source] source: io::Error },
    #[error("path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("cannot serialise records: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write the records as one JSON array to `out`, or to stdout when `out` is `None`.
/// Parent directories of `out` are created as needed.
pub fn write_json(records: &[MonsterRecord], out: Option<&Path>, pretty: bool) -> Result<(), OutputError> {
    let Some(path) = out else {
        let stdout = io::stdout();
        return write_json_to(records, stdout.lock(), pretty)
            .map_err(|e| with_path(e, Path::new("<stdout>")));
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let file = File::create(path).map_err(|source| OutputError::Io { path: path.to_path_buf(), source })?; // truncate/overwrite
    write_json_to(records, BufWriter::new(file), pretty).map_err(|e| with_path(e, path))
}

/// Serialise into any writer; a trailing newline is always written.
pub fn write_json_to<W: Write>(records: &[MonsterRecord], mut w: W, pretty: bool) -> Result<(), OutputError> {
    if pretty {
        serde_json::to_writer_pretty(&mut w, records)?;
    } else {
        serde_json::to_writer(&mut w, records)?;
    }
    writeln!(w).and_then(|_| w.flush()).map_err(|source| OutputError::Io { path: PathBuf::new(), source })
}

pub fn ensure_directory(dir: &Path) -> Result<(), OutputError> {
    if dir.exists() && !dir.is_dir() {
        return Err(OutputError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| OutputError::Io { path: dir.to_path_buf(), source })?;
    }
    Ok(())
}

fn with_path(err: OutputError, path: &Path) -> OutputError {
    match err {
        OutputError::Io { source, .. } => OutputError::Io { path: path.to_path_buf(), source },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MonsterInfo;

    fn record(name: &str) -> MonsterRecord {
        MonsterRecord {
            info: MonsterInfo { name: s!(name), ..MonsterInfo::default() },
            weakness_breakdown: Default::default(),
            status_effects: Default::default(),
            kinsect_extracts: None,
            materials: None,
        }
    }

    #[test]
    fn compact_array_with_newline() {
        let mut buf = Vec::new();
        write_json_to(&[record("Rathian")], &mut buf, false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("[{\"name\":\"Rathian\""), "{text}");
        assert!(text.ends_with("]\n"));
    }

    #[test]
    fn writes_file_and_creates_parents() {
        let dir = std::env::temp_dir().join(format!("mhr_scrape_out_{}", std::process::id()));
        let path = dir.join("nested").join("monsters.json");

        write_json(&[record("Rathalos"), record("Rathian")], Some(&path), true).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert_eq!(value[1]["name"], "Rathian");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn file_in_place_of_directory_is_rejected() {
        let file = std::env::temp_dir().join(format!("mhr_scrape_flat_{}", std::process::id()));
        fs::write(&file, "x").unwrap();
        let err = write_json(&[], Some(&file.join("out.json")), false).unwrap_err();
        assert!(matches!(err, OutputError::NotADirectory(_)));
        let _ = fs::remove_file(&file);
    }
}
