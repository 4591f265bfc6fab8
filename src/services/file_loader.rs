// File Loader
// Resolves the input path and reads the document into memory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::models::SourceDocument;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to resolve path {path}")]
    Resolve { path: PathBuf, source: io::Error },
    #[error("Failed to read {path}")]
    Read { path: PathBuf, source: io::Error },
}

/// Resolve `path` against the current working directory and read it as UTF-8.
pub fn load_source(path: &Path) -> Result<SourceDocument, LoadError> {
    let absolute = std::path::absolute(path).map_err(|source| LoadError::Resolve {
        path: path.to_path_buf(),
        source,
    })?;

    let content = fs::read_to_string(&absolute).map_err(|source| LoadError::Read {
        path: absolute.clone(),
        source,
    })?;

    debug!(path = %absolute.display(), bytes = content.len(), "source.loaded");

    Ok(SourceDocument {
        path: absolute,
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_absolute_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("essay.txt");
        fs::write(&path, "AI wrote this. Humans wrote that.").unwrap();

        let doc = load_source(&path).unwrap();
        assert!(doc.path.is_absolute());
        assert_eq!(doc.content, "AI wrote this. Humans wrote that.");
        assert_eq!(doc.char_count(), 33);
    }

    #[test]
    fn test_relative_path_becomes_absolute() {
        let err = load_source(Path::new("definitely/not/here.txt")).unwrap_err();
        match err {
            LoadError::Read { path, .. } => {
                assert!(path.is_absolute());
                assert!(path.ends_with("definitely/not/here.txt"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_utf8_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob.bin");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();
        assert!(matches!(load_source(&path), Err(LoadError::Read { .. })));
    }

    #[test]
    fn test_io_cause_is_source_not_message() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.txt");
        let err = load_source(&path).unwrap_err();

        let cause = std::error::Error::source(&err).unwrap().to_string();
        assert_eq!(err.to_string(), format!("Failed to read {}", path.display()));
        assert!(!err.to_string().contains(&cause));
    }
}
