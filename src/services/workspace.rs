// Workspace Manager
// Creates the editable duplicate and applies replacements to it

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const HUMANIZED_SUFFIX: &str = "_humanized";

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("Input path has no file name: {0}")]
    NoFileName(PathBuf),
    #[error("Failed to write working copy {path}")]
    Write { path: PathBuf, source: io::Error },
    #[error("Failed to read working copy {path}")]
    Read { path: PathBuf, source: io::Error },
}

/// `report.txt` -> `report_humanized.txt`; only the final extension moves.
pub fn humanized_file_name(original: &Path) -> Result<OsString, WorkspaceError> {
    let stem = original
        .file_stem()
        .ok_or_else(|| WorkspaceError::NoFileName(original.to_path_buf()))?;

    let mut name = stem.to_os_string();
    name.push(HUMANIZED_SUFFIX);
    if let Some(ext) = original.extension() {
        name.push(".");
        name.push(ext);
    }
    Ok(name)
}

/// The duplicate every rewrite is applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingCopy {
    path: PathBuf,
}

impl WorkingCopy {
    /// Create (or truncate) the working copy inside `dir` with `content`.
    pub fn create(original: &Path, content: &str, dir: &Path) -> Result<Self, WorkspaceError> {
        let path = dir.join(humanized_file_name(original)?);

        fs::write(&path, content).map_err(|source| WorkspaceError::Write {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), bytes = content.len(), "workspace.created");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<String, WorkspaceError> {
        fs::read_to_string(&self.path).map_err(|source| WorkspaceError::Read {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace every occurrence of `phrase` on disk, returning how many there were.
    ///
    /// The file is read and written in full on every call. An empty `phrase`
    /// matches nothing.
    pub fn replace_all(&self, phrase: &str, replacement: &str) -> Result<usize, WorkspaceError> {
        if phrase.is_empty() {
            return Ok(0);
        }

        let content = self.read()?;
        let occurrences = content.matches(phrase).count();
        let updated = content.replace(phrase, replacement);

        fs::write(&self.path, updated).map_err(|source| WorkspaceError::Write {
            path: self.path.clone(),
            source,
        })?;

        Ok(occurrences)
    }
}
