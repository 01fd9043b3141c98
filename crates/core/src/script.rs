//! Script discovery.
//!
//! A [`Script`] is a `.sql` file in the migrations directory. Scripts are
//! applied in ascending lexicographic order of their file names, so the
//! only way to control ordering is to name files accordingly (e.g. with a
//! zero-padded numeric prefix).

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::MigrateError;

/// File extension a directory entry must carry to count as a script.
pub const SCRIPT_EXTENSION: &str = "sql";

/// A single SQL file applied as one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Script {
    /// File name, also the ordering key.
    pub name: String,
    /// Full path to the file.
    #[serde(skip)]
    pub path: PathBuf,
}

impl Script {
    pub fn new(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let name = path.file_name()?.to_str()?.to_string();
        Some(Self { name, path })
    }
}

/// Returns `true` if `path` has the script extension (case-sensitive).
pub fn is_script_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(SCRIPT_EXTENSION)
}

/// List the scripts in `dir`, sorted by file name.
///
/// Only files directly inside `dir` with a `.sql` extension are returned;
/// subdirectories are not descended into and symlinks are followed. An
/// empty directory yields an empty list. A `.sql` entry that cannot be
/// applied (dangling symlink, non UTF-8 name) is an error, not a skip.
pub fn discover_scripts(dir: &Path) -> Result<Vec<Script>, MigrateError> {
    let dir_err = |source: std::io::Error| MigrateError::Directory {
        path: dir.to_path_buf(),
        source,
    };

    let mut scripts = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(dir_err)? {
        let entry = entry.map_err(dir_err)?;
        let path = entry.path();

        if !is_script_file(&path) {
            tracing::debug!(path = %path.display(), "Ignoring non-script entry");
            continue;
        }

        let unreadable = |source: std::io::Error| MigrateError::ReadScript {
            script: entry.file_name().to_string_lossy().into_owned(),
            source,
        };

        let metadata = std::fs::metadata(&path).map_err(unreadable)?;
        if metadata.is_dir() {
            tracing::debug!(path = %path.display(), "Ignoring directory entry");
            continue;
        }

        let script = Script::new(&path).ok_or_else(|| {
            unreadable(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "file name is not valid UTF-8",
            ))
        })?;
        scripts.push(script);
    }

    scripts.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!(dir = %dir.display(), count = scripts.len(), "Discovered scripts");
    Ok(scripts)
}

/// Drop the scripts whose file names appear in `names`.
///
/// Names that match no script are logged and otherwise ignored.
pub fn exclude_scripts(scripts: Vec<Script>, names: &[String]) -> Vec<Script> {
    for name in names {
        if !scripts.iter().any(|s| &s.name == name) {
            tracing::warn!(script = %name, "Skip requested for unknown script");
        }
    }

    scripts
        .into_iter()
        .filter(|script| {
            let skipped = names.contains(&script.name);
            if skipped {
                tracing::info!(script = %script.name, "Skipping script");
            }
            !skipped
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
