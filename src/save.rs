//! Save-path resolution.
//!
//! Decides *where* a finished composite goes and in which format. It never
//! encodes anything itself: callers pass the returned [`SaveSpec`] to
//! [`Compositor::save`](crate::imaging::Compositor::save).
//!
//! - **Interactive** (`silent_save = false`): the caller supplies the path
//!   (typically from a file dialog). Its extension picks the format when it
//!   is `png`, `jpg` or `jpeg`; otherwise the configured format applies.
//! - **Silent** (`silent_save = true`): the output folder is created if
//!   needed and a filename is generated from the [naming](crate::naming)
//!   pattern. A caller-supplied path is ignored.

use crate::imaging::{Quality, SaveFormat, SaveSpec};
use crate::naming::{next_sequence_number, sequence_filename, timestamp_filename};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("cannot create output folder {path}: {source}")]
    CreateFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read output folder {path}: {source}")]
    ScanFolder {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("cannot resolve absolute path for {path}: {source}")]
    Absolute {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("silent save is off and no destination path was given")]
    NoDestination,
}

/// How silently saved files are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingPattern {
    #[default]
    Timestamp,
    Sequence,
}

/// Everything the resolver needs from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SavePolicy {
    pub silent: bool,
    pub output_folder: PathBuf,
    pub naming: NamingPattern,
    pub format: SaveFormat,
    pub quality: Quality,
}

/// Resolve the destination for one save, using the current local time.
pub fn resolve_save_path(policy: &SavePolicy, chosen: Option<&Path>) -> Result<SaveSpec, SaveError> {
    resolve_save_path_at(policy, chosen, Local::now().naive_local())
}

/// Resolve the destination for one save as if the clock read `now`.
///
/// The returned path is absolute.
#[tracing::instrument(skip(policy), fields(silent = policy.silent))]
pub fn resolve_save_path_at(
    policy: &SavePolicy,
    chosen: Option<&Path>,
    now: NaiveDateTime,
) -> Result<SaveSpec, SaveError> {
    if !policy.silent {
        let path = chosen.ok_or(SaveError::NoDestination)?;
        let format = SaveFormat::from_path(path).unwrap_or(policy.format);
        return Ok(SaveSpec {
            format,
            quality: policy.quality,
            path: absolute(path)?,
        });
    }

    let folder = &policy.output_folder;
    std::fs::create_dir_all(folder).map_err(|source| SaveError::CreateFolder {
        path: folder.clone(),
        source,
    })?;

    let file_name = match policy.naming {
        NamingPattern::Timestamp => timestamp_filename(now, policy.format),
        NamingPattern::Sequence => {
            let existing = list_file_names(folder)?;
            let next = next_sequence_number(existing.iter().map(String::as_str), policy.format);
            sequence_filename(next, policy.format)
        }
    };
    tracing::debug!(%file_name, "resolved silent save name");

    Ok(SaveSpec {
        format: policy.format,
        quality: policy.quality,
        path: absolute(&folder.join(file_name))?,
    })
}

/// Names of the regular files directly inside `folder`.
fn list_file_names(folder: &Path) -> Result<Vec<String>, SaveError> {
    let mut names = Vec::new();
    for entry in WalkDir::new(folder).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| SaveError::ScanFolder {
            path: folder.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

fn absolute(path: &Path) -> Result<PathBuf, SaveError> {
    std::path::absolute(path).map_err(|source| SaveError::Absolute {
        path: path.to_path_buf(),
        source,
    })
}
