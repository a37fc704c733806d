//! Mount packaging
//!
//! Walks a mount's local source directory and packages every regular file
//! into the wire payload the platform materializes at the mount target
//! inside the container. File paths are relative to the mount source,
//! contents travel hex-encoded.

use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use gantry_core::domain::request::Mount;
use gantry_core::dto::function::{FilePayload, MountPayload};

/// Errors raised while packaging a mount source
#[derive(Debug, Error)]
pub enum MountError {
    /// Directory traversal failed
    #[error("failed to walk mount source: {0}")]
    Walk(#[from] walkdir::Error),

    /// A file under the mount source could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Package one mount binding into its wire payload
///
/// Files are emitted in sorted order so identical sources produce identical
/// payloads. An empty source directory yields an empty file list.
pub fn package_mount(mount: &Mount) -> Result<MountPayload, MountError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(&mount.source).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(&mount.source)
            .unwrap_or(entry.path());

        let metadata = entry.metadata()?;
        let contents = std::fs::read(entry.path()).map_err(|source| MountError::Io {
            path: entry.path().to_path_buf(),
            source,
        })?;

        files.push(FilePayload {
            path: relative.to_string_lossy().into_owned(),
            mode: file_mode(&metadata),
            contents_hex: hex::encode(contents),
        });
    }

    debug!(
        "Packaged {} file(s) from {} for {}",
        files.len(),
        mount.source.display(),
        mount.target
    );

    Ok(MountPayload {
        target: mount.target.clone(),
        files,
    })
}

fn file_mode(metadata: &std::fs::Metadata) -> u32 {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o777
    }
    #[cfg(not(unix))]
    {
        let _ = metadata;
        0o644
    }
}
