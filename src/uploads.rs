use std::fs;
use std::path::{Path, PathBuf};

use crate::{AppError, AppResult};

/// A file accepted into the managed upload directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub absolute_path: String,
}

/// Managed storage for uploaded files, one flat directory created on
/// demand. Records reference the copy by absolute path; the original
/// location is forgotten after ingest.
#[derive(Debug, Clone)]
pub struct UploadStore {
    base: PathBuf,
}

impl UploadStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Derive the upload root adjacent to the database path.
    pub fn for_database(db_path: &Path) -> Self {
        let base = db_path
            .parent()
            .map(|parent| parent.join("uploads"))
            .unwrap_or_else(|| PathBuf::from("uploads"));
        Self::new(base)
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Copy `source` byte-for-byte into the store, replacing an existing
    /// copy of the same name, and resolve the copy to an absolute path.
    pub fn ingest(&self, source: &Path) -> AppResult<StoredUpload> {
        let file_name = source
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                AppError::new("UPLOADS/INVALID_NAME", "Source path has no usable file name")
                    .with_context("path", source.display().to_string())
            })?
            .to_string();

        fs::create_dir_all(&self.base).map_err(|e| {
            AppError::from(e)
                .with_context("operation", "create_upload_dir")
                .with_context("path", self.base.display().to_string())
        })?;

        let target = self.base.join(&file_name);
        fs::copy(source, &target).map_err(|e| {
            AppError::from(e)
                .with_context("operation", "copy_upload")
                .with_context("source", source.display().to_string())
                .with_context("target", target.display().to_string())
        })?;

        let absolute = fs::canonicalize(&target).map_err(|e| {
            AppError::from(e)
                .with_context("operation", "resolve_upload")
                .with_context("path", target.display().to_string())
        })?;

        let content_type = mime_guess::from_path(&file_name)
            .first()
            .map(|mime| mime.essence_str().to_string());

        tracing::info!(
            target: "casefile",
            event = "upload_stored",
            file = %file_name,
            path = %absolute.display()
        );

        Ok(StoredUpload {
            file_name,
            content_type,
            absolute_path: absolute.to_string_lossy().into_owned(),
        })
    }
}
