//! Uploaded-file storage.
//!
//! Files land under a kind-specific subdirectory of the upload root with a
//! caller-scoped unique name. Validation covers extension and size; writes
//! and deletes are synchronous filesystem operations performed inline with
//! the request.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::config::{DOCUMENT_EXTENSIONS, IMAGE_EXTENSIONS, MAX_UPLOAD_BYTES};
use crate::errors::{AppError, AppResult};

/// What kind of file is being stored; decides folder and allowed types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Resume,
    Logo,
    Avatar,
    Document,
}

impl UploadKind {
    fn folder(self) -> &'static str {
        match self {
            UploadKind::Resume => "resumes",
            UploadKind::Logo => "logos",
            UploadKind::Avatar => "profile_pics",
            UploadKind::Document => "documents",
        }
    }

    fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            UploadKind::Resume | UploadKind::Document => DOCUMENT_EXTENSIONS,
            UploadKind::Logo | UploadKind::Avatar => IMAGE_EXTENSIONS,
        }
    }
}

/// Filesystem-backed upload store rooted at a configured directory.
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    /// Open (and create if needed) the upload root.
    pub fn new(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|e| AppError::internal(format!("Failed to create upload root: {}", e)))?;
        Ok(Self { root })
    }

    /// Validate and persist an uploaded file, returning its stored
    /// relative path (e.g. `resumes/<owner>-<suffix>.pdf`).
    pub fn store(
        &self,
        kind: UploadKind,
        owner: Uuid,
        original_name: &str,
        bytes: &[u8],
    ) -> AppResult<String> {
        if bytes.is_empty() {
            return Err(AppError::upload("File is empty"));
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::upload(format!(
                "File exceeds the {} MiB limit",
                MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }

        let extension = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| AppError::upload("File has no extension"))?;

        let allowed = kind.allowed_extensions();
        if !allowed.contains(&extension.as_str()) {
            return Err(AppError::upload(format!(
                "File type not allowed. Allowed types: {}",
                allowed.join(", ")
            )));
        }

        let folder = self.root.join(kind.folder());
        fs::create_dir_all(&folder)
            .map_err(|e| AppError::internal(format!("Failed to create upload folder: {}", e)))?;

        let filename = format!("{}-{}.{}", owner, Uuid::new_v4().simple(), extension);
        let path = folder.join(&filename);
        fs::write(&path, bytes)
            .map_err(|e| AppError::internal(format!("Failed to write upload: {}", e)))?;

        Ok(format!("{}/{}", kind.folder(), filename))
    }

    /// Delete a stored file by its relative path. A missing file is
    /// skipped, not an error; a path escaping the root is rejected.
    pub fn remove(&self, relative: &str) -> AppResult<()> {
        if relative.split('/').any(|part| part == "..") {
            return Err(AppError::bad_request("Invalid file path"));
        }

        let path = self.root.join(relative);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Stored file already gone, skipping delete");
            return Ok(());
        }

        fs::remove_file(&path)
            .map_err(|e| AppError::internal(format!("Failed to delete upload: {}", e)))
    }

    /// Root directory, for static file serving.
    pub fn root(&self) -> &Path {
        &self.root
    }
}
