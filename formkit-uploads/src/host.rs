//! Host upload primitive.
//!
//! The manager delegates the actual byte transfer to an `UploadHost`. The
//! destination is threaded through the call as a value, so a private
//! upload's redirected location can never leak into another call.
//! `FsUploadHost` is the filesystem implementation used by self-hosted
//! installations and tests; CMS-backed hosts implement the same trait.

use crate::error::UploadError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// An incoming file payload as handed over by the form runtime.
#[derive(Debug, Clone)]
pub struct RawFile {
    pub name: String,
    /// Content type claimed by the client, if any.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl RawFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            bytes,
        }
    }
}

/// Transfer policy flags.
///
/// The upload manager owns validation policy for form uploads and always
/// disables the host's generic form validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransferPolicy {
    pub validate_form: bool,
}

/// A computed upload destination: base path, matching public URL prefix,
/// and the subdirectory beneath both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadLocation {
    pub base_path: PathBuf,
    pub base_url: String,
    pub subdir: String,
}

impl UploadLocation {
    pub fn new(base_path: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            base_url: base_url.into(),
            subdir: String::new(),
        }
    }

    /// Returns this location with the subdirectory replaced. This is the
    /// redirection primitive: a private upload swaps the date-based subdir
    /// for the secret directory name.
    #[must_use]
    pub fn with_subdir(&self, subdir: &str) -> Self {
        Self {
            base_path: self.base_path.clone(),
            base_url: self.base_url.clone(),
            subdir: subdir.to_string(),
        }
    }

    /// Filesystem directory files land in.
    #[must_use]
    pub fn dir(&self) -> PathBuf {
        if self.subdir.is_empty() {
            self.base_path.clone()
        } else {
            self.base_path.join(&self.subdir)
        }
    }

    /// Public URL for a file stored under this location.
    #[must_use]
    pub fn file_url(&self, file_name: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.subdir.is_empty() {
            format!("{base}/{file_name}")
        } else {
            format!("{base}/{}/{file_name}", self.subdir)
        }
    }
}

/// A completed transfer: where the file lives and how it is served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub path: PathBuf,
    pub url: String,
    pub content_type: String,
}

/// The host's generic file-receiving primitive.
pub trait UploadHost: Send + Sync {
    /// The default upload location before any subdirectory is applied.
    fn base_location(&self) -> UploadLocation;

    /// Transfers the file into `destination`, creating it as needed.
    fn transfer(
        &self,
        file: &RawFile,
        policy: &TransferPolicy,
        destination: &UploadLocation,
    ) -> Result<StoredFile, UploadError>;
}

/// Filesystem-backed upload host.
pub struct FsUploadHost {
    root: PathBuf,
    base_url: String,
}

/// Extensions the host's generic validation rejects outright.
const BLOCKED_EXTENSIONS: &[&str] = &["php", "phtml", "exe", "sh", "bat"];

impl FsUploadHost {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }

    /// Strips any path components from a client-supplied filename.
    fn sanitize_name(name: &str) -> Result<&str, UploadError> {
        let name = Path::new(name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("");
        if name.is_empty() || name == "." || name == ".." {
            return Err(UploadError::Rejected("invalid file name".into()));
        }
        Ok(name)
    }

    /// Finds a name that does not collide in `dir`, suffixing `-1`, `-2`,
    /// ... before the extension as needed.
    fn unique_name(dir: &Path, name: &str) -> String {
        if !dir.join(name).exists() {
            return name.to_string();
        }
        let (stem, ext) = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
            _ => (name, None),
        };
        let mut counter = 1u32;
        loop {
            let candidate = match ext {
                Some(ext) => format!("{stem}-{counter}.{ext}"),
                None => format!("{stem}-{counter}"),
            };
            if !dir.join(&candidate).exists() {
                return candidate;
            }
            counter += 1;
        }
    }

    fn content_type_for(name: &str, claimed: Option<&str>) -> String {
        if let Some(claimed) = claimed {
            return claimed.to_string();
        }
        let ext = name.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("pdf") => "application/pdf",
            Some("txt") => "text/plain",
            Some("csv") => "text/csv",
            Some("zip") => "application/zip",
            _ => "application/octet-stream",
        }
        .to_string()
    }
}

impl UploadHost for FsUploadHost {
    fn base_location(&self) -> UploadLocation {
        UploadLocation::new(self.root.clone(), self.base_url.clone())
    }

    fn transfer(
        &self,
        file: &RawFile,
        policy: &TransferPolicy,
        destination: &UploadLocation,
    ) -> Result<StoredFile, UploadError> {
        let name = Self::sanitize_name(&file.name)?;

        if policy.validate_form {
            let ext = name.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase());
            if let Some(ext) = ext {
                if BLOCKED_EXTENSIONS.contains(&ext.as_str()) {
                    return Err(UploadError::Rejected(format!(
                        "file type .{ext} is not allowed"
                    )));
                }
            }
        }

        let dir = destination.dir();
        std::fs::create_dir_all(&dir)?;

        let name = Self::unique_name(&dir, name);
        let path = dir.join(&name);
        std::fs::write(&path, &file.bytes)?;
        debug!(path = %path.display(), "file transferred");

        Ok(StoredFile {
            url: destination.file_url(&name),
            content_type: Self::content_type_for(&name, file.content_type.as_deref()),
            path,
        })
    }
}
