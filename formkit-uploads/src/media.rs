//! Media library promotion.
//!
//! Non-private uploads meant for long-term reuse are promoted into the
//! host's permanent asset store. The in-memory library here mirrors that
//! store's observable behavior: item identity, derived display title,
//! stored path and content type.

use crate::host::StoredFile;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// Unique identifier for a media library item. UUID v7 for time ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaId(Uuid);

impl MediaId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for MediaId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A permanent asset-store entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: MediaId,
    /// Filename with the extension stripped.
    pub title: String,
    pub path: PathBuf,
    pub url: String,
    pub content_type: String,
}

/// In-memory permanent asset store.
#[derive(Debug, Default)]
pub struct MediaLibrary {
    items: Vec<MediaItem>,
}

impl MediaLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Promotes a completed upload into the library.
    pub fn add(&mut self, stored: &StoredFile) -> MediaItem {
        let title = stored
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let item = MediaItem {
            id: MediaId::new(),
            title,
            path: stored.path.clone(),
            url: stored.url.clone(),
            content_type: stored.content_type.clone(),
        };
        self.items.push(item.clone());
        item
    }

    pub fn get(&self, id: MediaId) -> Option<&MediaItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
