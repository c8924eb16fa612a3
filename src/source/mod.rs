//! Content snapshot sources.
//!
//! The preview needs something to play the role of the external content
//! producer. This module provides it:
//! - File loading: a JSON array of descriptors, or JSON lines of snapshots
//! - A demo generator producing paged snapshots
//! - [`ContentSource`], which replays snapshots one page at a time as the
//!   strip asks for more
//!
//! Descriptors are plain data; [`ThumbnailPool`] turns them into
//! [`ContentElement`]s while handing out the same thumbnail handle for the
//! same id, so reconciliation keeps subscriptions across snapshots.

use crate::model::{Content, ContentElement, LetterThumbnail, StoryId, ThumbnailRef};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, warn};

pub mod demo;
pub mod file;

pub use demo::{demo_pages, DEMO_PAGE_SIZE};
pub use file::{load_file, parse_snapshots};

/// Errors raised while loading content snapshots.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Content file does not exist.
    #[error("Content file not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// Content file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot did not parse as a list of descriptors.
    #[error("Invalid snapshot at line {line}: {reason}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Parser message.
        reason: String,
    },

    /// Strict mode: the same id appears twice in one snapshot.
    #[error("Duplicate story id {id} in snapshot {snapshot}")]
    DuplicateId {
        /// The repeated id.
        id: StoryId,
        /// 0-based snapshot index.
        snapshot: usize,
    },

    /// The file held no snapshots at all.
    #[error("Content file contains no snapshots")]
    Empty,
}

/// One story item as written in a content file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoryDescriptor {
    /// Stable identity.
    pub id: StoryId,
    /// Display name.
    pub name: String,
    /// Total number of stories.
    #[serde(default)]
    pub count: u32,
    /// Number of unread stories.
    #[serde(default, alias = "unread")]
    pub unread_count: u32,
    /// Hide from the compact row.
    #[serde(default)]
    pub skip_small: bool,
}

impl StoryDescriptor {
    /// Descriptor with zero counts.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: StoryId::new(id),
            name: name.into(),
            count: 0,
            unread_count: 0,
            skip_small: false,
        }
    }
}

/// Thumbnail handles keyed by story id.
///
/// Every snapshot built through the pool reuses the handle already issued
/// for an id, which is what the engine compares by identity.
#[derive(Debug, Default)]
pub struct ThumbnailPool {
    thumbnails: BTreeMap<StoryId, Rc<LetterThumbnail>>,
}

impl ThumbnailPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `id`, created from `name` on first use.
    pub fn get(&mut self, id: StoryId, name: &str) -> ThumbnailRef {
        let thumbnail = self
            .thumbnails
            .entry(id)
            .or_insert_with(|| Rc::new(LetterThumbnail::new(name)));
        Rc::clone(thumbnail) as ThumbnailRef
    }

    /// Build a content element for a descriptor.
    pub fn element(&mut self, descriptor: &StoryDescriptor) -> ContentElement {
        let thumbnail = self.get(descriptor.id, &descriptor.name);
        ContentElement::new(descriptor.id, thumbnail, descriptor.name.clone())
            .with_counts(descriptor.count, descriptor.unread_count)
            .skipping_small(descriptor.skip_small)
    }

    /// Finish loading the lowest-id placeholder.
    ///
    /// Returns the id that became ready, or `None` once everything is loaded.
    pub fn mark_one_ready(&self) -> Option<StoryId> {
        let (id, thumbnail) = self
            .thumbnails
            .iter()
            .find(|(_, thumbnail)| !thumbnail.is_ready())?;
        thumbnail.mark_ready();
        Some(*id)
    }

    /// Number of handles issued.
    pub fn len(&self) -> usize {
        self.thumbnails.len()
    }

    /// Whether no handle was issued yet.
    pub fn is_empty(&self) -> bool {
        self.thumbnails.is_empty()
    }
}

/// Replays a sequence of snapshots, one per load-more request.
#[derive(Debug)]
pub struct ContentSource {
    snapshots: Vec<Vec<StoryDescriptor>>,
    cursor: usize,
    pool: ThumbnailPool,
}

impl ContentSource {
    /// Wrap already parsed snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Empty`] when there are no snapshots, and
    /// [`SourceError::DuplicateId`] in strict mode when a snapshot repeats
    /// an id. Outside strict mode duplicates are logged and passed through.
    pub fn from_snapshots(
        snapshots: Vec<Vec<StoryDescriptor>>,
        strict: bool,
    ) -> Result<Self, SourceError> {
        if snapshots.is_empty() {
            return Err(SourceError::Empty);
        }
        for (snapshot, descriptors) in snapshots.iter().enumerate() {
            let mut seen = HashSet::with_capacity(descriptors.len());
            for descriptor in descriptors {
                if seen.insert(descriptor.id) {
                    continue;
                }
                if strict {
                    return Err(SourceError::DuplicateId {
                        id: descriptor.id,
                        snapshot,
                    });
                }
                warn!(id = %descriptor.id, snapshot, "Duplicate story id in content file");
            }
        }
        Ok(Self {
            snapshots,
            cursor: 0,
            pool: ThumbnailPool::new(),
        })
    }

    /// Load snapshots from a content file.
    ///
    /// # Errors
    ///
    /// Propagates [`load_file`] errors and the checks of
    /// [`ContentSource::from_snapshots`].
    pub fn from_file(path: impl AsRef<Path>, strict: bool) -> Result<Self, SourceError> {
        Self::from_snapshots(load_file(path)?, strict)
    }

    /// Generated content with `count` items, revealed a page at a time.
    pub fn demo(count: usize) -> Self {
        Self {
            snapshots: demo_pages(count),
            cursor: 0,
            pool: ThumbnailPool::new(),
        }
    }

    /// Next snapshot to show, or `None` when everything was replayed.
    pub fn next_snapshot(&mut self) -> Option<Content> {
        let descriptors = self.snapshots.get(self.cursor)?;
        self.cursor += 1;
        let elements = descriptors
            .iter()
            .map(|descriptor| self.pool.element(descriptor))
            .collect::<Vec<_>>();
        debug!(
            snapshot = self.cursor - 1,
            items = elements.len(),
            "Replaying content snapshot"
        );
        Some(Content::new(elements))
    }

    /// Whether another snapshot is waiting.
    pub fn has_more(&self) -> bool {
        self.cursor < self.snapshots.len()
    }

    /// Number of snapshots in total.
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    /// Thumbnail handles issued so far.
    pub fn pool(&self) -> &ThumbnailPool {
        &self.pool
    }
}
