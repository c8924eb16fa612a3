//! Ordered item list with identity-keyed reconciliation.
//!
//! Each content snapshot replaces the visible order wholesale, but items
//! whose id survives keep their per-item caches (thumbnail subscription,
//! rendered name) unless the field backing that cache actually changed.

use crate::model::{Content, ContentElement, StoryId};
use std::collections::{HashMap, HashSet};
use std::mem;
use tracing::{debug, warn};

/// Cached elided name together with the color it was rendered in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCache {
    /// Elided display text.
    pub text: String,
    /// Color marker; a different requested color invalidates the cache.
    pub color: (u8, u8, u8),
}

/// A story item owned by the store.
#[derive(Debug, Clone)]
pub struct Item {
    element: ContentElement,
    name_cache: Option<NameCache>,
    subscribed: bool,
}

impl Item {
    fn new(element: ContentElement) -> Self {
        Self {
            element,
            name_cache: None,
            subscribed: false,
        }
    }

    /// The descriptor currently backing this item.
    pub fn element(&self) -> &ContentElement {
        &self.element
    }

    /// Stable identity.
    pub fn id(&self) -> StoryId {
        self.element.id
    }

    /// Cached rendered name, if valid.
    pub fn name_cache(&self) -> Option<&NameCache> {
        self.name_cache.as_ref()
    }

    /// Whether an update callback is registered with the thumbnail provider.
    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Merge a newer descriptor with the same id.
    ///
    /// Returns how many caches were invalidated. `skip_small` keeps its
    /// original value so the compact row never shifts under an animation.
    fn merge(&mut self, element: &ContentElement) -> usize {
        let mut invalidated = 0;
        if !self.element.same_thumbnail(element) {
            self.element.thumbnail = element.thumbnail.clone();
            self.subscribed = false;
            invalidated += 1;
        }
        if self.element.name != element.name {
            self.element.name.clone_from(&element.name);
            self.name_cache = None;
            invalidated += 1;
        }
        self.element.count = element.count;
        self.element.unread_count = element.unread_count;
        invalidated
    }
}

/// Result of applying a content snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOutcome {
    /// Snapshot equal to the current one; nothing happened.
    Unchanged,
    /// Empty snapshot; all items dropped and the store marked empty.
    Cleared,
    /// Items reconciled against the snapshot.
    Updated {
        /// Item count differs from before (geometry must be recomputed).
        count_changed: bool,
        /// The store held no items before this snapshot.
        became_non_empty: bool,
        /// Number of thumbnail subscriptions and name caches dropped.
        invalidated: usize,
    },
}

/// Exclusive owner of the ordered item list.
#[derive(Debug, Default)]
pub struct ItemStore {
    content: Content,
    items: Vec<Item>,
    empty: bool,
}

impl ItemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            content: Content::default(),
            items: Vec::new(),
            empty: true,
        }
    }

    /// Reconcile against a new snapshot.
    ///
    /// Duplicate ids are resolved deterministically: the first descriptor
    /// with a given id inherits the previous item, later ones start fresh.
    pub fn apply_snapshot(&mut self, content: Content) -> SnapshotOutcome {
        if self.content == content {
            return SnapshotOutcome::Unchanged;
        }
        if content.is_empty() {
            debug!(dropped = self.items.len(), "Cleared stories strip");
            self.items.clear();
            self.content = content;
            self.empty = true;
            return SnapshotOutcome::Cleared;
        }

        let was_count = self.items.len();
        let mut previous: HashMap<StoryId, Item> = HashMap::with_capacity(was_count);
        for item in mem::take(&mut self.items) {
            previous.entry(item.id()).or_insert(item);
        }

        let mut seen = HashSet::with_capacity(content.len());
        let mut invalidated = 0;
        self.items.reserve(content.len());
        for element in &content.elements {
            if !seen.insert(element.id) {
                warn!(id = %element.id, "Duplicate story id in snapshot");
            }
            match previous.remove(&element.id) {
                Some(mut item) => {
                    invalidated += item.merge(element);
                    self.items.push(item);
                }
                None => self.items.push(Item::new(element.clone())),
            }
        }
        self.content = content;

        let count = self.items.len();
        let became_non_empty = was_count == 0;
        if became_non_empty {
            self.empty = false;
        }
        debug!(
            was_count,
            count,
            dropped = previous.len(),
            invalidated,
            "Reconciled stories snapshot"
        );
        SnapshotOutcome::Updated {
            count_changed: count != was_count,
            became_non_empty,
            invalidated,
        }
    }

    /// Items in display order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Item at `index`.
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the last snapshot was empty; suppresses compact sizing.
    pub fn is_marked_empty(&self) -> bool {
        self.empty
    }

    /// Whether the first item is hidden from the compact row.
    pub fn first_skips_small(&self) -> bool {
        self.items
            .first()
            .is_some_and(|item| item.element.skip_small)
    }

    /// Subscribe to the item's thumbnail once; returns whether it subscribed now.
    pub fn validate_thumbnail(&mut self, index: usize, on_update: impl Fn() + 'static) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        if item.subscribed {
            return false;
        }
        item.subscribed = true;
        item.element
            .thumbnail
            .subscribe_to_updates(Box::new(on_update));
        true
    }

    /// Rebuild the name cache when missing or rendered in another color.
    ///
    /// Returns the valid cache.
    pub fn validate_name(
        &mut self,
        index: usize,
        color: (u8, u8, u8),
        available_width: usize,
    ) -> Option<&NameCache> {
        let item = self.items.get_mut(index)?;
        let stale = item
            .name_cache
            .as_ref()
            .is_none_or(|cache| cache.color != color);
        if stale {
            item.name_cache = Some(NameCache {
                text: super::name::elide(&item.element.name, available_width),
                color,
            });
        }
        item.name_cache.as_ref()
    }
}

#[cfg(test)]
#[path = "item_store_tests.rs"]
mod tests;
