//! Content snapshots delivered by the external producer.
//!
//! A snapshot is an ordered list of [`ContentElement`] descriptors, replaced
//! wholesale on every update. Two snapshots are equal when every descriptor
//! is equal, with thumbnails compared by handle identity.

use super::identifiers::StoryId;
use super::thumbnail::ThumbnailRef;
use std::rc::Rc;

/// Descriptor of a single story item.
#[derive(Debug, Clone)]
pub struct ContentElement {
    /// Stable identity used for reconciliation.
    pub id: StoryId,
    /// Non-owning handle into externally managed image state.
    pub thumbnail: ThumbnailRef,
    /// Display name shown under the full-size circle.
    pub name: String,
    /// Total number of stories.
    pub count: u32,
    /// Number of unread stories.
    pub unread_count: u32,
    /// Whether this item is hidden from the compact row.
    pub skip_small: bool,
}

impl ContentElement {
    /// Create a descriptor with zero counts that participates in the compact row.
    pub fn new(id: StoryId, thumbnail: ThumbnailRef, name: impl Into<String>) -> Self {
        Self {
            id,
            thumbnail,
            name: name.into(),
            count: 0,
            unread_count: 0,
            skip_small: false,
        }
    }

    /// Builder: set story counts.
    pub fn with_counts(mut self, count: u32, unread_count: u32) -> Self {
        self.count = count;
        self.unread_count = unread_count;
        self
    }

    /// Builder: hide this item from the compact row.
    pub fn skipping_small(mut self, skip_small: bool) -> Self {
        self.skip_small = skip_small;
        self
    }

    /// Whether both descriptors point at the same thumbnail provider.
    pub fn same_thumbnail(&self, other: &ContentElement) -> bool {
        Rc::ptr_eq(&self.thumbnail, &other.thumbnail)
    }

    /// Whether any stories are unread.
    pub fn has_unread(&self) -> bool {
        self.unread_count > 0
    }
}

impl PartialEq for ContentElement {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.same_thumbnail(other)
            && self.name == other.name
            && self.count == other.count
            && self.unread_count == other.unread_count
            && self.skip_small == other.skip_small
    }
}

/// Ordered snapshot of all story items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Content {
    /// Descriptors in display order.
    pub elements: Vec<ContentElement>,
}

impl Content {
    /// Wrap an ordered list of descriptors.
    pub fn new(elements: Vec<ContentElement>) -> Self {
        Self { elements }
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the snapshot has no descriptors.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl From<Vec<ContentElement>> for Content {
    fn from(elements: Vec<ContentElement>) -> Self {
        Self::new(elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::thumbnail::LetterThumbnail;

    fn element(id: u64, thumbnail: &ThumbnailRef, name: &str) -> ContentElement {
        ContentElement::new(StoryId::new(id), Rc::clone(thumbnail), name)
    }

    #[test]
    fn equal_when_all_fields_and_thumbnail_handle_match() {
        let thumb = LetterThumbnail::shared("Ann");
        let a = element(1, &thumb, "Ann").with_counts(3, 1);
        let b = element(1, &thumb, "Ann").with_counts(3, 1);
        assert_eq!(a, b);
    }

    #[test]
    fn different_thumbnail_handles_are_not_equal() {
        let a = element(1, &LetterThumbnail::shared("Ann"), "Ann");
        let b = element(1, &LetterThumbnail::shared("Ann"), "Ann");
        assert_ne!(a, b, "thumbnails compare by identity, not by content");
    }

    #[test]
    fn unread_count_participates_in_equality() {
        let thumb = LetterThumbnail::shared("Bob");
        let a = element(2, &thumb, "Bob").with_counts(2, 0);
        let b = element(2, &thumb, "Bob").with_counts(2, 1);
        assert_ne!(a, b);
        assert!(b.has_unread());
        assert!(!a.has_unread());
    }

    #[test]
    fn snapshots_compare_structurally() {
        let thumb = LetterThumbnail::shared("Cy");
        let first = Content::new(vec![element(1, &thumb, "Cy")]);
        let second = Content::new(vec![element(1, &thumb, "Cy")]);
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
        assert!(!first.is_empty());
        assert!(Content::default().is_empty());
    }
}
