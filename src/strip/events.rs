//! Outgoing notifications of the strip.
//!
//! Handlers run synchronously and queue events; the host drains them with
//! [`crate::strip::StoriesList::take_events`] after each input or frame.

use crate::model::StoryId;

/// Pointer cursor the host should show over the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    /// Arrow.
    #[default]
    Default,
    /// Hand, shown while an item is hovered.
    Pointer,
}

/// Event emitted to the surrounding application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripEvent {
    /// An item was clicked while expanded.
    Clicked(StoryId),
    /// Expanded mode was requested (`true`) or compact mode (`false`).
    ExpandedToggled(bool),
    /// The pointer entered the strip.
    Entered,
    /// Fewer than the preload pages remain to scroll.
    LoadMoreRequested,
    /// The collapsed bounding box moved during an expand/collapse animation.
    CollapsedGeometryChanged,
    /// Cursor affordance changed.
    CursorChanged(CursorShape),
}

/// One entry of a context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuAction {
    /// Visible label.
    pub label: String,
    /// Host-defined command identifier.
    pub command: String,
}

/// Context menu built for one story.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenu {
    /// Story the menu was requested for.
    pub story: StoryId,
    /// Entries in display order.
    pub actions: Vec<MenuAction>,
}

impl ContextMenu {
    /// Create an empty menu for `story`.
    pub fn new(story: StoryId) -> Self {
        Self {
            story,
            actions: Vec::new(),
        }
    }

    /// Append an entry.
    pub fn add_action(&mut self, label: impl Into<String>, command: impl Into<String>) {
        self.actions.push(MenuAction {
            label: label.into(),
            command: command.into(),
        });
    }

    /// Whether no entries were added.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Host hook filling a context menu for the given story.
pub type MenuPopulator = Box<dyn FnMut(StoryId, &mut ContextMenu)>;
