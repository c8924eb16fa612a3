//! The stories strip widget model.
//!
//! [`StoriesList`] wires the item store, expansion state machine, layout,
//! scroll, drag and hit-testing together behind the input handlers a host
//! toolkit calls. It owns no timer and draws nothing: the host advances
//! animations with [`StoriesList::tick`], asks for a [`DrawPlan`] to paint,
//! and drains [`StripEvent`]s after every call.
//!
//! Pointer positions are in the parent's coordinates; the strip maps them
//! through its own geometry, which it recomputes on every discrete state
//! change.

use super::drag::{DragController, ReleaseOutcome};
use super::draw_plan::DrawPlan;
use super::events::{ContextMenu, MenuPopulator, StripEvent};
use super::expansion::{ExpansionController, StripState};
use super::geometry::{Alignment, Point, Rect};
use super::hit_test::{HitTester, Hover};
use super::item_store::{Item, ItemStore, NameCache, SnapshotOutcome};
use super::layout::{compute_layout, Layout, LayoutInput, Transition};
use super::params::StripConfig;
use super::scroll::ScrollController;
use super::style::StripStyle;
use crate::model::{Content, StoryId, StripError};
use std::cell::Cell;
use std::mem;
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

/// Stories strip state and interaction handling.
pub struct StoriesList {
    style: StripStyle,
    config: StripConfig,
    store: ItemStore,
    scroll: ScrollController,
    expansion: ExpansionController,
    drag: DragController,
    hit_tester: HitTester,
    hover: Hover,
    geometry: Rect,
    position_small: Point,
    align_small: Alignment,
    geometry_full: Rect,
    changing_geometry_from: Rect,
    last_pointer: Point,
    events: Vec<StripEvent>,
    repaint: Rc<Cell<bool>>,
    menu: Option<ContextMenu>,
    menu_populator: Option<MenuPopulator>,
}

impl StoriesList {
    /// Create an empty, compact strip.
    ///
    /// # Errors
    /// Returns [`StripError::NonPositiveMetric`] when the style would make a
    /// pitch or the expanding capacity non-positive.
    pub fn new(style: StripStyle, config: StripConfig) -> Result<Self, StripError> {
        style.validate()?;
        Ok(Self {
            expansion: ExpansionController::new(&config, style.full.height),
            drag: DragController::new(config.drag_distance, config.direction_sign()),
            hit_tester: HitTester::new(style.small, config.full_clickable),
            style,
            config,
            store: ItemStore::new(),
            scroll: ScrollController::new(),
            hover: Hover::default(),
            geometry: Rect::default(),
            position_small: Point::default(),
            align_small: Alignment::default(),
            geometry_full: Rect::default(),
            changing_geometry_from: Rect::default(),
            last_pointer: Point::default(),
            events: Vec::new(),
            repaint: Rc::new(Cell::new(true)),
            menu: None,
            menu_populator: None,
        })
    }

    // ===== Content =====

    /// Apply a content snapshot.
    pub fn show_content(&mut self, content: Content) -> SnapshotOutcome {
        let outcome = self.store.apply_snapshot(content);
        match outcome {
            SnapshotOutcome::Unchanged => return outcome,
            SnapshotOutcome::Cleared => self.update_geometry(),
            SnapshotOutcome::Updated { count_changed, .. } => {
                if count_changed {
                    self.update_geometry();
                }
            }
        }
        self.update_scroll_max();
        self.request_repaint();
        outcome
    }

    /// Items in display order.
    pub fn items(&self) -> &[Item] {
        self.store.items()
    }

    /// Whether the strip has nothing to show.
    pub fn is_empty(&self) -> bool {
        self.store.is_marked_empty()
    }

    /// Subscribe the item's thumbnail to repaint notifications.
    pub fn validate_thumbnail(&mut self, index: usize) -> bool {
        let repaint = Rc::clone(&self.repaint);
        self.store
            .validate_thumbnail(index, move || repaint.set(true))
    }

    /// Elided name of the item, rebuilt when missing or of another color.
    pub fn validate_name(&mut self, index: usize, color: (u8, u8, u8)) -> Option<&NameCache> {
        let available = usize::try_from(self.style.full.available_name_width()).unwrap_or(0);
        self.store.validate_name(index, color, available)
    }

    // ===== Geometry =====

    /// Store the host's placement inputs and recompute geometry.
    pub fn set_layout_constraints(
        &mut self,
        position_small: Point,
        align_small: Alignment,
        geometry_full: Rect,
    ) {
        self.position_small = position_small;
        self.align_small = align_small;
        self.geometry_full = geometry_full;
        self.update_geometry();
    }

    /// Current bounding box in parent coordinates.
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Collapsed bounding box at the current animation value, plus that value.
    ///
    /// The box is empty once fully expanded.
    pub fn collapsed_geometry_current(&self) -> (Rect, f64) {
        let expanded = self.expansion.expanded_value();
        if expanded == 1.0 {
            return (Rect::default(), 1.0);
        }
        let layout = self.layout_at(0.0);
        let small = self.count_small_geometry();
        let index = layout.small_skip - layout.start_index_small;
        let shift = f64::from(self.geometry.x) + layout.geometry_shift.x;
        let left = (shift + layout.slot_x(index)).round() as i32;
        (
            Rect::new(left, small.y, small.right() - left, small.height),
            expanded,
        )
    }

    fn update_geometry(&mut self) {
        let geometry = match self.expansion.state() {
            StripState::Compact => self.count_small_geometry(),
            StripState::Transitioning => {
                self.changing_geometry_from = self.count_small_geometry();
                self.geometry_full.united(&self.changing_geometry_from)
            }
            StripState::Expanded => self.geometry_full,
        };
        self.set_geometry(geometry);
        self.request_repaint();
    }

    fn set_geometry(&mut self, geometry: Rect) {
        if self.geometry == geometry {
            return;
        }
        let resized = self.geometry.width != geometry.width;
        self.geometry = geometry;
        if resized {
            self.update_scroll_max();
        }
    }

    fn count_small_geometry(&self) -> Rect {
        let st = &self.style.small;
        if self.store.is_marked_empty() {
            return Rect::new(self.position_small.x, self.position_small.y, 0, 0);
        }
        let layout = self.layout_at(0.0);
        let count = layout.end_index_small - layout.start_index_small.max(layout.small_skip);
        let width = st.left + st.photo_left + st.photo + (count - 1) * st.shift + st.photo_left + st.left;
        Rect::new(
            self.align_small.left_for(self.position_small.x, width),
            self.position_small.y,
            width,
            st.photo_top + st.photo + st.photo_top,
        )
    }

    // ===== Layout =====

    fn layout_input(&self) -> LayoutInput {
        let transition = (self.expansion.state() == StripState::Transitioning).then(|| Transition {
            from: self.changing_geometry_from.origin(),
            to: self.geometry_full.origin(),
            widget: self.geometry.origin(),
        });
        LayoutInput {
            items_count: self.store.len(),
            first_skips_small: self.store.first_skips_small(),
            viewport_width: self.geometry.width,
            scroll_left: self.scroll.left(),
            last_ratio: self.expansion.last_ratio(),
            friction_ratio: self.config.friction_ratio,
            small_thumbs_shown: self.config.small_thumbs_shown,
            transition,
        }
    }

    /// Layout at an explicit animation value, without re-reading the ratio.
    pub fn layout_at(&self, expanded: f64) -> Layout {
        compute_layout(&self.layout_input(), &self.style, expanded)
    }

    /// Layout for the current frame.
    ///
    /// Re-evaluates the expansion ratio from the last expanding height first,
    /// which may request a mode change.
    pub fn layout(&mut self) -> Layout {
        if let Some(expanded) = self.expansion.sync() {
            self.events.push(StripEvent::ExpandedToggled(expanded));
        }
        self.layout_at(self.expansion.expanded_value())
    }

    /// Paint description for the current frame.
    pub fn draw_plan(&mut self) -> DrawPlan {
        let layout = self.layout();
        DrawPlan::build(&layout, &self.style, &self.config)
    }

    // ===== Expansion =====

    /// Feed the host's expanding height.
    pub fn set_expanded_height(&mut self, height: i32, momentum: bool) {
        let before = self.expansion.state();
        self.expansion.set_expanded_height(height, momentum);
        if self.expansion.state() != before {
            self.update_geometry();
        }
        self.request_repaint();
    }

    /// Request expanded or compact mode. Always notifies the host.
    pub fn request_expanded(&mut self, expanded: bool) {
        self.expansion.request_expanded(expanded);
        self.events.push(StripEvent::ExpandedToggled(expanded));
        self.request_repaint();
    }

    /// Advance animations by one frame. Returns whether anything animated.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let before = self.expansion.state();
        let tick = self.expansion.advance(delta);
        if tick.expanded.ticked() {
            self.expansion.check_for_full_state();
            self.request_repaint();
            self.events.push(StripEvent::CollapsedGeometryChanged);
        }
        if tick.catch_up.ticked() {
            self.request_repaint();
            self.expansion.check_for_full_state();
        }
        if self.expansion.state() != before {
            self.update_geometry();
        }
        tick.expanded.ticked() || tick.catch_up.ticked()
    }

    /// Whether an animation is running and frames should keep coming.
    pub fn is_animating(&self) -> bool {
        self.expansion.animating()
    }

    /// Discrete state.
    pub fn state(&self) -> StripState {
        self.expansion.state()
    }

    /// Whether expanded mode is the current target.
    pub fn is_expanded(&self) -> bool {
        self.expansion.is_expanded()
    }

    /// Current expand/collapse animation value.
    pub fn expanded_value(&self) -> f64 {
        self.expansion.expanded_value()
    }

    // ===== Scroll =====

    /// Current horizontal scroll offset.
    pub fn scroll_left(&self) -> i32 {
        self.scroll.left()
    }

    /// Upper bound of the scroll offset.
    pub fn scroll_max(&self) -> i32 {
        self.scroll.max()
    }

    fn update_scroll_max(&mut self) {
        let content_width = self.style.full.content_width(self.store.len());
        self.scroll
            .clamp_and_update_max(content_width, self.geometry.width);
        self.check_load_more();
        self.request_repaint();
    }

    fn check_load_more(&mut self) {
        if self
            .scroll
            .should_load_more(self.geometry.width, self.config.preload_pages)
        {
            debug!(
                left = self.scroll.left(),
                max = self.scroll.max(),
                "Requesting more stories"
            );
            self.events.push(StripEvent::LoadMoreRequested);
        }
    }

    // ===== Pointer =====

    /// The pointer entered the strip.
    pub fn pointer_entered(&mut self) {
        self.events.push(StripEvent::Entered);
    }

    /// Horizontal wheel input. Returns whether the event was consumed.
    pub fn wheel(&mut self, angle_delta_x: i32, pixel_delta_x: i32) -> bool {
        if angle_delta_x == 0 || self.expansion.state() == StripState::Compact {
            return false;
        }
        let raw = if pixel_delta_x != 0 {
            pixel_delta_x
        } else {
            angle_delta_x
        };
        let delta = self.config.direction_sign() * raw;
        if self.scroll.apply_delta(delta) {
            self.request_expanded(true);
            self.update_selected();
            self.check_load_more();
            self.request_repaint();
        }
        true
    }

    /// Primary button pressed at `position`.
    ///
    /// A compact strip asks to expand right away and records no press. While
    /// transitioning presses are ignored, so only an expanded strip can click.
    pub fn mouse_press(&mut self, position: Point) {
        self.last_pointer = position;
        self.update_selected();
        match self.expansion.state() {
            StripState::Compact => self.request_expanded(true),
            StripState::Transitioning => {}
            StripState::Expanded => self.drag.press(position, self.hover.selected()),
        }
    }

    /// Pointer moved to `position`.
    pub fn mouse_move(&mut self, position: Point) {
        self.last_pointer = position;
        self.update_selected();
        let can_start = self.expansion.state() == StripState::Expanded;
        if self.drag.motion(position, can_start, &mut self.scroll) {
            self.check_load_more();
            self.request_repaint();
        }
    }

    /// Primary button released at `position`.
    pub fn mouse_release(&mut self, position: Point) {
        self.last_pointer = position;
        match self.drag.release(position, &mut self.scroll) {
            ReleaseOutcome::Ignored => self.update_selected(),
            ReleaseOutcome::Dragged { scrolled } => {
                if scrolled {
                    self.check_load_more();
                    self.request_repaint();
                }
                self.update_selected();
            }
            ReleaseOutcome::Tap { pressed } => {
                self.update_selected();
                if self.hover.selected() != pressed
                    || self.expansion.state() != StripState::Expanded
                {
                    return;
                }
                if let Some(id) = pressed.and_then(|index| self.store.get(index)).map(Item::id) {
                    debug!(%id, "Story clicked");
                    self.events.push(StripEvent::Clicked(id));
                }
            }
        }
    }

    /// Hovered item.
    pub fn selected(&self) -> Option<usize> {
        self.hover.selected()
    }

    fn update_selected(&mut self) {
        if self.drag.pressed().is_some() {
            return;
        }
        let local = self.last_pointer - self.geometry.origin();
        let layout = self.layout();
        let result = self.hit_tester.test(&layout, f64::from(local.x));
        if let Some(cursor) = self.hover.update(result) {
            self.events.push(StripEvent::CursorChanged(cursor));
        }
    }

    // ===== Context menu =====

    /// Register the hook that fills context menus.
    pub fn set_menu_populator(&mut self, populator: impl FnMut(StoryId, &mut ContextMenu) + 'static) {
        self.menu_populator = Some(Box::new(populator));
    }

    /// Build a context menu for the hovered item.
    ///
    /// `pointer` is the position when requested by the pointer; keyboard
    /// requests pass `None` and use the current selection.
    pub fn context_menu(&mut self, pointer: Option<Point>) -> Option<ContextMenu> {
        self.menu = None;
        if let Some(position) = pointer {
            self.last_pointer = position;
            self.update_selected();
        }
        let index = self.hover.selected()?;
        if self.store.is_empty() || !self.expansion.is_expanded() {
            return None;
        }
        let id = self.store.get(index)?.id();
        let populate = self.menu_populator.as_mut()?;
        let mut menu = ContextMenu::new(id);
        populate(id, &mut menu);
        if menu.is_empty() {
            return None;
        }
        self.menu = Some(menu.clone());
        Some(menu)
    }

    /// Menu currently open.
    pub fn open_menu(&self) -> Option<&ContextMenu> {
        self.menu.as_ref()
    }

    /// The open menu was dismissed with the pointer at `pointer`.
    pub fn menu_closed(&mut self, pointer: Point) {
        if self.menu.take().is_none() {
            return;
        }
        if self.geometry.contains(pointer) {
            self.last_pointer = pointer;
            self.update_selected();
        }
    }

    // ===== Host notifications =====

    /// Drain queued events.
    pub fn take_events(&mut self) -> Vec<StripEvent> {
        mem::take(&mut self.events)
    }

    /// Whether a repaint was requested since the last call.
    pub fn take_repaint(&self) -> bool {
        self.repaint.replace(false)
    }

    fn request_repaint(&self) {
        self.repaint.set(true);
    }

    /// Style in use.
    pub fn style(&self) -> &StripStyle {
        &self.style
    }

    /// Tunables in use.
    pub fn config(&self) -> &StripConfig {
        &self.config
    }
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
