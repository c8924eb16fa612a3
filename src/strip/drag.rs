//! Press/move/release handling for drag scrolling.
//!
//! A press only records where it happened. The press turns into a drag
//! once the pointer travels at least the drag distance (Manhattan) while the
//! strip is fully expanded. From then on the scroll offset follows the
//! pointer relative to the offset captured when the drag began.

use super::geometry::Point;
use super::scroll::ScrollController;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Press {
    anchor: Point,
    selected: Option<usize>,
}

/// What a release resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// No press was outstanding.
    Ignored,
    /// A drag ended; never a click.
    Dragged {
        /// Whether the final pointer position moved the offset.
        scrolled: bool,
    },
    /// Press and release without a drag.
    Tap {
        /// Item hovered when the press happened.
        pressed: Option<usize>,
    },
}

/// Converts pointer motion into scroll offsets.
#[derive(Debug, Clone)]
pub struct DragController {
    press: Option<Press>,
    dragging: bool,
    start_left: i32,
    last: Point,
    drag_distance: i32,
    sign: i32,
}

impl DragController {
    /// Create a controller with the given threshold and direction sign
    /// (`-1` for right-to-left).
    pub fn new(drag_distance: i32, sign: i32) -> Self {
        Self {
            press: None,
            dragging: false,
            start_left: 0,
            last: Point::default(),
            drag_distance,
            sign,
        }
    }

    /// Record a press at `at` over `selected`.
    pub fn press(&mut self, at: Point, selected: Option<usize>) {
        self.last = at;
        self.press = Some(Press {
            anchor: at,
            selected,
        });
    }

    /// Item pressed on, if a press over an item is outstanding.
    ///
    /// Hover tracking is frozen while this is `Some`.
    pub fn pressed(&self) -> Option<usize> {
        self.press.and_then(|press| press.selected)
    }

    /// Whether a press is outstanding.
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Handle pointer motion; `can_start` gates beginning a new drag.
    ///
    /// Returns whether the scroll offset changed.
    pub fn motion(&mut self, at: Point, can_start: bool, scroll: &mut ScrollController) -> bool {
        self.last = at;
        if let Some(press) = self.press {
            if !self.dragging
                && can_start
                && (at - press.anchor).manhattan_length() >= self.drag_distance
            {
                self.dragging = true;
                self.start_left = scroll.left();
                tracing::debug!(start_left = self.start_left, "Drag started");
            }
        }
        self.apply(scroll)
    }

    /// Handle release at `at`, ending any press or drag.
    pub fn release(&mut self, at: Point, scroll: &mut ScrollController) -> ReleaseOutcome {
        self.last = at;
        if self.dragging {
            let scrolled = self.apply(scroll);
            self.dragging = false;
            self.press = None;
            return ReleaseOutcome::Dragged { scrolled };
        }
        match self.press.take() {
            Some(press) => ReleaseOutcome::Tap {
                pressed: press.selected,
            },
            None => ReleaseOutcome::Ignored,
        }
    }

    fn apply(&self, scroll: &mut ScrollController) -> bool {
        let Some(press) = self.press.filter(|_| self.dragging) else {
            return false;
        };
        let moved = self.sign * (press.anchor.x - self.last.x);
        scroll.set_left(self.start_left.saturating_add(moved))
    }
}
