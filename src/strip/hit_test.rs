//! Pointer hit-testing against the interpolated layout.
//!
//! Slot boundaries are computed for both presentations and blended with
//! the same ratio the painter uses. Below a ratio of 0.5 indices resolve
//! against the compact window, at or above it against the full window.

use super::events::CursorShape;
use super::layout::Layout;
use super::style::SmallStyle;

/// Result of hit-testing a pointer coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTestResult {
    /// Pointer is not over any item.
    Miss,

    /// Pointer is over an item.
    Hit {
        /// Absolute item index.
        index: usize,
    },
}

impl HitTestResult {
    /// Create a miss result.
    pub fn miss() -> Self {
        HitTestResult::Miss
    }

    /// Create a hit result.
    pub fn hit(index: usize) -> Self {
        HitTestResult::Hit { index }
    }

    /// Check if this was a hit.
    pub fn is_hit(&self) -> bool {
        matches!(self, HitTestResult::Hit { .. })
    }

    /// Get the item index if hit.
    pub fn index(&self) -> Option<usize> {
        match self {
            HitTestResult::Hit { index } => Some(*index),
            HitTestResult::Miss => None,
        }
    }
}

/// Maps pointer x-coordinates to item indices.
#[derive(Debug, Clone, Copy)]
pub struct HitTester {
    small: SmallStyle,
    full_clickable: bool,
}

impl HitTester {
    /// Create a tester for the given compact metrics.
    ///
    /// With `full_clickable` the region past the last visible slot selects
    /// that slot instead of nothing.
    pub fn new(small: SmallStyle, full_clickable: bool) -> Self {
        Self {
            small,
            full_clickable,
        }
    }

    /// Resolve widget-local pointer `x` against `layout`.
    pub fn test(&self, layout: &Layout, x: f64) -> HitTestResult {
        let st = &self.small;
        // Painting is translated by the shift; undo it for the pointer.
        let x = x - layout.geometry_shift.x;

        let first_right_full = layout.left_full + (layout.start_index_full + 1) * layout.single_full;
        let second_left_full = first_right_full;
        // Edges start at the first painted compact cell, which moves by one
        // shift once a scrolled window starts past the skipped item.
        let cell_left_small = layout.left_small + layout.start_index_small * layout.single_small;
        let first_right_small = cell_left_small + st.photo_left + st.photo;
        let second_left_small = if layout.small_skip > layout.start_index_small {
            cell_left_small + st.photo_left + st.shift
        } else {
            first_right_small
        };
        let last_right_add_small = st.photo_left;
        let last_right_add_full = 0;

        let first_right = layout.lerp(f64::from(first_right_small), f64::from(first_right_full));
        let second_left = layout.lerp(f64::from(second_left_small), f64::from(second_left_full));
        let last_right_add = layout.lerp(
            f64::from(last_right_add_small),
            f64::from(last_right_add_full),
        );

        let (start, end) = if layout.ratio >= 0.5 {
            (layout.start_index_full, layout.end_index_full)
        } else {
            (layout.start_index_small, layout.end_index_small)
        };
        let span = end - start;
        if span <= 0 {
            return HitTestResult::miss();
        }

        let slot = if x < second_left {
            0
        } else {
            ((x - first_right).max(0.0) / layout.single).floor() as i32 + 1
        };
        let relative = if slot == span
            && x < first_right + f64::from(span - 1) * layout.single + last_right_add
        {
            // The trailing part of the last slot still belongs to it.
            slot - 1
        } else if slot >= span {
            if self.full_clickable {
                span - 1
            } else {
                return HitTestResult::miss();
            }
        } else {
            slot
        };

        let absolute = start + relative;
        if relative < 0 || absolute >= layout.items_count {
            return HitTestResult::miss();
        }
        usize::try_from(absolute).map_or(HitTestResult::Miss, HitTestResult::hit)
    }
}

/// Tracks the hovered item and derives the cursor affordance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hover {
    selected: Option<usize>,
}

impl Hover {
    /// Currently hovered item.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Store a new hit-test result.
    ///
    /// Returns a cursor change only when the selection flips between some
    /// item and no item.
    pub fn update(&mut self, result: HitTestResult) -> Option<CursorShape> {
        let selected = result.index();
        if selected == self.selected {
            return None;
        }
        let over = selected.is_some();
        let was_over = self.selected.is_some();
        self.selected = selected;
        (over != was_over).then_some(if over {
            CursorShape::Pointer
        } else {
            CursorShape::Default
        })
    }

    /// Forget the hovered item without a cursor change.
    pub fn clear(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strip::layout::{compute_layout, LayoutInput};
    use crate::strip::style::StripStyle;

    fn tester(full_clickable: bool) -> HitTester {
        HitTester::new(StripStyle::default().small, full_clickable)
    }

    /// Five items, viewport 40: full pitch 10 from left 1, compact pitch 3.
    fn layout(expanded: bool) -> Layout {
        let input = LayoutInput {
            last_ratio: if expanded { 1.0 } else { 0.0 },
            ..LayoutInput::new(5, 40)
        };
        compute_layout(&input, &StripStyle::default(), if expanded { 1.0 } else { 0.0 })
    }

    mod result {
        use super::*;

        #[test]
        fn constructors_and_accessors() {
            assert_eq!(HitTestResult::miss(), HitTestResult::Miss);
            assert!(!HitTestResult::miss().is_hit());
            assert_eq!(HitTestResult::miss().index(), None);

            let hit = HitTestResult::hit(4);
            assert!(hit.is_hit());
            assert_eq!(hit.index(), Some(4));
        }
    }

    mod full_presentation {
        use super::*;

        #[test]
        fn pointer_two_pitches_in_selects_third_item() {
            let layout = layout(true);
            let x = f64::from(layout.left_full + layout.single_full * 2 + 1);
            assert_eq!(tester(false).test(&layout, x), HitTestResult::hit(2));
        }

        #[test]
        fn pointer_left_of_row_selects_first_item() {
            let layout = layout(true);
            let x = f64::from(layout.left_full - 5);
            assert_eq!(tester(false).test(&layout, x), HitTestResult::hit(0));
        }

        #[test]
        fn pointer_past_last_visible_slot_misses() {
            let layout = layout(true);
            assert_eq!(tester(false).test(&layout, 41.0), HitTestResult::Miss);
        }

        #[test]
        fn full_clickable_resolves_trailing_region_to_last_visible() {
            let layout = layout(true);
            assert_eq!(layout.end_index_full, 4);
            assert_eq!(tester(true).test(&layout, 41.0), HitTestResult::hit(3));
        }

        #[test]
        fn scrolled_window_maps_to_absolute_index() {
            let input = LayoutInput {
                last_ratio: 1.0,
                scroll_left: 25,
                ..LayoutInput::new(10, 40)
            };
            let layout = compute_layout(&input, &StripStyle::default(), 1.0);
            // First visible slot is item 2, its right edge at -24 + 30 = 6.
            assert_eq!(tester(false).test(&layout, 3.0), HitTestResult::hit(2));
            assert_eq!(tester(false).test(&layout, 7.0), HitTestResult::hit(3));
        }
    }

    mod compact_presentation {
        use super::*;

        #[test]
        fn slots_follow_compact_pitch() {
            let layout = layout(false);
            let tester = tester(false);
            assert_eq!(tester.test(&layout, 5.0), HitTestResult::hit(0));
            assert_eq!(tester.test(&layout, 6.0), HitTestResult::hit(1));
            assert_eq!(tester.test(&layout, 9.0), HitTestResult::hit(2));
        }

        #[test]
        fn trailing_part_of_last_circle_stays_clickable() {
            let layout = layout(false);
            // Last slot ends at 6 + 2 * 3 + photo_left 1 = 13.
            assert_eq!(tester(false).test(&layout, 12.0), HitTestResult::hit(2));
            assert_eq!(tester(false).test(&layout, 13.0), HitTestResult::Miss);
        }

        #[test]
        fn skipped_first_item_owns_only_the_left_edge() {
            let input = LayoutInput {
                first_skips_small: true,
                ..LayoutInput::new(5, 40)
            };
            let layout = compute_layout(&input, &StripStyle::default(), 0.0);
            assert_eq!(layout.small_skip, 1);
            let tester = tester(false);

            // Second circle starts at -2 + 1 + 3 = 2 and the first ends at 3.
            assert_eq!(tester.test(&layout, 1.5), HitTestResult::hit(0));
            assert_eq!(tester.test(&layout, 2.0), HitTestResult::hit(1));
            assert_eq!(tester.test(&layout, 5.5), HitTestResult::hit(1));
            assert_eq!(tester.test(&layout, 6.0), HitTestResult::hit(2));
            assert_eq!(tester.test(&layout, 12.0), HitTestResult::hit(3));
            assert_eq!(tester.test(&layout, 13.0), HitTestResult::Miss);
        }

        #[test]
        fn scrolled_window_past_skipped_item_keeps_first_circle() {
            let input = LayoutInput {
                first_skips_small: true,
                scroll_left: 25,
                ..LayoutInput::new(10, 40)
            };
            let layout = compute_layout(&input, &StripStyle::default(), 0.0);
            assert_eq!(layout.start_index_small, 1);
            let tester = tester(false);

            // Item 1 is painted from 2 to 6 at the start of the window.
            assert_eq!(tester.test(&layout, 3.0), HitTestResult::hit(1));
            assert_eq!(tester.test(&layout, 5.5), HitTestResult::hit(1));
            assert_eq!(tester.test(&layout, 6.0), HitTestResult::hit(2));
        }

        #[test]
        fn empty_layout_always_misses() {
            let layout = compute_layout(&LayoutInput::new(0, 40), &StripStyle::default(), 0.0);
            assert_eq!(tester(true).test(&layout, 0.0), HitTestResult::Miss);
        }
    }

    mod transition {
        use super::*;
        use crate::strip::geometry::Point;
        use crate::strip::layout::Transition;

        #[test]
        fn geometry_shift_is_undone_before_resolving() {
            let input = LayoutInput {
                last_ratio: 0.6,
                transition: Some(Transition {
                    from: Point::new(20, 0),
                    to: Point::new(0, 0),
                    widget: Point::new(0, 0),
                }),
                ..LayoutInput::new(5, 40)
            };
            let layout = compute_layout(&input, &StripStyle::default(), 1.0);
            assert!((layout.geometry_shift.x - 8.0).abs() < 1e-9);
            let unshifted = LayoutInput {
                transition: None,
                ..input
            };
            let plain = compute_layout(&unshifted, &StripStyle::default(), 1.0);

            for x in [2.0, 9.5, 17.0, 26.0] {
                assert_eq!(
                    tester(false).test(&layout, x + layout.geometry_shift.x),
                    tester(false).test(&plain, x)
                );
            }
        }

        #[test]
        fn window_switches_to_full_at_half_ratio() {
            let at = |ratio: f64| {
                let input = LayoutInput {
                    last_ratio: ratio,
                    first_skips_small: true,
                    scroll_left: 25,
                    ..LayoutInput::new(10, 40)
                };
                compute_layout(&input, &StripStyle::default(), 1.0)
            };
            // Compact window starts at item 1, full window at item 2.
            assert_eq!(tester(false).test(&at(0.49), 0.0), HitTestResult::hit(1));
            assert_eq!(tester(false).test(&at(0.5), 0.0), HitTestResult::hit(2));
        }
    }

    mod hover {
        use super::*;

        #[test]
        fn cursor_changes_only_on_over_flip() {
            let mut hover = Hover::default();
            assert_eq!(hover.update(HitTestResult::hit(0)), Some(CursorShape::Pointer));
            assert_eq!(hover.update(HitTestResult::hit(1)), None);
            assert_eq!(hover.selected(), Some(1));
            assert_eq!(hover.update(HitTestResult::Miss), Some(CursorShape::Default));
            assert_eq!(hover.update(HitTestResult::Miss), None);
        }
    }
}
