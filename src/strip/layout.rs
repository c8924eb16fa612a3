//! Per-frame interpolated layout.
//!
//! [`compute_layout`] is the single source of geometry for painting,
//! hit-testing and compact sizing. Both presentations are computed with
//! integer arithmetic, then every quantity that differs between them is
//! blended by one ratio, so hit-testing can never disagree with what is
//! painted.
//!
//! # Blended Ratio
//! ```text
//! ratio = last_ratio * expanded + last_ratio * friction * (1 - expanded)
//! ```
//! `last_ratio` comes from the host's expanding height, `expanded` from the
//! expand/collapse animation. While compact, the strip only follows the
//! host's height with the damped friction share.

use super::geometry::{Point, PointF};
use super::style::StripStyle;

/// Origins needed for the positional shift while transitioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    /// Compact box origin captured when the transition began.
    pub from: Point,
    /// Full box origin supplied by the host.
    pub to: Point,
    /// Current widget origin (the union of both boxes).
    pub widget: Point,
}

/// Everything the layout depends on besides style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutInput {
    /// Number of items.
    pub items_count: usize,
    /// Whether the first item is hidden from the compact row.
    pub first_skips_small: bool,
    /// Width the full row is laid out in.
    pub viewport_width: i32,
    /// Horizontal scroll offset of the full row.
    pub scroll_left: i32,
    /// Last observed expansion ratio.
    pub last_ratio: f64,
    /// Damping of the compact contribution.
    pub friction_ratio: f64,
    /// Maximum circles in the compact row.
    pub small_thumbs_shown: i32,
    /// Present only in the transitioning state.
    pub transition: Option<Transition>,
}

impl LayoutInput {
    /// Input for `items_count` items with no scroll, ratio or transition.
    pub fn new(items_count: usize, viewport_width: i32) -> Self {
        Self {
            items_count,
            first_skips_small: false,
            viewport_width,
            scroll_left: 0,
            last_ratio: 0.0,
            friction_ratio: super::params::FRICTION_RATIO,
            small_thumbs_shown: super::params::SMALL_THUMBS_SHOWN,
            transition: None,
        }
    }
}

/// Interpolated geometry for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    /// Number of items.
    pub items_count: i32,
    /// Offset the painter is translated by while transitioning.
    pub geometry_shift: PointF,
    /// Host-driven ratio before friction blending.
    pub expanded_ratio: f64,
    /// Blended ratio used for every interpolation.
    pub ratio: f64,
    /// Interpolated x of the first visible photo.
    pub thumbnail_left: f64,
    /// Interpolated margin between slot edge and photo.
    pub photo_left: f64,
    /// Interpolated x of the first visible slot.
    pub left: f64,
    /// Interpolated pitch.
    pub single: f64,
    /// 1 when the first compact slot is hidden, else 0.
    pub small_skip: i32,
    /// Full row origin after scroll and edge spacing.
    pub left_full: i32,
    /// Compact row origin.
    pub left_small: i32,
    /// Full pitch.
    pub single_full: i32,
    /// Compact pitch.
    pub single_small: i32,
    /// First compact slot index (inclusive).
    pub start_index_small: i32,
    /// Last compact slot index (exclusive).
    pub end_index_small: i32,
    /// First visible full slot index (inclusive).
    pub start_index_full: i32,
    /// Last visible full slot index (exclusive).
    pub end_index_full: i32,
}

impl Layout {
    /// Blend `a` (compact) towards `b` (full) by the layout ratio.
    pub fn lerp(&self, a: f64, b: f64) -> f64 {
        a + (b - a) * self.ratio
    }

    /// Number of slots a paint pass walks.
    pub fn slot_count(&self) -> i32 {
        (self.end_index_full - self.start_index_full)
            .max(self.end_index_small - self.start_index_small)
    }

    /// Interpolated x of the slot at `index` relative to the first visible one.
    pub fn slot_x(&self, index: i32) -> f64 {
        self.left + self.single * f64::from(index)
    }
}

/// Compute the layout for an expand/collapse animation value in `[0, 1]`.
pub fn compute_layout(input: &LayoutInput, style: &StripStyle, expanded: f64) -> Layout {
    let st = &style.small;
    let full = &style.full;
    let expanded_ratio = input.last_ratio;
    let collapsed_ratio = expanded_ratio * input.friction_ratio;
    let ratio = expanded_ratio * expanded + collapsed_ratio * (1.0 - expanded);
    let lerp = |a: f64, b: f64| a + (b - a) * ratio;

    let width_full = input.viewport_width;
    let items_count = i32::try_from(input.items_count).unwrap_or(i32::MAX);
    let single_full_min = full.single_min();
    let total_full = full.content_width(input.items_count);
    let skip_side = if total_full < width_full {
        (width_full - total_full) / (items_count + 1)
    } else {
        0
    };
    let skip_between = if total_full < width_full && items_count > 1 {
        (width_full - total_full - 2 * skip_side) / (items_count - 1)
    } else {
        skip_side
    };
    let single_full = single_full_min + skip_between;

    let small_skip = i32::from(items_count > 1 && input.first_skips_small);
    let small_count = input.small_thumbs_shown.min(items_count - small_skip);
    let left_small = st.left - if small_skip > 0 { st.shift } else { 0 };
    let left_full = full.left - input.scroll_left + skip_side;

    let start_index_full = (-left_full).max(0) / single_full;
    let cell_left_full = left_full + start_index_full * single_full;
    let end_index_full = ((width_full - left_full + single_full - 1) / single_full)
        .min(items_count)
        .max(start_index_full);
    let start_index_small = start_index_full.min(small_skip);
    let end_index_small = small_skip + small_count.max(0);
    let cell_left_small = left_small + start_index_small * st.shift;

    let thumbnail_left_full = cell_left_full + full.photo_left;
    let thumbnail_left_small = cell_left_small + st.photo_left;
    let thumbnail_left = lerp(
        f64::from(thumbnail_left_small),
        f64::from(thumbnail_left_full),
    );
    let photo_left = lerp(f64::from(st.photo_left), f64::from(full.photo_left));

    let geometry_shift = input
        .transition
        .map(|t| {
            PointF::new(
                lerp(f64::from(t.from.x), f64::from(t.to.x)) - f64::from(t.widget.x),
                lerp(f64::from(t.from.y), f64::from(t.to.y)) - f64::from(t.widget.y),
            )
        })
        .unwrap_or_default();

    Layout {
        items_count,
        geometry_shift,
        expanded_ratio,
        ratio,
        thumbnail_left,
        photo_left,
        left: thumbnail_left - photo_left,
        single: lerp(f64::from(st.shift), f64::from(single_full)),
        small_skip,
        left_full,
        left_small,
        single_full,
        single_small: st.shift,
        start_index_small,
        end_index_small,
        start_index_full,
        end_index_full,
    }
}
