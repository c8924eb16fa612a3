//! Renderer-facing description of one frame.
//!
//! The plan resolves every visible slot to the items it shows in each
//! presentation and lists them in paint order, so a renderer only has to
//! draw circles and names at the given positions.

use super::layout::Layout;
use super::params::StripConfig;
use super::style::StripStyle;

/// Items a slot shows in each presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotItems {
    /// Nothing to paint.
    None,
    /// Only the compact circle is visible.
    CompactOnly(usize),
    /// Only the full circle is visible.
    FullOnly(usize),
    /// Both presentations are visible; indices may differ mid-animation.
    Both {
        /// Item shown by the compact circle.
        compact: usize,
        /// Item shown by the full circle.
        full: usize,
    },
}

impl SlotItems {
    fn from_pair(compact: Option<usize>, full: Option<usize>) -> Self {
        match (compact, full) {
            (None, None) => SlotItems::None,
            (Some(compact), None) => SlotItems::CompactOnly(compact),
            (None, Some(full)) => SlotItems::FullOnly(full),
            (Some(compact), Some(full)) => SlotItems::Both { compact, full },
        }
    }

    /// Item of the compact presentation.
    pub fn compact(&self) -> Option<usize> {
        match *self {
            SlotItems::CompactOnly(index) | SlotItems::Both { compact: index, .. } => Some(index),
            _ => None,
        }
    }

    /// Item of the full presentation.
    pub fn full(&self) -> Option<usize> {
        match *self {
            SlotItems::FullOnly(index) | SlotItems::Both { full: index, .. } => Some(index),
            _ => None,
        }
    }

    /// Whether the slot shows anything.
    pub fn is_some(&self) -> bool {
        !matches!(self, SlotItems::None)
    }
}

/// One visible slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    /// Slot index relative to the first visible one.
    pub index: i32,
    /// Left edge of the slot.
    pub x: f64,
    /// Top of the photo.
    pub photo_top: f64,
    /// Items shown.
    pub items: SlotItems,
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawPlan {
    /// Layout the plan was built from.
    pub layout: Layout,
    /// Visibility of the full presentation in `[0, 1]`.
    pub expand_ratio: f64,
    /// Photo diameter.
    pub photo: f64,
    /// Half the unread ring width.
    pub line: f64,
    /// Half the read ring width.
    pub line_read: f64,
    /// Name line geometry relative to the slot.
    pub name_left: f64,
    /// Top of the name line.
    pub name_top: f64,
    /// Scaled name width.
    pub name_width: f64,
    /// Scaled name height.
    pub name_height: f64,
    /// Opacity of read thumbnails shown in both presentations.
    pub read_opacity: f64,
    /// Opacity of read thumbnails that only exist in the compact row.
    pub read_appearing_opacity: f64,
    /// Slots in paint order (last to first).
    pub slots: Vec<Slot>,
}

impl DrawPlan {
    /// Build the plan for `layout`.
    pub fn build(layout: &Layout, style: &StripStyle, config: &StripConfig) -> Self {
        let st = &style.small;
        let full = &style.full;
        let ratio = layout.ratio;
        let hidden_below = config.expand_after_ratio * config.friction_ratio;
        let expand_ratio = if ratio >= config.collapse_after_ratio {
            1.0
        } else if ratio <= hidden_below {
            0.0
        } else {
            (ratio - hidden_below) / (config.collapse_after_ratio - hidden_below)
        };
        let elerp = |a: f64, b: f64| a + (b - a) * expand_ratio;

        let photo_top_small = f64::from(st.photo_top);
        let photo_top =
            photo_top_small + (f64::from(full.photo_top) - photo_top_small) * layout.expanded_ratio;
        let photo = layout.lerp(f64::from(st.photo), f64::from(full.photo));
        let name_scale = layout.expanded_ratio;
        let name_width = name_scale * f64::from(full.available_name_width());

        let draw_small = expand_ratio < 1.0;
        let draw_full = expand_ratio > 0.0;
        let lookup = |index: i32| -> Slot {
            let index_small = layout.start_index_small + index;
            let index_full = layout.start_index_full + index;
            let stack = f64::from(config.small_thumbs_shown - index_small + layout.small_skip);
            let y_small = photo_top_small + (photo_top - photo_top_small) * stack / 0.5;
            let compact = (draw_small
                && index_small < layout.end_index_small
                && index_small >= layout.small_skip)
                .then(|| usize::try_from(index_small).ok())
                .flatten();
            let full_item = (draw_full && index_full < layout.end_index_full)
                .then(|| usize::try_from(index_full).ok())
                .flatten();
            Slot {
                index,
                x: layout.slot_x(index),
                photo_top: elerp(y_small, photo_top),
                items: SlotItems::from_pair(compact, full_item),
            }
        };

        // The hidden compact slot, when it shows a full item, is painted
        // right below the first visible one.
        let first = layout.small_skip - layout.start_index_small;
        let count = layout.slot_count();
        let mut slots = Vec::with_capacity(usize::try_from(count).unwrap_or(0) + 1);
        for index in (first.max(0)..count).rev() {
            if index == first && index > 0 {
                let skipped = lookup(index - 1);
                if skipped.items.is_some() {
                    slots.push(skipped);
                }
            }
            let slot = lookup(index);
            if slot.items.is_some() {
                slots.push(slot);
            }
        }

        Self {
            layout: *layout,
            expand_ratio,
            photo,
            line: elerp(f64::from(st.line_twice), f64::from(full.line_twice)) / 2.0,
            line_read: elerp(f64::from(st.line_read_twice), f64::from(full.line_read_twice)) / 2.0,
            name_left: layout.photo_left + (photo - name_width) / 2.0,
            name_top: f64::from(full.name_top) + (photo_top + photo
                - f64::from(full.photo_top)
                - f64::from(full.photo)),
            name_width,
            name_height: name_scale * f64::from(full.name_height),
            read_opacity: elerp(style.read_opacity, 1.0),
            read_appearing_opacity: elerp(style.read_opacity, 0.0),
            slots,
        }
    }
}
