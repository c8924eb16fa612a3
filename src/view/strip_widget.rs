//! Terminal rendering of the stories strip.
//!
//! Rendering happens in two steps. [`StripFrame::capture`] asks the list
//! for its draw plan, validates thumbnail subscriptions and name caches for
//! every visible item, and copies out plain paint data. The frame is then
//! drawn as a ratatui widget, so the engine is never borrowed while the
//! terminal draws.
//!
//! Circles become blocks of `photo` columns by `photo / 2` rows, since a
//! terminal cell is about twice as tall as it is wide.

use super::constants::NAME_COLOR;
use crate::strip::{DrawPlan, PointF, Rect as StripRect, StoriesList};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

const PLACEHOLDER: &str = "░";
const RING_LEFT: &str = "(";
const RING_RIGHT: &str = ")";

/// Paint data of one thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintedThumb {
    /// Initials drawn in the middle row.
    pub initials: String,
    /// Fill color.
    pub color: (u8, u8, u8),
    /// Whether the image finished loading.
    pub ready: bool,
    /// Whether the unread ring is drawn.
    pub unread: bool,
    /// Whether the item is hovered.
    pub selected: bool,
}

/// Paint data of one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintedSlot {
    /// Left edge relative to the strip.
    pub x: f64,
    /// Top of the photo relative to the strip.
    pub photo_top: f64,
    /// Thumbnail of the compact presentation.
    pub compact: Option<PaintedThumb>,
    /// Thumbnail of the full presentation.
    pub full: Option<PaintedThumb>,
    /// Elided name under the full thumbnail.
    pub name: Option<String>,
}

/// Everything needed to draw one frame of the strip.
#[derive(Debug, Clone, PartialEq)]
pub struct StripFrame {
    /// Strip bounding box in host coordinates.
    pub geometry: StripRect,
    /// Painter translation while transitioning.
    pub shift: PointF,
    /// Visibility of the full presentation.
    pub expand_ratio: f64,
    /// Photo diameter in columns.
    pub photo: f64,
    /// Margin between slot edge and photo.
    pub photo_left: f64,
    /// Name offset from the slot edge.
    pub name_left: f64,
    /// Top of the name line.
    pub name_top: f64,
    /// Width available to names.
    pub name_width: f64,
    /// Height of the name line.
    pub name_height: f64,
    /// Slots in paint order.
    pub slots: Vec<PaintedSlot>,
}

impl StripFrame {
    /// Build the frame for the current state of `list`.
    pub fn capture(list: &mut StoriesList) -> Self {
        let plan = list.draw_plan();
        let photo_size = plan.photo.round() as i32;
        let slots = plan
            .slots
            .iter()
            .map(|slot| {
                let compact = slot
                    .items
                    .compact()
                    .and_then(|index| thumb(list, index, photo_size));
                let full = slot
                    .items
                    .full()
                    .and_then(|index| thumb(list, index, photo_size));
                let name = slot
                    .items
                    .full()
                    .and_then(|index| list.validate_name(index, NAME_COLOR))
                    .map(|cache| cache.text.clone());
                PaintedSlot {
                    x: slot.x,
                    photo_top: slot.photo_top,
                    compact,
                    full,
                    name,
                }
            })
            .collect();
        Self::from_plan(list.geometry(), &plan, slots)
    }

    fn from_plan(geometry: StripRect, plan: &DrawPlan, slots: Vec<PaintedSlot>) -> Self {
        Self {
            geometry,
            shift: plan.layout.geometry_shift,
            expand_ratio: plan.expand_ratio,
            photo: plan.photo,
            photo_left: plan.layout.photo_left,
            name_left: plan.name_left,
            name_top: plan.name_top,
            name_width: plan.name_width,
            name_height: plan.name_height,
            slots,
        }
    }
}

fn thumb(list: &mut StoriesList, index: usize, size: i32) -> Option<PaintedThumb> {
    list.validate_thumbnail(index);
    let selected = list.selected() == Some(index);
    let element = list.items().get(index)?.element();
    let image = element.thumbnail.image(size);
    Some(PaintedThumb {
        initials: image.initials,
        color: image.color,
        ready: image.ready,
        unread: element.has_unread(),
        selected,
    })
}

impl Widget for &StripFrame {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let clip = area.intersection(buf.area);
        let origin_x = f64::from(area.x) + f64::from(self.geometry.x) + self.shift.x;
        let origin_y = f64::from(area.y) + f64::from(self.geometry.y) + self.shift.y;
        let width = (self.photo.round() as i32).max(1);
        let height = ((self.photo / 2.0).round() as i32).max(1);

        for slot in &self.slots {
            let shown = if self.expand_ratio >= 0.5 {
                slot.full.as_ref().or(slot.compact.as_ref())
            } else {
                slot.compact.as_ref().or(slot.full.as_ref())
            };
            let x = (origin_x + slot.x + self.photo_left).round() as i32;
            let y = (origin_y + slot.photo_top).round() as i32;
            if let Some(thumb) = shown {
                paint_thumb(buf, clip, thumb, (x, y), (width, height));
            }
            if self.name_height < 0.5 {
                continue;
            }
            if let Some(name) = &slot.name {
                let left = (origin_x + slot.x + self.name_left).round() as i32;
                let top = (origin_y + self.name_top).round() as i32;
                paint_name(buf, clip, name, (left, top), self.name_width.round() as i32);
            }
        }
    }
}

fn paint_thumb(buf: &mut Buffer, clip: Rect, thumb: &PaintedThumb, at: (i32, i32), size: (i32, i32)) {
    let (x0, y0) = at;
    let (width, height) = size;
    let (r, g, b) = thumb.color;
    let fill = if thumb.ready {
        Style::default().bg(Color::Rgb(r, g, b))
    } else {
        Style::default().fg(Color::Rgb(r, g, b))
    };
    let symbol = if thumb.ready { " " } else { PLACEHOLDER };
    for y in y0..y0 + height {
        for x in x0..x0 + width {
            put(buf, clip, (x, y), symbol, fill);
        }
    }

    let middle = y0 + height / 2;
    let ring = if thumb.unread {
        fill.fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        fill.fg(Color::DarkGray)
    };
    put(buf, clip, (x0, middle), RING_LEFT, ring);
    put(buf, clip, (x0 + width - 1, middle), RING_RIGHT, ring);

    let mut label = fill.fg(Color::White).add_modifier(Modifier::BOLD);
    if thumb.selected {
        label = label.add_modifier(Modifier::REVERSED);
    }
    let initials_width = i32::try_from(thumb.initials.width()).unwrap_or(0);
    let mut x = x0 + (width - initials_width) / 2;
    for ch in thumb.initials.chars() {
        let mut encoded = [0u8; 4];
        put(buf, clip, (x, middle), ch.encode_utf8(&mut encoded), label);
        x += 1;
    }
}

fn paint_name(buf: &mut Buffer, clip: Rect, name: &str, at: (i32, i32), width: i32) {
    let (x, y) = at;
    let (Ok(column), Ok(row)) = (u16::try_from(x), u16::try_from(y)) else {
        return;
    };
    if !clip.contains((column, row).into()) || width <= 0 {
        return;
    }
    let room = usize::from(clip.right() - column).min(usize::try_from(width).unwrap_or(0));
    buf.set_stringn(column, row, name, room, Style::default().fg(Color::Gray));
}

fn put(buf: &mut Buffer, clip: Rect, at: (i32, i32), symbol: &str, style: Style) {
    let (Ok(x), Ok(y)) = (u16::try_from(at.0), u16::try_from(at.1)) else {
        return;
    };
    if !clip.contains((x, y).into()) {
        return;
    }
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_symbol(symbol).set_style(style);
    }
}

#[cfg(test)]
#[path = "strip_widget_tests.rs"]
mod tests;
