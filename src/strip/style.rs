//! Style metrics for both presentations.
//!
//! Units are whatever the renderer draws in (pixels for a raster surface,
//! cells for the terminal preview). The defaults are sized for the terminal.

use crate::model::StripError;
use serde::Deserialize;

/// Metrics of the compact row of overlapping small circles.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmallStyle {
    /// Outer margin before the first circle.
    pub left: i32,
    /// Margin between a slot's edge and its circle.
    pub photo_left: i32,
    /// Margin above the circle.
    pub photo_top: i32,
    /// Circle diameter.
    pub photo: i32,
    /// Horizontal distance between neighbouring circles.
    pub shift: i32,
    /// Doubled unread ring width.
    pub line_twice: i32,
    /// Doubled read ring width.
    pub line_read_twice: i32,
}

impl Default for SmallStyle {
    fn default() -> Self {
        Self {
            left: 1,
            photo_left: 1,
            photo_top: 0,
            photo: 4,
            shift: 3,
            line_twice: 2,
            line_read_twice: 1,
        }
    }
}

/// Metrics of the expanded, scrollable row of full-size circles.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FullStyle {
    /// Outer margin before the first slot.
    pub left: i32,
    /// Margin between a slot's edge and its circle.
    pub photo_left: i32,
    /// Margin above the circle.
    pub photo_top: i32,
    /// Circle diameter.
    pub photo: i32,
    /// Total height of the expanded strip; also the expanding-height capacity.
    pub height: i32,
    /// Top of the name line.
    pub name_top: i32,
    /// Height of the name line.
    pub name_height: i32,
    /// Width of a space in the name font.
    pub name_space_width: i32,
    /// Doubled unread ring width.
    pub line_twice: i32,
    /// Doubled read ring width.
    pub line_read_twice: i32,
}

impl Default for FullStyle {
    fn default() -> Self {
        Self {
            left: 1,
            photo_left: 1,
            photo_top: 0,
            photo: 8,
            height: 6,
            name_top: 5,
            name_height: 1,
            name_space_width: 1,
            line_twice: 2,
            line_read_twice: 1,
        }
    }
}

impl FullStyle {
    /// Natural width of one full slot before extra spacing is distributed.
    pub fn single_min(&self) -> i32 {
        self.photo_left * 2 + self.photo
    }

    /// Natural width of the whole full row.
    pub fn content_width(&self, items_count: usize) -> i32 {
        let count = i32::try_from(items_count).unwrap_or(i32::MAX);
        self.left
            .saturating_add(count.saturating_mul(self.single_min()))
    }

    /// Width available to an elided name under a full circle.
    pub fn available_name_width(&self) -> i32 {
        (self.single_min() - 2 * self.name_space_width).max(0)
    }
}

/// Complete style of the strip.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StripStyle {
    /// Compact presentation metrics.
    pub small: SmallStyle,
    /// Full presentation metrics.
    pub full: FullStyle,
    /// Opacity of read thumbnails in the compact row.
    pub read_opacity: f64,
}

impl Default for StripStyle {
    fn default() -> Self {
        Self {
            small: SmallStyle::default(),
            full: FullStyle::default(),
            read_opacity: 0.6,
        }
    }
}

impl StripStyle {
    /// Reject metrics that would make pitch or capacity non-positive.
    pub fn validate(&self) -> Result<(), StripError> {
        let checks = [
            ("small.photo", self.small.photo),
            ("small.shift", self.small.shift),
            ("full.photo", self.full.photo),
            ("full.height", self.full.height),
        ];
        for (name, value) in checks {
            if value <= 0 {
                return Err(StripError::NonPositiveMetric { name, value });
            }
        }
        if self.full.single_min() <= 0 {
            return Err(StripError::NonPositiveMetric {
                name: "full.photo_left",
                value: self.full.photo_left,
            });
        }
        Ok(())
    }
}
