//! Layout and pacing constants for the terminal preview.
//!
//! Centralized location for the numeric values the preview shell tunes.

use std::time::Duration;

/// Height of the title bar in lines.
pub const TITLE_BAR_HEIGHT: u16 = 1;

/// Height of the status panel in lines (border + content).
///
/// Fixed height to accommodate the state line, the scroll line and the last
/// few host events.
pub const STATUS_PANEL_HEIGHT: u16 = 7;

/// Height of the key hint line at the bottom of the screen.
pub const HINT_BAR_HEIGHT: u16 = 1;

/// Column where the compact row is anchored.
pub const COMPACT_ANCHOR_X: i32 = 1;

/// Horizontal wheel delta of one terminal scroll notch.
pub const WHEEL_STEP: i32 = 3;

/// Poll timeout while nothing animates.
pub const IDLE_POLL: Duration = Duration::from_millis(250);

/// Host events kept in the status panel.
pub const EVENT_HISTORY: usize = 4;

/// Color key passed when validating elided names.
pub const NAME_COLOR: (u8, u8, u8) = (220, 220, 220);
