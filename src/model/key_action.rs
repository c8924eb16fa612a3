//! Preview actions independent of key bindings.

/// What a key press asks the preview host to do.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by
/// [`crate::config::KeyBindings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Uncover one more line of the strip. Default: ↓/j
    Uncover,
    /// Cover one line of the strip. Default: ↑/k
    Cover,
    /// Jump to full height (or back to zero) as momentum scrolling would. Default: m
    MomentumSnap,
    /// Request expanded mode. Default: e
    Expand,
    /// Request compact mode. Default: c
    Collapse,
    /// Finish loading one placeholder thumbnail. Default: r
    LoadThumbnail,
    /// Dismiss the open context menu. Default: Esc
    CloseMenu,
    /// Leave the preview. Default: q
    Quit,
}
