//! Context menu popup.

use crate::strip::ContextMenu;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

/// Popup listing the actions of an open context menu, anchored at the
/// pointer and kept inside the screen.
#[derive(Debug, Clone, Copy)]
pub struct MenuPopup<'a> {
    menu: &'a ContextMenu,
    anchor: (u16, u16),
}

impl<'a> MenuPopup<'a> {
    /// Popup for `menu` opened at `anchor`.
    pub fn new(menu: &'a ContextMenu, anchor: (u16, u16)) -> Self {
        Self { menu, anchor }
    }

    /// Area the popup occupies inside `screen`.
    pub fn area(&self, screen: Rect) -> Rect {
        let widest = self
            .menu
            .actions
            .iter()
            .map(|action| action.label.width())
            .max()
            .unwrap_or(0);
        let width = u16::try_from(widest + 2).unwrap_or(u16::MAX).min(screen.width);
        let height = u16::try_from(self.menu.actions.len() + 2)
            .unwrap_or(u16::MAX)
            .min(screen.height);
        let x = self.anchor.0.min(screen.right().saturating_sub(width));
        let y = self.anchor.1.min(screen.bottom().saturating_sub(height));
        Rect::new(x, y, width, height)
    }
}

impl Widget for MenuPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = self.area(area);
        Clear.render(popup, buf);
        let lines: Vec<Line> = self
            .menu
            .actions
            .iter()
            .map(|action| Line::raw(action.label.as_str()))
            .collect();
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .render(popup, buf);
    }
}
