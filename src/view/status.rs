//! Status panel and key hints.

use crate::strip::{CursorShape, StripState};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

/// Key hints shown on the bottom line.
pub const KEY_HINTS: &str =
    "↑/↓ height  m momentum  e/c expand/collapse  r load thumb  right-click menu  q quit";

/// Engine state as seen by the host, one frame at a time.
#[derive(Debug, Clone)]
pub struct StatusPanel<'a> {
    /// Discrete state.
    pub state: StripState,
    /// Expand/collapse animation value.
    pub expanded_value: f64,
    /// Host expanding height.
    pub height: i32,
    /// Expanding height capacity.
    pub capacity: i32,
    /// Scroll offset and its bound.
    pub scroll: (i32, i32),
    /// Number of items shown.
    pub items: usize,
    /// Whether the source has more pages.
    pub more: bool,
    /// Name of the hovered item.
    pub hovered: Option<&'a str>,
    /// Cursor affordance.
    pub cursor: CursorShape,
    /// Recent host events, newest first.
    pub events: &'a [String],
}

impl StatusPanel<'_> {
    fn lines(&self) -> Vec<Line<'_>> {
        let label = Style::default().fg(Color::DarkGray);
        let value = Style::default().add_modifier(Modifier::BOLD);
        let pair = |name: &'static str, text: String| {
            [Span::styled(name, label), Span::styled(text, value), Span::raw("  ")]
        };

        let mut first = Vec::new();
        first.extend(pair("state ", format!("{:?}", self.state)));
        first.extend(pair("expand ", format!("{:.2}", self.expanded_value)));
        first.extend(pair("height ", format!("{}/{}", self.height, self.capacity)));

        let mut second = Vec::new();
        second.extend(pair("scroll ", format!("{}/{}", self.scroll.0, self.scroll.1)));
        let more = if self.more { "+" } else { "" };
        second.extend(pair("items ", format!("{}{more}", self.items)));
        second.extend(pair("hover ", self.hovered.unwrap_or("-").to_string()));
        if self.cursor == CursorShape::Pointer {
            second.push(Span::styled("☝", Style::default().fg(Color::Cyan)));
        }

        let mut lines = vec![Line::from(first), Line::from(second)];
        lines.extend(
            self.events
                .iter()
                .map(|event| Line::styled(event.as_str(), Style::default().fg(Color::Gray))),
        );
        lines
    }
}

impl Widget for StatusPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::TOP).title(" storystrip ");
        Paragraph::new(self.lines()).block(block).render(area, buf);
    }
}

/// Bottom line with key hints.
pub fn hint_bar() -> Paragraph<'static> {
    Paragraph::new(Line::styled(KEY_HINTS, Style::default().fg(Color::DarkGray)))
}
