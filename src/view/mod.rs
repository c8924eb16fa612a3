//! Terminal preview (impure shell).
//!
//! Hosts a [`StoriesList`] the way a chat client would: it feeds pointer
//! events, owns the expanding height, advances animations on a frame timer
//! and reacts to the strip's events by loading more content or following
//! expand/collapse requests.

pub mod constants;
pub mod host;
pub mod menu;
pub mod status;
pub mod strip_widget;

pub use host::HeightDriver;
pub use menu::MenuPopup;
pub use status::{hint_bar, StatusPanel, KEY_HINTS};
pub use strip_widget::{PaintedSlot, PaintedThumb, StripFrame};

use crate::config::KeyBindings;
use crate::model::{KeyAction, StoryId, StripError};
use crate::source::{ContentSource, SourceError};
use crate::strip::{
    Alignment, ContextMenu, CursorShape, Point, Rect as StripRect, StoriesList, StripEvent,
};
use constants::{
    COMPACT_ANCHOR_X, EVENT_HISTORY, HINT_BAR_HEIGHT, IDLE_POLL, STATUS_PANEL_HEIGHT,
    TITLE_BAR_HEIGHT, WHEEL_STEP,
};
use crossterm::{
    event::{
        self, Event, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::Terminal;
use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, trace};

/// Errors that can occur in the terminal preview
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Content could not be loaded
    #[error("Content error: {0}")]
    Source(#[from] SourceError),

    /// The engine rejected its configuration
    #[error("Strip error: {0}")]
    Strip(#[from] StripError),
}

/// Screen regions of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScreenAreas {
    title: Rect,
    /// Parent area of the strip; strip geometry is relative to its origin.
    strip_parent: Rect,
    status: Rect,
    hints: Rect,
}

impl ScreenAreas {
    fn split(area: Rect, strip_height: u16) -> Self {
        let [title, strip, status, _, hints] = Layout::vertical([
            Constraint::Length(TITLE_BAR_HEIGHT),
            Constraint::Length(strip_height),
            Constraint::Length(STATUS_PANEL_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(HINT_BAR_HEIGHT),
        ])
        .areas(area);
        Self {
            title,
            strip_parent: Rect::new(area.x, area.y, area.width, title.height + strip.height),
            status,
            hints,
        }
    }
}

/// Main preview application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    list: StoriesList,
    source: ContentSource,
    key_bindings: KeyBindings,
    driver: HeightDriver,
    frame_interval: Duration,
    menu_anchor: Option<(u16, u16)>,
    pointer_inside: bool,
    cursor: CursorShape,
    /// Host-side event log, newest first.
    history: VecDeque<String>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create the preview on the real terminal
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture
    pub fn new(
        list: StoriesList,
        source: ContentSource,
        frame_interval: Duration,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Self::with_terminal(terminal, list, source, frame_interval)
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Create the preview on any backend and show the first snapshot
    pub fn with_terminal(
        terminal: Terminal<B>,
        mut list: StoriesList,
        source: ContentSource,
        frame_interval: Duration,
    ) -> Result<Self, TuiError> {
        let size = terminal.size()?;
        list.set_menu_populator(populate_menu);
        let mut app = Self {
            terminal,
            driver: HeightDriver::new(list.style().full.height),
            list,
            source,
            key_bindings: KeyBindings::default(),
            frame_interval,
            menu_anchor: None,
            pointer_inside: false,
            cursor: CursorShape::Default,
            history: VecDeque::with_capacity(EVENT_HISTORY),
        };
        app.apply_constraints(size.width);
        if let Some(content) = app.source.next_snapshot() {
            app.list.show_content(content);
        }
        app.pump();
        Ok(app)
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits (q or Ctrl+C). Frames are only scheduled
    /// while something animates; otherwise the loop idles on input.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;
        let mut last_frame = Instant::now();

        loop {
            if !self.is_animating() {
                last_frame = Instant::now();
            }
            let timeout = if self.is_animating() {
                self.frame_interval.saturating_sub(last_frame.elapsed())
            } else {
                IDLE_POLL
            };

            let mut dirty = false;
            if event::poll(timeout)? {
                if self.handle_event(event::read()?) {
                    return Ok(());
                }
                dirty = true;
            }

            if self.is_animating() && last_frame.elapsed() >= self.frame_interval {
                let delta = last_frame.elapsed();
                last_frame = Instant::now();
                self.frame(delta);
                dirty = true;
            }

            self.pump();
            // Thumbnail callbacks request repaints without any event.
            if self.list.take_repaint() || dirty {
                self.draw()?;
            }
        }
    }

    fn is_animating(&self) -> bool {
        self.list.is_animating() || self.driver.is_moving()
    }

    /// Advance the host height and the strip animations by one frame
    fn frame(&mut self, delta: Duration) {
        self.driver.step(&mut self.list);
        self.list.tick(delta);
    }

    /// Handle one terminal event. Returns true if the app should quit
    fn handle_event(&mut self, event: Event) -> bool {
        let quit = match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                false
            }
            Event::Resize(width, _) => {
                self.apply_constraints(width);
                false
            }
            _ => false,
        };
        self.pump();
        quit
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        match action {
            KeyAction::Quit => return true,
            KeyAction::Uncover => self.driver.nudge(1, &mut self.list),
            KeyAction::Cover => self.driver.nudge(-1, &mut self.list),
            KeyAction::MomentumSnap => self.driver.momentum_snap(&mut self.list),
            KeyAction::Expand => self.list.request_expanded(true),
            KeyAction::Collapse => self.list.request_expanded(false),
            KeyAction::LoadThumbnail => {
                if let Some(id) = self.source.pool().mark_one_ready() {
                    self.note(format!("Thumbnail {id} loaded"));
                }
            }
            KeyAction::CloseMenu => {
                if self.menu_anchor.take().is_some() {
                    let pointer = self.list_pointer_outside();
                    self.list.menu_closed(pointer);
                }
            }
        }
        false
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = Point::new(i32::from(mouse.column), i32::from(mouse.row));
        let horizontal = mouse.modifiers.contains(KeyModifiers::SHIFT);
        match mouse.kind {
            MouseEventKind::Moved => {
                self.track_enter(position);
                self.list.mouse_move(position);
            }
            MouseEventKind::Drag(MouseButton::Left) => self.list.mouse_move(position),
            MouseEventKind::Down(MouseButton::Left) => {
                if self.menu_anchor.is_some() {
                    self.pick_menu_action(mouse.column, mouse.row);
                    self.list.menu_closed(position);
                } else {
                    self.list.mouse_press(position);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.list.mouse_release(position),
            MouseEventKind::Down(MouseButton::Right) => {
                self.menu_anchor = self
                    .list
                    .context_menu(Some(position))
                    .map(|_| (mouse.column, mouse.row));
            }
            MouseEventKind::ScrollLeft => {
                self.list.wheel(WHEEL_STEP, 0);
            }
            MouseEventKind::ScrollRight => {
                self.list.wheel(-WHEEL_STEP, 0);
            }
            MouseEventKind::ScrollUp if horizontal => {
                self.list.wheel(WHEEL_STEP, 0);
            }
            MouseEventKind::ScrollDown if horizontal => {
                self.list.wheel(-WHEEL_STEP, 0);
            }
            MouseEventKind::ScrollUp => self.driver.nudge(1, &mut self.list),
            MouseEventKind::ScrollDown => self.driver.nudge(-1, &mut self.list),
            _ => {}
        }
    }

    fn track_enter(&mut self, position: Point) {
        let inside = self.list.geometry().contains(position);
        if inside && !self.pointer_inside {
            self.list.pointer_entered();
        }
        self.pointer_inside = inside;
    }

    fn pick_menu_action(&mut self, column: u16, row: u16) {
        let Some(anchor) = self.menu_anchor.take() else {
            return;
        };
        let Some(menu) = self.list.open_menu() else {
            return;
        };
        let screen = self.screen();
        let area = MenuPopup::new(menu, anchor).area(screen);
        let inner_left = area.x.saturating_add(1);
        let inner_right = area.right().saturating_sub(1);
        if column < inner_left || column >= inner_right || row <= area.y {
            return;
        }
        let picked = menu
            .actions
            .get(usize::from(row - area.y - 1))
            .map(|action| (action.label.clone(), action.command.clone()));
        if let Some((label, command)) = picked {
            let story = menu.story;
            info!(%story, command, "Context menu action");
            self.note(format!("{label} ({story})"));
        }
    }

    fn list_pointer_outside(&self) -> Point {
        let geometry = self.list.geometry();
        Point::new(geometry.x - 1, geometry.y - 1)
    }

    fn apply_constraints(&mut self, width: u16) {
        let top = i32::from(TITLE_BAR_HEIGHT);
        let full_height = self.list.style().full.height;
        self.list.set_layout_constraints(
            Point::new(COMPACT_ANCHOR_X, top),
            Alignment::Left,
            StripRect::new(0, top, i32::from(width.max(1)), full_height),
        );
    }

    /// Drain strip events and react as the host
    fn pump(&mut self) {
        let mut load_more = false;
        for event in self.list.take_events() {
            match event {
                StripEvent::Clicked(id) => self.note(format!("Opened stories of {id}")),
                StripEvent::ExpandedToggled(expanded) => {
                    self.driver.follow(expanded);
                    self.note(if expanded {
                        "Expand requested".to_string()
                    } else {
                        "Collapse requested".to_string()
                    });
                }
                StripEvent::Entered => debug!("Pointer entered strip"),
                StripEvent::LoadMoreRequested => load_more = true,
                StripEvent::CollapsedGeometryChanged => {
                    trace!(geometry = ?self.list.collapsed_geometry_current(), "Collapsed geometry");
                }
                StripEvent::CursorChanged(shape) => self.cursor = shape,
            }
        }
        if !load_more {
            return;
        }
        if let Some(content) = self.source.next_snapshot() {
            let count = content.len();
            self.list.show_content(content);
            self.note(format!("Loaded page ({count} stories)"));
        }
    }

    fn note(&mut self, line: String) {
        self.history.push_front(line);
        self.history.truncate(EVENT_HISTORY);
    }

    fn screen(&self) -> Rect {
        match self.terminal.size() {
            Ok(size) => Rect::new(0, 0, size.width, size.height),
            Err(_) => Rect::default(),
        }
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let strip = StripFrame::capture(&mut self.list);
        // Capturing runs a layout, which can toggle the mode.
        self.pump();

        let hovered = self
            .list
            .selected()
            .and_then(|index| self.list.items().get(index))
            .map(|item| item.element().name.clone());
        let history: Vec<String> = self.history.iter().cloned().collect();
        let status = StatusPanel {
            state: self.list.state(),
            expanded_value: self.list.expanded_value(),
            height: self.driver.height(),
            capacity: self.driver.capacity(),
            scroll: (self.list.scroll_left(), self.list.scroll_max()),
            items: self.list.items().len(),
            more: self.source.has_more(),
            hovered: hovered.as_deref(),
            cursor: self.cursor,
            events: &history,
        };
        let title = Line::styled(
            format!("Stories · {}", self.list.items().len()),
            Style::default().add_modifier(Modifier::BOLD),
        );
        let menu = self
            .menu_anchor
            .and_then(|anchor| self.list.open_menu().map(|menu| (menu.clone(), anchor)));
        let strip_height = u16::try_from(self.list.style().full.height).unwrap_or(u16::MAX);

        self.terminal.draw(|frame| {
            let areas = ScreenAreas::split(frame.area(), strip_height);
            frame.render_widget(title, areas.title);
            frame.render_widget(&strip, areas.strip_parent);
            frame.render_widget(status, areas.status);
            frame.render_widget(hint_bar(), areas.hints);
            if let Some((menu, anchor)) = &menu {
                frame.render_widget(MenuPopup::new(menu, *anchor), frame.area());
            }
        })?;
        Ok(())
    }
}

/// Actions offered for every story.
fn populate_menu(story: StoryId, menu: &mut ContextMenu) {
    menu.add_action("Open stories", "open");
    menu.add_action("Hide from strip", "hide");
    if story.get() != 1 {
        menu.add_action("Mute", "mute");
    }
}

/// Initialize and run the preview
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// even when setup or the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_preview(
    list: StoriesList,
    source: ContentSource,
    frame_interval: Duration,
) -> Result<(), TuiError> {
    let result = TuiApp::new(list, source, frame_interval).and_then(|mut app| app.run());
    restore_terminal()?;
    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
