//! # DetailPanel Component
//!
//! Shows the selected marker (event, location, owning floor, description)
//! and below it the jump-target list: every other marker in the venue, in
//! canonical order, each one a cross-floor jump away.
//!
//! ## Architecture
//!
//! `DetailPanel` is a transient component (created each frame) that wraps
//! `&'a mut DetailPanelState` (cursor + scroll offset) and borrows its props
//! from the navigator. Content is laid out inside a `ScrollView` because the
//! jump-target list is usually taller than the panel.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::index::IndexEntry;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Default)]
pub struct DetailPanelState {
    pub scroll_state: ScrollViewState,
    /// Highlighted jump target.
    pub cursor: usize,
}

impl DetailPanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll just enough to keep content row `row` inside the viewport.
    fn scroll_to_row(&mut self, row: u16, viewport_height: u16) {
        let offset = self.scroll_state.offset();
        let y = if row < offset.y {
            row
        } else if viewport_height > 0 && row >= offset.y.saturating_add(viewport_height) {
            // row >= viewport_height here, so this fits back into u16
            u16::try_from(u32::from(row) + 1 - u32::from(viewport_height)).unwrap_or(u16::MAX)
        } else {
            return;
        };
        self.scroll_state.set_offset(Position { x: offset.x, y });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailEvent {
    /// Jump to this marker, switching floors if needed.
    Jump(String),
    Close,
}

pub struct DetailPanel<'a> {
    detail: Option<&'a IndexEntry>,
    targets: &'a [&'a IndexEntry],
    focused: bool,
    state: &'a mut DetailPanelState,
}

impl<'a> DetailPanel<'a> {
    pub fn new(
        detail: Option<&'a IndexEntry>,
        targets: &'a [&'a IndexEntry],
        focused: bool,
        state: &'a mut DetailPanelState,
    ) -> Self {
        state.cursor = state.cursor.min(targets.len().saturating_sub(1));
        Self {
            detail,
            targets,
            focused,
            state,
        }
    }

    fn header(&self) -> Paragraph<'a> {
        let dim = Style::default().fg(Color::DarkGray);
        let mut lines = Vec::new();

        match self.detail {
            Some(entry) => {
                let marker = &entry.marker;
                lines.push(Line::from(Span::styled(
                    marker.event_name.clone(),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(vec![
                    Span::styled("Location  ", dim),
                    Span::raw(marker.location_name.clone()),
                ]));
                lines.push(Line::from(vec![
                    Span::styled("Floor     ", dim),
                    Span::raw(entry.floor_name.clone()),
                ]));
                if let Some(logo) = &marker.logo_ref {
                    lines.push(Line::from(vec![
                        Span::styled("Logo      ", dim),
                        Span::raw(logo.clone()),
                    ]));
                }
                if let Some(description) = &marker.description {
                    lines.push(Line::default());
                    lines.push(Line::raw(description.clone()));
                }
            }
            None => {
                lines.push(Line::styled("Select a marker to see its details.", dim));
            }
        }

        lines.push(Line::default());
        lines.push(Line::styled(
            "Navigate to another event",
            Style::default().add_modifier(Modifier::UNDERLINED),
        ));

        Paragraph::new(lines).wrap(Wrap { trim: false })
    }

    fn target_line(&self, index: usize, entry: &IndexEntry) -> Line<'static> {
        let style = if self.focused && index == self.state.cursor {
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!("→ {}", entry.marker.event_name), style),
            Span::styled(
                format!("  {}", entry.floor_name),
                Style::default().fg(Color::DarkGray),
            ),
        ])
    }
}

/// Row count clamped to what a `u16` canvas can hold.
fn to_rows(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX)
}

/// Content row of the highlighted jump target.
fn cursor_row(header_height: u16, cursor: usize) -> u16 {
    header_height.saturating_add(to_rows(cursor))
}

impl Component for DetailPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered().title(" Details ").border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Leave one column for the scrollbar
        let content_width = inner.width.saturating_sub(1);
        let header = self.header();
        let header_height = to_rows(header.line_count(content_width));
        let total_height = header_height.saturating_add(to_rows(self.targets.len()));

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        scroll_view.render_widget(header, Rect::new(0, 0, content_width, header_height));
        for (i, entry) in self.targets.iter().enumerate() {
            let y = header_height.saturating_add(to_rows(i));
            if y >= total_height {
                break;
            }
            let row = Rect::new(0, y, content_width, 1);
            scroll_view.render_widget(self.target_line(i, entry), row);
        }

        if self.focused && !self.targets.is_empty() {
            self.state
                .scroll_to_row(cursor_row(header_height, self.state.cursor), inner.height);
        }
        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}

impl EventHandler for DetailPanel<'_> {
    type Event = DetailEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorUp => {
                self.state.cursor = self.state.cursor.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                if !self.targets.is_empty() {
                    self.state.cursor = (self.state.cursor + 1).min(self.targets.len() - 1);
                }
                None
            }
            TuiEvent::Submit => self
                .targets
                .get(self.state.cursor)
                .map(|entry| DetailEvent::Jump(entry.marker.id.clone())),
            TuiEvent::Escape => self.detail.map(|_| DetailEvent::Close),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::robo_navigator;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_jump_to_highlighted_target() {
        let mut nav = robo_navigator();
        nav.select_marker("m1").unwrap();
        let targets = nav.jump_targets();
        let mut state = DetailPanelState::new();
        let mut panel = DetailPanel::new(nav.selected_detail(), &targets, true, &mut state);

        // Only m2 is left; Down stays put
        panel.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            panel.handle_event(&TuiEvent::Submit),
            Some(DetailEvent::Jump("m2".into()))
        );
        assert_eq!(panel.handle_event(&TuiEvent::Escape), Some(DetailEvent::Close));
    }

    #[test]
    fn test_no_selection_lists_every_marker() {
        let nav = robo_navigator();
        let targets = nav.jump_targets();
        let mut state = DetailPanelState::new();
        let mut panel = DetailPanel::new(None, &targets, true, &mut state);

        assert_eq!(panel.handle_event(&TuiEvent::Escape), None);
        panel.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            panel.handle_event(&TuiEvent::Submit),
            Some(DetailEvent::Jump("m2".into()))
        );
    }

    #[test]
    fn test_cursor_clamped_when_targets_shrink() {
        let nav = robo_navigator();
        let targets = nav.jump_targets();
        let mut state = DetailPanelState { cursor: 9, ..Default::default() };
        DetailPanel::new(None, &targets, true, &mut state);
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn test_scroll_to_row() {
        let mut state = DetailPanelState::new();
        state.scroll_to_row(12, 5);
        assert_eq!(state.scroll_state.offset().y, 8);
        state.scroll_to_row(10, 5);
        assert_eq!(state.scroll_state.offset().y, 8);
        state.scroll_to_row(3, 5);
        assert_eq!(state.scroll_state.offset().y, 3);
    }

    #[test]
    fn test_row_math_saturates_on_huge_lists() {
        assert_eq!(to_rows(12), 12);
        assert_eq!(to_rows(70_000), u16::MAX);
        assert_eq!(cursor_row(7, 3), 10);
        assert_eq!(cursor_row(7, 65_530), u16::MAX);
        assert_eq!(cursor_row(7, usize::MAX), u16::MAX);
    }

    #[test]
    fn test_scroll_to_last_row_does_not_overflow() {
        let mut state = DetailPanelState::new();
        state.scroll_to_row(u16::MAX, 10);
        assert_eq!(state.scroll_state.offset().y, u16::MAX - 9);

        // Back to the top
        state.scroll_to_row(0, 10);
        assert_eq!(state.scroll_state.offset().y, 0);
    }

    #[test]
    fn test_render_selected_marker() {
        let mut nav = robo_navigator();
        nav.select_marker("m1").unwrap();
        let targets = nav.jump_targets();
        let mut state = DetailPanelState::new();
        let backend = TestBackend::new(50, 16);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|f| {
                DetailPanel::new(nav.selected_detail(), &targets, false, &mut state)
                    .render(f, f.area());
            })
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Robo Race"));
        assert!(text.contains("Hall A"));
        assert!(text.contains("Ground Floor"));
        assert!(text.contains("Line-following robots"));
        assert!(text.contains("→ Robo Wars"));
    }
}
