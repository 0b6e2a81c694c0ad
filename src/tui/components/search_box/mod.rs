//! # SearchBox Component
//!
//! Search input plus the live result list.
//!
//! ## State Management
//!
//! The query text is a prop read from the navigator every frame. This
//! component only keeps a cursor and the highlighted result. Edits are
//! emitted as `QueryChanged(new_text)` and come back as the next frame's
//! prop once the navigator has applied them.
//!
//! The result list is capped at `limit` rows; the resolver itself returns
//! everything.

mod cursor;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};

use crate::core::search::SearchResult;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::QueryCursor;

const INPUT_HEIGHT: u16 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    QueryChanged(String),
    /// A result was chosen; carries the marker id.
    Choose(String),
}

/// Persistent presentation state for the search surface.
#[derive(Debug, Default)]
pub struct SearchBoxState {
    cursor: QueryCursor,
    pub selected: usize,
    pub list_state: ListState,
}

impl SearchBoxState {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct SearchBox<'a> {
    query: &'a str,
    results: &'a [SearchResult],
    limit: usize,
    focused: bool,
    state: &'a mut SearchBoxState,
}

impl<'a> SearchBox<'a> {
    pub fn new(
        query: &'a str,
        results: &'a [SearchResult],
        limit: usize,
        focused: bool,
        state: &'a mut SearchBoxState,
    ) -> Self {
        state.cursor.clamp(query);
        let visible = results.len().min(limit);
        state.selected = state.selected.min(visible.saturating_sub(1));
        state
            .list_state
            .select((visible > 0).then_some(state.selected));
        Self {
            query,
            results,
            limit,
            focused,
            state,
        }
    }

    fn visible_count(&self) -> usize {
        self.results.len().min(self.limit)
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .title(" Search events ")
            .border_style(border_style);
        let inner = block.inner(area);

        let input = if self.query.is_empty() && !self.focused {
            Paragraph::new(Span::styled("Tab here to search", Style::default().fg(Color::DarkGray)))
        } else {
            Paragraph::new(self.query).style(Style::default().fg(Color::Green))
        };
        frame.render_widget(input.block(block), area);

        if self.focused {
            let x = inner.x + self.state.cursor.column(self.query).min(inner.width.saturating_sub(1));
            frame.set_cursor_position(Position::new(x, inner.y));
        }
    }

    fn render_results(&mut self, frame: &mut Frame, area: Rect) {
        let hidden = self.results.len().saturating_sub(self.limit);
        let footer = if hidden > 0 {
            format!(" +{} more ", hidden)
        } else {
            String::new()
        };
        let block = Block::bordered()
            .title(format!(" Results ({}) ", self.results.len()))
            .title_bottom(Line::from(footer).right_aligned())
            .border_style(Style::default().fg(Color::DarkGray));

        if self.results.is_empty() {
            let hint = if self.query.trim().is_empty() {
                "Type to search across all floors."
            } else {
                "No matching events."
            };
            let empty = Paragraph::new(hint)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .results
            .iter()
            .take(self.limit)
            .map(|result| {
                ListItem::new(Line::from(vec![
                    Span::styled(result.event_name.clone(), Style::default().fg(Color::White)),
                    Span::styled(
                        format!("  {}", result.floor_name),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let highlight = if self.focused {
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let list = List::new(items).block(block).highlight_style(highlight);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Result row under a click at screen row `row` inside the search `area`.
///
/// `scroll` is the list's first visible item.
pub fn result_at(row: u16, area: Rect, scroll: usize) -> Option<usize> {
    // input box, then the result list's top border
    let first_row = area.y + INPUT_HEIGHT + 1;
    let last_row = area.bottom().saturating_sub(1);
    (row >= first_row && row < last_row).then(|| scroll + usize::from(row - first_row))
}

impl Component for SearchBox<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [input_area, results_area] =
            Layout::vertical([Constraint::Length(INPUT_HEIGHT), Constraint::Min(0)]).areas(area);
        self.render_input(frame, input_area);
        self.render_results(frame, results_area);
    }
}

impl EventHandler for SearchBox<'_> {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut buf = [0u8; 4];
                let next = self.state.cursor.insert(self.query, c.encode_utf8(&mut buf));
                self.state.selected = 0;
                Some(SearchEvent::QueryChanged(next))
            }
            TuiEvent::Paste(text) => {
                // Single-line input
                let flat: String = text.chars().filter(|c| !c.is_control()).collect();
                if flat.is_empty() {
                    return None;
                }
                self.state.selected = 0;
                Some(SearchEvent::QueryChanged(self.state.cursor.insert(self.query, &flat)))
            }
            TuiEvent::Backspace => {
                self.state.selected = 0;
                self.state.cursor.backspace(self.query).map(SearchEvent::QueryChanged)
            }
            TuiEvent::Delete => {
                self.state.selected = 0;
                self.state.cursor.delete(self.query).map(SearchEvent::QueryChanged)
            }
            TuiEvent::CursorLeft => {
                self.state.cursor.left(self.query);
                None
            }
            TuiEvent::CursorRight => {
                self.state.cursor.right(self.query);
                None
            }
            TuiEvent::CursorHome => {
                self.state.cursor.pos = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.state.cursor.pos = self.query.len();
                None
            }
            TuiEvent::CursorUp => {
                self.state.selected = self.state.selected.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                let visible = self.visible_count();
                if visible > 0 {
                    self.state.selected = (self.state.selected + 1).min(visible - 1);
                }
                None
            }
            TuiEvent::Submit => self
                .results
                .get(self.state.selected)
                .filter(|_| self.state.selected < self.limit)
                .map(|result| SearchEvent::Choose(result.marker_id.clone())),
            TuiEvent::Escape if !self.query.is_empty() => {
                self.state.cursor.pos = 0;
                self.state.selected = 0;
                Some(SearchEvent::QueryChanged(String::new()))
            }
            _ => None,
        }
    }
}
