//! # FloorPicker Component
//!
//! Tab strip of floors in display order. The active floor is highlighted.
//! While a search is running, each tab carries its hit count, so this is a
//! second surface reading the same search results as the sidebar.
//!
//! Emits `Pick(floor_id)` for Left/Right, digit keys and mouse clicks. It
//! never changes the active floor itself; the parent turns the event into
//! `Action::PickFloor`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Tabs};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const DIVIDER_WIDTH: u16 = 1;
const PADDING_WIDTH: u16 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct FloorTab {
    pub id: String,
    pub name: String,
    /// Search hits on this floor; `None` while no search is active.
    pub hits: Option<usize>,
}

impl FloorTab {
    fn label(&self) -> String {
        match self.hits {
            Some(hits) => format!("{} ({})", self.name, hits),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FloorPickerEvent {
    Pick(String),
}

pub struct FloorPicker {
    pub tabs: Vec<FloorTab>,
    pub active: usize,
    pub focused: bool,
}

impl FloorPicker {
    pub fn new(tabs: Vec<FloorTab>, active: usize, focused: bool) -> Self {
        Self {
            tabs,
            active,
            focused,
        }
    }

    fn pick(&self, index: usize) -> Option<FloorPickerEvent> {
        self.tabs
            .get(index)
            .filter(|_| index != self.active)
            .map(|tab| FloorPickerEvent::Pick(tab.id.clone()))
    }

    /// Which tab (if any) is under a click at `(col, row)` inside `area`.
    pub fn tab_at(&self, col: u16, row: u16, area: Rect) -> Option<usize> {
        // Tabs sit on the single row inside the border
        if row != area.y + 1 || col <= area.x || col >= area.right().saturating_sub(1) {
            return None;
        }
        let mut x = area.x + 1;
        for (i, tab) in self.tabs.iter().enumerate() {
            let width = tab.label().width() as u16 + PADDING_WIDTH;
            if col < x + width {
                return Some(i);
            }
            x += width + DIVIDER_WIDTH;
            if col < x {
                // On the divider
                return None;
            }
        }
        None
    }
}

impl Component for FloorPicker {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let titles: Vec<Line> = self.tabs.iter().map(|tab| Line::from(tab.label())).collect();
        let tabs = Tabs::new(titles)
            .block(Block::bordered().title(" Floors ").border_style(border_style))
            .select(self.active)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            );

        frame.render_widget(tabs, area);
    }
}

impl EventHandler for FloorPicker {
    type Event = FloorPickerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorLeft => self.active.checked_sub(1).and_then(|i| self.pick(i)),
            TuiEvent::CursorRight => self.pick(self.active + 1),
            TuiEvent::InputChar(c) => c
                .to_digit(10)
                .and_then(|d| (d as usize).checked_sub(1))
                .and_then(|i| self.pick(i)),
            _ => None,
        }
    }
}
