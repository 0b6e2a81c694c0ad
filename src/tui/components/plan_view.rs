//! # PlanView Component
//!
//! Draws the active floor's plan and its markers on a ratatui `Canvas`.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `PlanViewState` (keyboard cursor over the floor's markers) lives in `TuiState`
//! - `PlanView` is created each frame with the floor and selection as props
//!
//! Plan space has y growing downwards; the canvas has y growing upwards, so
//! markers are painted at `height - y`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Block;
use ratatui::widgets::canvas::{Canvas, Rectangle};
use unicode_width::UnicodeWidthStr;

use crate::core::venue::{Floor, Marker, PlanBounds};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const MARKER_GLYPH: &str = "●";
const SELECTED_GLYPH: &str = "◉";

/// Keyboard cursor over the markers of the floor being shown.
#[derive(Debug, Default)]
pub struct PlanViewState {
    pub cursor: usize,
    /// Floor the cursor belongs to; a different floor resets it.
    floor_id: Option<String>,
}

impl PlanViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-anchor the cursor when the displayed floor changes.
    pub fn sync(&mut self, floor: &Floor, selected: Option<&str>) {
        if self.floor_id.as_deref() == Some(floor.id.as_str()) {
            self.cursor = self.cursor.min(floor.markers.len().saturating_sub(1));
            return;
        }
        self.floor_id = Some(floor.id.clone());
        self.cursor = selected
            .and_then(|id| floor.markers.iter().position(|m| m.id == id))
            .unwrap_or(0);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanEvent {
    /// A marker on this floor was clicked.
    Click(String),
    Deselect,
}

pub struct PlanView<'a> {
    floor: &'a Floor,
    selected: Option<&'a str>,
    focused: bool,
    state: &'a mut PlanViewState,
}

impl<'a> PlanView<'a> {
    pub fn new(
        floor: &'a Floor,
        selected: Option<&'a str>,
        focused: bool,
        state: &'a mut PlanViewState,
    ) -> Self {
        state.sync(floor, selected);
        Self {
            floor,
            selected,
            focused,
            state,
        }
    }

    fn marker_style(&self, index: usize, marker: &Marker) -> Style {
        let is_selected = self.selected == Some(marker.id.as_str());
        let mut style = if is_selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };
        if self.focused && index == self.state.cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }

    fn label(&self, marker: &Marker) -> String {
        let glyph = if self.selected == Some(marker.id.as_str()) {
            SELECTED_GLYPH
        } else {
            MARKER_GLYPH
        };
        format!("{} {}", glyph, marker.event_name)
    }
}

/// Screen cell where a marker's label starts, matching the canvas label mapping.
fn marker_cell(marker: &Marker, bounds: PlanBounds, inner: Rect) -> (u16, u16) {
    let x = marker.position.x.clamp(0.0, bounds.width);
    let y = marker.position.y.clamp(0.0, bounds.height);
    let col = (x * f64::from(inner.width.saturating_sub(1)) / bounds.width) as u16;
    let row = (y * f64::from(inner.height.saturating_sub(1)) / bounds.height) as u16;
    (inner.x + col, inner.y + row)
}

/// Marker whose label covers `(col, row)` inside the bordered `area`.
pub fn marker_at<'f>(col: u16, row: u16, area: Rect, floor: &'f Floor) -> Option<&'f Marker> {
    let inner = Block::bordered().inner(area);
    floor.markers.iter().find(|marker| {
        let (x, y) = marker_cell(marker, floor.bounds, inner);
        // glyph + space + event name
        let width = 2 + marker.event_name.width() as u16;
        row == y && col >= x && col < x + width
    })
}

impl Component for PlanView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let bounds = self.floor.bounds;
        let border_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let title = format!(" {} ({}) ", self.floor.name, self.floor.plan_ref);
        let help = if self.focused {
            " ←→ Move  Enter Select  Esc Deselect "
        } else {
            ""
        };

        let labels: Vec<(f64, f64, Line)> = self
            .floor
            .markers
            .iter()
            .enumerate()
            .map(|(i, marker)| {
                let x = marker.position.x.clamp(0.0, bounds.width);
                let y = bounds.height - marker.position.y.clamp(0.0, bounds.height);
                let line = Line::from(Span::styled(self.label(marker), self.marker_style(i, marker)));
                (x, y, line)
            })
            .collect();
        let empty = self.floor.markers.is_empty();

        let canvas = Canvas::default()
            .block(
                Block::bordered()
                    .title(title)
                    .title_bottom(Line::from(help).centered())
                    .border_style(border_style),
            )
            .x_bounds([0.0, bounds.width])
            .y_bounds([0.0, bounds.height])
            .paint(move |ctx| {
                ctx.draw(&Rectangle {
                    x: 0.0,
                    y: 0.0,
                    width: bounds.width,
                    height: bounds.height,
                    color: Color::DarkGray,
                });
                if empty {
                    ctx.print(
                        bounds.width * 0.4,
                        bounds.height * 0.5,
                        Line::styled("No events on this floor", Style::default().fg(Color::DarkGray)),
                    );
                }
                for (x, y, line) in &labels {
                    ctx.print(*x, *y, line.clone());
                }
            });

        frame.render_widget(canvas, area);
    }
}

impl EventHandler for PlanView<'_> {
    type Event = PlanEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let count = self.floor.markers.len();
        match event {
            TuiEvent::CursorLeft | TuiEvent::CursorUp if count > 0 => {
                self.state.cursor = (self.state.cursor + count - 1) % count;
                None
            }
            TuiEvent::CursorRight | TuiEvent::CursorDown if count > 0 => {
                self.state.cursor = (self.state.cursor + 1) % count;
                None
            }
            TuiEvent::Submit => self
                .floor
                .markers
                .get(self.state.cursor)
                .map(|marker| PlanEvent::Click(marker.id.clone())),
            TuiEvent::Escape => self.selected.map(|_| PlanEvent::Deselect),
            _ => None,
        }
    }
}
