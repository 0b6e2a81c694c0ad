//! # TitleBar Component
//!
//! Top status line: venue name, the floor being shown, and a transient status
//! message (rejected intents, focus hints).
//!
//! Stateless. All three props are read fresh every frame:
//! - `venue_name`: from the venue model
//! - `floor_name`: from the navigator's active floor
//! - `status_message`: TUI state
//!
//! ## Conditional Formatting
//!
//! 1. **Status message**: `"Tech Fest | Ground Floor | marker 'm9' not found"`
//! 2. **Default**: `"Tech Fest | Ground Floor"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub venue_name: String,
    pub floor_name: String,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(venue_name: String, floor_name: String, status_message: String) -> Self {
        Self {
            venue_name,
            floor_name,
            status_message,
        }
    }

    fn title_text(&self) -> String {
        if self.status_message.is_empty() {
            format!("{} | {}", self.venue_name, self.floor_name)
        } else {
            format!(
                "{} | {} | {}",
                self.venue_name, self.floor_name, self.status_message
            )
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.title_text(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}
