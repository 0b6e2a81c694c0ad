use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// Something that draws into a region of the screen.
///
/// Props (floor, selection, query, results) are struct fields borrowed from
/// the `Navigator` for one frame. Any state a component keeps between frames
/// is presentation only: cursors and scroll offsets.
pub trait Component {
    /// Takes `&mut self` so a render pass can clamp cursors or update
    /// scroll offsets.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that turns terminal input into its own intent type.
///
/// Intents are plain data. The event loop maps each one onto a core
/// `Action`; components never call the navigator.
pub trait EventHandler {
    type Event;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
