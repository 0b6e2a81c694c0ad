//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. The
//! navigator underneath has no idea it is being drawn.
//!
//! ## Event Routing
//!
//! Keyboard events go to whichever region has focus (Tab / Shift+Tab
//! cycle it). Mouse clicks are hit tested against the same layout the UI
//! draws with, and move focus to the clicked region. Every component event
//! becomes exactly one `Action`, except a floor pick, which also closes the
//! detail panel.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms between polls and only
//! redraws on input, resize, or a state change published by the navigator.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, error, info};
use std::io::{self, stdout};
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use ratatui::layout::Rect;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{Navigator, SessionState};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    DetailEvent, DetailPanel, DetailPanelState, FloorPickerEvent, PlanEvent, PlanView,
    PlanViewState, SearchBox, SearchBoxState, SearchEvent, plan_view, result_at,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(500);

/// Region that receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Floors,
    #[default]
    Plan,
    Search,
    Details,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Floors => Focus::Plan,
            Focus::Plan => Focus::Search,
            Focus::Search => Focus::Details,
            Focus::Details => Focus::Floors,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Floors => Focus::Details,
            Focus::Plan => Focus::Floors,
            Focus::Search => Focus::Plan,
            Focus::Details => Focus::Search,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
#[derive(Default)]
pub struct TuiState {
    pub focus: Focus,
    // Persistent component states
    pub plan: PlanViewState,
    pub search: SearchBoxState,
    pub detail: DetailPanelState,
    /// Last rejected intent, shown in the title bar until the next success.
    pub status_message: String,
}

impl TuiState {
    pub fn new() -> Self {
        Self::default()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Apply one action, recording a rejection in the status line.
///
/// Returns true when the front end should quit.
fn apply(nav: &mut Navigator, tui: &mut TuiState, action: Action) -> bool {
    match update(nav, action) {
        Ok(Effect::Quit) => true,
        Ok(Effect::None) => {
            tui.status_message.clear();
            false
        }
        Err(e) => {
            tui.status_message = e.to_string();
            false
        }
    }
}

/// Picking a floor from the tabs also closes whatever was open.
fn pick_floor(nav: &mut Navigator, tui: &mut TuiState, floor_id: String) -> bool {
    if nav.state().active_floor_id == floor_id {
        return false;
    }
    let before = nav.state().active_floor_id.clone();
    apply(nav, tui, Action::PickFloor(floor_id));
    if nav.state().active_floor_id != before {
        apply(nav, tui, Action::ClearSelection);
    }
    false
}

fn handle_click(
    nav: &mut Navigator,
    tui: &mut TuiState,
    col: u16,
    row: u16,
    frame_area: Rect,
    result_limit: usize,
) -> bool {
    let layout = ui::app_layout(frame_area);
    let hit = ratatui::layout::Position::new(col, row);

    if layout.floors.contains(hit) {
        tui.focus = Focus::Floors;
        let results = nav.search_results();
        let picker = ui::floor_picker(nav, &results, true);
        let picked = picker
            .tab_at(col, row, layout.floors)
            .and_then(|i| picker.tabs.get(i))
            .map(|tab| tab.id.clone());
        return match picked {
            Some(id) => pick_floor(nav, tui, id),
            None => false,
        };
    }

    if layout.plan.contains(hit) {
        tui.focus = Focus::Plan;
        let clicked = plan_view::marker_at(col, row, layout.plan, nav.active_floor())
            .map(|marker| marker.id.clone());
        return match clicked {
            Some(id) => apply(nav, tui, Action::ClickMarker(id)),
            None => false,
        };
    }

    if layout.search.contains(hit) {
        tui.focus = Focus::Search;
        let scroll = tui.search.list_state.offset();
        let chosen = result_at(row, layout.search, scroll)
            .filter(|&i| i < result_limit)
            .and_then(|i| nav.search_results().into_iter().nth(i))
            .map(|result| result.marker_id);
        if let Some(id) = chosen {
            return apply(nav, tui, Action::ClickSearchResult(id));
        }
        return false;
    }

    if layout.detail.contains(hit) {
        tui.focus = Focus::Details;
    }
    false
}

/// Route one terminal event. Returns true when the app should quit.
pub fn handle_event(
    nav: &mut Navigator,
    tui: &mut TuiState,
    event: &TuiEvent,
    frame_area: Rect,
    result_limit: usize,
) -> bool {
    match event {
        TuiEvent::Resize => return false,
        TuiEvent::ForceQuit => return apply(nav, tui, Action::Quit),
        TuiEvent::FocusNext => {
            tui.focus = tui.focus.next();
            return false;
        }
        TuiEvent::FocusPrev => {
            tui.focus = tui.focus.prev();
            return false;
        }
        TuiEvent::MouseClick(col, row) => {
            return handle_click(nav, tui, *col, *row, frame_area, result_limit);
        }
        // Typing goes to the search box; everywhere else 'q' quits
        TuiEvent::InputChar('q') if tui.focus != Focus::Search => {
            return apply(nav, tui, Action::Quit);
        }
        _ => {}
    }

    match tui.focus {
        Focus::Floors => {
            let results = nav.search_results();
            let mut picker = ui::floor_picker(nav, &results, true);
            match picker.handle_event(event) {
                Some(FloorPickerEvent::Pick(id)) => pick_floor(nav, tui, id),
                None => false,
            }
        }
        Focus::Plan => {
            let plan_event = PlanView::new(
                nav.active_floor(),
                nav.state().selected_marker_id.as_deref(),
                true,
                &mut tui.plan,
            )
            .handle_event(event);
            match plan_event {
                Some(PlanEvent::Click(id)) => apply(nav, tui, Action::ClickMarker(id)),
                Some(PlanEvent::Deselect) => apply(nav, tui, Action::ClearSelection),
                None => false,
            }
        }
        Focus::Search => {
            let results = nav.search_results();
            let search_event = SearchBox::new(
                &nav.state().search_query,
                &results,
                result_limit,
                true,
                &mut tui.search,
            )
            .handle_event(event);
            match search_event {
                Some(SearchEvent::QueryChanged(text)) => apply(nav, tui, Action::TypeQuery(text)),
                Some(SearchEvent::Choose(id)) => apply(nav, tui, Action::ClickSearchResult(id)),
                None => false,
            }
        }
        Focus::Details => {
            let targets = nav.jump_targets();
            let detail_event =
                DetailPanel::new(nav.selected_detail(), &targets, true, &mut tui.detail)
                    .handle_event(event);
            match detail_event {
                Some(DetailEvent::Jump(id)) => apply(nav, tui, Action::ClickSearchResult(id)),
                Some(DetailEvent::Close) => apply(nav, tui, Action::ClearSelection),
                None => false,
            }
        }
    }
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    // Fail before touching the terminal so the error prints normally
    let mut nav = Navigator::from_config(&config).map_err(|e| {
        error!("Could not open venue {}: {}", config.venue_file.display(), e);
        io::Error::other(e)
    })?;
    let changes = nav.subscribe();
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let guard = TerminalModeGuard::new();
    if let Err(e) = &guard {
        error!("Failed to enable terminal modes: {}", e);
    }

    let result = event_loop(&mut terminal, &mut nav, &mut tui, &changes, config.result_limit);

    drop(guard);
    ratatui::restore();
    info!("Wayfinder shutting down");
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    nav: &mut Navigator,
    tui: &mut TuiState,
    changes: &Receiver<SessionState>,
    result_limit: usize,
) -> io::Result<()> {
    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, nav, tui, result_limit))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(IDLE_POLL);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let size = terminal.size()?;
        let frame_area = Rect::new(0, 0, size.width, size.height);
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(nav, tui, &event, frame_area, result_limit) {
                should_quit = true;
                break;
            }
        }

        for snapshot in changes.try_iter() {
            debug!("State changed: {:?}", snapshot);
            needs_redraw = true;
        }

        if should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::robo_navigator;

    const FRAME: Rect = Rect {
        x: 0,
        y: 0,
        width: 120,
        height: 30,
    };

    fn send(nav: &mut Navigator, tui: &mut TuiState, event: TuiEvent) -> bool {
        handle_event(nav, tui, &event, FRAME, 10)
    }

    fn type_text(nav: &mut Navigator, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            send(nav, tui, TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_focus_cycles_both_ways() {
        let mut focus = Focus::default();
        assert_eq!(focus, Focus::Plan);
        for _ in 0..4 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Plan);
        assert_eq!(Focus::Floors.prev(), Focus::Details);
    }

    #[test]
    fn test_q_quits_except_while_searching() {
        let mut nav = robo_navigator();
        let mut tui = TuiState::new();
        assert!(send(&mut nav, &mut tui, TuiEvent::InputChar('q')));

        tui.focus = Focus::Search;
        assert!(!send(&mut nav, &mut tui, TuiEvent::InputChar('q')));
        assert_eq!(nav.state().search_query, "q");

        assert!(send(&mut nav, &mut tui, TuiEvent::ForceQuit));
    }

    #[test]
    fn test_search_then_choose_switches_floor() {
        let mut nav = robo_navigator();
        let mut tui = TuiState::new();
        tui.focus = Focus::Search;

        type_text(&mut nav, &mut tui, "wars");
        assert_eq!(nav.state().search_query, "wars");
        send(&mut nav, &mut tui, TuiEvent::Submit);

        assert_eq!(nav.state().active_floor_id, "first");
        assert_eq!(nav.state().selected_marker_id.as_deref(), Some("m2"));
        // The query survives the jump
        assert_eq!(nav.state().search_query, "wars");
    }

    #[test]
    fn test_floor_keys_pick_and_close_detail() {
        let mut nav = robo_navigator();
        let mut tui = TuiState::new();
        nav.select_marker("m1").unwrap();

        tui.focus = Focus::Floors;
        send(&mut nav, &mut tui, TuiEvent::CursorRight);
        assert_eq!(nav.state().active_floor_id, "first");
        assert_eq!(nav.state().selected_marker_id, None);

        send(&mut nav, &mut tui, TuiEvent::InputChar('1'));
        assert_eq!(nav.state().active_floor_id, "ground");
    }

    #[test]
    fn test_plan_keys_select_and_deselect() {
        let mut nav = robo_navigator();
        let mut tui = TuiState::new();

        send(&mut nav, &mut tui, TuiEvent::Submit);
        assert_eq!(nav.state().selected_marker_id.as_deref(), Some("m1"));

        send(&mut nav, &mut tui, TuiEvent::Escape);
        assert_eq!(nav.state().selected_marker_id, None);
        assert_eq!(nav.state().active_floor_id, "ground");
    }

    #[test]
    fn test_detail_jump_crosses_floors() {
        let mut nav = robo_navigator();
        let mut tui = TuiState::new();
        nav.select_marker("m1").unwrap();

        tui.focus = Focus::Details;
        send(&mut nav, &mut tui, TuiEvent::Submit);
        assert_eq!(nav.state().active_floor_id, "first");
        assert_eq!(nav.state().selected_marker_id.as_deref(), Some("m2"));

        send(&mut nav, &mut tui, TuiEvent::Escape);
        assert_eq!(nav.state().selected_marker_id, None);
    }

    #[test]
    fn test_click_floor_tab() {
        let mut nav = robo_navigator();
        let mut tui = TuiState::new();

        // Tab row sits inside the picker border; "Ground Floor" spans cols 1..15
        send(&mut nav, &mut tui, TuiEvent::MouseClick(20, 2));
        assert_eq!(tui.focus, Focus::Floors);
        assert_eq!(nav.state().active_floor_id, "first");
    }

    #[test]
    fn test_click_marker_on_plan() {
        let mut nav = robo_navigator();
        let mut tui = TuiState::new();
        let layout = ui::app_layout(FRAME);

        let inner = ratatui::widgets::Block::bordered().inner(layout.plan);
        let target = (inner.x..inner.right())
            .flat_map(|col| (inner.y..inner.bottom()).map(move |row| (col, row)))
            .find(|&(col, row)| {
                plan_view::marker_at(col, row, layout.plan, nav.active_floor()).is_some()
            })
            .expect("marker label on screen");

        send(&mut nav, &mut tui, TuiEvent::MouseClick(target.0, target.1));
        assert_eq!(nav.state().selected_marker_id.as_deref(), Some("m1"));

        // Empty canvas does nothing
        send(&mut nav, &mut tui, TuiEvent::MouseClick(inner.x, inner.bottom() - 1));
        assert_eq!(nav.state().selected_marker_id.as_deref(), Some("m1"));
    }

    #[test]
    fn test_rejected_intent_sets_status() {
        let mut nav = robo_navigator();
        let mut tui = TuiState::new();

        assert!(!apply(&mut nav, &mut tui, Action::ClickMarker("ghost".into())));
        assert!(!tui.status_message.is_empty());
        assert_eq!(nav.state().selected_marker_id, None);

        apply(&mut nav, &mut tui, Action::ClickMarker("m1".into()));
        assert!(tui.status_message.is_empty());
    }

    #[test]
    fn test_every_mutation_publishes() {
        let mut nav = robo_navigator();
        let changes = nav.subscribe();
        let mut tui = TuiState::new();
        tui.focus = Focus::Search;

        type_text(&mut nav, &mut tui, "ro");
        let snapshots: Vec<_> = changes.try_iter().collect();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[1].search_query, "ro");
    }
}
