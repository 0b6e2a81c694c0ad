use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::search::{SearchResult, is_blank};
use crate::core::state::Navigator;
use crate::tui::component::Component;
use crate::tui::components::{
    DetailPanel, FloorPicker, FloorTab, PlanView, SearchBox, TitleBar,
};
use crate::tui::{Focus, TuiState};

const SIDEBAR_WIDTH: u16 = 44;
const FLOOR_PICKER_HEIGHT: u16 = 3;

/// Screen regions, shared by drawing and mouse hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub title: Rect,
    pub floors: Rect,
    pub plan: Rect,
    pub search: Rect,
    pub detail: Rect,
}

pub fn app_layout(area: Rect) -> AppLayout {
    use Constraint::{Length, Min, Percentage};

    let [title, floors, body] =
        Layout::vertical([Length(1), Length(FLOOR_PICKER_HEIGHT), Min(0)]).areas(area);
    let [plan, sidebar] = Layout::horizontal([Min(0), Length(SIDEBAR_WIDTH)]).areas(body);
    let [search, detail] = Layout::vertical([Percentage(45), Percentage(55)]).areas(sidebar);

    AppLayout {
        title,
        floors,
        plan,
        search,
        detail,
    }
}

/// Floor tabs in display order, with search hit counts while a query is active.
pub fn floor_tabs(nav: &Navigator, results: &[SearchResult]) -> Vec<FloorTab> {
    let searching = !is_blank(&nav.state().search_query);
    nav.venue()
        .floors()
        .iter()
        .map(|floor| FloorTab {
            id: floor.id.clone(),
            name: floor.name.clone(),
            hits: searching.then(|| {
                results
                    .iter()
                    .filter_map(|r| nav.index().get(&r.marker_id))
                    .filter(|entry| entry.floor_id == floor.id)
                    .count()
            }),
        })
        .collect()
}

pub fn floor_picker(nav: &Navigator, results: &[SearchResult], focused: bool) -> FloorPicker {
    let active = nav
        .venue()
        .floor_position(&nav.state().active_floor_id)
        .unwrap_or(0);
    FloorPicker::new(floor_tabs(nav, results), active, focused)
}

pub fn draw_ui(frame: &mut Frame, nav: &Navigator, tui: &mut TuiState, result_limit: usize) {
    let layout = app_layout(frame.area());
    let results = nav.search_results();
    let state = nav.state();

    TitleBar::new(
        nav.venue().name().to_string(),
        nav.active_floor().name.clone(),
        tui.status_message.clone(),
    )
    .render(frame, layout.title);

    floor_picker(nav, &results, tui.focus == Focus::Floors).render(frame, layout.floors);

    PlanView::new(
        nav.active_floor(),
        state.selected_marker_id.as_deref(),
        tui.focus == Focus::Plan,
        &mut tui.plan,
    )
    .render(frame, layout.plan);

    SearchBox::new(
        &state.search_query,
        &results,
        result_limit,
        tui.focus == Focus::Search,
        &mut tui.search,
    )
    .render(frame, layout.search);

    let targets = nav.jump_targets();
    DetailPanel::new(
        nav.selected_detail(),
        &targets,
        tui.focus == Focus::Details,
        &mut tui.detail,
    )
    .render(frame, layout.detail);
}
