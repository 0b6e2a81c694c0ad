//! # Actions
//!
//! Every user intent becomes an `Action`.
//! Clicking a floor tab? That's `Action::PickFloor(id)`.
//! Typing in the search box? That's `Action::TypeQuery(text)`.
//!
//! `update()` applies one action to the navigator. Each intent maps onto
//! exactly one `Navigator` operation, so adapters never touch state directly.
//!
//! ```text
//! Navigator + Action  →  update()  →  Result<Effect>
//! ```
//!
//! A rejected intent returns the error and leaves the navigator as it was.

use log::{debug, warn};

use crate::core::error::VenueError;
use crate::core::state::Navigator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Floor picker: show this floor.
    PickFloor(String),
    /// Plan canvas: a marker on the displayed floor was clicked.
    ClickMarker(String),
    /// Search input changed.
    TypeQuery(String),
    /// A search result or jump target was chosen; may cross floors.
    ClickSearchResult(String),
    /// Detail panel closed.
    ClearSelection,
    Quit,
}

/// What the front end should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

pub fn update(nav: &mut Navigator, action: Action) -> Result<Effect, VenueError> {
    debug!("Applying {:?}", action);
    let result = match action {
        Action::PickFloor(id) => nav.set_active_floor(&id),
        Action::ClickMarker(id) => nav.select_marker(&id),
        Action::TypeQuery(text) => {
            nav.set_search_query(text);
            Ok(())
        }
        Action::ClickSearchResult(id) => nav.navigate_to_marker(&id),
        Action::ClearSelection => {
            nav.clear_selection();
            Ok(())
        }
        Action::Quit => return Ok(Effect::Quit),
    };

    match result {
        Ok(()) => Ok(Effect::None),
        Err(e) => {
            warn!("Intent rejected: {}", e);
            Err(e)
        }
    }
}
