//! # Navigation State
//!
//! The `Navigator` is the only thing allowed to change what the widget shows.
//!
//! ```text
//! Navigator
//! ├── venue: Arc<VenueModel>        // shared, read-only, owns the index
//! ├── state: SessionState           // the mutable part
//! │   ├── active_floor_id: String
//! │   ├── selected_marker_id: Option<String>
//! │   └── search_query: String
//! └── subscribers: Vec<Sender>      // get a snapshot after each change
//! ```
//!
//! Every mutator validates first and writes second, so a failed call leaves
//! `state` untouched. `navigate_to_marker` writes both fields inside one
//! `&mut self` borrow; nothing can observe the halfway point.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use log::{debug, info};

use crate::core::config::ResolvedConfig;
use crate::core::error::VenueError;
use crate::core::index::{IndexEntry, MarkerIndex};
use crate::core::search::{self, SearchResult};
use crate::core::venue::{Floor, Marker, VenueModel, load_venue};

/// Snapshot of what is currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub active_floor_id: String,
    pub selected_marker_id: Option<String>,
    pub search_query: String,
}

pub struct Navigator {
    venue: Arc<VenueModel>,
    state: SessionState,
    subscribers: Vec<Sender<SessionState>>,
}

impl Navigator {
    /// Build a navigator showing `default_floor_id` with nothing selected.
    pub fn new(venue: Arc<VenueModel>, default_floor_id: &str) -> Result<Self, VenueError> {
        if !venue.contains_floor(default_floor_id) {
            return Err(VenueError::InvalidDefaultFloor {
                id: default_floor_id.to_string(),
            });
        }
        info!(
            "Navigator ready on floor '{}' ({} markers indexed)",
            default_floor_id,
            venue.index().len()
        );

        Ok(Self {
            venue,
            state: SessionState {
                active_floor_id: default_floor_id.to_string(),
                selected_marker_id: None,
                search_query: String::new(),
            },
            subscribers: Vec::new(),
        })
    }

    /// Load the configured venue file and start on the configured floor,
    /// or the first floor when none is configured.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self, VenueError> {
        let venue = load_venue(&config.venue_file)?;
        let default_floor = config
            .default_floor
            .clone()
            .unwrap_or_else(|| venue.first_floor().id.clone());
        Self::new(Arc::new(venue), &default_floor)
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Show another floor. The selection is left alone.
    pub fn set_active_floor(&mut self, floor_id: &str) -> Result<(), VenueError> {
        if !self.venue.contains_floor(floor_id) {
            return Err(VenueError::floor_not_found(floor_id));
        }
        self.state.active_floor_id = floor_id.to_string();
        debug!("Active floor -> {}", floor_id);
        self.publish();
        Ok(())
    }

    /// Select a marker without touching the active floor.
    pub fn select_marker(&mut self, marker_id: &str) -> Result<(), VenueError> {
        if !self.index().contains(marker_id) {
            return Err(VenueError::marker_not_found(marker_id));
        }
        self.state.selected_marker_id = Some(marker_id.to_string());
        debug!("Selected marker -> {}", marker_id);
        self.publish();
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.state.selected_marker_id = None;
        debug!("Selection cleared");
        self.publish();
    }

    /// Cross-floor jump: show the marker's floor and select it in one step.
    pub fn navigate_to_marker(&mut self, marker_id: &str) -> Result<(), VenueError> {
        let floor_id = self
            .index()
            .get(marker_id)
            .map(|entry| entry.floor_id.clone())
            .ok_or_else(|| VenueError::marker_not_found(marker_id))?;

        self.state.active_floor_id = floor_id;
        self.state.selected_marker_id = Some(marker_id.to_string());
        debug!(
            "Navigated to marker {} on floor {}",
            marker_id, self.state.active_floor_id
        );
        self.publish();
        Ok(())
    }

    /// Store the query verbatim; trimming happens at resolve time.
    pub fn set_search_query(&mut self, text: impl Into<String>) {
        self.state.search_query = text.into();
        self.publish();
    }

    /// Swap in a new, already validated venue along with its index.
    ///
    /// The active floor survives if the new venue still has it, otherwise the
    /// first floor is shown. A selection that no longer resolves is dropped.
    pub fn reload_venue(&mut self, venue: Arc<VenueModel>) {
        let active_floor_id = if venue.contains_floor(&self.state.active_floor_id) {
            self.state.active_floor_id.clone()
        } else {
            venue.first_floor().id.clone()
        };
        let selected_marker_id = self
            .state
            .selected_marker_id
            .take()
            .filter(|id| venue.index().contains(id));

        info!(
            "Venue reloaded: {} markers indexed, showing floor '{}'",
            venue.index().len(),
            active_floor_id
        );
        self.venue = venue;
        self.state.active_floor_id = active_floor_id;
        self.state.selected_marker_id = selected_marker_id;
        self.publish();
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    /// Receive a snapshot after every successful mutation.
    ///
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<SessionState> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn publish(&mut self) {
        let snapshot = &self.state;
        self.subscribers
            .retain(|subscriber| subscriber.send(snapshot.clone()).is_ok());
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.clone()
    }

    pub fn venue(&self) -> &VenueModel {
        &self.venue
    }

    pub fn index(&self) -> &MarkerIndex {
        self.venue.index()
    }

    pub fn active_floor(&self) -> &Floor {
        // active_floor_id is validated on every write
        self.venue
            .floors()
            .iter()
            .find(|floor| floor.id == self.state.active_floor_id)
            .unwrap_or_else(|| self.venue.first_floor())
    }

    /// Markers drawn on the current plan.
    pub fn floor_markers(&self) -> &[Marker] {
        &self.active_floor().markers
    }

    /// The selected marker with its owning floor, for the detail panel.
    pub fn selected_detail(&self) -> Option<&IndexEntry> {
        self.state
            .selected_marker_id
            .as_deref()
            .and_then(|id| self.index().get(id))
    }

    /// Whether the selection sits on the floor being shown.
    pub fn selection_on_active_floor(&self) -> bool {
        self.selected_detail()
            .is_some_and(|entry| entry.floor_id == self.state.active_floor_id)
    }

    /// Every indexed marker except the selected one, in canonical order.
    pub fn jump_targets(&self) -> Vec<&IndexEntry> {
        let selected = self.state.selected_marker_id.as_deref();
        self.index()
            .iter()
            .filter(|entry| Some(entry.marker.id.as_str()) != selected)
            .collect()
    }

    pub fn search_results(&self) -> Vec<SearchResult> {
        if search::is_blank(&self.state.search_query) {
            return Vec::new();
        }
        search::resolve(&self.state.search_query, self.index())
    }
}
