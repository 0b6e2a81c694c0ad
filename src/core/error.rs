//! # Errors
//!
//! Two families live here:
//!
//! - **Load-time** (`EmptyVenue`, `DuplicateFloorId`, `DuplicateMarkerId`,
//!   `InvalidDefaultFloor`, `Payload`, `Io`): fatal. No `Navigator` is built.
//! - **Operation-time** (`NotFound`): recoverable. The session state is left
//!   exactly as it was and the caller decides what to show.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// What kind of id a lookup was about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Floor,
    Marker,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Floor => write!(f, "floor"),
            EntityKind::Marker => write!(f, "marker"),
        }
    }
}

#[derive(Debug, Error)]
pub enum VenueError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: EntityKind, id: String },

    #[error("marker id '{id}' appears on floor '{first_floor}' and again on floor '{second_floor}'")]
    DuplicateMarkerId {
        id: String,
        first_floor: String,
        second_floor: String,
    },

    #[error("floor id '{id}' is used more than once")]
    DuplicateFloorId { id: String },

    #[error("floor '{floor}' has an unusable plan size {width} x {height}")]
    InvalidBounds { floor: String, width: f64, height: f64 },

    #[error("venue has no floors")]
    EmptyVenue,

    #[error("default floor '{id}' does not exist in the venue")]
    InvalidDefaultFloor { id: String },

    #[error("venue payload is malformed: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("could not read venue file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl VenueError {
    pub fn floor_not_found(id: &str) -> Self {
        VenueError::NotFound {
            kind: EntityKind::Floor,
            id: id.to_string(),
        }
    }

    pub fn marker_not_found(id: &str) -> Self {
        VenueError::NotFound {
            kind: EntityKind::Marker,
            id: id.to_string(),
        }
    }

    /// True for errors a running session can recover from.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, VenueError::NotFound { .. })
    }
}
