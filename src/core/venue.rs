//! # Venue Model
//!
//! The static floor and marker data for one venue. Built once, validated once,
//! never mutated afterwards.
//!
//! ```text
//! VenueModel
//! ├── name: String
//! └── floors: Vec<Floor>          // display order (ground → upper)
//!     ├── id, name, plan_ref, bounds
//!     └── markers: Vec<Marker>    // sequence order within the floor
//! ```
//!
//! Construction rejects an empty floor list, repeated floor ids and repeated
//! marker ids (across *all* floors). Nothing is partially accepted.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::core::error::VenueError;
use crate::core::index::MarkerIndex;

/// A point in a floor's plan space.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Extent of a floor plan. Marker positions are expected inside `[0, width] × [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PlanBounds {
    pub width: f64,
    pub height: f64,
}

impl PlanBounds {
    /// Both extents finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for PlanBounds {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Marker {
    pub id: String,
    pub position: Position,
    pub event_name: String,
    pub location_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Opaque handle to a logo asset; the core never dereferences it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_ref: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Floor {
    pub id: String,
    pub name: String,
    /// Opaque handle to the floor's background geometry.
    #[serde(rename = "plan")]
    pub plan_ref: String,
    #[serde(default)]
    pub bounds: PlanBounds,
    #[serde(default)]
    pub markers: Vec<Marker>,
}

/// Serialized shape of a venue file.
#[derive(Debug, Deserialize)]
struct VenuePayload {
    #[serde(default = "default_venue_name")]
    name: String,
    floors: Vec<Floor>,
}

fn default_venue_name() -> String {
    "Venue".to_string()
}

/// Validated, immutable venue data.
#[derive(Debug, Clone)]
pub struct VenueModel {
    name: String,
    floors: Vec<Floor>,
    /// Built once here; the navigator reads it through `index()`.
    index: MarkerIndex,
}

impl VenueModel {
    /// Validate and build a venue from floors in display order.
    pub fn new(name: impl Into<String>, floors: Vec<Floor>) -> Result<Self, VenueError> {
        if floors.is_empty() {
            return Err(VenueError::EmptyVenue);
        }

        let mut seen = HashSet::with_capacity(floors.len());
        for floor in &floors {
            if !seen.insert(floor.id.as_str()) {
                return Err(VenueError::DuplicateFloorId {
                    id: floor.id.clone(),
                });
            }
            if !floor.bounds.is_valid() {
                return Err(VenueError::InvalidBounds {
                    floor: floor.id.clone(),
                    width: floor.bounds.width,
                    height: floor.bounds.height,
                });
            }
        }

        // Marker id uniqueness falls out of building the index.
        let index = MarkerIndex::build(&floors)?;
        let venue = Self {
            name: name.into(),
            floors,
            index,
        };
        info!(
            "Venue '{}' loaded: {} floors, {} markers",
            venue.name,
            venue.floors.len(),
            venue.index.len()
        );
        Ok(venue)
    }

    /// Parse a JSON payload and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, VenueError> {
        let payload: VenuePayload = serde_json::from_str(json)?;
        Self::new(payload.name, payload.floors)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Floors in display order.
    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn floor(&self, id: &str) -> Result<&Floor, VenueError> {
        self.floors
            .iter()
            .find(|floor| floor.id == id)
            .ok_or_else(|| VenueError::floor_not_found(id))
    }

    pub fn contains_floor(&self, id: &str) -> bool {
        self.floors.iter().any(|floor| floor.id == id)
    }

    /// Position of a floor in display order (used by the floor picker).
    pub fn floor_position(&self, id: &str) -> Option<usize> {
        self.floors.iter().position(|floor| floor.id == id)
    }

    pub fn first_floor(&self) -> &Floor {
        // Non-empty by construction.
        &self.floors[0]
    }

    pub fn marker_count(&self) -> usize {
        self.floors.iter().map(|floor| floor.markers.len()).sum()
    }

    /// Every floor's markers in one venue-wide index, in display order.
    pub fn index(&self) -> &MarkerIndex {
        &self.index
    }
}

/// Read and validate a venue JSON file.
pub fn load_venue(path: &Path) -> Result<VenueModel, VenueError> {
    debug!("Reading venue file {}", path.display());
    let json = fs::read_to_string(path).map_err(|source| VenueError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    VenueModel::from_json_str(&json)
}
