//! # Aggregate Marker Index
//!
//! Venue-wide marker lookup: marker id → marker + owning floor.
//!
//! Entries are stored in canonical order (floor display order, then each
//! floor's marker order) so iteration, search results and jump targets are
//! deterministic. A side table maps ids to entry positions.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::core::error::VenueError;
use crate::core::venue::{Floor, Marker};

#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    pub marker: Marker,
    pub floor_id: String,
    pub floor_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct MarkerIndex {
    entries: Vec<IndexEntry>,
    positions: HashMap<String, usize>,
}

impl MarkerIndex {
    /// Flatten `floors` into an index. Fails on the first repeated marker id.
    pub fn build(floors: &[Floor]) -> Result<Self, VenueError> {
        let capacity = floors.iter().map(|floor| floor.markers.len()).sum();
        let mut entries: Vec<IndexEntry> = Vec::with_capacity(capacity);
        let mut positions: HashMap<String, usize> = HashMap::with_capacity(capacity);

        for floor in floors {
            for marker in &floor.markers {
                match positions.entry(marker.id.clone()) {
                    Entry::Occupied(existing) => {
                        return Err(VenueError::DuplicateMarkerId {
                            id: marker.id.clone(),
                            first_floor: entries[*existing.get()].floor_id.clone(),
                            second_floor: floor.id.clone(),
                        });
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(entries.len());
                        entries.push(IndexEntry {
                            marker: marker.clone(),
                            floor_id: floor.id.clone(),
                            floor_name: floor.name.clone(),
                        });
                    }
                }
            }
        }

        Ok(Self { entries, positions })
    }

    pub fn get(&self, marker_id: &str) -> Option<&IndexEntry> {
        self.positions.get(marker_id).map(|&pos| &self.entries[pos])
    }

    pub fn contains(&self, marker_id: &str) -> bool {
        self.positions.contains_key(marker_id)
    }

    /// Entries in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
