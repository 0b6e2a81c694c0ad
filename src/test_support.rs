//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use crate::core::state::Navigator;
use crate::core::venue::{Floor, Marker, PlanBounds, Position, VenueModel};

pub fn marker(id: &str, event_name: &str) -> Marker {
    Marker {
        id: id.to_string(),
        position: Position::new(50.0, 50.0),
        event_name: event_name.to_string(),
        location_name: format!("Booth {}", id),
        description: None,
        logo_ref: None,
    }
}

pub fn floor(id: &str, name: &str, markers: Vec<Marker>) -> Floor {
    Floor {
        id: id.to_string(),
        name: name.to_string(),
        plan_ref: format!("plans/{}.svg", id),
        bounds: PlanBounds::default(),
        markers,
    }
}

/// Two floors, one "Robo" event on each.
pub fn robo_venue() -> VenueModel {
    let mut race = marker("m1", "Robo Race");
    race.location_name = "Hall A".to_string();
    race.position = Position::new(20.0, 30.0);
    race.description = Some("Line-following robots against the clock".to_string());

    let mut wars = marker("m2", "Robo Wars");
    wars.location_name = "Arena".to_string();
    wars.position = Position::new(70.0, 60.0);

    VenueModel::new(
        "Tech Fest",
        vec![
            floor("ground", "Ground Floor", vec![race]),
            floor("first", "First Floor", vec![wars]),
        ],
    )
    .unwrap()
}

/// Three floors with several markers each, plus one empty floor.
pub fn expo_venue() -> VenueModel {
    VenueModel::new(
        "Expo",
        vec![
            floor(
                "ground",
                "Ground",
                vec![
                    marker("g1", "Drone Show"),
                    marker("g2", "Code Sprint"),
                    marker("g3", "Art Gallery"),
                ],
            ),
            floor(
                "first",
                "First",
                vec![marker("f1", "Quiz Bowl"), marker("f2", "Laser Tag")],
            ),
            floor("second", "Second", vec![marker("s1", "Robotics Lab")]),
            floor("roof", "Roof", vec![]),
        ],
    )
    .unwrap()
}

/// A navigator over `robo_venue()` starting on the ground floor.
pub fn robo_navigator() -> Navigator {
    Navigator::new(Arc::new(robo_venue()), "ground").unwrap()
}
