//! # Search Resolver
//!
//! Pure query over the aggregate index: case-insensitive substring match of
//! the trimmed query against each marker's event name.
//!
//! Results come back in index order (floor display order, then marker order).
//! No ranking and no limit; truncation is the presentation layer's business.

use crate::core::index::MarkerIndex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub marker_id: String,
    pub event_name: String,
    pub floor_name: String,
}

/// True when `query` would match nothing because it is blank.
pub fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

pub fn resolve(query: &str, index: &MarkerIndex) -> Vec<SearchResult> {
    if is_blank(query) {
        return Vec::new();
    }

    let needle = query.trim().to_lowercase();
    index
        .iter()
        .filter(|entry| entry.marker.event_name.to_lowercase().contains(&needle))
        .map(|entry| SearchResult {
            marker_id: entry.marker.id.clone(),
            event_name: entry.marker.event_name.clone(),
            floor_name: entry.floor_name.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{expo_venue, robo_venue};

    fn ids(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.marker_id.as_str()).collect()
    }

    #[test]
    fn test_case_insensitive_substring() {
        let venue = robo_venue();
        let index = venue.index();
        assert_eq!(ids(&resolve("robo", index)), vec!["m1", "m2"]);
        assert_eq!(ids(&resolve("ROBO", index)), vec!["m1", "m2"]);
        assert_eq!(ids(&resolve("wars", index)), vec!["m2"]);
        assert_eq!(ids(&resolve("o r", index)), vec!["m1"]);
    }

    #[test]
    fn test_query_is_trimmed() {
        let venue = robo_venue();
        let index = venue.index();
        assert_eq!(ids(&resolve("  race \t", index)), vec!["m1"]);
    }

    #[test]
    fn test_blank_query_returns_nothing() {
        let venue = robo_venue();
        let index = venue.index();
        assert!(resolve("", index).is_empty());
        assert!(resolve("   \n", index).is_empty());
    }

    #[test]
    fn test_no_match() {
        let venue = robo_venue();
        let index = venue.index();
        assert!(resolve("origami", index).is_empty());
    }

    #[test]
    fn test_matches_event_name_only() {
        // "Hall A" is a location name in the fixture, not an event name.
        let venue = robo_venue();
        let index = venue.index();
        assert!(resolve("hall", index).is_empty());
    }

    #[test]
    fn test_results_follow_index_order_not_alphabetical() {
        let venue = expo_venue();
        let index = venue.index();
        let results = resolve("a", index);
        let expected: Vec<&str> = index
            .iter()
            .filter(|e| e.marker.event_name.to_lowercase().contains('a'))
            .map(|e| e.marker.id.as_str())
            .collect();
        assert_eq!(ids(&results), expected);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let venue = expo_venue();
        let index = venue.index();
        assert_eq!(resolve("o", index), resolve("o", index));
    }

    #[test]
    fn test_result_carries_floor_name() {
        let venue = robo_venue();
        let index = venue.index();
        let results = resolve("wars", index);
        assert_eq!(results[0].event_name, "Robo Wars");
        assert_eq!(results[0].floor_name, "First Floor");
    }
}
