//! # Shared Navigator
//!
//! Thread-safe handle for hosts that dispatch intents from more than one
//! place at once. Mutations take the write lock for their whole duration and
//! reads see whole snapshots, so a (floor, marker) pair is never torn.

use std::sync::mpsc::Receiver;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::core::action::{Action, Effect, update};
use crate::core::error::VenueError;
use crate::core::state::{Navigator, SessionState};

#[derive(Clone)]
pub struct SharedNavigator {
    inner: Arc<RwLock<Navigator>>,
}

impl SharedNavigator {
    pub fn new(navigator: Navigator) -> Self {
        Self {
            inner: Arc::new(RwLock::new(navigator)),
        }
    }

    /// Apply one intent under the write lock.
    pub fn dispatch(&self, action: Action) -> Result<Effect, VenueError> {
        update(&mut self.write(), action)
    }

    pub fn snapshot(&self) -> SessionState {
        self.read().snapshot()
    }

    /// Run a read-only query against a consistent view.
    pub fn with<R>(&self, f: impl FnOnce(&Navigator) -> R) -> R {
        f(&self.read())
    }

    pub fn subscribe(&self) -> Receiver<SessionState> {
        self.write().subscribe()
    }

    // Every write completes before the guard drops, so a poisoned lock still
    // holds a valid state.
    fn read(&self) -> RwLockReadGuard<'_, Navigator> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Navigator> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::expo_venue;
    use std::thread;

    fn shared_expo() -> SharedNavigator {
        SharedNavigator::new(Navigator::new(Arc::new(expo_venue()), "ground").unwrap())
    }

    #[test]
    fn test_dispatch_and_snapshot() {
        let shared = shared_expo();
        shared
            .dispatch(Action::ClickSearchResult("s1".into()))
            .unwrap();
        let snapshot = shared.snapshot();
        assert_eq!(snapshot.active_floor_id, "second");
        assert_eq!(snapshot.selected_marker_id.as_deref(), Some("s1"));
    }

    #[test]
    fn test_concurrent_jumps_never_tear() {
        let shared = shared_expo();
        let owners: Vec<(String, String)> = shared.with(|nav| {
            nav.index()
                .iter()
                .map(|e| (e.marker.id.clone(), e.floor_id.clone()))
                .collect()
        });

        let writers: Vec<_> = (0..4)
            .map(|offset| {
                let shared = shared.clone();
                let owners = owners.clone();
                thread::spawn(move || {
                    for round in 0..50 {
                        let (marker_id, _) = &owners[(round + offset) % owners.len()];
                        shared
                            .dispatch(Action::ClickSearchResult(marker_id.clone()))
                            .unwrap();
                    }
                })
            })
            .collect();

        let reader = {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    shared.with(|nav| {
                        if let Some(entry) = nav.selected_detail() {
                            assert_eq!(entry.floor_id, nav.state().active_floor_id);
                        }
                    });
                }
            })
        };

        for handle in writers {
            handle.join().unwrap();
        }
        reader.join().unwrap();

        let final_state = shared.snapshot();
        let selected = final_state.selected_marker_id.unwrap();
        let (_, owner) = owners.iter().find(|(id, _)| *id == selected).unwrap();
        assert_eq!(&final_state.active_floor_id, owner);
    }

    #[test]
    fn test_subscribe_through_handle() {
        let shared = shared_expo();
        let rx = shared.subscribe();
        shared.dispatch(Action::TypeQuery("lab".into())).unwrap();
        assert_eq!(rx.try_recv().unwrap().search_query, "lab");
    }
}
