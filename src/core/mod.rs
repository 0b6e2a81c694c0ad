//! # Core Navigation Logic
//!
//! This module contains Wayfinder's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • VenueModel (data)    │
//!                    │  • Navigator (state)    │
//!                    │  • Action (intents)     │
//!                    │  • resolve() (search)   │
//!                    │                         │
//!                    │  No UI. No terminal.    │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │   Floor    │      │    Plan    │      │  Search /  │
//!     │   picker   │      │   canvas   │      │  details   │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`venue`]: `VenueModel`, floors and markers, payload loading
//! - [`index`]: the venue-wide `MarkerIndex`
//! - [`search`]: `resolve()`, the pure search query
//! - [`state`]: `Navigator`, the only writer of session state
//! - [`action`]: the `Action` enum and `update()`
//! - [`shared`]: `SharedNavigator` for multi-threaded hosts
//! - [`config`]: layered settings
//! - [`error`]: `VenueError`

pub mod action;
pub mod config;
pub mod error;
pub mod index;
pub mod search;
pub mod shared;
pub mod state;
pub mod venue;

pub use action::{Action, Effect, update};
pub use error::VenueError;
pub use index::{IndexEntry, MarkerIndex};
pub use search::{SearchResult, resolve};
pub use shared::SharedNavigator;
pub use state::{Navigator, SessionState};
pub use venue::{Floor, Marker, PlanBounds, Position, VenueModel, load_venue};
