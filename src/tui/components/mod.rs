//! # TUI Components
//!
//! The presentation adapters. Each one reads what it needs from the
//! `Navigator` as props and reports user intent as a component event, which
//! the event loop turns into a core `Action`.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: venue name, active floor, status line
//! - `FloorPicker`: floor tabs with per-floor search hit counts
//!
//! ### Stateful Components (Persistent State + Transient Wrapper)
//!
//! The persistent half lives in `TuiState` and holds presentation state
//! only (cursors, scroll offsets). The wrapper is rebuilt every frame with
//! fresh props, so nothing here can drift from the navigator.
//!
//! - `PlanView` / `PlanViewState`: marker canvas for the active floor
//! - `SearchBox` / `SearchBoxState`: query input and result list
//! - `DetailPanel` / `DetailPanelState`: selected marker and jump targets
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status line)
//! ├── floor_picker.rs  (Floor tabs)
//! ├── plan_view.rs     (Canvas with markers, hit testing)
//! ├── detail_panel.rs  (Selected marker + jump targets)
//! └── search_box/      (Query input with cursor + results)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod detail_panel;
pub mod floor_picker;
pub mod plan_view;
pub mod search_box;

pub use detail_panel::{DetailEvent, DetailPanel, DetailPanelState};
pub use floor_picker::{FloorPicker, FloorPickerEvent, FloorTab};
pub use plan_view::{PlanEvent, PlanView, PlanViewState};
pub use search_box::{SearchBox, SearchBoxState, SearchEvent, result_at};
