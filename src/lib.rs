//! Headless data grid engine.
//!
//! Column model, typed cell formatting, drag-to-reorder and rename
//! protocols, and the row-access contract for a virtualized table view.
//! Painting is left to the host: every widget here is a state machine
//! plus a serializable render model.
//!
//! ## Modules
//!
//! - `types` - Cell values, column types, sort state, rows
//! - `data` - Row-source contract and a paged reference cache
//! - `grid` - Formatters, column model, header widgets, engine
//! - `input` - Drag state machine and debounced resize
//! - `settings` - Persisted layout settings
//! - `logging` - Tracing subscriber setup
//! - `perf` - Render-path timing

pub mod constants;
pub mod data;
pub mod grid;
pub mod input;
pub mod logging;
pub mod perf;
pub mod settings;
pub mod types;
