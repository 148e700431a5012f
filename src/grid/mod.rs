//! The grid proper: formatters, column model, header widgets and the engine.
//!
//! ## Modules
//!
//! - `format` - Cell formatter registry
//! - `columns` - Column model builder, row-number key, column letters
//! - `header` - Column header widget with drop zones and context menu
//! - `name_edit` - Editable column name control
//! - `intent` - Reorder, rename and dropdown intents and the dispatcher trait
//! - `reorder_history` - Display rows for a reorder history
//! - `engine` - `DataGrid`, the orchestrator

mod columns;
mod engine;
mod error;
mod format;
mod header;
mod intent;
mod name_edit;
mod reorder_history;

pub use columns::*;
pub use engine::*;
pub use error::*;
pub use format::*;
pub use header::*;
pub use intent::*;
pub use name_edit::*;
pub use reorder_history::*;
