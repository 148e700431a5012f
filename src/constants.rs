//! Grid-wide constants.
//!
//! Centralizes layout values and timing so the column model, the engine and
//! `GridSettings` defaults agree on one set of numbers.

// ============================================================================
// Column Layout
// ============================================================================

/// Width of the synthetic row-number column
pub const ROW_NUMBER_COLUMN_WIDTH: u32 = 40;

/// Default width of every data column
pub const DATA_COLUMN_WIDTH: u32 = 160;

/// Header row height when letter identifiers are shown
pub const HEADER_HEIGHT_WITH_LETTER: u32 = 68;

/// Header row height without letter identifiers
pub const HEADER_HEIGHT: u32 = 50;

/// Border the grid draws around itself; subtracted from the floored
/// container size
pub const GRID_BORDER: f32 = 2.0;

// ============================================================================
// Viewport
// ============================================================================

/// Floor applied to each measured container dimension
pub const MIN_VIEWPORT_DIMENSION: f32 = 100.0;

/// Resize debounce window in milliseconds
pub const RESIZE_DEBOUNCE_MS: u64 = 50;

// ============================================================================
// Keys and Placeholders
// ============================================================================

/// Prefix for the synthetic row-number column key; underscores are appended
/// until it collides with no real column key
pub const ROW_NUMBER_KEY_PREFIX: &str = "rn_";

/// Text rendered for a null cell, regardless of column type
pub const NULL_PLACEHOLDER: &str = "null";

/// Input name of the rename text field
pub const RENAME_INPUT_NAME: &str = "new-column-key";

/// Class carried by the rename input; drags starting inside it are rejected
pub const RENAME_INPUT_CLASS: &str = "column-key-input";

// ============================================================================
// Action Ids
// ============================================================================

/// Action id dispatched for a column reorder
pub const REORDER_COLUMNS_ACTION: &str = "reorder-columns";

/// Action id dispatched for a column rename
pub const RENAME_COLUMNS_ACTION: &str = "rename-columns";

// ============================================================================
// Reference Row Cache
// ============================================================================

/// Rows per page in `PagedRowCache`
pub const PAGE_SIZE: usize = 100;

/// Maximum pages kept by `PagedRowCache` before LRU eviction
pub const MAX_CACHED_PAGES: usize = 20;
