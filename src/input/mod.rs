//! Gesture and environment input for the grid.
//!
//! ## Modules
//!
//! - `state` - Column drag state machine
//! - `resize` - Container measurement and debounced window resize

mod resize;
mod state;

pub use resize::{ContainerMeasure, ResizeBus, ResizeSubscription, Viewport};
pub use state::DragState;
