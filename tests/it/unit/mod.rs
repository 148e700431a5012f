//! Unit tests for the grid.

mod engine_tests;
mod settings_tests;
