//! Row access for the grid
//!
//! The grid consumes rows through the `RowSource` contract. This module also
//! carries a reference implementation of that contract:
//!
//! - `PagedRowCache`: page-granular cache that answers "not loaded" on a
//!   miss and fetches queued pages when the host resolves them
//! - `FramePages`: polars-backed page fetcher for CSV data
//! - `MemoryPages`: in-memory page fetcher for small tables and tests
//!
//! ## Error Handling
//!
//! All fallible data operations return `DataResult<T>` which uses the
//! `DataError` type.

mod error;
mod frame_pages;
mod paged_cache;
mod source;

pub use error::*;
pub use frame_pages::*;
pub use paged_cache::*;
pub use source::*;
