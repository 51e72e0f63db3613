// SPDX-License-Identifier: AGPL-3.0-or-later
//! sfls core
//!
//! Turns remote directory entries into `ls`-style output: entry adaptation,
//! color resolution from `LSCOLORS`/`LS_COLORS`, sorting, and column layout.

pub mod color;
pub mod columns;
pub mod entry;
pub mod error;
pub mod listing;
pub mod options;
pub mod render;
pub mod sort;
pub mod source;

pub use color::{ColorCategory, ColorMap};
pub use columns::ColumnPlan;
pub use entry::{DirectoryListing, EntryKind, RawEntry};
pub use error::{SflsError, SflsResult};
pub use listing::{EntryAdapter, Listing};
pub use options::{RenderOptions, SortKey};
pub use render::{render, Renderer, DEFAULT_TERMINAL_WIDTH};
pub use source::{read_all, JsonSource, ListingSource, MemorySource};
