// SPDX-License-Identifier: AGPL-3.0-or-later
//! Render options

use serde::{Deserialize, Serialize};

/// How a listing is rendered. Built once per invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Long-format table
    pub long: bool,
    /// One entry per line
    pub one: bool,
    /// ANSI color decoration
    pub color: bool,
    /// Human-readable sizes
    pub human: bool,
    /// Treat directories as plain entries (no grouping)
    pub dir: bool,
    /// Print the directory group before the file group
    pub dirs_first: bool,
    pub sort_time: bool,
    pub sort_size: bool,
    pub sort_reverse: bool,
}

/// Primary sort criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Time,
    Size,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time wins over size when both are requested.
    pub fn sort_key(&self) -> SortKey {
        if self.sort_time {
            SortKey::Time
        } else if self.sort_size {
            SortKey::Size
        } else {
            SortKey::Name
        }
    }
}
