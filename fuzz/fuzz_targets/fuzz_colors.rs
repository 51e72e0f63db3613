// SPDX-License-Identifier: AGPL-3.0-or-later
//! Fuzz target for LSCOLORS / LS_COLORS parsing

#![no_main]

use libfuzzer_sys::fuzz_target;
use sfls_core::{ColorMap, EntryAdapter, EntryKind, RawEntry, RenderOptions};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let bsd = ColorMap::resolve(Some(input), None);
        let gnu = ColorMap::resolve(None, Some(input));

        // Every resolved map must still color a listing without panicking
        let options = RenderOptions::new();
        let adapter = EntryAdapter::new(&options);
        let listing = adapter.adapt(&RawEntry::new(input, EntryKind::Executable, 1, 0));
        let _ = bsd.prefix_for(&listing);
        let _ = gnu.prefix_for(&listing);
        let _ = gnu.end();
    }
});
