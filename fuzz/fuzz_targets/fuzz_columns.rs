// SPDX-License-Identifier: AGPL-3.0-or-later
//! Fuzz target for grid planning

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sfls_core::columns;

#[derive(Debug, Arbitrary)]
struct Input {
    widths: Vec<u8>,
    terminal_width: u8,
}

fuzz_target!(|input: Input| {
    let widths: Vec<usize> = input.widths.iter().map(|&w| usize::from(w)).collect();
    let terminal_width = usize::from(input.terminal_width).max(1);
    let plan = columns::plan(&widths, terminal_width);

    assert_eq!(plan.col_counts.iter().sum::<usize>(), widths.len());
    assert!(plan.row_length() <= terminal_width || plan.rows == widths.len());
});
