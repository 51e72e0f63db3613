// SPDX-License-Identifier: AGPL-3.0-or-later
//! Column-major grid planning for terminal output

/// Gap between grid columns
pub const COLUMN_SEPARATOR: &str = "  ";

/// Row count and column geometry for a grid of names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnPlan {
    pub rows: usize,
    pub col_widths: Vec<usize>,
    pub col_counts: Vec<usize>,
}

impl ColumnPlan {
    pub fn cols(&self) -> usize {
        self.col_widths.len()
    }

    /// Total width of the widest row, separators included
    pub fn row_length(&self) -> usize {
        row_length(&self.col_widths)
    }

    /// Column of the `index`-th name
    pub fn column_of(&self, index: usize) -> usize {
        index / self.rows
    }
}

fn row_length(col_widths: &[usize]) -> usize {
    let gaps = col_widths.len().saturating_sub(1);
    col_widths.iter().sum::<usize>() + COLUMN_SEPARATOR.len() * gaps
}

/// Find the fewest rows that fit `widths` (display widths of the names, in
/// order) into `terminal_width`, tiling column-major.
///
/// A layout that fits is still rejected while its last column holds at most
/// half as many names as the first and at least five fewer. When nothing fits,
/// the result is one name per row.
pub fn plan(widths: &[usize], terminal_width: usize) -> ColumnPlan {
    let count = widths.len();
    if count == 0 {
        return ColumnPlan::default();
    }

    let mut rows = 1;
    loop {
        let cols = count.div_ceil(rows);
        let mut col_widths = vec![0; cols];
        let mut col_counts = vec![0; cols];
        for (i, &width) in widths.iter().enumerate() {
            let col = i / rows;
            col_widths[col] = col_widths[col].max(width);
            col_counts[col] += 1;
        }

        let candidate = ColumnPlan { rows, col_widths, col_counts };
        let too_wide = candidate.row_length() > terminal_width;

        if too_wide && rows >= count {
            return candidate;
        }
        if too_wide || has_short_last_column(&candidate.col_counts) {
            rows += 1;
            continue;
        }
        return candidate;
    }
}

/// Plan for plain names, measured in terminal cells
pub fn plan_names<S: AsRef<str>>(names: &[S], terminal_width: usize) -> ColumnPlan {
    let widths: Vec<usize> = names
        .iter()
        .map(|name| console::measure_text_width(name.as_ref()))
        .collect();
    plan(&widths, terminal_width)
}

fn has_short_last_column(col_counts: &[usize]) -> bool {
    match (col_counts.first(), col_counts.last()) {
        (Some(&first), Some(&last)) => last <= first / 2 && first - last >= 5,
        _ => false,
    }
}
