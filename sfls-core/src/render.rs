// SPDX-License-Identifier: AGPL-3.0-or-later
//! Listing output: long table, one per line, or column grid

use std::io::Write;

use chrono::TimeZone;
use console::measure_text_width;
use tracing::debug;

use crate::{
    color::{ColorCategory, ColorMap},
    columns::{self, COLUMN_SEPARATOR},
    entry::RawEntry,
    error::{SflsError, SflsResult},
    listing::{EntryAdapter, Listing},
    options::RenderOptions,
    sort::sort_listings,
};

/// Terminal width assumed when the host cannot query one
pub const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// Field widths of a long-format group
#[derive(Debug, Default)]
struct LongWidths {
    permissions: usize,
    links: usize,
    owner: usize,
    group: usize,
    size: usize,
    time: usize,
}

impl LongWidths {
    fn measure(listings: &[Listing]) -> Self {
        listings.iter().fold(Self::default(), |w, l| Self {
            permissions: w.permissions.max(l.permissions().len()),
            links: w.links.max(l.num_hard_links().len()),
            owner: w.owner.max(l.owner().len()),
            group: w.group.max(l.group().len()),
            size: w.size.max(l.size().len()),
            time: w.time.max(l.time().len()),
        })
    }
}

/// Renders raw entries with a fixed set of options, colors and width.
#[derive(Debug, Clone)]
pub struct Renderer<'a> {
    options: &'a RenderOptions,
    colors: &'a ColorMap,
    width: usize,
}

impl<'a> Renderer<'a> {
    pub fn new(options: &'a RenderOptions, colors: &'a ColorMap, width: usize) -> SflsResult<Self> {
        if width == 0 {
            return Err(SflsError::InvalidWidth(width));
        }
        Ok(Self { options, colors, width })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Render against the current time in the local time zone
    pub fn render(&self, entries: &[RawEntry]) -> String {
        self.render_with(&EntryAdapter::new(self.options), entries)
    }

    pub fn render_to<W: Write>(&self, entries: &[RawEntry], writer: &mut W) -> SflsResult<()> {
        writer.write_all(self.render(entries).as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    pub fn render_with<Tz: TimeZone>(&self, adapter: &EntryAdapter<'_, Tz>, entries: &[RawEntry]) -> String {
        let (mut dirs, mut files): (Vec<Listing>, Vec<Listing>) = entries
            .iter()
            .map(|entry| adapter.adapt(entry))
            .partition(|l| !self.options.dir && l.is_directory());

        sort_listings(&mut files, self.options);
        sort_listings(&mut dirs, self.options);
        debug!(files = files.len(), dirs = dirs.len(), "Rendering listing");

        let groups = if self.options.dirs_first { [&dirs, &files] } else { [&files, &dirs] };
        let mut out = String::new();
        for group in groups {
            self.write_group(&mut out, group);
        }
        out
    }

    fn write_group(&self, out: &mut String, listings: &[Listing]) {
        if listings.is_empty() {
            return;
        }
        if self.options.long {
            self.write_long(out, listings);
        } else if self.options.one {
            for listing in listings {
                self.write_name(out, listing);
                out.push('\n');
            }
        } else {
            self.write_grid(out, listings);
        }
    }

    fn write_long(&self, out: &mut String, listings: &[Listing]) {
        let w = LongWidths::measure(listings);
        // link counts are right-aligned in at least two cells
        let links = w.links.max(2);

        for l in listings {
            out.push_str(&format!(
                "{:<pw$} {:>lw$} {:<ow$} {:<gw$} {:>sw$} {} {} {:>tw$} ",
                l.permissions(),
                l.num_hard_links(),
                l.owner(),
                l.group(),
                l.size(),
                l.month(),
                l.day(),
                l.time(),
                pw = w.permissions,
                lw = links,
                ow = w.owner,
                gw = w.group,
                sw = w.size,
                tw = w.time,
            ));
            self.write_name(out, l);
            if l.is_symlink() && !l.link_name().is_empty() {
                self.write_link_target(out, l);
            }
            out.push('\n');
        }
    }

    fn write_link_target(&self, out: &mut String, listing: &Listing) {
        out.push_str(" -> ");
        if self.options.color && listing.is_link_orphan() {
            out.push_str(self.colors.category(ColorCategory::LinkOrphanTarget));
            out.push_str(listing.link_name());
            out.push_str(self.colors.end());
        } else {
            out.push_str(listing.link_name());
        }
    }

    fn write_grid(&self, out: &mut String, listings: &[Listing]) {
        let widths: Vec<usize> = listings.iter().map(|l| measure_text_width(l.name())).collect();
        let plan = columns::plan(&widths, self.width);
        debug!(rows = plan.rows, cols = plan.cols(), width = self.width, "Planned grid");

        for row in 0..plan.rows {
            let mut cells = listings.iter().enumerate().skip(row).step_by(plan.rows).peekable();
            while let Some((i, listing)) = cells.next() {
                self.write_name(out, listing);
                if cells.peek().is_some() {
                    let pad = plan.col_widths[plan.column_of(i)] - widths[i];
                    out.push_str(&" ".repeat(pad));
                    out.push_str(COLUMN_SEPARATOR);
                }
            }
            out.push('\n');
        }
    }

    fn write_name(&self, out: &mut String, listing: &Listing) {
        match self.options.color.then(|| self.colors.prefix_for(listing)).flatten() {
            Some(prefix) => {
                out.push_str(prefix);
                out.push_str(listing.name());
                out.push_str(self.colors.end());
            }
            None => out.push_str(listing.name()),
        }
    }
}

/// Render `entries` in one call
pub fn render(
    entries: &[RawEntry],
    options: &RenderOptions,
    colors: &ColorMap,
    terminal_width: usize,
) -> SflsResult<String> {
    Ok(Renderer::new(options, colors, terminal_width)?.render(entries))
}
