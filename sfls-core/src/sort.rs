// SPDX-License-Identifier: AGPL-3.0-or-later
//! Listing order

use std::cmp::Ordering;

use crate::{
    listing::Listing,
    options::{RenderOptions, SortKey},
};

/// Case-folded byte order, shorter name first on a common prefix.
pub fn compare_name(a: &Listing, b: &Listing) -> Ordering {
    let a_lower = a.name().to_lowercase();
    let b_lower = b.name().to_lowercase();
    a_lower
        .bytes()
        .zip(b_lower.bytes())
        .map(|(x, y)| x.cmp(&y))
        .find(|ord| ord.is_ne())
        .unwrap_or_else(|| a.name().len().cmp(&b.name().len()))
}

/// Most recently modified first
pub fn compare_time(a: &Listing, b: &Listing) -> Ordering {
    b.epoch_nano().cmp(&a.epoch_nano())
}

/// Largest first, by the raw byte count rather than the display string
pub fn compare_size(a: &Listing, b: &Listing) -> Ordering {
    b.bytes().cmp(&a.bytes())
}

/// Stable sort by the selected key, then reverse if requested.
pub fn sort_listings(listings: &mut [Listing], options: &RenderOptions) {
    let compare: fn(&Listing, &Listing) -> Ordering = match options.sort_key() {
        SortKey::Name => compare_name,
        SortKey::Time => compare_time,
        SortKey::Size => compare_size,
    };
    listings.sort_by(compare);

    if options.sort_reverse {
        listings.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{entry::RawEntry, listing::EntryAdapter};
    use chrono::{TimeZone, Utc};

    fn build(opts: &RenderOptions, entries: &[RawEntry]) -> Vec<Listing> {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let adapter = EntryAdapter::with_clock(opts, now, Utc);
        entries.iter().map(|e| adapter.adapt(e)).collect()
    }

    fn names(listings: &[Listing]) -> Vec<&str> {
        listings.iter().map(|l| l.name()).collect()
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive() {
        let opts = RenderOptions::default();
        let mut listings = build(
            &opts,
            &[
                RawEntry::file("beta", 0, 0),
                RawEntry::file("Alpha", 0, 0),
                RawEntry::file("alp", 0, 0),
                RawEntry::file("Gamma", 0, 0),
            ],
        );
        sort_listings(&mut listings, &opts);
        assert_eq!(names(&listings), vec!["alp", "Alpha", "beta", "Gamma"]);
    }

    #[test]
    fn test_sort_by_name_is_stable() {
        let opts = RenderOptions::default();
        let mut listings = build(
            &opts,
            &[
                RawEntry::file("README", 1, 0),
                RawEntry::file("b", 0, 0),
                RawEntry::file("readme", 2, 0),
                RawEntry::file("ReadMe", 3, 0),
            ],
        );
        sort_listings(&mut listings, &opts);
        assert_eq!(names(&listings), vec!["b", "README", "readme", "ReadMe"]);
        assert_eq!(compare_name(&listings[1], &listings[2]), Ordering::Equal);
    }

    #[test]
    fn test_sort_by_time() {
        let opts = RenderOptions { sort_time: true, sort_size: true, ..Default::default() };
        let mut listings = build(
            &opts,
            &[
                RawEntry::file("old", 900, 1_000),
                RawEntry::file("new", 1, 3_000),
                RawEntry::file("mid", 5, 2_000),
            ],
        );
        sort_listings(&mut listings, &opts);
        assert_eq!(names(&listings), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_sort_by_size_uses_raw_bytes() {
        let opts = RenderOptions { sort_size: true, human: true, ..Default::default() };
        let mut listings = build(
            &opts,
            &[
                RawEntry::file("small", 999, 0),
                RawEntry::file("big", 1536, 0),
                RawEntry::file("tiny", 3, 0),
            ],
        );
        sort_listings(&mut listings, &opts);
        assert_eq!(names(&listings), vec!["big", "small", "tiny"]);
        assert_eq!(listings[0].size(), "1.5K");
    }

    #[test]
    fn test_reverse_applies_after_sort() {
        let opts = RenderOptions { sort_reverse: true, ..Default::default() };
        let mut listings = build(
            &opts,
            &[
                RawEntry::file("b", 0, 0),
                RawEntry::file("a", 0, 0),
                RawEntry::file("c", 0, 0),
            ],
        );
        sort_listings(&mut listings, &opts);
        assert_eq!(names(&listings), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_reverse_twice_is_identity() {
        let opts = RenderOptions::default();
        for len in 0..6 {
            let entries: Vec<RawEntry> =
                (0..len).map(|i| RawEntry::file(format!("f{i}"), 0, 0)).collect();
            let original = build(&opts, &entries);
            let mut listings = original.clone();
            listings.reverse();
            listings.reverse();
            assert_eq!(listings, original);
        }
    }

    #[test]
    fn test_sort_empty_and_single() {
        let opts = RenderOptions { sort_reverse: true, ..Default::default() };
        let mut empty: Vec<Listing> = Vec::new();
        sort_listings(&mut empty, &opts);
        assert!(empty.is_empty());

        let mut one = build(&opts, &[RawEntry::file("only", 0, 0)]);
        sort_listings(&mut one, &opts);
        assert_eq!(names(&one), vec!["only"]);
    }
}
