// SPDX-License-Identifier: AGPL-3.0-or-later
//! Display-ready listings built from raw entries

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Utc};

use crate::{
    entry::{EntryKind, Permissions, RawEntry, SpecialFile},
    options::RenderOptions,
};

const SIZE_UNITS: [char; 7] = ['B', 'K', 'M', 'G', 'T', 'P', 'E'];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const SIX_MONTHS_SECS: i64 = 182 * 24 * 60 * 60;

/// Clock skew tolerated before a timestamp counts as "in the future"
const FUTURE_SKEW_SECS: i64 = 5;

/// One entry with every printable field pre-computed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    permissions: String,
    num_hard_links: String,
    owner: String,
    group: String,
    size: String,
    bytes: u64,
    epoch_nano: i64,
    month: String,
    day: String,
    time: String,
    name: String,
    link_name: String,
    link_orphan: bool,
    kind: EntryKind,
    mode: Permissions,
    special: Option<SpecialFile>,
}

impl Listing {
    pub fn permissions(&self) -> &str {
        &self.permissions
    }

    pub fn num_hard_links(&self) -> &str {
        &self.num_hard_links
    }

    /// Parsed link count; the remote model reports none, so this is usually 0.
    pub fn hard_link_count(&self) -> u64 {
        self.num_hard_links.parse().unwrap_or(0)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// Formatted size column
    pub fn size(&self) -> &str {
        &self.size
    }

    /// Size in bytes as reported
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    pub fn epoch_nano(&self) -> i64 {
        self.epoch_nano
    }

    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn day(&self) -> &str {
        &self.day
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn link_name(&self) -> &str {
        &self.link_name
    }

    pub fn is_link_orphan(&self) -> bool {
        self.link_orphan
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn mode(&self) -> Permissions {
        self.mode
    }

    pub fn special(&self) -> Option<SpecialFile> {
        self.special
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink
    }
}

/// Converts raw entries into listings relative to a fixed "now".
#[derive(Debug, Clone)]
pub struct EntryAdapter<'a, Tz: TimeZone> {
    options: &'a RenderOptions,
    now: DateTime<Utc>,
    tz: Tz,
}

impl<'a> EntryAdapter<'a, Local> {
    /// Adapter using the current time and the local time zone
    pub fn new(options: &'a RenderOptions) -> Self {
        Self::with_clock(options, Utc::now(), Local)
    }
}

impl<'a, Tz: TimeZone> EntryAdapter<'a, Tz> {
    pub fn with_clock(options: &'a RenderOptions, now: DateTime<Utc>, tz: Tz) -> Self {
        Self { options, now, tz }
    }

    pub fn adapt(&self, raw: &RawEntry) -> Listing {
        let mode = raw.permissions();
        let modified = DateTime::<Utc>::from_timestamp_millis(raw.mod_time).unwrap_or_default();
        let shown = modified.with_timezone(&self.tz);

        let (link_name, link_orphan) = match raw.kind {
            EntryKind::Symlink => (raw.link_target.clone().unwrap_or_default(), raw.link_orphan),
            _ => (String::new(), false),
        };

        Listing {
            permissions: mode.to_mode_string(raw.kind),
            num_hard_links: String::new(),
            owner: String::new(),
            group: String::new(),
            size: format_size(raw.size, self.options.human),
            bytes: raw.size,
            epoch_nano: raw.mod_time.saturating_mul(1_000_000),
            month: MONTHS[shown.month0() as usize].to_string(),
            day: format!("{:02}", shown.day()),
            time: self.format_time(raw.mod_time, &shown),
            name: raw.base_name().to_string(),
            link_name,
            link_orphan,
            kind: raw.kind,
            mode,
            special: raw.kind.special(),
        }
    }

    fn format_time(&self, mod_time_ms: i64, shown: &DateTime<Tz>) -> String {
        let epoch_now = self.now.timestamp();
        let epoch_modified = mod_time_ms.div_euclid(1000);
        if is_outside_recent_window(epoch_modified, epoch_now) {
            shown.year().to_string()
        } else {
            format!("{:02}:{:02}", shown.hour(), shown.minute())
        }
    }
}

/// Older than six months, or more than a few seconds in the future.
fn is_outside_recent_window(epoch_modified: i64, epoch_now: i64) -> bool {
    epoch_modified <= epoch_now - SIX_MONTHS_SECS || epoch_modified >= epoch_now + FUTURE_SKEW_SECS
}

/// Format a byte count, exactly or with a `B/K/M/G/T/P/E` suffix.
///
/// The human form divides until the value drops below one, then steps back one
/// unit, so `1023` stays `1023B` while `1024` becomes `1K`.
pub fn format_size(bytes: u64, human: bool) -> String {
    if !human {
        return bytes.to_string();
    }

    let mut size = bytes as f64;
    let mut unit = 0usize;
    while size >= 1.0 {
        size /= 1024.0;
        unit += 1;
    }
    if unit > 0 {
        size *= 1024.0;
        unit -= 1;
    }

    let suffix = SIZE_UNITS.get(unit).copied().unwrap_or('?');
    let formatted = if unit == 0 {
        format!("{}{}", size as u64, suffix)
    } else {
        format!("{:.1}{}", size, suffix)
    };

    // 14.0K -> 14K
    let len = formatted.len();
    if len > 3 && &formatted[len - 3..len - 1] == ".0" {
        format!("{}{}", &formatted[..len - 3], suffix)
    } else {
        formatted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 0).unwrap()
    }

    fn adapt_with(opts: &RenderOptions, entry: &RawEntry) -> Listing {
        EntryAdapter::with_clock(opts, now(), Utc).adapt(entry)
    }

    fn unit_rank(s: &str) -> usize {
        let last = s.chars().last().unwrap();
        SIZE_UNITS.iter().position(|&c| c == last).unwrap()
    }

    #[test]
    fn test_exact_size() {
        for n in [0u64, 1, 999, 1024, 14000, 1 << 40, u64::MAX] {
            assert_eq!(format_size(n, false), n.to_string());
        }
    }

    #[test]
    fn test_human_size() {
        assert_eq!(format_size(0, true), "0B");
        assert_eq!(format_size(1, true), "1B");
        assert_eq!(format_size(1023, true), "1023B");
        assert_eq!(format_size(1024, true), "1K");
        assert_eq!(format_size(1536, true), "1.5K");
        assert_eq!(format_size(14336, true), "14K");
        assert_eq!(format_size(14000, true), "13.7K");
        assert_eq!(format_size(1 << 20, true), "1M");
        assert_eq!(format_size(5 * (1 << 30), true), "5G");
        assert_eq!(format_size(u64::MAX, true), "16E");
    }

    #[test]
    fn test_human_size_units_are_monotonic() {
        let samples = [0u64, 10, 2_000, 3_000_000, 4_000_000_000, 5 << 40, 6 << 50, 7 << 60];
        for pair in samples.windows(2) {
            let (a, b) = (format_size(pair[0], true), format_size(pair[1], true));
            assert!(unit_rank(&a) <= unit_rank(&b), "{a} vs {b}");
        }
    }

    #[test]
    fn test_recent_entry_shows_clock_time() {
        let opts = RenderOptions::default();
        let mod_time = (now() - Duration::days(181)).timestamp_millis();
        let listing = adapt_with(&opts, &RawEntry::file("a", 0, mod_time));
        assert_eq!(listing.time(), "12:30");
        assert_eq!(listing.month(), "Dec");
        assert_eq!(listing.day(), "17");
    }

    #[test]
    fn test_old_entry_shows_year() {
        let opts = RenderOptions::default();
        let mod_time = (now() - Duration::days(183)).timestamp_millis();
        let listing = adapt_with(&opts, &RawEntry::file("a", 0, mod_time));
        assert_eq!(listing.time(), "2023");
    }

    #[test]
    fn test_future_entry_shows_year() {
        let opts = RenderOptions::default();
        let mod_time = (now() + Duration::seconds(10)).timestamp_millis();
        let listing = adapt_with(&opts, &RawEntry::file("a", 0, mod_time));
        assert_eq!(listing.time(), "2024");

        let mod_time = (now() + Duration::seconds(4)).timestamp_millis();
        let listing = adapt_with(&opts, &RawEntry::file("a", 0, mod_time));
        assert_eq!(listing.time(), "12:30");
    }

    #[test]
    fn test_window_boundaries() {
        let now = 1_000_000_000;
        assert!(is_outside_recent_window(now - SIX_MONTHS_SECS, now));
        assert!(!is_outside_recent_window(now - SIX_MONTHS_SECS + 1, now));
        assert!(!is_outside_recent_window(now + 4, now));
        assert!(is_outside_recent_window(now + 5, now));
    }

    #[test]
    fn test_adapt_fields() {
        let opts = RenderOptions { human: true, ..Default::default() };
        let mod_time = now().timestamp_millis() - DAY_MS;
        let listing = adapt_with(&opts, &RawEntry::file("docs/report.pdf", 2048, mod_time));

        assert_eq!(listing.name(), "report.pdf");
        assert_eq!(listing.permissions(), "-rw-rw-r--");
        assert_eq!(listing.size(), "2K");
        assert_eq!(listing.bytes(), 2048);
        assert_eq!(listing.epoch_nano(), mod_time * 1_000_000);
        assert_eq!(listing.month(), "Jun");
        assert_eq!(listing.day(), "14");
        assert_eq!(listing.num_hard_links(), "");
        assert_eq!(listing.hard_link_count(), 0);
        assert_eq!(listing.owner(), "");
        assert_eq!(listing.group(), "");
        assert!(listing.special().is_none());
    }

    #[test]
    fn test_adapt_symlink() {
        let opts = RenderOptions::default();
        let listing = adapt_with(&opts, &RawEntry::symlink("latest", "v2", 0).orphaned());
        assert!(listing.is_symlink());
        assert_eq!(listing.link_name(), "v2");
        assert!(listing.is_link_orphan());
        assert_eq!(listing.permissions(), "lrw-rw-r--");
    }

    #[test]
    fn test_link_fields_ignored_for_non_symlinks() {
        let opts = RenderOptions::default();
        let mut raw = RawEntry::file("a", 0, 0);
        raw.link_target = Some("b".into());
        raw.link_orphan = true;
        let listing = adapt_with(&opts, &raw);
        assert_eq!(listing.link_name(), "");
        assert!(!listing.is_link_orphan());
    }

    #[test]
    fn test_adapt_special_kinds() {
        let opts = RenderOptions::default();
        let listing = adapt_with(&opts, &RawEntry::new("fifo", EntryKind::Pipe, 0, 0));
        assert_eq!(listing.special(), Some(SpecialFile::Pipe));
        assert_eq!(listing.permissions(), "prw-rw-r--");
    }

    #[test]
    fn test_epoch_timestamp_displays_year() {
        let opts = RenderOptions::default();
        let listing = adapt_with(&opts, &RawEntry::file("a", 0, 0));
        assert_eq!(listing.time(), "1970");
        assert_eq!(listing.month(), "Jan");
        assert_eq!(listing.day(), "01");
    }
}
