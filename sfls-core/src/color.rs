// SPDX-License-Identifier: AGPL-3.0-or-later
//! Color resolution from BSD `LSCOLORS` and GNU `LS_COLORS` specs
//!
//! A [`ColorMap`] is an explicit value: resolve it once per render and pass it
//! to the renderer.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::{entry::EntryKind, entry::SpecialFile, listing::Listing};

/// Built-in BSD spec used when neither environment variable is set
pub const DEFAULT_BSD_SPEC: &str = "exfxcxdxbxegedabagacad";

/// Environment variable holding the BSD spec
pub const BSD_ENV_VAR: &str = "LSCOLORS";

/// Environment variable holding the GNU spec
pub const GNU_ENV_VAR: &str = "LS_COLORS";

/// Default reset sequence
pub const RESET: &str = "\x1b[0m";

/// Semantic color categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorCategory {
    Directory,
    Symlink,
    MultiHardlink,
    Pipe,
    Socket,
    Block,
    Character,
    LinkOrphan,
    LinkOrphanTarget,
    ExecutableSuid,
    ExecutableSgid,
    DirectoryOtherWritableSticky,
    DirectoryOtherWritable,
    DirectorySticky,
    Executable,
    End,
}

/// Category order of the eleven BSD pairs
const BSD_ORDER: [ColorCategory; 11] = [
    ColorCategory::Directory,
    ColorCategory::Symlink,
    ColorCategory::Socket,
    ColorCategory::Pipe,
    ColorCategory::Executable,
    ColorCategory::Block,
    ColorCategory::Character,
    ColorCategory::ExecutableSuid,
    ColorCategory::ExecutableSgid,
    ColorCategory::DirectoryOtherWritableSticky,
    ColorCategory::DirectoryOtherWritable,
];

impl ColorCategory {
    pub const ALL: [ColorCategory; 16] = [
        ColorCategory::Directory,
        ColorCategory::Symlink,
        ColorCategory::MultiHardlink,
        ColorCategory::Pipe,
        ColorCategory::Socket,
        ColorCategory::Block,
        ColorCategory::Character,
        ColorCategory::LinkOrphan,
        ColorCategory::LinkOrphanTarget,
        ColorCategory::ExecutableSuid,
        ColorCategory::ExecutableSgid,
        ColorCategory::DirectoryOtherWritableSticky,
        ColorCategory::DirectoryOtherWritable,
        ColorCategory::DirectorySticky,
        ColorCategory::Executable,
        ColorCategory::End,
    ];

    /// Key under which the category is stored in a [`ColorMap`]
    pub fn key(self) -> &'static str {
        match self {
            ColorCategory::Directory => "directory",
            ColorCategory::Symlink => "symlink",
            ColorCategory::MultiHardlink => "multi_hardlink",
            ColorCategory::Pipe => "pipe",
            ColorCategory::Socket => "socket",
            ColorCategory::Block => "block",
            ColorCategory::Character => "character",
            ColorCategory::LinkOrphan => "link_orphan",
            ColorCategory::LinkOrphanTarget => "link_orphan_target",
            ColorCategory::ExecutableSuid => "executable_suid",
            ColorCategory::ExecutableSgid => "executable_sgid",
            ColorCategory::DirectoryOtherWritableSticky => "directory_o+w_sticky",
            ColorCategory::DirectoryOtherWritable => "directory_o+w",
            ColorCategory::DirectorySticky => "directory_sticky",
            ColorCategory::Executable => "executable",
            ColorCategory::End => "end",
        }
    }

    /// Two-letter GNU `LS_COLORS` code
    pub fn from_gnu_code(code: &str) -> Option<Self> {
        let category = match code {
            "rs" => ColorCategory::End,
            "di" => ColorCategory::Directory,
            "ln" => ColorCategory::Symlink,
            "mh" => ColorCategory::MultiHardlink,
            "pi" => ColorCategory::Pipe,
            "so" => ColorCategory::Socket,
            "bd" => ColorCategory::Block,
            "cd" => ColorCategory::Character,
            "or" => ColorCategory::LinkOrphan,
            "mi" => ColorCategory::LinkOrphanTarget,
            "su" => ColorCategory::ExecutableSuid,
            "sg" => ColorCategory::ExecutableSgid,
            "tw" => ColorCategory::DirectoryOtherWritableSticky,
            "ow" => ColorCategory::DirectoryOtherWritable,
            "st" => ColorCategory::DirectorySticky,
            "ex" => ColorCategory::Executable,
            _ => return None,
        };
        Some(category)
    }

    /// Category of a listing, ignoring extension globs
    pub fn for_listing(listing: &Listing) -> Option<Self> {
        let mode = listing.mode();
        match listing.kind() {
            EntryKind::Directory => Some(match (mode.is_other_writable(), mode.is_sticky()) {
                (true, true) => ColorCategory::DirectoryOtherWritableSticky,
                (false, true) => ColorCategory::DirectorySticky,
                (true, false) => ColorCategory::DirectoryOtherWritable,
                (false, false) => ColorCategory::Directory,
            }),
            _ if listing.hard_link_count() > 1 => Some(ColorCategory::MultiHardlink),
            EntryKind::Symlink if listing.is_link_orphan() => Some(ColorCategory::LinkOrphan),
            EntryKind::Symlink => Some(ColorCategory::Symlink),
            _ if mode.is_setuid() => Some(ColorCategory::ExecutableSuid),
            _ if mode.is_setgid() => Some(ColorCategory::ExecutableSgid),
            _ if mode.is_executable() => Some(ColorCategory::Executable),
            _ => listing.special().map(|special| match special {
                SpecialFile::Socket => ColorCategory::Socket,
                SpecialFile::Pipe => ColorCategory::Pipe,
                SpecialFile::Block => ColorCategory::Block,
                SpecialFile::Character => ColorCategory::Character,
            }),
        }
    }
}

/// `"file.name.txt"` -> `"*.txt"`
pub fn extension_key(name: &str) -> Option<String> {
    name.rsplit_once('.').map(|(_, ext)| format!("*.{ext}"))
}

/// Mapping from category key (or `*.ext` glob) to ANSI escape sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorMap {
    colors: BTreeMap<String, String>,
}

impl ColorMap {
    /// Map holding only the reset sequence
    pub fn new() -> Self {
        let mut map = Self::default();
        map.insert(ColorCategory::End.key(), RESET);
        map
    }

    /// Resolve from a BSD spec, else a GNU spec, else the built-in default.
    /// Empty strings count as absent.
    pub fn resolve(bsd: Option<&str>, gnu: Option<&str>) -> Self {
        let bsd = bsd.filter(|s| !s.is_empty());
        let gnu = gnu.filter(|s| !s.is_empty());

        let mut map = Self::new();
        match (bsd, gnu) {
            (Some(spec), _) => {
                debug!("Using BSD color spec");
                map.apply_bsd(spec);
            }
            (None, Some(spec)) => {
                debug!("Using GNU color spec");
                map.apply_gnu(spec);
            }
            (None, None) => map.apply_bsd(DEFAULT_BSD_SPEC),
        }
        map
    }

    /// Resolve from `LSCOLORS` and `LS_COLORS`
    pub fn from_env() -> Self {
        let bsd = std::env::var(BSD_ENV_VAR).ok();
        let gnu = std::env::var(GNU_ENV_VAR).ok();
        Self::resolve(bsd.as_deref(), gnu.as_deref())
    }

    fn apply_bsd(&mut self, spec: &str) {
        let letters: Vec<char> = spec.chars().collect();
        if letters.len() % 2 != 0 {
            warn!("Odd-length {} value, ignoring trailing character", BSD_ENV_VAR);
        }
        if letters.len() > BSD_ORDER.len() * 2 {
            warn!("{} has more than {} pairs, ignoring the rest", BSD_ENV_VAR, BSD_ORDER.len());
        }

        for (pair, category) in letters.chunks_exact(2).zip(BSD_ORDER) {
            self.insert(category.key(), bsd_pair_to_ansi(pair[0], pair[1]));
        }
    }

    fn apply_gnu(&mut self, spec: &str) {
        for token in spec.split(':').filter(|t| !t.is_empty()) {
            let Some((key, code)) = token.split_once('=') else {
                warn!("Skipping {} token without '=': {:?}", GNU_ENV_VAR, token);
                continue;
            };
            let key = ColorCategory::from_gnu_code(key).map_or(key, |c| c.key());
            self.insert(key, format!("\x1b[{code}m"));
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, sequence: impl Into<String>) {
        self.colors.insert(key.into(), sequence.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.colors.get(key).map(String::as_str)
    }

    /// Sequence for a category, empty when the color string left it undefined
    pub fn category(&self, category: ColorCategory) -> &str {
        self.get(category.key()).unwrap_or("")
    }

    pub fn end(&self) -> &str {
        self.category(ColorCategory::End)
    }

    /// Prefix for a listing's name, or `None` when no category applies.
    ///
    /// Extension globs win over every other category.
    pub fn prefix_for(&self, listing: &Listing) -> Option<&str> {
        let by_extension = extension_key(listing.name())
            .and_then(|key| self.get(&key))
            .filter(|seq| !seq.is_empty());
        if by_extension.is_some() {
            return by_extension;
        }
        ColorCategory::for_listing(listing).map(|category| self.category(category))
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.colors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Position in `a..h`, case-insensitive
fn bsd_color_index(letter: char) -> Option<u8> {
    match letter.to_ascii_lowercase() {
        c @ 'a'..='h' => Some(c as u8 - b'a'),
        _ => None,
    }
}

/// `"ex"` -> `"\x1b[0;34m"`, `"Eg"` -> `"\x1b[1;34;46m"`
fn bsd_pair_to_ansi(foreground: char, background: char) -> String {
    let mut code = String::from("\x1b[");
    code.push_str(if foreground.is_ascii_uppercase() { "1" } else { "0" });
    if let Some(idx) = bsd_color_index(foreground) {
        code.push_str(&format!(";{}", 30 + idx));
    }
    if let Some(idx) = bsd_color_index(background) {
        code.push_str(&format!(";{}", 40 + idx));
    }
    code.push('m');
    code
}
