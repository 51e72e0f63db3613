// SPDX-License-Identifier: AGPL-3.0-or-later
//! Raw directory entries as reported by a remote listing call

use serde::{Deserialize, Serialize};

/// Entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    #[serde(rename = "dir", alias = "directory")]
    Directory,
    #[serde(alias = "sym")]
    Symlink,
    #[serde(rename = "exec", alias = "executable")]
    Executable,
    Socket,
    Pipe,
    #[serde(rename = "block")]
    BlockDevice,
    #[serde(rename = "char")]
    CharDevice,
    #[serde(other)]
    Unknown,
}

/// Special (non-regular) file classes. At most one applies to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialFile {
    Socket,
    Pipe,
    Block,
    Character,
}

impl EntryKind {
    /// Leading character of the permission string
    pub fn type_char(self) -> char {
        match self {
            EntryKind::Directory => 'd',
            EntryKind::Symlink => 'l',
            EntryKind::Socket => 's',
            EntryKind::Pipe => 'p',
            EntryKind::BlockDevice => 'b',
            EntryKind::CharDevice => 'c',
            EntryKind::File | EntryKind::Executable | EntryKind::Unknown => '-',
        }
    }

    /// Mode bits assumed when the remote does not report any
    pub fn default_mode(self) -> u32 {
        match self {
            EntryKind::Executable => 0o773,
            EntryKind::Unknown => 0,
            EntryKind::File
            | EntryKind::Directory
            | EntryKind::Symlink
            | EntryKind::Socket
            | EntryKind::Pipe
            | EntryKind::BlockDevice
            | EntryKind::CharDevice => 0o664,
        }
    }

    pub fn special(self) -> Option<SpecialFile> {
        match self {
            EntryKind::Socket => Some(SpecialFile::Socket),
            EntryKind::Pipe => Some(SpecialFile::Pipe),
            EntryKind::BlockDevice => Some(SpecialFile::Block),
            EntryKind::CharDevice => Some(SpecialFile::Character),
            _ => None,
        }
    }
}

/// Unix-style permission bits. Cosmetic only, never used for access checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub mode: u32,
}

impl Permissions {
    pub fn new(mode: u32) -> Self {
        Self { mode }
    }

    pub fn is_executable(&self) -> bool {
        self.mode & 0o111 != 0
    }

    pub fn is_setuid(&self) -> bool {
        self.mode & 0o4000 != 0
    }

    pub fn is_setgid(&self) -> bool {
        self.mode & 0o2000 != 0
    }

    pub fn is_sticky(&self) -> bool {
        self.mode & 0o1000 != 0
    }

    pub fn is_other_writable(&self) -> bool {
        self.mode & 0o002 != 0
    }

    /// `ls -l` style ten-character string, e.g. `drw-rw-r--`
    pub fn to_mode_string(&self, kind: EntryKind) -> String {
        let m = self.mode;
        let bit = |mask: u32, c: char| if m & mask != 0 { c } else { '-' };
        let special = |exec: bool, set: bool, on: char, off: char| match (set, exec) {
            (true, true) => on,
            (true, false) => off,
            (false, true) => 'x',
            (false, false) => '-',
        };

        let mut s = String::with_capacity(10);
        s.push(kind.type_char());
        s.push(bit(0o400, 'r'));
        s.push(bit(0o200, 'w'));
        s.push(special(m & 0o100 != 0, self.is_setuid(), 's', 'S'));
        s.push(bit(0o040, 'r'));
        s.push(bit(0o020, 'w'));
        s.push(special(m & 0o010 != 0, self.is_setgid(), 's', 'S'));
        s.push(bit(0o004, 'r'));
        s.push(bit(0o002, 'w'));
        s.push(special(m & 0o001 != 0, self.is_sticky(), 't', 'T'));
        s
    }
}

/// A directory entry as returned by the remote listing API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    #[serde(default)]
    pub size: u64,
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub mod_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_target: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub link_orphan: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<u32>,
}

impl RawEntry {
    pub fn new(name: impl Into<String>, kind: EntryKind, size: u64, mod_time: i64) -> Self {
        Self {
            name: name.into(),
            kind,
            size,
            mod_time,
            link_target: None,
            link_orphan: false,
            mode: None,
        }
    }

    pub fn file(name: impl Into<String>, size: u64, mod_time: i64) -> Self {
        Self::new(name, EntryKind::File, size, mod_time)
    }

    pub fn directory(name: impl Into<String>, mod_time: i64) -> Self {
        Self::new(name, EntryKind::Directory, 0, mod_time)
    }

    pub fn symlink(name: impl Into<String>, target: impl Into<String>, mod_time: i64) -> Self {
        let mut entry = Self::new(name, EntryKind::Symlink, 0, mod_time);
        entry.link_target = Some(target.into());
        entry
    }

    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn orphaned(mut self) -> Self {
        self.link_orphan = true;
        self
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_hidden(&self) -> bool {
        self.base_name().starts_with('.')
    }

    /// Final path component of the reported name
    pub fn base_name(&self) -> &str {
        let trimmed = self.name.trim_end_matches('/');
        if trimmed.is_empty() {
            return if self.name.is_empty() { "" } else { "/" };
        }
        trimmed.rsplit('/').next().unwrap_or(trimmed)
    }

    pub fn permissions(&self) -> Permissions {
        Permissions::new(self.mode.unwrap_or_else(|| self.kind.default_mode()))
    }
}

/// One page of a directory listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryListing {
    #[serde(default)]
    pub path: String,
    pub entries: Vec<RawEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

impl DirectoryListing {
    pub fn new(path: impl Into<String>, entries: Vec<RawEntry>) -> Self {
        Self { path: path.into(), entries, cursor: None, has_more: false }
    }
}
