// SPDX-License-Identifier: AGPL-3.0-or-later
//! Listing sources
//!
//! A source stands in for the remote directory-listing call. Results may be
//! paged; [`read_all`] drains every page.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tracing::trace;

use crate::{
    entry::{DirectoryListing, RawEntry},
    error::{SflsError, SflsResult},
};

/// Path argument that makes [`JsonSource`] read standard input
pub const STDIN_PATH: &str = "-";

/// Listing source trait
#[async_trait]
pub trait ListingSource: Send + Sync {
    fn id(&self) -> &str;

    /// Fetch one page of `path`, continuing from `cursor` when given.
    async fn list_page(&self, path: &str, cursor: Option<&str>) -> SflsResult<DirectoryListing>;
}

/// Collect every page of `path` into one list.
pub async fn read_all(source: &dyn ListingSource, path: &str) -> SflsResult<Vec<RawEntry>> {
    let mut entries = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = source.list_page(path, cursor.as_deref()).await?;
        trace!(source = source.id(), count = page.entries.len(), "Received listing page");
        entries.extend(page.entries);

        if !page.has_more {
            return Ok(entries);
        }
        match page.cursor {
            Some(next) => cursor = Some(next),
            None => {
                return Err(SflsError::Source {
                    source_id: source.id().to_string(),
                    message: "page reports more entries but no cursor".into(),
                })
            }
        }
    }
}

/// In-memory listings, served in pages of `page_size`
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    listings: HashMap<String, Vec<RawEntry>>,
    page_size: Option<usize>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size.max(1));
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, entries: Vec<RawEntry>) {
        self.listings.insert(path.into(), entries);
    }
}

#[async_trait]
impl ListingSource for MemorySource {
    fn id(&self) -> &str {
        "memory"
    }

    async fn list_page(&self, path: &str, cursor: Option<&str>) -> SflsResult<DirectoryListing> {
        let all = self
            .listings
            .get(path)
            .ok_or_else(|| SflsError::NotFound(path.to_string()))?;

        let start = match cursor {
            Some(c) => c.parse::<usize>().map_err(|_| SflsError::Source {
                source_id: self.id().to_string(),
                message: format!("invalid cursor {c:?}"),
            })?,
            None => 0,
        };
        let end = self
            .page_size
            .map_or(all.len(), |size| start.saturating_add(size).min(all.len()));
        let start = start.min(end);

        let mut page = DirectoryListing::new(path, all[start..end].to_vec());
        if end < all.len() {
            page.has_more = true;
            page.cursor = Some(end.to_string());
        }
        Ok(page)
    }
}

/// Reads a listing dumped as JSON: either an array of entries or a
/// [`DirectoryListing`] object. The path `-` reads standard input.
#[derive(Debug, Clone)]
pub struct JsonSource {
    file: PathBuf,
}

impl JsonSource {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    async fn read_document(&self) -> SflsResult<String> {
        if self.file.as_os_str() == STDIN_PATH {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            return Ok(text);
        }
        match tokio::fs::read_to_string(&self.file).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SflsError::NotFound(self.file.display().to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Parse a JSON listing document
pub fn parse_listing(path: &str, text: &str) -> SflsResult<DirectoryListing> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Document {
        Entries(Vec<RawEntry>),
        Listing(DirectoryListing),
    }

    let listing = match serde_json::from_str::<Document>(text)? {
        Document::Entries(entries) => DirectoryListing::new(path, entries),
        Document::Listing(mut listing) => {
            // a dump is complete by definition
            listing.has_more = false;
            listing.cursor = None;
            if listing.path.is_empty() {
                listing.path = path.to_string();
            }
            listing
        }
    };
    Ok(listing)
}

#[async_trait]
impl ListingSource for JsonSource {
    fn id(&self) -> &str {
        "json"
    }

    async fn list_page(&self, path: &str, _cursor: Option<&str>) -> SflsResult<DirectoryListing> {
        let text = self.read_document().await?;
        parse_listing(path, &text)
    }
}
