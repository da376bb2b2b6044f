use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Data Structures
// ============================================================================

/// Channel-level metadata of one parsed document.
///
/// Every field is optional: `None` means the document did not provide it (or
/// provided something unusable, such as an unresolvable date). Identifiers are
/// never produced by parsing; storage assigns them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    pub id: Option<i64>,
    /// Where the document was fetched from. Filled in by the caller.
    pub source_url: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    /// RSS `description` or Atom `subtitle`.
    pub subtitle: Option<String>,
    pub copyright: Option<String>,
    /// RSS `managingEditor` or Atom `author`.
    pub author: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub generator: Option<String>,
    pub logo: Option<String>,
    pub icon: Option<String>,
}

impl Feed {
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }
}

/// One `<item>` or `<entry>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Option<i64>,
    pub feed_id: Option<i64>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub subtitle: Option<String>,
    /// RSS `guid` or Atom `id`.
    pub guid: Option<String>,
    pub updated: Option<DateTime<Utc>>,
    pub summary: Option<String>,
    /// Full body. Verbatim HTML when the document wrapped it in CDATA.
    pub content: Option<String>,
    pub source: Option<String>,
    pub comments: Option<String>,
    pub thumbnail: Option<String>,
    pub enclosure: Enclosure,
}

impl Entry {
    /// Attaches storage identifiers once the entry has been persisted.
    pub fn assign_ids(&mut self, id: i64, feed_id: i64) {
        self.id = Some(id);
        self.feed_id = Some(feed_id);
    }
}

/// Attached media described by `<enclosure length=".." type=".." url=".."/>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enclosure {
    /// Byte length as written in the document; not validated.
    pub length: Option<String>,
    pub mime_type: Option<String>,
    pub url: Option<String>,
}

impl Enclosure {
    pub fn is_empty(&self) -> bool {
        self.length.is_none() && self.mime_type.is_none() && self.url.is_none()
    }
}
