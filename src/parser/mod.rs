//! Tolerant RSS/Atom feed parser.
//!
//! [`FeedParser`] pulls lexemes from its own [`Lexer`] and fills in one
//! [`Feed`] followed by one [`Entry`] per `<item>`/`<entry>`. Dispatch is by
//! local tag name through two handler tables, so RSS 2.0 and Atom share one
//! code path and vendor namespaces (`media:`, `dc:`, `slash:`) cost nothing:
//! unknown tags are stepped over, and `content:encoded` is just `encoded`.
//!
//! Only a tokenizer error is fatal. Anything else (unknown tags, empty
//! elements, dates in an unknown dialect, bad entities) merely leaves fields
//! unset.

mod cursor;
mod handlers;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lexer::{LexemeKind, Lexer};
use crate::model::{Entry, Feed};

use cursor::Cursor;
use handlers::{entry_field, feed_field, is_entry_boundary, skip_element, FEED_ROOTS};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The tokenizer hit a construct it cannot scan. The whole document is
    /// rejected; no partial result is produced.
    #[error("{name}:{line}: malformed feed: {message}")]
    Malformed {
        name: String,
        line: usize,
        message: String,
    },

    /// The document bytes are not UTF-8.
    #[error("{name}: invalid UTF-8 at byte {offset}")]
    Encoding { name: String, offset: usize },
}

// ============================================================================
// Parser
// ============================================================================

/// A completed parse: the channel metadata and entries in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedFeed {
    pub feed: Feed,
    pub entries: Vec<Entry>,
}

/// Single-use parser over one in-memory document.
pub struct FeedParser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> FeedParser<'a> {
    /// `name` only labels diagnostics.
    pub fn new(name: &'a str, text: &'a str) -> Self {
        Self {
            cursor: Cursor::new(Lexer::new(name, text)),
        }
    }

    pub fn parse(mut self) -> Result<ParsedFeed, ParseError> {
        let name = self.cursor.name();

        if !self.skip_preamble()? {
            tracing::debug!(name = %name, "No channel or feed element found");
            return Ok(ParsedFeed::default());
        }

        let feed = self.populate_feed()?;
        let entries = self.populate_entries()?;

        tracing::debug!(name = %name, entries = entries.len(), "Parsed feed document");
        Ok(ParsedFeed { feed, entries })
    }

    /// Discards everything up to the `channel`/`feed` open tag. Returns false
    /// if the document has no feed root.
    fn skip_preamble(&mut self) -> Result<bool, ParseError> {
        loop {
            let lexeme = self.cursor.advance()?;
            match lexeme.kind {
                LexemeKind::EndOfInput => return Ok(false),
                LexemeKind::OpenTag if FEED_ROOTS.contains(&lexeme.value) => return Ok(true),
                _ => {}
            }
        }
    }

    /// Fills the feed record until the first entry boundary, which is left
    /// for [`Self::populate_entries`].
    fn populate_feed(&mut self) -> Result<Feed, ParseError> {
        let mut feed = Feed::default();

        loop {
            let lexeme = self.cursor.advance()?;
            match lexeme.kind {
                LexemeKind::EndOfInput => {
                    self.cursor.push_back(lexeme);
                    break;
                }
                LexemeKind::OpenTag if is_entry_boundary(&lexeme) => {
                    self.cursor.push_back(lexeme);
                    break;
                }
                LexemeKind::OpenTag => match feed_field(lexeme.value) {
                    Some(field) => field.populate(&mut self.cursor, lexeme.value, &mut feed)?,
                    None => {
                        tracing::trace!(tag = %lexeme.value, "Skipping unknown feed element");
                        skip_element(&mut self.cursor, lexeme.value)?;
                    }
                },
                _ => {}
            }
        }

        Ok(feed)
    }

    fn populate_entries(&mut self) -> Result<Vec<Entry>, ParseError> {
        let mut entries = Vec::new();
        let mut current: Option<Entry> = None;

        loop {
            let lexeme = self.cursor.advance()?;
            match lexeme.kind {
                LexemeKind::EndOfInput => {
                    entries.extend(current.take());
                    break;
                }
                LexemeKind::OpenTag if is_entry_boundary(&lexeme) => {
                    entries.extend(current.replace(Entry::default()));
                }
                LexemeKind::OpenTag => {
                    let Some(entry) = current.as_mut() else {
                        continue;
                    };
                    match entry_field(lexeme.value) {
                        Some(field) => field.populate(&mut self.cursor, lexeme.value, entry)?,
                        None => {
                            tracing::trace!(tag = %lexeme.value, "Skipping unknown entry element");
                            skip_element(&mut self.cursor, lexeme.value)?;
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(entries)
    }
}

/// Parses one document held in memory.
pub fn parse_document(name: &str, text: &str) -> Result<ParsedFeed, ParseError> {
    FeedParser::new(name, text).parse()
}

/// Like [`parse_document`], but validates UTF-8 first.
pub fn parse_bytes(name: &str, bytes: &[u8]) -> Result<ParsedFeed, ParseError> {
    let text = std::str::from_utf8(bytes).map_err(|e| ParseError::Encoding {
        name: name.to_string(),
        offset: e.valid_up_to(),
    })?;
    parse_document(name, text)
}

// ============================================================================
// Tests
// ============================================================================
