//! Tag handler tables.
//!
//! Both tables map a local tag name (case-sensitive, namespace prefix already
//! dropped) to the field it populates. A handler runs right after the
//! dispatcher has consumed the element's open tag and reads exactly as far as
//! it needs.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::date;
use crate::lexer::{Lexeme, LexemeKind};
use crate::model::{Entry, Feed};
use crate::text;

use super::cursor::Cursor;
use super::ParseError;

/// Open tags that start a new entry.
pub(super) const ENTRY_BOUNDARIES: [&str; 2] = ["item", "entry"];

/// Open tags that mark the feed root.
pub(super) const FEED_ROOTS: [&str; 2] = ["channel", "feed"];

pub(super) fn is_entry_boundary(lexeme: &Lexeme<'_>) -> bool {
    ENTRY_BOUNDARIES.iter().any(|name| lexeme.opens(name))
}

// ============================================================================
// Handler Tables
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FeedField {
    Title,
    Link,
    Subtitle,
    Copyright,
    Author,
    Published,
    Category,
    Generator,
    Logo,
    Icon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum EntryField {
    Title,
    Link,
    Subtitle,
    Guid,
    Updated,
    Summary,
    Content,
    Source,
    Comments,
    Enclosure,
    Thumbnail,
}

pub(super) fn feed_field(tag: &str) -> Option<FeedField> {
    static TABLE: OnceLock<HashMap<&'static str, FeedField>> = OnceLock::new();
    TABLE
        .get_or_init(|| {
            HashMap::from([
                ("title", FeedField::Title),
                ("link", FeedField::Link),
                ("description", FeedField::Subtitle),
                ("subtitle", FeedField::Subtitle),
                ("copyright", FeedField::Copyright),
                ("author", FeedField::Author),
                ("managingEditor", FeedField::Author),
                ("pubDate", FeedField::Published),
                ("category", FeedField::Category),
                ("generator", FeedField::Generator),
                ("logo", FeedField::Logo),
                ("icon", FeedField::Icon),
            ])
        })
        .get(tag)
        .copied()
}

pub(super) fn entry_field(tag: &str) -> Option<EntryField> {
    static TABLE: OnceLock<HashMap<&'static str, EntryField>> = OnceLock::new();
    TABLE
        .get_or_init(|| {
            HashMap::from([
                ("title", EntryField::Title),
                ("link", EntryField::Link),
                ("subtitle", EntryField::Subtitle),
                ("id", EntryField::Guid),
                ("guid", EntryField::Guid),
                ("pubDate", EntryField::Updated),
                ("updatedDate", EntryField::Updated),
                ("updated", EntryField::Updated),
                ("published", EntryField::Updated),
                ("summary", EntryField::Summary),
                ("description", EntryField::Summary),
                ("encoded", EntryField::Content),
                ("content", EntryField::Content),
                ("source", EntryField::Source),
                ("comments", EntryField::Comments),
                ("enclosure", EntryField::Enclosure),
                ("thumbnail", EntryField::Thumbnail),
            ])
        })
        .get(tag)
        .copied()
}

// ============================================================================
// Field Setters
// ============================================================================

impl FeedField {
    /// Reads the element's content into `feed`. An element without content
    /// leaves the field as it was.
    pub(super) fn populate(
        self,
        cursor: &mut Cursor<'_>,
        tag: &str,
        feed: &mut Feed,
    ) -> Result<(), ParseError> {
        let Some(value) = read_text(cursor, tag)? else {
            return Ok(());
        };
        let slot = match self {
            FeedField::Published => {
                if let Some(instant) = resolve_date(cursor.name(), tag, &value) {
                    feed.published = Some(instant);
                }
                return Ok(());
            }
            FeedField::Title => &mut feed.title,
            FeedField::Link => &mut feed.link,
            FeedField::Subtitle => &mut feed.subtitle,
            FeedField::Copyright => &mut feed.copyright,
            FeedField::Author => &mut feed.author,
            FeedField::Category => &mut feed.category,
            FeedField::Generator => &mut feed.generator,
            FeedField::Logo => &mut feed.logo,
            FeedField::Icon => &mut feed.icon,
        };
        *slot = Some(value);
        Ok(())
    }
}

impl EntryField {
    pub(super) fn populate(
        self,
        cursor: &mut Cursor<'_>,
        tag: &str,
        entry: &mut Entry,
    ) -> Result<(), ParseError> {
        match self {
            EntryField::Enclosure => return read_enclosure(cursor, tag, entry),
            EntryField::Thumbnail => return read_thumbnail(cursor, tag, entry),
            _ => {}
        }

        let Some(value) = read_text(cursor, tag)? else {
            return Ok(());
        };
        let slot = match self {
            EntryField::Updated => {
                if let Some(instant) = resolve_date(cursor.name(), tag, &value) {
                    entry.updated = Some(instant);
                }
                return Ok(());
            }
            EntryField::Title => &mut entry.title,
            EntryField::Link => &mut entry.link,
            EntryField::Subtitle => &mut entry.subtitle,
            EntryField::Guid => &mut entry.guid,
            EntryField::Summary => &mut entry.summary,
            EntryField::Content => &mut entry.content,
            EntryField::Source => &mut entry.source,
            EntryField::Comments => &mut entry.comments,
            EntryField::Enclosure | EntryField::Thumbnail => return Ok(()),
        };
        *slot = Some(value);
        Ok(())
    }
}

fn resolve_date(name: &str, tag: &str, value: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    match date::resolve(value) {
        Ok(instant) => Some(instant),
        Err(e) => {
            tracing::debug!(name = %name, tag = %tag, error = %e, "Leaving date unset");
            None
        }
    }
}

// ============================================================================
// Readers
// ============================================================================

/// Returns the first `Text`/`RawHtml` inside the element and leaves the cursor
/// just past its end.
///
/// The element ends at its own close tag, at `/>` or an unmatched close tag
/// at the top level, or where an item boundary or end of input cuts it short.
/// Those last two are pushed back for the dispatcher.
pub(super) fn read_text(cursor: &mut Cursor<'_>, tag: &str) -> Result<Option<String>, ParseError> {
    let mut depth = 0usize;
    let mut found = None;

    loop {
        let lexeme = cursor.advance()?;
        match lexeme.kind {
            LexemeKind::EndOfInput => {
                cursor.push_back(lexeme);
                break;
            }
            LexemeKind::OpenTag if is_entry_boundary(&lexeme) => {
                cursor.push_back(lexeme);
                break;
            }
            LexemeKind::OpenTag => depth += 1,
            LexemeKind::SelfClosingTag => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            LexemeKind::CloseTag => {
                if depth == 0 || lexeme.value == tag {
                    break;
                }
                depth -= 1;
            }
            LexemeKind::Text | LexemeKind::RawHtml => {
                if found.is_none() {
                    found = text::normalize(&lexeme);
                }
            }
            _ => {}
        }
    }

    Ok(found)
}

/// Consumes the rest of an element the tables do not know, children
/// included, so that a known name nested inside it (`<image><title>`) never
/// reaches a handler.
///
/// Ends like [`read_text`]: at the element's own close tag, at `/>` or an
/// unmatched close tag at the top level, or at an item boundary or end of
/// input (pushed back).
pub(super) fn skip_element(cursor: &mut Cursor<'_>, tag: &str) -> Result<(), ParseError> {
    let mut depth = 0usize;

    loop {
        let lexeme = cursor.advance()?;
        match lexeme.kind {
            LexemeKind::EndOfInput => {
                cursor.push_back(lexeme);
                break;
            }
            LexemeKind::OpenTag if is_entry_boundary(&lexeme) => {
                cursor.push_back(lexeme);
                break;
            }
            LexemeKind::OpenTag => depth += 1,
            LexemeKind::SelfClosingTag => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            LexemeKind::CloseTag => {
                if depth == 0 || lexeme.value == tag {
                    break;
                }
                depth -= 1;
            }
            _ => {}
        }
    }

    Ok(())
}

/// Walks attribute name/value pairs until the element ends, handing each
/// pair to `assign`.
///
/// Stops at `/>`, at the element's own close tag, or at any other open tag,
/// item boundary, or end of input (pushed back).
fn read_attributes<'a>(
    cursor: &mut Cursor<'a>,
    tag: &str,
    mut assign: impl FnMut(&str, &'a str),
) -> Result<(), ParseError> {
    let mut name: Option<&'a str> = None;

    loop {
        let lexeme = cursor.advance()?;
        match lexeme.kind {
            LexemeKind::AttributeName => name = Some(lexeme.value),
            LexemeKind::AttributeValue => {
                if let Some(name) = name.take() {
                    assign(name, lexeme.value);
                }
            }
            LexemeKind::SelfClosingTag => break,
            LexemeKind::CloseTag if lexeme.value == tag => break,
            LexemeKind::EndOfInput | LexemeKind::OpenTag => {
                cursor.push_back(lexeme);
                break;
            }
            _ => {}
        }
    }

    Ok(())
}

fn attribute_value(raw: &str) -> String {
    html_escape::decode_html_entities(raw).into_owned()
}

fn read_enclosure(cursor: &mut Cursor<'_>, tag: &str, entry: &mut Entry) -> Result<(), ParseError> {
    let enclosure = &mut entry.enclosure;
    read_attributes(cursor, tag, |name, value| match name {
        "length" => enclosure.length = Some(attribute_value(value)),
        "type" => enclosure.mime_type = Some(attribute_value(value)),
        "url" => enclosure.url = Some(attribute_value(value)),
        _ => {}
    })
}

fn read_thumbnail(cursor: &mut Cursor<'_>, tag: &str, entry: &mut Entry) -> Result<(), ParseError> {
    read_attributes(cursor, tag, |name, value| {
        if name == "url" {
            entry.thumbnail = Some(attribute_value(value));
        }
    })
}
