//! Best-effort timestamp parsing.
//!
//! Feeds carry dates in dozens of dialects: RFC 822 with and without
//! weekdays, RFC 3339, `date(1)` output, two-digit years, regional orderings,
//! zone abbreviations, weekdays that disagree with the date, and trailing
//! junk. [`resolve`] normalizes the string and then walks the ordered
//! [`LAYOUTS`] table; the first layout that matches wins.
//!
//! A date that cannot be resolved is never fatal. Callers leave the field
//! unset.

mod layouts;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

pub use layouts::{Layout, LAYOUTS};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// Nothing but whitespace.
    #[error("empty date string")]
    NotADate,

    #[error("unrecognized date format: {0:?}")]
    Unrecognized(String),
}

/// Zone abbreviations found in feeds and the offsets they stand for.
const ZONE_ABBREVIATIONS: &[(&str, &str)] = &[
    ("GMT", "+0000"),
    ("UT", "+0000"),
    ("UTC", "+0000"),
    ("Z", "+0000"),
    ("EST", "-0500"),
    ("EDT", "-0400"),
    ("CST", "-0600"),
    ("CDT", "-0500"),
    ("MST", "-0700"),
    ("MDT", "-0600"),
    ("PST", "-0800"),
    ("PDT", "-0700"),
    ("AKST", "-0900"),
    ("AKDT", "-0800"),
    ("HST", "-1000"),
    ("BST", "+0100"),
    ("IST", "+0530"),
    ("CET", "+0100"),
    ("CEST", "+0200"),
    ("EET", "+0200"),
    ("EEST", "+0300"),
    ("WET", "+0000"),
    ("WEST", "+0100"),
    ("MSK", "+0300"),
    ("JST", "+0900"),
    ("KST", "+0900"),
    ("HKT", "+0800"),
    ("SGT", "+0800"),
    ("AEST", "+1000"),
    ("AEDT", "+1100"),
    ("ACST", "+0930"),
    ("AWST", "+0800"),
    ("NZST", "+1200"),
    ("NZDT", "+1300"),
];

const WEEKDAYS: &[&str] = &[
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Resolves a feed timestamp to an instant.
///
/// # Errors
///
/// - [`DateError::NotADate`] for an empty or all-whitespace string
/// - [`DateError::Unrecognized`] when no layout matches
pub fn resolve(raw: &str) -> Result<DateTime<Utc>, DateError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DateError::NotADate);
    }

    let normalized = normalize(trimmed);
    let resolved = match_layouts(&normalized)
        .or_else(|| strip_weekday(&normalized).and_then(match_layouts));

    match resolved {
        Some(instant) => Ok(instant),
        None => {
            tracing::trace!(date = %trimmed, "No layout matched date");
            Err(DateError::Unrecognized(trimmed.to_string()))
        }
    }
}

/// Rewrites zone spellings chrono cannot read into numeric offsets and
/// collapses whitespace.
pub(crate) fn normalize(raw: &str) -> String {
    let mut out = raw
        .split_whitespace()
        .map(|token| zone_offset(token).unwrap_or(token))
        .collect::<Vec<_>>()
        .join(" ");

    // 2013-08-19T10:33:12Z
    if out.ends_with('Z') {
        let before = out[..out.len() - 1].chars().next_back();
        if before.is_some_and(|c| c.is_ascii_digit()) {
            out.truncate(out.len() - 1);
            out.push_str("+0000");
        }
    }

    // +05:30 -> +0530
    let bytes = out.as_bytes();
    if bytes.len() >= 6 {
        let tail = &bytes[bytes.len() - 6..];
        if matches!(tail[0], b'+' | b'-')
            && tail[1].is_ascii_digit()
            && tail[2].is_ascii_digit()
            && tail[3] == b':'
            && tail[4].is_ascii_digit()
            && tail[5].is_ascii_digit()
        {
            out.remove(out.len() - 3);
        }
    }

    out
}

/// Maps `EST`, `GMT+01:00` style tokens to a bare offset.
fn zone_offset(token: &str) -> Option<&str> {
    if let Some(&(_, offset)) = ZONE_ABBREVIATIONS.iter().find(|(name, _)| *name == token) {
        return Some(offset);
    }
    ["GMT", "UTC"].iter().find_map(|prefix| {
        token
            .strip_prefix(prefix)
            .filter(|offset| offset.starts_with(['+', '-']))
    })
}

/// Drops a leading weekday token (`Mon,`, `Tuesday`, `Thu.`).
pub(crate) fn strip_weekday(s: &str) -> Option<&str> {
    let (first, rest) = s.split_once(' ')?;
    let word = first
        .trim_end_matches([',', '.'])
        .to_ascii_lowercase();
    if word.len() < 3 {
        return None;
    }
    let is_weekday = WEEKDAYS
        .iter()
        .any(|day| *day == word || (word.len() == 3 && day.starts_with(word.as_str())));
    if is_weekday {
        Some(rest.trim_start())
    } else {
        None
    }
}

/// Strict pass over every layout, then a lenient pass that tolerates
/// trailing text after whitespace.
fn match_layouts(s: &str) -> Option<DateTime<Utc>> {
    LAYOUTS
        .iter()
        .find_map(|layout| parse_with(layout, s, false))
        .or_else(|| {
            LAYOUTS
                .iter()
                .find_map(|layout| parse_with(layout, s, true))
        })
}

fn parse_with(layout: &Layout, s: &str, lenient: bool) -> Option<DateTime<Utc>> {
    let (instant, rest) = match *layout {
        Layout::Zoned(pattern) => {
            let (dt, rest) = DateTime::<FixedOffset>::parse_and_remainder(s, pattern).ok()?;
            (dt.with_timezone(&Utc), rest)
        }
        Layout::Local(pattern) => {
            let (dt, rest) = NaiveDateTime::parse_and_remainder(s, pattern).ok()?;
            (dt.and_utc(), rest)
        }
        Layout::Date(pattern) => {
            let (date, rest) = NaiveDate::parse_and_remainder(s, pattern).ok()?;
            (date.and_hms_opt(0, 0, 0)?.and_utc(), rest)
        }
    };

    let consumed = rest.is_empty()
        || (lenient && rest.starts_with(char::is_whitespace) && !drops_meaning(rest));
    if !consumed {
        return None;
    }
    if layout.has_full_year() && instant.year() < 1000 {
        return None;
    }
    Some(instant)
}

/// Trailing text the lenient pass must not throw away: an unresolved zone
/// abbreviation (`PHT`, `PM`) or a clock time left over by a date-only layout.
fn drops_meaning(rest: &str) -> bool {
    let Some(token) = rest.split_whitespace().next() else {
        return false;
    };
    let zone_like = (2..=5).contains(&token.len()) && token.bytes().all(|b| b.is_ascii_uppercase());
    let clock = token.starts_with(|c: char| c.is_ascii_digit()) && token.contains(':');
    zone_like || clock
}

// ============================================================================
// Tests
// ============================================================================
