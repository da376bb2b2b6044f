//! Timestamp layouts seen in real feeds, in the order they are tried.
//!
//! Patterns use `chrono` strftime syntax. Zone abbreviations and `Z` never
//! appear here: [`super::normalize`] rewrites them to numeric offsets first,
//! so every zoned layout ends in `%z`.
//!
//! When parsing, chrono's `%b`/`%a` accept both short and full month and
//! weekday names, `%d`/`%H` accept one or two digits, and `%z` accepts
//! `+hhmm` as well as `+hh:mm`.

/// How a matched layout becomes an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Carries its own offset.
    Zoned(&'static str),
    /// Wall-clock time without a zone, read as UTC.
    Local(&'static str),
    /// Calendar date only, midnight UTC.
    Date(&'static str),
}

impl Layout {
    pub fn pattern(&self) -> &'static str {
        match self {
            Layout::Zoned(p) | Layout::Local(p) | Layout::Date(p) => p,
        }
    }

    /// Layouts with `%Y` refuse years below 1000 so that a two-digit year is
    /// left for the `%y` variants further down.
    pub fn has_full_year(&self) -> bool {
        self.pattern().contains("%Y")
    }
}

use Layout::{Date, Local, Zoned};

pub const LAYOUTS: &[Layout] = &[
    // RFC 1123 / RFC 822 family
    Zoned("%a, %d %b %Y %H:%M:%S %z"),
    Zoned("%a, %d %b %Y %H:%M %z"),
    Zoned("%a, %d %b %Y %H:%M:%S%.f %z"),
    Zoned("%a, %d %b %y %H:%M:%S %z"),
    Zoned("%a, %d %b %y %H:%M %z"),
    Zoned("%a %d %b %Y %H:%M:%S %z"),
    Zoned("%a %d %b %Y %H:%M %z"),
    Zoned("%a, %d %b, %Y %H:%M:%S %z"),
    Zoned("%a,%d %b %Y %H:%M:%S %z"),
    Zoned("%a, %d-%b-%Y %H:%M:%S %z"),
    Zoned("%a, %d %b %Y %H.%M.%S %z"),
    Zoned("%a, %d %b %Y %I:%M:%S %p %z"),
    Zoned("%a, %d %b %Y %I:%M %p %z"),
    Zoned("%a, %b %d %Y %H:%M:%S %z"),
    Zoned("%a, %b %d, %Y %H:%M:%S %z"),
    Zoned("%a, %b %d %Y %H:%M %z"),
    Zoned("%a, %d %m %Y %H:%M:%S %z"),
    Zoned("%a, %Y-%m-%d %H:%M:%S %z"),
    Zoned("%a, %d/%m/%Y %H:%M:%S %z"),
    Zoned("%a, %m/%d/%Y %H:%M:%S %z"),
    Zoned("%d %b %Y %H:%M:%S %z"),
    Zoned("%d %b %Y %H:%M %z"),
    Zoned("%d %b %y %H:%M:%S %z"),
    Zoned("%d %b %y %H:%M %z"),
    Zoned("%d-%b-%Y %H:%M:%S %z"),
    Zoned("%d-%b-%y %H:%M:%S %z"),
    Zoned("%d %b, %Y %H:%M:%S %z"),
    Zoned("%d %b %Y %I:%M:%S %p %z"),
    Zoned("%d %b %Y %I:%M %p %z"),
    // RFC 850
    Zoned("%a, %d-%b-%y %H:%M:%S %z"),
    Zoned("%a %d-%b-%y %H:%M:%S %z"),
    // Ruby, Unix date(1), ANSI C
    Zoned("%a %b %d %H:%M:%S %z %Y"),
    Zoned("%a %b %e %H:%M:%S %z %Y"),
    Zoned("%a %b %d %H:%M:%S%.f %z %Y"),
    Zoned("%a %b %d %Y %H:%M:%S %z"),
    Zoned("%a %b %d %H:%M %z %Y"),
    Zoned("%b %d %Y %H:%M:%S %z"),
    Zoned("%b %d, %Y %H:%M:%S %z"),
    Zoned("%b %d, %Y %I:%M:%S %p %z"),
    Zoned("%b %d, %Y %I:%M %p %z"),
    Zoned("%B %d, %Y %H:%M %z"),
    Zoned("%B %d, %Y, %I:%M %p %z"),
    // ISO 8601 / RFC 3339
    Zoned("%Y-%m-%dT%H:%M:%S%z"),
    Zoned("%Y-%m-%dT%H:%M:%S%.f%z"),
    Zoned("%Y-%m-%dT%H:%M%z"),
    Zoned("%Y-%m-%dT%H:%M:%S %z"),
    Zoned("%Y-%m-%dT%H:%M:%S%.f %z"),
    Zoned("%Y-%m-%d %H:%M:%S%z"),
    Zoned("%Y-%m-%d %H:%M:%S %z"),
    Zoned("%Y-%m-%d %H:%M:%S%.f %z"),
    Zoned("%Y-%m-%d %H:%M:%S%.f%z"),
    Zoned("%Y-%m-%d %H:%M %z"),
    Zoned("%Y-%m-%d %H:%M%z"),
    Zoned("%Y-%m-%d, %H:%M:%S %z"),
    Zoned("%Y%m%dT%H%M%S%z"),
    Zoned("%Y%m%d%H%M%S %z"),
    Zoned("%Y/%m/%d %H:%M:%S %z"),
    Zoned("%Y/%m/%d %H:%M %z"),
    Zoned("%Y.%m.%d %H:%M:%S %z"),
    Zoned("%y-%m-%dT%H:%M:%S%z"),
    Zoned("%y-%m-%d %H:%M:%S %z"),
    // Regional and day/month swapped
    Zoned("%d/%m/%Y %H:%M:%S %z"),
    Zoned("%d/%m/%Y %H:%M %z"),
    Zoned("%m/%d/%Y %H:%M:%S %z"),
    Zoned("%m/%d/%Y %I:%M:%S %p %z"),
    Zoned("%m/%d/%Y %I:%M %p %z"),
    Zoned("%d.%m.%Y %H:%M:%S %z"),
    Zoned("%d.%m.%Y %H:%M %z"),
    Zoned("%d-%m-%Y %H:%M:%S %z"),
    Zoned("%d-%m-%Y %H:%M %z"),
    Zoned("%m-%d-%Y %H:%M:%S %z"),
    Zoned("%d/%m/%y %H:%M:%S %z"),
    Zoned("%m/%d/%y %H:%M:%S %z"),
    Zoned("%m/%d/%y %I:%M %p %z"),
    Zoned("%d.%m.%y %H:%M %z"),
    Zoned("%Y. %m. %d. %H:%M:%S %z"),
    Zoned("%Y年%m月%d日 %H:%M:%S %z"),
    Zoned("%Y年%m月%d日 %H:%M %z"),
    Zoned("%H:%M:%S %z %d %b %Y"),
    Zoned("%H:%M %z %d %b %Y"),
    Zoned("%A, %B %d, %Y %H:%M:%S %z"),
    Zoned("%A, %B %d, %Y %I:%M %p %z"),
    Zoned("%A, %d %B %Y %H:%M:%S %z"),
    Zoned("%A, %d %B %Y %H:%M %z"),
    // Missing zone
    Local("%a, %d %b %Y %H:%M:%S"),
    Local("%a, %d %b %Y %H:%M"),
    Local("%a, %d %b %y %H:%M:%S"),
    Local("%a %d %b %Y %H:%M:%S"),
    Local("%a, %d-%b-%Y %H:%M:%S"),
    Local("%a, %b %d %Y %H:%M:%S"),
    Local("%a, %b %d, %Y %H:%M:%S"),
    Local("%a, %d %b %Y %I:%M:%S %p"),
    Local("%a, %d %b %Y %I:%M %p"),
    Local("%a %b %d %H:%M:%S %Y"),
    Local("%a %b %e %H:%M:%S %Y"),
    Local("%a %b %d %Y %H:%M:%S"),
    Local("%d %b %Y %H:%M:%S"),
    Local("%d %b %Y %H:%M"),
    Local("%d %b %y %H:%M:%S"),
    Local("%d-%b-%Y %H:%M:%S"),
    Local("%d-%b-%Y %H:%M"),
    Local("%d %b %Y %I:%M %p"),
    Local("%b %d %Y %H:%M:%S"),
    Local("%b %d, %Y %H:%M:%S"),
    Local("%b %d, %Y %I:%M:%S %p"),
    Local("%b %d, %Y %I:%M %p"),
    Local("%B %d, %Y %H:%M"),
    Local("%Y-%m-%dT%H:%M:%S"),
    Local("%Y-%m-%dT%H:%M:%S%.f"),
    Local("%Y-%m-%dT%H:%M"),
    Local("%Y-%m-%d %H:%M:%S"),
    Local("%Y-%m-%d %H:%M:%S%.f"),
    Local("%Y-%m-%d %H:%M"),
    Local("%Y-%m-%d %I:%M:%S %p"),
    Local("%Y/%m/%d %H:%M:%S"),
    Local("%Y/%m/%d %H:%M"),
    Local("%Y.%m.%d %H:%M:%S"),
    Local("%Y%m%dT%H%M%S"),
    Local("%Y%m%d%H%M%S"),
    Local("%d/%m/%Y %H:%M:%S"),
    Local("%d/%m/%Y %H:%M"),
    Local("%m/%d/%Y %H:%M:%S"),
    Local("%m/%d/%Y %I:%M:%S %p"),
    Local("%m/%d/%Y %I:%M %p"),
    Local("%d.%m.%Y %H:%M:%S"),
    Local("%d.%m.%Y %H:%M"),
    Local("%d-%m-%Y %H:%M:%S"),
    Local("%d-%m-%Y %H:%M"),
    Local("%m/%d/%y %H:%M:%S"),
    Local("%m/%d/%y %I:%M %p"),
    Local("%Y年%m月%d日 %H:%M:%S"),
    Local("%Y年%m月%d日 %H:%M"),
    Local("%A, %B %d, %Y %I:%M %p"),
    Local("%A, %d %B %Y %H:%M"),
    // Date only
    Date("%Y-%m-%d"),
    Date("%Y/%m/%d"),
    Date("%Y.%m.%d"),
    Date("%Y%m%d"),
    Date("%a, %d %b %Y"),
    Date("%a %d %b %Y"),
    Date("%a, %b %d, %Y"),
    Date("%A, %B %d, %Y"),
    Date("%A, %d %B %Y"),
    Date("%d %b %Y"),
    Date("%d %b, %Y"),
    Date("%d-%b-%Y"),
    Date("%d-%b-%y"),
    Date("%b %d, %Y"),
    Date("%b %d %Y"),
    Date("%B %Y %d"),
    Date("%d/%m/%Y"),
    Date("%m/%d/%Y"),
    Date("%d.%m.%Y"),
    Date("%d-%m-%Y"),
    Date("%m/%d/%y"),
    Date("%Y年%m月%d日"),
];
