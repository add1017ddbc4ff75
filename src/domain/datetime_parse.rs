//! Best-effort parsing of provider date and date-time strings.
//!
//! Every entry point returns `Option`; a string no known layout accepts is
//! simply `None`. Formats are tried in a fixed order and the first success wins.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Layouts that carry an explicit UTC offset.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d %B %Y %H:%M",
    "%B %d, %Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%Y%m%d",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
];

/// Suffixes that name UTC without an offset.
const UTC_SUFFIXES: &[&str] = &[" UTC", " GMT", "UTC", "GMT"];

/// Result of a successful parse, keeping whether an offset was present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedTime {
    Zoned(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl ParsedTime {
    /// Convert to `tz`, reading naive values as UTC.
    pub fn in_zone<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Tz> {
        match self {
            ParsedTime::Zoned(dt) => dt.with_timezone(tz),
            ParsedTime::Naive(naive) => Utc.from_utc_datetime(naive).with_timezone(tz),
        }
    }

    /// Calendar date as written, ignoring any offset.
    pub fn date(&self) -> NaiveDate {
        match self {
            ParsedTime::Zoned(dt) => dt.date_naive(),
            ParsedTime::Naive(naive) => naive.date(),
        }
    }
}

/// Parse a date or date-time string in any supported layout.
pub fn parse_flexible(input: &str) -> Option<ParsedTime> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(ParsedTime::Zoned(dt));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(ParsedTime::Zoned(dt));
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(ParsedTime::Zoned(dt));
    }

    if let Some(stripped) = UTC_SUFFIXES.iter().find_map(|sfx| s.strip_suffix(sfx)) {
        return parse_naive(stripped.trim_end())
            .map(|naive| ParsedTime::Zoned(Utc.from_utc_datetime(&naive).fixed_offset()));
    }

    parse_naive(s).map(ParsedTime::Naive)
}

/// Parse only the calendar date of `input`.
pub fn parse_date_flexible(input: &str) -> Option<NaiveDate> {
    parse_flexible(input).map(|p| p.date())
}

fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}
