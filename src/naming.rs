//! Centralized filename parsing for the `YYYY-MM-DD-title` convention.
//!
//! Every photo dropped into the source directory carries its own schema in
//! the filename: a calendar-date prefix, a dash, and a title. This module is
//! the only place that parsing happens — later stages work with the
//! structured [`ParsedFilename`] and never re-read the string.
//!
//! ## Display Titles
//!
//! Dashes in the title portion are converted to spaces for display:
//! - `2021-06-01-sunset.jpg` → "sunset"
//! - `2021-06-02-hike-to-the-lake.jpg` → "hike to the lake"
//!
//! A dash that the operator meant literally is indistinguishable from a
//! separator, so it becomes a space too. This is a known rough edge of the
//! naming convention, kept as-is rather than inventing escaping syntax.
//!
//! ## The marker word
//!
//! A reserved token in the title (configurable, default `small`) flags the
//! photo as "render without the resized/lightbox treatment". The marker is
//! matched against whole dash-separated tokens, sets
//! [`ParsedFilename::suppress_lightbox`], and is stripped from the display
//! title — it is a control signal, not display text.

use chrono::NaiveDate;
use thiserror::Error;

/// Why a filename was rejected. Carried into the end-of-run skip report so
/// the operator can fix the file and rerun.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilenameError {
    #[error("missing file extension")]
    MissingExtension,
    #[error("name does not start with a YYYY-MM-DD date prefix")]
    MissingDatePrefix,
    #[error("'{0}' is not a valid calendar date")]
    InvalidDate(String),
    #[error("no dash separator after the date prefix")]
    MissingSeparator,
    #[error("no title after the date prefix")]
    EmptyTitle,
}

/// Result of parsing a photo filename like `2021-06-01-sunset.jpg`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFilename {
    /// Calendar date from the `YYYY-MM-DD` prefix. Authoritative for
    /// gallery grouping, even when EXIF disagrees.
    pub date: NaiveDate,
    /// Raw title segment, dashes and marker tokens preserved.
    pub raw_title: String,
    /// Display title: dashes converted to spaces, marker tokens removed.
    pub title: String,
    /// True when the title contained the marker word.
    pub suppress_lightbox: bool,
}

/// Number of bytes in a `YYYY-MM-DD` prefix.
const DATE_PREFIX_LEN: usize = 10;

/// Parse a photo filename following the `YYYY-MM-DD-title.ext` convention.
///
/// `marker` is the configured small-image token; it matches whole
/// dash-separated title tokens only and is case-sensitive.
///
/// - `"2021-06-01-sunset.jpg"` → date 2021-06-01, title "sunset"
/// - `"2021-06-02-hike-small-trail.jpg"` (marker "small") →
///   title "hike trail", suppress_lightbox = true
/// - `"sunset.jpg"` → `MissingDatePrefix`
/// - `"2021-13-01-x.jpg"` → `InvalidDate`
pub fn parse_photo_filename(
    file_name: &str,
    marker: &str,
) -> Result<ParsedFilename, FilenameError> {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => stem,
        _ => return Err(FilenameError::MissingExtension),
    };

    let date_part = match stem.get(..DATE_PREFIX_LEN) {
        Some(p) => p,
        None => return Err(FilenameError::MissingDatePrefix),
    };
    if !looks_like_date(date_part) {
        return Err(FilenameError::MissingDatePrefix);
    }
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| FilenameError::InvalidDate(date_part.to_string()))?;

    let rest = &stem[DATE_PREFIX_LEN..];
    let raw_title = match rest.strip_prefix('-') {
        Some(t) => t,
        None => return Err(FilenameError::MissingSeparator),
    };
    if raw_title.is_empty() {
        return Err(FilenameError::EmptyTitle);
    }

    let mut suppress_lightbox = false;
    let display_tokens: Vec<&str> = raw_title
        .split('-')
        .filter(|token| {
            if *token == marker {
                suppress_lightbox = true;
                false
            } else {
                true
            }
        })
        .collect();

    Ok(ParsedFilename {
        date,
        raw_title: raw_title.to_string(),
        title: display_tokens.join(" "),
        suppress_lightbox,
    })
}

/// Cheap structural check for `DDDD-DD-DD` before handing off to chrono.
///
/// Distinguishes "no date prefix at all" (`sunset.jpg`) from "date-shaped
/// but not a real date" (`2021-13-41-x.jpg`) in the skip report.
fn looks_like_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == DATE_PREFIX_LEN
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
}
