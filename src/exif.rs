//! EXIF metadata extraction.
//!
//! Reads capture metadata through `kamadak-exif` and converts it into the
//! display-ready [`ExifData`] carried by each photo record: capture datetime,
//! camera and lens model, formatted exposure settings, and GPS coordinates
//! converted from the degree/minute/second encoding to decimal degrees.
//!
//! Every field is optional and every failure mode — file unreadable, no EXIF
//! segment, missing tags, unparseable values — degrades to absence. EXIF is
//! supplementary display data only; the filename date stays authoritative
//! for gallery grouping regardless of what the capture datetime says.

use chrono::NaiveDateTime;
use exif::{In, Rational, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// EXIF tags to try for the capture datetime, in priority order.
const DATE_TAGS: &[Tag] = &[Tag::DateTimeOriginal, Tag::DateTimeDigitized, Tag::DateTime];

/// Supplementary metadata for one photo. All fields optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExifData {
    /// Capture datetime. Display-only; never used for grouping.
    pub datetime: Option<NaiveDateTime>,
    /// Camera body, e.g. "FUJIFILM X-T3".
    pub camera: Option<String>,
    /// Lens model, e.g. "XF23mmF2 R WR".
    pub lens: Option<String>,
    /// Formatted exposure time, e.g. "1/250s" or "2s".
    pub exposure_time: Option<String>,
    /// Formatted aperture, e.g. "f/2.8".
    pub aperture: Option<String>,
    /// Formatted focal length, e.g. "23mm".
    pub focal_length: Option<String>,
    /// Formatted sensitivity, e.g. "ISO 160".
    pub iso: Option<String>,
    /// Decimal-degree coordinates as (latitude, longitude).
    pub gps: Option<(f64, f64)>,
}

impl ExifData {
    /// True when no tag of any kind was recovered.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Read EXIF metadata from an image file. Never fails: any read or parse
/// error yields an [`ExifData`] with the affected fields absent.
pub fn read_photo_exif(path: &Path) -> ExifData {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return ExifData::default(),
    };
    let mut reader = BufReader::new(file);
    let exif = match Reader::new().read_from_container(&mut reader) {
        Ok(e) => e,
        Err(_) => return ExifData::default(),
    };

    let datetime = DATE_TAGS.iter().find_map(|&tag| {
        exif.get_field(tag, In::PRIMARY)
            .and_then(|f| parse_exif_datetime(&f.display_value().to_string()))
    });

    ExifData {
        datetime,
        camera: ascii_value(&exif, Tag::Model),
        lens: ascii_value(&exif, Tag::LensModel),
        exposure_time: rational_value(&exif, Tag::ExposureTime).map(format_exposure_time),
        aperture: rational_value(&exif, Tag::FNumber)
            .map(|r| r.to_f64())
            .map(format_aperture),
        focal_length: rational_value(&exif, Tag::FocalLength)
            .map(|r| r.to_f64())
            .map(format_focal_length),
        iso: short_value(&exif, Tag::PhotographicSensitivity).map(|n| format!("ISO {n}")),
        gps: read_gps(&exif),
    }
}

/// Parse an EXIF datetime string, format "YYYY:MM:DD HH:MM:SS".
fn parse_exif_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim().trim_matches('"');
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y:%m:%d %H:%M:%S") {
        return Some(dt);
    }
    // Some firmware writes ISO-style separators
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok()
}

fn ascii_value(exif: &exif::Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let text = field
        .display_value()
        .to_string()
        .trim()
        .trim_matches('"')
        .trim()
        .to_string();
    if text.is_empty() { None } else { Some(text) }
}

fn rational_value(exif: &exif::Exif, tag: Tag) -> Option<Rational> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match &field.value {
        Value::Rational(v) => v.first().copied().filter(|r| r.denom != 0),
        _ => None,
    }
}

fn short_value(exif: &exif::Exif, tag: Tag) -> Option<u16> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match &field.value {
        Value::Short(v) => v.first().copied(),
        _ => None,
    }
}

/// Format an exposure time for display.
///
/// Slow exposures (≥ 0.3s) read as decimal seconds with trailing `.0`
/// dropped; faster ones as the conventional `1/N` fraction.
pub fn format_exposure_time(value: Rational) -> String {
    let secs = value.to_f64();
    if secs >= 0.3 {
        format!("{}s", trim_float(secs))
    } else if value.num == 1 {
        format!("1/{}s", value.denom)
    } else {
        format!("1/{}s", (1.0 / secs).round() as u32)
    }
}

/// Format an f-number for display: `f/2.8`, `f/8` (no trailing `.0`).
pub fn format_aperture(f_number: f64) -> String {
    format!("f/{}", trim_float(f_number))
}

/// Format a focal length for display: `23mm`, `105.5mm`.
pub fn format_focal_length(mm: f64) -> String {
    format!("{}mm", trim_float(mm))
}

/// Render a float without a trailing `.0`, one decimal place otherwise.
fn trim_float(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{}", v.round() as i64)
    } else {
        format!("{:.1}", v)
    }
}

/// Extract GPS coordinates as decimal degrees, if all four tags are present.
fn read_gps(exif: &exif::Exif) -> Option<(f64, f64)> {
    let lat_ref = ascii_value(exif, Tag::GPSLatitudeRef)?;
    let lon_ref = ascii_value(exif, Tag::GPSLongitudeRef)?;
    let lat = dms_field(exif, Tag::GPSLatitude)?;
    let lon = dms_field(exif, Tag::GPSLongitude)?;
    Some((
        dms_to_decimal(&lat, &lat_ref)?,
        dms_to_decimal(&lon, &lon_ref)?,
    ))
}

fn dms_field(exif: &exif::Exif, tag: Tag) -> Option<Vec<Rational>> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match &field.value {
        Value::Rational(v) if v.len() >= 3 => Some(v.clone()),
        _ => None,
    }
}

/// Convert a degrees/minutes/seconds rational triple to decimal degrees,
/// negated for southern latitudes and western longitudes.
pub fn dms_to_decimal(dms: &[Rational], direction: &str) -> Option<f64> {
    if dms.len() < 3 || dms[0].denom == 0 {
        return None;
    }
    let degrees = dms[0].to_f64();
    let minutes = if dms[1].denom != 0 { dms[1].to_f64() } else { 0.0 };
    let seconds = if dms[2].denom != 0 { dms[2].to_f64() } else { 0.0 };

    let mut coord = degrees + minutes / 60.0 + seconds / 3600.0;
    if direction == "S" || direction == "W" {
        coord = -coord;
    }
    Some(coord)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use std::fs;
    use tempfile::TempDir;

    fn rational(num: u32, denom: u32) -> Rational {
        Rational { num, denom }
    }

    #[test]
    fn parse_standard_exif_datetime() {
        let dt = parse_exif_datetime("2014:12:27 15:43:55").unwrap();
        assert_eq!(dt.year(), 2014);
        assert_eq!(dt.month(), 12);
        assert_eq!(dt.day(), 27);
        assert_eq!(dt.hour(), 15);
        assert_eq!(dt.second(), 55);
    }

    #[test]
    fn parse_quoted_exif_datetime() {
        assert!(parse_exif_datetime("\"2014:12:27 15:43:55\"").is_some());
    }

    #[test]
    fn parse_iso_separator_datetime() {
        assert!(parse_exif_datetime("2014-12-27 15:43:55").is_some());
    }

    #[test]
    fn parse_garbage_datetime_is_none() {
        assert!(parse_exif_datetime("not a date").is_none());
        assert!(parse_exif_datetime("").is_none());
    }

    #[test]
    fn exposure_fast_shutter_as_fraction() {
        assert_eq!(format_exposure_time(rational(1, 250)), "1/250s");
        assert_eq!(format_exposure_time(rational(1, 4000)), "1/4000s");
    }

    #[test]
    fn exposure_non_unit_numerator_normalized() {
        // 10/2500 = 1/250
        assert_eq!(format_exposure_time(rational(10, 2500)), "1/250s");
    }

    #[test]
    fn exposure_slow_shutter_as_seconds() {
        assert_eq!(format_exposure_time(rational(2, 1)), "2s");
        assert_eq!(format_exposure_time(rational(1, 2)), "0.5s");
        assert_eq!(format_exposure_time(rational(30, 1)), "30s");
    }

    #[test]
    fn aperture_drops_trailing_zero() {
        assert_eq!(format_aperture(8.0), "f/8");
        assert_eq!(format_aperture(2.8), "f/2.8");
    }

    #[test]
    fn focal_length_drops_trailing_zero() {
        assert_eq!(format_focal_length(23.0), "23mm");
        assert_eq!(format_focal_length(105.5), "105.5mm");
    }

    #[test]
    fn dms_north_east_positive() {
        // 48° 51' 29.6" N
        let dms = [rational(48, 1), rational(51, 1), rational(296, 10)];
        let dec = dms_to_decimal(&dms, "N").unwrap();
        assert!((dec - 48.858222).abs() < 1e-4);
    }

    #[test]
    fn dms_south_west_negative() {
        let dms = [rational(33, 1), rational(51, 1), rational(0, 1)];
        assert!(dms_to_decimal(&dms, "S").unwrap() < 0.0);
        assert!(dms_to_decimal(&dms, "W").unwrap() < 0.0);
    }

    #[test]
    fn dms_zero_denominator_degrees_is_none() {
        let dms = [rational(48, 0), rational(51, 1), rational(0, 1)];
        assert_eq!(dms_to_decimal(&dms, "N"), None);
    }

    #[test]
    fn dms_zero_denominator_minutes_treated_as_zero() {
        let dms = [rational(48, 1), rational(51, 0), rational(0, 1)];
        assert_eq!(dms_to_decimal(&dms, "N"), Some(48.0));
    }

    #[test]
    fn dms_too_short_is_none() {
        assert_eq!(dms_to_decimal(&[rational(48, 1)], "N"), None);
    }

    #[test]
    fn unreadable_file_degrades_to_empty() {
        let data = read_photo_exif(Path::new("/nonexistent/photo.jpg"));
        assert!(data.is_empty());
    }

    #[test]
    fn file_without_exif_degrades_to_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("2021-06-01-fake.jpg");
        fs::write(&path, b"not actually a jpeg").unwrap();

        let data = read_photo_exif(&path);
        assert!(data.is_empty());
        assert_eq!(data.datetime, None);
        assert_eq!(data.gps, None);
    }
}
