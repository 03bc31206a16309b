//! Photo records and the gallery model.
//!
//! [`PhotoRecord`] is the structured form of one input photo, built from the
//! filename parse plus EXIF extraction and finalized by the resize stage.
//! [`GalleryModel`] owns every valid record in a single globally sorted
//! order and hands out the read-only views the renderer and feed generator
//! consume: all records, day groups, page chunks, and the most-recent-N
//! slice.
//!
//! Ordering is deterministic for any filesystem iteration order: date
//! descending, ties broken by filename ascending.

use crate::exif::ExifData;
use chrono::NaiveDate;
use std::path::PathBuf;

/// One entry per valid input photo. Immutable once the resize stage has
/// filled in `resized_path`.
#[derive(Debug, Clone)]
pub struct PhotoRecord {
    /// Original filename, e.g. `2021-06-01-sunset.jpg`. Doubles as the
    /// deterministic tie-break key within a date.
    pub file_name: String,
    /// Location of the original file in the source directory.
    pub source_path: PathBuf,
    /// Grouping date from the filename prefix. EXIF never overrides this.
    pub date: NaiveDate,
    /// Display title from the filename, marker word stripped.
    pub title: String,
    /// Render without the resized/lightbox treatment.
    pub suppress_lightbox: bool,
    /// Supplementary capture metadata, best-effort.
    pub exif: ExifData,
    /// Site-relative path of the resized copy, set by the resize stage only
    /// when the original exceeded the threshold.
    pub resized_path: Option<String>,
}

impl PhotoRecord {
    /// Filename without its extension; used for page names.
    pub fn stem(&self) -> &str {
        self.file_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.file_name)
    }

    /// Output filename of this photo's detail page.
    pub fn page_name(&self) -> String {
        format!("{}.html", self.stem())
    }

    /// Site-relative path of the copied original.
    pub fn original_href(&self) -> String {
        format!("pictures/{}", self.file_name)
    }

    /// Site-relative path of the image to show inline: the resized copy
    /// when one exists, the original otherwise.
    pub fn display_href(&self) -> String {
        self.resized_path
            .clone()
            .unwrap_or_else(|| self.original_href())
    }
}

/// Run of records sharing one calendar date.
#[derive(Debug)]
pub struct DayGroup<'a> {
    pub date: NaiveDate,
    pub photos: &'a [PhotoRecord],
}

/// Ordered, grouped collection of all valid photo records.
#[derive(Debug)]
pub struct GalleryModel {
    records: Vec<PhotoRecord>,
}

impl GalleryModel {
    /// Build the model from the surviving records of the scan and resize
    /// stages. Imposes the global order; the input order does not matter.
    pub fn new(mut records: Vec<PhotoRecord>) -> Self {
        records.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| a.file_name.cmp(&b.file_name))
        });
        Self { records }
    }

    /// All records, newest date first.
    pub fn records(&self) -> &[PhotoRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consecutive same-date runs, preserving the global order.
    pub fn days(&self) -> Vec<DayGroup<'_>> {
        group_by_date(&self.records)
    }

    /// The `n` most recent records (fewer if the gallery is smaller).
    pub fn recent(&self, n: usize) -> &[PhotoRecord] {
        &self.records[..n.min(self.records.len())]
    }

    /// Fixed-size page chunks for the paginated index. Always yields at
    /// least one (possibly empty) page so an empty gallery still renders
    /// an index.
    pub fn pages(&self, size: usize) -> Vec<&[PhotoRecord]> {
        if self.records.is_empty() {
            return vec![&self.records[..]];
        }
        self.records.chunks(size.max(1)).collect()
    }
}

/// Group a date-sorted slice into consecutive same-date runs.
pub fn group_by_date(records: &[PhotoRecord]) -> Vec<DayGroup<'_>> {
    let mut groups = Vec::new();
    let mut start = 0;
    for i in 1..=records.len() {
        if i == records.len() || records[i].date != records[start].date {
            groups.push(DayGroup {
                date: records[start].date,
                photos: &records[start..i],
            });
            start = i;
        }
    }
    groups
}
