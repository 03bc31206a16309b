//! Filesystem scanning: from a directory of images to photo records.
//!
//! Walks the source directory once, runs the filename parser and EXIF
//! extractor per file, and produces a [`ScanReport`]: the valid records
//! plus every rejected file with its reason. A malformed filename never
//! aborts the run and is never silently dropped — it lands in the skip
//! report for the operator.
//!
//! Entries are processed in sorted filename order so the report (and
//! everything downstream) is deterministic regardless of filesystem
//! iteration order. Hidden files and non-image extensions are ignored;
//! image-extension files and extensionless files are held to the naming
//! convention.

use crate::config::Config;
use crate::exif;
use crate::model::PhotoRecord;
use crate::naming::{self, FilenameError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Whole-run scan failures. Per-file problems go in the skip report instead.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("source is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Why a file was excluded from the gallery.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipReason {
    #[error("invalid filename: {0}")]
    InvalidFilename(#[from] FilenameError),
    #[error("image decode failed: {0}")]
    DecodeFailure(String),
    #[error("resize failed: {0}")]
    ResizeFailure(String),
}

/// One excluded file: filename plus reason, for the operator report.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFile {
    pub file_name: String,
    pub reason: SkipReason,
}

/// Result of the scan stage.
#[derive(Debug)]
pub struct ScanReport {
    /// Valid records, in sorted filename order. Not yet gallery-ordered —
    /// that happens in [`GalleryModel::new`](crate::model::GalleryModel::new).
    pub records: Vec<PhotoRecord>,
    pub skipped: Vec<SkippedFile>,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Scan the source directory into photo records.
pub fn scan(source: &Path, config: &Config) -> Result<ScanReport, ScanError> {
    if !source.is_dir() {
        return Err(ScanError::NotADirectory(source.to_path_buf()));
    }

    let mut entries: Vec<PathBuf> = fs::read_dir(source)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    entries.sort();

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for path in &entries {
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(n) => n.to_string(),
            None => continue,
        };
        if file_name.starts_with('.') || !holds_to_convention(&file_name) {
            continue;
        }

        match naming::parse_photo_filename(&file_name, &config.small_image_marker) {
            Ok(parsed) => records.push(PhotoRecord {
                file_name,
                source_path: path.clone(),
                date: parsed.date,
                title: parsed.title,
                suppress_lightbox: parsed.suppress_lightbox,
                exif: exif::read_photo_exif(path),
                resized_path: None,
            }),
            Err(reason) => skipped.push(SkippedFile {
                file_name,
                reason: reason.into(),
            }),
        }
    }

    Ok(ScanReport { records, skipped })
}

/// Whether a filename is subject to the naming convention.
///
/// Image extensions obviously are. Extensionless files are too, so that
/// they show up in the skip report rather than vanishing. Other extensions
/// (notes, sidecars) are none of our business.
fn holds_to_convention(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
        }
        _ => true,
    }
}
