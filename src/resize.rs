//! Image resizing and the on-disk resize cache.
//!
//! For every record the stage copies the original into `pictures/` inside
//! the output directory (the site must be self-contained), and, when the
//! photo's longest edge exceeds the configured threshold, writes an
//! aspect-preserving Lanczos3 downscale next to it. The resized copy gets a
//! deterministic derived name — `<stem>-<marker>.<ext>` — so reruns can
//! detect it and skip the work: a derived file that exists and is at least
//! as new as its source is a cache hit. The cache is the only state that
//! survives between runs.
//!
//! Photos flagged by the marker word are never resized; they are meant to
//! ship as-is, without the lightbox treatment.
//!
//! Per-file decode or encode failures exclude that photo from the gallery
//! (shipping the oversized original as a substitute would defeat the
//! threshold) and are reported. Failures writing to the output directory
//! abort the run.

use crate::config::Config;
use crate::model::PhotoRecord;
use crate::scan::{SkipReason, SkippedFile};
use image::imageops::FilterType;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Whole-run failures of the resize stage. Per-file image errors are
/// reported through the skip list instead.
#[derive(Error, Debug)]
pub enum ResizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Counts of what the stage did, in the spirit of a cache report.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ResizeStats {
    /// Downscaled copies actually encoded this run.
    pub resized: u32,
    /// Resized copies already up to date on disk (cache hits).
    pub cached: u32,
    /// Photos at or under the threshold (or marker-flagged) — no copy made.
    pub unresized: u32,
    /// Originals copied into the output tree this run.
    pub copied: u32,
}

impl fmt::Display for ResizeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} resized, {} cached, {} under threshold",
            self.resized, self.cached, self.unresized
        )
    }
}

/// Output of [`prepare_pictures`].
#[derive(Debug)]
pub struct PrepareResult {
    /// Records that survived, with `resized_path` filled in where a copy
    /// exists. Records are final after this stage.
    pub records: Vec<PhotoRecord>,
    pub stats: ResizeStats,
    pub skipped: Vec<SkippedFile>,
}

/// Copy originals and produce resized copies for all records.
///
/// Writes into `<output_dir>/pictures/`. Idempotent: a second run over an
/// unchanged tree performs zero decodes and zero copies.
pub fn prepare_pictures(
    records: Vec<PhotoRecord>,
    output_dir: &Path,
    config: &Config,
) -> Result<PrepareResult, ResizeError> {
    let pictures_dir = output_dir.join("pictures");
    fs::create_dir_all(&pictures_dir)?;

    let mut kept = Vec::with_capacity(records.len());
    let mut stats = ResizeStats::default();
    let mut skipped = Vec::new();

    for mut record in records {
        // Decode failures surface here, before anything is written
        let dims = match image::image_dimensions(&record.source_path) {
            Ok(d) => d,
            Err(e) => {
                skipped.push(SkippedFile {
                    file_name: record.file_name.clone(),
                    reason: SkipReason::DecodeFailure(e.to_string()),
                });
                continue;
            }
        };

        let original_dest = pictures_dir.join(&record.file_name);
        let copied = !is_up_to_date(&record.source_path, &original_dest);
        if copied {
            fs::copy(&record.source_path, &original_dest)?;
            stats.copied += 1;
        }

        if record.suppress_lightbox || !needs_resize(dims, config.resize_threshold) {
            stats.unresized += 1;
            kept.push(record);
            continue;
        }

        let derived_name = resized_file_name(&record.file_name, &config.small_image_marker);
        let derived_dest = pictures_dir.join(&derived_name);

        if is_up_to_date(&record.source_path, &derived_dest) {
            stats.cached += 1;
        } else {
            let (w, h) = scaled_dimensions(dims, config.resize_threshold);
            let result = image::open(&record.source_path)
                .map(|img| img.resize_exact(w, h, FilterType::Lanczos3))
                .and_then(|img| img.save(&derived_dest));
            if let Err(e) = result {
                // An excluded photo must not leave its oversized original
                // behind in the output tree
                fs::remove_file(&original_dest)?;
                if copied {
                    stats.copied -= 1;
                }
                skipped.push(SkippedFile {
                    file_name: record.file_name.clone(),
                    reason: SkipReason::ResizeFailure(e.to_string()),
                });
                continue;
            }
            stats.resized += 1;
        }

        record.resized_path = Some(format!("pictures/{derived_name}"));
        kept.push(record);
    }

    Ok(PrepareResult {
        records: kept,
        stats,
        skipped,
    })
}

/// Whether an image's longest edge exceeds the threshold.
pub fn needs_resize(dims: (u32, u32), threshold: u32) -> bool {
    dims.0.max(dims.1) > threshold
}

/// Dimensions of the downscale: longest edge becomes `max_edge`, the other
/// scales to preserve aspect ratio.
pub fn scaled_dimensions(dims: (u32, u32), max_edge: u32) -> (u32, u32) {
    let (w, h) = dims;
    if w >= h {
        let ratio = max_edge as f64 / w as f64;
        (max_edge, (h as f64 * ratio).round().max(1.0) as u32)
    } else {
        let ratio = max_edge as f64 / h as f64;
        ((w as f64 * ratio).round().max(1.0) as u32, max_edge)
    }
}

/// Derived name of a resized copy: `2021-06-01-sunset.jpg` →
/// `2021-06-01-sunset-small.jpg` (with the configured marker word).
pub fn resized_file_name(file_name: &str, marker: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}-{marker}.{ext}"),
        None => format!("{file_name}-{marker}"),
    }
}

/// Cache check: the derived file exists and is at least as new as the
/// source. Any metadata error counts as stale.
pub fn is_up_to_date(source: &Path, derived: &Path) -> bool {
    let source_mtime = match source.metadata().and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(_) => return false,
    };
    match derived.metadata().and_then(|m| m.modified()) {
        Ok(t) => t >= source_mtime,
        Err(_) => false,
    }
}
