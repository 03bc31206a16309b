//! # Pictura
//!
//! A static site generator for personal photo journals. Your filesystem is
//! the data source: one flat directory of photos named
//! `YYYY-MM-DD-title.ext`, nothing else. The filename carries everything the
//! gallery needs — the date groups photos into days, the title becomes the
//! caption, and a reserved marker word (`small` by default) opts a photo out
//! of the resized/lightbox treatment.
//!
//! # Architecture: One Pass, Five Stages
//!
//! A build is a single sequential pass:
//!
//! ```text
//! 1. Scan     pictures/  →  photo records    (filenames parsed, EXIF read)
//! 2. Resize   records    →  output/pictures/ (originals + downscaled copies)
//! 3. Model    records    →  gallery model    (global order, day groups, pages)
//! 4. Render   model      →  output/*.html    (index pages, photo pages, all.html)
//! 5. Feed     model      →  output/feed.xml  (RSS 2.0, most recent photos)
//! ```
//!
//! Each stage takes the immutable [`config::Config`] explicitly; nothing
//! reads ambient global settings. A malformed filename or a broken image
//! excludes that one photo and lands in the skip report — the rest of the
//! gallery still ships. Only rendering failures and an unwritable output
//! directory abort a build; even a feed failure is just a warning.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | `YYYY-MM-DD-title.ext` filename convention parser |
//! | [`exif`] | Best-effort capture metadata extraction (camera, exposure, GPS) |
//! | [`scan`] | Walks the source directory, produces photo records + skip report |
//! | [`resize`] | Downscaled copies with an mtime-based cache; copies originals |
//! | [`model`] | Global gallery ordering, day grouping, pagination |
//! | [`render`] | Maud HTML rendering: index pages, photo pages, `all.html` |
//! | [`feed`] | RSS 2.0 `feed.xml` with absolute links |
//! | [`config`] | `pictura.toml` loading and validation |
//! | [`output`] | CLI report formatting |
//!
//! # Design Decisions
//!
//! ## Filenames Over Databases
//!
//! The photo's filename is the single source of truth for its date and
//! title. EXIF is read, but only as supplementary display data — a capture
//! datetime never moves a photo to a different day. Renaming a file is the
//! complete editing workflow; there is no sidecar state to keep in sync.
//!
//! ## The mtime Cache
//!
//! Resized copies live next to the originals in `output/pictures/` under a
//! derived name (`2021-06-01-sunset-small.jpg`). A derived file that exists
//! and is at least as new as its source is reused, so a rebuild of an
//! unchanged gallery decodes zero images. No manifest, no hash store; the
//! output tree itself is the cache.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Malformed markup is a build error, interpolation is
//! auto-escaped, and there is no template directory to ship or get out of
//! sync. The stylesheet is embedded into every page at compile time, so the
//! output is self-contained HTML plus images and works straight off the
//! filesystem.

pub mod config;
pub mod exif;
pub mod feed;
pub mod model;
pub mod naming;
pub mod output;
pub mod render;
pub mod resize;
pub mod scan;
