//! Static HTML rendering.
//!
//! Takes the finished [`GalleryModel`](crate::model::GalleryModel) and writes
//! the whole site into the output directory:
//!
//! - **Index pages** (`index.html`, `index2.html`, ...): photos grouped by
//!   day, newest first, with newer/older pagination links
//! - **Photo pages** (`{stem}.html`): one page per photo with its capture
//!   metadata and previous/next navigation in gallery order
//! - **All page** (`all.html`): a compact chronological listing of every
//!   photo for browsing the whole archive at once
//!
//! Pages only ever link relatively, so the site works from any mount point
//! and straight off the filesystem. Rendering is deterministic: the same
//! model produces byte-identical pages. Any write failure aborts the run.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating
//! with automatic escaping. The stylesheet is embedded at compile time and
//! inlined into every page.

use crate::config::Config;
use crate::model::{GalleryModel, PhotoRecord};
use chrono::NaiveDate;
use maud::{html, Markup, DOCTYPE};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What the render stage wrote.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub index_pages: u32,
    pub photo_pages: u32,
}

const CSS: &str = include_str!("../static/style.css");

/// Render the whole site into `output_dir`.
pub fn render_site(
    model: &GalleryModel,
    config: &Config,
    output_dir: &Path,
) -> Result<RenderSummary, RenderError> {
    fs::create_dir_all(output_dir)?;

    let mut summary = RenderSummary::default();

    let pages = model.pages(config.page_size);
    let page_count = pages.len();
    for (idx, page) in pages.iter().enumerate() {
        let markup = render_index_page(page, idx, page_count, config);
        fs::write(output_dir.join(index_file_name(idx)), markup.into_string())?;
        summary.index_pages += 1;
    }

    let markup = render_all_page(model, config);
    fs::write(output_dir.join("all.html"), markup.into_string())?;

    let records = model.records();
    for (idx, record) in records.iter().enumerate() {
        let prev = idx.checked_sub(1).and_then(|i| records.get(i));
        let next = records.get(idx + 1);
        let markup = render_photo_page(record, prev, next, config);
        fs::write(output_dir.join(record.page_name()), markup.into_string())?;
        summary.photo_pages += 1;
    }

    Ok(summary)
}

/// Filename of the nth index page: `index.html`, `index2.html`, ...
pub fn index_file_name(page_idx: usize) -> String {
    if page_idx == 0 {
        "index.html".to_string()
    } else {
        format!("index{}.html", page_idx + 1)
    }
}

/// Human date heading: "June 1, 2021".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="alternate" type="application/rss+xml" href="feed.xml";
                style { (CSS) }
            }
            body {
                (content)
            }
        }
    }
}

/// Site header shared by every page: title linking home, archive and feed links.
fn site_header(config: &Config) -> Markup {
    html! {
        header.site-header {
            h1.site-title { a href="index.html" { (config.site.title) } }
            nav.site-nav {
                a href="all.html" { "all photos" }
                " · "
                a href="feed.xml" { "feed" }
            }
        }
    }
}

/// One inline photo entry, linking to its detail page.
fn photo_figure(record: &PhotoRecord) -> Markup {
    html! {
        figure.photo {
            a href=(record.page_name()) {
                img src=(record.display_href()) alt=(record.title) loading="lazy";
            }
            @if !record.title.is_empty() {
                figcaption { (record.title) }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders one paginated index page with day-grouped photos.
fn render_index_page(
    records: &[PhotoRecord],
    page_idx: usize,
    page_count: usize,
    config: &Config,
) -> Markup {
    let days = crate::model::group_by_date(records);

    let content = html! {
        (site_header(config))
        main.index-page {
            @if records.is_empty() {
                p.empty { "No photos yet." }
            }
            @for day in &days {
                section.day {
                    h2.day-heading { (format_date(day.date)) }
                    @for record in day.photos {
                        (photo_figure(record))
                    }
                }
            }
            nav.pagination {
                @if page_idx > 0 {
                    a.newer href=(index_file_name(page_idx - 1)) { "← newer" }
                }
                @if page_idx + 1 < page_count {
                    a.older href=(index_file_name(page_idx + 1)) { "older →" }
                }
            }
        }
    };

    base_document(&config.site.title, content)
}

/// Renders the single-page chronological listing of every photo.
fn render_all_page(model: &GalleryModel, config: &Config) -> Markup {
    let title = format!("All photos - {}", config.site.title);

    let content = html! {
        (site_header(config))
        main.all-page {
            h2 { "All photos" }
            ul.all-list {
                @for record in model.records() {
                    li {
                        span.all-date { (record.date.format("%Y-%m-%d")) }
                        " "
                        a href=(record.page_name()) {
                            @if record.title.is_empty() {
                                "untitled"
                            } @else {
                                (record.title)
                            }
                        }
                    }
                }
            }
        }
    };

    base_document(&title, content)
}

/// Renders one photo's detail page.
fn render_photo_page(
    record: &PhotoRecord,
    prev: Option<&PhotoRecord>,
    next: Option<&PhotoRecord>,
    config: &Config,
) -> Markup {
    let heading = if record.title.is_empty() {
        format_date(record.date)
    } else {
        record.title.clone()
    };
    let title = format!("{} - {}", heading, config.site.title);

    // Lightbox: the inline image links to the full-size original, but only
    // when a smaller copy is actually being shown in its place
    let lightbox = !record.suppress_lightbox && record.resized_path.is_some();

    let image = html! {
        img src=(record.display_href()) alt=(record.title);
    };

    let content = html! {
        (site_header(config))
        main.photo-page {
            figure.photo-full {
                @if lightbox {
                    a.lightbox href=(record.original_href()) { (image) }
                } @else {
                    (image)
                }
            }
            h2.photo-title { (heading) }
            p.photo-date { (format_date(record.date)) }
            (exif_block(record))
            nav.photo-nav {
                @if let Some(p) = prev {
                    a.newer href=(p.page_name()) { "← newer" }
                }
                a.up href="index.html" { "index" }
                @if let Some(n) = next {
                    a.older href=(n.page_name()) { "older →" }
                }
            }
        }
    };

    base_document(&title, content)
}

/// Capture metadata list; renders nothing when no EXIF was recovered.
fn exif_block(record: &PhotoRecord) -> Markup {
    let exif = &record.exif;
    if exif.is_empty() {
        return html! {};
    }

    html! {
        ul.exif {
            @if let Some(camera) = &exif.camera {
                li.exif-camera { (camera) }
            }
            @if let Some(lens) = &exif.lens {
                li.exif-lens { (lens) }
            }
            @if let Some(focal_length) = &exif.focal_length {
                li { (focal_length) }
            }
            @if let Some(aperture) = &exif.aperture {
                li { (aperture) }
            }
            @if let Some(exposure) = &exif.exposure_time {
                li { (exposure) }
            }
            @if let Some(iso) = &exif.iso {
                li { (iso) }
            }
            @if let Some(dt) = &exif.datetime {
                li.exif-datetime { (dt.format("%Y-%m-%d %H:%M")) }
            }
            @if let Some((lat, lon)) = exif.gps {
                li.exif-gps { (format!("{:.5}, {:.5}", lat, lon)) }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exif::ExifData;
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn record(file_name: &str, date: (i32, u32, u32), title: &str) -> PhotoRecord {
        PhotoRecord {
            file_name: file_name.to_string(),
            source_path: PathBuf::from(format!("/photos/{file_name}")),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            title: title.to_string(),
            suppress_lightbox: false,
            exif: ExifData::default(),
            resized_path: None,
        }
    }

    #[test]
    fn index_file_names() {
        assert_eq!(index_file_name(0), "index.html");
        assert_eq!(index_file_name(1), "index2.html");
        assert_eq!(index_file_name(4), "index5.html");
    }

    #[test]
    fn date_formatting() {
        let date = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
        assert_eq!(format_date(date), "June 1, 2021");
    }

    #[test]
    fn base_document_includes_doctype_and_feed_link() {
        let doc = base_document("Test", html! { p { "x" } }).into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains(r#"href="feed.xml""#));
        assert!(doc.contains("<title>Test</title>"));
    }

    #[test]
    fn index_page_groups_by_day() {
        let records = vec![
            record("2021-06-02-b.jpg", (2021, 6, 2), "b"),
            record("2021-06-01-a.jpg", (2021, 6, 1), "a"),
        ];
        let html = render_index_page(&records, 0, 1, &Config::default()).into_string();
        assert!(html.contains("June 2, 2021"));
        assert!(html.contains("June 1, 2021"));
        // Newest heading first
        let june2 = html.find("June 2, 2021").unwrap();
        let june1 = html.find("June 1, 2021").unwrap();
        assert!(june2 < june1);
    }

    #[test]
    fn index_page_links_to_photo_pages() {
        let records = vec![record("2021-06-01-sunset.jpg", (2021, 6, 1), "sunset")];
        let html = render_index_page(&records, 0, 1, &Config::default()).into_string();
        assert!(html.contains(r#"href="2021-06-01-sunset.html""#));
        assert!(html.contains(r#"src="pictures/2021-06-01-sunset.jpg""#));
    }

    #[test]
    fn index_page_uses_resized_copy_when_present() {
        let mut r = record("2021-06-01-sunset.jpg", (2021, 6, 1), "sunset");
        r.resized_path = Some("pictures/2021-06-01-sunset-small.jpg".to_string());
        let html = render_index_page(&[r], 0, 1, &Config::default()).into_string();
        assert!(html.contains(r#"src="pictures/2021-06-01-sunset-small.jpg""#));
    }

    #[test]
    fn first_index_page_has_only_older_link() {
        let records = vec![record("2021-06-01-a.jpg", (2021, 6, 1), "a")];
        let html = render_index_page(&records, 0, 3, &Config::default()).into_string();
        assert!(!html.contains("newer"));
        assert!(html.contains(r#"href="index2.html""#));
    }

    #[test]
    fn middle_index_page_has_both_links() {
        let records = vec![record("2021-06-01-a.jpg", (2021, 6, 1), "a")];
        let html = render_index_page(&records, 1, 3, &Config::default()).into_string();
        assert!(html.contains(r#"href="index.html""#));
        assert!(html.contains(r#"href="index3.html""#));
    }

    #[test]
    fn last_index_page_has_only_newer_link() {
        let records = vec![record("2021-06-01-a.jpg", (2021, 6, 1), "a")];
        let html = render_index_page(&records, 2, 3, &Config::default()).into_string();
        assert!(html.contains(r#"href="index2.html""#));
        assert!(!html.contains("older"));
    }

    #[test]
    fn empty_index_page_renders_placeholder() {
        let html = render_index_page(&[], 0, 1, &Config::default()).into_string();
        assert!(html.contains("No photos yet."));
    }

    #[test]
    fn photo_page_lightbox_links_to_original() {
        let mut r = record("2021-06-01-sunset.jpg", (2021, 6, 1), "sunset");
        r.resized_path = Some("pictures/2021-06-01-sunset-small.jpg".to_string());
        let html = render_photo_page(&r, None, None, &Config::default()).into_string();
        assert!(html.contains(r#"href="pictures/2021-06-01-sunset.jpg""#));
        assert!(html.contains(r#"src="pictures/2021-06-01-sunset-small.jpg""#));
    }

    #[test]
    fn photo_page_no_lightbox_when_unresized() {
        let r = record("2021-06-01-tiny.jpg", (2021, 6, 1), "tiny");
        let html = render_photo_page(&r, None, None, &Config::default()).into_string();
        assert!(!html.contains("lightbox"));
        assert!(html.contains(r#"src="pictures/2021-06-01-tiny.jpg""#));
    }

    #[test]
    fn photo_page_no_lightbox_when_suppressed() {
        let mut r = record("2021-06-01-pano-small.jpg", (2021, 6, 1), "pano");
        r.suppress_lightbox = true;
        let html = render_photo_page(&r, None, None, &Config::default()).into_string();
        assert!(!html.contains("lightbox"));
    }

    #[test]
    fn photo_page_prev_next_navigation() {
        let newer = record("2021-06-03-c.jpg", (2021, 6, 3), "c");
        let older = record("2021-06-01-a.jpg", (2021, 6, 1), "a");
        let r = record("2021-06-02-b.jpg", (2021, 6, 2), "b");

        let html = render_photo_page(&r, Some(&newer), Some(&older), &Config::default())
            .into_string();
        assert!(html.contains(r#"href="2021-06-03-c.html""#));
        assert!(html.contains(r#"href="2021-06-01-a.html""#));
        assert!(html.contains(r#"href="index.html""#));
    }

    #[test]
    fn photo_page_untitled_falls_back_to_date() {
        let r = record("2021-06-01-small.jpg", (2021, 6, 1), "");
        let html = render_photo_page(&r, None, None, &Config::default()).into_string();
        assert!(html.contains("June 1, 2021"));
    }

    #[test]
    fn photo_page_shows_exif() {
        let mut r = record("2021-06-01-sunset.jpg", (2021, 6, 1), "sunset");
        r.exif.camera = Some("FUJIFILM X-T3".to_string());
        r.exif.aperture = Some("f/2.8".to_string());
        r.exif.iso = Some("ISO 160".to_string());
        r.exif.gps = Some((48.85822, 2.29450));

        let html = render_photo_page(&r, None, None, &Config::default()).into_string();
        assert!(html.contains("FUJIFILM X-T3"));
        assert!(html.contains("f/2.8"));
        assert!(html.contains("ISO 160"));
        assert!(html.contains("48.85822, 2.29450"));
    }

    #[test]
    fn photo_page_omits_exif_block_when_empty() {
        let r = record("2021-06-01-sunset.jpg", (2021, 6, 1), "sunset");
        let html = render_photo_page(&r, None, None, &Config::default()).into_string();
        assert!(!html.contains(r#"class="exif""#));
    }

    #[test]
    fn all_page_lists_everything() {
        let model = GalleryModel::new(vec![
            record("2021-06-01-a.jpg", (2021, 6, 1), "first walk"),
            record("2021-06-02-b.jpg", (2021, 6, 2), "second walk"),
        ]);
        let html = render_all_page(&model, &Config::default()).into_string();
        assert!(html.contains("first walk"));
        assert!(html.contains("second walk"));
        assert!(html.contains("2021-06-01"));
    }

    #[test]
    fn html_escaped_in_titles() {
        let r = record(
            "2021-06-01-x.jpg",
            (2021, 6, 1),
            "<script>alert('xss')</script>",
        );
        let html = render_photo_page(&r, None, None, &Config::default()).into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn render_site_writes_all_pages() {
        let out = TempDir::new().unwrap();
        let model = GalleryModel::new(vec![
            record("2021-06-01-a.jpg", (2021, 6, 1), "a"),
            record("2021-06-02-b.jpg", (2021, 6, 2), "b"),
            record("2021-06-03-c.jpg", (2021, 6, 3), "c"),
        ]);
        let config = Config {
            page_size: 2,
            ..Config::default()
        };

        let summary = render_site(&model, &config, out.path()).unwrap();
        assert_eq!(summary.index_pages, 2);
        assert_eq!(summary.photo_pages, 3);

        assert!(out.path().join("index.html").exists());
        assert!(out.path().join("index2.html").exists());
        assert!(out.path().join("all.html").exists());
        assert!(out.path().join("2021-06-01-a.html").exists());
        assert!(out.path().join("2021-06-02-b.html").exists());
        assert!(out.path().join("2021-06-03-c.html").exists());
    }

    #[test]
    fn render_site_empty_model_still_writes_index() {
        let out = TempDir::new().unwrap();
        let model = GalleryModel::new(vec![]);

        let summary = render_site(&model, &Config::default(), out.path()).unwrap();
        assert_eq!(summary.index_pages, 1);
        assert_eq!(summary.photo_pages, 0);
        assert!(out.path().join("index.html").exists());
        assert!(out.path().join("all.html").exists());
    }

    #[test]
    fn rendering_is_deterministic() {
        let make = || {
            GalleryModel::new(vec![
                record("2021-06-01-a.jpg", (2021, 6, 1), "a"),
                record("2021-06-02-b.jpg", (2021, 6, 2), "b"),
            ])
        };
        let out_a = TempDir::new().unwrap();
        let out_b = TempDir::new().unwrap();
        render_site(&make(), &Config::default(), out_a.path()).unwrap();
        render_site(&make(), &Config::default(), out_b.path()).unwrap();

        let a = std::fs::read(out_a.path().join("index.html")).unwrap();
        let b = std::fs::read(out_b.path().join("index.html")).unwrap();
        assert_eq!(a, b);
    }
}
