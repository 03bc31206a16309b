//! RSS feed generation.
//!
//! Writes `feed.xml` into the output directory: an RSS 2.0 channel carrying
//! the N most recent photos in gallery order. This is the one place absolute
//! URLs appear — item links are built from the configured `site.base_url`,
//! while the pages themselves only ever link relatively.
//!
//! The feed is serialized from plain structs via `serde-xml-rs`, with the
//! XML declaration prepended by hand. Feed failures are reported by the
//! caller as warnings; a broken feed never costs the rendered site.

use crate::config::Config;
use crate::model::{GalleryModel, PhotoRecord};
use chrono::{DateTime, NaiveTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML error: {0}")]
    Xml(#[from] serde_xml_rs::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename = "rss")]
struct Rss {
    #[serde(rename = "@version")]
    version: &'static str,
    channel: Channel,
}

#[derive(Debug, Serialize)]
struct Channel {
    title: String,
    link: String,
    description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    item: Vec<Item>,
}

#[derive(Debug, Serialize)]
struct Item {
    title: String,
    link: String,
    guid: String,
    #[serde(rename = "pubDate")]
    pub_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    description: String,
}

/// Write `feed.xml` with the most recent photos.
pub fn write_feed(
    model: &GalleryModel,
    config: &Config,
    output_dir: &Path,
) -> Result<(), FeedError> {
    let xml = feed_xml(model, config)?;
    fs::write(output_dir.join("feed.xml"), xml)?;
    Ok(())
}

/// Build the complete feed document as a string.
pub fn feed_xml(model: &GalleryModel, config: &Config) -> Result<String, FeedError> {
    let items = model
        .recent(config.feed_item_count)
        .iter()
        .map(|record| feed_item(record, config))
        .collect();

    let rss = Rss {
        version: "2.0",
        channel: Channel {
            title: config.site.title.clone(),
            link: config.site.base_url.clone(),
            description: config.site.title.clone(),
            item: items,
        },
    };

    let body = serde_xml_rs::to_string(&rss)?;
    Ok(format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>{body}"))
}

fn feed_item(record: &PhotoRecord, config: &Config) -> Item {
    let link = absolute_url(&config.site.base_url, &record.page_name());
    let image_url = absolute_url(&config.site.base_url, &record.display_href());
    let title = if record.title.is_empty() {
        record.date.format("%Y-%m-%d").to_string()
    } else {
        record.title.clone()
    };

    let author = if config.site.author.is_empty() {
        None
    } else {
        Some(config.site.author.clone())
    };

    Item {
        title,
        guid: link.clone(),
        link,
        pub_date: rfc2822_date(record),
        author,
        // Readers render the description as HTML; the serializer escapes it
        // into valid XML text for us
        description: format!("<img src=\"{image_url}\"/>"),
    }
}

/// Join the site base URL and a site-relative path.
fn absolute_url(base_url: &str, relative: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), relative)
}

/// RFC 2822 publication date at midnight UTC of the photo's gallery date.
fn rfc2822_date(record: &PhotoRecord) -> String {
    let naive = record.date.and_time(NaiveTime::MIN);
    DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc).to_rfc2822()
}
