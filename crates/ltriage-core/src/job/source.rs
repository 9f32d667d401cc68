//! Media references for an entity, as handed over by the scrape layer.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Media of one entity, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityMedia {
    /// Still images, fetched through the retry worker.
    pub images: Vec<String>,
    /// Primary media (videos), deferred for out-of-band handling.
    pub primary: Vec<String>,
}

/// Where an entity's media references come from.
pub trait MediaSource {
    fn media_for(&self, entity: &str, entity_dir: &Path) -> Result<EntityMedia>;
}

/// Scrape output file the manifest source reads in each entity directory.
pub const MANIFEST_FILE: &str = "tweets.json";

/// Reads `<entity dir>/tweets.json`, a JSON array of scraped records.
/// Only `img_urls` and `video_url` are looked at.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonManifestSource;

#[derive(Debug, Deserialize)]
struct ScrapedRecord {
    #[serde(default)]
    img_urls: Vec<String>,
    #[serde(default)]
    video_url: Option<String>,
}

impl MediaSource for JsonManifestSource {
    fn media_for(&self, entity: &str, entity_dir: &Path) -> Result<EntityMedia> {
        let path = entity_dir.join(MANIFEST_FILE);
        let data =
            fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        let records: Vec<ScrapedRecord> = serde_json::from_str(&data)
            .with_context(|| format!("parse {} for {}", path.display(), entity))?;

        let mut media = EntityMedia::default();
        for record in records {
            media.images.extend(record.img_urls);
            if let Some(video) = record.video_url.filter(|v| !v.is_empty()) {
                media.primary.push(video);
            }
        }
        Ok(media)
    }
}
