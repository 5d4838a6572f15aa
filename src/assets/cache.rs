use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use usvg::fontdb;

use crate::{
    assets::decode::{DecodeOpts, PreparedGraphic, decode_graphic},
    assets::source::{SourceResolver, declared_media_type, normalize_rel_path},
    foundation::error::{CarouselError, CarouselResult},
    foundation::math::Fnv1a64,
    model::slide::ImageSource,
};

/// Decode-once cache for background and logo images.
///
/// Both successes and failures are cached, so a logo that fails to load is reported once per
/// renderer instead of once per slide.
#[derive(Debug)]
pub struct AssetCache {
    resolver: SourceResolver,
    svg_fontdb: Arc<fontdb::Database>,
    entries: HashMap<String, Result<PreparedGraphic, String>>,
    decode_counts: HashMap<String, u32>,
}

impl AssetCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            resolver: SourceResolver::new(root),
            svg_fontdb: Arc::new(fontdb::Database::new()),
            entries: HashMap::new(),
            decode_counts: HashMap::new(),
        }
    }

    /// Font database handed to SVG documents for their `<text>` elements.
    pub fn with_svg_fonts(mut self, db: Arc<fontdb::Database>) -> Self {
        self.svg_fontdb = db;
        self
    }

    /// Stable cache key for `source`.
    pub fn key_for(&self, source: &ImageSource) -> String {
        match source {
            ImageSource::Path(p) => match normalize_rel_path(p) {
                Ok(norm) => format!("path:{norm}"),
                Err(_) => format!("path-raw:{p}"),
            },
            ImageSource::DataUrl(u) => {
                format!("data:{:016x}:{}", Fnv1a64::hash(u.as_bytes()), u.len())
            }
            ImageSource::Bytes(b) => format!("bytes:{:016x}:{}", Fnv1a64::hash(b), b.len()),
        }
    }

    /// Load and decode `source`, reusing the cached outcome when present.
    pub fn get_or_load(&mut self, source: &ImageSource) -> CarouselResult<PreparedGraphic> {
        let key = self.key_for(source);
        if let Some(entry) = self.entries.get(&key) {
            return entry.clone().map_err(CarouselError::decode);
        }

        *self.decode_counts.entry(key.clone()).or_insert(0) += 1;
        let opts = DecodeOpts {
            svg_fontdb: Arc::clone(&self.svg_fontdb),
            media_type: declared_media_type(source),
        };
        let loaded = self
            .resolver
            .read(source)
            .and_then(|bytes| decode_graphic(&bytes, &opts));
        let entry = loaded.map_err(|e| match e {
            CarouselError::Decode(msg) => msg,
            other => other.to_string(),
        });
        self.entries.insert(key, entry.clone());
        entry.map_err(CarouselError::decode)
    }

    /// Number of times `source` was actually read and decoded.
    pub fn decode_count(&self, source: &ImageSource) -> u32 {
        self.decode_counts
            .get(&self.key_for(source))
            .copied()
            .unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.decode_counts.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/cache.rs"]
mod tests;
