use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::{CarouselError, CarouselResult},
    render::slide::RenderedImage,
};

/// File naming for exported slides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOpts {
    /// File name prefix, `slide` gives `slide-01.png`.
    pub prefix: String,
    /// Also write `manifest.json`.
    pub manifest: bool,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            prefix: "slide".to_string(),
            manifest: true,
        }
    }
}

/// One exported file in `manifest.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub file: String,
    pub index: usize,
    pub width: u32,
    pub height: u32,
}

/// Contents of `manifest.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub slides: Vec<ManifestEntry>,
}

/// 1-based, zero-padded file name for the slide at `index` of `total`.
pub fn slide_file_name(prefix: &str, index: usize, total: usize) -> String {
    let digits = total.max(1).to_string().len().max(2);
    format!("{prefix}-{:0digits$}.png", index + 1)
}

/// Write each image as a PNG under `dir` (created if missing), in slice order.
///
/// Returns the written PNG paths.
pub fn write_pngs(
    images: &[RenderedImage],
    dir: impl AsRef<Path>,
    opts: &ExportOpts,
) -> CarouselResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if opts.prefix.is_empty() || opts.prefix.contains(['/', '\\']) {
        return Err(CarouselError::validation(
            "export prefix must be a non-empty file name",
        ));
    }
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output dir '{}'", dir.display()))?;

    let mut paths = Vec::with_capacity(images.len());
    let mut entries = Vec::with_capacity(images.len());
    for (pos, img) in images.iter().enumerate() {
        let file = slide_file_name(&opts.prefix, pos, images.len());
        let path = dir.join(&file);
        std::fs::write(&path, &img.png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), "wrote slide");
        entries.push(ManifestEntry {
            file,
            index: img.index,
            width: img.width,
            height: img.height,
        });
        paths.push(path);
    }

    if opts.manifest {
        let manifest = Manifest { slides: entries };
        let json = serde_json::to_string_pretty(&manifest)
            .map_err(|e| CarouselError::serde(e.to_string()))?;
        let path = dir.join("manifest.json");
        std::fs::write(&path, json)
            .with_context(|| format!("write manifest '{}'", path.display()))?;
    }

    Ok(paths)
}

#[cfg(test)]
#[path = "../tests/unit/export.rs"]
mod tests;
