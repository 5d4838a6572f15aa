use std::path::{Path, PathBuf};

use anyhow::Context;
use base64::Engine as _;

use crate::{
    foundation::error::{CarouselError, CarouselResult},
    model::slide::ImageSource,
};

/// Resolves [`ImageSource`] references to encoded bytes.
#[derive(Clone, Debug)]
pub struct SourceResolver {
    root: PathBuf,
}

impl SourceResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory relative image paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn read(&self, source: &ImageSource) -> CarouselResult<Vec<u8>> {
        match source {
            ImageSource::Path(p) => {
                let norm = normalize_rel_path(p)?;
                let path = self.root.join(Path::new(&norm));
                std::fs::read(&path)
                    .with_context(|| format!("read image bytes from '{}'", path.display()))
                    .map_err(CarouselError::from)
            }
            ImageSource::DataUrl(url) => decode_data_url(url),
            ImageSource::Bytes(b) => Ok(b.as_ref().clone()),
        }
    }
}

/// Normalize and validate assets-root-relative image paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> CarouselResult<String> {
    let s = source.trim().replace('\\', "/");
    if s.is_empty() {
        return Err(CarouselError::validation("image path must be non-empty"));
    }
    if s.starts_with('/') || has_drive_prefix(&s) {
        return Err(CarouselError::validation("image paths must be relative"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(CarouselError::validation("image paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(CarouselError::validation(
            "image path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

fn has_drive_prefix(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 2 && b[0].is_ascii_alphabetic() && b[1] == b':'
}

/// Decode a `data:[<mime>][;base64],<payload>` URL into its payload bytes.
pub fn decode_data_url(url: &str) -> CarouselResult<Vec<u8>> {
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| CarouselError::decode("data url must start with 'data:'"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| CarouselError::decode("data url has no ',' separator"))?;

    let is_base64 = meta
        .split(';')
        .any(|p| p.trim().eq_ignore_ascii_case("base64"));
    if is_base64 {
        let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        base64::engine::general_purpose::STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| CarouselError::decode(format!("invalid base64 in data url: {e}")))
    } else {
        // Malformed escapes are kept literally, as browsers do.
        Ok(percent_encoding::percent_decode_str(payload).collect())
    }
}

/// Media type a source declares about itself, lowercased.
///
/// `data:` URLs report their MIME (`data:image/svg+xml,...`), paths report `image/svg+xml` for
/// a `.svg` extension. Everything else is left to content sniffing.
pub fn declared_media_type(source: &ImageSource) -> Option<String> {
    match source {
        ImageSource::DataUrl(url) => {
            let meta = url.trim().strip_prefix("data:")?.split_once(',')?.0;
            let mime = meta.split(';').next()?.trim();
            (!mime.is_empty()).then(|| mime.to_ascii_lowercase())
        }
        ImageSource::Path(p) => Path::new(p.trim())
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| e.eq_ignore_ascii_case("svg"))
            .map(|_| "image/svg+xml".to_string()),
        ImageSource::Bytes(_) => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
