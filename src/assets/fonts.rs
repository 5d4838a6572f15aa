use std::{path::Path, sync::Arc};

use usvg::fontdb;

use crate::foundation::error::{CarouselError, CarouselResult};

/// Font bytes for one resolved face.
#[derive(Clone)]
pub struct FontFace {
    /// Primary family name reported by the font.
    pub family: String,
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside a collection file (`.ttc`), `0` otherwise.
    pub index: u32,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.family)
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .finish()
    }
}

/// Font discovery over system fonts and user font directories.
pub struct FontLibrary {
    db: Arc<fontdb::Database>,
}

impl std::fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontLibrary")
            .field("faces", &self.db.len())
            .finish()
    }
}

impl FontLibrary {
    /// Build a library from system fonts (optional) plus every `.ttf`/`.otf`/`.ttc` in `dirs`.
    pub fn new<P: AsRef<Path>>(system_fonts: bool, dirs: &[P]) -> Self {
        let mut db = fontdb::Database::new();
        if system_fonts {
            db.load_system_fonts();
        }
        for dir in dirs {
            load_fonts_from_dir(&mut db, dir.as_ref());
        }
        tracing::debug!(faces = db.len(), "font library ready");
        Self { db: Arc::new(db) }
    }

    /// An empty library; fonts can be added with [`FontLibrary::add_font_data`].
    pub fn empty() -> Self {
        Self {
            db: Arc::new(fontdb::Database::new()),
        }
    }

    pub fn add_font_data(&mut self, bytes: Vec<u8>) {
        Arc::make_mut(&mut self.db).load_font_data(bytes);
    }

    /// Shared handle to the underlying database, used when parsing SVG text.
    pub fn database(&self) -> Arc<fontdb::Database> {
        Arc::clone(&self.db)
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    /// Resolve the bold face for a CSS-style family list such as `"Roboto, sans-serif"`.
    ///
    /// Falls back to the generic sans-serif family and then to any face at all; substitutions are
    /// logged. Fails only when the library holds no usable face.
    pub fn resolve_bold(&self, family_list: &str) -> CarouselResult<FontFace> {
        let names = parse_family_list(family_list);
        for name in &names {
            let family = to_fontdb_family(name);
            if let Some(face) = self.query(&[family]) {
                return Ok(face);
            }
        }

        tracing::warn!(requested = family_list, "font family not found, using sans-serif");
        if let Some(face) = self.query(&[fontdb::Family::SansSerif]) {
            return Ok(face);
        }

        let fallback = self.db.faces().next().map(|f| f.id);
        if let Some(face) = fallback.and_then(|id| self.load_face(id)) {
            tracing::warn!(requested = family_list, using = %face.family, "no sans-serif face available");
            return Ok(face);
        }

        Err(CarouselError::font(format!(
            "no font face available for family '{family_list}'"
        )))
    }

    fn query(&self, families: &[fontdb::Family<'_>]) -> Option<FontFace> {
        let query = fontdb::Query {
            families,
            weight: fontdb::Weight::BOLD,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };
        self.db.query(&query).and_then(|id| self.load_face(id))
    }

    fn load_face(&self, id: fontdb::ID) -> Option<FontFace> {
        let family = self
            .db
            .face(id)
            .and_then(|info| info.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_else(|| "unknown".to_string());
        self.db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .map(|(bytes, index)| FontFace {
                family,
                bytes: Arc::new(bytes),
                index,
            })
    }
}

/// Library for tests that need real glyphs.
///
/// Loads system fonts plus `$CAROUSEL_TEST_FONT_DIR` (default `tests/data/fonts`). Returns
/// `None` and notes the skip on stderr when the host has no face at all.
#[cfg(test)]
pub(crate) fn fixture_library(test: &str) -> Option<FontLibrary> {
    let dir = std::env::var_os("CAROUSEL_TEST_FONT_DIR")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/fonts"));
    let lib = FontLibrary::new(true, &[dir]);
    if lib.is_empty() {
        eprintln!("{test}: skipped, no font faces (install fonts or set CAROUSEL_TEST_FONT_DIR)");
        return None;
    }
    Some(lib)
}

fn load_fonts_from_dir(db: &mut fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory is not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font");
        }
    }
}

/// Split a CSS font-family list into unquoted, non-empty names.
pub(crate) fn parse_family_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().trim_matches(|c| c == '"' || c == '\'').trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn to_fontdb_family(name: &str) -> fontdb::Family<'_> {
    match name.to_ascii_lowercase().as_str() {
        "serif" => fontdb::Family::Serif,
        "sans-serif" | "system-ui" => fontdb::Family::SansSerif,
        "monospace" => fontdb::Family::Monospace,
        "cursive" => fontdb::Family::Cursive,
        "fantasy" => fontdb::Family::Fantasy,
        _ => fontdb::Family::Name(name),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
