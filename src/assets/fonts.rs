use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use usvg::fontdb;

const SERIF_CANDIDATES: &[&str] = &[
    "DejaVu Serif",
    "Noto Serif",
    "Liberation Serif",
    "Times New Roman",
    "Georgia",
];
const SANS_SERIF_CANDIDATES: &[&str] = &[
    "DejaVu Sans",
    "Noto Sans",
    "Liberation Sans",
    "Arial",
    "Helvetica",
];
const MONOSPACE_CANDIDATES: &[&str] = &[
    "DejaVu Sans Mono",
    "Noto Sans Mono",
    "Liberation Mono",
    "Courier New",
];

/// Font bytes picked for one text style.
#[derive(Clone)]
pub struct ResolvedFont {
    /// Face id inside the [`FontBook`] that produced it.
    pub id: fontdb::ID,
    /// Raw font file bytes.
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside a collection file.
    pub index: u32,
    /// Primary family name of the face.
    pub family: String,
}

impl std::fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFont")
            .field("id", &self.id)
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .field("family", &self.family)
            .finish()
    }
}

/// Font discovery over system fonts and extra font directories.
pub struct FontBook {
    db: fontdb::Database,
    loaded: Mutex<HashMap<fontdb::ID, ResolvedFont>>,
}

impl FontBook {
    /// A book with no faces. Every lookup misses.
    pub fn empty() -> Self {
        Self {
            db: fontdb::Database::new(),
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Load system fonts (when `system` is set) plus every font file found in `dirs`.
    ///
    /// The generic families (`serif`, `sans-serif`, `monospace`) are pointed at installed faces.
    pub fn load<P: AsRef<Path>>(dirs: &[P], system: bool) -> Self {
        let mut db = fontdb::Database::new();
        if system {
            db.load_system_fonts();
        }
        for dir in dirs {
            load_fonts_from_dir(&mut db, dir.as_ref());
        }
        assign_generic_families(&mut db);
        tracing::debug!(faces = db.len(), "font book loaded");
        Self {
            db,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Number of known faces.
    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Pick a face for a CSS-like family list (`"Quicksand"`, `"sans-serif"`, ...).
    ///
    /// Falls back to the first known face when no listed family is installed.
    pub fn resolve(&self, families: &[String], weight: u16) -> Option<ResolvedFont> {
        let id = self.query(families, weight)?;
        self.face(id)
    }

    /// The primary face for `families` followed by fallback faces for every character of `text`
    /// the primary face has no glyph for.
    ///
    /// Characters no installed face covers are left to the primary face.
    pub fn resolve_for_text(
        &self,
        text: &str,
        families: &[String],
        weight: u16,
    ) -> Vec<ResolvedFont> {
        let Some(primary) = self.query(families, weight) else {
            return Vec::new();
        };
        let mut chain = vec![primary];
        for c in text.chars().filter(|c| needs_glyph(*c)) {
            if chain.iter().any(|id| self.face_covers(*id, c)) {
                continue;
            }
            let fallback = self
                .db
                .faces()
                .map(|f| f.id)
                .find(|id| self.face_covers(*id, c));
            match fallback {
                Some(id) => chain.push(id),
                None => tracing::debug!(ch = %c, "no installed face covers character"),
            }
        }
        chain.into_iter().filter_map(|id| self.face(id)).collect()
    }

    /// Whether any known face has a glyph for `c`.
    pub fn covers(&self, c: char) -> bool {
        self.db.faces().any(|f| self.face_covers(f.id, c))
    }

    fn query(&self, families: &[String], weight: u16) -> Option<fontdb::ID> {
        let mut query_families: Vec<fontdb::Family<'_>> =
            families.iter().map(|f| generic_family(f)).collect();
        query_families.push(fontdb::Family::SansSerif);
        query_families.push(fontdb::Family::Serif);

        let query = fontdb::Query {
            families: &query_families,
            weight: fontdb::Weight(weight),
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };

        self.db
            .query(&query)
            .or_else(|| self.db.faces().next().map(|f| f.id))
    }

    fn face_covers(&self, id: fontdb::ID, c: char) -> bool {
        self.db
            .with_face_data(id, |data, index| {
                ttf_parser::Face::parse(data, index)
                    .ok()
                    .and_then(|face| face.glyph_index(c))
                    .is_some()
            })
            .unwrap_or(false)
    }

    fn face(&self, id: fontdb::ID) -> Option<ResolvedFont> {
        if let Some(font) = self
            .loaded
            .lock()
            .ok()
            .and_then(|cache| cache.get(&id).cloned())
        {
            return Some(font);
        }

        let family = self
            .db
            .face(id)
            .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_else(|| "unknown".to_owned());
        let (bytes, index) = self.db.with_face_data(id, |data, index| (data.to_vec(), index))?;
        let font = ResolvedFont {
            id,
            bytes: Arc::new(bytes),
            index,
            family,
        };
        if let Ok(mut cache) = self.loaded.lock() {
            cache.insert(id, font.clone());
        }
        Some(font)
    }
}

impl Default for FontBook {
    fn default() -> Self {
        Self::empty()
    }
}

fn generic_family(name: &str) -> fontdb::Family<'_> {
    match name.trim().to_ascii_lowercase().as_str() {
        "serif" => fontdb::Family::Serif,
        "sans-serif" => fontdb::Family::SansSerif,
        "monospace" => fontdb::Family::Monospace,
        "cursive" => fontdb::Family::Cursive,
        "fantasy" => fontdb::Family::Fantasy,
        _ => fontdb::Family::Name(name.trim()),
    }
}

// Variation selectors, joiners and keycap marks are consumed by shaping.
pub(crate) fn needs_glyph(c: char) -> bool {
    !(c.is_whitespace()
        || c.is_control()
        || matches!(c, '\u{200c}' | '\u{200d}' | '\u{20e3}' | '\u{fe00}'..='\u{fe0f}'))
}

fn installed_family<'a>(db: &fontdb::Database, candidates: &[&'a str]) -> Option<&'a str> {
    candidates.iter().copied().find(|name| {
        db.faces()
            .any(|f| f.families.iter().any(|(family, _)| family == name))
    })
}

fn assign_generic_families(db: &mut fontdb::Database) {
    if let Some(name) = installed_family(db, SERIF_CANDIDATES) {
        db.set_serif_family(name);
    }
    if let Some(name) = installed_family(db, SANS_SERIF_CANDIDATES) {
        db.set_sans_serif_family(name);
    }
    if let Some(name) = installed_family(db, MONOSPACE_CANDIDATES) {
        db.set_monospace_family(name);
    }
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
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font file");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
