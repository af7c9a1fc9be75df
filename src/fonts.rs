//! Font registration and text measurement.
//!
//! Each [`FontRole`] is loaded independently; a role whose file is missing or
//! unparseable falls back to the `Sans` face when that one loaded, and to a
//! built-in PDF font otherwise.

use log::{debug, warn};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    /// Large month number in the page header
    Display,
    /// Day numbers
    Body,
    /// Month name under the header
    Thin,
    /// Weekday labels, mini calendar titles, notes label
    Label,
    /// Shared fallback face
    Sans,
}

impl FontRole {
    pub const ALL: [FontRole; 5] = [
        FontRole::Display,
        FontRole::Body,
        FontRole::Thin,
        FontRole::Label,
        FontRole::Sans,
    ];

    pub fn default_file(&self) -> &'static str {
        match self {
            FontRole::Display => "Poppins-Bold.ttf",
            FontRole::Body => "Poppins-Regular.ttf",
            FontRole::Thin => "Lato-Thin.ttf",
            FontRole::Label => "Lato-Regular.ttf",
            FontRole::Sans => "Arial.ttf",
        }
    }

    pub fn builtin(&self) -> BuiltinFace {
        match self {
            FontRole::Display => BuiltinFace::HelveticaBold,
            _ => BuiltinFace::Helvetica,
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            FontRole::Display => 0,
            FontRole::Body => 1,
            FontRole::Thin => 2,
            FontRole::Label => 3,
            FontRole::Sans => 4,
        }
    }
}

/// Standard PDF fonts used when no file could be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinFace {
    Helvetica,
    HelveticaBold,
}

impl BuiltinFace {
    pub fn to_pdf(self) -> printpdf::BuiltinFont {
        match self {
            BuiltinFace::Helvetica => printpdf::BuiltinFont::Helvetica,
            BuiltinFace::HelveticaBold => printpdf::BuiltinFont::HelveticaBold,
        }
    }
}

/// A TrueType/OpenType face read from disk.
#[derive(Debug, Clone)]
pub struct LoadedFace {
    pub path: PathBuf,
    pub data: Vec<u8>,
    units_per_em: u16,
}

impl LoadedFace {
    fn load(path: &Path) -> Result<Self, String> {
        let data = std::fs::read(path).map_err(|e| format!("{}: {}", path.display(), e))?;
        let face = ttf_parser::Face::parse(&data, 0)
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        let units_per_em = face.units_per_em();
        Ok(Self {
            path: path.to_path_buf(),
            data,
            units_per_em,
        })
    }

    /// Wraps bytes without parsing them.
    #[cfg(test)]
    pub(crate) fn unchecked(path: &Path, data: Vec<u8>) -> Self {
        Self {
            path: path.to_path_buf(),
            data,
            units_per_em: 1000,
        }
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        let Ok(face) = ttf_parser::Face::parse(&self.data, 0) else {
            return builtin_text_width(BuiltinFace::Helvetica, text, size);
        };
        let units: u32 = text
            .chars()
            .map(|c| {
                face.glyph_index(c)
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
                    .map(u32::from)
                    .unwrap_or(u32::from(self.units_per_em) / 2)
            })
            .sum();
        units as f32 * size / f32::from(self.units_per_em)
    }
}

/// What a role ends up being drawn with.
#[derive(Debug, Clone)]
pub enum FontSource {
    External(LoadedFace),
    Builtin(BuiltinFace),
}

impl FontSource {
    /// Advance width of `text` in points at `size`.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        match self {
            FontSource::External(face) => face.text_width(text, size),
            FontSource::Builtin(face) => builtin_text_width(*face, text, size),
        }
    }
}

/// Which roles were loaded from files and which fell back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontAvailability {
    pub loaded: Vec<FontRole>,
    pub missing: Vec<(FontRole, String)>,
}

impl FontAvailability {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// One font source per role, indexed by [`FontRole`].
#[derive(Debug, Clone)]
pub struct ResolvedFonts {
    sources: [FontSource; 5],
}

impl ResolvedFonts {
    #[cfg(test)]
    pub(crate) fn builtin() -> Self {
        Self {
            sources: FontRole::ALL.map(|role| FontSource::Builtin(role.builtin())),
        }
    }

    pub fn get(&self, role: FontRole) -> &FontSource {
        &self.sources[role.index()]
    }

    /// Replaces a role's source with its built-in face.
    pub fn demote(&mut self, role: FontRole) {
        self.sources[role.index()] = FontSource::Builtin(role.builtin());
    }

    pub fn text_width(&self, role: FontRole, text: &str, size: f32) -> f32 {
        self.get(role).text_width(text, size)
    }

    #[cfg(test)]
    pub(crate) fn replace(&mut self, role: FontRole, source: FontSource) {
        self.sources[role.index()] = source;
    }
}

/// Loads the five font roles, substituting fallbacks for any that fail.
///
/// Manifest paths win over `<font_dir>/<default file>`; relative manifest
/// paths are resolved against `font_dir`.
pub fn resolve_fonts(
    font_dir: &Path,
    manifest: &crate::config::FontManifest,
) -> (ResolvedFonts, FontAvailability) {
    let mut availability = FontAvailability::default();
    let mut loaded: [Option<LoadedFace>; 5] = Default::default();

    for role in FontRole::ALL {
        let path = match manifest.path_for(role) {
            Some(p) if p.is_absolute() => p.to_path_buf(),
            Some(p) => font_dir.join(p),
            None => font_dir.join(role.default_file()),
        };

        match LoadedFace::load(&path) {
            Ok(face) => {
                debug!("Loaded {:?} font from {}", role, face.path.display());
                availability.loaded.push(role);
                loaded[role.index()] = Some(face);
            }
            Err(reason) => {
                debug!("Could not load {:?} font: {}", role, reason);
                availability.missing.push((role, reason));
            }
        }
    }

    if !availability.is_complete() {
        warn!("Font(s) not found. Using default font.");
    }

    let sans = loaded[FontRole::Sans.index()].clone();
    let sources = FontRole::ALL.map(|role| match loaded[role.index()].take() {
        Some(face) => FontSource::External(face),
        None => match (&sans, role) {
            (Some(face), FontRole::Body | FontRole::Thin | FontRole::Label) => {
                FontSource::External(face.clone())
            }
            _ => FontSource::Builtin(role.builtin()),
        },
    });

    (ResolvedFonts { sources }, availability)
}

/// Width of `text` in a standard PDF font, from the Adobe AFM tables.
///
/// Covers space, `.`, `,`, digits and ASCII letters; anything else is
/// measured as 556 units.
pub fn builtin_text_width(face: BuiltinFace, text: &str, size: f32) -> f32 {
    let advance = match face {
        BuiltinFace::Helvetica => helvetica_advance,
        BuiltinFace::HelveticaBold => helvetica_bold_advance,
    };
    let units: u32 = text.chars().map(|c| u32::from(advance(c))).sum();
    units as f32 * size / 1000.0
}

fn helvetica_advance(c: char) -> u16 {
    match c {
        ' ' | '.' | ',' | 'I' | 'f' | 't' => 278,
        'i' | 'j' | 'l' => 222,
        'r' => 333,
        'J' => 500,
        'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' => 500,
        'L' => 556,
        'F' | 'T' | 'Z' => 611,
        'A' | 'B' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' => 667,
        'C' | 'D' | 'H' | 'N' | 'R' | 'U' | 'w' => 722,
        'G' | 'O' | 'Q' => 778,
        'M' | 'm' => 833,
        'W' => 944,
        _ => 556,
    }
}

fn helvetica_bold_advance(c: char) -> u16 {
    match c {
        ' ' | '.' | ',' | 'I' | 'i' | 'j' | 'l' => 278,
        'f' | 't' => 333,
        'r' => 389,
        'z' => 500,
        'a' | 'c' | 'e' | 'k' | 's' | 'v' | 'x' | 'y' | 'J' => 556,
        'b' | 'd' | 'g' | 'h' | 'n' | 'o' | 'p' | 'q' | 'u' => 611,
        'F' | 'L' | 'T' | 'Z' => 611,
        'E' | 'P' | 'S' | 'V' | 'X' | 'Y' => 667,
        'A' | 'B' | 'C' | 'D' | 'H' | 'K' | 'N' | 'R' | 'U' => 722,
        'G' | 'O' | 'Q' | 'w' => 778,
        'M' => 833,
        'm' => 889,
        'W' => 944,
        _ => 556,
    }
}
