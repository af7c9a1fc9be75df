use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::CalendarError;
use crate::fonts::FontRole;

/// Points per millimetre
const PT_PER_MM: f32 = 72.0 / 25.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Width and height in points.
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0 * PT_PER_MM, 297.0 * PT_PER_MM),
            PageSize::Letter => (612.0, 792.0),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::Letter => "Letter",
        }
    }
}

/// Optional per-role font file overrides, read from JSON.
///
/// ```json
/// { "display": "fonts/Poppins-Bold.ttf", "thin": "/usr/share/fonts/Lato-Thin.ttf" }
/// ```
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontManifest {
    pub display: Option<PathBuf>,
    pub body: Option<PathBuf>,
    pub thin: Option<PathBuf>,
    pub label: Option<PathBuf>,
    pub sans: Option<PathBuf>,
}

impl FontManifest {
    pub fn load(path: &Path) -> Result<Self, CalendarError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CalendarError::ManifestError(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| CalendarError::ManifestError(format!("Invalid JSON: {}", e)))
    }

    pub fn path_for(&self, role: FontRole) -> Option<&Path> {
        let entry = match role {
            FontRole::Display => &self.display,
            FontRole::Body => &self.body,
            FontRole::Thin => &self.thin,
            FontRole::Label => &self.label,
            FontRole::Sans => &self.sans,
        };
        entry.as_deref()
    }
}

/// Everything needed to produce one calendar document.
#[derive(Debug, Clone)]
pub struct CalendarConfig {
    pub year: i32,
    pub page_size: PageSize,
    pub font_dir: PathBuf,
    pub fonts: FontManifest,
}

impl CalendarConfig {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            page_size: PageSize::default(),
            font_dir: PathBuf::from("."),
            fonts: FontManifest::default(),
        }
    }

    pub fn title(&self) -> String {
        format!("Calendar {}", self.year)
    }

    pub fn default_output(&self) -> String {
        format!("Calendar_{}.pdf", self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn a4_is_portrait_in_points() {
        let (w, h) = PageSize::A4.dimensions();
        assert!((w - 595.28).abs() < 0.01);
        assert!((h - 841.89).abs() < 0.01);
        assert_eq!(PageSize::Letter.dimensions(), (612.0, 792.0));
    }

    #[test]
    fn manifest_keys_are_optional() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "thin": "Lato-Hairline.ttf" }}"#).unwrap();

        let manifest = FontManifest::load(file.path()).unwrap();
        assert_eq!(
            manifest.path_for(FontRole::Thin),
            Some(Path::new("Lato-Hairline.ttf"))
        );
        assert!(manifest.path_for(FontRole::Display).is_none());
    }

    #[test]
    fn manifest_rejects_unknown_roles() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "italic": "x.ttf" }}"#).unwrap();

        assert!(matches!(
            FontManifest::load(file.path()),
            Err(CalendarError::ManifestError(_))
        ));
    }

    #[test]
    fn missing_manifest_is_an_error() {
        let err = FontManifest::load(Path::new("no-such-manifest.json")).unwrap_err();
        assert!(err.to_string().contains("no-such-manifest.json"));
    }

    #[test]
    fn output_and_title_are_year_stamped() {
        let config = CalendarConfig::new(2025);
        assert_eq!(config.default_output(), "Calendar_2025.pdf");
        assert_eq!(config.title(), "Calendar 2025");
    }
}
