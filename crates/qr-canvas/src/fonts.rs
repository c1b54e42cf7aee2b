//! Font faces keyed by family name.

use std::collections::BTreeMap;

use ab_glyph::FontArc;
use tracing::debug;

use crate::{CanvasError, Result};

#[derive(Clone)]
struct FontFace {
    regular: Option<FontArc>,
    bold: Option<FontArc>,
}

/// Regular and bold faces by family, with a fallback family.
///
/// Family lookup is case-insensitive.
#[derive(Clone, Default)]
pub struct FontLibrary {
    faces: BTreeMap<String, FontFace>,
    default_family: Option<String>,
}

impl std::fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontLibrary")
            .field("families", &self.families())
            .field("default_family", &self.default_family)
            .finish()
    }
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register font data (TTF/OTF) for a family.
    ///
    /// The first registered family becomes the fallback unless one is set explicitly.
    pub fn insert(&mut self, family: &str, bold: bool, data: Vec<u8>) -> Result<()> {
        let font = FontArc::try_from_vec(data)
            .map_err(|e| CanvasError::InvalidFont(format!("{family}: {e}")))?;
        let key = family.to_lowercase();
        let face = self.faces.entry(key.clone()).or_insert(FontFace {
            regular: None,
            bold: None,
        });
        if bold {
            face.bold = Some(font);
        } else {
            face.regular = Some(font);
        }
        if self.default_family.is_none() {
            self.default_family = Some(key);
        }
        debug!(family, bold, "Registered font face");
        Ok(())
    }

    /// Set the family used when a requested family is missing.
    pub fn set_default_family(&mut self, family: &str) {
        self.default_family = Some(family.to_lowercase());
    }

    /// Registered family names (lowercased), sorted.
    pub fn families(&self) -> Vec<String> {
        self.faces.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Find a face for `family`, falling back to the default family and then to any face.
    ///
    /// A bold request without a bold face resolves to the regular face, and vice versa.
    pub fn resolve(&self, family: &str, bold: bool) -> Option<&FontArc> {
        fn pick(face: &FontFace, bold: bool) -> Option<&FontArc> {
            if bold {
                face.bold.as_ref().or(face.regular.as_ref())
            } else {
                face.regular.as_ref().or(face.bold.as_ref())
            }
        }

        self.faces
            .get(&family.to_lowercase())
            .and_then(|f| pick(f, bold))
            .or_else(|| {
                self.default_family
                    .as_ref()
                    .and_then(|d| self.faces.get(d))
                    .and_then(|f| pick(f, bold))
            })
            .or_else(|| self.faces.values().find_map(|f| pick(f, bold)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_library_resolves_nothing() {
        let lib = FontLibrary::new();
        assert!(lib.is_empty());
        assert!(lib.resolve("Arial", false).is_none());
        assert!(lib.resolve("Arial", true).is_none());
    }

    #[test]
    fn invalid_font_data_is_rejected() {
        let mut lib = FontLibrary::new();
        let err = lib.insert("Broken", false, vec![0, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, CanvasError::InvalidFont(_)));
        assert!(lib.is_empty());
    }
}
