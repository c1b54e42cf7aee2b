//! Font discovery: builds the [`FontLibrary`] used for card text.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use qr_canvas::FontLibrary;

use crate::presets::FONT_OPTIONS;

const VALID_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];

/// How deep system font directories are searched.
const MAX_SCAN_DEPTH: usize = 4;

/// File stems tried for each family: (family, regular stems, bold stems).
///
/// Metric-compatible free faces follow the proprietary names.
const FAMILY_FILES: &[(&str, &[&str], &[&str])] = &[
    (
        "Arial",
        &["arial", "liberationsans-regular", "dejavusans", "notosans-regular"],
        &["arial bold", "arialbd", "liberationsans-bold", "dejavusans-bold", "notosans-bold"],
    ),
    (
        "Georgia",
        &["georgia", "gelasio-regular", "dejavuserif", "notoserif-regular"],
        &["georgia bold", "georgiab", "gelasio-bold", "dejavuserif-bold", "notoserif-bold"],
    ),
    (
        "Courier New",
        &["courier new", "cour", "liberationmono-regular", "dejavusansmono"],
        &["courier new bold", "courbd", "liberationmono-bold", "dejavusansmono-bold"],
    ),
    (
        "Verdana",
        &["verdana", "dejavusans"],
        &["verdana bold", "verdanab", "dejavusans-bold"],
    ),
    ("Impact", &["impact"], &[]),
];

/// Locates font files and loads them into a [`FontLibrary`].
#[derive(Debug, Clone)]
pub struct FontService {
    custom_dir: Option<PathBuf>,
    system_dirs: Vec<PathBuf>,
}

impl FontService {
    /// Service scanning `custom_dir` plus the platform font directories.
    pub fn new(custom_dir: Option<PathBuf>) -> Self {
        let mut system_dirs: Vec<PathBuf> = system_font_dirs().iter().map(PathBuf::from).collect();
        if let Some(dir) = dirs::font_dir() {
            system_dirs.insert(0, dir);
        }
        Self {
            custom_dir,
            system_dirs,
        }
    }

    /// Service scanning only the given directories.
    pub fn with_dirs(custom_dir: Option<PathBuf>, system_dirs: Vec<PathBuf>) -> Self {
        Self {
            custom_dir,
            system_dirs,
        }
    }

    /// Build the font library.
    ///
    /// Every font in the custom directory is registered under its file stem; a
    /// `-Bold` suffix registers the bold face of the base name. Known families
    /// are then filled from the system directories. Unreadable or invalid files
    /// are skipped.
    pub fn load_library(&self) -> FontLibrary {
        let mut library = FontLibrary::new();

        if let Some(dir) = &self.custom_dir {
            let custom = index_font_files(std::slice::from_ref(dir), 1);
            let mut stems: Vec<_> = custom.into_iter().collect();
            stems.sort();
            for (_, path) in stems {
                let Some((family, bold)) = custom_family(&path) else {
                    continue;
                };
                register(&mut library, &family, bold, &path);
            }
        }

        let index = index_font_files(&self.system_dirs, MAX_SCAN_DEPTH);
        for (family, regular, bold) in FAMILY_FILES {
            if let Some(path) = regular.iter().find_map(|stem| index.get(*stem)) {
                register(&mut library, family, false, path);
            }
            if let Some(path) = bold.iter().find_map(|stem| index.get(*stem)) {
                register(&mut library, family, true, path);
            }
        }

        let default_family = FONT_OPTIONS[0].family;
        if library.families().contains(&default_family.to_lowercase()) {
            library.set_default_family(default_family);
        }

        if library.is_empty() {
            tracing::warn!("No usable fonts found; titles and taglines will be left blank");
        } else {
            tracing::info!(families = ?library.families(), "Font library loaded");
        }
        library
    }
}

fn register(library: &mut FontLibrary, family: &str, bold: bool, path: &Path) {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read font file");
            return;
        }
    };
    match library.insert(family, bold, data) {
        Ok(()) => tracing::debug!(family, bold, path = %path.display(), "Loaded font"),
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "Skipping invalid font"),
    }
}

/// Family name and weight for a custom font file.
fn custom_family(path: &Path) -> Option<(String, bool)> {
    let stem = path.file_stem()?.to_str()?;
    for suffix in ["-Bold", "_Bold", " Bold", "-bold"] {
        if let Some(base) = stem.strip_suffix(suffix) {
            return Some((base.to_string(), true));
        }
    }
    let base = stem
        .strip_suffix("-Regular")
        .or_else(|| stem.strip_suffix("_Regular"))
        .unwrap_or(stem);
    Some((base.to_string(), false))
}

/// Map lowercase file stems to font paths. The first match wins.
fn index_font_files(dirs: &[PathBuf], max_depth: usize) -> HashMap<String, PathBuf> {
    let mut index = HashMap::new();
    for dir in dirs {
        scan_dir(dir, max_depth, &mut index);
    }
    index
}

fn scan_dir(dir: &Path, depth: usize, index: &mut HashMap<String, PathBuf>) {
    if depth == 0 {
        return;
    }
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    let mut paths: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
    paths.sort();
    for path in paths {
        if path.is_dir() {
            scan_dir(&path, depth - 1, index);
            continue;
        }
        let is_font = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| VALID_EXTENSIONS.contains(&ext.to_lowercase().as_str()));
        if !is_font {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            index.entry(stem.to_lowercase()).or_insert(path);
        }
    }
}

fn system_font_dirs() -> &'static [&'static str] {
    #[cfg(target_os = "macos")]
    {
        &[
            "/System/Library/Fonts/Supplemental",
            "/System/Library/Fonts",
            "/Library/Fonts",
        ]
    }
    #[cfg(target_os = "windows")]
    {
        &["C:\\Windows\\Fonts"]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        &["/usr/share/fonts", "/usr/local/share/fonts"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new() -> Self {
            let path = std::env::temp_dir().join(format!("qr-studio-fonts-{}", uuid::Uuid::new_v4()));
            std::fs::create_dir_all(&path).unwrap();
            Self(path)
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn index_only_picks_font_extensions() {
        let tmp = TempDir::new();
        let nested = tmp.0.join("truetype").join("dejavu");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("DejaVuSans.ttf"), b"x").unwrap();
        std::fs::write(tmp.0.join("Arial.TTF"), b"x").unwrap();
        std::fs::write(tmp.0.join("readme.txt"), b"x").unwrap();

        let index = index_font_files(&[tmp.0.clone()], MAX_SCAN_DEPTH);
        assert!(index.contains_key("dejavusans"));
        assert!(index.contains_key("arial"));
        assert!(!index.contains_key("readme"));
    }

    #[test]
    fn scan_depth_is_limited() {
        let tmp = TempDir::new();
        let deep = tmp.0.join("a").join("b");
        std::fs::create_dir_all(&deep).unwrap();
        std::fs::write(deep.join("Deep.ttf"), b"x").unwrap();

        assert!(index_font_files(&[tmp.0.clone()], 2).is_empty());
        assert!(index_font_files(&[tmp.0.clone()], 3).contains_key("deep"));
    }

    #[test]
    fn custom_family_names() {
        assert_eq!(
            custom_family(Path::new("/f/Brand-Bold.ttf")),
            Some(("Brand".to_string(), true))
        );
        assert_eq!(
            custom_family(Path::new("/f/Brand-Regular.otf")),
            Some(("Brand".to_string(), false))
        );
        assert_eq!(
            custom_family(Path::new("/f/Brand.ttf")),
            Some(("Brand".to_string(), false))
        );
    }

    #[test]
    fn invalid_font_files_are_skipped() {
        let tmp = TempDir::new();
        std::fs::write(tmp.0.join("arial.ttf"), b"not a font").unwrap();
        std::fs::write(tmp.0.join("Custom.otf"), b"not a font either").unwrap();

        let svc = FontService::with_dirs(Some(tmp.0.clone()), vec![tmp.0.clone()]);
        let library = svc.load_library();
        assert!(library.is_empty());
    }

    #[test]
    fn missing_directories_yield_an_empty_library() {
        let svc = FontService::with_dirs(
            Some(PathBuf::from("/definitely/not/here")),
            vec![PathBuf::from("/also/not/here")],
        );
        assert!(svc.load_library().is_empty());
    }
}
