use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::AssetError;

/// File extensions picked up by a directory scan.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp"];

/// Ordered list of media sources. Tile `i` shows source `i`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceManifest {
    pub sources: Vec<PathBuf>,
}

impl SourceManifest {
    pub fn new(sources: Vec<PathBuf>) -> Self {
        Self { sources }
    }

    /// Read a JSON manifest. Relative sources resolve against the manifest's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let mut manifest: Self = serde_json::from_reader(file)?;
        if let Some(base) = path.parent() {
            for source in &mut manifest.sources {
                if source.is_relative() {
                    *source = base.join(&*source);
                }
            }
        }
        tracing::debug!(path = %path.display(), sources = manifest.len(), "manifest loaded");
        Ok(manifest)
    }

    /// Every image file directly inside `dir`, sorted by file name.
    pub fn scan_dir(dir: impl AsRef<Path>) -> Result<Self, AssetError> {
        let dir = dir.as_ref();
        let mut sources = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && is_image(&path) {
                sources.push(path);
            }
        }
        sources.sort();
        tracing::debug!(dir = %dir.display(), sources = sources.len(), "scanned media directory");
        Ok(Self { sources })
    }

    /// A directory is scanned, anything else is read as a manifest.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AssetError::NotFound(path.to_path_buf()));
        }
        if path.is_dir() {
            Self::scan_dir(path)
        } else {
            Self::load(path)
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.iter().any(|x| x.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_keeps_images_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.JPG", "notes.txt", "c.webp"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let manifest = SourceManifest::scan_dir(dir.path()).unwrap();
        let names: Vec<_> = manifest
            .sources
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.JPG", "b.png", "c.webp"]);
    }

    #[test]
    fn manifest_resolves_relative_sources() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.json");
        std::fs::write(&path, r#"{ "sources": ["one.png", "/abs/two.png"] }"#).unwrap();

        let manifest = SourceManifest::load(&path).unwrap();
        assert_eq!(manifest.sources[0], dir.path().join("one.png"));
        assert_eq!(manifest.sources[1], PathBuf::from("/abs/two.png"));
    }

    #[test]
    fn open_dispatches_on_path_kind() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("x.png"), b"x").unwrap();
        assert_eq!(SourceManifest::open(dir.path()).unwrap().len(), 1);

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            SourceManifest::open(&missing),
            Err(AssetError::NotFound(p)) if p == missing
        ));
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.json");
        let manifest = SourceManifest::new(vec![dir.path().join("a.png")]);
        manifest.save(&path).unwrap();
        assert_eq!(SourceManifest::load(&path).unwrap(), manifest);
    }
}
