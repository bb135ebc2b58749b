//! Content loading and manifest generation.
//!
//! Stage 1 of the atelier build pipeline. Reads `content.toml` and the
//! optional `config.toml` from the content root, checks every local asset
//! the content references, and produces a [`Manifest`] that the generate
//! stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── content.toml                 # Everything the page says (required)
//! ├── config.toml                  # Look and behaviour (optional)
//! └── assets/                      # Copied verbatim to dist/assets/
//!     ├── modeling/
//!     │   ├── gearbox-1.png
//!     │   └── gearbox.stl
//!     └── ai/
//!         └── dragon.png
//! ```
//!
//! ## Local vs. remote media
//!
//! A URL starting with a single `/` is local: `/assets/ai/dragon.png` is
//! `content/assets/ai/dragon.png`. Anything else (`https://…`, `//cdn…`) is
//! passed through untouched.
//!
//! Local images are probed for their pixel dimensions so the generated
//! `<img>` tags carry `width`/`height` and the layout does not shift while
//! they load. A referenced file that does not exist is not an error: the
//! page still builds and the viewer shows its load-failure state. Missing
//! files are listed in the manifest and logged.

use crate::config::{self, SiteConfig};
use crate::content::{self, Content};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Content error: {0}")]
    Content(#[from] content::ContentError),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Manifest output from the load stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub content: Content,
    pub config: SiteConfig,
    /// Pixel dimensions of local images, keyed by URL.
    #[serde(default)]
    pub assets: BTreeMap<String, AssetInfo>,
    /// Local URLs whose file does not exist.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
    pub width: u32,
    pub height: u32,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

pub fn load(root: &Path) -> Result<Manifest, LoadError> {
    let content = content::load_content(root)?;
    // Uses defaults if config.toml doesn't exist
    let config = config::load_config(root)?;

    let mut assets = BTreeMap::new();
    let mut missing = Vec::new();
    for url in content.asset_urls() {
        let Some(path) = local_path(root, url) else {
            continue;
        };
        if !path.is_file() {
            tracing::warn!(url, path = %path.display(), "referenced asset not found");
            missing.push(url.to_string());
            continue;
        }
        if !is_image(&path) {
            continue;
        }
        match image::image_dimensions(&path) {
            Ok((width, height)) => {
                tracing::debug!(url, width, height, "probed asset");
                assets.insert(url.to_string(), AssetInfo { width, height });
            }
            Err(err) => {
                tracing::warn!(url, error = %err, "could not read image dimensions, skipping");
            }
        }
    }

    Ok(Manifest {
        content,
        config,
        assets,
        missing,
    })
}

/// Whether a media URL refers to a file under the content root.
pub fn is_local(url: &str) -> bool {
    url.starts_with('/') && !url.starts_with("//")
}

/// Filesystem location of a local URL, or `None` for remote ones and for
/// paths that would climb out of `root`.
pub fn local_path(root: &Path, url: &str) -> Option<PathBuf> {
    if !is_local(url) {
        return None;
    }
    let relative = url.trim_start_matches('/');
    let relative = relative.split(['?', '#']).next().unwrap_or(relative);
    let relative = Path::new(relative);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return None;
    }
    Some(root.join(relative))
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;

    #[test]
    fn load_reads_content_and_default_config() {
        let tmp = setup_fixtures();
        let manifest = load(tmp.path()).unwrap();

        let project = find_project(&manifest.content, "planetary-gearbox");
        assert_eq!(project.images.len(), 2);
        assert_eq!(manifest.config.hero.particle_count, 50);
        assert!(manifest.missing.is_empty());
    }

    #[test]
    fn local_images_are_probed() {
        let tmp = setup_fixtures();
        let manifest = load(tmp.path()).unwrap();
        assert_eq!(
            manifest.assets.get("/assets/ai/dragon.png"),
            Some(&AssetInfo {
                width: 64,
                height: 48
            })
        );
        // non-image downloads are checked for existence only
        assert!(!manifest.assets.contains_key("/assets/modeling/gearbox.stl"));
    }

    #[test]
    fn missing_asset_is_listed_not_fatal() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join("assets/ai/alien.png")).unwrap();

        let manifest = load(tmp.path()).unwrap();
        assert_eq!(manifest.missing, vec!["/assets/ai/alien.png".to_string()]);
        assert!(!manifest.assets.contains_key("/assets/ai/alien.png"));
    }

    #[test]
    fn corrupt_image_is_skipped() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("assets/ai/abstract.png"), b"not a png").unwrap();

        let manifest = load(tmp.path()).unwrap();
        assert!(!manifest.assets.contains_key("/assets/ai/abstract.png"));
        assert!(manifest.missing.is_empty());
    }

    #[test]
    fn config_overrides_are_applied() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("config.toml"), "[site]\ntitle = \"Studio\"\n").unwrap();

        let manifest = load(tmp.path()).unwrap();
        assert_eq!(manifest.config.site.title, "Studio");
    }

    #[test]
    fn invalid_config_fails_load() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("config.toml"), "[hero]\nparticle_count = 100000\n").unwrap();
        assert!(matches!(load(tmp.path()), Err(LoadError::Config(_))));
    }

    #[test]
    fn missing_content_file_fails_load() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(matches!(load(tmp.path()), Err(LoadError::Content(_))));
    }

    #[test]
    fn manifest_survives_json() {
        let tmp = setup_fixtures();
        let manifest = load(tmp.path()).unwrap();
        let json = serde_json::to_string(&manifest).unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.assets, manifest.assets);
        assert_eq!(
            back.content.modeling.filters.len(),
            manifest.content.modeling.filters.len()
        );
        assert_eq!(back.content.ai_art.artworks[0].images[0].id, "cyberpunk-portrait-1");
    }

    #[test]
    fn remote_urls_are_not_local() {
        let root = Path::new("/site");
        assert_eq!(
            local_path(root, "/assets/a.png?v=2"),
            Some(PathBuf::from("/site/assets/a.png"))
        );
        assert_eq!(local_path(root, "https://cdn.example.com/a.png"), None);
        assert_eq!(local_path(root, "//cdn.example.com/a.png"), None);
    }

    #[test]
    fn parent_dir_urls_never_resolve() {
        let root = Path::new("/site");
        assert_eq!(local_path(root, "/../../escape.png"), None);
        assert_eq!(local_path(root, "/assets/../../escape.png"), None);
        assert_eq!(
            local_path(root, "/assets/./a.png"),
            Some(PathBuf::from("/site/assets/a.png"))
        );
    }
}
