//! Shared test utilities for the atelier test suite.
//!
//! Provides small constructors for media and model values, plus a fixture
//! content directory built from the stock `content.toml`.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = load(tmp.path()).unwrap();
//!
//! let project = find_project(&manifest.content, "planetary-gearbox");
//! assert_eq!(project.images.len(), 2);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::content::{Artwork, CONTENT_FILE, Content, ModelAsset, Project, stock_content_toml};
use crate::types::MediaItem;

// =========================================================================
// Value constructors
// =========================================================================

/// A media item titled `Title {id}` served from `/assets/{id}.png`.
pub fn media(id: &str) -> MediaItem {
    MediaItem {
        id: id.to_string(),
        title: format!("Title {id}"),
        description: String::new(),
        category: String::new(),
        url: format!("/assets/{id}.png"),
        thumbnail: None,
        download_url: None,
        filename: None,
        year: None,
        software: None,
    }
}

/// A downloadable model without a suggested filename.
pub fn model_asset(name: &str) -> ModelAsset {
    ModelAsset {
        title: format!("Model {name}"),
        software: Some("Blender".to_string()),
        preview_image: Some(format!("/assets/{name}.png")),
        download_url: Some(format!("/assets/{name}.obj")),
        filename: None,
        format: Some("OBJ".to_string()),
        polygons: Some(1200),
        dimensions: None,
        description: String::new(),
    }
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Content directory holding the stock `content.toml` and a small PNG for
/// every local image it references. Non-image assets get placeholder bytes.
///
/// Tests get an isolated copy they can mutate without affecting other tests.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let source = stock_content_toml();
    fs::write(tmp.path().join(CONTENT_FILE), source).unwrap();

    let content = Content::from_toml(source).unwrap();
    for url in content.asset_urls() {
        write_asset(tmp.path(), url);
    }
    tmp
}

/// Write a placeholder file for a site-root URL such as `/assets/x.png`.
pub fn write_asset(root: &Path, url: &str) {
    let path = root.join(url.trim_start_matches('/'));
    if path.exists() {
        return;
    }
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    if url.ends_with(".png") {
        let img = image::RgbImage::from_pixel(64, 48, image::Rgb([90, 60, 200]));
        img.save(&path).unwrap();
    } else {
        fs::write(&path, b"placeholder").unwrap();
    }
}

// =========================================================================
// Content lookups: panic with a clear message on miss
// =========================================================================

pub fn find_project<'a>(content: &'a Content, id: &str) -> &'a Project {
    content
        .modeling
        .projects
        .iter()
        .find(|p| p.id == id)
        .unwrap_or_else(|| {
            let ids: Vec<&str> = content.modeling.projects.iter().map(|p| p.id.as_str()).collect();
            panic!("project '{id}' not found. Available: {ids:?}")
        })
}

pub fn find_artwork<'a>(content: &'a Content, id: &str) -> &'a Artwork {
    content
        .ai_art
        .artworks
        .iter()
        .find(|a| a.id == id)
        .unwrap_or_else(|| {
            let ids: Vec<&str> = content.ai_art.artworks.iter().map(|a| a.id.as_str()).collect();
            panic!("artwork '{id}' not found. Available: {ids:?}")
        })
}
