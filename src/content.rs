//! Portfolio content: the static data every section renders.
//!
//! All text and media lists live in a single `content.toml` at the content
//! root. Nothing here is computed; the file is read once, ids are filled in,
//! and the result is validated before any page is rendered.
//!
//! ## Layout
//!
//! ```toml
//! [profile]                 # hero + brand
//! [[navigation]]            # nav bar entries → section anchors
//! [about]                   # markdown intro, [[about.skills]]
//! [modeling]                # [[modeling.filters]], [[modeling.projects]]
//! [ai_art]                  # [[ai_art.categories]], [[ai_art.artworks]], [[ai_art.process]]
//! [services]                # [[services.offers]], [[services.process]]
//! [contact]                 # info cards, social links, project types
//! [footer]                  # blurb, [[footer.columns]]
//! ```
//!
//! Run `atelier gen-content` for a complete documented example.
//!
//! ## Validation
//!
//! - Entry ids must be unique within their section and slug-safe
//!   (`a-z`, `0-9`, `-`), since viewer page paths are built from them
//! - Every project and artwork needs a title and at least one image
//! - Every media item needs a source URL
//! - Filter ids are slug-safe too: each filter gets its own page
//! - A section may appear at most once in the navigation
//!
//! Filters that currently match nothing are allowed (they render an empty
//! grid) but logged, since they are usually typos.

use crate::gallery::{Filter, Filterable, Gallery};
use crate::types::{Link, MediaItem, NavItem, Section};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONTENT_FILE: &str = "content.toml";

const STOCK_CONTENT: &str = include_str!("../static/content.toml");

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Content validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Content {
    pub profile: Profile,
    #[serde(default = "default_navigation")]
    pub navigation: Vec<NavItem>,
    pub about: About,
    pub modeling: Modeling,
    pub ai_art: AiArt,
    pub services: Services,
    pub contact: Contact,
    #[serde(default)]
    pub footer: Footer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    /// Brand shown in the navigation bar and footer.
    pub brand: String,
    pub headline: String,
    /// Highlighted tail of the headline (rendered with the accent gradient).
    #[serde(default)]
    pub headline_accent: String,
    pub tagline: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default = "default_cta_modeling")]
    pub cta_modeling: String,
    #[serde(default = "default_cta_ai_art")]
    pub cta_ai_art: String,
}

fn default_cta_modeling() -> String {
    "See my 3D work".to_string()
}

fn default_cta_ai_art() -> String {
    "Explore my AI art".to_string()
}

fn default_navigation() -> Vec<NavItem> {
    [
        ("Home", Section::Home),
        ("3D Modeling", Section::Modeling),
        ("AI Art", Section::AiArt),
        ("Services", Section::Services),
        ("Contact", Section::Contact),
    ]
    .into_iter()
    .map(|(label, section)| NavItem {
        label: label.to_string(),
        section,
    })
    .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct About {
    pub title: String,
    /// Markdown.
    pub intro: String,
    #[serde(default)]
    pub skills: Vec<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approach_title: Option<String>,
    /// Markdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approach: Option<String>,
}

/// Title + description card (skills, contact info).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Card {
    pub title: String,
    pub description: String,
    /// Secondary line, e.g. the value of a contact card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A gallery filter button.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterDef {
    pub id: Filter,
    pub label: String,
}

/// A numbered step in a process timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    pub step: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Modeling {
    pub title: String,
    pub intro: String,
    #[serde(default)]
    pub filters: Vec<FilterDef>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callout: Option<Callout>,
}

/// Closing call to action of a gallery section, linking to the contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Callout {
    pub title: String,
    pub text: String,
    pub label: String,
}

/// A 3D modeling project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Filter category, e.g. `blender` or `fusion`.
    pub category: String,
    pub software: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default)]
    pub printable: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    pub images: Vec<MediaItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelAsset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<MediaItem>,
}

impl Filterable for Project {
    fn category(&self) -> &str {
        &self.category
    }

    fn printable(&self) -> bool {
        self.printable
    }
}

/// A model presented by the pseudo-3D viewer. Only the preview image is
/// displayed; the remaining fields feed the details panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelAsset {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polygons: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AiArt {
    pub title: String,
    pub intro: String,
    #[serde(default)]
    pub categories: Vec<FilterDef>,
    #[serde(default)]
    pub artworks: Vec<Artwork>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_title: Option<String>,
    #[serde(default)]
    pub process: Vec<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callout: Option<Callout>,
}

/// An AI-generated artwork.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Artwork {
    pub id: String,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub prompt: String,
    /// Generator used, e.g. `Midjourney`.
    pub tool: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default)]
    pub likes: u32,
    pub images: Vec<MediaItem>,
}

impl Filterable for Artwork {
    fn category(&self) -> &str {
        &self.category
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Services {
    pub title: String,
    pub intro: String,
    #[serde(default)]
    pub offers: Vec<Offer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_title: Option<String>,
    #[serde(default)]
    pub process: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Offer {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    pub price: String,
    #[serde(default)]
    pub popular: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Contact {
    pub title: String,
    pub intro: String,
    /// Receives form submissions when no form endpoint is configured.
    pub email: String,
    #[serde(default)]
    pub info: Vec<Card>,
    #[serde(default)]
    pub social: Vec<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(default)]
    pub project_types: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Footer {
    #[serde(default)]
    pub blurb: String,
    #[serde(default)]
    pub columns: Vec<FooterColumn>,
    /// Bottom line, e.g. `© 2024 Studio. All rights reserved.`
    #[serde(default)]
    pub copyright: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FooterColumn {
    pub title: String,
    pub links: Vec<Link>,
}

impl Content {
    /// Parse, fill in item ids, and validate.
    pub fn from_toml(source: &str) -> Result<Content, ContentError> {
        let mut content: Content = toml::from_str(source)?;
        content.assign_item_ids();
        content.validate()?;
        Ok(content)
    }

    pub fn projects(&self) -> Gallery<Project> {
        Gallery::new(self.modeling.projects.clone())
    }

    pub fn artworks(&self) -> Gallery<Artwork> {
        Gallery::new(self.ai_art.artworks.clone())
    }

    /// Every media item in the content, in page order.
    pub fn media(&self) -> impl Iterator<Item = &MediaItem> {
        let project_media = self.modeling.projects.iter().flat_map(|p| {
            p.images.iter().chain(p.video.iter())
        });
        let artwork_media = self.ai_art.artworks.iter().flat_map(|a| a.images.iter());
        project_media.chain(artwork_media)
    }

    /// Every URL that may point at a local asset: media sources, thumbnails,
    /// downloads and model previews. Duplicates are dropped, first
    /// occurrence wins.
    pub fn asset_urls(&self) -> Vec<&str> {
        let mut urls: Vec<&str> = Vec::new();
        for item in self.media() {
            urls.push(&item.url);
            urls.extend(item.thumbnail.as_deref());
            urls.extend(item.download_url.as_deref());
        }
        for model in self.modeling.projects.iter().filter_map(|p| p.model.as_ref()) {
            urls.extend(model.preview_image.as_deref());
            urls.extend(model.download_url.as_deref());
        }
        let mut seen = HashSet::new();
        urls.retain(|url| seen.insert(*url));
        urls
    }

    fn assign_item_ids(&mut self) {
        for project in &mut self.modeling.projects {
            fill_ids(&project.id, &mut project.images);
            if let Some(video) = &mut project.video {
                if video.id.is_empty() {
                    video.id = format!("{}-video", project.id);
                }
            }
        }
        for artwork in &mut self.ai_art.artworks {
            fill_ids(&artwork.id, &mut artwork.images);
        }
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        validate_entries(
            "modeling project",
            self.modeling
                .projects
                .iter()
                .map(|p| (p.id.as_str(), p.title.as_str(), p.images.as_slice())),
        )?;
        validate_entries(
            "artwork",
            self.ai_art
                .artworks
                .iter()
                .map(|a| (a.id.as_str(), a.title.as_str(), a.images.as_slice())),
        )?;
        for project in &self.modeling.projects {
            if let Some(video) = &project.video {
                if video.url.trim().is_empty() {
                    return Err(ContentError::Validation(format!(
                        "video of modeling project '{}' has no url",
                        project.id
                    )));
                }
            }
        }

        let mut seen = HashSet::new();
        for item in &self.navigation {
            if !seen.insert(item.section) {
                return Err(ContentError::Validation(format!(
                    "section '{}' appears more than once in navigation",
                    item.section
                )));
            }
        }

        for def in self.modeling.filters.iter().chain(&self.ai_art.categories) {
            if !is_slug(def.id.id()) {
                return Err(ContentError::Validation(format!(
                    "filter id '{}' must use only a-z, 0-9 and '-'",
                    def.id
                )));
            }
        }

        for url in self.asset_urls() {
            if url.starts_with('/') && url.split(['/', '?', '#']).any(|part| part == "..") {
                return Err(ContentError::Validation(format!(
                    "media url '{url}' must not contain '..'"
                )));
            }
        }

        warn_empty_filters("modeling", &self.modeling.filters, &self.projects());
        warn_empty_filters("ai_art", &self.ai_art.categories, &self.artworks());
        Ok(())
    }
}

/// Load `content.toml` from the content root.
pub fn load_content(root: &Path) -> Result<Content, ContentError> {
    let path = root.join(CONTENT_FILE);
    let source = fs::read_to_string(&path).map_err(|source| ContentError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Content::from_toml(&source)
}

/// A complete, documented example `content.toml`.
///
/// Used by the `gen-content` CLI command.
pub fn stock_content_toml() -> &'static str {
    STOCK_CONTENT
}

fn fill_ids(entry_id: &str, items: &mut [MediaItem]) {
    for (i, item) in items.iter_mut().enumerate() {
        if item.id.is_empty() {
            item.id = format!("{}-{}", entry_id, i + 1);
        }
    }
}

fn is_slug(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn validate_entries<'a>(
    kind: &str,
    entries: impl Iterator<Item = (&'a str, &'a str, &'a [MediaItem])>,
) -> Result<(), ContentError> {
    let mut ids = HashSet::new();
    for (id, title, images) in entries {
        if !is_slug(id) {
            return Err(ContentError::Validation(format!(
                "{kind} id '{id}' must use only a-z, 0-9 and '-'"
            )));
        }
        if !ids.insert(id) {
            return Err(ContentError::Validation(format!(
                "duplicate {kind} id '{id}'"
            )));
        }
        if title.trim().is_empty() {
            return Err(ContentError::Validation(format!(
                "{kind} '{id}' has an empty title"
            )));
        }
        if images.is_empty() {
            return Err(ContentError::Validation(format!(
                "{kind} '{id}' has no images"
            )));
        }
        if let Some(item) = images.iter().find(|m| m.url.trim().is_empty()) {
            return Err(ContentError::Validation(format!(
                "image '{}' of {kind} '{id}' has no url",
                item.id
            )));
        }
    }
    Ok(())
}

fn warn_empty_filters<T: Filterable>(section: &str, filters: &[FilterDef], gallery: &Gallery<T>) {
    for def in filters {
        if gallery.count(&def.id) == 0 {
            tracing::warn!(section, filter = %def.id, "filter matches no entries");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_content_parses_and_validates() {
        let content = Content::from_toml(stock_content_toml()).unwrap();
        assert!(!content.modeling.projects.is_empty());
        assert!(!content.ai_art.artworks.is_empty());
        assert_eq!(content.navigation[0].section, Section::Home);
    }

    #[test]
    fn missing_item_ids_are_derived_from_entry() {
        let content = Content::from_toml(stock_content_toml()).unwrap();
        let first = &content.ai_art.artworks[0];
        assert_eq!(first.images[0].id, format!("{}-1", first.id));
    }

    #[test]
    fn default_navigation_when_absent() {
        let nav = default_navigation();
        assert_eq!(nav.len(), 5);
        assert_eq!(nav[2].section, Section::AiArt);
    }

    fn with_artworks(artworks: &str) -> String {
        format!(
            r#"
[profile]
brand = "B"
headline = "H"
tagline = "T"

[about]
title = "About"
intro = "Hi"

[modeling]
title = "3D"
intro = "i"

[ai_art]
title = "AI"
intro = "i"
{artworks}

[services]
title = "S"
intro = "i"

[contact]
title = "C"
intro = "i"
email = "me@example.com"
"#
        )
    }

    #[test]
    fn minimal_content_parses() {
        let content = Content::from_toml(&with_artworks("")).unwrap();
        assert!(content.ai_art.artworks.is_empty());
        assert!(content.footer.columns.is_empty());
    }

    #[test]
    fn parent_dir_media_urls_rejected() {
        let src = with_artworks(
            r#"
[[ai_art.artworks]]
id = "a"
title = "A"
category = "portraits"
tool = "Midjourney"
images = [{ title = "A", url = "/../../outside.png" }]
"#,
        );
        let err = Content::from_toml(&src).unwrap_err();
        assert!(err.to_string().contains("/../../outside.png"));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let src = with_artworks(
            r#"
[[ai_art.artworks]]
id = "a"
title = "A"
category = "portraits"
tool = "Midjourney"
images = [{ title = "A", url = "/a.png" }]

[[ai_art.artworks]]
id = "a"
title = "B"
category = "portraits"
tool = "Midjourney"
images = [{ title = "B", url = "/b.png" }]
"#,
        );
        let err = Content::from_toml(&src).unwrap_err();
        assert!(err.to_string().contains("duplicate artwork id 'a'"));
    }

    #[test]
    fn unsafe_id_rejected() {
        let src = with_artworks(
            r#"
[[ai_art.artworks]]
id = "My Art"
title = "A"
category = "portraits"
tool = "Midjourney"
images = [{ title = "A", url = "/a.png" }]
"#,
        );
        assert!(matches!(
            Content::from_toml(&src),
            Err(ContentError::Validation(_))
        ));
    }

    #[test]
    fn artwork_without_images_rejected() {
        let src = with_artworks(
            r#"
[[ai_art.artworks]]
id = "a"
title = "A"
category = "portraits"
tool = "Midjourney"
images = []
"#,
        );
        let err = Content::from_toml(&src).unwrap_err();
        assert!(err.to_string().contains("has no images"));
    }

    #[test]
    fn empty_media_url_rejected() {
        let src = with_artworks(
            r#"
[[ai_art.artworks]]
id = "a"
title = "A"
category = "portraits"
tool = "Midjourney"
images = [{ title = "A", url = " " }]
"#,
        );
        let err = Content::from_toml(&src).unwrap_err();
        assert!(err.to_string().contains("has no url"));
    }

    #[test]
    fn unknown_key_rejected() {
        let src = with_artworks("colour = \"red\"");
        assert!(matches!(
            Content::from_toml(&src),
            Err(ContentError::Toml(_))
        ));
    }

    #[test]
    fn unsafe_filter_id_rejected() {
        let src = with_artworks(
            r#"
[[ai_art.categories]]
id = "../up"
label = "Up"
"#,
        );
        let err = Content::from_toml(&src).unwrap_err();
        assert!(err.to_string().contains("filter id '../up'"));
    }

    #[test]
    fn duplicate_nav_section_rejected() {
        let mut src = with_artworks("");
        src.push_str(
            r#"
[[navigation]]
label = "A"
section = "about"

[[navigation]]
label = "B"
section = "about"
"#,
        );
        let err = Content::from_toml(&src).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn load_content_reports_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = load_content(tmp.path()).unwrap_err();
        assert!(matches!(err, ContentError::Io { .. }));
        assert!(err.to_string().contains("content.toml"));
    }

    #[test]
    fn asset_urls_include_thumbnails_and_previews() {
        let content = Content::from_toml(stock_content_toml()).unwrap();
        let urls = content.asset_urls();
        let project = &content.modeling.projects[0];
        assert!(urls.contains(&project.images[0].url.as_str()));
        let model = project.model.as_ref().unwrap();
        assert!(urls.contains(&model.preview_image.as_deref().unwrap()));
        assert!(urls.contains(&model.download_url.as_deref().unwrap()));
        // the preview doubles as the first image and is listed once
        assert_eq!(urls.iter().filter(|u| **u == project.images[0].url).count(), 1);
    }
}
