//! HTML site generation.
//!
//! Stage 2 of the atelier build pipeline. Takes the load manifest and
//! generates the final static site.
//!
//! ## Generated Pages
//!
//! - **Index page** (`/index.html`): every section, galleries unfiltered
//! - **Filter pages** (`/{section}/{filter}.html`): the same page with one
//!   gallery narrowed to a filter; filter buttons link between them
//! - **Image viewer pages** (`/{section}/{entry}/{n}.html`): one per image of
//!   every project and artwork, with wraparound previous/next links
//! - **Model pages** (`/modeling/{project}/model.html`): pseudo-3D viewer
//! - **Video pages** (`/modeling/{project}/video.html`): video player
//!
//! Viewer pages are snapshots of real viewer sessions: the generator opens
//! each viewer on a [`Headless`] platform, reads the state it would render,
//! and closes it again. Closing a viewer page is a link back to the entry's
//! card on the index page.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── modeling/
//! │   ├── blender.html               # Filter page
//! │   ├── printable.html
//! │   └── planetary-gearbox/
//! │       ├── 1.html                 # Image viewer pages
//! │       ├── 2.html
//! │       └── model.html
//! ├── ai-art/
//! │   ├── portraits.html
//! │   └── cyberpunk-portrait/
//! │       └── 1.html
//! └── assets/                        # Copied from content/assets/
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors and layout injected from config)
//! - `static/viewer.js`: Keyboard shortcuts and live controls on viewer pages
//! - `static/particles.js`: Hero canvas animation
//!
//! Every page works without JavaScript: filters, navigation and viewer
//! prev/next/close are plain links.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::config;
use crate::contact::{self, ContactForm, FormHandoff};
use crate::content::{Artwork, Callout, Content, FilterDef, Project, Step};
use crate::gallery::{Filter, Filterable, Gallery};
use crate::load::{self, AssetInfo, Manifest};
use crate::particles::ParticleField;
use crate::platform::{DownloadRequest, Headless};
use crate::types::{MediaItem, Section};
use crate::viewer::transform::{
    MAX_ZOOM, MIN_ZOOM, ORBIT_SENSITIVITY, ROTATE_STEP, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT, ZOOM_STEP,
};
use crate::viewer::video::{CONTROLS_IDLE, SEEK_STEP, VOLUME_STEP};
use crate::viewer::{ImageViewer, LoadState, ModelViewer, PlaybackRate, Shortcut, VideoViewer, Viewer};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Asset copy error: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const VIEWER_JS: &str = include_str!("../static/viewer.js");
const PARTICLES_JS: &str = include_str!("../static/particles.js");

/// Reference viewport of the embedded particle field. The browser scales it
/// to the real canvas size.
const HERO_WIDTH: f64 = 1280.0;
const HERO_HEIGHT: f64 = 720.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PageKind {
    Index,
    Filter,
    Image,
    Model,
    Video,
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PageKind::Index => "index",
            PageKind::Filter => "filter",
            PageKind::Image => "image viewer",
            PageKind::Model => "model viewer",
            PageKind::Video => "video viewer",
        })
    }
}

/// A rendered page, path relative to the output root.
#[derive(Debug)]
pub struct RenderedPage {
    pub path: String,
    pub kind: PageKind,
    pub html: String,
}

impl RenderedPage {
    fn new(path: impl Into<String>, kind: PageKind, markup: Markup) -> Self {
        Self {
            path: path.into(),
            kind,
            html: markup.into_string(),
        }
    }
}

/// What a generate run wrote.
#[derive(Debug, Default)]
pub struct GeneratedSite {
    pub pages: Vec<(String, PageKind)>,
    pub assets_copied: usize,
}

impl GeneratedSite {
    /// Page count per kind, in kind order.
    pub fn counts(&self) -> BTreeMap<PageKind, usize> {
        let mut counts = BTreeMap::new();
        for (_, kind) in &self.pages {
            *counts.entry(*kind).or_insert(0) += 1;
        }
        counts
    }
}

pub fn generate(
    manifest_path: &Path,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<GeneratedSite, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;

    fs::create_dir_all(output_dir)?;
    let assets_copied = copy_assets(&manifest, source_dir, output_dir)?;

    let mut site = GeneratedSite {
        pages: Vec::new(),
        assets_copied,
    };
    for page in render_pages(&manifest)? {
        let path = output_dir.join(&page.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &page.html)?;
        tracing::debug!(path = %page.path, kind = %page.kind, "generated page");
        site.pages.push((page.path, page.kind));
    }

    tracing::info!(
        pages = site.pages.len(),
        assets = site.assets_copied,
        output = %output_dir.display(),
        "site generated"
    );
    Ok(site)
}

/// Copy `assets/` from the content root, plus any other local file the
/// content references. Returns the number of files copied.
fn copy_assets(
    manifest: &Manifest,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<usize, GenerateError> {
    let mut copied = 0;
    let assets_dir = source_dir.join("assets");
    if assets_dir.is_dir() {
        for entry in WalkDir::new(&assets_dir).follow_links(true) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(source_dir) else {
                continue;
            };
            let dst = output_dir.join(relative);
            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dst)?;
            copied += 1;
        }
    }

    for url in manifest.content.asset_urls() {
        if url.starts_with("/assets/") || manifest.missing.iter().any(|m| m == url) {
            continue;
        }
        let (Some(src), Some(dst)) = (
            load::local_path(source_dir, url),
            load::local_path(output_dir, url),
        ) else {
            continue;
        };
        if !src.is_file() || dst.exists() {
            continue;
        }
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&src, &dst)?;
        copied += 1;
    }
    Ok(copied)
}

// ============================================================================
// Paths
// ============================================================================

/// Output path of a filter page; the `all` filter lives on the index page.
pub fn filter_page_path(section: Section, filter: &Filter) -> Option<String> {
    match filter {
        Filter::All => None,
        other => Some(format!("{}/{}.html", section.anchor(), other.id())),
    }
}

pub fn image_page_path(section: Section, entry_id: &str, index: usize) -> String {
    format!("{}/{}/{}.html", section.anchor(), entry_id, index + 1)
}

pub fn model_page_path(project_id: &str) -> String {
    format!("{}/{}/model.html", Section::Modeling.anchor(), project_id)
}

pub fn video_page_path(project_id: &str) -> String {
    format!("{}/{}/video.html", Section::Modeling.anchor(), project_id)
}

fn filter_href(section: Section, filter: &Filter) -> String {
    match filter_page_path(section, filter) {
        Some(path) => format!("/{}#{}", path, section.anchor()),
        None => format!("/{}", section.href()),
    }
}

fn section_href(section: Section) -> String {
    format!("/{}", section.href())
}

// ============================================================================
// Page assembly
// ============================================================================

/// Everything pages share: the manifest and the precomputed CSS and hero
/// field.
struct PageContext<'a> {
    manifest: &'a Manifest,
    css: String,
    particles: Option<String>,
}

impl<'a> PageContext<'a> {
    fn new(manifest: &'a Manifest) -> Result<Self, GenerateError> {
        let config = &manifest.config;
        let css = format!(
            "{}\n\n{}\n\n{}",
            config::generate_color_css(&config.colors),
            config::generate_theme_css(&config.theme),
            CSS_STATIC
        );
        let particles = if config.hero.particle_count == 0 {
            None
        } else {
            let field = ParticleField::seeded(
                config.hero.particle_count,
                HERO_WIDTH,
                HERO_HEIGHT,
                config.hero.seed,
            );
            Some(serde_json::to_string(&field)?)
        };
        Ok(Self {
            manifest,
            css,
            particles,
        })
    }

    fn content(&self) -> &Content {
        &self.manifest.content
    }

    fn asset(&self, url: &str) -> Option<AssetInfo> {
        self.manifest.assets.get(url).copied()
    }

    fn is_missing(&self, url: &str) -> bool {
        self.manifest.missing.iter().any(|m| m == url)
    }
}

/// The project or artwork a viewer page belongs to.
struct Entry<'a> {
    section: Section,
    id: &'a str,
    title: &'a str,
}

impl Entry<'_> {
    /// Closing a viewer returns to the entry's card.
    fn back_href(&self) -> String {
        format!("/#{}", card_anchor(self.section, self.id))
    }
}

fn card_anchor(section: Section, id: &str) -> String {
    match section {
        Section::AiArt => format!("artwork-{id}"),
        _ => format!("project-{id}"),
    }
}

/// Render every page of the site, without touching the filesystem.
pub fn render_pages(manifest: &Manifest) -> Result<Vec<RenderedPage>, GenerateError> {
    let ctx = PageContext::new(manifest)?;
    let content = ctx.content();
    let mut pages = vec![RenderedPage::new(
        "index.html",
        PageKind::Index,
        render_home(&ctx, &Filter::All, &Filter::All),
    )];

    for def in &content.modeling.filters {
        if let Some(path) = filter_page_path(Section::Modeling, &def.id) {
            let markup = render_home(&ctx, &def.id, &Filter::All);
            pages.push(RenderedPage::new(path, PageKind::Filter, markup));
        }
    }
    for def in &content.ai_art.categories {
        if let Some(path) = filter_page_path(Section::AiArt, &def.id) {
            let markup = render_home(&ctx, &Filter::All, &def.id);
            pages.push(RenderedPage::new(path, PageKind::Filter, markup));
        }
    }

    let mut platform = Headless::new();
    for project in &content.modeling.projects {
        let entry = Entry {
            section: Section::Modeling,
            id: &project.id,
            title: &project.title,
        };
        pages.extend(image_pages(&ctx, &mut platform, &entry, &project.images));
        if project.model.is_some() {
            pages.push(model_page(&ctx, &mut platform, project));
        }
        if project.video.is_some() {
            pages.push(video_page(&ctx, &mut platform, project));
        }
    }
    for artwork in &content.ai_art.artworks {
        let entry = Entry {
            section: Section::AiArt,
            id: &artwork.id,
            title: &artwork.title,
        };
        pages.extend(image_pages(&ctx, &mut platform, &entry, &artwork.images));
    }

    Ok(pages)
}

fn image_pages(
    ctx: &PageContext,
    platform: &mut Headless,
    entry: &Entry,
    images: &[MediaItem],
) -> Vec<RenderedPage> {
    let mut viewer = ImageViewer::new(images.to_vec());
    let mut pages = Vec::with_capacity(viewer.len());
    for index in 0..viewer.len() {
        if !viewer.open(index, platform) {
            break;
        }
        let before = platform.downloads().len();
        viewer.download(platform);
        let download = platform.downloads().get(before).cloned();

        let markup = render_image_viewer(ctx, entry, &viewer, download.as_ref());
        viewer.close(platform);
        pages.push(RenderedPage::new(
            image_page_path(entry.section, entry.id, index),
            PageKind::Image,
            markup,
        ));
    }
    pages
}

fn model_page(ctx: &PageContext, platform: &mut Headless, project: &Project) -> RenderedPage {
    let mut viewer = ModelViewer::new();
    if let Some(model) = &project.model {
        viewer.open(model.clone(), platform);
        match model.preview_image.as_deref() {
            None => viewer.asset_failed("no preview image"),
            Some(url) if ctx.is_missing(url) => viewer.asset_failed("preview image not found"),
            Some(_) => {}
        }
    }
    let before = platform.downloads().len();
    viewer.download(platform);
    let download = platform.downloads().get(before).cloned();

    let markup = render_model_viewer(ctx, project, &viewer, download.as_ref());
    viewer.close(platform);
    RenderedPage::new(model_page_path(&project.id), PageKind::Model, markup)
}

fn video_page(ctx: &PageContext, platform: &mut Headless, project: &Project) -> RenderedPage {
    let mut viewer = VideoViewer::new();
    if let Some(video) = &project.video {
        viewer.open(video.clone(), platform);
        if ctx.is_missing(&video.url) {
            viewer.load_failed("video file not found");
        }
    }
    let before = platform.downloads().len();
    viewer.download(platform);
    let download = platform.downloads().get(before).cloned();

    let markup = render_video_viewer(ctx, project, &viewer, download.as_ref());
    viewer.close(platform);
    RenderedPage::new(video_page_path(&project.id), PageKind::Video, markup)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(
    ctx: &PageContext,
    title: &str,
    body_class: Option<&str>,
    content: Markup,
    script: Option<&str>,
) -> Markup {
    let site = &ctx.manifest.config.site;
    html! {
        (DOCTYPE)
        html lang=(site.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if !site.description.is_empty() {
                    meta name="description" content=(site.description);
                }
                title { (title) }
                style { (PreEscaped(&ctx.css)) }
            }
            body class=[body_class] {
                (content)
                @if let Some(js) = script {
                    script { (PreEscaped(js)) }
                }
            }
        }
    }
}

fn markdown(source: &str) -> PreEscaped<String> {
    let parser = Parser::new(source);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    PreEscaped(out)
}

/// `<img>` with intrinsic dimensions when the asset was probed.
fn media_img(ctx: &PageContext, url: &str, alt: &str, class: Option<&str>, lazy: bool) -> Markup {
    let info = ctx.asset(url);
    html! {
        img class=[class] src=(url) alt=(alt)
            width=[info.map(|i| i.width)] height=[info.map(|i| i.height)]
            loading=[lazy.then_some("lazy")];
    }
}

/// Renders the navigation bar (hamburger style on narrow screens)
fn render_nav(content: &Content) -> Markup {
    html! {
        header.site-header {
            a.brand href=(section_href(Section::Home)) { (content.profile.brand) }
            input.nav-toggle type="checkbox" id="nav-toggle";
            label.nav-hamburger for="nav-toggle" aria-label="Menu" {
                span.hamburger-line {}
                span.hamburger-line {}
                span.hamburger-line {}
            }
            nav.site-nav {
                ul {
                    @for item in &content.navigation {
                        li { a href=(section_href(item.section)) { (item.label) } }
                    }
                }
            }
        }
    }
}

fn render_hero(ctx: &PageContext) -> Markup {
    let profile = &ctx.content().profile;
    let hero = &ctx.manifest.config.hero;
    html! {
        section.hero id=(Section::Home.anchor()) {
            @if let Some(json) = &ctx.particles {
                canvas.hero-particles data-particles=(json) data-color=(hero.particle_color) aria-hidden="true" {}
            }
            div.hero-content {
                h1.hero-title {
                    (profile.headline)
                    @if !profile.headline_accent.is_empty() {
                        " "
                        span.accent { (profile.headline_accent) }
                    }
                }
                p.hero-tagline { (profile.tagline) }
                @if !profile.highlights.is_empty() {
                    ul.hero-highlights {
                        @for highlight in &profile.highlights {
                            li { (highlight) }
                        }
                    }
                }
                div.hero-actions {
                    a.button.primary href=(section_href(Section::Modeling)) { (profile.cta_modeling) }
                    a.button.secondary href=(section_href(Section::AiArt)) { (profile.cta_ai_art) }
                }
            }
            a.scroll-indicator href=(section_href(Section::About)) aria-label="Scroll to about" { "↓" }
        }
    }
}

fn render_about(content: &Content) -> Markup {
    let about = &content.about;
    html! {
        section.section id=(Section::About.anchor()) {
            div.section-inner {
                h2.section-title { (about.title) }
                div.about-intro { (markdown(&about.intro)) }
                @if !about.skills.is_empty() {
                    div.card-grid.skills {
                        @for skill in &about.skills {
                            div.card {
                                h3 { (skill.title) }
                                p { (skill.description) }
                            }
                        }
                    }
                }
                @if let Some(approach) = &about.approach {
                    div.approach {
                        @if let Some(title) = &about.approach_title {
                            h3 { (title) }
                        }
                        (markdown(approach))
                    }
                }
            }
        }
    }
}

fn render_filter_bar<T: Filterable>(
    section: Section,
    defs: &[FilterDef],
    gallery: &Gallery<T>,
) -> Markup {
    html! {
        @if !defs.is_empty() {
            nav.filter-bar aria-label="Filters" {
                @for def in defs {
                    @let active = gallery.active() == &def.id;
                    a.filter-button.active[active] href=(filter_href(section, &def.id))
                        aria-current=[active.then_some("true")] {
                        (def.label)
                        " "
                        span.count { (gallery.count(&def.id)) }
                    }
                }
            }
        }
    }
}

fn render_callout(callout: &Option<Callout>) -> Markup {
    html! {
        @if let Some(c) = callout {
            div.callout {
                h3 { (c.title) }
                p { (c.text) }
                a.button.primary href=(section_href(Section::Contact)) { (c.label) }
            }
        }
    }
}

fn render_project_card(ctx: &PageContext, project: &Project) -> Markup {
    let cover = project.images.first();
    html! {
        article.card.project-card id=(card_anchor(Section::Modeling, &project.id)) {
            @if let Some(cover) = cover {
                a.card-media href={ "/" (image_page_path(Section::Modeling, &project.id, 0)) } {
                    (media_img(ctx, cover.thumbnail_or_url(), &project.title, None, true))
                }
            }
            div.card-body {
                div.badges {
                    span.badge { (project.software) }
                    @if project.printable {
                        span.badge.printable { "3D printable" }
                    }
                }
                h3 { (project.title) }
                @if !project.description.is_empty() {
                    p { (project.description) }
                }
                @if !project.tags.is_empty() {
                    ul.tags {
                        @for tag in &project.tags {
                            li { (tag) }
                        }
                    }
                }
                div.card-actions {
                    a href={ "/" (image_page_path(Section::Modeling, &project.id, 0)) } {
                        "Images (" (project.images.len()) ")"
                    }
                    @if project.model.is_some() {
                        a href={ "/" (model_page_path(&project.id)) } { "3D view" }
                    }
                    @if project.video.is_some() {
                        a href={ "/" (video_page_path(&project.id)) } { "Video" }
                    }
                }
                @if let Some(year) = &project.year {
                    span.year { (year) }
                }
            }
        }
    }
}

fn render_modeling(ctx: &PageContext, filter: &Filter) -> Markup {
    let modeling = &ctx.content().modeling;
    let mut gallery = ctx.content().projects();
    gallery.set_filter(filter.clone());
    let displayed = gallery.displayed();
    html! {
        section.section id=(Section::Modeling.anchor()) {
            div.section-inner {
                h2.section-title { (modeling.title) }
                p.section-intro { (modeling.intro) }
                (render_filter_bar(Section::Modeling, &modeling.filters, &gallery))
                @if displayed.is_empty() {
                    p.gallery-empty { "Nothing here yet." }
                } @else {
                    div.card-grid.gallery {
                        @for project in &displayed {
                            (render_project_card(ctx, project))
                        }
                    }
                }
                (render_callout(&modeling.callout))
            }
        }
    }
}

fn render_artwork_card(ctx: &PageContext, artwork: &Artwork) -> Markup {
    let cover = artwork.images.first();
    let viewer_href = format!("/{}", image_page_path(Section::AiArt, &artwork.id, 0));
    html! {
        article.card.artwork-card id=(card_anchor(Section::AiArt, &artwork.id)) {
            @if let Some(cover) = cover {
                a.card-media href=(viewer_href) {
                    (media_img(ctx, cover.thumbnail_or_url(), &artwork.title, None, true))
                }
            }
            div.card-body {
                div.badges {
                    span.badge { (artwork.category) }
                    @if !artwork.style.is_empty() {
                        span.badge.style { (artwork.style) }
                    }
                }
                h3 { a href=(viewer_href) { (artwork.title) } }
                @if !artwork.prompt.is_empty() {
                    p.prompt { "“" (artwork.prompt) "”" }
                }
                div.meta {
                    span.tool { (artwork.tool) }
                    span.likes aria-label="likes" { "♥ " (artwork.likes) }
                    @if let Some(year) = &artwork.year {
                        span.year { (year) }
                    }
                }
            }
        }
    }
}

fn render_steps(title: Option<&str>, steps: &[Step]) -> Markup {
    html! {
        @if !steps.is_empty() {
            div.process {
                @if let Some(title) = title {
                    h3 { (title) }
                }
                ol.steps {
                    @for step in steps {
                        li.step {
                            span.step-number { (step.step) }
                            h4 { (step.title) }
                            p { (step.description) }
                        }
                    }
                }
            }
        }
    }
}

fn render_ai_art(ctx: &PageContext, filter: &Filter) -> Markup {
    let ai_art = &ctx.content().ai_art;
    let mut gallery = ctx.content().artworks();
    gallery.set_filter(filter.clone());
    let displayed = gallery.displayed();
    let tools = gallery.tally(|a| a.tool.as_str());
    html! {
        section.section id=(Section::AiArt.anchor()) {
            div.section-inner {
                h2.section-title { (ai_art.title) }
                p.section-intro { (ai_art.intro) }
                @if !tools.is_empty() {
                    dl.tool-stats {
                        @for (tool, count) in &tools {
                            div.stat {
                                dt { (tool) }
                                dd { (count) " " @if *count == 1 { "creation" } @else { "creations" } }
                            }
                        }
                    }
                }
                (render_filter_bar(Section::AiArt, &ai_art.categories, &gallery))
                @if displayed.is_empty() {
                    p.gallery-empty { "Nothing here yet." }
                } @else {
                    div.card-grid.gallery {
                        @for artwork in &displayed {
                            (render_artwork_card(ctx, artwork))
                        }
                    }
                }
                (render_steps(ai_art.process_title.as_deref(), &ai_art.process))
                (render_callout(&ai_art.callout))
            }
        }
    }
}

fn render_services(content: &Content) -> Markup {
    let services = &content.services;
    html! {
        section.section id=(Section::Services.anchor()) {
            div.section-inner {
                h2.section-title { (services.title) }
                p.section-intro { (services.intro) }
                div.card-grid.offers {
                    @for offer in &services.offers {
                        div.card.offer.popular[offer.popular] {
                            @if offer.popular {
                                span.badge.popular { "Most popular" }
                            }
                            h3 { (offer.title) }
                            p { (offer.description) }
                            ul.features {
                                @for feature in &offer.features {
                                    li { (feature) }
                                }
                            }
                            p.price { (offer.price) }
                            a.button.primary href=(section_href(Section::Contact)) { "Get a quote" }
                        }
                    }
                }
                (render_steps(services.process_title.as_deref(), &services.process))
            }
        }
    }
}

fn render_contact_form(ctx: &PageContext) -> Markup {
    let contact_content = &ctx.content().contact;
    let handoff = FormHandoff::resolve(&ctx.manifest.config.contact, contact_content);
    let (action, enctype) = handoff.form_target();
    html! {
        form.contact-form action=(action) method="post" enctype=[enctype] {
            @for field in &contact::FIELDS {
                @let id = format!("contact-{}", field.name);
                div.field {
                    label for=(id) { (field.label) @if field.required { " *" } }
                    @match field.name {
                        "email" => {
                            input id=(id) type="email" name=(field.name) required[field.required];
                        }
                        "message" => {
                            textarea id=(id) name=(field.name) rows="6" required[field.required] {}
                        }
                        "project_type" => {
                            select id=(id) name=(field.name) required[field.required] {
                                option value="" { "Select a type" }
                                @for kind in &contact_content.project_types {
                                    option value=(kind) { (kind) }
                                }
                            }
                        }
                        _ => {
                            input id=(id) type="text" name=(field.name) required[field.required];
                        }
                    }
                }
            }
            button.button.primary type="submit" { "Send message" }
        }
    }
}

fn render_contact(ctx: &PageContext) -> Markup {
    let contact_content = &ctx.content().contact;
    let direct = ContactForm {
        subject: "Project enquiry".to_string(),
        ..ContactForm::default()
    }
    .mailto_href(&contact_content.email);
    html! {
        section.section id=(Section::Contact.anchor()) {
            div.section-inner {
                h2.section-title { (contact_content.title) }
                p.section-intro { (contact_content.intro) }
                div.contact-layout {
                    div.contact-details {
                        @for card in &contact_content.info {
                            div.card.info {
                                h3 { (card.title) }
                                @if let Some(value) = &card.value {
                                    p.value { (value) }
                                }
                                p { (card.description) }
                            }
                        }
                        @if !contact_content.social.is_empty() {
                            ul.social {
                                @for link in &contact_content.social {
                                    li { a href=(link.href) rel="noopener" { (link.label) } }
                                }
                            }
                        }
                        @if let Some(availability) = &contact_content.availability {
                            p.availability { (availability) }
                        }
                        p.direct-email {
                            a href=(direct) { "Or write to " (contact_content.email) }
                        }
                    }
                    (render_contact_form(ctx))
                }
            }
        }
    }
}

fn render_footer(content: &Content) -> Markup {
    let footer = &content.footer;
    html! {
        footer.site-footer {
            div.footer-inner {
                div.footer-brand {
                    span.brand { (content.profile.brand) }
                    @if !footer.blurb.is_empty() {
                        p { (footer.blurb) }
                    }
                }
                @for column in &footer.columns {
                    div.footer-column {
                        h4 { (column.title) }
                        ul {
                            @for link in &column.links {
                                li { a href=(link.href) { (link.label) } }
                            }
                        }
                    }
                }
            }
            @if !footer.copyright.is_empty() {
                p.copyright { (footer.copyright) }
            }
        }
    }
}

/// The single page, with each gallery narrowed to the given filter.
fn render_home(ctx: &PageContext, modeling: &Filter, ai_art: &Filter) -> Markup {
    let content = ctx.content();
    let body = html! {
        (render_nav(content))
        main {
            (render_hero(ctx))
            (render_about(content))
            (render_modeling(ctx, modeling))
            (render_ai_art(ctx, ai_art))
            (render_services(content))
            (render_contact(ctx))
        }
        (render_footer(content))
    };
    let script = ctx.particles.as_ref().map(|_| PARTICLES_JS);
    base_document(ctx, &ctx.manifest.config.site.title, None, body, script)
}

// ============================================================================
// Viewer pages
// ============================================================================

fn render_shortcuts(shortcuts: &[Shortcut]) -> Markup {
    html! {
        details.shortcuts {
            summary { "Keyboard shortcuts" }
            dl {
                @for s in shortcuts {
                    div {
                        dt { kbd { (s.keys) } }
                        dd { (s.action) }
                    }
                }
            }
        }
    }
}

fn download_link(download: Option<&DownloadRequest>) -> Markup {
    html! {
        @if let Some(d) = download {
            a.viewer-button.download href=(d.url) download=(d.filename) title="Download" { "Download" }
        }
    }
}

fn render_image_viewer(
    ctx: &PageContext,
    entry: &Entry,
    viewer: &ImageViewer,
    download: Option<&DownloadRequest>,
) -> Markup {
    let Some(item) = viewer.current() else {
        return html! {};
    };
    let transform = viewer.transform();
    let indicator = transform.zoom_indicator();
    let close = entry.back_href();
    let nav = viewer.has_navigation();
    let prev = format!("/{}", image_page_path(entry.section, entry.id, viewer.previous_index()));
    let next = format!("/{}", image_page_path(entry.section, entry.id, viewer.next_index()));
    let title = if item.title.is_empty() { entry.title } else { item.title.as_str() };

    let body = html! {
        div.viewer.image-viewer role="dialog" aria-label=(title)
            data-close=(close)
            data-min-zoom=(MIN_ZOOM)
            data-max-zoom=(MAX_ZOOM)
            data-zoom-step=(ZOOM_STEP)
            data-rotate-step=(ROTATE_STEP)
            data-prev=[nav.then_some(prev.as_str())]
            data-next=[nav.then_some(next.as_str())] {
            header.viewer-bar {
                div.viewer-heading {
                    span.viewer-title { (entry.title) }
                    span.viewer-counter { (viewer.counter()) }
                    span.zoom-indicator hidden[indicator.is_none()] { (indicator.unwrap_or_default()) }
                }
                div.viewer-tools {
                    button.viewer-button type="button" data-action="zoom-out" title="Zoom out" { "−" }
                    button.viewer-button type="button" data-action="zoom-in" title="Zoom in" { "+" }
                    button.viewer-button type="button" data-action="rotate" title="Rotate" { "⟳" }
                    button.viewer-button type="button" data-action="reset" title="Reset" { "1:1" }
                    button.viewer-button type="button" data-action="fullscreen" title="Fullscreen" { "⛶" }
                    (download_link(download))
                    a.viewer-button.viewer-close href=(close) title="Close" { "×" }
                }
            }
            main.viewer-stage {
                @if nav {
                    a.viewer-prev href=(prev) aria-label="Previous image" { "‹" }
                }
                figure.viewer-frame style={ "transform: " (transform.image_css()) } {
                    (media_img(ctx, &item.url, title, Some("viewer-image"), false))
                }
                @if nav {
                    a.viewer-next href=(next) aria-label="Next image" { "›" }
                }
            }
            footer.viewer-caption {
                h2 { (title) }
                @if !item.description.is_empty() {
                    p { (item.description) }
                }
                p.meta {
                    @if let Some(software) = &item.software { span { (software) } }
                    @if let Some(year) = &item.year { span { (year) } }
                    @if !item.category.is_empty() { span { (item.category) } }
                }
            }
            @if nav {
                nav.viewer-thumbs aria-label="Images" {
                    @for (i, thumb) in viewer.items().iter().enumerate() {
                        a.current[i == viewer.index()] href={ "/" (image_page_path(entry.section, entry.id, i)) } {
                            (media_img(ctx, thumb.thumbnail_or_url(), &thumb.title, None, true))
                        }
                    }
                }
            }
            (render_shortcuts(viewer.shortcuts()))
        }
    };
    let page_title = format!("{} · {}", title, viewer.counter());
    base_document(ctx, &page_title, Some("viewer-page"), body, Some(VIEWER_JS))
}

fn load_state_attr(state: &LoadState) -> &'static str {
    match state {
        LoadState::Loading => "loading",
        LoadState::Ready => "ready",
        LoadState::Failed(_) => "failed",
    }
}

fn render_model_viewer(
    ctx: &PageContext,
    project: &Project,
    viewer: &ModelViewer,
    download: Option<&DownloadRequest>,
) -> Markup {
    let Some(model) = viewer.model() else {
        return html! {};
    };
    let close = format!("/#{}", card_anchor(Section::Modeling, &project.id));
    let state = viewer.load_state();
    let transform = viewer.transform();

    let body = html! {
        div.viewer.model-viewer role="dialog" aria-label=(model.title)
            data-close=(close)
            data-min-zoom=(MIN_ZOOM)
            data-max-zoom=(MAX_ZOOM)
            data-zoom-step=(ZOOM_STEP)
            data-wheel-in=(WHEEL_ZOOM_IN)
            data-wheel-out=(WHEEL_ZOOM_OUT)
            data-orbit-sensitivity=(ORBIT_SENSITIVITY)
            data-state=(load_state_attr(state)) {
            header.viewer-bar {
                div.viewer-heading {
                    span.viewer-title { (model.title) }
                    @if let Some(software) = &model.software {
                        span.badge { (software) }
                    }
                }
                div.viewer-tools {
                    button.viewer-button type="button" data-action="zoom-out" title="Zoom out" { "−" }
                    button.viewer-button type="button" data-action="zoom-in" title="Zoom in" { "+" }
                    button.viewer-button type="button" data-action="reset" title="Reset view" { "⟲" }
                    button.viewer-button type="button" data-action="info" title="Details" { "i" }
                    @if viewer.can_download() {
                        (download_link(download))
                    }
                    a.viewer-button.viewer-close href=(close) title="Close" { "×" }
                }
            }
            main.viewer-stage.model-stage {
                div.model-frame style={ "transform: " (transform.orbit_css()) } {
                    @if let Some(preview) = &model.preview_image {
                        (media_img(ctx, preview, &model.title, Some("model-preview"), false))
                    }
                }
                @match state {
                    LoadState::Loading => {
                        p.model-status { "Loading model…" }
                    }
                    LoadState::Failed(reason) => {
                        div.model-error role="alert" {
                            p { "This model could not be displayed." }
                            small { (reason) }
                        }
                    }
                    LoadState::Ready => {}
                }
                p.model-hint { "Drag to orbit · scroll to zoom" }
            }
            aside.model-info hidden[!viewer.show_info()] {
                h2 { (model.title) }
                @if !model.description.is_empty() {
                    p { (model.description) }
                }
                dl {
                    @if let Some(software) = &model.software {
                        dt { "Software" } dd { (software) }
                    }
                    @if let Some(format) = &model.format {
                        dt { "Format" } dd { (format) }
                    }
                    @if let Some(polygons) = model.polygons {
                        dt { "Polygons" } dd { (polygons) }
                    }
                    @if let Some(dimensions) = &model.dimensions {
                        dt { "Dimensions" } dd { (dimensions) }
                    }
                }
            }
            (render_shortcuts(viewer.shortcuts()))
        }
    };
    base_document(ctx, &model.title, Some("viewer-page"), body, Some(VIEWER_JS))
}

fn render_video_viewer(
    ctx: &PageContext,
    project: &Project,
    viewer: &VideoViewer,
    download: Option<&DownloadRequest>,
) -> Markup {
    let Some(video) = viewer.video() else {
        return html! {};
    };
    let close = format!("/#{}", card_anchor(Section::Modeling, &project.id));
    let title = if video.title.is_empty() { project.title.as_str() } else { video.title.as_str() };

    let body = html! {
        div.viewer.video-viewer role="dialog" aria-label=(title)
            data-close=(close)
            data-idle-ms=(CONTROLS_IDLE.as_millis().to_string())
            data-seek-step=(SEEK_STEP)
            data-volume-step=(VOLUME_STEP) {
            header.viewer-bar {
                div.viewer-heading {
                    span.viewer-title { (project.title) }
                    span.viewer-subtitle { (title) }
                }
                div.viewer-tools {
                    a.viewer-button.viewer-close href=(close) title="Close" { "×" }
                }
            }
            main.viewer-stage.video-stage {
                video.video src=(video.url) poster=[video.thumbnail.as_deref()] preload="metadata" playsinline {}
                @if let Some(reason) = viewer.error() {
                    div.video-error role="alert" {
                        p { "This video could not be loaded." }
                        small { (reason) }
                    }
                }
            }
            div.video-controls.visible[viewer.controls_visible()] {
                button.viewer-button type="button" data-action="play" title="Play" disabled[viewer.error().is_some()] {
                    @if viewer.is_playing() { "❚❚" } @else { "▶" }
                }
                input.video-progress type="range" min="0" max="1000" step="1"
                    value=((viewer.progress() * 1000.0).round()) aria-label="Seek";
                span.video-time { (viewer.time_label()) }
                button.viewer-button type="button" data-action="mute" title="Mute" {
                    @if viewer.is_muted() { "🔇" } @else { "🔊" }
                }
                input.video-volume type="range" min="0" max="1" step=(VOLUME_STEP)
                    value=(viewer.volume()) aria-label="Volume";
                button.viewer-button type="button" data-action="settings" title="Playback speed" { "⚙" }
                div.video-settings hidden[!viewer.show_settings()] {
                    @for rate in PlaybackRate::ALL {
                        button.rate.selected[rate == viewer.rate()] type="button" data-rate=(rate.factor()) {
                            (rate)
                        }
                    }
                }
                button.viewer-button type="button" data-action="fullscreen" title="Fullscreen" { "⛶" }
                (download_link(download))
            }
            (render_shortcuts(viewer.shortcuts()))
        }
    };
    base_document(ctx, title, Some("viewer-page"), body, Some(VIEWER_JS))
}

// ============================================================================
// Tests
// ============================================================================
