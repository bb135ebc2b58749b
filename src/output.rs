//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entity (project, artwork, image) is its semantic identity, title
//! and positional index, with asset URLs shown as secondary context via
//! indented `Source:` lines. This makes the output readable as a content
//! inventory while still letting users trace data back to specific files.
//!
//! # Entity Display Contract
//!
//! Every entity follows a consistent two-level pattern across all stages:
//!
//! 1. **Header line**: positional index + title (+ optional detail like image count)
//! 2. **Context lines**: indented `Source:`, `Category:`, media status, etc.
//!
//! Shared helpers ([`entity_header`], [`image_line`]) enforce this pattern so
//! load and generate output look consistent for the same entities.
//!
//! # Output Format
//!
//! ## Load
//!
//! ```text
//! Modeling
//! 001 Planetary Gearbox (2 images)
//!     Category: fusion · printable
//!     001 Assembled gearbox
//!         Source: /assets/modeling/gearbox-1.png (1600×1200)
//!     002 Exploded view
//!         Source: /assets/modeling/gearbox-2.png (missing)
//!     Model: Planetary Gearbox (STL, 48210 polygons)
//!
//! AI Art
//! 001 Cyberpunk Portrait (1 image)
//!     Category: portraits · Midjourney
//!     Prompt: Cyberpunk portrait of a woman with neon implants...
//!
//! Missing assets
//!     /assets/modeling/gearbox-2.png
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//!
//! Filters
//!     modeling/blender.html
//!
//! Viewers
//! 001 Planetary Gearbox
//!     image 1 → modeling/planetary-gearbox/1.html
//!     model → modeling/planetary-gearbox/model.html
//!
//! Generated 1 index, 1 filter page, 2 viewer pages; copied 4 assets
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::generate::{GeneratedSite, PageKind};
use crate::load::Manifest;
use crate::types::MediaItem;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Format an entity header: positional index + title + image count.
///
/// ```text
/// 001 Planetary Gearbox (2 images)
/// ```
fn entity_header(index: usize, title: &str, images: usize) -> String {
    format!(
        "{} {} ({})",
        format_index(index),
        title,
        plural(images, "image", "images")
    )
}

/// Format an image line: titled images show title, untitled show the URL's
/// file name in parens.
///
/// ```text
/// 001 Assembled gearbox   // titled
/// 001 (gearbox-1.png)     // untitled
/// ```
fn image_line(index: usize, title: &str, url: &str) -> String {
    if title.is_empty() {
        let name = url.rsplit('/').next().unwrap_or(url);
        format!("{} ({})", format_index(index), name)
    } else {
        format!("{} {}", format_index(index), title)
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// `Source:` context line for a media URL: probed dimensions, missing, or
/// nothing for remote and non-image files.
fn source_line(manifest: &Manifest, url: &str, depth: usize) -> String {
    let detail = if manifest.missing.iter().any(|m| m == url) {
        " (missing)".to_string()
    } else if let Some(info) = manifest.assets.get(url) {
        format!(" ({}\u{d7}{})", info.width, info.height)
    } else {
        String::new()
    };
    format!("{}Source: {}{}", indent(depth), url, detail)
}

fn media_lines(manifest: &Manifest, images: &[MediaItem], lines: &mut Vec<String>) {
    for (i, image) in images.iter().enumerate() {
        lines.push(format!(
            "{}{}",
            indent(1),
            image_line(i + 1, &image.title, &image.url)
        ));
        lines.push(source_line(manifest, &image.url, 2));
    }
}

// ============================================================================
// Stage 1: Load output
// ============================================================================

/// Format load stage output: the content inventory with asset status.
pub fn format_load_output(manifest: &Manifest) -> Vec<String> {
    let content = &manifest.content;
    let mut lines = Vec::new();

    lines.push("Modeling".to_string());
    for (i, project) in content.modeling.projects.iter().enumerate() {
        lines.push(entity_header(i + 1, &project.title, project.images.len()));
        let mut category = format!("{}Category: {}", indent(1), project.category);
        if project.printable {
            category.push_str(" \u{b7} printable");
        }
        lines.push(category);
        media_lines(manifest, &project.images, &mut lines);

        if let Some(model) = &project.model {
            let mut detail = Vec::new();
            if let Some(format) = &model.format {
                detail.push(format.clone());
            }
            if let Some(polygons) = model.polygons {
                detail.push(format!("{polygons} polygons"));
            }
            if detail.is_empty() {
                lines.push(format!("{}Model: {}", indent(1), model.title));
            } else {
                lines.push(format!(
                    "{}Model: {} ({})",
                    indent(1),
                    model.title,
                    detail.join(", ")
                ));
            }
            if let Some(preview) = &model.preview_image {
                lines.push(source_line(manifest, preview, 2));
            }
        }
        if let Some(video) = &project.video {
            lines.push(format!("{}Video", indent(1)));
            lines.push(source_line(manifest, &video.url, 2));
        }
    }

    lines.push(String::new());
    lines.push("AI Art".to_string());
    for (i, artwork) in content.ai_art.artworks.iter().enumerate() {
        lines.push(entity_header(i + 1, &artwork.title, artwork.images.len()));
        lines.push(format!(
            "{}Category: {} \u{b7} {}",
            indent(1),
            artwork.category,
            artwork.tool
        ));
        if !artwork.prompt.is_empty() {
            lines.push(format!(
                "{}Prompt: {}",
                indent(1),
                truncate_desc(&artwork.prompt, 60)
            ));
        }
        media_lines(manifest, &artwork.images, &mut lines);
    }

    if !manifest.missing.is_empty() {
        lines.push(String::new());
        lines.push("Missing assets".to_string());
        for url in &manifest.missing {
            lines.push(format!("{}{}", indent(1), url));
        }
    }

    lines
}

/// Print load output to stdout.
pub fn print_load_output(manifest: &Manifest) {
    for line in format_load_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Label of a viewer page relative to its entry: `image 2`, `model`, `video`.
fn viewer_label(path: &str, kind: PageKind) -> String {
    match kind {
        PageKind::Model => "model".to_string(),
        PageKind::Video => "video".to_string(),
        _ => {
            let n = path
                .rsplit('/')
                .next()
                .and_then(|f| f.strip_suffix(".html"))
                .unwrap_or(path);
            format!("image {n}")
        }
    }
}

/// `modeling/planetary-gearbox/1.html` → `modeling/planetary-gearbox`.
fn entry_dir(path: &str) -> &str {
    path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or(path)
}

/// Format generate stage output showing every page written.
///
/// Viewer pages are grouped under the entry they belong to, titled from the
/// manifest.
pub fn format_generate_output(site: &GeneratedSite, manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();

    for (path, _) in site.pages.iter().filter(|(_, k)| *k == PageKind::Index) {
        lines.push(format!("Home \u{2192} {}", path));
    }

    let filters: Vec<&str> = site
        .pages
        .iter()
        .filter(|(_, k)| *k == PageKind::Filter)
        .map(|(p, _)| p.as_str())
        .collect();
    if !filters.is_empty() {
        lines.push(String::new());
        lines.push("Filters".to_string());
        for path in filters {
            lines.push(format!("{}{}", indent(1), path));
        }
    }

    let entries: Vec<(String, &str)> = manifest
        .content
        .modeling
        .projects
        .iter()
        .map(|p| (format!("modeling/{}", p.id), p.title.as_str()))
        .chain(
            manifest
                .content
                .ai_art
                .artworks
                .iter()
                .map(|a| (format!("ai-art/{}", a.id), a.title.as_str())),
        )
        .collect();

    let mut viewer_pages = 0;
    let mut position = 0;
    for (dir, title) in &entries {
        let pages: Vec<&(String, PageKind)> = site
            .pages
            .iter()
            .filter(|(p, k)| {
                matches!(k, PageKind::Image | PageKind::Model | PageKind::Video)
                    && entry_dir(p) == dir
            })
            .collect();
        if pages.is_empty() {
            continue;
        }
        if position == 0 {
            lines.push(String::new());
            lines.push("Viewers".to_string());
        }
        position += 1;
        lines.push(format!("{} {}", format_index(position), title));
        for (path, kind) in pages {
            lines.push(format!(
                "{}{} \u{2192} {}",
                indent(1),
                viewer_label(path, *kind),
                path
            ));
            viewer_pages += 1;
        }
    }

    let counts = site.counts();
    let count = |kind: PageKind| counts.get(&kind).copied().unwrap_or(0);
    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}; copied {}",
        plural(count(PageKind::Index), "index", "indexes"),
        plural(count(PageKind::Filter), "filter page", "filter pages"),
        plural(viewer_pages, "viewer page", "viewer pages"),
        plural(site.assets_copied, "asset", "assets"),
    ));

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(site: &GeneratedSite, manifest: &Manifest) {
    for line in format_generate_output(site, manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
