//! Shared types used across both pipeline stages.
//!
//! These types are serialized to JSON between stages (load → generate)
//! and consumed read-only by the viewers and renderers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One unit of displayable media: an image, a model preview or a video.
///
/// Items are immutable once loaded. An empty `id` in `content.toml` is
/// filled in at load time as `{entry-id}-{n}` (1-based position).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MediaItem {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    /// Source URL (absolute, or relative to the site root for local assets)
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    /// Suggested filename for downloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software: Option<String>,
}

impl MediaItem {
    /// Thumbnail if one is declared, the full source otherwise.
    pub fn thumbnail_or_url(&self) -> &str {
        self.thumbnail.as_deref().unwrap_or(&self.url)
    }
}

/// Page sections, in the fixed order the page shell mounts them.
///
/// The anchor ids are the only load-bearing part of the markup contract:
/// navigation, call-to-action buttons and viewer close links all target them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Home,
    About,
    Modeling,
    AiArt,
    Services,
    Contact,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Home,
        Section::About,
        Section::Modeling,
        Section::AiArt,
        Section::Services,
        Section::Contact,
    ];

    pub fn anchor(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::About => "about",
            Section::Modeling => "modeling",
            Section::AiArt => "ai-art",
            Section::Services => "services",
            Section::Contact => "contact",
        }
    }

    /// `#anchor` form used in hrefs on the index page.
    pub fn href(self) -> String {
        format!("#{}", self.anchor())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor())
    }
}

/// Navigation bar entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavItem {
    pub label: String,
    pub section: Section,
}

/// Link with a label, used by footer columns and social links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Link {
    pub label: String,
    pub href: String,
}
