//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by an optional `config.toml` in the content root. Content (what
//! the page says) lives in `content.toml`; this file only controls how the
//! site looks and behaves.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "3D & AI Portfolio"   # <title> and social preview title
//! description = ""              # <meta name="description">
//! lang = "en"                   # <html lang>
//!
//! [theme]
//! grid_gap = "2rem"             # Gap between cards in gallery grids
//! card_radius = "1rem"          # Corner radius of cards and buttons
//! content_width = "80rem"       # Max width of section content
//!
//! [theme.section_padding]
//! size = "8vw"                  # Preferred vertical section padding
//! min = "3rem"
//! max = "6rem"
//!
//! [colors.light]
//! background = "#f8f7ff"
//! surface = "#ffffff"
//! text = "#14121f"
//! text_muted = "#5b5870"
//! border = "#e4e1f5"
//! accent = "#7c3aed"            # Primary gradient stop, buttons, badges
//! accent_alt = "#0891b2"        # Secondary gradient stop
//!
//! [colors.dark]
//! background = "#0a0a12"
//! surface = "#14141f"
//! text = "#f4f4f8"
//! text_muted = "#a1a1b5"
//! border = "#26263a"
//! accent = "#a855f7"
//! accent_alt = "#22d3ee"
//!
//! [hero]
//! particle_count = 50           # 0 disables the animated background
//! particle_color = "#a855f7"
//! seed = 42                     # Same seed, same initial field
//!
//! [contact]
//! # form_action = "https://formspree.io/f/xxxx"   # POST endpoint for the form
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse; override just the values you want:
//!
//! ```toml
//! [hero]
//! particle_count = 80
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

/// Upper bound for `hero.particle_count`; the browser redraws every particle
/// on every frame.
pub const MAX_PARTICLES: usize = 500;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Document metadata.
    pub site: SiteMeta,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Layout settings (section padding, grid spacing, radii).
    pub theme: ThemeConfig,
    /// Animated particle background of the hero section.
    pub hero: HeroConfig,
    /// Contact form hand-off.
    pub contact: ContactConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.title must not be empty".into(),
            ));
        }
        if self.site.lang.trim().is_empty() {
            return Err(ConfigError::Validation("site.lang must not be empty".into()));
        }
        if self.hero.particle_count > MAX_PARTICLES {
            return Err(ConfigError::Validation(format!(
                "hero.particle_count must be at most {MAX_PARTICLES}"
            )));
        }
        if let Some(action) = &self.contact.form_action {
            let ok = action.starts_with("https://")
                || action.starts_with("http://")
                || action.starts_with('/');
            if !ok {
                return Err(ConfigError::Validation(format!(
                    "contact.form_action must be an http(s) URL or a site path, got '{action}'"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    pub title: String,
    pub description: String,
    pub lang: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "3D & AI Portfolio".to_string(),
            description: String::new(),
            lang: "en".to_string(),
        }
    }
}

/// A responsive CSS size expressed as `clamp(min, size, max)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClampSize {
    /// Preferred/fluid value, typically viewport-relative (e.g. `"8vw"`).
    pub size: String,
    pub min: String,
    pub max: String,
}

impl ClampSize {
    /// Render as a CSS `clamp()` expression.
    pub fn to_css(&self) -> String {
        format!("clamp({}, {}, {})", self.min, self.size, self.max)
    }
}

/// Theme/layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Vertical padding of each page section.
    pub section_padding: ClampSize,
    /// Gap between cards in gallery grids (CSS value).
    pub grid_gap: String,
    /// Corner radius of cards and buttons (CSS value).
    pub card_radius: String,
    /// Maximum width of section content (CSS value).
    pub content_width: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            section_padding: ClampSize {
                size: "8vw".to_string(),
                min: "3rem".to_string(),
                max: "6rem".to_string(),
            },
            grid_gap: "2rem".to_string(),
            card_radius: "1rem".to_string(),
            content_width: "80rem".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    /// Card and overlay panel background.
    pub surface: String,
    pub text: String,
    /// Secondary text: captions, metadata, counters.
    pub text_muted: String,
    pub border: String,
    /// Primary accent; first stop of the headline gradient.
    pub accent: String,
    /// Secondary accent; last stop of the headline gradient.
    pub accent_alt: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f8f7ff".to_string(),
            surface: "#ffffff".to_string(),
            text: "#14121f".to_string(),
            text_muted: "#5b5870".to_string(),
            border: "#e4e1f5".to_string(),
            accent: "#7c3aed".to_string(),
            accent_alt: "#0891b2".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0a0a12".to_string(),
            surface: "#14141f".to_string(),
            text: "#f4f4f8".to_string(),
            text_muted: "#a1a1b5".to_string(),
            border: "#26263a".to_string(),
            accent: "#a855f7".to_string(),
            accent_alt: "#22d3ee".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

/// Hero particle background.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroConfig {
    /// Number of particles. `0` renders the hero without a canvas.
    pub particle_count: usize,
    /// CSS color of every particle; opacity varies per particle.
    pub particle_color: String,
    /// Seed of the initial field, so rebuilds produce identical pages.
    pub seed: u64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            particle_count: 50,
            particle_color: "#a855f7".to_string(),
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Endpoint the contact form posts to. Without one the form hands off to
    /// the visitor's mail client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_action: Option<String>,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Atelier Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file next to content.toml. Only the keys you want to change
# are needed. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Document metadata
# ---------------------------------------------------------------------------
[site]
title = "3D & AI Portfolio"
description = ""
lang = "en"

# ---------------------------------------------------------------------------
# Theme / layout
# ---------------------------------------------------------------------------
[theme]
# Gap between cards in gallery grids (CSS value).
grid_gap = "2rem"

# Corner radius of cards and buttons (CSS value).
card_radius = "1rem"

# Maximum width of section content (CSS value).
content_width = "80rem"

# Vertical padding of each section, as CSS clamp(min, size, max).
[theme.section_padding]
size = "8vw"
min = "3rem"
max = "6rem"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#f8f7ff"
surface = "#ffffff"       # Cards, viewer panels
text = "#14121f"
text_muted = "#5b5870"    # Captions, metadata, counters
border = "#e4e1f5"
accent = "#7c3aed"        # Buttons, badges, gradient start
accent_alt = "#0891b2"    # Gradient end

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0a0a12"
surface = "#14141f"
text = "#f4f4f8"
text_muted = "#a1a1b5"
border = "#26263a"
accent = "#a855f7"
accent_alt = "#22d3ee"

# ---------------------------------------------------------------------------
# Hero particle background
# ---------------------------------------------------------------------------
[hero]
# Number of drifting particles (0 disables the canvas, at most 500).
particle_count = 50
particle_color = "#a855f7"
# Seed for the initial particle field. Same seed, same page.
seed = 42

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[contact]
# Endpoint that receives the form as a POST. Without it, submitting opens
# the visitor's mail client addressed to contact.email from content.toml.
# form_action = "https://formspree.io/f/your-form-id"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
{light}
}}

@media (prefers-color-scheme: dark) {{
    :root {{
{dark}
    }}
}}"#,
        light = scheme_properties(&colors.light, "    "),
        dark = scheme_properties(&colors.dark, "        "),
    )
}

fn scheme_properties(scheme: &ColorScheme, indent: &str) -> String {
    [
        ("--color-bg", &scheme.background),
        ("--color-surface", &scheme.surface),
        ("--color-text", &scheme.text),
        ("--color-text-muted", &scheme.text_muted),
        ("--color-border", &scheme.border),
        ("--color-accent", &scheme.accent),
        ("--color-accent-alt", &scheme.accent_alt),
    ]
    .iter()
    .map(|(name, value)| format!("{indent}{name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Generate CSS custom properties from theme config.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --section-padding: {section_padding};
    --grid-gap: {grid_gap};
    --card-radius: {card_radius};
    --content-width: {content_width};
}}"#,
        section_padding = theme.section_padding.to_css(),
        grid_gap = theme.grid_gap,
        card_radius = theme.card_radius,
        content_width = theme.content_width,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_colors() {
        let config = SiteConfig::default();
        assert_eq!(config.colors.light.background, "#f8f7ff");
        assert_eq!(config.colors.dark.background, "#0a0a12");
    }

    #[test]
    fn default_config_has_hero_settings() {
        let config = SiteConfig::default();
        assert_eq!(config.hero.particle_count, 50);
        assert_eq!(config.hero.seed, 42);
        assert!(config.contact.form_action.is_none());
        assert_eq!(
            config.theme.section_padding.to_css(),
            "clamp(3rem, 8vw, 6rem)"
        );
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors.dark]
accent = "#ff00aa"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.colors.dark.accent, "#ff00aa");
        // Default values preserved
        assert_eq!(config.colors.dark.text, "#f4f4f8");
        assert_eq!(config.colors.light.background, "#f8f7ff");
        assert_eq!(config.hero.particle_count, 50);
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.light.background = "#f0f0f0".to_string();
        colors.dark.background = "#1a1a1a".to_string();

        let css = generate_color_css(&colors);
        assert!(css.contains("--color-bg: #f0f0f0"));
        assert!(css.contains("--color-bg: #1a1a1a"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();

        assert_eq!(config.site.title, "3D & AI Portfolio");
        assert_eq!(config.colors.dark.background, "#0a0a12");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
[site]
title = "Studio"

[hero]
particle_count = 80

[contact]
form_action = "https://forms.example.com/f/abc"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title, "Studio");
        assert_eq!(config.site.lang, "en");
        assert_eq!(config.hero.particle_count, 80);
        assert_eq!(config.hero.seed, 42);
        assert_eq!(
            config.contact.form_action.as_deref(),
            Some("https://forms.example.com/f/abc")
        );
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // CSS generation tests
    // =========================================================================

    #[test]
    fn generate_css_includes_all_variables() {
        let css = generate_color_css(&ColorConfig::default());
        for var in [
            "--color-bg:",
            "--color-surface:",
            "--color-text:",
            "--color-text-muted:",
            "--color-border:",
            "--color-accent:",
            "--color-accent-alt:",
        ] {
            assert_eq!(css.matches(var).count(), 2, "{var} in both schemes");
        }
    }

    #[test]
    fn generate_css_includes_dark_mode_media_query() {
        let css = generate_color_css(&ColorConfig::default());
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
    }

    #[test]
    fn generate_theme_css_includes_layout_variables() {
        let css = generate_theme_css(&ThemeConfig::default());
        assert!(css.contains("--section-padding: clamp(3rem, 8vw, 6rem)"));
        assert!(css.contains("--grid-gap: 2rem"));
        assert!(css.contains("--card-radius: 1rem"));
        assert!(css.contains("--content-width: 80rem"));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1").unwrap();
        let overlay: toml::Value = toml::from_str("a = 2").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(2));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r#"
[theme.section_padding]
size = "8vw"
min = "3rem"
max = "6rem"
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[theme.section_padding]
min = "1rem"
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let padding = merged.get("theme").unwrap().get("section_padding").unwrap();
        assert_eq!(padding.get("size").unwrap().as_str(), Some("8vw"));
        assert_eq!(padding.get("min").unwrap().as_str(), Some("1rem"));
        assert_eq!(padding.get("max").unwrap().as_str(), Some("6rem"));
    }

    // =========================================================================
    // Unknown keys and validation
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[hero]\nparticles = 10\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[images]\nquality = 90\n");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[site]\ntitel = \"typo\"\n").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_particle_count_boundary() {
        let mut config = SiteConfig::default();
        config.hero.particle_count = MAX_PARTICLES;
        assert!(config.validate().is_ok());
        config.hero.particle_count = MAX_PARTICLES + 1;
        assert!(config.validate().is_err());
        config.hero.particle_count = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_empty_title() {
        let mut config = SiteConfig::default();
        config.site.title = "  ".into();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_form_action_scheme() {
        let mut config = SiteConfig::default();
        config.contact.form_action = Some("/api/contact".into());
        assert!(config.validate().is_ok());
        config.contact.form_action = Some("javascript:alert(1)".into());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("contact.form_action"));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[hero]\nparticle_count = 9000\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    // =========================================================================
    // resolve_config / load_raw_config tests
    // =========================================================================

    #[test]
    fn load_raw_config_returns_none_when_no_file() {
        let tmp = TempDir::new().unwrap();
        assert!(load_raw_config(tmp.path()).unwrap().is_none());
    }

    #[test]
    fn resolve_config_with_overlay() {
        let overlay: toml::Value = toml::from_str("[hero]\nseed = 7\n").unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.hero.seed, 7);
        assert_eq!(config.hero.particle_count, 50);
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.site.title, defaults.site.title);
        assert_eq!(config.colors.light.accent, defaults.colors.light.accent);
        assert_eq!(config.colors.dark.accent_alt, defaults.colors.dark.accent_alt);
        assert_eq!(config.theme.grid_gap, defaults.theme.grid_gap);
        assert_eq!(config.hero.particle_count, defaults.hero.particle_count);
        assert_eq!(config.hero.particle_color, defaults.hero.particle_color);
        assert!(config.contact.form_action.is_none());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        for section in [
            "[site]",
            "[theme]",
            "[theme.section_padding]",
            "[colors.light]",
            "[colors.dark]",
            "[hero]",
            "[contact]",
        ] {
            assert!(content.contains(section), "missing {section}");
        }
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        for key in ["site", "colors", "theme", "hero", "contact"] {
            assert!(val.get(key).is_some(), "missing {key}");
        }
    }
}
