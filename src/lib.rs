//! # Atelier
//!
//! A static single-page portfolio for a 3D modeler and AI artist. One
//! `content.toml` describes the page: hero, about, a filterable 3D modeling
//! gallery, a filterable AI art gallery, services, contact and footer. Every
//! image, model and video gets a full-screen viewer.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Load      content/  →  manifest.json    (content + config + asset probe)
//! 2. Generate  manifest  →  dist/            (final HTML site)
//! ```
//!
//! The manifest is human-readable JSON, so a broken page can be traced to
//! either the content (inspect the manifest) or the renderer.
//!
//! # Interaction Model
//!
//! The interactive parts of the page are modelled as plain state machines
//! that know nothing about HTML:
//!
//! - [`gallery::Gallery`]: a list of entries and the active filter.
//! - [`viewer`]: image, model and video overlays with open/close sessions,
//!   keyboard handling and view transforms.
//! - [`particles`]: the seeded hero background.
//!
//! Anything they need from the browser (scroll lock, fullscreen, downloads,
//! section visibility) goes through the [`platform::Platform`] trait. The
//! generator drives them on [`platform::Headless`] to render each viewer page
//! as a snapshot of a freshly opened session; `viewer.js` and `particles.js`
//! carry the same rules to the browser.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`load`] | Stage 1: reads content and config, probes local assets, produces the manifest |
//! | [`generate`] | Stage 2: renders the index, filter and viewer pages with Maud |
//! | [`content`] | `content.toml` schema, validation and the stock example |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | Shared types: media items, page sections, links |
//! | [`gallery`] | Filter definitions and filtered views over entries |
//! | [`viewer`] | Full-screen image, model and video viewers |
//! | [`particles`] | Hero particle field and its visibility-gated animation |
//! | [`contact`] | Contact form fields and the endpoint / `mailto:` hand-off |
//! | [`platform`] | Host capabilities behind a trait, plus an in-memory host |
//! | [`output`] | CLI output formatting of pipeline results |
//!
//! # Design Decisions
//!
//! ## Links Over Scripts
//!
//! Filters are separate pages (`/modeling/blender.html`), viewer navigation
//! is a set of links, and closing a viewer returns to the entry's card. The
//! scripts only add keyboard shortcuts and live controls on top.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Malformed markup is a build error and all interpolation is
//! auto-escaped, which matters for prompts and descriptions pasted from
//! elsewhere.
//!
//! ## Deterministic Output
//!
//! The hero particle field comes from a seeded RNG and the copyright line
//! from content, so building the same content twice produces identical files.

pub mod config;
pub mod contact;
pub mod content;
pub mod gallery;
pub mod generate;
pub mod load;
pub mod output;
pub mod particles;
pub mod platform;
pub mod types;
pub mod viewer;

#[cfg(test)]
pub(crate) mod test_helpers;
