//! Host capabilities the viewers and the hero animation depend on.
//!
//! Everything that touches process-wide page state (scroll lock, fullscreen,
//! downloads, visibility observation) goes through the [`Platform`] trait so
//! the viewer logic stays pure. Capabilities are handed out as explicit
//! handles: whoever acquires a [`ScrollLock`] or an [`Observation`] must give
//! it back through the matching release call.
//!
//! Fullscreen and download are best-effort conveniences. Implementations
//! report denial through [`PlatformError`]; callers log and carry on.
//!
//! [`Headless`] is an in-memory implementation that records every call. The
//! generator uses it to open viewer sessions for rendering, and tests use it
//! to assert side effects.

use crate::types::Section;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("{0} denied by host")]
    Denied(&'static str),
    #[error("{0} not supported by host")]
    Unsupported(&'static str),
    #[error("unknown visibility observation {0}")]
    UnknownObservation(u64),
}

/// Proof that page scrolling is locked. Must be returned via
/// [`Platform::release_scroll`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a scroll lock must be released"]
pub struct ScrollLock(u64);

/// Handle for an active visibility observation on a page section.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an observation must be released with unobserve"]
pub struct Observation(u64);

pub trait Platform {
    fn lock_scroll(&mut self) -> ScrollLock;
    fn release_scroll(&mut self, lock: ScrollLock);

    fn is_fullscreen(&self) -> bool;
    fn request_fullscreen(&mut self) -> Result<(), PlatformError>;
    fn exit_fullscreen(&mut self) -> Result<(), PlatformError>;

    /// Trigger a local download of `url`, saved as `filename`.
    fn download(&mut self, url: &str, filename: &str) -> Result<(), PlatformError>;

    fn observe(&mut self, section: Section) -> Result<Observation, PlatformError>;
    fn is_visible(&self, observation: &Observation) -> bool;
    fn unobserve(&mut self, observation: Observation);
}

/// Record of a download handed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub filename: String,
}

/// In-memory platform with no real page behind it.
#[derive(Debug, Default)]
pub struct Headless {
    next_handle: u64,
    scroll_locks: Vec<u64>,
    fullscreen: bool,
    deny_fullscreen: bool,
    deny_download: bool,
    downloads: Vec<DownloadRequest>,
    observations: BTreeMap<u64, Section>,
    hidden: Vec<Section>,
}

impl Headless {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every fullscreen request fail, like a host without the API.
    pub fn deny_fullscreen(mut self) -> Self {
        self.deny_fullscreen = true;
        self
    }

    pub fn deny_downloads(mut self) -> Self {
        self.deny_download = true;
        self
    }

    pub fn scroll_locked(&self) -> bool {
        !self.scroll_locks.is_empty()
    }

    pub fn downloads(&self) -> &[DownloadRequest] {
        &self.downloads
    }

    pub fn active_observations(&self) -> usize {
        self.observations.len()
    }

    /// Simulate a section scrolling in or out of view.
    pub fn set_visible(&mut self, section: Section, visible: bool) {
        self.hidden.retain(|s| *s != section);
        if !visible {
            self.hidden.push(section);
        }
    }

    fn next_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }
}

impl Platform for Headless {
    fn lock_scroll(&mut self) -> ScrollLock {
        let id = self.next_handle();
        self.scroll_locks.push(id);
        ScrollLock(id)
    }

    fn release_scroll(&mut self, lock: ScrollLock) {
        self.scroll_locks.retain(|id| *id != lock.0);
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn request_fullscreen(&mut self) -> Result<(), PlatformError> {
        if self.deny_fullscreen {
            return Err(PlatformError::Denied("fullscreen"));
        }
        self.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), PlatformError> {
        if !self.fullscreen {
            return Err(PlatformError::Unsupported("exit fullscreen outside fullscreen"));
        }
        self.fullscreen = false;
        Ok(())
    }

    fn download(&mut self, url: &str, filename: &str) -> Result<(), PlatformError> {
        if self.deny_download {
            return Err(PlatformError::Denied("download"));
        }
        self.downloads.push(DownloadRequest {
            url: url.to_string(),
            filename: filename.to_string(),
        });
        Ok(())
    }

    fn observe(&mut self, section: Section) -> Result<Observation, PlatformError> {
        let id = self.next_handle();
        self.observations.insert(id, section);
        Ok(Observation(id))
    }

    fn is_visible(&self, observation: &Observation) -> bool {
        self.observations
            .get(&observation.0)
            .is_some_and(|section| !self.hidden.contains(section))
    }

    fn unobserve(&mut self, observation: Observation) {
        self.observations.remove(&observation.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_stays_locked_until_every_lock_is_released() {
        let mut platform = Headless::new();
        let a = platform.lock_scroll();
        let b = platform.lock_scroll();
        platform.release_scroll(a);
        assert!(platform.scroll_locked());
        platform.release_scroll(b);
        assert!(!platform.scroll_locked());
    }

    #[test]
    fn denied_fullscreen_reports_error_and_stays_windowed() {
        let mut platform = Headless::new().deny_fullscreen();
        assert_eq!(
            platform.request_fullscreen(),
            Err(PlatformError::Denied("fullscreen"))
        );
        assert!(!platform.is_fullscreen());
    }

    #[test]
    fn downloads_are_recorded() {
        let mut platform = Headless::new();
        platform.download("/a.png", "a").unwrap();
        assert_eq!(
            platform.downloads(),
            &[DownloadRequest {
                url: "/a.png".into(),
                filename: "a".into()
            }]
        );
    }

    #[test]
    fn visibility_follows_section_state() {
        let mut platform = Headless::new();
        let obs = platform.observe(Section::Home).unwrap();
        assert!(platform.is_visible(&obs));
        platform.set_visible(Section::Home, false);
        assert!(!platform.is_visible(&obs));
        platform.unobserve(obs);
        assert_eq!(platform.active_observations(), 0);
    }
}
