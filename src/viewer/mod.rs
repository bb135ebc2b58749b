//! Full-screen media viewers.
//!
//! Three viewers share one shape: an [`Overlay`] that is either closed or
//! open, and a nested view state that free-runs while open.
//!
//! ```text
//!            open()                 close() / Escape / unmount()
//! Closed ───────────────▶ Open ─────────────────────────────────▶ Closed
//!                          │  ▲
//!                          └──┘ navigate / zoom / rotate / seek / ...
//! ```
//!
//! Opening acquires a scroll lock from the [`Platform`]; closing releases it
//! and leaves fullscreen if the viewer entered it. Transient view state is
//! reset on every close, so a reopened viewer always starts from defaults.
//!
//! | Viewer | Nested state |
//! |--------|--------------|
//! | [`ImageViewer`] | index into an image sequence + flat [`Transform`] |
//! | [`ModelViewer`] | orbit/zoom [`Transform`], info panel, load state |
//! | [`VideoViewer`] | playback position, volume, rate, controls visibility |

pub mod image;
pub mod keys;
pub mod model;
pub mod transform;
pub mod video;

pub use self::image::ImageViewer;
pub use self::keys::{Key, Shortcut};
pub use self::model::{LoadState, ModelViewer};
pub use self::transform::{Offset, Transform, TransformAction};
pub use self::video::{PlaybackRate, VideoViewer};

use crate::platform::{Platform, ScrollLock};

/// Whether a viewer consumed a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Ignored,
}

/// Behaviour common to every viewer overlay.
pub trait Viewer {
    fn is_open(&self) -> bool;

    /// Close the overlay and drop its transient state.
    fn close(&mut self, platform: &mut dyn Platform);

    /// Keys are only handled while the viewer is open.
    fn handle_key(&mut self, key: Key, platform: &mut dyn Platform) -> KeyOutcome;

    fn shortcuts(&self) -> &'static [Shortcut];

    /// Host teardown. Identical to closing.
    fn unmount(&mut self, platform: &mut dyn Platform) {
        self.close(platform);
    }
}

/// Open/closed state plus the page-level resources an open overlay holds.
#[derive(Debug, Default)]
pub struct Overlay {
    scroll_lock: Option<ScrollLock>,
    entered_fullscreen: bool,
}

impl Overlay {
    pub fn is_open(&self) -> bool {
        self.scroll_lock.is_some()
    }

    pub fn open(&mut self, platform: &mut dyn Platform) {
        if self.scroll_lock.is_none() {
            self.scroll_lock = Some(platform.lock_scroll());
        }
    }

    pub fn close(&mut self, platform: &mut dyn Platform) {
        if let Some(lock) = self.scroll_lock.take() {
            platform.release_scroll(lock);
        }
        if self.entered_fullscreen {
            self.entered_fullscreen = false;
            if let Err(err) = platform.exit_fullscreen() {
                tracing::debug!(error = %err, "leaving fullscreen on close failed");
            }
        }
    }

    /// Best-effort fullscreen toggle. Returns the resulting fullscreen state.
    pub fn toggle_fullscreen(&mut self, platform: &mut dyn Platform) -> bool {
        let result = if platform.is_fullscreen() {
            platform.exit_fullscreen().map(|()| false)
        } else {
            platform.request_fullscreen().map(|()| true)
        };
        match result {
            Ok(entered) => self.entered_fullscreen = entered,
            Err(err) => tracing::debug!(error = %err, "fullscreen toggle ignored"),
        }
        platform.is_fullscreen()
    }
}

/// Best-effort download; denial is logged and otherwise ignored.
pub(crate) fn download(platform: &mut dyn Platform, url: &str, filename: &str) {
    if let Err(err) = platform.download(url, filename) {
        tracing::debug!(error = %err, url, "download ignored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Headless;

    #[test]
    fn open_is_idempotent_and_close_releases() {
        let mut platform = Headless::new();
        let mut overlay = Overlay::default();
        overlay.open(&mut platform);
        overlay.open(&mut platform);
        assert!(overlay.is_open());
        overlay.close(&mut platform);
        assert!(!overlay.is_open());
        assert!(!platform.scroll_locked());
    }

    #[test]
    fn close_leaves_fullscreen_entered_by_overlay() {
        let mut platform = Headless::new();
        let mut overlay = Overlay::default();
        overlay.open(&mut platform);
        assert!(overlay.toggle_fullscreen(&mut platform));
        overlay.close(&mut platform);
        assert!(!platform.is_fullscreen());
    }

    #[test]
    fn denied_fullscreen_is_silent() {
        let mut platform = Headless::new().deny_fullscreen();
        let mut overlay = Overlay::default();
        overlay.open(&mut platform);
        assert!(!overlay.toggle_fullscreen(&mut platform));
        overlay.close(&mut platform);
        assert!(!platform.scroll_locked());
    }
}
