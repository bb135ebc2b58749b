//! Video viewer with transport controls.
//!
//! The viewer owns playback intent (playing, position, volume, rate); the
//! host media element reports facts back through [`VideoViewer::loaded_metadata`],
//! [`VideoViewer::time_update`], [`VideoViewer::ended`] and
//! [`VideoViewer::load_failed`]. Time is injected as [`Instant`]s so the
//! controls auto-hide rule can be exercised without sleeping.

use super::keys::{Key, Shortcut, shortcut};
use super::{KeyOutcome, Overlay, Viewer};
use crate::platform::Platform;
use crate::types::MediaItem;
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

/// Controls hide after this long without pointer movement while playing.
pub const CONTROLS_IDLE: Duration = Duration::from_secs(3);
pub const SEEK_STEP: f64 = 10.0;
pub const VOLUME_STEP: f64 = 0.1;

const DEFAULT_FILENAME: &str = "video.mp4";

const SHORTCUTS: &[Shortcut] = &[
    shortcut("Esc", "Close"),
    shortcut("Space", "Play / pause"),
    shortcut("← →", "Seek 10 s"),
    shortcut("↑ ↓", "Volume"),
    shortcut("M", "Mute"),
    shortcut("F", "Fullscreen"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PlaybackRate {
    Quarter,
    Half,
    ThreeQuarters,
    #[default]
    Normal,
    OneAndQuarter,
    OneAndHalf,
    Double,
}

impl PlaybackRate {
    pub const ALL: [PlaybackRate; 7] = [
        PlaybackRate::Quarter,
        PlaybackRate::Half,
        PlaybackRate::ThreeQuarters,
        PlaybackRate::Normal,
        PlaybackRate::OneAndQuarter,
        PlaybackRate::OneAndHalf,
        PlaybackRate::Double,
    ];

    pub fn factor(self) -> f64 {
        match self {
            PlaybackRate::Quarter => 0.25,
            PlaybackRate::Half => 0.5,
            PlaybackRate::ThreeQuarters => 0.75,
            PlaybackRate::Normal => 1.0,
            PlaybackRate::OneAndQuarter => 1.25,
            PlaybackRate::OneAndHalf => 1.5,
            PlaybackRate::Double => 2.0,
        }
    }

    /// Exact match against the enumerated set.
    pub fn from_factor(factor: f64) -> Option<PlaybackRate> {
        Self::ALL.into_iter().find(|r| r.factor() == factor)
    }
}

impl fmt::Display for PlaybackRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.factor())
    }
}

/// `m:ss` label for a position in seconds.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

#[derive(Debug)]
pub struct VideoViewer {
    video: Option<MediaItem>,
    playing: bool,
    current_time: f64,
    duration: f64,
    volume: f64,
    muted: bool,
    rate: PlaybackRate,
    controls_visible: bool,
    last_activity: Option<Instant>,
    show_settings: bool,
    error: Option<String>,
    overlay: Overlay,
}

impl Default for VideoViewer {
    fn default() -> Self {
        Self {
            video: None,
            playing: false,
            current_time: 0.0,
            duration: 0.0,
            volume: 1.0,
            muted: false,
            rate: PlaybackRate::Normal,
            controls_visible: true,
            last_activity: None,
            show_settings: false,
            error: None,
            overlay: Overlay::default(),
        }
    }
}

impl VideoViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, video: MediaItem, platform: &mut dyn Platform) {
        self.reset_session();
        self.video = Some(video);
        self.overlay.open(platform);
    }

    /// The video to render, or `None` while closed.
    pub fn video(&self) -> Option<&MediaItem> {
        if !self.overlay.is_open() {
            return None;
        }
        self.video.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn rate(&self) -> PlaybackRate {
        self.rate
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn show_settings(&self) -> bool {
        self.show_settings
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Played fraction in `[0, 1]`; zero until the duration is known.
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// `"1:05 / 3:20"` style position label.
    pub fn time_label(&self) -> String {
        format!(
            "{} / {}",
            format_time(self.current_time),
            format_time(self.duration)
        )
    }

    pub fn toggle_play(&mut self) {
        if self.video.is_none() || self.error.is_some() {
            return;
        }
        self.playing = !self.playing;
        if !self.playing {
            self.controls_visible = true;
        }
    }

    /// Seek to an absolute position, clamped to `[0, duration]`.
    pub fn seek(&mut self, seconds: f64) {
        if seconds.is_nan() {
            return;
        }
        self.current_time = seconds.clamp(0.0, self.duration.max(0.0));
    }

    pub fn seek_by(&mut self, delta: f64) {
        self.seek(self.current_time + delta);
    }

    pub fn set_volume(&mut self, volume: f64) {
        if !volume.is_nan() {
            self.volume = volume.clamp(0.0, 1.0);
        }
    }

    /// Step the volume by `delta`, snapping to tenths so repeated steps
    /// land on exact values.
    pub fn step_volume(&mut self, delta: f64) {
        let stepped = ((self.volume + delta) * 10.0).round() / 10.0;
        self.set_volume(stepped);
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn set_rate(&mut self, rate: PlaybackRate) {
        self.rate = rate;
    }

    pub fn toggle_settings(&mut self) {
        self.show_settings = !self.show_settings;
    }

    pub fn toggle_fullscreen(&mut self, platform: &mut dyn Platform) -> bool {
        self.overlay.toggle_fullscreen(platform)
    }

    /// Any pointer movement shows the controls and restarts the idle timer.
    pub fn pointer_moved(&mut self, now: Instant) {
        self.controls_visible = true;
        self.last_activity = Some(now);
    }

    /// Hide the controls once playback has been idle for [`CONTROLS_IDLE`].
    pub fn tick(&mut self, now: Instant) {
        if !self.playing {
            return;
        }
        if let Some(last) = self.last_activity {
            if now.saturating_duration_since(last) >= CONTROLS_IDLE {
                self.controls_visible = false;
            }
        }
    }

    pub fn loaded_metadata(&mut self, duration: f64) {
        if duration.is_finite() && duration >= 0.0 {
            self.duration = duration;
            self.current_time = self.current_time.min(duration);
        }
    }

    pub fn time_update(&mut self, seconds: f64) {
        if seconds.is_finite() {
            self.current_time = seconds.max(0.0);
        }
    }

    pub fn ended(&mut self) {
        self.playing = false;
        self.controls_visible = true;
    }

    pub fn load_failed(&mut self, reason: impl Into<String>) {
        if !self.overlay.is_open() {
            return;
        }
        let reason = reason.into();
        tracing::warn!(%reason, "video failed to load");
        self.error = Some(reason);
        self.playing = false;
        self.controls_visible = true;
    }

    pub fn download(&mut self, platform: &mut dyn Platform) {
        let Some(video) = self.video() else {
            return;
        };
        let Some(url) = video.download_url.clone() else {
            return;
        };
        let filename = video
            .filename
            .clone()
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string());
        super::download(platform, &url, &filename);
    }

    fn reset_session(&mut self) {
        let overlay = std::mem::take(&mut self.overlay);
        *self = Self {
            overlay,
            ..Self::default()
        };
    }
}

impl Viewer for VideoViewer {
    fn is_open(&self) -> bool {
        self.overlay.is_open()
    }

    fn close(&mut self, platform: &mut dyn Platform) {
        self.overlay.close(platform);
        self.reset_session();
    }

    fn handle_key(&mut self, key: Key, platform: &mut dyn Platform) -> KeyOutcome {
        if !self.is_open() {
            return KeyOutcome::Ignored;
        }
        match key {
            Key::Escape => self.close(platform),
            Key::Space => self.toggle_play(),
            Key::ArrowLeft => self.seek_by(-SEEK_STEP),
            Key::ArrowRight => self.seek_by(SEEK_STEP),
            Key::ArrowUp => self.step_volume(VOLUME_STEP),
            Key::ArrowDown => self.step_volume(-VOLUME_STEP),
            Key::Char('m') => self.toggle_mute(),
            Key::Char('f') => {
                self.toggle_fullscreen(platform);
            }
            _ => return KeyOutcome::Ignored,
        }
        KeyOutcome::Handled
    }

    fn shortcuts(&self) -> &'static [Shortcut] {
        SHORTCUTS
    }
}
