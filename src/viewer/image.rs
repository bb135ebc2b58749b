//! Image viewer: one image at a time from an ordered sequence.
//!
//! Navigation wraps around in both directions and always resets the
//! transform. Panning is a drag gesture that only engages while zoomed in.

use super::keys::{Key, Shortcut, shortcut};
use super::transform::{Offset, Transform, TransformAction};
use super::{KeyOutcome, Overlay, Viewer};
use crate::platform::Platform;
use crate::types::MediaItem;

const SHORTCUTS: &[Shortcut] = &[
    shortcut("Esc", "Close"),
    shortcut("← →", "Previous / next image"),
    shortcut("+ −", "Zoom in / out"),
    shortcut("R", "Rotate 90°"),
];

#[derive(Debug, Default)]
pub struct ImageViewer {
    items: Vec<MediaItem>,
    index: usize,
    transform: Transform,
    drag_from: Option<Offset>,
    overlay: Overlay,
}

impl ImageViewer {
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Replace the sequence. The session restarts at the first image, or
    /// closes when there is nothing left to show.
    pub fn set_items(&mut self, items: Vec<MediaItem>, platform: &mut dyn Platform) {
        self.items = items;
        if self.items.is_empty() {
            self.close(platform);
        } else {
            self.reset_session();
        }
    }

    /// Open at `index` (clamped to the sequence). An empty sequence never
    /// opens: there is nothing to show.
    pub fn open(&mut self, index: usize, platform: &mut dyn Platform) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.reset_session();
        self.index = index.min(self.items.len() - 1);
        self.overlay.open(platform);
        true
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// The image to render, or `None` when closed or empty.
    pub fn current(&self) -> Option<&MediaItem> {
        if !self.overlay.is_open() {
            return None;
        }
        self.items.get(self.index)
    }

    /// `"2 / 5"` style position label.
    pub fn counter(&self) -> String {
        format!("{} / {}", self.index + 1, self.items.len())
    }

    /// Prev/next controls and the thumbnail strip only make sense with more
    /// than one image.
    pub fn has_navigation(&self) -> bool {
        self.items.len() > 1
    }

    pub fn next_index(&self) -> usize {
        match self.items.len() {
            0 => 0,
            n => (self.index + 1) % n,
        }
    }

    pub fn previous_index(&self) -> usize {
        match self.items.len() {
            0 => 0,
            n => (self.index + n - 1) % n,
        }
    }

    pub fn next(&mut self) {
        self.index = self.next_index();
        self.reset();
    }

    pub fn previous(&mut self) {
        self.index = self.previous_index();
        self.reset();
    }

    /// Jump to a thumbnail. Out-of-range positions clamp to the last image.
    pub fn select(&mut self, index: usize) {
        if self.items.is_empty() {
            return;
        }
        self.index = index.min(self.items.len() - 1);
        self.reset();
    }

    pub fn zoom_in(&mut self) {
        self.apply(TransformAction::ZoomIn);
    }

    pub fn zoom_out(&mut self) {
        self.apply(TransformAction::ZoomOut);
    }

    pub fn rotate(&mut self) {
        self.apply(TransformAction::Rotate);
    }

    pub fn reset(&mut self) {
        self.apply(TransformAction::Reset);
        self.drag_from = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        if self.transform.can_pan() {
            self.drag_from = Some(Offset::new(x, y));
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let Some(from) = self.drag_from else {
            return;
        };
        self.apply(TransformAction::Pan {
            dx: x - from.x,
            dy: y - from.y,
        });
        self.drag_from = Some(Offset::new(x, y));
    }

    /// Pointer released or left the frame.
    pub fn pointer_up(&mut self) {
        self.drag_from = None;
    }

    /// Download the current image, named after its title.
    pub fn download(&mut self, platform: &mut dyn Platform) {
        let Some(item) = self.current() else {
            return;
        };
        let url = item.download_url.as_deref().unwrap_or(&item.url).to_string();
        let filename = item
            .filename
            .clone()
            .or_else(|| (!item.title.is_empty()).then(|| item.title.clone()))
            .unwrap_or_else(|| "image".to_string());
        super::download(platform, &url, &filename);
    }

    pub fn toggle_fullscreen(&mut self, platform: &mut dyn Platform) -> bool {
        self.overlay.toggle_fullscreen(platform)
    }

    fn apply(&mut self, action: TransformAction) {
        self.transform = self.transform.apply(action);
    }

    fn reset_session(&mut self) {
        self.index = 0;
        self.transform = Transform::IDENTITY;
        self.drag_from = None;
    }
}

impl Viewer for ImageViewer {
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
            Key::ArrowLeft => self.previous(),
            Key::ArrowRight => self.next(),
            Key::Char('+') | Key::Char('=') => self.zoom_in(),
            Key::Char('-') => self.zoom_out(),
            Key::Char('r') => self.rotate(),
            _ => return KeyOutcome::Ignored,
        }
        KeyOutcome::Handled
    }

    fn shortcuts(&self) -> &'static [Shortcut] {
        SHORTCUTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Headless;
    use crate::test_helpers::media;

    fn viewer(n: usize) -> ImageViewer {
        ImageViewer::new((1..=n).map(|i| media(&format!("img-{i}"))).collect())
    }

    fn opened(n: usize, platform: &mut Headless) -> ImageViewer {
        let mut v = viewer(n);
        assert!(v.open(0, platform));
        v
    }

    #[test]
    fn next_wraps_back_to_start_after_len_steps() {
        let mut platform = Headless::new();
        for n in 1..=6 {
            let mut v = opened(n, &mut platform);
            for start in 0..n {
                v.select(start);
                for _ in 0..n {
                    v.next();
                }
                assert_eq!(v.index(), start, "len {n}, start {start}");
            }
        }
    }

    #[test]
    fn previous_from_first_wraps_to_last() {
        let mut platform = Headless::new();
        let mut v = opened(3, &mut platform);
        v.handle_key(Key::ArrowLeft, &mut platform);
        assert_eq!(v.index(), 2);
        assert_eq!(v.counter(), "3 / 3");
    }

    #[test]
    fn navigation_resets_transform() {
        let mut platform = Headless::new();
        let mut v = opened(3, &mut platform);
        v.zoom_in();
        v.rotate();
        v.next();
        assert!(v.transform().is_identity());
    }

    #[test]
    fn empty_sequence_renders_nothing() {
        let mut platform = Headless::new();
        let mut v = viewer(0);
        assert!(!v.open(0, &mut platform));
        assert!(v.current().is_none());
        assert!(!platform.scroll_locked());
        v.next();
        v.previous();
        assert_eq!(v.index(), 0);
    }

    #[test]
    fn closed_viewer_renders_nothing_and_ignores_keys() {
        let mut platform = Headless::new();
        let mut v = viewer(2);
        assert!(v.current().is_none());
        assert_eq!(
            v.handle_key(Key::ArrowRight, &mut platform),
            KeyOutcome::Ignored
        );
        assert_eq!(v.index(), 0);
    }

    #[test]
    fn open_locks_scroll_and_escape_releases() {
        let mut platform = Headless::new();
        let mut v = opened(2, &mut platform);
        assert!(platform.scroll_locked());
        assert_eq!(v.handle_key(Key::Escape, &mut platform), KeyOutcome::Handled);
        assert!(!v.is_open());
        assert!(!platform.scroll_locked());
    }

    #[test]
    fn reopening_starts_from_defaults() {
        let mut platform = Headless::new();
        let mut v = opened(4, &mut platform);
        v.next();
        v.zoom_in();
        v.pointer_down(0.0, 0.0);
        v.close(&mut platform);
        v.close(&mut platform);

        v.open(0, &mut platform);
        assert_eq!(v.index(), 0);
        assert!(v.transform().is_identity());
        assert!(!v.is_dragging());
    }

    #[test]
    fn open_clamps_index() {
        let mut platform = Headless::new();
        let mut v = viewer(3);
        v.open(10, &mut platform);
        assert_eq!(v.index(), 2);
    }

    #[test]
    fn shrinking_sequence_never_reads_past_end() {
        let mut platform = Headless::new();
        let mut v = opened(5, &mut platform);
        v.select(4);
        v.set_items(vec![media("only")], &mut platform);
        assert_eq!(v.index(), 0);
        assert_eq!(v.current().map(|m| m.id.as_str()), Some("only"));
    }

    #[test]
    fn emptied_sequence_closes_and_releases_scroll() {
        let mut platform = Headless::new();
        let mut v = opened(2, &mut platform);
        v.select(1);
        v.set_items(Vec::new(), &mut platform);
        assert!(!v.is_open());
        assert!(v.current().is_none());
        assert!(!platform.scroll_locked());
        assert_eq!(
            v.handle_key(Key::ArrowRight, &mut platform),
            KeyOutcome::Ignored
        );
    }

    #[test]
    fn keyboard_zoom_and_rotate() {
        let mut platform = Headless::new();
        let mut v = opened(1, &mut platform);
        v.handle_key(Key::Char('+'), &mut platform);
        v.handle_key(Key::Char('='), &mut platform);
        assert!((v.transform().zoom - 1.44).abs() < 1e-9);
        v.handle_key(Key::Char('-'), &mut platform);
        assert!((v.transform().zoom - 1.2).abs() < 1e-9);
        v.handle_key(Key::Char('r'), &mut platform);
        assert_eq!(v.transform().rotation, 90);
        assert_eq!(
            v.handle_key(Key::Char('x'), &mut platform),
            KeyOutcome::Ignored
        );
    }

    #[test]
    fn drag_pans_only_when_zoomed() {
        let mut platform = Headless::new();
        let mut v = opened(1, &mut platform);
        v.pointer_down(10.0, 10.0);
        v.pointer_move(30.0, 40.0);
        assert_eq!(v.transform().pan, Offset::ZERO);

        v.zoom_in();
        v.pointer_down(10.0, 10.0);
        v.pointer_move(30.0, 40.0);
        v.pointer_move(35.0, 40.0);
        v.pointer_up();
        v.pointer_move(100.0, 100.0);
        assert_eq!(v.transform().pan, Offset::new(25.0, 30.0));
    }

    #[test]
    fn download_uses_title_and_survives_denial() {
        let mut platform = Headless::new();
        let mut v = opened(1, &mut platform);
        v.download(&mut platform);
        assert_eq!(platform.downloads()[0].filename, "Title img-1");

        let mut denied = Headless::new().deny_downloads();
        let mut v = opened(1, &mut denied);
        v.download(&mut denied);
        assert!(denied.downloads().is_empty());
        assert!(v.is_open());
    }

    #[test]
    fn single_image_has_no_navigation_controls() {
        assert!(!viewer(1).has_navigation());
        assert!(viewer(2).has_navigation());
    }
}
