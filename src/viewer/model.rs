//! Pseudo-3D model viewer.
//!
//! There is no mesh renderer: a model is presented as its preview image in a
//! frame that orbits under pointer drag and zooms under the wheel. The
//! orbit/zoom state is the shared [`Transform`].
//!
//! Opening a model enters [`LoadState::Loading`]; the host reports the
//! outcome of fetching the preview through [`ModelViewer::asset_loaded`] or
//! [`ModelViewer::asset_failed`]. A failed load keeps the overlay usable.

use super::keys::{Key, Shortcut, shortcut};
use super::transform::{Offset, Transform, TransformAction};
use super::{KeyOutcome, Overlay, Viewer};
use crate::content::ModelAsset;
use crate::platform::Platform;

const DEFAULT_FILENAME: &str = "model.obj";

const SHORTCUTS: &[Shortcut] = &[
    shortcut("Esc", "Close"),
    shortcut("Drag", "Orbit"),
    shortcut("Wheel + −", "Zoom"),
    shortcut("R", "Reset view"),
    shortcut("I", "Toggle details"),
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct ModelViewer {
    model: Option<ModelAsset>,
    transform: Transform,
    drag_from: Option<Offset>,
    show_info: bool,
    load: LoadState,
    overlay: Overlay,
}

impl ModelViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, model: ModelAsset, platform: &mut dyn Platform) {
        self.reset_session();
        self.model = Some(model);
        self.overlay.open(platform);
    }

    /// The model to render, or `None` while closed.
    pub fn model(&self) -> Option<&ModelAsset> {
        if !self.overlay.is_open() {
            return None;
        }
        self.model.as_ref()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn show_info(&self) -> bool {
        self.show_info
    }

    pub fn toggle_info(&mut self) {
        self.show_info = !self.show_info;
    }

    pub fn asset_loaded(&mut self) {
        if self.overlay.is_open() {
            self.load = LoadState::Ready;
        }
    }

    pub fn asset_failed(&mut self, reason: impl Into<String>) {
        if self.overlay.is_open() {
            let reason = reason.into();
            tracing::warn!(%reason, "model preview failed to load");
            self.load = LoadState::Failed(reason);
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.drag_from = Some(Offset::new(x, y));
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let Some(from) = self.drag_from else {
            return;
        };
        self.apply(TransformAction::Orbit {
            dx: x - from.x,
            dy: y - from.y,
        });
        self.drag_from = Some(Offset::new(x, y));
    }

    pub fn pointer_up(&mut self) {
        self.drag_from = None;
    }

    pub fn wheel(&mut self, delta_y: f64) {
        self.apply(TransformAction::Wheel { delta_y });
    }

    pub fn zoom_in(&mut self) {
        self.apply(TransformAction::ZoomIn);
    }

    pub fn zoom_out(&mut self) {
        self.apply(TransformAction::ZoomOut);
    }

    /// Orbit back to (0, 0) at zoom 1.
    pub fn reset_view(&mut self) {
        self.apply(TransformAction::Reset);
    }

    pub fn can_download(&self) -> bool {
        self.model().is_some_and(|m| m.download_url.is_some())
    }

    pub fn download(&mut self, platform: &mut dyn Platform) {
        let Some(model) = self.model() else {
            return;
        };
        let Some(url) = model.download_url.clone() else {
            return;
        };
        let filename = model
            .filename
            .clone()
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string());
        super::download(platform, &url, &filename);
    }

    fn apply(&mut self, action: TransformAction) {
        self.transform = self.transform.apply(action);
    }

    fn reset_session(&mut self) {
        self.transform = Transform::IDENTITY;
        self.drag_from = None;
        self.show_info = false;
        self.load = LoadState::Loading;
    }
}

impl Viewer for ModelViewer {
    fn is_open(&self) -> bool {
        self.overlay.is_open()
    }

    fn close(&mut self, platform: &mut dyn Platform) {
        self.overlay.close(platform);
        self.reset_session();
        self.model = None;
    }

    fn handle_key(&mut self, key: Key, platform: &mut dyn Platform) -> KeyOutcome {
        if !self.is_open() {
            return KeyOutcome::Ignored;
        }
        match key {
            Key::Escape => self.close(platform),
            Key::Char('r') => self.reset_view(),
            Key::Char('+') | Key::Char('=') => self.zoom_in(),
            Key::Char('-') => self.zoom_out(),
            Key::Char('i') => self.toggle_info(),
            _ => return KeyOutcome::Ignored,
        }
        KeyOutcome::Handled
    }

    fn shortcuts(&self) -> &'static [Shortcut] {
        SHORTCUTS
    }
}
