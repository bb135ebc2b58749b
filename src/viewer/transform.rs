//! Bounded view transform shared by the image and model viewers.
//!
//! [`Transform`] is a small `Copy` value; [`Transform::apply`] is the only
//! way it changes. Bounds hold after every action:
//!
//! - zoom stays within [`MIN_ZOOM`, `MAX_ZOOM`]
//! - rotation is always a multiple of 90 in `0..360`
//! - orbit angles stay within `0..360`
//! - pan only moves while zoomed in past 1

use serde::Serialize;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 5.0;
/// Multiplier for one zoom-in step (and divisor for zoom-out).
pub const ZOOM_STEP: f64 = 1.2;
pub const WHEEL_ZOOM_IN: f64 = 1.1;
pub const WHEEL_ZOOM_OUT: f64 = 0.9;
/// Degrees of orbit per pixel of pointer drag.
pub const ORBIT_SENSITIVITY: f64 = 0.5;
pub const ROTATE_STEP: u16 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformAction {
    ZoomIn,
    ZoomOut,
    /// Scroll wheel; positive `delta_y` scrolls down and zooms out.
    Wheel { delta_y: f64 },
    Rotate,
    Pan { dx: f64, dy: f64 },
    Orbit { dx: f64, dy: f64 },
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub zoom: f64,
    /// Flat rotation in degrees.
    pub rotation: u16,
    pub pan: Offset,
    /// Pseudo-3D rotation around the X and Y axes, in degrees.
    pub orbit: Offset,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        zoom: 1.0,
        rotation: 0,
        pan: Offset::ZERO,
        orbit: Offset::ZERO,
    };

    pub fn apply(self, action: TransformAction) -> Transform {
        match action {
            TransformAction::ZoomIn => self.with_zoom(self.zoom * ZOOM_STEP),
            TransformAction::ZoomOut => self.with_zoom(self.zoom / ZOOM_STEP),
            TransformAction::Wheel { delta_y } => {
                let factor = if delta_y > 0.0 {
                    WHEEL_ZOOM_OUT
                } else {
                    WHEEL_ZOOM_IN
                };
                self.with_zoom(self.zoom * factor)
            }
            TransformAction::Rotate => Transform {
                rotation: (self.rotation + ROTATE_STEP) % 360,
                ..self
            },
            TransformAction::Pan { dx, dy } if self.can_pan() => Transform {
                pan: Offset::new(self.pan.x + dx, self.pan.y + dy),
                ..self
            },
            TransformAction::Pan { .. } => self,
            TransformAction::Orbit { dx, dy } => Transform {
                orbit: Offset::new(
                    wrap_degrees(self.orbit.x + dy * ORBIT_SENSITIVITY),
                    wrap_degrees(self.orbit.y + dx * ORBIT_SENSITIVITY),
                ),
                ..self
            },
            TransformAction::Reset => Transform::IDENTITY,
        }
    }

    pub fn can_pan(&self) -> bool {
        self.zoom > 1.0
    }

    pub fn is_identity(&self) -> bool {
        *self == Transform::IDENTITY
    }

    /// Zoom as a rounded percentage, or `None` at 100%.
    pub fn zoom_indicator(&self) -> Option<String> {
        if self.zoom == 1.0 {
            None
        } else {
            Some(format!("{}%", (self.zoom * 100.0).round() as i64))
        }
    }

    /// CSS transform for a flat image.
    pub fn image_css(&self) -> String {
        format!(
            "scale({}) rotate({}deg) translate({}px, {}px)",
            fmt_num(self.zoom),
            self.rotation,
            fmt_num(self.pan.x),
            fmt_num(self.pan.y)
        )
    }

    /// CSS transform for the pseudo-3D model frame.
    pub fn orbit_css(&self) -> String {
        format!(
            "scale({}) rotateX({}deg) rotateY({}deg)",
            fmt_num(self.zoom),
            fmt_num(self.orbit.x),
            fmt_num(self.orbit.y)
        )
    }

    fn with_zoom(self, zoom: f64) -> Transform {
        Transform {
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            ..self
        }
    }
}

fn wrap_degrees(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Up to three decimals, trailing zeros trimmed: `1.2`, `0.833`, `90`.
fn fmt_num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(actions: &[TransformAction]) -> Transform {
        actions
            .iter()
            .fold(Transform::IDENTITY, |t, a| t.apply(*a))
    }

    #[test]
    fn zoom_stays_within_bounds() {
        let mut t = Transform::IDENTITY;
        for _ in 0..50 {
            t = t.apply(TransformAction::ZoomIn);
            assert!((MIN_ZOOM..=MAX_ZOOM).contains(&t.zoom));
        }
        assert_eq!(t.zoom, MAX_ZOOM);
        for _ in 0..100 {
            t = t.apply(TransformAction::ZoomOut);
            assert!((MIN_ZOOM..=MAX_ZOOM).contains(&t.zoom));
        }
        assert_eq!(t.zoom, MIN_ZOOM);
    }

    #[test]
    fn mixed_zoom_sequence_stays_within_bounds() {
        let mut t = Transform::IDENTITY;
        let pattern = [
            TransformAction::ZoomIn,
            TransformAction::Wheel { delta_y: -3.0 },
            TransformAction::ZoomIn,
            TransformAction::Wheel { delta_y: -1.0 },
            TransformAction::ZoomOut,
        ];
        for step in 0..200 {
            let action = if step % 37 < 20 {
                pattern[step % pattern.len()]
            } else {
                TransformAction::Wheel { delta_y: 4.0 }
            };
            t = t.apply(action);
            assert!((MIN_ZOOM..=MAX_ZOOM).contains(&t.zoom), "zoom {}", t.zoom);
        }
    }

    #[test]
    fn rotation_is_always_a_quarter_turn() {
        let mut t = Transform::IDENTITY;
        for _ in 0..13 {
            t = t.apply(TransformAction::Rotate);
            assert!([0, 90, 180, 270].contains(&t.rotation));
        }
        assert_eq!(t.rotation, 90);
    }

    #[test]
    fn pan_ignored_until_zoomed_in() {
        let t = run(&[TransformAction::Pan { dx: 10.0, dy: 5.0 }]);
        assert_eq!(t.pan, Offset::ZERO);

        let t = run(&[
            TransformAction::ZoomIn,
            TransformAction::Pan { dx: 10.0, dy: 5.0 },
            TransformAction::Pan { dx: -4.0, dy: 1.0 },
        ]);
        assert_eq!(t.pan, Offset::new(6.0, 6.0));
    }

    #[test]
    fn wheel_direction_picks_factor() {
        let down = run(&[TransformAction::Wheel { delta_y: 120.0 }]);
        assert!((down.zoom - 0.9).abs() < 1e-9);
        let up = run(&[TransformAction::Wheel { delta_y: -120.0 }]);
        assert!((up.zoom - 1.1).abs() < 1e-9);
    }

    #[test]
    fn orbit_scales_pointer_delta_and_swaps_axes() {
        let t = run(&[TransformAction::Orbit { dx: 40.0, dy: 10.0 }]);
        assert_eq!(t.orbit, Offset::new(5.0, 20.0));

        let t = run(&[TransformAction::Orbit { dx: -40.0, dy: 0.0 }]);
        assert_eq!(t.orbit.y, 340.0);
    }

    #[test]
    fn reset_returns_identity() {
        let t = run(&[
            TransformAction::ZoomIn,
            TransformAction::Rotate,
            TransformAction::Pan { dx: 3.0, dy: 3.0 },
            TransformAction::Orbit { dx: 8.0, dy: 8.0 },
            TransformAction::Reset,
        ]);
        assert!(t.is_identity());
    }

    #[test]
    fn zoom_indicator_hidden_at_identity() {
        assert_eq!(Transform::IDENTITY.zoom_indicator(), None);
        let t = run(&[TransformAction::ZoomIn]);
        assert_eq!(t.zoom_indicator().as_deref(), Some("120%"));
    }

    #[test]
    fn css_rendering() {
        let t = run(&[TransformAction::ZoomIn, TransformAction::Rotate]);
        assert_eq!(t.image_css(), "scale(1.2) rotate(90deg) translate(0px, 0px)");
        assert_eq!(
            Transform::IDENTITY.orbit_css(),
            "scale(1) rotateX(0deg) rotateY(0deg)"
        );
    }
}
