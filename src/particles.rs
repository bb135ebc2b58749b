//! Drifting particle background of the hero section.
//!
//! The field is a pure simulation: a seeded set of particles that move by
//! their velocity on every [`ParticleField::step`] and re-enter from the
//! opposite edge when they leave the viewport. The generator embeds the
//! initial field as JSON; `particles.js` replays the same stepping rule on a
//! canvas.
//!
//! [`HeroAnimation`] couples the field to the page: it only advances while
//! the `home` section is visible.

use crate::platform::{Observation, Platform, PlatformError};
use crate::types::Section;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::ops::Range;

pub const DEFAULT_COUNT: usize = 50;

const SIZE: Range<f64> = 1.0..4.0;
const VELOCITY: Range<f64> = -1.5..1.5;
const OPACITY: Range<f64> = 0.2..0.7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleField {
    pub width: f64,
    pub height: f64,
    pub particles: Vec<Particle>,
}

impl ParticleField {
    /// Spawn `count` particles uniformly inside a `width` × `height` viewport.
    pub fn seeded(count: usize, width: f64, height: f64, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = (0..count)
            .map(|_| Particle {
                x: sample(&mut rng, 0.0..width),
                y: sample(&mut rng, 0.0..height),
                vx: rng.random_range(VELOCITY),
                vy: rng.random_range(VELOCITY),
                size: rng.random_range(SIZE),
                opacity: rng.random_range(OPACITY),
            })
            .collect();
        Self {
            width,
            height,
            particles,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Advance every particle by one frame.
    pub fn step(&mut self) {
        let (w, h) = (self.width, self.height);
        for p in &mut self.particles {
            p.x = wrap(p.x + p.vx, w);
            p.y = wrap(p.y + p.vy, h);
        }
    }

    /// Change the viewport. Particles now outside it wrap back in on the
    /// next step.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }
}

// An empty range (zero-sized viewport) would panic in `random_range`.
fn sample(rng: &mut StdRng, range: Range<f64>) -> f64 {
    if range.is_empty() {
        range.start
    } else {
        rng.random_range(range)
    }
}

/// Past either edge re-enters at the opposite one.
fn wrap(v: f64, max: f64) -> f64 {
    if v < 0.0 {
        max
    } else if v > max {
        0.0
    } else {
        v
    }
}

/// The hero background bound to the visibility of the `home` section.
#[derive(Debug)]
pub struct HeroAnimation {
    field: ParticleField,
    observation: Option<Observation>,
}

impl HeroAnimation {
    pub fn new(field: ParticleField) -> Self {
        Self {
            field,
            observation: None,
        }
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn is_mounted(&self) -> bool {
        self.observation.is_some()
    }

    /// Start observing the hero section. Mounting twice keeps one
    /// observation.
    pub fn mount(&mut self, platform: &mut dyn Platform) -> Result<(), PlatformError> {
        if self.observation.is_none() {
            self.observation = Some(platform.observe(Section::Home)?);
        }
        Ok(())
    }

    /// Advance one frame if the hero is on screen. Returns whether the field
    /// moved.
    pub fn frame(&mut self, platform: &dyn Platform) -> bool {
        let visible = self
            .observation
            .as_ref()
            .is_some_and(|obs| platform.is_visible(obs));
        if visible {
            self.field.step();
        }
        visible
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.field.resize(width, height);
    }

    pub fn unmount(&mut self, platform: &mut dyn Platform) {
        if let Some(obs) = self.observation.take() {
            platform.unobserve(obs);
        }
    }
}
