//! Heart-shaped particle formations
//!
//! Uses the classic parametric heart:
//! x(t) = 16 sin^3(t), y(t) = -(13 cos t - 5 cos 2t - 2 cos 3t - cos 4t)
//! with y pointing down the screen.

use glam::Vec2;
use rand::Rng;

use super::particle::Particle;
use crate::consts::*;
use crate::palette::{Rgb, random_color};

/// Point on the heart curve at `t` radians, scaled by `size`
#[inline]
pub fn heart_point(t: f32, size: f32) -> Vec2 {
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    Vec2::new(size * x, -size * y)
}

/// One heart placed around a burst origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeartFormation {
    pub center: Vec2,
    pub size: f32,
    pub color: Rgb,
}

impl HeartFormation {
    /// Heart number `index` of `HEART_COUNT`, spread evenly by angle around
    /// `origin` at a random distance, scale and colour
    pub fn random<R: Rng>(origin: Vec2, index: usize, rng: &mut R) -> Self {
        let angle = std::f32::consts::TAU * index as f32 / HEART_COUNT as f32;
        let distance = HEART_DISTANCE_MIN + rng.random::<f32>() * HEART_DISTANCE_SPAN;
        let color = random_color(rng);
        let size = HEART_BASE_SIZE * rng.random_range(0.8f32..1.2);
        Self {
            center: origin + Vec2::from_angle(angle) * distance,
            size,
            color,
        }
    }

    /// Outline points every `HEART_STEP_DEGREES` degrees
    pub fn outline(&self) -> impl Iterator<Item = Vec2> + '_ {
        (0..360)
            .step_by(HEART_STEP_DEGREES)
            .map(|deg| self.center + heart_point((deg as f32).to_radians(), self.size))
    }

    /// One seek particle per outline point. Particles start scattered around
    /// `origin` and gather onto the outline with staggered delays.
    pub fn particles<R: Rng>(&self, origin: Vec2, rng: &mut R) -> Vec<Particle> {
        self.outline()
            .map(|target| {
                let start = origin
                    + Vec2::new(
                        rng.random_range(-GATHER_JITTER..GATHER_JITTER),
                        rng.random_range(-GATHER_JITTER..GATHER_JITTER),
                    );
                let color = if rng.random_bool(STRAY_COLOR_CHANCE) {
                    random_color(rng)
                } else {
                    self.color
                };
                let life = SEEK_LIFE_MIN + rng.random_range(0..SEEK_LIFE_SPAN);
                let delay = rng.random_range(0..=SEEK_MAX_DELAY);
                Particle::seek(start, target, color, life, delay)
            })
            .collect()
    }
}

/// Generate the heart formations for a burst at `origin`
pub fn heart_particles<R: Rng>(origin: Vec2, rng: &mut R) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(HEART_COUNT * HEART_POINTS);
    for index in 0..HEART_COUNT {
        let heart = HeartFormation::random(origin, index, rng);
        particles.extend(heart.particles(origin, rng));
    }
    particles
}
