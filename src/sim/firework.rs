//! A single firework: ascent with a fading trail, then one detonation into a
//! burst plus heart formations

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;

use super::heart::heart_particles;
use super::particle::Particle;
use crate::consts::*;
use crate::palette::{Rgb, random_color};
use crate::renderer::Surface;

/// Firework lifecycle object
#[derive(Debug, Clone)]
pub struct Firework {
    pub pos: Vec2,
    pub destination: Vec2,
    /// Fixed ascent velocity per tick
    pub vel: Vec2,
    /// Past positions, oldest first
    pub trail: VecDeque<Vec2>,
    /// Head colour during the ascent
    pub color: Rgb,
    /// Empty until detonation
    pub particles: Vec<Particle>,
    exploded: bool,
}

impl Firework {
    /// Random firework rising from the bottom edge of a `bounds`-sized surface
    pub fn launch<R: Rng>(bounds: Vec2, rng: &mut R) -> Self {
        let spawn = Vec2::new(rng.random::<f32>() * bounds.x, bounds.y);
        let destination = Vec2::new(
            rng.random::<f32>() * bounds.x,
            rng.random::<f32>() * (bounds.y / 2.0) + DESTINATION_HEADROOM,
        );
        let color = random_color(rng);
        Self::with_trajectory(spawn, destination, color)
    }

    /// Firework that reaches `destination` from `spawn` in `ASCENT_TICKS`
    pub fn with_trajectory(spawn: Vec2, destination: Vec2, color: Rgb) -> Self {
        Self {
            pos: spawn,
            destination,
            vel: (destination - spawn) / ASCENT_TICKS,
            trail: VecDeque::with_capacity(TRAIL_CAPACITY + 1),
            color,
            particles: Vec::new(),
            exploded: false,
        }
    }

    #[inline]
    pub fn is_exploded(&self) -> bool {
        self.exploded
    }

    /// Whether the head is close enough to its destination to detonate
    #[inline]
    pub fn reached_destination(&self) -> bool {
        (self.pos.y - self.destination.y).abs() < DETONATION_THRESHOLD
    }

    /// Switch to the exploded state and create the burst and heart particles.
    /// Only the first call has any effect; returns whether it detonated.
    pub fn detonate<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.exploded {
            return false;
        }
        self.exploded = true;

        self.particles
            .reserve(EXPLOSION_PARTICLES + HEART_COUNT * HEART_POINTS);
        for _ in 0..EXPLOSION_PARTICLES {
            self.particles.push(Particle::explosion(self.pos, rng));
        }
        self.particles.extend(heart_particles(self.pos, rng));
        true
    }

    /// Advance and draw one tick. Returns whether the firework should stay in
    /// the live set.
    pub fn advance<S: Surface + ?Sized, R: Rng>(&mut self, surface: &mut S, rng: &mut R) -> bool {
        if self.exploded {
            self.particles.retain_mut(|p| p.step(surface));
            return !self.particles.is_empty();
        }

        self.trail.push_back(self.pos);
        if self.trail.len() > TRAIL_CAPACITY {
            self.trail.pop_front();
        }
        self.pos += self.vel;

        self.draw_ascent(surface);

        if self.reached_destination() {
            self.detonate(rng);
        }
        true
    }

    fn draw_ascent<S: Surface + ?Sized>(&self, surface: &mut S) {
        for (index, pos) in self.trail.iter().enumerate() {
            let alpha = index as f32 / TRAIL_CAPACITY as f32 * TRAIL_MAX_ALPHA;
            surface.fill_circle(*pos, HEAD_RADIUS, Rgb::WHITE.with_alpha(alpha));
        }
        surface.fill_circle(self.pos, HEAD_RADIUS, self.color.with_alpha(1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{CommandBuffer, DrawCommand};
    use crate::sim::ParticleKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn short_hop() -> Firework {
        // 5.5 units up over the fixed 50-tick ascent: vy = -0.11
        Firework::with_trajectory(
            Vec2::new(100.0, 500.0),
            Vec2::new(100.0, 494.5),
            Rgb::WHITE,
        )
    }

    #[test]
    fn test_velocity_covers_trajectory_in_50_ticks() {
        let fw = Firework::with_trajectory(
            Vec2::new(0.0, 600.0),
            Vec2::new(100.0, 200.0),
            Rgb::WHITE,
        );
        assert!((fw.vel - Vec2::new(2.0, -8.0)).length() < 1e-5);
        assert!(!fw.is_exploded());
        assert!(fw.particles.is_empty());
    }

    #[test]
    fn test_short_hop_detonates_within_ascent() {
        let mut fw = short_hop();
        assert!((fw.vel.y - -0.11).abs() < 1e-6);

        let mut rng = Pcg32::seed_from_u64(1);
        let mut surface = CommandBuffer::new(800.0, 600.0);
        let mut detonated_at = None;
        for tick in 1..=50 {
            assert!(fw.advance(&mut surface, &mut rng));
            if fw.is_exploded() {
                detonated_at = Some(tick);
                break;
            }
        }

        let tick = detonated_at.expect("should detonate during the ascent");
        assert!(tick <= 50);
        assert!((fw.pos.y - fw.destination.y).abs() < DETONATION_THRESHOLD);
    }

    #[test]
    fn test_detonation_creates_360_particles() {
        let mut fw = short_hop();
        let mut rng = Pcg32::seed_from_u64(2);
        assert!(fw.detonate(&mut rng));
        assert_eq!(fw.particles.len(), 360);

        let bursts = fw
            .particles
            .iter()
            .filter(|p| matches!(p.kind, ParticleKind::Explosion { .. }))
            .count();
        assert_eq!(bursts, EXPLOSION_PARTICLES);
        assert_eq!(fw.particles.len() - bursts, 240);
    }

    #[test]
    fn test_detonation_is_idempotent() {
        let mut fw = short_hop();
        let mut rng = Pcg32::seed_from_u64(3);
        assert!(fw.detonate(&mut rng));
        assert!(!fw.detonate(&mut rng));
        assert!(fw.is_exploded());
        assert_eq!(fw.particles.len(), 360);
    }

    #[test]
    fn test_trail_is_bounded() {
        let mut fw = Firework::with_trajectory(
            Vec2::new(0.0, 1000.0),
            Vec2::new(0.0, 0.0),
            Rgb::WHITE,
        );
        let mut rng = Pcg32::seed_from_u64(4);
        let mut surface = CommandBuffer::new(800.0, 1000.0);

        for _ in 0..20 {
            fw.advance(&mut surface, &mut rng);
        }
        assert_eq!(fw.trail.len(), TRAIL_CAPACITY);
        // Oldest entry is the position from 10 ticks ago
        let expected_oldest = Vec2::new(0.0, 1000.0) + fw.vel * 10.0;
        assert!((fw.trail[0] - expected_oldest).length() < 1e-3);
    }

    #[test]
    fn test_ascent_draws_trail_then_head() {
        let mut fw = Firework::with_trajectory(
            Vec2::new(0.0, 1000.0),
            Vec2::new(0.0, 0.0),
            Rgb::new(255, 0, 0),
        );
        let mut rng = Pcg32::seed_from_u64(5);
        let mut surface = CommandBuffer::new(800.0, 1000.0);

        fw.advance(&mut surface, &mut rng);
        fw.advance(&mut surface, &mut rng);
        surface.clear();
        fw.advance(&mut surface, &mut rng);

        // Three trail discs plus the head
        assert_eq!(surface.circle_count(), 4);
        let DrawCommand::Circle { color, .. } = surface.commands[0] else {
            panic!("expected a disc");
        };
        assert_eq!(color.alpha, 0.0);
        let DrawCommand::Circle { color, .. } = surface.commands[2] else {
            panic!("expected a disc");
        };
        assert!((color.alpha - 0.1).abs() < 1e-6);
        let DrawCommand::Circle { center, color, .. } = surface.commands[3] else {
            panic!("expected a disc");
        };
        assert_eq!(center, fw.pos);
        assert_eq!(color, Rgb::new(255, 0, 0).with_alpha(1.0));
    }

    #[test]
    fn test_dies_once_every_particle_expires() {
        let mut fw = short_hop();
        let mut rng = Pcg32::seed_from_u64(6);
        let mut surface = CommandBuffer::new(800.0, 600.0);
        fw.detonate(&mut rng);

        let mut ticks = 0;
        while fw.advance(&mut surface, &mut rng) {
            ticks += 1;
            assert!(ticks < 200, "particles outlived their lifetimes");
        }
        assert!(fw.particles.is_empty());
        // Longest seek particle: delay 20 + life 169
        assert!(ticks >= 149);
    }

    #[test]
    fn test_expired_particles_leave_the_same_tick() {
        let mut fw = short_hop();
        let mut rng = Pcg32::seed_from_u64(8);
        let mut surface = CommandBuffer::new(800.0, 600.0);
        fw.detonate(&mut rng);

        let mut last_len = fw.particles.len();
        while fw.advance(&mut surface, &mut rng) {
            assert!(fw.particles.iter().all(|p| p.life > 0));
            assert!(fw.particles.len() <= last_len);
            last_len = fw.particles.len();
        }
        assert!(fw.particles.is_empty());
    }

    #[test]
    fn test_launch_stays_within_bounds() {
        let mut rng = Pcg32::seed_from_u64(7);
        let bounds = Vec2::new(1280.0, 720.0);
        for _ in 0..200 {
            let fw = Firework::launch(bounds, &mut rng);
            assert_eq!(fw.pos.y, bounds.y);
            assert!(fw.pos.x >= 0.0 && fw.pos.x < bounds.x);
            assert!(fw.destination.x >= 0.0 && fw.destination.x < bounds.x);
            assert!(fw.destination.y >= 100.0 && fw.destination.y < 460.0);
            assert!(fw.vel.y < 0.0);
        }
    }
}
