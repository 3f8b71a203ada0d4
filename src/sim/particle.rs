//! Firework particles
//!
//! Two kinds share one update loop: ballistic burst particles and seek
//! particles that fly to a fixed point of a heart outline.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::palette::{Rgb, random_color};
use crate::renderer::Surface;

/// Motion rule of a particle, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleKind {
    /// Burst particle: gravity and horizontal drag
    Explosion { vel: Vec2 },
    /// Formation particle: constant speed toward `target`
    Seek { target: Vec2, speed: f32 },
}

/// A single point-mass
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub color: Rgb,
    /// Opacity, never negative
    pub alpha: f32,
    /// Remaining ticks; the particle is expired at <= 0
    pub life: i32,
    pub max_life: i32,
    /// Disc radius (glow halo is twice this)
    pub size: f32,
    /// Ticks to stay inert before the first update
    pub delay: u32,
    pub kind: ParticleKind,
}

impl Particle {
    /// Random burst particle leaving `origin` in any direction
    pub fn explosion<R: Rng>(origin: Vec2, rng: &mut R) -> Self {
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let speed = EXPLOSION_SPEED_MIN + rng.random::<f32>() * EXPLOSION_SPEED_SPAN;
        let life = EXPLOSION_LIFE_MIN + rng.random_range(0..EXPLOSION_LIFE_SPAN);
        Self {
            pos: origin,
            color: random_color(rng),
            alpha: 1.0,
            life,
            max_life: life,
            size: EXPLOSION_SIZE_MIN + rng.random::<f32>() * EXPLOSION_SIZE_SPAN,
            delay: 0,
            kind: ParticleKind::Explosion {
                vel: Vec2::from_angle(angle) * speed,
            },
        }
    }

    /// Invisible particle that will fly from `start` to `target`
    pub fn seek(start: Vec2, target: Vec2, color: Rgb, life: i32, delay: u32) -> Self {
        Self {
            pos: start,
            color,
            alpha: 0.0,
            life,
            max_life: life,
            size: SEEK_SIZE,
            delay,
            kind: ParticleKind::Seek {
                target,
                speed: SEEK_SPEED,
            },
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    #[inline]
    pub fn is_delayed(&self) -> bool {
        self.delay > 0
    }

    /// Advance one tick. Returns whether the particle is still alive.
    pub fn advance(&mut self) -> bool {
        if self.delay > 0 {
            self.delay -= 1;
            return self.is_alive();
        }

        match &mut self.kind {
            ParticleKind::Explosion { vel } => {
                self.pos += *vel;
                vel.y += GRAVITY;
                vel.x *= DRAG;
                self.life -= 1;
                self.alpha = self.life.max(0) as f32 / self.max_life as f32 * EXPLOSION_ALPHA;
            }
            ParticleKind::Seek { target, speed } => {
                if self.alpha < 1.0 {
                    self.alpha = (self.alpha + SEEK_FADE_IN).min(1.0);
                }
                let to_target = *target - self.pos;
                let distance = to_target.length();
                // Guard the normalisation; parked particles stay put
                if distance > SEEK_ARRIVE_EPSILON {
                    self.pos += to_target / distance * *speed;
                }
                self.life -= 1;
                if self.life < SEEK_FADE_OUT_LIFE {
                    self.alpha *= SEEK_FADE_OUT;
                }
            }
        }

        self.is_alive()
    }

    /// Advance one tick and draw, skipping the draw on ticks spent waiting
    /// out the delay. Returns whether the particle is still alive.
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if self.delay > 0 {
            self.delay -= 1;
            return self.is_alive();
        }
        let alive = self.advance();
        self.draw(surface);
        alive
    }

    /// Draw the disc and its glow halo. Delayed particles are not drawn.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        if self.is_delayed() {
            return;
        }
        surface.fill_circle(self.pos, self.size, self.color.with_alpha(self.alpha));
        surface.fill_circle(
            self.pos,
            self.size * GLOW_RADIUS_SCALE,
            self.color.with_alpha(self.alpha * GLOW_ALPHA_SCALE),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::CommandBuffer;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn vy(p: &Particle) -> f32 {
        match p.kind {
            ParticleKind::Explosion { vel } => vel.y,
            ParticleKind::Seek { .. } => panic!("not an explosion particle"),
        }
    }

    #[test]
    fn test_explosion_ranges() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..500 {
            let p = Particle::explosion(Vec2::new(100.0, 100.0), &mut rng);
            assert!((40..60).contains(&p.life));
            assert_eq!(p.life, p.max_life);
            assert!(p.size >= 2.0 && p.size < 4.0);
            let ParticleKind::Explosion { vel } = p.kind else {
                panic!("expected explosion");
            };
            let speed = vel.length();
            assert!(speed >= 7.99 && speed < 14.01, "speed {speed}");
        }
    }

    #[test]
    fn test_explosion_step() {
        let mut p = Particle::explosion(Vec2::ZERO, &mut Pcg32::seed_from_u64(3));
        p.kind = ParticleKind::Explosion {
            vel: Vec2::new(10.0, -5.0),
        };
        p.life = 50;
        p.max_life = 50;

        assert!(p.advance());
        assert_eq!(p.pos, Vec2::new(10.0, -5.0));
        let ParticleKind::Explosion { vel } = p.kind else {
            panic!("expected explosion");
        };
        assert!((vel.x - 9.8).abs() < 1e-5);
        assert!((vel.y - -4.8).abs() < 1e-5);
        assert_eq!(p.life, 49);
        assert!((p.alpha - 49.0 / 50.0 * 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_expires_when_life_runs_out() {
        let mut p = Particle::seek(Vec2::ZERO, Vec2::new(50.0, 0.0), Rgb::WHITE, 2, 0);
        assert!(p.advance());
        assert!(!p.advance());
        assert_eq!(p.life, 0);
    }

    #[test]
    fn test_delay_freezes_particle() {
        let mut p = Particle::seek(Vec2::ZERO, Vec2::new(50.0, 0.0), Rgb::WHITE, 100, 3);

        for remaining in (0..3).rev() {
            assert!(p.advance());
            assert_eq!(p.delay, remaining);
            assert_eq!(p.pos, Vec2::ZERO);
            assert_eq!(p.life, 100);
        }

        p.advance();
        assert_eq!(p.pos, Vec2::new(6.0, 0.0));
        assert_eq!(p.life, 99);
    }

    #[test]
    fn test_step_skips_drawing_on_delayed_ticks() {
        let mut p = Particle::seek(Vec2::ZERO, Vec2::new(50.0, 0.0), Rgb::WHITE, 100, 2);
        let mut surface = CommandBuffer::new(100.0, 100.0);

        // Both delayed ticks, including the one that clears the delay
        p.step(&mut surface);
        p.step(&mut surface);
        assert_eq!(surface.circle_count(), 0);

        p.step(&mut surface);
        assert_eq!(surface.circle_count(), 2);
    }

    #[test]
    fn test_delayed_particle_is_not_drawn() {
        let p = Particle::seek(Vec2::ZERO, Vec2::ONE, Rgb::WHITE, 100, 5);
        let mut surface = CommandBuffer::new(100.0, 100.0);
        p.draw(&mut surface);
        assert_eq!(surface.circle_count(), 0);
    }

    #[test]
    fn test_seek_moves_at_constant_speed() {
        let mut p = Particle::seek(Vec2::ZERO, Vec2::new(30.0, 40.0), Rgb::WHITE, 160, 0);
        p.advance();
        assert!((p.pos.length() - 6.0).abs() < 1e-4);
        assert!((p.pos - Vec2::new(3.6, 4.8)).length() < 1e-4);
    }

    #[test]
    fn test_seek_at_target_does_not_move() {
        let target = Vec2::new(42.0, 17.0);
        let mut p = Particle::seek(target, target, Rgb::WHITE, 160, 0);
        p.advance();
        assert_eq!(p.pos, target);
        assert!(p.pos.is_finite());

        // Within the arrival radius as well
        let near = target + Vec2::new(0.05, 0.0);
        p.pos = near;
        p.advance();
        assert_eq!(p.pos, near);
    }

    #[test]
    fn test_seek_alpha_fades_in_and_caps() {
        let mut p = Particle::seek(Vec2::ZERO, Vec2::new(1000.0, 0.0), Rgb::WHITE, 160, 0);
        p.advance();
        assert!((p.alpha - 0.05).abs() < 1e-6);
        for _ in 0..40 {
            p.advance();
            assert!(p.alpha <= 1.0);
        }
        assert_eq!(p.alpha, 1.0);
    }

    #[test]
    fn test_seek_alpha_fades_out_near_end() {
        let mut p = Particle::seek(Vec2::ZERO, Vec2::ZERO, Rgb::WHITE, 160, 0);
        p.alpha = 1.0;
        p.life = 30;
        p.advance(); // life 29 -> fading
        assert!((p.alpha - 0.9).abs() < 1e-6);
        p.advance();
        assert!(p.alpha < 0.9);
        assert!(p.alpha >= 0.0);
    }

    #[test]
    fn test_draw_disc_and_glow() {
        let mut p = Particle::seek(Vec2::new(5.0, 5.0), Vec2::ZERO, Rgb::WHITE, 100, 0);
        p.alpha = 0.5;
        let mut surface = CommandBuffer::new(100.0, 100.0);
        p.draw(&mut surface);

        use crate::renderer::DrawCommand;
        assert_eq!(
            surface.commands,
            vec![
                DrawCommand::Circle {
                    center: Vec2::new(5.0, 5.0),
                    radius: 1.5,
                    color: Rgb::WHITE.with_alpha(0.5),
                },
                DrawCommand::Circle {
                    center: Vec2::new(5.0, 5.0),
                    radius: 3.0,
                    color: Rgb::WHITE.with_alpha(0.15),
                },
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_explosion_life_and_gravity_are_monotonic(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut p = Particle::explosion(Vec2::new(400.0, 300.0), &mut rng);
            let mut last_life = p.life;
            let mut last_vy = vy(&p);
            while p.advance() {
                prop_assert!(p.life <= last_life);
                prop_assert!(vy(&p) >= last_vy);
                prop_assert!(p.alpha >= 0.0);
                last_life = p.life;
                last_vy = vy(&p);
            }
            prop_assert!(p.life <= 0);
        }

        #[test]
        fn prop_seek_life_never_increases(
            delay in 0u32..=20,
            life in 150i32..170,
            tx in -500.0f32..500.0,
            ty in -500.0f32..500.0,
        ) {
            let mut p = Particle::seek(Vec2::ZERO, Vec2::new(tx, ty), Rgb::WHITE, life, delay);
            let mut last_life = p.life;
            while p.advance() {
                prop_assert!(p.life <= last_life);
                prop_assert!(p.pos.is_finite());
                prop_assert!(p.alpha >= 0.0 && p.alpha <= 1.0);
                last_life = p.life;
            }
        }
    }
}
