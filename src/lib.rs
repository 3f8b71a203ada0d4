//! Heartburst - a small greeting page with a canvas fireworks show
//!
//! Core modules:
//! - `sim`: Particle engine (fireworks, heart formations, render loop controller)
//! - `renderer`: Drawing surface abstraction (2D canvas on web, command buffer headless)
//! - `palette`: Fixed firework colour palette
//! - `settings`: Show configuration supplied by the host page
//! - `flow`: PIN page, routes, reveal sequence and memory cards around the show
//! - `audio`: Background music and memory clip players
//! - `web`: Browser composition root (wasm32 only)

pub mod audio;
pub mod flow;
pub mod palette;
pub mod renderer;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use audio::{BackgroundMusic, ClipAction, ClipPlayer};
pub use palette::{PALETTE, Rgb, Rgba};
pub use renderer::{CommandBuffer, DrawCommand, Surface};
pub use settings::{ConfigError, ShowConfig};
pub use sim::{Firework, FireworksShow, Particle, ParticleKind};

/// Show tuning constants
pub mod consts {
    /// Ticks a firework takes to travel from spawn to destination
    pub const ASCENT_TICKS: f32 = 50.0;
    /// Number of past positions kept for the ascent trail
    pub const TRAIL_CAPACITY: usize = 10;
    /// Peak alpha of the newest trail disc
    pub const TRAIL_MAX_ALPHA: f32 = 0.5;
    /// Radius of trail discs and the firework head
    pub const HEAD_RADIUS: f32 = 3.0;
    /// Detonate when vertical distance to the destination drops below this
    pub const DETONATION_THRESHOLD: f32 = 5.0;
    /// Headroom added below the top edge when picking a destination height
    pub const DESTINATION_HEADROOM: f32 = 100.0;

    /// Minimum time between launch gates (ms)
    pub const LAUNCH_INTERVAL_MS: f64 = 800.0;
    /// Upper bound of fireworks spawned per launch gate (inclusive)
    pub const MAX_LAUNCH_COUNT: u32 = 3;
    /// Alpha of the black overlay painted each visible frame (motion trails)
    pub const FADE_ALPHA: f32 = 0.2;

    /// Burst particles created on detonation
    pub const EXPLOSION_PARTICLES: usize = 120;
    /// Burst speed range (units/tick)
    pub const EXPLOSION_SPEED_MIN: f32 = 8.0;
    pub const EXPLOSION_SPEED_SPAN: f32 = 6.0;
    /// Burst lifetime range (ticks)
    pub const EXPLOSION_LIFE_MIN: i32 = 40;
    pub const EXPLOSION_LIFE_SPAN: i32 = 20;
    /// Burst particle radius range
    pub const EXPLOSION_SIZE_MIN: f32 = 2.0;
    pub const EXPLOSION_SIZE_SPAN: f32 = 2.0;
    /// Burst alpha ceiling (alpha = life / max_life * this)
    pub const EXPLOSION_ALPHA: f32 = 0.8;
    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.2;
    /// Horizontal velocity multiplier per tick
    pub const DRAG: f32 = 0.98;

    /// Heart formations per detonation
    pub const HEART_COUNT: usize = 2;
    /// Degrees between consecutive heart outline points
    pub const HEART_STEP_DEGREES: usize = 3;
    /// Points per heart outline
    pub const HEART_POINTS: usize = 360 / HEART_STEP_DEGREES;
    /// Base heart curve scale (randomised 0.8x..1.2x per heart)
    pub const HEART_BASE_SIZE: f32 = 12.0;
    /// Distance of each heart centre from the burst origin
    pub const HEART_DISTANCE_MIN: f32 = 60.0;
    pub const HEART_DISTANCE_SPAN: f32 = 80.0;
    /// Seek particles start within +/- this of the burst origin
    pub const GATHER_JITTER: f32 = 25.0;
    /// Chance a heart particle ignores the heart colour
    pub const STRAY_COLOR_CHANCE: f64 = 0.2;
    /// Seek particle lifetime range (ticks)
    pub const SEEK_LIFE_MIN: i32 = 150;
    pub const SEEK_LIFE_SPAN: i32 = 20;
    /// Maximum formation delay (ticks, inclusive)
    pub const SEEK_MAX_DELAY: u32 = 20;
    /// Seek particle radius
    pub const SEEK_SIZE: f32 = 1.5;
    /// Seek particle speed (units/tick)
    pub const SEEK_SPEED: f32 = 6.0;
    /// Alpha gained per tick while fading in
    pub const SEEK_FADE_IN: f32 = 0.05;
    /// Below this remaining life, seek particles fade out
    pub const SEEK_FADE_OUT_LIFE: i32 = 30;
    /// Alpha multiplier per tick while fading out
    pub const SEEK_FADE_OUT: f32 = 0.9;
    /// Seek movement stops within this distance of the target
    pub const SEEK_ARRIVE_EPSILON: f32 = 0.1;

    /// Glow halo radius multiplier
    pub const GLOW_RADIUS_SCALE: f32 = 2.0;
    /// Glow halo alpha multiplier
    pub const GLOW_ALPHA_SCALE: f32 = 0.3;
}
