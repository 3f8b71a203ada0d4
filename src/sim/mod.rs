//! Particle animation engine
//!
//! Everything here advances in whole ticks and draws through [`Surface`]:
//! - One tick per display frame, no wall-clock integration
//! - Seeded RNG only, so a show is reproducible from its seed
//! - No platform dependencies
//!
//! [`Surface`]: crate::renderer::Surface

pub mod firework;
pub mod heart;
pub mod particle;
pub mod show;

pub use firework::Firework;
pub use heart::{HeartFormation, heart_particles, heart_point};
pub use particle::{Particle, ParticleKind};
pub use show::FireworksShow;
