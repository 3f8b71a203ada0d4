//! Render loop controller
//!
//! Owns the drawing surface, the live fireworks and the launch gate. The host
//! calls [`FireworksShow::tick`] once per display frame for as long as the
//! page lives; `start`/`stop` only flip visibility, so a stopped show keeps
//! ticking and simply paints the surface black.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::firework::Firework;
use crate::palette::Rgb;
use crate::renderer::Surface;
use crate::settings::ShowConfig;

/// Fireworks show bound to one surface
pub struct FireworksShow<S: Surface> {
    /// `None` for a detached show (no drawing context was available)
    surface: Option<S>,
    fireworks: Vec<Firework>,
    visible: bool,
    last_launch_ms: f64,
    launch_interval_ms: f64,
    max_launches: u32,
    fade_alpha: f32,
    rng: Pcg32,
}

impl<S: Surface> FireworksShow<S> {
    /// Bind a show to `surface`. It starts hidden.
    pub fn new(surface: S, config: &ShowConfig, seed: u64) -> Self {
        let config = config.sanitized();
        Self {
            surface: Some(surface),
            fireworks: Vec::new(),
            visible: false,
            last_launch_ms: 0.0,
            launch_interval_ms: config.launch_interval_ms,
            max_launches: config.max_launches,
            fade_alpha: config.fade_alpha,
            rng: Pcg32::seed_from_u64(config.seed.unwrap_or(seed)),
        }
    }

    /// Inert show: every control is a no-op and it never reports active
    pub fn detached() -> Self {
        let config = ShowConfig::default();
        Self {
            surface: None,
            fireworks: Vec::new(),
            visible: false,
            last_launch_ms: 0.0,
            launch_interval_ms: config.launch_interval_ms,
            max_launches: config.max_launches,
            fade_alpha: config.fade_alpha,
            rng: Pcg32::seed_from_u64(0),
        }
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// Show fireworks from a clean slate
    pub fn start(&mut self) {
        if !self.is_attached() {
            return;
        }
        self.visible = true;
        self.fireworks.clear();
        log::info!("Fireworks started");
    }

    /// Hide fireworks and discard everything in flight
    pub fn stop(&mut self) {
        if !self.is_attached() {
            return;
        }
        self.visible = false;
        self.fireworks.clear();
        log::info!("Fireworks stopped");
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.visible
    }

    /// Live fireworks
    pub fn fireworks(&self) -> &[Firework] {
        &self.fireworks
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Match the backing buffer to a new viewport size. Fireworks in flight
    /// keep their absolute coordinates.
    pub fn resize(&mut self, width: f32, height: f32) {
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(width, height);
        }
    }

    /// Render one frame at time `now_ms`. Returns how many fireworks were
    /// launched this frame.
    pub fn tick(&mut self, now_ms: f64) -> usize {
        let Some(surface) = self.surface.as_mut() else {
            return 0;
        };

        if !self.visible {
            surface.fill(Rgb::BLACK.with_alpha(1.0));
            return 0;
        }

        // Translucent overlay leaves motion trails behind everything
        surface.fill(Rgb::BLACK.with_alpha(self.fade_alpha));

        let mut launched = 0;
        if now_ms - self.last_launch_ms > self.launch_interval_ms {
            let bounds = surface.size();
            launched = self.rng.random_range(1..=self.max_launches) as usize;
            for _ in 0..launched {
                self.fireworks.push(Firework::launch(bounds, &mut self.rng));
            }
            self.last_launch_ms = now_ms;
            log::debug!("Launched {} fireworks ({} live)", launched, self.fireworks.len());
        }

        let rng = &mut self.rng;
        self.fireworks.retain_mut(|fw| fw.advance(surface, rng));

        launched
    }

    /// Add a firework directly, bypassing the launch gate
    pub fn push(&mut self, firework: Firework) {
        self.fireworks.push(firework);
    }

    /// Surface size, or zero when detached
    pub fn bounds(&self) -> Vec2 {
        self.surface.as_ref().map(|s| s.size()).unwrap_or(Vec2::ZERO)
    }
}
