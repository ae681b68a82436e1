//! Expanding-circle ripple field for the confirmation page
//!
//! A fixed number of ripples spawn at staggered delays and seeded-random
//! positions, then grow and fade every frame until their opacity runs out.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// One expanding circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub pos: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

impl Ripple {
    fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: 0.0,
            alpha: RIPPLE_START_ALPHA,
        }
    }

    /// Grow and fade by `dt` seconds
    fn advance(&mut self, dt: f32) {
        self.radius += RIPPLE_GROWTH_RATE * dt;
        self.alpha -= RIPPLE_FADE_RATE * dt;
    }

    /// A ripple is dead once its opacity is used up
    pub fn is_dead(&self) -> bool {
        self.alpha <= 0.0
    }
}

/// All ripple state for one mounted confirmation page.
///
/// Owned by the page's `App` instance: constructed when the page is entered,
/// dropped when it is left. Deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct RippleField {
    ripples: Vec<Ripple>,
    /// Countdown (s) until each remaining scheduled spawn
    pending: Vec<f32>,
    rng: Pcg32,
    bounds: Vec2,
}

impl RippleField {
    /// Schedule `RIPPLE_COUNT` spawns staggered `RIPPLE_SPAWN_INTERVAL`
    /// apart, placed randomly within `bounds` when their timer fires.
    pub fn new(seed: u64, bounds: Vec2) -> Self {
        let pending = (0..RIPPLE_COUNT)
            .map(|i| i as f32 * RIPPLE_SPAWN_INTERVAL)
            .collect();
        Self {
            ripples: Vec::with_capacity(RIPPLE_COUNT),
            pending,
            rng: Pcg32::seed_from_u64(seed),
            bounds,
        }
    }

    /// Track the canvas size; later spawns use the new bounds
    pub fn set_bounds(&mut self, bounds: Vec2) {
        self.bounds = bounds;
    }

    /// Live ripples, for drawing
    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    /// True once every scheduled ripple has spawned and faded out
    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty() && self.ripples.is_empty()
    }

    /// Advance the field by `dt` seconds: fire due spawns, grow and fade
    /// live ripples, drop the ones whose opacity reached zero.
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);

        let mut i = 0;
        while i < self.pending.len() {
            self.pending[i] -= dt;
            if self.pending[i] <= 0.0 {
                self.pending.swap_remove(i);
                let pos = Vec2::new(
                    self.rng.random::<f32>() * self.bounds.x,
                    self.rng.random::<f32>() * self.bounds.y,
                );
                self.ripples.push(Ripple::new(pos));
            } else {
                i += 1;
            }
        }

        for ripple in &mut self.ripples {
            ripple.advance(dt);
        }
        self.ripples.retain(|r| !r.is_dead());
    }
}
