use glam::Vec2;
use log::warn;
use rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;

use crate::color::Rgb;
use crate::particle::{self, Particle, BURST_SIZE, PARTICLE_RADIUS};
use crate::surface::Surface;

/// Alpha of the black overlay composited before each tick's particles.
pub const TRAIL_FADE_ALPHA: f32 = 0.15;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("particle engine used before a surface was bound")]
    NotInitialized,
}

/// Owns the live particle set and drives it: one `tick` per frame advances,
/// draws and retires particles; `spawn_burst` feeds it new ones.
///
/// The engine has no scheduler of its own. The host calls `tick` from its
/// frame callback and stops doing so once `is_running` turns false, which is
/// what `teardown` is for.
pub struct ParticleEngine<S> {
    surface: Option<S>,
    particles: Vec<Particle>,
    rng: StdRng,
    particle_cap: Option<usize>,
    torn_down: bool,
}

impl<S: Surface> ParticleEngine<S> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            surface: None,
            particles: Vec::new(),
            rng,
            particle_cap: None,
            torn_down: false,
        }
    }

    /// Caps the live set; a burst that would exceed it is clipped.
    pub fn set_particle_cap(&mut self, cap: Option<usize>) {
        self.particle_cap = cap;
    }

    /// Binds the surface the engine draws into. May be called again to
    /// rebind after a viewport change.
    pub fn initialize(&mut self, surface: S) {
        self.surface = Some(surface);
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn live_count(&self) -> usize {
        self.particles.len()
    }

    pub fn is_running(&self) -> bool {
        !self.torn_down
    }

    /// Appends one burst of [`BURST_SIZE`] particles at `origin`. Without a
    /// fixed `color` each particle derives its hue from remaining life.
    pub fn spawn_burst(&mut self, origin: Vec2, color: Option<Rgb>) -> Result<(), EngineError> {
        if self.surface.is_none() {
            return Err(EngineError::NotInitialized);
        }

        let budget = match self.particle_cap {
            Some(cap) => cap.saturating_sub(self.particles.len()).min(BURST_SIZE),
            None => BURST_SIZE,
        };
        if budget < BURST_SIZE {
            warn!(
                "particle cap reached, clipping burst to {budget} of {BURST_SIZE} particles"
            );
        }

        self.particles
            .extend(particle::burst(&mut self.rng, origin, color).take(budget));
        Ok(())
    }

    /// One animation frame: fade the previous frame, advance every particle
    /// and draw it at its updated position, then drop the expired ones.
    ///
    /// After `teardown` this is inert and touches neither particles nor the
    /// surface.
    pub fn tick(&mut self) -> Result<(), EngineError> {
        let surface = self.surface.as_mut().ok_or(EngineError::NotInitialized)?;
        if self.torn_down {
            return Ok(());
        }

        surface.fade(TRAIL_FADE_ALPHA);
        for p in &mut self.particles {
            p.advance();
            surface.fill_circle(p.position, PARTICLE_RADIUS, p.draw_color());
        }
        self.particles.retain(Particle::is_live);

        Ok(())
    }

    /// Stops the engine. Idempotent; subsequent ticks draw nothing and the
    /// host is expected to stop scheduling frames and forwarding clicks.
    pub fn teardown(&mut self) {
        self.torn_down = true;
    }
}

impl<S: Surface> Default for ParticleEngine<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::GOLD;
    use crate::particle::INITIAL_LIFE;
    use crate::surface::{DrawCmd, DrawList};

    fn engine() -> ParticleEngine<DrawList> {
        let mut engine = ParticleEngine::with_rng(StdRng::seed_from_u64(42));
        engine.initialize(DrawList::new(800.0, 600.0));
        engine
    }

    fn drain(engine: &mut ParticleEngine<DrawList>) -> Vec<DrawCmd> {
        let surface = engine.surface_mut().unwrap();
        let commands = surface.commands().to_vec();
        surface.clear();
        commands
    }

    #[test]
    fn use_before_initialize_fails_fast() {
        let mut engine: ParticleEngine<DrawList> =
            ParticleEngine::with_rng(StdRng::seed_from_u64(1));
        assert_eq!(engine.tick(), Err(EngineError::NotInitialized));
        assert_eq!(
            engine.spawn_burst(Vec2::ZERO, None),
            Err(EngineError::NotInitialized)
        );
    }

    #[test]
    fn burst_grows_live_set_by_exactly_sixty() {
        let mut engine = engine();
        engine.spawn_burst(Vec2::new(100.0, 100.0), None).unwrap();
        assert_eq!(engine.live_count(), BURST_SIZE);
        engine.spawn_burst(Vec2::new(200.0, 50.0), Some(GOLD)).unwrap();
        assert_eq!(engine.live_count(), 2 * BURST_SIZE);
    }

    #[test]
    fn tick_fades_then_draws_at_advanced_positions() {
        let mut engine = engine();
        let origin = Vec2::new(100.0, 100.0);
        engine.spawn_burst(origin, Some(GOLD)).unwrap();
        engine.tick().unwrap();

        let commands = drain(&mut engine);
        assert_eq!(commands.len(), 1 + BURST_SIZE);
        assert_eq!(
            commands[0],
            DrawCmd::Fade {
                alpha: TRAIL_FADE_ALPHA
            }
        );
        for cmd in &commands[1..] {
            match cmd {
                DrawCmd::Circle {
                    center,
                    radius,
                    color,
                } => {
                    // position was advanced before the draw
                    let displacement = (*center - origin).length();
                    assert!(displacement >= 2.0 && displacement < 6.0);
                    assert_eq!(*radius, PARTICLE_RADIUS);
                    assert_eq!(*color, GOLD);
                }
                other => panic!("expected circle, got {other:?}"),
            }
        }
    }

    #[test]
    fn burst_expires_together_after_initial_life_ticks() {
        let mut engine = engine();
        engine
            .spawn_burst(Vec2::new(100.0, 100.0), Some(Rgb::from_hex("#FFD700").unwrap()))
            .unwrap();

        for _ in 0..INITIAL_LIFE - 1 {
            engine.tick().unwrap();
        }
        assert_eq!(engine.live_count(), BURST_SIZE);

        engine.tick().unwrap();
        // expiry is immediate: the tick that decremented life to 0 removed them
        assert_eq!(engine.live_count(), 0);
    }

    #[test]
    fn staggered_bursts_expire_one_tick_apart() {
        let mut engine = engine();
        engine.spawn_burst(Vec2::new(10.0, 10.0), None).unwrap();
        engine.tick().unwrap();
        engine.spawn_burst(Vec2::new(20.0, 20.0), None).unwrap();
        assert_eq!(engine.live_count(), 2 * BURST_SIZE);

        // first burst has already aged one tick
        for _ in 0..INITIAL_LIFE - 1 {
            engine.tick().unwrap();
        }
        assert_eq!(engine.live_count(), BURST_SIZE);
        engine.tick().unwrap();
        assert_eq!(engine.live_count(), 0);
    }

    #[test]
    fn particle_cap_clips_bursts() {
        let mut engine = engine();
        engine.set_particle_cap(Some(90));
        engine.spawn_burst(Vec2::ZERO, None).unwrap();
        assert_eq!(engine.live_count(), BURST_SIZE);
        engine.spawn_burst(Vec2::ZERO, None).unwrap();
        assert_eq!(engine.live_count(), 90);
    }

    #[test]
    fn teardown_is_idempotent_and_silences_ticks() {
        let mut engine = engine();
        engine.spawn_burst(Vec2::new(50.0, 50.0), None).unwrap();
        engine.teardown();
        engine.teardown();
        assert!(!engine.is_running());

        engine.tick().unwrap();
        engine.tick().unwrap();
        assert!(drain(&mut engine).is_empty());
        // the live set is frozen rather than advanced
        assert_eq!(engine.live_count(), BURST_SIZE);
    }
}
