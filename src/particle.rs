use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::color::Rgb;

/// Particles spawned per burst.
pub const BURST_SIZE: usize = 60;

/// Ticks a freshly spawned particle stays live.
pub const INITIAL_LIFE: i32 = 100;

/// Draw radius in surface units.
pub const PARTICLE_RADIUS: f32 = 2.0;

const MIN_SPEED: f32 = 2.0;
const MAX_SPEED: f32 = 6.0;

/// A single point light. Direction and speed are fixed at spawn; only the
/// position and the life counter change afterwards.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec2,
    pub angle: f32,
    pub speed: f32,
    pub life: i32,
    pub color: Option<Rgb>,
}

impl Particle {
    pub fn spawn(rng: &mut impl Rng, origin: Vec2, color: Option<Rgb>) -> Self {
        Self {
            position: origin,
            angle: rng.gen_range(0.0..TAU),
            speed: rng.gen_range(MIN_SPEED..MAX_SPEED),
            life: INITIAL_LIFE,
            color,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), self.angle.sin()) * self.speed
    }

    /// One tick of motion: straight-line displacement and one unit of life.
    pub fn advance(&mut self) {
        self.position += self.velocity();
        self.life -= 1;
    }

    pub fn is_live(&self) -> bool {
        self.life > 0
    }

    pub fn draw_color(&self) -> Rgb {
        self.color.unwrap_or_else(|| Rgb::from_life(self.life))
    }
}

/// Builds one burst: `BURST_SIZE` particles sharing `origin`, each with its
/// own randomized direction and speed.
pub fn burst(
    rng: &mut impl Rng,
    origin: Vec2,
    color: Option<Rgb>,
) -> impl Iterator<Item = Particle> + '_ {
    (0..BURST_SIZE).map(move |_| Particle::spawn(rng, origin, color))
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::color::GOLD;

    #[test]
    fn burst_particles_start_within_spawn_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let origin = Vec2::new(320.0, 240.0);

        let particles: Vec<_> = burst(&mut rng, origin, Some(GOLD)).collect();
        assert_eq!(particles.len(), BURST_SIZE);

        for p in &particles {
            assert_eq!(p.position, origin);
            assert_eq!(p.life, INITIAL_LIFE);
            assert!((0.0..TAU).contains(&p.angle));
            assert!((MIN_SPEED..MAX_SPEED).contains(&p.speed));
            assert_eq!(p.color, Some(GOLD));
        }
    }

    #[test]
    fn motion_is_straight_line_constant_velocity() {
        let mut rng = StdRng::seed_from_u64(11);
        let origin = Vec2::new(100.0, 100.0);
        let mut p = Particle::spawn(&mut rng, origin, None);
        let velocity = p.velocity();

        for k in 1..=INITIAL_LIFE {
            p.advance();
            assert_eq!(p.life, INITIAL_LIFE - k);
            let expected = origin + velocity * k as f32;
            assert!((p.position - expected).length() < 1e-3);
        }
        assert!(!p.is_live());
    }

    #[test]
    fn draw_color_prefers_fixed_color() {
        let mut rng = StdRng::seed_from_u64(3);
        let fixed = Particle::spawn(&mut rng, Vec2::ZERO, Some(GOLD));
        assert_eq!(fixed.draw_color(), GOLD);

        let mut derived = Particle::spawn(&mut rng, Vec2::ZERO, None);
        derived.life = 50;
        assert_eq!(derived.draw_color(), Rgb::from_life(50));
    }
}
