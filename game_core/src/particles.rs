//! Win-burst particles
//!
//! Purely decorative: nothing in the simulation reads particle state.

use crate::{GameRng, Params};
use glam::Vec2;

#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub angle: f32,
    pub speed: f32,
    pub size: f32,
    pub life: f32, // 1.0 at spawn, removed once <= 0
    pub hue: f32,  // degrees
}

impl Particle {
    pub fn spawn(pos: Vec2, rng: &mut GameRng) -> Self {
        Self {
            pos,
            speed: rng.unit() * Params::PARTICLE_SPEED_RANGE + Params::PARTICLE_SPEED_MIN,
            angle: rng.unit() * std::f32::consts::TAU,
            size: rng.unit() * Params::PARTICLE_SIZE_RANGE + Params::PARTICLE_SIZE_MIN,
            life: 1.0,
            hue: rng.unit() * 360.0,
        }
    }

    pub fn update(&mut self) {
        self.pos += Vec2::new(self.angle.cos(), self.angle.sin()) * self.speed;
        self.life -= Params::PARTICLE_LIFE_DECAY;
        self.size *= Params::PARTICLE_SIZE_DECAY;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Draw opacity
    pub fn alpha(&self) -> f32 {
        self.life.clamp(0.0, 1.0)
    }
}

/// Particle storage compacted in place with swap-remove
#[derive(Debug, Clone, Default)]
pub struct Particles {
    items: Vec<Particle>,
}

impl Particles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn spawn_burst(&mut self, center: Vec2, count: usize, rng: &mut GameRng) {
        self.items.reserve(count);
        for _ in 0..count {
            self.items.push(Particle::spawn(center, rng));
        }
    }

    /// Drop dead particles, then advance the survivors
    pub fn update(&mut self) {
        self.expire();
        for particle in &mut self.items {
            particle.update();
        }
    }

    fn expire(&mut self) {
        let mut i = 0;
        while i < self.items.len() {
            if self.items[i].is_alive() {
                i += 1;
            } else {
                self.items.swap_remove(i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burst(count: usize) -> Particles {
        let mut rng = GameRng::new(3);
        let mut particles = Particles::new();
        particles.spawn_burst(Vec2::new(600.0, 300.0), count, &mut rng);
        particles
    }

    #[test]
    fn test_spawn_ranges() {
        let particles = burst(Params::BURST_PARTICLES);
        assert_eq!(particles.len(), 100);
        for p in particles.iter() {
            assert_eq!(p.pos, Vec2::new(600.0, 300.0));
            assert!(p.speed >= 2.0 && p.speed < 10.0);
            assert!(p.size >= 2.0 && p.size < 6.0);
            assert!(p.hue >= 0.0 && p.hue < 360.0);
            assert_eq!(p.life, 1.0);
        }
    }

    #[test]
    fn test_update_decays_life_and_size() {
        let mut particles = burst(1);
        let before = *particles.iter().next().unwrap();
        particles.update();
        let after = *particles.iter().next().unwrap();

        assert!((before.life - after.life - 0.02).abs() < 1e-6);
        assert!((after.size - before.size * 0.95).abs() < 1e-5);
        assert!(((after.pos - before.pos).length() - before.speed).abs() < 1e-3);
    }

    #[test]
    fn test_particles_expire() {
        let mut particles = burst(Params::BURST_PARTICLES);
        let mut last_len = particles.len();
        let mut last_life = 1.0;
        for _ in 0..49 {
            particles.update();
            assert!(particles.len() <= last_len, "burst never grows");
            last_len = particles.len();
            let life = particles.iter().next().unwrap().life;
            assert!(life < last_life, "life strictly decreases");
            last_life = life;
        }
        // A few more ticks push life to <= 0 and the next update drops them
        for _ in 0..4 {
            particles.update();
        }
        assert!(particles.is_empty());
    }

    #[test]
    fn test_alpha_is_clamped() {
        let mut p = Particle::spawn(Vec2::ZERO, &mut GameRng::new(1));
        p.life = -0.01;
        assert_eq!(p.alpha(), 0.0);
        assert!(!p.is_alive());
    }
}
