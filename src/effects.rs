//! Particle effects: sparkles on each turn and confetti on a solve.
//!
//! Pure simulation with fixed-size pools. Speeds are in world units per
//! 1/60 s frame and lifetimes in frames, so `update` scales by `delta * 60`.

use rand::Rng;

use crate::pieces::Color;

/// Sparkles that can be alive at once.
pub const SPARKLE_POOL: usize = 60;
/// Confetti pieces released by one victory effect.
pub const CONFETTI_POOL: usize = 100;

const FRAMES_PER_SECOND: f32 = 60.0;
const GRAVITY: f32 = -0.0001;

#[derive(Clone, Copy, Debug, Default)]
struct Particle {
    active: bool,
    position: [f32; 3],
    velocity: [f32; 3],
    acceleration: [f32; 3],
    size: f32,
    life: f32,
    max_life: f32,
    rotation: f32,
    rotation_speed: f32,
    color: [f32; 3],
}

impl Particle {
    /// Steps the particle by `frames`, deactivating it once it has expired.
    fn step(&mut self, frames: f32) {
        self.life += frames;
        if self.life >= self.max_life {
            self.active = false;
            return;
        }
        for axis in 0..3 {
            self.velocity[axis] += self.acceleration[axis] * frames;
            self.position[axis] += self.velocity[axis] * frames;
        }
        self.rotation += self.rotation_speed * frames;
    }

    /// Remaining fraction of the lifetime, 1.0 when fresh.
    fn life_ratio(&self) -> f32 {
        1.0 - self.life / self.max_life
    }
}

/// A particle to draw this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleParticle {
    pub position: [f32; 3],
    pub size: f32,
    pub rotation: f32,
    pub color: [f32; 3],
}

/// Sparkle and confetti pools.
#[derive(Debug)]
pub struct CubeEffects {
    sparkles: Vec<Particle>,
    confetti: Vec<Particle>,
}

impl Default for CubeEffects {
    fn default() -> Self {
        Self {
            sparkles: vec![Particle::default(); SPARKLE_POOL],
            confetti: vec![Particle::default(); CONFETTI_POOL],
        }
    }
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, spread: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * spread
}

impl CubeEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activates up to `count` idle sparkles around `position`.
    ///
    /// Returns how many were spawned; a full pool spawns fewer.
    pub fn spawn_sparkles<R: Rng + ?Sized>(
        &mut self,
        position: [f32; 3],
        count: usize,
        rng: &mut R,
    ) -> usize {
        let mut spawned = 0;
        for sparkle in self.sparkles.iter_mut().filter(|s| !s.active).take(count) {
            *sparkle = Particle {
                active: true,
                position: [
                    position[0] + jitter(rng, 0.2),
                    position[1] + jitter(rng, 0.2),
                    position[2] + jitter(rng, 0.2),
                ],
                // biased upward
                velocity: [jitter(rng, 0.05), jitter(rng, 0.05) + 0.03, jitter(rng, 0.05)],
                acceleration: [0.0; 3],
                size: rng.gen_range(0.02..0.1),
                life: 0.0,
                max_life: rng.gen_range(30.0..60.0),
                rotation: 0.0,
                rotation_speed: 0.0,
                color: [1.0, 1.0, rng.gen_range(0.5..1.0)],
            };
            spawned += 1;
        }
        spawned
    }

    /// Releases the whole confetti pool above the cube.
    pub fn victory<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        const PALETTE: [Color; 6] = [
            Color::Red,
            Color::Orange,
            Color::White,
            Color::Yellow,
            Color::Green,
            Color::Blue,
        ];
        for confetti in &mut self.confetti {
            *confetti = Particle {
                active: true,
                position: [jitter(rng, 3.0), 5.0, jitter(rng, 3.0)],
                velocity: [jitter(rng, 0.03), -rng.gen_range(0.01..0.06), jitter(rng, 0.03)],
                acceleration: [0.0, GRAVITY, 0.0],
                size: rng.gen_range(0.05..0.15),
                life: 0.0,
                max_life: rng.gen_range(200.0..400.0),
                rotation: rng.gen_range(0.0..std::f32::consts::TAU),
                rotation_speed: jitter(rng, 0.1),
                color: PALETTE[rng.gen_range(0..PALETTE.len())].rgb(),
            };
        }
    }

    /// Advances every live particle by `delta` seconds.
    pub fn update(&mut self, delta: f32) {
        let frames = delta.max(0.0) * FRAMES_PER_SECOND;
        for particle in self
            .sparkles
            .iter_mut()
            .chain(self.confetti.iter_mut())
            .filter(|p| p.active)
        {
            particle.step(frames);
        }
    }

    pub fn active_count(&self) -> usize {
        self.sparkles
            .iter()
            .chain(&self.confetti)
            .filter(|p| p.active)
            .count()
    }

    pub fn clear(&mut self) {
        for particle in self.sparkles.iter_mut().chain(self.confetti.iter_mut()) {
            particle.active = false;
        }
    }

    /// Live particles with their current display size.
    pub fn visible(&self) -> Vec<VisibleParticle> {
        let sparkles = self.sparkles.iter().filter(|p| p.active).map(|p| {
            // fade in over the first 30% of life, out over the last 30%
            let ratio = p.life_ratio();
            let scale = if ratio > 0.7 {
                (1.0 - ratio) / 0.3
            } else if ratio < 0.3 {
                ratio / 0.3
            } else {
                1.0
            };
            (p, scale)
        });
        let confetti = self.confetti.iter().filter(|p| p.active).map(|p| {
            let ratio = p.life_ratio();
            (p, if ratio < 0.2 { ratio / 0.2 } else { 1.0 })
        });

        sparkles
            .chain(confetti)
            .map(|(p, scale)| VisibleParticle {
                position: p.position,
                size: p.size * scale,
                rotation: p.rotation,
                color: p.color,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_sparkles_are_bounded_by_pool() {
        let mut effects = CubeEffects::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(effects.spawn_sparkles([0.0; 3], 10, &mut rng), 10);
        assert_eq!(effects.spawn_sparkles([0.0; 3], 100, &mut rng), SPARKLE_POOL - 10);
        assert_eq!(effects.spawn_sparkles([0.0; 3], 1, &mut rng), 0);
        assert_eq!(effects.active_count(), SPARKLE_POOL);
    }

    #[test]
    fn test_sparkles_expire_after_their_lifetime() {
        let mut effects = CubeEffects::new();
        let mut rng = StdRng::seed_from_u64(2);
        effects.spawn_sparkles([1.0, 1.0, 1.0], 10, &mut rng);
        for _ in 0..70 {
            effects.update(1.0 / 60.0);
        }
        assert_eq!(effects.active_count(), 0);
        assert!(effects.visible().is_empty());
    }

    #[test]
    fn test_sparkles_drift_upward() {
        let mut effects = CubeEffects::new();
        let mut rng = StdRng::seed_from_u64(3);
        effects.spawn_sparkles([0.0; 3], 20, &mut rng);
        let before: f32 = effects.visible().iter().map(|p| p.position[1]).sum();
        effects.update(10.0 / 60.0);
        let after: f32 = effects.visible().iter().map(|p| p.position[1]).sum();
        assert!(after > before);
    }

    #[test]
    fn test_victory_confetti_falls_and_expires() {
        let mut effects = CubeEffects::new();
        let mut rng = StdRng::seed_from_u64(4);
        effects.victory(&mut rng);
        assert_eq!(effects.active_count(), CONFETTI_POOL);
        assert!(effects.visible().iter().all(|p| p.position[1] == 5.0));

        effects.update(1.0);
        let visible = effects.visible();
        assert_eq!(visible.len(), CONFETTI_POOL);
        assert!(visible.iter().all(|p| p.position[1] < 5.0));

        for _ in 0..7 {
            effects.update(1.0);
        }
        assert_eq!(effects.active_count(), 0);
    }

    #[test]
    fn test_sparkle_size_fades_in() {
        let mut effects = CubeEffects::new();
        let mut rng = StdRng::seed_from_u64(5);
        effects.spawn_sparkles([0.0; 3], 1, &mut rng);
        assert_eq!(effects.visible()[0].size, 0.0);
        effects.update(5.0 / 60.0);
        assert!(effects.visible()[0].size > 0.0);
    }

    #[test]
    fn test_clear_deactivates_everything() {
        let mut effects = CubeEffects::new();
        let mut rng = StdRng::seed_from_u64(6);
        effects.victory(&mut rng);
        effects.spawn_sparkles([0.0; 3], 5, &mut rng);
        effects.clear();
        assert_eq!(effects.active_count(), 0);
    }
}
