//! Random number generation for maze building
//!
//! Uses a seeded ChaCha RNG so a seed always reproduces the same maze.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Maze random number generator
///
/// Wraps ChaCha8Rng for reproducible random number generation.
/// Only the seed is serialized; deserializing restarts the stream from it.
#[derive(Debug, Clone)]
pub struct MazeRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl Serialize for MazeRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MazeRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(MazeRng::new(seed))
    }
}

impl MazeRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns 0..n-1
    ///
    /// Returns 0 if n is 0.
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Uniform value in `[0, 1)`
    pub fn value(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    /// Returns true with probability `p`
    ///
    /// Always draws, so the stream advances the same way whatever `p` is.
    pub fn chance(&mut self, p: f64) -> bool {
        self.value() < p
    }

    /// Returns true with probability 1/n
    pub fn one_in(&mut self, n: u32) -> bool {
        self.rn2(n) == 0
    }

    /// Generate a random coordinate within `0..max_x` and `0..max_z`
    ///
    /// The x component is drawn first.
    pub fn random_coord(&mut self, max_x: u32, max_z: u32) -> (u32, u32) {
        let x = self.rn2(max_x);
        let z = self.rn2(max_z);
        (x, z)
    }
}

impl Default for MazeRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rn2_bounds() {
        let mut rng = MazeRng::new(42);
        for _ in 0..1000 {
            let n = rng.rn2(10);
            assert!(n < 10);
        }
    }

    #[test]
    fn test_value_range() {
        let mut rng = MazeRng::new(42);
        for _ in 0..1000 {
            let v = rng.value();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = MazeRng::new(7);
        for _ in 0..200 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
        }
    }

    #[test]
    fn test_reproducibility() {
        let mut rng1 = MazeRng::new(42);
        let mut rng2 = MazeRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.rn2(100), rng2.rn2(100));
            assert_eq!(rng1.random_coord(9, 4), rng2.random_coord(9, 4));
        }
    }

    #[test]
    fn test_zero_inputs() {
        let mut rng = MazeRng::new(42);
        assert_eq!(rng.rn2(0), 0);
        assert!(rng.one_in(1));
    }

    #[test]
    fn test_seed_survives_serde() {
        let rng = MazeRng::new(1234);
        let json = serde_json::to_string(&rng).unwrap();
        let restored: MazeRng = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.seed(), 1234);
    }
}
