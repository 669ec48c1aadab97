//! Sources of die faces.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces single die faces. Every roll in the engine goes through one.
pub trait DiceSource {
    /// Roll one die with `sides` faces, returning a value in `1..=sides`
    /// (or 0 when `sides` is 0).
    fn roll_die(&mut self, sides: u32) -> u32;
}

/// A uniform dice source backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngDice<R = StdRng> {
    rng: R,
}

impl RngDice<StdRng> {
    /// A reproducible source.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// A source seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> RngDice<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> DiceSource for RngDice<R> {
    fn roll_die(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        self.rng.random_range(1..=sides)
    }
}

/// A deterministic source that replays a fixed script of faces, cycling when
/// it runs out. Faces outside `1..=sides` are clamped into range.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    faces: Vec<u32>,
    next: usize,
}

impl ScriptedDice {
    /// Create a source that replays `faces` in order.
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            next: 0,
        }
    }

    /// How many faces have been drawn so far.
    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl DiceSource for ScriptedDice {
    fn roll_die(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        let face = if self.faces.is_empty() {
            1
        } else {
            self.faces[self.next % self.faces.len()]
        };
        self.next += 1;
        face.clamp(1, sides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_dice_in_range() {
        let mut dice = RngDice::seeded(42);
        for _ in 0..500 {
            let face = dice.roll_die(6);
            assert!((1..=6).contains(&face));
        }
    }

    #[test]
    fn rng_dice_deterministic_with_seed() {
        let mut a = RngDice::seeded(99);
        let mut b = RngDice::seeded(99);
        for _ in 0..20 {
            assert_eq!(a.roll_die(100), b.roll_die(100));
        }
    }

    #[test]
    fn zero_sides_rolls_zero() {
        assert_eq!(RngDice::seeded(1).roll_die(0), 0);
        assert_eq!(ScriptedDice::new([5]).roll_die(0), 0);
    }

    #[test]
    fn scripted_replays_and_cycles() {
        let mut dice = ScriptedDice::new([3, 9]);
        assert_eq!(dice.roll_die(10), 3);
        assert_eq!(dice.roll_die(10), 9);
        assert_eq!(dice.roll_die(10), 3);
        assert_eq!(dice.drawn(), 3);
    }

    #[test]
    fn scripted_clamps_to_die() {
        let mut dice = ScriptedDice::new([0, 50]);
        assert_eq!(dice.roll_die(6), 1);
        assert_eq!(dice.roll_die(6), 6);
    }
}
