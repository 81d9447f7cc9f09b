//! # Dice Mathematics
//!
//! Dice rolling helpers used by trap, treasure and perception checks.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rolls `count` dice with `sides` faces each and returns the total.
///
/// Dice with zero sides contribute nothing.
///
/// # Examples
///
/// ```
/// use delve::roll;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let total = roll(&mut rng, 3, 6);
/// assert!((3..=18).contains(&total));
/// ```
pub fn roll<R: Rng + ?Sized>(rng: &mut R, count: u32, sides: u32) -> u32 {
    if sides == 0 {
        return 0;
    }
    (0..count).map(|_| rng.gen_range(1..=sides)).sum()
}

/// A dice expression such as `2d6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dice {
    pub count: u32,
    pub sides: u32,
}

impl Dice {
    /// Creates a new dice expression.
    pub const fn new(count: u32, sides: u32) -> Self {
        Self { count, sides }
    }

    /// A fixed value expressed as `n` one-sided dice.
    pub const fn flat(n: u32) -> Self {
        Self { count: n, sides: 1 }
    }

    /// Rolls the expression.
    pub fn roll<R: Rng + ?Sized>(self, rng: &mut R) -> u32 {
        roll(rng, self.count, self.sides)
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

/// Converts a fractional challenge rating into a die size, never below 1.
pub fn die_size(value: f64) -> u32 {
    if value < 1.0 {
        1
    } else {
        value.floor() as u32
    }
}
