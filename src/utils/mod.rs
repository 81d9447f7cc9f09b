//! # Utilities Module
//!
//! Dice arithmetic and graph queries shared by generation and play.

pub mod math;
pub mod pathfinding;

pub use math::*;
pub use self::pathfinding::*;
