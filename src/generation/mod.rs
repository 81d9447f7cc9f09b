//! # Generation Module
//!
//! Procedural generation of dungeon topology, entity placement, encounters,
//! traps and treasure.
//!
//! Generation runs once per session: a connected wall layout is drawn, doors are
//! added on chokepoints, and the party, treasure, encounters and traps are placed
//! at minimum shortest-path separations. Flavor content (traps, treasure) is a
//! set of pure table lookups driven by the same random source.

pub mod encounters;
pub mod items;
pub mod placement;
pub mod topology;
pub mod traps;

pub use encounters::*;
pub use items::*;
pub use placement::*;
pub use topology::*;
pub use traps::*;

use crate::config;
use crate::{DungeonError, DungeonResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do when wall redraws never produce a connected layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopologyFallback {
    /// Return [`DungeonError::GenerationFailed`]
    Fail,
    /// Keep the last draw and carve it open along a random spanning tree
    SpanningTree,
}

/// Concealment bonuses added to a trap's 1d20 hiding roll.
///
/// A trap is spotted when `1d20 + bonus <= passive perception`, so a larger
/// bonus makes the trap harder to spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrapConcealment {
    /// Bonus when the trap is exactly at the visibility distance
    pub at_edge: i32,
    /// Bonus when the trap is closer than the visibility distance
    pub within: i32,
}

impl Default for TrapConcealment {
    fn default() -> Self {
        Self {
            at_edge: 5,
            within: 3,
        }
    }
}

/// Configuration for dungeon generation and play.
///
/// Controls the grid, wall and door layout, placement separations, retry
/// budgets and the party that explores the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Coarse grid rows
    pub rows: usize,
    /// Coarse grid columns
    pub cols: usize,
    /// Probability that each wall slot holds a wall (0.0 to 1.0)
    pub wall_density: f64,
    /// Whether to add doors on chokepoints
    pub include_doors: bool,
    /// Whether doors start open
    pub doors_open: bool,
    /// Fine grid cells per coarse cell along each axis
    pub fine_density: usize,
    /// Hops the party can see
    pub visibility_distance: u32,
    /// Hops at which an encounter reacts to the party
    pub encounter_trigger_distance: u32,
    /// Encounters must be farther apart than this
    pub min_encounter_separation: u32,
    /// Traps must be farther than this from every other placed entity
    pub min_trap_separation: u32,
    /// Number of traps to place
    pub trap_count: usize,
    /// Attempts per candidate draw during placement
    pub max_placement_attempts: u32,
    /// Full placement restarts before giving up
    pub max_placement_restarts: u32,
    /// Wall redraws before the fallback applies
    pub max_topology_attempts: u32,
    /// Behaviour when the redraw budget runs out
    pub topology_fallback: TopologyFallback,
    /// Whether traps start revealed
    pub visible_traps: bool,
    /// Concealment bonuses for trap spotting
    pub trap_concealment: TrapConcealment,
    /// Party composition
    pub party: Party,
    /// Highest passive perception in the party
    pub passive_perception: i32,
}

impl GenerationConfig {
    /// Creates a default generation configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(12345);
    /// assert_eq!(config.seed, 12345);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rows: config::DEFAULT_ROWS,
            cols: config::DEFAULT_COLS,
            wall_density: config::DEFAULT_WALL_DENSITY,
            include_doors: true,
            doors_open: false,
            fine_density: config::DEFAULT_FINE_DENSITY,
            visibility_distance: config::VISIBILITY_DISTANCE,
            encounter_trigger_distance: config::ENCOUNTER_TRIGGER_DISTANCE,
            min_encounter_separation: 2 * config::ENCOUNTER_TRIGGER_DISTANCE,
            min_trap_separation: 2 * config::VISIBILITY_DISTANCE,
            trap_count: config::DEFAULT_TRAP_COUNT,
            max_placement_attempts: config::DEFAULT_MAX_PLACEMENT_ATTEMPTS,
            max_placement_restarts: config::DEFAULT_MAX_PLACEMENT_RESTARTS,
            max_topology_attempts: config::DEFAULT_MAX_TOPOLOGY_ATTEMPTS,
            topology_fallback: TopologyFallback::SpanningTree,
            visible_traps: false,
            trap_concealment: TrapConcealment::default(),
            party: Party::default(),
            passive_perception: 13,
        }
    }

    /// Creates a configuration for testing with smaller budgets.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            max_placement_attempts: 10_000,
            max_placement_restarts: 50,
            max_topology_attempts: 2_000,
            ..Self::new(seed)
        }
    }

    /// Loads a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> DungeonResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration describes a playable dungeon.
    pub fn validate(&self) -> DungeonResult<()> {
        if self.rows < config::MIN_GRID_SIDE || self.cols < config::MIN_GRID_SIDE {
            return Err(DungeonError::InvalidConfig(format!(
                "grid must be at least {min}x{min}, got {}x{}",
                self.rows,
                self.cols,
                min = config::MIN_GRID_SIDE
            )));
        }
        if !(0.0..=1.0).contains(&self.wall_density) {
            return Err(DungeonError::InvalidConfig(format!(
                "wall density {} is outside [0, 1]",
                self.wall_density
            )));
        }
        if self.fine_density < 2 {
            return Err(DungeonError::InvalidConfig(
                "fine density must be at least 2".to_string(),
            ));
        }
        if self.max_topology_attempts == 0
            || self.max_placement_attempts == 0
            || self.max_placement_restarts == 0
        {
            return Err(DungeonError::InvalidConfig(
                "retry budgets must be positive".to_string(),
            ));
        }
        self.party.validate()
    }

    /// Placement rules derived from this configuration.
    pub fn placement_rules(&self) -> PlacementRules {
        PlacementRules {
            min_encounter_separation: self.min_encounter_separation,
            min_trap_separation: self.min_trap_separation,
            trap_count: self.trap_count,
            max_attempts: self.max_placement_attempts,
            max_restarts: self.max_placement_restarts,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DungeonResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> DungeonResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Creates a seeded random number generator from the config.
pub fn create_rng(config: &GenerationConfig) -> StdRng {
    StdRng::seed_from_u64(config.seed)
}
