//! # Delve
//!
//! A turn-based grid dungeon crawler with guaranteed-connected procedural maps.
//!
//! ## Architecture Overview
//!
//! The crate is organised around a coarse room grid and the graph derived from
//! its walls:
//!
//! - **Generation**: wall layouts with a single connected component, chokepoint
//!   doors, and placement of the party, treasure, encounters and traps under
//!   shortest-path separation constraints
//! - **Graph queries**: all-pairs distances, bounded reachability and walk counts
//!   over the adjacency graph
//! - **Game**: the dungeon session, fog-of-war visibility and the navigation
//!   state machine that advances one player input at a time
//! - **Input / Rendering**: text command parsing and an ASCII map renderer that
//!   consume read-only session snapshots
//!
//! All randomness flows through a single seeded [`rand::rngs::StdRng`] owned by
//! the session, so a dungeon is reproducible from its seed.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

pub use game::{
    CoarsePos, Difficulty, Direction, DungeonSession, EncounterRecord, EntityLayer, EntityMarker,
    FinePos, GameEvent, NavState, PartyState, TrapRecord,
};

pub use generation::{
    GenerationConfig, Generator, PlacementEngine, TopologyGenerator, WallSet, WallState,
};

pub use rendering::{AsciiDisplay, DungeonSnapshot, Renderer};

/// Core error type for the dungeon engine.
#[derive(thiserror::Error, Debug)]
pub enum DungeonError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A content lookup received a key it does not know
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Entity placement ran out of restarts
    #[error("Placement failed: {0}")]
    PlacementFailed(String),

    /// Internal logic error
    #[error("Invariant violated: {0}")]
    Invariant(String),

    /// Input not accepted in the current state
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The run has already ended
    #[error("Game over: {0}")]
    GameOver(String),
}

/// Result type used throughout the crate.
pub type DungeonResult<T> = Result<T, DungeonError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default number of coarse grid rows
    pub const DEFAULT_ROWS: usize = 10;

    /// Default number of coarse grid columns
    pub const DEFAULT_COLS: usize = 10;

    /// Default probability that any wall slot holds a wall
    pub const DEFAULT_WALL_DENSITY: f64 = 0.3;

    /// Fine grid cells per coarse cell along each axis
    pub const DEFAULT_FINE_DENSITY: usize = 3;

    /// Hops the party can see
    pub const VISIBILITY_DISTANCE: u32 = 2;

    /// Hops at which an encounter notices the party
    pub const ENCOUNTER_TRIGGER_DISTANCE: u32 = VISIBILITY_DISTANCE;

    /// Number of traps placed per dungeon
    pub const DEFAULT_TRAP_COUNT: usize = 3;

    /// Attempts per candidate draw during placement
    pub const DEFAULT_MAX_PLACEMENT_ATTEMPTS: u32 = 1_000_000;

    /// Full placement restarts before giving up
    pub const DEFAULT_MAX_PLACEMENT_RESTARTS: u32 = 100;

    /// Wall redraws before the topology fallback applies
    pub const DEFAULT_MAX_TOPOLOGY_ATTEMPTS: u32 = 10_000;

    /// Smallest grid side accepted for a playable session
    pub const MIN_GRID_SIDE: usize = 3;
}
