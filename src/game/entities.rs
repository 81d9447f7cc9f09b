//! # Entities
//!
//! Markers occupying fine-grid cells and the records behind them.

use crate::game::{CoarsePos, Direction, FinePos};
use crate::generation::TrapSeverity;
use crate::{DungeonError, DungeonResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Encounter difficulty on the usual trivial-to-deadly scale.
///
/// Ordering follows difficulty, so `Difficulty::Easy < Difficulty::Deadly`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Difficulty {
    Trivial,
    Easy,
    Medium,
    Hard,
    Deadly,
    TooHard,
}

impl Difficulty {
    /// Tiers that get an encounter, in tie-breaking order.
    pub const ENCOUNTER_TIERS: [Difficulty; 4] = [
        Difficulty::Deadly,
        Difficulty::Hard,
        Difficulty::Medium,
        Difficulty::Easy,
    ];

    /// Tiers placed at random, in placement order.
    pub const RANDOM_TIERS: [Difficulty; 3] =
        [Difficulty::Hard, Difficulty::Medium, Difficulty::Easy];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Trivial => "Trivial",
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Deadly => "Deadly",
            Difficulty::TooHard => "Too hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = DungeonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trivial" => Ok(Difficulty::Trivial),
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "deadly" => Ok(Difficulty::Deadly),
            other => Err(DungeonError::InvalidArgument(format!(
                "unknown difficulty '{other}'"
            ))),
        }
    }
}

/// What occupies a fine-grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityMarker {
    Party,
    TreasureHoard,
    Encounter(Difficulty),
    Trap { visible: bool },
    TreasureChest(Difficulty),
}

/// Sparse fine-grid occupancy, at most one marker per cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityLayer {
    cells: BTreeMap<FinePos, EntityMarker>,
}

impl EntityLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a marker on an empty cell.
    pub fn place(&mut self, pos: FinePos, marker: EntityMarker) -> DungeonResult<()> {
        if let Some(existing) = self.cells.get(&pos) {
            return Err(DungeonError::Invariant(format!(
                "fine cell ({}, {}) already holds {:?}",
                pos.row, pos.col, existing
            )));
        }
        self.cells.insert(pos, marker);
        Ok(())
    }

    /// Sets a cell's marker, returning whatever was there before.
    pub fn replace(&mut self, pos: FinePos, marker: EntityMarker) -> Option<EntityMarker> {
        self.cells.insert(pos, marker)
    }

    pub fn remove(&mut self, pos: FinePos) -> Option<EntityMarker> {
        self.cells.remove(&pos)
    }

    pub fn get(&self, pos: FinePos) -> Option<EntityMarker> {
        self.cells.get(&pos).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FinePos, EntityMarker)> + '_ {
        self.cells.iter().map(|(&pos, &marker)| (pos, marker))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A placed trap. The visible/hidden state lives on its [`EntityMarker`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrapRecord {
    pub location: CoarsePos,
    pub trigger: String,
    pub severity: TrapSeverity,
    pub effect: String,
}

/// A placed encounter and the monsters in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterRecord {
    pub difficulty: Difficulty,
    pub location: CoarsePos,
    /// Monster name to count
    pub composition: BTreeMap<String, u32>,
}

impl EncounterRecord {
    /// Human-readable monster list, e.g. `2 x Goblin, 1 x Wolf`.
    pub fn describe(&self) -> String {
        if self.composition.is_empty() {
            return "no monsters".to_string();
        }
        self.composition
            .iter()
            .map(|(name, count)| format!("{count} x {name}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The party's position and flags.
///
/// Values are replaced on every transition rather than mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyState {
    pub position: FinePos,
    pub facing: Direction,
    pub lost: bool,
    pub paused: bool,
}

impl PartyState {
    pub fn new(position: FinePos) -> Self {
        Self {
            position,
            facing: Direction::Down,
            lost: false,
            paused: false,
        }
    }

    pub fn moved_to(self, position: FinePos, facing: Direction) -> Self {
        Self {
            position,
            facing,
            ..self
        }
    }

    pub fn facing(self, facing: Direction) -> Self {
        Self { facing, ..self }
    }

    pub fn with_paused(self, paused: bool) -> Self {
        Self { paused, ..self }
    }

    pub fn defeated(self) -> Self {
        Self { lost: true, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_ordering() {
        assert!(Difficulty::Trivial < Difficulty::Easy);
        assert!(Difficulty::Hard < Difficulty::Deadly);
        assert!(Difficulty::Deadly < Difficulty::TooHard);
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("Deadly".parse::<Difficulty>().unwrap(), Difficulty::Deadly);
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!(matches!(
            "legendary".parse::<Difficulty>(),
            Err(DungeonError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_entity_layer_rejects_double_placement() {
        let mut layer = EntityLayer::new();
        let pos = FinePos::new(1, 1);
        layer.place(pos, EntityMarker::Party).unwrap();
        assert!(layer.place(pos, EntityMarker::TreasureHoard).is_err());
        assert_eq!(layer.get(pos), Some(EntityMarker::Party));
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn test_entity_layer_replace_returns_previous() {
        let mut layer = EntityLayer::new();
        let pos = FinePos::new(4, 4);
        layer.place(pos, EntityMarker::Trap { visible: false }).unwrap();
        let previous = layer.replace(pos, EntityMarker::Party);
        assert_eq!(previous, Some(EntityMarker::Trap { visible: false }));
        assert_eq!(layer.remove(pos), Some(EntityMarker::Party));
        assert!(layer.is_empty());
    }

    #[test]
    fn test_party_state_transitions_are_values() {
        let start = PartyState::new(FinePos::new(1, 1));
        let moved = start.moved_to(FinePos::new(4, 1), Direction::Down);
        assert_eq!(start.position, FinePos::new(1, 1));
        assert_eq!(moved.position, FinePos::new(4, 1));
        assert!(moved.with_paused(true).paused);
        assert!(moved.defeated().lost);
        assert!(!moved.lost);
    }

    #[test]
    fn test_encounter_description() {
        let mut composition = BTreeMap::new();
        composition.insert("Goblin".to_string(), 3);
        composition.insert("Wolf".to_string(), 1);
        let record = EncounterRecord {
            difficulty: Difficulty::Easy,
            location: CoarsePos::new(0, 0),
            composition,
        };
        assert_eq!(record.describe(), "3 x Goblin, 1 x Wolf");
    }
}
