//! # Rendering Module
//!
//! Read-only snapshots of a session and the renderers that draw them.
//!
//! A renderer never sees the [`DungeonSession`] itself. It receives a
//! [`DungeonSnapshot`] that already has fog of war applied, so nothing the
//! party cannot see can leak onto the screen.

pub mod display;

pub use display::*;

use crate::game::{
    CoarsePos, DungeonSession, EntityMarker, FinePos, PartyState, SessionStatistics,
};
use crate::generation::{TreasureHoard, WallSet, WallState};
use crate::DungeonResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What a renderer may show of a session at one moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonSnapshot {
    pub seed: u64,
    pub rows: usize,
    pub cols: usize,
    pub fine_density: usize,
    pub party: PartyState,
    /// Navigation state name
    pub state: String,
    /// Question currently asked of the player
    pub prompt: Option<String>,
    /// Cells in sight; `None` when the whole map is revealed
    pub visible: Option<BTreeSet<CoarsePos>>,
    /// Wall layout; slots between two obscured cells read as walls
    pub walls: WallSet,
    /// Markers the party knows about
    pub entities: Vec<(FinePos, EntityMarker)>,
    pub statistics: SessionStatistics,
    pub hoard: Option<TreasureHoard>,
}

impl DungeonSnapshot {
    /// Captures the session as the party sees it.
    ///
    /// With `reveal_all` the fog is lifted and hidden traps are shown, as at
    /// the end of a run.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{DungeonSession, DungeonSnapshot, GenerationConfig};
    ///
    /// let session = DungeonSession::new(GenerationConfig::for_testing(2)).unwrap();
    /// let snapshot = DungeonSnapshot::capture(&session, false);
    /// assert!(snapshot.is_visible(session.party_position()));
    /// assert!(snapshot.to_json().unwrap().contains("\"rows\""));
    /// ```
    pub fn capture(session: &DungeonSession, reveal_all: bool) -> Self {
        let config = session.config();
        let density = config.fine_density;
        let visible = (!reveal_all).then(|| session.visible_cells().clone());

        let mut walls = session.walls().clone();
        if let Some(cells) = &visible {
            for slot in walls.slots() {
                let (a, b) = slot.cells();
                if !cells.contains(&a) && !cells.contains(&b) {
                    walls.set(slot, WallState::Wall);
                }
            }
        }

        let entities = session
            .entities()
            .iter()
            .filter(|&(pos, marker)| {
                reveal_all
                    || (visible
                        .as_ref()
                        .map_or(true, |cells| cells.contains(&pos.to_coarse(density)))
                        && marker != EntityMarker::Trap { visible: false })
            })
            .collect();

        Self {
            seed: config.seed,
            rows: session.walls().rows(),
            cols: session.walls().cols(),
            fine_density: density,
            walls,
            party: session.party(),
            state: session.state().name().to_string(),
            prompt: session.state().prompt().map(str::to_string),
            visible,
            entities,
            statistics: session.statistics().clone(),
            hoard: session.hoard().cloned(),
        }
    }

    pub fn is_visible(&self, pos: CoarsePos) -> bool {
        self.visible
            .as_ref()
            .map_or(true, |cells| cells.contains(&pos))
    }

    pub fn to_json(&self) -> DungeonResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A surface that can draw snapshots and show messages.
pub trait Renderer {
    /// Draws the map and status for one snapshot.
    fn render(&mut self, snapshot: &DungeonSnapshot) -> DungeonResult<()>;

    /// Shows a one-off message such as an event description.
    fn show_message(&mut self, message: &str) -> DungeonResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Difficulty;
    use crate::GenerationConfig;

    #[test]
    fn test_fog_hides_distant_entities() {
        let session = DungeonSession::new(GenerationConfig::for_testing(4)).unwrap();
        let snapshot = DungeonSnapshot::capture(&session, false);

        assert!(snapshot
            .entities
            .iter()
            .all(|(pos, _)| snapshot.is_visible(pos.to_coarse(snapshot.fine_density))));
        // The treasure sits at the far end of the diameter.
        assert!(!snapshot.is_visible(session.treasure_location()));
        assert!(!snapshot
            .entities
            .contains(&(session.treasure_location().to_fine(3), EntityMarker::Encounter(Difficulty::Deadly))));
    }

    #[test]
    fn test_fog_masks_unseen_walls() {
        let session = DungeonSession::new(GenerationConfig::for_testing(4)).unwrap();
        let fogged = DungeonSnapshot::capture(&session, false);

        let mut masked = 0;
        for slot in session.walls().slots() {
            let (a, b) = slot.cells();
            if fogged.is_visible(a) || fogged.is_visible(b) {
                assert_eq!(fogged.walls.get(slot), session.walls().get(slot));
            } else {
                assert_eq!(fogged.walls.get(slot), WallState::Wall);
                masked += 1;
            }
        }
        assert!(masked > 0);
        assert!(fogged.walls.closed_door_count() <= session.walls().closed_door_count());

        let revealed = DungeonSnapshot::capture(&session, true);
        assert_eq!(&revealed.walls, session.walls());
    }

    #[test]
    fn test_reveal_all_shows_hidden_traps() {
        let session = DungeonSession::new(GenerationConfig::for_testing(4)).unwrap();
        let snapshot = DungeonSnapshot::capture(&session, true);

        assert!(snapshot.visible.is_none());
        let traps = snapshot
            .entities
            .iter()
            .filter(|(_, marker)| matches!(marker, EntityMarker::Trap { .. }))
            .count();
        assert_eq!(traps, 3);
    }

    #[test]
    fn test_snapshot_json_round_trip() {
        let session = DungeonSession::new(GenerationConfig::for_testing(6)).unwrap();
        let snapshot = DungeonSnapshot::capture(&session, false);
        let json = snapshot.to_json().unwrap();
        let back: DungeonSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
