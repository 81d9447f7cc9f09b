//! # Visibility and Fog of War
//!
//! Which coarse cells the party can see, whether a hidden trap is spotted and
//! whether a nearby encounter notices the party.
//!
//! All three queries run over the current adjacency graph, so closed doors
//! block sight exactly as they block movement.

use crate::game::{CoarsePos, Difficulty, EncounterRecord};
use crate::generation::TrapConcealment;
use crate::utils::{roll, AdjacencyGraph};
use rand::Rng;
use std::collections::BTreeSet;

/// Cells within `steps` hops of `from`. Everything else is obscured.
///
/// # Examples
///
/// ```
/// use delve::{compute_visible, AdjacencyGraph, CoarsePos, WallSet};
///
/// let graph = AdjacencyGraph::from_walls(&WallSet::open(5, 5));
/// let visible = compute_visible(&graph, CoarsePos::new(2, 2), 1);
/// assert_eq!(visible.len(), 5);
/// assert!(visible.contains(&CoarsePos::new(2, 2)));
/// ```
pub fn compute_visible(graph: &AdjacencyGraph, from: CoarsePos, steps: u32) -> BTreeSet<CoarsePos> {
    graph
        .reachable_within_steps(graph.index(from), steps)
        .into_iter()
        .map(|node| graph.position(node))
        .collect()
}

/// Concealment bonus for a hidden trap `distance` hops from the party.
///
/// `None` means no spotting roll happens this turn: the trap is out of sight,
/// unreachable, or the party is standing on it.
pub fn concealment_bonus(
    distance: Option<u32>,
    visibility_distance: u32,
    concealment: &TrapConcealment,
) -> Option<i32> {
    let distance = distance?;
    if distance > visibility_distance {
        None
    } else if distance == visibility_distance {
        Some(concealment.at_edge)
    } else if distance > 0 {
        Some(concealment.within)
    } else {
        None
    }
}

/// Rolls the trap's hiding check. The party spots it when
/// `1d20 + bonus <= passive_perception`.
pub fn trap_spotted<R: Rng + ?Sized>(bonus: i32, passive_perception: i32, rng: &mut R) -> bool {
    roll(rng, 1, 20) as i32 + bonus <= passive_perception
}

/// Outcome of the per-turn encounter proximity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterCheck {
    /// Nothing within trigger distance
    None,
    /// The party can see the encounter but it has not noticed them
    Sighted(Difficulty),
    /// The encounter attacks
    Fight(Difficulty),
}

/// Finds the nearest encounter and decides whether it fights.
///
/// Ties on distance favour the harder encounter. Within `trigger_distance` an
/// encounter in the same row or column always fights. Otherwise it fights
/// when more than one length-2 walk connects the two cells (no corner wall
/// between them) and is merely sighted when exactly one does.
pub fn check_for_encounter<'a>(
    graph: &AdjacencyGraph,
    party: CoarsePos,
    encounters: impl IntoIterator<Item = &'a EncounterRecord>,
    trigger_distance: u32,
) -> EncounterCheck {
    let distances = graph.distances_from(graph.index(party));

    let nearest = encounters
        .into_iter()
        .filter_map(|record| {
            distances[graph.index(record.location)].map(|distance| (distance, record))
        })
        .min_by_key(|(distance, record)| (*distance, std::cmp::Reverse(record.difficulty)));

    let Some((distance, record)) = nearest else {
        return EncounterCheck::None;
    };
    if distance > trigger_distance {
        return EncounterCheck::None;
    }

    if party.is_aligned_with(record.location) {
        return EncounterCheck::Fight(record.difficulty);
    }
    match graph.path_count(graph.index(party), graph.index(record.location)) {
        0 => EncounterCheck::None,
        1 => EncounterCheck::Sighted(record.difficulty),
        _ => EncounterCheck::Fight(record.difficulty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{WallRef, WallSet, WallState};
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::BTreeMap;

    fn encounter(difficulty: Difficulty, row: usize, col: usize) -> EncounterRecord {
        EncounterRecord {
            difficulty,
            location: CoarsePos::new(row, col),
            composition: BTreeMap::new(),
        }
    }

    #[test]
    fn test_visible_stops_at_walls() {
        let mut walls = WallSet::open(1, 4);
        walls.set_vertical(0, 1, WallState::Wall);
        let graph = AdjacencyGraph::from_walls(&walls);

        let visible = compute_visible(&graph, CoarsePos::new(0, 0), 3);
        assert_eq!(
            visible,
            BTreeSet::from([CoarsePos::new(0, 0), CoarsePos::new(0, 1)])
        );
    }

    #[test]
    fn test_closed_doors_block_sight() {
        let mut walls = WallSet::open(1, 3);
        walls.set(WallRef::Vertical { row: 0, col: 0 }, WallState::ClosedDoor);
        let graph = AdjacencyGraph::from_walls(&walls);
        assert_eq!(compute_visible(&graph, CoarsePos::new(0, 0), 2).len(), 1);

        walls.open_all_doors();
        let graph = AdjacencyGraph::from_walls(&walls);
        assert_eq!(compute_visible(&graph, CoarsePos::new(0, 0), 2).len(), 3);
    }

    #[test]
    fn test_concealment_bands() {
        let concealment = TrapConcealment::default();
        assert_eq!(concealment_bonus(Some(2), 2, &concealment), Some(5));
        assert_eq!(concealment_bonus(Some(1), 2, &concealment), Some(3));
        assert_eq!(concealment_bonus(Some(0), 2, &concealment), None);
        assert_eq!(concealment_bonus(Some(3), 2, &concealment), None);
        assert_eq!(concealment_bonus(None, 2, &concealment), None);
    }

    #[test]
    fn test_trap_spotting_extremes() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..100 {
            assert!(trap_spotted(0, 20, &mut rng));
            assert!(!trap_spotted(5, 5, &mut rng));
        }
    }

    #[test]
    fn test_aligned_encounter_fights() {
        let graph = AdjacencyGraph::from_walls(&WallSet::open(5, 5));
        let records = [encounter(Difficulty::Easy, 0, 2)];
        assert_eq!(
            check_for_encounter(&graph, CoarsePos::new(0, 0), &records, 2),
            EncounterCheck::Fight(Difficulty::Easy)
        );
        assert_eq!(
            check_for_encounter(&graph, CoarsePos::new(4, 4), &records, 2),
            EncounterCheck::None
        );
    }

    #[test]
    fn test_diagonal_encounter_behind_a_corner_is_sighted() {
        // Only the route through (0, 1) links (0, 0) and (1, 1).
        let mut walls = WallSet::open(2, 2);
        walls.set_horizontal(0, 0, WallState::Wall);
        let graph = AdjacencyGraph::from_walls(&walls);
        let records = [encounter(Difficulty::Hard, 1, 1)];

        assert_eq!(
            check_for_encounter(&graph, CoarsePos::new(0, 0), &records, 2),
            EncounterCheck::Sighted(Difficulty::Hard)
        );

        let open = AdjacencyGraph::from_walls(&WallSet::open(2, 2));
        assert_eq!(
            check_for_encounter(&open, CoarsePos::new(0, 0), &records, 2),
            EncounterCheck::Fight(Difficulty::Hard)
        );
    }

    #[test]
    fn test_ties_favour_the_harder_encounter() {
        let graph = AdjacencyGraph::from_walls(&WallSet::open(1, 5));
        let records = [
            encounter(Difficulty::Easy, 0, 0),
            encounter(Difficulty::Deadly, 0, 4),
        ];
        assert_eq!(
            check_for_encounter(&graph, CoarsePos::new(0, 2), &records, 2),
            EncounterCheck::Fight(Difficulty::Deadly)
        );
    }

    #[test]
    fn test_unreachable_encounters_are_ignored() {
        let mut walls = WallSet::open(1, 2);
        walls.set_vertical(0, 0, WallState::Wall);
        let graph = AdjacencyGraph::from_walls(&walls);
        let records = [encounter(Difficulty::Medium, 0, 1)];
        assert_eq!(
            check_for_encounter(&graph, CoarsePos::new(0, 0), &records, 2),
            EncounterCheck::None
        );
    }
}
