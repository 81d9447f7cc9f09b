//! # Entity Placement
//!
//! Places the party, the treasure and its Deadly guardian, the remaining
//! encounters and the traps on the coarse grid.
//!
//! The party and treasure sit at the two ends of a longest shortest path.
//! Everything else is drawn uniformly at random and rejected while it lies
//! within the category's minimum separation of anything already placed.
//! Distances are measured on the door-passable graph.

use crate::game::{CoarsePos, Difficulty, TrapRecord};
use crate::generation::generate_trap;
use crate::utils::{AdjacencyGraph, DistanceMatrix};
use crate::{DungeonError, DungeonResult};
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Separation and retry limits for placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRules {
    /// Encounters must be strictly farther apart than this
    pub min_encounter_separation: u32,
    /// Traps must be strictly farther than this from everything placed before them
    pub min_trap_separation: u32,
    pub trap_count: usize,
    /// Draws per entity before the whole placement restarts
    pub max_attempts: u32,
    pub max_restarts: u32,
}

impl Default for PlacementRules {
    fn default() -> Self {
        crate::GenerationConfig::default().placement_rules()
    }
}

/// Where everything went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub party: CoarsePos,
    pub treasure: CoarsePos,
    /// Deadly first (on the treasure), then Hard, Medium, Easy
    pub encounters: Vec<(Difficulty, CoarsePos)>,
    pub traps: Vec<TrapRecord>,
    /// Restarts needed before placement succeeded
    pub restarts: u32,
}

impl Placement {
    /// Every placed location in placement order.
    pub fn locations(&self) -> Vec<CoarsePos> {
        let mut locations = vec![self.treasure, self.party];
        locations.extend(
            self.encounters
                .iter()
                .filter(|(difficulty, _)| *difficulty != Difficulty::Deadly)
                .map(|&(_, pos)| pos),
        );
        locations.extend(self.traps.iter().map(|trap| trap.location));
        locations
    }
}

/// Places entities under the configured separation rules.
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    pub rules: PlacementRules,
}

impl PlacementEngine {
    pub fn new(rules: PlacementRules) -> Self {
        Self { rules }
    }

    /// Runs placement, restarting from scratch whenever a draw runs out of attempts.
    pub fn place_all<R: Rng + ?Sized>(
        &self,
        graph: &AdjacencyGraph,
        rng: &mut R,
    ) -> DungeonResult<Placement> {
        if graph.node_count() < 2 {
            return Err(DungeonError::InvalidConfig(format!(
                "placement needs at least two cells, grid has {}",
                graph.node_count()
            )));
        }

        let distances = graph.shortest_path_matrix();
        let (start, end, length) = distances.diameter().ok_or_else(|| {
            DungeonError::Invariant("distance matrix has no finite entries".to_string())
        })?;
        debug!(
            "Party at {} and treasure at {}, {length} step(s) apart",
            graph.position(start),
            graph.position(end)
        );

        for restart in 0..=self.rules.max_restarts {
            if let Some(mut placement) = self.try_place(graph, &distances, start, end, rng) {
                placement.restarts = restart;
                return Ok(placement);
            }
            info!(
                "Placement ran out of attempts, restarting ({}/{})",
                restart + 1,
                self.rules.max_restarts
            );
        }

        Err(DungeonError::PlacementFailed(format!(
            "could not place entities after {} restarts",
            self.rules.max_restarts
        )))
    }

    fn try_place<R: Rng + ?Sized>(
        &self,
        graph: &AdjacencyGraph,
        distances: &DistanceMatrix,
        start: usize,
        end: usize,
        rng: &mut R,
    ) -> Option<Placement> {
        let mut occupied = vec![end, start];
        let mut encounters = vec![(Difficulty::Deadly, graph.position(end))];

        for difficulty in Difficulty::RANDOM_TIERS {
            let node = self.draw(
                graph.node_count(),
                distances,
                &occupied,
                self.rules.min_encounter_separation,
                rng,
            )?;
            occupied.push(node);
            encounters.push((difficulty, graph.position(node)));
        }

        let mut traps = Vec::with_capacity(self.rules.trap_count);
        for _ in 0..self.rules.trap_count {
            let node = self.draw(
                graph.node_count(),
                distances,
                &occupied,
                self.rules.min_trap_separation,
                rng,
            )?;
            occupied.push(node);

            let details = generate_trap(rng);
            traps.push(TrapRecord {
                location: graph.position(node),
                trigger: details.trigger,
                severity: details.severity,
                effect: details.effect,
            });
        }

        Some(Placement {
            party: graph.position(start),
            treasure: graph.position(end),
            encounters,
            traps,
            restarts: 0,
        })
    }

    /// Draws a uniformly random node farther than `separation` from every occupied node.
    fn draw<R: Rng + ?Sized>(
        &self,
        node_count: usize,
        distances: &DistanceMatrix,
        occupied: &[usize],
        separation: u32,
        rng: &mut R,
    ) -> Option<usize> {
        (0..self.rules.max_attempts).find_map(|_| {
            let candidate = rng.gen_range(0..node_count);
            let clear = occupied.iter().all(|&other| {
                distances
                    .get(candidate, other)
                    .map_or(true, |distance| distance > separation)
            });
            clear.then_some(candidate)
        })
    }
}
