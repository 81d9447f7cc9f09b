//! # Graph Queries
//!
//! The adjacency graph derived from a [`WallSet`] and the shortest-path,
//! reachability and walk-count queries run over it.
//!
//! Nodes are coarse cells indexed row-major (`row * cols + col`). Every node is
//! implicitly adjacent to itself, which is what makes bounded reachability the
//! row of a boolean adjacency power.

use crate::game::{CoarsePos, Direction};
use crate::generation::{WallSet, WallState};
use ::pathfinding::prelude::{connected_components, dijkstra_all};
use std::collections::{BTreeSet, HashSet};

/// Undirected cell adjacency for a wall layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyGraph {
    rows: usize,
    cols: usize,
    /// Neighbours of each node, self-loop excluded
    neighbours: Vec<Vec<usize>>,
}

impl AdjacencyGraph {
    /// Builds the graph in which walls and closed doors block movement.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{AdjacencyGraph, WallSet};
    ///
    /// let walls = WallSet::open(2, 2);
    /// let graph = AdjacencyGraph::from_walls(&walls);
    /// assert_eq!(graph.node_count(), 4);
    /// assert_eq!(graph.component_count(), 1);
    /// ```
    pub fn from_walls(walls: &WallSet) -> Self {
        Self::build(walls, WallState::blocks)
    }

    /// Builds the graph in which only solid walls block movement.
    ///
    /// Placement measures distances on this view so that a closed door never
    /// makes two cells look unreachable.
    pub fn door_passable(walls: &WallSet) -> Self {
        Self::build(walls, |state| state == WallState::Wall)
    }

    fn build(walls: &WallSet, blocks: impl Fn(WallState) -> bool) -> Self {
        let (rows, cols) = (walls.rows(), walls.cols());
        let mut neighbours = vec![Vec::with_capacity(4); rows * cols];

        for (node, adjacent) in neighbours.iter_mut().enumerate() {
            let pos = CoarsePos::new(node / cols, node % cols);
            for direction in Direction::all() {
                let Some(to) = pos.step(direction, rows, cols) else {
                    continue;
                };
                let open = walls
                    .slot_toward(pos, direction)
                    .is_some_and(|slot| !blocks(walls.get(slot)));
                if open {
                    adjacent.push(to.row * cols + to.col);
                }
            }
        }

        Self {
            rows,
            cols,
            neighbours,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of nodes (`rows * cols`).
    pub fn node_count(&self) -> usize {
        self.neighbours.len()
    }

    /// Node index of a coarse cell.
    pub fn index(&self, pos: CoarsePos) -> usize {
        pos.row * self.cols + pos.col
    }

    /// Coarse cell of a node index.
    pub fn position(&self, node: usize) -> CoarsePos {
        CoarsePos::new(node / self.cols, node % self.cols)
    }

    /// Whether two nodes are adjacent. Every node is adjacent to itself.
    pub fn is_adjacent(&self, u: usize, v: usize) -> bool {
        u == v || self.neighbours[u].contains(&v)
    }

    /// Row sum of the adjacency matrix, self-loop included.
    pub fn degree(&self, node: usize) -> usize {
        self.neighbours[node].len() + 1
    }

    /// Dense 0/1 adjacency matrix with ones on the diagonal.
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        let n = self.node_count();
        (0..n)
            .map(|u| (0..n).map(|v| u8::from(self.is_adjacent(u, v))).collect())
            .collect()
    }

    /// Connected components as node sets.
    pub fn connected_components(&self) -> Vec<HashSet<usize>> {
        let starts: Vec<usize> = (0..self.node_count()).collect();
        connected_components(&starts, |&node| self.neighbours[node].iter().copied())
    }

    pub fn component_count(&self) -> usize {
        self.connected_components().len()
    }

    /// Hop distances from `source` to every node; `None` when unreachable.
    pub fn distances_from(&self, source: usize) -> Vec<Option<u32>> {
        let reached = dijkstra_all(&source, |&node| {
            self.neighbours[node].iter().map(|&next| (next, 1u32))
        });

        let mut distances = vec![None; self.node_count()];
        distances[source] = Some(0);
        for (node, (_, cost)) in reached {
            if node != source {
                distances[node] = Some(cost);
            }
        }
        distances
    }

    /// Hop distance between two cells.
    pub fn distance(&self, from: CoarsePos, to: CoarsePos) -> Option<u32> {
        self.distances_from(self.index(from))[self.index(to)]
    }

    /// All-pairs shortest path lengths with unit edge weights.
    pub fn shortest_path_matrix(&self) -> DistanceMatrix {
        let size = self.node_count();
        let mut data = Vec::with_capacity(size * size);
        for source in 0..size {
            data.extend(self.distances_from(source));
        }
        DistanceMatrix { size, data }
    }

    /// Nodes reachable from `from` within `steps` hops.
    ///
    /// This is the non-zero pattern of row `from` of the `steps`-th boolean
    /// power of the adjacency matrix; the self-loops keep every node reached
    /// at step `k` reached at step `k + 1`.
    pub fn reachable_within_steps(&self, from: usize, steps: u32) -> BTreeSet<usize> {
        let mut reached = BTreeSet::from([from]);
        let mut frontier = vec![from];

        for _ in 0..steps {
            let mut next = Vec::new();
            for &node in &frontier {
                for &neighbour in &self.neighbours[node] {
                    if reached.insert(neighbour) {
                        next.push(neighbour);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        reached
    }

    /// Number of length-2 walks from `u` to `v`, i.e. `(A²)[u][v]`.
    ///
    /// Self-loops count, so two adjacent open cells always have at least two
    /// walks (stay-then-step and step-then-stay).
    pub fn path_count(&self, u: usize, v: usize) -> u32 {
        std::iter::once(u)
            .chain(self.neighbours[u].iter().copied())
            .filter(|&middle| self.is_adjacent(middle, v))
            .count() as u32
    }
}

/// All-pairs hop distances, `None` where no path exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    size: usize,
    data: Vec<Option<u32>>,
}

impl DistanceMatrix {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, u: usize, v: usize) -> Option<u32> {
        self.data[u * self.size + v]
    }

    /// The first pair, in row-major order, with the largest finite distance.
    pub fn diameter(&self) -> Option<(usize, usize, u32)> {
        let mut best: Option<(usize, usize, u32)> = None;
        for u in 0..self.size {
            for v in 0..self.size {
                if let Some(distance) = self.get(u, v) {
                    if best.map_or(true, |(_, _, longest)| distance > longest) {
                        best = Some((u, v, distance));
                    }
                }
            }
        }
        best
    }
}
