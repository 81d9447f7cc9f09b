//! # Grid Topology
//!
//! Wall layouts for the coarse grid and the door pass that runs over them.
//!
//! A layout is drawn by independently walling each slot with the configured
//! density and is rejected unless the resulting graph is a single connected
//! component. Redraws are bounded; when the budget runs out the configured
//! [`TopologyFallback`] decides between failing and carving the last draw open
//! along a random spanning tree.

use crate::game::{CoarsePos, Direction};
use crate::utils::AdjacencyGraph;
use crate::{DungeonError, DungeonResult, GenerationConfig, Generator, TopologyFallback};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// State of a single wall slot between two grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallState {
    Open,
    Wall,
    ClosedDoor,
    OpenDoor,
}

impl WallState {
    /// Whether the slot separates its two cells in the adjacency graph.
    pub fn blocks(self) -> bool {
        matches!(self, WallState::Wall | WallState::ClosedDoor)
    }

    pub fn is_door(self) -> bool {
        matches!(self, WallState::ClosedDoor | WallState::OpenDoor)
    }
}

/// Address of a wall slot.
///
/// `Vertical { row, col }` separates `(row, col)` from `(row, col + 1)`;
/// `Horizontal { row, col }` separates `(row, col)` from `(row + 1, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallRef {
    Vertical { row: usize, col: usize },
    Horizontal { row: usize, col: usize },
}

impl WallRef {
    /// The two cells this slot separates.
    pub fn cells(self) -> (CoarsePos, CoarsePos) {
        match self {
            WallRef::Vertical { row, col } => (CoarsePos::new(row, col), CoarsePos::new(row, col + 1)),
            WallRef::Horizontal { row, col } => {
                (CoarsePos::new(row, col), CoarsePos::new(row + 1, col))
            }
        }
    }
}

/// Vertical (`rows x cols-1`) and horizontal (`rows-1 x cols`) wall matrices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallSet {
    rows: usize,
    cols: usize,
    vertical: Vec<WallState>,
    horizontal: Vec<WallState>,
}

impl WallSet {
    /// A layout with no walls at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{WallSet, WallState};
    ///
    /// let walls = WallSet::open(3, 4);
    /// assert_eq!(walls.vertical(2, 2), WallState::Open);
    /// assert_eq!(walls.wall_count(), 0);
    /// ```
    pub fn open(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            vertical: vec![WallState::Open; rows * cols.saturating_sub(1)],
            horizontal: vec![WallState::Open; rows.saturating_sub(1) * cols],
        }
    }

    /// Walls every slot independently with probability `density`.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, density: f64, rng: &mut R) -> Self {
        let mut walls = Self::open(rows, cols);
        for state in walls.vertical.iter_mut().chain(walls.horizontal.iter_mut()) {
            if rng.gen_bool(density) {
                *state = WallState::Wall;
            }
        }
        walls
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Slot between `(row, col)` and `(row, col + 1)`.
    pub fn vertical(&self, row: usize, col: usize) -> WallState {
        self.vertical[row * (self.cols - 1) + col]
    }

    /// Slot between `(row, col)` and `(row + 1, col)`.
    pub fn horizontal(&self, row: usize, col: usize) -> WallState {
        self.horizontal[row * self.cols + col]
    }

    pub fn set_vertical(&mut self, row: usize, col: usize, state: WallState) {
        let cols = self.cols - 1;
        self.vertical[row * cols + col] = state;
    }

    pub fn set_horizontal(&mut self, row: usize, col: usize, state: WallState) {
        let cols = self.cols;
        self.horizontal[row * cols + col] = state;
    }

    pub fn get(&self, slot: WallRef) -> WallState {
        match slot {
            WallRef::Vertical { row, col } => self.vertical(row, col),
            WallRef::Horizontal { row, col } => self.horizontal(row, col),
        }
    }

    pub fn set(&mut self, slot: WallRef, state: WallState) {
        match slot {
            WallRef::Vertical { row, col } => self.set_vertical(row, col, state),
            WallRef::Horizontal { row, col } => self.set_horizontal(row, col, state),
        }
    }

    /// The slot crossed when leaving `from` in `direction`, or `None` at the grid edge.
    pub fn slot_toward(&self, from: CoarsePos, direction: Direction) -> Option<WallRef> {
        let to = from.step(direction, self.rows, self.cols)?;
        Some(match direction {
            Direction::Up => WallRef::Horizontal {
                row: to.row,
                col: to.col,
            },
            Direction::Down => WallRef::Horizontal {
                row: from.row,
                col: from.col,
            },
            Direction::Left => WallRef::Vertical {
                row: to.row,
                col: to.col,
            },
            Direction::Right => WallRef::Vertical {
                row: from.row,
                col: from.col,
            },
        })
    }

    /// Every slot, vertical ones first, row-major within each matrix.
    pub fn slots(&self) -> Vec<WallRef> {
        let vertical = (0..self.rows).flat_map(|row| {
            (0..self.cols.saturating_sub(1)).map(move |col| WallRef::Vertical { row, col })
        });
        let horizontal = (0..self.rows.saturating_sub(1))
            .flat_map(|row| (0..self.cols).map(move |col| WallRef::Horizontal { row, col }));
        vertical.chain(horizontal).collect()
    }

    /// Slots holding a door, open or closed.
    pub fn doors(&self) -> Vec<WallRef> {
        self.slots()
            .into_iter()
            .filter(|&slot| self.get(slot).is_door())
            .collect()
    }

    pub fn wall_count(&self) -> usize {
        self.states().filter(|&state| state == WallState::Wall).count()
    }

    pub fn closed_door_count(&self) -> usize {
        self.states()
            .filter(|&state| state == WallState::ClosedDoor)
            .count()
    }

    fn states(&self) -> impl Iterator<Item = WallState> + '_ {
        self.vertical.iter().chain(self.horizontal.iter()).copied()
    }

    /// Turns every closed door into an open door.
    pub fn open_all_doors(&mut self) {
        for state in self.vertical.iter_mut().chain(self.horizontal.iter_mut()) {
            if *state == WallState::ClosedDoor {
                *state = WallState::OpenDoor;
            }
        }
    }
}

/// Outcome of the bounded connected-layout search.
#[derive(Debug, Clone)]
pub struct TopologyDraw {
    pub walls: WallSet,
    /// Number of random draws made
    pub attempts: u32,
    /// Whether the spanning-tree fallback carved the layout
    pub carved: bool,
}

/// Generator of connected wall layouts with chokepoint doors.
#[derive(Debug, Clone)]
pub struct TopologyGenerator {
    /// Redraws before the fallback applies
    pub max_attempts: u32,
    /// Behaviour when every redraw is disconnected
    pub fallback: TopologyFallback,
}

impl TopologyGenerator {
    pub fn new() -> Self {
        Self {
            max_attempts: crate::config::DEFAULT_MAX_TOPOLOGY_ATTEMPTS,
            fallback: TopologyFallback::SpanningTree,
        }
    }

    pub fn from_config(config: &GenerationConfig) -> Self {
        Self {
            max_attempts: config.max_topology_attempts,
            fallback: config.topology_fallback,
        }
    }

    /// Draws wall layouts until one forms a single connected component.
    pub fn generate_connected<R: Rng + ?Sized>(
        &self,
        rows: usize,
        cols: usize,
        density: f64,
        rng: &mut R,
    ) -> DungeonResult<TopologyDraw> {
        if rows == 0 || cols == 0 {
            return Err(DungeonError::InvalidConfig(format!(
                "grid dimensions must be positive, got {rows}x{cols}"
            )));
        }
        if !(0.0..=1.0).contains(&density) {
            return Err(DungeonError::InvalidConfig(format!(
                "wall density {density} is outside [0, 1]"
            )));
        }

        let mut last = None;
        for attempt in 1..=self.max_attempts {
            let walls = WallSet::random(rows, cols, density, rng);
            if AdjacencyGraph::from_walls(&walls).component_count() == 1 {
                debug!("Connected {rows}x{cols} layout after {attempt} attempt(s)");
                return Ok(TopologyDraw {
                    walls,
                    attempts: attempt,
                    carved: false,
                });
            }
            last = Some(walls);
        }

        match (self.fallback, last) {
            (TopologyFallback::SpanningTree, Some(mut walls)) => {
                warn!(
                    "No connected layout in {} attempts at density {density}; carving a spanning tree",
                    self.max_attempts
                );
                carve_spanning_tree(&mut walls, rng);
                Ok(TopologyDraw {
                    walls,
                    attempts: self.max_attempts,
                    carved: true,
                })
            }
            _ => Err(DungeonError::GenerationFailed(format!(
                "no connected {rows}x{cols} layout in {} attempts at density {density}",
                self.max_attempts
            ))),
        }
    }
}

impl Default for TopologyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator<WallSet> for TopologyGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DungeonResult<WallSet> {
        let draw = self.generate_connected(config.rows, config.cols, config.wall_density, rng)?;
        let mut walls = draw.walls;

        if config.include_doors {
            let doors = add_doors(&mut walls);
            info!("Placed {doors} door(s) on chokepoints");
        }
        if config.doors_open {
            walls.open_all_doors();
        }

        self.validate(&walls, config)?;
        Ok(walls)
    }

    fn validate(&self, walls: &WallSet, config: &GenerationConfig) -> DungeonResult<()> {
        if walls.rows() != config.rows || walls.cols() != config.cols {
            return Err(DungeonError::GenerationFailed(format!(
                "layout is {}x{}, expected {}x{}",
                walls.rows(),
                walls.cols(),
                config.rows,
                config.cols
            )));
        }
        let components = AdjacencyGraph::door_passable(walls).component_count();
        if components != 1 {
            return Err(DungeonError::GenerationFailed(format!(
                "layout has {components} connected components"
            )));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "TopologyGenerator"
    }
}

/// Marks chokepoint slots as closed doors and returns how many were placed.
///
/// An open slot qualifies when solid walls meet both of its ends (or the ends
/// touch the grid border). A candidate that would leave either of its cells
/// without any neighbour is reverted.
pub fn add_doors(walls: &mut WallSet) -> usize {
    let (rows, cols) = (walls.rows(), walls.cols());
    let is_wall = |walls: &WallSet, slot: WallRef| walls.get(slot) == WallState::Wall;
    let mut placed = 0;

    for row in 0..rows {
        for col in 0..cols.saturating_sub(1) {
            let slot = WallRef::Vertical { row, col };
            if walls.get(slot) != WallState::Open {
                continue;
            }

            let top = row == 0
                || is_wall(walls, WallRef::Vertical { row: row - 1, col })
                || is_wall(walls, WallRef::Horizontal { row: row - 1, col })
                || is_wall(walls, WallRef::Horizontal { row: row - 1, col: col + 1 });
            let bottom = row == rows - 1
                || is_wall(walls, WallRef::Vertical { row: row + 1, col })
                || is_wall(walls, WallRef::Horizontal { row, col })
                || is_wall(walls, WallRef::Horizontal { row, col: col + 1 });

            if top && bottom && try_place_door(walls, slot) {
                placed += 1;
            }
        }
    }

    for row in 0..rows.saturating_sub(1) {
        for col in 0..cols {
            let slot = WallRef::Horizontal { row, col };
            if walls.get(slot) != WallState::Open {
                continue;
            }

            let left = col == 0
                || is_wall(walls, WallRef::Horizontal { row, col: col - 1 })
                || is_wall(walls, WallRef::Vertical { row, col: col - 1 })
                || is_wall(walls, WallRef::Vertical { row: row + 1, col: col - 1 });
            let right = col == cols - 1
                || is_wall(walls, WallRef::Horizontal { row, col: col + 1 })
                || is_wall(walls, WallRef::Vertical { row, col })
                || is_wall(walls, WallRef::Vertical { row: row + 1, col });

            if left && right && try_place_door(walls, slot) {
                placed += 1;
            }
        }
    }

    placed
}

fn try_place_door(walls: &mut WallSet, slot: WallRef) -> bool {
    walls.set(slot, WallState::ClosedDoor);

    let graph = AdjacencyGraph::from_walls(walls);
    let (a, b) = slot.cells();
    let isolates = graph.degree(graph.index(a)) <= 1 || graph.degree(graph.index(b)) <= 1;
    if isolates {
        walls.set(slot, WallState::Open);
    }
    !isolates
}

/// Opens walls along a random spanning tree until the layout is connected.
///
/// Slots already open stay open; only as many walls are removed as there are
/// components to merge.
pub fn carve_spanning_tree<R: Rng + ?Sized>(walls: &mut WallSet, rng: &mut R) {
    fn find(parent: &mut [usize], mut node: usize) -> usize {
        while parent[node] != node {
            parent[node] = parent[parent[node]];
            node = parent[node];
        }
        node
    }

    let cols = walls.cols();
    let index = |pos: CoarsePos| pos.row * cols + pos.col;
    let mut parent: Vec<usize> = (0..walls.rows() * cols).collect();
    let mut slots = walls.slots();

    for &slot in &slots {
        if walls.get(slot) != WallState::Wall {
            let (a, b) = slot.cells();
            let (ra, rb) = (find(&mut parent, index(a)), find(&mut parent, index(b)));
            parent[ra] = rb;
        }
    }

    slots.shuffle(rng);
    let mut carved = 0;
    for slot in slots {
        if walls.get(slot) != WallState::Wall {
            continue;
        }
        let (a, b) = slot.cells();
        let (ra, rb) = (find(&mut parent, index(a)), find(&mut parent, index(b)));
        if ra != rb {
            walls.set(slot, WallState::Open);
            parent[ra] = rb;
            carved += 1;
        }
    }
    debug!("Carved {carved} wall(s) to connect the layout");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn generator(max_attempts: u32, fallback: TopologyFallback) -> TopologyGenerator {
        TopologyGenerator {
            max_attempts,
            fallback,
        }
    }

    #[test]
    fn test_matrix_shapes() {
        let walls = WallSet::open(4, 6);
        assert_eq!(walls.slots().len(), 4 * 5 + 3 * 6);
        assert_eq!(walls.doors().len(), 0);
    }

    #[test]
    fn test_single_cell_has_no_walls() {
        let mut rng = StdRng::seed_from_u64(5);
        let draw = TopologyGenerator::new()
            .generate_connected(1, 1, 0.9, &mut rng)
            .unwrap();
        assert!(draw.walls.slots().is_empty());
        assert_eq!(draw.attempts, 1);
        assert_eq!(AdjacencyGraph::from_walls(&draw.walls).to_matrix(), vec![vec![1]]);
    }

    #[test]
    fn test_zero_density_connects_first_try() {
        let mut rng = StdRng::seed_from_u64(11);
        let draw = TopologyGenerator::new()
            .generate_connected(8, 8, 0.0, &mut rng)
            .unwrap();
        assert_eq!(draw.attempts, 1);
        assert!(!draw.carved);
        assert_eq!(draw.walls.wall_count(), 0);
    }

    #[test]
    fn test_full_density_fails_when_asked_to() {
        let mut rng = StdRng::seed_from_u64(3);
        let result = generator(25, TopologyFallback::Fail).generate_connected(4, 4, 1.0, &mut rng);
        assert!(matches!(result, Err(DungeonError::GenerationFailed(_))));
    }

    #[test]
    fn test_full_density_spanning_tree_fallback() {
        let mut rng = StdRng::seed_from_u64(3);
        let draw = generator(25, TopologyFallback::SpanningTree)
            .generate_connected(5, 6, 1.0, &mut rng)
            .unwrap();
        assert!(draw.carved);
        assert_eq!(draw.attempts, 25);
        assert_eq!(AdjacencyGraph::from_walls(&draw.walls).component_count(), 1);
        // A spanning tree over 30 cells opens exactly 29 slots.
        let open = draw.walls.slots().len() - draw.walls.wall_count();
        assert_eq!(open, 29);
    }

    #[test]
    fn test_rejects_invalid_density() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(TopologyGenerator::new()
            .generate_connected(3, 3, -0.1, &mut rng)
            .is_err());
    }

    #[test]
    fn test_slot_toward() {
        let walls = WallSet::open(3, 3);
        let centre = CoarsePos::new(1, 1);
        assert_eq!(
            walls.slot_toward(centre, Direction::Up),
            Some(WallRef::Horizontal { row: 0, col: 1 })
        );
        assert_eq!(
            walls.slot_toward(centre, Direction::Down),
            Some(WallRef::Horizontal { row: 1, col: 1 })
        );
        assert_eq!(
            walls.slot_toward(centre, Direction::Left),
            Some(WallRef::Vertical { row: 1, col: 0 })
        );
        assert_eq!(
            walls.slot_toward(centre, Direction::Right),
            Some(WallRef::Vertical { row: 1, col: 1 })
        );
        assert_eq!(walls.slot_toward(CoarsePos::new(0, 0), Direction::Up), None);
    }

    #[test]
    fn test_door_on_corridor_chokepoint() {
        // Every vertical slot of a 1x4 corridor touches the border at both
        // ends; only the middle one leaves both of its cells a way out.
        let mut walls = WallSet::open(1, 4);
        let placed = add_doors(&mut walls);
        assert_eq!(placed, 1);
        assert_eq!(walls.vertical(0, 0), WallState::Open);
        assert_eq!(walls.vertical(0, 1), WallState::ClosedDoor);
        assert_eq!(walls.vertical(0, 2), WallState::Open);
    }

    #[test]
    fn test_no_door_without_flanking_walls() {
        let mut walls = WallSet::open(3, 3);
        assert_eq!(add_doors(&mut walls), 0);
    }

    #[test]
    fn test_door_between_walled_rooms() {
        // Two 1x3 rooms joined by a single gap in the middle column.
        let mut walls = WallSet::open(2, 3);
        walls.set_horizontal(0, 0, WallState::Wall);
        walls.set_horizontal(0, 2, WallState::Wall);

        let placed = add_doors(&mut walls);
        assert_eq!(placed, 1);
        assert_eq!(walls.horizontal(0, 1), WallState::ClosedDoor);

        let graph = AdjacencyGraph::from_walls(&walls);
        for slot in walls.doors() {
            let (a, b) = slot.cells();
            assert!(graph.degree(graph.index(a)) > 1);
            assert!(graph.degree(graph.index(b)) > 1);
        }
        assert_eq!(AdjacencyGraph::door_passable(&walls).component_count(), 1);
    }

    #[test]
    fn test_open_all_doors_is_idempotent() {
        let mut walls = WallSet::open(1, 4);
        add_doors(&mut walls);
        assert_eq!(walls.closed_door_count(), 1);

        walls.open_all_doors();
        let once = walls.clone();
        walls.open_all_doors();
        assert_eq!(walls, once);
        assert_eq!(walls.closed_door_count(), 0);
        assert_eq!(walls.doors().len(), 1);
    }

    #[test]
    fn test_generator_produces_valid_layout() {
        let config = GenerationConfig::for_testing(2024);
        let mut rng = crate::generation::create_rng(&config);
        let generator = TopologyGenerator::from_config(&config);

        let walls = generator.generate(&config, &mut rng).unwrap();
        assert!(generator.validate(&walls, &config).is_ok());
        assert_eq!(generator.generator_type(), "TopologyGenerator");
    }

    #[test]
    fn test_generator_honours_doors_open() {
        let config = GenerationConfig {
            doors_open: true,
            ..GenerationConfig::for_testing(77)
        };
        let mut rng = crate::generation::create_rng(&config);
        let walls = TopologyGenerator::from_config(&config)
            .generate(&config, &mut rng)
            .unwrap();
        assert_eq!(walls.closed_door_count(), 0);
    }
}
