//! Property tests for wall generation, door placement, visibility and entity placement

use delve::{
    add_doors, compute_visible, AdjacencyGraph, CoarsePos, DungeonError, DungeonResult,
    DungeonSession, GenerationConfig, Generator, PlacementEngine, PlacementRules,
    TopologyFallback, TopologyGenerator, WallRef, WallSet, WallState,
};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

fn connected_layout(rows: usize, cols: usize, density: f64, seed: u64) -> WallSet {
    let generator = TopologyGenerator {
        max_attempts: 200,
        fallback: TopologyFallback::SpanningTree,
    };
    let mut rng = StdRng::seed_from_u64(seed);
    generator
        .generate_connected(rows, cols, density, &mut rng)
        .unwrap()
        .walls
}

fn is_wall(walls: &WallSet, slot: WallRef) -> bool {
    walls.get(slot) == WallState::Wall
}

/// Whether solid walls (or the border) meet both ends of a door slot.
fn is_flanked(walls: &WallSet, slot: WallRef) -> bool {
    let (rows, cols) = (walls.rows(), walls.cols());
    match slot {
        WallRef::Vertical { row, col } => {
            let top = row == 0
                || is_wall(walls, WallRef::Vertical { row: row - 1, col })
                || is_wall(walls, WallRef::Horizontal { row: row - 1, col })
                || is_wall(walls, WallRef::Horizontal { row: row - 1, col: col + 1 });
            let bottom = row == rows - 1
                || is_wall(walls, WallRef::Vertical { row: row + 1, col })
                || is_wall(walls, WallRef::Horizontal { row, col })
                || is_wall(walls, WallRef::Horizontal { row, col: col + 1 });
            top && bottom
        }
        WallRef::Horizontal { row, col } => {
            let left = col == 0
                || is_wall(walls, WallRef::Horizontal { row, col: col - 1 })
                || is_wall(walls, WallRef::Vertical { row, col: col - 1 })
                || is_wall(walls, WallRef::Vertical { row: row + 1, col: col - 1 });
            let right = col == cols - 1
                || is_wall(walls, WallRef::Horizontal { row, col: col + 1 })
                || is_wall(walls, WallRef::Vertical { row, col })
                || is_wall(walls, WallRef::Vertical { row: row + 1, col });
            left && right
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_layouts_have_one_component(
        rows in 1usize..9,
        cols in 1usize..9,
        density in 0.0f64..0.7,
        seed in any::<u64>(),
    ) {
        let walls = connected_layout(rows, cols, density, seed);
        prop_assert_eq!(AdjacencyGraph::from_walls(&walls).component_count(), 1);
    }

    #[test]
    fn prop_doors_are_flanked_and_never_isolate(
        rows in 2usize..9,
        cols in 2usize..9,
        density in 0.1f64..0.5,
        seed in any::<u64>(),
    ) {
        let mut walls = connected_layout(rows, cols, density, seed);
        let placed = add_doors(&mut walls);
        prop_assert_eq!(placed, walls.doors().len());

        let closed = AdjacencyGraph::from_walls(&walls);
        for door in walls.doors() {
            prop_assert!(is_flanked(&walls, door), "{:?} is not flanked", door);
            let (a, b) = door.cells();
            prop_assert!(closed.degree(closed.index(a)) > 1);
            prop_assert!(closed.degree(closed.index(b)) > 1);
        }
        prop_assert_eq!(AdjacencyGraph::door_passable(&walls).component_count(), 1);
    }

    #[test]
    fn prop_open_all_doors_is_idempotent(
        rows in 2usize..8,
        cols in 2usize..8,
        seed in any::<u64>(),
    ) {
        let mut walls = connected_layout(rows, cols, 0.3, seed);
        add_doors(&mut walls);

        walls.open_all_doors();
        let once = walls.clone();
        walls.open_all_doors();
        prop_assert_eq!(&walls, &once);
        prop_assert_eq!(walls.closed_door_count(), 0);
    }

    #[test]
    fn prop_visibility_grows_with_range_and_is_symmetric(
        rows in 1usize..7,
        cols in 1usize..7,
        seed in any::<u64>(),
        steps in 0u32..5,
    ) {
        let walls = connected_layout(rows, cols, 0.3, seed);
        let graph = AdjacencyGraph::from_walls(&walls);
        let cells: Vec<CoarsePos> = (0..graph.node_count()).map(|n| graph.position(n)).collect();

        for &p in &cells {
            let near = compute_visible(&graph, p, steps);
            let far = compute_visible(&graph, p, steps + 1);
            prop_assert!(near.contains(&p));
            prop_assert!(near.is_subset(&far));

            for &q in &near {
                prop_assert!(compute_visible(&graph, q, steps).contains(&p));
            }
        }
    }

    #[test]
    fn prop_generated_sessions_respect_separations(seed in 0u64..10_000) {
        let config = GenerationConfig::for_testing(seed);
        let session = DungeonSession::new(config.clone()).unwrap();
        let graph = AdjacencyGraph::door_passable(session.walls());

        let mut specials: Vec<(CoarsePos, u32)> = session
            .encounters()
            .filter(|record| record.location != session.treasure_location())
            .map(|record| (record.location, config.min_encounter_separation))
            .collect();
        specials.extend(session.traps().map(|trap| (trap.location, config.min_trap_separation)));

        let anchors = [session.party_position(), session.treasure_location()];
        for (i, &(pos, separation)) in specials.iter().enumerate() {
            for &anchor in &anchors {
                let distance = graph.distance(pos, anchor).unwrap();
                prop_assert!(distance > separation, "{} is {} from {}", pos, distance, anchor);
            }
            for &(other, _) in &specials[..i] {
                let distance = graph.distance(pos, other).unwrap();
                prop_assert!(distance > separation, "{} is {} from {}", pos, distance, other);
            }
        }
    }
}

#[test]
fn test_single_cell_topology() -> DungeonResult<()> {
    let mut rng = StdRng::seed_from_u64(1);
    let draw = TopologyGenerator::new().generate_connected(1, 1, 0.5, &mut rng)?;

    assert_eq!(draw.walls.wall_count(), 0);
    assert!(draw.walls.slots().is_empty());
    let graph = AdjacencyGraph::from_walls(&draw.walls);
    assert_eq!(graph.to_matrix(), vec![vec![1]]);

    let placement = PlacementEngine::new(PlacementRules::default()).place_all(&graph, &mut rng);
    assert!(matches!(placement, Err(DungeonError::InvalidConfig(_))));
    Ok(())
}

#[test]
fn test_zero_density_connects_first_time() -> DungeonResult<()> {
    let mut rng = StdRng::seed_from_u64(5);
    let draw = TopologyGenerator::new().generate_connected(6, 6, 0.0, &mut rng)?;
    assert_eq!(draw.attempts, 1);
    assert!(!draw.carved);
    assert_eq!(draw.walls.wall_count(), 0);
    Ok(())
}

#[test]
fn test_full_density_hits_the_attempt_cap() {
    let mut rng = StdRng::seed_from_u64(5);
    let failing = TopologyGenerator {
        max_attempts: 25,
        fallback: TopologyFallback::Fail,
    };
    assert!(matches!(
        failing.generate_connected(3, 3, 1.0, &mut rng),
        Err(DungeonError::GenerationFailed(_))
    ));

    let carving = TopologyGenerator {
        max_attempts: 25,
        fallback: TopologyFallback::SpanningTree,
    };
    let draw = carving.generate_connected(3, 3, 1.0, &mut rng).unwrap();
    assert!(draw.carved);
    assert_eq!(draw.attempts, 25);
    assert_eq!(AdjacencyGraph::from_walls(&draw.walls).component_count(), 1);
    // A spanning tree over nine cells opens exactly eight slots.
    assert_eq!(draw.walls.slots().len() - draw.walls.wall_count(), 8);
}

#[test]
fn test_party_and_treasure_are_a_diameter_pair() -> DungeonResult<()> {
    let rules = PlacementRules {
        min_encounter_separation: 0,
        min_trap_separation: 0,
        trap_count: 0,
        max_attempts: 1_000,
        max_restarts: 10,
    };

    for seed in 0..20 {
        let walls = connected_layout(5, 5, 0.3, seed);
        let graph = AdjacencyGraph::door_passable(&walls);
        let mut rng = StdRng::seed_from_u64(seed);
        let placement = PlacementEngine::new(rules).place_all(&graph, &mut rng)?;

        let (_, _, diameter) = graph.shortest_path_matrix().diameter().unwrap();
        assert_eq!(graph.distance(placement.party, placement.treasure), Some(diameter));
    }
    Ok(())
}

#[test]
fn test_generator_trait_validates_its_output() -> DungeonResult<()> {
    let config = GenerationConfig::for_testing(21);
    let generator = TopologyGenerator::from_config(&config);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let walls = generator.generate(&config, &mut rng)?;

    generator.validate(&walls, &config)?;
    assert_eq!((walls.rows(), walls.cols()), (config.rows, config.cols));
    assert_eq!(generator.generator_type(), "TopologyGenerator");
    Ok(())
}
