//! # Dungeon Session
//!
//! The single owner of everything a run needs: the wall layout and its
//! adjacency graph, the entity layer, the party, the trap and encounter
//! records, the navigation state and the seeded random source.
//!
//! Renderers and input sources never touch the session directly; they read
//! snapshots and feed [`PlayerInput`](crate::input::PlayerInput) values to
//! [`DungeonSession::handle_input`].

use crate::game::{
    compute_visible, CoarsePos, Difficulty, Direction, EncounterRecord, EntityLayer, EntityMarker,
    FinePos, PartyState, TrapRecord,
};
use crate::generation::{
    create_rng, ChestContents, EncounterGenerator, GenerationConfig, Generator, MonsterTable,
    Placement, PlacementEngine, StatsDataset, TopologyGenerator, TrapSeverity, TreasureHoard,
    WallRef, WallSet,
};
use crate::utils::AdjacencyGraph;
use crate::{DungeonError, DungeonResult};
use log::{debug, info};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Where the navigation state machine currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavState {
    /// Paused or not yet started; [`DungeonSession::begin_turn`] resumes
    Idle,
    AwaitingInput,
    /// Transient while a move resolves
    Moving { direction: Direction },
    /// A closed door blocks the move
    DoorPrompt { slot: WallRef, direction: Direction },
    /// Waiting to hear whether the party won the fight
    EncounterPrompt { difficulty: Difficulty },
    /// The party stepped on a trap
    TrapPrompt { trap: TrapRecord, stage: TrapStage },
    Lost,
    Won,
}

/// Which question a trap prompt is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrapStage {
    /// Visible traps can be disarmed first
    Disarm,
    Damage,
}

impl NavState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, NavState::Lost | NavState::Won)
    }

    /// The question the player is being asked, if any.
    pub fn prompt(&self) -> Option<&'static str> {
        match self {
            NavState::AwaitingInput => Some("Input your direction (wasd) or 'p' for pause"),
            NavState::DoorPrompt { .. } => Some("Would you like to open the door? (y/n)"),
            NavState::EncounterPrompt { .. } => Some("Did you win? (y/n)"),
            NavState::TrapPrompt {
                stage: TrapStage::Disarm,
                ..
            } => Some("Did you disarm the trap? (y/n)"),
            NavState::TrapPrompt {
                stage: TrapStage::Damage,
                ..
            } => Some("Did you take damage? (y/n)"),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NavState::Idle => "Idle",
            NavState::AwaitingInput => "AwaitingInput",
            NavState::Moving { .. } => "Moving",
            NavState::DoorPrompt { .. } => "DoorPrompt",
            NavState::EncounterPrompt { .. } => "EncounterPrompt",
            NavState::TrapPrompt { .. } => "TrapPrompt",
            NavState::Lost => "Lost",
            NavState::Won => "Won",
        }
    }
}

impl fmt::Display for NavState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Something that happened while handling an input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    TurnStarted,
    Paused,
    PartyMoved {
        from: CoarsePos,
        to: CoarsePos,
    },
    /// Grid edge or wall
    Blocked {
        direction: Direction,
    },
    DoorAhead {
        direction: Direction,
    },
    DoorOpened {
        slot: WallRef,
    },
    DoorLeftClosed,
    ChestOpened {
        difficulty: Difficulty,
        contents: ChestContents,
    },
    TrapSpotted {
        location: CoarsePos,
        trigger: String,
    },
    TrapTriggered {
        trigger: String,
        severity: TrapSeverity,
        /// Shown when the trap was visible and can be disarmed
        disarm_dc: Option<u32>,
    },
    TrapDisarmed {
        effect: String,
    },
    TrapDisarmFailed,
    TrapEffect {
        effect: String,
        save_dc: u32,
        attack_bonus: i32,
    },
    TrapAvoided,
    DamageTaken {
        amount: u32,
    },
    EncounterSighted {
        difficulty: Difficulty,
        monsters: String,
    },
    EncounterStarted {
        difficulty: Difficulty,
        monsters: String,
    },
    EncounterWon {
        difficulty: Difficulty,
    },
    EncounterLost,
    Victory {
        hoard: TreasureHoard,
    },
    InvalidInput {
        reason: String,
    },
}

impl GameEvent {
    /// Player-facing text for the event.
    pub fn message(&self) -> String {
        match self {
            GameEvent::TurnStarted => "Your turn.".to_string(),
            GameEvent::Paused => "Game paused.".to_string(),
            GameEvent::PartyMoved { to, .. } => format!("The party moves to {to}."),
            GameEvent::Blocked { direction } => format!("You cannot go {direction}."),
            GameEvent::DoorAhead { direction } => format!("A closed door blocks the way {direction}."),
            GameEvent::DoorOpened { .. } => "The door creaks open.".to_string(),
            GameEvent::DoorLeftClosed => "You leave the door closed.".to_string(),
            GameEvent::ChestOpened { contents, .. } => format!("Treasure chest: {contents}"),
            GameEvent::TrapSpotted { trigger, .. } => format!("You spot a trap. Trigger: {trigger}"),
            GameEvent::TrapTriggered {
                trigger, disarm_dc, ..
            } => match disarm_dc {
                Some(dc) => format!("Trap trigger: {trigger}\nTrap disarm DC: {dc}"),
                None => format!("Trap trigger: {trigger}"),
            },
            GameEvent::TrapDisarmed { effect } => {
                format!("Successfully disarmed trap :)\nTrap effect: {effect}")
            }
            GameEvent::TrapDisarmFailed => "Failed to disarm the trap :(".to_string(),
            GameEvent::TrapEffect {
                effect,
                save_dc,
                attack_bonus,
            } => format!(
                "Trap effect: {effect}\nTrap save DC: {save_dc}\nTrap attack bonus: {attack_bonus:+}"
            ),
            GameEvent::TrapAvoided => "You successfully avoided the trap.".to_string(),
            GameEvent::DamageTaken { amount } => format!("Damage taken: {amount}"),
            GameEvent::EncounterSighted {
                difficulty,
                monsters,
            } => format!("{difficulty} encounter in sight: {monsters}"),
            GameEvent::EncounterStarted {
                difficulty,
                monsters,
            } => format!("{difficulty} encounter! {monsters}"),
            GameEvent::EncounterWon { .. } => "Good work!".to_string(),
            GameEvent::EncounterLost => "You Lose :(".to_string(),
            GameEvent::Victory { hoard } => {
                format!("Treasure hoard:\n{hoard}You Win! :)\nTHE END.")
            }
            GameEvent::InvalidInput { reason } => format!("Invalid input: {reason}"),
        }
    }
}

/// Running totals for the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatistics {
    pub steps_taken: u32,
    pub doors_opened: u32,
    pub traps_spotted: u32,
    pub traps_sprung: u32,
    pub traps_disarmed: u32,
    pub damage_taken: u64,
    pub chests_opened: u32,
    pub encounters_won: u32,
}

impl SessionStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics based on a game event.
    pub fn update_from_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PartyMoved { .. } => self.steps_taken += 1,
            GameEvent::DoorOpened { .. } => self.doors_opened += 1,
            GameEvent::TrapSpotted { .. } => self.traps_spotted += 1,
            GameEvent::TrapTriggered { .. } => self.traps_sprung += 1,
            GameEvent::TrapDisarmed { .. } => self.traps_disarmed += 1,
            GameEvent::DamageTaken { amount } => self.damage_taken += u64::from(*amount),
            GameEvent::ChestOpened { .. } => self.chests_opened += 1,
            GameEvent::EncounterWon { .. } => self.encounters_won += 1,
            _ => {}
        }
    }
}

/// One dungeon run.
#[derive(Debug, Clone)]
pub struct DungeonSession {
    pub(super) config: GenerationConfig,
    pub(super) walls: WallSet,
    pub(super) graph: AdjacencyGraph,
    pub(super) entities: EntityLayer,
    pub(super) party: PartyState,
    pub(super) treasure: CoarsePos,
    pub(super) traps: BTreeMap<CoarsePos, TrapRecord>,
    pub(super) encounters: BTreeMap<Difficulty, EncounterRecord>,
    pub(super) state: NavState,
    pub(super) statistics: SessionStatistics,
    pub(super) visible: BTreeSet<CoarsePos>,
    pub(super) hoard: Option<TreasureHoard>,
    pub(super) rng: StdRng,
}

impl DungeonSession {
    /// Generates a dungeon using the built-in monster table.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{DungeonSession, GenerationConfig, NavState};
    ///
    /// let session = DungeonSession::new(GenerationConfig::for_testing(7)).unwrap();
    /// assert_eq!(session.state(), &NavState::Idle);
    /// assert!(session.visible_cells().contains(&session.party_position()));
    /// ```
    pub fn new(config: GenerationConfig) -> DungeonResult<Self> {
        Self::with_dataset(config, &MonsterTable::builtin())
    }

    /// Generates a dungeon whose encounters are drawn from `dataset`.
    pub fn with_dataset(config: GenerationConfig, dataset: &dyn StatsDataset) -> DungeonResult<Self> {
        config.validate()?;
        let mut rng = create_rng(&config);

        let topology = TopologyGenerator::from_config(&config);
        let walls = topology.generate(&config, &mut rng)?;
        topology.validate(&walls, &config)?;

        let placement = PlacementEngine::new(config.placement_rules())
            .place_all(&AdjacencyGraph::door_passable(&walls), &mut rng)?;
        if placement.restarts > 0 {
            info!("Placement succeeded after {} restart(s)", placement.restarts);
        }

        let generator = EncounterGenerator::new(config.party.clone());
        let mut compositions = BTreeMap::new();
        for &(difficulty, _) in &placement.encounters {
            compositions.insert(difficulty, generator.generate(dataset, difficulty, &mut rng)?);
        }

        Self::assemble(config, walls, placement, compositions, rng)
    }

    /// Builds a session from already generated parts.
    ///
    /// Every encounter in `placement` must have a composition.
    pub fn assemble(
        config: GenerationConfig,
        walls: WallSet,
        placement: Placement,
        mut compositions: BTreeMap<Difficulty, BTreeMap<String, u32>>,
        rng: StdRng,
    ) -> DungeonResult<Self> {
        let density = config.fine_density;
        let mut entities = EntityLayer::new();
        entities.place(placement.party.to_fine(density), EntityMarker::Party)?;

        let mut encounters = BTreeMap::new();
        for (difficulty, location) in placement.encounters {
            let composition = compositions.remove(&difficulty).ok_or_else(|| {
                DungeonError::Invariant(format!("no monsters generated for the {difficulty} encounter"))
            })?;
            entities.place(location.to_fine(density), EntityMarker::Encounter(difficulty))?;
            encounters.insert(
                difficulty,
                EncounterRecord {
                    difficulty,
                    location,
                    composition,
                },
            );
        }

        let mut traps = BTreeMap::new();
        for trap in placement.traps {
            entities.place(
                trap.location.to_fine(density),
                EntityMarker::Trap {
                    visible: config.visible_traps,
                },
            )?;
            traps.insert(trap.location, trap);
        }

        let graph = AdjacencyGraph::from_walls(&walls);
        let visible = compute_visible(&graph, placement.party, config.visibility_distance);
        debug!(
            "Session ready: {} encounter(s), {} trap(s), {} closed door(s)",
            encounters.len(),
            traps.len(),
            walls.closed_door_count()
        );

        Ok(Self {
            party: PartyState::new(placement.party.to_fine(density)),
            treasure: placement.treasure,
            config,
            walls,
            graph,
            entities,
            traps,
            encounters,
            state: NavState::Idle,
            statistics: SessionStatistics::new(),
            visible,
            hoard: None,
            rng,
        })
    }

    /// Idle → AwaitingInput. Clears the paused flag.
    pub fn begin_turn(&mut self) -> DungeonResult<Vec<GameEvent>> {
        match self.state {
            NavState::Idle => {
                self.party = self.party.with_paused(false);
                self.transition(NavState::AwaitingInput);
                Ok(vec![GameEvent::TurnStarted])
            }
            NavState::Lost | NavState::Won => Err(self.game_over()),
            ref other => Err(DungeonError::InvalidInput(format!(
                "cannot begin a turn while in {other}"
            ))),
        }
    }

    pub(super) fn transition(&mut self, next: NavState) {
        if self.state != next {
            debug!("{} -> {}", self.state, next);
        }
        self.state = next;
    }

    pub(super) fn game_over(&self) -> DungeonError {
        let outcome = if self.party.lost {
            "the party was defeated"
        } else {
            "the treasure has been claimed"
        };
        DungeonError::GameOver(outcome.to_string())
    }

    pub(super) fn refresh_visibility(&mut self) {
        self.visible = compute_visible(
            &self.graph,
            self.party_position(),
            self.config.visibility_distance,
        );
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn walls(&self) -> &WallSet {
        &self.walls
    }

    pub fn graph(&self) -> &AdjacencyGraph {
        &self.graph
    }

    pub fn entities(&self) -> &EntityLayer {
        &self.entities
    }

    pub fn party(&self) -> PartyState {
        self.party
    }

    /// The coarse cell the party stands in.
    pub fn party_position(&self) -> CoarsePos {
        self.party.position.to_coarse(self.config.fine_density)
    }

    pub fn treasure_location(&self) -> CoarsePos {
        self.treasure
    }

    pub fn traps(&self) -> impl Iterator<Item = &TrapRecord> + '_ {
        self.traps.values()
    }

    pub fn encounters(&self) -> impl Iterator<Item = &EncounterRecord> + '_ {
        self.encounters.values()
    }

    pub fn encounter(&self, difficulty: Difficulty) -> Option<&EncounterRecord> {
        self.encounters.get(&difficulty)
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    pub fn statistics(&self) -> &SessionStatistics {
        &self.statistics
    }

    /// Coarse cells currently in sight of the party.
    pub fn visible_cells(&self) -> &BTreeSet<CoarsePos> {
        &self.visible
    }

    /// The hoard rolled when the party claimed the treasure.
    pub fn hoard(&self) -> Option<&TreasureHoard> {
        self.hoard.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Marker at the centre of a coarse cell.
    pub fn marker_at(&self, pos: CoarsePos) -> Option<EntityMarker> {
        self.entities.get(self.fine(pos))
    }

    pub(super) fn fine(&self, pos: CoarsePos) -> FinePos {
        pos.to_fine(self.config.fine_density)
    }
}

/// A 3x7 open corridor block with the party at the west end.
#[cfg(test)]
pub(super) fn corridor_session(trap_at: Option<(usize, usize)>) -> DungeonSession {
    let config = GenerationConfig {
        rows: 3,
        cols: 7,
        ..GenerationConfig::for_testing(1)
    };
    let placement = Placement {
        party: CoarsePos::new(1, 0),
        treasure: CoarsePos::new(1, 6),
        encounters: vec![(Difficulty::Deadly, CoarsePos::new(1, 6))],
        traps: trap_at
            .map(|(row, col)| TrapRecord {
                location: CoarsePos::new(row, col),
                trigger: "Stepped on".to_string(),
                severity: TrapSeverity::Dangerous,
                effect: "Falling net".to_string(),
            })
            .into_iter()
            .collect(),
        restarts: 0,
    };
    let compositions = BTreeMap::from([(
        Difficulty::Deadly,
        BTreeMap::from([("Ogre".to_string(), 2)]),
    )]);
    DungeonSession::assemble(
        config,
        WallSet::open(3, 7),
        placement,
        compositions,
        rand::SeedableRng::seed_from_u64(3),
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_generated_session_is_consistent() {
        let session = DungeonSession::new(GenerationConfig::for_testing(11)).unwrap();

        assert_eq!(session.graph().component_count(), 1);
        assert_eq!(session.encounters().count(), 4);
        assert_eq!(session.traps().count(), 3);
        assert_eq!(
            session.marker_at(session.party_position()),
            Some(EntityMarker::Party)
        );
        assert_eq!(
            session.marker_at(session.treasure_location()),
            Some(EntityMarker::Encounter(Difficulty::Deadly))
        );
        for trap in session.traps() {
            assert_eq!(
                session.marker_at(trap.location),
                Some(EntityMarker::Trap { visible: false })
            );
        }
    }

    #[test]
    fn test_generation_is_reproducible() {
        let a = DungeonSession::new(GenerationConfig::for_testing(5)).unwrap();
        let b = DungeonSession::new(GenerationConfig::for_testing(5)).unwrap();
        assert_eq!(a.walls(), b.walls());
        assert_eq!(a.party_position(), b.party_position());
        assert_eq!(a.traps().collect::<Vec<_>>(), b.traps().collect::<Vec<_>>());
    }

    #[test]
    fn test_visible_traps_option() {
        let config = GenerationConfig {
            visible_traps: true,
            ..GenerationConfig::for_testing(9)
        };
        let session = DungeonSession::new(config).unwrap();
        for trap in session.traps() {
            assert_eq!(
                session.marker_at(trap.location),
                Some(EntityMarker::Trap { visible: true })
            );
        }
    }

    #[test]
    fn test_begin_turn_only_from_idle() {
        let mut session = corridor_session(None);
        assert_eq!(session.begin_turn().unwrap(), vec![GameEvent::TurnStarted]);
        assert_eq!(session.state(), &NavState::AwaitingInput);
        assert!(matches!(
            session.begin_turn(),
            Err(DungeonError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_assemble_rejects_missing_compositions() {
        let config = GenerationConfig::for_testing(1);
        let placement = Placement {
            party: CoarsePos::new(0, 0),
            treasure: CoarsePos::new(2, 2),
            encounters: vec![(Difficulty::Deadly, CoarsePos::new(2, 2))],
            traps: Vec::new(),
            restarts: 0,
        };
        let result = DungeonSession::assemble(
            config,
            WallSet::open(3, 3),
            placement,
            BTreeMap::new(),
            StdRng::seed_from_u64(1),
        );
        assert!(matches!(result, Err(DungeonError::Invariant(_))));
    }

    #[test]
    fn test_statistics_follow_events() {
        let mut statistics = SessionStatistics::new();
        statistics.update_from_event(&GameEvent::PartyMoved {
            from: CoarsePos::new(0, 0),
            to: CoarsePos::new(0, 1),
        });
        statistics.update_from_event(&GameEvent::DamageTaken { amount: 7 });
        statistics.update_from_event(&GameEvent::TurnStarted);
        assert_eq!(statistics.steps_taken, 1);
        assert_eq!(statistics.damage_taken, 7);
    }

    #[test]
    fn test_prompts_by_state() {
        assert!(NavState::Idle.prompt().is_none());
        assert_eq!(
            NavState::EncounterPrompt {
                difficulty: Difficulty::Easy
            }
            .prompt(),
            Some("Did you win? (y/n)")
        );
        assert!(NavState::Won.is_terminal());
    }
}
