//! # Navigation
//!
//! The turn-by-turn state machine. [`DungeonSession::handle_input`] consumes
//! one [`PlayerInput`] and returns every event it caused; the session is left
//! in the state that decides what the next input means.

use crate::game::{
    check_for_encounter, concealment_bonus, trap_spotted, CoarsePos, Difficulty, Direction,
    DungeonSession, EncounterCheck, EntityMarker, GameEvent, NavState, TrapRecord, TrapStage,
};
use crate::generation::{generate_chest, generate_hoard, trap_damage, WallRef, WallState};
use crate::input::PlayerInput;
use crate::utils::AdjacencyGraph;
use crate::DungeonResult;
use log::{debug, info};

impl DungeonSession {
    /// Advances the state machine by one input.
    ///
    /// Inputs the current state does not accept produce a single
    /// [`GameEvent::InvalidInput`] and leave the state unchanged. Any input
    /// after the run has ended is a [`DungeonError::GameOver`](crate::DungeonError::GameOver).
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Direction, DungeonSession, GenerationConfig, PlayerInput};
    ///
    /// let mut session = DungeonSession::new(GenerationConfig::for_testing(3)).unwrap();
    /// session.begin_turn().unwrap();
    /// let events = session.handle_input(PlayerInput::Move(Direction::Up)).unwrap();
    /// assert!(!events.is_empty());
    /// ```
    pub fn handle_input(&mut self, input: PlayerInput) -> DungeonResult<Vec<GameEvent>> {
        let events = match (self.state.clone(), input) {
            (NavState::Lost | NavState::Won, _) => return Err(self.game_over()),
            (NavState::AwaitingInput, PlayerInput::Move(direction)) => {
                self.transition(NavState::Moving { direction });
                match self.resolve_move(direction) {
                    Ok(events) => events,
                    Err(e) => {
                        self.transition(NavState::AwaitingInput);
                        return Err(e);
                    }
                }
            }
            (NavState::AwaitingInput, PlayerInput::Pause) => {
                self.party = self.party.with_paused(true);
                self.transition(NavState::Idle);
                vec![GameEvent::Paused]
            }
            (NavState::DoorPrompt { slot, direction }, input) => match input {
                PlayerInput::Yes => self.open_door(slot)?,
                PlayerInput::Move(again) if again == direction => self.open_door(slot)?,
                PlayerInput::No => {
                    self.transition(NavState::AwaitingInput);
                    vec![GameEvent::DoorLeftClosed]
                }
                other => vec![self.rejected(other)],
            },
            (NavState::EncounterPrompt { difficulty }, PlayerInput::Yes) => {
                self.win_encounter(difficulty)
            }
            (NavState::EncounterPrompt { .. }, PlayerInput::No) => {
                info!("Party defeated");
                self.party = self.party.defeated();
                self.transition(NavState::Lost);
                vec![GameEvent::EncounterLost]
            }
            (NavState::TrapPrompt { trap, stage }, input) => match (stage, input) {
                (TrapStage::Disarm, PlayerInput::Yes) => {
                    let mut events = vec![GameEvent::TrapDisarmed {
                        effect: trap.effect.clone(),
                    }];
                    events.extend(self.after_trap());
                    events
                }
                (TrapStage::Disarm, PlayerInput::No) => {
                    let events = vec![GameEvent::TrapDisarmFailed, trap_effect_event(&trap)];
                    self.transition(NavState::TrapPrompt {
                        trap,
                        stage: TrapStage::Damage,
                    });
                    events
                }
                (TrapStage::Damage, PlayerInput::Yes) => {
                    let level = self.config.party.average_level() as u32;
                    let amount = trap_damage(trap.severity, level, &mut self.rng);
                    let mut events = vec![GameEvent::DamageTaken { amount }];
                    events.extend(self.after_trap());
                    events
                }
                (TrapStage::Damage, PlayerInput::No) => {
                    let mut events = vec![GameEvent::TrapAvoided];
                    events.extend(self.after_trap());
                    events
                }
                (_, other) => vec![self.rejected(other)],
            },
            (NavState::Idle, _) => vec![GameEvent::InvalidInput {
                reason: "the game is paused".to_string(),
            }],
            (_, other) => vec![self.rejected(other)],
        };

        for event in &events {
            self.statistics.update_from_event(event);
        }
        Ok(events)
    }

    fn rejected(&self, input: PlayerInput) -> GameEvent {
        let expected = self.state.prompt().unwrap_or("nothing");
        GameEvent::InvalidInput {
            reason: format!("'{input}' is not an answer to: {expected}"),
        }
    }

    fn resolve_move(&mut self, direction: Direction) -> DungeonResult<Vec<GameEvent>> {
        let from = self.party_position();
        self.party = self.party.facing(direction);

        let target = from
            .step(direction, self.walls.rows(), self.walls.cols())
            .and_then(|to| Some((to, self.walls.slot_toward(from, direction)?)));
        let Some((to, slot)) = target else {
            self.transition(NavState::AwaitingInput);
            return Ok(vec![GameEvent::Blocked { direction }]);
        };

        match self.walls.get(slot) {
            WallState::Wall => {
                self.transition(NavState::AwaitingInput);
                return Ok(vec![GameEvent::Blocked { direction }]);
            }
            WallState::ClosedDoor => {
                self.transition(NavState::DoorPrompt { slot, direction });
                return Ok(vec![GameEvent::DoorAhead { direction }]);
            }
            WallState::Open | WallState::OpenDoor => {}
        }

        if let Some(EntityMarker::Encounter(difficulty)) = self.marker_at(to) {
            // Encounters are fought from where the party stands.
            return Ok(self.start_encounter(difficulty));
        }

        let (old, new) = (self.fine(from), self.fine(to));
        self.entities.remove(old);
        let arrived_on = self.entities.replace(new, EntityMarker::Party);
        self.party = self.party.moved_to(new, direction);
        let mut events = vec![GameEvent::PartyMoved { from, to }];

        match arrived_on {
            Some(EntityMarker::TreasureChest(difficulty)) => {
                let contents =
                    generate_chest(self.config.party.average_level(), difficulty, &mut self.rng)?;
                events.push(GameEvent::ChestOpened {
                    difficulty,
                    contents,
                });
            }
            Some(EntityMarker::TreasureHoard) => {
                return self.claim_treasure(events);
            }
            _ => {}
        }

        events.extend(self.check_for_traps());
        self.refresh_visibility();

        if let Some(trap) = self.traps.remove(&to) {
            let visible = matches!(arrived_on, Some(EntityMarker::Trap { visible: true }));
            debug!("Trap sprung at {to}, visible: {visible}");
            events.push(GameEvent::TrapTriggered {
                trigger: trap.trigger.clone(),
                severity: trap.severity,
                disarm_dc: visible.then(|| trap.severity.dc()),
            });
            let stage = if visible {
                TrapStage::Disarm
            } else {
                events.push(trap_effect_event(&trap));
                TrapStage::Damage
            };
            self.transition(NavState::TrapPrompt { trap, stage });
            return Ok(events);
        }

        events.extend(self.check_encounters());
        Ok(events)
    }

    fn claim_treasure(&mut self, mut events: Vec<GameEvent>) -> DungeonResult<Vec<GameEvent>> {
        let hoard = generate_hoard(self.config.party.average_level(), &mut self.rng)?;
        info!("Treasure claimed after {} step(s)", self.statistics.steps_taken + 1);
        self.hoard = Some(hoard.clone());
        self.refresh_visibility();
        self.transition(NavState::Won);
        events.push(GameEvent::Victory { hoard });
        Ok(events)
    }

    fn open_door(&mut self, slot: WallRef) -> DungeonResult<Vec<GameEvent>> {
        self.walls.set(slot, WallState::OpenDoor);
        self.graph = AdjacencyGraph::from_walls(&self.walls);
        debug!("Opened door {slot:?}");

        let mut events = vec![GameEvent::DoorOpened { slot }];
        events.extend(self.check_for_traps());
        self.refresh_visibility();
        events.extend(self.check_encounters());
        Ok(events)
    }

    /// Rolls concealment for every hidden trap in sight.
    pub(super) fn check_for_traps(&mut self) -> Vec<GameEvent> {
        let party = self.party_position();
        let distances = self.graph.distances_from(self.graph.index(party));
        let mut events = Vec::new();

        let hidden: Vec<(CoarsePos, String)> = self
            .traps
            .values()
            .filter(|trap| {
                matches!(
                    self.marker_at(trap.location),
                    Some(EntityMarker::Trap { visible: false })
                )
            })
            .map(|trap| (trap.location, trap.trigger.clone()))
            .collect();

        for (location, trigger) in hidden {
            let Some(bonus) = concealment_bonus(
                distances[self.graph.index(location)],
                self.config.visibility_distance,
                &self.config.trap_concealment,
            ) else {
                continue;
            };
            if trap_spotted(bonus, self.config.passive_perception, &mut self.rng) {
                let cell = self.fine(location);
                self.entities.replace(cell, EntityMarker::Trap { visible: true });
                events.push(GameEvent::TrapSpotted { location, trigger });
            }
        }
        events
    }

    /// Encounter proximity after the party has settled for the turn.
    fn check_encounters(&mut self) -> Vec<GameEvent> {
        let check = check_for_encounter(
            &self.graph,
            self.party_position(),
            self.encounters.values(),
            self.config.encounter_trigger_distance,
        );
        match check {
            EncounterCheck::Fight(difficulty) => self.start_encounter(difficulty),
            EncounterCheck::Sighted(difficulty) => {
                self.transition(NavState::AwaitingInput);
                vec![GameEvent::EncounterSighted {
                    difficulty,
                    monsters: self.monsters(difficulty),
                }]
            }
            EncounterCheck::None => {
                self.transition(NavState::AwaitingInput);
                Vec::new()
            }
        }
    }

    fn start_encounter(&mut self, difficulty: Difficulty) -> Vec<GameEvent> {
        self.transition(NavState::EncounterPrompt { difficulty });
        vec![GameEvent::EncounterStarted {
            difficulty,
            monsters: self.monsters(difficulty),
        }]
    }

    fn monsters(&self, difficulty: Difficulty) -> String {
        self.encounters
            .get(&difficulty)
            .map(|record| record.describe())
            .unwrap_or_default()
    }

    fn win_encounter(&mut self, difficulty: Difficulty) -> Vec<GameEvent> {
        if let Some(record) = self.encounters.remove(&difficulty) {
            let reward = match difficulty {
                Difficulty::Deadly => EntityMarker::TreasureHoard,
                other => EntityMarker::TreasureChest(other),
            };
            let cell = self.fine(record.location);
            self.entities.replace(cell, reward);
            info!("{difficulty} encounter at {} defeated", record.location);
        }
        self.transition(NavState::AwaitingInput);
        vec![GameEvent::EncounterWon { difficulty }]
    }

    fn after_trap(&mut self) -> Vec<GameEvent> {
        self.check_encounters()
    }
}

fn trap_effect_event(trap: &TrapRecord) -> GameEvent {
    GameEvent::TrapEffect {
        effect: trap.effect.clone(),
        save_dc: trap.severity.dc(),
        attack_bonus: trap.severity.attack_bonus(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::corridor_session;
    use crate::DungeonError;

    fn started(trap_at: Option<(usize, usize)>) -> DungeonSession {
        let mut session = corridor_session(trap_at);
        session.begin_turn().unwrap();
        session
    }

    fn east(session: &mut DungeonSession) -> Vec<GameEvent> {
        session.handle_input(PlayerInput::Move(Direction::Right)).unwrap()
    }

    #[test]
    fn test_move_updates_position_and_entities() {
        let mut session = started(None);
        let events = east(&mut session);

        assert_eq!(
            events[0],
            GameEvent::PartyMoved {
                from: CoarsePos::new(1, 0),
                to: CoarsePos::new(1, 1)
            }
        );
        assert_eq!(session.party_position(), CoarsePos::new(1, 1));
        assert_eq!(session.marker_at(CoarsePos::new(1, 0)), None);
        assert_eq!(
            session.marker_at(CoarsePos::new(1, 1)),
            Some(EntityMarker::Party)
        );
        assert_eq!(session.state(), &NavState::AwaitingInput);
        assert_eq!(session.statistics().steps_taken, 1);
    }

    #[test]
    fn test_grid_edge_only_turns_the_party() {
        let mut session = started(None);
        let events = session.handle_input(PlayerInput::Move(Direction::Left)).unwrap();
        assert_eq!(
            events,
            vec![GameEvent::Blocked {
                direction: Direction::Left
            }]
        );
        assert_eq!(session.party().facing, Direction::Left);
        assert_eq!(session.party_position(), CoarsePos::new(1, 0));
    }

    #[test]
    fn test_walls_block_movement() {
        let mut session = started(None);
        session.walls.set(WallRef::Vertical { row: 1, col: 0 }, WallState::Wall);
        session.graph = AdjacencyGraph::from_walls(&session.walls);

        let events = east(&mut session);
        assert!(matches!(events[0], GameEvent::Blocked { .. }));
        assert_eq!(session.party_position(), CoarsePos::new(1, 0));
    }

    #[test]
    fn test_door_prompt_and_confirmation() {
        let mut session = started(None);
        let slot = WallRef::Vertical { row: 1, col: 0 };
        session.walls.set(slot, WallState::ClosedDoor);
        session.graph = AdjacencyGraph::from_walls(&session.walls);

        east(&mut session);
        assert_eq!(
            session.state(),
            &NavState::DoorPrompt {
                slot,
                direction: Direction::Right
            }
        );

        let events = session.handle_input(PlayerInput::Move(Direction::Left)).unwrap();
        assert!(matches!(events[0], GameEvent::InvalidInput { .. }));

        // Pressing the same direction again confirms.
        let events = east(&mut session);
        assert_eq!(events[0], GameEvent::DoorOpened { slot });
        assert_eq!(session.walls().get(slot), WallState::OpenDoor);
        assert_eq!(session.party_position(), CoarsePos::new(1, 0));
        assert!(session.graph().is_adjacent(7, 8));

        east(&mut session);
        assert_eq!(session.party_position(), CoarsePos::new(1, 1));
    }

    #[test]
    fn test_declining_a_door_keeps_it_closed() {
        let mut session = started(None);
        let slot = WallRef::Vertical { row: 1, col: 0 };
        session.walls.set(slot, WallState::ClosedDoor);
        session.graph = AdjacencyGraph::from_walls(&session.walls);

        east(&mut session);
        let events = session.handle_input(PlayerInput::No).unwrap();
        assert_eq!(events, vec![GameEvent::DoorLeftClosed]);
        assert_eq!(session.walls().get(slot), WallState::ClosedDoor);
        assert_eq!(session.state(), &NavState::AwaitingInput);
    }

    #[test]
    fn test_hidden_trap_goes_straight_to_damage() {
        let mut session = started(Some((1, 1)));
        // Standing on the trap is the only way to find it here.
        session.config.passive_perception = -100;

        let events = east(&mut session);
        assert!(events
            .iter()
            .any(|event| matches!(event, GameEvent::TrapTriggered { disarm_dc: None, .. })));
        assert!(events
            .iter()
            .any(|event| matches!(event, GameEvent::TrapEffect { save_dc: 12, .. })));
        assert!(matches!(
            session.state(),
            NavState::TrapPrompt {
                stage: TrapStage::Damage,
                ..
            }
        ));
        assert_eq!(session.traps().count(), 0);

        let events = session.handle_input(PlayerInput::Yes).unwrap();
        let GameEvent::DamageTaken { amount } = events[0] else {
            panic!("expected damage, got {:?}", events[0]);
        };
        assert!((2..=18).contains(&amount));
        assert_eq!(session.state(), &NavState::AwaitingInput);
        assert_eq!(session.statistics().damage_taken, u64::from(amount));
    }

    #[test]
    fn test_visible_trap_offers_disarm() {
        let mut session = started(Some((1, 1)));
        let cell = session.fine(CoarsePos::new(1, 1));
        session.entities.replace(cell, EntityMarker::Trap { visible: true });

        let events = east(&mut session);
        assert!(events.iter().any(|event| matches!(
            event,
            GameEvent::TrapTriggered {
                disarm_dc: Some(12),
                ..
            }
        )));

        let events = session.handle_input(PlayerInput::No).unwrap();
        assert_eq!(events[0], GameEvent::TrapDisarmFailed);
        let events = session.handle_input(PlayerInput::No).unwrap();
        assert_eq!(events[0], GameEvent::TrapAvoided);
        assert_eq!(session.state(), &NavState::AwaitingInput);
    }

    #[test]
    fn test_trap_spotted_from_a_distance() {
        let mut session = started(Some((1, 3)));
        session.config.passive_perception = 100;

        let events = east(&mut session);
        assert!(events
            .iter()
            .any(|event| matches!(event, GameEvent::TrapSpotted { .. })));
        assert_eq!(
            session.marker_at(CoarsePos::new(1, 3)),
            Some(EntityMarker::Trap { visible: true })
        );
    }

    #[test]
    fn test_fight_win_then_claim_treasure() {
        let mut session = started(None);
        for _ in 0..3 {
            east(&mut session);
        }
        // (1, 4) is two hops from the Deadly encounter at (1, 6).
        let events = east(&mut session);
        assert!(events.iter().any(|event| matches!(
            event,
            GameEvent::EncounterStarted {
                difficulty: Difficulty::Deadly,
                ..
            }
        )));

        let events = session.handle_input(PlayerInput::Yes).unwrap();
        assert_eq!(
            events,
            vec![GameEvent::EncounterWon {
                difficulty: Difficulty::Deadly
            }]
        );
        assert_eq!(
            session.marker_at(CoarsePos::new(1, 6)),
            Some(EntityMarker::TreasureHoard)
        );

        east(&mut session);
        let events = east(&mut session);
        assert!(matches!(events.last(), Some(GameEvent::Victory { .. })));
        assert_eq!(session.state(), &NavState::Won);
        assert!(session.hoard().is_some());
        assert!(matches!(
            session.handle_input(PlayerInput::Yes),
            Err(DungeonError::GameOver(_))
        ));
    }

    #[test]
    fn test_losing_a_fight_ends_the_run() {
        let mut session = started(None);
        for _ in 0..4 {
            east(&mut session);
        }
        session.handle_input(PlayerInput::No).unwrap();
        assert_eq!(session.state(), &NavState::Lost);
        assert!(session.party().lost);
        assert!(matches!(
            session.handle_input(PlayerInput::Move(Direction::Up)),
            Err(DungeonError::GameOver(_))
        ));
    }

    #[test]
    fn test_pause_and_resume() {
        let mut session = started(None);
        let events = session.handle_input(PlayerInput::Pause).unwrap();
        assert_eq!(events, vec![GameEvent::Paused]);
        assert!(session.party().paused);
        assert_eq!(session.state(), &NavState::Idle);

        let events = east(&mut session);
        assert!(matches!(events[0], GameEvent::InvalidInput { .. }));

        session.begin_turn().unwrap();
        assert!(!session.party().paused);
        east(&mut session);
        assert_eq!(session.party_position(), CoarsePos::new(1, 1));
    }

    #[test]
    fn test_answers_are_rejected_while_awaiting_a_direction() {
        let mut session = started(None);
        let events = session.handle_input(PlayerInput::Yes).unwrap();
        assert!(matches!(events[0], GameEvent::InvalidInput { .. }));
        assert_eq!(session.state(), &NavState::AwaitingInput);
    }

    #[test]
    fn test_failed_move_returns_to_awaiting_input() {
        let mut session = started(None);
        let cell = session.fine(CoarsePos::new(1, 1));
        // Trivial tiers have no chest table.
        session
            .entities
            .place(cell, EntityMarker::TreasureChest(Difficulty::Trivial))
            .unwrap();

        let result = session.handle_input(PlayerInput::Move(Direction::Right));
        assert!(matches!(result, Err(DungeonError::InvalidArgument(_))));
        assert_eq!(session.state(), &NavState::AwaitingInput);

        let events = session.handle_input(PlayerInput::Move(Direction::Down)).unwrap();
        assert!(!matches!(events[0], GameEvent::InvalidInput { .. }));
    }

    #[test]
    fn test_chest_is_opened_on_entry() {
        let mut session = started(None);
        let cell = session.fine(CoarsePos::new(1, 1));
        session
            .entities
            .place(cell, EntityMarker::TreasureChest(Difficulty::Easy))
            .unwrap();

        let events = east(&mut session);
        assert!(events
            .iter()
            .any(|event| matches!(event, GameEvent::ChestOpened { .. })));
        assert_eq!(session.statistics().chests_opened, 1);
        assert_eq!(
            session.marker_at(CoarsePos::new(1, 1)),
            Some(EntityMarker::Party)
        );
    }
}
