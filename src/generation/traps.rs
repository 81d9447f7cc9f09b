//! # Traps
//!
//! Trap generation and the numbers needed to resolve one: severity, disarm
//! and save DC, attack bonus and damage scaled by party level.

use crate::utils::{roll, Dice};
use crate::{DungeonError, DungeonResult};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How much harm a trap does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TrapSeverity {
    Setback,
    Dangerous,
    Deadly,
}

impl TrapSeverity {
    /// Severity for a 1d6 roll: 1-2 setback, 3-5 dangerous, 6 deadly.
    pub fn from_roll(roll: u32) -> Self {
        match roll {
            0..=2 => TrapSeverity::Setback,
            3..=5 => TrapSeverity::Dangerous,
            _ => TrapSeverity::Deadly,
        }
    }

    /// Save and disarm DC.
    pub fn dc(self) -> u32 {
        match self {
            TrapSeverity::Setback => 10,
            TrapSeverity::Dangerous => 12,
            TrapSeverity::Deadly => 16,
        }
    }

    pub fn attack_bonus(self) -> i32 {
        match self {
            TrapSeverity::Setback => 3,
            TrapSeverity::Dangerous => 6,
            TrapSeverity::Deadly => 9,
        }
    }

    /// Damage dice for a party of the given average level.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::generation::TrapSeverity;
    ///
    /// assert_eq!(TrapSeverity::Setback.damage_dice(3).to_string(), "1d9");
    /// assert_eq!(TrapSeverity::Deadly.damage_dice(20).to_string(), "24d10");
    /// ```
    pub fn damage_dice(self, level: u32) -> Dice {
        let level = level as i64;
        let (counts, sides) = match level {
            l if l <= 4 => ([1, 2, 4], 10 - 4 + l),
            l if l <= 10 => ([2, 4, 10], 10 - 10 + l),
            l if l <= 16 => ([4, 10, 18], 10 - 16 + l),
            _ => ([10, 18, 24], 10),
        };
        let count = match self {
            TrapSeverity::Setback => counts[0],
            TrapSeverity::Dangerous => counts[1],
            TrapSeverity::Deadly => counts[2],
        };
        Dice::new(count, sides.max(1) as u32)
    }

    pub fn name(self) -> &'static str {
        match self {
            TrapSeverity::Setback => "Setback",
            TrapSeverity::Dangerous => "Dangerous",
            TrapSeverity::Deadly => "Deadly",
        }
    }
}

impl fmt::Display for TrapSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TrapSeverity {
    type Err = DungeonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "setback" => Ok(TrapSeverity::Setback),
            "dangerous" => Ok(TrapSeverity::Dangerous),
            "deadly" => Ok(TrapSeverity::Deadly),
            other => Err(DungeonError::InvalidArgument(format!(
                "unknown trap severity '{other}'"
            ))),
        }
    }
}

/// A freshly rolled trap, not yet placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrapDetails {
    pub trigger: String,
    pub severity: TrapSeverity,
    pub effect: String,
}

const PRESSURE_PLATE: &str = "Pressure plate (Sleight of Hand; Thieves' tools, Tinker's tools)";
const TRIPWIRE: &str = "Tripwire (Sleight of Hand; Thieves' tools, Tinker's tools)";
const TRAP_DOOR: &str = "Trap door (Sleight of Hand; Thieves' tools, Tinker's tools)";
const COLLAPSING_STEP: &str =
    "Collapsing step (Dexterity; Tinker's tools, Carpenter's tools, Mason's tools)";
const COLLAPSING_FLOORBOARD: &str =
    "Collapsing floor board (Dexterity; Tinker's tools, Carpenter's tools, Mason's tools)";
const CHEST: &str = "Chest (Sleight of Hand; Thieves' tools, Tinker's tools)";
const GLYPH_MOTION: &str = "Glyph, arcane motion sensor (Arcana; Arcane Focus)";
const GLYPH_PROXIMITY: &str = "Glyph, arcane proximity sensor (Arcana; Arcane Focus)";
const GLYPH_TOUCH: &str = "Glyph, arcane touch sensor (Arcana; Arcane Focus)";
const GLYPH_GAZE: &str = "Glyph, arcane gaze sensor (Arcana; Arcane Focus)";
const STATUE_MOTION: &str = "Statue, arcane motion sensor (Arcana; Arcane Focus)";
const STATUE_PROXIMITY: &str = "Statue, arcane proximity sensor (Arcana; Arcane Focus)";
const DRAGON_STATUE: &str = "Dragon statue, arcane proximity sensor (Arcana; Arcane Focus)";
const SWORD_TOUCH: &str = "Sword, arcane touch sensor (Arcana; Arcane Focus)";
const BOOK_TOUCH: &str = "Book, arcane touch sensor (Arcana; Arcane Focus)";
const SKULL_TOUCH: &str = "Skull, arcane touch sensor (Arcana; Arcane Focus)";
const RUG_TOUCH: &str = "Rug, arcane touch sensor (Arcana; Arcane Focus)";
const ARMOR_TOUCH: &str = "Suit of armor, arcane touch sensor (Arcana; Arcane Focus)";
const FLOOR_TILES_TOUCH: &str = "Floor tiles, arcane touch sensor (Arcana; Arcane Focus)";
const FLOOR_BOARDS_TOUCH: &str = "Floor boards, arcane touch sensor (Arcana; Arcane Focus)";

const MECHANICAL: &[&str] = &[PRESSURE_PLATE, TRIPWIRE, GLYPH_MOTION, GLYPH_PROXIMITY];
const BREATH: &[&str] = &[PRESSURE_PLATE, TRIPWIRE, GLYPH_MOTION, DRAGON_STATUE];
const PITS: &[&str] = &[
    PRESSURE_PLATE,
    TRIPWIRE,
    GLYPH_MOTION,
    GLYPH_PROXIMITY,
    TRAP_DOOR,
    COLLAPSING_STEP,
    COLLAPSING_FLOORBOARD,
];
const BLADES: &[&str] = &[
    PRESSURE_PLATE,
    TRIPWIRE,
    GLYPH_MOTION,
    GLYPH_PROXIMITY,
    ARMOR_TOUCH,
];
const WARDS: &[&str] = &[
    GLYPH_MOTION,
    GLYPH_PROXIMITY,
    GLYPH_TOUCH,
    GLYPH_GAZE,
    SWORD_TOUCH,
    BOOK_TOUCH,
    SKULL_TOUCH,
    RUG_TOUCH,
];
const TOUCHED_OBJECTS: &[&str] = &[
    "Sword",
    "Statue",
    "Table",
    "Bookshelf",
    "Book",
    "Door",
    "Pool of water",
    "Skull",
    "Suit of armor",
    "Rug",
];

/// Trigger pool for an effect row.
#[derive(Debug, Clone, Copy)]
enum Triggers {
    Fixed(&'static [&'static str]),
    /// An arcane touch sensor on one of [`TOUCHED_OBJECTS`]
    TouchedObject,
    /// One of [`TOUCHED_OBJECTS`] coated with chemicals
    CoatedObject,
}

/// Effect table keyed by the highest d100 roll each row covers.
const EFFECTS: &[(u32, &str, Triggers)] = &[
    (4, "*Magic missiles* shoot from a statue or object", Triggers::Fixed(&[PRESSURE_PLATE, TRIPWIRE, STATUE_MOTION, STATUE_PROXIMITY])),
    (7, "Collapsing staircase creates a ramp that deposits characters into a pit at its lower end", Triggers::Fixed(&[COLLAPSING_STEP, PRESSURE_PLATE, TRIPWIRE, GLYPH_PROXIMITY])),
    (10, "Ceiling block falls, or entire ceiling collapses", Triggers::Fixed(&[PRESSURE_PLATE, TRIPWIRE, GLYPH_MOTION])),
    (12, "Ceiling lowers slowly in locked room", Triggers::Fixed(MECHANICAL)),
    (14, "Chute opens in floor", Triggers::Fixed(&[TRAP_DOOR, TRIPWIRE, GLYPH_PROXIMITY])),
    (16, "Clanging noise attracts nearby monsters", Triggers::Fixed(&[PRESSURE_PLATE, TRIPWIRE, STATUE_MOTION, STATUE_PROXIMITY, COLLAPSING_STEP])),
    (19, "Touching an object triggers a *disintegrate* spell", Triggers::TouchedObject),
    (23, "Door or other object is coated with contact poison", Triggers::CoatedObject),
    (27, "Fire shoots out from wall, floor, or object", Triggers::Fixed(BREATH)),
    (30, "Touching an object triggers a *flesh to stone* spell", Triggers::TouchedObject),
    (33, "Floor collapses or is an illusion", Triggers::Fixed(&[COLLAPSING_FLOORBOARD, TRAP_DOOR, RUG_TOUCH])),
    (36, "Vent releases gas: blinding, acidic, obscuring, paralyzing, poisonous, or sleep-inducing", Triggers::Fixed(BREATH)),
    (39, "Floor tiles are electrified", Triggers::Fixed(&[RUG_TOUCH, FLOOR_TILES_TOUCH, FLOOR_BOARDS_TOUCH])),
    (43, "*Glyph of warding*", Triggers::Fixed(WARDS)),
    (46, "Huge wheeled statue rolls down corridor", Triggers::Fixed(&[STATUE_MOTION, STATUE_PROXIMITY, PRESSURE_PLATE, TRIPWIRE])),
    (49, "*Lightning bolt* shoots from wall or object", Triggers::Fixed(BREATH)),
    (52, "Locked room floods with water or acid", Triggers::Fixed(MECHANICAL)),
    (56, "Darts shoot out of an opened chest", Triggers::Fixed(&[PRESSURE_PLATE, TRIPWIRE, GLYPH_PROXIMITY, CHEST])),
    (59, "A weapon, suit of armor, or rug animates and attacks when touched", Triggers::Fixed(&[SWORD_TOUCH, ARMOR_TOUCH, RUG_TOUCH])),
    (62, "Pendulum, either bladed or weighted as a maul, swings across the room or hall", Triggers::Fixed(MECHANICAL)),
    (67, "Hidden pit opens beneath characters (25 percent chance that a black pudding or gelatinous cube fills the bottom of the pit)", Triggers::Fixed(PITS)),
    (70, "Hidden pit floods with acid or fire", Triggers::Fixed(PITS)),
    (73, "Locking pit floods with water", Triggers::Fixed(PITS)),
    (77, "Scything blade emerges from wall or object", Triggers::Fixed(BLADES)),
    (81, "Spears (possibly poisoned) spring out", Triggers::Fixed(BLADES)),
    (84, "Brittle stairs collapse over spikes", Triggers::Fixed(&[COLLAPSING_STEP, PRESSURE_PLATE, TRIPWIRE])),
    (88, "*Thunderwave* knocks characters into a pit of spikes", Triggers::Fixed(MECHANICAL)),
    (91, "Steel or stone jaws restrain a character", Triggers::Fixed(BREATH)),
    (94, "Stone block smashes across hallway", Triggers::Fixed(MECHANICAL)),
    (97, "*Symbol*", Triggers::Fixed(WARDS)),
    (100, "Walls slide together", Triggers::Fixed(MECHANICAL)),
];

fn pick_trigger<R: Rng + ?Sized>(triggers: Triggers, rng: &mut R) -> String {
    match triggers {
        Triggers::Fixed(pool) => pool.choose(rng).copied().unwrap_or(PRESSURE_PLATE).to_string(),
        Triggers::TouchedObject => {
            let object = TOUCHED_OBJECTS.choose(rng).copied().unwrap_or("Rug");
            format!("{object}, arcane touch sensor (Arcana; Arcane Focus)")
        }
        Triggers::CoatedObject => {
            let object = TOUCHED_OBJECTS.choose(rng).copied().unwrap_or("Door");
            format!(
                "{object}, coated with chemicals (Intelligence; Alchemist's supplies, Brewer's supplies, Cook's utensils)"
            )
        }
    }
}

/// Rolls severity on 1d6, then effect on 1d100, then a trigger suited to the effect.
pub fn generate_trap<R: Rng + ?Sized>(rng: &mut R) -> TrapDetails {
    let severity = TrapSeverity::from_roll(roll(rng, 1, 6));
    let effect_roll = roll(rng, 1, 100);

    let (_, effect, triggers) = EFFECTS
        .iter()
        .find(|(max, _, _)| effect_roll <= *max)
        .copied()
        .unwrap_or(EFFECTS[EFFECTS.len() - 1]);

    TrapDetails {
        trigger: pick_trigger(triggers, rng),
        severity,
        effect: effect.to_string(),
    }
}

/// Rolls the damage a sprung trap deals.
pub fn trap_damage<R: Rng + ?Sized>(severity: TrapSeverity, level: u32, rng: &mut R) -> u32 {
    severity.damage_dice(level).roll(rng)
}

/// Effect text for a d100 roll; used to look rows up directly.
pub fn trap_effect(effect_roll: u32) -> DungeonResult<&'static str> {
    EFFECTS
        .iter()
        .find(|(max, _, _)| (1..=100).contains(&effect_roll) && effect_roll <= *max)
        .map(|(_, effect, _)| *effect)
        .ok_or_else(|| {
            DungeonError::InvalidArgument(format!("trap effect roll {effect_roll} is outside 1-100"))
        })
}
