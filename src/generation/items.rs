//! # Treasure Generation
//!
//! Magic item tables, gems, art objects, coins, treasure chests and the
//! treasure hoard waiting at the end of the dungeon.
//!
//! Every table is a static `(highest roll, result)` list looked up with a
//! d100 (or a smaller die for gems and art). Treasure scales with the party's
//! average level through four [`TreasureBand`]s.

use crate::game::Difficulty;
use crate::utils::{die_size, roll, Dice};
use crate::{DungeonError, DungeonResult};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Magic item tables A (common consumables) through I (legendary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MagicItemTable {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
}

impl MagicItemTable {
    fn rows(self) -> &'static [(u32, &'static str)] {
        match self {
            MagicItemTable::A => TABLE_A,
            MagicItemTable::B => TABLE_B,
            MagicItemTable::C => TABLE_C,
            MagicItemTable::D => TABLE_D,
            MagicItemTable::E => TABLE_E,
            MagicItemTable::F => TABLE_F,
            MagicItemTable::G => TABLE_G,
            MagicItemTable::H => TABLE_H,
            MagicItemTable::I => TABLE_I,
        }
    }

    /// Looks up the item for a d100 roll.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::generation::MagicItemTable;
    ///
    /// assert_eq!(MagicItemTable::A.lookup(1).unwrap(), "Potion of healing");
    /// assert_eq!(MagicItemTable::A.lookup(100).unwrap(), "Driftglobe");
    /// assert!(MagicItemTable::A.lookup(101).is_err());
    /// ```
    pub fn lookup(self, d100: u32) -> DungeonResult<&'static str> {
        if !(1..=100).contains(&d100) {
            return Err(DungeonError::InvalidArgument(format!(
                "magic item roll {d100} is outside 1-100"
            )));
        }
        self.rows()
            .iter()
            .find(|(max, _)| d100 <= *max)
            .map(|(_, item)| *item)
            .ok_or_else(|| DungeonError::Invariant(format!("table {self} does not reach 100")))
    }

    /// Rolls one item, resolving the rows that name a family of items.
    pub fn roll_item<R: Rng + ?Sized>(self, rng: &mut R) -> DungeonResult<String> {
        let item = self.lookup(roll(rng, 1, 100))?;
        let variants = match (self, item) {
            (MagicItemTable::G, FIGURINE) => FIGURINES,
            (MagicItemTable::I, MAGIC_ARMOR) => LEGENDARY_ARMOR,
            _ => return Ok(item.to_string()),
        };
        Ok(variants.choose(rng).copied().unwrap_or(item).to_string())
    }
}

impl fmt::Display for MagicItemTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl FromStr for MagicItemTable {
    type Err = DungeonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(MagicItemTable::A),
            "B" => Ok(MagicItemTable::B),
            "C" => Ok(MagicItemTable::C),
            "D" => Ok(MagicItemTable::D),
            "E" => Ok(MagicItemTable::E),
            "F" => Ok(MagicItemTable::F),
            "G" => Ok(MagicItemTable::G),
            "H" => Ok(MagicItemTable::H),
            "I" => Ok(MagicItemTable::I),
            other => Err(DungeonError::InvalidArgument(format!(
                "unknown magic item table '{other}'"
            ))),
        }
    }
}

/// Rolls `count` items from one table.
pub fn magic_items<R: Rng + ?Sized>(
    table: MagicItemTable,
    count: u32,
    rng: &mut R,
) -> DungeonResult<Vec<String>> {
    (0..count).map(|_| table.roll_item(rng)).collect()
}

/// Treasure tier by average party level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TreasureBand {
    /// Levels 0-4
    Low,
    /// Levels 5-10
    Mid,
    /// Levels 11-16
    High,
    /// Levels 17 and up
    Epic,
}

impl TreasureBand {
    pub fn for_level(level: f64) -> Self {
        if level <= 4.0 {
            TreasureBand::Low
        } else if level <= 10.0 {
            TreasureBand::Mid
        } else if level <= 16.0 {
            TreasureBand::High
        } else {
            TreasureBand::Epic
        }
    }

    /// The table a chest guarded by an encounter of `difficulty` draws from.
    pub fn chest_table(self, difficulty: Difficulty) -> DungeonResult<MagicItemTable> {
        use MagicItemTable::*;
        let tables = match self {
            TreasureBand::Low => [A, B, C],
            TreasureBand::Mid => [B, C, D],
            TreasureBand::High => [C, D, E],
            TreasureBand::Epic => [D, E, F],
        };
        match difficulty {
            Difficulty::Easy => Ok(tables[0]),
            Difficulty::Medium => Ok(tables[1]),
            Difficulty::Hard => Ok(tables[2]),
            other => Err(DungeonError::InvalidArgument(format!(
                "no treasure chest for {other} encounters"
            ))),
        }
    }
}

/// A pile of coins by denomination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coins {
    pub cp: u64,
    pub sp: u64,
    pub ep: u64,
    pub gp: u64,
    pub pp: u64,
}

impl Coins {
    pub fn is_empty(&self) -> bool {
        self.cp + self.sp + self.ep + self.gp + self.pp == 0
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = [
            (self.cp, "CP"),
            (self.sp, "SP"),
            (self.ep, "EP"),
            (self.gp, "GP"),
            (self.pp, "PP"),
        ]
        .iter()
        .filter(|(amount, _)| *amount > 0)
        .map(|(amount, name)| format!("{amount} {name}"))
        .collect();

        if parts.is_empty() {
            f.write_str("no coins")
        } else {
            f.write_str(&parts.join(" and "))
        }
    }
}

fn scaled<R: Rng + ?Sized>(rng: &mut R, factor: u64, count: u32, sides: u32) -> u64 {
    factor * u64::from(roll(rng, count, sides))
}

/// Coins found in a treasure chest.
pub fn chest_coins<R: Rng + ?Sized>(
    band: TreasureBand,
    difficulty: Difficulty,
    rng: &mut R,
) -> DungeonResult<Coins> {
    let coins = match (band, difficulty) {
        (TreasureBand::Low, Difficulty::Easy) => Coins {
            cp: scaled(rng, 1, 5, 6),
            ..Coins::default()
        },
        (TreasureBand::Low, Difficulty::Medium) => Coins {
            sp: scaled(rng, 1, 4, 6),
            ..Coins::default()
        },
        (TreasureBand::Low, Difficulty::Hard) => Coins {
            gp: scaled(rng, 1, 3, 6),
            ..Coins::default()
        },
        (TreasureBand::Mid, Difficulty::Easy) => Coins {
            cp: scaled(rng, 100, 4, 6),
            ep: scaled(rng, 10, 1, 6),
            ..Coins::default()
        },
        (TreasureBand::Mid, Difficulty::Medium) => Coins {
            sp: scaled(rng, 10, 6, 6),
            gp: scaled(rng, 10, 2, 6),
            ..Coins::default()
        },
        (TreasureBand::Mid, Difficulty::Hard) => Coins {
            ep: scaled(rng, 10, 3, 6),
            gp: scaled(rng, 10, 2, 6),
            ..Coins::default()
        },
        (TreasureBand::High, Difficulty::Easy) => Coins {
            sp: scaled(rng, 100, 4, 6),
            gp: scaled(rng, 100, 1, 6),
            ..Coins::default()
        },
        (TreasureBand::High, Difficulty::Medium) => Coins {
            ep: scaled(rng, 100, 1, 6),
            gp: scaled(rng, 100, 1, 6),
            ..Coins::default()
        },
        (TreasureBand::High, Difficulty::Hard) => Coins {
            gp: scaled(rng, 100, 2, 6),
            pp: scaled(rng, 10, 1, 6),
            ..Coins::default()
        },
        (TreasureBand::Epic, Difficulty::Easy) => Coins {
            ep: scaled(rng, 1000, 2, 6),
            gp: scaled(rng, 100, 8, 6),
            ..Coins::default()
        },
        (TreasureBand::Epic, Difficulty::Medium) => Coins {
            gp: scaled(rng, 1000, 1, 6),
            pp: scaled(rng, 100, 1, 6),
            ..Coins::default()
        },
        (TreasureBand::Epic, Difficulty::Hard) => Coins {
            gp: scaled(rng, 1000, 1, 6),
            pp: scaled(rng, 100, 2, 6),
            ..Coins::default()
        },
        (_, other) => {
            return Err(DungeonError::InvalidArgument(format!(
                "no treasure chest for {other} encounters"
            )))
        }
    };
    Ok(coins)
}

/// Coins in the final hoard. Die sizes grow with the party level inside each band.
pub fn hoard_coins<R: Rng + ?Sized>(level: f64, rng: &mut R) -> Coins {
    match TreasureBand::for_level(level) {
        TreasureBand::Low => {
            let sides = die_size(level + 4.0);
            Coins {
                cp: scaled(rng, 100, 6, sides),
                sp: scaled(rng, 100, 3, sides),
                gp: scaled(rng, 10, 2, sides),
                ..Coins::default()
            }
        }
        TreasureBand::Mid => {
            let sides = die_size(level - 1.0);
            Coins {
                cp: scaled(rng, 100, 2, sides),
                sp: scaled(rng, 1000, 2, sides),
                gp: scaled(rng, 100, 6, sides),
                pp: scaled(rng, 10, 3, sides),
                ..Coins::default()
            }
        }
        TreasureBand::High => {
            let sides = die_size(level - 7.0);
            Coins {
                gp: scaled(rng, 1000, 4, sides),
                pp: scaled(rng, 100, 5, sides),
                ..Coins::default()
            }
        }
        TreasureBand::Epic => Coins {
            gp: scaled(rng, 1000, 12, 6),
            pp: scaled(rng, 1000, 8, 6),
            ..Coins::default()
        },
    }
}

/// What a treasure chest holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChestContents {
    MagicItem(String),
    Coins(Coins),
    Empty,
}

impl fmt::Display for ChestContents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChestContents::MagicItem(item) => f.write_str(item),
            ChestContents::Coins(coins) => write!(f, "{coins}"),
            ChestContents::Empty => f.write_str("Empty chest"),
        }
    }
}

/// Opens the chest left by a defeated encounter: 1d3 picks item, coins or nothing.
pub fn generate_chest<R: Rng + ?Sized>(
    level: f64,
    difficulty: Difficulty,
    rng: &mut R,
) -> DungeonResult<ChestContents> {
    let band = TreasureBand::for_level(level);
    let table = band.chest_table(difficulty)?;
    match roll(rng, 1, 3) {
        1 => Ok(ChestContents::MagicItem(table.roll_item(rng)?)),
        2 => Ok(ChestContents::Coins(chest_coins(band, difficulty, rng)?)),
        _ => Ok(ChestContents::Empty),
    }
}

/// Rolls `count` gems worth `value` gp each.
pub fn gems<R: Rng + ?Sized>(value: u32, count: u32, rng: &mut R) -> DungeonResult<Vec<String>> {
    let list = match value {
        10 => GEMS_10,
        50 => GEMS_50,
        100 => GEMS_100,
        500 => GEMS_500,
        1000 => GEMS_1000,
        5000 => GEMS_5000,
        other => {
            return Err(DungeonError::InvalidArgument(format!(
                "no gems worth {other} gp"
            )))
        }
    };
    Ok(pick_many(list, count, rng))
}

/// Rolls `count` art objects worth `value` gp each.
pub fn art<R: Rng + ?Sized>(value: u32, count: u32, rng: &mut R) -> DungeonResult<Vec<String>> {
    let list = match value {
        25 => ART_25,
        250 => ART_250,
        750 => ART_750,
        2500 => ART_2500,
        7500 => ART_7500,
        other => {
            return Err(DungeonError::InvalidArgument(format!(
                "no art objects worth {other} gp"
            )))
        }
    };
    Ok(pick_many(list, count, rng))
}

fn pick_many<R: Rng + ?Sized>(list: &[&str], count: u32, rng: &mut R) -> Vec<String> {
    (0..count)
        .filter_map(|_| list.choose(rng).map(|item| item.to_string()))
        .collect()
}

/// The treasure hoard guarded by the Deadly encounter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasureHoard {
    pub coins: Coins,
    pub gems: Vec<String>,
    pub art: Vec<String>,
    pub magic_items: Vec<String>,
}

impl fmt::Display for TreasureHoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Coins: {}", self.coins)?;
        for (label, items) in [
            ("Gems", &self.gems),
            ("Art", &self.art),
            ("Magic items", &self.magic_items),
        ] {
            if !items.is_empty() {
                writeln!(f, "{label}: {}", items.join("; "))?;
            }
        }
        Ok(())
    }
}

/// Gems or art objects in a hoard row: kind, value in gp and quantity dice.
#[derive(Debug, Clone, Copy)]
enum Valuables {
    Gems(u32, Dice),
    Art(u32, Dice),
}

#[derive(Debug, Clone, Copy)]
struct HoardRow {
    max: u32,
    valuables: Option<Valuables>,
    magic: &'static [(MagicItemTable, Dice)],
}

const fn row(
    max: u32,
    valuables: Option<Valuables>,
    magic: &'static [(MagicItemTable, Dice)],
) -> HoardRow {
    HoardRow {
        max,
        valuables,
        magic,
    }
}

/// Rolls the full hoard for a party of the given average level.
pub fn generate_hoard<R: Rng + ?Sized>(level: f64, rng: &mut R) -> DungeonResult<TreasureHoard> {
    let rows = match TreasureBand::for_level(level) {
        TreasureBand::Low => HOARD_LOW,
        TreasureBand::Mid => HOARD_MID,
        TreasureBand::High => HOARD_HIGH,
        TreasureBand::Epic => HOARD_EPIC,
    };
    let d100 = roll(rng, 1, 100);
    let chosen = rows
        .iter()
        .find(|row| d100 <= row.max)
        .ok_or_else(|| DungeonError::Invariant(format!("hoard table misses roll {d100}")))?;

    let mut hoard = TreasureHoard::default();
    match chosen.valuables {
        Some(Valuables::Gems(value, dice)) => hoard.gems = gems(value, dice.roll(rng), rng)?,
        Some(Valuables::Art(value, dice)) => hoard.art = art(value, dice.roll(rng), rng)?,
        None => {}
    }
    for &(table, dice) in chosen.magic {
        let count = dice.roll(rng);
        hoard.magic_items.extend(magic_items(table, count, rng)?);
    }
    hoard.coins = hoard_coins(level, rng);
    Ok(hoard)
}

use MagicItemTable as T;

const ONE: Dice = Dice::flat(1);
const D4: Dice = Dice::new(1, 4);
const D6: Dice = Dice::new(1, 6);
const D8: Dice = Dice::new(1, 8);

const SMALL_GEMS_10: Option<Valuables> = Some(Valuables::Gems(10, Dice::new(2, 6)));
const SMALL_GEMS_50: Option<Valuables> = Some(Valuables::Gems(50, Dice::new(2, 6)));
const GEMS_50_3D6: Option<Valuables> = Some(Valuables::Gems(50, Dice::new(3, 6)));
const GEMS_100_3D6: Option<Valuables> = Some(Valuables::Gems(100, Dice::new(3, 6)));
const GEMS_500_3D6: Option<Valuables> = Some(Valuables::Gems(500, Dice::new(3, 6)));
const GEMS_1000_3D6: Option<Valuables> = Some(Valuables::Gems(1000, Dice::new(3, 6)));
const GEMS_5000_1D8: Option<Valuables> = Some(Valuables::Gems(5000, D8));
const ART_25_2D4: Option<Valuables> = Some(Valuables::Art(25, Dice::new(2, 4)));
const ART_250_2D4: Option<Valuables> = Some(Valuables::Art(250, Dice::new(2, 4)));
const ART_750_2D4: Option<Valuables> = Some(Valuables::Art(750, Dice::new(2, 4)));
const ART_2500_1D10: Option<Valuables> = Some(Valuables::Art(2500, Dice::new(1, 10)));
const ART_7500_1D4: Option<Valuables> = Some(Valuables::Art(7500, D4));

const HOARD_LOW: &[HoardRow] = &[
    row(6, None, &[]),
    row(16, SMALL_GEMS_10, &[]),
    row(26, ART_25_2D4, &[]),
    row(36, SMALL_GEMS_50, &[]),
    row(44, SMALL_GEMS_10, &[(T::A, D6)]),
    row(52, ART_25_2D4, &[(T::A, D6)]),
    row(60, SMALL_GEMS_50, &[(T::A, D6)]),
    row(65, SMALL_GEMS_10, &[(T::B, D4)]),
    row(70, ART_25_2D4, &[(T::B, D4)]),
    row(75, SMALL_GEMS_50, &[(T::B, D4)]),
    row(78, SMALL_GEMS_10, &[(T::C, D4)]),
    row(80, ART_25_2D4, &[(T::C, D4)]),
    row(85, SMALL_GEMS_50, &[(T::C, D4)]),
    row(92, ART_25_2D4, &[(T::F, D4)]),
    row(97, SMALL_GEMS_50, &[(T::F, D4)]),
    row(99, ART_25_2D4, &[(T::G, ONE)]),
    row(100, SMALL_GEMS_50, &[(T::G, ONE)]),
];

const HOARD_MID: &[HoardRow] = &[
    row(4, None, &[]),
    row(10, ART_25_2D4, &[]),
    row(16, GEMS_50_3D6, &[]),
    row(22, GEMS_100_3D6, &[]),
    row(28, ART_25_2D4, &[]),
    row(32, ART_25_2D4, &[(T::A, D6)]),
    row(36, GEMS_50_3D6, &[(T::A, D6)]),
    row(40, GEMS_100_3D6, &[(T::A, D6)]),
    row(44, ART_250_2D4, &[(T::A, D6)]),
    row(49, ART_25_2D4, &[(T::B, D4)]),
    row(54, GEMS_50_3D6, &[(T::B, D4)]),
    row(59, GEMS_100_3D6, &[(T::B, D4)]),
    row(63, ART_250_2D4, &[(T::B, D4)]),
    row(66, ART_25_2D4, &[(T::C, D4)]),
    row(69, GEMS_50_3D6, &[(T::C, D4)]),
    row(72, GEMS_100_3D6, &[(T::C, D4)]),
    row(74, ART_250_2D4, &[(T::C, D4)]),
    row(76, ART_25_2D4, &[(T::D, ONE)]),
    row(78, GEMS_50_3D6, &[(T::D, ONE)]),
    row(79, GEMS_100_3D6, &[(T::D, ONE)]),
    row(80, ART_250_2D4, &[(T::D, ONE)]),
    row(84, ART_25_2D4, &[(T::F, D4)]),
    row(88, GEMS_50_3D6, &[(T::F, D4)]),
    row(91, GEMS_100_3D6, &[(T::F, D4)]),
    row(94, ART_250_2D4, &[(T::F, D4)]),
    row(96, GEMS_100_3D6, &[(T::G, D4)]),
    row(98, ART_250_2D4, &[(T::G, D6)]),
    row(99, GEMS_100_3D6, &[(T::H, ONE)]),
    row(100, ART_250_2D4, &[(T::H, ONE)]),
];

const HOARD_HIGH: &[HoardRow] = &[
    row(3, None, &[]),
    row(6, ART_250_2D4, &[]),
    row(9, ART_750_2D4, &[]),
    row(12, GEMS_500_3D6, &[]),
    row(15, GEMS_1000_3D6, &[]),
    row(19, ART_250_2D4, &[(T::A, D4), (T::B, D6)]),
    row(23, ART_750_2D4, &[(T::A, D4), (T::B, D6)]),
    row(26, GEMS_500_3D6, &[(T::A, D4), (T::B, D6)]),
    row(29, GEMS_1000_3D6, &[(T::A, D4), (T::B, D6)]),
    row(35, ART_250_2D4, &[(T::C, D6)]),
    row(40, ART_750_2D4, &[(T::C, D6)]),
    row(45, GEMS_500_3D6, &[(T::C, D6)]),
    row(50, GEMS_1000_3D6, &[(T::C, D6)]),
    row(54, ART_250_2D4, &[(T::D, D4)]),
    row(58, ART_750_2D4, &[(T::D, D4)]),
    row(62, GEMS_500_3D6, &[(T::D, D4)]),
    row(66, GEMS_1000_3D6, &[(T::D, D4)]),
    row(68, ART_250_2D4, &[(T::E, ONE)]),
    row(70, ART_750_2D4, &[(T::E, ONE)]),
    row(72, GEMS_500_3D6, &[(T::E, ONE)]),
    row(74, GEMS_1000_3D6, &[(T::E, ONE)]),
    row(76, ART_250_2D4, &[(T::F, ONE), (T::G, D4)]),
    row(78, ART_750_2D4, &[(T::F, ONE), (T::G, D4)]),
    row(80, GEMS_500_3D6, &[(T::F, ONE), (T::G, D4)]),
    row(82, GEMS_1000_3D6, &[(T::F, ONE), (T::G, D4)]),
    row(85, ART_250_2D4, &[(T::H, D4)]),
    row(88, ART_750_2D4, &[(T::H, D4)]),
    row(90, GEMS_500_3D6, &[(T::H, D4)]),
    row(92, GEMS_1000_3D6, &[(T::H, D4)]),
    row(94, ART_250_2D4, &[(T::I, ONE)]),
    row(96, ART_750_2D4, &[(T::I, ONE)]),
    row(98, GEMS_500_3D6, &[(T::I, ONE)]),
    row(100, GEMS_1000_3D6, &[(T::I, ONE)]),
];

const HOARD_EPIC: &[HoardRow] = &[
    row(2, None, &[]),
    row(5, GEMS_1000_3D6, &[(T::C, D8)]),
    row(8, ART_2500_1D10, &[(T::C, D8)]),
    row(11, ART_7500_1D4, &[(T::C, D8)]),
    row(14, GEMS_5000_1D8, &[(T::C, D8)]),
    row(22, GEMS_1000_3D6, &[(T::D, D6)]),
    row(30, ART_2500_1D10, &[(T::D, D6)]),
    row(38, ART_7500_1D4, &[(T::D, D6)]),
    row(46, GEMS_5000_1D8, &[(T::D, D6)]),
    row(52, GEMS_1000_3D6, &[(T::E, D6)]),
    row(58, ART_2500_1D10, &[(T::E, D6)]),
    row(63, ART_7500_1D4, &[(T::E, D6)]),
    row(68, GEMS_5000_1D8, &[(T::E, D6)]),
    row(69, GEMS_1000_3D6, &[(T::G, D4)]),
    row(70, ART_2500_1D10, &[(T::G, D4)]),
    row(71, ART_7500_1D4, &[(T::G, D4)]),
    row(72, GEMS_5000_1D8, &[(T::G, D4)]),
    row(74, GEMS_1000_3D6, &[(T::H, D4)]),
    row(76, ART_2500_1D10, &[(T::H, D4)]),
    row(78, ART_7500_1D4, &[(T::H, D4)]),
    row(80, GEMS_5000_1D8, &[(T::H, D4)]),
    row(85, GEMS_1000_3D6, &[(T::I, D4)]),
    row(90, ART_2500_1D10, &[(T::I, D4)]),
    row(95, ART_7500_1D4, &[(T::I, D4)]),
    row(100, GEMS_5000_1D8, &[(T::I, D4)]),
];

const GEMS_10: &[&str] = &[
    "Azurite (opaque mottled deep blue)",
    "Banded agate (translucent striped brown, blue, white, or red)",
    "Blue quartz (transparent pale blue)",
    "Eye agate (translucent circles of gray, white, brown, blue, or green)",
    "Hematite (opaque gray-black)",
    "Lapis lazuli (opaque light and dark blue with yellow flecks)",
    "Malachite (opaque striated light and dark green)",
    "Moss agate (translucent pink or yellow-white with mossy gray or green markings)",
    "Obsidian (opaque black)",
    "Rhodochrosite (opaque light pink)",
    "Tiger eye (translucent brown with golden center)",
    "Turquoise (opaque light blue-green)",
];

const GEMS_50: &[&str] = &[
    "Bloodstone (opaque dark gray with red flecks)",
    "Carnelian (opaque orange to red-brown)",
    "Chalcedony (opaque white)",
    "Chrysoprase (translucent green)",
    "Citrine (transparent pale yellow-brown)",
    "Jasper (opaque blue, black, or brown)",
    "Moonstone (translucent white with pale blue glow)",
    "Onyx (opaque bands of black and white, or pure black or white)",
    "Quartz (transparent white, smoky gray, or yellow)",
    "Sardonyx (opaque bands of red and white)",
    "Star rose quartz (translucent rosy stone with white star-shaped center)",
    "Zircon (transparent pale blue-green)",
];

const GEMS_100: &[&str] = &[
    "Amber (transparent watery gold to rich gold)",
    "Amethyst (transparent deep purple)",
    "Chrysoberyl (transparent yellow-green to pale green)",
    "Coral (opaque crimson)",
    "Garnet (transparent red, brown-green, or violet)",
    "Jade (translucent light green, deep green, or white)",
    "Jet (opaque deep black)",
    "Pearl (opaque lustrous white, yellow, or pink)",
    "Spinel (transparent red, red-brown, or deep green)",
    "Tourmaline (transparent pale green, blue, brown, or red)",
];

const GEMS_500: &[&str] = &[
    "Alexandrite (transparent dark green)",
    "Aquamarine (transparent pale blue-green)",
    "Black pearl (opaque pure black)",
    "Blue spinel (transparent deep blue)",
    "Peridot (transparent rich olive green)",
    "Topaz (transparent golden yellow)",
];

const GEMS_1000: &[&str] = &[
    "Black opal (translucent dark green with black mottling and golden flecks)",
    "Blue sapphire (transparent blue-white to medium blue)",
    "Emerald (transparent deep bright green)",
    "Fire opal (translucent fiery red)",
    "Opal (translucent pale blue with green and golden mottling)",
    "Star ruby (translucent ruby with white star-shaped center)",
    "Star sapphire (translucent blue sapphire with white star-shaped center)",
    "Yellow sapphire (transparent fiery yellow or yellow green)",
];

const GEMS_5000: &[&str] = &[
    "Black sapphire (translucent lustrous black with glowing highlights)",
    "Diamond (transparent blue-white, canary, pink, brown, or blue)",
    "Jacinth (transparent fiery orange)",
    "Ruby (transparent clear red to deep crimson)",
];

const ART_25: &[&str] = &[
    "Silver ewer",
    "Carved bone statuette",
    "Small gold bracelet",
    "Cloth-of-gold vestments",
    "Black velvet mask stitched with silver thread",
    "Copper chalice with silver filigree",
    "Pair of engraved bone dice",
    "Small mirror set in a painted wooden frame",
    "Embroidered silk handkerchief",
    "Gold locket with a painted portrait inside",
];

const ART_250: &[&str] = &[
    "Gold ring set with bloodstones",
    "Carved ivory statuette",
    "Large gold bracelet",
    "Silver necklace with a gemstone pendant",
    "Bronze crown",
    "Silk robe with gold embroidery",
    "Large well-made tapestry",
    "Brass mug with jade inlay",
    "Box of turquoise animal figurines",
    "Gold bird cage with electrum filigree",
];

const ART_750: &[&str] = &[
    "Silver chalice set with moonstones",
    "Silver-plated steel longsword with jet set in hilt",
    "Carved harp of exotic wood with ivory inlay and zircon gems",
    "Small gold idol",
    "Gold dragon comb set with red garnets as eyes",
    "Bottle stopper cork embossed with gold leaf and set with amethysts",
    "Ceremonial electrum dagger with a black pearl in the pommel",
    "Silver and gold brooch",
    "Obsidian statuette with gold fittings and inlay",
    "Painted gold war mask",
];

const ART_2500: &[&str] = &[
    "Fine gold chain set with a fire opal",
    "Old masterpiece painting",
    "Embroidered silk and velvet mantle set with numerous moonstones",
    "Platinum bracelet set with a sapphire",
    "Embroidered glove set with jewel chips",
    "Jeweled anklet",
    "Gold music box",
    "Gold circlet set with four aquamarines",
    "Eye patch with a mock eye set in blue sapphire and moonstone",
    "A necklace string of small pink pearls",
];

const ART_7500: &[&str] = &[
    "Jeweled gold crown",
    "Jeweled platinum ring",
    "Small gold statuette set with rubies",
    "Gold cup set with emeralds",
    "Gold jewelry box with platinum filigree",
    "Painted gold child's sarcophagus",
    "Jade game board with solid gold playing pieces",
    "Bejeweled ivory drinking horn with gold filigree",
];

const FIGURINE: &str = "Figurine of wondrous power";
const MAGIC_ARMOR: &str = "Armor, +2 or +3";

// Onyx dog appears twice, as on the d8 it is rolled with.
const FIGURINES: &[&str] = &[
    "Figurine of wondrous power (Bronze griffon)",
    "Figurine of wondrous power (Ebony fly)",
    "Figurine of wondrous power (Golden lions)",
    "Figurine of wondrous power (Ivory goats)",
    "Figurine of wondrous power (Marble elephant)",
    "Figurine of wondrous power (Onyx dog)",
    "Figurine of wondrous power (Onyx dog)",
    "Figurine of wondrous power (Serpentine owl)",
];

const LEGENDARY_ARMOR: &[&str] = &[
    "Armor, +2 half plate",
    "Armor, +2 half plate",
    "Armor, +2 plate",
    "Armor, +2 plate",
    "Armor, +3 studded leather",
    "Armor, +3 studded leather",
    "Armor, +3 breastplate",
    "Armor, +3 breastplate",
    "Armor, +3 splint",
    "Armor, +3 splint",
    "Armor, +3 half plate",
    "Armor, +3 plate",
];

const TABLE_A: &[(u32, &str)] = &[
    (50, "Potion of healing"),
    (60, "Spell scroll (cantrip)"),
    (70, "Potion of climbing"),
    (90, "Spell scroll (1st level)"),
    (94, "Spell scroll (2nd level)"),
    (98, "Potion of healing (greater)"),
    (99, "Bag of holding"),
    (100, "Driftglobe"),
];

const TABLE_B: &[(u32, &str)] = &[
    (15, "Potion of healing"),
    (22, "Potion of fire breath"),
    (29, "Potion of resistance"),
    (34, "Ammunition, +1"),
    (39, "Potion of animal friendship"),
    (44, "Potion of hill giant strength"),
    (49, "Potion of growth"),
    (54, "Potion of water breathing"),
    (59, "Spell scroll (2nd level)"),
    (64, "Spell scroll (3rd level)"),
    (67, "Bag of holding"),
    (70, "Keoghtom's ointment"),
    (73, "Oil of slipperiness"),
    (75, "Dust of disappearance"),
    (77, "Dust of dryness"),
    (79, "Dust of sneezing and choking"),
    (81, "Elemental gem"),
    (83, "Philter of love"),
    (84, "Alchemy jug"),
    (85, "Cap of water breathing"),
    (86, "Cloak of the manta ray"),
    (87, "Driftglobe"),
    (88, "Goggles of night"),
    (89, "Helm of comprehending languages"),
    (90, "Immovable rod"),
    (91, "Lantern of revealing"),
    (92, "Mariner's armor"),
    (93, "Mithral armor"),
    (94, "Potion of poison"),
    (95, "Ring of swimming"),
    (96, "Robe of useful items"),
    (97, "Rope of climbing"),
    (98, "Saddle of the cavalier"),
    (99, "Wand of magic detection"),
    (100, "Wand of secrets"),
];

const TABLE_C: &[(u32, &str)] = &[
    (15, "Potion of healing (superior)"),
    (22, "Spell scroll (4th level)"),
    (27, "Ammunition, +2"),
    (32, "Potion of clairvoyance"),
    (37, "Potion of diminution"),
    (42, "Potion of gaseous form"),
    (47, "Potion of frost giant strength"),
    (52, "Potion of stone giant strength"),
    (57, "Potion of heroism"),
    (62, "Potion of invulnerability"),
    (67, "Potion of mind reading"),
    (72, "Spell scroll (5th level)"),
    (75, "Elixir of health"),
    (78, "Oil of etherealness"),
    (81, "Potion of fire giant strength"),
    (84, "Quaal's feather token"),
    (87, "Scroll of protection"),
    (89, "Bag of beans"),
    (91, "Bead of force"),
    (92, "Chime of opening"),
    (93, "Decanter of endless water"),
    (94, "Eyes of minute seeing"),
    (95, "Folding boat"),
    (96, "Heward's handy haversack"),
    (97, "Horseshoes of speed"),
    (98, "Necklace of fireballs"),
    (99, "Periapt of health"),
    (100, "Sending stones"),
];

const TABLE_D: &[(u32, &str)] = &[
    (20, "Potion of healing (supreme)"),
    (30, "Potion of invisibility"),
    (40, "Potion of speed"),
    (50, "Spell scroll (6th level)"),
    (57, "Spell scroll (7th level)"),
    (62, "Ammunition, +3"),
    (67, "Oil of sharpness"),
    (72, "Potion of flying"),
    (77, "Potion of cloud giant strength"),
    (82, "Potion of longevity"),
    (87, "Potion of vitality"),
    (92, "Spell scroll (8th level)"),
    (95, "Horseshoes of a zephyr"),
    (98, "Nolzur's marvelous pigments"),
    (99, "Bag of devouring"),
    (100, "Portable hole"),
];

const TABLE_E: &[(u32, &str)] = &[
    (30, "Spell scroll (8th level)"),
    (55, "Potion of storm giant strength"),
    (70, "Potion of healing (supreme)"),
    (85, "Spell scroll (9th level)"),
    (93, "Universal solvent"),
    (98, "Arrow of slaying"),
    (100, "Sovereign glue"),
];

const TABLE_F: &[(u32, &str)] = &[
    (15, "Weapon, +1"),
    (18, "Shield, +1"),
    (21, "Sentinel shield"),
    (23, "Amulet of proof against detection and location"),
    (25, "Boots of elvenkind"),
    (27, "Boots of striding and springing"),
    (29, "Bracers of archery"),
    (31, "Brooch of shielding"),
    (33, "Broom of flying"),
    (35, "Cloak of elvenkind"),
    (37, "Cloak of protection"),
    (39, "Gauntlets of ogre power"),
    (41, "Hat of disguise"),
    (43, "Javelin of lightning"),
    (45, "Pearl of power"),
    (47, "Rod of the pact keeper, +1"),
    (49, "Slippers of spider climbing"),
    (51, "Staff of the adder"),
    (53, "Staff of the python"),
    (55, "Sword of vengeance"),
    (57, "Trident of fish command"),
    (59, "Wand of magic missiles"),
    (61, "Wand of the war mage, +1"),
    (63, "Wand of web"),
    (65, "Weapon of warning"),
    (66, "Adamantine armor (chain mail)"),
    (67, "Adamantine armor (chain shirt)"),
    (68, "Adamantine armor (scale mail)"),
    (69, "Bag of tricks (gray)"),
    (70, "Bag of tricks (rust)"),
    (71, "Bag of tricks (tan)"),
    (72, "Boots of the winterlands"),
    (73, "Circlet of blasting"),
    (74, "Deck of illusions"),
    (75, "Eversmoking bottle"),
    (76, "Eyes of charming"),
    (77, "Eyes of the eagle"),
    (78, "Figurine of wondrous power (silver raven)"),
    (79, "Gem of brightness"),
    (80, "Gloves of missile snaring"),
    (81, "Gloves of swimming and climbing"),
    (82, "Gloves of thievery"),
    (83, "Headband of intellect"),
    (84, "Helm of telepathy"),
    (85, "Instrument of the bards (Doss lute)"),
    (86, "Instrument of the bards (Fochlucan bandore)"),
    (87, "Instrument of the bards (Mac-Fuimidh cittern)"),
    (88, "Medallion of thoughts"),
    (89, "Necklace of adaptation"),
    (90, "Periapt of wound closure"),
    (91, "Pipes of haunting"),
    (92, "Pipes of the sewers"),
    (93, "Ring of jumping"),
    (94, "Ring of mind shielding"),
    (95, "Ring of warmth"),
    (96, "Ring of water walking"),
    (97, "Quiver of Ehlonna"),
    (98, "Stone of good luck (luckstone)"),
    (99, "Wind fan"),
    (100, "Winged boots"),
];

const TABLE_G: &[(u32, &str)] = &[
    (11, "Weapon, +2"),
    (14, FIGURINE),
    (15, "Adamantine armor (breastplate)"),
    (16, "Adamantine armor (splint)"),
    (17, "Amulet of health"),
    (18, "Armor of vulnerability"),
    (19, "Arrow-catching shield"),
    (20, "Belt of dwarvenkind"),
    (21, "Belt of hill giant strength"),
    (22, "Berserker axe"),
    (23, "Boots of levitation"),
    (24, "Boots of speed"),
    (25, "Bowl of commanding water elementals"),
    (26, "Bracers of defense"),
    (27, "Brazier of commanding fire elementals"),
    (28, "Cape of the mountebank"),
    (29, "Censer of controlling air elementals"),
    (30, "Armor, +1 chain mail"),
    (31, "Armor of resistance (chain mail)"),
    (32, "Armor, +1 chain shirt"),
    (33, "Armor of resistance (chain shirt)"),
    (34, "Cloak of displacement"),
    (35, "Cloak of the bat"),
    (36, "Cube of force"),
    (37, "Daern's instant fortress"),
    (38, "Dagger of venom"),
    (39, "Dimensional shackles"),
    (40, "Dragon slayer"),
    (41, "Elven chain"),
    (42, "Flame tongue"),
    (43, "Gem of seeing"),
    (44, "Giant slayer"),
    (45, "Glamoured studded leather"),
    (46, "Helm of teleportation"),
    (47, "Horn of blasting"),
    (48, "Horn of Valhalla (silver or brass)"),
    (49, "Instrument of the bards (Canaith mandolin)"),
    (50, "Instrument of the bards (Cli lyre)"),
    (51, "Ioun stone (awareness)"),
    (52, "Ioun stone (protection)"),
    (53, "Ioun stone (reserve)"),
    (54, "Ioun stone (sustenance)"),
    (55, "Iron bands of Bilarro"),
    (56, "Armor, +1 leather"),
    (57, "Armor of resistance (leather)"),
    (58, "Mace of disruption"),
    (59, "Mace of smiting"),
    (60, "Mace of terror"),
    (61, "Mantle of spell resistance"),
    (62, "Necklace of prayer beads"),
    (63, "Periapt of proof against poison"),
    (64, "Ring of animal influence"),
    (65, "Ring of evasion"),
    (66, "Ring of feather falling"),
    (67, "Ring of free action"),
    (68, "Ring of protection"),
    (69, "Ring of resistance"),
    (70, "Ring of spell storing"),
    (71, "Ring of the ram"),
    (72, "Ring of X-ray vision"),
    (73, "Robe of eyes"),
    (74, "Rod of rulership"),
    (75, "Rod of the pact keeper, +2"),
    (76, "Rope of entanglement"),
    (77, "Armor, +1 scale mail"),
    (78, "Armor of resistance (scale mail)"),
    (79, "Shield, +2"),
    (80, "Shield of missile attraction"),
    (81, "Staff of charming"),
    (82, "Staff of healing"),
    (83, "Staff of swarming insects"),
    (84, "Staff of the woodlands"),
    (85, "Staff of withering"),
    (86, "Stone of controlling earth elementals"),
    (87, "Sun blade"),
    (88, "Sword of life stealing"),
    (89, "Sword of wounding"),
    (90, "Tentacle rod"),
    (91, "Vicious weapon"),
    (92, "Wand of binding"),
    (93, "Wand of enemy detection"),
    (94, "Wand of fear"),
    (95, "Wand of fireballs"),
    (96, "Wand of lightning bolts"),
    (97, "Wand of paralysis"),
    (98, "Wand of the war mage, +2"),
    (99, "Wand of wonder"),
    (100, "Wings of flying"),
];

const TABLE_H: &[(u32, &str)] = &[
    (10, "Weapon, +3"),
    (12, "Amulet of the planes"),
    (14, "Carpet of flying"),
    (16, "Crystal ball (very rare version)"),
    (18, "Ring of regeneration"),
    (20, "Ring of shooting stars"),
    (22, "Ring of telekinesis"),
    (24, "Robe of scintillating colors"),
    (26, "Robe of stars"),
    (28, "Rod of absorption"),
    (30, "Rod of alertness"),
    (32, "Rod of security"),
    (34, "Rod of the pact keeper, +3"),
    (36, "Scimitar of speed"),
    (38, "Shield, +3"),
    (40, "Staff of fire"),
    (42, "Staff of frost"),
    (44, "Staff of power"),
    (46, "Staff of striking"),
    (48, "Staff of thunder and lightning"),
    (50, "Sword of sharpness"),
    (52, "Wand of polymorph"),
    (54, "Wand of the war mage, +3"),
    (55, "Adamantine armor (half plate)"),
    (56, "Adamantine armor (plate)"),
    (57, "Animated shield"),
    (58, "Belt of fire giant strength"),
    (59, "Belt of frost giant strength (or stone)"),
    (60, "Armor, +1 breastplate"),
    (61, "Armor of resistance (breastplate)"),
    (62, "Candle of invocation"),
    (63, "Armor, +2 chain mail"),
    (64, "Armor, +2 chain shirt"),
    (65, "Cloak of arachnida"),
    (66, "Dancing sword"),
    (67, "Demon armor"),
    (68, "Dragon scale mail"),
    (69, "Dwarven plate"),
    (70, "Dwarven thrower"),
    (71, "Efreeti bottle"),
    (72, "Figurine of wondrous power (obsidian steed)"),
    (73, "Frost brand"),
    (74, "Helm of brilliance"),
    (75, "Horn of Valhalla (bronze)"),
    (76, "Instrument of the bards (Anstruth harp)"),
    (77, "Ioun stone (absorption)"),
    (78, "Ioun stone (agility)"),
    (79, "Ioun stone (fortitude)"),
    (80, "Ioun stone (insight)"),
    (81, "Ioun stone (intellect)"),
    (82, "Ioun stone (leadership)"),
    (83, "Ioun stone (strength)"),
    (84, "Armor, +2 leather"),
    (85, "Manual of bodily health"),
    (86, "Manual of gainful exercise"),
    (87, "Manual of golems"),
    (88, "Manual of quickness of action"),
    (89, "Mirror of life trapping"),
    (90, "Nine lives stealer"),
    (91, "Oathbow"),
    (92, "Armor, +2 scale mail"),
    (93, "Spellguard shield"),
    (94, "Armor, +1 splint"),
    (95, "Armor of resistance (splint)"),
    (96, "Armor, +1 studded leather"),
    (97, "Armor of resistance (studded leather)"),
    (98, "Tome of clear thought"),
    (99, "Tome of leadership and influence"),
    (100, "Tome of understanding"),
];

const TABLE_I: &[(u32, &str)] = &[
    (5, "Defender"),
    (10, "Hammer of thunderbolts"),
    (15, "Luck blade"),
    (20, "Sword of answering"),
    (23, "Holy avenger"),
    (26, "Ring of djinni summoning"),
    (29, "Ring of invisibility"),
    (32, "Ring of spell turning"),
    (35, "Rod of lordly might"),
    (38, "Staff of the magi"),
    (41, "Vorpal sword"),
    (43, "Belt of cloud giant strength"),
    (45, "Armor, +2 breastplate"),
    (47, "Armor, +3 chain mail"),
    (49, "Armor, +3 chain shirt"),
    (51, "Cloak of invisibility"),
    (53, "Crystal ball (legendary version)"),
    (55, "Armor, +1 half plate"),
    (57, "Iron flask"),
    (59, "Armor, +3 leather"),
    (61, "Armor, +1 plate"),
    (63, "Robe of the archmagi"),
    (65, "Rod of resurrection"),
    (67, "Armor, +1 scale mail"),
    (69, "Scarab of protection"),
    (71, "Armor, +2 splint"),
    (73, "Armor, +2 studded leather"),
    (75, "Well of many worlds"),
    (76, MAGIC_ARMOR),
    (77, "Apparatus of Kwalish"),
    (78, "Armor of invulnerability"),
    (79, "Belt of storm giant strength"),
    (80, "Cubic gate"),
    (81, "Deck of many things"),
    (82, "Efreeti chain"),
    (83, "Armor of resistance (half plate)"),
    (84, "Horn of Valhalla (iron)"),
    (85, "Instrument of the bards (Ollamh harp)"),
    (86, "Ioun stone (greater absorption)"),
    (87, "Ioun stone (mastery)"),
    (88, "Ioun stone (regeneration)"),
    (89, "Plate armor of etherealness"),
    (90, "Armor of resistance (plate)"),
    (91, "Ring of air elemental command"),
    (92, "Ring of earth elemental command"),
    (93, "Ring of fire elemental command"),
    (94, "Ring of three wishes"),
    (95, "Ring of water elemental command"),
    (96, "Sphere of annihilation"),
    (97, "Talisman of pure good"),
    (98, "Talisman of the sphere"),
    (99, "Talisman of ultimate evil"),
    (100, "Tome of the stilled tongue"),
];
