//! # Encounter Generation
//!
//! Party composition, the monster/player dataset seam and the generator
//! that fills an encounter with monsters until it reaches a difficulty tier.
//!
//! Difficulty is judged the usual way: monster XP is summed, scaled by a
//! multiplier that grows with the number of monsters, and compared against
//! the party's summed per-level thresholds.

use crate::game::Difficulty;
use crate::{DungeonError, DungeonResult};
use log::debug;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Adventuring party: character level to number of characters at that level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub members: BTreeMap<u32, u32>,
}

impl Party {
    pub fn new(members: BTreeMap<u32, u32>) -> Self {
        Self { members }
    }

    /// Parses `level:count` pairs separated by commas, e.g. `3:4,5:1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::generation::Party;
    ///
    /// let party = Party::parse("3:4,5:1").unwrap();
    /// assert_eq!(party.size(), 5);
    /// assert!((party.average_level() - 3.4).abs() < 1e-9);
    /// ```
    pub fn parse(text: &str) -> DungeonResult<Self> {
        let mut members = BTreeMap::new();
        for pair in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (level, count) = pair.split_once(':').ok_or_else(|| {
                DungeonError::InvalidArgument(format!("expected level:count, got '{pair}'"))
            })?;
            let level: u32 = level.trim().parse().map_err(|_| {
                DungeonError::InvalidArgument(format!("bad party level '{level}'"))
            })?;
            let count: u32 = count.trim().parse().map_err(|_| {
                DungeonError::InvalidArgument(format!("bad party count '{count}'"))
            })?;
            *members.entry(level).or_insert(0) += count;
        }
        let party = Self { members };
        party.validate()?;
        Ok(party)
    }

    pub fn size(&self) -> u32 {
        self.members.values().sum()
    }

    /// Mean character level, weighted by count.
    pub fn average_level(&self) -> f64 {
        let size = self.size();
        if size == 0 {
            return 0.0;
        }
        let total: u32 = self
            .members
            .iter()
            .map(|(level, count)| level * count)
            .sum();
        f64::from(total) / f64::from(size)
    }

    pub fn validate(&self) -> DungeonResult<()> {
        if self.size() == 0 {
            return Err(DungeonError::InvalidConfig(
                "party must have at least one member".to_string(),
            ));
        }
        if let Some(level) = self.members.keys().find(|&&level| !(1..=20).contains(&level)) {
            return Err(DungeonError::InvalidConfig(format!(
                "character level {level} is outside 1-20"
            )));
        }
        Ok(())
    }
}

impl Default for Party {
    fn default() -> Self {
        Self {
            members: BTreeMap::from([(3, 4)]),
        }
    }
}

/// A monster with its challenge rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterEntry {
    pub name: String,
    pub cr: f64,
}

/// Per-character XP thresholds for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpThresholds {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
    pub deadly: u32,
}

impl XpThresholds {
    /// Classifies an adjusted monster XP total.
    ///
    /// Anything at or beyond `deadly + (deadly - hard)` is too hard.
    pub fn classify(&self, xp: f64) -> Difficulty {
        let (easy, medium, hard, deadly) = (
            f64::from(self.easy),
            f64::from(self.medium),
            f64::from(self.hard),
            f64::from(self.deadly),
        );
        if xp < easy {
            Difficulty::Trivial
        } else if xp < medium {
            Difficulty::Easy
        } else if xp < hard {
            Difficulty::Medium
        } else if xp < deadly {
            Difficulty::Hard
        } else if xp < deadly + (deadly - hard) {
            Difficulty::Deadly
        } else {
            Difficulty::TooHard
        }
    }

    fn add(self, other: XpThresholds, times: u32) -> Self {
        Self {
            easy: self.easy + other.easy * times,
            medium: self.medium + other.medium * times,
            hard: self.hard + other.hard * times,
            deadly: self.deadly + other.deadly * times,
        }
    }
}

/// Source of monsters and player XP thresholds.
pub trait StatsDataset {
    fn monsters(&self) -> &[MonsterEntry];

    fn thresholds(&self, level: u32) -> Option<XpThresholds>;
}

/// XP awarded for a challenge rating, or `None` for an unknown rating.
pub fn cr_to_xp(cr: f64) -> Option<u32> {
    const FRACTIONAL: [(f64, u32); 4] = [(0.0, 10), (0.125, 25), (0.25, 50), (0.5, 100)];
    const WHOLE: [u32; 30] = [
        200, 450, 700, 1100, 1800, 2300, 2900, 3900, 5000, 5900, 7200, 8400, 10000, 11500, 13000,
        15000, 18000, 20000, 22000, 25000, 33000, 41000, 50000, 62000, 75000, 90000, 105000,
        120000, 135000, 155000,
    ];

    if let Some(&(_, xp)) = FRACTIONAL.iter().find(|(rating, _)| (cr - rating).abs() < 1e-9) {
        return Some(xp);
    }
    if cr.fract().abs() < 1e-9 && (1.0..=30.0).contains(&cr) {
        return WHOLE.get(cr as usize - 1).copied();
    }
    None
}

/// Multiplier applied to summed XP for a group of `count` monsters.
pub fn monster_count_multiplier(count: u32) -> f64 {
    match count {
        0..=1 => 1.0,
        2 => 1.5,
        3..=6 => 2.0,
        7..=10 => 2.5,
        11..=14 => 3.0,
        _ => 4.0,
    }
}

const PLAYER_THRESHOLDS: [(u32, u32, u32, u32); 20] = [
    (25, 50, 75, 100),
    (50, 100, 150, 200),
    (75, 150, 225, 400),
    (125, 250, 375, 500),
    (250, 500, 750, 1100),
    (300, 600, 900, 1400),
    (350, 750, 1100, 1700),
    (450, 900, 1400, 2100),
    (550, 1100, 1600, 2400),
    (600, 1200, 1900, 2800),
    (800, 1600, 2400, 3600),
    (1000, 2000, 3000, 4500),
    (1100, 2200, 3400, 5100),
    (1250, 2500, 3800, 5700),
    (1400, 2800, 4300, 6400),
    (1600, 3200, 4800, 7200),
    (2000, 3900, 5900, 8800),
    (2100, 4200, 6300, 9500),
    (2400, 4900, 7300, 10900),
    (2800, 5700, 8500, 12700),
];

const BUILTIN_MONSTERS: &[(&str, f64)] = &[
    ("Rat", 0.0),
    ("Bat", 0.0),
    ("Kobold", 0.125),
    ("Giant Rat", 0.125),
    ("Bandit", 0.125),
    ("Cultist", 0.125),
    ("Goblin", 0.25),
    ("Skeleton", 0.25),
    ("Zombie", 0.25),
    ("Wolf", 0.25),
    ("Orc", 0.5),
    ("Hobgoblin", 0.5),
    ("Gnoll", 0.5),
    ("Shadow", 0.5),
    ("Bugbear", 1.0),
    ("Ghoul", 1.0),
    ("Giant Spider", 1.0),
    ("Dire Wolf", 1.0),
    ("Ogre", 2.0),
    ("Gargoyle", 2.0),
    ("Gelatinous Cube", 2.0),
    ("Wererat", 2.0),
    ("Owlbear", 3.0),
    ("Minotaur", 3.0),
    ("Mummy", 3.0),
    ("Wight", 3.0),
    ("Ghost", 4.0),
    ("Black Pudding", 4.0),
    ("Flameskull", 4.0),
    ("Troll", 5.0),
    ("Hill Giant", 5.0),
    ("Air Elemental", 5.0),
    ("Wyvern", 6.0),
    ("Medusa", 6.0),
    ("Stone Giant", 7.0),
    ("Young Green Dragon", 8.0),
    ("Hydra", 8.0),
    ("Fire Giant", 9.0),
    ("Bone Devil", 9.0),
    ("Young Red Dragon", 10.0),
    ("Stone Golem", 10.0),
    ("Remorhaz", 11.0),
    ("Archmage", 12.0),
    ("Adult White Dragon", 13.0),
    ("Adult Black Dragon", 14.0),
    ("Mummy Lord", 15.0),
    ("Iron Golem", 16.0),
    ("Adult Red Dragon", 17.0),
    ("Demilich", 18.0),
    ("Balor", 19.0),
    ("Ancient White Dragon", 20.0),
    ("Pit Fiend", 20.0),
];

fn builtin_thresholds() -> BTreeMap<u32, XpThresholds> {
    PLAYER_THRESHOLDS
        .iter()
        .enumerate()
        .map(|(i, &(easy, medium, hard, deadly))| {
            (
                i as u32 + 1,
                XpThresholds {
                    easy,
                    medium,
                    hard,
                    deadly,
                },
            )
        })
        .collect()
}

/// Monster list plus per-level thresholds.
///
/// JSON files may omit `thresholds`, in which case the standard table is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterTable {
    pub monsters: Vec<MonsterEntry>,
    #[serde(default = "builtin_thresholds")]
    pub thresholds: BTreeMap<u32, XpThresholds>,
}

impl MonsterTable {
    /// A small SRD monster list with the standard threshold table.
    pub fn builtin() -> Self {
        Self {
            monsters: BUILTIN_MONSTERS
                .iter()
                .map(|&(name, cr)| MonsterEntry {
                    name: name.to_string(),
                    cr,
                })
                .collect(),
            thresholds: builtin_thresholds(),
        }
    }

    pub fn from_json_str(text: &str) -> DungeonResult<Self> {
        let table: Self = serde_json::from_str(text)?;
        table.validate()?;
        Ok(table)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> DungeonResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    fn validate(&self) -> DungeonResult<()> {
        if self.monsters.is_empty() {
            return Err(DungeonError::InvalidConfig(
                "monster table is empty".to_string(),
            ));
        }
        if let Some(monster) = self.monsters.iter().find(|m| cr_to_xp(m.cr).is_none()) {
            return Err(DungeonError::InvalidArgument(format!(
                "monster '{}' has unknown challenge rating {}",
                monster.name, monster.cr
            )));
        }
        Ok(())
    }
}

impl Default for MonsterTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StatsDataset for MonsterTable {
    fn monsters(&self) -> &[MonsterEntry] {
        &self.monsters
    }

    fn thresholds(&self, level: u32) -> Option<XpThresholds> {
        self.thresholds.get(&level).copied()
    }
}

/// Sums per-character thresholds over the whole party.
pub fn party_thresholds(dataset: &dyn StatsDataset, party: &Party) -> DungeonResult<XpThresholds> {
    let zero = XpThresholds {
        easy: 0,
        medium: 0,
        hard: 0,
        deadly: 0,
    };
    party.members.iter().try_fold(zero, |total, (&level, &count)| {
        let per_character = dataset.thresholds(level).ok_or_else(|| {
            DungeonError::InvalidConfig(format!("no XP thresholds for level {level}"))
        })?;
        Ok(total.add(per_character, count))
    })
}

/// Builds monster groups for a target difficulty.
#[derive(Debug, Clone)]
pub struct EncounterGenerator {
    party: Party,
    /// Full restarts when no monster fits the remaining budget
    pub max_restarts: u32,
    /// Monster picks per attempt before restarting
    pub max_picks: u32,
}

impl EncounterGenerator {
    pub fn new(party: Party) -> Self {
        Self {
            party,
            max_restarts: 100,
            max_picks: 200,
        }
    }

    /// Adjusted XP of a composition given as `(monster index, count)` pairs.
    fn adjusted_xp(monsters: &[MonsterEntry], picked: &BTreeMap<usize, u32>) -> f64 {
        let (xp, count) = picked.iter().fold((0u64, 0u32), |(xp, count), (&i, &n)| {
            let each = cr_to_xp(monsters[i].cr).unwrap_or(0);
            (xp + u64::from(each) * u64::from(n), count + n)
        });
        xp as f64 * monster_count_multiplier(count)
    }

    /// Generates a monster name to count map classified exactly as `target`.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        dataset: &dyn StatsDataset,
        target: Difficulty,
        rng: &mut R,
    ) -> DungeonResult<BTreeMap<String, u32>> {
        let thresholds = party_thresholds(dataset, &self.party)?;
        let level = self.party.average_level();
        let monsters = dataset.monsters();
        let eligible: Vec<usize> = (0..monsters.len())
            .filter(|&i| monsters[i].cr <= level && cr_to_xp(monsters[i].cr).is_some())
            .collect();

        if eligible.is_empty() {
            return Err(DungeonError::GenerationFailed(format!(
                "no monsters at or below challenge rating {level:.2}"
            )));
        }

        let classify = |picked: &BTreeMap<usize, u32>| {
            thresholds.classify(Self::adjusted_xp(monsters, picked))
        };

        for restart in 0..self.max_restarts {
            let mut picked: BTreeMap<usize, u32> = BTreeMap::new();
            let mut available = eligible.clone();

            for _ in 0..self.max_picks {
                if classify(&picked) >= target {
                    break;
                }

                available.retain(|&i| {
                    let mut trial = picked.clone();
                    trial.insert(i, 1);
                    classify(&trial) <= target
                });
                if available.is_empty() {
                    break;
                }

                let choice = Self::weighted_pick(monsters, &available, rng);
                picked.insert(choice, 1);

                let mut most = 1;
                while classify(&picked) < target && most < self.max_picks * 10 {
                    most += 1;
                    picked.insert(choice, most);
                }
                if classify(&picked) > target {
                    most -= 1;
                }
                picked.insert(choice, rng.gen_range(1..=most.max(1)));
            }

            if classify(&picked) == target {
                debug!(
                    "{target} encounter built on attempt {} with {} monster kind(s)",
                    restart + 1,
                    picked.len()
                );
                return Ok(picked
                    .into_iter()
                    .map(|(i, count)| (monsters[i].name.clone(), count))
                    .collect());
            }
        }

        Err(DungeonError::GenerationFailed(format!(
            "could not build a {target} encounter in {} attempts",
            self.max_restarts
        )))
    }

    /// Picks a monster with probability proportional to its challenge rating.
    fn weighted_pick<R: Rng + ?Sized>(
        monsters: &[MonsterEntry],
        available: &[usize],
        rng: &mut R,
    ) -> usize {
        match WeightedIndex::new(available.iter().map(|&i| monsters[i].cr)) {
            Ok(weights) => available[weights.sample(rng)],
            Err(_) => available.choose(rng).copied().unwrap_or(available[0]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_party_average_level() {
        let party = Party::new(BTreeMap::from([(2, 2), (4, 2)]));
        assert_eq!(party.size(), 4);
        assert!((party.average_level() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_party_parse_rejects_garbage() {
        assert!(Party::parse("3-4").is_err());
        assert!(Party::parse("x:1").is_err());
        assert!(Party::parse("25:1").is_err());
        assert!(Party::parse("").is_err());
    }

    #[test]
    fn test_cr_to_xp() {
        assert_eq!(cr_to_xp(0.0), Some(10));
        assert_eq!(cr_to_xp(0.125), Some(25));
        assert_eq!(cr_to_xp(1.0), Some(200));
        assert_eq!(cr_to_xp(20.0), Some(25000));
        assert_eq!(cr_to_xp(30.0), Some(155000));
        assert_eq!(cr_to_xp(0.3), None);
        assert_eq!(cr_to_xp(31.0), None);
    }

    #[test]
    fn test_monster_count_multiplier() {
        assert_eq!(monster_count_multiplier(1), 1.0);
        assert_eq!(monster_count_multiplier(2), 1.5);
        assert_eq!(monster_count_multiplier(6), 2.0);
        assert_eq!(monster_count_multiplier(7), 2.5);
        assert_eq!(monster_count_multiplier(14), 3.0);
        assert_eq!(monster_count_multiplier(15), 4.0);
    }

    #[test]
    fn test_classification_boundaries() {
        let table = MonsterTable::builtin();
        let thresholds = table.thresholds(3).unwrap();
        assert_eq!(thresholds.classify(74.0), Difficulty::Trivial);
        assert_eq!(thresholds.classify(75.0), Difficulty::Easy);
        assert_eq!(thresholds.classify(150.0), Difficulty::Medium);
        assert_eq!(thresholds.classify(225.0), Difficulty::Hard);
        assert_eq!(thresholds.classify(400.0), Difficulty::Deadly);
        assert_eq!(thresholds.classify(574.0), Difficulty::Deadly);
        assert_eq!(thresholds.classify(575.0), Difficulty::TooHard);
    }

    #[test]
    fn test_party_thresholds_sum() {
        let table = MonsterTable::builtin();
        let party = Party::new(BTreeMap::from([(1, 2), (2, 1)]));
        let total = party_thresholds(&table, &party).unwrap();
        assert_eq!(total.easy, 100);
        assert_eq!(total.deadly, 400);
    }

    #[test]
    fn test_generated_encounters_hit_their_tier() {
        let table = MonsterTable::builtin();
        let party = Party::default();
        let generator = EncounterGenerator::new(party.clone());
        let thresholds = party_thresholds(&table, &party).unwrap();
        let mut rng = StdRng::seed_from_u64(31);

        for target in Difficulty::ENCOUNTER_TIERS {
            let composition = generator.generate(&table, target, &mut rng).unwrap();
            assert!(!composition.is_empty());

            let (xp, count) = composition.iter().fold((0u32, 0u32), |(xp, n), (name, c)| {
                let cr = table.monsters.iter().find(|m| &m.name == name).unwrap().cr;
                (xp + cr_to_xp(cr).unwrap() * c, n + c)
            });
            let adjusted = f64::from(xp) * monster_count_multiplier(count);
            assert_eq!(thresholds.classify(adjusted), target);
        }
    }

    #[test]
    fn test_monsters_respect_party_level() {
        let table = MonsterTable::builtin();
        let party = Party::new(BTreeMap::from([(2, 4)]));
        let generator = EncounterGenerator::new(party);
        let mut rng = StdRng::seed_from_u64(8);

        let composition = generator.generate(&table, Difficulty::Hard, &mut rng).unwrap();
        for name in composition.keys() {
            let cr = table.monsters.iter().find(|m| &m.name == name).unwrap().cr;
            assert!(cr <= 2.0);
        }
    }

    #[test]
    fn test_json_table_uses_default_thresholds() {
        let table =
            MonsterTable::from_json_str(r#"{"monsters": [{"name": "Slime", "cr": 0.5}]}"#).unwrap();
        assert_eq!(table.monsters.len(), 1);
        assert_eq!(table.thresholds(20).unwrap().deadly, 12700);

        assert!(MonsterTable::from_json_str(r#"{"monsters": [{"name": "X", "cr": 0.3}]}"#).is_err());
        assert!(MonsterTable::from_json_str(r#"{"monsters": []}"#).is_err());
    }

    #[test]
    fn test_no_eligible_monsters_fails() {
        let table = MonsterTable {
            monsters: vec![MonsterEntry {
                name: "Tarrasque".to_string(),
                cr: 30.0,
            }],
            thresholds: builtin_thresholds(),
        };
        let generator = EncounterGenerator::new(Party::default());
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            generator.generate(&table, Difficulty::Easy, &mut rng),
            Err(DungeonError::GenerationFailed(_))
        ));
    }
}
