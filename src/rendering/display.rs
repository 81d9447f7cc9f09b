//! # Display Management
//!
//! Plain-text map rendering for terminals and logs.
//!
//! Each coarse cell is drawn as a `k x k` block of fine cells (`k` is the
//! fine density) framed by one-character wall slots:
//!
//! ```text
//! #########
//! #...'...#
//! #.v.'.!.#
//! #...'...#
//! #########
//! ```
//!
//! Walls are `#`, closed doors `+` and open doors `'`. Obscured cells are
//! left blank.

use crate::game::{CoarsePos, Difficulty, EntityMarker};
use crate::generation::{WallRef, WallState};
use crate::rendering::{DungeonSnapshot, Renderer};
use crate::DungeonResult;
use std::io::{Stdout, Write};

const WALL: char = '#';
const CLOSED_DOOR: char = '+';
const OPEN_DOOR: char = '\'';
const FLOOR: char = '.';
const FOG: char = ' ';

/// Glyph for an entity marker. The party is drawn by its facing instead.
pub fn marker_glyph(marker: EntityMarker) -> char {
    match marker {
        EntityMarker::Party => '@',
        EntityMarker::TreasureHoard => '$',
        EntityMarker::TreasureChest(_) => '=',
        EntityMarker::Trap { .. } => '!',
        EntityMarker::Encounter(difficulty) => match difficulty {
            Difficulty::Trivial => 't',
            Difficulty::Easy => 'e',
            Difficulty::Medium => 'm',
            Difficulty::Hard => 'h',
            Difficulty::Deadly | Difficulty::TooHard => 'D',
        },
    }
}

/// Text renderer writing to any [`Write`] sink.
pub struct AsciiDisplay<W: Write = Stdout> {
    out: W,
    /// Message history
    pub messages: Vec<String>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
    /// Messages shown under the map
    pub shown_messages: usize,
}

impl AsciiDisplay<Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> AsciiDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            messages: Vec::new(),
            max_messages: 100,
            shown_messages: 3,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);

        if self.messages.len() > self.max_messages {
            let excess = self.messages.len() - self.max_messages;
            self.messages.drain(..excess);
        }
    }
}

/// Draws the map of a snapshot as lines of text.
///
/// # Examples
///
/// ```
/// use delve::{render_map, DungeonSession, DungeonSnapshot, GenerationConfig};
///
/// let session = DungeonSession::new(GenerationConfig::for_testing(1)).unwrap();
/// let snapshot = DungeonSnapshot::capture(&session, true);
/// let map = render_map(&snapshot);
/// assert_eq!(map.lines().count(), 10 * 4 + 1);
/// ```
pub fn render_map(snapshot: &DungeonSnapshot) -> String {
    let k = snapshot.fine_density;
    let (rows, cols) = (snapshot.rows, snapshot.cols);
    let height = rows * (k + 1) + 1;
    let width = cols * (k + 1) + 1;
    let mut canvas = vec![vec![WALL; width]; height];

    for row in 0..rows {
        for col in 0..cols {
            let pos = CoarsePos::new(row, col);
            let fill = if snapshot.is_visible(pos) { FLOOR } else { FOG };
            for dr in 0..k {
                for dc in 0..k {
                    canvas[row * (k + 1) + 1 + dr][col * (k + 1) + 1 + dc] = fill;
                }
            }
        }
    }

    for slot in snapshot.walls.slots() {
        let (a, b) = slot.cells();
        let glyph = if snapshot.is_visible(a) || snapshot.is_visible(b) {
            slot_glyph(snapshot.walls.get(slot))
        } else {
            FOG
        };
        match slot {
            WallRef::Vertical { row, col } => {
                let x = (col + 1) * (k + 1);
                for dr in 0..k {
                    canvas[row * (k + 1) + 1 + dr][x] = glyph;
                }
            }
            WallRef::Horizontal { row, col } => {
                let y = (row + 1) * (k + 1);
                for dc in 0..k {
                    canvas[y][col * (k + 1) + 1 + dc] = glyph;
                }
            }
        }
    }

    for &(fine, marker) in &snapshot.entities {
        let coarse = fine.to_coarse(k);
        let y = coarse.row * (k + 1) + 1 + fine.row % k;
        let x = coarse.col * (k + 1) + 1 + fine.col % k;
        canvas[y][x] = match marker {
            EntityMarker::Party => snapshot.party.facing.glyph(),
            other => marker_glyph(other),
        };
    }

    let mut text = String::with_capacity(height * (width + 1));
    for line in canvas {
        text.extend(line);
        text.push('\n');
    }
    text
}

/// One-line summary under the map.
pub fn status_line(snapshot: &DungeonSnapshot) -> String {
    let stats = &snapshot.statistics;
    format!(
        "Seed {} | {} | steps {} | doors opened {} | encounters won {} | damage taken {}",
        snapshot.seed,
        snapshot.state,
        stats.steps_taken,
        stats.doors_opened,
        stats.encounters_won,
        stats.damage_taken
    )
}

pub fn legend() -> &'static str {
    "v^<> party  e/m/h/D encounter  ! trap  = chest  $ hoard  # wall  + door  ' open door"
}

fn slot_glyph(state: WallState) -> char {
    match state {
        WallState::Open => FLOOR,
        WallState::Wall => WALL,
        WallState::ClosedDoor => CLOSED_DOOR,
        WallState::OpenDoor => OPEN_DOOR,
    }
}

impl<W: Write> Renderer for AsciiDisplay<W> {
    fn render(&mut self, snapshot: &DungeonSnapshot) -> DungeonResult<()> {
        write!(self.out, "{}", render_map(snapshot))?;
        writeln!(self.out, "{}", legend())?;
        writeln!(self.out, "{}", status_line(snapshot))?;

        let start = self.messages.len().saturating_sub(self.shown_messages);
        for message in &self.messages[start..] {
            writeln!(self.out, "{message}")?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn show_message(&mut self, message: &str) -> DungeonResult<()> {
        writeln!(self.out, "{message}")?;
        self.add_message(message.to_string());
        Ok(())
    }
}
