//! Game state: owns the pegs, counts moves and decides legality and wins.

use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::colors::ColorAssigner;
use super::error::{MoveError, SetupError};
use super::types::{Disk, Peg};
use crate::engine::models::{Move, Player};

/// One Tower of Hanoi session.
///
/// Invariants held between calls:
/// - disk sizes across all pegs are exactly `1..=disk_count`, each once;
/// - the per-peg counts sum to `disk_count`;
/// - `moves` only grows, by one per successful [`GameState::move_disk`].
///
/// Access is single-writer; the session that owns the state drives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameState")]
pub struct GameState {
    pegs: Vec<Peg>,
    disk_count: usize,
    moves: u64,
    player: Arc<Player>,
}

/// Wire shape of [`GameState`]; checked before it becomes one.
#[derive(Deserialize)]
struct RawGameState {
    pegs: Vec<Peg>,
    disk_count: usize,
    moves: u64,
    player: Arc<Player>,
}

impl TryFrom<RawGameState> for GameState {
    type Error = SetupError;

    fn try_from(raw: RawGameState) -> Result<Self, SetupError> {
        if raw.pegs.is_empty() {
            return Err(SetupError::InvalidPegCount(0));
        }
        if raw.disk_count < 1 {
            return Err(SetupError::InvalidDiskCount(raw.disk_count));
        }
        check_sizes(
            raw.pegs.iter().flat_map(|p| p.disks().map(|d| d.size)),
            raw.disk_count,
        )?;

        Ok(Self {
            pegs: raw.pegs,
            disk_count: raw.disk_count,
            moves: raw.moves,
            player: raw.player,
        })
    }
}

/// Sizes must be exactly `1..=disk_count`, each once.
fn check_sizes(sizes: impl Iterator<Item = usize>, disk_count: usize) -> Result<(), SetupError> {
    let mut seen = vec![false; disk_count + 1];
    let mut total = 0;
    for size in sizes {
        if size == 0 || size > disk_count || seen[size] {
            return Err(SetupError::InvalidLayout { disk_count });
        }
        seen[size] = true;
        total += 1;
    }
    if total != disk_count {
        return Err(SetupError::InvalidLayout { disk_count });
    }
    Ok(())
}

impl GameState {
    /// Set up a game with disks scattered over random pegs.
    pub fn new(
        peg_count: usize,
        disk_count: usize,
        player: Option<Arc<Player>>,
        colors: &mut ColorAssigner,
    ) -> Result<Self, SetupError> {
        Self::with_rng(peg_count, disk_count, player, colors, &mut rand::thread_rng())
    }

    /// Disks are created largest first, each pushed on top of a uniformly chosen peg,
    /// and take one color each from `colors`.
    pub fn with_rng<R: Rng + ?Sized>(
        peg_count: usize,
        disk_count: usize,
        player: Option<Arc<Player>>,
        colors: &mut ColorAssigner,
        rng: &mut R,
    ) -> Result<Self, SetupError> {
        let player = player.ok_or(SetupError::MissingPlayer)?;
        if peg_count < 1 {
            return Err(SetupError::InvalidPegCount(peg_count));
        }
        if disk_count < 1 {
            return Err(SetupError::InvalidDiskCount(disk_count));
        }

        let mut pegs = vec![Peg::new(); peg_count];
        for size in (1..=disk_count).rev() {
            let disk = Disk::new(size, colors.next_color());
            pegs[rng.gen_range(0..peg_count)].put(disk);
        }

        tracing::info!(
            pegs = peg_count,
            disks = disk_count,
            player = %player.nickname,
            "new game"
        );

        Ok(Self {
            pegs,
            disk_count,
            moves: 0,
            player,
        })
    }

    /// Build a game from an explicit layout. Each inner slice lists one peg's
    /// disk sizes from top to bottom.
    pub fn from_layout(
        layout: &[&[usize]],
        player: Option<Arc<Player>>,
        colors: &mut ColorAssigner,
    ) -> Result<Self, SetupError> {
        let player = player.ok_or(SetupError::MissingPlayer)?;
        if layout.is_empty() {
            return Err(SetupError::InvalidPegCount(0));
        }
        let disk_count: usize = layout.iter().map(|p| p.len()).sum();
        if disk_count < 1 {
            return Err(SetupError::InvalidDiskCount(0));
        }

        check_sizes(layout.iter().flat_map(|p| p.iter().copied()), disk_count)?;

        let pegs = layout
            .iter()
            .map(|sizes| {
                let mut peg = Peg::new();
                for &size in sizes.iter().rev() {
                    peg.put(Disk::new(size, colors.next_color()));
                }
                peg
            })
            .collect();

        Ok(Self {
            pegs,
            disk_count,
            moves: 0,
            player,
        })
    }

    /// Move the top disk of `from` onto `to`.
    ///
    /// A move onto an empty peg is always legal. `from == to` is not rejected here
    /// and counts as a move.
    pub fn move_disk(&mut self, from: usize, to: usize) -> Result<(), MoveError> {
        let peg_count = self.pegs.len();
        for index in [from, to] {
            if index >= peg_count {
                tracing::debug!(index, peg_count, "move rejected: out of range");
                return Err(MoveError::OutOfRange { index, peg_count });
            }
        }

        if let (Some(moving), Some(resting)) = (self.pegs[from].top(), self.pegs[to].top()) {
            if moving.size > resting.size {
                tracing::debug!(
                    moving = moving.size,
                    resting = resting.size,
                    "move rejected: bigger on smaller"
                );
                return Err(MoveError::IllegalMove {
                    moving: moving.size,
                    resting: resting.size,
                });
            }
        }

        let disk = self.pegs[from]
            .grab()
            .map_err(|source| MoveError::EmptyPeg { peg: from, source })?;
        self.pegs[to].put(disk);
        self.moves += 1;

        tracing::debug!(from, to, size = disk.size, moves = self.moves, "disk moved");
        Ok(())
    }

    pub fn apply(&mut self, mv: Move) -> Result<(), MoveError> {
        self.move_disk(mv.from, mv.to)
    }

    /// Won when exactly one peg holds disks and they are ordered smallest on top.
    pub fn is_won(&self) -> bool {
        let mut occupied = self.pegs.iter().filter(|p| !p.is_empty());
        match (occupied.next(), occupied.next()) {
            (Some(peg), None) => peg.is_sorted(),
            _ => false,
        }
    }

    pub fn pegs(&self) -> &[Peg] {
        &self.pegs
    }

    pub fn peg(&self, index: usize) -> Option<&Peg> {
        self.pegs.get(index)
    }

    pub fn peg_count(&self) -> usize {
        self.pegs.len()
    }

    pub fn disk_count(&self) -> usize {
        self.disk_count
    }

    pub fn moves(&self) -> u64 {
        self.moves
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Index of the peg holding `size`, if any.
    pub fn peg_of(&self, size: usize) -> Option<usize> {
        self.pegs
            .iter()
            .position(|p| p.disks().any(|d| d.size == size))
    }
}
