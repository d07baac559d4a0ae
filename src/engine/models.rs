//! Core engine data types shared by the game, the player store and the CLI.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque id assigned by a player store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub i64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub nickname: String,
}

impl Player {
    pub fn new(id: PlayerId, nickname: impl Into<String>) -> Self {
        Self {
            id,
            nickname: nickname.into(),
        }
    }
}

/// Shape of a game to set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub pegs: usize,
    pub disks: usize,
    /// Seed for the initial disk scatter. `None` draws from the thread RNG.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pegs: 3,
            disks: 5,
            random_seed: None,
        }
    }
}

/// A move of the top disk of `from` onto `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

impl Move {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
