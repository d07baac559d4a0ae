//! Disk and peg primitives for Tower of Hanoi.
//!
//! A peg is a plain stack: it knows nothing about the size rule. Legality is
//! checked by [`GameState`](super::state::GameState) before anything moves.

use serde::{Deserialize, Serialize};

use super::error::PegError;

/// Cosmetic disk color. Carries no game meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiskColor {
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
}

impl DiskColor {
    /// RGBA components, alpha is fixed at 100.
    pub fn rgba(self) -> [u8; 4] {
        match self {
            DiskColor::Red => [255, 0, 0, 100],
            DiskColor::Orange => [255, 100, 0, 100],
            DiskColor::Yellow => [255, 255, 0, 100],
            DiskColor::Green => [0, 255, 0, 100],
            DiskColor::Cyan => [0, 255, 150, 100],
            DiskColor::Blue => [0, 0, 255, 100],
            DiskColor::Purple => [150, 0, 255, 100],
        }
    }

    /// 24-bit ANSI foreground escape for terminal rendering.
    pub fn ansi_fg(self) -> String {
        let [r, g, b, _] = self.rgba();
        format!("\x1b[38;2;{};{};{}m", r, g, b)
    }
}

/// A single ring. `size` is unique within a game and runs `1..=disk_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disk {
    pub size: usize,
    pub color: DiskColor,
}

impl Disk {
    pub fn new(size: usize, color: DiskColor) -> Self {
        Self { size, color }
    }
}

/// A stack of disks. Index 0 is the bottom, the last element is the top.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peg {
    disks: Vec<Disk>,
}

impl Peg {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return the top disk.
    pub fn grab(&mut self) -> Result<Disk, PegError> {
        self.disks.pop().ok_or(PegError::Empty)
    }

    /// Push a disk on top. No size check happens here.
    pub fn put(&mut self, disk: Disk) {
        self.disks.push(disk);
    }

    pub fn top(&self) -> Option<&Disk> {
        self.disks.last()
    }

    pub fn len(&self) -> usize {
        self.disks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    /// Disks from top to bottom.
    pub fn disks(&self) -> impl DoubleEndedIterator<Item = &Disk> + ExactSizeIterator + '_ {
        self.disks.iter().rev()
    }

    /// True when every disk sits on a disk at least as large as itself.
    pub fn is_sorted(&self) -> bool {
        self.disks.windows(2).all(|w| w[0].size >= w[1].size)
    }
}
