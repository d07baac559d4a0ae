//! Deterministic color sequence handed out one disk at a time during setup.

use super::types::DiskColor;

pub const DEFAULT_PALETTE: [DiskColor; 7] = [
    DiskColor::Red,
    DiskColor::Orange,
    DiskColor::Yellow,
    DiskColor::Green,
    DiskColor::Cyan,
    DiskColor::Blue,
    DiskColor::Purple,
];

/// Cycles through a fixed palette. Cannot be rewound; build a new one to restart.
#[derive(Debug, Clone)]
pub struct ColorAssigner {
    palette: Vec<DiskColor>,
    cursor: usize,
}

impl ColorAssigner {
    /// Falls back to [`DEFAULT_PALETTE`] when `palette` is empty.
    pub fn new(palette: Vec<DiskColor>) -> Self {
        let palette = if palette.is_empty() {
            DEFAULT_PALETTE.to_vec()
        } else {
            palette
        };
        Self { palette, cursor: 0 }
    }

    pub fn next_color(&mut self) -> DiskColor {
        let color = self.palette[self.cursor];
        self.cursor = (self.cursor + 1) % self.palette.len();
        color
    }
}

impl Default for ColorAssigner {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE.to_vec())
    }
}

impl Iterator for ColorAssigner {
    type Item = DiskColor;

    fn next(&mut self) -> Option<DiskColor> {
        Some(self.next_color())
    }
}
