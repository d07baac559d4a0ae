/// Failures of the raw stack primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PegError {
    #[error("peg is empty")]
    Empty,
}

/// Errors that abort building a new game. Nothing is constructed when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("player cannot be absent")]
    MissingPlayer,

    #[error("peg count must be >= 1, got {0}")]
    InvalidPegCount(usize),

    #[error("disk count must be >= 1, got {0}")]
    InvalidDiskCount(usize),

    #[error("disk sizes must be exactly 1..={disk_count}, each once")]
    InvalidLayout { disk_count: usize },
}

/// A rejected move. The game state is untouched when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("peg {index} is out of range [0, {peg_count})")]
    OutOfRange { index: usize, peg_count: usize },

    #[error("cannot put disk {moving} on top of smaller disk {resting}")]
    IllegalMove { moving: usize, resting: usize },

    #[error("cannot grab disk from peg {peg}: {source}")]
    EmptyPeg {
        peg: usize,
        #[source]
        source: PegError,
    },
}
