//! Tower of Hanoi: disks, pegs, color assignment and the game state engine.

mod colors;
mod error;
mod state;
mod types;

pub use colors::{ColorAssigner, DEFAULT_PALETTE};
pub use error::{MoveError, PegError, SetupError};
pub use state::GameState;
pub use types::{Disk, DiskColor, Peg};
