//! Move planner used for hints and auto-play.
//!
//! Works from any position whose pegs are each sorted, which is every position a
//! game can reach: setup pushes the largest disks first and moves never put a
//! bigger disk on a smaller one. The largest disk not yet on the target is moved
//! there after everything smaller is parked on a spare peg.

use crate::engine::models::Move;
use crate::games::hanoi::GameState;

/// Plans are exponential in the disk count; refuse beyond this.
pub const MAX_PLAN_DISKS: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SolveError {
    #[error("need at least 3 pegs to plan moves, got {0}")]
    TooFewPegs(usize),

    #[error("peg {0} is not sorted")]
    UnsortedPeg(usize),

    #[error("target peg {target} is out of range [0, {peg_count})")]
    TargetOutOfRange { target: usize, peg_count: usize },

    #[error("refusing to plan for {0} disks (max {max})", max = MAX_PLAN_DISKS)]
    TooManyDisks(usize),
}

/// Sequence of legal moves that stacks every disk on `target`, smallest on top.
/// Empty when the disks are already there.
pub fn plan_moves(state: &GameState, target: usize) -> Result<Vec<Move>, SolveError> {
    let peg_count = state.peg_count();
    if target >= peg_count {
        return Err(SolveError::TargetOutOfRange { target, peg_count });
    }
    if let Some(peg) = state.pegs().iter().position(|p| !p.is_sorted()) {
        return Err(SolveError::UnsortedPeg(peg));
    }

    // location[size] = peg currently holding that disk
    let mut location = vec![target; state.disk_count() + 1];
    for (index, peg) in state.pegs().iter().enumerate() {
        for disk in peg.disks() {
            location[disk.size] = index;
        }
    }

    if location[1..].iter().all(|&peg| peg == target) {
        return Ok(Vec::new());
    }
    if peg_count < 3 {
        return Err(SolveError::TooFewPegs(peg_count));
    }
    if state.disk_count() > MAX_PLAN_DISKS {
        return Err(SolveError::TooManyDisks(state.disk_count()));
    }

    let mut moves = Vec::new();
    gather(state.disk_count(), target, &mut location, &mut moves);
    Ok(moves)
}

/// Next move toward a solved board, gathering on the peg that holds the largest disk.
/// `None` once the game is won.
pub fn hint(state: &GameState) -> Result<Option<Move>, SolveError> {
    if state.is_won() {
        return Ok(None);
    }
    let target = state.peg_of(state.disk_count()).unwrap_or(0);
    Ok(plan_moves(state, target)?.into_iter().next())
}

/// Full plan toward the peg holding the largest disk.
pub fn solve(state: &GameState) -> Result<Vec<Move>, SolveError> {
    if state.is_won() {
        return Ok(Vec::new());
    }
    let target = state.peg_of(state.disk_count()).unwrap_or(0);
    plan_moves(state, target)
}

fn gather(size: usize, target: usize, location: &mut [usize], moves: &mut Vec<Move>) {
    if size == 0 {
        return;
    }
    let from = location[size];
    if from == target {
        gather(size - 1, target, location, moves);
        return;
    }

    let spare = spare_peg(from, target);
    gather(size - 1, spare, location, moves);
    moves.push(Move::new(from, target));
    location[size] = target;
    gather(size - 1, target, location, moves);
}

/// Lowest peg index other than `a` and `b`.
fn spare_peg(a: usize, b: usize) -> usize {
    match (a.min(b), a.max(b)) {
        (0, 1) => 2,
        (0, _) => 1,
        _ => 0,
    }
}
