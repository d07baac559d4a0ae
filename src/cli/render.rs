//! Plain-text board and player rendering.

use std::fmt::Write;

use crate::engine::models::Player;
use crate::games::hanoi::GameState;

const RESET: &str = "\x1b[0m";

/// One column per peg, one row per disk level, top row first. Empty slots are `|`.
pub fn render_board(state: &GameState, color: bool) -> String {
    let columns: Vec<Vec<String>> = state
        .pegs()
        .iter()
        .map(|peg| {
            peg.disks()
                .rev()
                .map(|disk| {
                    if color {
                        format!("{}{}{}", disk.color.ansi_fg(), disk.size, RESET)
                    } else {
                        disk.size.to_string()
                    }
                })
                .collect()
        })
        .collect();

    let mut out = String::new();
    for level in (0..state.disk_count()).rev() {
        let row: Vec<&str> = columns
            .iter()
            .map(|column| column.get(level).map(String::as_str).unwrap_or("|"))
            .collect();
        let _ = writeln!(out, "{}", row.join("\t"));
    }

    let labels: Vec<String> = (0..state.peg_count()).map(|i| format!("Peg #{}", i)).collect();
    let _ = writeln!(out, "{}", labels.join("\t"));
    let _ = writeln!(out, "Moves: {}", state.moves());
    out
}

pub fn render_player(player: &Player) -> String {
    format!("ID:\t{}\nNick:\t{}\n", player.id, player.nickname)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::engine::models::PlayerId;
    use crate::games::hanoi::ColorAssigner;

    fn layout(pegs: &[&[usize]]) -> GameState {
        let player = Some(Arc::new(Player::new(PlayerId(1), "Bobbb")));
        GameState::from_layout(pegs, player, &mut ColorAssigner::default()).unwrap()
    }

    #[test]
    fn test_render_board_plain() {
        let state = layout(&[&[1, 3], &[], &[2]]);
        let expected = "|\t|\t|\n1\t|\t|\n3\t|\t2\nPeg #0\tPeg #1\tPeg #2\nMoves: 0\n";
        assert_eq!(render_board(&state, false), expected);
    }

    #[test]
    fn test_render_board_colored() {
        let state = layout(&[&[1]]);
        let rendered = render_board(&state, true);
        assert!(rendered.starts_with("\x1b[38;2;255;0;0m1\x1b[0m\n"));
    }

    #[test]
    fn test_render_player() {
        let player = Player::new(PlayerId(124), "Danno");
        assert_eq!(render_player(&player), "ID:\t124\nNick:\tDanno\n");
    }
}
