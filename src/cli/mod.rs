//! Interactive text session: reads commands, drives one [`GameState`] and prints
//! the board after every change.

pub mod command;
pub mod render;
pub mod text;

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use crate::engine::models::{GameConfig, Player};
use crate::engine::solver;
use crate::games::hanoi::{ColorAssigner, GameState, SetupError};
use crate::store::{PlayerDirectory, StoreError};
use command::Command;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("player store error: {0}")]
    Store(#[from] StoreError),

    #[error("cannot set up game: {0}")]
    Setup(#[from] SetupError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub game: GameConfig,
    /// Log in as this player without prompting, registering if needed.
    pub nickname: Option<String>,
    pub color: bool,
}

/// One player's sitting at the terminal. Owns the game exclusively.
pub struct Session<R, W> {
    input: Lines<R>,
    out: W,
    directory: PlayerDirectory,
    options: SessionOptions,
    rng: StdRng,
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, out: W, directory: PlayerDirectory, options: SessionOptions) -> Self {
        let rng = match options.game.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            input: input.lines(),
            out,
            directory,
            options,
            rng,
        }
    }

    /// Run until the player quits or input ends. Returns the output sink.
    pub async fn run(mut self) -> Result<W, SessionError> {
        let mut player = match self.options.nickname.clone() {
            Some(nickname) => Arc::new(self.directory.login_or_register(&nickname).await?),
            None => match self.login().await? {
                Some(player) => player,
                None => return Ok(self.out),
            },
        };
        let mut game = self.new_game(&player)?;

        self.say(text::WELCOME).await?;
        self.show(&game).await?;

        while let Some(line) = self.input.next_line().await? {
            let command = match command::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    self.say(&e.to_string()).await?;
                    continue;
                }
            };

            match command {
                Command::Quit => {
                    self.say(text::BYE).await?;
                    break;
                }
                Command::Help => {
                    self.say(text::MANUAL).await?;
                    continue;
                }
                Command::Players => {
                    self.list_players().await?;
                    continue;
                }
                Command::Hint => {
                    self.hint(&game).await?;
                    continue;
                }
                Command::Json => {
                    let json = serde_json::to_string_pretty(&game)?;
                    self.say(&json).await?;
                    continue;
                }
                Command::Login => match self.login().await {
                    Ok(Some(p)) => {
                        player = p;
                        game = self.new_game(&player)?;
                    }
                    Ok(None) => break,
                    Err(SessionError::Store(e)) => {
                        self.say(&format!("failed to login: {}", e)).await?
                    }
                    Err(e) => return Err(e),
                },
                Command::NewGame => game = self.new_game(&player)?,
                Command::Move { from, to } => self.handle_move(&mut game, from, to).await?,
                Command::AutoSolve => self.auto_solve(&mut game).await?,
            }

            self.show(&game).await?;
        }

        Ok(self.out)
    }

    fn new_game(&mut self, player: &Arc<Player>) -> Result<GameState, SetupError> {
        GameState::with_rng(
            self.options.game.pegs,
            self.options.game.disks,
            Some(Arc::clone(player)),
            &mut ColorAssigner::default(),
            &mut self.rng,
        )
    }

    /// Prompt until a player is found or created. `None` when input ends.
    async fn login(&mut self) -> Result<Option<Arc<Player>>, SessionError> {
        loop {
            self.write(text::NAME_PROMPT).await?;
            let Some(line) = self.input.next_line().await? else {
                return Ok(None);
            };
            let nickname = line.trim().to_string();

            match self.directory.get_by_nickname(&nickname).await {
                Ok(player) => return Ok(Some(Arc::new(player))),
                Err(StoreError::NotFound) => {}
                Err(e) => return Err(e.into()),
            }

            self.write(&format!(
                "Player with name {} does not exist. Want to create? (y/n) ",
                nickname
            ))
            .await?;
            let Some(answer) = self.input.next_line().await? else {
                return Ok(None);
            };
            if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "д") {
                continue;
            }

            let id = match self.directory.create(&nickname).await {
                Ok(id) => id,
                Err(e @ (StoreError::Validation { .. } | StoreError::Duplicate { .. })) => {
                    self.say(&e.to_string()).await?;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            let player = self.directory.get_by_id(id).await?;
            return Ok(Some(Arc::new(player)));
        }
    }

    async fn handle_move(
        &mut self,
        game: &mut GameState,
        from: usize,
        to: usize,
    ) -> Result<(), SessionError> {
        if from == to {
            return self.say("X cannot be equal to Y").await;
        }
        let peg_count = game.peg_count();
        if from >= peg_count || to >= peg_count {
            return self
                .say(&format!("X and Y should be in a range [0, {})", peg_count))
                .await;
        }

        if let Err(e) = game.move_disk(from, to) {
            return self.say(&format!("cannot move disk: {}", e)).await;
        }
        self.announce_win(game).await
    }

    async fn hint(&mut self, game: &GameState) -> Result<(), SessionError> {
        match solver::hint(game) {
            Ok(Some(mv)) => self.say(&format!("Try m {} {}", mv.from, mv.to)).await,
            Ok(None) => self.say("Nothing left to do, the tower is complete.").await,
            Err(e) => self.say(&format!("No hint available: {}", e)).await,
        }
    }

    async fn auto_solve(&mut self, game: &mut GameState) -> Result<(), SessionError> {
        let plan = match solver::solve(game) {
            Ok(plan) => plan,
            Err(e) => return self.say(&format!("Cannot solve this board: {}", e)).await,
        };
        for mv in plan {
            if let Err(e) = game.apply(mv) {
                return self.say(&format!("cannot move disk: {}", e)).await;
            }
            self.say(&format!("Moved {}", mv)).await?;
        }
        self.announce_win(game).await
    }

    async fn announce_win(&mut self, game: &GameState) -> Result<(), SessionError> {
        if game.is_won() {
            tracing::info!(player = %game.player().nickname, moves = game.moves(), "game won");
            let message = format!(
                "Congratulations, {}! You've won! Moves: {}",
                game.player().nickname,
                game.moves()
            );
            self.say(&message).await?;
        }
        Ok(())
    }

    async fn list_players(&mut self) -> Result<(), SessionError> {
        match self.directory.list_all().await {
            Ok(players) => {
                for player in &players {
                    self.write(&render::render_player(player)).await?;
                }
                self.out.flush().await?;
                Ok(())
            }
            Err(e) => self.say(&format!("cannot get players: {}", e)).await,
        }
    }

    async fn show(&mut self, game: &GameState) -> Result<(), SessionError> {
        let board = render::render_board(game, self.options.color);
        self.write(&board).await
    }

    async fn say(&mut self, message: &str) -> Result<(), SessionError> {
        self.write(message).await?;
        self.write("\n").await
    }

    async fn write(&mut self, s: &str) -> Result<(), SessionError> {
        self.out.write_all(s.as_bytes()).await?;
        self.out.flush().await?;
        Ok(())
    }
}
