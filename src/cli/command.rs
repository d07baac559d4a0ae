//! Parsing of one line of player input.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move { from: usize, to: usize },
    NewGame,
    Login,
    Players,
    Hint,
    AutoSolve,
    Json,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Oops, empty input! Type 'h' for help.")]
    Empty,

    #[error("Move command requires two peg numbers")]
    MissingPegs,

    #[error("Seems like {which} is not a peg number: '{value}'")]
    NotANumber { which: &'static str, value: String },

    #[error("Unknown command '{0}'. Type 'h' for help.")]
    Unknown(String),
}

/// Commands are matched on the first whitespace-separated token, case-insensitively.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let mut tokens = line.split_whitespace();
    let Some(head) = tokens.next() else {
        return Err(ParseError::Empty);
    };

    match head.to_lowercase().as_str() {
        "m" => {
            let (Some(x), Some(y)) = (tokens.next(), tokens.next()) else {
                return Err(ParseError::MissingPegs);
            };
            Ok(Command::Move {
                from: peg_number("X", x)?,
                to: peg_number("Y", y)?,
            })
        }
        "n" => Ok(Command::NewGame),
        "l" => Ok(Command::Login),
        "p" => Ok(Command::Players),
        "s" => Ok(Command::Hint),
        "a" => Ok(Command::AutoSolve),
        "j" => Ok(Command::Json),
        "h" => Ok(Command::Help),
        "q" => Ok(Command::Quit),
        _ => Err(ParseError::Unknown(head.to_string())),
    }
}

fn peg_number(which: &'static str, token: &str) -> Result<usize, ParseError> {
    token.parse().map_err(|_| ParseError::NotANumber {
        which,
        value: token.to_string(),
    })
}
