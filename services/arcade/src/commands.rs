use thiserror::Error;

/// A line typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Flip(usize),
    NewGame,
    Prices,
    Wallet,
    MarketStart,
    MarketStop,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Bad card index: {0}")]
    BadIndex(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

impl Command {
    /// Parse one input line. Empty lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };
        let arg = words.next();
        if words.next().is_some() {
            return Err(CommandError::Unknown(line.trim().to_string()));
        }

        let command = match (head.to_ascii_lowercase().as_str(), arg) {
            ("flip" | "f", Some(index)) => Command::Flip(
                index
                    .parse()
                    .map_err(|_| CommandError::BadIndex(index.to_string()))?,
            ),
            ("flip" | "f", None) => return Err(CommandError::Usage("flip <index>")),
            ("new" | "n", None) => Command::NewGame,
            ("prices" | "p", None) => Command::Prices,
            ("wallet" | "w", None) => Command::Wallet,
            ("market", Some("start")) => Command::MarketStart,
            ("market", Some("stop")) => Command::MarketStop,
            ("market", _) => return Err(CommandError::Usage("market start|stop")),
            ("help" | "h" | "?", None) => Command::Help,
            ("quit" | "q" | "exit", None) => Command::Quit,
            // A bare number flips that card
            (other, None) => match other.parse::<usize>() {
                Ok(index) => Command::Flip(index),
                Err(_) => return Err(CommandError::Unknown(line.trim().to_string())),
            },
            _ => return Err(CommandError::Unknown(line.trim().to_string())),
        };
        Ok(Some(command))
    }
}

pub const HELP: &str = "\
Commands:
  flip <n> | <n>     turn over card n (0-based)
  new                deal a new board
  prices             show current coin prices
  wallet             show holdings and total value
  market start|stop  start or stop the price feed
  quit               leave the arcade";
