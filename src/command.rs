//! Client command parsing
//!
//! Commands are a closed set, parsed from lines that start with `/`.
//! Anything the parser does not recognize is an unknown-command error;
//! lines without the marker never reach this module as commands.

use crate::error::ChatError;

/// A parsed client command
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Join { room: String },
    Create { room: String },
    Help,
}

impl Command {
    /// Parse a trimmed `/`-prefixed line
    ///
    /// The room argument is the first whitespace-delimited token after
    /// the command word. Missing arguments are usage errors.
    pub fn parse(line: &str) -> Result<Self, ChatError> {
        let Some(rest) = line.strip_prefix('/') else {
            return Err(ChatError::UnknownCommand);
        };

        let (cmd, args) = rest
            .split_once(' ')
            .map(|(c, a)| (c, a.trim()))
            .unwrap_or((rest, ""));

        match cmd {
            "join" => match args.split_whitespace().next() {
                Some(room) => Ok(Command::Join {
                    room: room.to_string(),
                }),
                None => Err(ChatError::Usage("/join [room_name]")),
            },
            "create" => match args.split_whitespace().next() {
                Some(room) => Ok(Command::Create {
                    room: room.to_string(),
                }),
                None => Err(ChatError::Usage("/create [room_name]")),
            },
            "help" => Ok(Command::Help),
            _ => Err(ChatError::UnknownCommand),
        }
    }
}
