//! Shell commands
//!
//! Parses one input line into a [`Command`].

use std::str::FromStr;

use crate::error::{CacheError, Result};

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// A single parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `SET <key> <value...>`
    Set { key: String, value: String },
    /// `GET <key>`
    Get { key: String },
    /// `HAS <key>`
    Has { key: String },
    /// `DEL <key>`
    Delete { key: String },
    /// `TTL <key>`
    Ttl { key: String },
    /// `CLEAR`
    Clear,
    /// `SIZE`
    Size,
    /// `STATS`
    Stats,
    /// `PURGE`
    Purge,
    /// `QUIT`
    Quit,
}

impl FromStr for Command {
    type Err = CacheError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim_start()),
            None => (line, ""),
        };

        match verb.to_ascii_uppercase().as_str() {
            "SET" => {
                let (key, value) = rest.split_once(char::is_whitespace).ok_or_else(|| {
                    CacheError::InvalidCommand("SET expects a key and a value".to_string())
                })?;
                Ok(Command::Set {
                    key: validate_key(key)?,
                    value: value.trim_start().to_string(),
                })
            }
            "GET" => Ok(Command::Get {
                key: single_key("GET", rest)?,
            }),
            "HAS" => Ok(Command::Has {
                key: single_key("HAS", rest)?,
            }),
            "DEL" | "DELETE" => Ok(Command::Delete {
                key: single_key("DEL", rest)?,
            }),
            "TTL" => Ok(Command::Ttl {
                key: single_key("TTL", rest)?,
            }),
            "CLEAR" => no_args("CLEAR", rest, Command::Clear),
            "SIZE" => no_args("SIZE", rest, Command::Size),
            "STATS" => no_args("STATS", rest, Command::Stats),
            "PURGE" => no_args("PURGE", rest, Command::Purge),
            "QUIT" | "EXIT" => no_args("QUIT", rest, Command::Quit),
            "" => Err(CacheError::InvalidCommand("empty command".to_string())),
            other => Err(CacheError::InvalidCommand(format!(
                "unknown command '{}'",
                other
            ))),
        }
    }
}

fn single_key(verb: &str, rest: &str) -> Result<String> {
    if rest.is_empty() || rest.contains(char::is_whitespace) {
        return Err(CacheError::InvalidCommand(format!(
            "{} expects exactly one key",
            verb
        )));
    }
    validate_key(rest)
}

fn no_args(verb: &str, rest: &str, command: Command) -> Result<Command> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(CacheError::InvalidCommand(format!(
            "{} takes no arguments",
            verb
        )))
    }
}

fn validate_key(key: &str) -> Result<String> {
    if key.is_empty() {
        return Err(CacheError::InvalidCommand("Key cannot be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidCommand(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(key.to_string())
}
