//! Command Shell Module
//!
//! Line-oriented front end over a [`SharedCache`](crate::cache::SharedCache) of
//! strings. One command per input line, one JSON reply per output line.
//!
//! # Commands
//! - `SET <key> <value...>` - Store a value (rest of the line)
//! - `GET <key>` - Retrieve a value
//! - `HAS <key>` - Check whether a key is live
//! - `DEL <key>` - Delete a key
//! - `TTL <key>` - Milliseconds left before a key expires
//! - `CLEAR` - Remove every entry
//! - `SIZE` - Count live entries
//! - `STATS` - Report hit/miss/eviction/expiration counters
//! - `PURGE` - Sweep expired entries now
//! - `QUIT` - End the session

mod command;
mod reply;
mod session;

pub use command::{Command, MAX_KEY_LENGTH};
pub use reply::Reply;
pub use session::Session;

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

use crate::cache::Clock;
use crate::error::CacheError;

/// Reads commands from `reader` until EOF or `QUIT`, writing replies to `writer`.
///
/// A line that is not valid UTF-8 gets an error reply and the session goes on.
/// Returns the number of replies written.
pub async fn run<R, W, C>(mut reader: R, mut writer: W, session: &Session<C>) -> io::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    C: Clock,
{
    let mut buf = Vec::new();
    let mut replies = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let reply = match std::str::from_utf8(&buf) {
            Ok(line) => session.handle_line(line),
            Err(_) => Some(Reply::from(CacheError::InvalidCommand(
                "input line is not valid UTF-8".to_string(),
            ))),
        };
        let Some(reply) = reply else {
            continue;
        };

        writer.write_all(reply.to_line().as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        replies += 1;

        if reply.is_closing() {
            info!("Session closed by QUIT");
            break;
        }
    }

    Ok(replies)
}
