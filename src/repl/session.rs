//! Shell session
//!
//! Executes parsed commands against a shared cache of strings.

use tracing::debug;

use crate::cache::{Clock, SharedCache, SystemClock};
use crate::repl::{Command, Reply};

/// Binds the shell to one cache instance.
#[derive(Debug, Clone)]
pub struct Session<C = SystemClock> {
    cache: SharedCache<String, C>,
}

impl<C: Clock> Session<C> {
    pub fn new(cache: SharedCache<String, C>) -> Self {
        Self { cache }
    }

    /// Returns the cache this session operates on.
    pub fn cache(&self) -> &SharedCache<String, C> {
        &self.cache
    }

    /// Parses and executes one input line.
    ///
    /// Blank lines and lines starting with `#` produce no reply.
    pub fn handle_line(&self, line: &str) -> Option<Reply> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let reply = match line.parse::<Command>() {
            Ok(command) => self.execute(command),
            Err(err) => {
                debug!(error = %err, "Rejected shell input");
                Reply::from(err)
            }
        };
        Some(reply)
    }

    /// Executes a single command.
    pub fn execute(&self, command: Command) -> Reply {
        match command {
            Command::Set { key, value } => {
                self.cache.set(key.clone(), value);
                Reply::Stored { key }
            }
            Command::Get { key } => {
                let value = self.cache.get(&key);
                Reply::Value { key, value }
            }
            Command::Has { key } => {
                let exists = self.cache.has(&key);
                Reply::Exists { key, exists }
            }
            Command::Delete { key } => {
                let deleted = self.cache.delete(&key);
                Reply::Deleted { key, deleted }
            }
            Command::Ttl { key } => {
                let ttl_ms = self
                    .cache
                    .ttl(&key)
                    .map(|left| u64::try_from(left.as_millis()).unwrap_or(u64::MAX));
                Reply::Ttl { key, ttl_ms }
            }
            Command::Clear => {
                self.cache.clear();
                Reply::Cleared
            }
            Command::Size => Reply::Size {
                size: self.cache.size(),
            },
            Command::Stats => Reply::from_stats(&self.cache.stats()),
            Command::Purge => Reply::Purged {
                removed: self.cache.purge_expired(),
            },
            Command::Quit => Reply::Bye,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::config::CacheOptions;

    fn test_session(ttl_ms: u64, max_size: usize) -> (Session<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let cache = SharedCache::with_clock(CacheOptions::from_millis(ttl_ms, max_size), clock.clone());
        (Session::new(cache), clock)
    }

    #[test]
    fn test_set_then_get() {
        let (session, _clock) = test_session(1_000, 10);

        assert_eq!(
            session.handle_line("SET k hello world"),
            Some(Reply::Stored { key: "k".to_string() })
        );
        assert_eq!(
            session.handle_line("GET k"),
            Some(Reply::Value {
                key: "k".to_string(),
                value: Some("hello world".to_string()),
            })
        );
    }

    #[test]
    fn test_blank_and_comment_lines_are_skipped() {
        let (session, _clock) = test_session(1_000, 10);

        assert_eq!(session.handle_line(""), None);
        assert_eq!(session.handle_line("   "), None);
        assert_eq!(session.handle_line("# SET k v"), None);
        assert_eq!(session.cache().size(), 0);
    }

    #[test]
    fn test_has_delete_and_expiry() {
        let (session, clock) = test_session(100, 10);

        session.handle_line("SET k v");
        assert_eq!(
            session.handle_line("HAS k"),
            Some(Reply::Exists { key: "k".to_string(), exists: true })
        );

        clock.advance_ms(101);
        assert_eq!(
            session.handle_line("HAS k"),
            Some(Reply::Exists { key: "k".to_string(), exists: false })
        );
        assert_eq!(
            session.handle_line("DEL k"),
            Some(Reply::Deleted { key: "k".to_string(), deleted: false })
        );
    }

    #[test]
    fn test_ttl_command() {
        let (session, clock) = test_session(1_000, 10);

        session.handle_line("SET k v");
        clock.advance_ms(250);

        assert_eq!(
            session.handle_line("TTL k"),
            Some(Reply::Ttl { key: "k".to_string(), ttl_ms: Some(750) })
        );
        assert_eq!(
            session.handle_line("TTL missing"),
            Some(Reply::Ttl { key: "missing".to_string(), ttl_ms: None })
        );
    }

    #[test]
    fn test_size_clear_purge() {
        let (session, clock) = test_session(100, 10);

        session.handle_line("SET a 1");
        session.handle_line("SET b 2");
        assert_eq!(session.handle_line("SIZE"), Some(Reply::Size { size: 2 }));

        clock.advance_ms(101);
        assert_eq!(session.handle_line("PURGE"), Some(Reply::Purged { removed: 2 }));

        session.handle_line("SET c 3");
        assert_eq!(session.handle_line("CLEAR"), Some(Reply::Cleared));
        assert_eq!(session.handle_line("SIZE"), Some(Reply::Size { size: 0 }));
    }

    #[test]
    fn test_invalid_input_replies_with_error() {
        let (session, _clock) = test_session(100, 10);

        match session.handle_line("FROB x") {
            Some(Reply::Error { error }) => assert!(error.contains("FROB")),
            other => panic!("expected error reply, got {:?}", other),
        }
    }

    #[test]
    fn test_stats_and_quit() {
        let (session, _clock) = test_session(1_000, 1);

        session.handle_line("SET a 1");
        session.handle_line("SET b 2");
        session.handle_line("GET a");

        match session.handle_line("STATS") {
            Some(Reply::Stats { misses, evictions, total_entries, .. }) => {
                assert_eq!(misses, 1);
                assert_eq!(evictions, 1);
                assert_eq!(total_entries, 1);
            }
            other => panic!("expected stats reply, got {:?}", other),
        }
        assert_eq!(session.execute(Command::Quit), Reply::Bye);
    }
}
