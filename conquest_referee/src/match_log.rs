// Optional append-only match log.
//
// A match can leave a plain-text trail: every order line received and every
// drop with its reason. The log is an aid for post-mortems, never a
// dependency of the match — an open failure disables it with a warning and
// individual write failures are swallowed.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::warn;

/// Append-only plain-text log for one match. One message per line.
pub struct MatchLog {
    file: Option<File>,
}

impl MatchLog {
    /// Create or truncate the log file at `path`.
    pub fn open(path: &Path) -> MatchLog {
        match File::create(path) {
            Ok(file) => MatchLog { file: Some(file) },
            Err(err) => {
                warn!("match log {} unavailable: {err}", path.display());
                MatchLog { file: None }
            }
        }
    }

    /// A log that drops every message (no path configured).
    pub fn disabled() -> MatchLog {
        MatchLog { file: None }
    }

    /// Append one message. Write failures are ignored.
    pub fn write(&mut self, message: &str) {
        if let Some(file) = &mut self.file {
            let _ = writeln!(file, "{message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn writes_one_message_per_line() {
        let path = std::env::temp_dir().join("conquest_match_log_lines.log");
        let mut log = MatchLog::open(&path);
        log.write("initializing");
        log.write("player 2 dropped: response timed out");
        drop(log);
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "initializing\nplayer 2 dropped: response timed out\n"
        );
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn open_truncates_an_existing_file() {
        let path = std::env::temp_dir().join("conquest_match_log_trunc.log");
        fs::write(&path, "stale contents\n").unwrap();
        let mut log = MatchLog::open(&path);
        log.write("fresh");
        drop(log);
        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn disabled_log_swallows_writes() {
        let mut log = MatchLog::disabled();
        log.write("nowhere");
    }
}
