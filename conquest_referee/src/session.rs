// Per-player protocol session: one framed exchange at a time.
//
// Architecture: one reader thread per player (spawned by
// `spawn_line_reader`) reads newline-terminated lines from the player's
// output stream and forwards them over an `mpsc` channel. The session owns
// the player's input stream and the channel receiver; `exchange` writes the
// framed state, then collects lines with `recv_timeout` against a deadline
// — the channel timeout doubles as the turn timer, so there is no separate
// timer thread.
//
// An exchange moves Idle → AwaitingResponse → one of:
// - Completed:    the sentinel line arrived; the accumulated payload lines
//                 are returned in receive order.
// - WriteFailed:  the state block could not be written (no timer started).
// - TimedOut:     the deadline passed before the sentinel.
// - Disconnected: the player's output stream closed before the sentinel.
//
// Lines already buffered when an exchange starts are discarded: a player
// that keeps talking after its sentinel must not have that chatter read
// back as next turn's orders. Lines arriving after a timeout stay in the
// channel and never reach game state — the referee drops and kills a
// timed-out player, so the session is not used again.

use std::error::Error;
use std::fmt;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use conquest_protocol::framing;

/// Why an exchange produced no response.
#[derive(Debug)]
pub enum ExchangeError {
    /// Writing the state block to the player's input failed.
    WriteFailed(io::Error),
    /// The sentinel line did not arrive within the time budget.
    TimedOut,
    /// The player's output stream closed before the sentinel line.
    Disconnected,
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeError::WriteFailed(err) => write!(f, "write to player failed: {err}"),
            ExchangeError::TimedOut => write!(f, "response timed out"),
            ExchangeError::Disconnected => write!(f, "player output closed"),
        }
    }
}

impl Error for ExchangeError {}

/// One player's half of the protocol: its input stream plus the line
/// channel its reader thread feeds.
#[derive(Debug)]
pub struct ProtocolSession<W: Write> {
    input: W,
    lines: Receiver<String>,
}

impl<W: Write> ProtocolSession<W> {
    pub fn new(input: W, lines: Receiver<String>) -> Self {
        Self { input, lines }
    }

    /// Run one framed exchange: send `state_text` plus the sentinel, then
    /// collect response lines until the player's sentinel or the deadline.
    /// Payload lines keep their original content; only the sentinel
    /// comparison trims and ignores case. Taking `&mut self` keeps at most
    /// one exchange outstanding per session.
    pub fn exchange(
        &mut self,
        state_text: &str,
        timeout: Duration,
    ) -> Result<Vec<String>, ExchangeError> {
        // Stale lines from before this exchange are not orders for it.
        while self.lines.try_recv().is_ok() {}

        framing::write_state_block(&mut self.input, state_text)
            .map_err(ExchangeError::WriteFailed)?;

        let deadline = Instant::now() + timeout;
        let mut collected = Vec::new();
        loop {
            let Some(remaining) = deadline.checked_duration_since(Instant::now()) else {
                return Err(ExchangeError::TimedOut);
            };
            match self.lines.recv_timeout(remaining) {
                Ok(line) if framing::is_sentinel(&line) => return Ok(collected),
                Ok(line) => collected.push(line),
                Err(RecvTimeoutError::Timeout) => return Err(ExchangeError::TimedOut),
                Err(RecvTimeoutError::Disconnected) => return Err(ExchangeError::Disconnected),
            }
        }
    }
}

/// Spawn the reader thread for one player: forwards each line from
/// `source` into the returned channel until EOF, a read error, or the
/// receiving session going away.
pub fn spawn_line_reader<R: Read + Send + 'static>(source: R) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in BufReader::new(source).lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
