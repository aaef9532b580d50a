// Line-oriented framing for the player protocol.
//
// Each turn the referee writes one state block to the player's input: the
// rendered state lines followed by the sentinel line. The player answers
// with zero or more order lines followed by its own sentinel line. The
// sentinel comparison trims and ignores ASCII case, so `go`, ` GO ` and
// `Go` all terminate a message; payload lines pass through untouched.

use std::io::{self, Write};

/// The token that terminates each direction of a turn exchange.
pub const SENTINEL: &str = "go";

/// Write one framed state block: the state text, a sentinel line, and a
/// flush so the player sees the whole message at once.
pub fn write_state_block<W: Write>(writer: &mut W, state_text: &str) -> io::Result<()> {
    writer.write_all(state_text.as_bytes())?;
    if !state_text.is_empty() && !state_text.ends_with('\n') {
        writer.write_all(b"\n")?;
    }
    writer.write_all(SENTINEL.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// True if `line` is a sentinel line.
pub fn is_sentinel(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(SENTINEL)
}
