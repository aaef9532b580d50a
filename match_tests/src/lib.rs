// Test-only fixtures for full-match integration tests.
//
// The scenarios in `tests/full_match.rs` exercise the real referee code
// paths end to end: real child processes (the scripted bots under
// `src/bin/`), real pipes, real timeouts. Everything here is shared fixture
// data plus the config builder; no test double replaces a production
// component.
//
// The bots deliberately use nothing but std: they stand in for contestant
// programs, which may be written in any language and see only the text
// protocol.

use std::time::Duration;

use conquest_referee::referee::MatchConfig;

/// Two symmetric home planets three time steps apart — the standard duel
/// map: equal garrisons, equal growth.
pub const DUEL_MAP: &str = "\
P 0 0 1 50 5
P 0 3 2 50 5
";

/// Build a match config for `map` with the given player commands.
pub fn match_config(
    map: &str,
    players: &[&str],
    timeout: Duration,
    max_turns: u32,
) -> MatchConfig {
    MatchConfig {
        map_data: map.to_string(),
        turn_timeout: timeout,
        max_turns,
        log_path: None,
        player_commands: players.iter().map(|s| s.to_string()).collect(),
    }
}
