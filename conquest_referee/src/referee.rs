// Match orchestration: spawn the players, drive the turn loop, settle the
// verdict.
//
// The orchestrator is a state machine over one mutable `GameState`:
//
// - Init:     parse the map, seed the replay, spawn one process per player
//             command (seat number = spawn order + 1). Any spawn failure
//             tears down the processes spawned so far and aborts the match.
// - Running:  each turn, serve every live player in ascending seat order —
//             render its point-of-view state, exchange, apply its order
//             lines — then step the simulator (which appends the replay
//             fragment). A malformed or illegal order drops the player
//             from the game; a protocol failure (timeout, broken pipe,
//             closed stream) also costs it its process.
// - Finished: kill the remaining processes and hand back the verdict, the
//             turn count, and the full replay string.
//
// Players are served sequentially within a turn, so a turn's wall-clock
// cost is the sum of the live players' response times. Orders are applied
// strictly in the order their lines arrived, and game state is touched only
// between exchanges on this thread — the reader threads never see it.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use conquest_engine::error::ParseError;
use conquest_engine::playback::Playback;
use conquest_engine::sim;
use conquest_engine::state::GameState;
use conquest_engine::types::{Outcome, PlanetId, PlayerId};
use conquest_protocol::order::Order;
use log::{debug, info, warn};

use crate::match_log::MatchLog;
use crate::player::PlayerProcess;

/// Everything needed to run one match.
#[derive(Clone, Debug)]
pub struct MatchConfig {
    /// Map text in the Point-in-Time format.
    pub map_data: String,
    /// Wall-clock budget for each player's exchange, per turn.
    pub turn_timeout: Duration,
    /// Turn limit; past it the largest fleet total wins.
    pub max_turns: u32,
    /// Match-log path; `None` disables the log.
    pub log_path: Option<PathBuf>,
    /// One launch command per player, in seat order. At least two.
    pub player_commands: Vec<String>,
}

/// The settled match.
#[derive(Clone, Debug)]
pub struct MatchResult {
    /// `Winner(seat)` or `Draw` — never `Undecided`.
    pub outcome: Outcome,
    /// Time steps simulated.
    pub turns: u32,
    /// The complete replay string.
    pub playback: String,
}

/// Fatal initialization failures. Per-player failures never surface here;
/// they drop the player and the match continues.
#[derive(Debug)]
pub enum MatchError {
    /// The map text failed to parse; nothing was spawned or simulated.
    MalformedState(ParseError),
    /// A player process failed to spawn; already-spawned players were
    /// terminated.
    SpawnFailure { command: String, source: io::Error },
    /// Fewer than two player commands were configured.
    TooFewPlayers(usize),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::MalformedState(err) => write!(f, "malformed map: {err}"),
            MatchError::SpawnFailure { command, source } => {
                write!(f, "failed to start player {command:?}: {source}")
            }
            MatchError::TooFewPlayers(count) => {
                write!(f, "a match needs at least 2 players, got {count}")
            }
        }
    }
}

impl Error for MatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MatchError::MalformedState(err) => Some(err),
            MatchError::SpawnFailure { source, .. } => Some(source),
            MatchError::TooFewPlayers(_) => None,
        }
    }
}

/// Run one match to its verdict.
pub fn run_match(config: &MatchConfig) -> Result<MatchResult, MatchError> {
    if config.player_commands.len() < 2 {
        return Err(MatchError::TooFewPlayers(config.player_commands.len()));
    }

    let mut match_log = match &config.log_path {
        Some(path) => MatchLog::open(path),
        None => MatchLog::disabled(),
    };
    match_log.write("initializing");

    let mut state = GameState::parse(&config.map_data).map_err(MatchError::MalformedState)?;
    let mut playback = Playback::new(&state);

    let mut players = spawn_players(&config.player_commands)?;
    info!(
        "match started: {} players, {} planets",
        players.len(),
        state.planets.len()
    );

    let mut turns = 0u32;
    let outcome = loop {
        match sim::winner(&state, turns, config.max_turns) {
            Outcome::Undecided => {}
            decided => break decided,
        }

        for player in &mut players {
            if !player.is_running() || !state.is_alive(player.id) {
                continue;
            }
            let rendered = state.render(Some(player.id));
            match player.session.exchange(&rendered, config.turn_timeout) {
                Ok(lines) => {
                    apply_orders(&mut state, &mut match_log, player.id, &lines);
                }
                Err(err) => {
                    warn!("player {}: {err}", player.id);
                    match_log.write(&format!("player {} dropped: {err}", player.id));
                    state.drop_player(player.id);
                    player.kill();
                }
            }
        }

        turns += 1;
        sim::step(&mut state, &mut playback);
        debug!("turn {turns} complete");
    };

    for player in &mut players {
        player.kill();
    }

    let verdict = match outcome {
        Outcome::Winner(seat) => format!("player {seat} wins"),
        _ => "draw".to_string(),
    };
    info!("{verdict} after {turns} turns");
    match_log.write(&format!("finished: {verdict} after {turns} turns"));

    Ok(MatchResult {
        outcome,
        turns,
        playback: playback.into_string(),
    })
}

/// Spawn every player in seat order. On any failure, kill what was already
/// spawned and abort the match.
fn spawn_players(commands: &[String]) -> Result<Vec<PlayerProcess>, MatchError> {
    let mut players = Vec::with_capacity(commands.len());
    for (seat, command) in commands.iter().enumerate() {
        let id = PlayerId(seat as u32 + 1);
        match PlayerProcess::spawn(command, id) {
            Ok(player) => players.push(player),
            Err(source) => {
                for player in &mut players {
                    player.kill();
                }
                return Err(MatchError::SpawnFailure {
                    command: command.clone(),
                    source,
                });
            }
        }
    }
    Ok(players)
}

/// Apply one exchange's order lines in receive order. The first malformed
/// or illegal line drops the player; its remaining lines are discarded.
fn apply_orders(state: &mut GameState, match_log: &mut MatchLog, id: PlayerId, lines: &[String]) {
    for line in lines {
        match_log.write(&format!("player {id} > referee: {line}"));
        let order = match line.parse::<Order>() {
            Ok(order) => order,
            Err(err) => {
                warn!("player {id} sent a malformed order {line:?}: {err}");
                match_log.write(&format!("player {id} dropped: malformed order: {err}"));
                state.drop_player(id);
                return;
            }
        };
        if let Err(err) = state.issue_order(
            id,
            PlanetId(order.source as usize),
            PlanetId(order.dest as usize),
            order.ships,
        ) {
            warn!("player {id} sent an illegal order {order}: {err}");
            match_log.write(&format!("player {id} dropped: illegal order: {err}"));
            state.drop_player(id);
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(map: &str, players: &[&str]) -> MatchConfig {
        MatchConfig {
            map_data: map.to_string(),
            turn_timeout: Duration::from_millis(500),
            max_turns: 10,
            log_path: None,
            player_commands: players.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn rejects_fewer_than_two_players() {
        let err = run_match(&config("P 0 0 1 5 1\n", &["only-one"])).unwrap_err();
        assert!(matches!(err, MatchError::TooFewPlayers(1)));
    }

    #[test]
    fn malformed_map_fails_before_any_spawn() {
        // The commands are not runnable; a parse failure must come first.
        let err = run_match(&config("P 0 0 1\n", &["./nope", "./nope"])).unwrap_err();
        assert!(matches!(err, MatchError::MalformedState(_)));
    }

    #[test]
    fn spawn_failure_aborts_the_match() {
        let err = run_match(&config(
            "P 0 0 1 5 1\nP 1 1 2 5 1\n",
            &["./no-such-bot", "./no-such-bot"],
        ))
        .unwrap_err();
        assert!(matches!(err, MatchError::SpawnFailure { .. }));
    }
}
