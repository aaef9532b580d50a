// conquest_referee — match orchestration for the conquest contest.
//
// This crate runs matches: it spawns one child process per player, speaks
// the line protocol from `conquest_protocol` over each player's standard
// streams, applies validated orders to the `conquest_engine` state, steps
// the simulation once per turn, and settles the verdict.
//
// Module overview:
// - `session.rs`:   ProtocolSession — one framed exchange at a time, the
//                   per-player reader thread, and the `recv_timeout` turn
//                   timer.
// - `player.rs`:    PlayerProcess — spawn/kill one player program, with
//                   stderr forwarded into the diagnostic log.
// - `referee.rs`:   MatchConfig / run_match — the Init → Running →
//                   Finished match loop.
// - `match_log.rs`: the optional append-only match-log file.
//
// The referee runs as a standalone binary (`main.rs`) or embedded through
// `run_match`, which is also how the integration tests in `match_tests`
// drive full matches.

pub mod match_log;
pub mod player;
pub mod referee;
pub mod session;

pub use referee::run_match;
