// conquest_protocol — wire vocabulary for the referee ↔ player protocol.
//
// The protocol is plain text over a player process's standard streams:
// - Referee → player: the rendered game state (the engine's Point-in-Time
//   format), one entity per line, terminated by the sentinel line `go`.
// - Player → referee: zero or more order lines (`source dest ships`),
//   terminated by the player's own sentinel line.
//
// Module overview:
// - `framing.rs`: the sentinel constant, the state-block writer, and the
//   sentinel line test.
// - `order.rs`:   the `Order` message and its strict line parser.
//
// This crate is independent of the engine and of process management — pure
// types plus `Write`-generic framing, so the referee and any Rust-side
// tooling can share it without pulling in the simulation.

pub mod framing;
pub mod order;
