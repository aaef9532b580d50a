// conquest_engine — deterministic match simulation for the conquest referee.
//
// This crate holds all game logic and zero I/O: the entity records, the
// Point-in-Time text format, the time-step/battle algorithm, win/draw
// detection, and the replay buffer. The referee crate drives it between
// player exchanges; nothing here touches processes, clocks, or streams.
//
// Module overview:
// - `types.rs`:    PlayerId / PlanetId newtypes and the match Outcome.
// - `planet.rs`:   Planet entity — fixed position and growth rate, mutable
//                  garrison and owner.
// - `fleet.rs`:    Fleet entity — countdown trip, arrive/kill lifecycle.
// - `state.rs`:    GameState — the collections, parse/render, the
//                  point-of-view transform, order application, player drop.
// - `sim.rs`:      One time step (growth, fleet advance, battles) and the
//                  `winner` query.
// - `playback.rs`: The replay string builder.
// - `error.rs`:    ParseError (fatal to initialization) and OrderError
//                  (drops the issuing player).
//
// **Critical constraint: determinism.** The same map and the same order
// sequence must produce the same replay on every run, so every scan whose
// order could leak into results runs over an ordered collection
// (BTreeMap/BTreeSet). No randomness, no system time, no hashing.

pub mod error;
pub mod fleet;
pub mod planet;
pub mod playback;
pub mod sim;
pub mod state;
pub mod types;
