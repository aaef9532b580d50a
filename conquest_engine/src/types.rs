// Core identifier and outcome types shared across the engine.
//
// Ids are compact integer newtypes, not opaque handles: seat numbers and
// planet ids both appear literally in the wire format and the replay, so
// the inner value is public and `Display` prints it bare.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Owner of a planet or fleet. Seat numbers are 1-based; `PlayerId(0)` is
/// the reserved neutral owner and never corresponds to a connected player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// The reserved "no one" owner.
    pub const NEUTRAL: PlayerId = PlayerId(0);

    pub fn is_neutral(self) -> bool {
        self == Self::NEUTRAL
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dense 0-based planet identifier, assigned by order of appearance in the
/// map text and fixed for the whole match. Doubles as the index into
/// `GameState::planets`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlanetId(pub usize);

impl fmt::Display for PlanetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of win/draw detection after a time step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Two or more players remain and the turn limit has not passed.
    Undecided,
    /// Nobody holds the lead, or nobody remains at all.
    Draw,
    /// The named player is the sole survivor or holds the strict lead.
    Winner(PlayerId),
}
