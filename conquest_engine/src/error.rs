// Typed errors for state parsing and order validation.
//
// The referee's error taxonomy keeps two tiers apart: a `ParseError` means
// the map/state text is unusable and the match never initializes, while an
// `OrderError` is local to one player — the referee logs it and drops the
// player, and the match continues.

use std::error::Error;
use std::fmt;

use crate::types::{PlanetId, PlayerId};

/// The state/map text could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line number of the offending line.
    pub line: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl Error for ParseError {}

/// A well-formed order that the rules forbid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderError {
    /// The source planet is not owned by the issuing player.
    NotOwner {
        planet: PlanetId,
        owner: PlayerId,
        player: PlayerId,
    },
    /// More ships requested than the source planet garrisons.
    InsufficientShips {
        planet: PlanetId,
        requested: u32,
        available: u32,
    },
    /// A planet id outside the map's dense 0..N range.
    UnknownPlanet(PlanetId),
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderError::NotOwner {
                planet,
                owner,
                player,
            } => write!(
                f,
                "planet {planet} is owned by {owner}, not by player {player}"
            ),
            OrderError::InsufficientShips {
                planet,
                requested,
                available,
            } => write!(
                f,
                "planet {planet} garrisons {available} ships, {requested} requested"
            ),
            OrderError::UnknownPlanet(planet) => write!(f, "no planet with id {planet}"),
        }
    }
}

impl Error for OrderError {}
