// The player → referee message: one movement order per line.
//
// Wire form: `<source> <dest> <ships>` — exactly three whitespace-separated
// base-10 integers. Parsing is strict: extra or missing tokens, signs, and
// non-numeric garbage all fail with `OrderParseError` rather than being
// coerced. The referee treats any parse failure as grounds to drop the
// sending player, so there is no lenient mode.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single movement order: launch `ships` from planet `source` to `dest`.
/// Planet ids are raw wire integers here; the engine validates them against
/// the map when the order is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub source: u32,
    pub dest: u32,
    pub ships: u32,
}

/// The order line could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderParseError {
    /// The line did not contain exactly three tokens.
    WrongTokenCount(usize),
    /// A token was not a plain non-negative integer.
    InvalidToken(String),
}

impl fmt::Display for OrderParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderParseError::WrongTokenCount(count) => {
                write!(f, "expected 3 tokens, found {count}")
            }
            OrderParseError::InvalidToken(token) => {
                write!(f, "invalid integer token {token:?}")
            }
        }
    }
}

impl Error for OrderParseError {}

impl FromStr for Order {
    type Err = OrderParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let (Some(source), Some(dest), Some(ships), None) =
            (tokens.next(), tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(OrderParseError::WrongTokenCount(
                line.split_whitespace().count(),
            ));
        };
        Ok(Order {
            source: parse_token(source)?,
            dest: parse_token(dest)?,
            ships: parse_token(ships)?,
        })
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.source, self.dest, self.ships)
    }
}

fn parse_token(token: &str) -> Result<u32, OrderParseError> {
    token
        .parse()
        .map_err(|_| OrderParseError::InvalidToken(token.to_string()))
}
