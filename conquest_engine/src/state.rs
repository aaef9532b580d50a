// Game state: the planet and fleet collections, the Point-in-Time text
// format, and the mutations the referee applies between time steps.
//
// The state is deliberately dumb data (a Vec of planets, a Vec of fleets);
// every rule that touches it is a method here or a function in `sim.rs`.
// Planet ids are indices into `planets` — dense, 0-based, assigned in parse
// order, never reordered. Fleets have no identity: `sim::step` rebuilds the
// fleet list every step, so no index may be held across a step boundary.
//
// Point-of-view rendering: each player is sent a state in which it appears
// as owner 1 (see `pov_switch`). The canonical state always stores real
// seat numbers; the transform exists only on the way out, and the replay
// never sees it.
//
// Text format, one entity per line, `#` starts a trailing comment, blank
// lines are ignored:
//   P <x> <y> <owner> <ships> <growth>
//   F <owner> <ships> <source> <dest> <totalTrip> <turnsRemaining>
// Token counts and numeric forms are checked strictly; anything else is a
// `ParseError` with the 1-based line number.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::{OrderError, ParseError};
use crate::fleet::Fleet;
use crate::planet::Planet;
use crate::types::{PlanetId, PlayerId};

/// The complete game state at one point in time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub planets: Vec<Planet>,
    pub fleets: Vec<Fleet>,
}

impl GameState {
    /// Parse the Point-in-Time text format. Planet ids are assigned
    /// sequentially as `P` lines are consumed; fleet planet references are
    /// checked against the full planet list once it is known.
    pub fn parse(text: &str) -> Result<GameState, ParseError> {
        let mut planets = Vec::new();
        let mut fleets: Vec<(usize, Fleet)> = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = match raw.find('#') {
                Some(pos) => &raw[..pos],
                None => raw,
            };
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let Some((&tag, fields)) = tokens.split_first() else {
                continue; // blank or comment-only line
            };
            match tag {
                "P" => {
                    if fields.len() != 5 {
                        return Err(ParseError::new(
                            line_no,
                            format!("planet line needs 6 tokens, found {}", tokens.len()),
                        ));
                    }
                    planets.push(Planet::new(
                        parse_field(line_no, fields[0])?,
                        parse_field(line_no, fields[1])?,
                        PlayerId(parse_field(line_no, fields[2])?),
                        parse_field(line_no, fields[3])?,
                        parse_field(line_no, fields[4])?,
                    ));
                }
                "F" => {
                    if fields.len() != 6 {
                        return Err(ParseError::new(
                            line_no,
                            format!("fleet line needs 7 tokens, found {}", tokens.len()),
                        ));
                    }
                    let fleet = Fleet {
                        owner: PlayerId(parse_field(line_no, fields[0])?),
                        ships: parse_field(line_no, fields[1])?,
                        source: PlanetId(parse_field(line_no, fields[2])?),
                        dest: PlanetId(parse_field(line_no, fields[3])?),
                        total_trip: parse_field(line_no, fields[4])?,
                        turns_remaining: parse_field(line_no, fields[5])?,
                    };
                    fleets.push((line_no, fleet));
                }
                other => {
                    return Err(ParseError::new(
                        line_no,
                        format!("unknown record type {other:?}"),
                    ));
                }
            }
        }

        for (line_no, fleet) in &fleets {
            if fleet.source.0 >= planets.len() || fleet.dest.0 >= planets.len() {
                return Err(ParseError::new(
                    *line_no,
                    "fleet references an unknown planet",
                ));
            }
        }

        Ok(GameState {
            planets,
            fleets: fleets.into_iter().map(|(_, fleet)| fleet).collect(),
        })
    }

    /// Render the state back into the Point-in-Time line format, all
    /// planets then all fleets. `pov` selects the player whose view this
    /// is; `None` renders the canonical state with real owner ids.
    pub fn render(&self, pov: Option<PlayerId>) -> String {
        let view = |owner: PlayerId| match pov {
            Some(seat) => pov_switch(seat, owner),
            None => owner,
        };
        let mut out = String::new();
        for p in &self.planets {
            let _ = writeln!(
                out,
                "P {} {} {} {} {}",
                p.x,
                p.y,
                view(p.owner),
                p.ships,
                p.growth_rate
            );
        }
        for f in &self.fleets {
            let _ = writeln!(
                out,
                "F {} {} {} {} {} {}",
                view(f.owner),
                f.ships,
                f.source,
                f.dest,
                f.total_trip,
                f.turns_remaining
            );
        }
        out
    }

    /// Euclidean distance between two planets, rounded up to the next whole
    /// time step. A fleet launched between them flies exactly this long.
    pub fn distance(&self, a: PlanetId, b: PlanetId) -> u32 {
        let (pa, pb) = (&self.planets[a.0], &self.planets[b.0]);
        let dx = pa.x - pb.x;
        let dy = pa.y - pb.y;
        (dx * dx + dy * dy).sqrt().ceil() as u32
    }

    /// Total ships the player has, garrisoned or in flight.
    pub fn num_ships(&self, player: PlayerId) -> u64 {
        let garrisoned: u64 = self
            .planets
            .iter()
            .filter(|p| p.owner == player)
            .map(|p| u64::from(p.ships))
            .sum();
        let in_flight: u64 = self
            .fleets
            .iter()
            .filter(|f| f.owner == player)
            .map(|f| u64::from(f.ships))
            .sum();
        garrisoned + in_flight
    }

    /// True while the player owns at least one planet or fleet.
    pub fn is_alive(&self, player: PlayerId) -> bool {
        self.planets.iter().any(|p| p.owner == player)
            || self.fleets.iter().any(|f| f.owner == player)
    }

    /// Launch `ships` from `source` toward `dest` on behalf of `player`.
    ///
    /// Valid iff both planet ids are in range, the source is owned by
    /// `player`, and the garrison covers `ships`. On any error the state is
    /// untouched and no fleet exists; the referee responds to the error by
    /// dropping the player.
    pub fn issue_order(
        &mut self,
        player: PlayerId,
        source: PlanetId,
        dest: PlanetId,
        ships: u32,
    ) -> Result<(), OrderError> {
        if source.0 >= self.planets.len() {
            return Err(OrderError::UnknownPlanet(source));
        }
        if dest.0 >= self.planets.len() {
            return Err(OrderError::UnknownPlanet(dest));
        }
        let src = &self.planets[source.0];
        if src.owner != player {
            return Err(OrderError::NotOwner {
                planet: source,
                owner: src.owner,
                player,
            });
        }
        if ships > src.ships {
            return Err(OrderError::InsufficientShips {
                planet: source,
                requested: ships,
                available: src.ships,
            });
        }
        let trip = self.distance(source, dest);
        self.planets[source.0].remove_ships(ships);
        self.fleets.push(Fleet::launch(player, ships, source, dest, trip));
        Ok(())
    }

    /// Remove a player from contention: its planets turn neutral (garrisons
    /// stay), its fleets are killed. Idempotent, never fails.
    pub fn drop_player(&mut self, player: PlayerId) {
        for p in &mut self.planets {
            if p.owner == player {
                p.owner = PlayerId::NEUTRAL;
            }
        }
        for f in &mut self.fleets {
            if f.owner == player {
                f.kill();
            }
        }
    }
}

/// Point-of-view owner transform: the receiving player always sees itself
/// as owner 1, and the real owner 1 takes the receiver's seat number, so
/// the relabeling leaks nothing about seating order. Other owners pass
/// through unchanged. The transform is its own inverse.
pub fn pov_switch(pov: PlayerId, owner: PlayerId) -> PlayerId {
    if owner == pov {
        PlayerId(1)
    } else if owner == PlayerId(1) {
        pov
    } else {
        owner
    }
}

/// Parse one whitespace-separated token as a strict numeric field.
fn parse_field<T: std::str::FromStr>(line: usize, token: &str) -> Result<T, ParseError> {
    token
        .parse()
        .map_err(|_| ParseError::new(line, format!("invalid numeric token {token:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = "\
P 0 0 1 50 5
P 7.5 3.25 2 50 5
P 3 4 0 20 2  # neutral chokepoint
F 1 12 0 1 9 3

# trailing commentary
";

    #[test]
    fn parse_assigns_dense_planet_ids_in_order() {
        let state = GameState::parse(MAP).unwrap();
        assert_eq!(state.planets.len(), 3);
        assert_eq!(state.planets[0].owner, PlayerId(1));
        assert_eq!(state.planets[1].owner, PlayerId(2));
        assert_eq!(state.planets[2].owner, PlayerId::NEUTRAL);
        assert_eq!(state.planets[2].ships, 20);
        assert_eq!(state.fleets.len(), 1);
        assert_eq!(state.fleets[0].dest, PlanetId(1));
    }

    #[test]
    fn parse_render_round_trip_is_lossless() {
        let state = GameState::parse(MAP).unwrap();
        let reparsed = GameState::parse(&state.render(None)).unwrap();
        assert_eq!(state, reparsed);
    }

    #[test]
    fn parse_rejects_wrong_token_count() {
        let err = GameState::parse("P 0 0 1 50").unwrap_err();
        assert_eq!(err.line, 1);
        let err = GameState::parse("P 0 0 1 50 5\nF 1 2 0 0 1\n").unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn parse_rejects_unknown_record_type() {
        let err = GameState::parse("Q 1 2 3").unwrap_err();
        assert_eq!(err.line, 1);
    }

    #[test]
    fn parse_rejects_non_numeric_fields() {
        assert!(GameState::parse("P 0 0 one 50 5").is_err());
        assert!(GameState::parse("P 0 0 1 -50 5").is_err());
        assert!(GameState::parse("P 0 0 1 50.5 5").is_err());
    }

    #[test]
    fn parse_rejects_fleets_bound_for_unknown_planets() {
        let err = GameState::parse("P 0 0 1 50 5\nF 1 5 0 9 3 3\n").unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let state = GameState::parse("# header\n\nP 0 0 0 1 1\n   \n").unwrap();
        assert_eq!(state.planets.len(), 1);
        assert!(state.fleets.is_empty());
    }

    #[test]
    fn render_applies_pov_to_owner_fields_only() {
        let state = GameState::parse(MAP).unwrap();
        let view = state.render(Some(PlayerId(2)));
        let lines: Vec<&str> = view.lines().collect();
        // Seat 2 sees itself as 1 and the real player 1 as 2; neutral and
        // planet ids are untouched.
        assert_eq!(lines[0], "P 0 0 2 50 5");
        assert_eq!(lines[1], "P 7.5 3.25 1 50 5");
        assert_eq!(lines[2], "P 3 4 0 20 2");
        assert_eq!(lines[3], "F 2 12 0 1 9 3");
    }

    #[test]
    fn pov_switch_is_an_involution() {
        for pov in 1..=4 {
            for owner in 0..=4 {
                let once = pov_switch(PlayerId(pov), PlayerId(owner));
                assert_eq!(pov_switch(PlayerId(pov), once), PlayerId(owner));
            }
        }
    }

    #[test]
    fn distance_rounds_up_to_whole_steps() {
        let state = GameState::parse(MAP).unwrap();
        // (0,0) to (3,4) is exactly 5.
        assert_eq!(state.distance(PlanetId(0), PlanetId(2)), 5);
        // (0,0) to (7.5,3.25) is ~8.17, rounded up to 9.
        assert_eq!(state.distance(PlanetId(0), PlanetId(1)), 9);
        assert_eq!(state.distance(PlanetId(1), PlanetId(1)), 0);
    }

    #[test]
    fn num_ships_counts_garrisons_and_fleets() {
        let state = GameState::parse(MAP).unwrap();
        assert_eq!(state.num_ships(PlayerId(1)), 62); // 50 garrisoned + 12 flying
        assert_eq!(state.num_ships(PlayerId(2)), 50);
        assert_eq!(state.num_ships(PlayerId(3)), 0);
    }

    #[test]
    fn a_player_with_only_a_fleet_is_alive() {
        let mut state = GameState::parse(MAP).unwrap();
        state.planets[0].owner = PlayerId(2);
        assert!(state.is_alive(PlayerId(1))); // fleet only
        assert!(!state.is_alive(PlayerId(3)));
    }

    #[test]
    fn issue_order_moves_ships_into_a_fleet() {
        let mut state = GameState::parse(MAP).unwrap();
        state
            .issue_order(PlayerId(1), PlanetId(0), PlanetId(2), 30)
            .unwrap();
        assert_eq!(state.planets[0].ships, 20);
        let fleet = state.fleets.last().unwrap();
        assert_eq!(fleet.owner, PlayerId(1));
        assert_eq!(fleet.ships, 30);
        assert_eq!(fleet.total_trip, 5);
        assert_eq!(fleet.turns_remaining, 5);
    }

    #[test]
    fn issue_order_rejects_wrong_owner() {
        let mut state = GameState::parse(MAP).unwrap();
        let before = state.clone();
        let err = state
            .issue_order(PlayerId(2), PlanetId(0), PlanetId(1), 10)
            .unwrap_err();
        assert!(matches!(err, OrderError::NotOwner { .. }));
        assert_eq!(state, before);
    }

    #[test]
    fn issue_order_rejects_overdraw() {
        let mut state = GameState::parse(MAP).unwrap();
        let before = state.clone();
        let err = state
            .issue_order(PlayerId(1), PlanetId(0), PlanetId(1), 51)
            .unwrap_err();
        assert!(matches!(err, OrderError::InsufficientShips { .. }));
        assert_eq!(state, before);
    }

    #[test]
    fn issue_order_rejects_unknown_planets() {
        let mut state = GameState::parse(MAP).unwrap();
        let before = state.clone();
        let err = state
            .issue_order(PlayerId(1), PlanetId(0), PlanetId(9), 10)
            .unwrap_err();
        assert_eq!(err, OrderError::UnknownPlanet(PlanetId(9)));
        assert_eq!(state, before);
    }

    #[test]
    fn zero_ship_orders_are_legal() {
        let mut state = GameState::parse(MAP).unwrap();
        state
            .issue_order(PlayerId(1), PlanetId(0), PlanetId(1), 0)
            .unwrap();
        assert_eq!(state.planets[0].ships, 50);
        assert_eq!(state.fleets.last().unwrap().ships, 0);
    }

    #[test]
    fn drop_player_neutralizes_planets_and_kills_fleets() {
        let mut state = GameState::parse(MAP).unwrap();
        state.drop_player(PlayerId(1));
        assert_eq!(state.planets[0].owner, PlayerId::NEUTRAL);
        assert_eq!(state.planets[0].ships, 50); // garrison stays
        assert!(state.fleets[0].owner.is_neutral());
        assert_eq!(state.fleets[0].ships, 0);
        assert!(!state.is_alive(PlayerId(1)));

        // Idempotent.
        let once = state.clone();
        state.drop_player(PlayerId(1));
        assert_eq!(state, once);
    }

    #[test]
    fn state_serialization_roundtrip() {
        let state = GameState::parse(MAP).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, restored);
    }
}
