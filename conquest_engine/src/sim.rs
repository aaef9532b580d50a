// The time-step algorithm and win/draw detection.
//
// One step runs growth, fleet advance, and battle resolution, then appends
// the post-step snapshot to the replay. Battles consume every fleet whose
// countdown reached zero this step; the live fleet list is rebuilt from the
// still-flying remainder, so no fleet index survives a step boundary and
// nothing is ever removed mid-iteration.
//
// Determinism: battle contenders are tallied in a `BTreeMap` keyed by owner
// id, so the winner scan visits owners in ascending order. An exact tie at
// the top resolves the same way regardless of scan order (garrison zeroed,
// owner kept), so ordering here buys reproducibility, not different
// results.

use std::collections::{BTreeMap, BTreeSet};

use smallvec::SmallVec;

use crate::playback::Playback;
use crate::planet::Planet;
use crate::state::GameState;
use crate::types::{Outcome, PlayerId};

/// Fleets that arrived at one planet this step, as (owner, ships) pairs.
/// A planet rarely sees more than a couple of simultaneous arrivals, so
/// the bucket stays on the stack.
type Arrivals = SmallVec<[(PlayerId, u32); 4]>;

/// Advance the state by one time step and append the snapshot to
/// `playback`. In order: growth on non-neutral planets, every fleet flies
/// one step, every planet resolves its battle independently.
pub fn step(state: &mut GameState, playback: &mut Playback) {
    for planet in &mut state.planets {
        if !planet.owner.is_neutral() {
            planet.add_ships(planet.growth_rate);
        }
    }

    let mut arrivals: Vec<Arrivals> = vec![Arrivals::new(); state.planets.len()];
    let mut in_flight = Vec::with_capacity(state.fleets.len());
    for mut fleet in state.fleets.drain(..) {
        fleet.advance();
        if fleet.has_arrived() {
            arrivals[fleet.dest.0].push((fleet.owner, fleet.ships));
        } else {
            in_flight.push(fleet);
        }
    }
    state.fleets = in_flight;

    for (planet, arrived) in state.planets.iter_mut().zip(&arrivals) {
        resolve_battle(planet, arrived);
    }

    playback.record_step(state);
}

/// Resolve the battle at one planet. The contender map is seeded with the
/// defending garrison; each arrived fleet adds its ships under its owner.
/// The strictly-largest contender takes the planet with its margin over the
/// runner-up; any exact tie for the top leaves the owner in place over an
/// emptied garrison.
fn resolve_battle(planet: &mut Planet, arrived: &[(PlayerId, u32)]) {
    if arrived.is_empty() {
        return;
    }

    let mut contenders: BTreeMap<PlayerId, u32> = BTreeMap::new();
    contenders.insert(planet.owner, planet.ships);
    for &(owner, ships) in arrived {
        *contenders.entry(owner).or_insert(0) += ships;
    }

    let mut winner = (PlayerId::NEUTRAL, 0u32);
    let mut second = (PlayerId::NEUTRAL, 0u32);
    for (&owner, &ships) in &contenders {
        if ships > second.1 {
            if ships > winner.1 {
                second = winner;
                winner = (owner, ships);
            } else {
                second = (owner, ships);
            }
        }
    }

    if winner.1 > second.1 {
        planet.owner = winner.0;
        planet.ships = winner.1 - second.1;
    } else {
        planet.ships = 0;
    }
}

/// Win/draw detection, evaluated by the referee after each step.
///
/// Before the turn limit passes: zero remaining owners is a draw, one is a
/// win, two or more leaves the match running. Once `turns_completed`
/// exceeds `max_turns`, the strictly-largest total ship count wins and any
/// exact tie at the top is a draw, however many owners remain.
pub fn winner(state: &GameState, turns_completed: u32, max_turns: u32) -> Outcome {
    let mut owners: BTreeSet<PlayerId> = BTreeSet::new();
    for planet in &state.planets {
        owners.insert(planet.owner);
    }
    for fleet in &state.fleets {
        owners.insert(fleet.owner);
    }
    owners.remove(&PlayerId::NEUTRAL);

    if turns_completed > max_turns {
        let mut leader: Option<(PlayerId, u64)> = None;
        let mut tied = false;
        for &player in &owners {
            let total = state.num_ships(player);
            match leader {
                None => leader = Some((player, total)),
                Some((_, best)) if total > best => {
                    leader = Some((player, total));
                    tied = false;
                }
                Some((_, best)) if total == best => tied = true,
                Some(_) => {}
            }
        }
        return match leader {
            Some((player, _)) if !tied => Outcome::Winner(player),
            _ => Outcome::Draw,
        };
    }

    let mut survivors = owners.iter();
    match (survivors.next(), survivors.next()) {
        (None, _) => Outcome::Draw,
        (Some(&player), None) => Outcome::Winner(player),
        _ => Outcome::Undecided,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::Fleet;
    use crate::types::PlanetId;

    fn planet(owner: u32, ships: u32, growth: u32) -> Planet {
        Planet::new(0.0, 0.0, PlayerId(owner), ships, growth)
    }

    fn inbound(owner: u32, ships: u32, dest: usize, turns_remaining: u32) -> Fleet {
        Fleet {
            owner: PlayerId(owner),
            ships,
            source: PlanetId(0),
            dest: PlanetId(dest),
            total_trip: 10,
            turns_remaining,
        }
    }

    fn run_step(state: &mut GameState) {
        let mut playback = Playback::new(state);
        step(state, &mut playback);
    }

    #[test]
    fn growth_skips_neutral_planets() {
        let mut state = GameState {
            planets: vec![planet(1, 10, 5), planet(0, 10, 5)],
            fleets: Vec::new(),
        };
        run_step(&mut state);
        assert_eq!(state.planets[0].ships, 15);
        assert_eq!(state.planets[1].ships, 10);
    }

    #[test]
    fn single_contender_planet_is_unchanged() {
        let mut state = GameState {
            planets: vec![planet(1, 10, 0)],
            fleets: Vec::new(),
        };
        run_step(&mut state);
        assert_eq!(state.planets[0].owner, PlayerId(1));
        assert_eq!(state.planets[0].ships, 10);
    }

    #[test]
    fn exact_tie_empties_the_garrison_but_keeps_the_owner() {
        let mut state = GameState {
            planets: vec![planet(1, 5, 0)],
            fleets: vec![inbound(2, 5, 0, 1)],
        };
        run_step(&mut state);
        assert_eq!(state.planets[0].owner, PlayerId(1));
        assert_eq!(state.planets[0].ships, 0);
        assert!(state.fleets.is_empty());
    }

    #[test]
    fn decisive_battle_transfers_ownership_with_the_margin() {
        let mut state = GameState {
            planets: vec![planet(0, 3, 0)],
            fleets: vec![inbound(2, 8, 0, 1)],
        };
        run_step(&mut state);
        assert_eq!(state.planets[0].owner, PlayerId(2));
        assert_eq!(state.planets[0].ships, 5);
    }

    #[test]
    fn reinforcements_join_the_defense() {
        let mut state = GameState {
            planets: vec![planet(1, 5, 0)],
            fleets: vec![inbound(1, 7, 0, 1)],
        };
        run_step(&mut state);
        assert_eq!(state.planets[0].owner, PlayerId(1));
        assert_eq!(state.planets[0].ships, 12);
    }

    #[test]
    fn fleets_of_one_owner_stack_before_the_fight() {
        let mut state = GameState {
            planets: vec![planet(0, 10, 0)],
            fleets: vec![inbound(2, 6, 0, 1), inbound(2, 6, 0, 1)],
        };
        run_step(&mut state);
        assert_eq!(state.planets[0].owner, PlayerId(2));
        assert_eq!(state.planets[0].ships, 2);
    }

    #[test]
    fn three_way_top_tie_keeps_the_defender() {
        let mut state = GameState {
            planets: vec![planet(1, 5, 0)],
            fleets: vec![inbound(2, 5, 0, 1), inbound(3, 5, 0, 1)],
        };
        run_step(&mut state);
        assert_eq!(state.planets[0].owner, PlayerId(1));
        assert_eq!(state.planets[0].ships, 0);
    }

    #[test]
    fn in_flight_fleets_only_advance() {
        let mut state = GameState {
            planets: vec![planet(1, 10, 0)],
            fleets: vec![inbound(2, 8, 0, 3)],
        };
        run_step(&mut state);
        assert_eq!(state.fleets.len(), 1);
        assert_eq!(state.fleets[0].turns_remaining, 2);
        assert_eq!(state.planets[0].ships, 10);
    }

    #[test]
    fn killed_fleets_are_discarded_without_effect() {
        let mut state = GameState {
            planets: vec![planet(1, 10, 0)],
            fleets: vec![inbound(2, 8, 0, 5)],
        };
        state.drop_player(PlayerId(2));
        run_step(&mut state);
        assert!(state.fleets.is_empty());
        assert_eq!(state.planets[0].owner, PlayerId(1));
        assert_eq!(state.planets[0].ships, 10);
    }

    #[test]
    fn winner_with_no_owners_is_a_draw() {
        let state = GameState {
            planets: vec![planet(0, 10, 1)],
            fleets: Vec::new(),
        };
        assert_eq!(winner(&state, 0, 200), Outcome::Draw);
    }

    #[test]
    fn winner_with_a_sole_survivor() {
        let state = GameState {
            planets: vec![planet(0, 10, 1), planet(2, 4, 1)],
            fleets: Vec::new(),
        };
        assert_eq!(winner(&state, 0, 200), Outcome::Winner(PlayerId(2)));
    }

    #[test]
    fn winner_is_undecided_while_two_remain() {
        let state = GameState {
            planets: vec![planet(1, 10, 1), planet(2, 4, 1)],
            fleets: Vec::new(),
        };
        assert_eq!(winner(&state, 0, 200), Outcome::Undecided);
        // The limit must be exceeded, not merely reached.
        assert_eq!(winner(&state, 200, 200), Outcome::Undecided);
    }

    #[test]
    fn a_fleet_alone_keeps_its_owner_in_the_game() {
        let state = GameState {
            planets: vec![planet(1, 10, 1)],
            fleets: vec![inbound(2, 1, 0, 4)],
        };
        assert_eq!(winner(&state, 0, 200), Outcome::Undecided);
    }

    #[test]
    fn past_the_limit_the_largest_total_wins() {
        let state = GameState {
            planets: vec![planet(1, 10, 1), planet(2, 4, 1)],
            fleets: vec![inbound(2, 3, 0, 4)],
        };
        assert_eq!(winner(&state, 201, 200), Outcome::Winner(PlayerId(1)));
    }

    #[test]
    fn past_the_limit_an_exact_tie_is_a_draw() {
        let state = GameState {
            planets: vec![planet(1, 7, 1), planet(2, 4, 1)],
            fleets: vec![inbound(2, 3, 0, 4)],
        };
        assert_eq!(winner(&state, 201, 200), Outcome::Draw);
    }

    #[test]
    fn opening_strike_resolves_after_three_steps() {
        let mut state =
            GameState::parse("P 0 0 1 50 5\nP 0 3 2 50 5\n").unwrap();
        state
            .issue_order(PlayerId(1), PlanetId(0), PlanetId(1), 30)
            .unwrap();
        let mut playback = Playback::new(&state);
        for _ in 0..3 {
            step(&mut state, &mut playback);
        }
        // The 30-ship strike arrives on step 3 against a garrison grown to
        // 65: the defense holds with the margin.
        assert!(state.fleets.is_empty());
        assert_eq!(state.planets[1].owner, PlayerId(2));
        assert_eq!(state.planets[1].ships, 35);
        assert_eq!(state.planets[0].ships, 35);
        assert_eq!(winner(&state, 3, 200), Outcome::Undecided);
    }
}
