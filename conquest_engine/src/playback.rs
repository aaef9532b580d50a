// Replay recording.
//
// The replay is one string a visualizer can play back: the initial planet
// snapshot (`x,y,owner,ships,growth` per planet, planets joined by `:`)
// terminated by `|`, then one segment per time step — `owner.ships` per
// planet followed by `owner.ships.source.dest.totalTrip.turnsRemaining`
// per fleet, entries joined by `,`, each segment closed by `:`. Owners are
// always canonical seat numbers; the replay never sees a point-of-view
// transform.

use std::fmt::Write as _;

use crate::state::GameState;

/// Accumulating replay buffer for one match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Playback {
    data: String,
}

impl Playback {
    /// Start a replay with the initial snapshot of `state`. Fleets are not
    /// part of the initial encoding; matches start from planet-only maps.
    pub fn new(state: &GameState) -> Playback {
        let mut data = String::new();
        for (i, p) in state.planets.iter().enumerate() {
            if i > 0 {
                data.push(':');
            }
            let _ = write!(
                data,
                "{},{},{},{},{}",
                p.x, p.y, p.owner, p.ships, p.growth_rate
            );
        }
        data.push('|');
        Playback { data }
    }

    /// Append the post-step snapshot of `state` as one segment.
    pub fn record_step(&mut self, state: &GameState) {
        let mut first = true;
        for p in &state.planets {
            if !first {
                self.data.push(',');
            }
            first = false;
            let _ = write!(self.data, "{}.{}", p.owner, p.ships);
        }
        for f in &state.fleets {
            if !first {
                self.data.push(',');
            }
            first = false;
            let _ = write!(
                self.data,
                "{}.{}.{}.{}.{}.{}",
                f.owner, f.ships, f.source, f.dest, f.total_trip, f.turns_remaining
            );
        }
        self.data.push(':');
    }

    /// The replay accumulated so far.
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Consume the buffer, yielding the full replay string.
    pub fn into_string(self) -> String {
        self.data
    }
}
