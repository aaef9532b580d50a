// Fleet entity.

use serde::{Deserialize, Serialize};

use crate::types::{PlanetId, PlayerId};

/// Ships in flight between two planets.
///
/// Fleets carry no identity across time steps: they exist only as entries
/// in the state's fleet list, which `sim::step` rebuilds every step. A
/// fleet whose countdown reaches zero has arrived and is consumed by the
/// battle at its destination during that same step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fleet {
    pub owner: PlayerId,
    pub ships: u32,
    pub source: PlanetId,
    pub dest: PlanetId,
    /// Full trip length in time steps; fixed at launch.
    pub total_trip: u32,
    /// Steps still to fly; counts down to 0, never below.
    pub turns_remaining: u32,
}

impl Fleet {
    /// A freshly launched fleet with the whole trip still ahead of it.
    pub fn launch(owner: PlayerId, ships: u32, source: PlanetId, dest: PlanetId, trip: u32) -> Self {
        Self {
            owner,
            ships,
            source,
            dest,
            total_trip: trip,
            turns_remaining: trip,
        }
    }

    /// Fly one time step closer. Floors at zero.
    pub fn advance(&mut self) {
        self.turns_remaining = self.turns_remaining.saturating_sub(1);
    }

    /// True once the fleet has reached its destination and must be resolved
    /// into a battle this step.
    pub fn has_arrived(&self) -> bool {
        self.turns_remaining == 0
    }

    /// Neutralize the fleet when its owner is dropped. The inert zero-ship
    /// entry is discarded at its destination's next battle without
    /// contributing anything.
    pub fn kill(&mut self) {
        self.owner = PlayerId::NEUTRAL;
        self.ships = 0;
        self.turns_remaining = 0;
    }
}
