// Planet entity.

use serde::{Deserialize, Serialize};

use crate::types::PlayerId;

/// A planet: fixed position and growth rate, mutable garrison and owner.
/// Created once at parse time and owned by `GameState` for the whole match;
/// mutated only by the simulator and by order application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub x: f64,
    pub y: f64,
    pub owner: PlayerId,
    pub ships: u32,
    pub growth_rate: u32,
}

impl Planet {
    pub fn new(x: f64, y: f64, owner: PlayerId, ships: u32, growth_rate: u32) -> Self {
        Self {
            x,
            y,
            owner,
            ships,
            growth_rate,
        }
    }

    /// Reinforce the garrison (growth or battle remainder).
    pub fn add_ships(&mut self, amount: u32) {
        self.ships += amount;
    }

    /// Deduct ships for a departing fleet. Callers validate `amount`
    /// against the garrison first, so the count cannot go below zero.
    pub fn remove_ships(&mut self, amount: u32) {
        debug_assert!(amount <= self.ships);
        self.ships -= amount;
    }
}
