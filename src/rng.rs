//! Seeded randomness for reproducible runs.

use bevy_ecs::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// The single RNG stream for a simulation.
///
/// Deck shuffles, scripted-side decisions and cosmetic particle scatter all
/// draw from here, so two simulations built with the same seed and stepped
/// identically stay in lockstep.
#[derive(Resource, Debug, Clone)]
pub struct SimRng(pub Pcg32);

impl SimRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(Pcg32::seed_from_u64(seed))
    }
}
