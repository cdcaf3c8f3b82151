//! Two-Lane Arena Battler - Simulation Core
//!
//! A deterministic, fixed-timestep ECS simulation of a card-driven tower
//! defense duel. Uses `bevy_ecs` for the entity-component-system
//! architecture.
//!
//! Rendering, input capture and window lifecycle live in external clients:
//! they drive [`BattleSim::step`], submit [`BattleSim::play_card`] commands
//! and consume [`Snapshot`]s. All randomness is seeded, so equal seeds
//! produce equal matches.

pub mod api;
pub mod cards;
pub mod components;
pub mod config;
pub mod economy;
pub mod effects;
pub mod error;
pub mod rng;
pub mod systems;
pub mod world;

pub use api::BattleSim;
pub use cards::{CardDef, CardId, CardKind, TargetAffinity, DECK};
pub use components::*;
pub use config::SimConfig;
pub use economy::{Controller, Economies, Economy};
pub use effects::Effects;
pub use error::{PlayError, PlayResult};
pub use rng::SimRng;
pub use systems::*;
pub use world::Snapshot;
