//! Build-time configuration for the arena simulation.
//!
//! Game rules are compiled in: arena geometry, tower stats, economy rates
//! and the card catalog (see [`crate::cards`]). Nothing is read from disk
//! or the environment at runtime.

use bevy_ecs::prelude::*;

/// Arena width in simulation units.
pub const ARENA_WIDTH: f32 = 400.0;
/// Arena height in simulation units. The player's side is the bottom half.
pub const ARENA_HEIGHT: f32 = 600.0;

/// Fixed simulation rate in ticks per second.
pub const TICK_RATE: f32 = 60.0;
/// Match length in seconds.
pub const MATCH_DURATION: f32 = 180.0;

/// Seconds of accrual per point of elixir.
pub const ELIXIR_RATE: f32 = 2.8;
/// Elixir cap per side.
pub const MAX_ELIXIR: f32 = 10.0;
/// Elixir each side starts the match with.
pub const STARTING_ELIXIR: f32 = 5.0;

/// Vertical centerline of the river.
pub const RIVER_Y: f32 = ARENA_HEIGHT / 2.0;
/// Half-height of the impassable river band.
pub const RIVER_HALF_HEIGHT: f32 = 20.0;
/// Width of each bridge.
pub const BRIDGE_WIDTH: f32 = 40.0;
/// X position of the left-lane bridge center.
pub const BRIDGE_LEFT_X: f32 = ARENA_WIDTH * 0.25;
/// X position of the right-lane bridge center.
pub const BRIDGE_RIGHT_X: f32 = ARENA_WIDTH * 0.75;
/// Units closer than this to the river centerline are in the funnel zone.
pub const FUNNEL_DISTANCE: f32 = 40.0;

/// Attack ranges above this fire projectiles; at or below, damage is melee.
pub const MELEE_THRESHOLD: f32 = 20.0;
/// Projectiles and spells detonate within this distance of their destination.
pub const PROJECTILE_HIT_RADIUS: f32 = 10.0;
/// Flight speed of tower projectiles and of unit projectiles that do not
/// specify their own.
pub const DEFAULT_PROJECTILE_SPEED: f32 = 300.0;
/// Flight speed of spell payloads.
pub const SPELL_PROJECTILE_SPEED: f32 = 500.0;

/// Seconds the hit flash stays lit after taking damage.
pub const HIT_FLASH_DURATION: f32 = 0.1;
/// Per-tick decay factor for collision impulses.
pub const IMPULSE_DECAY: f32 = 0.9;
/// Impulses below this magnitude are ignored.
pub const IMPULSE_EPSILON: f32 = 0.1;
/// Collision mass of towers. Units never displace them.
pub const TOWER_MASS: f32 = 1000.0;

/// Lateral offset between the two units of a paired-unit card.
pub const PAIR_SPAWN_OFFSET: f32 = 15.0;
/// Depth of the no-deploy band in front of the opposing back line for
/// pocket placements.
pub const POCKET_MARGIN: f32 = 100.0;

/// Distance of princess towers from their owner's back line.
pub const PRINCESS_TOWER_DEPTH: f32 = 80.0;
/// Distance of king towers from their owner's back line.
pub const KING_TOWER_DEPTH: f32 = 40.0;

/// Seconds before the scripted side's first decision.
pub const AI_FIRST_DECISION: f32 = 2.0;
/// Lower bound of the re-rolled decision interval.
pub const AI_DECISION_MIN: f32 = 2.0;
/// Width of the re-rolled decision interval.
pub const AI_DECISION_SPREAD: f32 = 3.0;
/// Deadline pushback after an unaffordable pick.
pub const AI_RETRY_DELAY: f32 = 0.5;
/// Scripted deploys land 120-170 units out from the side's own back line.
pub const AI_DEPLOY_DEPTH_MIN: f32 = 120.0;
pub const AI_DEPLOY_DEPTH_SPREAD: f32 = 50.0;
/// Lateral scatter around the lane center for scripted deploys.
pub const AI_DEPLOY_SCATTER: f32 = 20.0;

/// Display color of player-owned towers, carried through to snapshots.
pub const PLAYER_TOWER_COLOR: &str = "#2962FF";
/// Display color of enemy-owned towers.
pub const ENEMY_TOWER_COLOR: &str = "#D50000";

/// Stationary defender stats per tower kind.
#[derive(Debug, Clone, Copy)]
pub struct TowerSpec {
    pub health: f32,
    pub radius: f32,
    pub range: f32,
    pub damage: f32,
    /// Seconds per attack.
    pub attack_interval: f32,
    /// Square footprint used by the render client.
    pub footprint: f32,
}

pub const PRINCESS_TOWER: TowerSpec = TowerSpec {
    health: 1400.0,
    radius: 25.0,
    range: 200.0,
    damage: 80.0,
    attack_interval: 0.8,
    footprint: 40.0,
};

pub const KING_TOWER: TowerSpec = TowerSpec {
    health: 2400.0,
    radius: 35.0,
    range: 220.0,
    damage: 100.0,
    attack_interval: 1.0,
    footprint: 50.0,
};

/// Simulation parameters resolved at construction time.
#[derive(Resource, Debug, Clone)]
pub struct SimConfig {
    /// Fixed timestep in seconds (1/60 = 0.0167 for 60 Hz).
    pub fixed_timestep: f32,
    /// Match length in seconds.
    pub match_duration: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / TICK_RATE,
            match_duration: MATCH_DURATION,
        }
    }
}
