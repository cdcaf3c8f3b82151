//! ECS systems for the arena simulation.
//!
//! Systems contain the game logic that operates on components. They run in
//! one chained schedule per fixed tick; the order is load-bearing:
//!
//! 1. `economy_system` - elixir accrual + scripted-side decisions
//! 2. `play_command_system` - executes queued play-card commands
//! 3. `hit_flash_system` - decays render feedback timers
//! 4. `impulse_system` - integrates decaying knockback into positions
//! 5. `tower_system` - tower targeting and firing
//! 6. `unit_system` - unit targeting, lane-funneled movement, attacks
//! 7. `projectile_system` / `spell_system` - payload flight and detonation
//! 8. `shot_flush_system` - inserts freshly fired projectiles into the world
//! 9. `damage_apply_system` - replays the damage queue in order
//! 10. `collision_system` - pairwise soft-body separation
//! 11. `win_check_system` - king-tower destruction ends the match
//! 12. `effects_system` - ages cosmetic particles and floating text
//! 13. `prune_system` - despawns entities flagged dead this tick
//!
//! A unit that kills the enemy king is therefore seen by the win check
//! before pruning removes anything.

pub mod combat;
pub mod economy;
pub mod lifecycle;
pub mod physics;
pub mod projectiles;
pub mod towers;
pub mod units;

pub use combat::*;
pub use economy::*;
pub use lifecycle::*;
pub use physics::*;
pub use projectiles::*;
pub use towers::*;
pub use units::*;

use bevy_ecs::prelude::*;

/// Resource containing the delta time for the current tick.
#[derive(Resource, Default)]
pub struct DeltaTime(pub f32);
