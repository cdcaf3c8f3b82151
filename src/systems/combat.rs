//! Damage and spawn plumbing shared by the behavior systems.
//!
//! Attack systems never mutate their victims directly. They queue
//! [`DamageEvent`]s here, and `damage_apply_system` replays the queue in
//! order: a victim killed by an earlier event absorbs nothing from later
//! ones, matching sequential resolution. Projectiles fired mid-tick are
//! likewise deferred as [`ProjectileSpawn`]s and flushed into the world
//! before collision resolution, so fresh spawns take part in the same
//! tick's physics and win evaluation.

use crate::components::{Health, HitFlash, IdCounter, Position, ProjectileBundle, Team, Unit};
use crate::config;
use crate::effects::Effects;
use crate::rng::SimRng;
use bevy_ecs::prelude::*;

/// A single pending application of damage.
#[derive(Debug, Clone, Copy)]
pub struct DamageEvent {
    pub target: Entity,
    pub amount: f32,
}

/// Damage gathered this tick, applied in order by `damage_apply_system`.
#[derive(Resource, Debug, Default)]
pub struct DamageQueue(pub Vec<DamageEvent>);

impl DamageQueue {
    pub fn push(&mut self, target: Entity, amount: f32) {
        self.0.push(DamageEvent { target, amount });
    }
}

/// A projectile waiting to be inserted into the world.
#[derive(Debug, Clone, Copy)]
pub struct ProjectileSpawn {
    pub x: f32,
    pub y: f32,
    pub target: Entity,
    pub target_pos: Position,
    pub damage: f32,
    pub speed: f32,
}

/// Projectiles fired during the current tick's behavior pass.
#[derive(Resource, Debug, Default)]
pub struct PendingShots(pub Vec<ProjectileSpawn>);

impl PendingShots {
    pub fn fire(&mut self, from: &Position, target: Entity, target_pos: Position, damage: f32, speed: f32) {
        self.0.push(ProjectileSpawn {
            x: from.x,
            y: from.y,
            target,
            target_pos,
            damage,
            speed,
        });
    }
}

/// Exclusive system that drains [`PendingShots`] into live entities.
pub fn shot_flush_system(world: &mut World) {
    let shots = std::mem::take(&mut world.resource_mut::<PendingShots>().0);
    for shot in shots {
        let id = world.resource_mut::<IdCounter>().allocate();
        world.spawn(ProjectileBundle::new(
            id,
            shot.x,
            shot.y,
            shot.target,
            shot.target_pos,
            shot.damage,
            shot.speed,
        ));
    }
}

/// System that replays the damage queue.
///
/// Each event lands on a still-living victim only; a target killed earlier
/// in the same queue absorbs nothing more. Every hit resets the victim's
/// hit flash and pops cosmetic feedback — a floating damage number, a small
/// particle burst, and a larger burst once on the death crossing.
pub fn damage_apply_system(
    mut queue: ResMut<DamageQueue>,
    mut victims: Query<(
        &Position,
        &Team,
        &mut Health,
        Option<&mut HitFlash>,
        Option<&Unit>,
    )>,
    mut effects: ResMut<Effects>,
    mut rng: ResMut<SimRng>,
) {
    for event in queue.0.drain(..) {
        let Ok((pos, team, mut health, flash, unit)) = victims.get_mut(event.target) else {
            continue;
        };
        if health.dead {
            continue;
        }
        let died = health.damage(event.amount);
        if let Some(mut flash) = flash {
            flash.trigger();
        }
        let color = hit_color(*team, unit);
        effects.damage_text(pos.x, pos.y, event.amount);
        effects.burst(pos.x, pos.y, color, 3, &mut rng.0);
        if died {
            effects.burst(pos.x, pos.y, color, 10, &mut rng.0);
        }
    }
}

/// Particle color for an entity: the card color for units, the side color
/// for towers.
fn hit_color(team: Team, unit: Option<&Unit>) -> &'static str {
    if let Some(unit) = unit {
        unit.card.def().color
    } else {
        match team {
            Team::Player => config::PLAYER_TOWER_COLOR,
            _ => config::ENEMY_TOWER_COLOR,
        }
    }
}
