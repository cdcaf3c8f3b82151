//! Payload flight: homing projectiles and point-targeted area spells.

use crate::components::{Body, Health, Position, Projectile, Spell, Team};
use crate::config;
use crate::effects::Effects;
use crate::rng::SimRng;
use crate::systems::combat::DamageQueue;
use crate::systems::DeltaTime;
use bevy_ecs::prelude::*;

/// System flying homing projectiles.
///
/// While the target lives, its current position is re-read every tick (true
/// homing, no ballistic prediction). Once the target is gone the projectile
/// flies on to the last known point and expires there without dealing
/// damage — a victim that died mid-flight is never hit.
pub fn projectile_system(
    dt: Res<DeltaTime>,
    mut projectiles: Query<(&mut Position, &mut Health, &mut Projectile)>,
    targets: Query<(&Position, &Health), Without<Projectile>>,
    mut damage: ResMut<DamageQueue>,
) {
    let delta = dt.0;
    for (mut pos, mut health, mut projectile) in projectiles.iter_mut() {
        if health.dead {
            continue;
        }

        let live_target = targets
            .get(projectile.target)
            .ok()
            .filter(|(_, target_health)| target_health.is_alive());
        if let Some((target_pos, _)) = live_target {
            projectile.target_pos = *target_pos;
        }

        let dx = projectile.target_pos.x - pos.x;
        let dy = projectile.target_pos.y - pos.y;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist < config::PROJECTILE_HIT_RADIUS {
            health.kill();
            if live_target.is_some() {
                damage.push(projectile.target, projectile.damage);
            }
        } else {
            let step = projectile.speed * delta;
            pos.x += dx / dist * step;
            pos.y += dy / dist * step;
        }
    }
}

/// System flying spell payloads to their fixed map point.
///
/// On arrival the spell detonates: every living unit or tower of the
/// opposing team within (blast radius + its own radius) of the impact point
/// takes the spell's damage once. Friendly fire is impossible by
/// construction.
pub fn spell_system(
    dt: Res<DeltaTime>,
    mut spells: Query<(&mut Position, &mut Health, &Team, &Spell)>,
    victims: Query<(Entity, &Position, &Team, &Health, &Body), Without<Spell>>,
    mut damage: ResMut<DamageQueue>,
    mut effects: ResMut<Effects>,
    mut rng: ResMut<SimRng>,
) {
    let delta = dt.0;
    for (mut pos, mut health, team, spell) in spells.iter_mut() {
        if health.dead {
            continue;
        }

        let dx = spell.target.x - pos.x;
        let dy = spell.target.y - pos.y;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist < config::PROJECTILE_HIT_RADIUS {
            health.kill();
            effects.burst(spell.target.x, spell.target.y, spell.card.def().color, 20, &mut rng.0);
            for (entity, victim_pos, victim_team, victim_health, victim_body) in victims.iter() {
                if *victim_team == *team || !victim_health.is_alive() {
                    continue;
                }
                let d = victim_pos.distance_to(&spell.target);
                if d < spell.radius + victim_body.radius {
                    damage.push(entity, spell.damage);
                }
            }
        } else {
            let step = spell.speed * delta;
            pos.x += dx / dist * step;
            pos.y += dy / dist * step;
        }
    }
}
