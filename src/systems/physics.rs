//! Soft-body separation: impulse integration and pairwise overlap
//! resolution.
//!
//! There is no full physics engine. Overlapping circles push each other
//! apart through decaying impulses weighted by relative mass, which is
//! enough to stop units stacking while letting heavy units shoulder light
//! ones aside. Towers are immovable: they carry no [`Impulse`] component
//! and never receive a push.

use crate::components::{Body, Impulse, Position, Tower};
use crate::config;
use bevy_ecs::prelude::*;

/// System integrating decaying knockback impulses into positions.
pub fn impulse_system(mut query: Query<(&mut Position, &mut Impulse)>) {
    for (mut pos, mut impulse) in query.iter_mut() {
        if impulse.x.abs() > config::IMPULSE_EPSILON || impulse.y.abs() > config::IMPULSE_EPSILON {
            pos.x += impulse.x;
            pos.y += impulse.y;
            impulse.x *= config::IMPULSE_DECAY;
            impulse.y *= config::IMPULSE_DECAY;
        }
    }
}

/// Snapshot of one collidable body.
#[derive(Debug, Clone, Copy)]
struct Collider {
    entity: Entity,
    x: f32,
    y: f32,
    radius: f32,
    mass: f32,
    is_tower: bool,
}

/// System resolving pairwise circle overlaps between towers and units.
///
/// For every unordered pair (tower-tower pairs excepted), an overlap adds
/// half the penetration along the separation axis to each mutable side,
/// weighted by the opposite body's mass share. Pushes accumulate as
/// impulses rather than instant displacement.
pub fn collision_system(
    bodies: Query<(Entity, &Position, &Body, Option<&Tower>)>,
    mut impulses: Query<&mut Impulse>,
) {
    let colliders: Vec<Collider> = bodies
        .iter()
        .map(|(entity, pos, body, tower)| Collider {
            entity,
            x: pos.x,
            y: pos.y,
            radius: body.radius,
            mass: body.mass,
            is_tower: tower.is_some(),
        })
        .collect();

    for i in 0..colliders.len() {
        for j in (i + 1)..colliders.len() {
            let a = colliders[i];
            let b = colliders[j];
            if a.is_tower && b.is_tower {
                continue;
            }
            let dx = a.x - b.x;
            let dy = a.y - b.y;
            let dist_sq = dx * dx + dy * dy;
            let min_dist = a.radius + b.radius;
            if dist_sq >= min_dist * min_dist || dist_sq <= 0.0 {
                continue;
            }
            let dist = dist_sq.sqrt();
            let overlap = min_dist - dist;
            let fx = dx / dist * overlap * 0.5;
            let fy = dy / dist * overlap * 0.5;
            let total_mass = a.mass + b.mass;
            if !a.is_tower {
                if let Ok(mut impulse) = impulses.get_mut(a.entity) {
                    impulse.x += fx * (b.mass / total_mass);
                    impulse.y += fy * (b.mass / total_mass);
                }
            }
            if !b.is_tower {
                if let Ok(mut impulse) = impulses.get_mut(b.entity) {
                    impulse.x -= fx * (a.mass / total_mass);
                    impulse.y -= fy * (a.mass / total_mass);
                }
            }
        }
    }
}
