//! Unit behavior: targeting, lane-funneled movement and attacks.
//!
//! Movement is governed by the two-bridge river rule. A unit that has to
//! cross funnels laterally to its lane's bridge before it is allowed into
//! the river band; a hard clamp keeps off-bridge units out of the water
//! even when a straight-line step toward the target would dip into it,
//! while still letting the horizontal component slide them toward a bridge.

use crate::cards::{CardKind, TargetAffinity};
use crate::components::{Body, Health, Position, Team, Tower, Unit, UnitState};
use crate::config;
use crate::systems::combat::{DamageQueue, PendingShots};
use crate::systems::DeltaTime;
use bevy_ecs::prelude::*;

/// Read-only view of a potential target, captured before the mutable pass.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    entity: Entity,
    x: f32,
    y: f32,
    radius: f32,
    team: Team,
    alive: bool,
    /// Towers and building-card units; what `buildings` affinity may hit.
    is_building: bool,
}

/// System driving every unit's target/move/attack loop.
///
/// Runs in two phases over one query: a read-only pass snapshots all
/// collidable entities as targeting candidates, then the mutable pass
/// advances each unit. Unlike towers, units re-target only when the current
/// target is missing or dead — a unit will happily walk across the arena
/// toward a far target.
pub fn unit_system(
    dt: Res<DeltaTime>,
    mut query: Query<(
        Entity,
        &mut Position,
        &Team,
        &Health,
        &Body,
        Option<&mut Unit>,
        Option<&Tower>,
    )>,
    mut damage: ResMut<DamageQueue>,
    mut shots: ResMut<PendingShots>,
) {
    let delta = dt.0;

    let candidates: Vec<Candidate> = query
        .iter()
        .map(|(entity, pos, team, health, body, unit, tower)| Candidate {
            entity,
            x: pos.x,
            y: pos.y,
            radius: body.radius,
            team: *team,
            alive: health.is_alive(),
            is_building: tower.is_some()
                || unit.is_some_and(|u| u.card.def().kind == CardKind::Building),
        })
        .collect();

    for (entity, mut pos, team, health, body, unit, _) in query.iter_mut() {
        let Some(mut unit) = unit else { continue };
        if !health.is_alive() {
            continue;
        }
        unit.cooldown -= delta;

        let target_alive = unit
            .target
            .and_then(|t| candidates.iter().find(|c| c.entity == t))
            .is_some_and(|c| c.alive);
        if !target_alive {
            unit.target = acquire_target(entity, &pos, *team, unit.affinity, &candidates);
            unit.state = UnitState::Moving;
        }

        let target = unit
            .target
            .and_then(|t| candidates.iter().find(|c| c.entity == t).copied());
        match target {
            Some(candidate) => {
                let dist = pos.distance_to(&Position::new(candidate.x, candidate.y));
                let reach = body.radius + candidate.radius + unit.range;
                unit.state = if dist <= reach {
                    UnitState::Attacking
                } else {
                    UnitState::Moving
                };
            }
            None => unit.state = UnitState::Idle,
        }

        match unit.state {
            UnitState::Moving => {
                if let Some(candidate) = target {
                    step_toward(&mut pos, &unit, &candidate, delta);
                }
            }
            UnitState::Attacking => {
                if unit.cooldown <= 0.0 {
                    if let Some(candidate) = target {
                        attack(&pos, &unit, &candidate, &mut damage, &mut shots);
                        unit.cooldown = unit.attack_interval;
                    }
                }
            }
            UnitState::Idle => {}
        }
    }
}

/// Nearest living enemy, with `buildings` affinity restricted to towers and
/// building-kind units. Distance ties break to the first candidate found.
fn acquire_target(
    me: Entity,
    pos: &Position,
    team: Team,
    affinity: TargetAffinity,
    candidates: &[Candidate],
) -> Option<Entity> {
    candidates
        .iter()
        .filter(|c| c.entity != me && c.team != team && c.alive)
        .filter(|c| affinity != TargetAffinity::Buildings || c.is_building)
        .min_by(|a, b| {
            let da = (a.x - pos.x).powi(2) + (a.y - pos.y).powi(2);
            let db = (b.x - pos.x).powi(2) + (b.y - pos.y).powi(2);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|c| c.entity)
}

/// Melee units hit their target directly; ranged units loose a projectile.
fn attack(
    pos: &Position,
    unit: &Unit,
    target: &Candidate,
    damage: &mut DamageQueue,
    shots: &mut PendingShots,
) {
    if unit.range > config::MELEE_THRESHOLD {
        shots.fire(
            pos,
            target.entity,
            Position::new(target.x, target.y),
            unit.damage,
            unit.projectile_speed.unwrap_or(config::DEFAULT_PROJECTILE_SPEED),
        );
    } else {
        damage.push(target.entity, unit.damage);
    }
}

/// Advance one movement step toward the target, honoring the river rules.
fn step_toward(pos: &mut Position, unit: &Unit, target: &Candidate, delta: f32) {
    let river_y = config::RIVER_Y;
    let needs_crossing = (pos.y > river_y) != (target.y > river_y);

    let (goal_x, goal_y) = if needs_crossing {
        let near_river = (pos.y - river_y).abs() < config::FUNNEL_DISTANCE;
        if near_river && on_bridge(pos.x) {
            // Lined up with a bridge: head straight for the target.
            (target.x, target.y)
        } else {
            // Funnel to this lane's bridge waypoint first.
            (unit.lane.bridge_x(), river_y)
        }
    } else {
        (target.x, target.y)
    };

    let dx = goal_x - pos.x;
    let dy = goal_y - pos.y;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist <= 1.0 {
        return;
    }
    let step = unit.speed * delta;
    let next_x = pos.x + dx / dist * step;
    let mut next_y = pos.y + dy / dist * step;

    // Hard river stop: a step that would land in the water off-bridge keeps
    // its horizontal slide but freezes the vertical component.
    if !on_bridge(next_x)
        && next_y > river_y - config::RIVER_HALF_HEIGHT
        && next_y < river_y + config::RIVER_HALF_HEIGHT
    {
        next_y = pos.y;
    }

    pos.x = next_x;
    pos.y = next_y;
}

/// Whether an x coordinate lies within either bridge band.
fn on_bridge(x: f32) -> bool {
    let half = config::BRIDGE_WIDTH / 2.0;
    (x - config::BRIDGE_LEFT_X).abs() < half || (x - config::BRIDGE_RIGHT_X).abs() < half
}
