//! Tower behavior: target acquisition and ranged auto-attack.

use crate::components::{Health, Position, Team, Tower, Unit};
use crate::config;
use crate::systems::combat::PendingShots;
use crate::systems::DeltaTime;
use bevy_ecs::prelude::*;

/// System driving every tower's seek/fire loop.
///
/// A tower re-acquires its target whenever the current one is missing, dead
/// or beyond range, picking the nearest living enemy unit (first found wins
/// a distance tie). With a target locked and the cooldown elapsed it fires
/// a homing projectile and resets the cooldown to its attack interval.
pub fn tower_system(
    dt: Res<DeltaTime>,
    mut towers: Query<(&Position, &Team, &Health, &mut Tower)>,
    units: Query<(Entity, &Position, &Team, &Health), With<Unit>>,
    mut shots: ResMut<PendingShots>,
) {
    let delta = dt.0;
    for (pos, team, health, mut tower) in towers.iter_mut() {
        if !health.is_alive() {
            continue;
        }
        tower.cooldown -= delta;

        let target_valid = tower.target.is_some_and(|target| {
            units.get(target).is_ok_and(|(_, target_pos, _, target_health)| {
                target_health.is_alive() && pos.distance_to(target_pos) <= tower.range
            })
        });
        if !target_valid {
            tower.target = find_target(pos, *team, tower.range, &units);
        }

        if let Some(target) = tower.target {
            if tower.cooldown <= 0.0 {
                if let Ok((_, target_pos, _, _)) = units.get(target) {
                    shots.fire(
                        pos,
                        target,
                        *target_pos,
                        tower.damage,
                        config::DEFAULT_PROJECTILE_SPEED,
                    );
                }
                tower.cooldown = tower.attack_interval;
            }
        }
    }
}

/// Nearest living enemy unit within range.
fn find_target(
    pos: &Position,
    team: Team,
    range: f32,
    units: &Query<(Entity, &Position, &Team, &Health), With<Unit>>,
) -> Option<Entity> {
    let mut best = None;
    let mut best_dist = f32::MAX;
    for (entity, unit_pos, unit_team, unit_health) in units.iter() {
        if *unit_team == team || !unit_health.is_alive() {
            continue;
        }
        let dist = pos.distance_to(unit_pos);
        if dist <= range && dist < best_dist {
            best_dist = dist;
            best = Some(entity);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use crate::components::{IdCounter, TowerBundle, TowerKind, UnitBundle};

    fn test_world() -> World {
        let mut world = World::new();
        world.insert_resource(DeltaTime(1.0 / 60.0));
        world.insert_resource(PendingShots::default());
        world
    }

    fn schedule() -> Schedule {
        let mut schedule = Schedule::default();
        schedule.add_systems(tower_system);
        schedule
    }

    #[test]
    fn test_tower_fires_at_unit_in_range() {
        let mut world = test_world();
        let mut counter = IdCounter::default();
        world.spawn(TowerBundle::new(
            counter.allocate(),
            TowerKind::Princess,
            None,
            Team::Player,
            100.0,
            520.0,
        ));
        let intruder = world
            .spawn(UnitBundle::new(counter.allocate(), CardId::Knight, Team::Enemy, 100.0, 400.0))
            .id();

        schedule().run(&mut world);

        // Cooldown starts elapsed, so the first tick fires.
        let shots = world.resource::<PendingShots>();
        assert_eq!(shots.0.len(), 1);
        assert_eq!(shots.0[0].target, intruder);
        assert_eq!(shots.0[0].damage, 80.0);
    }

    #[test]
    fn test_tower_ignores_unit_out_of_range() {
        let mut world = test_world();
        let mut counter = IdCounter::default();
        world.spawn(TowerBundle::new(
            counter.allocate(),
            TowerKind::Princess,
            None,
            Team::Player,
            100.0,
            520.0,
        ));
        // Princess range is 200; this knight sits 300 away.
        world.spawn(UnitBundle::new(counter.allocate(), CardId::Knight, Team::Enemy, 100.0, 220.0));

        schedule().run(&mut world);

        assert!(world.resource::<PendingShots>().0.is_empty());
        let mut query = world.query::<&Tower>();
        assert!(query.single(&world).target.is_none());
    }

    #[test]
    fn test_tower_picks_nearest_unit() {
        let mut world = test_world();
        let mut counter = IdCounter::default();
        world.spawn(TowerBundle::new(
            counter.allocate(),
            TowerKind::King,
            None,
            Team::Player,
            200.0,
            560.0,
        ));
        world.spawn(UnitBundle::new(counter.allocate(), CardId::Knight, Team::Enemy, 200.0, 400.0));
        let near = world
            .spawn(UnitBundle::new(counter.allocate(), CardId::Knight, Team::Enemy, 200.0, 480.0))
            .id();

        schedule().run(&mut world);

        let mut query = world.query::<&Tower>();
        assert_eq!(query.single(&world).target, Some(near));
    }

    #[test]
    fn test_cooldown_gates_fire_rate() {
        let mut world = test_world();
        let mut counter = IdCounter::default();
        world.spawn(TowerBundle::new(
            counter.allocate(),
            TowerKind::Princess,
            None,
            Team::Player,
            100.0,
            520.0,
        ));
        world.spawn(UnitBundle::new(counter.allocate(), CardId::Giant, Team::Enemy, 100.0, 420.0));

        let mut schedule = schedule();
        // One second of ticks: at 0.8 s/attack the tower gets off exactly
        // two shots (t=0 and t=0.8).
        for _ in 0..60 {
            schedule.run(&mut world);
        }
        assert_eq!(world.resource::<PendingShots>().0.len(), 2);
    }

    #[test]
    fn test_dead_target_is_dropped() {
        let mut world = test_world();
        let mut counter = IdCounter::default();
        world.spawn(TowerBundle::new(
            counter.allocate(),
            TowerKind::Princess,
            None,
            Team::Player,
            100.0,
            520.0,
        ));
        let victim = world
            .spawn(UnitBundle::new(counter.allocate(), CardId::Knight, Team::Enemy, 100.0, 420.0))
            .id();

        schedule().run(&mut world);
        {
            let mut query = world.query::<&Tower>();
            assert_eq!(query.single(&world).target, Some(victim));
        }

        if let Some(mut health) = world.entity_mut(victim).get_mut::<Health>() {
            health.kill();
        }
        schedule().run(&mut world);

        let mut query = world.query::<&Tower>();
        assert_eq!(query.single(&world).target, None);
    }
}
