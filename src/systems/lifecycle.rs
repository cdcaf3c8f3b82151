//! Per-tick upkeep: feedback timers, cosmetic aging, win evaluation and
//! pruning.

use crate::components::{Health, HitFlash, Team, Tower, TowerKind};
use crate::effects::Effects;
use crate::systems::DeltaTime;
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Match result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Player,
    Enemy,
    Draw,
}

impl Winner {
    pub fn as_str(self) -> &'static str {
        match self {
            Winner::Player => "player",
            Winner::Enemy => "enemy",
            Winner::Draw => "draw",
        }
    }
}

/// Match clock and outcome.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MatchState {
    /// Seconds left on the match clock.
    pub time_remaining: f32,
    /// Fixed updates run so far.
    pub tick: u64,
    pub over: bool,
    pub winner: Option<Winner>,
}

impl MatchState {
    pub fn new(duration: f32) -> Self {
        Self {
            time_remaining: duration,
            tick: 0,
            over: false,
            winner: None,
        }
    }

    /// Latch the result. Later calls are ignored.
    pub fn finish(&mut self, winner: Winner) {
        if !self.over {
            self.over = true;
            self.winner = Some(winner);
            log::info!("match over: {} wins", winner.as_str());
        }
    }
}

/// System decaying hit-flash timers.
pub fn hit_flash_system(dt: Res<DeltaTime>, mut query: Query<&mut HitFlash>) {
    let delta = dt.0;
    for mut flash in query.iter_mut() {
        if flash.timer > 0.0 {
            flash.timer = (flash.timer - delta).max(0.0);
        }
    }
}

/// System aging cosmetic particles and floating texts.
pub fn effects_system(dt: Res<DeltaTime>, mut effects: ResMut<Effects>) {
    effects.update(dt.0);
}

/// System ending the match the moment a king tower is gone.
///
/// The player's king is checked first, so a tick that fells both kings
/// counts as an enemy win.
pub fn win_check_system(towers: Query<(&Team, &Health, &Tower)>, mut state: ResMut<MatchState>) {
    if state.over {
        return;
    }
    let king_alive = |side: Team| {
        towers
            .iter()
            .any(|(team, health, tower)| *team == side && tower.kind == TowerKind::King && health.is_alive())
    };
    if !king_alive(Team::Player) {
        state.finish(Winner::Enemy);
    } else if !king_alive(Team::Enemy) {
        state.finish(Winner::Player);
    }
}

/// Exclusive system despawning everything flagged dead this tick.
pub fn prune_system(world: &mut World) {
    let mut query = world.query::<(Entity, &Health)>();
    let dead: Vec<Entity> = query
        .iter(world)
        .filter(|(_, health)| health.dead)
        .map(|(entity, _)| entity)
        .collect();
    for entity in dead {
        world.despawn(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use crate::components::{ArenaId, Lane, TowerBundle, UnitBundle};
    use crate::config;

    fn spawn_kings(world: &mut World) -> (Entity, Entity) {
        let player = world
            .spawn(TowerBundle::new(ArenaId(0), TowerKind::King, None, Team::Player, 200.0, 560.0))
            .id();
        let enemy = world
            .spawn(TowerBundle::new(ArenaId(1), TowerKind::King, None, Team::Enemy, 200.0, 40.0))
            .id();
        (player, enemy)
    }

    fn run_win_check(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(win_check_system);
        schedule.run(world);
    }

    #[test]
    fn test_no_winner_while_kings_stand() {
        let mut world = World::new();
        world.insert_resource(MatchState::new(config::MATCH_DURATION));
        spawn_kings(&mut world);
        run_win_check(&mut world);
        let state = world.resource::<MatchState>();
        assert!(!state.over);
        assert_eq!(state.winner, None);
    }

    #[test]
    fn test_dead_enemy_king_means_player_win() {
        let mut world = World::new();
        world.insert_resource(MatchState::new(config::MATCH_DURATION));
        let (_, enemy_king) = spawn_kings(&mut world);
        if let Some(mut health) = world.entity_mut(enemy_king).get_mut::<Health>() {
            health.kill();
        }
        run_win_check(&mut world);
        let state = world.resource::<MatchState>();
        assert!(state.over);
        assert_eq!(state.winner, Some(Winner::Player));
    }

    #[test]
    fn test_both_kings_down_is_enemy_win() {
        let mut world = World::new();
        world.insert_resource(MatchState::new(config::MATCH_DURATION));
        let (player_king, enemy_king) = spawn_kings(&mut world);
        for king in [player_king, enemy_king] {
            if let Some(mut health) = world.entity_mut(king).get_mut::<Health>() {
                health.kill();
            }
        }
        run_win_check(&mut world);
        assert_eq!(world.resource::<MatchState>().winner, Some(Winner::Enemy));
    }

    #[test]
    fn test_princess_loss_does_not_end_match() {
        let mut world = World::new();
        world.insert_resource(MatchState::new(config::MATCH_DURATION));
        spawn_kings(&mut world);
        let princess = world
            .spawn(TowerBundle::new(
                ArenaId(2),
                TowerKind::Princess,
                Some(Lane::Left),
                Team::Enemy,
                100.0,
                80.0,
            ))
            .id();
        if let Some(mut health) = world.entity_mut(princess).get_mut::<Health>() {
            health.kill();
        }
        run_win_check(&mut world);
        assert!(!world.resource::<MatchState>().over);
    }

    #[test]
    fn test_prune_removes_dead_only() {
        let mut world = World::new();
        let alive = world
            .spawn(UnitBundle::new(ArenaId(0), CardId::Knight, Team::Player, 100.0, 400.0))
            .id();
        let dead = world
            .spawn(UnitBundle::new(ArenaId(1), CardId::Knight, Team::Enemy, 100.0, 300.0))
            .id();
        if let Some(mut health) = world.entity_mut(dead).get_mut::<Health>() {
            health.kill();
        }

        prune_system(&mut world);

        assert!(world.get_entity(alive).is_ok());
        assert!(world.get_entity(dead).is_err());
    }

    #[test]
    fn test_hit_flash_decays() {
        let mut world = World::new();
        world.insert_resource(DeltaTime(0.06));
        let entity = world
            .spawn(UnitBundle::new(ArenaId(0), CardId::Knight, Team::Player, 0.0, 0.0))
            .id();
        if let Some(mut flash) = world.entity_mut(entity).get_mut::<HitFlash>() {
            flash.trigger();
        }

        let mut schedule = Schedule::default();
        schedule.add_systems(hit_flash_system);
        schedule.run(&mut world);
        let flash = world.entity(entity).get::<HitFlash>().copied().expect("flash");
        assert!(flash.is_lit());

        schedule.run(&mut world);
        let flash = world.entity(entity).get::<HitFlash>().copied().expect("flash");
        assert!(!flash.is_lit());
    }
}
