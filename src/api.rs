//! Public API for the simulation.
//!
//! This module provides the main interface for a render/input client to
//! interact with the battle.
//!
//! ## Fixed Timestep
//!
//! The simulation uses a fixed timestep internally (default 60 Hz). When
//! `step(dt)` is called, elapsed time accumulates and whole fixed updates
//! run as needed, so physics and timers behave identically regardless of
//! the host frame rate. The core never reads a wall clock.
//!
//! ## Tick Order
//!
//! Within one fixed update: clock, economies, queued commands, entity
//! behavior, collision resolution, win evaluation, pruning — in that order.
//! A unit that fells the enemy king this tick is seen by the win check
//! before pruning removes anything.

use crate::cards::{CardId, CardKind};
use crate::components::{
    Health, IdCounter, Lane, Position, SpellBundle, Team, Tower, TowerBundle, TowerKind, UnitBundle,
};
use crate::config::{self, SimConfig};
use crate::economy::{Controller, Economies, Economy};
use crate::effects::Effects;
use crate::error::{PlayError, PlayResult};
use crate::rng::SimRng;
use crate::systems::*;
use crate::world::Snapshot;
use bevy_ecs::prelude::*;

/// The main battle container.
///
/// Holds the ECS world and schedule, providing a clean API for:
/// - Stepping the simulation forward
/// - Submitting play-card commands
/// - Extracting state snapshots
pub struct BattleSim {
    world: World,
    schedule: Schedule,
    /// Accumulated real time not yet consumed by fixed updates.
    accumulator: f32,
}

impl BattleSim {
    /// Create a battle with the default configuration and the given seed.
    pub fn new(seed: u64) -> Self {
        Self::with_config(SimConfig::default(), seed)
    }

    /// Create a battle with a custom configuration.
    ///
    /// The human side deploys at the bottom of the arena; the scripted
    /// opponent holds the top. Equal seeds produce identical matches when
    /// stepped and commanded identically.
    pub fn with_config(sim_config: SimConfig, seed: u64) -> Self {
        let mut world = World::new();
        let mut rng = SimRng::from_seed(seed);
        let economies = Economies {
            player: Economy::new(Team::Player, Controller::Human, &mut rng.0),
            enemy: Economy::new(Team::Enemy, Controller::Scripted, &mut rng.0),
        };

        world.insert_resource(DeltaTime(sim_config.fixed_timestep));
        world.insert_resource(MatchState::new(sim_config.match_duration));
        world.insert_resource(economies);
        world.insert_resource(rng);
        world.insert_resource(Effects::default());
        world.insert_resource(DamageQueue::default());
        world.insert_resource(PendingShots::default());
        world.insert_resource(CommandQueue::default());
        world.insert_resource(IdCounter::default());
        world.insert_resource(sim_config);

        // One chained schedule; the order is load-bearing (see module doc).
        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                economy_system,
                play_command_system,
                hit_flash_system,
                impulse_system,
                tower_system,
                unit_system,
                projectile_system,
                spell_system,
                shot_flush_system,
                damage_apply_system,
                collision_system,
                win_check_system,
                effects_system,
                prune_system,
            )
                .chain(),
        );

        let mut sim = Self { world, schedule, accumulator: 0.0 };
        sim.init_towers();
        sim
    }

    /// Place the six towers: two princess towers and a king per side.
    fn init_towers(&mut self) {
        let w = config::ARENA_WIDTH;
        let h = config::ARENA_HEIGHT;
        let pd = config::PRINCESS_TOWER_DEPTH;
        let kd = config::KING_TOWER_DEPTH;
        let placements = [
            (TowerKind::Princess, Some(Lane::Left), Team::Enemy, w * 0.25, pd),
            (TowerKind::Princess, Some(Lane::Right), Team::Enemy, w * 0.75, pd),
            (TowerKind::King, None, Team::Enemy, w * 0.5, kd),
            (TowerKind::Princess, Some(Lane::Left), Team::Player, w * 0.25, h - pd),
            (TowerKind::Princess, Some(Lane::Right), Team::Player, w * 0.75, h - pd),
            (TowerKind::King, None, Team::Player, w * 0.5, h - kd),
        ];
        for (kind, lane, team, x, y) in placements {
            let id = self.world.resource_mut::<IdCounter>().allocate();
            self.world.spawn(TowerBundle::new(id, kind, lane, team, x, y));
        }
    }

    /// Advance the simulation by `dt` seconds of real time.
    ///
    /// Time accumulates and whole fixed steps are consumed; a long frame
    /// runs several updates, a short one possibly none.
    pub fn step(&mut self, dt: f32) {
        let fixed_dt = self.world.resource::<SimConfig>().fixed_timestep;
        self.accumulator += dt;
        while self.accumulator >= fixed_dt {
            self.fixed_update(fixed_dt);
            self.accumulator -= fixed_dt;
        }
    }

    /// Run a single fixed update.
    fn fixed_update(&mut self, dt: f32) {
        // Game over halts all further mutation.
        if self.world.resource::<MatchState>().over {
            return;
        }

        let expired = {
            let mut state = self.world.resource_mut::<MatchState>();
            state.tick += 1;
            state.time_remaining = (state.time_remaining - dt).max(0.0);
            state.time_remaining <= 0.0
        };
        if expired {
            self.evaluate_time_win();
            return;
        }

        self.world.resource_mut::<DeltaTime>().0 = dt;
        self.schedule.run(&mut self.world);
    }

    /// Clock ran out: the side with more total surviving tower HP wins.
    fn evaluate_time_win(&mut self) {
        let mut player_hp = 0.0;
        let mut enemy_hp = 0.0;
        let mut towers = self.world.query::<(&Team, &Health, &Tower)>();
        for (team, health, _) in towers.iter(&self.world) {
            match team {
                Team::Player => player_hp += health.current,
                Team::Enemy => enemy_hp += health.current,
                Team::Neutral => {}
            }
        }
        let winner = if player_hp > enemy_hp {
            Winner::Player
        } else if enemy_hp > player_hp {
            Winner::Enemy
        } else {
            Winner::Draw
        };
        self.world.resource_mut::<MatchState>().finish(winner);
    }

    /// Submit a play-card command for a side.
    ///
    /// Validation order: hand slot, placement legality, affordability. Any
    /// failure leaves every part of the state untouched.
    pub fn play_card(&mut self, side: Team, index: usize, x: f32, y: f32) -> PlayResult<()> {
        execute_play_card(&mut self.world, side, index, x, y)
    }

    /// Extract the per-frame snapshot for the render client.
    pub fn snapshot(&mut self) -> Snapshot {
        Snapshot::from_world(&mut self.world)
    }

    /// Seconds left on the match clock.
    pub fn time_remaining(&self) -> f32 {
        self.world.resource::<MatchState>().time_remaining
    }

    /// Fixed updates run so far.
    pub fn current_tick(&self) -> u64 {
        self.world.resource::<MatchState>().tick
    }

    pub fn is_over(&self) -> bool {
        self.world.resource::<MatchState>().over
    }

    pub fn winner(&self) -> Option<Winner> {
        self.world.resource::<MatchState>().winner
    }

    /// Hand control of a side to a human or the scripted policy.
    pub fn set_controller(&mut self, team: Team, controller: Controller) {
        self.world.resource_mut::<Economies>().side_mut(team).controller = controller;
    }

    /// Spawn a unit directly, bypassing economy and placement checks.
    pub fn spawn_unit(&mut self, card: CardId, team: Team, x: f32, y: f32) {
        let id = self.world.resource_mut::<IdCounter>().allocate();
        self.world.spawn(UnitBundle::new(id, card, team, x, y));
    }

    /// Launch a spell payload from the side's king tower, bypassing economy.
    pub fn spawn_spell(&mut self, card: CardId, team: Team, x: f32, y: f32) {
        spawn_spell(&mut self.world, card, team, x, y);
    }

    /// Direct access to the ECS world (for advanced usage).
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the ECS world (for advanced usage).
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

/// Exclusive system draining the command queue.
///
/// Scripted-side commands go through the same validation as external ones;
/// failures are absorbed silently.
pub fn play_command_system(world: &mut World) {
    let commands = std::mem::take(&mut world.resource_mut::<CommandQueue>().0);
    for command in commands {
        if let Err(err) = execute_play_card(world, command.side, command.index, command.x, command.y) {
            log::trace!("queued play rejected: {err}");
        }
    }
}

/// Validate and execute one play-card command.
fn execute_play_card(world: &mut World, side: Team, index: usize, x: f32, y: f32) -> PlayResult<()> {
    let card = {
        let economies = world.resource::<Economies>();
        let economy = economies.side(side);
        match economy.hand.get(index) {
            Some(&card) => card,
            None => return Err(PlayError::InvalidSlot { index }),
        }
    };
    let def = card.def();

    if def.kind != CardKind::Spell && !placement_legal(world, side, x, y) {
        return Err(PlayError::IllegalPlacement);
    }

    {
        let economies = world.resource::<Economies>();
        let economy = economies.side(side);
        if !economy.can_afford(def.cost) {
            return Err(PlayError::InsufficientElixir { have: economy.elixir, need: def.cost });
        }
    }
    {
        let mut economies = world.resource_mut::<Economies>();
        let economy = economies.side_mut(side);
        economy.spend(def.cost);
        economy.cycle(index);
    }

    match def.kind {
        CardKind::Spell => spawn_spell(world, card, side, x, y),
        CardKind::Troop | CardKind::Building => spawn_units(world, card, side, x, y),
    }
    log::debug!("{} plays {} at ({x:.0}, {y:.0})", side.as_str(), def.name);
    Ok(())
}

/// Non-spell placement legality.
///
/// The point must be on the caller's own side of the river, unless the
/// pocket exception applies: the opposing princess tower guarding the
/// point's horizontal half is down AND the point keeps clear of the
/// opposing back line.
fn placement_legal(world: &mut World, side: Team, x: f32, y: f32) -> bool {
    let own_half = match side {
        Team::Player => y > config::RIVER_Y,
        Team::Enemy => y < config::RIVER_Y,
        Team::Neutral => false,
    };
    if own_half {
        return true;
    }

    let lane = Lane::from_x(x);
    let opponent = side.opponent();
    let mut towers = world.query::<(&Team, &Health, &Tower)>();
    let princess_alive = towers
        .iter(world)
        .any(|(team, health, tower)| *team == opponent && tower.lane == Some(lane) && health.is_alive());
    if princess_alive {
        return false;
    }

    match side {
        Team::Player => y > config::POCKET_MARGIN,
        Team::Enemy => y < config::ARENA_HEIGHT - config::POCKET_MARGIN,
        Team::Neutral => false,
    }
}

/// Spawn the unit payload of a troop or building card. The archer card
/// deploys as a lateral pair.
fn spawn_units(world: &mut World, card: CardId, team: Team, x: f32, y: f32) {
    let offsets: &[f32] = if card == CardId::Archers {
        &[-config::PAIR_SPAWN_OFFSET, config::PAIR_SPAWN_OFFSET]
    } else {
        &[0.0]
    };
    for offset in offsets {
        let id = world.resource_mut::<IdCounter>().allocate();
        world.spawn(UnitBundle::new(id, card, team, x + offset, y));
    }
}

/// Launch a spell payload from the side's king tower toward the point.
fn spawn_spell(world: &mut World, card: CardId, team: Team, x: f32, y: f32) {
    let start = {
        let mut towers = world.query::<(&Position, &Team, &Tower)>();
        towers
            .iter(world)
            .find(|(_, tower_team, tower)| **tower_team == team && tower.kind == TowerKind::King)
            .map(|(pos, _, _)| *pos)
    };
    // A missing king only happens after the match is decided; fall back to
    // the back line center.
    let start = start.unwrap_or_else(|| {
        let y = match team {
            Team::Player => config::ARENA_HEIGHT,
            _ => 0.0,
        };
        Position::new(config::ARENA_WIDTH / 2.0, y)
    });
    let id = world.resource_mut::<IdCounter>().allocate();
    world.spawn(SpellBundle::new(id, card, team, start, Position::new(x, y)));
}
