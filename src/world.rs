//! Snapshot types: the read-only view handed to the render/UI client.
//!
//! A [`Snapshot`] is extracted once per frame after the tick has run. The
//! client renders from it and never reaches back into the simulation except
//! by submitting play-card commands.

use crate::components::{ArenaId, Body, Health, HitFlash, Position, Projectile, Spell, Team, Tower, Unit};
use crate::economy::Economies;
use crate::effects::{self, Effects};
use crate::systems::lifecycle::MatchState;
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Render radius of projectile dots.
const PROJECTILE_DRAW_RADIUS: f32 = 4.0;
/// Render radius of spell payloads in flight.
const SPELL_DRAW_RADIUS: f32 = 6.0;

/// One live arena entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: u32,
    /// "tower", "unit", "projectile" or "spell".
    pub kind: String,
    pub team: String,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    /// Lit while the entity was hit within the last tenth of a second.
    pub hit_flash: bool,
    /// Card id for units and spells.
    pub card: Option<String>,
    /// Tower kind for towers.
    pub tower: Option<String>,
    /// Flight destination for spells.
    pub target: Option<(f32, f32)>,
}

/// One cosmetic particle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleSnapshot {
    pub x: f32,
    pub y: f32,
    pub color: String,
    /// Remaining life fraction, 1.0 down to 0.
    pub life: f32,
    pub size: f32,
}

/// One floating damage number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextSnapshot {
    pub x: f32,
    pub y: f32,
    pub text: String,
    /// Remaining life fraction, 1.0 down to 0.
    pub life: f32,
}

/// One hand slot with its affordability at snapshot time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandSlotSnapshot {
    pub card: String,
    pub cost: f32,
    pub affordable: bool,
}

/// One side's economy view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomySnapshot {
    /// Fractional elixir; display floors it.
    pub elixir: f32,
    pub hand: Vec<HandSlotSnapshot>,
    pub next_card: String,
}

/// Complete simulation state for one rendered frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Fixed updates run so far.
    pub tick: u64,
    /// Seconds left on the match clock.
    pub time_remaining: f32,
    pub game_over: bool,
    pub winner: Option<String>,
    pub entities: Vec<EntitySnapshot>,
    pub particles: Vec<ParticleSnapshot>,
    pub texts: Vec<TextSnapshot>,
    pub player: EconomySnapshot,
    pub enemy: EconomySnapshot,
}

impl Snapshot {
    /// Extract a snapshot from the ECS world.
    pub fn from_world(world: &mut World) -> Self {
        let mut entities = Vec::new();

        let mut towers = world.query::<(&ArenaId, &Position, &Team, &Health, &Body, &HitFlash, &Tower)>();
        for (id, pos, team, health, body, flash, tower) in towers.iter(world) {
            entities.push(EntitySnapshot {
                id: id.0,
                kind: "tower".to_string(),
                team: team.as_str().to_string(),
                x: pos.x,
                y: pos.y,
                radius: body.radius,
                health: health.current,
                max_health: health.max,
                hit_flash: flash.is_lit(),
                card: None,
                tower: Some(tower.kind.as_str().to_string()),
                target: None,
            });
        }

        let mut units = world.query::<(&ArenaId, &Position, &Team, &Health, &Body, &HitFlash, &Unit)>();
        for (id, pos, team, health, body, flash, unit) in units.iter(world) {
            entities.push(EntitySnapshot {
                id: id.0,
                kind: "unit".to_string(),
                team: team.as_str().to_string(),
                x: pos.x,
                y: pos.y,
                radius: body.radius,
                health: health.current,
                max_health: health.max,
                hit_flash: flash.is_lit(),
                card: Some(unit.card.as_str().to_string()),
                tower: None,
                target: None,
            });
        }

        let mut projectiles = world.query::<(&ArenaId, &Position, &Team, &Health, &Projectile)>();
        for (id, pos, team, health, _) in projectiles.iter(world) {
            entities.push(EntitySnapshot {
                id: id.0,
                kind: "projectile".to_string(),
                team: team.as_str().to_string(),
                x: pos.x,
                y: pos.y,
                radius: PROJECTILE_DRAW_RADIUS,
                health: health.current,
                max_health: health.max,
                hit_flash: false,
                card: None,
                tower: None,
                target: None,
            });
        }

        let mut spells = world.query::<(&ArenaId, &Position, &Team, &Health, &Spell)>();
        for (id, pos, team, health, spell) in spells.iter(world) {
            entities.push(EntitySnapshot {
                id: id.0,
                kind: "spell".to_string(),
                team: team.as_str().to_string(),
                x: pos.x,
                y: pos.y,
                radius: SPELL_DRAW_RADIUS,
                health: health.current,
                max_health: health.max,
                hit_flash: false,
                card: Some(spell.card.as_str().to_string()),
                tower: None,
                target: Some((spell.target.x, spell.target.y)),
            });
        }

        let effects = world.resource::<Effects>();
        let particles = effects
            .particles
            .iter()
            .map(|p| ParticleSnapshot {
                x: p.x,
                y: p.y,
                color: p.color.clone(),
                life: p.life.clamp(0.0, 1.0),
                size: p.size,
            })
            .collect();
        let texts = effects
            .texts
            .iter()
            .map(|t| TextSnapshot {
                x: t.x,
                y: t.y,
                text: t.text.clone(),
                life: (t.life / effects::TEXT_LIFE).clamp(0.0, 1.0),
            })
            .collect();

        let economies = world.resource::<Economies>();
        let state = world.resource::<MatchState>();

        Self {
            tick: state.tick,
            time_remaining: state.time_remaining,
            game_over: state.over,
            winner: state.winner.map(|w| w.as_str().to_string()),
            entities,
            particles,
            texts,
            player: snapshot_economy(&economies.player),
            enemy: snapshot_economy(&economies.enemy),
        }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to a pretty JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn snapshot_economy(economy: &crate::economy::Economy) -> EconomySnapshot {
    EconomySnapshot {
        elixir: economy.elixir,
        hand: economy
            .hand
            .iter()
            .map(|card| HandSlotSnapshot {
                card: card.as_str().to_string(),
                cost: card.def().cost,
                affordable: economy.can_afford(card.def().cost),
            })
            .collect(),
        next_card: economy.next_card.as_str().to_string(),
    }
}
