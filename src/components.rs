//! ECS components for the arena simulation.
//!
//! Components are pure data containers attached to entities. All game
//! logic lives in systems that query these components.
//!
//! Every arena entity carries the common header ([`ArenaId`], [`Position`],
//! [`Team`], [`Health`]). Towers and units additionally carry a collision
//! [`Body`]; the kind component ([`Tower`], [`Unit`], [`Projectile`],
//! [`Spell`]) selects which systems drive the entity. Target references are
//! bare [`Entity`] handles, revalidated every tick before use — the
//! referenced entity may have been despawned in between.

use crate::cards::{CardId, TargetAffinity};
use crate::config::{self, TowerSpec};
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// COMMON HEADER
// ============================================================================

/// 2D position in arena space (x across the lanes, y from the enemy back
/// line down to the player's).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Which side an entity fights for. Projectiles are neutral.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Player,
    Enemy,
    Neutral,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Player => Team::Enemy,
            Team::Enemy => Team::Player,
            Team::Neutral => Team::Neutral,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Team::Player => "player",
            Team::Enemy => "enemy",
            Team::Neutral => "neutral",
        }
    }
}

/// Monotonic per-match entity identifier, stable across snapshots.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArenaId(pub u32);

/// Allocator for [`ArenaId`]s.
#[derive(Resource, Debug, Default)]
pub struct IdCounter(u32);

impl IdCounter {
    pub fn allocate(&mut self) -> ArenaId {
        let id = ArenaId(self.0);
        self.0 += 1;
        id
    }
}

/// Hit points plus the latched death flag.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
    /// Set exactly once when `current` crosses to zero; never cleared.
    pub dead: bool,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max, dead: false }
    }

    pub fn is_alive(&self) -> bool {
        !self.dead && self.current > 0.0
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.current / self.max).clamp(0.0, 1.0)
        }
    }

    /// Apply damage, clamping at zero. Returns true when this call crossed
    /// the entity into death; the dead flag latches on that first crossing.
    pub fn damage(&mut self, amount: f32) -> bool {
        self.current = (self.current - amount).max(0.0);
        if self.current <= 0.0 && !self.dead {
            self.dead = true;
            true
        } else {
            false
        }
    }

    /// Expire the entity outright (projectile arrival, spell detonation).
    pub fn kill(&mut self) {
        self.current = 0.0;
        self.dead = true;
    }
}

/// Collision circle and push weight. Present only on towers and units;
/// projectiles and spells do not collide.
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    pub radius: f32,
    pub mass: f32,
}

impl Body {
    pub fn new(radius: f32, mass: f32) -> Self {
        Self { radius, mass }
    }
}

/// Decaying knockback from collision resolution. Towers carry none and are
/// therefore immune to displacement.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Impulse {
    pub x: f32,
    pub y: f32,
}

/// Render feedback timer, lit while the entity was recently hit.
#[derive(Component, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HitFlash {
    pub timer: f32,
}

impl HitFlash {
    pub fn trigger(&mut self) {
        self.timer = config::HIT_FLASH_DURATION;
    }

    pub fn is_lit(&self) -> bool {
        self.timer > 0.0
    }
}

/// The two bridge lanes. Fixed at spawn from the spawn x coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    Left,
    Right,
}

impl Lane {
    pub fn from_x(x: f32) -> Self {
        if x < config::ARENA_WIDTH / 2.0 {
            Lane::Left
        } else {
            Lane::Right
        }
    }

    /// X coordinate of this lane's bridge center.
    pub fn bridge_x(self) -> f32 {
        match self {
            Lane::Left => config::BRIDGE_LEFT_X,
            Lane::Right => config::BRIDGE_RIGHT_X,
        }
    }
}

// ============================================================================
// KIND COMPONENTS
// ============================================================================

/// The two tower kinds. Losing a king tower loses the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowerKind {
    Princess,
    King,
}

impl TowerKind {
    pub fn spec(self) -> &'static TowerSpec {
        match self {
            TowerKind::Princess => &config::PRINCESS_TOWER,
            TowerKind::King => &config::KING_TOWER,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TowerKind::Princess => "princess",
            TowerKind::King => "king",
        }
    }
}

/// Stationary defender with a ranged auto-attack.
#[derive(Component, Debug, Clone)]
pub struct Tower {
    pub kind: TowerKind,
    /// Lane guarded by a princess tower; king towers have none.
    pub lane: Option<Lane>,
    pub range: f32,
    pub damage: f32,
    /// Seconds per attack.
    pub attack_interval: f32,
    pub cooldown: f32,
    /// Cached target, re-acquired when missing, dead or out of range.
    pub target: Option<Entity>,
}

impl Tower {
    pub fn new(kind: TowerKind, lane: Option<Lane>) -> Self {
        let spec = kind.spec();
        Self {
            kind,
            lane,
            range: spec.range,
            damage: spec.damage,
            attack_interval: spec.attack_interval,
            cooldown: 0.0,
            target: None,
        }
    }
}

/// Behavior state of a mobile unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitState {
    #[default]
    Moving,
    Attacking,
    /// No valid target exists anywhere on the arena.
    Idle,
}

/// Mobile combatant spawned from a troop or building card.
#[derive(Component, Debug, Clone)]
pub struct Unit {
    pub card: CardId,
    pub affinity: TargetAffinity,
    /// Movement speed in units/s. Building-card units are stationary.
    pub speed: f32,
    pub damage: f32,
    pub range: f32,
    /// Seconds per attack.
    pub attack_interval: f32,
    pub projectile_speed: Option<f32>,
    /// Bridge the unit funnels toward, fixed at spawn.
    pub lane: Lane,
    pub state: UnitState,
    /// Re-validated every tick; never an owning reference.
    pub target: Option<Entity>,
    pub cooldown: f32,
}

impl Unit {
    pub fn from_card(card: CardId, spawn_x: f32) -> Self {
        let def = card.def();
        Self {
            card,
            affinity: def.affinity,
            speed: def.speed,
            damage: def.damage,
            range: def.range,
            attack_interval: def.attack_interval,
            projectile_speed: def.projectile_speed,
            lane: Lane::from_x(spawn_x),
            state: UnitState::Moving,
            target: None,
            cooldown: 0.0,
        }
    }
}

/// Homing damage payload. Chases the live target; once the target is gone
/// it flies on to the last known point and expires without dealing damage.
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub target: Entity,
    /// Last known target position.
    pub target_pos: Position,
    pub damage: f32,
    pub speed: f32,
}

/// Area payload travelling to a fixed map point.
#[derive(Component, Debug, Clone)]
pub struct Spell {
    pub card: CardId,
    pub target: Position,
    pub damage: f32,
    /// Blast radius.
    pub radius: f32,
    pub speed: f32,
}

// ============================================================================
// BUNDLE HELPERS
// ============================================================================

/// Bundle for spawning a tower.
#[derive(Bundle)]
pub struct TowerBundle {
    pub id: ArenaId,
    pub position: Position,
    pub team: Team,
    pub health: Health,
    pub body: Body,
    pub hit_flash: HitFlash,
    pub tower: Tower,
}

impl TowerBundle {
    pub fn new(id: ArenaId, kind: TowerKind, lane: Option<Lane>, team: Team, x: f32, y: f32) -> Self {
        let spec = kind.spec();
        Self {
            id,
            position: Position::new(x, y),
            team,
            health: Health::new(spec.health),
            body: Body::new(spec.radius, config::TOWER_MASS),
            hit_flash: HitFlash::default(),
            tower: Tower::new(kind, lane),
        }
    }
}

/// Bundle for spawning a unit from a card.
#[derive(Bundle)]
pub struct UnitBundle {
    pub id: ArenaId,
    pub position: Position,
    pub team: Team,
    pub health: Health,
    pub body: Body,
    pub impulse: Impulse,
    pub hit_flash: HitFlash,
    pub unit: Unit,
}

impl UnitBundle {
    pub fn new(id: ArenaId, card: CardId, team: Team, x: f32, y: f32) -> Self {
        let def = card.def();
        Self {
            id,
            position: Position::new(x, y),
            team,
            health: Health::new(def.health),
            body: Body::new(def.radius, def.radius),
            impulse: Impulse::default(),
            hit_flash: HitFlash::default(),
            unit: Unit::from_card(card, x),
        }
    }
}

/// Bundle for spawning a homing projectile.
#[derive(Bundle)]
pub struct ProjectileBundle {
    pub id: ArenaId,
    pub position: Position,
    pub team: Team,
    pub health: Health,
    pub projectile: Projectile,
}

impl ProjectileBundle {
    pub fn new(
        id: ArenaId,
        x: f32,
        y: f32,
        target: Entity,
        target_pos: Position,
        damage: f32,
        speed: f32,
    ) -> Self {
        Self {
            id,
            position: Position::new(x, y),
            team: Team::Neutral,
            health: Health::new(1.0),
            projectile: Projectile { target, target_pos, damage, speed },
        }
    }
}

/// Bundle for spawning a spell payload.
#[derive(Bundle)]
pub struct SpellBundle {
    pub id: ArenaId,
    pub position: Position,
    pub team: Team,
    pub health: Health,
    pub spell: Spell,
}

impl SpellBundle {
    pub fn new(id: ArenaId, card: CardId, team: Team, start: Position, target: Position) -> Self {
        let def = card.def();
        Self {
            id,
            position: start,
            team,
            health: Health::new(1.0),
            spell: Spell {
                card,
                target,
                damage: def.damage,
                radius: def.radius,
                speed: config::SPELL_PROJECTILE_SPEED,
            },
        }
    }
}
