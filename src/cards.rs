//! The static card catalog.
//!
//! Cards are read-only configuration: each [`CardId`] resolves to a
//! [`CardDef`] holding cost and base stats. The catalog is never mutated
//! at runtime; units copy their stats out of it at spawn.

use serde::{Deserialize, Serialize};

/// Every card in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardId {
    Knight,
    Giant,
    Pekka,
    Archers,
    Arrows,
    Cannon,
}

/// The full catalog, in deck order before shuffling.
pub const DECK: [CardId; 6] = [
    CardId::Knight,
    CardId::Giant,
    CardId::Pekka,
    CardId::Archers,
    CardId::Arrows,
    CardId::Cannon,
];

/// Broad card category. Troops and buildings spawn units; spells launch an
/// area payload from the king tower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Troop,
    Spell,
    Building,
}

/// What a unit is willing to attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetAffinity {
    /// Any ground entity: units, buildings, towers.
    Ground,
    /// Towers and building-kind units only.
    Buildings,
    /// Everything (same set as ground in the current catalog).
    All,
}

/// Immutable per-card stats.
#[derive(Debug, Clone, Copy)]
pub struct CardDef {
    pub id: CardId,
    pub name: &'static str,
    pub cost: f32,
    pub kind: CardKind,
    /// Display color, carried through to snapshots for the render client.
    pub color: &'static str,
    /// Movement speed in units/s. Zero for buildings and spells.
    pub speed: f32,
    pub health: f32,
    pub damage: f32,
    /// Seconds per attack.
    pub attack_interval: f32,
    /// Attack range. For spells this is the blast radius instead.
    pub range: f32,
    /// Collision/render radius.
    pub radius: f32,
    pub affinity: TargetAffinity,
    /// Flight speed of this unit's projectiles; melee units have none.
    pub projectile_speed: Option<f32>,
}

const KNIGHT: CardDef = CardDef {
    id: CardId::Knight,
    name: "Knight",
    cost: 3.0,
    kind: CardKind::Troop,
    color: "#FFC107",
    speed: 60.0,
    health: 1000.0,
    damage: 150.0,
    attack_interval: 1.2,
    range: 0.0,
    radius: 12.0,
    affinity: TargetAffinity::Ground,
    projectile_speed: None,
};

const GIANT: CardDef = CardDef {
    id: CardId::Giant,
    name: "Giant",
    cost: 5.0,
    kind: CardKind::Troop,
    color: "#FF5722",
    speed: 40.0,
    health: 3000.0,
    damage: 200.0,
    attack_interval: 1.5,
    range: 0.0,
    radius: 18.0,
    affinity: TargetAffinity::Buildings,
    projectile_speed: None,
};

const PEKKA: CardDef = CardDef {
    id: CardId::Pekka,
    name: "P.E.K.K.A",
    cost: 7.0,
    kind: CardKind::Troop,
    color: "#673AB7",
    speed: 35.0,
    health: 2500.0,
    damage: 600.0,
    attack_interval: 1.8,
    range: 0.0,
    radius: 15.0,
    affinity: TargetAffinity::Ground,
    projectile_speed: None,
};

const ARCHERS: CardDef = CardDef {
    id: CardId::Archers,
    name: "Archers",
    cost: 3.0,
    kind: CardKind::Troop,
    color: "#E91E63",
    speed: 70.0,
    health: 300.0,
    damage: 80.0,
    attack_interval: 1.0,
    range: 120.0,
    radius: 10.0,
    affinity: TargetAffinity::All,
    projectile_speed: Some(300.0),
};

const ARROWS: CardDef = CardDef {
    id: CardId::Arrows,
    name: "Arrows",
    cost: 3.0,
    kind: CardKind::Spell,
    color: "#03A9F4",
    speed: 0.0,
    health: 0.0,
    damage: 200.0,
    attack_interval: 0.0,
    range: 80.0,
    radius: 80.0,
    affinity: TargetAffinity::All,
    projectile_speed: None,
};

const CANNON: CardDef = CardDef {
    id: CardId::Cannon,
    name: "Cannon",
    cost: 3.0,
    kind: CardKind::Building,
    color: "#795548",
    speed: 0.0,
    health: 800.0,
    damage: 100.0,
    attack_interval: 0.8,
    range: 150.0,
    radius: 20.0,
    affinity: TargetAffinity::Ground,
    projectile_speed: Some(400.0),
};

impl CardId {
    /// Resolve this id to its catalog entry.
    pub fn def(self) -> &'static CardDef {
        match self {
            CardId::Knight => &KNIGHT,
            CardId::Giant => &GIANT,
            CardId::Pekka => &PEKKA,
            CardId::Archers => &ARCHERS,
            CardId::Arrows => &ARROWS,
            CardId::Cannon => &CANNON,
        }
    }

    /// Stable lowercase identifier used in snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            CardId::Knight => "knight",
            CardId::Giant => "giant",
            CardId::Pekka => "pekka",
            CardId::Archers => "archers",
            CardId::Arrows => "arrows",
            CardId::Cannon => "cannon",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_matches_ids() {
        for card in DECK {
            assert_eq!(card.def().id, card);
        }
    }

    #[test]
    fn test_deck_has_no_duplicates() {
        for (i, a) in DECK.iter().enumerate() {
            for b in DECK.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_card_kinds() {
        assert_eq!(CardId::Knight.def().kind, CardKind::Troop);
        assert_eq!(CardId::Arrows.def().kind, CardKind::Spell);
        assert_eq!(CardId::Cannon.def().kind, CardKind::Building);
    }

    #[test]
    fn test_giant_only_hits_buildings() {
        assert_eq!(CardId::Giant.def().affinity, TargetAffinity::Buildings);
    }

    #[test]
    fn test_melee_cards_have_no_projectile() {
        assert!(CardId::Knight.def().projectile_speed.is_none());
        assert!(CardId::Pekka.def().projectile_speed.is_none());
        assert!(CardId::Archers.def().projectile_speed.is_some());
    }
}
