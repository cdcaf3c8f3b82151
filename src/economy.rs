//! Per-side resource economy: elixir accrual and hand/deck cycling.
//!
//! Each side owns an [`Economy`]. The deck is a circular queue over the six
//! catalog cards: four are in the hand, one sits in the "next" preview slot
//! and the rest wait in the deck. Playing a slot pushes the used card to
//! the back, promotes the preview into the slot and draws a fresh preview —
//! a closed rotation that never loses or duplicates a card.

use crate::cards::{CardId, DECK};
use crate::components::Team;
use crate::config;
use bevy_ecs::prelude::*;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use std::collections::VecDeque;

/// Who makes decisions for a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controller {
    /// Decisions arrive as external play-card commands.
    Human,
    /// Decisions are rolled on a randomized timer by the policy system.
    Scripted,
}

/// Resource economy and drawable actions of one side.
#[derive(Debug, Clone)]
pub struct Economy {
    pub team: Team,
    pub controller: Controller,
    pub elixir: f32,
    elixir_timer: f32,
    pub deck: VecDeque<CardId>,
    pub hand: [CardId; 4],
    pub next_card: CardId,
    /// Time since the scripted side's last decision.
    pub action_timer: f32,
    /// Deadline for the scripted side's next decision attempt.
    pub next_action_at: f32,
}

impl Economy {
    /// Shuffle the catalog and deal the opening hand plus preview.
    pub fn new(team: Team, controller: Controller, rng: &mut Pcg32) -> Self {
        let mut cards = DECK;
        cards.shuffle(rng);
        Self {
            team,
            controller,
            elixir: config::STARTING_ELIXIR,
            elixir_timer: 0.0,
            deck: VecDeque::from(vec![cards[5]]),
            hand: [cards[0], cards[1], cards[2], cards[3]],
            next_card: cards[4],
            action_timer: 0.0,
            next_action_at: config::AI_FIRST_DECISION,
        }
    }

    /// Advance elixir accrual. Whole points arrive every
    /// [`config::ELIXIR_RATE`] seconds; the fractional remainder carries
    /// over. The accumulator does not advance while elixir is at the cap.
    pub fn accrue(&mut self, dt: f32) {
        if self.elixir >= config::MAX_ELIXIR {
            return;
        }
        self.elixir_timer += dt;
        while self.elixir_timer >= config::ELIXIR_RATE && self.elixir < config::MAX_ELIXIR {
            self.elixir_timer -= config::ELIXIR_RATE;
            self.elixir = (self.elixir + 1.0).min(config::MAX_ELIXIR);
        }
    }

    pub fn can_afford(&self, cost: f32) -> bool {
        self.elixir >= cost
    }

    pub fn spend(&mut self, cost: f32) {
        self.elixir -= cost;
    }

    /// Rotate the played slot: used card to the deck back, preview into the
    /// slot, new preview from the deck front.
    pub fn cycle(&mut self, index: usize) {
        let used = self.hand[index];
        self.deck.push_back(used);
        self.hand[index] = self.next_card;
        // Never empty here: the used card went to the back above.
        if let Some(card) = self.deck.pop_front() {
            self.next_card = card;
        }
    }

    /// Fractional accrual progress toward the next elixir point.
    pub fn elixir_progress(&self) -> f32 {
        self.elixir_timer / config::ELIXIR_RATE
    }
}

/// Both sides' economies.
#[derive(Resource, Debug, Clone)]
pub struct Economies {
    pub player: Economy,
    pub enemy: Economy,
}

impl Economies {
    /// Panics if asked for the neutral side, which owns no economy.
    pub fn side(&self, team: Team) -> &Economy {
        match team {
            Team::Player => &self.player,
            Team::Enemy => &self.enemy,
            Team::Neutral => panic!("neutral is not a playable side"),
        }
    }

    pub fn side_mut(&mut self, team: Team) -> &mut Economy {
        match team {
            Team::Player => &mut self.player,
            Team::Enemy => &mut self.enemy,
            Team::Neutral => panic!("neutral is not a playable side"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn economy(seed: u64) -> Economy {
        let mut rng = Pcg32::seed_from_u64(seed);
        Economy::new(Team::Player, Controller::Human, &mut rng)
    }

    fn full_rotation(economy: &Economy) -> HashSet<CardId> {
        let mut cards: Vec<CardId> = economy.hand.to_vec();
        cards.push(economy.next_card);
        cards.extend(economy.deck.iter().copied());
        cards.into_iter().collect()
    }

    #[test]
    fn test_opening_deal() {
        let economy = economy(3);
        assert_eq!(economy.deck.len(), 1);
        assert_eq!(economy.elixir, 5.0);
        // All six cards are somewhere in the rotation.
        assert_eq!(full_rotation(&economy).len(), 6);
    }

    #[test]
    fn test_same_seed_same_shuffle() {
        let a = economy(11);
        let b = economy(11);
        assert_eq!(a.hand, b.hand);
        assert_eq!(a.next_card, b.next_card);
    }

    #[test]
    fn test_accrual_exact_interval() {
        let mut economy = economy(3);
        economy.accrue(config::ELIXIR_RATE);
        assert_eq!(economy.elixir, 6.0);
        assert!(economy.elixir_progress() < 1e-6);
    }

    #[test]
    fn test_accrual_keeps_fractional_remainder() {
        let mut economy = economy(3);
        economy.accrue(config::ELIXIR_RATE + 0.5);
        assert_eq!(economy.elixir, 6.0);
        assert!((economy.elixir_progress() - 0.5 / config::ELIXIR_RATE).abs() < 1e-5);

        // The remainder counts toward the next point.
        economy.accrue(config::ELIXIR_RATE - 0.5);
        assert_eq!(economy.elixir, 7.0);
    }

    #[test]
    fn test_accrual_split_across_ticks() {
        let mut economy = economy(3);
        let dt = 1.0 / 60.0;
        let ticks = (config::ELIXIR_RATE / dt).ceil() as usize;
        for _ in 0..ticks {
            economy.accrue(dt);
        }
        assert_eq!(economy.elixir, 6.0);
    }

    #[test]
    fn test_elixir_never_exceeds_cap() {
        let mut economy = economy(3);
        for _ in 0..10_000 {
            economy.accrue(0.1);
        }
        assert_eq!(economy.elixir, config::MAX_ELIXIR);
    }

    #[test]
    fn test_cycle_is_a_closed_rotation() {
        let mut economy = economy(9);
        let before = full_rotation(&economy);
        for index in [0, 3, 1, 1, 2, 0, 3, 2] {
            let played = economy.hand[index];
            economy.cycle(index);
            assert_ne!(economy.hand[index], played);
            assert_eq!(full_rotation(&economy), before);
            assert_eq!(economy.hand.len() + economy.deck.len() + 1, 6);
        }
    }

    #[test]
    fn test_spend_reduces_elixir() {
        let mut economy = economy(3);
        economy.spend(3.0);
        assert_eq!(economy.elixir, 2.0);
        assert!(!economy.can_afford(7.0));
        assert!(economy.can_afford(2.0));
    }
}
