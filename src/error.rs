//! Command errors.
//!
//! Play-card failures are ordinary values, not panics. Whenever one of
//! these is returned, the simulation state is exactly what it was before
//! the call.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reasons a play-card command can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlayError {
    /// The side cannot pay the card's elixir cost.
    InsufficientElixir { have: f32, need: f32 },
    /// Hand slot index outside the 4-card hand.
    InvalidSlot { index: usize },
    /// Non-spell deployment outside the side's legal zone.
    IllegalPlacement,
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::InsufficientElixir { have, need } => {
                write!(f, "insufficient elixir: have {have:.1}, need {need:.1}")
            }
            PlayError::InvalidSlot { index } => write!(f, "invalid hand slot {index}"),
            PlayError::IllegalPlacement => write!(f, "illegal placement"),
        }
    }
}

impl std::error::Error for PlayError {}

/// Result alias for play-card commands.
pub type PlayResult<T> = Result<T, PlayError>;
