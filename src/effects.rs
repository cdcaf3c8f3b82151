//! Cosmetic feedback: particle bursts and floating damage text.
//!
//! Nothing here feeds back into gameplay. The pools live in a resource,
//! age out on their own, and are copied into snapshots for the render
//! client.

use bevy_ecs::prelude::*;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Seconds a floating text stays visible.
pub const TEXT_LIFE: f32 = 0.8;
/// Upward drift speed of floating text.
const TEXT_RISE_SPEED: f32 = 30.0;
/// Per-update shrink factor for particles.
const PARTICLE_SHRINK: f32 = 0.95;

/// A short-lived colored speck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Remaining life, 1.0 down to 0.
    pub life: f32,
    pub size: f32,
    pub color: String,
}

impl Particle {
    fn scatter(x: f32, y: f32, color: &str, rng: &mut Pcg32) -> Self {
        Self {
            x,
            y,
            vx: (rng.random::<f32>() - 0.5) * 50.0,
            vy: (rng.random::<f32>() - 0.5) * 50.0,
            life: 1.0,
            size: rng.random::<f32>() * 3.0 + 2.0,
            color: color.to_string(),
        }
    }

    fn update(&mut self, dt: f32) {
        self.x += self.vx * dt;
        self.y += self.vy * dt;
        self.life -= dt;
        self.size *= PARTICLE_SHRINK;
    }
}

/// A floating damage number drifting upward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingText {
    pub x: f32,
    pub y: f32,
    pub text: String,
    /// Remaining life in seconds, [`TEXT_LIFE`] down to 0.
    pub life: f32,
}

impl FloatingText {
    fn update(&mut self, dt: f32) {
        self.y -= TEXT_RISE_SPEED * dt;
        self.life -= dt;
    }
}

/// Pools of live cosmetic effects.
#[derive(Resource, Debug, Default)]
pub struct Effects {
    pub particles: Vec<Particle>,
    pub texts: Vec<FloatingText>,
}

impl Effects {
    /// Scatter `count` particles around a point.
    pub fn burst(&mut self, x: f32, y: f32, color: &str, count: usize, rng: &mut Pcg32) {
        for _ in 0..count {
            self.particles.push(Particle::scatter(x, y, color, rng));
        }
    }

    /// Pop a damage number above a point.
    pub fn damage_text(&mut self, x: f32, y: f32, amount: f32) {
        self.texts.push(FloatingText {
            x,
            y: y - 20.0,
            text: format!("-{}", amount as i32),
            life: TEXT_LIFE,
        });
    }

    /// Age all effects and drop the expired ones.
    pub fn update(&mut self, dt: f32) {
        for particle in &mut self.particles {
            particle.update(dt);
        }
        for text in &mut self.texts {
            text.update(dt);
        }
        self.particles.retain(|p| p.life > 0.0);
        self.texts.retain(|t| t.life > 0.0);
    }
}
