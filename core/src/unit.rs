//! Hostile units marching from the start portal to the end portal.

use serde::{Deserialize, Serialize};

use crate::{Direction, SimError, UnitId, Vec2};

/// Species of hostile units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    /// Fast, fragile foot soldiers.
    Infantry,
    /// Slow, armoured spice harvesters that shrug off part of any slow.
    Harvester,
    /// Heavy boss unit.
    BossUnit,
}

impl Species {
    /// Every species in the fixed purchasing order.
    pub const ALL: [Self; 3] = [Self::Infantry, Self::Harvester, Self::BossUnit];

    /// Dense index used by per-species tallies.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Infantry => 0,
            Self::Harvester => 1,
            Self::BossUnit => 2,
        }
    }
}

/// Fixed attributes shared by every unit of a species.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeciesProfile {
    /// Unslowed travel speed in cells per second.
    pub speed: f32,
    /// Health a freshly spawned unit starts with.
    pub health: i32,
    /// Spice credited to the player when the unit dies.
    pub reward: i32,
    /// Budget consumed when a wave purchases one unit.
    pub price: i32,
    /// Upper bound on units purchased per wave, if any.
    pub max_count: Option<u32>,
    /// Fraction of any slow effect the species ignores, clamped into `[0, 1]`.
    pub slow_resistance: f32,
}

/// What finished off a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slayer {
    /// Tower damage reduced the unit's health to zero.
    Tower,
    /// The summoned creature swallowed the unit.
    Summon,
    /// The unit reached the end portal and spent itself on the player.
    EndPortal,
}

/// Hostile unit travelling along the active path.
#[derive(Clone, Debug, PartialEq)]
pub struct HostileUnit {
    id: UnitId,
    species: Species,
    position: Vec2,
    base_speed: f32,
    speed: f32,
    slow_remaining: f32,
    slow_resistance: f32,
    health: i32,
    reward: i32,
    facing: Direction,
    slayer: Option<Slayer>,
}

impl HostileUnit {
    /// Creates a unit at full health standing on `position`.
    #[must_use]
    pub fn new(id: UnitId, species: Species, profile: &SpeciesProfile, position: Vec2) -> Self {
        Self {
            id,
            species,
            position,
            base_speed: profile.speed,
            speed: profile.speed,
            slow_remaining: 0.0,
            slow_resistance: profile.slow_resistance,
            health: profile.health,
            reward: profile.reward,
            facing: Direction::East,
            slayer: None,
        }
    }

    /// Identifier allocated to the unit.
    #[must_use]
    pub const fn id(&self) -> UnitId {
        self.id
    }

    /// Species of the unit.
    #[must_use]
    pub const fn species(&self) -> Species {
        self.species
    }

    /// Continuous position of the unit.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Unslowed travel speed.
    #[must_use]
    pub const fn base_speed(&self) -> f32 {
        self.base_speed
    }

    /// Current travel speed, including any active slow.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Seconds left on the active slow effect.
    #[must_use]
    pub const fn slow_remaining(&self) -> f32 {
        self.slow_remaining
    }

    /// Remaining health.
    #[must_use]
    pub const fn health(&self) -> i32 {
        self.health
    }

    /// Spice refunded to the player when the unit dies.
    #[must_use]
    pub const fn reward(&self) -> i32 {
        self.reward
    }

    /// Direction of the last segment travelled.
    #[must_use]
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Cause of death, once the unit is dead.
    #[must_use]
    pub const fn slayer(&self) -> Option<Slayer> {
        self.slayer
    }

    /// A unit is dead once its health reaches zero.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Applies tower damage.
    ///
    /// Negative amounts are rejected without touching the unit. Damaging a
    /// dead unit is a no-op. Health never drops below zero.
    pub fn deal_damage(&mut self, amount: i32) -> Result<(), SimError> {
        if amount < 0 {
            return Err(SimError::NegativeDamage { amount });
        }
        if self.is_dead() {
            return Ok(());
        }

        self.health -= amount;
        if self.health <= 0 {
            self.health = 0;
            self.slayer = Some(Slayer::Tower);
        }
        Ok(())
    }

    /// Kills the unit outright, crediting `slayer`. Returns `false` if it was already dead.
    pub fn kill(&mut self, slayer: Slayer) -> bool {
        if self.is_dead() {
            return false;
        }
        self.health = 0;
        self.slayer = Some(slayer);
        true
    }

    /// Slows the unit to `multiplier` of its base speed for `duration` seconds.
    ///
    /// Harvesters keep `resistance` of the speed the slow would take away.
    pub fn slow_down(&mut self, multiplier: f32, duration: f32) {
        if self.is_dead() {
            return;
        }

        let effective = match self.species {
            Species::Harvester => {
                let resistance = self.slow_resistance.clamp(0.0, 1.0);
                multiplier + (1.0 - multiplier) * resistance
            }
            Species::Infantry | Species::BossUnit => multiplier,
        };
        self.speed = self.base_speed * effective;
        self.slow_remaining = duration;
    }

    /// Runs down the active slow by `dt`, restoring full speed once it expires.
    pub fn tick_slow(&mut self, dt: f32) {
        if self.slow_remaining <= 0.0 {
            return;
        }

        self.slow_remaining -= dt;
        if self.slow_remaining <= 0.0 {
            self.slow_remaining = 0.0;
            self.speed = self.base_speed;
        }
    }

    /// Moves the unit to `position`.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Turns the unit to face `facing`.
    pub fn set_facing(&mut self, facing: Direction) {
        self.facing = facing;
    }
}
