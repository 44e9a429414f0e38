//! Flat, read-only tuning values supplied when a game is constructed.

use serde::{Deserialize, Serialize};

use crate::{Armament, SimError, Species, SpeciesProfile, TowerKind, TowerProfile};

/// Every tunable constant of the simulation as a flat set of named values.
///
/// Missing entries fall back to [`Config::default`] when deserialized, so a
/// configuration file only needs to name the values it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Number of grid columns.
    pub grid_width: u32,
    /// Number of grid rows.
    pub grid_height: u32,
    /// Largest accepted grid edge.
    pub max_grid_size: u32,

    /// Health the player starts with; the game is lost at zero.
    pub player_health: i32,
    /// Spice the player starts with.
    pub starting_spice: i32,
    /// Wave whose completion wins the game.
    pub final_wave: u32,
    /// Seconds the build phase lasts once the first tower exists.
    pub build_phase_seconds: f32,
    /// Fraction of the build cost refunded on teardown.
    pub refund_ratio: f32,

    /// Guard tower range in cells.
    pub guard_range: f32,
    /// Guard tower build cost.
    pub guard_cost: i32,
    /// Guard tower reload seconds.
    pub guard_reload: f32,
    /// Guard tower damage per shot.
    pub guard_damage: i32,

    /// Bomb tower range in cells.
    pub bomb_range: f32,
    /// Bomb tower build cost.
    pub bomb_cost: i32,
    /// Bomb tower reload seconds.
    pub bomb_reload: f32,
    /// Bomb tower damage per unit caught in the blast.
    pub bomb_damage: i32,
    /// Bomb blast radius in cells around the anchor unit.
    pub bomb_blast_radius: f32,

    /// Sound tower range in cells.
    pub sound_range: f32,
    /// Sound tower build cost.
    pub sound_cost: i32,
    /// Sound tower reload seconds.
    pub sound_reload: f32,
    /// Speed multiplier applied by the sound tower.
    pub sound_slow_multiplier: f32,
    /// Seconds the sound tower's slow lasts.
    pub sound_slow_duration: f32,

    /// Infantry speed in cells per second.
    pub infantry_speed: f32,
    /// Infantry starting health.
    pub infantry_health: i32,
    /// Spice refunded when an infantry unit dies.
    pub infantry_reward: i32,
    /// Wave budget consumed per infantry unit.
    pub infantry_price: i32,
    /// Most infantry units purchased per wave.
    pub infantry_max_count: u32,

    /// Harvester speed in cells per second.
    pub harvester_speed: f32,
    /// Harvester starting health.
    pub harvester_health: i32,
    /// Spice refunded when a harvester dies.
    pub harvester_reward: i32,
    /// Wave budget consumed per harvester.
    pub harvester_price: i32,
    /// Most harvesters purchased per wave.
    pub harvester_max_count: u32,
    /// Fraction of any slow a harvester ignores.
    pub harvester_slow_resistance: f32,

    /// Boss speed in cells per second.
    pub boss_speed: f32,
    /// Boss starting health.
    pub boss_health: i32,
    /// Spice refunded when a boss dies.
    pub boss_reward: i32,
    /// Wave budget consumed per boss.
    pub boss_price: i32,

    /// First-wave infantry budget.
    pub infantry_budget: f64,
    /// First-wave harvester budget.
    pub harvester_budget: f64,
    /// First-wave boss budget.
    pub boss_budget: f64,
    /// Per-wave growth multiplier of the infantry budget.
    pub infantry_budget_growth: f64,
    /// Per-wave growth multiplier of the harvester budget.
    pub harvester_budget_growth: f64,
    /// Per-wave growth multiplier of the boss budget.
    pub boss_budget_growth: f64,

    /// Seconds between successive unit releases in the first wave.
    pub spawn_release_delay: f32,
    /// Multiplier applied to the release delay after every wave.
    pub release_delay_factor: f32,

    /// Summoned creature speed in cells per second.
    pub summon_speed: f32,
    /// Radius around the creature inside which units are swallowed.
    pub summon_kill_radius: f32,
    /// Seconds before the creature can be summoned again.
    pub summon_cooldown: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_width: 12,
            grid_height: 12,
            max_grid_size: 64,

            player_health: 20,
            starting_spice: 100,
            final_wave: 10,
            build_phase_seconds: 30.0,
            refund_ratio: 0.5,

            guard_range: 2.5,
            guard_cost: 10,
            guard_reload: 0.8,
            guard_damage: 4,

            bomb_range: 2.0,
            bomb_cost: 25,
            bomb_reload: 2.0,
            bomb_damage: 6,
            bomb_blast_radius: 1.5,

            sound_range: 2.0,
            sound_cost: 15,
            sound_reload: 1.5,
            sound_slow_multiplier: 0.5,
            sound_slow_duration: 2.0,

            infantry_speed: 1.0,
            infantry_health: 10,
            infantry_reward: 2,
            infantry_price: 5,
            infantry_max_count: 20,

            harvester_speed: 0.6,
            harvester_health: 30,
            harvester_reward: 5,
            harvester_price: 15,
            harvester_max_count: 10,
            harvester_slow_resistance: 0.5,

            boss_speed: 0.4,
            boss_health: 120,
            boss_reward: 25,
            boss_price: 60,

            infantry_budget: 50.0,
            harvester_budget: 15.0,
            boss_budget: 0.0,
            infantry_budget_growth: 1.25,
            harvester_budget_growth: 1.3,
            boss_budget_growth: 1.4,

            spawn_release_delay: 1.2,
            release_delay_factor: 0.95,

            summon_speed: 4.0,
            summon_kill_radius: 0.6,
            summon_cooldown: 30.0,
        }
    }
}

impl Config {
    /// Checks that every value is usable by the simulation.
    pub fn validate(&self) -> Result<(), SimError> {
        fn check(ok: bool, name: &'static str, reason: &'static str) -> Result<(), SimError> {
            if ok {
                Ok(())
            } else {
                Err(SimError::InvalidConfig { name, reason })
            }
        }

        check(self.max_grid_size >= 2, "max_grid_size", "must be at least 2")?;
        check(self.player_health > 0, "player_health", "must be positive")?;
        check(self.starting_spice >= 0, "starting_spice", "must be non-negative")?;
        check(self.final_wave >= 1, "final_wave", "must be at least 1")?;
        check(
            self.build_phase_seconds >= 0.0,
            "build_phase_seconds",
            "must be non-negative",
        )?;
        check(
            (0.0..=1.0).contains(&self.refund_ratio),
            "refund_ratio",
            "must lie within [0, 1]",
        )?;

        for kind in TowerKind::ALL {
            let profile = self.tower_profile(kind);
            check(profile.range >= 0.0, "tower range", "must be non-negative")?;
            check(profile.cost >= 0, "tower cost", "must be non-negative")?;
            check(profile.reload > 0.0, "tower reload", "must be positive")?;
            match profile.armament {
                Armament::Guard { damage } | Armament::Bomb { damage, .. } => {
                    check(damage >= 0, "tower damage", "must be non-negative")?;
                }
                Armament::Sound {
                    slow_multiplier,
                    slow_duration,
                } => {
                    check(
                        (0.0..=1.0).contains(&slow_multiplier),
                        "sound_slow_multiplier",
                        "must lie within [0, 1]",
                    )?;
                    check(
                        slow_duration >= 0.0,
                        "sound_slow_duration",
                        "must be non-negative",
                    )?;
                }
            }
        }

        for species in Species::ALL {
            let profile = self.species_profile(species);
            check(profile.speed > 0.0, "unit speed", "must be positive")?;
            check(profile.health > 0, "unit health", "must be positive")?;
            check(profile.price > 0, "unit price", "must be positive")?;
            check(self.budget(species) >= 0.0, "budget", "must be non-negative")?;
            check(
                self.budget_growth(species) >= 0.0,
                "budget growth",
                "must be non-negative",
            )?;
        }

        check(
            self.harvester_slow_resistance.is_finite(),
            "harvester_slow_resistance",
            "must be finite",
        )?;
        check(
            self.spawn_release_delay >= 0.0,
            "spawn_release_delay",
            "must be non-negative",
        )?;
        check(
            self.release_delay_factor > 0.0,
            "release_delay_factor",
            "must be positive",
        )?;
        check(self.summon_speed > 0.0, "summon_speed", "must be positive")?;
        check(
            self.summon_kill_radius >= 0.0,
            "summon_kill_radius",
            "must be non-negative",
        )?;
        check(
            self.summon_cooldown >= 0.0,
            "summon_cooldown",
            "must be non-negative",
        )
    }

    /// Tuning for one tower variant.
    #[must_use]
    pub fn tower_profile(&self, kind: TowerKind) -> TowerProfile {
        match kind {
            TowerKind::Guard => TowerProfile {
                range: self.guard_range,
                cost: self.guard_cost,
                reload: self.guard_reload,
                armament: Armament::Guard {
                    damage: self.guard_damage,
                },
            },
            TowerKind::Bomb => TowerProfile {
                range: self.bomb_range,
                cost: self.bomb_cost,
                reload: self.bomb_reload,
                armament: Armament::Bomb {
                    damage: self.bomb_damage,
                    blast_radius: self.bomb_blast_radius,
                },
            },
            TowerKind::Sound => TowerProfile {
                range: self.sound_range,
                cost: self.sound_cost,
                reload: self.sound_reload,
                armament: Armament::Sound {
                    slow_multiplier: self.sound_slow_multiplier,
                    slow_duration: self.sound_slow_duration,
                },
            },
        }
    }

    /// Fixed attributes of one species.
    #[must_use]
    pub fn species_profile(&self, species: Species) -> SpeciesProfile {
        match species {
            Species::Infantry => SpeciesProfile {
                speed: self.infantry_speed,
                health: self.infantry_health,
                reward: self.infantry_reward,
                price: self.infantry_price,
                max_count: Some(self.infantry_max_count),
                slow_resistance: 0.0,
            },
            Species::Harvester => SpeciesProfile {
                speed: self.harvester_speed,
                health: self.harvester_health,
                reward: self.harvester_reward,
                price: self.harvester_price,
                max_count: Some(self.harvester_max_count),
                slow_resistance: self.harvester_slow_resistance,
            },
            Species::BossUnit => SpeciesProfile {
                speed: self.boss_speed,
                health: self.boss_health,
                reward: self.boss_reward,
                price: self.boss_price,
                max_count: None,
                slow_resistance: 0.0,
            },
        }
    }

    /// First-wave budget of one species.
    #[must_use]
    pub fn budget(&self, species: Species) -> f64 {
        match species {
            Species::Infantry => self.infantry_budget,
            Species::Harvester => self.harvester_budget,
            Species::BossUnit => self.boss_budget,
        }
    }

    /// Per-wave growth multiplier of one species' budget.
    #[must_use]
    pub fn budget_growth(&self, species: Species) -> f64 {
        match species {
            Species::Infantry => self.infantry_budget_growth,
            Species::Harvester => self.harvester_budget_growth,
            Species::BossUnit => self.boss_budget_growth,
        }
    }
}
