#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that resolves tower attacks against the live roster.

use spice_defence_core::{
    angle_toward, Armament, Event, Grid, HostileUnit, SimError, Tower, Transform,
};
use spice_defence_system_tower_targeting::{closest_in_range, first_in_range, TowerTargeting};

/// Tower combat system that drives every intact tower once per tick.
#[derive(Debug, Default)]
pub struct TowerCombat {
    targeting: TowerTargeting,
}

impl TowerCombat {
    /// Creates a new tower combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates every tower on the grid in row-major order.
    pub fn handle(
        &mut self,
        grid: &mut Grid,
        units: &mut [HostileUnit],
        dt: f32,
        out: &mut Vec<Event>,
    ) -> Result<(), SimError> {
        for tower in grid.towers_mut() {
            let _attacks = self.update_tower(tower, units, dt, out)?;
        }
        Ok(())
    }

    /// Advances one tower's reload by `dt` and attacks as often as the elapsed time allows.
    ///
    /// Each successful attack pushes the countdown back by one reload
    /// interval, so an oversized tick can fire several times. A loaded tower
    /// with nothing to shoot holds its countdown at zero. Debris never acts.
    /// Returns the number of attacks made.
    pub fn update_tower(
        &mut self,
        tower: &mut Tower,
        units: &mut [HostileUnit],
        dt: f32,
        out: &mut Vec<Event>,
    ) -> Result<u32, SimError> {
        if tower.is_debris() {
            return Ok(0);
        }

        tower.advance_reload(dt);
        let mut attacks = 0;
        loop {
            let loaded = tower.is_loaded();
            if !try_attack(tower, loaded, units, &mut self.targeting, out)? {
                if loaded {
                    tower.hold_fire();
                }
                break;
            }

            attacks += 1;
            tower.rearm();
            if tower.profile().reload <= 0.0 {
                break;
            }
        }
        Ok(attacks)
    }
}

/// Lets a tower acquire a target and, when `allow_kill` is set, attack it.
///
/// The tower turns toward its target whether or not it fires; sound towers
/// never turn. Returns `true` only when an attack was made.
pub fn try_attack(
    tower: &mut Tower,
    allow_kill: bool,
    units: &mut [HostileUnit],
    targeting: &mut TowerTargeting,
    out: &mut Vec<Event>,
) -> Result<bool, SimError> {
    let center = tower.position();
    let range = tower.profile().range;

    match tower.profile().armament {
        Armament::Guard { damage } => {
            let Some(target) = closest_in_range(center, range, units) else {
                return Ok(false);
            };
            let aim = units[target].position();
            turn_toward(tower, aim, out);
            if !allow_kill {
                return Ok(false);
            }

            units[target].deal_damage(damage)?;
            record_attack(tower, aim, out);
            Ok(true)
        }
        Armament::Bomb {
            damage,
            blast_radius,
        } => {
            let Some(anchor) = first_in_range(center, range, units) else {
                return Ok(false);
            };
            let aim = units[anchor].position();
            turn_toward(tower, aim, out);
            if !allow_kill {
                return Ok(false);
            }

            for &index in targeting.collect_in_range(aim, blast_radius, units) {
                units[index].deal_damage(damage)?;
            }
            record_attack(tower, aim, out);
            Ok(true)
        }
        Armament::Sound {
            slow_multiplier,
            slow_duration,
        } => {
            if !allow_kill {
                return Ok(false);
            }

            let affected = targeting.collect_in_range(center, range, units);
            let Some(&first) = affected.first() else {
                return Ok(false);
            };
            let aim = units[first].position();
            for &index in affected {
                units[index].slow_down(slow_multiplier, slow_duration);
            }
            record_attack(tower, aim, out);
            Ok(true)
        }
    }
}

fn turn_toward(tower: &mut Tower, aim: spice_defence_core::Vec2, out: &mut Vec<Event>) {
    let rotation = angle_toward(tower.position(), aim);
    if tower.face(rotation) {
        out.push(Event::TowerUpdated {
            tower: tower.id(),
            transform: Transform::new(tower.position(), rotation),
        });
    }
}

fn record_attack(tower: &Tower, aim: spice_defence_core::Vec2, out: &mut Vec<Event>) {
    out.push(Event::TowerFired {
        tower: tower.id(),
        kind: tower.kind(),
        target: aim,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use spice_defence_core::{CellCoord, TowerId, TowerKind, TowerProfile};

    fn tower(armament: Armament) -> Tower {
        let kind = match armament {
            Armament::Guard { .. } => TowerKind::Guard,
            Armament::Bomb { .. } => TowerKind::Bomb,
            Armament::Sound { .. } => TowerKind::Sound,
        };
        Tower::new(
            TowerId::new(1),
            kind,
            CellCoord::new(0, 0),
            TowerProfile {
                range: 2.0,
                cost: 1,
                reload: 1.0,
                armament,
            },
        )
    }

    #[test]
    fn empty_roster_yields_no_attack() {
        let mut guard = tower(Armament::Guard { damage: 3 });
        let mut units: Vec<HostileUnit> = Vec::new();
        let mut targeting = TowerTargeting::new();
        let mut out = Vec::new();

        assert_eq!(
            try_attack(&mut guard, true, &mut units, &mut targeting, &mut out),
            Ok(false)
        );
        assert!(out.is_empty());
    }

    #[test]
    fn debris_never_updates() {
        let mut guard = tower(Armament::Guard { damage: 3 });
        assert!(guard.convert_to_debris());
        let mut combat = TowerCombat::new();
        let mut out = Vec::new();

        assert_eq!(combat.update_tower(&mut guard, &mut [], 5.0, &mut out), Ok(0));
        assert_eq!(guard.reload_countdown(), 0.0);
    }

    #[test]
    fn idle_tower_does_not_bank_reload() {
        let mut guard = tower(Armament::Guard { damage: 3 });
        let mut combat = TowerCombat::new();
        let mut out = Vec::new();

        assert_eq!(combat.update_tower(&mut guard, &mut [], 10.0, &mut out), Ok(0));
        assert_eq!(guard.reload_countdown(), 0.0);
    }
}
