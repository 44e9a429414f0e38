//! Tower entities and their variant-specific parameters.

use serde::{Deserialize, Serialize};

use crate::{CellCoord, TowerId, Vec2};

/// Tower variants that may be constructed on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerKind {
    /// Single-target tower dealing flat damage to the closest unit.
    Guard,
    /// Area tower dealing flat damage around an anchor unit.
    Bomb,
    /// Support tower slowing every unit in range.
    Sound,
}

impl TowerKind {
    /// Every tower variant in canonical order.
    pub const ALL: [Self; 3] = [Self::Guard, Self::Bomb, Self::Sound];

    /// Dense index used by per-variant tallies.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Guard => 0,
            Self::Bomb => 1,
            Self::Sound => 2,
        }
    }
}

/// Variant-specific attack parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Armament {
    /// Flat damage applied to a single target.
    Guard {
        /// Damage dealt per shot.
        damage: i32,
    },
    /// Flat damage applied to every unit around an anchor.
    Bomb {
        /// Damage dealt to each unit inside the blast.
        damage: i32,
        /// Radius of the blast centred on the anchor unit.
        blast_radius: f32,
    },
    /// Slow effect applied to every unit in range.
    Sound {
        /// Speed multiplier applied to affected units.
        slow_multiplier: f32,
        /// Seconds the slow effect lasts.
        slow_duration: f32,
    },
}

/// Immutable tuning shared by every tower of a given kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TowerProfile {
    /// Targeting radius measured in cells.
    pub range: f32,
    /// Spice charged when the tower is built.
    pub cost: i32,
    /// Seconds between successive attacks.
    pub reload: f32,
    /// Attack behaviour of the variant.
    pub armament: Armament,
}

/// Tower occupying a single grid cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Tower {
    id: TowerId,
    kind: TowerKind,
    cell: CellCoord,
    profile: TowerProfile,
    reload_countdown: f32,
    rotation: f32,
    debris: bool,
}

impl Tower {
    /// Creates a freshly built tower that is ready to fire.
    #[must_use]
    pub fn new(id: TowerId, kind: TowerKind, cell: CellCoord, profile: TowerProfile) -> Self {
        Self {
            id,
            kind,
            cell,
            profile,
            reload_countdown: 0.0,
            rotation: 0.0,
            debris: false,
        }
    }

    /// Identifier allocated to the tower.
    #[must_use]
    pub const fn id(&self) -> TowerId {
        self.id
    }

    /// Variant of the tower.
    #[must_use]
    pub const fn kind(&self) -> TowerKind {
        self.kind
    }

    /// Cell occupied by the tower.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Centre of the tower in continuous coordinates.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.cell.to_point()
    }

    /// Tuning applied to this tower.
    #[must_use]
    pub const fn profile(&self) -> &TowerProfile {
        &self.profile
    }

    /// Seconds until the tower may attack again; non-positive means ready.
    #[must_use]
    pub const fn reload_countdown(&self) -> f32 {
        self.reload_countdown
    }

    /// Current facing in radians.
    #[must_use]
    pub const fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Reports whether the tower has been reduced to rubble.
    #[must_use]
    pub const fn is_debris(&self) -> bool {
        self.debris
    }

    /// Turns the tower into inert rubble. Returns `false` if it already was.
    pub fn convert_to_debris(&mut self) -> bool {
        if self.debris {
            return false;
        }
        self.debris = true;
        true
    }

    /// Points the tower at the provided angle. Returns `true` when the facing changed.
    pub fn face(&mut self, rotation: f32) -> bool {
        if self.rotation == rotation {
            return false;
        }
        self.rotation = rotation;
        true
    }

    /// Advances the reload countdown by `dt` seconds.
    pub fn advance_reload(&mut self, dt: f32) {
        self.reload_countdown -= dt;
    }

    /// Reports whether the reload interval has elapsed.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.reload_countdown <= 0.0
    }

    /// Schedules the next attack one reload interval after the last.
    pub fn rearm(&mut self) {
        self.reload_countdown += self.profile.reload;
    }

    /// Discards any reload deficit accumulated while no target was available.
    pub fn hold_fire(&mut self) {
        if self.reload_countdown < 0.0 {
            self.reload_countdown = 0.0;
        }
    }
}
