//! Statistics counters accumulated over a game.

use serde::{Deserialize, Serialize};

use crate::{Species, TowerKind};

/// Counter partitioned by hostile species.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesCounts([u32; 3]);

impl SpeciesCounts {
    /// Count recorded for one species.
    #[must_use]
    pub const fn get(&self, species: Species) -> u32 {
        self.0[species.index()]
    }

    /// Adds one to the species' count.
    pub fn increment(&mut self, species: Species) {
        let slot = &mut self.0[species.index()];
        *slot = slot.saturating_add(1);
    }

    /// Sum across every species.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }
}

/// Counter partitioned by tower variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TowerCounts([u32; 3]);

impl TowerCounts {
    /// Count recorded for one variant.
    #[must_use]
    pub const fn get(&self, kind: TowerKind) -> u32 {
        self.0[kind.index()]
    }

    /// Adds one to the variant's count.
    pub fn increment(&mut self, kind: TowerKind) {
        let slot = &mut self.0[kind.index()];
        *slot = slot.saturating_add(1);
    }

    /// Sum across every variant.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }
}

/// Bundle of every statistics counter exposed to the presentation layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Towers successfully built.
    pub towers_built: TowerCounts,
    /// Units whose health was depleted by tower fire.
    pub killed_by_tower: SpeciesCounts,
    /// Units swallowed by the summoned creature.
    pub killed_by_summon: SpeciesCounts,
    /// Units that reached the end portal.
    pub reached_end: SpeciesCounts,
    /// Towers turned to debris by the summoned creature.
    pub towers_destroyed_by_summon: TowerCounts,
}
