#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic budget-driven wave generation system.
//!
//! Every species owns a budget that is converted into a unit count by
//! purchasing units at the species' price until the money or the species'
//! count cap runs out. Whatever a species leaves unspent is handed to the next
//! species in the fixed order Infantry, Harvester, BossUnit. The boss pool is
//! uncapped, so only its own sub-price remainder is discarded.

use std::collections::VecDeque;

use spice_defence_core::{
    Config, Event, HostileUnit, Species, SpeciesCounts, UnitId, Vec2,
};

/// Price and optional cap used when purchasing one species.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Purchase {
    /// Budget consumed by one unit.
    pub price: i32,
    /// Maximum units bought per wave, if any.
    pub max_count: Option<u32>,
}

/// Outcome of converting the per-species budgets into unit counts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Allocation {
    /// Units bought per species.
    pub counts: SpeciesCounts,
    /// Budget left over after the final species, which is not carried anywhere.
    pub discarded: f64,
}

impl Allocation {
    /// Total units bought across every species.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.total()
    }
}

/// Converts budgets into unit counts, carrying every species' leftover forward.
///
/// `budgets` and `purchases` are indexed by [`Species::index`]. A species with
/// a non-positive price buys nothing and passes its whole pool on.
#[must_use]
pub fn allocate(budgets: [f64; 3], purchases: [Purchase; 3]) -> Allocation {
    let mut allocation = Allocation::default();
    let mut carried = 0.0;

    for species in Species::ALL {
        let index = species.index();
        let mut pool = budgets[index] + carried;
        let Purchase { price, max_count } = purchases[index];

        if price > 0 && pool >= f64::from(price) {
            let price = f64::from(price);
            let affordable = (pool / price).floor();
            let cap = max_count.map_or(f64::from(u32::MAX), f64::from);
            let bought = affordable.min(cap).min(f64::from(u32::MAX)) as u32;
            for _ in 0..bought {
                allocation.counts.increment(species);
            }
            pool -= f64::from(bought) * price;
        }

        carried = pool;
    }

    allocation.discarded = carried;
    allocation
}

/// Ordered list of units waiting to enter the playfield.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WaveQueue {
    pending: VecDeque<HostileUnit>,
}

impl WaveQueue {
    /// Queue with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of units still waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Reports whether every unit has been released.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Takes the next unit to release.
    pub fn pop_front(&mut self) -> Option<HostileUnit> {
        self.pending.pop_front()
    }

    /// Waiting units in release order.
    pub fn iter(&self) -> impl Iterator<Item = &HostileUnit> {
        self.pending.iter()
    }
}

/// Pure system that tracks the growing budgets and builds each wave's queue.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveGeneration {
    budgets: [f64; 3],
    growth: [f64; 3],
    purchases: [Purchase; 3],
}

impl WaveGeneration {
    /// Creates the system with the first wave's budgets taken from `config`.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let mut budgets = [0.0; 3];
        let mut growth = [0.0; 3];
        let mut purchases = [Purchase {
            price: 0,
            max_count: None,
        }; 3];
        for species in Species::ALL {
            let profile = config.species_profile(species);
            budgets[species.index()] = config.budget(species);
            growth[species.index()] = config.budget_growth(species);
            purchases[species.index()] = Purchase {
                price: profile.price,
                max_count: profile.max_count,
            };
        }

        Self {
            budgets,
            growth,
            purchases,
        }
    }

    /// Budget the next wave will spend on `species`.
    #[must_use]
    pub fn budget(&self, species: Species) -> f64 {
        self.budgets[species.index()]
    }

    /// Counts the next wave would contain.
    #[must_use]
    pub fn preview(&self) -> Allocation {
        allocate(self.budgets, self.purchases)
    }

    /// Builds the queue for `wave`, placing every unit on `spawn`.
    ///
    /// Unit identifiers are drawn from `next_unit_id`, which is advanced past
    /// every unit created. Units are queued species by species in purchasing
    /// order and one [`Event::UnitCreated`] is pushed per unit.
    pub fn generate(
        &self,
        config: &Config,
        wave: u32,
        spawn: Vec2,
        next_unit_id: &mut u32,
        out: &mut Vec<Event>,
    ) -> WaveQueue {
        let allocation = self.preview();
        tracing::debug!(
            wave,
            infantry = allocation.counts.get(Species::Infantry),
            harvesters = allocation.counts.get(Species::Harvester),
            bosses = allocation.counts.get(Species::BossUnit),
            discarded = allocation.discarded,
            "generated wave"
        );

        let mut queue = WaveQueue::new();
        for species in Species::ALL {
            let profile = config.species_profile(species);
            for _ in 0..allocation.counts.get(species) {
                let id = UnitId::new(*next_unit_id);
                *next_unit_id = next_unit_id.wrapping_add(1);
                queue
                    .pending
                    .push_back(HostileUnit::new(id, species, &profile, spawn));
                out.push(Event::UnitCreated { unit: id, species });
            }
        }
        queue
    }

    /// Multiplies every budget by its growth factor after a completed wave.
    pub fn grow(&mut self) {
        for (budget, growth) in self.budgets.iter_mut().zip(self.growth) {
            *budget *= growth;
        }
    }
}
