use proptest::prelude::*;
use spice_defence_core::{Config, Event, Species, Vec2};
use spice_defence_system_wave_generation::{allocate, Purchase, WaveGeneration};

fn purchases(prices: [i32; 3], caps: [u32; 2]) -> [Purchase; 3] {
    [
        Purchase {
            price: prices[0],
            max_count: Some(caps[0]),
        },
        Purchase {
            price: prices[1],
            max_count: Some(caps[1]),
        },
        Purchase {
            price: prices[2],
            max_count: None,
        },
    ]
}

#[test]
fn queue_lists_species_in_purchasing_order() {
    let config = Config {
        infantry_budget: 10.0,
        harvester_budget: 15.0,
        boss_budget: 60.0,
        ..Config::default()
    };
    let generation = WaveGeneration::new(&config);
    let mut next_id = 40;
    let mut events = Vec::new();

    let queue = generation.generate(&config, 1, Vec2::ZERO, &mut next_id, &mut events);

    let species: Vec<Species> = queue.iter().map(|unit| unit.species()).collect();
    assert_eq!(
        species,
        vec![
            Species::Infantry,
            Species::Infantry,
            Species::Harvester,
            Species::BossUnit
        ]
    );
    assert_eq!(next_id, 44);
    assert_eq!(
        queue.iter().map(|unit| unit.id().get()).collect::<Vec<_>>(),
        vec![40, 41, 42, 43]
    );
    assert_eq!(events.len(), 4);
    assert!(events
        .iter()
        .all(|event| matches!(event, Event::UnitCreated { .. })));
    assert!(queue.iter().all(|unit| unit.position() == Vec2::ZERO));
}

#[test]
fn growth_eventually_buys_harvesters_and_bosses() {
    let config = Config::default();
    let mut generation = WaveGeneration::new(&config);
    let first = generation.preview();
    for _ in 0..9 {
        generation.grow();
    }
    let tenth = generation.preview();

    assert!(tenth.total() > first.total());
    assert_eq!(tenth.counts.get(Species::Infantry), config.infantry_max_count);
    assert!(tenth.counts.get(Species::BossUnit) > 0);
}

proptest! {
    #[test]
    fn allocation_is_a_pure_function_of_inputs(
        budgets in proptest::array::uniform3(0.0f64..5_000.0),
        prices in proptest::array::uniform3(1i32..200),
        caps in proptest::array::uniform2(0u32..50),
    ) {
        let first = allocate(budgets, purchases(prices, caps));
        let second = allocate(budgets, purchases(prices, caps));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn allocation_respects_caps_and_never_overspends(
        budgets in proptest::array::uniform3(0.0f64..5_000.0),
        prices in proptest::array::uniform3(1i32..200),
        caps in proptest::array::uniform2(0u32..50),
    ) {
        let allocation = allocate(budgets, purchases(prices, caps));
        prop_assert!(allocation.counts.get(Species::Infantry) <= caps[0]);
        prop_assert!(allocation.counts.get(Species::Harvester) <= caps[1]);

        let spent: f64 = Species::ALL
            .iter()
            .map(|species| {
                f64::from(allocation.counts.get(*species)) * f64::from(prices[species.index()])
            })
            .sum();
        let total: f64 = budgets.iter().sum();
        prop_assert!((spent + allocation.discarded - total).abs() < 1e-6);
        prop_assert!(allocation.discarded < f64::from(prices[2]));
    }
}
