use spice_defence_core::{
    Armament, CellCoord, Config, Direction, Event, Grid, HostileUnit, Slayer, Species,
    SpeciesProfile, Statistics, ThumperError, Tower, TowerId, TowerKind, TowerProfile, UnitId,
    Vec2,
};
use spice_defence_system_summon::Summon;

fn config() -> Config {
    Config {
        summon_speed: 2.0,
        summon_kill_radius: 0.5,
        summon_cooldown: 10.0,
        ..Config::default()
    }
}

fn grid() -> Grid {
    Grid::new(5, 5, 16).expect("valid grid")
}

fn guard(id: u32, cell: CellCoord) -> Tower {
    Tower::new(
        TowerId::new(id),
        TowerKind::Guard,
        cell,
        TowerProfile {
            range: 1.0,
            cost: 1,
            reload: 1.0,
            armament: Armament::Guard { damage: 1 },
        },
    )
}

fn unit(id: u32, x: f32, y: f32) -> HostileUnit {
    HostileUnit::new(
        UnitId::new(id),
        Species::Harvester,
        &SpeciesProfile {
            speed: 1.0,
            health: 50,
            reward: 1,
            price: 1,
            max_count: None,
            slow_resistance: 0.0,
        },
        Vec2::new(x, y),
    )
}

fn summon_along_row_two(summon: &mut Summon, grid: &Grid, events: &mut Vec<Event>) {
    summon
        .place_thumper(grid, CellCoord::new(0, 2), events)
        .expect("first thumper");
    summon
        .place_thumper(grid, CellCoord::new(3, 2), events)
        .expect("second thumper");
}

#[test]
fn shared_row_spawns_on_first_thumper_edge() {
    let grid = grid();
    let mut summon = Summon::new(&config());
    let mut events = Vec::new();

    summon_along_row_two(&mut summon, &grid, &mut events);

    let active = summon.active().expect("creature summoned");
    assert_eq!(active.direction, Direction::East);
    assert_eq!(active.position, Vec2::new(0.0, 2.0));
    assert!(matches!(
        events.as_slice(),
        [
            Event::ThumperPlaced { .. },
            Event::ThumperPlaced { .. },
            Event::SummonShown { .. }
        ]
    ));
}

#[test]
fn misplaced_thumpers_are_rejected() {
    let grid = grid();
    let mut summon = Summon::new(&config());
    let mut events = Vec::new();

    assert_eq!(
        summon.place_thumper(&grid, CellCoord::new(5, 0), &mut events),
        Err(ThumperError::OutOfBounds)
    );
    summon
        .place_thumper(&grid, CellCoord::new(1, 1), &mut events)
        .expect("first thumper");
    assert_eq!(
        summon.place_thumper(&grid, CellCoord::new(1, 1), &mut events),
        Err(ThumperError::SameCell)
    );
    assert_eq!(
        summon.place_thumper(&grid, CellCoord::new(2, 3), &mut events),
        Err(ThumperError::NotAligned)
    );
    assert!(summon.active().is_none());
    assert_eq!(summon.thumpers(), [Some(CellCoord::new(1, 1)), None]);
}

#[test]
fn traversal_wrecks_towers_and_swallows_units() {
    let mut grid = grid();
    grid.place_tower(guard(1, CellCoord::new(2, 2)))
        .expect("free cell");
    grid.place_tower(guard(2, CellCoord::new(2, 3)))
        .expect("free cell");
    let mut units = vec![unit(1, 3.0, 2.0), unit(2, 3.0, 3.0)];
    let mut statistics = Statistics::default();
    let mut summon = Summon::new(&config());
    let mut events = Vec::new();
    summon_along_row_two(&mut summon, &grid, &mut events);

    summon.update(&mut grid, &mut units, &mut statistics, 2.0, &mut events);

    assert!(grid
        .tower(CellCoord::new(2, 2))
        .is_some_and(Tower::is_debris));
    assert!(grid
        .tower(CellCoord::new(2, 3))
        .is_some_and(|tower| !tower.is_debris()));
    assert_eq!(units[0].slayer(), Some(Slayer::Summon));
    assert!(!units[1].is_dead());
    assert_eq!(statistics.towers_destroyed_by_summon.get(TowerKind::Guard), 1);
    assert_eq!(statistics.killed_by_summon.get(Species::Harvester), 1);
    assert_eq!(
        summon.active().map(|active| active.position),
        Some(Vec2::new(4.0, 2.0))
    );
}

#[test]
fn leaving_the_grid_starts_cooldown_but_allows_another_summon() {
    let mut grid = grid();
    let mut statistics = Statistics::default();
    let mut summon = Summon::new(&config());
    let mut events = Vec::new();
    summon_along_row_two(&mut summon, &grid, &mut events);

    summon.update(&mut grid, &mut [], &mut statistics, 5.0, &mut events);

    assert!(summon.active().is_none());
    assert_eq!(summon.thumpers(), [None; 2]);
    assert_eq!(summon.cooldown_remaining(), 10.0);
    assert!(events.contains(&Event::SummonVanished));
    assert_eq!(
        summon.place_thumper(&grid, CellCoord::new(0, 0), &mut events),
        Err(ThumperError::CoolingDown)
    );

    summon.update(&mut grid, &mut [], &mut statistics, 10.0, &mut events);
    assert!(!summon.used_this_wave());
    summon
        .place_thumper(&grid, CellCoord::new(0, 0), &mut events)
        .expect("cooldown elapsed");
}

#[test]
fn manual_dismissal_blocks_the_rest_of_the_wave() {
    let mut grid = grid();
    let mut statistics = Statistics::default();
    let mut summon = Summon::new(&config());
    let mut events = Vec::new();
    summon_along_row_two(&mut summon, &grid, &mut events);

    summon.reset(false, &mut events);
    summon.update(&mut grid, &mut [], &mut statistics, 60.0, &mut events);

    assert_eq!(
        summon.place_thumper(&grid, CellCoord::new(0, 0), &mut events),
        Err(ThumperError::AlreadyUsed)
    );
    summon.begin_wave();
    summon
        .place_thumper(&grid, CellCoord::new(0, 0), &mut events)
        .expect("new wave");
}
