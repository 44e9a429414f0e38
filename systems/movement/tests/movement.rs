use spice_defence_core::{
    CellCoord, Direction, Event, HostileUnit, Slayer, Species, SpeciesProfile, UnitId, Vec2,
};
use spice_defence_system_movement::{move_unit, Movement};
use spice_defence_system_navigation::Path;

fn unit(id: u32, species: Species, speed: f32) -> HostileUnit {
    HostileUnit::new(
        UnitId::new(id),
        species,
        &SpeciesProfile {
            speed,
            health: 10,
            reward: 1,
            price: 1,
            max_count: None,
            slow_resistance: 0.5,
        },
        Vec2::ZERO,
    )
}

fn staircase() -> Path {
    Path::new(vec![
        CellCoord::new(0, 0),
        CellCoord::new(1, 0),
        CellCoord::new(1, 1),
        CellCoord::new(2, 1),
        CellCoord::new(2, 2),
    ])
}

#[test]
fn fast_unit_turns_every_corner_within_one_tick() {
    let mut runner = unit(1, Species::Infantry, 2.5);
    let mut events = Vec::new();

    let arrived = move_unit(&mut runner, &staircase(), 1.0, &mut events);

    assert!(!arrived);
    assert_eq!(runner.position(), Vec2::new(1.5, 1.0));
    assert_eq!(runner.facing(), Direction::East);
    assert_eq!(events.len(), 1);
}

#[test]
fn oversized_tick_stops_on_final_waypoint() {
    let mut runner = unit(1, Species::Infantry, 1.0);
    let mut events = Vec::new();

    assert!(move_unit(&mut runner, &staircase(), 60.0, &mut events));
    assert_eq!(runner.position(), Vec2::new(2.0, 2.0));
}

#[test]
fn slow_expiring_this_tick_does_not_apply() {
    let mut runner = unit(1, Species::Infantry, 1.0);
    runner.slow_down(0.5, 0.25);
    let mut events = Vec::new();

    let _ = move_unit(&mut runner, &staircase(), 0.5, &mut events);

    assert_eq!(runner.position(), Vec2::new(0.5, 0.0));
}

#[test]
fn slowed_unit_covers_less_ground() {
    let mut runner = unit(1, Species::Infantry, 1.0);
    runner.slow_down(0.5, 5.0);
    let mut events = Vec::new();

    let _ = move_unit(&mut runner, &staircase(), 1.0, &mut events);

    assert_eq!(runner.position(), Vec2::new(0.5, 0.0));
    assert!((runner.slow_remaining() - 4.0).abs() < 1e-6);
}

#[test]
fn system_leaves_dead_units_in_place() {
    let mut roster = vec![
        unit(1, Species::Infantry, 1.0),
        unit(2, Species::Harvester, 1.0),
    ];
    assert!(roster[0].kill(Slayer::Tower));
    let mut movement = Movement::new();
    let mut events = Vec::new();

    assert_eq!(movement.handle(&mut roster, &staircase(), 0.5, &mut events), 0);

    assert_eq!(roster[0].position(), Vec2::ZERO);
    assert_eq!(roster[1].position(), Vec2::new(0.5, 0.0));
    assert!(matches!(
        events.as_slice(),
        [Event::UnitUpdated { unit, .. }] if *unit == UnitId::new(2)
    ));
}

#[test]
fn system_counts_units_standing_on_the_final_waypoint() {
    let mut roster = vec![
        unit(1, Species::Infantry, 10.0),
        unit(2, Species::Harvester, 0.5),
        unit(3, Species::Infantry, 10.0),
    ];
    let mut movement = Movement::new();
    let mut events = Vec::new();

    assert_eq!(movement.handle(&mut roster, &staircase(), 1.0, &mut events), 2);
    assert_eq!(roster[0].position(), Vec2::new(2.0, 2.0));
    assert_eq!(roster[1].position(), Vec2::new(0.5, 0.0));
    assert_eq!(roster[2].position(), Vec2::new(2.0, 2.0));
}
