use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use spice_defence_core::{CellCoord, Command, Config, Event, TimeScaleStep, TowerKind};
use spice_defence_world::{self as world, query, World};

#[test]
fn deterministic_replay_produces_identical_event_stream() {
    let first = replay(scripted_commands());
    let second = replay(scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");
    assert!(!first.events.is_empty());
    assert_eq!(first.fingerprint(), second.fingerprint());
}

fn replay(commands: Vec<Command>) -> ReplayOutcome {
    let mut events = Vec::new();
    let mut world = World::new(Config::default(), &mut events).expect("default config");

    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    ReplayOutcome {
        events: events.iter().map(EventRecord::from).collect(),
        spice: query::spice(&world),
        health: query::player_health(&world),
        wave: query::wave(&world),
    }
}

fn scripted_commands() -> Vec<Command> {
    let mut commands = Vec::new();
    for (kind, column, row) in [
        (TowerKind::Guard, 1, 1),
        (TowerKind::Bomb, 3, 2),
        (TowerKind::Sound, 2, 4),
        (TowerKind::Guard, 6, 5),
    ] {
        commands.push(Command::BuildTower {
            kind,
            cell: CellCoord::new(column, row),
        });
    }
    commands.push(Command::TearDownTower {
        cell: CellCoord::new(6, 5),
    });
    commands.push(Command::StepTimeScale {
        step: TimeScaleStep::Faster,
    });
    commands.push(Command::SkipBuildTimer);
    commands.push(Command::PlaceThumper {
        cell: CellCoord::new(0, 8),
    });
    commands.push(Command::PlaceThumper {
        cell: CellCoord::new(9, 8),
    });
    for _ in 0..600 {
        commands.push(Command::Tick {
            dt: Duration::from_millis(50),
        });
    }
    commands
}

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    events: Vec<EventRecord>,
    spice: i32,
    health: i32,
    wave: u32,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.events.hash(&mut hasher);
        self.spice.hash(&mut hasher);
        self.health.hash(&mut hasher);
        self.wave.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct EventRecord(String);

impl From<&Event> for EventRecord {
    fn from(event: &Event) -> Self {
        Self(format!("{event:?}"))
    }
}
