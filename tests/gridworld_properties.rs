//! Property checks for the grid world environment

use qgrid::{
    Error,
    gridworld::{GridWorld, GridWorldConfig, MAX_GRID_SIZE, Rewards},
    types::{Action, Position},
};

fn world(size: usize) -> GridWorld {
    let last = size as i32 - 1;
    GridWorld::new(GridWorldConfig::new(size, Position::new(0, last), Position::new(last, 0)))
        .unwrap()
}

#[test]
fn test_is_valid_matches_bounds() {
    for size in 1..=5 {
        let world = world(size);
        let n = size as i32;
        for row in -2..n + 2 {
            for col in -2..n + 2 {
                let inside = (0..n).contains(&row) && (0..n).contains(&col);
                assert_eq!(
                    world.is_valid(Position::new(row, col)),
                    inside,
                    "size {size}, ({row}, {col})"
                );
            }
        }
    }
}

#[test]
fn test_step_never_leaves_grid() {
    for size in 1..=5 {
        let world = world(size);
        for position in world.positions() {
            for action in Action::ALL {
                let next = world.step(position, action);
                assert!(world.is_valid(next));
                assert!(next.manhattan_distance(position) <= 1);
            }
        }
    }
}

#[test]
fn test_single_cell_grid_always_bounces() {
    let world = world(1);
    let only = Position::new(0, 0);
    for action in Action::ALL {
        assert_eq!(world.step(only, action), only);
    }
}

#[test]
fn test_rewards_by_cell_kind() {
    let rewards = Rewards {
        goal: 10.0,
        trap: -7.5,
        step: -0.25,
    };
    let traps = vec![Position::new(1, 1), Position::new(2, 3)];
    let config = GridWorldConfig::new(4, Position::new(0, 3), Position::new(3, 0))
        .with_traps(traps.clone())
        .with_rewards(rewards);
    let world = GridWorld::new(config).unwrap();

    assert_eq!(world.reward(world.goal()), rewards.goal);
    for trap in traps {
        assert_eq!(world.reward(trap), rewards.trap);
    }
    for position in world.positions().filter(|&p| !world.is_terminal(p)) {
        assert_eq!(world.reward(position), rewards.step);
    }
}

#[test]
fn test_configuration_errors() {
    let cases = [
        GridWorldConfig::new(3, Position::new(0, 3), Position::new(2, 0)),
        GridWorldConfig::new(3, Position::new(0, 2), Position::new(2, -1)),
        GridWorldConfig::new(3, Position::new(0, 2), Position::new(2, 0))
            .with_traps(vec![Position::new(5, 5)]),
        GridWorldConfig::new(3, Position::new(0, 2), Position::new(2, 0))
            .with_traps(vec![Position::new(1, 1), Position::new(0, 2)]),
    ];
    for config in cases {
        assert!(
            matches!(
                GridWorld::new(config.clone()),
                Err(Error::InvalidConfiguration { .. })
            ),
            "expected configuration error for {config:?}"
        );
    }
}

#[test]
fn test_oversized_grids_are_rejected() {
    let config = |size: usize| GridWorldConfig::new(size, Position::new(0, 1), Position::new(0, 0));

    let largest = GridWorld::new(config(MAX_GRID_SIZE)).unwrap();
    assert_eq!(largest.grid_size(), MAX_GRID_SIZE);

    for size in [MAX_GRID_SIZE + 1, 100_000, i32::MAX as usize, usize::MAX] {
        assert!(
            matches!(
                GridWorld::new(config(size)),
                Err(Error::InvalidConfiguration { .. })
            ),
            "grid size {size} should be rejected"
        );
    }
}

#[test]
fn test_config_loads_from_json() {
    let json = r#"{
        "grid_size": 4,
        "goal": {"row": 0, "col": 3},
        "traps": [{"row": 1, "col": 1}],
        "start": {"row": 3, "col": 0},
        "rewards": {"goal": 50.0, "trap": -20.0, "step": -2.0}
    }"#;
    let config: GridWorldConfig = serde_json::from_str(json).unwrap();
    let world = GridWorld::new(config).unwrap();
    assert!(world.is_trap(Position::new(1, 1)));
    assert_eq!(world.reward(Position::new(2, 2)), -2.0);
}
