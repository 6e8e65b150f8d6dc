//! Greedy policy extraction and rollouts over trained tables

use qgrid::{
    analysis::{RolloutOutcome, greedy_policy, rollout},
    gridworld::{GridWorld, GridWorldConfig},
    pipeline::TrainingLoop,
    q_learning::{Hyperparameters, QTable},
    types::{Action, Position},
};

fn trained(world: &GridWorld, episodes: usize, seed: u64) -> QTable {
    let params = Hyperparameters::default().with_num_episodes(episodes);
    let mut training = TrainingLoop::new(world.clone(), params).unwrap();
    training.run_seeded(Some(seed)).unwrap().q_table
}

#[test]
fn test_policy_covers_non_terminal_cells() {
    let world = GridWorld::new(GridWorldConfig::default()).unwrap();
    let q_table = trained(&world, 200, 11);
    let policy = greedy_policy(&q_table, &world);

    let traps = world.traps().count();
    assert_eq!(policy.len(), 25 - 1 - traps);
    for position in world.positions() {
        match policy.action(position) {
            Some(action) => {
                assert!(!world.is_terminal(position));
                assert_eq!(action, q_table.best_action(position));
            }
            None => assert!(world.is_terminal(position)),
        }
    }
}

#[test]
fn test_policy_ties_prefer_declaration_order() {
    let world =
        GridWorld::new(GridWorldConfig::new(2, Position::new(0, 1), Position::new(1, 0))).unwrap();
    let mut q_table = QTable::new(2);
    q_table.update(Position::new(1, 1), Action::Down, 3.0).unwrap();
    q_table.update(Position::new(1, 1), Action::Left, 3.0).unwrap();

    let policy = greedy_policy(&q_table, &world);
    assert_eq!(policy.action(Position::new(0, 0)), Some(Action::Up));
    assert_eq!(policy.action(Position::new(1, 1)), Some(Action::Down));
}

#[test]
fn test_policy_serializes_as_entries() {
    let world =
        GridWorld::new(GridWorldConfig::new(2, Position::new(0, 1), Position::new(1, 0))).unwrap();
    let policy = greedy_policy(&QTable::new(2), &world);
    let json = serde_json::to_value(&policy).unwrap();

    let entries = json["actions"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["position"]["row"], 0);
    assert_eq!(entries[0]["action"], "up");
}

#[test]
fn test_rollout_leaves_table_untouched() {
    let world = GridWorld::new(GridWorldConfig::default()).unwrap();
    let q_table = trained(&world, 100, 5);
    let before = q_table.clone();

    let _ = rollout(&q_table, &world, world.start(), 20);
    assert_eq!(q_table, before);
}

#[test]
fn test_rollout_respects_step_cap() {
    let world = GridWorld::new(GridWorldConfig::default()).unwrap();
    let q_table = trained(&world, 50, 3);
    for max_steps in [0, 1, 3, 20] {
        for start in world.positions() {
            let result = rollout(&q_table, &world, start, max_steps);
            assert!(result.steps() <= max_steps);
            assert_eq!(result.path[0], start);
            assert!(result.path.iter().all(|&p| world.is_valid(p)));
            if result.outcome == RolloutOutcome::Success {
                assert_eq!(result.final_position(), Some(world.goal()));
            }
        }
    }
}

#[test]
fn test_zero_step_rollout_from_open_cell() {
    let world = GridWorld::new(GridWorldConfig::default()).unwrap();
    let result = rollout(&QTable::new(5), &world, world.start(), 0);
    assert_eq!(result.outcome, RolloutOutcome::StepLimitExceeded);
    assert_eq!(result.path, vec![world.start()]);
}

#[test]
fn test_trained_agent_avoids_traps_on_default_grid() {
    let world = GridWorld::new(GridWorldConfig::default()).unwrap();
    let q_table = trained(&world, 2_000, 42);
    let result = rollout(&q_table, &world, world.start(), 20);

    assert_eq!(result.outcome, RolloutOutcome::Success);
    assert!(result.steps() >= 8);
    assert!(result.path.iter().all(|&p| !world.is_trap(p)));
}
