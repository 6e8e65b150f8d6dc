//! Greedy policy extraction

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::{
    gridworld::GridWorld,
    q_learning::QTable,
    types::{Action, Position},
};

/// Greedy action for every non-terminal cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GreedyPolicy {
    grid_size: usize,
    #[serde(serialize_with = "serialize_actions")]
    actions: BTreeMap<Position, Action>,
}

#[derive(Serialize)]
struct PolicyEntry {
    position: Position,
    action: Action,
}

fn serialize_actions<S: Serializer>(
    actions: &BTreeMap<Position, Action>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(actions.iter().map(|(&position, &action)| PolicyEntry {
        position,
        action,
    }))
}

impl GreedyPolicy {
    /// Action chosen in `position`; `None` for goal, traps and cells off the grid.
    pub fn action(&self, position: Position) -> Option<Action> {
        self.actions.get(&position).copied()
    }

    /// Number of cells with a defined action.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// `(position, action)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Action)> + '_ {
        self.actions.iter().map(|(&p, &a)| (p, a))
    }
}

/// Read the greedy action out of the table for every non-terminal cell.
pub fn greedy_policy(q_table: &QTable, world: &GridWorld) -> GreedyPolicy {
    let actions = world
        .positions()
        .filter(|&p| !world.is_terminal(p))
        .map(|p| (p, q_table.best_action(p)))
        .collect();
    GreedyPolicy {
        grid_size: world.grid_size(),
        actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gridworld::GridWorldConfig;

    #[test]
    fn test_terminal_cells_have_no_action() {
        let world = GridWorld::new(GridWorldConfig::default()).unwrap();
        let policy = greedy_policy(&QTable::new(5), &world);

        assert_eq!(policy.len(), 25 - 3);
        assert_eq!(policy.action(world.goal()), None);
        assert_eq!(policy.action(Position::new(2, 2)), None);
        assert_eq!(policy.action(Position::new(3, 1)), None);
        assert_eq!(policy.action(Position::new(4, 0)), Some(Action::Up));
    }

    #[test]
    fn test_policy_follows_best_action() {
        let world = GridWorld::new(GridWorldConfig::new(
            2,
            Position::new(0, 1),
            Position::new(1, 0),
        ))
        .unwrap();
        let mut q_table = QTable::new(2);
        q_table.update(Position::new(0, 0), Action::Right, 5.0).unwrap();
        q_table.update(Position::new(1, 1), Action::Up, 5.0).unwrap();
        q_table.update(Position::new(1, 0), Action::Up, -1.0).unwrap();

        let policy = greedy_policy(&q_table, &world);
        assert_eq!(policy.action(Position::new(0, 0)), Some(Action::Right));
        assert_eq!(policy.action(Position::new(1, 1)), Some(Action::Up));
        assert_eq!(policy.action(Position::new(1, 0)), Some(Action::Right));
    }

    #[test]
    fn test_policy_serializes_as_entry_list() {
        let world = GridWorld::new(GridWorldConfig::new(
            2,
            Position::new(0, 1),
            Position::new(1, 0),
        ))
        .unwrap();
        let policy = greedy_policy(&QTable::new(2), &world);
        let json = serde_json::to_value(&policy).unwrap();
        assert_eq!(json["actions"].as_array().unwrap().len(), 3);
        assert_eq!(json["actions"][0]["action"], "up");
    }
}
