//! Text output for CLI commands

use crate::{
    analysis::{GreedyPolicy, Rollout},
    gridworld::GridWorld,
    q_learning::QTable,
    types::Position,
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print statistics table
pub fn print_stats_table(stats: &[(&str, String)]) {
    for (key, value) in stats {
        print_kv(key, value);
    }
}

/// Render the policy as an arrow grid: `G` goal, `X` trap, and the start
/// cell bracketed.
pub fn format_policy_grid(policy: &GreedyPolicy, world: &GridWorld) -> String {
    let size = policy.grid_size() as i32;
    let mut out = String::new();
    for row in 0..size {
        let cells: Vec<String> = (0..size)
            .map(|col| {
                let position = Position::new(row, col);
                let glyph = if world.is_goal(position) {
                    'G'
                } else if world.is_trap(position) {
                    'X'
                } else {
                    policy.action(position).map_or('?', |a| a.arrow())
                };
                if position == world.start() {
                    format!("[{glyph}]")
                } else {
                    format!(" {glyph} ")
                }
            })
            .collect();
        out.push_str(&cells.join(""));
        out.push('\n');
    }
    out
}

/// Render the best value of every cell, row by row.
pub fn format_value_grid(q_table: &QTable) -> String {
    let size = q_table.grid_size() as i32;
    let mut out = String::new();
    for row in 0..size {
        let cells: Vec<String> = (0..size)
            .map(|col| format!("{:8.2}", q_table.best_value(Position::new(row, col))))
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out
}

/// Render a rollout path as `(r, c) → (r, c) → …`
pub fn format_path(rollout: &Rollout) -> String {
    rollout
        .path
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" → ")
}
