//! Tabular Q-learning
//!
//! Q-learning is off-policy temporal difference (TD) control: each step moves
//! the estimate for the pair just taken toward the bootstrapped target
//! `r + γ max_a' Q(s',a')`, independent of which action the agent takes next.
//!
//! ## Usage Example
//!
//! ```
//! use qgrid::q_learning::{QTable, select_action};
//! use qgrid::types::{Action, Position};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut table = QTable::new(3);
//! let here = Position::new(2, 0);
//! table.q_learning_update(here, Action::Up, -1.0, Position::new(1, 0), 0.1, 0.95)?;
//! assert!((table.value(here, Action::Up) + 0.1).abs() < 1e-12);
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! // Greedy now avoids the penalised move.
//! assert_eq!(select_action(&table, here, 0.0, &mut rng), Action::Right);
//! # Ok::<(), qgrid::Error>(())
//! ```

pub mod exploration;
pub mod hyperparameters;
pub mod q_table;

// Public re-exports
pub use exploration::{EpsilonGreedy, select_action};
pub use hyperparameters::Hyperparameters;
pub use q_table::{QTable, TdUpdate};
