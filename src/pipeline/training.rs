//! Episodic Q-learning training loop

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::episode::{EpisodeResult, StepObservation, Termination};
use crate::{
    Result,
    gridworld::GridWorld,
    ports::Observer,
    q_learning::{EpsilonGreedy, Hyperparameters, QTable},
    types::Position,
};

/// Build the run's random source: seeded when a seed is given, otherwise
/// seeded from the thread-local generator.
pub fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// One entry per episode, in episode order
    pub episodes: Vec<EpisodeResult>,
    /// Learned Q-table, read-only from here on
    pub q_table: QTable,
    /// Exploration rate after the last decay
    pub final_epsilon: f64,
}

impl TrainingResult {
    pub fn total_episodes(&self) -> usize {
        self.episodes.len()
    }

    /// Number of episodes ending with the given termination.
    pub fn count(&self, termination: Termination) -> usize {
        self.episodes
            .iter()
            .filter(|e| e.termination == termination)
            .count()
    }

    /// Fraction of episodes that reached the goal.
    pub fn success_rate(&self) -> f64 {
        if self.episodes.is_empty() {
            0.0
        } else {
            self.count(Termination::Goal) as f64 / self.episodes.len() as f64
        }
    }
}

/// Training loop for one agent in one grid world
///
/// The loop owns the Q-table for the duration of [`TrainingLoop::run`]: it
/// creates it zeroed, is its only writer, and hands it over in the
/// [`TrainingResult`]. Values carry over from one episode to the next.
pub struct TrainingLoop {
    world: GridWorld,
    hyperparameters: Hyperparameters,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingLoop {
    /// Create a training loop.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidHyperparameter`] if the episode count or
    /// the per-episode step cap is zero.
    pub fn new(world: GridWorld, hyperparameters: Hyperparameters) -> Result<Self> {
        hyperparameters.validate()?;
        Ok(Self {
            world,
            hyperparameters,
            observers: Vec::new(),
        })
    }

    /// Add an observer to the loop
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    pub fn hyperparameters(&self) -> &Hyperparameters {
        &self.hyperparameters
    }

    /// Run training with a seed (or OS entropy when `None`).
    pub fn run_seeded(&mut self, seed: Option<u64>) -> Result<TrainingResult> {
        let mut rng = build_rng(seed);
        self.run(&mut rng)
    }

    /// Run all episodes, drawing every random choice from `rng`.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<TrainingResult> {
        let params = self.hyperparameters.clone();
        let mut q_table = QTable::new(self.world.grid_size());
        let mut exploration =
            EpsilonGreedy::new(params.epsilon, params.epsilon_decay, params.min_epsilon);
        let mut episodes = Vec::with_capacity(params.num_episodes);

        info!(
            episodes = params.num_episodes,
            max_steps = params.max_steps_per_episode,
            learning_rate = params.learning_rate,
            discount_factor = params.discount_factor,
            epsilon = params.epsilon,
            "starting Q-learning training"
        );

        for observer in &mut self.observers {
            observer.on_training_start(params.num_episodes)?;
        }

        for episode in 0..params.num_episodes {
            let result = self.run_episode(episode, &mut q_table, &exploration, rng)?;
            debug!(
                episode,
                reward = result.total_reward,
                steps = result.steps,
                termination = %result.termination,
                "episode finished"
            );

            for observer in &mut self.observers {
                observer.on_episode_end(&result)?;
            }

            episodes.push(result);
            exploration.decay();
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let result = TrainingResult {
            episodes,
            q_table,
            final_epsilon: exploration.epsilon(),
        };
        info!(
            episodes = result.total_episodes(),
            success_rate = result.success_rate(),
            visited_states = result.q_table.visited_states(),
            "training finished"
        );
        Ok(result)
    }

    fn run_episode<R: Rng + ?Sized>(
        &mut self,
        episode: usize,
        q_table: &mut QTable,
        exploration: &EpsilonGreedy,
        rng: &mut R,
    ) -> Result<EpisodeResult> {
        for observer in &mut self.observers {
            observer.on_episode_start(episode)?;
        }

        let params = &self.hyperparameters;
        let mut position = self.world.start();

        // An agent placed on a terminal cell has already arrived.
        if let Some(termination) = self.terminal_state(position) {
            return Ok(EpisodeResult {
                episode,
                total_reward: self.world.reward(position),
                steps: 0,
                termination,
                epsilon: exploration.epsilon(),
            });
        }

        let mut total_reward = 0.0;
        let mut steps = 0;

        let termination = loop {
            let action = exploration.select_action(q_table, position, rng);
            let next_position = self.world.step(position, action);
            let reward = self.world.reward(next_position);
            total_reward += reward;

            let update = q_table.q_learning_update(
                position,
                action,
                reward,
                next_position,
                params.learning_rate,
                params.discount_factor,
            )?;

            let observation = StepObservation {
                episode,
                step: steps,
                position,
                action,
                next_position,
                reward,
                update,
            };
            for observer in &mut self.observers {
                observer.on_step(&observation)?;
            }

            position = next_position;
            steps += 1;

            if let Some(termination) = self.terminal_state(position) {
                break termination;
            }
            if steps >= params.max_steps_per_episode {
                break Termination::StepLimit;
            }
        };

        Ok(EpisodeResult {
            episode,
            total_reward,
            steps,
            termination,
            epsilon: exploration.epsilon(),
        })
    }

    fn terminal_state(&self, position: Position) -> Option<Termination> {
        if self.world.is_goal(position) {
            Some(Termination::Goal)
        } else if self.world.is_trap(position) {
            Some(Termination::Trap)
        } else {
            None
        }
    }
}
