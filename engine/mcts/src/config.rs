//! Search configuration parameters.

/// Configuration for UCT search.
#[derive(Debug, Clone)]
pub struct UctConfig {
    /// Number of simulations to run per search.
    pub num_simulations: u32,

    /// Exploration constant in the UCT formula.
    /// Higher values encourage exploration, lower values favor exploitation.
    pub exploration: f64,
}

impl Default for UctConfig {
    fn default() -> Self {
        Self {
            num_simulations: 1000,
            exploration: 1.4,
        }
    }
}

impl UctConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            num_simulations: 50,
            exploration: 1.4,
        }
    }

    /// Builder pattern: set number of simulations.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }
}
