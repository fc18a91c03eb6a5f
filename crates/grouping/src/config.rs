use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning knobs for the genetic search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Candidate partitions per generation
    pub population_size: usize,

    /// Upper bound on evolved generations
    pub generations: usize,

    /// Wall-clock budget in milliseconds, checked once per generation
    pub timeout_ms: u64,

    /// Share of each generation carried forward unchanged (0.0-1.0)
    pub elite_fraction: f64,

    /// Probability that a child is mutated (0.0-1.0)
    pub mutation_rate: f64,

    /// Candidates sampled per tournament
    pub tournament_size: usize,

    /// Share of participants moved during crossover (0.0-1.0)
    pub crossover_swap_fraction: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            timeout_ms: 2_000,
            elite_fraction: 0.2,
            mutation_rate: 0.1,
            tournament_size: 3,
            crossover_swap_fraction: 0.1,
        }
    }
}

impl SearchConfig {
    /// Small, short search for interactive use
    pub fn for_speed() -> Self {
        Self {
            population_size: 20,
            generations: 40,
            timeout_ms: 250,
            ..Default::default()
        }
    }

    /// Larger population and budget for offline runs
    pub fn thorough() -> Self {
        Self {
            population_size: 120,
            generations: 400,
            timeout_ms: 10_000,
            ..Default::default()
        }
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Number of elites carried into the next generation
    #[must_use]
    pub fn elite_count(&self) -> usize {
        ((self.population_size as f64 * self.elite_fraction).round() as usize)
            .min(self.population_size)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err(format!(
                "population_size must be at least 2, got {}",
                self.population_size
            ));
        }

        if self.tournament_size == 0 {
            return Err("tournament_size must be > 0".to_string());
        }

        for (name, value) in [
            ("elite_fraction", self.elite_fraction),
            ("mutation_rate", self.mutation_rate),
            ("crossover_swap_fraction", self.crossover_swap_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{name} must be within [0, 1], got {value}"));
            }
        }

        Ok(())
    }
}
