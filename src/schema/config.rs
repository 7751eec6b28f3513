//! Configuration types for the evolutionary path search.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangular arena waypoints are sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            max_x: 1920.0,
            min_y: 0.0,
            max_y: 1000.0,
        }
    }
}

/// How the dynamic upper bound on path length is derived.
///
/// Either bound resolves to "two anchors plus one slot per unit", so a world
/// without obstacles collapses to the direct two-point connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathLimit {
    /// One intermediate slot per obstacle.
    #[default]
    ObstacleCount,
    /// One intermediate slot per completed generation: longer paths become
    /// representable as the run progresses.
    GenerationCount,
}

/// Weights of the cost terms and the fitness-related constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostWeights {
    /// Weight of the total path length.
    #[serde(default = "default_distance_weight")]
    pub distance: f64,
    /// Weight of the sharp-turn penalty.
    #[serde(default = "default_smooth_weight")]
    pub smooth: f64,
    /// Weight of the obstacle-clearance term.
    #[serde(default = "default_clear_weight")]
    pub clear: f64,
    /// Multiplier applied to a negative clearance margin, so intrusions
    /// outweigh the minimum safe clearance.
    #[serde(default = "default_clearance_penalty")]
    pub clearance_penalty: f64,
    /// Fitness ceiling: `fitness = max(cost_ceiling - cost, 0)`.
    #[serde(default = "default_cost_ceiling")]
    pub cost_ceiling: f64,
    /// Rescale the distance weight to `100 / straight-line(robot, destination)`
    /// at the start of each run, making the length term scale-free.
    #[serde(default)]
    pub normalize_distance: bool,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            distance: default_distance_weight(),
            smooth: default_smooth_weight(),
            clear: default_clear_weight(),
            clearance_penalty: default_clearance_penalty(),
            cost_ceiling: default_cost_ceiling(),
            normalize_distance: false,
        }
    }
}

fn default_distance_weight() -> f64 {
    2.0
}
fn default_smooth_weight() -> f64 {
    2000.0
}
fn default_clear_weight() -> f64 {
    2.0
}
fn default_clearance_penalty() -> f64 {
    1.0
}
fn default_cost_ceiling() -> f64 {
    10000.0
}

/// Per-operator application probabilities and mutation magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatorRates {
    /// Probability that a parent pair exchanges suffixes.
    #[serde(default = "default_crossover_rate")]
    pub crossover: f64,
    /// Probability of rotating a path's interior.
    #[serde(default = "default_rotate_rate")]
    pub rotate: f64,
    /// Per-slot probability of inserting a random waypoint.
    #[serde(default = "default_insert_rate")]
    pub insert: f64,
    /// Per-waypoint probability of deletion.
    #[serde(default = "default_remove_rate")]
    pub remove: f64,
    /// Per-waypoint probability of a small coordinate perturbation.
    #[serde(default = "default_small_mutation_rate")]
    pub small_mutation: f64,
    /// Per-waypoint probability of a large coordinate perturbation.
    #[serde(default = "default_large_mutation_rate")]
    pub large_mutation: f64,
    /// Fraction of the distance to the arena boundary a small mutation may
    /// move a coordinate. Must stay below `large_mutation_scale`.
    #[serde(default = "default_small_mutation_scale")]
    pub small_mutation_scale: f64,
    /// Fraction for a large mutation; 1.0 allows the full boundary distance.
    #[serde(default = "default_large_mutation_scale")]
    pub large_mutation_scale: f64,
}

impl Default for OperatorRates {
    fn default() -> Self {
        Self {
            crossover: default_crossover_rate(),
            rotate: default_rotate_rate(),
            insert: default_insert_rate(),
            remove: default_remove_rate(),
            small_mutation: default_small_mutation_rate(),
            large_mutation: default_large_mutation_rate(),
            small_mutation_scale: default_small_mutation_scale(),
            large_mutation_scale: default_large_mutation_scale(),
        }
    }
}

fn default_crossover_rate() -> f64 {
    0.3
}
fn default_rotate_rate() -> f64 {
    0.01
}
fn default_insert_rate() -> f64 {
    0.05
}
fn default_remove_rate() -> f64 {
    0.05
}
fn default_small_mutation_rate() -> f64 {
    0.05
}
fn default_large_mutation_rate() -> f64 {
    0.05
}
fn default_small_mutation_scale() -> f64 {
    0.08
}
fn default_large_mutation_scale() -> f64 {
    1.0
}

/// Top-level search configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Sampling arena for random and mutated waypoints.
    #[serde(default)]
    pub arena: Arena,
    /// Individuals per generation. Must be even: breeding fills the
    /// population pair by pair.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Dynamic path-length bound mode.
    #[serde(default)]
    pub path_limit: PathLimit,
    /// Cost weights and fitness constants.
    #[serde(default)]
    pub weights: CostWeights,
    /// Genetic operator probabilities.
    #[serde(default)]
    pub rates: OperatorRates,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            population_size: default_population_size(),
            path_limit: PathLimit::default(),
            weights: CostWeights::default(),
            rates: OperatorRates::default(),
            random_seed: None,
        }
    }
}

fn default_population_size() -> usize {
    100
}

impl SearchConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 || self.population_size % 2 != 0 {
            return Err(ConfigError::InvalidPopulationSize);
        }
        if !(self.arena.min_x < self.arena.max_x && self.arena.min_y < self.arena.max_y) {
            return Err(ConfigError::InvalidArena);
        }
        let r = &self.rates;
        for (name, value) in [
            ("crossover", r.crossover),
            ("rotate", r.rotate),
            ("insert", r.insert),
            ("remove", r.remove),
            ("small_mutation", r.small_mutation),
            ("large_mutation", r.large_mutation),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidRate { name, value });
            }
        }
        if !(r.small_mutation_scale > 0.0
            && r.small_mutation_scale <= r.large_mutation_scale
            && r.large_mutation_scale <= 1.0)
        {
            return Err(ConfigError::InvalidMutationScales);
        }
        let w = &self.weights;
        if !(w.distance >= 0.0 && w.smooth >= 0.0 && w.clear >= 0.0 && w.clearance_penalty >= 0.0)
        {
            return Err(ConfigError::InvalidWeights);
        }
        if !(w.cost_ceiling > 0.0) {
            return Err(ConfigError::InvalidCostCeiling);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be an even number of at least 2")]
    InvalidPopulationSize,
    #[error("Arena bounds must satisfy min < max on both axes")]
    InvalidArena,
    #[error("Operator probability `{name}` must lie in [0, 1], got {value}")]
    InvalidRate { name: &'static str, value: f64 },
    #[error("Mutation scales must satisfy 0 < small <= large <= 1")]
    InvalidMutationScales,
    #[error("Cost weights must be non-negative")]
    InvalidWeights,
    #[error("Fitness ceiling must be positive")]
    InvalidCostCeiling,
}
