//! Individuals, population statistics, and wheel selection.

use std::cmp::Ordering;

use super::operators::PathRng;
use super::path::Path;

/// One candidate: a path plus its derived scores.
#[derive(Debug, Clone)]
pub struct Individual {
    pub path: Path,
    /// True when every segment cleared the collision test.
    pub valid: bool,
    /// Lower is better.
    pub cost: f64,
    /// Higher is better; what selection runs on.
    pub fitness: f64,
}

impl Individual {
    pub fn new(path: Path) -> Self {
        Self {
            path,
            valid: true,
            cost: 0.0,
            fitness: 0.0,
        }
    }
}

// Ordering between individuals is defined by fitness alone.
impl PartialEq for Individual {
    fn eq(&self, other: &Self) -> bool {
        self.fitness == other.fitness
    }
}

impl PartialOrd for Individual {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.fitness.partial_cmp(&other.fitness)
    }
}

/// Aggregate fitness readout of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    pub sum: f64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

/// One generation's candidates plus cached aggregate statistics.
///
/// `calc_stats` must run after every batch of fitness changes and before any
/// `select` call: the cumulative sums it rebuilds are what the wheel draws
/// against.
#[derive(Debug, Clone, Default)]
pub struct Population {
    pub individuals: Vec<Individual>,
    cumulative: Vec<f64>,
    pub sum: f64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

impl Population {
    pub fn new(individuals: Vec<Individual>) -> Self {
        Self {
            individuals,
            cumulative: Vec::new(),
            sum: 0.0,
            avg: 0.0,
            min: 0.0,
            max: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Recompute sum/avg/min/max and the cumulative-fitness index.
    pub fn calc_stats(&mut self) {
        self.cumulative.clear();
        if self.individuals.is_empty() {
            self.sum = 0.0;
            self.avg = 0.0;
            self.min = 0.0;
            self.max = 0.0;
            return;
        }
        self.sum = 0.0;
        self.min = self.individuals[0].fitness;
        self.max = self.individuals[0].fitness;
        for ind in &self.individuals {
            self.sum += ind.fitness;
            self.cumulative.push(self.sum);
            self.min = self.min.min(ind.fitness);
            self.max = self.max.max(ind.fitness);
        }
        self.avg = self.sum / self.individuals.len() as f64;
    }

    /// Cached aggregates as one value.
    pub fn stats(&self) -> GenerationStats {
        GenerationStats {
            sum: self.sum,
            avg: self.avg,
            min: self.min,
            max: self.max,
        }
    }

    /// Fitness-proportional (wheel) draw: a uniform slice of the fitness sum,
    /// binary-searched in the cumulative index.
    ///
    /// A population whose fitness mass is zero (every cost at or above the
    /// ceiling) has no wheel to spin; that degenerate case explicitly falls
    /// back to a uniform draw.
    pub fn select(&self, rng: &mut PathRng) -> &Individual {
        if self.sum <= 0.0 {
            return &self.individuals[rng.index(self.individuals.len())];
        }
        let choice = rng.fraction() * self.sum;
        let idx = self.cumulative.partition_point(|&c| c <= choice);
        &self.individuals[idx.min(self.individuals.len() - 1)]
    }

    /// Highest-fitness individual; the first one encountered wins ties.
    pub fn best(&self) -> &Individual {
        let mut best = &self.individuals[0];
        for ind in &self.individuals[1..] {
            if ind.fitness > best.fitness {
                best = ind;
            }
        }
        best
    }
}
