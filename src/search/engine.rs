//! Generation-by-generation search driver.

use log::debug;

use crate::geometry::{Circle, Point};
use crate::schema::{ConfigError, Environment, PathLimit, SearchConfig};

use super::evaluator::Evaluator;
use super::operators::PathRng;
use super::population::{GenerationStats, Individual, Population};

/// Evolutionary path search engine.
///
/// Owns the configuration, the seeded generator, and the population history.
/// Generation budgets are additive: a second call with the same environment
/// continues from the last stored generation instead of restarting, and with
/// a fixed `random_seed` the split run reproduces the single longer run
/// exactly.
pub struct SearchEngine {
    config: SearchConfig,
    rng: PathRng,
    environment: Environment,
    populations: Vec<Population>,
}

impl SearchEngine {
    /// Build an engine from a validated configuration.
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.random_seed.unwrap_or_else(rand::random);
        Ok(Self {
            config,
            rng: PathRng::new(seed),
            environment: Environment::default(),
            populations: Vec::new(),
        })
    }

    /// Completed generation count.
    pub fn generation(&self) -> usize {
        self.populations.len()
    }

    /// Read-only view of the full generation history.
    pub fn history(&self) -> &[Population] {
        &self.populations
    }

    /// Per-generation aggregate statistics, oldest first.
    pub fn stats(&self) -> Vec<GenerationStats> {
        self.populations.iter().map(Population::stats).collect()
    }

    /// Best individual of the newest generation, if any generation exists.
    pub fn best(&self) -> Option<&Individual> {
        self.populations.last().map(Population::best)
    }

    /// Drop all history, e.g. before planning in a different world.
    pub fn reset(&mut self) {
        self.populations.clear();
    }

    /// Plan a path from the robot to `destination`, spending `generations`
    /// more generations on top of whatever history already exists.
    ///
    /// Returns the best path found, validity flags stripped. The result is
    /// not guaranteed collision-free on a tight budget; callers needing the
    /// guarantee check [`SearchEngine::best`] for the validity verdict.
    pub fn find_best_path(
        &mut self,
        robot: Circle,
        destination: Point,
        obstacles: Vec<Circle>,
        generations: usize,
    ) -> Vec<Point> {
        self.environment = Environment::new(robot, destination, obstacles);
        let evaluator = Evaluator::new(self.config.weights, self.environment.clone());
        let budget = self.populations.len() + generations;

        if self.populations.is_empty() {
            let brood = self.randomize();
            let population = self.score(&evaluator, brood);
            self.log_generation(&population);
            self.populations.push(population);
        }

        while self.populations.len() < budget {
            let mut brood = self.breed();
            self.apply_operators(&mut brood);
            let population = self.score(&evaluator, brood);
            self.log_generation(&population);
            self.populations.push(population);
        }

        self.populations
            .last()
            .map(|p| p.best().path.points())
            .unwrap_or_default()
    }

    /// Upper bound on chromosome length: the two anchors plus one slot per
    /// obstacle or per completed generation, depending on the configured
    /// mode. A world without obstacles collapses to the direct connection.
    fn max_path_len(&self) -> usize {
        let slots = match self.config.path_limit {
            PathLimit::ObstacleCount => self.environment.obstacles.len(),
            PathLimit::GenerationCount => self.populations.len(),
        };
        slots + 2
    }

    /// Fresh generation-0 brood of random chromosomes.
    fn randomize(&mut self) -> Vec<Individual> {
        let max_len = self.max_path_len();
        let start = self.environment.robot.center;
        let end = self.environment.destination;
        let arena = self.config.arena;
        (0..self.config.population_size)
            .map(|_| Individual::new(self.rng.random_path(start, end, &arena, max_len)))
            .collect()
    }

    /// Breed a full brood from the newest population: the previous best is
    /// seeded into the first pair, the remaining pairs are drawn by wheel
    /// selection, and every pair goes through crossover.
    fn breed(&mut self) -> Vec<Individual> {
        let size = self.config.population_size;
        let mut brood = Vec::with_capacity(size);

        let Self {
            rng,
            config,
            populations,
            ..
        } = self;
        let previous = populations.last().expect("no prior generation to breed from");

        brood.push(previous.best().clone());
        brood.push(previous.best().clone());
        while brood.len() < size {
            brood.push(previous.select(rng).clone());
            brood.push(previous.select(rng).clone());
        }

        for pair in brood.chunks_mut(2) {
            let (a, b) = pair.split_at_mut(1);
            rng.crossover(&config.rates, &mut a[0].path, &mut b[0].path);
        }
        brood
    }

    /// The per-individual operator pipeline, in fixed order.
    fn apply_operators(&mut self, brood: &mut [Individual]) {
        let max_len = self.max_path_len();
        let rates = self.config.rates;
        let arena = self.config.arena;
        for ind in brood {
            self.rng.remove(&rates, &mut ind.path);
            self.rng.insert(&rates, &arena, max_len, &mut ind.path);
            self.rng.rotate(&rates, &mut ind.path);
            self.rng.small_mutate(&rates, &arena, &mut ind.path);
            self.rng.large_mutate(&rates, &arena, &mut ind.path);
        }
    }

    /// Mark validity, assign costs and fitness, and freeze the statistics.
    ///
    /// Valid paths are costed first so the generation's worst valid cost is
    /// known when the colliding ones are priced above it.
    fn score(&self, evaluator: &Evaluator, mut brood: Vec<Individual>) -> Population {
        let mut max_valid_cost = 0.0f64;
        for ind in &mut brood {
            ind.valid = evaluator.mark(&mut ind.path);
            if ind.valid {
                ind.cost = evaluator.cost(&ind.path);
                max_valid_cost = max_valid_cost.max(ind.cost);
            }
        }
        for ind in &mut brood {
            if !ind.valid {
                ind.cost = evaluator.bad_cost(&ind.path, max_valid_cost);
            }
            ind.fitness = evaluator.fitness(ind.cost);
        }
        let mut population = Population::new(brood);
        population.calc_stats();
        population
    }

    fn log_generation(&self, population: &Population) {
        debug!(
            "generation {}: fitness sum {:.2}, avg {:.2}, min {:.2}, max {:.2}",
            self.populations.len(),
            population.sum,
            population.avg,
            population.min,
            population.max,
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::{self, Circle, Point};
    use crate::schema::{PathLimit, SearchConfig};

    use super::*;

    fn seeded(seed: u64) -> SearchConfig {
        SearchConfig {
            random_seed: Some(seed),
            ..Default::default()
        }
    }

    fn blocked_world() -> (Circle, Point, Vec<Circle>) {
        (
            Circle::new(Point::new(0.0, 0.0), 5.0),
            Point::new(100.0, 0.0),
            vec![Circle::new(Point::new(50.0, 0.0), 10.0)],
        )
    }

    #[test]
    fn no_obstacles_collapses_to_the_direct_path() {
        let mut engine = SearchEngine::new(seeded(11)).unwrap();
        let start = Point::new(5.0, 5.0);
        let end = Point::new(800.0, 400.0);
        let path = engine.find_best_path(Circle::new(start, 3.0), end, Vec::new(), 5);
        assert_eq!(path, vec![start, end]);
        assert!(engine.best().unwrap().valid);
        assert_eq!(engine.generation(), 5);
    }

    #[test]
    fn blocked_direct_line_forces_a_valid_detour() {
        let (robot, destination, obstacles) = blocked_world();
        let mut engine = SearchEngine::new(seeded(35)).unwrap();
        let path = engine.find_best_path(robot, destination, obstacles, 50);

        let best = engine.best().unwrap();
        assert!(best.valid, "direct line is blocked, best path must detour");

        let total: f64 = path.windows(2).map(|w| geometry::norm(w[1] - w[0])).sum();
        assert!(total > 100.0, "a detour is longer than the straight line");
        assert_eq!(path.first(), Some(&robot.center));
        assert_eq!(path.last(), Some(&destination));
    }

    #[test]
    fn resuming_reproduces_the_single_longer_run() {
        let (robot, destination, obstacles) = blocked_world();

        let mut split = SearchEngine::new(seeded(7)).unwrap();
        split.find_best_path(robot, destination, obstacles.clone(), 10);
        let resumed = split.find_best_path(robot, destination, obstacles.clone(), 10);

        let mut single = SearchEngine::new(seeded(7)).unwrap();
        let oneshot = single.find_best_path(robot, destination, obstacles, 20);

        assert_eq!(split.generation(), 20);
        assert_eq!(single.generation(), 20);
        assert_eq!(resumed, oneshot);

        // the best fitness known across the combined run never regresses
        // against the one-shot run
        let best_known = |engine: &SearchEngine| {
            engine
                .history()
                .iter()
                .map(|p| p.max)
                .fold(f64::NEG_INFINITY, f64::max)
        };
        assert_eq!(best_known(&split), best_known(&single));
    }

    #[test]
    fn fixed_seed_reproduces_the_same_plan() {
        let (robot, destination, obstacles) = blocked_world();
        let mut a = SearchEngine::new(seeded(99)).unwrap();
        let mut b = SearchEngine::new(seeded(99)).unwrap();
        assert_eq!(
            a.find_best_path(robot, destination, obstacles.clone(), 15),
            b.find_best_path(robot, destination, obstacles, 15),
        );
    }

    #[test]
    fn generation_count_mode_starts_with_direct_paths_only() {
        let config = SearchConfig {
            path_limit: PathLimit::GenerationCount,
            ..seeded(3)
        };
        let mut engine = SearchEngine::new(config).unwrap();
        let (robot, destination, obstacles) = blocked_world();
        engine.find_best_path(robot, destination, obstacles, 5);

        // generation 0 allowed no intermediate waypoints yet
        assert!(
            engine.history()[0]
                .individuals
                .iter()
                .all(|ind| ind.path.len() == 2)
        );
    }

    #[test]
    fn random_generation_zero_respects_the_path_bounds() {
        let (robot, destination, _) = blocked_world();
        let obstacles: Vec<Circle> = (0..6)
            .map(|i| Circle::new(Point::new(200.0 + 100.0 * i as f64, 800.0), 5.0))
            .collect();
        let mut engine = SearchEngine::new(seeded(21)).unwrap();
        engine.find_best_path(robot, destination, obstacles, 1);

        // six obstacles: lengths live in [2, 8]
        for ind in &engine.history()[0].individuals {
            assert!(ind.path.len() >= 2 && ind.path.len() <= 8);
            assert_eq!(ind.path.waypoints[0].pos, robot.center);
            assert_eq!(ind.path.waypoints[ind.path.len() - 1].pos, destination);
        }
    }

    #[test]
    fn reset_clears_history_for_a_fresh_world() {
        let (robot, destination, obstacles) = blocked_world();
        let mut engine = SearchEngine::new(seeded(4)).unwrap();
        engine.find_best_path(robot, destination, obstacles, 3);
        assert_eq!(engine.generation(), 3);
        engine.reset();
        assert_eq!(engine.generation(), 0);
        assert!(engine.best().is_none());
    }
}
