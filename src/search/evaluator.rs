//! Geometric validity marking and cost scoring for candidate paths.
//!
//! Collision testing is a Minkowski-sum check: a segment collides with an
//! obstacle when its distance to the obstacle center drops under the obstacle
//! radius plus the robot radius. The one carve-out is an obstacle that
//! swallows the destination itself; reaching the destination is legal by
//! definition, so such an obstacle never invalidates the final approach.

use std::f64::consts::PI;

use crate::geometry::{self, Circle};
use crate::schema::{CostWeights, Environment};

use super::path::Path;

/// Scores paths against one environment.
pub struct Evaluator {
    weights: CostWeights,
    environment: Environment,
    distance_weight: f64,
}

impl Evaluator {
    pub fn new(weights: CostWeights, environment: Environment) -> Self {
        let mut distance_weight = weights.distance;
        if weights.normalize_distance {
            let straight = environment.straight_line();
            if straight > 0.0 {
                distance_weight = 100.0 / straight;
            }
        }
        Self {
            weights,
            environment,
            distance_weight,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Whether `obstacle` swallows the destination together with the robot
    /// footprint.
    fn embeds_destination(&self, obstacle: &Circle) -> bool {
        let swallowing = Circle::new(
            obstacle.center,
            obstacle.radius + self.environment.robot.radius,
        );
        swallowing.contains(self.environment.destination)
    }

    /// Re-flag every segment against every obstacle; returns overall
    /// validity. Runs once per generation, after the operator pipeline.
    pub fn mark(&self, path: &mut Path) -> bool {
        let n = path.len();
        let mut all_valid = true;
        path.waypoints[n - 1].valid = true;

        for i in 0..n - 1 {
            path.waypoints[i].valid = true;
            let a = path.waypoints[i].pos;
            let b = path.waypoints[i + 1].pos;
            let final_segment = i == n - 2;

            for obstacle in &self.environment.obstacles {
                if final_segment && self.embeds_destination(obstacle) {
                    continue;
                }
                let border = obstacle.radius + self.environment.robot.radius;
                if geometry::seg_point(a, b, obstacle.center) < border {
                    path.waypoints[i].valid = false;
                    all_valid = false;
                }
            }
        }
        all_valid
    }

    /// Total Euclidean length.
    pub fn distance(&self, path: &Path) -> f64 {
        path.waypoints
            .windows(2)
            .map(|w| geometry::norm(w[1].pos - w[0].pos))
            .sum()
    }

    /// Sharpest turn, weighted by how short its adjacent segments are.
    ///
    /// The turn at an interior waypoint is the deflection from going
    /// straight: zero for a collinear continuation, `pi` for a full
    /// reversal. Dividing by the shorter adjacent segment makes a sharp
    /// turn over a short hop score worse than the same turn spread wide.
    pub fn smoothness(&self, path: &Path) -> f64 {
        let mut max_s = 0.0f64;
        for i in 1..path.len().saturating_sub(1) {
            let a = path.waypoints[i].pos;
            let b = path.waypoints[i - 1].pos;
            let c = path.waypoints[i + 1].pos;
            let turn = PI - geometry::angle(b - a, c - a);
            let shorter = geometry::norm(b - a).min(geometry::norm(c - a));
            max_s = max_s.max(turn / shorter);
        }
        max_s
    }

    /// Worst clearance margin over all segments.
    ///
    /// Per segment: the closest approach to any applicable obstacle
    /// boundary, minus the robot radius. An intrusion flips sign and is
    /// amplified by the configured penalty. Obstacles embedding the
    /// destination are skipped; a segment with no applicable obstacle
    /// contributes nothing.
    pub fn clearance(&self, path: &Path) -> f64 {
        let mut max_c = 0.0f64;
        for w in path.waypoints.windows(2) {
            let (a, b) = (w[0].pos, w[1].pos);
            let mut min_dist = f64::INFINITY;
            for obstacle in &self.environment.obstacles {
                if self.embeds_destination(obstacle) {
                    continue;
                }
                min_dist =
                    min_dist.min(geometry::seg_point(a, b, obstacle.center) - obstacle.radius);
            }
            if !min_dist.is_finite() {
                continue;
            }
            let mut margin = min_dist - self.environment.robot.radius;
            if margin < 0.0 {
                margin *= -self.weights.clearance_penalty;
            }
            max_c = max_c.max(margin);
        }
        max_c
    }

    /// Weighted cost of a collision-free path. Lower is better.
    pub fn cost(&self, path: &Path) -> f64 {
        self.distance_weight * self.distance(path)
            + self.weights.smooth * self.smoothness(path)
            + self.weights.clear * self.clearance(path)
    }

    /// Cost of a colliding path: two per invalid segment on top of the worst
    /// valid cost of the generation, so every colliding path ranks behind
    /// every clean one while fewer collisions still score better.
    pub fn bad_cost(&self, path: &Path, max_valid_cost: f64) -> f64 {
        2.0 * path.invalid_segments() as f64 + 2.0 + max_valid_cost
    }

    /// Bounded, higher-is-better transform of cost.
    pub fn fitness(&self, cost: f64) -> f64 {
        (self.weights.cost_ceiling - cost).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::{Circle, Point};
    use crate::schema::{CostWeights, Environment};

    use super::super::path::{Path, Waypoint};
    use super::*;

    fn world(obstacles: Vec<Circle>) -> Evaluator {
        let environment = Environment::new(
            Circle::new(Point::new(0.0, 0.0), 5.0),
            Point::new(100.0, 0.0),
            obstacles,
        );
        Evaluator::new(CostWeights::default(), environment)
    }

    fn direct() -> Path {
        Path::direct(Point::new(0.0, 0.0), Point::new(100.0, 0.0))
    }

    #[test]
    fn unobstructed_direct_segment_is_valid() {
        let evaluator = world(vec![Circle::new(Point::new(50.0, 80.0), 10.0)]);
        let mut path = direct();
        assert!(evaluator.mark(&mut path));
        assert_eq!(path.invalid_segments(), 0);
    }

    #[test]
    fn blocking_obstacle_invalidates_the_segment() {
        let evaluator = world(vec![Circle::new(Point::new(50.0, 0.0), 10.0)]);
        let mut path = direct();
        assert!(!evaluator.mark(&mut path));
        assert!(!path.waypoints[0].valid);
        assert!(path.waypoints[1].valid);
        assert_eq!(path.invalid_segments(), 1);
    }

    #[test]
    fn minkowski_radius_includes_the_robot() {
        // 14 away from the segment: outside the obstacle (r=10) but inside
        // obstacle + robot (15)
        let evaluator = world(vec![Circle::new(Point::new(50.0, 14.0), 10.0)]);
        let mut path = direct();
        assert!(!evaluator.mark(&mut path));
    }

    #[test]
    fn embedded_destination_exempts_only_the_final_segment() {
        // obstacle swallowing the destination
        let evaluator = world(vec![Circle::new(Point::new(100.0, 0.0), 20.0)]);

        // direct path: the sole (final) segment crosses the obstacle, yet
        // stays valid
        let mut path = direct();
        assert!(evaluator.mark(&mut path));

        // detour through (160, 0): the first segment crosses the same
        // obstacle and is not exempt
        let mut path = Path {
            waypoints: vec![
                Waypoint::new(Point::new(0.0, 0.0), true),
                Waypoint::new(Point::new(160.0, 0.0), true),
                Waypoint::new(Point::new(100.0, 0.0), true),
            ],
        };
        assert!(!evaluator.mark(&mut path));
        assert!(!path.waypoints[0].valid);
        assert!(path.waypoints[1].valid);
    }

    #[test]
    fn distance_sums_segment_lengths() {
        let path = Path {
            waypoints: vec![
                Waypoint::new(Point::new(0.0, 0.0), true),
                Waypoint::new(Point::new(30.0, 40.0), true),
                Waypoint::new(Point::new(30.0, 100.0), true),
            ],
        };
        assert!((world(Vec::new()).distance(&path) - 110.0).abs() < 1e-9);
    }

    #[test]
    fn smoothness_is_zero_for_a_straight_run_and_grows_with_the_turn() {
        let evaluator = world(Vec::new());
        let straight = Path {
            waypoints: vec![
                Waypoint::new(Point::new(0.0, 0.0), true),
                Waypoint::new(Point::new(50.0, 0.0), true),
                Waypoint::new(Point::new(100.0, 0.0), true),
            ],
        };
        assert!(evaluator.smoothness(&straight) < 1e-12);

        let bent = Path {
            waypoints: vec![
                Waypoint::new(Point::new(0.0, 0.0), true),
                Waypoint::new(Point::new(50.0, 50.0), true),
                Waypoint::new(Point::new(100.0, 0.0), true),
            ],
        };
        let expected = (PI / 2.0) / (50.0f64 * 2.0f64.sqrt());
        assert!((evaluator.smoothness(&bent) - expected).abs() < 1e-9);
    }

    #[test]
    fn clearance_amplifies_intrusions() {
        // closest approach 14, obstacle radius 10, robot radius 5: margin -1
        let evaluator = world(vec![Circle::new(Point::new(50.0, 14.0), 10.0)]);
        assert!((evaluator.clearance(&direct()) - 1.0).abs() < 1e-9);

        // far obstacle: positive margin passes through unscaled
        let evaluator = world(vec![Circle::new(Point::new(50.0, 100.0), 10.0)]);
        assert!((evaluator.clearance(&direct()) - 85.0).abs() < 1e-9);
    }

    #[test]
    fn clearance_is_zero_without_applicable_obstacles() {
        assert_eq!(world(Vec::new()).clearance(&direct()), 0.0);
        // an obstacle embedding the destination is skipped entirely
        let evaluator = world(vec![Circle::new(Point::new(100.0, 0.0), 20.0)]);
        assert_eq!(evaluator.clearance(&direct()), 0.0);
    }

    #[test]
    fn bad_cost_grows_with_the_collision_count() {
        let evaluator = world(Vec::new());
        let mut one = direct();
        one.waypoints[0].valid = false;
        let two = Path {
            waypoints: vec![
                Waypoint::new(Point::new(0.0, 0.0), false),
                Waypoint::new(Point::new(50.0, 0.0), false),
                Waypoint::new(Point::new(100.0, 0.0), true),
            ],
        };

        let max_valid = 123.0;
        assert!((evaluator.bad_cost(&one, max_valid) - 127.0).abs() < 1e-12);
        assert!((evaluator.bad_cost(&two, max_valid) - 129.0).abs() < 1e-12);
        assert!(evaluator.bad_cost(&two, max_valid) > evaluator.bad_cost(&one, max_valid));
    }

    #[test]
    fn fitness_is_floored_at_zero() {
        let evaluator = world(Vec::new());
        assert_eq!(evaluator.fitness(9000.0), 1000.0);
        assert_eq!(evaluator.fitness(12000.0), 0.0);
    }

    #[test]
    fn normalized_distance_weight_is_scale_free() {
        let weights = CostWeights {
            normalize_distance: true,
            smooth: 0.0,
            clear: 0.0,
            ..Default::default()
        };
        let environment = Environment::new(
            Circle::new(Point::new(0.0, 0.0), 5.0),
            Point::new(400.0, 0.0),
            Vec::new(),
        );
        let evaluator = Evaluator::new(weights, environment);
        // direct path costs 100 regardless of how far the destination is
        let path = Path::direct(Point::new(0.0, 0.0), Point::new(400.0, 0.0));
        assert!((evaluator.cost(&path) - 100.0).abs() < 1e-9);
    }
}
