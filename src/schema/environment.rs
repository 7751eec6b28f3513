//! Planning environment and CLI scenario types.

use serde::{Deserialize, Serialize};

use crate::geometry::{Circle, Point};

use super::SearchConfig;

/// The world one search runs against: read-only during a run, replaceable
/// between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Environment {
    /// The moving agent.
    pub robot: Circle,
    /// Where it wants to be.
    pub destination: Point,
    /// Static circular obstacles.
    #[serde(default)]
    pub obstacles: Vec<Circle>,
}

impl Environment {
    pub fn new(robot: Circle, destination: Point, obstacles: Vec<Circle>) -> Self {
        Self {
            robot,
            destination,
            obstacles,
        }
    }

    /// Straight-line distance from the robot center to the destination.
    pub fn straight_line(&self) -> f64 {
        crate::geometry::norm(self.destination - self.robot.center)
    }
}

/// A complete planning scenario, as consumed by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Robot, destination, and obstacles.
    pub environment: Environment,
    /// Search configuration; defaults apply field by field.
    #[serde(default)]
    pub search: SearchConfig,
    /// Generation budget for one invocation.
    #[serde(default = "default_generations")]
    pub generations: usize,
}

fn default_generations() -> usize {
    150
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_parses_with_minimal_fields() {
        let json = r#"{
            "environment": {
                "robot": { "center": { "x": 0.0, "y": 0.0 }, "radius": 5.0 },
                "destination": { "x": 100.0, "y": 0.0 },
                "obstacles": [
                    { "center": { "x": 50.0, "y": 0.0 }, "radius": 10.0 }
                ]
            }
        }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.generations, 150);
        assert_eq!(scenario.search, SearchConfig::default());
        assert_eq!(scenario.environment.obstacles.len(), 1);
        assert_eq!(scenario.environment.straight_line(), 100.0);
    }
}
