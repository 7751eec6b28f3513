//! Evolutionary path search.
//!
//! The search treats a path as a variable-length chromosome of waypoints and
//! evolves a fixed-size population of them against one environment:
//!
//! - **Chromosome** (`path`): waypoint sequence anchored at the robot center
//!   and the destination
//! - **Operators** (`operators`): crossover, interior rotation, insertion,
//!   removal, and two mutation strengths, all behind one seeded generator
//! - **Evaluation** (`evaluator`): Minkowski collision marking plus the
//!   distance / smoothness / clearance cost blend
//! - **Population** (`population`): aggregate statistics and wheel selection
//! - **Driver** (`engine`): generation turnover with additive budgets
//!
//! # Example
//!
//! ```rust,no_run
//! use evopath::geometry::{Circle, Point};
//! use evopath::schema::SearchConfig;
//! use evopath::search::SearchEngine;
//!
//! let config = SearchConfig {
//!     random_seed: Some(35),
//!     ..Default::default()
//! };
//! let mut engine = SearchEngine::new(config).unwrap();
//! let path = engine.find_best_path(
//!     Circle::new(Point::new(0.0, 0.0), 5.0),
//!     Point::new(100.0, 0.0),
//!     vec![Circle::new(Point::new(50.0, 0.0), 10.0)],
//!     150,
//! );
//! println!("best path has {} waypoints", path.len());
//! ```

mod engine;
mod evaluator;
mod operators;
mod path;
mod population;

pub use engine::SearchEngine;
pub use evaluator::Evaluator;
pub use operators::PathRng;
pub use path::{Path, Waypoint};
pub use population::{GenerationStats, Individual, Population};
