//! Evolutionary path planning for a circular robot among circular obstacles.
//!
//! This crate plans a 2D route through a bounded rectangular arena with a
//! genetic algorithm instead of exact geometric planning: candidate paths are
//! variable-length waypoint chromosomes, scored by length, turn smoothness,
//! and obstacle clearance, and bred generation by generation under a seeded
//! generator for fully reproducible runs.
//!
//! # Architecture
//!
//! The crate is split into three modules:
//!
//! - `schema`: Configuration and environment types (serde-backed)
//! - `geometry`: Pure planar geometry kernel
//! - `search`: Chromosomes, genetic operators, evaluation, and the driver
//!
//! # Example
//!
//! ```rust
//! use evopath::geometry::{Circle, Point};
//! use evopath::schema::SearchConfig;
//! use evopath::search::SearchEngine;
//!
//! let config = SearchConfig {
//!     random_seed: Some(7),
//!     ..Default::default()
//! };
//! let mut engine = SearchEngine::new(config).unwrap();
//!
//! // one obstacle sits on the straight line, so the plan has to bend
//! let path = engine.find_best_path(
//!     Circle::new(Point::new(0.0, 0.0), 5.0),
//!     Point::new(100.0, 0.0),
//!     vec![Circle::new(Point::new(50.0, 0.0), 10.0)],
//!     25,
//! );
//!
//! assert_eq!(path.first(), Some(&Point::new(0.0, 0.0)));
//! assert_eq!(path.last(), Some(&Point::new(100.0, 0.0)));
//! ```

pub mod geometry;
pub mod schema;
pub mod search;

// Re-export commonly used types
pub use geometry::{Circle, Point};
pub use schema::{Environment, Scenario, SearchConfig};
pub use search::SearchEngine;
