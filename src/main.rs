//! Path planner CLI - plan a route from a JSON scenario.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use evopath::geometry::{Circle, Point};
use evopath::schema::{Environment, Scenario, SearchConfig};
use evopath::search::SearchEngine;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <scenario.json> [generations]", args[0]);
        eprintln!();
        eprintln!("Plan a path through circular obstacles from a JSON scenario.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  scenario.json  Path to the scenario file");
        eprintln!("  generations    Generation budget (default: from the scenario)");
        eprintln!();
        eprintln!("A template scenario is generated with the --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_scenario();
        return;
    }

    let scenario_path = PathBuf::from(&args[1]);
    let scenario_str = fs::read_to_string(&scenario_path).unwrap_or_else(|e| {
        eprintln!("Error reading scenario file: {}", e);
        std::process::exit(1);
    });

    let scenario: Scenario = serde_json::from_str(&scenario_str).unwrap_or_else(|e| {
        eprintln!("Error parsing scenario: {}", e);
        std::process::exit(1);
    });

    let generations: usize = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(scenario.generations);

    let mut engine = SearchEngine::new(scenario.search).unwrap_or_else(|e| {
        eprintln!("Invalid search configuration: {}", e);
        std::process::exit(1);
    });

    let environment = scenario.environment;
    println!("Evolutionary Path Planner");
    println!("=========================");
    println!(
        "Robot: ({:.1}, {:.1}) r={:.1}",
        environment.robot.center.x, environment.robot.center.y, environment.robot.radius
    );
    println!(
        "Destination: ({:.1}, {:.1})",
        environment.destination.x, environment.destination.y
    );
    println!("Obstacles: {}", environment.obstacles.len());
    println!("Generations: {}", generations);
    println!();

    let started = Instant::now();
    let path = engine.find_best_path(
        environment.robot,
        environment.destination,
        environment.obstacles.clone(),
        generations,
    );
    let elapsed = started.elapsed().as_secs_f64();

    let best = engine
        .best()
        .expect("at least one generation was evaluated");
    let total: f64 = path
        .windows(2)
        .map(|w| evopath::geometry::norm(w[1] - w[0]))
        .sum();

    println!("Done in {:.2}s", elapsed);
    println!(
        "Best path: {} waypoints, length {:.1}, cost {:.2}, fitness {:.2}, collision-free: {}",
        path.len(),
        total,
        best.cost,
        best.fitness,
        best.valid
    );
    let stats = engine.stats();
    if let Some(stats) = stats.last() {
        println!(
            "Final generation: fitness sum {:.1}, avg {:.1}, min {:.1}, max {:.1}",
            stats.sum, stats.avg, stats.min, stats.max
        );
    }
    println!();

    match serde_json::to_string_pretty(&path) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error encoding path: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_example_scenario() {
    let scenario = Scenario {
        environment: Environment::new(
            Circle::new(Point::new(100.0, 500.0), 20.0),
            Point::new(1800.0, 500.0),
            vec![
                Circle::new(Point::new(700.0, 450.0), 120.0),
                Circle::new(Point::new(1200.0, 620.0), 90.0),
            ],
        ),
        search: SearchConfig {
            random_seed: Some(35),
            ..Default::default()
        },
        generations: 150,
    };

    match serde_json::to_string_pretty(&scenario) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error encoding example scenario: {}", e),
    }
}
