//! Seeded randomness and the genetic operators over waypoint paths.
//!
//! Every operator is gated by its own probability from [`OperatorRates`] and
//! leaves the two anchors alone. Operators that change the length rebuild
//! into a fresh vector instead of erasing behind a moving index.

use rand::prelude::*;

use crate::geometry::Point;
use crate::schema::{Arena, OperatorRates};

use super::path::{Path, Waypoint};

/// Random number generator wrapper for path operations.
pub struct PathRng {
    rng: StdRng,
}

impl PathRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform point inside the arena.
    pub fn random_point(&mut self, arena: &Arena) -> Point {
        Point::new(
            self.rng.gen_range(arena.min_x..=arena.max_x),
            self.rng.gen_range(arena.min_y..=arena.max_y),
        )
    }

    /// Random chromosome: the two anchors plus a uniformly drawn number of
    /// random intermediate waypoints, total length within `[2, max_len]`.
    pub fn random_path(&mut self, start: Point, end: Point, arena: &Arena, max_len: usize) -> Path {
        let target = self.rng.gen_range(2..=max_len.max(2));
        let mut waypoints = Vec::with_capacity(target);
        waypoints.push(Waypoint::new(start, true));
        for _ in 0..target - 2 {
            waypoints.push(Waypoint::new(self.random_point(arena), true));
        }
        waypoints.push(Waypoint::new(end, true));
        Path { waypoints }
    }

    /// Uniform fraction in `[0, 1)`.
    pub fn fraction(&mut self) -> f64 {
        self.rng.r#gen()
    }

    /// Uniform index in `0..len`.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn roll(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p)
    }

    /// Exchange parent suffixes.
    ///
    /// The cut lands on each parent's *last* invalid segment, so defective
    /// tails get traded away; a fully valid parent cuts at a uniformly random
    /// segment instead. The two cut indices are independent, so children's
    /// lengths can differ from both parents'.
    pub fn crossover(&mut self, rates: &OperatorRates, a: &mut Path, b: &mut Path) {
        if !self.roll(rates.crossover) {
            return;
        }
        let ca = self.cut_index(a);
        let cb = self.cut_index(b);

        let mut child_a = Vec::with_capacity(ca + 1 + b.len() - cb - 1);
        child_a.extend_from_slice(&a.waypoints[..=ca]);
        child_a.extend_from_slice(&b.waypoints[cb + 1..]);

        let mut child_b = Vec::with_capacity(cb + 1 + a.len() - ca - 1);
        child_b.extend_from_slice(&b.waypoints[..=cb]);
        child_b.extend_from_slice(&a.waypoints[ca + 1..]);

        a.waypoints = child_a;
        b.waypoints = child_b;
    }

    /// Index of the last invalid segment, or a uniform segment index for a
    /// fully valid path.
    fn cut_index(&mut self, path: &Path) -> usize {
        match path.waypoints[..path.len() - 1]
            .iter()
            .rposition(|w| !w.valid)
        {
            Some(i) => i,
            None => self.index(path.len() - 1),
        }
    }

    /// Cyclically rotate the interior around a random split point.
    /// No-op for paths of three or fewer waypoints.
    pub fn rotate(&mut self, rates: &OperatorRates, path: &mut Path) {
        if !self.roll(rates.rotate) || path.len() <= 3 {
            return;
        }
        let n = path.len();
        let p = self.rng.gen_range(1..=n - 2);
        let mut rotated = Vec::with_capacity(n);
        rotated.push(path.waypoints[0]);
        rotated.extend_from_slice(&path.waypoints[p + 1..n - 1]);
        rotated.extend_from_slice(&path.waypoints[1..=p]);
        rotated.push(path.waypoints[n - 1]);
        path.waypoints = rotated;
    }

    /// Insert random waypoints at interior slots until the dynamic length
    /// cap. New waypoints start flagged invalid; marking re-evaluates them
    /// at the end of the pipeline.
    pub fn insert(
        &mut self,
        rates: &OperatorRates,
        arena: &Arena,
        max_len: usize,
        path: &mut Path,
    ) {
        let mut n = path.len();
        let mut grown = Vec::with_capacity(n + 2);
        grown.push(path.waypoints[0]);
        for &wp in &path.waypoints[1..] {
            if n < max_len && self.roll(rates.insert) {
                grown.push(Waypoint::new(self.random_point(arena), false));
                n += 1;
            }
            grown.push(wp);
        }
        path.waypoints = grown;
    }

    /// Drop interior waypoints, never going below the two-point minimum.
    pub fn remove(&mut self, rates: &OperatorRates, path: &mut Path) {
        let mut n = path.len();
        let last = n - 1;
        let mut kept = Vec::with_capacity(n);
        for (i, &wp) in path.waypoints.iter().enumerate() {
            if i > 0 && i < last && n > 2 && self.roll(rates.remove) {
                n -= 1;
                continue;
            }
            kept.push(wp);
        }
        path.waypoints = kept;
    }

    /// Small per-axis perturbation of interior waypoints.
    pub fn small_mutate(&mut self, rates: &OperatorRates, arena: &Arena, path: &mut Path) {
        self.perturb(arena, rates.small_mutation, rates.small_mutation_scale, path);
    }

    /// Large per-axis perturbation; same gating, wider magnitude range.
    pub fn large_mutate(&mut self, rates: &OperatorRates, arena: &Arena, path: &mut Path) {
        self.perturb(arena, rates.large_mutation, rates.large_mutation_scale, path);
    }

    /// A fair coin picks the direction per axis; the offset is uniform
    /// between zero and `scale` times the distance to the arena boundary on
    /// that side, so mutated waypoints always stay inside the arena.
    fn perturb(&mut self, arena: &Arena, rate: f64, scale: f64, path: &mut Path) {
        let last = path.len() - 1;
        for i in 1..last {
            if !self.roll(rate) {
                continue;
            }
            let p = path.waypoints[i].pos;
            let x = if self.roll(0.5) {
                p.x - self.delta(scale * (p.x - arena.min_x))
            } else {
                p.x + self.delta(scale * (arena.max_x - p.x))
            };
            let y = if self.roll(0.5) {
                p.y - self.delta(scale * (p.y - arena.min_y))
            } else {
                p.y + self.delta(scale * (arena.max_y - p.y))
            };
            path.waypoints[i].pos = Point::new(x, y);
        }
    }

    fn delta(&mut self, limit: f64) -> f64 {
        if limit <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(0.0..=limit)
    }
}
