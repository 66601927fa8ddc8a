//! Random, mostly non-overlapping target layout.
//!
//! Positions are the top-left corner of each target's bounding square, so a
//! target of radius `r` at `(x, y)` covers `x..x + 2r` horizontally. Two
//! targets are considered clear of each other when their corners are at least
//! `2r` apart.

use log::debug;
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH, MAX_PLACEMENT_ATTEMPTS, TARGET_RADIUS};
use crate::sequence;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Bounds of the play area and the size of the targets dropped in it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub radius: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            radius: TARGET_RADIUS,
        }
    }
}

impl Canvas {
    /// Minimum spacing between two target corners.
    pub fn min_spacing(&self) -> f64 {
        2.0 * self.radius
    }

    /// Exclusive upper bound for `x`; zero when a target does not fit at all.
    fn span_x(&self) -> f64 {
        (self.width - self.min_spacing()).max(0.0)
    }

    fn span_y(&self) -> f64 {
        (self.height - self.min_spacing()).max(0.0)
    }

    /// Whether `pos` keeps its full target inside the canvas.
    pub fn contains(&self, pos: &Position) -> bool {
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x <= self.span_x() && pos.y <= self.span_y()
    }
}

/// Outcome of a single placement attempt run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Position,
    /// Number of candidates drawn, at most `MAX_PLACEMENT_ATTEMPTS`.
    pub attempts: usize,
    /// `false` when the attempt budget ran out and `position` may overlap.
    pub fits: bool,
}

/// Whole-pixel coordinate sampler over `[0, span)`.
struct Axis(Option<Uniform<f64>>);

impl Axis {
    fn new(span: f64) -> Self {
        // Uniform::new refuses an empty range; a zero span pins the axis to 0.
        Axis(Uniform::new(0.0, span).ok())
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match &self.0 {
            Some(dist) => dist.sample(rng).floor(),
            None => 0.0,
        }
    }
}

fn is_clear(candidate: &Position, existing: &[Position], spacing: f64) -> bool {
    existing.iter().all(|pos| candidate.distance(pos) >= spacing)
}

/// Rejection-sample a position at least `2r` from every entry in `existing`.
///
/// Gives up after `MAX_PLACEMENT_ATTEMPTS` draws and returns the last
/// candidate, overlap and all.
pub fn try_place<R: Rng + ?Sized>(canvas: &Canvas, existing: &[Position], rng: &mut R) -> Placement {
    let xs = Axis::new(canvas.span_x());
    let ys = Axis::new(canvas.span_y());
    let spacing = canvas.min_spacing();

    let mut last = Position::new(0.0, 0.0);
    for attempt in 1..=MAX_PLACEMENT_ATTEMPTS {
        last = Position::new(xs.sample(rng), ys.sample(rng));
        if is_clear(&last, existing, spacing) {
            return Placement {
                position: last,
                attempts: attempt,
                fits: true,
            };
        }
    }

    debug!(
        "No free spot after {} attempts among {} targets, allowing overlap at ({}, {})",
        MAX_PLACEMENT_ATTEMPTS,
        existing.len(),
        last.x,
        last.y
    );
    Placement {
        position: last,
        attempts: MAX_PLACEMENT_ATTEMPTS,
        fits: false,
    }
}

/// Position for one more target; see [`try_place`].
pub fn place<R: Rng + ?Sized>(canvas: &Canvas, existing: &[Position], rng: &mut R) -> Position {
    try_place(canvas, existing, rng).position
}

/// Place `count` targets one after another, each avoiding the ones before it.
pub fn layout<R: Rng + ?Sized>(canvas: &Canvas, count: usize, rng: &mut R) -> Vec<Position> {
    let mut placed = Vec::with_capacity(count);
    let mut overlapping = 0usize;
    for _ in 0..count {
        let placement = try_place(canvas, &placed, rng);
        if !placement.fits {
            overlapping += 1;
        }
        placed.push(placement.position);
    }
    if overlapping > 0 {
        debug!("{} of {} targets placed with overlap", overlapping, count);
    }
    placed
}

/// A numbered target on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub position: Position,
}

/// Shuffle `1..=count` and lay the labels out: the i-th placed spot gets the
/// i-th number of the shuffled sequence.
pub fn deal_targets<R: Rng + ?Sized>(count: u32, canvas: &Canvas, rng: &mut R) -> Vec<Target> {
    let labels = sequence::generate(count, rng);
    let spots = layout(canvas, labels.len(), rng);
    labels
        .into_iter()
        .zip(spots)
        .map(|(id, position)| Target { id, position })
        .collect()
}
