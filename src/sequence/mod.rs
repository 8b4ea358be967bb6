//! Chaos game point sequences.
//!
//! A sequence starts at an initial point and repeatedly moves halfway towards a
//! vertex picked by a [`SelectionPolicy`]. [`PointSequence`] is the shared
//! generator; [`generate_point_sequence`] collects it and
//! [`draw_point_sequence`] streams it onto a [`Canvas`] without buffering.

mod point;
mod policy;

pub use point::Point;
pub use policy::SelectionPolicy;

use anyhow::{Result, ensure};
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

use crate::canvas::{Canvas, Colour};

/// Iterator over the points of a sequence, initial point first.
pub struct PointSequence<'a, R: ?Sized> {
    vertices: &'a [Point],
    policy: SelectionPolicy,
    rng: &'a mut R,
    current: Point,
    previous_vertex: Option<usize>,
    started: bool,
    remaining: usize,
}

impl<'a, R: Rng + ?Sized> PointSequence<'a, R> {
    /// # Errors
    ///
    /// Fails if `num_points` is zero, if there are fewer vertices than the
    /// policy needs, or if `vertices` contains duplicates.
    pub fn new(
        vertices: &'a [Point],
        initial_point: Point,
        num_points: usize,
        policy: SelectionPolicy,
        rng: &'a mut R,
    ) -> Result<Self> {
        ensure!(num_points >= 1, "a point sequence needs at least one point");
        check_vertices(vertices, policy)?;

        Ok(Self {
            vertices,
            policy,
            rng,
            current: initial_point,
            previous_vertex: None,
            started: false,
            remaining: num_points,
        })
    }
}

/// Checks that `vertices` can drive a sequence under `policy`: enough of them
/// for the policy, and no duplicates.
pub fn check_vertices(vertices: &[Point], policy: SelectionPolicy) -> Result<()> {
    ensure!(
        vertices.len() >= policy.min_vertices(),
        "{policy} sequences need at least {} vertices, got {}",
        policy.min_vertices(),
        vertices.len()
    );
    let distinct: HashSet<&Point> = vertices.iter().collect();
    ensure!(
        distinct.len() == vertices.len(),
        "vertex points must be distinct"
    );
    Ok(())
}

impl<R: Rng + ?Sized> Iterator for PointSequence<'_, R> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        if !self.started {
            self.started = true;
            return Some(self.current);
        }

        let index = self.policy.choose(
            &mut *self.rng,
            self.vertices.len(),
            self.previous_vertex,
        );
        self.previous_vertex = Some(index);
        self.current = self.current.midpoint(self.vertices[index]);
        Some(self.current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R: Rng + ?Sized> ExactSizeIterator for PointSequence<'_, R> {}

/// Returns a point sequence of length `num_points` starting at `initial_point`.
pub fn generate_point_sequence<R: Rng + ?Sized>(
    vertices: &[Point],
    initial_point: Point,
    num_points: usize,
    policy: SelectionPolicy,
    rng: &mut R,
) -> Result<Vec<Point>> {
    let sequence = PointSequence::new(vertices, initial_point, num_points, policy, rng)?;
    Ok(sequence.collect())
}

/// Draws a point sequence directly onto `canvas`, initial point included.
///
/// Points are drawn as they are produced, so memory use does not grow with
/// `num_points`. Returns the number of pixels that landed on the canvas.
#[tracing::instrument(skip_all, fields(num_points = num_points, policy = %policy))]
pub fn draw_point_sequence<C: Canvas + ?Sized, R: Rng + ?Sized>(
    canvas: &mut C,
    vertices: &[Point],
    initial_point: Point,
    num_points: usize,
    policy: SelectionPolicy,
    rng: &mut R,
    colour: Colour,
) -> Result<usize> {
    let mut drawn = 0;
    let sequence = PointSequence::new(vertices, initial_point, num_points, policy, rng)?;
    for point in sequence {
        if canvas.draw_pixel(point, colour) {
            drawn += 1;
        }
    }

    debug!(drawn, "Point sequence drawn");
    Ok(drawn)
}

/// Returns whether `points` could have been generated from `vertices` and
/// `initial_point` under `policy`.
///
/// Vertex sets the generator would reject never verify. Truncation means
/// several vertices can yield the same midpoint, so every vertex consistent
/// with the points so far is tracked.
pub fn verify_point_sequence(
    vertices: &[Point],
    initial_point: Point,
    points: &[Point],
    policy: SelectionPolicy,
) -> bool {
    if check_vertices(vertices, policy).is_err() {
        return false;
    }
    let Some((&first, rest)) = points.split_first() else {
        return false;
    };
    if first != initial_point {
        return false;
    }

    let len = vertices.len();
    let mut current = first;
    // None until the first vertex has been picked.
    let mut candidates: Option<Vec<usize>> = None;

    for &next in rest {
        let reachable: Vec<usize> = (0..len)
            .filter(|&i| current.midpoint(vertices[i]) == next)
            .filter(|&i| match &candidates {
                None => true,
                Some(previous) => previous.iter().any(|&p| policy.allows(len, p, i)),
            })
            .collect();

        if reachable.is_empty() {
            return false;
        }
        candidates = Some(reachable);
        current = next;
    }

    true
}
