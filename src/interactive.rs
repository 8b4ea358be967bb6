//! Click-driven patterns: the vertices and starting point come from a stream of
//! user clicks instead of being fixed up front.

use anyhow::{Context, Result, anyhow, bail, ensure};
use rand::Rng;
use std::io::BufRead;
use tracing::{debug, info};

use crate::canvas::{Canvas, Colour};
use crate::sequence::{Point, SelectionPolicy, draw_point_sequence};

/// A blocking source of click coordinates.
pub trait ClickSource {
    /// Waits for the next click.
    fn next_click(&mut self) -> Result<Point>;
}

/// Reads clicks as `x,y` lines from any buffered reader.
///
/// Blank lines and lines starting with `#` are skipped.
pub struct ScriptedClicks<B> {
    reader: B,
    line_number: usize,
}

impl<B: BufRead> ScriptedClicks<B> {
    pub fn new(reader: B) -> Self {
        Self {
            reader,
            line_number: 0,
        }
    }
}

impl<B: BufRead> ClickSource for ScriptedClicks<B> {
    fn next_click(&mut self) -> Result<Point> {
        let mut line = String::new();
        loop {
            line.clear();
            let read = self
                .reader
                .read_line(&mut line)
                .context("Failed to read click")?;
            if read == 0 {
                bail!("click input ended after {} lines", self.line_number);
            }
            self.line_number += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return parse_click(trimmed)
                .with_context(|| format!("Malformed click on line {}", self.line_number));
        }
    }
}

fn parse_click(text: &str) -> Result<Point> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| anyhow!("expected 'x,y', got '{text}'"))?;
    Ok(Point::new(x.trim().parse()?, y.trim().parse()?))
}

/// Waits for `num_vertices + 1` clicks and draws the resulting pattern.
///
/// The first `num_vertices` clicks become the vertices and the last click is
/// the initial point. Returns the number of pixels drawn.
pub fn user_pattern<C, S, R>(
    canvas: &mut C,
    clicks: &mut S,
    num_vertices: usize,
    policy: SelectionPolicy,
    num_points: usize,
    rng: &mut R,
    colour: Colour,
) -> Result<usize>
where
    C: Canvas + ?Sized,
    S: ClickSource + ?Sized,
    R: Rng + ?Sized,
{
    ensure!(
        num_vertices >= policy.min_vertices(),
        "{policy} patterns need at least {} vertices, got {num_vertices}",
        policy.min_vertices()
    );

    info!(clicks = num_vertices + 1, "Waiting for clicks");

    let mut vertices = Vec::with_capacity(num_vertices);
    for _ in 0..num_vertices {
        vertices.push(next_click_on_canvas(canvas, clicks)?);
    }
    let initial_point = next_click_on_canvas(canvas, clicks)?;

    debug!(?vertices, %initial_point, "Clicks collected");

    draw_point_sequence(
        canvas,
        &vertices,
        initial_point,
        num_points,
        policy,
        rng,
        colour,
    )
}

fn next_click_on_canvas<C, S>(canvas: &C, clicks: &mut S) -> Result<Point>
where
    C: Canvas + ?Sized,
    S: ClickSource + ?Sized,
{
    let click = clicks.next_click()?;
    ensure!(
        canvas.contains(click),
        "click {click} is outside the {}x{} canvas",
        canvas.width(),
        canvas.height()
    );
    Ok(click)
}
