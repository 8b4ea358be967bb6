//! Pixel canvases that point sequences are drawn onto.

use anyhow::{Context, Result, anyhow, ensure};
use image::{ImageBuffer, Rgb, RgbImage};
use std::path::Path;
use tracing::{debug, info};

use crate::sequence::Point;

pub type Colour = Rgb<u8>;

/// Hot pink, the default drawing colour.
pub const DEFAULT_COLOUR: Colour = Rgb([255, 105, 180]);

const BACKGROUND: Colour = Rgb([255, 255, 255]);

/// A fixed-size surface that accepts single pixels.
pub trait Canvas {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Sets the pixel at `point`. Returns `false` if `point` is off the canvas.
    fn draw_pixel(&mut self, point: Point, colour: Colour) -> bool;

    fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as u32) < self.width()
            && (point.y as u32) < self.height()
    }
}

/// An in-memory RGB image with a white background, saved as PNG.
pub struct ImageCanvas {
    image: RgbImage,
}

impl ImageCanvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        ensure!(
            width >= 2 && height >= 2,
            "canvas must be at least 2x2 pixels, got {width}x{height}"
        );
        Ok(Self {
            image: ImageBuffer::from_pixel(width, height, BACKGROUND),
        })
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
        }
        self.image
            .save(path)
            .with_context(|| format!("Failed to save canvas to {:?}", path))?;

        info!(path = %path.display(), width = self.width(), height = self.height(), "Canvas saved");
        Ok(())
    }
}

impl Canvas for ImageCanvas {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn draw_pixel(&mut self, point: Point, colour: Colour) -> bool {
        if !self.contains(point) {
            return false;
        }
        self.image.put_pixel(point.x as u32, point.y as u32, colour);
        true
    }
}

/// Parses a `#rrggbb` hex string.
pub fn parse_hex_colour(hex: &str) -> Result<Colour> {
    let digits = hex.trim().trim_start_matches('#');
    ensure!(
        digits.len() == 6 && digits.is_ascii(),
        "colour must look like #rrggbb, got '{hex}'"
    );

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|e| anyhow!("invalid colour '{hex}': {e}"))
    };
    Ok(Rgb([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
}

/// Maps `t` in `[0.0, 1.0]` onto a gradient from dark purple to hot pink.
///
/// Values outside the range are clamped. Every colour on the gradient stays
/// visible against the white background.
pub fn gradient_colour(t: f64) -> Colour {
    let t = t.clamp(0.0, 1.0);
    let lerp = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * t).round() as u8;
    Rgb([lerp(60, 255), lerp(20, 105), lerp(120, 180)])
}

/// Draws 100 distinct pixels along the main diagonal, shading along the gradient.
///
/// Returns the number of pixels drawn; smaller canvases clip the line.
pub fn warmup<C: Canvas + ?Sized>(canvas: &mut C) -> usize {
    const PIXELS: i32 = 100;

    let drawn = (0..PIXELS)
        .filter(|&i| {
            let colour = gradient_colour(i as f64 / (PIXELS - 1) as f64);
            canvas.draw_pixel(Point::new(i, i), colour)
        })
        .count();

    debug!(drawn, "Warmup line drawn");
    drawn
}
