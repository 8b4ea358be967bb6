use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::canvas::{Colour, DEFAULT_COLOUR, parse_hex_colour};
use crate::sequence::{Point, SelectionPolicy, check_vertices};

/// A pattern to draw, read from TOML.
#[derive(Debug, Deserialize, Clone)]
pub struct PatternConfig {
    pub canvas: CanvasConfig,
    pub pattern: PatternSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PatternSettings {
    pub vertices: Vec<[i32; 2]>,
    pub initial: [i32; 2],
    pub num_points: usize,
    #[serde(default = "default_policy")]
    pub policy: SelectionPolicy,
    pub colour: Option<String>, // Hex code
    pub seed: Option<u64>,
}

fn default_policy() -> SelectionPolicy {
    SelectionPolicy::Uniform
}

impl PatternConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid pattern config: {:?}", path))?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: PatternConfig =
            toml::from_str(content).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the canvas is drawable, every point lies on it and the
    /// vertices suit the policy.
    pub fn validate(&self) -> Result<()> {
        let CanvasConfig { width, height } = self.canvas;
        ensure!(
            width >= 2 && height >= 2,
            "canvas must be at least 2x2 pixels"
        );

        let on_canvas =
            |p: Point| p.x >= 0 && p.y >= 0 && (p.x as u32) < width && (p.y as u32) < height;
        for vertex in self.vertices() {
            ensure!(
                on_canvas(vertex),
                "vertex {vertex} is outside the {width}x{height} canvas"
            );
        }
        ensure!(
            on_canvas(self.initial_point()),
            "initial point {} is outside the {width}x{height} canvas",
            self.initial_point()
        );

        check_vertices(&self.vertices(), self.pattern.policy)?;
        self.colour()?;
        Ok(())
    }

    pub fn vertices(&self) -> Vec<Point> {
        self.pattern
            .vertices
            .iter()
            .copied()
            .map(Point::from)
            .collect()
    }

    pub fn initial_point(&self) -> Point {
        Point::from(self.pattern.initial)
    }

    pub fn colour(&self) -> Result<Colour> {
        match &self.pattern.colour {
            Some(hex) => parse_hex_colour(hex),
            None => Ok(DEFAULT_COLOUR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIERPINSKI: &str = r##"
[canvas]
width = 800
height = 800

[pattern]
vertices = [[400, 50], [50, 750], [750, 750]]
initial = [400, 400]
num_points = 1000
colour = "#336699"
seed = 42
"##;

    #[test]
    fn test_parse_full_config() {
        let config = PatternConfig::from_toml(SIERPINSKI).unwrap();

        assert_eq!(config.canvas.width, 800);
        assert_eq!(config.vertices()[1], Point::new(50, 750));
        assert_eq!(config.initial_point(), Point::new(400, 400));
        assert_eq!(config.pattern.policy, SelectionPolicy::Uniform);
        assert_eq!(config.pattern.seed, Some(42));
        assert_eq!(config.colour().unwrap(), image::Rgb([0x33, 0x66, 0x99]));
    }

    #[test]
    fn test_policy_by_name() {
        let toml = SIERPINSKI
            .replace("seed = 42", "policy = \"avoid-neighbours\"")
            .replace("[750, 750]]", "[750, 750], [750, 50]]");
        let config = PatternConfig::from_toml(&toml).unwrap();
        assert_eq!(config.pattern.policy, SelectionPolicy::AvoidNeighbours);
        assert_eq!(config.pattern.seed, None);
    }

    #[test]
    fn test_rejects_off_canvas_vertex() {
        let toml = SIERPINSKI.replace("[750, 750]", "[800, 750]");
        assert!(PatternConfig::from_toml(&toml).is_err());
    }

    #[test]
    fn test_rejects_too_few_vertices_for_policy() {
        let toml = SIERPINSKI.replace("seed = 42", "policy = \"avoid-neighbours\"");
        assert!(PatternConfig::from_toml(&toml).is_err());

        let toml = SIERPINSKI.replace("[50, 750], ", "");
        assert!(PatternConfig::from_toml(&toml).is_err());
    }

    #[test]
    fn test_rejects_duplicate_vertices() {
        let toml = SIERPINSKI.replace("[50, 750]", "[400, 50]");
        assert!(PatternConfig::from_toml(&toml).is_err());
    }

    #[test]
    fn test_rejects_bad_colour() {
        let toml = SIERPINSKI.replace("#336699", "pink");
        assert!(PatternConfig::from_toml(&toml).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(PatternConfig::load_from_file(Path::new("/no/such/pattern.toml")).is_err());
    }
}
