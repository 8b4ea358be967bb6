pub mod analysis;
pub mod canvas;
pub mod config;
pub mod interactive;
pub mod loader;
pub mod output;
pub mod records;
pub mod sequence;
