//! Level data: configuration, JSON level files and the built-in catalog

pub mod catalog;
pub mod config;

pub use catalog::{builtin_level, builtin_levels, LEVEL_COUNT};
pub use config::{LevelConfig, LevelError, SurfacePaint, DEFAULT_GRID_SIZE, MAX_GRID_SIZE};
