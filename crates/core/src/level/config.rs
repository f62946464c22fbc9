//! Level configuration and JSON level files
//!
//! A `LevelConfig` is created once per level load and never changes during
//! play. Paints and teleporters are applied in order, so later entries win.
//! Coordinates outside the grid are kept in the config and silently skipped
//! when the grid is built.

use crate::core_types::{GridPos, Surface};
use crate::grid::{LiquidGrid, Supply, Teleporter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::info;

/// Edge length of every built-in level grid
pub const DEFAULT_GRID_SIZE: usize = 12;

/// Largest grid edge a level file may ask for
pub const MAX_GRID_SIZE: usize = 256;

fn default_grid_size() -> usize {
    DEFAULT_GRID_SIZE
}

/// One surface paint instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfacePaint {
    pub row: usize,
    pub col: usize,
    pub surface: Surface,
}

/// Static description of a puzzle level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Level number, 1-based
    pub number: u32,
    /// Short description shown to the player
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    pub supply: Supply,
    #[serde(default)]
    pub paints: Vec<SurfacePaint>,
    #[serde(default)]
    pub teleporters: Vec<Teleporter>,
}

impl LevelConfig {
    /// Create an unpainted level on the default grid
    pub fn new(number: u32, name: impl Into<String>, supply: Supply) -> Self {
        Self {
            number,
            name: name.into(),
            grid_size: DEFAULT_GRID_SIZE,
            supply,
            paints: Vec::new(),
            teleporters: Vec::new(),
        }
    }

    /// Use a different grid size
    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Paint a single cell
    pub fn paint(mut self, row: usize, col: usize, surface: Surface) -> Self {
        self.paints.push(SurfacePaint { row, col, surface });
        self
    }

    /// Paint a horizontal run of cells in `row`
    pub fn paint_row(mut self, row: usize, cols: RangeInclusive<usize>, surface: Surface) -> Self {
        self.paints
            .extend(cols.map(|col| SurfacePaint { row, col, surface }));
        self
    }

    /// Paint a vertical run of cells in `col`
    pub fn paint_col(mut self, rows: RangeInclusive<usize>, col: usize, surface: Surface) -> Self {
        self.paints
            .extend(rows.map(|row| SurfacePaint { row, col, surface }));
        self
    }

    /// Link `input` to `output`
    pub fn teleporter(mut self, input: (usize, usize), output: (usize, usize)) -> Self {
        self.teleporters
            .push(Teleporter::new(GridPos::from(input), GridPos::from(output)));
        self
    }

    /// Reject configs no grid can be built from
    ///
    /// # Errors
    /// Returns [`LevelError::InvalidGridSize`] for an empty grid or one wider
    /// than [`MAX_GRID_SIZE`]
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.grid_size == 0 || self.grid_size > MAX_GRID_SIZE {
            return Err(LevelError::InvalidGridSize(self.grid_size));
        }
        Ok(())
    }

    /// Build a fresh grid for this level
    pub fn build_grid(&self) -> LiquidGrid {
        let mut grid = LiquidGrid::new(self.grid_size, self.supply);
        let mut skipped = 0;

        for paint in &self.paints {
            if !grid.set_surface(paint.row, paint.col, paint.surface) {
                skipped += 1;
            }
        }
        for teleporter in &self.teleporters {
            if !grid.add_teleporter(teleporter.input, teleporter.output) {
                skipped += 1;
            }
        }

        info!(
            "Loaded level {} '{}': {}x{} grid, water={}, magma={}, {} paints, {} teleporters, {} skipped",
            self.number,
            self.name,
            self.grid_size,
            self.grid_size,
            self.supply.water,
            self.supply.magma,
            self.paints.len(),
            grid.teleporters().len(),
            skipped
        );
        grid
    }

    /// Parse a level from JSON
    ///
    /// # Errors
    /// Returns error if the text is not a valid level
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: Self =
            serde_json::from_str(json).map_err(|e| LevelError::ParseFailed(e.to_string()))?;
        level.validate()?;
        Ok(level)
    }

    /// Serialize the level as pretty JSON
    ///
    /// # Errors
    /// Returns error if the level cannot be serialized
    pub fn to_json(&self) -> Result<String, LevelError> {
        serde_json::to_string_pretty(self).map_err(|e| LevelError::SerializeFailed(e.to_string()))
    }

    /// Load a level file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LevelError> {
        let contents =
            fs::read_to_string(path).map_err(|e| LevelError::LoadFailed(e.to_string()))?;
        Self::from_json(&contents)
    }

    /// Save the level to a file
    ///
    /// # Errors
    /// Returns error if file cannot be written or level cannot be serialized
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), LevelError> {
        let contents = self.to_json()?;
        fs::write(path, contents).map_err(|e| LevelError::SaveFailed(e.to_string()))?;
        Ok(())
    }
}

impl LiquidGrid {
    /// Build the starting grid for `level`
    pub fn from_level(level: &LevelConfig) -> Self {
        level.build_grid()
    }
}

/// Errors that can occur while loading level data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// No built-in level with this number
    UnknownLevel(u32),
    /// Grid size cannot hold any cells
    InvalidGridSize(usize),
    /// Failed to read file
    LoadFailed(String),
    /// Failed to parse level data
    ParseFailed(String),
    /// Failed to serialize level
    SerializeFailed(String),
    /// Failed to write file
    SaveFailed(String),
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::UnknownLevel(number) => write!(f, "No level {number}"),
            LevelError::InvalidGridSize(size) => write!(f, "Invalid grid size: {size}"),
            LevelError::LoadFailed(msg) => write!(f, "Failed to load: {msg}"),
            LevelError::ParseFailed(msg) => write!(f, "Failed to parse: {msg}"),
            LevelError::SerializeFailed(msg) => write!(f, "Failed to serialize: {msg}"),
            LevelError::SaveFailed(msg) => write!(f, "Failed to save: {msg}"),
        }
    }
}

impl std::error::Error for LevelError {}
