//! Square puzzle grid with surfaces, teleporters and liquid occupancy
//!
//! The grid owns its cells and the player's liquid supply. Row 0 is the entry
//! row where liquid is placed by hand; the bottom row starts out as floor.
//! Every mutator tolerates bad input: out-of-range coordinates and illegal
//! placements are no-ops that report `false`/`None` instead of erroring.

use crate::core_types::{Cell, GridPos, Liquid, Surface};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// One-directional teleporter pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teleporter {
    pub input: GridPos,
    pub output: GridPos,
}

impl Teleporter {
    pub const fn new(input: GridPos, output: GridPos) -> Self {
        Self { input, output }
    }
}

/// Units of each liquid the player may still place
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supply {
    pub water: u32,
    pub magma: u32,
}

impl Supply {
    pub const fn new(water: u32, magma: u32) -> Self {
        Self { water, magma }
    }

    /// Remaining units of `liquid`
    pub fn get(&self, liquid: Liquid) -> u32 {
        match liquid {
            Liquid::Water => self.water,
            Liquid::Magma => self.magma,
        }
    }

    fn slot(&mut self, liquid: Liquid) -> &mut u32 {
        match liquid {
            Liquid::Water => &mut self.water,
            Liquid::Magma => &mut self.magma,
        }
    }

    /// Take one unit, returns false when none is left
    pub fn take(&mut self, liquid: Liquid) -> bool {
        let slot = self.slot(liquid);
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Return one unit to the supply
    pub fn give(&mut self, liquid: Liquid) {
        let slot = self.slot(liquid);
        *slot = slot.saturating_add(1);
    }
}

/// Puzzle grid: static layout plus current liquid occupancy
///
/// Cells are stored row-major: `cells[row * size + col]`. Grids serialize
/// for inspection but are never read back; levels load through `LevelConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiquidGrid {
    size: usize,
    cells: Vec<Cell>,
    teleporters: Vec<Teleporter>,
    supply: Supply,
    starting_supply: Supply,
}

impl LiquidGrid {
    /// Create a dry `size` x `size` grid whose bottom row is floor
    pub fn new(size: usize, supply: Supply) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                let surface = if row + 1 == size {
                    Surface::Floor
                } else {
                    Surface::Empty
                };
                cells.push(Cell::new(GridPos::new(row, col), surface));
            }
        }

        Self {
            size,
            cells,
            teleporters: Vec::new(),
            supply,
            starting_supply: supply,
        }
    }

    /// Grid edge length in cells
    pub fn size(&self) -> usize {
        self.size
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Registered teleporters in registration order
    pub fn teleporters(&self) -> &[Teleporter] {
        &self.teleporters
    }

    /// Liquid the player can still place
    pub fn supply(&self) -> Supply {
        self.supply
    }

    /// Supply the level started with
    pub fn starting_supply(&self) -> Supply {
        self.starting_supply
    }

    pub(crate) fn index(&self, pos: GridPos) -> Option<usize> {
        pos.in_bounds(self.size)
            .then_some(pos.row * self.size + pos.col)
    }

    /// Cell at `(row, col)`, `None` when out of range
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index(GridPos::new(row, col)).map(|idx| &self.cells[idx])
    }

    /// Surface at `pos`, `None` when out of range
    pub fn surface(&self, pos: GridPos) -> Option<Surface> {
        self.index(pos).map(|idx| self.cells[idx].surface)
    }

    /// Liquid at `pos`; out-of-range positions read as dry
    pub fn liquid(&self, pos: GridPos) -> Option<Liquid> {
        self.index(pos).and_then(|idx| self.cells[idx].liquid)
    }

    /// Row-major liquid occupancy, one entry per cell
    pub fn liquid_map(&self) -> Vec<Option<Liquid>> {
        self.cells.iter().map(|cell| cell.liquid).collect()
    }

    /// Every wet cell with its liquid, row-major
    pub fn wet_cells(&self) -> impl Iterator<Item = (GridPos, Liquid)> + '_ {
        self.cells
            .iter()
            .filter_map(|cell| cell.liquid.map(|liquid| (cell.pos, liquid)))
    }

    /// Paint a surface; out-of-range positions are ignored
    ///
    /// Existing liquid in the cell is left untouched.
    pub fn set_surface(&mut self, row: usize, col: usize, surface: Surface) -> bool {
        match self.index(GridPos::new(row, col)) {
            Some(idx) => {
                self.cells[idx].surface = surface;
                true
            }
            None => {
                trace!("Ignoring {} paint outside grid at ({}, {})", surface, row, col);
                false
            }
        }
    }

    /// Place one unit of `liquid` by hand
    ///
    /// Only legal on a dry entry-row cell while supply remains. Returns
    /// whether the liquid was placed.
    pub fn place_liquid(&mut self, row: usize, col: usize, liquid: Liquid) -> bool {
        if row != 0 {
            return false;
        }
        let Some(idx) = self.index(GridPos::new(row, col)) else {
            return false;
        };
        if self.cells[idx].liquid.is_some() || !self.supply.take(liquid) {
            return false;
        }

        self.cells[idx].liquid = Some(liquid);
        trace!("Placed {} at (0, {}), {} left", liquid, col, self.supply.get(liquid));
        true
    }

    /// Take back a hand-placed unit from the entry row
    ///
    /// Returns the removed liquid, which goes back into the supply.
    pub fn remove_liquid(&mut self, row: usize, col: usize) -> Option<Liquid> {
        if row != 0 {
            return None;
        }
        let idx = self.index(GridPos::new(row, col))?;
        let liquid = self.cells[idx].liquid.take()?;
        self.supply.give(liquid);
        trace!("Removed {} at (0, {}), {} left", liquid, col, self.supply.get(liquid));
        Some(liquid)
    }

    /// Register a teleporter and paint both endpoints
    ///
    /// Pairs with an endpoint off the grid are ignored entirely.
    pub fn add_teleporter(&mut self, input: GridPos, output: GridPos) -> bool {
        if !input.in_bounds(self.size) || !output.in_bounds(self.size) {
            trace!("Ignoring teleporter {} -> {} outside grid", input, output);
            return false;
        }
        self.set_surface(input.row, input.col, Surface::Teleporter);
        self.set_surface(output.row, output.col, Surface::Teleporter);
        self.teleporters.push(Teleporter::new(input, output));
        true
    }

    /// Dry every cell and restore the starting supply; surfaces stay
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.liquid = None;
        }
        self.supply = self.starting_supply;
    }

    /// Copy the liquid occupancy of `other` onto this grid
    ///
    /// Used to publish a settled simulation snapshot back to the grid it was
    /// cloned from. Grids of different sizes are left untouched.
    pub fn copy_liquid_from(&mut self, other: &LiquidGrid) {
        if other.size != self.size {
            return;
        }
        for (cell, source) in self.cells.iter_mut().zip(&other.cells) {
            cell.liquid = source.liquid;
        }
    }

    /// Fill a dry cell during flow; returns whether anything changed
    pub(crate) fn fill(&mut self, pos: GridPos, liquid: Liquid) -> bool {
        match self.index(pos) {
            Some(idx) if self.cells[idx].liquid.is_none() => {
                self.cells[idx].liquid = Some(liquid);
                true
            }
            _ => false,
        }
    }
}
