//! Liquid flow simulator
//!
//! Settles the liquid placed in the entry row by applying local rules over a
//! working snapshot of the grid, one row-major pass at a time:
//!
//! 1. A wet cell whose surface is not gray is a source.
//! 2. A source falls into a dry `empty` cell directly below it.
//! 3. A source resting on grass or fire, or sitting in the bottom row,
//!    spreads one cell left and one cell right (never from the entry row).
//! 4. A source resting on floor stays put.
//! 5. After the scan every teleporter with a wet input and dry output copies
//!    its liquid across.
//!
//! Liquid is copied, not moved: sources stay wet, so one placed unit can feed
//! a whole path. Writes land in the snapshot immediately, which lets a fall
//! cascade down a column within a single pass. Passes stop at the first pass
//! that wets nothing or at the configured cap, whichever comes first.

use crate::core_types::{GridPos, Liquid, Surface};
use crate::grid::LiquidGrid;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Default cap on flow passes per simulation run
///
/// Bounds spread distance to roughly this many cells from any placement.
/// Levels that still change after the cap are a content problem, see
/// [`FlowSimulator::stays_settled`].
pub const MAX_FLOW_PASSES: usize = 10;

/// Flow tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Maximum passes per run
    pub max_passes: usize,
}

impl FlowConfig {
    pub const fn with_max_passes(max_passes: usize) -> Self {
        Self { max_passes }
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self::with_max_passes(MAX_FLOW_PASSES)
    }
}

/// Cells wetted by a single pass, in the order they were filled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    /// 1-based pass number
    pub pass: usize,
    pub wetted: Vec<(GridPos, Liquid)>,
}

impl PassReport {
    /// Whether this pass placed any liquid
    pub fn changed(&self) -> bool {
        !self.wetted.is_empty()
    }
}

/// Result of a complete simulation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    /// Settled snapshot
    pub grid: LiquidGrid,
    /// Passes executed, including the final no-change pass if one ran
    pub passes: usize,
    /// True when a pass wetted nothing before the cap was hit
    pub converged: bool,
}

/// Runs flow passes over grid snapshots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowSimulator {
    config: FlowConfig,
}

impl FlowSimulator {
    pub fn new(config: FlowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> FlowConfig {
        self.config
    }

    /// Settle `grid` and return the final snapshot
    ///
    /// The input grid is not modified.
    pub fn settle(&self, grid: &LiquidGrid) -> Settlement {
        let settlement = self.passes(grid).into_settlement();
        info!(
            "Flow settled after {} passes: {} wet cells, converged={}",
            settlement.passes,
            settlement.grid.wet_cells().count(),
            settlement.converged
        );
        settlement
    }

    /// Step through a run one pass at a time
    ///
    /// The iterator owns a clone of `grid`; each item reports the cells the
    /// pass wetted, which is what a progressive display needs.
    pub fn passes(&self, grid: &LiquidGrid) -> Passes {
        Passes {
            snapshot: grid.clone(),
            max_passes: self.config.max_passes,
            completed: 0,
            converged: false,
        }
    }

    /// Whether one more pass over a settled grid would wet nothing
    pub fn stays_settled(&self, settled: &LiquidGrid) -> bool {
        let mut next = settled.clone();
        let report = run_pass(&mut next, self.config.max_passes + 1);
        if report.changed() {
            debug!(
                "Grid still changing after {} passes: {} more cells",
                self.config.max_passes,
                report.wetted.len()
            );
        }
        !report.changed()
    }
}

/// Pass-by-pass view of a simulation run
#[derive(Debug, Clone)]
pub struct Passes {
    snapshot: LiquidGrid,
    max_passes: usize,
    completed: usize,
    converged: bool,
}

impl Passes {
    /// Current working snapshot
    pub fn snapshot(&self) -> &LiquidGrid {
        &self.snapshot
    }

    /// Passes executed so far
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Run any remaining passes and hand back the settled snapshot
    pub fn into_settlement(mut self) -> Settlement {
        for _ in self.by_ref() {}
        Settlement {
            grid: self.snapshot,
            passes: self.completed,
            converged: self.converged,
        }
    }
}

impl Iterator for Passes {
    type Item = PassReport;

    fn next(&mut self) -> Option<PassReport> {
        if self.converged || self.completed >= self.max_passes {
            return None;
        }
        self.completed += 1;
        let report = run_pass(&mut self.snapshot, self.completed);
        if !report.changed() {
            self.converged = true;
        }
        Some(report)
    }
}

/// Apply every rule once over the snapshot
fn run_pass(grid: &mut LiquidGrid, pass: usize) -> PassReport {
    let size = grid.size();
    let mut wetted = Vec::new();

    for row in 0..size {
        for col in 0..size {
            let Some(&cell) = grid.cell(row, col) else {
                continue;
            };
            let Some(liquid) = cell.liquid() else {
                continue;
            };
            // Wet gray cells never feed flow
            if cell.surface() == Surface::Gray {
                continue;
            }

            let pos = GridPos::new(row, col);
            match grid.cell(row + 1, col).copied() {
                Some(below) if below.liquid().is_none() && below.surface() == Surface::Empty => {
                    if grid.fill(below.pos(), liquid) {
                        wetted.push((below.pos(), liquid));
                    }
                }
                Some(below) if below.surface().is_wettable() => {
                    spread_sideways(grid, pos, liquid, &mut wetted);
                }
                // Floor, gray, teleporter or already-wet empty below: rest
                Some(_) => {}
                None => spread_sideways(grid, pos, liquid, &mut wetted),
            }
        }
    }

    for idx in 0..grid.teleporters().len() {
        let teleporter = grid.teleporters()[idx];
        if let Some(liquid) = grid.liquid(teleporter.input) {
            if grid.fill(teleporter.output, liquid) {
                wetted.push((teleporter.output, liquid));
            }
        }
    }

    debug!("Flow pass {}: {} cells wetted", pass, wetted.len());
    PassReport { pass, wetted }
}

/// Copy `liquid` into the dry left and right neighbours of `pos`
fn spread_sideways(
    grid: &mut LiquidGrid,
    pos: GridPos,
    liquid: Liquid,
    wetted: &mut Vec<(GridPos, Liquid)>,
) {
    if pos.row == 0 {
        return;
    }

    let left = pos.col.checked_sub(1).map(|col| GridPos::new(pos.row, col));
    let right = Some(GridPos::new(pos.row, pos.col + 1));

    for target in [left, right].into_iter().flatten() {
        let Some(surface) = grid.surface(target) else {
            continue;
        };
        if surface.accepts_spread() && grid.fill(target, liquid) {
            wetted.push((target, liquid));
        }
    }
}
