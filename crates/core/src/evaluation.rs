//! Win condition evaluation over a settled grid
//!
//! Each ruled surface looks at its four orthogonal neighbours:
//! - grass needs at least one neighbour holding water
//! - fire needs at least one neighbour holding magma
//! - gray needs every neighbour dry
//!
//! A level passes only when no cell violates its rule.

use crate::core_types::{GridPos, Liquid, Surface};
use crate::grid::LiquidGrid;
use rustc_hash::FxHashSet;
use std::fmt;
use tracing::debug;

/// Rule attached to a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceRule {
    /// Grass: a neighbour must hold water
    NeedsWater,
    /// Fire: a neighbour must hold magma
    NeedsMagma,
    /// Gray: no neighbour may hold liquid
    StaysDry,
}

impl SurfaceRule {
    /// Rule for `surface`, if it has one
    pub fn for_surface(surface: Surface) -> Option<Self> {
        match surface {
            Surface::Grass => Some(SurfaceRule::NeedsWater),
            Surface::Fire => Some(SurfaceRule::NeedsMagma),
            Surface::Gray => Some(SurfaceRule::StaysDry),
            Surface::Empty | Surface::Floor | Surface::Teleporter => None,
        }
    }

    fn holds(self, mut neighbors: impl Iterator<Item = Option<Liquid>>) -> bool {
        match self {
            SurfaceRule::NeedsWater => neighbors.any(|liquid| liquid == Some(Liquid::Water)),
            SurfaceRule::NeedsMagma => neighbors.any(|liquid| liquid == Some(Liquid::Magma)),
            SurfaceRule::StaysDry => neighbors.all(|liquid| liquid.is_none()),
        }
    }
}

impl fmt::Display for SurfaceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceRule::NeedsWater => f.write_str("needs adjacent water"),
            SurfaceRule::NeedsMagma => f.write_str("needs adjacent magma"),
            SurfaceRule::StaysDry => f.write_str("must stay dry"),
        }
    }
}

/// A ruled cell that failed its rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleViolation {
    pub pos: GridPos,
    pub rule: SurfaceRule,
}

/// Outcome of evaluating a settled grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    violations: Vec<RuleViolation>,
    ruled_cells: Vec<GridPos>,
}

impl Evaluation {
    /// Whether every rule holds
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Every failing cell, row-major
    pub fn violations(&self) -> &[RuleViolation] {
        &self.violations
    }

    /// Cells shown as succeeded: every ruled cell on a pass, none on a fail
    pub fn succeeded_cells(&self) -> FxHashSet<GridPos> {
        if !self.passed() {
            return FxHashSet::default();
        }
        self.ruled_cells.iter().copied().collect()
    }
}

/// Checks a settled grid against its surface rules
pub struct WinEvaluator;

impl WinEvaluator {
    /// Evaluate every ruled cell on `grid`
    pub fn evaluate(grid: &LiquidGrid) -> Evaluation {
        let size = grid.size();
        let mut evaluation = Evaluation::default();

        for cell in grid.cells() {
            let Some(rule) = SurfaceRule::for_surface(cell.surface()) else {
                continue;
            };
            let pos = cell.pos();
            evaluation.ruled_cells.push(pos);

            let neighbors = pos.neighbors(size).map(|n| grid.liquid(n));
            if !rule.holds(neighbors) {
                debug!("Rule failed at {}: {} {}", pos, cell.surface(), rule);
                evaluation.violations.push(RuleViolation { pos, rule });
            }
        }

        evaluation
    }

    /// Plain pass/fail
    pub fn is_win(grid: &LiquidGrid) -> bool {
        Self::evaluate(grid).passed()
    }
}
