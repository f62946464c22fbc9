//! Flow The Lawn core library
//!
//! Liquid-flow puzzle engine: the player drops water and magma into the top
//! row of a square grid, the simulator lets it fall, spread and teleport, and
//! the evaluator checks every grass, fire and gray cell against its rule.
//!
//! ## Layout
//!
//! - `core_types`: cells, surfaces, liquids and positions
//! - `grid`: the puzzle grid with its teleporters and liquid supply
//! - `simulation`: flow simulator, game session and action log
//! - `evaluation`: win condition
//! - `level`: level configuration, JSON level files and built-in levels

pub mod core_types;
pub mod evaluation;
pub mod grid;
pub mod level;
pub mod simulation;

// Re-export core types
pub use core_types::{Cell, GridPos, Liquid, Surface};
pub use grid::{LiquidGrid, Supply, Teleporter};

pub use evaluation::{Evaluation, RuleViolation, SurfaceRule, WinEvaluator};
pub use level::{builtin_level, builtin_levels, LevelConfig, LevelError, LEVEL_COUNT};
pub use simulation::{
    ActionOutcome, FlowConfig, FlowSimulator, GameSession, Phase, PlayerAction, Settlement,
    MAX_FLOW_PASSES,
};
