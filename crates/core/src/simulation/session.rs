//! Game session: the player-facing state machine
//!
//! A session owns the authoritative grid for the current level plus the
//! phase, selected liquid and evaluation of the last submit. It only changes
//! through [`GameSession::apply`], which consumes the session and returns the
//! next one, so a recorded action list replays to the same state every time.
//!
//! Phases:
//! - `Planning`: toggles, submit and reset are accepted
//! - `Simulating`: flow is running (never observable from outside `apply`)
//! - `Completed`: the level is won; reset and advance are accepted

use crate::core_types::{GridPos, Liquid};
use crate::evaluation::{Evaluation, WinEvaluator};
use crate::grid::{LiquidGrid, Supply};
use crate::level::{builtin_levels, LevelConfig};
use crate::simulation::action_queue::{ActionLog, PlayerAction};
use crate::simulation::flow::{FlowConfig, FlowSimulator};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Session phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Planning,
    Simulating,
    Completed,
}

/// What an action did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Not allowed in the current state; nothing changed
    Ignored,
    /// Liquid selected for later toggles
    Selected(Liquid),
    /// Liquid placed by hand
    Placed(GridPos, Liquid),
    /// Hand-placed liquid taken back
    Removed(GridPos, Liquid),
    /// Simulation ran to completion
    Simulated { won: bool, passes: usize },
    /// Level cleared back to its starting state
    Reset,
    /// Next level loaded
    LevelLoaded(u32),
    /// The final level was already complete
    CampaignComplete,
}

/// Complete state of one play-through
#[derive(Debug, Clone)]
pub struct GameSession {
    levels: Vec<LevelConfig>,
    level_index: usize,
    grid: LiquidGrid,
    phase: Phase,
    selected: Option<Liquid>,
    evaluation: Option<Evaluation>,
    campaign_complete: bool,
    simulator: FlowSimulator,
    log: ActionLog,
}

impl GameSession {
    fn start(levels: Vec<LevelConfig>, grid: LiquidGrid, flow: FlowConfig) -> Self {
        Self {
            levels,
            level_index: 0,
            grid,
            phase: Phase::Planning,
            selected: None,
            evaluation: None,
            campaign_complete: false,
            simulator: FlowSimulator::new(flow),
            log: ActionLog::default(),
        }
    }

    /// Start at the first of `levels`
    ///
    /// Returns `None` when `levels` is empty.
    pub fn new(levels: Vec<LevelConfig>, flow: FlowConfig) -> Option<Self> {
        let grid = levels.first()?.build_grid();
        Some(Self::start(levels, grid, flow))
    }

    /// Start the built-in campaign at level 1
    pub fn campaign() -> Self {
        let levels = builtin_levels();
        let grid = levels[0].build_grid();
        Self::start(levels, grid, FlowConfig::default())
    }

    /// Play a single level
    pub fn single(level: LevelConfig) -> Self {
        let grid = level.build_grid();
        Self::start(vec![level], grid, FlowConfig::default())
    }

    /// Apply `actions` in order to `self`
    pub fn replay(self, actions: &[PlayerAction]) -> Self {
        actions
            .iter()
            .fold(self, |session, action| session.apply(action).0)
    }

    pub fn level(&self) -> &LevelConfig {
        &self.levels[self.level_index]
    }

    pub fn grid(&self) -> &LiquidGrid {
        &self.grid
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected(&self) -> Option<Liquid> {
        self.selected
    }

    pub fn supply(&self) -> Supply {
        self.grid.supply()
    }

    /// Evaluation from the last submit, cleared by reset and level loads
    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    /// Whether the final level has been completed and advanced past
    pub fn campaign_complete(&self) -> bool {
        self.campaign_complete
    }

    /// Actions applied so far
    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    /// Apply one player action
    pub fn apply(mut self, action: &PlayerAction) -> (Self, ActionOutcome) {
        // Logged against the level it was applied to, even when it loads the next
        let number = self.level().number;
        let outcome = match *action {
            PlayerAction::SelectLiquid(liquid) => self.select(liquid),
            PlayerAction::Toggle { row, col } => self.toggle(row, col),
            PlayerAction::Submit => self.submit(),
            PlayerAction::Reset => self.reset(),
            PlayerAction::AdvanceLevel => self.advance(),
        };

        if outcome == ActionOutcome::Ignored {
            debug!("Ignored {:?} during {:?}", action, self.phase);
        } else {
            self.log.record(number, *action);
        }
        (self, outcome)
    }

    fn select(&mut self, liquid: Liquid) -> ActionOutcome {
        if self.phase != Phase::Planning {
            return ActionOutcome::Ignored;
        }
        self.selected = Some(liquid);
        ActionOutcome::Selected(liquid)
    }

    fn toggle(&mut self, row: usize, col: usize) -> ActionOutcome {
        if self.phase != Phase::Planning {
            return ActionOutcome::Ignored;
        }
        let Some(selected) = self.selected else {
            return ActionOutcome::Ignored;
        };
        // Both placing and taking back need stock of the selected liquid
        if self.grid.supply().get(selected) == 0 {
            return ActionOutcome::Ignored;
        }
        let pos = GridPos::new(row, col);

        match self.grid.liquid(pos) {
            None => {
                if self.grid.place_liquid(row, col, selected) {
                    ActionOutcome::Placed(pos, selected)
                } else {
                    ActionOutcome::Ignored
                }
            }
            Some(current) if current == selected => match self.grid.remove_liquid(row, col) {
                Some(removed) => ActionOutcome::Removed(pos, removed),
                None => ActionOutcome::Ignored,
            },
            Some(_) => ActionOutcome::Ignored,
        }
    }

    fn submit(&mut self) -> ActionOutcome {
        if self.phase != Phase::Planning {
            return ActionOutcome::Ignored;
        }

        self.phase = Phase::Simulating;
        info!("Level {}: simulating", self.level().number);

        let settlement = self.simulator.settle(&self.grid);
        self.grid.copy_liquid_from(&settlement.grid);

        let evaluation = WinEvaluator::evaluate(&self.grid);
        let won = evaluation.passed();
        self.evaluation = Some(evaluation);

        if won {
            self.phase = Phase::Completed;
            info!("Level {}: complete", self.level().number);
        } else {
            // Liquid stays as simulated; the player re-plans from here
            self.phase = Phase::Planning;
            info!("Level {}: not solved, back to planning", self.level().number);
        }

        ActionOutcome::Simulated {
            won,
            passes: settlement.passes,
        }
    }

    fn reset(&mut self) -> ActionOutcome {
        self.grid.reset();
        self.phase = Phase::Planning;
        self.selected = None;
        self.evaluation = None;
        info!("Level {}: reset", self.level().number);
        ActionOutcome::Reset
    }

    fn advance(&mut self) -> ActionOutcome {
        if self.phase != Phase::Completed || self.campaign_complete {
            return ActionOutcome::Ignored;
        }

        let next = self.level_index + 1;
        let Some(level) = self.levels.get(next) else {
            self.campaign_complete = true;
            info!("All {} levels complete", self.levels.len());
            return ActionOutcome::CampaignComplete;
        };

        self.grid = level.build_grid();
        let number = level.number;
        self.level_index = next;
        self.phase = Phase::Planning;
        self.selected = None;
        self.evaluation = None;
        ActionOutcome::LevelLoaded(number)
    }
}
