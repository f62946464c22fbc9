//! Flow simulation and the game session built on top of it
//!
//! - `flow`: pure grid-in, settled-grid-out simulator with an optional
//!   pass-by-pass iterator for progressive display
//! - `session`: phase state machine driven by player actions
//! - `action_queue`: player actions and the bounded action log

pub mod action_queue;
pub mod flow;
pub mod session;

pub use action_queue::{ActionLog, LoggedAction, PlayerAction};
pub use flow::{FlowConfig, FlowSimulator, PassReport, Passes, Settlement, MAX_FLOW_PASSES};
pub use session::{ActionOutcome, GameSession, Phase};
