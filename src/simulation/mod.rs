pub mod driver;
pub mod engine;
pub mod log;
pub mod roll;
pub mod stats;
pub mod transition;

pub use driver::CampaignDriver;
pub use engine::{EngineSnapshot, EngineState, SimulationEngine, TickOutcome};
pub use roll::{RollSource, ScriptedRolls, SeededRolls, ThreadRolls};
pub use stats::CampaignStats;
