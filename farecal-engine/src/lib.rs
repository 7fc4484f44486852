pub mod calmath;
pub mod grid;
pub mod orchestrator;
pub mod route;

pub use grid::{build_grid, ColorTier, GridCell, MonthGrid};
pub use orchestrator::{
    CalendarOrchestrator, OrchestrationState, Phase, RecordedCall, ScriptedFareApi,
};
pub use route::{resolve, ResolvedRoute, HOME_AIRPORT_CODES};
