pub mod constants;
pub mod processes;
pub mod run;

pub use run::{calc_coagulation, Coagulation, CoagulationContext, CoagulationInput, CoagulationOptions, StatusVector};
