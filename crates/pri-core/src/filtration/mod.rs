pub mod constants;
pub mod partition;
pub mod run;

pub use partition::partition_weights;
pub use run::{calc_filtration, Filtration, FiltrationContext, FiltrationInput, FiltrationOptions};
