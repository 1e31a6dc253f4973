//! pri-core: Process Resistance Index engine.
//!
//! Scores water-quality observations for how hard they are to treat. Four
//! independent sub-indices (coagulation, filtration, disinfection, advanced
//! treatment) compare measured concentrations against reference limit
//! tables; the advanced sub-index is also mapped to a severity category and
//! the rest are summed into the PRI label.
//!
//! Reference tables are always passed in explicitly, see
//! [`reference::ReferenceTables`].
pub mod advanced;
pub mod classify;
pub mod coagulation;
pub mod compose;
pub mod disinfection;
pub mod error;
pub mod evaluate;
pub mod filtration;
pub mod observation;
pub mod reference;
pub mod traits;
pub mod weights;

pub use classify::{classify, Category};
pub use error::{PriError, Result};
pub use evaluate::{Assessment, BatchOutput, Evaluator, PriRecord, SubIndexScores, Warning};
pub use observation::{Observation, ParameterVector};
pub use reference::ReferenceTables;
