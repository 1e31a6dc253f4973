pub mod run;

pub use run::{calc_advanced, exceedances, Advanced, AdvancedContext, Exceedance};
