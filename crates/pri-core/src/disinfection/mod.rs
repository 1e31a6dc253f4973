pub mod constants;
pub mod run;

pub use run::{calc_disinfection, ct_value, Disinfection, DisinfectionContext, DisinfectionInput};
