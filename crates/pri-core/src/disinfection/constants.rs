//! Disinfection numerical constants and the positional layout of the
//! disinfection reference table.

/// CT value at 0 °C: ct = 12 · e^(-0.072 T).
pub const CT_AT_ZERO: f64 = 12.0;

/// Temperature decay of the CT value [1/°C].
pub const CT_DECAY: f64 = 0.072;

/// Offset added to the coliform ratio.
pub const COLIFORM_OFFSET: f64 = 7.16;

// -- Table layout (0-based rows) --

/// Coliform standard `cs`.
pub const COLIFORM_STANDARD_ROW: usize = 0;

/// Ammonia reference `r`.
pub const AMMONIA_REFERENCE_ROW: usize = 2;

/// CT standard `cts`.
pub const CT_STANDARD_ROW: usize = 3;
