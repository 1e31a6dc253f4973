//! Severity category of the advanced-treatment sub-index.
use std::fmt;

/// Ordinal category derived from r_a.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// No exceedance (`r_a == 0`).
    A,
    /// `1 <= r_a < 2`.
    B,
    /// `r_a >= 2`.
    C,
    /// Anything else, including `0 < r_a < 1`, negatives and NaN.
    Error,
}

impl Category {
    /// Short label appended to the PRI string.
    pub fn label(self) -> &'static str {
        match self {
            Category::A => "a",
            Category::B => "b",
            Category::C => "c",
            Category::Error => "E",
        }
    }

    pub fn is_error(self) -> bool {
        self == Category::Error
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify an advanced sub-index value.
///
/// The interval (0, 1) has no category of its own and maps to `Error`.
/// [`crate::advanced::calc_advanced`] never lands there, since every class
/// contribution is either 0 or above 1, but direct callers can.
// TODO: confirm with the index owners whether (0, 1) should fold into `B`.
pub fn classify(r_a: f64) -> Category {
    if r_a == 0.0 {
        Category::A
    } else if (1.0..2.0).contains(&r_a) {
        Category::B
    } else if r_a >= 2.0 {
        Category::C
    } else {
        Category::Error
    }
}
