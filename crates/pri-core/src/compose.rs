//! PRI label: the additive sub-indices rounded to two decimals, followed by
//! the advanced-treatment category.
use crate::classify::Category;

/// Round to two decimals, halves away from zero.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Render a score the way the PRI label shows it: rounded to two decimals,
/// shortest form, at least one fractional digit.
pub fn format_score(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let s = round2(x).to_string();
    if s.contains('.') {
        s
    } else {
        format!("{}.0", s)
    }
}

/// `round(r_c + r_f + r_d, 2)` followed by the category label, e.g. `3.42b`.
pub fn format_pri(additive_sum: f64, category: Category) -> String {
    format!("{}{}", format_score(additive_sum), category.label())
}
