/// Advanced-treatment sub-index.
///
/// Only parameters above their limit contribute. Each contributes
/// `delta / limit + 1`; contributions are summed per complexity class and
/// each class sum is scaled by the class value.
use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{PriError, Result};
use crate::observation::ParameterVector;
use crate::reference::ReferenceTables;
use crate::traits::SubIndex;

const TABLE: &str = "advanced";

#[derive(Debug, Clone, PartialEq)]
struct AdvancedLimit {
    name: String,
    limit: f64,
    complexity_class: u32,
}

#[derive(Debug, Clone)]
pub struct AdvancedContext {
    limits: Vec<AdvancedLimit>,
}

/// A parameter found above its limit.
#[derive(Debug, Clone, PartialEq)]
pub struct Exceedance {
    pub name: String,
    pub complexity_class: u32,
    /// `delta / limit + 1`.
    pub ratio: f64,
}

/// Parameters exceeding their limit, in table order.
///
/// Missing observations never qualify.
pub fn exceedances(concentrations: &ParameterVector, context: &AdvancedContext) -> Vec<Exceedance> {
    context
        .limits
        .iter()
        .filter_map(|l| {
            let delta = concentrations.get(&l.name)? - l.limit;
            (delta > 0.0).then(|| Exceedance {
                name: l.name.clone(),
                complexity_class: l.complexity_class,
                ratio: delta / l.limit + 1.0,
            })
        })
        .collect()
}

pub struct Advanced;

impl SubIndex for Advanced {
    const NAME: &'static str = TABLE;
    type Input<'a> = &'a ParameterVector;
    type Context = AdvancedContext;

    fn prepare(tables: &ReferenceTables) -> Result<AdvancedContext> {
        let limits = tables
            .advanced
            .rows()
            .iter()
            .map(|r| {
                let complexity_class =
                    r.complexity_class
                        .ok_or_else(|| PriError::MissingReferenceData {
                            table: TABLE,
                            parameter: format!("complexity class for {}", r.name),
                        })?;
                Ok(AdvancedLimit {
                    name: r.name.clone(),
                    limit: r.value,
                    complexity_class,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(AdvancedContext { limits })
    }

    fn evaluate(input: &&ParameterVector, context: &AdvancedContext) -> Result<f64> {
        let mut by_class: BTreeMap<u32, f64> = BTreeMap::new();
        for e in exceedances(input, context) {
            *by_class.entry(e.complexity_class).or_insert(0.0) += e.ratio;
        }

        let output: f64 = by_class
            .iter()
            .map(|(&class, ratio_sum)| ratio_sum * f64::from(class))
            .sum();

        debug!(classes = ?by_class, output, "advanced sub-index");
        Ok(output)
    }
}

/// Advanced-treatment resistance r_a for one observation.
pub fn calc_advanced(tables: &ReferenceTables, concentrations: &ParameterVector) -> Result<f64> {
    Advanced::compute(tables, &concentrations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{LimitRow, LimitTable};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn tables() -> ReferenceTables {
        let mut t = ReferenceTables::bundled().unwrap();
        t.advanced = LimitTable::new(vec![
            LimitRow::new("A", 1.0).with_complexity_class(1),
            LimitRow::new("B", 2.0).with_complexity_class(1),
            LimitRow::new("C", 0.5).with_complexity_class(3),
        ]);
        t
    }

    #[test]
    fn nothing_exceeded_is_zero() {
        let c = ParameterVector::new()
            .with("A", Some(1.0))
            .with("B", Some(0.1))
            .with("C", Some(0.5));
        assert_eq!(calc_advanced(&tables(), &c).unwrap(), 0.0);
    }

    #[test]
    fn grouped_by_class() {
        // A: 2/1 = 2; B: 3/2 = 1.5 -> class 1 sum 3.5
        // C: 1/0.5 = 2 -> class 3 contributes 6
        let c = ParameterVector::new()
            .with("A", Some(2.0))
            .with("B", Some(3.0))
            .with("C", Some(1.0));
        assert_relative_eq!(calc_advanced(&tables(), &c).unwrap(), 9.5);
    }

    #[test]
    fn missing_values_never_exceed() {
        let c = ParameterVector::new().with("A", None).with("C", Some(1.0));
        assert_relative_eq!(calc_advanced(&tables(), &c).unwrap(), 6.0);
    }

    #[test]
    fn exceedances_report_ratio() {
        let t = tables();
        let ctx = Advanced::prepare(&t).unwrap();
        let c = ParameterVector::new().with("B", Some(5.0));
        let e = exceedances(&c, &ctx);
        assert_eq!(e.len(), 1);
        assert_eq!(e[0].name, "B");
        assert_relative_eq!(e[0].ratio, 2.5);
    }

    #[test]
    fn missing_complexity_class_is_reported() {
        let mut t = tables();
        t.advanced = LimitTable::new(vec![LimitRow::new("A", 1.0)]);
        let err = Advanced::prepare(&t).unwrap_err();
        assert!(err.to_string().contains("complexity class for A"));
    }

    proptest! {
        #[test]
        fn never_negative(a in 0.0_f64..10.0, b in 0.0_f64..10.0, c in 0.0_f64..10.0) {
            let pv = ParameterVector::new()
                .with("A", Some(a))
                .with("B", Some(b))
                .with("C", Some(c));
            prop_assert!(calc_advanced(&tables(), &pv).unwrap() >= 0.0);
        }

        #[test]
        fn monotone_in_an_exceeding_parameter(
            c in 0.51_f64..10.0,
            bump in 0.0_f64..10.0,
            a in 0.0_f64..5.0,
        ) {
            let t = tables();
            let base = ParameterVector::new().with("A", Some(a)).with("C", Some(c));
            let raised = base.clone().with("C", Some(c + bump));
            prop_assert!(calc_advanced(&t, &raised).unwrap() >= calc_advanced(&t, &base).unwrap());
        }
    }
}
