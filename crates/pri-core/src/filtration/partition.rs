//! Filtration weights from octanol-water partition coefficients.
//!
//! For each group g the weighted Kow is K_g = Σ 10^logKow_i · w_i. The group
//! weights are then
//!
//! ```text
//! v_g  = log10(1 / K_g)
//! w0_g = v_g / Σ v
//! s_g  = 1 / w0_g
//! w_g  = s_g / Σ s
//! ```
//!
//! Every step is evaluated as written; the two inversions are not collapsed.
use tracing::debug;

use crate::error::{PriError, Result};
use crate::reference::{PartitionGroup, PartitionTable};
use crate::weights::WeightVector;

/// Weighted Kow of one group, `Σ 10^logKow · weight`.
pub fn group_kow(table: &PartitionTable, group: PartitionGroup) -> Result<f64> {
    let mut rows = table.group(group).peekable();
    if rows.peek().is_none() {
        return Err(PriError::MissingReferenceData {
            table: "partition",
            parameter: group.label().to_string(),
        });
    }
    Ok(rows.map(|r| 10f64.powf(r.log_kow) * r.weight).sum())
}

/// One weight per [`PartitionGroup`], in [`PartitionGroup::ALL`] order.
pub fn partition_weights(table: &PartitionTable) -> Result<WeightVector> {
    let mut kow = [0.0; 3];
    for (k, group) in kow.iter_mut().zip(PartitionGroup::ALL) {
        *k = group_kow(table, group)?;
    }

    let inverted = kow.map(|k| 1.0 / k);
    let logs = inverted.map(f64::log10);
    let w0 = WeightVector::proportional(&logs)?;
    let swapped: Vec<f64> = w0.as_slice().iter().map(|w| 1.0 / w).collect();
    let weights = WeightVector::proportional(&swapped)?;

    debug!(kow = ?kow, weights = ?weights.as_slice(), "partition weights");
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{PartitionRow, ReferenceTables};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn row(name: &str, log_kow: f64, weight: f64, group: PartitionGroup) -> PartitionRow {
        PartitionRow {
            name: name.to_string(),
            log_kow,
            weight,
            group,
        }
    }

    fn simple_table() -> PartitionTable {
        PartitionTable::new(vec![
            row("p1", 1.0, 0.5, PartitionGroup::VolatilePhenols),
            row("p2", 3.0, 0.5, PartitionGroup::VolatilePhenols),
            row("las", 2.0, 1.0, PartitionGroup::Surfactants),
            row("h1", 4.0, 1.0, PartitionGroup::PetroleumHydrocarbons),
        ])
    }

    #[test]
    fn group_kow_is_weighted_sum() {
        let t = simple_table();
        assert_relative_eq!(
            group_kow(&t, PartitionGroup::VolatilePhenols).unwrap(),
            0.5 * 10.0 + 0.5 * 1000.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn known_weights() {
        // v = [-log10(505), -2, -4]; weights end up proportional to 1/v.
        let v = [-(505f64.log10()), -2.0, -4.0];
        let inv: Vec<f64> = v.iter().map(|x| 1.0 / x).collect();
        let total: f64 = inv.iter().sum();

        let w = partition_weights(&simple_table()).unwrap();
        for (got, want) in w.as_slice().iter().zip(inv.iter().map(|x| x / total)) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn more_hydrophobic_groups_weigh_less() {
        let w = partition_weights(&simple_table()).unwrap();
        let s = w.as_slice();
        assert!(s[1] > s[2], "{:?}", s);
    }

    #[test]
    fn empty_group_is_missing_reference_data() {
        let t = PartitionTable::new(vec![row("p1", 1.0, 1.0, PartitionGroup::VolatilePhenols)]);
        let err = partition_weights(&t).unwrap_err();
        assert!(err.to_string().contains("LAS"));
    }

    #[test]
    fn bundled_weights_sum_to_one() {
        let t = ReferenceTables::bundled().unwrap();
        let w = partition_weights(&t.partition).unwrap();
        assert_eq!(w.len(), 3);
        assert_relative_eq!(w.sum(), 1.0, epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn weights_sum_to_one(
            a in 0.5_f64..6.0,
            b in 0.5_f64..6.0,
            c in 0.5_f64..6.0,
        ) {
            let t = PartitionTable::new(vec![
                row("p", a, 1.0, PartitionGroup::VolatilePhenols),
                row("l", b, 1.0, PartitionGroup::Surfactants),
                row("h", c, 1.0, PartitionGroup::PetroleumHydrocarbons),
            ]);
            let w = partition_weights(&t).unwrap();
            prop_assert!((w.sum() - 1.0).abs() < 1e-9, "sum = {}", w.sum());
            prop_assert!(w.as_slice().iter().all(|&x| x > 0.0));
        }
    }
}
