use approx::assert_relative_eq;

use pri_core::coagulation::{calc_coagulation, CoagulationOptions, StatusVector};
use pri_core::compose::format_pri;
use pri_core::disinfection::{calc_disinfection, DisinfectionInput};
use pri_core::{classify, Category, Evaluator, Observation, ReferenceTables, Warning};

const TABLES: &str = r#"
[[coagulation]]
name = "Turbid"
value = 3.0
reduction_rate = 0.9

[[coagulation]]
name = "CODMn"
value = 6.0
reduction_rate = 0.5

[[coagulation]]
name = "NH4-N"
value = 1.0
reduction_rate = 0.75

[[filtration]]
name = "V_phen"
value = 0.005

[[filtration]]
name = "An_SAA"
value = 0.2

[[filtration]]
name = "Oils"
value = 0.05

[[disinfection]]
name = "Colo_org"
value = 10000.0

[[disinfection]]
name = "W_temp"
value = 20.0

[[disinfection]]
name = "NH4-N"
value = 1.0

[[disinfection]]
name = "CT"
value = 3.0

[[advanced]]
name = "CODMn"
value = 6.0
complexity_class = 1

[[advanced]]
name = "As"
value = 0.05
complexity_class = 3

[[partition]]
name = "phenol"
log_kow = 1.46
weight = 1.0
group = "volatile_phenols"

[[partition]]
name = "C12-LAS"
log_kow = 3.32
weight = 1.0
group = "surfactants"

[[partition]]
name = "benzene"
log_kow = 2.13
weight = 1.0
group = "petroleum_hydrocarbons"
"#;

fn raw(cod: &str, arsenic: &str, ph: &str) -> Vec<String> {
    [
        "S1", "2023-05-01", "23", ph, cod, "0.64", "0.3", arsenic, "0.001L", "0.002", "0.001",
        "0.01", "0.05", "1400", "40", "20", "1.2", "0.1", "0.05", "84", "4",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn observation(cod: &str, arsenic: &str, ph: &str) -> Observation {
    let row = raw(cod, arsenic, ph);
    let fields: Vec<&str> = row.iter().map(String::as_str).collect();
    Observation::from_raw_row(&fields).unwrap()
}

#[test]
fn raw_row_to_label() {
    let tables = ReferenceTables::from_toml_str(TABLES).unwrap();
    let evaluator = Evaluator::new(&tables).unwrap();

    // CODMn 9 exceeds 6 -> ratio 1.5, class 1 -> r_a = 1.5 -> b
    let obs = observation("9", "0.01", "7.6");
    let a = evaluator.evaluate(&obs.values).unwrap();
    assert_eq!(a.warning, Warning::Pass);
    let r = a.record.unwrap();
    assert_relative_eq!(r.scores.advanced, 1.5);
    assert_eq!(r.category, Category::B);

    let tau = obs.values.get("Turbid").unwrap();
    let rc = calc_coagulation(
        &tables,
        StatusVector::new(tau, 4.0, 23.0, 7.6),
        &obs.values,
        CoagulationOptions::default(),
    )
    .unwrap();
    let rd = calc_disinfection(&tables, DisinfectionInput::new(1400.0, 0.64, 23.0)).unwrap();
    assert_eq!(r.scores.coagulation, rc);
    assert_relative_eq!(rd, 3.5675589936558283, epsilon = 1e-12);
    assert_eq!(
        r.label,
        format_pri(r.scores.additive_sum(), classify(r.scores.advanced))
    );
}

#[test]
fn class_weights_scale_contributions() {
    let tables = ReferenceTables::from_toml_str(TABLES).unwrap();
    let evaluator = Evaluator::new(&tables).unwrap();

    // As 0.1 -> ratio 2, class 3 -> 6; CODMn within limit
    let obs = observation("3", "0.1", "7.6");
    let r = evaluator.evaluate(&obs.values).unwrap().record.unwrap();
    assert_relative_eq!(r.scores.advanced, 6.0);
    assert_eq!(r.category, Category::C);
}

#[test]
fn unparsable_vital_value_fails_the_row() {
    let tables = ReferenceTables::from_toml_str(TABLES).unwrap();
    let evaluator = Evaluator::new(&tables).unwrap();

    let obs = observation("3", "0.01", "-1");
    let a = evaluator.evaluate(&obs.values).unwrap();
    assert_eq!(a.warning, Warning::Fail);
    assert_eq!(a.missing, ["pH"]);
}

#[test]
fn evaluation_is_deterministic() {
    let tables = ReferenceTables::from_toml_str(TABLES).unwrap();
    let rows: Vec<_> = [("9", "0.01"), ("3", "0.1"), ("12", "0.2")]
        .iter()
        .map(|(c, a)| observation(c, a, "8.1").values)
        .collect();

    let first = Evaluator::new(&tables).unwrap().evaluate_batch(&rows).unwrap();
    let second = Evaluator::new(&tables).unwrap().evaluate_batch(&rows).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.n_failed(), 0);
}
