use pri_macros::Series;

#[derive(Debug, Clone, Copy, Series)]
pub struct Scores {
    pub coagulation: f64,
    pub filtration: f64,
    pub disinfection: f64,
}

fn main() {
    let r = Scores { coagulation: 1.0, filtration: 2.0, disinfection: 3.0 };
    let mut s = ScoresSeries::with_capacity(10);
    s.push(&r);
    s.push_undefined();
    assert_eq!(s.len(), 2);
    assert!(!s.is_empty());
    assert_eq!(s.column("filtration").map(|c| c[0]), Some(2.0));
    assert!(s.disinfection[1].is_nan());
    assert!(s.column("advanced").is_none());
    assert_eq!(Scores::field_names(), &["coagulation", "filtration", "disinfection"]);
}
