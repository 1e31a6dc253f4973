use pri_macros::Series;

#[derive(Debug, Clone, Copy, Series)]
#[series(name = "AdvancedColumns")]
pub struct AdvancedScore {
    pub advanced: f64,
    pub exceedances: f64,
}

fn main() {
    let r = AdvancedScore { advanced: 2.5, exceedances: 3.0 };
    let mut s = AdvancedColumns::with_capacity(5);
    s.push(&r);
    assert_eq!(s.len(), 1);
    assert_eq!(AdvancedScore::field_names(), &["advanced", "exceedances"]);
}
