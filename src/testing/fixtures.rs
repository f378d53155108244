/// `[2, 4, 4, 4, 5, 5, 7, 9]`: mean 5, sum of squared deviations 32.
pub fn textbook_sample() -> Vec<f64> {
    vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]
}
