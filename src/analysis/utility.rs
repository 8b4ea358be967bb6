/// Divides `count` by `population`. Returns 0.0 when the population is zero.
///
/// Counts are subsets of their population, so a zero population always comes
/// with a zero count and the result stays within `[0.0, 1.0]`.
pub fn rate(count: u32, population: u32) -> f64 {
    if population == 0 {
        return 0.0;
    }
    count as f64 / population as f64
}

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
