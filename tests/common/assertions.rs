//! Assertion utilities for testing.
//!
//! Floating-point comparisons and checks on the `[min, avg, max]` summary
//! arrays returned by the API.

use serde_json::Value;

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Parse a `[min, avg, max]` response body.
///
/// Returns `None` when all three entries are null.
///
/// # Panics
///
/// Panics if the value is not a three element array, or mixes nulls and numbers.
pub fn summary_values(json: &Value) -> Option<[f64; 3]> {
    let entries = json.as_array().expect("summary must be an array");
    assert_eq!(entries.len(), 3, "summary must have three entries: {}", json);

    if entries.iter().all(Value::is_null) {
        return None;
    }

    let numbers: Vec<f64> = entries
        .iter()
        .map(|v| v.as_f64().unwrap_or_else(|| panic!("summary entry is not a number: {}", json)))
        .collect();
    Some([numbers[0], numbers[1], numbers[2]])
}

/// Assert that a summary is ordered `min <= avg <= max`.
pub fn assert_summary_ordered(values: [f64; 3]) {
    let [min, avg, max] = values;
    assert!(
        min <= avg && avg <= max,
        "Summary not ordered: min = {}, avg = {}, max = {}",
        min,
        avg,
        max
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0, None);
        assert_approx_eq(1.0, 1.0 + 1e-12, None);
        assert_approx_eq(1.0, 1.001, Some(0.01));
    }

    #[test]
    fn test_summary_values() {
        assert_eq!(summary_values(&json!([null, null, null])), None);
        assert_eq!(summary_values(&json!([1.0, 2.0, 3.0])), Some([1.0, 2.0, 3.0]));
        assert_summary_ordered([1.0, 2.0, 3.0]);
        assert_summary_ordered([2.0, 2.0, 2.0]);
    }
}
