use regex::Regex;
use std::sync::LazyLock;

// "4", "2.5", "6 to 8", "6-8", "Serves 4"; the first number is the count
static SERVINGS_NUM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)(?:\s*(?:[–-]|to)\s*\d+(?:\.\d+)?)?")
        .expect("servings pattern should be valid")
});

/// Read a serving count from the free-text servings field.
///
/// Ranges resolve to their lower bound. Returns `None` when there is no
/// positive number to scale from.
pub fn parse_servings(text: &str) -> Option<f64> {
    let caps = SERVINGS_NUM_RE.captures(text)?;
    let servings: f64 = caps[1].parse().ok()?;
    (servings > 0.0).then_some(servings)
}

/// Factor that turns `original` servings into `target` servings
pub fn scale_factor(original: f64, target: f64) -> Option<f64> {
    if original <= 0.0 || target <= 0.0 || !original.is_finite() || !target.is_finite() {
        return None;
    }
    Some(target / original)
}
