//! Serving-size scaling of free-form ingredient lines.
//!
//! Every number in a line (`2`, `1.5`, `3/4`) is scaled on its own and
//! re-rendered to the nearest eighth, preferring a kitchen fraction over a
//! decimal when one fits.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Fractions parsed through a lookup instead of division, so `1/3`
/// resolves to the same value the display table snaps back to.
const VULGAR_FRACTIONS: [(&str, f64); 6] = [
    ("1/8", 0.125),
    ("1/4", 0.25),
    ("1/3", 0.333),
    ("1/2", 0.5),
    ("2/3", 0.667),
    ("3/4", 0.75),
];

/// Fractions a scaled value may be rendered as. The odd eighths are
/// included because rounding lands on them.
const DISPLAY_FRACTIONS: [(&str, f64); 9] = [
    ("1/8", 0.125),
    ("1/4", 0.25),
    ("1/3", 0.333),
    ("3/8", 0.375),
    ("1/2", 0.5),
    ("5/8", 0.625),
    ("2/3", 0.667),
    ("3/4", 0.75),
    ("7/8", 0.875),
];

const SNAP_TOLERANCE: f64 = 0.01;
const SMALLEST_RENDERED: &str = "1/8";

// Fractions first so `3/4` is not split into `3` and `4`
static QUANTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+/\d+|\d*\.\d+|\d+").expect("quantity pattern should be valid")
});

/// Scale every quantity in `line` by `factor`.
///
/// Text around the numbers is passed through untouched. A factor of
/// exactly 1, or one that is not a positive finite number, returns the
/// line as given.
///
/// Mixed numbers are not merged: `"1 1/2 cups"` scaled by 2 becomes
/// `"2 1 cups"`.
pub fn scale_ingredient(line: &str, factor: f64) -> String {
    if factor == 1.0 || !factor.is_finite() || factor <= 0.0 {
        return line.to_string();
    }

    QUANTITY_RE
        .replace_all(line, |caps: &Captures| {
            let token = &caps[0];
            match quantity_value(token).map(|value| value * factor) {
                Some(scaled) if scaled.is_finite() => format_quantity(scaled),
                _ => token.to_string(),
            }
        })
        .into_owned()
}

/// Decimal value of a matched quantity token
fn quantity_value(token: &str) -> Option<f64> {
    if let Some((_, value)) = VULGAR_FRACTIONS.iter().find(|(text, _)| *text == token) {
        return Some(*value);
    }

    match token.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator: f64 = numerator.parse().ok()?;
            let denominator: f64 = denominator.parse().ok()?;
            if denominator == 0.0 {
                return None;
            }
            Some(numerator / denominator)
        }
        None => token.parse().ok(),
    }
}

/// Render a scaled value the way a cook would write it
pub fn format_quantity(value: f64) -> String {
    let rounded = round_to_eighth(value);

    if let Some((text, _)) = DISPLAY_FRACTIONS
        .iter()
        .find(|(_, decimal)| (rounded - decimal).abs() < SNAP_TOLERANCE)
    {
        return text.to_string();
    }

    // Never print "0" for something that was there before scaling
    if value > 0.0 && rounded < 0.1 {
        return SMALLEST_RENDERED.to_string();
    }

    if rounded.fract() == 0.0 {
        return format!("{rounded:.0}");
    }

    format_decimal(rounded)
}

fn round_to_eighth(value: f64) -> f64 {
    (value * 8.0).round() / 8.0
}

/// Two fractional digits at most, half away from zero, no trailing zeros
fn format_decimal(value: f64) -> String {
    let cents = (value * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    if fraction == 0 {
        whole.to_string()
    } else if fraction % 10 == 0 {
        format!("{}.{}", whole, fraction / 10)
    } else {
        format!("{}.{:02}", whole, fraction)
    }
}
