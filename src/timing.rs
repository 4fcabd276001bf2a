//! Cooking-time detection in free-form instruction text.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Longest duration a single step timer will suggest (4 hours)
pub const MAX_TIMER_SECONDS: u64 = 4 * 3600;

/// Words that usually mean a step involves waiting on heat or time
pub const TIMING_KEYWORDS: [&str; 20] = [
    "bake",
    "cook",
    "simmer",
    "boil",
    "roast",
    "grill",
    "fry",
    "sauté",
    "steam",
    "broil",
    "marinate",
    "chill",
    "freeze",
    "rest",
    "wait",
    "timer",
    "until",
    "for",
    "about",
    "approximately",
];

/// A duration found in an instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedTime {
    pub minutes: u32,
    pub seconds: u32,
    pub total_seconds: u32,
    /// The text the duration was read from, as written
    pub matched_text: String,
}

// Evaluated in order; the first pattern with any match wins, wherever it
// sits in the text. The minutes pattern takes an optional leading range
// bound so "2-4 minutes" is read as a whole.
static TIME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(?:\d+[-–])?\d+\s*(?:minutes?|mins?)",
        r"(?i)\d+\s*(?:hours?|hrs?)",
        r"(?i)\d+\s*(?:seconds?|secs?)",
        r"(?i)\d+[-–]\d+\s*(?:minutes?|mins?)",
        r"(?i)for\s+\d+\s*(?:minutes?|mins?)",
        r"(?i)cook\s+\d+\s*(?:minutes?|mins?)",
        r"(?i)bake\s+\d+\s*(?:minutes?|mins?)",
        r"(?i)simmer\s+\d+\s*(?:minutes?|mins?)",
        r"(?i)rest\s+\d+\s*(?:minutes?|mins?)",
        r"(?i)wait\s+\d+\s*(?:minutes?|mins?)",
        r"(?i)(?:until|when)\s+timer",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("time pattern should be valid"))
    .collect()
});

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("number pattern should be valid"));

static RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)[-–](\d+)").expect("range pattern should be valid"));

static KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    let words = TIMING_KEYWORDS.join("|");
    Regex::new(&format!(r"(?i)\b(?:{words})\b")).expect("keyword pattern should be valid")
});

/// Find the first recognizable cooking time in `text`.
///
/// Returns `None` when nothing matches, or when the only match is a
/// phrase like "until timer" that carries no number.
pub fn detect_timing_in_text(text: &str) -> Option<DetectedTime> {
    for pattern in TIME_PATTERNS.iter() {
        let Some(found) = pattern.find(text) else {
            continue;
        };
        let matched = found.as_str();

        let Some(number) = NUMBER_RE.find(matched) else {
            continue;
        };
        let number = parse_number(number.as_str());

        let lower = matched.to_lowercase();
        let mut total = if lower.contains("hour") || lower.contains("hr") {
            number.saturating_mul(3600)
        } else if lower.contains("second") || lower.contains("sec") {
            number
        } else {
            number.saturating_mul(60)
        };

        // Ranges are averaged and always read as minutes
        if let Some(range) = RANGE_RE.captures(matched) {
            let low = parse_number(&range[1]);
            let high = parse_number(&range[2]);
            let average = low.saturating_add(high).saturating_add(1) / 2;
            total = average.saturating_mul(60);
        }

        let total = total.min(MAX_TIMER_SECONDS) as u32;

        return Some(DetectedTime {
            minutes: total / 60,
            seconds: total % 60,
            total_seconds: total,
            matched_text: matched.to_string(),
        });
    }

    None
}

// Digit runs too long for u64 are past the cap anyway
fn parse_number(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}

/// Compact display of a duration: `45s`, `1m 30s`, `1h 30m`
pub fn format_time_display(total_seconds: u32) -> String {
    if total_seconds < 60 {
        format!("{total_seconds}s")
    } else if total_seconds < 3600 {
        let mins = total_seconds / 60;
        let secs = total_seconds % 60;
        if secs > 0 {
            format!("{mins}m {secs}s")
        } else {
            format!("{mins}m")
        }
    } else {
        let hours = total_seconds / 3600;
        let mins = (total_seconds % 3600) / 60;
        if mins > 0 {
            format!("{hours}h {mins}m")
        } else {
            format!("{hours}h")
        }
    }
}

/// Whether `text` uses any of [`TIMING_KEYWORDS`] as a whole word
pub fn mentions_timing(text: &str) -> bool {
    KEYWORD_RE.is_match(text)
}
