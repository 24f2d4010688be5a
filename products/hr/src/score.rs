//! Score banding for display.

use std::fmt;

const FULL_THRESHOLD: f64 = 100.0;
const WARNING_THRESHOLD: f64 = 25.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    Full,
    Warning,
    Critical,
}

impl Band {
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Full => "full",
            Band::Warning => "warning",
            Band::Critical => "critical",
        }
    }
}

/// Map a score to its band. Total: NaN lands in `Critical`.
pub fn classify(score: f64) -> Band {
    if score >= FULL_THRESHOLD {
        Band::Full
    } else if score >= WARNING_THRESHOLD {
        Band::Warning
    } else {
        Band::Critical
    }
}

/// Two-decimal text with exact halves rounded away from zero (`30.125` is
/// `"30.13"`), unlike `{:.2}` which rounds them to even.
pub fn two_decimals(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value:.2}");
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded:.2}")
}

/// A band together with the label shown for it.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreBadge {
    pub band: Band,
    pub label: String,
}

impl ScoreBadge {
    pub fn for_score(score: f64) -> Self {
        let band = classify(score);
        let label = match band {
            Band::Full => "100".to_string(),
            Band::Warning | Band::Critical => two_decimals(score),
        };
        Self { band, label }
    }
}

impl fmt::Display for ScoreBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.label, self.band.as_str())
    }
}
