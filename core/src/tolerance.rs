use serde::{Deserialize, Serialize};

/// Radius used by the challenge model when none is stored.
pub const DEFAULT_TOLERANCE_M: f64 = 10.0;

/// Accepted distance around the target, in metres.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ToleranceRadius(f64);

impl ToleranceRadius {
    /// Reads the raw value of the tolerance input. Empty, non-numeric,
    /// non-finite and negative values yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim().parse::<f64>().ok()?;
        Self::from_meters(value)
    }

    pub fn from_meters(value: f64) -> Option<Self> {
        if value.is_finite() && value >= 0.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn meters(self) -> f64 {
        self.0
    }
}

impl Default for ToleranceRadius {
    fn default() -> Self {
        Self(DEFAULT_TOLERANCE_M)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_input() {
        assert_eq!(ToleranceRadius::parse("500").map(ToleranceRadius::meters), Some(500.0));
        assert_eq!(ToleranceRadius::parse(" 12.5 ").map(ToleranceRadius::meters), Some(12.5));
        assert_eq!(ToleranceRadius::parse("0").map(ToleranceRadius::meters), Some(0.0));
    }

    #[test]
    fn rejects_invalid_input() {
        for raw in ["", "abc", "NaN", "inf", "-1", "10m"] {
            assert_eq!(ToleranceRadius::parse(raw), None, "{raw}");
        }
    }
}
