use serde::Serialize;

/// How a column turns a field value into a displayed cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum CellRule {
    PlainText,
    /// Contact link, `href` built as `{scheme}{value}`.
    LinkText { scheme: &'static str },
    Currency { symbol: &'static str },
    /// Fill proportional to `value / scale_max`, colored by the first threshold the
    /// value reaches.
    ProportionalBar {
        scale_max: f64,
        thresholds: &'static [BarThreshold],
    },
    Badge { on: &'static str, off: &'static str },
    DateFormat { pattern: &'static str },
    TagList,
    /// The value itself, or `placeholder` when absent or blank.
    FallbackText { placeholder: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarTier {
    Top,
    Upper,
    Middle,
    Lowest,
}

impl BarTier {
    pub const fn color(self) -> &'static str {
        match self {
            Self::Top => "#22c55e",
            Self::Upper => "#84cc16",
            Self::Middle => "#eab308",
            Self::Lowest => "#f97316",
        }
    }

    /// Thresholds are inclusive lower bounds, checked in order.
    pub fn for_value(value: f64, thresholds: &[BarThreshold]) -> Self {
        thresholds
            .iter()
            .find(|threshold| value >= threshold.min)
            .map(|threshold| threshold.tier)
            .unwrap_or(Self::Lowest)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarThreshold {
    pub min: f64,
    pub tier: BarTier,
}

pub const RATING_THRESHOLDS: &[BarThreshold] = &[
    BarThreshold {
        min: 4.5,
        tier: BarTier::Top,
    },
    BarThreshold {
        min: 4.0,
        tier: BarTier::Upper,
    },
    BarThreshold {
        min: 3.5,
        tier: BarTier::Middle,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeState {
    On,
    Off,
}
