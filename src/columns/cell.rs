use super::format::{self, PLACEHOLDER};
use super::rule::{BadgeState, BarTier, CellRule};
use crate::roster::FieldValue;
use serde::Serialize;

const BAR_SLOTS: usize = 10;

/// A rendered table cell, ready for a front end to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cell {
    Text {
        text: String,
    },
    Link {
        href: String,
        label: String,
    },
    Currency {
        amount: u64,
        text: String,
    },
    Bar {
        percent: f64,
        tier: BarTier,
        color: &'static str,
        label: String,
    },
    Badge {
        label: &'static str,
        state: BadgeState,
    },
    Tags {
        tags: Vec<String>,
    },
    Placeholder {
        text: &'static str,
    },
}

impl Cell {
    fn placeholder() -> Self {
        Cell::Placeholder { text: PLACEHOLDER }
    }

    /// Single-line rendering for terminals.
    pub fn plain_text(&self) -> String {
        match self {
            Cell::Text { text } => text.clone(),
            Cell::Link { label, .. } => label.clone(),
            Cell::Currency { text, .. } => text.clone(),
            Cell::Bar { percent, label, .. } => {
                let filled = ((percent / 100.0) * BAR_SLOTS as f64).round() as usize;
                let filled = filled.min(BAR_SLOTS);
                format!(
                    "{}{} {}",
                    "█".repeat(filled),
                    "░".repeat(BAR_SLOTS - filled),
                    label
                )
            }
            Cell::Badge { label, .. } => (*label).to_string(),
            Cell::Tags { tags } => tags.join(", "),
            Cell::Placeholder { text } => (*text).to_string(),
        }
    }
}

/// Interprets `rule` against `value`. Values a rule cannot display render as the
/// placeholder.
pub fn render_cell(rule: &CellRule, value: FieldValue<'_>) -> Cell {
    match (rule, value) {
        (CellRule::PlainText, FieldValue::Tags(_)) => Cell::placeholder(),
        (CellRule::PlainText, value) => match export_text(rule, value) {
            text if text.is_empty() => Cell::placeholder(),
            text => Cell::Text { text },
        },
        (CellRule::LinkText { scheme }, FieldValue::Text(address)) if !address.is_empty() => {
            Cell::Link {
                href: format!("{scheme}{address}"),
                label: address.to_string(),
            }
        }
        (CellRule::Currency { symbol }, FieldValue::Integer(amount)) => Cell::Currency {
            amount,
            text: format::currency_with(symbol, amount),
        },
        (
            CellRule::ProportionalBar {
                scale_max,
                thresholds,
            },
            value,
        ) => match value.as_number() {
            Some(number) if *scale_max > 0.0 => {
                let tier = BarTier::for_value(number, thresholds);
                Cell::Bar {
                    percent: (number / scale_max * 100.0).clamp(0.0, 100.0),
                    tier,
                    color: tier.color(),
                    label: format::decimal(number),
                }
            }
            _ => Cell::placeholder(),
        },
        (CellRule::Badge { on, off }, FieldValue::Flag(flag)) => {
            if flag {
                Cell::Badge {
                    label: *on,
                    state: BadgeState::On,
                }
            } else {
                Cell::Badge {
                    label: *off,
                    state: BadgeState::Off,
                }
            }
        }
        (CellRule::DateFormat { pattern }, FieldValue::Date(Some(date))) => Cell::Text {
            text: format::date(date, pattern),
        },
        (CellRule::TagList, FieldValue::Tags(tags)) => Cell::Tags {
            tags: tags.to_vec(),
        },
        (CellRule::FallbackText { placeholder }, value) => match value.as_text() {
            Some(text) if !text.trim().is_empty() => Cell::Text {
                text: text.to_string(),
            },
            _ => Cell::Placeholder { text: *placeholder },
        },
        _ => Cell::placeholder(),
    }
}

/// Text used for CSV export and quick-filter matching.
///
/// Columns that only restyle their value (links, currency, bars, badges, tags) export
/// the raw value; date and fallback columns export their formatted text.
pub fn export_text(rule: &CellRule, value: FieldValue<'_>) -> String {
    match (rule, value) {
        (CellRule::DateFormat { pattern }, FieldValue::Date(Some(date))) => {
            format::date(date, pattern)
        }
        (CellRule::DateFormat { .. }, FieldValue::Date(None)) => PLACEHOLDER.to_string(),
        (CellRule::FallbackText { placeholder }, value) => match value.as_text() {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => (*placeholder).to_string(),
        },
        (_, FieldValue::Text(text)) => text.to_string(),
        (_, FieldValue::OptionalText(text)) => text.unwrap_or_default().to_string(),
        (_, FieldValue::Integer(number)) => number.to_string(),
        (_, FieldValue::Decimal(number)) => format::decimal(number),
        (_, FieldValue::Date(Some(date))) => date.format("%Y-%m-%d").to_string(),
        (_, FieldValue::Date(None)) => String::new(),
        (_, FieldValue::Flag(flag)) => flag.to_string(),
        (_, FieldValue::Tags(tags)) => tags.join(","),
    }
}
