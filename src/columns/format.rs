//! Value formatters shared by cells and stat cards.

use chrono::NaiveDate;

/// Shown wherever a value is absent or cannot be rendered.
pub const PLACEHOLDER: &str = "—";

pub const CURRENCY_SYMBOL: &str = "$";

/// Abbreviated month, day, year: `Mar 15, 2020`.
pub const DATE_PATTERN: &str = "%b %-d, %Y";

/// `1234567` -> `1,234,567`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

pub fn currency_with(symbol: &str, amount: u64) -> String {
    format!("{symbol}{}", group_thousands(amount))
}

pub fn currency(amount: u64) -> String {
    currency_with(CURRENCY_SYMBOL, amount)
}

pub fn date(value: NaiveDate, pattern: &str) -> String {
    value.format(pattern).to_string()
}

/// Shortest decimal form, so `4.0` prints as `4` and `4.5` as `4.5`.
pub fn decimal(value: f64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits_in_threes() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(85_500), "85,500");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn formats_currency_and_dates() {
        assert_eq!(currency(125_000), "$125,000");
        let hired = NaiveDate::from_ymd_opt(2020, 3, 5).expect("valid date");
        assert_eq!(date(hired, DATE_PATTERN), "Mar 5, 2020");
    }

    #[test]
    fn decimals_drop_trailing_zero() {
        assert_eq!(decimal(4.0), "4");
        assert_eq!(decimal(4.7), "4.7");
    }
}
