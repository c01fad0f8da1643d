//! Presentation helpers for amounts and dates.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency.to_ascii_uppercase().as_str() {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats an amount in whole currency units, e.g. `$1,235` or `-€40`.
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = group_thousands(&rounded.abs().trunc().to_string());
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{digits}"),
        None => format!("{sign}{} {digits}", currency.to_ascii_uppercase()),
    }
}

/// `Jan 1`
pub fn format_chart_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// `January 1, 2024`
pub fn format_full_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// `01/01/2024`
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_rounds_and_groups() {
        assert_eq!(format_currency(Decimal::new(123_450, 2), "USD"), "$1,235");
        assert_eq!(format_currency(Decimal::new(-40, 0), "usd"), "-$40");
        assert_eq!(format_currency(Decimal::new(1_234_567, 0), "EUR"), "€1,234,567");
        assert_eq!(format_currency(Decimal::new(999, 0), "CHF"), "CHF 999");
        assert_eq!(format_currency(Decimal::new(-4, 1), "USD"), "$0");
    }

    #[test]
    fn dates_use_us_styles() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_chart_date(date), "Jan 5");
        assert_eq!(format_full_date(date), "January 5, 2024");
        assert_eq!(format_short_date(date), "01/05/2024");
    }
}
