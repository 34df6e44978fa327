//! en-US currency and date rendering used by transfer rows.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::UtcDateTime;

const LONG_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[month repr:long] [day padding:none], [year] at [hour repr:12 padding:none]:[minute] [period]"
);

const SHORT_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[month padding:none]/[day padding:none]/[year repr:last_two], [hour repr:12 padding:none]:[minute] [period]"
);

/// Date+time presentation used in transfer details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateStyle {
    /// `October 18, 2026 at 3:04 PM`
    Long,
    /// `10/18/26, 3:04 PM`
    Short,
}

impl DateStyle {
    pub fn format(self, date: UtcDateTime) -> String {
        match self {
            Self::Long => long_date_time(date),
            Self::Short => short_date_time(date),
        }
    }
}

/// Formats `amount` in the given ISO currency, e.g. `$1,234.50`.
///
/// Digits come from the exact decimal expansion of `amount`, so large
/// values keep every integer digit.
pub fn currency(amount: f64, currency_code: &str) -> String {
    let (symbol, fraction_digits) = currency_symbol(currency_code);
    let digits = format!("{:.*}", fraction_digits, amount.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
    let is_zero = digits.bytes().all(|byte| byte == b'0' || byte == b'.');

    let mut output = String::with_capacity(symbol.len() + digits.len() + digits.len() / 3 + 1);
    if amount.is_sign_negative() && !is_zero {
        output.push('-');
    }
    output.push_str(&symbol);
    output.push_str(&group_thousands(whole));
    if !fraction.is_empty() {
        output.push('.');
        output.push_str(fraction);
    }
    output
}

pub fn long_date_time(date: UtcDateTime) -> String {
    render(date, LONG_FORMAT)
}

pub fn short_date_time(date: UtcDateTime) -> String {
    render(date, SHORT_FORMAT)
}

fn render(date: UtcDateTime, description: &[BorrowedFormatItem<'_>]) -> String {
    // Both descriptions only use components an OffsetDateTime always has.
    date.into_inner()
        .format(description)
        .unwrap_or_else(|_| date.to_string())
}

fn currency_symbol(code: &str) -> (String, usize) {
    match code {
        "USD" => (String::from("$"), 2),
        "EUR" => (String::from("€"), 2),
        "GBP" => (String::from("£"), 2),
        "JPY" => (String::from("¥"), 0),
        "CAD" => (String::from("CA$"), 2),
        "AUD" => (String::from("A$"), 2),
        other => (format!("{other}\u{a0}"), 2),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(value: &str) -> UtcDateTime {
        UtcDateTime::parse(value).expect("valid timestamp")
    }

    #[test]
    fn formats_known_currencies() {
        assert_eq!(currency(12.5, "USD"), "$12.50");
        assert_eq!(currency(1234.5, "EUR"), "€1,234.50");
        assert_eq!(currency(1_000_000.0, "GBP"), "£1,000,000.00");
        assert_eq!(currency(1500.0, "JPY"), "¥1,500");
    }

    #[test]
    fn formats_unknown_currency_with_code_prefix() {
        assert_eq!(currency(3.0, "CHF"), "CHF\u{a0}3.00");
    }

    #[test]
    fn negative_amounts_lead_with_minus() {
        assert_eq!(currency(-7.25, "USD"), "-$7.25");
        assert_eq!(currency(-0.001, "USD"), "$0.00");
    }

    #[test]
    fn amounts_past_the_u64_minor_unit_range_keep_every_digit() {
        assert_eq!(currency(1.9e17, "USD"), "$190,000,000,000,000,000.00");
        assert_eq!(currency(1e20, "USD"), "$100,000,000,000,000,000,000.00");
        assert_eq!(currency(-1e20, "JPY"), "-¥100,000,000,000,000,000,000");
    }

    #[test]
    fn long_style_spells_out_month() {
        assert_eq!(
            long_date_time(ts("2026-10-18T15:04:00Z")),
            "October 18, 2026 at 3:04 PM"
        );
        assert_eq!(
            long_date_time(ts("2024-01-05T00:30:00Z")),
            "January 5, 2024 at 12:30 AM"
        );
    }

    #[test]
    fn short_style_uses_numeric_date() {
        assert_eq!(
            short_date_time(ts("2026-10-18T15:04:00Z")),
            "10/18/26, 3:04 PM"
        );
        assert_eq!(
            short_date_time(ts("2005-03-09T12:00:00Z")),
            "3/9/05, 12:00 PM"
        );
    }
}
