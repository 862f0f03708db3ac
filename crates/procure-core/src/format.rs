//! Display formatting for prices and dates. Every function takes its locale explicitly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-IN")]
    EnIn,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "de-DE")]
    DeDe,
}

impl Locale {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "en-in" => Some(Self::EnIn),
            "en-us" => Some(Self::EnUs),
            "en-gb" => Some(Self::EnGb),
            "de-de" => Some(Self::DeDe),
            _ => None,
        }
    }

    fn separators(&self) -> (char, char) {
        match self {
            Locale::DeDe => ('.', ','),
            Locale::EnIn | Locale::EnUs | Locale::EnGb => (',', '.'),
        }
    }
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency.trim().to_ascii_uppercase().as_str() {
        "INR" => Some("₹"),
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        _ => None,
    }
}

/// Format `amount` with two decimals, locale grouping, and a currency marker.
///
/// Unknown currency codes are written as the code itself. Non-finite amounts render
/// as zero.
pub fn format_currency(amount: f64, currency: &str, locale: Locale) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let cents = (amount.abs() * 100.0).round() as u128;
    let (group_separator, decimal_separator) = locale.separators();

    let whole = group_digits(&(cents / 100).to_string(), group_separator, locale);
    let number = format!("{whole}{decimal_separator}{:02}", cents % 100);
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

    let code = currency.trim().to_ascii_uppercase();
    match (locale, currency_symbol(&code)) {
        (Locale::DeDe, Some(symbol)) => format!("{sign}{number} {symbol}"),
        (Locale::DeDe, None) => format!("{sign}{number} {code}"),
        (_, Some(symbol)) => format!("{sign}{symbol}{number}"),
        (_, None) => format!("{sign}{code} {number}"),
    }
}

/// Western locales group by thousands; en-IN groups the last three digits and then
/// pairs (12,34,567).
fn group_digits(digits: &str, separator: char, locale: Locale) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(len - 3);
    let step = if locale == Locale::EnIn { 2 } else { 3 };

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(step);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    let mut out = groups.join(&separator.to_string());
    out.push(separator);
    out.push_str(tail);
    out
}

pub fn format_date(timestamp: DateTime<Utc>, locale: Locale) -> String {
    let pattern = match locale {
        Locale::EnUs => "%m/%d/%Y",
        Locale::EnIn | Locale::EnGb => "%d/%m/%Y",
        Locale::DeDe => "%d.%m.%Y",
    };
    timestamp.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn indian_grouping_uses_lakh_separators() {
        assert_eq!(
            format_currency(1_234_567.0, "INR", Locale::EnIn),
            "₹12,34,567.00"
        );
        assert_eq!(format_currency(999.5, "INR", Locale::EnIn), "₹999.50");
    }

    #[test]
    fn western_grouping_uses_thousands() {
        assert_eq!(
            format_currency(1_234_567.891, "USD", Locale::EnUs),
            "$1,234,567.89"
        );
        assert_eq!(format_currency(-1500.0, "GBP", Locale::EnGb), "-£1,500.00");
    }

    #[test]
    fn german_locale_swaps_separators_and_suffixes_symbol() {
        assert_eq!(format_currency(1234.5, "EUR", Locale::DeDe), "1.234,50 €");
        assert_eq!(format_currency(12.0, "chf", Locale::DeDe), "12,00 CHF");
    }

    #[test]
    fn unknown_currency_is_written_as_code() {
        assert_eq!(format_currency(10.0, "AED", Locale::EnUs), "AED 10.00");
    }

    #[test]
    fn non_finite_amounts_render_as_zero() {
        assert_eq!(format_currency(f64::NAN, "INR", Locale::EnIn), "₹0.00");
    }

    #[test]
    fn dates_follow_locale_order() {
        let timestamp = Utc
            .with_ymd_and_hms(2024, 3, 7, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        assert_eq!(format_date(timestamp, Locale::EnUs), "03/07/2024");
        assert_eq!(format_date(timestamp, Locale::EnIn), "07/03/2024");
        assert_eq!(format_date(timestamp, Locale::DeDe), "07.03.2024");
    }

    #[test]
    fn parses_locale_tags() {
        assert_eq!(Locale::parse("en_IN"), Some(Locale::EnIn));
        assert_eq!(Locale::parse("de-de"), Some(Locale::DeDe));
        assert_eq!(Locale::parse("fr-FR"), None);
    }
}
