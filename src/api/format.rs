//! Presentation-side formatting. The calculation core never rounds or
//! formats; callers pick the locale conventions here.

#[derive(Debug, Clone, Copy)]
pub struct CurrencyFormat {
    pub symbol: &'static str,
    pub thousands_separator: char,
    pub decimal_separator: char,
    pub decimal_places: usize,
}

impl CurrencyFormat {
    pub const fn usd() -> Self {
        Self {
            symbol: "$",
            thousands_separator: ',',
            decimal_separator: '.',
            decimal_places: 2,
        }
    }

    pub const fn eur() -> Self {
        Self {
            symbol: "\u{20ac}",
            thousands_separator: '.',
            decimal_separator: ',',
            decimal_places: 2,
        }
    }
}

pub fn format_currency(value: f64, format: &CurrencyFormat) -> String {
    let rounded = format!("{:.*}", format.decimal_places, value.abs());
    let (whole, frac) = match rounded.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (rounded.as_str(), None),
    };

    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(format.symbol);
    out.push_str(&group_digits(whole, format.thousands_separator));
    if let Some(frac) = frac {
        out.push(format.decimal_separator);
        out.push_str(frac);
    }
    out
}

/// `value` is already in percent points (e.g. 2.5908 renders as "2.59%").
pub fn format_percent(value: f64, decimal_places: usize) -> String {
    format!("{value:.decimal_places$}%")
}

fn group_digits(digits: &str, separator: char) -> String {
    let count = digits.chars().count();
    let mut grouped = String::with_capacity(count + count / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (count - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_groups_thousands_and_keeps_two_decimals() {
        let usd = CurrencyFormat::usd();
        assert_eq!(format_currency(1_234_567.891, &usd), "$1,234,567.89");
        assert_eq!(format_currency(36_000.0, &usd), "$36,000.00");
        assert_eq!(format_currency(999.0, &usd), "$999.00");
        assert_eq!(format_currency(0.0, &usd), "$0.00");
    }

    #[test]
    fn negative_amounts_carry_a_leading_sign() {
        let usd = CurrencyFormat::usd();
        assert_eq!(format_currency(-21_246.0, &usd), "-$21,246.00");
    }

    #[test]
    fn zero_decimal_places_drops_the_separator() {
        let whole_dollars = CurrencyFormat {
            decimal_places: 0,
            ..CurrencyFormat::usd()
        };
        assert_eq!(format_currency(12_954.4, &whole_dollars), "$12,954");
    }

    #[test]
    fn eur_swaps_separator_conventions() {
        let eur = CurrencyFormat::eur();
        assert_eq!(format_currency(1_234.5, &eur), "\u{20ac}1.234,50");
    }

    #[test]
    fn percent_rounds_to_requested_places() {
        assert_eq!(format_percent(2.5908, 2), "2.59%");
        assert_eq!(format_percent(2.5908, 4), "2.5908%");
        assert_eq!(format_percent(-1.005, 1), "-1.0%");
        assert_eq!(format_percent(0.0, 2), "0.00%");
    }
}
