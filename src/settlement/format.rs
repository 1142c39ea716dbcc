//! Display formatting for currency amounts

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// How amounts of a currency are written for people.
///
/// The default is Indonesian Rupiah in the `id-ID` style: `Rp1.234.567`,
/// with a decimal comma and two minor-unit digits (`Rp12.345,50`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// Prefix written before the amount
    pub symbol: String,
    /// Decimal places of the minor unit; also the splitting precision
    pub scale: u32,
    pub thousands_separator: char,
    pub decimal_separator: char,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::rupiah()
    }
}

impl CurrencyFormat {
    /// Indonesian Rupiah, `id-ID` grouping
    pub fn rupiah() -> Self {
        Self {
            symbol: "Rp".to_string(),
            scale: 2,
            thousands_separator: '.',
            decimal_separator: ',',
        }
    }

    /// A currency with `en-US` style grouping
    pub fn new(symbol: impl Into<String>, scale: u32) -> Self {
        Self {
            symbol: symbol.into(),
            scale,
            thousands_separator: ',',
            decimal_separator: '.',
        }
    }

    /// The smallest representable amount, `10^-scale`
    pub fn minor_unit(&self) -> BigDecimal {
        BigDecimal::new(1.into(), i64::from(self.scale))
    }

    /// Format an amount, e.g. `Rp90.000` or `-Rp33.333,33`.
    ///
    /// Digits beyond the currency scale are truncated. The fractional part
    /// is omitted when it is zero.
    pub fn format(&self, amount: &BigDecimal) -> String {
        let negative = *amount < BigDecimal::from(0);
        let body = self.format_magnitude(amount);
        if negative && has_nonzero_digit(&body) {
            format!("-{}{}", self.symbol, body)
        } else {
            format!("{}{}", self.symbol, body)
        }
    }

    /// Format a balance with an explicit sign for non-zero values,
    /// e.g. `+Rp60.000` or `-Rp30.000`
    pub fn format_signed(&self, amount: &BigDecimal) -> String {
        let body = self.format_magnitude(amount);
        if *amount > BigDecimal::from(0) && has_nonzero_digit(&body) {
            format!("+{}{}", self.symbol, body)
        } else {
            self.format(amount)
        }
    }

    fn format_magnitude(&self, amount: &BigDecimal) -> String {
        let scale = self.scale as usize;
        let (digits, _) = amount.abs().with_scale(i64::from(self.scale)).as_bigint_and_exponent();
        let mut digits = digits.to_string();
        if digits.len() <= scale {
            digits = format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits);
        }

        let (integer, fraction) = digits.split_at(digits.len() - scale);
        let mut out = group_thousands(integer, self.thousands_separator);
        if fraction.chars().any(|c| c != '0') {
            out.push(self.decimal_separator);
            out.push_str(fraction);
        }
        out
    }
}

fn has_nonzero_digit(body: &str) -> bool {
    body.chars().any(|c| c.is_ascii_digit() && c != '0')
}

fn group_thousands(integer: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_rupiah_formatting() {
        let rp = CurrencyFormat::rupiah();
        assert_eq!(rp.format(&dec("90000")), "Rp90.000");
        assert_eq!(rp.format(&dec("1234567.5")), "Rp1.234.567,50");
        assert_eq!(rp.format(&dec("0")), "Rp0");
        assert_eq!(rp.format(&dec("0.05")), "Rp0,05");
        assert_eq!(rp.format(&dec("999")), "Rp999");
        assert_eq!(rp.format(&dec("-33333.33")), "-Rp33.333,33");
    }

    #[test]
    fn test_signed_balances() {
        let rp = CurrencyFormat::rupiah();
        assert_eq!(rp.format_signed(&dec("60000")), "+Rp60.000");
        assert_eq!(rp.format_signed(&dec("-30000")), "-Rp30.000");
        assert_eq!(rp.format_signed(&dec("0")), "Rp0");
    }

    #[test]
    fn test_amounts_below_minor_unit_print_unsigned_zero() {
        let rp = CurrencyFormat::rupiah();
        assert_eq!(rp.format_signed(&dec("0.001")), "Rp0");
        assert_eq!(rp.format_signed(&dec("-0.001")), "Rp0");
        assert_eq!(rp.format(&dec("-0.001")), "Rp0");
        assert_eq!(rp.format_signed(&dec("0.011")), "+Rp0,01");
    }

    #[test]
    fn test_other_styles() {
        let usd = CurrencyFormat::new("$", 2);
        assert_eq!(usd.format(&dec("1234.5")), "$1,234.50");
        assert_eq!(usd.minor_unit(), dec("0.01"));

        let whole = CurrencyFormat::new("¥", 0);
        assert_eq!(whole.format(&dec("1000000")), "¥1,000,000");
        assert_eq!(whole.minor_unit(), dec("1"));
    }
}
