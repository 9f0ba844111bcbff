//! Type-safe price representation using decimal arithmetic.
//!
//! Prices come from product card markup, either a `data-price` attribute or
//! the text of the card's price element. Markup text may carry currency
//! words, thousands separators and Eastern Arabic digits, so parsing keeps
//! only the digits and the decimal point.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input carries no digits at all.
    #[error("price has no digits: {0:?}")]
    NoDigits(String),
    /// The digits do not form a decimal number (e.g. two decimal points).
    #[error("invalid price: {0:?}")]
    Invalid(String),
}

/// A non-negative price amount in the shop's display currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Parse a price from attribute or element text.
    ///
    /// ```
    /// use localshop_core::Price;
    ///
    /// let price = Price::parse("120,000 Toman").unwrap();
    /// assert_eq!(price.to_string(), "120,000");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `PriceError::NoDigits` if the text has no digits, or
    /// `PriceError::Invalid` if the digits are not a decimal number.
    pub fn parse(text: &str) -> Result<Self, PriceError> {
        let mut cleaned = String::with_capacity(text.len());
        for c in text.chars() {
            if let Some(digit) = ascii_digit(c) {
                cleaned.push(digit);
            } else if c == '.' || c == '\u{066B}' {
                cleaned.push('.');
            }
        }

        if !cleaned.chars().any(|c| c.is_ascii_digit()) {
            return Err(PriceError::NoDigits(text.to_owned()));
        }

        Decimal::from_str(&cleaned)
            .map(Self)
            .map_err(|_| PriceError::Invalid(text.to_owned()))
    }
}

/// Map ASCII, Persian and Arabic-Indic digits to their ASCII form.
fn ascii_digit(c: char) -> Option<char> {
    let offset = match c {
        '0'..='9' => return Some(c),
        '\u{06F0}'..='\u{06F9}' => u32::from(c) - 0x06F0,
        '\u{0660}'..='\u{0669}' => u32::from(c) - 0x0660,
        _ => return None,
    };
    char::from_digit(offset, 10)
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Totals saturate at the largest representable amount.
impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |total, p| Self(total.0.saturating_add(p.0)))
    }
}

impl<'a> std::iter::Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.0.normalize().to_string();
        let (int_part, frac_part) = text
            .split_once('.')
            .map_or((text.as_str(), None), |(int, frac)| (int, Some(frac)));

        let digits: Vec<char> = int_part.chars().collect();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.iter().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(*c);
        }

        match frac_part {
            Some(frac) => write!(f, "{grouped}.{frac}"),
            None => f.write_str(&grouped),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_number() {
        assert_eq!(Price::parse("1500").unwrap(), Price(Decimal::new(1500, 0)));
        assert_eq!(Price::parse("19.99").unwrap(), Price(Decimal::new(1999, 2)));
    }

    #[test]
    fn test_parse_strips_currency_and_separators() {
        let price = Price::parse("$ 1,250.50").unwrap();
        assert_eq!(price.0, Decimal::new(125_050, 2));
    }

    #[test]
    fn test_parse_persian_digits() {
        let price = Price::parse("۱۲۰٬۰۰۰ تومان").unwrap();
        assert_eq!(price.0, Decimal::new(120_000, 0));
    }

    #[test]
    fn test_parse_no_digits() {
        assert!(matches!(Price::parse("free"), Err(PriceError::NoDigits(_))));
    }

    #[test]
    fn test_parse_two_points_is_invalid() {
        assert!(matches!(Price::parse("1.2.3"), Err(PriceError::Invalid(_))));
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::parse("1234567").unwrap().to_string(), "1,234,567");
        assert_eq!(Price::parse("999").unwrap().to_string(), "999");
        assert_eq!(Price::parse("1000.50").unwrap().to_string(), "1,000.5");
    }

    #[test]
    fn test_sum() {
        let prices = [Price::parse("100").unwrap(), Price::parse("250").unwrap()];
        let total: Price = prices.iter().sum();
        assert_eq!(total, Price::parse("350").unwrap());
        assert_eq!(Vec::<Price>::new().into_iter().sum::<Price>(), Price::ZERO);
    }

    #[test]
    fn test_sum_saturates_instead_of_overflowing() {
        let huge = Price::parse("79228162514264337593543950335").unwrap();
        let total: Price = [huge, huge, Price::parse("1").unwrap()].into_iter().sum();
        assert_eq!(total, Price(Decimal::MAX));
    }
}
