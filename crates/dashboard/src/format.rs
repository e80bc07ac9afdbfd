use serde::{Deserialize, Serialize};

/// Separator conventions used when rendering counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    pub group_separator: char,
    pub decimal_separator: char,
}

impl NumberFormat {
    pub const ENGLISH: Self = Self::new(',', '.');
    pub const GERMAN: Self = Self::new('.', ',');
    pub const FRENCH: Self = Self::new('\u{202f}', ',');
    pub const SWISS: Self = Self::new('\u{2019}', '.');

    /// Fraction digits kept for non-integral values.
    const MAX_FRACTION_DIGITS: usize = 3;

    pub const fn new(group_separator: char, decimal_separator: char) -> Self {
        Self {
            group_separator,
            decimal_separator,
        }
    }

    /// Resolves a locale tag such as `en`, `de-DE` or `fr_CH`.
    pub fn for_locale(tag: &str) -> Option<Self> {
        let normalized = tag.trim().to_lowercase().replace('_', "-");
        let mut parts = normalized.split('-');
        let language = parts.next().unwrap_or_default();
        let region = parts.next();

        match (language, region) {
            (_, Some("ch")) | ("ch", None) => Some(Self::SWISS),
            ("en", _) => Some(Self::ENGLISH),
            ("de" | "nl" | "it" | "es" | "pt", _) => Some(Self::GERMAN),
            ("fr", _) => Some(Self::FRENCH),
            _ => None,
        }
    }

    pub fn format(&self, value: impl Into<Count>) -> String {
        match value.into() {
            Count::Missing => "0".to_string(),
            Count::Integer(value) => {
                let grouped = self.group(&value.unsigned_abs().to_string());
                if value < 0 {
                    format!("-{grouped}")
                } else {
                    grouped
                }
            }
            Count::Float(value) => self.format_float(value),
        }
    }

    fn format_float(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return if value < 0.0 { "-∞" } else { "∞" }.to_string();
        }

        let rendered = format!("{:.*}", Self::MAX_FRACTION_DIGITS, value.abs());
        let (integer, fraction) = rendered.split_once('.').unwrap_or((&rendered, ""));
        let fraction = fraction.trim_end_matches('0');

        let mut out = self.group(integer);
        if !fraction.is_empty() {
            out.push(self.decimal_separator);
            out.push_str(fraction);
        }

        let is_zero = integer.bytes().all(|b| b == b'0') && fraction.is_empty();
        if value < 0.0 && !is_zero {
            out.insert(0, '-');
        }
        out
    }

    fn group(&self, digits: &str) -> String {
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (index, ch) in digits.chars().enumerate() {
            if index > 0 && (digits.len() - index) % 3 == 0 {
                out.push(self.group_separator);
            }
            out.push(ch);
        }
        out
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::ENGLISH
    }
}

/// A value accepted by [`format_count`]. `Missing` stands in for an absent
/// field and renders as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Count {
    Missing,
    Integer(i128),
    Float(f64),
}

macro_rules! integer_count {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Count {
            fn from(value: $ty) -> Self {
                Self::Integer(i128::from(value))
            }
        })*
    };
}

integer_count!(u8, u16, u32, u64, i8, i16, i32, i64);

impl From<usize> for Count {
    fn from(value: usize) -> Self {
        i128::try_from(value).map_or(Self::Missing, Self::Integer)
    }
}

impl From<f64> for Count {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Count {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl<T: Into<Self>> From<Option<T>> for Count {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// Thousands-grouped rendering using English separators.
pub fn format_count(value: impl Into<Count>) -> String {
    NumberFormat::ENGLISH.format(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_count(4553_u64), "4,553");
        assert_eq!(format_count(1_695_200_u64), "1,695,200");
        assert_eq!(format_count(999_u64), "999");
        assert_eq!(format_count(0_u64), "0");
        assert_eq!(format_count(-12_345_i64), "-12,345");
    }

    #[test]
    fn missing_renders_zero() {
        assert_eq!(format_count(None::<u64>), "0");
        assert_eq!(format_count(Some(4553_u64)), "4,553");
    }

    #[test]
    fn floats_keep_up_to_three_fraction_digits() {
        assert_eq!(format_count(12.5), "12.5");
        assert_eq!(format_count(1234.5678), "1,234.568");
        assert_eq!(format_count(2000.0), "2,000");
        assert_eq!(format_count(-0.0001), "0");
        assert_eq!(format_count(f64::NAN), "NaN");
    }

    #[test]
    fn locale_separators() {
        assert_eq!(NumberFormat::GERMAN.format(1_234_567_u64), "1.234.567");
        assert_eq!(NumberFormat::GERMAN.format(1234.5), "1.234,5");
        assert_eq!(NumberFormat::FRENCH.format(4553_u64), "4\u{202f}553");
        assert_eq!(NumberFormat::SWISS.format(4553_u64), "4\u{2019}553");
    }

    #[test]
    fn resolves_locale_tags() {
        assert_eq!(NumberFormat::for_locale("en-NZ"), Some(NumberFormat::ENGLISH));
        assert_eq!(NumberFormat::for_locale("de_DE"), Some(NumberFormat::GERMAN));
        assert_eq!(NumberFormat::for_locale("fr-CH"), Some(NumberFormat::SWISS));
        assert_eq!(NumberFormat::for_locale("fr"), Some(NumberFormat::FRENCH));
        assert_eq!(NumberFormat::for_locale("xx"), None);
    }
}
