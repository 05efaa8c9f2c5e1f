use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// An error that occurs when a string cannot be read as a decimal number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{input}` is not a decimal number of the form `-?digits(.digits)?`")]
pub struct DecimalParseError {
    pub(crate) input: String,
}

/// An exact signed decimal number of arbitrary precision.
///
/// Version segments can be wider than any machine integer (a codepoint
/// encoded word produces ten fractional digits per character), so the value
/// is kept as an unbounded integer plus a power-of-ten scale:
/// `value = digits / 10^scale`.
///
/// The scale is taken verbatim from the parsed string, which makes printing
/// reproduce the input byte for byte, including trailing fractional digits:
///
/// ```rust
/// use std::str::FromStr;
/// use versort::Decimal;
///
/// let decimal = Decimal::from_str("98.00000001010000000116").unwrap();
/// assert_eq!(decimal.to_string(), "98.00000001010000000116");
/// ```
///
/// Comparison is exact: the two operands are brought to a common scale and
/// compared as integers. No floating point is involved at any step.
#[derive(Debug, Clone)]
pub struct Decimal {
    /// The digits of the number with the decimal point removed.
    digits: BigInt,
    /// How many of the trailing digits are fractional.
    scale: usize,
}

impl Decimal {
    /// Whether this decimal is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.digits.is_zero()
    }

    /// Whether this decimal is strictly below zero.
    pub fn is_negative(&self) -> bool {
        self.digits.is_negative()
    }
}

impl FromStr for Decimal {
    type Err = DecimalParseError;

    /// Parses a decimal from `-?digits(.digits)?`. Leading zeros on the
    /// integer part are tolerated and dropped; fractional digits are kept
    /// exactly as written.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || DecimalParseError {
            input: s.to_string(),
        };

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((int_part, frac_part)) => {
                if frac_part.is_empty() {
                    return Err(error());
                }
                (int_part, frac_part)
            }
            None => (body, ""),
        };
        if int_part.is_empty()
            || !int_part.bytes().all(|byte| byte.is_ascii_digit())
            || !frac_part.bytes().all(|byte| byte.is_ascii_digit())
        {
            return Err(error());
        }

        let sign = if negative { "-" } else { "" };
        let digits = BigInt::from_str(&format!("{sign}{int_part}{frac_part}")).map_err(|_| error())?;
        Ok(Self {
            digits,
            scale: frac_part.len(),
        })
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.digits.is_negative() { "-" } else { "" };
        let magnitude = self.digits.magnitude().to_string();
        if self.scale == 0 {
            return write!(f, "{sign}{magnitude}");
        }
        // Zero-fill up to one digit more than the scale so that a value
        // below one keeps its leading `0.`.
        let padded = if magnitude.len() > self.scale {
            magnitude
        } else {
            format!("{magnitude:0>width$}", width = self.scale + 1)
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - self.scale);
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.scale.cmp(&other.scale) {
            Ordering::Equal => self.digits.cmp(&other.digits),
            Ordering::Less => {
                let scaled = &self.digits * pow10(other.scale - self.scale);
                scaled.cmp(&other.digits)
            }
            Ordering::Greater => {
                let scaled = &other.digits * pow10(self.scale - other.scale);
                self.digits.cmp(&scaled)
            }
        }
    }
}

impl Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

fn pow10(exponent: usize) -> BigInt {
    num_traits::pow(BigInt::from(10u32), exponent)
}
