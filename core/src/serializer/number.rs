use core::fmt::{self, Write};

use crate::io::Sink;

/// The amount of digits within `u64::MAX`.
const MAX_U64_DIGITS: usize = 20;

/// The most significant digits a float may be written with.
pub(crate) const MAX_PRECISION: usize = 17;

/// Floats whose leading digit is at least `10**SCIENTIFIC_MIN_EXPONENT` are written in
/// scientific notation.
const SCIENTIFIC_MIN_EXPONENT: i64 = 9;
/// Floats whose leading digit is less than `10**FIXED_MIN_EXPONENT` are written in scientific
/// notation.
const FIXED_MIN_EXPONENT: i64 = -6;

/// The power of ten of `f64::MAX`'s leading digit.
const MAX_EXPONENT: i64 = 308;
/// Digits which, alongside `MAX_EXPONENT`, are the largest which still parse to a finite float.
const MAX_FINITE_DIGITS: [u8; MAX_PRECISION] = *b"17976931348623158";

#[inline(always)]
#[allow(clippy::cast_possible_truncation)]
fn ascii_digit(value: u64) -> u8 {
  // `value % 10` is a single digit
  b'0' + ((value % 10) as u8)
}

/// Write an unsigned integer, most-significant digit first.
pub(crate) fn write_unsigned<S: Sink>(sink: &mut S, mut value: u64) -> Result<(), S::Error> {
  if value == 0 {
    return sink.write_char('0');
  }

  let mut digits = [0; MAX_U64_DIGITS];
  let mut i = digits.len();
  while value != 0 {
    i -= 1;
    digits[i] = ascii_digit(value);
    value /= 10;
  }
  write_digits(sink, &digits[i ..])
}

/// Write an integer.
pub(crate) fn write_integer<S: Sink>(sink: &mut S, value: i64) -> Result<(), S::Error> {
  if value < 0 {
    sink.write_char('-')?;
  }
  write_unsigned(sink, value.unsigned_abs())
}

fn write_digits<S: Sink>(sink: &mut S, digits: &[u8]) -> Result<(), S::Error> {
  for digit in digits {
    sink.write_char(char::from(*digit))?;
  }
  Ok(())
}

/// The leading significant digits of a positive, finite, non-zero float, alongside the power of
/// ten of its leading digit.
///
/// These are read from `core`'s `{:e}` formatting, which rounds exactly.
struct Digits {
  digits: [u8; MAX_PRECISION],
  len: usize,
  in_exponent: bool,
  negative_exponent: bool,
  exponent_magnitude: i64,
}

impl Write for Digits {
  fn write_str(&mut self, str: &str) -> fmt::Result {
    for byte in str.bytes() {
      match byte {
        b'e' | b'E' => self.in_exponent = true,
        b'-' if self.in_exponent => self.negative_exponent = true,
        b'0' ..= b'9' if self.in_exponent => {
          self.exponent_magnitude =
            self.exponent_magnitude.saturating_mul(10).saturating_add(i64::from(byte - b'0'));
        }
        b'0' ..= b'9' => {
          if self.len < MAX_PRECISION {
            self.digits[self.len] = byte;
            self.len += 1;
          }
        }
        // The decimal point
        _ => {}
      }
    }
    Ok(())
  }
}

impl Digits {
  /// Decompose a positive, finite, non-zero float into its leading `precision` digits.
  fn new(value: f64, precision: usize) -> Self {
    let mut res = Self {
      digits: [b'0'; MAX_PRECISION],
      len: 0,
      in_exponent: false,
      negative_exponent: false,
      exponent_magnitude: 0,
    };
    // `Digits` never fails to be written to, so neither will formatting into it
    let _ = write!(&mut res, "{:.*e}", precision - 1, value);
    res
  }

  fn exponent(&self) -> i64 {
    if self.negative_exponent { -self.exponent_magnitude } else { self.exponent_magnitude }
  }

  /// If these digits exceed `f64::MAX` by enough to parse as infinity.
  fn overflows(&self) -> bool {
    let exponent = self.exponent();
    if exponent != MAX_EXPONENT {
      return exponent > MAX_EXPONENT;
    }
    let mut padded = [b'0'; MAX_PRECISION];
    padded[.. self.len].copy_from_slice(&self.digits[.. self.len]);
    padded > MAX_FINITE_DIGITS
  }
}

/// Write a float.
///
/// Non-finite floats are written as `null`, as RFC 8259 has no representation for them. Floats
/// are rounded to `precision` significant digits, with trailing zeros omitted.
pub(crate) fn write_float<S: Sink>(
  sink: &mut S,
  value: f64,
  precision: usize,
) -> Result<(), S::Error> {
  if !value.is_finite() {
    return sink.write_str("null");
  }
  if value == 0.0 {
    return sink.write_char('0');
  }
  if value.is_sign_negative() {
    sink.write_char('-')?;
  }

  let precision = precision.clamp(1, MAX_PRECISION);
  let mut digits = Digits::new(value.abs(), precision);
  // Rounding up to `precision` digits may exceed `f64::MAX`, so such floats are truncated instead
  if digits.overflows() {
    digits = Digits::new(value.abs(), MAX_PRECISION);
    digits.len = precision;
  }
  let exponent = digits.exponent();
  let mut len = digits.len;
  while (len > 1) && (digits.digits[len - 1] == b'0') {
    len -= 1;
  }
  let digits = &digits.digits[.. len];

  if (exponent >= SCIENTIFIC_MIN_EXPONENT) || (exponent < FIXED_MIN_EXPONENT) {
    write_digits(sink, &digits[.. 1])?;
    if digits.len() > 1 {
      sink.write_char('.')?;
      write_digits(sink, &digits[1 ..])?;
    }
    sink.write_char('e')?;
    sink.write_char(if exponent < 0 { '-' } else { '+' })?;
    let magnitude = exponent.unsigned_abs();
    if magnitude < 10 {
      sink.write_char('0')?;
    }
    return write_unsigned(sink, magnitude);
  }

  if exponent < 0 {
    sink.write_str("0.")?;
    for _ in 1 .. exponent.unsigned_abs() {
      sink.write_char('0')?;
    }
    return write_digits(sink, digits);
  }

  #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
  let integer_digits = (exponent as usize) + 1;
  for i in 0 .. integer_digits {
    sink.write_char(char::from(digits.get(i).copied().unwrap_or(b'0')))?;
  }
  if digits.len() > integer_digits {
    sink.write_char('.')?;
    write_digits(sink, &digits[integer_digits ..])?;
  }
  Ok(())
}

#[cfg(test)]
fn float(value: f64, precision: usize) -> String {
  let mut res = String::new();
  write_float(&mut res, value, precision).unwrap();
  res
}

#[test]
fn test_write_integer() {
  for integer in [0, 1, -1, 7, 10, -100, 123_456_789, i64::MAX, i64::MIN] {
    let mut res = String::new();
    write_integer(&mut res, integer).unwrap();
    assert_eq!(res, integer.to_string());
  }
  let mut res = String::new();
  write_unsigned(&mut res, u64::MAX).unwrap();
  assert_eq!(res, u64::MAX.to_string());
}

#[test]
fn test_write_float() {
  for (value, expected) in [
    (0.0, "0"),
    (-0.0, "0"),
    (0.5, "0.5"),
    (2.0, "2"),
    (-2.5, "-2.5"),
    (0.1, "0.1"),
    (0.1 + 0.2, "0.3"),
    (123.456, "123.456"),
    (1000.0, "1000"),
    (999_999_999.0, "999999999"),
    (1_000_000_000.0, "1e+09"),
    (-1.25e10, "-1.25e+10"),
    (1e20, "1e+20"),
    (1.5e-6, "0.0000015"),
    (1e-6, "0.000001"),
    (1e-7, "1e-07"),
    (f64::NAN, "null"),
    (f64::INFINITY, "null"),
    (f64::NEG_INFINITY, "null"),
  ] {
    assert_eq!(float(value, 16), expected, "{value:?}");
  }
}

#[test]
fn test_float_precision() {
  assert_eq!(float(core::f64::consts::PI, 3), "3.14");
  assert_eq!(float(core::f64::consts::PI, 1), "3");
  assert_eq!(float(1234.5, 2), "1200");
  assert_eq!(float(9.96, 2), "10");
  assert_eq!(float(999_999_999.6, 9), "1e+09");
  assert_eq!(float(1e100, 6), "1e+100");
  assert_eq!(float(-3.25e-200, 6), "-3.25e-200");
  // Out-of-bounds precisions are clamped
  assert_eq!(float(0.26, 0), "0.3");
  assert!(float(core::f64::consts::E, 100).starts_with("2.71828182845904"));
}

#[test]
fn test_float_digits_are_exact() {
  // The product `value * 10**n` isn't exact for these, which must not affect the digits
  assert_eq!(float(0.1 + 0.2, 16), "0.3");
  assert_eq!(float(0.1 + 0.2, 17), "0.30000000000000004");
  assert_eq!(float(1.0 / 3.0, 17), "0.33333333333333331");
  assert_eq!(float(5e-324, 16), "4.940656458412465e-324");
  assert_eq!(float(f64::MIN_POSITIVE, 17), "2.2250738585072014e-308");
}

#[test]
fn test_largest_floats() {
  assert_eq!(float(f64::MAX, 17), "1.7976931348623157e+308");
  assert_eq!(float(f64::MIN, 17), "-1.7976931348623157e+308");
  // Rounding up to 16 digits would parse as infinity, so the digits are truncated
  assert_eq!(float(f64::MAX, 16), "1.797693134862315e+308");
  assert_eq!(float(f64::MIN, 1), "-1e+308");
  assert_eq!(float(1.5e308, 16), "1.5e+308");
}
