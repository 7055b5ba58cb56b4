use core::{str::FromStr, fmt::{self, Write}};

use crate::{ParseErrorKind, ParseError, io::Source, lexer::{Token, Lexer}};

/// The length of the string a float is recovered from.
///
/// This is the digits of a `u64`, an additional non-zero digit, the exponent marker, and an
/// `i64` exponent (with its sign).
const FLOAT_STR_LEN: usize = 20 + 1 + 1 + 20;

/// An implementor of `core::fmt::Write` which writes to a slice.
struct SliceWrite<'a>(&'a mut [u8], usize);
impl Write for SliceWrite<'_> {
  #[inline(always)]
  fn write_str(&mut self, s: &str) -> fmt::Result {
    let remaining = self.0.len() - self.1;
    if remaining < s.len() {
      Err(fmt::Error)?;
    }
    self.0[self.1 .. (self.1 + s.len())].copy_from_slice(s.as_bytes());
    self.1 += s.len();
    Ok(())
  }
}

/// A number as it's scanned.
///
/// The digits are accumulated without the sign, which is only applied when the number is
/// converted into a token.
#[derive(Debug)]
struct Number {
  negative: bool,
  /// The leading digits, as an integer.
  mantissa: u64,
  /// If a digit didn't fit within `mantissa`.
  overflowed: bool,
  /// If a non-zero digit was dropped as it didn't fit within `mantissa`.
  truncated: bool,
  /// The power of ten the mantissa is scaled by.
  exponent: i64,
  /// If a fractional part or an exponent was present.
  is_float: bool,
}

impl Number {
  fn new(negative: bool) -> Self {
    Self {
      negative,
      mantissa: 0,
      overflowed: false,
      truncated: false,
      exponent: 0,
      is_float: false,
    }
  }

  /// Push a digit, returning if it was accumulated into the mantissa.
  ///
  /// Once the digits no longer fit within a `u64`, they already exceed the precision of an `f64`,
  /// so further digits are dropped and only counted by the exponent.
  #[inline(always)]
  fn push_digit(&mut self, digit: u8) -> bool {
    if !self.overflowed {
      let mantissa = self.mantissa.checked_mul(10).and_then(|m| m.checked_add(u64::from(digit)));
      if let Some(mantissa) = mantissa {
        self.mantissa = mantissa;
        return true;
      }
      self.overflowed = true;
    }
    self.truncated |= digit != 0;
    false
  }

  fn push_integer_digit(&mut self, digit: u8) {
    if !self.push_digit(digit) {
      self.exponent = self.exponent.saturating_add(1);
    }
  }

  fn push_fraction_digit(&mut self, digit: u8) {
    if self.push_digit(digit) {
      self.exponent = self.exponent.saturating_sub(1);
    }
  }

  /// The magnitude of this number as an `f64`, rounded to the nearest representable value.
  fn magnitude(&self) -> Result<f64, ParseErrorKind> {
    if self.mantissa == 0 {
      return Ok(0.0);
    }

    /*
      The digits are handed to `f64::from_str`, which rounds correctly, as `{mantissa}e{exponent}`.
      If a non-zero digit was dropped, a trailing `1` is appended so the string remains strictly
      between the truncated value and the value one unit above it.
    */
    let mut str = [0; FLOAT_STR_LEN];
    let mut writer = SliceWrite(&mut str, 0);
    let written = if self.truncated {
      write!(&mut writer, "{}1e{}", self.mantissa, self.exponent.saturating_sub(1))
    } else {
      write!(&mut writer, "{}e{}", self.mantissa, self.exponent)
    };
    written.map_err(|_| ParseErrorKind::InvalidNumber)?;
    let len = writer.1;

    let magnitude = core::str::from_utf8(&str[.. len])
      .ok()
      .and_then(|str| f64::from_str(str).ok())
      .ok_or(ParseErrorKind::InvalidNumber)?;
    if !magnitude.is_finite() {
      Err(ParseErrorKind::NumberOutOfRange)?;
    }
    Ok(magnitude)
  }

  fn into_token(self) -> Result<Token, ParseErrorKind> {
    if !(self.is_float || self.overflowed) {
      let integer = if self.negative {
        0i64.checked_sub_unsigned(self.mantissa)
      } else {
        i64::try_from(self.mantissa).ok()
      };
      if let Some(integer) = integer {
        return Ok(Token::Integer(integer));
      }
    }

    let magnitude = self.magnitude()?;
    Ok(Token::Float(if self.negative { -magnitude } else { magnitude }))
  }
}

/// The value of a character, if it's an ASCII digit.
#[inline(always)]
fn digit_value(c: char) -> Option<u8> {
  u8::try_from(c).ok().filter(u8::is_ascii_digit).map(|digit| digit - b'0')
}

impl<S: Source> Lexer<S> {
  /// Peek at the next character, returning its value if it's a digit.
  #[inline(always)]
  fn peek_digit(&mut self) -> Result<Option<u8>, ParseError> {
    Ok(self.peek()?.and_then(digit_value))
  }

  /// Consume one or more digits, calling `f` with each.
  fn digits(&mut self, mut f: impl FnMut(u8)) -> Result<(), ParseError> {
    let Some(first) = self.peek_digit()? else {
      // `peek` is cached, so this returns the same character
      return Err(match self.peek()? {
        Some(_) => self.error(ParseErrorKind::InvalidNumber),
        None => self.error(ParseErrorKind::UnexpectedEnd),
      });
    };
    self.bump()?;
    f(first);
    while let Some(digit) = self.peek_digit()? {
      self.bump()?;
      f(digit);
    }
    Ok(())
  }

  /// Scan a number, given its first character.
  /*
    https://datatracker.ietf.org/doc/html/rfc8259#section-6 defines the syntax as
    `[ minus ] int [ frac ] [ exp ]`, where `int` is `0` or a non-zero digit followed by digits.
  */
  pub(crate) fn scan_number(&mut self, first: char) -> Result<Token, ParseError> {
    let negative = first == '-';
    let mut number = Number::new(negative);

    let first = if negative { self.bump_or_end()? } else { first };
    match digit_value(first) {
      // A leading zero may not be followed by further digits
      Some(0) => {
        if self.peek_digit()?.is_some() {
          Err(self.error(ParseErrorKind::InvalidNumber))?;
        }
      }
      Some(digit) => {
        number.push_integer_digit(digit);
        while let Some(digit) = self.peek_digit()? {
          self.bump()?;
          number.push_integer_digit(digit);
        }
      }
      None => Err(self.error(ParseErrorKind::InvalidNumber))?,
    }

    if self.peek()? == Some('.') {
      self.bump()?;
      number.is_float = true;
      self.digits(|digit| number.push_fraction_digit(digit))?;
    }

    if let Some('e' | 'E') = self.peek()? {
      self.bump()?;
      number.is_float = true;
      let negative_exponent = match self.peek()? {
        Some('-') => {
          self.bump()?;
          true
        }
        Some('+') => {
          self.bump()?;
          false
        }
        _ => false,
      };
      let mut exponent = 0i64;
      self.digits(|digit| {
        exponent = exponent.saturating_mul(10).saturating_add(i64::from(digit));
      })?;
      number.exponent = if negative_exponent {
        number.exponent.saturating_sub(exponent)
      } else {
        number.exponent.saturating_add(exponent)
      };
    }

    number.into_token().map_err(|kind| self.error(kind))
  }
}

#[cfg(test)]
fn number(str: &str) -> Result<Token, ParseErrorKind> {
  let mut lexer = Lexer::new(str.chars());
  let token = lexer.scan().map_err(|e| e.kind)?;
  assert_eq!(lexer.scan().map_err(|e| e.kind)?, Token::EndOfInput);
  Ok(token)
}

#[cfg(test)]
#[track_caller]
fn assert_float(str: &str, expected: f64) {
  let Ok(Token::Float(float)) = number(str) else { panic!("{str} wasn't a float") };
  assert!((float - expected).abs() <= (expected.abs() * 1e-14), "{str} => {float} != {expected}");
}

#[test]
fn test_correctly_rounded() {
  // Every one of these is the shortest representation of the float, so it must be exact
  for (str, expected) in [
    ("0.1", 0.1),
    ("0.3", 0.3),
    ("1e308", 1e308),
    ("1e22", 1e22),
    ("1e23", 1e23),
    ("1.7976931348623157e308", f64::MAX),
    ("-1.7976931348623157e308", f64::MIN),
    ("2.2250738585072014e-308", f64::MIN_POSITIVE),
    ("5e-324", 5e-324),
    // A tie, which rounds to even
    ("9007199254740993.0", 9_007_199_254_740_992.0),
    ("0.30000000000000004", 0.1 + 0.2),
  ] {
    assert_eq!(number(str), Ok(Token::Float(expected)), "{str}");
  }
  // `1.7976931348623158e308` is below the midpoint between `f64::MAX` and the next power of two
  assert_eq!(number("1.7976931348623158e308"), Ok(Token::Float(f64::MAX)));
  assert_eq!(number("1.7976931348623159e308"), Err(ParseErrorKind::NumberOutOfRange));
}

#[test]
fn test_integers() {
  assert_eq!(number("0"), Ok(Token::Integer(0)));
  assert_eq!(number("-0"), Ok(Token::Integer(0)));
  assert_eq!(number("7"), Ok(Token::Integer(7)));
  assert_eq!(number("-1066"), Ok(Token::Integer(-1066)));
  assert_eq!(number("9223372036854775807"), Ok(Token::Integer(i64::MAX)));
  assert_eq!(number("-9223372036854775808"), Ok(Token::Integer(i64::MIN)));
}

#[test]
fn test_integers_exceeding_i64() {
  assert_float("9223372036854775808", 9_223_372_036_854_775_808.0);
  assert_float("-9223372036854775809", -9_223_372_036_854_775_809.0);
  assert_float("123456789012345678901234567890", 1.2345678901234568e29);
}

#[test]
fn test_floats() {
  assert_float("0.5", 0.5);
  assert_float("-0.0", 0.0);
  assert_float("98.6", 98.6);
  assert_float("-1.25e10", -1.25e10);
  assert_float("1e1", 10.0);
  assert_float("0.1e1", 1.0);
  assert_float("1e-1", 0.1);
  assert_float("1e00", 1.0);
  assert_float("2e+00", 2.0);
  assert_float("2e-00", 2.0);
  assert_float("0e5", 0.0);
  assert_float("0e400", 0.0);
  assert_float("0.0e-400", 0.0);
}

#[test]
fn test_extreme_floats() {
  assert_float("1.5e308", 1.5e308);
  assert_float("2.2250738585072014e-308", f64::MIN_POSITIVE);
  assert_float("23456789012E66", 2.3456789012e76);
  assert_float("1e-400", 0.0);
  // Digits beyond what's representable are dropped rather than overflowing
  let long = format!("1.{}", "0".repeat(400));
  assert_float(&long, 1.0);
  let long = format!("1{}e-400", "0".repeat(400));
  assert_float(&long, 1.0);
  assert_eq!(number("1e400"), Err(ParseErrorKind::NumberOutOfRange));
  assert_eq!(number("-1e400"), Err(ParseErrorKind::NumberOutOfRange));
  assert_eq!(number("1e99999999999999999999"), Err(ParseErrorKind::NumberOutOfRange));
}

#[test]
fn test_invalid_numbers() {
  assert_eq!(number("-"), Err(ParseErrorKind::UnexpectedEnd));
  assert_eq!(number("-a"), Err(ParseErrorKind::InvalidNumber));
  assert_eq!(number("01"), Err(ParseErrorKind::InvalidNumber));
  assert_eq!(number("-01"), Err(ParseErrorKind::InvalidNumber));
  assert_eq!(number("1."), Err(ParseErrorKind::UnexpectedEnd));
  assert_eq!(number("1.e5"), Err(ParseErrorKind::InvalidNumber));
  assert_eq!(number("0e"), Err(ParseErrorKind::UnexpectedEnd));
  assert_eq!(number("0e+"), Err(ParseErrorKind::UnexpectedEnd));
  assert_eq!(number("0e+-1"), Err(ParseErrorKind::InvalidNumber));
  assert_eq!(number("-.5"), Err(ParseErrorKind::InvalidNumber));
}
