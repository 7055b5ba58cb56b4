use alloc::string::String;

use crate::{ParseErrorKind, ParseError, io::Source, hex, unicode, lexer::Lexer};

impl<S: Source> Lexer<S> {
  /// Scan a string, after its opening quote.
  pub(crate) fn scan_string(&mut self) -> Result<String, ParseError> {
    let mut res = String::new();
    loop {
      match self.bump_or_end()? {
        '"' => break Ok(res),
        '\\' => res.push(self.scan_escape()?),
        // https://datatracker.ietf.org/doc/html/rfc8259#section-7 requires these be escaped
        '\u{0}' ..= '\u{1f}' => Err(self.error(ParseErrorKind::ControlCharacter))?,
        c => res.push(c),
      }
    }
  }

  /// Scan an escape sequence, after its backslash.
  fn scan_escape(&mut self) -> Result<char, ParseError> {
    Ok(match self.bump_or_end()? {
      '"' => '"',
      '\\' => '\\',
      '/' => '/',
      'b' => '\u{8}',
      'f' => '\u{c}',
      'n' => '\n',
      'r' => '\r',
      't' => '\t',
      'u' => self.scan_unicode_escape()?,
      _ => Err(self.error(ParseErrorKind::InvalidEscape))?,
    })
  }

  /// Scan the four hexadecimal digits of a `\u` escape.
  fn scan_code_unit(&mut self) -> Result<u16, ParseError> {
    let mut hex = ['\0'; 4];
    for c in &mut hex {
      *c = self.bump_or_end()?;
    }
    hex::decode(hex).ok_or_else(|| self.error(ParseErrorKind::InvalidHex))
  }

  /// Scan a `\u` escape, after the `u`, including the trail surrogate if this is a lead surrogate.
  fn scan_unicode_escape(&mut self) -> Result<char, ParseError> {
    let lead = self.scan_code_unit()?;
    if unicode::is_trail_surrogate(lead) {
      Err(self.error(ParseErrorKind::LoneSurrogate))?;
    }
    if !unicode::is_lead_surrogate(lead) {
      // Every non-surrogate code unit is a valid character
      return char::from_u32(u32::from(lead))
        .ok_or_else(|| self.error(ParseErrorKind::LoneSurrogate));
    }

    // The lead surrogate must be immediately followed by an escaped trail surrogate
    if (self.bump_or_end()? != '\\') || (self.bump_or_end()? != 'u') {
      Err(self.error(ParseErrorKind::LoneSurrogate))?;
    }
    let trail = self.scan_code_unit()?;
    unicode::combine_surrogates(lead, trail)
      .ok_or_else(|| self.error(ParseErrorKind::LoneSurrogate))
  }
}

#[cfg(test)]
fn string(str: &str) -> Result<String, ParseErrorKind> {
  let mut lexer = Lexer::new(str.chars());
  match lexer.scan().map_err(|e| e.kind)? {
    crate::Token::String(str) => Ok(str),
    token => panic!("scanned a non-string: {token:?}"),
  }
}

#[test]
fn test_plain_strings() {
  assert_eq!(string(r#""""#).unwrap(), "");
  assert_eq!(string(r#""hello""#).unwrap(), "hello");
  assert_eq!(string("\"\u{e9}\u{1f600}\u{7f}\"").unwrap(), "\u{e9}\u{1f600}\u{7f}");
}

#[test]
fn test_escapes() {
  assert_eq!(string(r#""\"\\\/\b\f\n\r\t""#).unwrap(), "\"\\/\u{8}\u{c}\n\r\t");
  assert_eq!(string(r#""\u0041\u00e9\u4E16""#).unwrap(), "A\u{e9}\u{4e16}");
  assert_eq!(string(r#""\u0000""#).unwrap(), "\u{0}");
  assert_eq!(string(r#""\ud83d\ude00""#).unwrap(), "\u{1f600}");
  assert_eq!(string(r#""\uD834\uDD1E""#).unwrap(), "\u{1d11e}");
}

#[test]
fn test_invalid_strings() {
  assert_eq!(string(r#""unterminated"#), Err(ParseErrorKind::UnexpectedEnd));
  assert_eq!(string("\"tab\there\""), Err(ParseErrorKind::ControlCharacter));
  assert_eq!(string("\"line\nbreak\""), Err(ParseErrorKind::ControlCharacter));
  assert_eq!(string(r#""\x15""#), Err(ParseErrorKind::InvalidEscape));
  assert_eq!(string(r#""\017""#), Err(ParseErrorKind::InvalidEscape));
  assert_eq!(string(r#""\u12""#), Err(ParseErrorKind::UnexpectedEnd));
  assert_eq!(string(r#""\u12"]"#), Err(ParseErrorKind::InvalidHex));
  assert_eq!(string(r#""\u12"#), Err(ParseErrorKind::UnexpectedEnd));
  assert_eq!(string(r#""\uzzzz""#), Err(ParseErrorKind::InvalidHex));
}

#[test]
fn test_surrogate_escapes() {
  // Lone lead
  assert_eq!(string(r#""\ud83d""#), Err(ParseErrorKind::LoneSurrogate));
  assert_eq!(string(r#""\ud83dx""#), Err(ParseErrorKind::LoneSurrogate));
  // Lead followed by a non-trail
  assert_eq!(string(r#""\ud83d\u0041""#), Err(ParseErrorKind::LoneSurrogate));
  assert_eq!(string(r#""\ud83d\ud83d""#), Err(ParseErrorKind::LoneSurrogate));
  // Lone trail
  assert_eq!(string(r#""\ude00""#), Err(ParseErrorKind::LoneSurrogate));
  // Lead followed by a different escape
  assert_eq!(string(r#""\ud83d\n""#), Err(ParseErrorKind::LoneSurrogate));
}
