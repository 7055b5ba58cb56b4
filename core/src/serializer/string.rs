use crate::{hex, io::Sink, unicode::split_surrogates};

#[inline(always)]
fn write_code_unit<S: Sink>(sink: &mut S, unit: u16) -> Result<(), S::Error> {
  sink.write_str("\\u")?;
  for c in hex::encode(unit) {
    sink.write_char(c)?;
  }
  Ok(())
}

/// Write a character as `\u` escapes, using a surrogate pair if it's outside the Basic
/// Multilingual Plane.
fn write_unicode_escape<S: Sink>(sink: &mut S, c: char) -> Result<(), S::Error> {
  match split_surrogates(c) {
    Some((lead, trail)) => {
      write_code_unit(sink, lead)?;
      write_code_unit(sink, trail)
    }
    None => write_code_unit(sink, c.encode_utf16(&mut [0; 1])[0]),
  }
}

/// Write a string, with its quotes.
///
/// https://datatracker.ietf.org/doc/html/rfc8259#section-7 requires escaping quotation marks,
/// reverse solidi, and the control characters. If `escape_unicode` is set, every character
/// outside of ASCII (and `DEL`) is escaped as well.
pub(crate) fn write_string<S: Sink>(
  sink: &mut S,
  str: &str,
  escape_unicode: bool,
) -> Result<(), S::Error> {
  sink.write_char('"')?;
  for c in str.chars() {
    match c {
      '"' => sink.write_str("\\\"")?,
      '\\' => sink.write_str("\\\\")?,
      '\t' => sink.write_str("\\t")?,
      '\r' => sink.write_str("\\r")?,
      '\n' => sink.write_str("\\n")?,
      '\u{8}' => sink.write_str("\\b")?,
      '\u{c}' => sink.write_str("\\f")?,
      c if (c <= '\u{1f}') || (escape_unicode && (c >= '\u{7f}')) => {
        write_unicode_escape(sink, c)?;
      }
      c => sink.write_char(c)?,
    }
  }
  sink.write_char('"')
}

#[cfg(test)]
fn string(str: &str, escape_unicode: bool) -> String {
  let mut res = String::new();
  write_string(&mut res, str, escape_unicode).unwrap();
  res
}

#[test]
fn test_escapes() {
  assert_eq!(string("", false), r#""""#);
  assert_eq!(string("plain / text", false), r#""plain / text""#);
  assert_eq!(string("\"quoted\"", false), r#""\"quoted\"""#);
  assert_eq!(string("a\\b", false), r#""a\\b""#);
  assert_eq!(string("\t\r\n\u{8}\u{c}", false), r#""\t\r\n\b\f""#);
  assert_eq!(string("\0\u{1}\u{1f}", false), r#""\u0000\u0001\u001f""#);
}

#[test]
fn test_unicode_escapes() {
  let str = "\u{7f}\u{e9}\u{fffd}\u{1f600}";
  assert_eq!(string(str, false), format!("\"{str}\""));
  assert_eq!(string(str, true), r#""\u007f\u00e9\ufffd\ud83d\ude00""#);
  // ASCII is never escaped
  assert_eq!(string("~ascii~", true), r#""~ascii~""#);
}
