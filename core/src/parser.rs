use core::{str::FromStr, ffi::CStr};

use crate::{
  ParseErrorKind, ParseError,
  io::{Source, Utf8Source, Utf16Source},
  lexer::{Token, Lexer},
  Value, Policy, Sequence, Mapping,
};

/// Configuration for parsing.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct ParseConfig {
  /// The maximum depth arrays and objects may be nested to, or `None` for no limit.
  ///
  /// The parser is recursive, so documents from untrusted sources should have a limit set to
  /// bound the stack usage.
  pub max_depth: Option<usize>,
}

impl ParseConfig {
  /// Limit how deeply arrays and objects may be nested.
  #[must_use]
  pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
    self.max_depth = Some(max_depth);
    self
  }
}

/// A recursive-descent parser over a lexer's tokens.
struct Parser<S: Source> {
  lexer: Lexer<S>,
  max_depth: Option<usize>,
  depth: usize,
}

impl<S: Source> Parser<S> {
  fn unexpected(&self, token: &Token, expected: &'static str) -> ParseError {
    self.lexer.error(match token {
      Token::EndOfInput => ParseErrorKind::UnexpectedEnd,
      token => ParseErrorKind::UnexpectedToken { expected, found: token.describe() },
    })
  }

  fn enter(&mut self) -> Result<(), ParseError> {
    self.depth += 1;
    if self.max_depth.is_some_and(|max_depth| self.depth > max_depth) {
      Err(self.lexer.error(ParseErrorKind::TooDeep))?;
    }
    Ok(())
  }

  fn parse_value<P: Policy>(&mut self, token: Token) -> Result<Value<P>, ParseError> {
    Ok(match token {
      Token::Null => Value::Null,
      Token::True => Value::Bool(true),
      Token::False => Value::Bool(false),
      Token::Integer(integer) => Value::Integer(integer),
      Token::Float(float) => Value::Float(float),
      Token::String(string) => Value::String(string),
      Token::BeginArray => self.parse_array()?,
      Token::BeginObject => self.parse_object()?,
      token => Err(self.unexpected(&token, "a value"))?,
    })
  }

  fn parse_array<P: Policy>(&mut self) -> Result<Value<P>, ParseError> {
    self.enter()?;
    let mut array = P::Array::default();
    let mut token = self.lexer.scan()?;
    if token != Token::EndArray {
      loop {
        array.push(self.parse_value(token)?);
        token = self.lexer.scan()?;
        if token != Token::ValueSeparator {
          break;
        }
        token = self.lexer.scan()?;
      }
      if token != Token::EndArray {
        Err(self.unexpected(&token, "`,` or `]`"))?;
      }
    }
    self.depth -= 1;
    Ok(Value::Array(array))
  }

  fn parse_object<P: Policy>(&mut self) -> Result<Value<P>, ParseError> {
    self.enter()?;
    let mut object = P::Object::default();
    let mut token = self.lexer.scan()?;
    if token != Token::EndObject {
      loop {
        let key = match token {
          Token::String(key) => key,
          token => Err(self.unexpected(&token, "a string key"))?,
        };
        let separator = self.lexer.scan()?;
        if separator != Token::NameSeparator {
          Err(self.unexpected(&separator, "`:`"))?;
        }
        let value = self.lexer.scan()?;
        let value = self.parse_value(value)?;
        // A duplicated key overwrites the prior value, in the prior position
        object.insert(key, value);

        token = self.lexer.scan()?;
        if token != Token::ValueSeparator {
          break;
        }
        token = self.lexer.scan()?;
      }
      if token != Token::EndObject {
        Err(self.unexpected(&token, "`,` or `}`"))?;
      }
    }
    self.depth -= 1;
    Ok(Value::Object(object))
  }

  /// Parse a complete document, requiring the source end after it.
  fn parse_document<P: Policy>(mut self) -> Result<Value<P>, ParseError> {
    let token = self.lexer.scan()?;
    let value = self.parse_value(token)?;
    if self.lexer.scan()? != Token::EndOfInput {
      Err(self.lexer.error(ParseErrorKind::TrailingContent))?;
    }
    Ok(value)
  }
}

impl<P: Policy> Value<P> {
  /// Parse a document from a character source.
  pub fn parse_source_with<S: Source>(source: S, config: &ParseConfig) -> Result<Self, ParseError> {
    log::trace!("parsing a document with {config:?}");
    let parser = Parser { lexer: Lexer::new(source), max_depth: config.max_depth, depth: 0 };
    parser.parse_document().inspect_err(|e| {
      log::debug!("failed to parse a document: {e}");
    })
  }

  /// Parse a document from a character source, without a nesting limit.
  pub fn parse_source<S: Source>(source: S) -> Result<Self, ParseError> {
    Self::parse_source_with(source, &ParseConfig::default())
  }

  /// Parse a document from a string.
  pub fn parse(str: &str) -> Result<Self, ParseError> {
    Self::parse_source(str.chars())
  }

  /// Parse a document from UTF-8 bytes.
  pub fn parse_slice(bytes: &[u8]) -> Result<Self, ParseError> {
    Self::parse_source(Utf8Source::new(bytes))
  }

  /// Parse a document from UTF-8 bytes, ending at the first NUL byte.
  pub fn parse_nul_terminated(bytes: &[u8]) -> Result<Self, ParseError> {
    Self::parse_source(Utf8Source::nul_terminated(bytes))
  }

  /// Parse a document from a C string.
  pub fn parse_c_str(str: &CStr) -> Result<Self, ParseError> {
    Self::parse_source(Utf8Source::from(str))
  }

  /// Parse a document from UTF-16 code units.
  pub fn parse_utf16(units: &[u16]) -> Result<Self, ParseError> {
    Self::parse_source(Utf16Source::new(units))
  }

  /// Parse a document from a reader yielding UTF-8.
  ///
  /// The reader is read a byte at a time, so unbuffered readers should be wrapped in a
  /// [`std::io::BufReader`].
  #[cfg(feature = "std")]
  pub fn parse_reader<R: std::io::Read>(reader: R) -> Result<Self, ParseError> {
    Self::parse_source(crate::io::IoSource::new(reader))
  }
}

impl<P: Policy> FromStr for Value<P> {
  type Err = ParseError;
  fn from_str(str: &str) -> Result<Self, ParseError> {
    Self::parse(str)
  }
}

#[cfg(test)]
use crate::{Ordered, Type};

#[cfg(test)]
fn parse(str: &str) -> Result<Value, ParseErrorKind> {
  Value::parse(str).map_err(|e| e.kind)
}

#[test]
fn test_scalars() {
  assert_eq!(parse("null"), Ok(Value::Null));
  assert_eq!(parse(" true "), Ok(Value::Bool(true)));
  assert_eq!(parse("false"), Ok(Value::Bool(false)));
  assert_eq!(parse("-12"), Ok(Value::Integer(-12)));
  assert!(parse("1.5").unwrap().is_float());
  assert_eq!(parse(r#""a\nb""#), Ok(Value::from("a\nb")));
}

#[test]
fn test_arrays() {
  let array = parse("[3,1,2]").unwrap();
  assert_eq!(array.len(), Ok(3));
  assert_eq!(array.at(0), Ok(&Value::Integer(3)));
  assert_eq!(array.at(1), Ok(&Value::Integer(1)));
  assert_eq!(array.at(2), Ok(&Value::Integer(2)));

  assert_eq!(parse("[]").unwrap().len(), Ok(0));
  assert_eq!(parse(" [ ] ").unwrap().len(), Ok(0));
  let nested = parse(r#"[[], [[1]], {"a": [true]}]"#).unwrap();
  assert_eq!(nested.at(1).and_then(|v| v.at(0)).and_then(|v| v.at(0)), Ok(&Value::Integer(1)));
  assert_eq!(
    nested.at(2).and_then(|v| v.member("a")).and_then(|v| v.at(0)),
    Ok(&Value::Bool(true))
  );
}

#[test]
fn test_objects() {
  let object = parse(r#"{ "b" : 1, "a": "x", "c": null }"#).unwrap();
  assert_eq!(object.len(), Ok(3));
  let keys = object.iter().unwrap().map(|(key, _)| key.unwrap()).collect::<Vec<_>>();
  assert_eq!(keys, ["b", "a", "c"]);
  assert_eq!(parse("{}").unwrap().kind(), Type::Object);
}

#[test]
fn test_duplicate_keys() {
  let object = parse(r#"{"a":1,"b":0,"a":2}"#).unwrap();
  assert_eq!(object.len(), Ok(2));
  assert_eq!(object.member("a"), Ok(&Value::Integer(2)));
  let members = object.iter().unwrap().map(|(key, value)| (key.unwrap(), value.clone()));
  assert_eq!(
    members.collect::<Vec<_>>(),
    vec![("a", Value::Integer(2)), ("b", Value::Integer(0))]
  );
}

#[test]
fn test_malformed_documents() {
  for (str, kind) in [
    ("", ParseErrorKind::UnexpectedEnd),
    (r#"{"a":}"#, ParseErrorKind::UnexpectedToken { expected: "a value", found: "`}`" }),
    ("[1,2,]", ParseErrorKind::UnexpectedToken { expected: "a value", found: "`]`" }),
    (r#""\u12""#, ParseErrorKind::UnexpectedEnd),
    (r#""unterminated"#, ParseErrorKind::UnexpectedEnd),
    (r#"{"a":1"#, ParseErrorKind::UnexpectedEnd),
    ("[1 2]", ParseErrorKind::UnexpectedToken { expected: "`,` or `]`", found: "a number" }),
    (r#"{"a" 1}"#, ParseErrorKind::UnexpectedToken { expected: "`:`", found: "a number" }),
    ("{1:1}", ParseErrorKind::UnexpectedToken { expected: "a string key", found: "a number" }),
    (r#"{"a":1,}"#, ParseErrorKind::UnexpectedToken { expected: "a string key", found: "`}`" }),
    (r#"["a"}"#, ParseErrorKind::UnexpectedToken { expected: "`,` or `]`", found: "`}`" }),
    (r#"{"a":1]"#, ParseErrorKind::UnexpectedToken { expected: "`,` or `}`", found: "`]`" }),
    ("[,1]", ParseErrorKind::UnexpectedToken { expected: "a value", found: "`,`" }),
    ("]", ParseErrorKind::UnexpectedToken { expected: "a value", found: "`]`" }),
    ("[1]]", ParseErrorKind::TrailingContent),
    ("1 2", ParseErrorKind::TrailingContent),
    ("{} x", ParseErrorKind::UnexpectedCharacter('x')),
  ] {
    assert_eq!(parse(str), Err(kind), "{str}");
  }
}

#[test]
fn test_error_offset() {
  let e = Value::<Ordered>::parse("[1, 2,\n x]").unwrap_err();
  assert_eq!(e.kind, ParseErrorKind::UnexpectedCharacter('x'));
  assert_eq!(e.offset, 9);
}

#[test]
fn test_max_depth() {
  let nested = "[[[[1]]]]";
  assert!(parse(nested).is_ok());
  let config = ParseConfig::default().with_max_depth(4);
  assert!(Value::<Ordered>::parse_source_with(nested.chars(), &config).is_ok());
  let config = ParseConfig::default().with_max_depth(3);
  assert_eq!(
    Value::<Ordered>::parse_source_with(nested.chars(), &config).map_err(|e| e.kind),
    Err(ParseErrorKind::TooDeep)
  );
  // Siblings don't accumulate depth
  let config = ParseConfig::default().with_max_depth(2);
  assert!(Value::<Ordered>::parse_source_with(r#"[{"a":1},[],{}]"#.chars(), &config).is_ok());
  // Yet an empty container nested within them still counts
  assert_eq!(
    Value::<Ordered>::parse_source_with(r#"[{"a":[]},[],{}]"#.chars(), &config).map_err(|e| e.kind),
    Err(ParseErrorKind::TooDeep)
  );
  let config = ParseConfig::default().with_max_depth(3);
  assert!(Value::<Ordered>::parse_source_with(r#"[{"a":[]},[],{}]"#.chars(), &config).is_ok());
}

#[test]
fn test_entry_points() {
  let expected = parse(r#"{"é":[1,"😀"]}"#).unwrap();
  let str = "{\"\u{e9}\":[1,\"\u{1f600}\"]}";
  assert_eq!(Value::<Ordered>::parse(str).unwrap(), expected);
  assert_eq!(Value::<Ordered>::parse_slice(str.as_bytes()).unwrap(), expected);
  assert_eq!(str.parse::<Value>().unwrap(), expected);

  let mut nul_terminated = str.as_bytes().to_vec();
  nul_terminated.extend(b"\0trailing");
  assert_eq!(Value::<Ordered>::parse_nul_terminated(&nul_terminated).unwrap(), expected);
  let c_str = CStr::from_bytes_until_nul(&nul_terminated).unwrap();
  assert_eq!(Value::<Ordered>::parse_c_str(c_str).unwrap(), expected);

  let units = str.encode_utf16().collect::<Vec<_>>();
  assert_eq!(Value::<Ordered>::parse_utf16(&units).unwrap(), expected);

  #[cfg(feature = "std")]
  assert_eq!(Value::<Ordered>::parse_reader(str.as_bytes()).unwrap(), expected);
}

#[test]
fn test_source_errors() {
  let e = Value::<Ordered>::parse_slice(b"[\"\xff\"]").unwrap_err();
  assert!(matches!(e.kind, ParseErrorKind::Source(_)));
  assert_eq!(e.offset, 2);
  let e = Value::<Ordered>::parse_utf16(&[u16::from(b'"'), 0xd800, u16::from(b'"')]).unwrap_err();
  assert!(matches!(e.kind, ParseErrorKind::Source(_)));
}
