#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![cfg_attr(not(test), no_std)]

extern crate alloc;
#[cfg(all(feature = "std", not(test)))]
extern crate std;

use core::fmt;
use alloc::string::String;

pub mod io;
pub mod unicode;
mod hex;
mod lexer;
mod string;
mod number;
mod parser;
mod value;
mod serializer;

pub use io::{Source, Sink};
pub use lexer::{Token, Lexer};
pub use parser::ParseConfig;
pub use value::*;
pub use serializer::DumpConfig;

/// The type of a value.
///
/// https://datatracker.ietf.org/doc/html/rfc8259#section-3 defines all possible values. Unlike
/// RFC 8259, numbers are split into integers and floats.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Type {
  /// The `null` unit value.
  Null,
  /// A boolean.
  Bool,
  /// A number without a fractional part or an exponent which fits within an `i64`.
  Integer,
  /// Any other number.
  Float,
  /// A string.
  String,
  /// An array.
  Array,
  /// An object.
  Object,
}

impl Type {
  /// The name of this type, as used within error messages.
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Type::Null => "null",
      Type::Bool => "boolean",
      Type::Integer => "integer",
      Type::Float => "float",
      Type::String => "string",
      Type::Array => "array",
      Type::Object => "object",
    }
  }
}

impl fmt::Display for Type {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// The reason a document failed to parse.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ParseErrorKind {
  /// A character which cannot begin any token.
  UnexpectedCharacter(char),
  /// The source ended in the middle of a token or before the document was complete.
  UnexpectedEnd,
  /// `true`, `false`, or `null` was misspelled.
  InvalidLiteral,
  /// A raw control character (`U+0000 ..= U+001F`) was present within a string.
  ControlCharacter,
  /// A backslash was followed by a character which doesn't define an escape.
  InvalidEscape,
  /// A `\u` escape wasn't followed by four hexadecimal digits.
  InvalidHex,
  /// A UTF-16 surrogate escape was not part of a valid surrogate pair.
  LoneSurrogate,
  /// A number didn't follow the RFC 8259 number syntax.
  InvalidNumber,
  /// A number's magnitude was too large to be represented.
  NumberOutOfRange,
  /// A well-formed token appeared where the grammar doesn't allow it.
  UnexpectedToken {
    /// What the grammar allowed at this position.
    expected: &'static str,
    /// The token which was found.
    found: &'static str,
  },
  /// Content followed the document's value.
  TrailingContent,
  /// The document was nested deeper than the configured limit.
  TooDeep,
  /// The character source itself failed.
  Source(String),
}

impl fmt::Display for ParseErrorKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ParseErrorKind::UnexpectedCharacter(c) => write!(f, "unexpected character {c:?}"),
      ParseErrorKind::UnexpectedEnd => f.write_str("unexpected end of input"),
      ParseErrorKind::InvalidLiteral => f.write_str("invalid literal"),
      ParseErrorKind::ControlCharacter => f.write_str("unescaped control character in string"),
      ParseErrorKind::InvalidEscape => f.write_str("invalid escape sequence"),
      ParseErrorKind::InvalidHex => f.write_str("invalid hexadecimal digits in unicode escape"),
      ParseErrorKind::LoneSurrogate => f.write_str("unpaired UTF-16 surrogate"),
      ParseErrorKind::InvalidNumber => f.write_str("invalid number"),
      ParseErrorKind::NumberOutOfRange => f.write_str("number out of range"),
      ParseErrorKind::UnexpectedToken { expected, found } => {
        write!(f, "expected {expected}, found {found}")
      }
      ParseErrorKind::TrailingContent => f.write_str("trailing content after the document"),
      ParseErrorKind::TooDeep => f.write_str("document nested too deeply"),
      ParseErrorKind::Source(e) => write!(f, "character source failed: {e}"),
    }
  }
}

/// An error incurred when parsing.
///
/// Parsing never recovers from an error, so this is the first error encountered.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ParseError {
  /// Why parsing failed.
  pub kind: ParseErrorKind,
  /// The amount of characters consumed from the source when the error was detected.
  pub offset: usize,
}

impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} at character {}", self.kind, self.offset)
  }
}

impl core::error::Error for ParseError {}

/// An error from working with JSON.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum JsonError {
  /// The document could not be parsed.
  Parse(ParseError),
  /// Operation could not be performed given the value's type.
  TypeError {
    /// What the operation required.
    expected: &'static str,
    /// The type of the value the operation was attempted on.
    found: Type,
  },
  /// The key, or index, was not present within the container.
  InvalidKey,
  /// The position does not belong to the addressed container.
  InvalidIterator,
}

impl fmt::Display for JsonError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      JsonError::Parse(e) => fmt::Display::fmt(e, f),
      JsonError::TypeError { expected, found } => {
        write!(f, "type error: expected {expected}, found {found}")
      }
      JsonError::InvalidKey => f.write_str("invalid key"),
      JsonError::InvalidIterator => f.write_str("invalid iterator"),
    }
  }
}

impl core::error::Error for JsonError {
  fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
    match self {
      JsonError::Parse(e) => Some(e),
      _ => None,
    }
  }
}

impl From<ParseError> for JsonError {
  fn from(e: ParseError) -> Self {
    JsonError::Parse(e)
  }
}

#[test]
fn test_error_messages() {
  let e = ParseError { kind: ParseErrorKind::UnexpectedCharacter('x'), offset: 3 };
  assert_eq!(e.to_string(), "unexpected character 'x' at character 3");
  let e = JsonError::from(e);
  assert!(core::error::Error::source(&e).is_some());
  assert_eq!(
    JsonError::TypeError { expected: "string", found: Type::Integer }.to_string(),
    "type error: expected string, found integer"
  );
}
