#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![cfg_attr(not(test), no_std)]

use core::fmt;

use embedded_io::{Read, Write};
use willow_json::{
  Source, Sink,
  io::{InvalidUtf8, decode_utf8},
};

/// An error from a [`ReadAdapter`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ReadAdapterError<E> {
  /// The reader failed.
  Read(E),
  /// The bytes read were not valid UTF-8.
  InvalidUtf8,
}

impl<E> From<InvalidUtf8> for ReadAdapterError<E> {
  fn from(_: InvalidUtf8) -> Self {
    ReadAdapterError::InvalidUtf8
  }
}

impl<E: fmt::Debug> fmt::Display for ReadAdapterError<E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReadAdapterError::Read(e) => write!(f, "reader failed: {e:?}"),
      ReadAdapterError::InvalidUtf8 => fmt::Display::fmt(&InvalidUtf8, f),
    }
  }
}

/// An adapter from [`embedded_io::Read`] to [`willow_json::Source`].
#[derive(Debug)]
pub struct ReadAdapter<R: Read> {
  reader: R,
}

impl<R: Read> From<R> for ReadAdapter<R> {
  fn from(reader: R) -> Self {
    Self { reader }
  }
}

impl<R: Read> ReadAdapter<R> {
  /// Take the reader back.
  pub fn into_inner(self) -> R {
    self.reader
  }

  #[inline(always)]
  fn next_byte(&mut self) -> Result<Option<u8>, ReadAdapterError<R::Error>> {
    let mut byte = [0; 1];
    // `embedded_io::Read` only yields zero bytes once the reader has ended
    match self.reader.read(&mut byte).map_err(ReadAdapterError::Read)? {
      0 => Ok(None),
      _ => Ok(Some(byte[0])),
    }
  }
}

impl<R: Read> Source for ReadAdapter<R> {
  type Error = ReadAdapterError<R::Error>;

  fn next_char(&mut self) -> Result<Option<char>, Self::Error> {
    let Some(first) = self.next_byte()? else { return Ok(None) };
    decode_utf8(first, || self.next_byte()).map(Some)
  }
}

/// An adapter from [`embedded_io::Write`] to [`willow_json::Sink`], writing UTF-8.
#[derive(Debug)]
pub struct WriteAdapter<W: Write> {
  writer: W,
}

impl<W: Write> From<W> for WriteAdapter<W> {
  fn from(writer: W) -> Self {
    Self { writer }
  }
}

impl<W: Write> WriteAdapter<W> {
  /// Take the writer back.
  pub fn into_inner(self) -> W {
    self.writer
  }
}

impl<W: Write> Sink for WriteAdapter<W> {
  type Error = W::Error;

  #[inline(always)]
  fn write_char(&mut self, c: char) -> Result<(), Self::Error> {
    self.writer.write_all(c.encode_utf8(&mut [0; 4]).as_bytes())
  }

  #[inline(always)]
  fn write_str(&mut self, str: &str) -> Result<(), Self::Error> {
    self.writer.write_all(str.as_bytes())
  }
}

#[test]
fn test_read() {
  use willow_json::{Ordered, Value, ParseErrorKind};

  const SERIALIZATION: &str = "{ \"hello\": \"good\u{e9}bye\", \"list\": [1, 2.5] }";

  let value = Value::<Ordered>::parse_source(ReadAdapter::from(SERIALIZATION.as_bytes())).unwrap();
  assert_eq!(value.member("hello").unwrap(), "good\u{e9}bye");
  assert_eq!(value.member("list").and_then(|list| list.at(1)).unwrap(), &Value::Float(2.5));

  let e = Value::<Ordered>::parse_source(ReadAdapter::from(&b"\"\xc3\""[..])).unwrap_err();
  assert!(matches!(e.kind, ParseErrorKind::Source(_)));
  // A truncated codepoint is also invalid
  let e = Value::<Ordered>::parse_source(ReadAdapter::from(&b"\"\xc3"[..])).unwrap_err();
  assert!(matches!(e.kind, ParseErrorKind::Source(_)));
}

#[test]
fn test_write() {
  use willow_json::{Ordered, Value, DumpConfig};

  let value = Value::<Ordered>::parse(r#"{"hello":["goodébye",1]}"#).unwrap();
  let expected = value.dump();

  let mut buf = [0; 64];
  let mut writer = WriteAdapter::from(&mut buf[..]);
  value.dump_to(&mut writer, &DumpConfig::compact()).unwrap();
  let written = 64 - writer.into_inner().len();
  assert_eq!(&buf[.. written], expected.as_bytes());

  // Writing into a buffer which is too small fails
  let mut buf = [0; 8];
  assert!(value.dump_to(WriteAdapter::from(&mut buf[..]), &DumpConfig::compact()).is_err());
}
