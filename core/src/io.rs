//! Character sources to parse from and character sinks to serialize into.

use core::{
  fmt,
  convert::Infallible,
  ffi::CStr,
  char::{DecodeUtf16, DecodeUtf16Error},
  iter::Copied,
  slice,
};
use alloc::{string::String, vec::Vec};

/// A source of characters.
///
/// Sources MUST NOT rewind and MUST eventually yield `Ok(None)` for any finite input.
pub trait Source {
  /// The type for errors when reading characters.
  type Error: fmt::Display;

  /// Read the next character, or `None` if the input has ended.
  fn next_char(&mut self) -> Result<Option<char>, Self::Error>;
}

impl<S: ?Sized + Source> Source for &mut S {
  type Error = S::Error;

  #[inline(always)]
  fn next_char(&mut self) -> Result<Option<char>, Self::Error> {
    (**self).next_char()
  }
}

impl Source for core::str::Chars<'_> {
  type Error = Infallible;

  #[inline(always)]
  fn next_char(&mut self) -> Result<Option<char>, Self::Error> {
    Ok(self.next())
  }
}

/// The bytes did not form valid UTF-8.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct InvalidUtf8;

impl fmt::Display for InvalidUtf8 {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("invalid UTF-8")
  }
}

impl core::error::Error for InvalidUtf8 {}

/// Calculate the length of the non-ASCII UTF-8 codepoint from its first byte.
///
/// Returns a value within `2 ..= 4`, which is only meaningful if the byte is a valid leading byte.
#[inline(always)]
fn non_ascii_utf8_codepoint_len(b: u8) -> usize {
  // The amount of zeroes in a `u8` will be positive and fit within a `usize`
  ((!(b | 0b0100_0000)) | 0b1111).leading_zeros() as usize
}

/// Decode a UTF-8 encoded character, given its first byte and a way to read the bytes after it.
///
/// This is exposed so byte-oriented readers outside of this crate may be adapted into a
/// [`Source`].
pub fn decode_utf8<E: From<InvalidUtf8>>(
  first: u8,
  mut next_byte: impl FnMut() -> Result<Option<u8>, E>,
) -> Result<char, E> {
  if first.is_ascii() {
    return Ok(char::from(first));
  }

  let len = non_ascii_utf8_codepoint_len(first);
  let mut codepoint = [first, 0, 0, 0];
  for byte in &mut codepoint[1 .. len] {
    *byte = next_byte()?.ok_or(InvalidUtf8)?;
  }
  core::str::from_utf8(&codepoint[.. len])
    .ok()
    .and_then(|str| str.chars().next())
    .ok_or_else(|| InvalidUtf8.into())
}

/// A source over UTF-8 encoded bytes.
#[derive(Clone, Debug)]
pub struct Utf8Source<'bytes> {
  bytes: &'bytes [u8],
}

impl<'bytes> Utf8Source<'bytes> {
  /// Read characters from the bytes, until their end.
  #[must_use]
  pub fn new(bytes: &'bytes [u8]) -> Self {
    Self { bytes }
  }

  /// Read characters from the bytes, until the first NUL byte (or their end).
  #[must_use]
  pub fn nul_terminated(bytes: &'bytes [u8]) -> Self {
    let len = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    Self { bytes: &bytes[.. len] }
  }

  #[inline(always)]
  fn next_byte(&mut self) -> Option<u8> {
    let (first, rest) = self.bytes.split_first()?;
    self.bytes = rest;
    Some(*first)
  }
}

impl<'bytes> From<&'bytes CStr> for Utf8Source<'bytes> {
  fn from(str: &'bytes CStr) -> Self {
    Self::new(str.to_bytes())
  }
}

impl Source for Utf8Source<'_> {
  type Error = InvalidUtf8;

  #[inline(always)]
  fn next_char(&mut self) -> Result<Option<char>, Self::Error> {
    let Some(first) = self.next_byte() else { return Ok(None) };
    decode_utf8(first, || Ok(self.next_byte())).map(Some)
  }
}

/// A source over UTF-16 code units.
///
/// Surrogate pairs within the code units are combined. An unpaired surrogate is an error.
#[derive(Clone, Debug)]
pub struct Utf16Source<'units> {
  units: DecodeUtf16<Copied<slice::Iter<'units, u16>>>,
}

impl<'units> Utf16Source<'units> {
  /// Read characters from the code units.
  #[must_use]
  pub fn new(units: &'units [u16]) -> Self {
    Self { units: char::decode_utf16(units.iter().copied()) }
  }
}

impl Source for Utf16Source<'_> {
  type Error = DecodeUtf16Error;

  #[inline(always)]
  fn next_char(&mut self) -> Result<Option<char>, Self::Error> {
    self.units.next().transpose()
  }
}

/// An error from an [`IoSource`].
#[cfg(feature = "std")]
#[derive(Debug)]
pub enum IoSourceError {
  /// The reader failed.
  Io(std::io::Error),
  /// The bytes read were not valid UTF-8.
  InvalidUtf8,
}

#[cfg(feature = "std")]
impl From<InvalidUtf8> for IoSourceError {
  fn from(_: InvalidUtf8) -> Self {
    IoSourceError::InvalidUtf8
  }
}

#[cfg(feature = "std")]
impl fmt::Display for IoSourceError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      IoSourceError::Io(e) => fmt::Display::fmt(e, f),
      IoSourceError::InvalidUtf8 => fmt::Display::fmt(&InvalidUtf8, f),
    }
  }
}

#[cfg(feature = "std")]
impl core::error::Error for IoSourceError {
  fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
    match self {
      IoSourceError::Io(e) => Some(e),
      IoSourceError::InvalidUtf8 => None,
    }
  }
}

/// A source over a [`std::io::Read`] yielding UTF-8.
///
/// This reads a byte at a time, so unbuffered readers (such as files) should be wrapped in a
/// [`std::io::BufReader`].
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSource<R: std::io::Read> {
  reader: R,
}

#[cfg(feature = "std")]
impl<R: std::io::Read> IoSource<R> {
  /// Read characters from the reader.
  pub fn new(reader: R) -> Self {
    Self { reader }
  }

  /// Take the reader back.
  pub fn into_inner(self) -> R {
    self.reader
  }

  fn next_byte(&mut self) -> Result<Option<u8>, IoSourceError> {
    let mut byte = [0; 1];
    loop {
      match self.reader.read(&mut byte) {
        Ok(0) => return Ok(None),
        Ok(_) => return Ok(Some(byte[0])),
        Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
        Err(e) => Err(IoSourceError::Io(e))?,
      }
    }
  }
}

#[cfg(feature = "std")]
impl<R: std::io::Read> Source for IoSource<R> {
  type Error = IoSourceError;

  fn next_char(&mut self) -> Result<Option<char>, Self::Error> {
    let Some(first) = self.next_byte()? else { return Ok(None) };
    decode_utf8(first, || self.next_byte()).map(Some)
  }
}

/// A sink for characters.
///
/// The order of writes is significant and MUST be preserved.
pub trait Sink {
  /// The type for errors when writing characters.
  type Error;

  /// Write a single character.
  fn write_char(&mut self, c: char) -> Result<(), Self::Error>;

  /// Write a run of characters.
  #[inline(always)]
  fn write_str(&mut self, str: &str) -> Result<(), Self::Error> {
    for c in str.chars() {
      self.write_char(c)?;
    }
    Ok(())
  }
}

impl<S: ?Sized + Sink> Sink for &mut S {
  type Error = S::Error;

  #[inline(always)]
  fn write_char(&mut self, c: char) -> Result<(), Self::Error> {
    (**self).write_char(c)
  }

  #[inline(always)]
  fn write_str(&mut self, str: &str) -> Result<(), Self::Error> {
    (**self).write_str(str)
  }
}

impl Sink for String {
  type Error = Infallible;

  #[inline(always)]
  fn write_char(&mut self, c: char) -> Result<(), Self::Error> {
    self.push(c);
    Ok(())
  }

  #[inline(always)]
  fn write_str(&mut self, str: &str) -> Result<(), Self::Error> {
    self.push_str(str);
    Ok(())
  }
}

/// Writes UTF-8.
impl Sink for Vec<u8> {
  type Error = Infallible;

  #[inline(always)]
  fn write_char(&mut self, c: char) -> Result<(), Self::Error> {
    self.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes());
    Ok(())
  }

  #[inline(always)]
  fn write_str(&mut self, str: &str) -> Result<(), Self::Error> {
    self.extend_from_slice(str.as_bytes());
    Ok(())
  }
}

/// Writes UTF-16 code units.
impl Sink for Vec<u16> {
  type Error = Infallible;

  #[inline(always)]
  fn write_char(&mut self, c: char) -> Result<(), Self::Error> {
    self.extend_from_slice(c.encode_utf16(&mut [0; 2]));
    Ok(())
  }

  #[inline(always)]
  fn write_str(&mut self, str: &str) -> Result<(), Self::Error> {
    self.extend(str.encode_utf16());
    Ok(())
  }
}

/// A sink into a [`core::fmt::Write`].
#[derive(Debug)]
pub struct FmtSink<W: fmt::Write>(pub W);

impl<W: fmt::Write> Sink for FmtSink<W> {
  type Error = fmt::Error;

  #[inline(always)]
  fn write_char(&mut self, c: char) -> Result<(), Self::Error> {
    self.0.write_char(c)
  }

  #[inline(always)]
  fn write_str(&mut self, str: &str) -> Result<(), Self::Error> {
    self.0.write_str(str)
  }
}

/// A sink into a [`std::io::Write`], writing UTF-8.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSink<W: std::io::Write>(pub W);

#[cfg(feature = "std")]
impl<W: std::io::Write> Sink for IoSink<W> {
  type Error = std::io::Error;

  #[inline(always)]
  fn write_char(&mut self, c: char) -> Result<(), Self::Error> {
    self.0.write_all(c.encode_utf8(&mut [0; 4]).as_bytes())
  }

  #[inline(always)]
  fn write_str(&mut self, str: &str) -> Result<(), Self::Error> {
    self.0.write_all(str.as_bytes())
  }
}

#[cfg(test)]
fn collect<S: Source>(mut source: S) -> Result<String, S::Error> {
  let mut res = String::new();
  while let Some(c) = source.next_char()? {
    res.push(c);
  }
  Ok(res)
}

#[test]
fn test_non_ascii_utf8_codepoint_len() {
  for (c, len) in [('\u{80}', 2), ('\u{7ff}', 2), ('\u{800}', 3), ('\u{ffff}', 3), ('\u{10000}', 4)]
  {
    assert_eq!(non_ascii_utf8_codepoint_len(c.to_string().as_bytes()[0]), len);
  }
}

#[test]
fn test_utf8_source() {
  let str = "a\u{e9}\u{4e16}\u{1f600}";
  assert_eq!(collect(Utf8Source::new(str.as_bytes())).unwrap(), str);

  // Truncated and invalid codepoints
  assert_eq!(collect(Utf8Source::new(&[b'a', 0xe4, 0xb8])), Err(InvalidUtf8));
  assert_eq!(collect(Utf8Source::new(&[0x80])), Err(InvalidUtf8));
  assert_eq!(collect(Utf8Source::new(&[0xed, 0xa0, 0x80])), Err(InvalidUtf8));
}

#[test]
fn test_nul_terminated_source() {
  assert_eq!(collect(Utf8Source::nul_terminated(b"[1]\0garbage")).unwrap(), "[1]");
  assert_eq!(collect(Utf8Source::nul_terminated(b"[1]")).unwrap(), "[1]");
  assert_eq!(collect(Utf8Source::from(c"true")).unwrap(), "true");
}

#[test]
fn test_utf16_source() {
  let str = "x\u{1f600}y";
  let units = str.encode_utf16().collect::<Vec<_>>();
  assert_eq!(collect(Utf16Source::new(&units)).unwrap(), str);
  assert!(collect(Utf16Source::new(&[0xd83d, u16::from(b'y')])).is_err());
}

#[cfg(feature = "std")]
#[test]
fn test_io_source() {
  let str = "{\"\u{4e16}\": null}";
  assert_eq!(collect(IoSource::new(str.as_bytes())).unwrap(), str);
  assert!(matches!(collect(IoSource::new(&[0xff_u8][..])), Err(IoSourceError::InvalidUtf8)));
}

#[cfg(feature = "std")]
#[test]
fn test_sinks() {
  let mut utf8 = Vec::<u8>::new();
  let mut utf16 = Vec::<u16>::new();
  let mut io = IoSink(Vec::<u8>::new());
  let mut fmt = FmtSink(String::new());
  for str in ["a", "\u{e9}", "\u{1f600}"] {
    utf8.write_str(str).unwrap();
    utf16.write_str(str).unwrap();
    Sink::write_str(&mut io, str).unwrap();
    Sink::write_str(&mut fmt, str).unwrap();
  }
  assert_eq!(utf8, "a\u{e9}\u{1f600}".as_bytes());
  assert_eq!(String::from_utf16(&utf16).unwrap(), "a\u{e9}\u{1f600}");
  assert_eq!(io.0, utf8);
  assert_eq!(fmt.0.as_bytes(), utf8);
}
