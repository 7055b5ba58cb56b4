use core::fmt;
use alloc::{string::String, vec::Vec};

use crate::{
  io::{Sink, FmtSink},
  value::{Iter, Value, Policy, Sequence, Mapping},
};

mod number;
mod string;

/// The significant digits floats are written with by default.
const DEFAULT_PRECISION: usize = 16;

/// Configuration for serialization.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DumpConfig {
  /// The amount of `indent_char` to indent each level of nesting by.
  ///
  /// If zero, the document is written compactly, without any whitespace.
  pub indent: usize,
  /// The character to indent with.
  pub indent_char: char,
  /// If every character outside of ASCII should be written as an escape sequence.
  pub escape_unicode: bool,
  /// The significant digits floats are written with, within `1 ..= 17`.
  pub precision: usize,
}

impl Default for DumpConfig {
  fn default() -> Self {
    Self::compact()
  }
}

impl DumpConfig {
  /// Write documents compactly.
  #[must_use]
  pub const fn compact() -> Self {
    Self { indent: 0, indent_char: ' ', escape_unicode: false, precision: DEFAULT_PRECISION }
  }

  /// Write documents with each element on its own line, indented by `indent` spaces per level.
  #[must_use]
  pub const fn pretty(indent: usize) -> Self {
    let mut res = Self::compact();
    res.indent = indent;
    res
  }

  /// Indent with this character.
  #[must_use]
  pub const fn with_indent_char(mut self, indent_char: char) -> Self {
    self.indent_char = indent_char;
    self
  }

  /// Escape every character outside of ASCII.
  #[must_use]
  pub const fn with_escape_unicode(mut self, escape_unicode: bool) -> Self {
    self.escape_unicode = escape_unicode;
    self
  }

  /// Write floats with this many significant digits, clamped to `1 ..= 17`.
  #[must_use]
  pub const fn with_precision(mut self, precision: usize) -> Self {
    self.precision = if precision < 1 {
      1
    } else if precision > number::MAX_PRECISION {
      number::MAX_PRECISION
    } else {
      precision
    };
    self
  }
}

/// A serializer of a single value into a sink.
struct Serializer<'config, S: Sink> {
  sink: S,
  config: &'config DumpConfig,
}

impl<S: Sink> Serializer<'_, S> {
  #[inline(always)]
  fn pretty(&self) -> bool {
    self.config.indent > 0
  }

  fn write_indent(&mut self, depth: usize) -> Result<(), S::Error> {
    for _ in 0 .. (self.config.indent * depth) {
      self.sink.write_char(self.config.indent_char)?;
    }
    Ok(())
  }

  fn dump<P: Policy>(&mut self, value: &Value<P>, depth: usize) -> Result<(), S::Error> {
    match value {
      Value::Null => self.sink.write_str("null"),
      Value::Bool(true) => self.sink.write_str("true"),
      Value::Bool(false) => self.sink.write_str("false"),
      Value::Integer(integer) => number::write_integer(&mut self.sink, *integer),
      Value::Float(float) => number::write_float(&mut self.sink, *float, self.config.precision),
      Value::String(str) => string::write_string(&mut self.sink, str, self.config.escape_unicode),
      Value::Array(array) => {
        self.dump_container(Iter::<P>::Array(array.iter()), ['[', ']'], depth)
      }
      Value::Object(object) => {
        self.dump_container(Iter::<P>::Object(object.iter()), ['{', '}'], depth)
      }
    }
  }

  fn dump_container<P: Policy>(
    &mut self,
    items: Iter<'_, P>,
    [open, close]: [char; 2],
    depth: usize,
  ) -> Result<(), S::Error> {
    let mut items = items.peekable();
    self.sink.write_char(open)?;
    if items.peek().is_none() {
      return self.sink.write_char(close);
    }

    let pretty = self.pretty();
    if pretty {
      self.sink.write_char('\n')?;
    }
    let mut first = true;
    for (key, value) in items {
      if !first {
        self.sink.write_char(',')?;
        if pretty {
          self.sink.write_char('\n')?;
        }
      }
      first = false;

      if pretty {
        self.write_indent(depth + 1)?;
      }
      if let Some(key) = key {
        string::write_string(&mut self.sink, key, self.config.escape_unicode)?;
        self.sink.write_str(if pretty { ": " } else { ":" })?;
      }
      self.dump(value, depth + 1)?;
    }
    if pretty {
      self.sink.write_char('\n')?;
      self.write_indent(depth)?;
    }
    self.sink.write_char(close)
  }
}

impl<P: Policy> Value<P> {
  /// Write this value into a sink.
  pub fn dump_to<S: Sink>(&self, sink: S, config: &DumpConfig) -> Result<(), S::Error> {
    log::trace!("dumping a value of type {} with {config:?}", self.kind());
    let config = config.with_precision(config.precision);
    Serializer { sink, config: &config }.dump(self, 0)
  }

  /// Serialize this value into a string.
  #[must_use]
  pub fn dump_with(&self, config: &DumpConfig) -> String {
    let mut res = String::new();
    match self.dump_to(&mut res, config) {
      Ok(()) => {}
      Err(e) => match e {},
    }
    res
  }

  /// Serialize this value into a string, compactly.
  #[must_use]
  pub fn dump(&self) -> String {
    self.dump_with(&DumpConfig::compact())
  }

  /// Serialize this value into a string, indented by `indent` spaces per level of nesting.
  #[must_use]
  pub fn pretty(&self, indent: usize) -> String {
    self.dump_with(&DumpConfig::pretty(indent))
  }

  /// Serialize this value into UTF-16 code units.
  #[must_use]
  pub fn dump_utf16(&self, config: &DumpConfig) -> Vec<u16> {
    let mut res = Vec::new();
    match self.dump_to(&mut res, config) {
      Ok(()) => {}
      Err(e) => match e {},
    }
    res
  }

  /// Serialize this value into a writer, as UTF-8.
  #[cfg(feature = "std")]
  pub fn write_to<W: std::io::Write>(&self, writer: W, config: &DumpConfig) -> std::io::Result<()> {
    self.dump_to(crate::io::IoSink(writer), config)
  }
}

/// Serializes the value.
///
/// The formatter's width is used as the indent, its fill as the indent character, and its
/// precision as the significant digits floats are written with. The alternate flag escapes every
/// character outside of ASCII. `format!("{value:4}")` will accordingly pretty-print the value.
impl<P: Policy> fmt::Display for Value<P> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let config = DumpConfig {
      indent: f.width().unwrap_or(0),
      indent_char: f.fill(),
      escape_unicode: f.alternate(),
      precision: f.precision().unwrap_or(DEFAULT_PRECISION),
    };
    self.dump_to(FmtSink(f), &config)
  }
}

#[cfg(test)]
use crate::{Ordered, Sorted};

#[cfg(test)]
type V = Value<Ordered>;

#[cfg(test)]
fn document() -> V {
  let mut value = V::object();
  value.insert("name", "willow").unwrap();
  value.insert("list", V::from(vec![V::from(1), V::from(2.5), V::Null])).unwrap();
  value.insert("empty", V::array()).unwrap();
  value.member_mut("nested").unwrap().insert("flag", true).unwrap();
  value
}

#[test]
fn test_compact() {
  assert_eq!(
    document().dump(),
    r#"{"name":"willow","list":[1,2.5,null],"empty":[],"nested":{"flag":true}}"#
  );
  assert_eq!(V::Null.dump(), "null");
  assert_eq!(V::from(false).dump(), "false");
  assert_eq!(V::object().pretty(2), "{}");
  assert_eq!(V::Float(1_000_000_000.0).dump(), "1e+09");
  assert_eq!(V::Float(123.456).dump(), "123.456");
}

#[test]
fn test_pretty() {
  let expected = r#"{
  "name": "willow",
  "list": [
    1,
    2.5,
    null
  ],
  "empty": [],
  "nested": {
    "flag": true
  }
}"#;
  assert_eq!(document().pretty(2), expected);
  assert_eq!(
    document().dump_with(&DumpConfig::pretty(1).with_indent_char('\t')),
    expected.replace("  ", "\t")
  );
}

#[test]
fn test_dump_is_idempotent() {
  let value = document();
  assert_eq!(value.dump(), value.dump());
  assert_eq!(value.pretty(4), value.pretty(4));
}

#[test]
fn test_round_trip() {
  let mut value = document();
  value.insert("unicode", "\u{0}\u{e9}\u{1f600}\"\\/").unwrap();
  let floats = [-1.25e10, f64::MIN_POSITIVE, 1.5e308, 1.0 / 3.0, 5e-324, f64::MAX, f64::MIN];
  value.insert("floats", floats.into_iter().map(V::from).collect::<V>()).unwrap();
  value.insert("integers", V::from(vec![V::from(i64::MIN), V::from(i64::MAX)])).unwrap();

  for config in [
    DumpConfig::compact(),
    DumpConfig::pretty(3),
    DumpConfig::pretty(1).with_indent_char('\t').with_escape_unicode(true),
  ] {
    let str = value.dump_with(&config);
    assert_eq!(V::parse(&str).unwrap(), value, "{str}");
    let units = value.dump_utf16(&config);
    assert_eq!(String::from_utf16(&units).unwrap(), str);
  }
}

#[test]
fn test_largest_floats_round_trip() {
  for float in [f64::MAX, f64::MIN] {
    for precision in 1 ..= 17 {
      let str = V::Float(float).dump_with(&DumpConfig::compact().with_precision(precision));
      let parsed = V::parse(&str).unwrap();
      assert!(parsed.is_float(), "{str}");
      assert_eq!(parsed.as_float().unwrap().signum(), float.signum());
    }
    // At the maximum precision, the float is exactly recovered
    let str = V::Float(float).dump_with(&DumpConfig::compact().with_precision(17));
    assert_eq!(V::parse(&str).unwrap().as_float().unwrap().to_bits(), float.to_bits());
  }
  let parsed = V::parse("1.7976931348623157e308").unwrap().as_float().unwrap();
  assert_eq!(parsed.to_bits(), f64::MAX.to_bits());
}

#[test]
fn test_unicode_round_trip() {
  let value = V::from("\u{1f600}");
  let escaped = value.dump_with(&DumpConfig::compact().with_escape_unicode(true));
  assert_eq!(escaped, r#""\ud83d\ude00""#);
  assert_eq!(V::parse(&escaped).unwrap(), value);
}

#[test]
fn test_sorted_dump() {
  let value = Value::<Sorted>::parse(r#"{"b":1,"c":2,"a":{"z":0,"y":1}}"#).unwrap();
  assert_eq!(value.dump(), r#"{"a":{"y":1,"z":0},"b":1,"c":2}"#);
}

#[test]
fn test_precision() {
  let value = V::from(core::f64::consts::PI);
  assert_eq!(value.dump_with(&DumpConfig::compact().with_precision(3)), "3.14");
  assert_eq!(DumpConfig::compact().with_precision(0).precision, 1);
  assert_eq!(DumpConfig::compact().with_precision(100).precision, 17);
}

#[test]
fn test_display() {
  let value = document();
  assert_eq!(value.to_string(), value.dump());
  assert_eq!(format!("{value:2}"), value.pretty(2));
  assert_eq!(format!("{value:_>1}"), value.dump_with(&DumpConfig::pretty(1).with_indent_char('_')));
  assert_eq!(format!("{:.3}", V::from(core::f64::consts::PI)), "3.14");
  assert_eq!(format!("{:#}", V::from("\u{e9}")), r#""\u00e9""#);
}

#[cfg(feature = "std")]
#[test]
fn test_write_to() {
  let mut bytes = vec![];
  document().write_to(&mut bytes, &DumpConfig::compact()).unwrap();
  assert_eq!(String::from_utf8(bytes).unwrap(), document().dump());
}
