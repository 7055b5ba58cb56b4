use willow_json::{Type, Ordered, DumpConfig};
use serde_json::Value;

/*
  Tests for equivalence between a `willow_json::Value` and a `serde_json::Value` parsed from the
  same encoding. We iterate over every value within the `serde_json::Value`, locating the
  corresponding value within the `willow_json::Value` by its path from the root.
*/

#[derive(Clone, Debug)]
enum PathElement {
  Field(String),
  Array(usize),
}

fn descend<'a>(
  mut value: &'a willow_json::Value<Ordered>,
  path: &[PathElement],
) -> &'a willow_json::Value<Ordered> {
  for element in path {
    value = match element {
      PathElement::Field(field) => value.member(field).unwrap(),
      PathElement::Array(i) => value.at(*i).unwrap(),
    };
  }
  value
}

pub fn check_float(number: f64, expected: f64) {
  // 0.1% of the smaller number
  let allowed_deviation = number.abs().min(expected.abs()) / 1000.0;
  assert!((number - expected).abs() <= allowed_deviation, "{number} != {expected}");
}

fn check_number(number: &willow_json::Value<Ordered>, expected: &serde_json::Number) {
  if let Some(expected) = expected.as_i64() {
    assert!(matches!(number.kind(), Type::Integer));
    assert_eq!(number.get::<i64>().unwrap(), expected);
  } else {
    // Floats, and integers which exceed an `i64`, are compared as floats
    check_float(number.as_float().unwrap(), expected.as_f64().unwrap());
  }
}

fn check_value_internal(
  root: &willow_json::Value<Ordered>,
  expected: &Value,
  path: &mut Vec<PathElement>,
) {
  let value = descend(root, path);
  match expected {
    Value::Null => assert!(matches!(value.kind(), Type::Null)),
    Value::Bool(bool) => assert_eq!(value.as_bool().unwrap(), *bool),
    Value::Number(number) => check_number(value, number),
    Value::String(str) => assert_eq!(value.as_str().unwrap(), str),
    Value::Array(array) => {
      assert!(matches!(value.kind(), Type::Array));
      assert_eq!(value.len().unwrap(), array.len());
      for (i, expected) in array.iter().enumerate() {
        path.push(PathElement::Array(i));
        check_value_internal(root, expected, path);
        path.pop();
      }
    }
    Value::Object(object) => {
      assert!(matches!(value.kind(), Type::Object));
      assert_eq!(value.len().unwrap(), object.len());
      for (field, expected) in object {
        path.push(PathElement::Field(field.clone()));
        check_value_internal(root, expected, path);
        path.pop();
      }
    }
  }
}

/// Check `willow-json` parses the encoding into the equivalent of `value`, and that what it
/// parsed survives being dumped and parsed again.
pub fn check_value(encoding: &[u8], value: &Value) {
  let parsed = willow_json::Value::<Ordered>::parse_slice(encoding).unwrap();
  check_value_internal(&parsed, value, &mut vec![]);

  let units = String::from_utf8(encoding.to_vec()).unwrap().encode_utf16().collect::<Vec<_>>();
  assert_eq!(willow_json::Value::<Ordered>::parse_utf16(&units).unwrap(), parsed);

  for config in [
    DumpConfig::compact(),
    DumpConfig::pretty(2),
    DumpConfig::pretty(1).with_indent_char('\t').with_escape_unicode(true),
  ] {
    let dumped = parsed.dump_with(&config);
    assert_eq!(willow_json::Value::<Ordered>::parse(&dumped).unwrap(), parsed);
  }
}

/// Check two `serde_json::Value`s are equivalent, comparing all numbers as floats.
pub fn check_values_equivalent(a: &Value, b: &Value) {
  match a {
    Value::Null | Value::Bool(_) | Value::String(_) => assert_eq!(a, b),
    Value::Number(number) => {
      check_float(number.as_f64().unwrap(), b.as_number().unwrap().as_f64().unwrap());
    }
    Value::Array(array) => {
      let b = b.as_array().unwrap();
      assert_eq!(array.len(), b.len());
      for (a, b) in array.iter().zip(b) {
        check_values_equivalent(a, b);
      }
    }
    Value::Object(object) => {
      let b = b.as_object().unwrap();
      assert_eq!(object.len(), b.len());
      for (key, value) in object {
        check_values_equivalent(value, &b[key]);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;
  use rand_core::{RngCore, OsRng};
  use super::*;

  #[allow(clippy::cast_possible_truncation)]
  fn random_string() -> String {
    let mut res = String::new();
    for _ in 0 .. (OsRng.next_u64() % 128) {
      if (OsRng.next_u64() % 2) == 1 {
        // ASCII
        res.push(char::from_u32((OsRng.next_u64() % 128) as u32).unwrap());
      } else {
        // Unicode
        res.push(loop {
          if let Some(char) = char::from_u32(OsRng.next_u64() as u32) {
            // Skip ASCII as those are intended to be included by the other branch
            // Skip the byte-order mark as implementations are allowed to ignore/reject it
            if char.is_ascii() || (char == '\u{feff}') {
              continue;
            }
            break char;
          }
        });
      }
    }
    res
  }

  fn random_value(depth: usize) -> Value {
    let modulus = if depth == 8 { 4 } else { 6 };
    match OsRng.next_u64() % modulus {
      0 => Value::Null,
      1 => Value::Bool((OsRng.next_u64() % 2) == 1),
      2 => Value::Number(match OsRng.next_u64() % 4 {
        0 => serde_json::Number::from(OsRng.next_u64() >> 1),
        1 => serde_json::Number::from(i64::try_from(OsRng.next_u64() >> 1).unwrap().wrapping_neg()),
        // Integers which exceed an `i64`
        2 => serde_json::Number::from(OsRng.next_u64() | (1 << 63)),
        3 => loop {
          if let Some(float) = serde_json::Number::from_f64(f64::from_bits(OsRng.next_u64())) {
            break float;
          }
        },
        _ => unreachable!(),
      }),
      3 => Value::String(random_string()),
      4 => Value::Array({
        let mut res = vec![];
        for _ in 0 .. (OsRng.next_u64() % 8) {
          res.push(random_value(depth + 1));
        }
        res
      }),
      5 => Value::Object({
        let mut res = serde_json::Map::new();
        for _ in 0 .. (OsRng.next_u64() % 8) {
          res.insert(random_string(), random_value(depth + 1));
        }
        res
      }),
      _ => unreachable!(),
    }
  }

  #[test]
  fn fuzz() {
    for i in 0 .. 100 {
      dbg!(i);
      let value = dbg!(random_value(0));
      let bytes = value.to_string().into_bytes();
      let bytes = bytes.as_slice();

      check_value(bytes, &value);

      // Check `serde_json` reads what we write as what it wrote
      let parsed = willow_json::Value::<Ordered>::parse_slice(bytes).unwrap();
      check_values_equivalent(&value, &serde_json::Value::from_str(&parsed.dump()).unwrap());
      check_values_equivalent(&value, &serde_json::Value::from_str(&parsed.pretty(4)).unwrap());
    }
  }

  #[test]
  fn acceptance() {
    // `serde_json` and `willow-json` should agree on what is, and isn't, JSON
    for encoding in [
      "", "  ", "nul", "[", "[[]", "[1,]", r#"{"a":1,}"#, r#"{"a" 1}"#, "[true false]", "[1] x",
      "[01]", "[1.]", "[.5]", "[1e]", "[-]", "[+1]", "[1e400]", r#"["\x"]"#, "[\"a\tb\"]",
      r#"["\u00"]"#, r#"["\ud800"]"#, r#"["\ud800A"]"#, "{}", "[]", " 1 ", r#""a""#,
      "[-0]", "[1e5]", "[0.5e-3]", "[1E+2]", "[1e-400]", r#"["😀"]"#, r#"["\/"]"#,
      r#"{"a":{"b":[null,false,{"c":"d"}]}}"#,
    ] {
      let expected = serde_json::Value::from_str(encoding);
      let parsed = willow_json::Value::<Ordered>::parse(encoding);
      assert_eq!(parsed.is_ok(), expected.is_ok(), "{encoding:?}");
      if let Ok(expected) = expected {
        check_value(encoding.as_bytes(), &expected);
      }
    }
  }
}
