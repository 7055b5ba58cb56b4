use alloc::{string::{String, ToString}, vec::Vec};

use crate::{Type, JsonError, Value, Policy, Sequence, Mapping};

impl<P: Policy> From<Type> for Value<P> {
  /// The zero value of a type.
  fn from(kind: Type) -> Self {
    match kind {
      Type::Null => Value::Null,
      Type::Bool => Value::Bool(false),
      Type::Integer => Value::Integer(0),
      Type::Float => Value::Float(0.0),
      Type::String => Value::String(String::new()),
      Type::Array => Value::array(),
      Type::Object => Value::object(),
    }
  }
}

impl<P: Policy> From<bool> for Value<P> {
  fn from(bool: bool) -> Self {
    Value::Bool(bool)
  }
}

macro_rules! from_integer {
  ($($ty: ty),*) => {
    $(
      impl<P: Policy> From<$ty> for Value<P> {
        fn from(integer: $ty) -> Self {
          Value::Integer(i64::from(integer))
        }
      }
    )*
  };
}
from_integer!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! try_from_integer {
  ($($ty: ty),*) => {
    $(
      impl<P: Policy> TryFrom<$ty> for Value<P> {
        type Error = JsonError;
        /// Fails if the integer exceeds the bounds of an `i64`.
        fn try_from(integer: $ty) -> Result<Self, JsonError> {
          i64::try_from(integer).map(Value::Integer).map_err(|_| JsonError::TypeError {
            expected: "integer within i64",
            found: Type::Integer,
          })
        }
      }
    )*
  };
}
try_from_integer!(isize, u64, usize);

impl<P: Policy> From<f32> for Value<P> {
  fn from(float: f32) -> Self {
    Value::Float(f64::from(float))
  }
}

impl<P: Policy> From<f64> for Value<P> {
  fn from(float: f64) -> Self {
    Value::Float(float)
  }
}

impl<P: Policy> From<char> for Value<P> {
  fn from(char: char) -> Self {
    Value::String(char.to_string())
  }
}

impl<P: Policy> From<&str> for Value<P> {
  fn from(str: &str) -> Self {
    Value::String(str.to_string())
  }
}

impl<P: Policy> From<String> for Value<P> {
  fn from(string: String) -> Self {
    Value::String(string)
  }
}

impl<P: Policy, T: Into<Value<P>>> From<Option<T>> for Value<P> {
  fn from(option: Option<T>) -> Self {
    option.map_or(Value::Null, Into::into)
  }
}

impl<P: Policy> From<Vec<Value<P>>> for Value<P> {
  fn from(elements: Vec<Value<P>>) -> Self {
    elements.into_iter().collect()
  }
}

impl<P: Policy> FromIterator<Value<P>> for Value<P> {
  /// Collect an array.
  fn from_iter<I: IntoIterator<Item = Value<P>>>(iter: I) -> Self {
    let mut array = P::Array::default();
    for element in iter {
      array.push(element);
    }
    Value::Array(array)
  }
}

impl<P: Policy, K: Into<String>> FromIterator<(K, Value<P>)> for Value<P> {
  /// Collect an object, where later members overwrite earlier members with the same key.
  fn from_iter<I: IntoIterator<Item = (K, Value<P>)>>(iter: I) -> Self {
    let mut object = P::Object::default();
    for (key, value) in iter {
      object.insert(key.into(), value);
    }
    Value::Object(object)
  }
}

/// A type which may be extracted from a [`Value`].
pub trait FromValue<'a, P: Policy>: Sized {
  /// Extract from a value, converting between integers and floats as needed.
  fn from_value(value: &'a Value<P>) -> Option<Self>;
  /// Extract from a value, requiring its type exactly match.
  fn from_value_exact(value: &'a Value<P>) -> Result<Self, JsonError>;
}

impl<'a, P: Policy> FromValue<'a, P> for bool {
  fn from_value(value: &'a Value<P>) -> Option<Self> {
    value.as_bool().ok()
  }
  fn from_value_exact(value: &'a Value<P>) -> Result<Self, JsonError> {
    value.as_bool()
  }
}

impl<'a, P: Policy> FromValue<'a, P> for i64 {
  fn from_value(value: &'a Value<P>) -> Option<Self> {
    value.as_integer().ok()
  }
  fn from_value_exact(value: &'a Value<P>) -> Result<Self, JsonError> {
    match value {
      Value::Integer(integer) => Ok(*integer),
      _ => Err(value.type_error("integer")),
    }
  }
}

impl<'a, P: Policy> FromValue<'a, P> for f64 {
  fn from_value(value: &'a Value<P>) -> Option<Self> {
    value.as_float().ok()
  }
  fn from_value_exact(value: &'a Value<P>) -> Result<Self, JsonError> {
    match value {
      Value::Float(float) => Ok(*float),
      _ => Err(value.type_error("float")),
    }
  }
}

macro_rules! from_value_integer {
  ($($ty: ty),*) => {
    $(
      impl<'a, P: Policy> FromValue<'a, P> for $ty {
        fn from_value(value: &'a Value<P>) -> Option<Self> {
          <$ty>::try_from(value.as_integer().ok()?).ok()
        }
        fn from_value_exact(value: &'a Value<P>) -> Result<Self, JsonError> {
          <$ty>::try_from(i64::from_value_exact(value)?)
            .map_err(|_| value.type_error(concat!("integer within ", stringify!($ty))))
        }
      }
    )*
  };
}
from_value_integer!(i8, i16, i32, isize, u8, u16, u32, u64, usize);

impl<'a, P: Policy> FromValue<'a, P> for &'a str {
  fn from_value(value: &'a Value<P>) -> Option<Self> {
    value.as_str().ok()
  }
  fn from_value_exact(value: &'a Value<P>) -> Result<Self, JsonError> {
    value.as_str()
  }
}

impl<'a, P: Policy> FromValue<'a, P> for String {
  fn from_value(value: &'a Value<P>) -> Option<Self> {
    value.as_str().ok().map(str::to_string)
  }
  fn from_value_exact(value: &'a Value<P>) -> Result<Self, JsonError> {
    value.as_str().map(str::to_string)
  }
}

impl<'a, P: Policy> FromValue<'a, P> for &'a Value<P> {
  fn from_value(value: &'a Value<P>) -> Option<Self> {
    Some(value)
  }
  fn from_value_exact(value: &'a Value<P>) -> Result<Self, JsonError> {
    Ok(value)
  }
}

#[cfg(test)]
use crate::Ordered;

#[test]
fn test_from() {
  type V = Value<Ordered>;
  assert!(matches!(V::from(true), Value::Bool(true)));
  assert!(matches!(V::from(-3i8), Value::Integer(-3)));
  assert!(matches!(V::from(u32::MAX), Value::Integer(4_294_967_295)));
  assert!(matches!(V::try_from(u64::MAX), Err(JsonError::TypeError { .. })));
  assert!(matches!(V::try_from(7usize), Ok(Value::Integer(7))));
  assert!(matches!(V::from(0.5f32), Value::Float(_)));
  assert_eq!(V::from('x'), "x");
  assert_eq!(V::from(String::from("y")), "y");
  assert!(V::from(None::<i32>).is_null());
  assert_eq!(V::from(Some(2)), 2);

  for kind in [Type::Null, Type::Bool, Type::Integer, Type::Float, Type::String] {
    assert_eq!(V::from(kind).kind(), kind);
  }
  assert_eq!(V::from(Type::Array).len(), Ok(0));
  assert_eq!(V::from(Type::Object).len(), Ok(0));

  let object =
    [("a", V::from(1)), ("b", V::from(2)), ("a", V::from(3))].into_iter().collect::<V>();
  assert_eq!(object.len(), Ok(2));
  assert_eq!(object.member("a"), Ok(&V::from(3)));
}

#[test]
fn test_get_value() {
  type V = Value<Ordered>;
  let float = V::Float(2.5);
  assert_eq!(float.get_value::<i64>(), Some(2));
  assert_eq!(float.get_value::<f64>(), Some(2.5));
  assert_eq!(float.get_value::<bool>(), None);
  assert_eq!(float.get_value::<&str>(), None);

  let integer = V::Integer(300);
  assert_eq!(integer.get_value::<f64>(), Some(300.0));
  assert_eq!(integer.get_value::<u8>(), None);
  assert_eq!(integer.get_value::<u16>(), Some(300));
  assert_eq!(V::Integer(-1).get_value::<u64>(), None);

  assert_eq!(V::from("s").get_value::<String>(), Some("s".to_string()));
}

#[test]
fn test_get() {
  type V = Value<Ordered>;
  assert_eq!(V::Integer(3).get::<i64>(), Ok(3));
  assert!(V::Integer(3).get::<f64>().is_err());
  assert!(V::Float(3.0).get::<i64>().is_err());
  assert_eq!(V::Float(3.0).get::<f64>(), Ok(3.0));
  assert_eq!(V::from("s").get::<&str>(), Ok("s"));
  assert_eq!(
    V::Integer(1).get::<&str>(),
    Err(JsonError::TypeError { expected: "string", found: Type::Integer })
  );
  assert!(matches!(V::Integer(300).get::<u8>(), Err(JsonError::TypeError { .. })));
  assert_eq!(V::Integer(300).get::<u32>(), Ok(300));
  assert!(V::Bool(false).get::<&V>().unwrap().is_bool());
}
