use core::fmt;
use alloc::string::String;

use crate::{Type, JsonError};

mod policy;
pub use policy::*;
mod cmp;
mod from;
pub use from::FromValue;
mod container;
pub use container::{Iter, IterMut};

/// A JSON value.
///
/// Arrays and objects are stored within the containers chosen by the [`Policy`]. The default
/// policy, [`Ordered`], preserves the order of an object's members.
pub enum Value<P: Policy = Ordered> {
  /// The `null` unit value.
  Null,
  /// A boolean.
  Bool(bool),
  /// An integer.
  Integer(i64),
  /// A float.
  Float(f64),
  /// A string.
  String(String),
  /// An array.
  Array(P::Array),
  /// An object.
  Object(P::Object),
}

impl<P: Policy> Default for Value<P> {
  #[inline(always)]
  fn default() -> Self {
    Value::Null
  }
}

impl<P: Policy> Clone for Value<P> {
  fn clone(&self) -> Self {
    match self {
      Value::Null => Value::Null,
      Value::Bool(bool) => Value::Bool(*bool),
      Value::Integer(integer) => Value::Integer(*integer),
      Value::Float(float) => Value::Float(*float),
      Value::String(string) => Value::String(string.clone()),
      Value::Array(array) => Value::Array(array.clone()),
      Value::Object(object) => Value::Object(object.clone()),
    }
  }
}

impl<P: Policy> fmt::Debug for Value<P> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Null => f.write_str("Null"),
      Value::Bool(bool) => f.debug_tuple("Bool").field(bool).finish(),
      Value::Integer(integer) => f.debug_tuple("Integer").field(integer).finish(),
      Value::Float(float) => f.debug_tuple("Float").field(float).finish(),
      Value::String(string) => f.debug_tuple("String").field(string).finish(),
      Value::Array(array) => f.debug_tuple("Array").field(array).finish(),
      Value::Object(object) => f.debug_tuple("Object").field(object).finish(),
    }
  }
}

impl<P: Policy> Value<P> {
  /// An empty array.
  #[must_use]
  pub fn array() -> Self {
    Value::Array(P::Array::default())
  }

  /// An empty object.
  #[must_use]
  pub fn object() -> Self {
    Value::Object(P::Object::default())
  }

  /// The type of this value.
  #[must_use]
  pub fn kind(&self) -> Type {
    match self {
      Value::Null => Type::Null,
      Value::Bool(_) => Type::Bool,
      Value::Integer(_) => Type::Integer,
      Value::Float(_) => Type::Float,
      Value::String(_) => Type::String,
      Value::Array(_) => Type::Array,
      Value::Object(_) => Type::Object,
    }
  }

  /// The name of this value's type.
  #[must_use]
  pub fn type_name(&self) -> &'static str {
    self.kind().name()
  }

  /// If this value is `null`.
  #[must_use]
  pub fn is_null(&self) -> bool {
    matches!(self, Value::Null)
  }
  /// If this value is a boolean.
  #[must_use]
  pub fn is_bool(&self) -> bool {
    matches!(self, Value::Bool(_))
  }
  /// If this value is an integer.
  #[must_use]
  pub fn is_integer(&self) -> bool {
    matches!(self, Value::Integer(_))
  }
  /// If this value is a float.
  #[must_use]
  pub fn is_float(&self) -> bool {
    matches!(self, Value::Float(_))
  }
  /// If this value is an integer or a float.
  #[must_use]
  pub fn is_number(&self) -> bool {
    matches!(self, Value::Integer(_) | Value::Float(_))
  }
  /// If this value is a string.
  #[must_use]
  pub fn is_string(&self) -> bool {
    matches!(self, Value::String(_))
  }
  /// If this value is an array.
  #[must_use]
  pub fn is_array(&self) -> bool {
    matches!(self, Value::Array(_))
  }
  /// If this value is an object.
  #[must_use]
  pub fn is_object(&self) -> bool {
    matches!(self, Value::Object(_))
  }
  /// If this value is neither an array nor an object.
  #[must_use]
  pub fn is_primitive(&self) -> bool {
    !(self.is_array() || self.is_object())
  }

  #[inline(always)]
  pub(crate) fn type_error(&self, expected: &'static str) -> JsonError {
    JsonError::TypeError { expected, found: self.kind() }
  }

  /// Extract a value, converting between integers and floats as needed.
  ///
  /// Returns `None` if this value's type can't be converted into `T`.
  #[must_use]
  pub fn get_value<'a, T: FromValue<'a, P>>(&'a self) -> Option<T> {
    T::from_value(self)
  }

  /// Extract a value, requiring this value's type exactly match `T`.
  pub fn get<'a, T: FromValue<'a, P>>(&'a self) -> Result<T, JsonError> {
    T::from_value_exact(self)
  }

  /// This value as a boolean.
  pub fn as_bool(&self) -> Result<bool, JsonError> {
    match self {
      Value::Bool(bool) => Ok(*bool),
      _ => Err(self.type_error("boolean")),
    }
  }

  /// This value as an integer.
  ///
  /// Floats are truncated towards zero, saturating at the bounds of `i64`.
  #[allow(clippy::cast_possible_truncation)]
  pub fn as_integer(&self) -> Result<i64, JsonError> {
    match self {
      Value::Integer(integer) => Ok(*integer),
      Value::Float(float) => Ok(*float as i64),
      _ => Err(self.type_error("number")),
    }
  }

  /// This value as a float.
  #[allow(clippy::cast_precision_loss)]
  pub fn as_float(&self) -> Result<f64, JsonError> {
    match self {
      Value::Integer(integer) => Ok(*integer as f64),
      Value::Float(float) => Ok(*float),
      _ => Err(self.type_error("number")),
    }
  }

  /// This value as a string.
  pub fn as_str(&self) -> Result<&str, JsonError> {
    match self {
      Value::String(string) => Ok(string),
      _ => Err(self.type_error("string")),
    }
  }

  /// This value as a mutable string.
  pub fn as_string_mut(&mut self) -> Result<&mut String, JsonError> {
    match self {
      Value::String(string) => Ok(string),
      _ => Err(self.type_error("string")),
    }
  }

  /// This value as an array.
  pub fn as_array(&self) -> Result<&P::Array, JsonError> {
    match self {
      Value::Array(array) => Ok(array),
      _ => Err(self.type_error("array")),
    }
  }

  /// This value as a mutable array.
  pub fn as_array_mut(&mut self) -> Result<&mut P::Array, JsonError> {
    match self {
      Value::Array(array) => Ok(array),
      _ => Err(self.type_error("array")),
    }
  }

  /// This value as an object.
  pub fn as_object(&self) -> Result<&P::Object, JsonError> {
    match self {
      Value::Object(object) => Ok(object),
      _ => Err(self.type_error("object")),
    }
  }

  /// This value as a mutable object.
  pub fn as_object_mut(&mut self) -> Result<&mut P::Object, JsonError> {
    match self {
      Value::Object(object) => Ok(object),
      _ => Err(self.type_error("object")),
    }
  }

  /// Take this value, leaving `null` in its place.
  #[must_use]
  pub fn take(&mut self) -> Self {
    core::mem::take(self)
  }

  /// Reset this value to the zero value of its type.
  ///
  /// Strings and containers are emptied, numbers are zeroed, and booleans become `false`.
  pub fn clear(&mut self) {
    match self {
      Value::Null => {}
      Value::Bool(bool) => *bool = false,
      Value::Integer(integer) => *integer = 0,
      Value::Float(float) => *float = 0.0,
      Value::String(string) => string.clear(),
      Value::Array(array) => array.clear(),
      Value::Object(object) => object.clear(),
    }
  }
}

#[test]
fn test_kinds() {
  let values: [(Value, Type); 7] = [
    (Value::Null, Type::Null),
    (Value::Bool(true), Type::Bool),
    (Value::Integer(1), Type::Integer),
    (Value::Float(1.5), Type::Float),
    (Value::String("a".to_string()), Type::String),
    (Value::array(), Type::Array),
    (Value::object(), Type::Object),
  ];
  for (value, kind) in values {
    assert_eq!(value.kind(), kind);
    assert_eq!(value.type_name(), kind.name());
    assert_eq!(value.is_primitive(), !matches!(kind, Type::Array | Type::Object));
    assert_eq!(value.is_number(), matches!(kind, Type::Integer | Type::Float));
  }
  assert!(Value::<Ordered>::default().is_null());
}

#[test]
fn test_strict_accessors() {
  let value = Value::<Ordered>::Integer(5);
  assert_eq!(value.as_integer(), Ok(5));
  assert_eq!(value.as_float(), Ok(5.0));
  assert_eq!(
    value.as_str(),
    Err(JsonError::TypeError { expected: "string", found: Type::Integer })
  );
  assert!(value.as_bool().is_err());
  assert!(value.as_array().is_err());
  assert!(value.as_object().is_err());

  assert_eq!(Value::<Ordered>::Float(-2.75).as_integer(), Ok(-2));
  assert_eq!(Value::<Ordered>::Bool(true).as_bool(), Ok(true));
  assert!(Value::<Ordered>::Null.as_integer().is_err());

  let mut value = Value::<Ordered>::String("abc".to_string());
  value.as_string_mut().unwrap().push('d');
  assert_eq!(value.as_str(), Ok("abcd"));
}

#[test]
fn test_take_and_clear() {
  let mut value = Value::<Ordered>::String("abc".to_string());
  let taken = value.take();
  assert!(value.is_null());
  assert_eq!(taken.as_str(), Ok("abc"));

  let mut values = [
    Value::<Ordered>::Bool(true),
    Value::Integer(3),
    Value::Float(3.5),
    Value::String("abc".to_string()),
    Value::Array(vec![Value::Null]),
  ];
  for value in &mut values {
    let kind = value.kind();
    value.clear();
    assert_eq!(value.kind(), kind);
    assert_eq!(*value, Value::from(kind));
  }
}
