use core::cmp::Ordering;

use crate::{Value, Policy, Sequence, Mapping};

/// The relative difference under which two floats are considered equal.
const RELATIVE_EPSILON: f64 = 1e-12;

/// If two floats are equal, tolerating the drift incurred by serializing and parsing them.
#[allow(clippy::float_cmp)]
pub(crate) fn nearly_equal(a: f64, b: f64) -> bool {
  if a == b {
    return true;
  }
  let difference = (a - b).abs();
  let largest = a.abs().max(b.abs());
  (difference <= f64::MIN_POSITIVE) || (difference <= (largest * RELATIVE_EPSILON))
}

#[inline(always)]
fn compare_floats(a: f64, b: f64) -> Option<Ordering> {
  if nearly_equal(a, b) { Some(Ordering::Equal) } else { a.partial_cmp(&b) }
}

/// Numbers are compared with a tolerance, with integers and floats comparable to each other.
///
/// Objects are equal if they have the same members, regardless of the order of their members.
impl<P: Policy> PartialEq for Value<P> {
  #[allow(clippy::cast_precision_loss)]
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Value::Null, Value::Null) => true,
      (Value::Bool(a), Value::Bool(b)) => a == b,
      (Value::Integer(a), Value::Integer(b)) => a == b,
      (Value::Integer(a), Value::Float(b)) | (Value::Float(b), Value::Integer(a)) => {
        nearly_equal(*a as f64, *b)
      }
      (Value::Float(a), Value::Float(b)) => nearly_equal(*a, *b),
      (Value::String(a), Value::String(b)) => a == b,
      (Value::Array(a), Value::Array(b)) => {
        (a.len() == b.len()) && a.iter().zip(b.iter()).all(|(a, b)| a == b)
      }
      (Value::Object(a), Value::Object(b)) => {
        (a.len() == b.len()) && a.iter().all(|(key, a)| b.get(key).is_some_and(|b| a == b))
      }
      _ => false,
    }
  }
}

/// Values of differing types are incomparable, except for integers and floats.
///
/// Arrays compare lexicographically by their elements, and objects by their members in iteration
/// order.
impl<P: Policy> PartialOrd for Value<P> {
  #[allow(clippy::cast_precision_loss)]
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    match (self, other) {
      (Value::Null, Value::Null) => Some(Ordering::Equal),
      (Value::Bool(a), Value::Bool(b)) => a.partial_cmp(b),
      (Value::Integer(a), Value::Integer(b)) => a.partial_cmp(b),
      (Value::Integer(a), Value::Float(b)) => compare_floats(*a as f64, *b),
      (Value::Float(a), Value::Integer(b)) => compare_floats(*a, *b as f64),
      (Value::Float(a), Value::Float(b)) => compare_floats(*a, *b),
      (Value::String(a), Value::String(b)) => a.partial_cmp(b),
      (Value::Array(a), Value::Array(b)) => a.iter().partial_cmp(b.iter()),
      (Value::Object(a), Value::Object(b)) => {
        if self == other {
          return Some(Ordering::Equal);
        }
        a.iter().partial_cmp(b.iter())
      }
      _ => None,
    }
  }
}

macro_rules! primitive_eq {
  ($($ty: ty => $variant: ident),* $(,)?) => {
    $(
      impl<P: Policy> PartialEq<$ty> for Value<P> {
        fn eq(&self, other: &$ty) -> bool {
          *self == Value::$variant((*other).into())
        }
      }
    )*
  };
}
primitive_eq!(bool => Bool, i64 => Integer, i32 => Integer, f64 => Float);

impl<P: Policy> PartialEq<str> for Value<P> {
  fn eq(&self, other: &str) -> bool {
    self.as_str().is_ok_and(|str| str == other)
  }
}

impl<P: Policy> PartialEq<&str> for Value<P> {
  fn eq(&self, other: &&str) -> bool {
    *self == **other
  }
}

#[test]
fn test_nearly_equal() {
  assert!(nearly_equal(0.1 + 0.2, 0.3));
  assert!(nearly_equal(1e300, 1e300 * (1.0 + 1e-15)));
  assert!(nearly_equal(0.0, -0.0));
  assert!(nearly_equal(f64::INFINITY, f64::INFINITY));
  assert!(!nearly_equal(1.0, 1.0001));
  assert!(!nearly_equal(f64::NAN, f64::NAN));
  assert!(!nearly_equal(1e-300, 2e-300));
}

#[cfg(test)]
use crate::Ordered;

#[test]
fn test_equality() {
  type V = Value<Ordered>;
  assert_eq!(V::Integer(3), V::Float(3.0));
  assert_eq!(V::Float(3.0), V::Integer(3));
  assert_ne!(V::Integer(3), V::Float(3.5));
  assert_ne!(V::Integer(1), V::Bool(true));
  assert_ne!(V::Null, V::Bool(false));
  assert_ne!(V::String("1".to_string()), V::Integer(1));

  assert_eq!(V::from(vec![V::from(1), V::from("a")]), V::from(vec![V::from(1.0), V::from("a")]));
  assert_ne!(V::from(vec![V::from(1), V::from("a")]), V::from(vec![V::from("a"), V::from(1)]));
  assert_ne!(V::from(vec![V::from(1)]), V::from(vec![V::from(1), V::Null]));

  // Member order doesn't affect equality
  let mut a = V::object();
  a.insert("x", 1).unwrap();
  a.insert("y", 2).unwrap();
  let mut b = V::object();
  b.insert("y", 2).unwrap();
  b.insert("x", 1).unwrap();
  assert_eq!(a, b);
  b.insert("x", 3).unwrap();
  assert_ne!(a, b);

  assert_eq!(V::from("abc"), "abc");
  assert_eq!(V::Integer(2), 2);
  assert_eq!(V::Float(2.0), 2i64);
  assert_eq!(V::Bool(true), true);
}

#[test]
fn test_ordering() {
  type V = Value<Ordered>;
  assert!(V::Integer(1) < V::Integer(2));
  assert!(V::Integer(1) < V::Float(1.5));
  assert!(V::Float(-0.5) < V::Integer(0));
  assert_eq!(V::Integer(2).partial_cmp(&V::Float(2.0)), Some(Ordering::Equal));
  assert!(V::from("abc") < V::from("abd"));
  assert!(V::Bool(false) < V::Bool(true));
  assert!(V::from(vec![V::from(1), V::from(2)]) < V::from(vec![V::from(1), V::from(3)]));
  assert!(V::from(vec![V::from(1)]) < V::from(vec![V::from(1), V::from(0)]));
  // Incompatible types are unordered
  assert_eq!(V::Integer(1).partial_cmp(&V::from("1")), None);
  assert_eq!(V::Null.partial_cmp(&V::Bool(false)), None);
}
