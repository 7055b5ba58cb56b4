use core::ops::{Range, Index, IndexMut};
use alloc::string::String;

use crate::{JsonError, Value, Policy, Sequence, Mapping};

/// An iterator over the elements of an array or the members of an object.
///
/// Array elements are yielded with a key of `None`.
pub enum Iter<'a, P: Policy + 'a> {
  /// Iterating over an array.
  Array(<P::Array as Sequence<Value<P>>>::Iter<'a>),
  /// Iterating over an object.
  Object(<P::Object as Mapping<Value<P>>>::Iter<'a>),
}

impl<'a, P: Policy + 'a> Iterator for Iter<'a, P> {
  type Item = (Option<&'a str>, &'a Value<P>);

  fn next(&mut self) -> Option<Self::Item> {
    match self {
      Iter::Array(elements) => elements.next().map(|value| (None, value)),
      Iter::Object(members) => members.next().map(|(key, value)| (Some(key.as_str()), value)),
    }
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    match self {
      Iter::Array(elements) => elements.size_hint(),
      Iter::Object(members) => members.size_hint(),
    }
  }
}

impl<'a, P: Policy + 'a> DoubleEndedIterator for Iter<'a, P> {
  fn next_back(&mut self) -> Option<Self::Item> {
    match self {
      Iter::Array(elements) => elements.next_back().map(|value| (None, value)),
      Iter::Object(members) => {
        members.next_back().map(|(key, value)| (Some(key.as_str()), value))
      }
    }
  }
}

impl<'a, P: Policy + 'a> ExactSizeIterator for Iter<'a, P> {}

/// An iterator over the elements of an array or the members of an object, yielding mutable
/// references to the values.
///
/// Array elements are yielded with a key of `None`. Object keys can't be mutated.
pub enum IterMut<'a, P: Policy + 'a> {
  /// Iterating over an array.
  Array(<P::Array as Sequence<Value<P>>>::IterMut<'a>),
  /// Iterating over an object.
  Object(<P::Object as Mapping<Value<P>>>::IterMut<'a>),
}

impl<'a, P: Policy + 'a> Iterator for IterMut<'a, P> {
  type Item = (Option<&'a str>, &'a mut Value<P>);

  fn next(&mut self) -> Option<Self::Item> {
    match self {
      IterMut::Array(elements) => elements.next().map(|value| (None, value)),
      IterMut::Object(members) => {
        members.next().map(|(key, value)| (Some(key.as_str()), value))
      }
    }
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    match self {
      IterMut::Array(elements) => elements.size_hint(),
      IterMut::Object(members) => members.size_hint(),
    }
  }
}

impl<'a, P: Policy + 'a> DoubleEndedIterator for IterMut<'a, P> {
  fn next_back(&mut self) -> Option<Self::Item> {
    match self {
      IterMut::Array(elements) => elements.next_back().map(|value| (None, value)),
      IterMut::Object(members) => {
        members.next_back().map(|(key, value)| (Some(key.as_str()), value))
      }
    }
  }
}

impl<'a, P: Policy + 'a> ExactSizeIterator for IterMut<'a, P> {}

impl<P: Policy> Value<P> {
  /// The amount of elements within an array, or members within an object.
  pub fn len(&self) -> Result<usize, JsonError> {
    match self {
      Value::Array(array) => Ok(array.len()),
      Value::Object(object) => Ok(object.len()),
      _ => Err(self.type_error("array or object")),
    }
  }

  /// If this array, or object, is empty.
  pub fn is_empty(&self) -> Result<bool, JsonError> {
    self.len().map(|len| len == 0)
  }

  /// Iterate over the elements of an array, or the members of an object.
  pub fn iter(&self) -> Result<Iter<'_, P>, JsonError> {
    match self {
      Value::Array(array) => Ok(Iter::Array(array.iter())),
      Value::Object(object) => Ok(Iter::Object(object.iter())),
      _ => Err(self.type_error("array or object")),
    }
  }

  /// Iterate over the elements of an array, or the members of an object, mutably.
  pub fn iter_mut(&mut self) -> Result<IterMut<'_, P>, JsonError> {
    match self {
      Value::Array(array) => Ok(IterMut::Array(array.iter_mut())),
      Value::Object(object) => Ok(IterMut::Object(object.iter_mut())),
      _ => Err(self.type_error("array or object")),
    }
  }

  /// The element at this index within an array.
  pub fn at(&self, i: usize) -> Result<&Self, JsonError> {
    self.as_array()?.get(i).ok_or(JsonError::InvalidKey)
  }

  /// The element at this index within an array, mutably.
  ///
  /// If this value is `null`, it's replaced with an empty array. If the index is out of bounds,
  /// the array is extended with `null`s so the index is within bounds.
  pub fn at_mut(&mut self, i: usize) -> Result<&mut Self, JsonError> {
    if self.is_null() {
      *self = Self::array();
    }
    let array = self.as_array_mut()?;
    while array.len() <= i {
      array.push(Value::Null);
    }
    array.get_mut(i).ok_or(JsonError::InvalidKey)
  }

  /// The value of this member within an object.
  pub fn member(&self, key: &str) -> Result<&Self, JsonError> {
    self.as_object()?.get(key).ok_or(JsonError::InvalidKey)
  }

  /// The value of this member within an object, mutably.
  ///
  /// If this value is `null`, it's replaced with an empty object. If the member isn't present, it's
  /// inserted with a value of `null`.
  pub fn member_mut(&mut self, key: impl Into<String>) -> Result<&mut Self, JsonError> {
    if self.is_null() {
      *self = Self::object();
    }
    Ok(self.as_object_mut()?.get_or_insert_default(key.into()))
  }

  /// Find the value of a member within an object, if present.
  pub fn find(&self, key: &str) -> Result<Option<&Self>, JsonError> {
    Ok(self.as_object()?.get(key))
  }

  /// Find the value of a member within an object, mutably, if present.
  ///
  /// Unlike [`Value::member_mut`], this never inserts the member.
  pub fn find_mut(&mut self, key: &str) -> Result<Option<&mut Self>, JsonError> {
    Ok(self.as_object_mut()?.get_mut(key))
  }

  /// If this is an object with a member with this key.
  #[must_use]
  pub fn contains_key(&self, key: &str) -> bool {
    self.as_object().is_ok_and(|object| object.get(key).is_some())
  }

  /// Append an element to an array.
  ///
  /// If this value is `null`, it's replaced with an array.
  pub fn push(&mut self, value: impl Into<Self>) -> Result<(), JsonError> {
    if self.is_null() {
      *self = Self::array();
    }
    self.as_array_mut()?.push(value.into());
    Ok(())
  }

  /// Insert an element into an array at this index, shifting all elements after it.
  ///
  /// The index may equal the array's length, appending the element. If this value is `null`, it's
  /// replaced with an array.
  pub fn insert_at(&mut self, i: usize, value: impl Into<Self>) -> Result<(), JsonError> {
    if self.is_null() {
      *self = Self::array();
    }
    let array = self.as_array_mut()?;
    if i > array.len() {
      Err(JsonError::InvalidIterator)?;
    }
    array.insert(i, value.into());
    Ok(())
  }

  /// Insert a member into an object, returning the prior value of the member if it was present.
  ///
  /// If the member was present, it retains its position. If this value is `null`, it's replaced
  /// with an object.
  pub fn insert(
    &mut self,
    key: impl Into<String>,
    value: impl Into<Self>,
  ) -> Result<Option<Self>, JsonError> {
    if self.is_null() {
      *self = Self::object();
    }
    Ok(self.as_object_mut()?.insert(key.into(), value.into()))
  }

  /// Remove the element at this index from an array, returning it.
  pub fn erase_index(&mut self, i: usize) -> Result<Self, JsonError> {
    self.as_array_mut()?.remove(i).ok_or(JsonError::InvalidIterator)
  }

  /// Remove the elements within this range from an array.
  pub fn erase_range(&mut self, range: Range<usize>) -> Result<(), JsonError> {
    let array = self.as_array_mut()?;
    if (range.start > range.end) || (range.end > array.len()) {
      Err(JsonError::InvalidIterator)?;
    }
    array.remove_range(range.start, range.end);
    Ok(())
  }

  /// Remove a member from an object, returning its value if it was present.
  pub fn erase_key(&mut self, key: &str) -> Result<Option<Self>, JsonError> {
    match self {
      Value::Object(object) => Ok(object.remove(key)),
      _ => Err(JsonError::InvalidKey),
    }
  }
}

/// Panics if this isn't an array or the index is out of bounds.
///
/// [`Value::at`] is the fallible equivalent.
impl<P: Policy> Index<usize> for Value<P> {
  type Output = Self;
  fn index(&self, i: usize) -> &Self {
    match self.at(i) {
      Ok(value) => value,
      Err(e) => panic!("couldn't index a JSON value with {i}: {e}"),
    }
  }
}

/// Panics if this isn't an array or `null`.
///
/// As with [`Value::at_mut`], `null` becomes an array and the array is extended to the index.
impl<P: Policy> IndexMut<usize> for Value<P> {
  fn index_mut(&mut self, i: usize) -> &mut Self {
    match self.at_mut(i) {
      Ok(value) => value,
      Err(e) => panic!("couldn't index a JSON value with {i}: {e}"),
    }
  }
}

/// Panics if this isn't an object or the member isn't present.
///
/// [`Value::member`] is the fallible equivalent.
impl<P: Policy> Index<&str> for Value<P> {
  type Output = Self;
  fn index(&self, key: &str) -> &Self {
    match self.member(key) {
      Ok(value) => value,
      Err(e) => panic!("couldn't index a JSON value with {key:?}: {e}"),
    }
  }
}

/// Panics if this isn't an object or `null`.
///
/// As with [`Value::member_mut`], `null` becomes an object and a missing member is inserted.
impl<P: Policy> IndexMut<&str> for Value<P> {
  fn index_mut(&mut self, key: &str) -> &mut Self {
    match self.member_mut(key) {
      Ok(value) => value,
      Err(e) => panic!("couldn't index a JSON value with {key:?}: {e}"),
    }
  }
}

#[cfg(test)]
use crate::{Type, Ordered, Sorted};

#[test]
fn test_array_operations() {
  let mut value = Value::<Ordered>::Null;
  value.push(3).unwrap();
  value.push(1).unwrap();
  value.push("two").unwrap();
  assert_eq!(value.len(), Ok(3));
  assert_eq!(value.at(0), Ok(&Value::Integer(3)));
  assert_eq!(value.at(2).and_then(Value::as_str), Ok("two"));
  assert_eq!(value.at(3), Err(JsonError::InvalidKey));

  *value.at_mut(5).unwrap() = Value::Bool(true);
  assert_eq!(value.len(), Ok(6));
  assert!(value.at(4).unwrap().is_null());

  assert_eq!(value.erase_index(1), Ok(Value::Integer(1)));
  assert_eq!(value.erase_index(5), Err(JsonError::InvalidIterator));
  value.erase_range(1 .. 3).unwrap();
  assert_eq!(value.len(), Ok(3));
  assert_eq!(value.at(0), Ok(&Value::Integer(3)));
  assert!(value.at(1).unwrap().is_null());
  assert_eq!(value.at(2), Ok(&Value::Bool(true)));
  #[allow(clippy::reversed_empty_ranges)]
  let backwards = 2 .. 1;
  assert_eq!(value.erase_range(backwards), Err(JsonError::InvalidIterator));
  assert_eq!(value.erase_range(0 .. 4), Err(JsonError::InvalidIterator));
  assert!(!value.is_empty().unwrap());
}

#[test]
fn test_object_operations() {
  let mut value = Value::<Ordered>::Null;
  assert_eq!(value.insert("b", 1), Ok(None));
  assert_eq!(value.insert("a", 2), Ok(None));
  *value.member_mut("c").unwrap() = Value::from("three");
  assert_eq!(value.insert("b", 4), Ok(Some(Value::Integer(1))));

  assert_eq!(value.len(), Ok(3));
  assert_eq!(value.member("b"), Ok(&Value::Integer(4)));
  assert_eq!(value.member("z"), Err(JsonError::InvalidKey));
  assert_eq!(value.find("z"), Ok(None));
  assert!(value.contains_key("c"));
  assert!(!value.contains_key("z"));

  let keys = value.iter().unwrap().map(|(key, _)| key.unwrap()).collect::<Vec<_>>();
  assert_eq!(keys, ["b", "a", "c"]);

  assert_eq!(value.erase_key("a"), Ok(Some(Value::Integer(2))));
  assert_eq!(value.erase_key("a"), Ok(None));
  assert_eq!(value.len(), Ok(2));
}

#[test]
fn test_sorted_objects() {
  let mut value = Value::<Sorted>::object();
  for key in ["b", "c", "a"] {
    value.insert(key, Value::Null).unwrap();
  }
  let keys = value.iter().unwrap().map(|(key, _)| key.unwrap()).collect::<Vec<_>>();
  assert_eq!(keys, ["a", "b", "c"]);
}

#[test]
fn test_container_type_errors() {
  let mut object = Value::<Ordered>::object();
  // Array operations on an object
  assert!(matches!(object.at(0), Err(JsonError::TypeError { found: Type::Object, .. })));
  assert!(matches!(object.at_mut(0), Err(JsonError::TypeError { .. })));
  assert!(matches!(object.push(1), Err(JsonError::TypeError { .. })));
  assert!(matches!(object.erase_index(0), Err(JsonError::TypeError { .. })));
  assert!(matches!(object.erase_range(0 .. 0), Err(JsonError::TypeError { .. })));

  let mut array = Value::<Ordered>::array();
  assert!(matches!(array.member("a"), Err(JsonError::TypeError { found: Type::Array, .. })));
  assert!(matches!(array.member_mut("a"), Err(JsonError::TypeError { .. })));
  assert!(matches!(array.insert("a", 1), Err(JsonError::TypeError { .. })));
  assert_eq!(array.erase_key("a"), Err(JsonError::InvalidKey));
  assert!(array.is_empty().unwrap());

  let mut integer = Value::<Ordered>::Integer(1);
  assert!(matches!(integer.len(), Err(JsonError::TypeError { .. })));
  assert!(matches!(integer.iter(), Err(JsonError::TypeError { .. })));
  assert!(matches!(integer.push(1), Err(JsonError::TypeError { .. })));
  assert_eq!(integer.erase_key("a"), Err(JsonError::InvalidKey));
  // Null is not a container until it's written to
  assert!(matches!(Value::<Ordered>::Null.len(), Err(JsonError::TypeError { .. })));
}

#[test]
fn test_reverse_iteration() {
  let mut array = Value::<Ordered>::Null;
  for i in 0 .. 3 {
    array.push(i).unwrap();
  }
  let elements = array.iter().unwrap();
  assert_eq!(elements.len(), 3);
  let reversed = elements.rev().map(|(key, value)| (key, value.clone())).collect::<Vec<_>>();
  assert_eq!(
    reversed,
    vec![(None, Value::Integer(2)), (None, Value::Integer(1)), (None, Value::Integer(0))]
  );

  let document = r#"{"b":1,"a":2,"c":3}"#;
  let ordered = Value::<Ordered>::parse(document).unwrap();
  let keys = ordered.iter().unwrap().rev().map(|(key, _)| key.unwrap()).collect::<Vec<_>>();
  assert_eq!(keys, ["c", "a", "b"]);
  let sorted = Value::<Sorted>::parse(document).unwrap();
  let keys = sorted.iter().unwrap().rev().map(|(key, _)| key.unwrap()).collect::<Vec<_>>();
  assert_eq!(keys, ["c", "b", "a"]);

  // Both ends may be consumed from the same iterator
  let mut elements = array.iter().unwrap();
  assert_eq!(elements.next().map(|(_, value)| value), Some(&Value::Integer(0)));
  assert_eq!(elements.next_back().map(|(_, value)| value), Some(&Value::Integer(2)));
  assert_eq!(elements.len(), 1);
}

#[test]
fn test_mutable_iteration() {
  let mut array = Value::<Ordered>::parse("[1, 2, 3]").unwrap();
  for (key, value) in array.iter_mut().unwrap() {
    assert!(key.is_none());
    *value = Value::Integer(value.as_integer().unwrap() * 10);
  }
  assert_eq!(array, Value::<Ordered>::parse("[10, 20, 30]").unwrap());
  if let Some((_, last)) = array.iter_mut().unwrap().next_back() {
    *last = Value::Null;
  }
  assert!(array.at(2).unwrap().is_null());

  let mut object = Value::<Sorted>::parse(r#"{"b":"x","a":"y"}"#).unwrap();
  for (key, value) in object.iter_mut().unwrap() {
    value.as_string_mut().unwrap().push_str(key.unwrap());
  }
  assert_eq!(object.member("a").and_then(Value::as_str), Ok("ya"));
  assert_eq!(object.member("b").and_then(Value::as_str), Ok("xb"));

  assert!(matches!(Value::<Ordered>::Null.iter_mut(), Err(JsonError::TypeError { .. })));
  assert!(matches!(Value::<Ordered>::from("a").iter_mut(), Err(JsonError::TypeError { .. })));
}

#[test]
fn test_insert_at_and_find_mut() {
  let mut value = Value::<Ordered>::Null;
  value.insert_at(0, 2).unwrap();
  value.insert_at(0, 0).unwrap();
  value.insert_at(1, 1).unwrap();
  value.insert_at(3, 3).unwrap();
  assert_eq!(value, Value::<Ordered>::parse("[0, 1, 2, 3]").unwrap());
  assert_eq!(value.insert_at(5, 5), Err(JsonError::InvalidIterator));
  assert_eq!(value.len(), Ok(4));
  assert!(matches!(Value::<Ordered>::object().insert_at(0, 1), Err(JsonError::TypeError { .. })));

  let mut object = Value::<Ordered>::parse(r#"{"a":1}"#).unwrap();
  *object.find_mut("a").unwrap().unwrap() = Value::from("one");
  assert_eq!(object.member("a").and_then(Value::as_str), Ok("one"));
  // Unlike `member_mut`, a missing member isn't inserted
  assert_eq!(object.find_mut("b"), Ok(None));
  assert_eq!(object.len(), Ok(1));
  assert!(matches!(value.find_mut("a"), Err(JsonError::TypeError { .. })));
}

#[test]
fn test_indexing() {
  let mut value = Value::<Ordered>::Null;
  value["name"] = Value::from("willow");
  value["tags"][2] = Value::Bool(true);
  assert_eq!(value["name"].as_str(), Ok("willow"));
  assert_eq!(value["tags"].len(), Ok(3));
  assert!(value["tags"][0].is_null());
  assert_eq!(value["tags"][2], Value::Bool(true));
  let expected = r#"{"name":"willow","tags":[null,null,true]}"#;
  assert_eq!(value, Value::<Ordered>::parse(expected).unwrap());
}

#[test]
#[should_panic]
fn test_index_missing_member() {
  let value = Value::<Ordered>::parse(r#"{"a":1}"#).unwrap();
  let _ = &value["b"];
}

#[test]
#[should_panic]
fn test_index_out_of_bounds() {
  let value = Value::<Ordered>::parse("[1]").unwrap();
  let _ = &value[1];
}

#[test]
#[should_panic]
fn test_index_mut_mismatched_type() {
  let mut value = Value::<Ordered>::Integer(1);
  value["a"] = Value::Null;
}
