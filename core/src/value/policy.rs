use core::{fmt::Debug, hash::BuildHasher};
use alloc::{
  string::String,
  vec::Vec,
  collections::{VecDeque, BTreeMap, btree_map, vec_deque},
};

use hashbrown::DefaultHashBuilder;
use indexmap::IndexMap;

use crate::Value;

/// A growable, indexable sequence, used to store the elements of an array.
#[allow(clippy::len_without_is_empty)]
pub trait Sequence<T>: Default + Clone + Debug {
  /// An iterator over the elements.
  type Iter<'a>: DoubleEndedIterator<Item = &'a T> + ExactSizeIterator
  where
    Self: 'a,
    T: 'a;
  /// An iterator over mutable references to the elements.
  type IterMut<'a>: DoubleEndedIterator<Item = &'a mut T> + ExactSizeIterator
  where
    Self: 'a,
    T: 'a;

  /// The amount of elements.
  fn len(&self) -> usize;
  /// The element at this index.
  fn get(&self, i: usize) -> Option<&T>;
  /// The element at this index, mutably.
  fn get_mut(&mut self, i: usize) -> Option<&mut T>;
  /// Append an element.
  fn push(&mut self, value: T);
  /// Insert an element at an index `<= len`, shifting all elements after it.
  fn insert(&mut self, i: usize, value: T);
  /// Remove the element at an index, shifting all elements after it.
  ///
  /// Returns `None` if the index is out of bounds.
  fn remove(&mut self, i: usize) -> Option<T>;
  /// Remove the elements within `start .. end`, where `start <= end <= len`.
  fn remove_range(&mut self, start: usize, end: usize);
  /// Remove all elements.
  fn clear(&mut self);
  /// Iterate over the elements.
  fn iter(&self) -> Self::Iter<'_>;
  /// Iterate over the elements, mutably.
  fn iter_mut(&mut self) -> Self::IterMut<'_>;
}

impl<T: Clone + Debug> Sequence<T> for Vec<T> {
  type Iter<'a>
    = core::slice::Iter<'a, T>
  where
    Self: 'a,
    T: 'a;
  type IterMut<'a>
    = core::slice::IterMut<'a, T>
  where
    Self: 'a,
    T: 'a;

  #[inline(always)]
  fn len(&self) -> usize {
    self.as_slice().len()
  }
  #[inline(always)]
  fn get(&self, i: usize) -> Option<&T> {
    self.as_slice().get(i)
  }
  #[inline(always)]
  fn get_mut(&mut self, i: usize) -> Option<&mut T> {
    self.as_mut_slice().get_mut(i)
  }
  #[inline(always)]
  fn push(&mut self, value: T) {
    Vec::push(self, value);
  }
  #[inline(always)]
  fn insert(&mut self, i: usize, value: T) {
    Vec::insert(self, i, value);
  }
  #[inline(always)]
  fn remove(&mut self, i: usize) -> Option<T> {
    (i < self.as_slice().len()).then(|| Vec::remove(self, i))
  }
  #[inline(always)]
  fn remove_range(&mut self, start: usize, end: usize) {
    self.drain(start .. end);
  }
  #[inline(always)]
  fn clear(&mut self) {
    Vec::clear(self);
  }
  #[inline(always)]
  fn iter(&self) -> Self::Iter<'_> {
    self.as_slice().iter()
  }
  #[inline(always)]
  fn iter_mut(&mut self) -> Self::IterMut<'_> {
    self.as_mut_slice().iter_mut()
  }
}

impl<T: Clone + Debug> Sequence<T> for VecDeque<T> {
  type Iter<'a>
    = vec_deque::Iter<'a, T>
  where
    Self: 'a,
    T: 'a;
  type IterMut<'a>
    = vec_deque::IterMut<'a, T>
  where
    Self: 'a,
    T: 'a;

  #[inline(always)]
  fn len(&self) -> usize {
    VecDeque::len(self)
  }
  #[inline(always)]
  fn get(&self, i: usize) -> Option<&T> {
    VecDeque::get(self, i)
  }
  #[inline(always)]
  fn get_mut(&mut self, i: usize) -> Option<&mut T> {
    VecDeque::get_mut(self, i)
  }
  #[inline(always)]
  fn push(&mut self, value: T) {
    self.push_back(value);
  }
  #[inline(always)]
  fn insert(&mut self, i: usize, value: T) {
    VecDeque::insert(self, i, value);
  }
  #[inline(always)]
  fn remove(&mut self, i: usize) -> Option<T> {
    VecDeque::remove(self, i)
  }
  #[inline(always)]
  fn remove_range(&mut self, start: usize, end: usize) {
    self.drain(start .. end);
  }
  #[inline(always)]
  fn clear(&mut self) {
    VecDeque::clear(self);
  }
  #[inline(always)]
  fn iter(&self) -> Self::Iter<'_> {
    VecDeque::iter(self)
  }
  #[inline(always)]
  fn iter_mut(&mut self) -> Self::IterMut<'_> {
    VecDeque::iter_mut(self)
  }
}

/// A mapping from unique string keys to values, used to store the members of an object.
#[allow(clippy::len_without_is_empty)]
pub trait Mapping<V>: Default + Clone + Debug {
  /// An iterator over the entries.
  type Iter<'a>: DoubleEndedIterator<Item = (&'a String, &'a V)> + ExactSizeIterator
  where
    Self: 'a,
    V: 'a;
  /// An iterator over the entries, with mutable references to the values.
  type IterMut<'a>: DoubleEndedIterator<Item = (&'a String, &'a mut V)> + ExactSizeIterator
  where
    Self: 'a,
    V: 'a;

  /// The amount of entries.
  fn len(&self) -> usize;
  /// The value for a key.
  fn get(&self, key: &str) -> Option<&V>;
  /// The value for a key, mutably.
  fn get_mut(&mut self, key: &str) -> Option<&mut V>;
  /// The value for a key, inserting the default value if the key isn't present.
  fn get_or_insert_default(&mut self, key: String) -> &mut V
  where
    V: Default;
  /// Insert a value for a key.
  ///
  /// If the key was already present, its value is replaced (without changing its position within
  /// the mapping) and the prior value returned.
  fn insert(&mut self, key: String, value: V) -> Option<V>;
  /// Remove the entry for a key, returning its value.
  fn remove(&mut self, key: &str) -> Option<V>;
  /// Remove all entries.
  fn clear(&mut self);
  /// Iterate over the entries.
  fn iter(&self) -> Self::Iter<'_>;
  /// Iterate over the entries, mutably.
  fn iter_mut(&mut self) -> Self::IterMut<'_>;
}

/// An insertion-ordered map, hashed without relying on `std`.
pub type OrderedMap<V> = IndexMap<String, V, DefaultHashBuilder>;

/// Entries are kept in the order they were first inserted.
impl<V: Clone + Debug, S: BuildHasher + Default + Clone> Mapping<V> for IndexMap<String, V, S> {
  type Iter<'a>
    = indexmap::map::Iter<'a, String, V>
  where
    Self: 'a,
    V: 'a;
  type IterMut<'a>
    = indexmap::map::IterMut<'a, String, V>
  where
    Self: 'a,
    V: 'a;

  #[inline(always)]
  fn len(&self) -> usize {
    IndexMap::len(self)
  }
  #[inline(always)]
  fn get(&self, key: &str) -> Option<&V> {
    IndexMap::get(self, key)
  }
  #[inline(always)]
  fn get_mut(&mut self, key: &str) -> Option<&mut V> {
    IndexMap::get_mut(self, key)
  }
  #[inline(always)]
  fn get_or_insert_default(&mut self, key: String) -> &mut V
  where
    V: Default,
  {
    self.entry(key).or_default()
  }
  #[inline(always)]
  fn insert(&mut self, key: String, value: V) -> Option<V> {
    IndexMap::insert(self, key, value)
  }
  #[inline(always)]
  fn remove(&mut self, key: &str) -> Option<V> {
    // `shift_remove` preserves the order of the remaining entries
    self.shift_remove(key)
  }
  #[inline(always)]
  fn clear(&mut self) {
    IndexMap::clear(self);
  }
  #[inline(always)]
  fn iter(&self) -> Self::Iter<'_> {
    IndexMap::iter(self)
  }
  #[inline(always)]
  fn iter_mut(&mut self) -> Self::IterMut<'_> {
    IndexMap::iter_mut(self)
  }
}

/// Entries are kept sorted by their keys.
impl<V: Clone + Debug> Mapping<V> for BTreeMap<String, V> {
  type Iter<'a>
    = btree_map::Iter<'a, String, V>
  where
    Self: 'a,
    V: 'a;
  type IterMut<'a>
    = btree_map::IterMut<'a, String, V>
  where
    Self: 'a,
    V: 'a;

  #[inline(always)]
  fn len(&self) -> usize {
    BTreeMap::len(self)
  }
  #[inline(always)]
  fn get(&self, key: &str) -> Option<&V> {
    BTreeMap::get(self, key)
  }
  #[inline(always)]
  fn get_mut(&mut self, key: &str) -> Option<&mut V> {
    BTreeMap::get_mut(self, key)
  }
  #[inline(always)]
  fn get_or_insert_default(&mut self, key: String) -> &mut V
  where
    V: Default,
  {
    self.entry(key).or_default()
  }
  #[inline(always)]
  fn insert(&mut self, key: String, value: V) -> Option<V> {
    BTreeMap::insert(self, key, value)
  }
  #[inline(always)]
  fn remove(&mut self, key: &str) -> Option<V> {
    BTreeMap::remove(self, key)
  }
  #[inline(always)]
  fn clear(&mut self) {
    BTreeMap::clear(self);
  }
  #[inline(always)]
  fn iter(&self) -> Self::Iter<'_> {
    BTreeMap::iter(self)
  }
  #[inline(always)]
  fn iter_mut(&mut self) -> Self::IterMut<'_> {
    BTreeMap::iter_mut(self)
  }
}

/// The containers a [`Value`] stores its arrays and objects within.
pub trait Policy: Sized {
  /// The container for the elements of an array.
  type Array: Sequence<Value<Self>>;
  /// The container for the members of an object.
  type Object: Mapping<Value<Self>>;
}

/// Arrays are `Vec`s and objects preserve the order their members were inserted in.
///
/// This is the default policy, under which serializing a parsed document preserves the order of
/// its members.
#[derive(Clone, Copy, Default, Debug)]
pub struct Ordered;
impl Policy for Ordered {
  type Array = Vec<Value<Self>>;
  type Object = OrderedMap<Value<Self>>;
}

/// Arrays are `Vec`s and objects are sorted by their keys.
#[derive(Clone, Copy, Default, Debug)]
pub struct Sorted;
impl Policy for Sorted {
  type Array = Vec<Value<Self>>;
  type Object = BTreeMap<String, Value<Self>>;
}

#[test]
fn test_sequences() {
  fn check<S: Sequence<u8>>() {
    let mut sequence = S::default();
    for i in 0 .. 5 {
      sequence.push(i);
    }
    sequence.insert(0, 9);
    assert_eq!(sequence.len(), 6);
    assert_eq!(sequence.remove(1), Some(0));
    assert_eq!(sequence.remove(6), None);
    sequence.remove_range(1, 3);
    assert_eq!(sequence.iter().copied().collect::<Vec<_>>(), vec![9, 3, 4]);
    assert_eq!(sequence.iter().rev().copied().collect::<Vec<_>>(), vec![4, 3, 9]);
    assert_eq!(sequence.iter().len(), 3);
    *sequence.get_mut(2).unwrap() = 5;
    for value in sequence.iter_mut() {
      *value += 1;
    }
    assert_eq!(sequence.get(2), Some(&6));
    sequence.clear();
    assert_eq!(sequence.len(), 0);
  }
  check::<Vec<u8>>();
  check::<VecDeque<u8>>();
}

#[test]
fn test_mappings() {
  fn check<M: Mapping<u8>>() -> Vec<String> {
    let mut mapping = M::default();
    assert_eq!(mapping.insert("b".to_string(), 1), None);
    assert_eq!(mapping.insert("a".to_string(), 2), None);
    assert_eq!(mapping.insert("c".to_string(), 3), None);
    // Overwriting keeps a single entry
    assert_eq!(mapping.insert("b".to_string(), 4), Some(1));
    assert_eq!(mapping.len(), 3);
    assert_eq!(mapping.get("b"), Some(&4));
    *mapping.get_or_insert_default("d".to_string()) += 5;
    assert_eq!(mapping.get("d"), Some(&5));
    assert_eq!(mapping.remove("c"), Some(3));
    assert_eq!(mapping.remove("c"), None);
    for (_, value) in mapping.iter_mut() {
      *value *= 2;
    }
    *mapping.get_mut("a").unwrap() += 1;
    assert_eq!(mapping.get("a"), Some(&5));
    mapping.iter().map(|(key, _)| key.clone()).collect()
  }
  // The overwritten key retains its original position
  assert_eq!(check::<OrderedMap<u8>>(), ["b", "a", "d"]);
  assert_eq!(check::<BTreeMap<String, u8>>(), ["a", "b", "d"]);
}
