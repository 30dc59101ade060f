/*!
  A `SetAdaptor` owns a mutable set of source-domain elements and exposes the whole of set algebra
  over the target domain.

  Every operation crosses the boundary at the edges only:
  - target-domain operands are adapted into the source domain;
  - the native `HashSet` algebra runs on the owned set;
  - elements come back out through the source-to-target converter.

  Two failure policies apply, depending on who asked for the value:

  | Operation                                | Unadaptable element            |
  |:-----------------------------------------|:-------------------------------|
  | `add`, `remove`, `contains`              | returns `false`                |
  | set algebra operands                     | silently dropped               |
  | `copy_into`, `iter`                      | `AdaptationFailed`             |

  The set can also be its own operand. Rust does not allow `set.union_with(&set)`, so
  self-reference is spelled `Operand::Itself` and short-circuits without adapting anything.
*/

use std::collections::hash_map::RandomState;
use std::collections::hash_set;
use std::collections::HashSet;
use std::fmt::{Debug, Formatter};
use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;
use std::ops::Bound;

use ranges::{Domain, GenericRange, Ranges};
use tracing::trace;

use super::*;
use crate::context::AdaptContext;
use crate::error::AdaptError;
use crate::primitive::{Adaptor, Condition};


/// The right-hand side of a set-algebra operation.
#[derive(Clone, Debug)]
pub enum Operand<I> {
  /// The set the operation is called on.
  Itself,
  /// Target-domain elements. Elements that fail to adapt are ignored.
  Items(I),
}

impl<T> Operand<std::iter::Empty<T>> {
  /// `Operand::Itself` with the item type pinned down, so callers need not name one.
  pub fn itself() -> Self {
    Operand::Itself
  }
}


pub struct SetAdaptor<S, T, H = RandomState> {
  source_set : HashSet<S, H>,
  context    : AdaptContext<S, T>,
}

impl<S: Eq + Hash, T> SetAdaptor<S, T, RandomState> {

  pub fn new(context: AdaptContext<S, T>) -> SetAdaptor<S, T> {
    SetAdaptor {
      source_set: HashSet::new(),
      context,
    }
  }


  pub fn from_source<I>(elements: I, context: AdaptContext<S, T>) -> SetAdaptor<S, T>
    where I: IntoIterator<Item = S>
  {
    SetAdaptor {
      source_set: elements.into_iter().collect(),
      context,
    }
  }

}

impl<S: Eq + Hash, T, H: BuildHasher> SetAdaptor<S, T, H> {

  pub fn with_hasher(hasher: H, context: AdaptContext<S, T>) -> SetAdaptor<S, T, H> {
    SetAdaptor {
      source_set: HashSet::with_hasher(hasher),
      context,
    }
  }


  /// Takes ownership of an existing set, hasher included.
  pub fn from_source_set(source_set: HashSet<S, H>, context: AdaptContext<S, T>)
    -> SetAdaptor<S, T, H>
  {
    SetAdaptor {
      source_set,
      context,
    }
  }


  pub fn source_set(&self) -> &HashSet<S, H> {
    &self.source_set
  }


  pub fn into_source_set(self) -> HashSet<S, H> {
    self.source_set
  }


  // region Single elements

  pub fn len(&self) -> usize {
    self.source_set.len()
  }


  pub fn is_empty(&self) -> bool {
    self.source_set.is_empty()
  }


  pub fn clear(&mut self) {
    self.source_set.clear();
  }


  /// True if the element was adapted and was not already present.
  pub fn add(&mut self, element: &T) -> bool {
    match self.context.try_adapt_to_source(element) {
      Some(source) => self.source_set.insert(source),
      None         => false,
    }
  }


  /// True if the element was adapted and was present.
  pub fn remove(&mut self, element: &T) -> bool {
    match self.context.try_adapt_to_source(element) {
      Some(source) => self.source_set.remove(&source),
      None         => false,
    }
  }


  pub fn contains(&self, element: &T) -> bool {
    match self.context.try_adapt_to_source(element) {
      Some(source) => self.source_set.contains(&source),
      None         => false,
    }
  }

  // endregion

  // region Materialization

  /**
    Writes every element, adapted to the target domain, into `buffer[offset..]` in iteration
    order. Fails without writing if fewer than `len()` slots follow `offset`. An element that
    cannot be adapted aborts the copy; slots written before it keep their new values.
  */
  pub fn copy_into(&self, buffer: &mut [T], offset: usize) -> Result<()> {
    let available = buffer.len().saturating_sub(offset);
    if offset > buffer.len() || available < self.len() {
      return Err(
        AdaptError::InsufficientCapacity {
          offset,
          needed: self.len(),
          available,
        }
      );
    }

    for (slot, source) in buffer[offset..].iter_mut().zip(self.source_set.iter()) {
      *slot = self.context.adapt_to_target(source)?;
    }

    Ok(())
  }


  /// Adapts elements lazily. Each call starts a fresh pass over the set.
  pub fn iter(&self) -> Iter<'_, S, T> {
    Iter {
      elements: self.source_set.iter(),
      context: &self.context,
      failed: false,
    }
  }

  // endregion

  // region Set algebra

  pub fn union_with<I>(&mut self, other: Operand<I>)
    where I: IntoIterator<Item = T>
  {
    if let Operand::Items(items) = other {
      let adapted = self.adapt_operand(items);
      self.source_set.extend(adapted);
    }
  }


  pub fn intersect_with<I>(&mut self, other: Operand<I>)
    where I: IntoIterator<Item = T>
  {
    if let Operand::Items(items) = other {
      let keep = self.adapt_operand_set(items);
      self.source_set.retain(| source | keep.contains(source));
    }
  }


  pub fn except_with<I>(&mut self, other: Operand<I>)
    where I: IntoIterator<Item = T>
  {
    match other {
      Operand::Itself => self.source_set.clear(),

      Operand::Items(items) => {
        for source in self.adapt_operand(items) {
          self.source_set.remove(&source);
        }
      }
    }
  }


  pub fn symmetric_except_with<I>(&mut self, other: Operand<I>)
    where I: IntoIterator<Item = T>
  {
    match other {
      Operand::Itself => self.source_set.clear(),

      Operand::Items(items) => {
        // Deduplicate first, or an element listed twice would toggle back out.
        for source in self.adapt_operand_set(items) {
          if !self.source_set.remove(&source) {
            self.source_set.insert(source);
          }
        }
      }
    }
  }


  pub fn is_subset_of<I>(&self, other: Operand<I>) -> bool
    where I: IntoIterator<Item = T>
  {
    match other {
      Operand::Itself => true,

      Operand::Items(items) => {
        let other = self.adapt_operand_set(items);
        self.source_set.iter().all(| source | other.contains(source))
      }
    }
  }


  pub fn is_superset_of<I>(&self, other: Operand<I>) -> bool
    where I: IntoIterator<Item = T>
  {
    match other {
      Operand::Itself => true,

      Operand::Items(items) => {
        self.adapt_operand(items)
            .iter()
            .all(| source | self.source_set.contains(source))
      }
    }
  }


  pub fn is_proper_subset_of<I>(&self, other: Operand<I>) -> bool
    where I: IntoIterator<Item = T>
  {
    match other {
      Operand::Itself => false,

      Operand::Items(items) => {
        let other = self.adapt_operand_set(items);
        self.source_set.len() < other.len()
          && self.source_set.iter().all(| source | other.contains(source))
      }
    }
  }


  pub fn is_proper_superset_of<I>(&self, other: Operand<I>) -> bool
    where I: IntoIterator<Item = T>
  {
    match other {
      Operand::Itself => false,

      Operand::Items(items) => {
        let other = self.adapt_operand_set(items);
        other.len() < self.source_set.len()
          && other.iter().all(| source | self.source_set.contains(source))
      }
    }
  }


  /// True if the sets share an element. An empty set overlaps nothing, itself included.
  pub fn overlaps<I>(&self, other: Operand<I>) -> bool
    where I: IntoIterator<Item = T>
  {
    match other {
      Operand::Itself => !self.source_set.is_empty(),

      Operand::Items(items) => {
        self.adapt_operand(items)
            .iter()
            .any(| source | self.source_set.contains(source))
      }
    }
  }


  pub fn set_equals<I>(&self, other: Operand<I>) -> bool
    where I: IntoIterator<Item = T>
  {
    match other {
      Operand::Itself => true,

      Operand::Items(items) => {
        let other = self.adapt_operand_set(items);
        other.len() == self.source_set.len()
          && other.iter().all(| source | self.source_set.contains(source))
      }
    }
  }

  // endregion


  /// The source elements as a union of singleton intervals, merged where they touch.
  pub fn source_ranges(&self) -> Ranges<S>
    where S: Domain + Clone
  {
    let mut ranges = Ranges::new();
    for source in self.source_set.iter() {
      ranges.insert(
        GenericRange::new_with_bounds(
          Bound::Included(source.clone()),
          Bound::Included(source.clone())
        )
      );
    }
    ranges
  }


  fn adapt_operand<I>(&self, items: I) -> Vec<S>
    where I: IntoIterator<Item = T>
  {
    let mut dropped = 0usize;
    let adapted: Vec<S> =
      items.into_iter()
           .filter_map(| item | {
             let source = self.context.try_adapt_to_source(&item);
             if source.is_none() {
               dropped += 1;
             }
             source
           })
           .collect();

    if dropped > 0 {
      trace!(dropped, "ignored operand elements outside the source domain");
    }
    adapted
  }


  fn adapt_operand_set<I>(&self, items: I) -> HashSet<S>
    where I: IntoIterator<Item = T>
  {
    self.adapt_operand(items).into_iter().collect()
  }

}


impl<S: Eq + Hash, T, H: BuildHasher> Condition<T> for SetAdaptor<S, T, H> {
  fn test(&self, value: &T) -> bool {
    self.contains(value)
  }
}

impl<S, T, H> Adaptor<S, T> for SetAdaptor<S, T, H> {
  fn context(&self) -> &AdaptContext<S, T> {
    &self.context
  }
}

impl<'a, S: Eq + Hash, T, H: BuildHasher> IntoIterator for &'a SetAdaptor<S, T, H> {
  type Item     = Result<T>;
  type IntoIter = Iter<'a, S, T>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<S: Debug, T, H> Debug for SetAdaptor<S, T, H> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_set().entries(self.source_set.iter()).finish()
  }
}


/**
  Lazily adapts each source element to the target domain. The first element that fails to adapt
  is yielded as an `Err`, after which the iterator is exhausted.
*/
pub struct Iter<'a, S, T> {
  elements : hash_set::Iter<'a, S>,
  context  : &'a AdaptContext<S, T>,
  failed   : bool,
}

impl<'a, S, T> Iterator for Iter<'a, S, T> {
  type Item = Result<T>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.failed {
      return None;
    }

    let source = self.elements.next()?;
    let adapted = self.context.adapt_to_target(source);
    if adapted.is_err() {
      self.failed = true;
    }
    Some(adapted)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    match self.failed {
      true  => (0, Some(0)),
      false => (0, self.elements.size_hint().1),
    }
  }
}

impl<'a, S, T> FusedIterator for Iter<'a, S, T> {}
