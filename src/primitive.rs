/*!
  The interface a matching engine sees. Every primitive is typed over the engine's *target*
  element type `T`; which source domain it was authored in is a private matter of the adaptor.
*/

use std::cmp::Ordering;

use crate::context::AdaptContext;
use crate::Result;


/// A membership predicate evaluated once per transition.
pub trait Condition<T> {
  /// True if `value` matches. Never fails: a value the primitive cannot interpret does not match.
  fn test(&self, value: &T) -> bool;
}


/// A constant regex atom, e.g. the `a` in `ab*`.
pub trait ConstAtom<T>: Condition<T> {
  fn value(&self) -> Result<T>;
}


/// A range atom, e.g. `[a-z]`.
pub trait RangeAtom<T>: Condition<T> {
  fn minimum(&self) -> Result<T>;
  fn maximum(&self) -> Result<T>;
  fn can_take_min(&self) -> bool;
  fn can_take_max(&self) -> bool;
}


/**
  An interval over the source domain, ordered by the primitive's own comparison rather than by
  `Ord`. A constant is the degenerate interval `[value, value]`.
*/
pub trait SourceRange<S> {
  fn source_min(&self) -> &S;
  fn source_max(&self) -> &S;
  fn min_inclusive(&self) -> bool;
  fn max_inclusive(&self) -> bool;
  fn compare(&self, lhs: &S, rhs: &S) -> Ordering;

  fn contains_source(&self, value: &S) -> bool {
    let lower = self.compare(self.source_min(), value);
    let upper = self.compare(value, self.source_max());

    let above_min = match self.min_inclusive() {
      true  => lower != Ordering::Greater,
      false => lower == Ordering::Less,
    };
    let below_max = match self.max_inclusive() {
      true  => upper != Ordering::Greater,
      false => upper == Ordering::Less,
    };

    above_min && below_max
  }
}


/// Anything that owns an `AdaptContext` bridging `S` and `T`.
pub trait Adaptor<S, T> {
  fn context(&self) -> &AdaptContext<S, T>;

  fn adapt_to_target(&self, source: &S) -> Result<T> {
    self.context().adapt_to_target(source)
  }

  fn adapt_to_source(&self, target: &T) -> Result<S> {
    self.context().adapt_to_source(target)
  }
}


#[cfg(test)]
mod test {
  use super::*;

  struct Window {
    lo: i32,
    hi: i32,
    lo_inclusive: bool,
    hi_inclusive: bool,
  }

  impl SourceRange<i32> for Window {
    fn source_min(&self) -> &i32 { &self.lo }
    fn source_max(&self) -> &i32 { &self.hi }
    fn min_inclusive(&self) -> bool { self.lo_inclusive }
    fn max_inclusive(&self) -> bool { self.hi_inclusive }
    fn compare(&self, lhs: &i32, rhs: &i32) -> Ordering { lhs.cmp(rhs) }
  }

  #[test]
  fn closed_window(){
    let window = Window{ lo: 3, hi: 7, lo_inclusive: true, hi_inclusive: true };
    assert!(!window.contains_source(&2));
    assert!(window.contains_source(&3));
    assert!(window.contains_source(&7));
    assert!(!window.contains_source(&8));
  }

  #[test]
  fn half_open_window(){
    let window = Window{ lo: 3, hi: 7, lo_inclusive: false, hi_inclusive: true };
    assert!(!window.contains_source(&3));
    assert!(window.contains_source(&4));
    assert!(window.contains_source(&7));

    let window = Window{ lo: 3, hi: 7, lo_inclusive: true, hi_inclusive: false };
    assert!(window.contains_source(&3));
    assert!(window.contains_source(&6));
    assert!(!window.contains_source(&7));
  }

}
