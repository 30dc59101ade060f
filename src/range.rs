/*!
  A `RangeAdaptor` presents a source-domain interval `min ..= max` (either end may be open) as a
  target-domain range atom.

  Bounds follow the same rules as a constant's value: they are cached or re-adapted per the
  `AdaptPolicy`, and failing to materialize one is an error. Membership is decided entirely in
  the source domain, by adapting the candidate back and comparing it with the range's own
  comparison.
*/

use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};
use std::ops::Bound;

use ranges::{Domain, GenericRange};
use tracing::trace;

use super::*;
use crate::context::AdaptContext;
use crate::error::{AdaptError, RangeViolation};
use crate::primitive::{Adaptor, Condition, RangeAtom, SourceRange};


pub struct RangeAdaptor<S, T> {
  source_min   : S,
  source_max   : S,
  can_take_min : bool,          //< Is `source_min` itself in the range?
  can_take_max : bool,          //< Is `source_max` itself in the range?
  comparison   : Comparison<S>,
  context      : AdaptContext<S, T>,
  cached       : Option<(T, T)>, //< (min, max), filled only under `AdaptOnceAtInit`
}

impl<S: Ord + 'static, T: 'static> RangeAdaptor<S, T> {

  /// The closed range `[min, max]` under `S: Ord`.
  pub fn new(source_min: S, source_max: S, context: AdaptContext<S, T>)
    -> Result<RangeAdaptor<S, T>>
  {
    RangeAdaptor::with_bounds(source_min, source_max, true, true, context)
  }


  pub fn with_bounds(
    source_min   : S,
    source_max   : S,
    can_take_min : bool,
    can_take_max : bool,
    context      : AdaptContext<S, T>
  ) -> Result<RangeAdaptor<S, T>>
  {
    RangeAdaptor::with_comparison(
      source_min,
      source_max,
      can_take_min,
      can_take_max,
      | lhs: &S, rhs: &S | lhs.cmp(rhs),
      context
    )
  }

}

impl<S, T> RangeAdaptor<S, T> {

  /**
    The general constructor. Fails with `InvalidRangeConstruction` if `min > max`, or if
    `min == max` while either bound is open, since such a range could never match. Under
    `AdaptOnceAtInit` both bounds are materialized here as well.
  */
  pub fn with_comparison<F>(
    source_min   : S,
    source_max   : S,
    can_take_min : bool,
    can_take_max : bool,
    comparison   : F,
    context      : AdaptContext<S, T>
  ) -> Result<RangeAdaptor<S, T>>
    where F: Fn(&S, &S) -> Ordering + 'static
  {
    match comparison(&source_min, &source_max) {

      Ordering::Greater => {
        return Err(AdaptError::InvalidRangeConstruction(RangeViolation::MinExceedsMax));
      }

      Ordering::Equal if !(can_take_min && can_take_max) => {
        return Err(AdaptError::InvalidRangeConstruction(RangeViolation::DegenerateExclusive));
      }

      _ => {}
    }

    let cached = match context.always_adapt() {
      true  => None,
      false => {
        let min = context.adapt_to_target(&source_min)?;
        let max = context.adapt_to_target(&source_max)?;
        trace!(policy = %context.policy(), "materialized range bounds");
        Some((min, max))
      }
    };

    Ok(
      RangeAdaptor {
        source_min,
        source_max,
        can_take_min,
        can_take_max,
        comparison: Box::new(comparison),
        context,
        cached,
      }
    )
  }


  pub fn minimum(&self) -> Result<T>
    where T: Clone
  {
    match &self.cached {
      Some((min, _)) => Ok(min.clone()),
      None           => self.context.adapt_to_target(&self.source_min),
    }
  }


  pub fn maximum(&self) -> Result<T>
    where T: Clone
  {
    match &self.cached {
      Some((_, max)) => Ok(max.clone()),
      None           => self.context.adapt_to_target(&self.source_max),
    }
  }


  pub fn can_take_min(&self) -> bool {
    self.can_take_min
  }


  pub fn can_take_max(&self) -> bool {
    self.can_take_max
  }


  pub fn test(&self, candidate: &T) -> bool {
    match self.context.try_adapt_to_source(candidate) {
      Some(source) => self.contains_source(&source),
      None         => false,
    }
  }


  /**
    The source interval as a `GenericRange`, for engines that merge or split intervals. This uses
    `S`'s natural order, which only agrees with `test()` if the range was built with it.
  */
  pub fn to_generic_range(&self) -> GenericRange<S>
    where S: Domain + Clone
  {
    let start = match self.can_take_min {
      true  => Bound::Included(self.source_min.clone()),
      false => Bound::Excluded(self.source_min.clone()),
    };
    let end = match self.can_take_max {
      true  => Bound::Included(self.source_max.clone()),
      false => Bound::Excluded(self.source_max.clone()),
    };

    GenericRange::new_with_bounds(start, end)
  }

}


impl<S, T> SourceRange<S> for RangeAdaptor<S, T> {
  fn source_min(&self) -> &S {
    &self.source_min
  }

  fn source_max(&self) -> &S {
    &self.source_max
  }

  fn min_inclusive(&self) -> bool {
    self.can_take_min
  }

  fn max_inclusive(&self) -> bool {
    self.can_take_max
  }

  fn compare(&self, lhs: &S, rhs: &S) -> Ordering {
    (self.comparison)(lhs, rhs)
  }
}

impl<S, T> Condition<T> for RangeAdaptor<S, T> {
  fn test(&self, value: &T) -> bool {
    RangeAdaptor::test(self, value)
  }
}

impl<S, T: Clone> RangeAtom<T> for RangeAdaptor<S, T> {
  fn minimum(&self) -> Result<T> {
    RangeAdaptor::minimum(self)
  }

  fn maximum(&self) -> Result<T> {
    RangeAdaptor::maximum(self)
  }

  fn can_take_min(&self) -> bool {
    self.can_take_min
  }

  fn can_take_max(&self) -> bool {
    self.can_take_max
  }
}

impl<S, T> Adaptor<S, T> for RangeAdaptor<S, T> {
  fn context(&self) -> &AdaptContext<S, T> {
    &self.context
  }
}

impl<S: Debug, T: Debug> Debug for RangeAdaptor<S, T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "RangeAdaptor{}{:?}, {:?}{}",
      if self.can_take_min { '[' } else { '(' },
      self.source_min,
      self.source_max,
      if self.can_take_max { ']' } else { ')' }
    )
  }
}
