/*!
  A `ConstAdaptor` presents a single source-domain value as a target-domain constant atom.

  Materializing the constant must succeed: the author wrote the literal, so a converter that
  cannot express it is a programming error and `value()` returns it as such. Testing a runtime
  candidate against the constant is different. A candidate with no source-domain counterpart
  simply does not match, and matching carries on.
*/

use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};

use tracing::trace;

use super::*;
use crate::context::AdaptContext;
use crate::primitive::{Adaptor, Condition, ConstAtom, SourceRange};


pub struct ConstAdaptor<S, T> {
  source_value : S,
  equality     : Equality<S>,
  context      : AdaptContext<S, T>,
  cached       : Option<T>, //< Only ever filled under `AdaptPolicy::AdaptOnceAtInit`
}

impl<S: PartialEq + 'static, T: 'static> ConstAdaptor<S, T> {
  /// A constant compared by `S: PartialEq`.
  pub fn new(source_value: S, context: AdaptContext<S, T>) -> Result<ConstAdaptor<S, T>> {
    ConstAdaptor::with_equality(source_value, | lhs: &S, rhs: &S | lhs == rhs, context)
  }
}

impl<S, T> ConstAdaptor<S, T> {

  /**
    A constant compared by `equality`, e.g. a case-insensitive comparison of letters. Under
    `AdaptOnceAtInit` the target value is materialized here, and a converter failure is returned
    instead of a constant that could never produce its value.
  */
  pub fn with_equality<F>(source_value: S, equality: F, context: AdaptContext<S, T>)
    -> Result<ConstAdaptor<S, T>>
    where F: Fn(&S, &S) -> bool + 'static
  {
    let cached = match context.always_adapt() {
      true  => None,
      false => {
        let value = context.adapt_to_target(&source_value)?;
        trace!(policy = %context.policy(), "materialized constant");
        Some(value)
      }
    };

    Ok(
      ConstAdaptor {
        source_value,
        equality: Box::new(equality),
        context,
        cached,
      }
    )
  }


  pub fn value(&self) -> Result<T>
    where T: Clone
  {
    match &self.cached {
      Some(value) => Ok(value.clone()),
      None        => self.context.adapt_to_target(&self.source_value),
    }
  }


  pub fn test(&self, candidate: &T) -> bool {
    match self.context.try_adapt_to_source(candidate) {
      Some(source) => (self.equality)(&source, &self.source_value),
      None         => false,
    }
  }


  pub fn source_value(&self) -> &S {
    &self.source_value
  }


  /// Changes are seen by later reads under `AlwaysAdapt` and ignored under `AdaptOnceAtInit`.
  pub fn source_value_mut(&mut self) -> &mut S {
    &mut self.source_value
  }


  pub fn source_equals(&self, lhs: &S, rhs: &S) -> bool {
    (self.equality)(lhs, rhs)
  }

}


impl<S, T> Condition<T> for ConstAdaptor<S, T> {
  fn test(&self, value: &T) -> bool {
    ConstAdaptor::test(self, value)
  }
}

impl<S, T: Clone> ConstAtom<T> for ConstAdaptor<S, T> {
  fn value(&self) -> Result<T> {
    ConstAdaptor::value(self)
  }
}

impl<S, T> Adaptor<S, T> for ConstAdaptor<S, T> {
  fn context(&self) -> &AdaptContext<S, T> {
    &self.context
  }
}

/// The constant viewed as the closed interval `[value, value]`.
impl<S: PartialOrd, T> SourceRange<S> for ConstAdaptor<S, T> {
  fn source_min(&self) -> &S {
    &self.source_value
  }

  fn source_max(&self) -> &S {
    &self.source_value
  }

  fn min_inclusive(&self) -> bool {
    true
  }

  fn max_inclusive(&self) -> bool {
    true
  }

  // Equal under the constant's own equality first; only unequal values fall back to `S`'s order.
  // Incomparable values sort above, which keeps them outside the degenerate interval.
  fn compare(&self, lhs: &S, rhs: &S) -> Ordering {
    if (self.equality)(lhs, rhs) {
      Ordering::Equal
    } else {
      lhs.partial_cmp(rhs).unwrap_or(Ordering::Greater)
    }
  }
}

impl<S: Debug, T: Debug> Debug for ConstAdaptor<S, T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ConstAdaptor")
     .field("source_value", &self.source_value)
     .field("cached", &self.cached)
     .field("policy", &self.context.policy())
     .finish()
  }
}
