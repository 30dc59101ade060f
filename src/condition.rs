/*!
  A `ConditionAdaptor` lifts an arbitrary source-domain predicate, e.g. "is an ASCII hex digit",
  to the target domain. Nothing is cached: each test adapts the candidate and asks the predicate
  afresh.
*/

use std::fmt::{Debug, Formatter};

use super::*;
use crate::context::AdaptContext;
use crate::primitive::{Adaptor, Condition};


pub struct ConditionAdaptor<S, T> {
  predicate : Predicate<S>,
  context   : AdaptContext<S, T>,
}

impl<S, T> ConditionAdaptor<S, T> {

  pub fn new<F>(predicate: F, context: AdaptContext<S, T>) -> ConditionAdaptor<S, T>
    where F: Fn(&S) -> bool + 'static
  {
    ConditionAdaptor {
      predicate: Box::new(predicate),
      context,
    }
  }


  /// False for any candidate without a source-domain counterpart.
  pub fn test(&self, candidate: &T) -> bool {
    match self.context.try_adapt_to_source(candidate) {
      Some(source) => (self.predicate)(&source),
      None         => false,
    }
  }


  pub fn test_source(&self, source: &S) -> bool {
    (self.predicate)(source)
  }

}

impl<S, T> Condition<T> for ConditionAdaptor<S, T> {
  fn test(&self, value: &T) -> bool {
    ConditionAdaptor::test(self, value)
  }
}

impl<S, T> Adaptor<S, T> for ConditionAdaptor<S, T> {
  fn context(&self) -> &AdaptContext<S, T> {
    &self.context
  }
}

impl<S, T> Debug for ConditionAdaptor<S, T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ConditionAdaptor")
     .field("policy", &self.context.policy())
     .finish()
  }
}
