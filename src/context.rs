/*!
  An `AdaptContext` bridges the *source* domain a primitive was authored in and the *target*
  domain the matching engine runs over. It owns one converter in each direction and the
  `AdaptPolicy` deciding whether the owning primitive caches what it adapts.

  A converter the author did not supply is not an error. It is spelled out explicitly as
  `Converter::defaulted()`, which always produces the result type's default value.
*/

use std::convert::TryFrom;
use std::fmt::{Debug, Formatter};

use crate::error::{AdaptError, Cause, Direction};
use crate::options::AdaptPolicy;
use crate::Result;

type ConvertFn<A, B> = Box<dyn Fn(&A) -> std::result::Result<B, Cause>>;


/// A fallible one-way conversion from `A` to `B`.
pub struct Converter<A, B> {
  function  : ConvertFn<A, B>,
  defaulted : bool, //< true if this stands in for a converter the author left out
}

impl<A: 'static, B: 'static> Converter<A, B> {

  /// Wraps a fallible conversion. Any error type convertible into a boxed error is accepted.
  pub fn new<F, E>(f: F) -> Self
    where F: Fn(&A) -> std::result::Result<B, E> + 'static,
          E: Into<Cause> + 'static
  {
    Converter {
      function: Box::new(move | a: &A | -> std::result::Result<B, Cause> {
        f(a).map_err(Into::into)
      }),
      defaulted: false,
    }
  }


  pub fn infallible<F>(f: F) -> Self
    where F: Fn(&A) -> B + 'static
  {
    Converter {
      function: Box::new(move | a: &A | -> std::result::Result<B, Cause> { Ok(f(a)) }),
      defaulted: false,
    }
  }


  /// The converter used in place of a missing one: every input maps to `B::default()`.
  pub fn defaulted() -> Self
    where B: Default
  {
    Converter {
      function: Box::new(| _: &A | -> std::result::Result<B, Cause> { Ok(B::default()) }),
      defaulted: true,
    }
  }


  /// Uses `maybe_converter` if present and `Converter::defaulted()` otherwise.
  pub fn or_defaulted(maybe_converter: Option<Converter<A, B>>) -> Self
    where B: Default
  {
    maybe_converter.unwrap_or_else(Converter::defaulted)
  }


  /// Converts with `A: Into<B>`.
  pub fn from_into() -> Self
    where A: Clone + Into<B>
  {
    Converter::infallible(|a: &A| a.clone().into())
  }


  /// Converts with `B: TryFrom<A>`, surfacing the conversion error as the cause.
  pub fn from_try_into() -> Self
    where A: Clone,
          B: TryFrom<A>,
          <B as TryFrom<A>>::Error: Into<Cause> + 'static
  {
    Converter::new(|a: &A| B::try_from(a.clone()))
  }

}

impl<A, B> Converter<A, B> {

  pub fn convert(&self, a: &A) -> std::result::Result<B, Cause> {
    (self.function)(a)
  }


  pub fn is_defaulted(&self) -> bool {
    self.defaulted
  }

}

impl<A, B> Debug for Converter<A, B> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Converter")
     .field("defaulted", &self.defaulted)
     .finish()
  }
}


/// A pair of converters and the caching policy of the primitive that owns them.
#[derive(Debug)]
pub struct AdaptContext<S, T> {
  to_target : Converter<S, T>,
  to_source : Converter<T, S>,
  policy    : AdaptPolicy,
}

impl<S, T> AdaptContext<S, T> {

  pub fn new(to_target: Converter<S, T>, to_source: Converter<T, S>, policy: AdaptPolicy)
    -> AdaptContext<S, T>
  {
    AdaptContext {
      to_target,
      to_source,
      policy,
    }
  }


  pub fn adapt_to_target(&self, source: &S) -> Result<T> {
    self.to_target
        .convert(source)
        .map_err(| cause | AdaptError::failed(Direction::SourceToTarget, cause))
  }


  pub fn adapt_to_source(&self, target: &T) -> Result<S> {
    self.to_source
        .convert(target)
        .map_err(| cause | AdaptError::failed(Direction::TargetToSource, cause))
  }


  /// Membership tests treat a candidate that cannot reach the source domain as a non-match, so
  /// they only ever need the value or its absence.
  pub(crate) fn try_adapt_to_source(&self, target: &T) -> Option<S> {
    self.to_source.convert(target).ok()
  }


  pub fn always_adapt(&self) -> bool {
    self.policy.always_adapt()
  }


  pub fn policy(&self) -> AdaptPolicy {
    self.policy
  }


  pub fn to_target(&self) -> &Converter<S, T> {
    &self.to_target
  }


  pub fn to_source(&self) -> &Converter<T, S> {
    &self.to_source
  }

}

impl<S: Default + 'static, T: Default + 'static> AdaptContext<S, T> {
  /// A context with neither converter supplied.
  pub fn with_defaults(policy: AdaptPolicy) -> AdaptContext<S, T> {
    AdaptContext::new(Converter::defaulted(), Converter::defaulted(), policy)
  }
}

impl<S, T> AdaptContext<S, T>
  where S: Clone + Into<T> + TryFrom<T> + 'static,
        T: Clone + 'static,
        <S as TryFrom<T>>::Error: Into<Cause> + 'static
{
  /**
    The common case of a narrow source alphabet embedded in a wider target one, e.g. ASCII
    literals (`u8`) matched against `char` input. Widening never fails; narrowing fails for every
    target value outside the source alphabet.
  */
  pub fn widening(policy: AdaptPolicy) -> AdaptContext<S, T> {
    AdaptContext::new(Converter::from_into(), Converter::from_try_into(), policy)
  }
}


#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn widening_ascii_to_char(){
    let context: AdaptContext<u8, char> = AdaptContext::widening(AdaptPolicy::AlwaysAdapt);

    assert_eq!(context.adapt_to_target(&b'a').unwrap(), 'a');
    assert_eq!(context.adapt_to_source(&'z').unwrap(), b'z');
    assert!(context.always_adapt());

    let error = context.adapt_to_source(&'λ').unwrap_err();
    match error {
      AdaptError::AdaptationFailed { direction, .. } => {
        assert_eq!(direction, Direction::TargetToSource);
      }
      other => panic!("unexpected error: {}", other),
    }
  }

  #[test]
  fn missing_converters_produce_defaults(){
    let context: AdaptContext<u32, u16> = AdaptContext::with_defaults(AdaptPolicy::AdaptOnceAtInit);

    assert!(context.to_target().is_defaulted());
    assert!(context.to_source().is_defaulted());
    assert_eq!(context.adapt_to_target(&70_000).unwrap(), 0);
    assert_eq!(context.adapt_to_source(&12).unwrap(), 0);
    assert!(!context.always_adapt());
    assert_eq!(context.policy(), AdaptPolicy::AdaptOnceAtInit);
  }

  #[test]
  fn or_defaulted_prefers_supplied_converter(){
    let supplied = Converter::infallible(| x: &u32 | *x as u64 * 2);
    let converter = Converter::or_defaulted(Some(supplied));
    assert!(!converter.is_defaulted());
    assert_eq!(converter.convert(&21).unwrap(), 42);

    let missing: Converter<u32, u64> = Converter::or_defaulted(None);
    assert!(missing.is_defaulted());
    assert_eq!(missing.convert(&21).unwrap(), 0);
  }

  #[test]
  fn fallible_converter_error_is_carried(){
    let to_target = Converter::new(| s: &String | s.parse::<i64>());
    let to_source = Converter::infallible(| t: &i64 | t.to_string());
    let context = AdaptContext::new(to_target, to_source, AdaptPolicy::AlwaysAdapt);

    assert_eq!(context.adapt_to_target(&"-17".to_string()).unwrap(), -17);

    let error = context.adapt_to_target(&"seventeen".to_string()).unwrap_err();
    assert!(error.is_adaptation_failure());
    assert!(context.try_adapt_to_source(&5).is_some());
  }

}
