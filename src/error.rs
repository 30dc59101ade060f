/*!
  Errors raised by the adaptation layer and the capture service.

  Only failures the caller is responsible for surface here. A candidate value that cannot cross
  the domain boundary during a membership test is not an error; it simply does not match.
*/

use std::fmt::{Display, Formatter};

use thiserror::Error;

/// The boxed cause carried by a failed conversion.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;


/// Which way a conversion was headed when it failed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Direction {
  SourceToTarget,
  TargetToSource,
}

impl Display for Direction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Direction::SourceToTarget => write!(f, "source to target"),
      Direction::TargetToSource => write!(f, "target to source"),
    }
  }
}


/// The construction rule a `RangeAdaptor` broke.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum RangeViolation {
  MinExceedsMax,        //< `min > max` under the range's comparison
  DegenerateExclusive,  //< `min == max` with at least one exclusive bound
}

impl Display for RangeViolation {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      RangeViolation::MinExceedsMax       => write!(f, "minimum exceeds maximum"),
      RangeViolation::DegenerateExclusive => write!(f, "empty point range with an exclusive bound"),
    }
  }
}


#[derive(Debug, Error)]
pub enum AdaptError {
  #[error("Adaptation from {direction} failed: {cause}")]
  AdaptationFailed {
    direction: Direction,
    #[source]
    cause: Cause,
  },

  #[error("Invalid range construction: {0}")]
  InvalidRangeConstruction(RangeViolation),

  #[error("Buffer too small: {needed} elements at offset {offset}, {available} available")]
  InsufficientCapacity {
    offset   : usize,
    needed   : usize,
    available: usize,
  },
}

impl AdaptError {
  pub(crate) fn failed<E>(direction: Direction, cause: E) -> AdaptError
    where E: Into<Cause>
  {
    AdaptError::AdaptationFailed { direction, cause: cause.into() }
  }

  /// True if this error came out of a converter rather than out of a usage check.
  pub fn is_adaptation_failure(&self) -> bool {
    matches!(self, AdaptError::AdaptationFailed { .. })
  }
}


#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum CaptureError {
  /// `end_capture` on a token with no open capture. This is a bug in the driving engine.
  #[error("No active capture for token {token}")]
  NoActiveCapture { token: String },

  /// The cursor moved behind the start of the capture being closed.
  #[error("Cursor at {index} is behind capture start {start}")]
  CursorRegressed { start: usize, index: usize },
}


#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum OptionError {
  #[error("Unknown adaptation policy: {0:?}")]
  UnknownPolicy(String),
}


#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ShuntError {
  #[error("No shunt registered under {0:?}")]
  Unregistered(String),

  #[error("Shunt {0:?} is registered with a different signature")]
  SignatureMismatch(String),
}


#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn adaptation_failure_keeps_cause(){
    let inner = "300".parse::<u8>().unwrap_err();
    let error = AdaptError::failed(Direction::TargetToSource, inner);

    assert!(error.is_adaptation_failure());
    assert!(std::error::Error::source(&error).is_some());
    assert!(error.to_string().starts_with("Adaptation from target to source failed"));
  }

  #[test]
  fn range_violation_message(){
    let error = AdaptError::InvalidRangeConstruction(RangeViolation::MinExceedsMax);
    assert!(!error.is_adaptation_failure());
    assert_eq!(error.to_string(), "Invalid range construction: minimum exceeds maximum");
  }

  #[test]
  fn capture_error_names_token(){
    let error = CaptureError::NoActiveCapture { token: "3".to_string() };
    assert_eq!(error.to_string(), "No active capture for token 3");
  }

}
