/*!
  The construction-time configuration of an adaptor. There is exactly one knob: whether a
  primitive re-adapts its source values on every read or snapshots them once when it is built.
*/

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::OptionError;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AdaptPolicy {
  /// Re-adapt the source value on every read, reflecting any mutation of it.
  AlwaysAdapt,
  /// Adapt once at construction and serve the snapshot from then on.
  AdaptOnceAtInit,
}

impl AdaptPolicy {
  pub fn always_adapt(&self) -> bool {
    *self != AdaptPolicy::AdaptOnceAtInit
  }
}

impl Default for AdaptPolicy {
  fn default() -> Self {
    AdaptPolicy::AlwaysAdapt
  }
}

impl Display for AdaptPolicy {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      AdaptPolicy::AlwaysAdapt     => write!(f, "always-adapt"),
      AdaptPolicy::AdaptOnceAtInit => write!(f, "adapt-once-at-init"),
    }
  }
}

impl FromStr for AdaptPolicy {
  type Err = OptionError;

  /// Accepts the long names produced by `Display` as well as the short forms `always`/`a` and
  /// `once`/`o`. Case and surrounding whitespace are ignored.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "a" | "always" | "always-adapt"     => Ok(AdaptPolicy::AlwaysAdapt),
      "o" | "once" | "adapt-once-at-init" => Ok(AdaptPolicy::AdaptOnceAtInit),
      _ => Err(OptionError::UnknownPolicy(s.to_string())),
    }
  }
}
