/*!
  Regex primitives over an arbitrary alphabet.

  A matching engine works in one element type, its *target* domain, while the conditions, ranges
  and literals it matches against are often written in another, the *source* domain: an ASCII
  class matched against `char`s, or code-point literals matched against UTF-16 units. Each
  adaptor in this crate owns a source-domain primitive together with an `AdaptContext` that
  converts between the two domains, and presents the primitive to the engine as a target-domain
  `Condition`, `ConstAtom` or `RangeAtom`.

  ```text
    ConstAdaptor      one literal                value(), test()
    RangeAdaptor      [min, max], ends optional  minimum(), maximum(), test()
    ConditionAdaptor  a predicate                test()
    SetAdaptor        a mutable set              set algebra, contains(), iter()
  ```

  The `CaptureService` is independent of adaptation. It tracks capture groups opening and closing
  as the engine advances its `Cursor`, and reports each finished capture as
  `(token, instance, start, length)`.
*/

#[macro_use]
mod debug;

pub mod capture;
pub mod condition;
pub mod constant;
pub mod context;
pub mod error;
pub mod options;
pub mod primitive;
pub mod range;
pub mod set;
pub mod shunt;

pub use capture::{Capture, CaptureService, Cursor};
pub use condition::ConditionAdaptor;
pub use constant::ConstAdaptor;
pub use context::{AdaptContext, Converter};
pub use error::{AdaptError, CaptureError, Direction, OptionError, RangeViolation, ShuntError};
pub use options::AdaptPolicy;
pub use primitive::{Adaptor, Condition, ConstAtom, RangeAtom, SourceRange};
pub use range::RangeAdaptor;
pub use set::{Operand, SetAdaptor};
pub use shunt::{ShuntKey, ShuntRegistry};


pub type Result<T, E = AdaptError> = std::result::Result<T, E>;

// Source-domain semantics supplied by the primitive's author.
pub type Equality<S>   = Box<dyn Fn(&S, &S) -> bool>;
pub type Comparison<S> = Box<dyn Fn(&S, &S) -> std::cmp::Ordering>;
pub type Predicate<S>  = Box<dyn Fn(&S) -> bool>;
