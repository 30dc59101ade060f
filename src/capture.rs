/*!
  The `CaptureService` records where capture groups open and close while a matching engine steps
  through its input.

  Captures are keyed by a *token* naming a family of groups (say, "group #3") and tagged with an
  *instance* id chosen by the engine. Several instances of one token may be open at once, as with
  a repeated or recursive group. They close strictly last-in first-out:

  ```text
    cursor:    0         2              5          9
    events:    start(A)  start(B)       end -> B   end -> A
    captured:            B = [2, 5]  length 4
               A = [0, 9]  length 10
  ```

  A service belongs to exactly one matching run. Any capture still open when the run ends would be
  misattributed by the next run, so call `reset()` or start with a fresh service.
*/

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::RangeInclusive;

use defaultmap::DefaultHashMap;
use tracing::{debug, trace};

use crate::error::CaptureError;


/// The engine's read head, sampled at each capture boundary.
pub trait Cursor {
  /// The index of the element being examined. Never decreases during a run.
  fn current_index(&self) -> usize;
}

impl Cursor for usize {
  fn current_index(&self) -> usize {
    *self
  }
}


/// A finished capture: `length` elements starting at `start`, both ends inclusive.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Capture<K, I> {
  pub token    : K,
  pub instance : I,
  pub start    : usize,
  pub length   : usize,
}

impl<K, I> Capture<K, I> {
  /// Index of the last captured element.
  pub fn end(&self) -> usize {
    self.start + self.length - 1
  }

  pub fn span(&self) -> RangeInclusive<usize> {
    self.start..=self.end()
  }
}


#[derive(Clone, Eq, PartialEq, Debug)]
struct OpenCapture<I> {
  instance : I,
  start    : usize,
}

type CaptureStack<I> = Vec<OpenCapture<I>>;


pub struct CaptureService<K: Eq + Hash, I: Clone> {
  /// Open captures per token. A token's stack exists only while it has an open capture.
  stacks: DefaultHashMap<K, CaptureStack<I>>,
}

impl<K: Eq + Hash, I: Clone> Default for CaptureService<K, I> {
  fn default() -> Self {
    CaptureService {
      stacks: DefaultHashMap::default(),
    }
  }
}

impl<K, I> CaptureService<K, I>
  where K: Eq + Hash + Clone + Debug,
        I: Clone
{

  pub fn new() -> CaptureService<K, I> {
    CaptureService::default()
  }


  /// Opens a capture of `token` at the cursor. Captures of the same token nest.
  pub fn start_capture<C>(&mut self, cursor: &C, token: K, instance: I)
    where C: Cursor + ?Sized
  {
    let start = cursor.current_index();
    let stack = self.stacks.get_mut(token.clone());
    stack.push(OpenCapture { instance, start });

    trace!(token = ?token, start, depth = stack.len(), "capture opened");
  }


  /**
    Closes the innermost open capture of `token` at the cursor and returns it.

    It is an error to close a token with nothing open, and an error for the cursor to sit before
    the capture's start. Either way the open captures are left exactly as they were.
  */
  pub fn finish_capture<C>(&mut self, cursor: &C, token: &K)
    -> Result<Capture<K, I>, CaptureError>
    where C: Cursor + ?Sized
  {
    let index = cursor.current_index();

    match self.stacks.get(token).last() {
      Some(open) if index < open.start => {
        return Err(CaptureError::CursorRegressed { start: open.start, index });
      }
      Some(_) => {}
      None    => return Err(no_active_capture(token)),
    }

    let stack = self.stacks.get_mut(token.clone());
    let open = stack.pop().ok_or_else(|| no_active_capture(token))?;
    let depth = stack.len();
    if depth == 0 {
      self.stacks.remove(token);
    }

    let capture = Capture {
      token    : token.clone(),
      instance : open.instance,
      start    : open.start,
      length   : index - open.start + 1,
    };
    debug!(token = ?token, start = capture.start, length = capture.length, depth, "capture closed");

    Ok(capture)
  }


  /// Closes the innermost open capture of `token` and reports it as
  /// `callback(token, instance, start, length)`.
  pub fn end_capture<C, F>(&mut self, cursor: &C, token: &K, callback: F)
    -> Result<(), CaptureError>
    where C: Cursor + ?Sized,
          F: FnOnce(&K, I, usize, usize)
  {
    let capture = self.finish_capture(cursor, token)?;
    callback(&capture.token, capture.instance, capture.start, capture.length);
    Ok(())
  }


  /// Number of open captures of `token`.
  pub fn depth(&self, token: &K) -> usize {
    self.stacks.get(token).len()
  }


  pub fn is_open(&self, token: &K) -> bool {
    self.depth(token) > 0
  }


  /// True when no capture of any token is open.
  pub fn is_idle(&self) -> bool {
    self.stacks.is_empty()
  }


  /// Tokens with at least one open capture, in no particular order.
  pub fn open_tokens(&self) -> Vec<K> {
    self.stacks.keys().cloned().collect()
  }


  /// Discards every open capture, readying the service for another run.
  pub fn reset(&mut self) {
    if !self.stacks.is_empty() {
      debug!(open = self.stacks.len(), "discarding open captures");
    }
    self.stacks.clear();
  }


  // region Debug Logging
  pub fn debug_log_stacks(&self, indent_level: usize)
    where I: Debug
  {
    debug_logln!("capture_stacks = {");
    for (token, stack) in self.stacks.iter() {
      debug_log!(" ".repeat(indent_level*2), format!("{:?}:", token));
      for open in stack.iter() {
        debug_log!(format!(" ({:?} @ {})", open.instance, open.start));
      }
      debug_logln!();
    }
    debug_logln!("}");
  }
  // endregion

}

fn no_active_capture<K: Debug>(token: &K) -> CaptureError {
  CaptureError::NoActiveCapture { token: format!("{:?}", token) }
}
