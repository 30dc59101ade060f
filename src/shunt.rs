/*!
  A registry of *shunts*: named callables an engine can look up instead of calling a primitive
  method directly, e.g. to alias `range.test` to a faster hand-written check.

  Each shunt is registered and resolved through a `ShuntKey<A, R>`, which carries the callable's
  argument and return types along with its name. The signature is therefore checked when the
  shunt is resolved, and resolving with the wrong signature finds nothing rather than calling
  something of the wrong shape. Names live in a Patricia trie, so every shunt under a dotted
  prefix can be listed cheaply.
*/

use std::any::Any;
use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

use patricia_tree::PatriciaMap;

use crate::error::ShuntError;

type Shunt<A, R> = Box<dyn Fn(A) -> R>;


/// The name and signature of a shunt.
pub struct ShuntKey<A, R> {
  name      : &'static str,
  signature : PhantomData<fn(A) -> R>,
}

impl<A, R> ShuntKey<A, R> {
  pub const fn new(name: &'static str) -> ShuntKey<A, R> {
    ShuntKey {
      name,
      signature: PhantomData,
    }
  }

  pub fn name(&self) -> &'static str {
    self.name
  }
}

// Derives would demand `A: Clone`/`R: Clone`, which the key never holds.
impl<A, R> Clone for ShuntKey<A, R> {
  fn clone(&self) -> Self {
    ShuntKey::new(self.name)
  }
}

impl<A, R> Copy for ShuntKey<A, R> {}

impl<A, R> Debug for ShuntKey<A, R> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "ShuntKey({})", self.name)
  }
}


pub struct ShuntRegistry {
  shunts: PatriciaMap<Box<dyn Any>>,
}

impl ShuntRegistry {

  pub fn new() -> ShuntRegistry {
    ShuntRegistry {
      shunts: PatriciaMap::new(),
    }
  }


  /// Registers `shunt` under `key`, replacing whatever was there. True if something was replaced.
  pub fn register<A, R, F>(&mut self, key: ShuntKey<A, R>, shunt: F) -> bool
    where A: 'static,
          R: 'static,
          F: Fn(A) -> R + 'static
  {
    let shunt: Shunt<A, R> = Box::new(shunt);
    self.shunts.insert(key.name(), Box::new(shunt) as Box<dyn Any>).is_some()
  }


  /// The shunt registered under `key`'s name, provided it has `key`'s signature.
  pub fn resolve<A, R>(&self, key: ShuntKey<A, R>) -> Option<&dyn Fn(A) -> R>
    where A: 'static,
          R: 'static
  {
    self.shunts
        .get(key.name())?
        .downcast_ref::<Shunt<A, R>>()
        .map(| shunt | shunt.as_ref())
  }


  pub fn invoke<A, R>(&self, key: ShuntKey<A, R>, argument: A) -> Result<R, ShuntError>
    where A: 'static,
          R: 'static
  {
    match self.resolve(key) {
      Some(shunt) => Ok(shunt(argument)),
      None if self.contains(key.name()) => {
        Err(ShuntError::SignatureMismatch(key.name().to_string()))
      }
      None => Err(ShuntError::Unregistered(key.name().to_string())),
    }
  }


  pub fn unregister(&mut self, name: &str) -> bool {
    self.shunts.remove(name).is_some()
  }


  pub fn contains(&self, name: &str) -> bool {
    self.shunts.get(name).is_some()
  }


  pub fn len(&self) -> usize {
    self.shunts.len()
  }


  pub fn is_empty(&self) -> bool {
    self.shunts.len() == 0
  }


  /// Names of every shunt starting with `prefix`, sorted.
  pub fn names_with_prefix(&self, prefix: &str) -> Vec<String> {
    let mut names: Vec<String> =
      self.shunts
          .keys()
          .filter(| name | name.starts_with(prefix.as_bytes()))
          .filter_map(| name | String::from_utf8(name).ok())
          .collect();
    names.sort();
    names
  }

}

impl Default for ShuntRegistry {
  fn default() -> Self {
    ShuntRegistry::new()
  }
}

impl Debug for ShuntRegistry {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_list().entries(self.names_with_prefix("")).finish()
  }
}
