//! Injection registry: the identifier → factory map.
//!
//! The registry maps [`Identifier`] to [`Factory`] handles that know how to
//! build a product from a list of [`Args`].

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::args::Args;
use crate::error::{FactoryFault, InvalidFactoryError, SpyError};
use crate::key::Identifier;
use crate::product::{IntoProduced, Produced};

/// Type-erased factory signature.
///
/// # Why `Arc` and not `Box`?
/// [`SharedContainer`](crate::shared::SharedContainer) clones the handle out
/// of the lock before invoking it, so the closure itself must be shareable.
pub type FactoryFn = Arc<dyn Fn(Args) -> Result<Produced, FactoryFault> + Send + Sync>;

/// The same signature as [`FactoryFn`], owned through a `Box`.
pub type BoxedFactoryFn = Box<dyn Fn(Args) -> Result<Produced, FactoryFault> + Send + Sync>;

/// A registered unit of construction logic.
///
/// Cheap to clone; clones share the same closure.
///
/// # Examples
/// ```
/// use spy_container::args::Args;
/// use spy_container::product::{Object, Produced};
/// use spy_container::registry::Factory;
///
/// struct Clock;
/// impl Object for Clock {}
///
/// let factory = Factory::new(|_| Ok(Clock));
/// assert!(matches!(factory.invoke(Args::new()), Ok(Produced::Object(_))));
/// ```
#[derive(Clone)]
pub struct Factory {
    call: FactoryFn,
}

impl Factory {
    /// Wraps a closure. Its return value is classified through
    /// [`IntoProduced`]; scalars are accepted here and rejected at resolve.
    pub fn new<F, R>(factory: F) -> Self
    where
        F: Fn(Args) -> Result<R, FactoryFault> + Send + Sync + 'static,
        R: IntoProduced,
    {
        Self {
            call: Arc::new(move |args: Args| factory(args).map(IntoProduced::into_produced)),
        }
    }

    /// Wraps an already type-erased factory.
    pub fn from_fn(call: FactoryFn) -> Self {
        Self { call }
    }

    /// Invokes the factory. Faults come back exactly as the closure raised
    /// them.
    #[inline]
    pub fn invoke(&self, args: Args) -> Result<Produced, FactoryFault> {
        (self.call)(args)
    }

    /// Returns `true` if both handles share the same closure.
    pub fn ptr_eq(&self, other: &Factory) -> bool {
        Arc::ptr_eq(&self.call, &other.call)
    }

    /// Recovers a factory from an opaque value.
    ///
    /// Accepts a [`Factory`], a [`FactoryFn`] or a [`BoxedFactoryFn`];
    /// anything else is rejected with [`SpyError::InvalidFactory`].
    pub fn from_any(
        identifier: &Identifier,
        candidate: Box<dyn Any + Send + Sync>,
    ) -> Result<Self, SpyError> {
        let candidate = match candidate.downcast::<Factory>() {
            Ok(factory) => return Ok(*factory),
            Err(candidate) => candidate,
        };

        let candidate = match candidate.downcast::<FactoryFn>() {
            Ok(call) => return Ok(Self::from_fn(*call)),
            Err(candidate) => candidate,
        };

        match candidate.downcast::<BoxedFactoryFn>() {
            Ok(boxed) => Ok(Self::from_fn(Arc::from(*boxed))),
            Err(_) => Err(SpyError::InvalidFactory(InvalidFactoryError {
                identifier: identifier.clone(),
            })),
        }
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("strong_count", &Arc::strong_count(&self.call))
            .finish()
    }
}

/// Stores all injections of one container.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    injections: HashMap<Identifier, Factory>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            injections: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            injections: HashMap::with_capacity(capacity),
        }
    }

    /// Stores a factory, returning the one it replaced.
    pub fn register(&mut self, identifier: Identifier, factory: Factory) -> Option<Factory> {
        let previous = self.injections.insert(identifier.clone(), factory);
        if previous.is_some() {
            debug!(identifier = %identifier, "Overwrote injection");
        } else {
            debug!(identifier = %identifier, "Registered injection");
        }
        previous
    }

    pub fn get(&self, identifier: &str) -> Option<&Factory> {
        let found = self.injections.get(identifier);
        trace!(identifier, found = found.is_some(), "Looked up injection");
        found
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.injections.contains_key(identifier)
    }

    pub fn remove(&mut self, identifier: &str) -> Option<Factory> {
        let removed = self.injections.remove(identifier);
        if removed.is_some() {
            debug!(identifier, "Removed injection");
        }
        removed
    }

    /// Returns the number of registered injections.
    pub fn len(&self) -> usize {
        self.injections.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.injections.is_empty()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.injections.keys()
    }
}
