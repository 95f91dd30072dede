//! # The Container, heart of Spy
//!
//! A service locator: string identifiers bound to factories, resolved on
//! demand with caller-supplied arguments.
//!
//! # Architecture
//! ```text
//! ContainerBuilder ──build()──> Container ──get(id, args)──> Factory ──> Product
//! ```
//!
//! # Examples
//! ```rust
//! use spy_container::prelude::*;
//!
//! struct Logger {
//!     prefix: String,
//! }
//! impl Object for Logger {}
//!
//! let mut container = Container::new();
//! container.set("logger", |mut args| {
//!     let prefix: String = args.take(0)?;
//!     Ok(Logger { prefix })
//! });
//!
//! let logger: Logger = container
//!     .get_as("logger", args![String::from("app")])
//!     .expect("Failed to resolve");
//! assert_eq!(logger.prefix, "app");
//! ```

use std::any::{Any, type_name};
use std::fmt;

use tracing::{debug, trace};

use spy_support::rendering::{shorten_type_name, suggest_similar};

use crate::args::Args;
use crate::error::{
    FactoryFault, InvalidProductError, Result, SpyError, UnknownIdentifierError,
};
use crate::key::Identifier;
use crate::product::{IntoProduced, Object, Produced, Product};
use crate::provider::Provider;
use crate::registry::{Factory, Registry};

const DEFAULT_MAX_SUGGESTIONS: usize = 3;

// ============================================================
// ContainerBuilder
// ============================================================

/// Builds a [`Container`] with registered injections.
///
/// # Examples
/// ```rust,ignore
/// let container = Container::builder()
///     .set("config", |_| Ok(Config::load()))
///     .set("mailer", |args| { ... })
///     .max_suggestions(5)
///     .build();
/// ```
pub struct ContainerBuilder {
    registry: Registry,
    max_suggestions: usize,
}

impl ContainerBuilder {
    fn new() -> Self {
        Self {
            registry: Registry::new(),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }

    /// How many "did you mean" suggestions an unknown identifier error
    /// carries. `0` turns the search off.
    pub fn max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max;
        self
    }

    /// Register a factory. A later registration under the same identifier
    /// wins.
    pub fn set<F, R>(mut self, identifier: impl Into<Identifier>, factory: F) -> Self
    where
        F: Fn(Args) -> std::result::Result<R, FactoryFault> + Send + Sync + 'static,
        R: IntoProduced,
    {
        self.registry.register(identifier.into(), Factory::new(factory));
        self
    }

    /// Register a prebuilt [`Factory`] handle.
    pub fn set_factory(mut self, identifier: impl Into<Identifier>, factory: Factory) -> Self {
        self.registry.register(identifier.into(), factory);
        self
    }

    /// Apply a [`Provider`] module.
    pub fn add_provider(self, provider: &dyn Provider) -> Self {
        let mut container = self.into_container();
        container.add_provider(provider);
        Self {
            max_suggestions: container.max_suggestions,
            registry: container.registry,
        }
    }

    pub fn build(self) -> Container {
        debug!(registered = self.registry.len(), "Building container");
        self.into_container()
    }

    fn into_container(self) -> Container {
        Container {
            registry: self.registry,
            max_suggestions: self.max_suggestions,
        }
    }
}

// ═══════════════════════════════════════════
// Container
// ═══════════════════════════════════════════

/// Maps identifiers to factories and invokes them on request.
///
/// Single-threaded by contract: it holds no locks. Wrap it in a
/// [`SharedContainer`](crate::shared::SharedContainer) to share one
/// registry between threads.
pub struct Container {
    registry: Registry,
    max_suggestions: usize,
}

impl Container {
    /// Create an empty container.
    pub fn new() -> Self {
        ContainerBuilder::new().build()
    }

    /// Create an empty container with room for `capacity` injections.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            registry: Registry::with_capacity(capacity),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }

    /// Create a new builder.
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// Register `factory` under `identifier`, replacing any previous one.
    ///
    /// ```rust
    /// use spy_container::prelude::*;
    ///
    /// struct Clock;
    /// impl Object for Clock {}
    ///
    /// let mut container = Container::new();
    /// container.set("clock", |_| Ok(Clock));
    /// assert!(container.has("clock"));
    /// ```
    pub fn set<F, R>(&mut self, identifier: impl Into<Identifier>, factory: F)
    where
        F: Fn(Args) -> std::result::Result<R, FactoryFault> + Send + Sync + 'static,
        R: IntoProduced,
    {
        self.registry.register(identifier.into(), Factory::new(factory));
    }

    /// Register a prebuilt [`Factory`] handle.
    pub fn set_factory(&mut self, identifier: impl Into<Identifier>, factory: Factory) {
        self.registry.register(identifier.into(), factory);
    }

    /// Register an opaque value, which must be a [`Factory`], a
    /// [`FactoryFn`](crate::registry::FactoryFn) or a
    /// [`BoxedFactoryFn`](crate::registry::BoxedFactoryFn).
    ///
    /// # Errors
    /// Returns [`SpyError::InvalidFactory`] for any other value. The
    /// existing registration under `identifier`, if any, is left alone.
    pub fn set_erased(
        &mut self,
        identifier: impl Into<Identifier>,
        candidate: Box<dyn Any + Send + Sync>,
    ) -> Result<()> {
        let identifier = identifier.into();
        let factory = Factory::from_any(&identifier, candidate)?;
        self.registry.register(identifier, factory);
        Ok(())
    }

    /// Invoke the factory registered under `identifier` with `args`.
    ///
    /// Nothing is cached: every call runs the factory again.
    ///
    /// # Errors
    /// - [`SpyError::UnknownIdentifier`]: nothing registered; no factory runs
    /// - [`SpyError::InvalidProduct`]: the factory returned a scalar or `()`
    /// - [`SpyError::Factory`]: the factory's own error, unchanged
    pub fn get(&self, identifier: &str, args: Args) -> Result<Product> {
        trace!(identifier, args = args.len(), "Resolving");

        let factory = self
            .registry
            .get(identifier)
            .ok_or_else(|| self.unknown(identifier))?;

        invoke(factory, identifier, args)
    }

    /// Like [`get`](Container::get), then downcast the product to `T`.
    ///
    /// # Errors
    /// Everything [`get`](Container::get) returns, plus
    /// [`SpyError::TypeMismatch`] when the product is not a `T`.
    pub fn get_as<T: Object>(&self, identifier: &str, args: Args) -> Result<T> {
        downcast(self.get(identifier, args)?)
    }

    /// Returns `true` if a factory is registered under `identifier`.
    pub fn has(&self, identifier: &str) -> bool {
        self.registry.contains(identifier)
    }

    /// Unregister `identifier`. Removing an absent identifier is a no-op.
    ///
    /// Returns the removed factory, if there was one.
    pub fn remove(&mut self, identifier: &str) -> Option<Factory> {
        self.registry.remove(identifier)
    }

    /// Clone of the factory handle registered under `identifier`.
    pub fn factory(&self, identifier: &str) -> Option<Factory> {
        self.registry.get(identifier).cloned()
    }

    /// Apply a [`Provider`] module.
    pub fn add_provider(&mut self, provider: &dyn Provider) {
        debug!(provider = provider.name(), "Applying provider");
        provider.register(self);
    }

    /// Returns the number of registered injections.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Registered identifiers, in no particular order.
    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.registry.identifiers()
    }

    pub(crate) fn unknown(&self, identifier: &str) -> SpyError {
        let suggestions = suggest_similar(
            identifier,
            self.registry.identifiers().map(Identifier::as_str),
            self.max_suggestions,
        );
        SpyError::UnknownIdentifier(UnknownIdentifierError {
            identifier: Identifier::from(identifier.to_string()),
            suggestions,
        })
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("registered", &self.registry.len())
            .finish()
    }
}

/// Run `factory` and validate what it returned.
pub(crate) fn invoke(factory: &Factory, identifier: &str, args: Args) -> Result<Product> {
    trace!(identifier, "Invoking factory");

    let identifier = Identifier::from(identifier.to_string());
    match factory.invoke(args).map_err(SpyError::Factory)? {
        Produced::Object(object) => Ok(Product::new(identifier, object)),
        Produced::Scalar(name) => Err(invalid_product(identifier, shorten_type_name(name))),
        Produced::Nothing => Err(invalid_product(identifier, "nothing".to_string())),
    }
}

pub(crate) fn downcast<T: Object>(product: Product) -> Result<T> {
    product.downcast::<T>().map_err(|product| SpyError::TypeMismatch {
        identifier: product.identifier().clone(),
        expected: shorten_type_name(type_name::<T>()),
        found: shorten_type_name(product.type_name()),
    })
}

fn invalid_product(identifier: Identifier, found: String) -> SpyError {
    SpyError::InvalidProduct(InvalidProductError { identifier, found })
}

// ═══════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════

pub mod prelude {
    pub use super::{Container, ContainerBuilder};
    pub use crate::args;
    pub use crate::args::{ArgError, Args};
    pub use crate::error::{FactoryFault, Result, SpyError};
    pub use crate::key::Identifier;
    pub use crate::product::{Object, Product};
    pub use crate::provider::Provider;
    pub use crate::registry::Factory;
    pub use crate::shared::SharedContainer;
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
