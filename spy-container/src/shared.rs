//! A container handle that can be shared between threads.
//!
//! [`Container`] itself takes no locks. [`SharedContainer`] puts one behind
//! an `Arc<RwLock<_>>` for applications that keep a single registry and
//! hand it to several threads.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::args::Args;
use crate::container::{self, Container};
use crate::error::{FactoryFault, Result};
use crate::key::Identifier;
use crate::product::{IntoProduced, Object, Product};
use crate::registry::Factory;

/// Cloneable, lock-guarded handle to one [`Container`].
///
/// Factories run *outside* the lock, so a factory may resolve other
/// injections from the same handle.
///
/// # Examples
/// ```rust
/// use spy_container::prelude::*;
///
/// struct Clock;
/// impl Object for Clock {}
///
/// let shared = SharedContainer::new(Container::new());
/// shared.set("clock", |_| Ok(Clock));
///
/// let handle = shared.clone();
/// std::thread::spawn(move || {
///     assert!(handle.get("clock", Args::new()).is_ok());
/// })
/// .join()
/// .unwrap();
/// ```
#[derive(Clone, Default)]
pub struct SharedContainer {
    inner: Arc<RwLock<Container>>,
}

impl SharedContainer {
    pub fn new(container: Container) -> Self {
        Self {
            inner: Arc::new(RwLock::new(container)),
        }
    }

    /// See [`Container::set`].
    pub fn set<F, R>(&self, identifier: impl Into<Identifier>, factory: F)
    where
        F: Fn(Args) -> std::result::Result<R, FactoryFault> + Send + Sync + 'static,
        R: IntoProduced,
    {
        let factory = Factory::new(factory);
        self.inner.write().set_factory(identifier, factory);
    }

    /// See [`Container::set_erased`].
    pub fn set_erased(
        &self,
        identifier: impl Into<Identifier>,
        candidate: Box<dyn Any + Send + Sync>,
    ) -> Result<()> {
        self.inner.write().set_erased(identifier, candidate)
    }

    /// See [`Container::get`].
    pub fn get(&self, identifier: &str, args: Args) -> Result<Product> {
        let factory = {
            let guard = self.inner.read();
            guard.factory(identifier).ok_or_else(|| guard.unknown(identifier))?
        };

        container::invoke(&factory, identifier, args)
    }

    /// See [`Container::get_as`].
    pub fn get_as<T: Object>(&self, identifier: &str, args: Args) -> Result<T> {
        container::downcast(self.get(identifier, args)?)
    }

    pub fn has(&self, identifier: &str) -> bool {
        self.inner.read().has(identifier)
    }

    /// See [`Container::remove`].
    pub fn remove(&self, identifier: &str) -> Option<Factory> {
        self.inner.write().remove(identifier)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Run `f` with exclusive access, e.g. to apply several registrations
    /// atomically.
    pub fn with_mut<T>(&self, f: impl FnOnce(&mut Container) -> T) -> T {
        f(&mut self.inner.write())
    }
}

impl From<Container> for SharedContainer {
    fn from(container: Container) -> Self {
        Self::new(container)
    }
}

impl fmt::Debug for SharedContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedContainer")
            .field("registered", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpyError;
    use std::thread;

    struct Config {
        url: String,
    }
    impl Object for Config {}

    struct Repository {
        url: String,
    }
    impl Object for Repository {}

    #[test]
    fn basic_operations() {
        let shared = SharedContainer::default();
        assert!(shared.is_empty());

        shared.set("config", |_| Ok(Config { url: "db://".into() }));
        assert!(shared.has("config"));
        assert_eq!(shared.len(), 1);

        let config: Config = shared.get_as("config", Args::new()).unwrap();
        assert_eq!(config.url, "db://");

        assert!(shared.remove("config").is_some());
        assert!(shared.remove("config").is_none());
        assert!(matches!(
            shared.get("config", Args::new()),
            Err(SpyError::UnknownIdentifier(_))
        ));
    }

    #[test]
    fn factory_can_resolve_from_same_handle() {
        let shared = SharedContainer::new(Container::new());
        shared.set("config", |_| Ok(Config { url: "db://main".into() }));

        let handle = shared.clone();
        shared.set("repository", move |_| {
            let config: Config = handle.get_as("config", Args::new())?;
            Ok(Repository { url: config.url })
        });

        let repo: Repository = shared.get_as("repository", Args::new()).unwrap();
        assert_eq!(repo.url, "db://main");
    }

    #[test]
    fn visible_across_threads() {
        let shared = SharedContainer::from(Container::new());

        let writers: Vec<_> = (0..4)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    shared.set(format!("config.{i}"), move |_| {
                        Ok(Config { url: format!("db://{i}") })
                    });
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        assert_eq!(shared.len(), 4);
        let config: Config = shared.get_as("config.3", Args::new()).unwrap();
        assert_eq!(config.url, "db://3");
    }

    #[test]
    fn invalid_factory_keeps_previous() {
        let shared = SharedContainer::default();
        shared.set("config", |_| Ok(Config { url: "kept".into() }));

        assert!(shared.set_erased("config", Box::new(1u8)).is_err());
        let config: Config = shared.get_as("config", Args::new()).unwrap();
        assert_eq!(config.url, "kept");
    }

    #[test]
    fn with_mut_batches_registrations() {
        let shared = SharedContainer::default();
        shared.with_mut(|container| {
            container.set("a", |_| Ok(Config { url: "a".into() }));
            container.set("b", |_| Ok(Config { url: "b".into() }));
        });

        assert_eq!(shared.len(), 2);
    }
}
