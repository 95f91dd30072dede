//! Core container implementation for the Spy service locator.

pub mod args;
pub mod container;
pub mod error;
pub mod key;
pub mod product;
pub mod provider;
pub mod registry;
pub mod shared;

pub use args::{ArgError, Args};
pub use container::{Container, ContainerBuilder, prelude};
pub use error::{FactoryFault, Result, SpyError};
pub use key::Identifier;
pub use product::{IntoProduced, Object, Produced, Product};
pub use provider::Provider;
pub use registry::Factory;
pub use shared::SharedContainer;
