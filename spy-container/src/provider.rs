//! Provider trait: a module of related registrations.
//!
//! Providers group injections that belong together, so an application can
//! wire itself from a handful of modules instead of one long list.
//!
//! # Examples
//! ```rust
//! use spy_container::prelude::*;
//!
//! struct Mailer {
//!     host: String,
//! }
//! impl Object for Mailer {}
//!
//! struct MailProvider;
//!
//! impl Provider for MailProvider {
//!     fn register(&self, container: &mut Container) {
//!         container.set("mailer", |mut args| {
//!             Ok(Mailer { host: args.take(0)? })
//!         });
//!     }
//! }
//!
//! let container = Container::builder().add_provider(&MailProvider).build();
//! assert!(container.has("mailer"));
//! ```

use crate::container::Container;

/// A module that registers related injections into a container.
pub trait Provider {
    /// Register injections into the container.
    ///
    /// Registrations follow the usual rule: the last one for an identifier
    /// wins, including ones made by earlier providers.
    fn register(&self, container: &mut Container);

    /// Optional: human-readable name for logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
