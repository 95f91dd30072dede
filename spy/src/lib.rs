//! # Spy: a minimal service locator for Rust
//!
//! Bind string identifiers to factories, then build objects by identifier
//! with whatever arguments the factory expects.
//!
//! ```rust
//! use spy::prelude::*;
//!
//! #[derive(Object)]
//! struct Logger;
//!
//! let mut container = Container::new();
//! container.set("logger", |_| Ok(Logger));
//!
//! assert!(container.has("logger"));
//! let _logger: Logger = container.get_as("logger", args![]).unwrap();
//!
//! container.remove("logger");
//! assert!(container.get("logger", args![]).is_err());
//! ```

// Lets `#[derive(Object)]` expand to `::spy::Object` inside this crate too.
extern crate self as spy;

pub use spy_container::*;
pub use spy_macros::Object;
pub use spy_support::rendering;

pub mod prelude {
    pub use spy_container::prelude::*;
    pub use spy_macros::Object;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Object)]
    struct Logger {
        prefix: String,
    }

    #[derive(Object, Debug, PartialEq)]
    struct Echo {
        host: String,
        port: u16,
        secure: bool,
    }

    #[derive(Object)]
    struct Wrapper<T: Send + Sync + 'static> {
        inner: T,
    }

    #[derive(Object, Debug, PartialEq)]
    enum Transport {
        Smtp,
        Sendmail,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("mailer offline")]
    struct MailerOffline;

    #[test]
    fn logger_scenario() {
        let mut container = Container::new();
        container.set("logger", |_| Ok(Logger { prefix: "app".into() }));
        assert!(container.has("logger"));

        let logger: Logger = container.get_as("logger", args![]).unwrap();
        assert_eq!(logger.prefix, "app");

        container.remove("logger");
        assert!(!container.has("logger"));
        assert!(matches!(
            container.get("logger", args![]),
            Err(SpyError::UnknownIdentifier(_))
        ));
    }

    #[test]
    fn echo_receives_arguments_in_order() {
        let mut container = Container::new();
        container.set("echo", |mut args| {
            Ok(Echo {
                host: args.take(0)?,
                port: args.take(1)?,
                secure: args.take(2)?,
            })
        });

        let echo: Echo = container
            .get_as("echo", args![String::from("smtp.local"), 587u16, true])
            .unwrap();
        assert_eq!(
            echo,
            Echo {
                host: "smtp.local".into(),
                port: 587,
                secure: true
            }
        );
    }

    #[test]
    fn overwrite_invokes_latest_only() {
        let first = Arc::new(AtomicUsize::new(0));
        let mut container = Container::new();
        container.set("transport", {
            let first = first.clone();
            move |_| {
                first.fetch_add(1, Ordering::SeqCst);
                Ok(Transport::Smtp)
            }
        });
        container.set("transport", |_| Ok(Transport::Sendmail));

        let transport: Transport = container.get_as("transport", args![]).unwrap();
        assert_eq!(transport, Transport::Sendmail);
        assert_eq!(first.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn non_callable_is_rejected() {
        let mut container = Container::new();
        container.set("transport", |_| Ok(Transport::Smtp));

        let err = container
            .set_erased("transport", Box::new(String::from("smtp")))
            .unwrap_err();
        assert!(matches!(err, SpyError::InvalidFactory(_)));

        let transport: Transport = container.get_as("transport", args![]).unwrap();
        assert_eq!(transport, Transport::Smtp);
    }

    #[test]
    fn primitive_products_are_rejected() {
        let mut container = Container::new();
        container.set("five", |_| Ok(5u64));
        container.set("void", |_| Ok(()));

        for id in ["five", "void"] {
            assert!(matches!(
                container.get(id, args![]),
                Err(SpyError::InvalidProduct(_))
            ));
        }
    }

    #[test]
    fn factory_fault_is_passed_through() {
        let mut container = Container::new();
        container.set("mailer", |_| -> std::result::Result<Logger, FactoryFault> {
            Err(Box::new(MailerOffline))
        });

        let err = container.get("mailer", args![]).unwrap_err();
        assert!(!matches!(
            err,
            SpyError::InvalidProduct(_) | SpyError::UnknownIdentifier(_)
        ));
        let fault = err.into_factory_fault().unwrap();
        assert!(fault.downcast::<MailerOffline>().is_ok());
    }

    #[test]
    fn fresh_instance_every_time() {
        let mut container = Container::new();
        container.set("logger", |_| Ok(Logger { prefix: String::new() }));

        let a = container.get("logger", args![]).unwrap().into_inner();
        let b = container.get("logger", args![]).unwrap().into_inner();

        let a = &*a as *const dyn Object;
        let b = &*b as *const dyn Object;
        assert!(!std::ptr::addr_eq(a, b));
    }

    #[test]
    fn generic_products_derive() {
        let mut container = Container::new();
        container.set("wrapped", |_| Ok(Wrapper { inner: 3u8 }));

        let wrapped: Wrapper<u8> = container.get_as("wrapped", args![]).unwrap();
        assert_eq!(wrapped.inner, 3);
    }

    #[test]
    fn suggestions_use_support_crate() {
        let container = Container::builder()
            .set("mail.transport", |_| Ok(Transport::Smtp))
            .build();

        let err = container.get("mail.transprot", args![]).unwrap_err();
        assert!(err.to_string().contains("mail.transport"));
    }
}
