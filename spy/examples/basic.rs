//! Basic example of the Spy service locator.
//!
//! Run with `RUST_LOG=spy_container=trace` to see every registration and
//! resolve.

use spy::prelude::*;
use tracing_subscriber::EnvFilter;

// === Define your products ===

#[derive(Object)]
struct Logger {
    prefix: String,
}

impl Logger {
    fn log(&self, msg: &str) {
        println!("[{}] {msg}", self.prefix);
    }
}

#[derive(Object)]
struct Mailer {
    host: String,
    port: u16,
}

#[derive(Debug, thiserror::Error)]
#[error("no SMTP relay configured for {0}")]
struct NoRelay(String);

// === Group registrations into a provider ===

struct MailProvider;

impl Provider for MailProvider {
    fn register(&self, container: &mut Container) {
        container.set("mailer", |mut args| {
            let host: String = args.take(0)?;
            if host.is_empty() {
                return Err(Box::new(NoRelay("empty host".into())) as FactoryFault);
            }
            let port = args.take::<u16>(1).unwrap_or(25);
            Ok(Mailer { host, port })
        });
    }
}

fn main() -> spy::Result<()> {
    // Initialize tracing (logging)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("spy_container=debug")),
        )
        .init();

    let mut container = Container::builder()
        .set("logger", |mut args| {
            let prefix = args.take::<&str>(0).unwrap_or("app");
            Ok(Logger { prefix: prefix.to_string() })
        })
        .add_provider(&MailProvider)
        .build();

    tracing::info!(?container, "Container built");

    // === Resolve with and without arguments ===
    let logger: Logger = container.get_as("logger", args![])?;
    logger.log("container ready");

    let audit: Logger = container.get_as("logger", args!["audit"])?;
    audit.log("separate instance, separate prefix");

    let mailer: Mailer = container.get_as("mailer", args![String::from("smtp.local"), 587u16])?;
    logger.log(&format!("mailer on {}:{}", mailer.host, mailer.port));

    // === Errors ===
    if let Err(err) = container.get("maler", args![]) {
        println!("{err}");
    }

    if let Err(err) = container.get("mailer", args![String::new()]) {
        println!("factory failed: {err}");
    }

    container.set("port", |_| Ok(8080u16));
    if let Err(err) = container.get("port", args![]) {
        println!("{err}");
    }

    container.remove("port");
    println!("has port: {}", container.has("port"));

    Ok(())
}
