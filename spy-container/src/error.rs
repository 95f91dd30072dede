//! Error types for Spy container operations.
//!
//! Three faults originate in the container itself: an invalid factory on
//! registration, an unknown identifier on resolve, and a factory that
//! produced something other than an object. Anything a factory raises on
//! its own passes through [`SpyError::Factory`] untouched.

use std::fmt;

use crate::key::Identifier;

/// Any error a factory raises while constructing its product.
///
/// The container hands it back to the caller as-is; downcast it to get
/// the concrete error back.
pub type FactoryFault = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for all Spy operations.
#[derive(Debug, thiserror::Error)]
pub enum SpyError {
    /// A value offered for registration is not a factory.
    #[error("{}", .0)]
    InvalidFactory(InvalidFactoryError),

    /// Nothing is registered under the requested identifier.
    #[error("{}", .0)]
    UnknownIdentifier(UnknownIdentifierError),

    /// The factory ran but returned a scalar or nothing.
    #[error("{}", .0)]
    InvalidProduct(InvalidProductError),

    /// The factory itself failed. Display and source are the factory's own.
    #[error(transparent)]
    Factory(FactoryFault),

    /// The product is an object, but not of the type the caller asked for.
    #[error("Product of `{identifier}` is {found}, expected {expected}")]
    TypeMismatch {
        identifier: Identifier,
        expected: String,
        found: String,
    },
}

impl SpyError {
    /// Returns the factory's own error when this is [`SpyError::Factory`].
    pub fn factory_fault(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            SpyError::Factory(fault) => Some(fault.as_ref()),
            _ => None,
        }
    }

    /// Consumes the error, returning the factory's own error when this is
    /// [`SpyError::Factory`] and `self` otherwise.
    pub fn into_factory_fault(self) -> std::result::Result<FactoryFault, Self> {
        match self {
            SpyError::Factory(fault) => Ok(fault),
            other => Err(other),
        }
    }
}

/// Error when a registration candidate cannot be invoked.
#[derive(Debug)]
pub struct InvalidFactoryError {
    /// Identifier the candidate was offered under
    pub identifier: Identifier,
}

impl fmt::Display for InvalidFactoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Injection failed for `{}`: the value is not a valid factory",
            self.identifier
        )?;
        write!(
            f,
            "\n  Hint: register closures with .set(), or wrap them in Factory::new() before .set_erased()"
        )
    }
}

/// Error when resolving an identifier nobody registered.
///
/// Carries registered identifiers that look similar, if any.
#[derive(Debug)]
pub struct UnknownIdentifierError {
    /// The identifier that was requested
    pub identifier: Identifier,
    /// Registered identifiers close to the requested one
    pub suggestions: Vec<String>,
}

impl fmt::Display for UnknownIdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Attempt to get unknown identifier `{}`", self.identifier)?;

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n    - {suggestion}")?;
            }
        }

        write!(
            f,
            "\n  Hint: Did you forget to call .set(\"{}\", ...)?",
            self.identifier
        )
    }
}

/// Error when a factory returns a non-object value.
#[derive(Debug)]
pub struct InvalidProductError {
    /// The identifier whose factory misbehaved
    pub identifier: Identifier,
    /// What came back instead: a short type name, or `nothing`
    pub found: String,
}

impl fmt::Display for InvalidProductError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unexpected return from factory `{}`: expected an object, got {} instead",
            self.identifier, self.found
        )?;
        write!(
            f,
            "\n  Hint: products must implement Object (#[derive(Object)])"
        )
    }
}

/// Convenient Result type for Spy operations.
pub type Result<T> = std::result::Result<T, SpyError>;
