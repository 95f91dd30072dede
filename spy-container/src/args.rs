//! Construction arguments forwarded to factories.
//!
//! The container knows nothing about a factory's parameters, so arguments
//! travel as an ordered list of type-erased values. The factory reads them
//! back by position and type; a mismatch is the factory's fault and is
//! reported as an [`ArgError`].

use std::any::{Any, type_name};
use std::fmt;

use spy_support::rendering::shorten_type_name;

/// Why a factory could not read one of its arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgError {
    /// Fewer arguments were passed than the factory needs.
    #[error("Missing argument #{index}: only {len} argument(s) were passed")]
    Missing { index: usize, len: usize },

    /// The argument exists but has a different type.
    #[error("Argument #{index} is not a {expected}")]
    WrongType { index: usize, expected: String },

    /// The argument was already moved out with [`Args::take`].
    #[error("Argument #{index} was already taken")]
    AlreadyTaken { index: usize },
}

/// Ordered, type-erased arguments for a single factory invocation.
///
/// # Examples
/// ```
/// use spy_container::args::Args;
///
/// let mut args = Args::new().with("smtp.local").with(25u16);
/// assert_eq!(args.len(), 2);
/// assert_eq!(*args.get::<&str>(0).unwrap(), "smtp.local");
/// assert_eq!(args.take::<u16>(1).unwrap(), 25);
/// ```
#[derive(Default)]
pub struct Args {
    values: Vec<Option<Box<dyn Any + Send>>>,
}

impl Args {
    /// Creates an empty argument list.
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Appends an argument.
    pub fn push<T: Any + Send>(&mut self, value: T) {
        self.values.push(Some(Box::new(value)));
    }

    /// Appends an argument, builder style.
    pub fn with<T: Any + Send>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    /// Appends an already boxed argument without boxing it twice.
    pub fn push_boxed(&mut self, value: Box<dyn Any + Send>) {
        self.values.push(Some(value));
    }

    /// Number of arguments passed, taken ones included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrows the argument at `index` as a `T`.
    pub fn get<T: Any>(&self, index: usize) -> Result<&T, ArgError> {
        self.slot(index)?
            .as_ref()
            .ok_or(ArgError::AlreadyTaken { index })?
            .downcast_ref::<T>()
            .ok_or_else(|| wrong_type::<T>(index))
    }

    /// Moves the argument at `index` out as a `T`.
    ///
    /// Positions of the other arguments do not shift. On a type mismatch
    /// the argument stays in place.
    pub fn take<T: Any>(&mut self, index: usize) -> Result<T, ArgError> {
        let len = self.values.len();
        let slot = self
            .values
            .get_mut(index)
            .ok_or(ArgError::Missing { index, len })?;

        match slot.take() {
            None => Err(ArgError::AlreadyTaken { index }),
            Some(value) if value.is::<T>() => value
                .downcast::<T>()
                .map(|value| *value)
                .map_err(|_| wrong_type::<T>(index)),
            Some(value) => {
                *slot = Some(value);
                Err(wrong_type::<T>(index))
            }
        }
    }

    /// Returns `true` if the argument at `index` is present and a `T`.
    pub fn is<T: Any>(&self, index: usize) -> bool {
        matches!(self.values.get(index), Some(Some(value)) if value.is::<T>())
    }

    fn slot(&self, index: usize) -> Result<&Option<Box<dyn Any + Send>>, ArgError> {
        self.values.get(index).ok_or(ArgError::Missing {
            index,
            len: self.values.len(),
        })
    }
}

fn wrong_type<T>(index: usize) -> ArgError {
    ArgError::WrongType {
        index,
        expected: shorten_type_name(type_name::<T>()),
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let taken = self.values.iter().filter(|v| v.is_none()).count();
        f.debug_struct("Args")
            .field("len", &self.values.len())
            .field("taken", &taken)
            .finish()
    }
}

/// Builds an [`Args`] list from a comma-separated sequence of values.
///
/// ```
/// use spy_container::args;
///
/// let args = args!["postgres://localhost", 5u32, true];
/// assert_eq!(args.len(), 3);
/// assert!(args.is::<bool>(2));
///
/// let none = args![];
/// assert!(none.is_empty());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::args::Args::new()
    };
    ($($value:expr),+ $(,)?) => {{
        let mut args = $crate::args::Args::new();
        $(args.push($value);)+
        args
    }};
}
