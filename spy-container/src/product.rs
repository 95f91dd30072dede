//! Products: the objects factories build.
//!
//! Only types that opt into [`Object`] count as products. Factories may
//! still return scalars or `()`; those are classified by [`IntoProduced`]
//! and rejected by the container at resolve time.

use std::any::{Any, type_name};
use std::fmt;

use crate::key::Identifier;

/// Conversion of a sized value into [`Any`] trait objects.
///
/// Blanket-implemented for every `Send + Sync + 'static` type so that
/// `dyn Object` can be downcast.
pub trait AsAny: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;

    fn type_name(&self) -> &'static str;
}

impl<T: Any + Send + Sync> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }

    #[inline]
    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }
}

/// Marker for values a factory may hand out.
///
/// Implement it with `#[derive(Object)]` or a one-line impl. Primitives,
/// strings and `()` do not implement it, so they can never come back
/// from [`Container::get`](crate::container::Container::get).
///
/// ```
/// use spy_container::product::Object;
///
/// struct Logger;
/// impl Object for Logger {}
/// ```
pub trait Object: AsAny {}

/// What a factory invocation yielded, before the container validates it.
pub enum Produced {
    /// An object-like value.
    Object(Box<dyn Object>),
    /// A scalar; carries the type name for diagnostics.
    Scalar(&'static str),
    /// No value at all.
    Nothing,
}

impl fmt::Debug for Produced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Produced::Object(object) => write!(f, "Object({})", (**object).type_name()),
            Produced::Scalar(name) => write!(f, "Scalar({name})"),
            Produced::Nothing => f.write_str("Nothing"),
        }
    }
}

/// Classifies a factory's return value.
pub trait IntoProduced {
    fn into_produced(self) -> Produced;
}

impl<T: Object> IntoProduced for T {
    #[inline]
    fn into_produced(self) -> Produced {
        Produced::Object(Box::new(self))
    }
}

impl IntoProduced for Box<dyn Object> {
    #[inline]
    fn into_produced(self) -> Produced {
        Produced::Object(self)
    }
}

impl IntoProduced for Produced {
    #[inline]
    fn into_produced(self) -> Produced {
        self
    }
}

impl IntoProduced for () {
    #[inline]
    fn into_produced(self) -> Produced {
        Produced::Nothing
    }
}

macro_rules! scalar {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl IntoProduced for $ty {
                #[inline]
                fn into_produced(self) -> Produced {
                    Produced::Scalar(type_name::<$ty>())
                }
            }
        )+
    };
}

scalar!(
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64, bool, char, String, &'static str,
);

/// An object returned by [`Container::get`](crate::container::Container::get).
///
/// Remembers the identifier it was produced under. Downcast it to the
/// concrete type, or keep it as a `Box<dyn Object>`.
pub struct Product {
    identifier: Identifier,
    inner: Box<dyn Object>,
}

impl Product {
    pub(crate) fn new(identifier: Identifier, inner: Box<dyn Object>) -> Self {
        Self { identifier, inner }
    }

    /// Identifier of the factory that built this product.
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Full type name of the product.
    pub fn type_name(&self) -> &'static str {
        (*self.inner).type_name()
    }

    // Deref first: `Box<dyn Object>` is itself `AsAny`.
    pub fn is<T: Object>(&self) -> bool {
        (*self.inner).as_any().is::<T>()
    }

    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        (*self.inner).as_any().downcast_ref::<T>()
    }

    /// Moves the product out as a `T`, or gives it back unchanged.
    pub fn downcast<T: Object>(self) -> std::result::Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }

        match self.inner.into_any().downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => unreachable!("product type was checked before downcasting"),
        }
    }

    /// Drops the identifier and returns the bare object.
    pub fn into_inner(self) -> Box<dyn Object> {
        self.inner
    }
}

impl fmt::Debug for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Product")
            .field("identifier", &self.identifier)
            .field("type", &self.type_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Logger {
        prefix: String,
    }
    impl Object for Logger {}

    struct Mailer;
    impl Object for Mailer {}

    fn product(value: impl Object) -> Product {
        Product::new(Identifier::from("test"), Box::new(value))
    }

    #[test]
    fn objects_are_objects() {
        let produced = Logger { prefix: "app".into() }.into_produced();
        assert!(matches!(produced, Produced::Object(_)));
    }

    #[test]
    fn scalars_are_scalars() {
        assert!(matches!(5i32.into_produced(), Produced::Scalar("i32")));
        assert!(matches!(true.into_produced(), Produced::Scalar("bool")));
        assert!(matches!("x".into_produced(), Produced::Scalar("&str")));
        assert!(matches!(
            String::new().into_produced(),
            Produced::Scalar(name) if name.ends_with("String")
        ));
    }

    #[test]
    fn unit_is_nothing() {
        assert!(matches!(().into_produced(), Produced::Nothing));
    }

    #[test]
    fn boxed_object_passes_through() {
        let boxed: Box<dyn Object> = Box::new(Mailer);
        assert!(matches!(boxed.into_produced(), Produced::Object(_)));
    }

    #[test]
    fn downcast_to_concrete_type() {
        let p = product(Logger { prefix: "app".into() });

        assert!(p.is::<Logger>());
        assert_eq!(p.downcast_ref::<Logger>().unwrap().prefix, "app");
        assert_eq!(
            p.downcast::<Logger>().unwrap(),
            Logger { prefix: "app".into() }
        );
    }

    #[test]
    fn downcast_to_wrong_type_gives_product_back() {
        let p = product(Mailer);

        let p = p.downcast::<Logger>().unwrap_err();
        assert!(p.is::<Mailer>());
        assert_eq!(p.identifier(), "test");
    }

    #[test]
    fn debug_shows_type() {
        let p = product(Mailer);
        let debug = format!("{p:?}");
        assert!(debug.contains("Mailer"));
        assert!(debug.contains("test"));
    }
}
