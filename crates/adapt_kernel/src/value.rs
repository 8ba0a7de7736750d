//! Adaptable values and adapted objects
//!
//! Any value handed to the resolver implements [`Adaptable`]. The trait gives
//! the resolver the value's exact runtime type (for registry lookup) and an
//! optional [`Conform`] capability through which the value can adapt itself.
//!
//! The result of an adaptation is an [`Adapted`]: a shared, type-erased
//! object that the consumer downcasts to the representation it expects.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::AdaptResult;
use crate::protocol::Protocol;

/// A value that can be handed to the resolver
///
/// Types without a conform capability only need `as_any`; the
/// [`impl_adaptable!`](crate::impl_adaptable) macro writes that for them.
///
/// ```rust
/// use std::any::Any;
/// use adapt_kernel::{Adaptable, Adapted, AdaptResult, Conform, Protocol};
///
/// #[derive(Debug)]
/// struct Point { x: f64, y: f64 }
///
/// impl Conform for Point {
///     fn conform(&self, _protocol: &Protocol) -> AdaptResult<Option<Adapted>> {
///         Ok(Some(Adapted::new(format!("{};{}", self.x, self.y))))
///     }
/// }
///
/// impl Adaptable for Point {
///     fn as_any(&self) -> &dyn Any { self }
///     fn conformer(&self) -> Option<&dyn Conform> { Some(self) }
/// }
/// ```
pub trait Adaptable: Any + Send + Sync + fmt::Debug {
    /// Returns the value as `Any` so the concrete type can be recovered
    fn as_any(&self) -> &dyn Any;

    /// Returns the concrete type name, for diagnostics only
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the value's self-conform capability, if it has one
    fn conformer(&self) -> Option<&dyn Conform> {
        None
    }
}

impl<'a> dyn Adaptable + 'a {
    /// Returns the registry key component for this value's exact type
    ///
    /// Always derived from `as_any`, so implementors cannot redirect lookup.
    pub fn type_key(&self) -> TypeKey {
        TypeKey::from_parts(Any::type_id(self.as_any()), self.type_name())
    }
}

/// Capability of a value to adapt itself to a protocol
///
/// `Ok(None)` declines. An `AdaptError::TypeMismatch` also declines; any other
/// error is final for the whole adaptation.
pub trait Conform: Send + Sync {
    fn conform(&self, protocol: &Protocol) -> AdaptResult<Option<Adapted>>;
}

/// Identity of a concrete value type
///
/// Equality and hashing use the `TypeId` only; the name is carried for
/// log and error messages.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Returns the key for the concrete type `T`
    pub fn of<T: Adaptable>() -> Self {
        Self::from_parts(TypeId::of::<T>(), std::any::type_name::<T>())
    }

    pub(crate) fn from_parts(id: TypeId, name: &'static str) -> Self {
        Self { id, name }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

/// The protocol-conformant form produced by an adaptation
///
/// Clones share one allocation, so a fallback handed to the resolver comes
/// back as the very same object (see [`Adapted::ptr_eq`]).
#[derive(Clone)]
pub struct Adapted {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Adapted {
    /// Wraps a value as an adapted object
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wraps an already shared value without copying it
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            inner: value,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Returns true if the adapted object is a `T`
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Recovers the shared `T`, or hands the object back if it is not a `T`
    pub fn downcast<T: Any + Send + Sync>(self) -> Result<Arc<T>, Self> {
        let type_name = self.type_name;
        self.inner
            .downcast::<T>()
            .map_err(|inner| Self { inner, type_name })
    }

    /// Returns the adapted object as `Any`
    pub fn as_any(&self) -> &dyn Any {
        &*self.inner
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns true if both handles refer to the same allocation
    pub fn ptr_eq(&self, other: &Adapted) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.inner), Arc::as_ptr(&other.inner))
    }
}

impl fmt::Debug for Adapted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Adapted({})", self.type_name)
    }
}

/// Implements [`Adaptable`] for types that carry no conform capability
///
/// ```rust
/// #[derive(Debug)]
/// struct Celsius(f64);
///
/// adapt_kernel::impl_adaptable!(Celsius);
/// ```
#[macro_export]
macro_rules! impl_adaptable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Adaptable for $ty {
                fn as_any(&self) -> &dyn ::std::any::Any {
                    self
                }
            }
        )+
    };
}

impl_adaptable!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    isize,
    f32,
    f64,
    String,
    &'static str,
    Vec<u8>,
);

impl_adaptable!(
    chrono::NaiveDate,
    chrono::NaiveTime,
    chrono::NaiveDateTime,
    chrono::DateTime<chrono::Utc>,
);
