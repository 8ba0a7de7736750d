//! Protocol markers
//!
//! A [`Protocol`] names the representation a value is being adapted to. It is
//! compared by identity: every call to [`Protocol::new`] mints a fresh
//! [`ProtocolId`], and clones share it. Two protocols that merely share a name
//! are different registry keys.
//!
//! A protocol may carry a [`SelfAdapt`] capability that adapts arbitrary
//! values without a registry entry.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::AdaptResult;
use crate::value::{Adaptable, Adapted};

static NEXT_PROTOCOL_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a protocol marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProtocolId(u64);

impl ProtocolId {
    fn next() -> Self {
        Self(NEXT_PROTOCOL_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProtocolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PROTO-{}", self.0)
    }
}

/// Capability of a protocol to adapt values on demand
///
/// Same contract as [`Conform`](crate::Conform): `Ok(None)` or a type
/// mismatch declines, anything else is final. Closures taking
/// `&dyn Adaptable` implement this trait directly.
pub trait SelfAdapt: Send + Sync {
    fn self_adapt(&self, value: &dyn Adaptable) -> AdaptResult<Option<Adapted>>;
}

impl<F> SelfAdapt for F
where
    F: Fn(&dyn Adaptable) -> AdaptResult<Option<Adapted>> + Send + Sync,
{
    fn self_adapt(&self, value: &dyn Adaptable) -> AdaptResult<Option<Adapted>> {
        self(value)
    }
}

struct ProtocolInner {
    id: ProtocolId,
    name: String,
    self_adapt: Option<Box<dyn SelfAdapt>>,
}

/// Opaque discriminant identifying a target representation
#[derive(Clone)]
pub struct Protocol {
    inner: Arc<ProtocolInner>,
}

impl Protocol {
    /// Creates a protocol marker with no self-adapt capability
    pub fn new(name: impl Into<String>) -> Self {
        Self::build(name.into(), None)
    }

    /// Creates a protocol marker that can adapt values itself
    ///
    /// # Example
    ///
    /// ```rust
    /// use adapt_kernel::{Adaptable, Adapted, Protocol};
    ///
    /// let quoted = Protocol::with_self_adapt("Quoted", |value: &dyn Adaptable| {
    ///     Ok(value
    ///         .as_any()
    ///         .downcast_ref::<String>()
    ///         .map(|s| Adapted::new(format!("'{}'", s))))
    /// });
    /// assert!(quoted.self_adapter().is_some());
    /// ```
    pub fn with_self_adapt<F>(name: impl Into<String>, self_adapt: F) -> Self
    where
        F: Fn(&dyn Adaptable) -> AdaptResult<Option<Adapted>> + Send + Sync + 'static,
    {
        Self::build(name.into(), Some(Box::new(self_adapt)))
    }

    /// Creates a protocol marker around a named [`SelfAdapt`] implementation
    pub fn with_self_adapter(name: impl Into<String>, self_adapter: impl SelfAdapt + 'static) -> Self {
        Self::build(name.into(), Some(Box::new(self_adapter)))
    }

    fn build(name: String, self_adapt: Option<Box<dyn SelfAdapt>>) -> Self {
        Self {
            inner: Arc::new(ProtocolInner {
                id: ProtocolId::next(),
                name,
                self_adapt,
            }),
        }
    }

    pub fn id(&self) -> ProtocolId {
        self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns the protocol's self-adapt capability, if it has one
    pub fn self_adapter(&self) -> Option<&dyn SelfAdapt> {
        self.inner.self_adapt.as_deref()
    }
}

impl PartialEq for Protocol {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Protocol {}

impl Hash for Protocol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Debug for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Protocol")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("self_adapt", &self.inner.self_adapt.is_some())
            .finish()
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_not_name() {
        let a = Protocol::new("Bindable");
        let b = Protocol::new("Bindable");
        assert_ne!(a, b);
        assert_ne!(a.id(), b.id());
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_self_adapter_presence() {
        let plain = Protocol::new("Plain");
        assert!(plain.self_adapter().is_none());

        let adapting = Protocol::with_self_adapt("Adapting", |_: &dyn Adaptable| Ok(None));
        assert!(adapting.self_adapter().is_some());
    }

    #[test]
    fn test_display_uses_name() {
        let protocol = Protocol::new("PrepareProtocol");
        assert_eq!(protocol.to_string(), "PrepareProtocol");
        assert!(format!("{:?}", protocol).contains("self_adapt: false"));
    }
}
