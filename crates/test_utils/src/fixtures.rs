//! Pre-built Test Fixtures
//!
//! Provides sample values with and without conform capabilities, and
//! protocol markers with and without self-adapt capabilities.

use std::any::Any;

use adapt_kernel::{
    impl_adaptable, AdaptError, AdaptResult, Adaptable, Adapted, Conform, Protocol, ProtocolId,
};
use infra_bind::SqlValue;

/// A 2D point that conforms itself to one prepare protocol as `"x;y"` text
///
/// The protocol is matched by identity, so another marker that merely
/// shares its name is declined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    prepare: ProtocolId,
}

impl Point {
    pub fn new(x: f64, y: f64, prepare: &Protocol) -> Self {
        Self {
            x,
            y,
            prepare: prepare.id(),
        }
    }
}

impl Conform for Point {
    fn conform(&self, protocol: &Protocol) -> AdaptResult<Option<Adapted>> {
        if protocol.id() != self.prepare {
            return Ok(None);
        }
        Ok(Some(Adapted::new(SqlValue::Text(format!("{};{}", self.x, self.y)))))
    }
}

impl Adaptable for Point {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn conformer(&self) -> Option<&dyn Conform> {
        Some(self)
    }
}

/// Temperature with no conform capability; needs a registered adapter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Celsius(pub f64);

impl_adaptable!(Celsius);

/// Absolute temperature that refuses negative readings
///
/// Conforms to any protocol as a `REAL`, failing with
/// `AdaptError::InvalidValue` below absolute zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kelvin(pub f64);

impl Conform for Kelvin {
    fn conform(&self, _protocol: &Protocol) -> AdaptResult<Option<Adapted>> {
        if self.0 < 0.0 {
            return Err(AdaptError::invalid_value(format!(
                "{} K is below absolute zero",
                self.0
            )));
        }
        Ok(Some(Adapted::new(SqlValue::Real(self.0))))
    }
}

impl Adaptable for Kelvin {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn conformer(&self) -> Option<&dyn Conform> {
        Some(self)
    }
}

/// A value nothing knows how to adapt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opaque;

impl_adaptable!(Opaque);

/// Fixture for protocol markers
pub struct ProtocolFixtures;

impl ProtocolFixtures {
    /// A plain marker with no self-adapt capability
    pub fn bindable() -> Protocol {
        Protocol::new("Bindable")
    }

    /// A marker that quotes `String` values itself
    ///
    /// Raises `AdaptError::TypeMismatch` for every other type, which the
    /// resolver treats as a decline.
    pub fn quoting() -> Protocol {
        Protocol::with_self_adapt("Quoting", |value: &dyn Adaptable| {
            match value.as_any().downcast_ref::<String>() {
                Some(text) => Ok(Some(Adapted::new(format!("'{}'", text.replace('\'', "''"))))),
                None => Err(AdaptError::type_mismatch("String", value.type_name())),
            }
        })
    }

    /// A marker whose self-adapt capability always declines
    pub fn declining() -> Protocol {
        Protocol::with_self_adapt("Declining", |_: &dyn Adaptable| Ok(None))
    }
}
