//! SQL values
//!
//! [`SqlValue`] is the bindable form every statement parameter must reach.
//! A handful of Rust types map onto it directly ("native" types); everything
//! else goes through the adapter registry first.

use std::any::{Any, TypeId};
use std::fmt;

use adapt_kernel::{impl_adaptable, Adapted};
use serde::{Deserialize, Serialize};

/// A value in one of the five SQL storage classes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl_adaptable!(SqlValue);

impl SqlValue {
    /// Returns the storage class name
    pub fn storage_class(&self) -> &'static str {
        match self {
            SqlValue::Null => "NULL",
            SqlValue::Integer(_) => "INTEGER",
            SqlValue::Real(_) => "REAL",
            SqlValue::Text(_) => "TEXT",
            SqlValue::Blob(_) => "BLOB",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Converts a native value without consulting any adapter
    ///
    /// Returns `None` for types that have no lossless SQL form.
    pub fn from_native(value: &dyn Any) -> Option<SqlValue> {
        macro_rules! integers {
            ($($ty:ty),+) => {
                $(
                    if let Some(v) = value.downcast_ref::<$ty>() {
                        return Some(SqlValue::Integer(i64::from(*v)));
                    }
                )+
            };
        }

        if let Some(v) = value.downcast_ref::<SqlValue>() {
            return Some(v.clone());
        }
        if value.is::<()>() {
            return Some(SqlValue::Null);
        }
        integers!(i64, i32, i16, i8, u32, u16, u8, bool);
        if let Some(v) = value.downcast_ref::<f64>() {
            return Some(SqlValue::Real(*v));
        }
        if let Some(v) = value.downcast_ref::<f32>() {
            return Some(SqlValue::Real(f64::from(*v)));
        }
        if let Some(v) = value.downcast_ref::<String>() {
            return Some(SqlValue::Text(v.clone()));
        }
        if let Some(v) = value.downcast_ref::<&'static str>() {
            return Some(SqlValue::Text((*v).to_string()));
        }
        if let Some(v) = value.downcast_ref::<Vec<u8>>() {
            return Some(SqlValue::Blob(v.clone()));
        }
        None
    }

    /// Converts the result of an adaptation into a bindable value
    pub fn from_adapted(adapted: &Adapted) -> Option<SqlValue> {
        Self::from_native(adapted.as_any())
    }

    /// Returns true if values of this type bind without adaptation
    pub fn is_native_type(type_id: TypeId) -> bool {
        native_type_ids().contains(&type_id)
    }
}

fn native_type_ids() -> [TypeId; 15] {
    [
        TypeId::of::<SqlValue>(),
        TypeId::of::<()>(),
        TypeId::of::<i64>(),
        TypeId::of::<i32>(),
        TypeId::of::<i16>(),
        TypeId::of::<i8>(),
        TypeId::of::<u32>(),
        TypeId::of::<u16>(),
        TypeId::of::<u8>(),
        TypeId::of::<bool>(),
        TypeId::of::<f64>(),
        TypeId::of::<f32>(),
        TypeId::of::<String>(),
        TypeId::of::<&'static str>(),
        TypeId::of::<Vec<u8>>(),
    ]
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => f.write_str("NULL"),
            SqlValue::Integer(v) => write!(f, "{}", v),
            SqlValue::Real(v) => write!(f, "{}", v),
            SqlValue::Text(v) => write!(f, "'{}'", v.replace('\'', "''")),
            SqlValue::Blob(v) => {
                f.write_str("X'")?;
                for byte in v {
                    write!(f, "{:02X}", byte)?;
                }
                f.write_str("'")
            }
        }
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Real(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(value: Vec<u8>) -> Self {
        SqlValue::Blob(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_conversions() {
        assert_eq!(SqlValue::from_native(&42i64), Some(SqlValue::Integer(42)));
        assert_eq!(SqlValue::from_native(&7u8), Some(SqlValue::Integer(7)));
        assert_eq!(SqlValue::from_native(&true), Some(SqlValue::Integer(1)));
        assert_eq!(SqlValue::from_native(&1.5f32), Some(SqlValue::Real(1.5)));
        assert_eq!(SqlValue::from_native(&"abc"), Some(SqlValue::Text("abc".into())));
        assert_eq!(SqlValue::from_native(&vec![1u8, 2]), Some(SqlValue::Blob(vec![1, 2])));
        assert_eq!(SqlValue::from_native(&()), Some(SqlValue::Null));
    }

    #[test]
    fn test_lossy_types_are_not_native() {
        assert_eq!(SqlValue::from_native(&u64::MAX), None);
        assert!(!SqlValue::is_native_type(TypeId::of::<u64>()));
        assert!(SqlValue::is_native_type(TypeId::of::<String>()));
    }

    #[test]
    fn test_from_adapted() {
        let adapted = Adapted::new(SqlValue::Text("x".into()));
        assert_eq!(SqlValue::from_adapted(&adapted), Some(SqlValue::Text("x".into())));
        assert_eq!(SqlValue::from_adapted(&Adapted::new(3.25f64)), Some(SqlValue::Real(3.25)));
        assert_eq!(SqlValue::from_adapted(&Adapted::new(vec!["nested"])), None);
    }

    #[test]
    fn test_storage_class_is_distinct_from_type_name() {
        let value = SqlValue::Integer(1);
        assert_eq!(value.storage_class(), "INTEGER");

        let erased: &dyn adapt_kernel::Adaptable = &value;
        assert!(erased.type_name().ends_with("SqlValue"));
    }

    #[test]
    fn test_display_quotes_text_and_blob() {
        assert_eq!(SqlValue::Text("it's".into()).to_string(), "'it''s'");
        assert_eq!(SqlValue::Blob(vec![0xde, 0xad]).to_string(), "X'DEAD'");
        assert_eq!(SqlValue::Null.to_string(), "NULL");
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&SqlValue::Integer(5)).unwrap();
        assert_eq!(json, r#"{"type":"integer","value":5}"#);
        let back: SqlValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SqlValue::Integer(5));
    }
}
