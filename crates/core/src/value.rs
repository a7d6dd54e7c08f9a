//! Value types for the cache facade
//!
//! This module defines:
//! - Value: closed tagged union over every storable type
//! - ValueKind: the variant tag used by typed accessors and dispatch
//!
//! ## Type Rules
//!
//! - Exactly one variant is stored per key at a time
//! - No implicit type coercions; `Int(1) != Long(1)` and `Float(1.0) != Double(1.0)`
//! - `Bytes` are not `String`
//! - Float/Double use IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`
//! - `Null` is the absent sentinel: storing it means "remove", and it is
//!   never returned as a stored value

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Canonical value type for all cache surfaces
///
/// Nine storable variants plus `Null`, which marks absence. Different
/// variants are NEVER equal, even when they hold the same "number":
/// `Int(1) != Long(1)`, `Bytes(b"x") != String("x")`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// Absent sentinel; `put(key, Null)` is defined as `remove(key)`
    Null,
    /// Boolean value
    Bool(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 64-bit signed integer
    Long(i64),
    /// 32-bit floating point (IEEE-754)
    Float(f32),
    /// 64-bit floating point (IEEE-754)
    Double(f64),
    /// UTF-8 string
    String(String),
    /// Unordered set of UTF-8 strings
    StringSet(HashSet<String>),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Structured record, already run through the byte codec
    Record(Vec<u8>),
}

/// Variant tag for [`Value`]
///
/// This is what the typed accessors and the type dispatcher branch on.
/// `Null` has no kind: it denotes absence, not a storable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// Boolean flag
    Bool,
    /// 32-bit integer
    Int,
    /// 64-bit integer
    Long,
    /// Single-precision float
    Float,
    /// Double-precision float
    Double,
    /// UTF-8 string
    String,
    /// Set of strings
    StringSet,
    /// Byte sequence
    Bytes,
    /// Structured record (codec-encoded)
    Record,
}

impl ValueKind {
    /// Every storable kind, in declaration order
    pub const ALL: [ValueKind; 9] = [
        ValueKind::Bool,
        ValueKind::Int,
        ValueKind::Long,
        ValueKind::Float,
        ValueKind::Double,
        ValueKind::String,
        ValueKind::StringSet,
        ValueKind::Bytes,
        ValueKind::Record,
    ];

    /// Stable lowercase name; also used as the slot tag by typed-slot engines
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Long => "long",
            ValueKind::Float => "float",
            ValueKind::Double => "double",
            ValueKind::String => "string",
            ValueKind::StringSet => "string_set",
            ValueKind::Bytes => "bytes",
            ValueKind::Record => "record",
        }
    }

    /// The variant-specific zero default
    ///
    /// Scalars default to `0`/`0.0`/`false`; the container kinds (string,
    /// set, bytes, record) default to `Null`, i.e. "absent".
    pub fn zero_default(&self) -> Value {
        match self {
            ValueKind::Bool => Value::Bool(false),
            ValueKind::Int => Value::Int(0),
            ValueKind::Long => Value::Long(0),
            ValueKind::Float => Value::Float(0.0),
            ValueKind::Double => Value::Double(0.0),
            ValueKind::String | ValueKind::StringSet | ValueKind::Bytes | ValueKind::Record => {
                Value::Null
            }
        }
    }
}

// Custom PartialEq implementation for IEEE-754 float semantics
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            // IEEE-754: NaN != NaN, -0.0 == 0.0
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::StringSet(a), Value::StringSet(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            // Different variants are NEVER equal
            _ => false,
        }
    }
}

impl Value {
    /// Get the variant tag, or `None` for `Null`
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(ValueKind::Bool),
            Value::Int(_) => Some(ValueKind::Int),
            Value::Long(_) => Some(ValueKind::Long),
            Value::Float(_) => Some(ValueKind::Float),
            Value::Double(_) => Some(ValueKind::Double),
            Value::String(_) => Some(ValueKind::String),
            Value::StringSet(_) => Some(ValueKind::StringSet),
            Value::Bytes(_) => Some(ValueKind::Bytes),
            Value::Record(_) => Some(ValueKind::Record),
        }
    }

    /// Check if this is the absent sentinel
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i32 if this is an Int value
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as i64 if this is a Long value
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(l) => Some(*l),
            _ => None,
        }
    }

    /// Get as f32 if this is a Float value
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as f64 if this is a Double value
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &HashSet if this is a StringSet value
    pub fn as_string_set(&self) -> Option<&HashSet<String>> {
        match self {
            Value::StringSet(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &[u8] if this is a Bytes value
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Get the encoded record payload if this is a Record value
    pub fn as_record(&self) -> Option<&[u8]> {
        match self {
            Value::Record(b) => Some(b),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i)
    }
}

impl From<i64> for Value {
    fn from(l: i64) -> Self {
        Value::Long(l)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<HashSet<String>> for Value {
    fn from(s: HashSet<String>) -> Self {
        Value::StringSet(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_value_null() {
        let value = Value::Null;
        assert!(value.is_null());
        assert_eq!(value.kind(), None);
    }

    #[test]
    fn test_value_bool() {
        let value = Value::Bool(true);
        assert_eq!(value.as_bool(), Some(true));
        assert_eq!(value.kind(), Some(ValueKind::Bool));
    }

    #[test]
    fn test_value_int_and_long() {
        assert_eq!(Value::Int(42).as_int(), Some(42));
        assert_eq!(Value::Long(-7).as_long(), Some(-7));
        assert_eq!(Value::Int(i32::MIN).as_int(), Some(i32::MIN));
        assert_eq!(Value::Long(i64::MAX).as_long(), Some(i64::MAX));
    }

    #[test]
    fn test_value_float_and_double() {
        assert_eq!(Value::Float(2.5).as_float(), Some(2.5));
        assert_eq!(Value::Double(3.25).as_double(), Some(3.25));
    }

    #[test]
    fn test_value_string() {
        let value = Value::String("hello world".to_string());
        assert_eq!(value.as_str(), Some("hello world"));
        assert_eq!(value.kind(), Some(ValueKind::String));
    }

    #[test]
    fn test_value_string_set() {
        let value = Value::StringSet(set_of(&["a", "b"]));
        assert_eq!(value.as_string_set().unwrap().len(), 2);
        assert!(value.as_string_set().unwrap().contains("a"));
    }

    #[test]
    fn test_value_bytes_and_record() {
        let bytes = vec![1u8, 2, 3];
        assert_eq!(Value::Bytes(bytes.clone()).as_bytes(), Some(bytes.as_slice()));
        assert_eq!(Value::Record(bytes.clone()).as_record(), Some(bytes.as_slice()));
        // Same payload, different variants
        assert_ne!(Value::Bytes(bytes.clone()), Value::Record(bytes));
    }

    // Different variants are NEVER equal
    #[test]
    fn test_cross_variant_inequality() {
        assert_ne!(Value::Int(1), Value::Long(1));
        assert_ne!(Value::Float(1.0), Value::Double(1.0));
        assert_ne!(Value::Int(0), Value::Bool(false));
        assert_ne!(Value::String("x".into()), Value::Bytes(b"x".to_vec()));
        assert_ne!(Value::Null, Value::Int(0));
        assert_ne!(Value::Null, Value::String(String::new()));
    }

    // IEEE-754 float equality
    #[test]
    fn test_nan_not_equal_nan() {
        assert_ne!(Value::Float(f32::NAN), Value::Float(f32::NAN));
        assert_ne!(Value::Double(f64::NAN), Value::Double(f64::NAN));
    }

    #[test]
    fn test_negative_zero_equals_zero() {
        assert_eq!(Value::Float(-0.0), Value::Float(0.0));
        assert_eq!(Value::Double(-0.0), Value::Double(0.0));
    }

    #[test]
    fn test_string_set_equality_is_order_independent() {
        assert_eq!(
            Value::StringSet(set_of(&["a", "b"])),
            Value::StringSet(set_of(&["b", "a"]))
        );
        assert_ne!(
            Value::StringSet(set_of(&["a"])),
            Value::StringSet(set_of(&["a", "b"]))
        );
    }

    #[test]
    fn test_kind_covers_all_variants() {
        assert_eq!(ValueKind::ALL.len(), 9);
        for kind in ValueKind::ALL {
            // zero_default for a kind is either Null or that same kind
            let zero = kind.zero_default();
            assert!(zero.is_null() || zero.kind() == Some(kind));
        }
    }

    #[test]
    fn test_zero_defaults() {
        assert_eq!(ValueKind::Bool.zero_default(), Value::Bool(false));
        assert_eq!(ValueKind::Int.zero_default(), Value::Int(0));
        assert_eq!(ValueKind::Long.zero_default(), Value::Long(0));
        assert_eq!(ValueKind::Float.zero_default(), Value::Float(0.0));
        assert_eq!(ValueKind::Double.zero_default(), Value::Double(0.0));
        assert!(ValueKind::String.zero_default().is_null());
        assert!(ValueKind::StringSet.zero_default().is_null());
        assert!(ValueKind::Bytes.zero_default().is_null());
        assert!(ValueKind::Record.zero_default().is_null());
    }

    #[test]
    fn test_kind_names_are_stable() {
        let names: Vec<_> = ValueKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(
            names,
            vec![
                "bool",
                "int",
                "long",
                "float",
                "double",
                "string",
                "string_set",
                "bytes",
                "record"
            ]
        );
    }

    // ====================================================================
    // From conversions
    // ====================================================================

    #[test]
    fn test_from_scalars() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42i32), Value::Int(42));
        assert_eq!(Value::from(42i64), Value::Long(42));
        assert_eq!(Value::from(2.5f32), Value::Float(2.5));
        assert_eq!(Value::from(2.5f64), Value::Double(2.5));
    }

    #[test]
    fn test_from_strings_and_bytes() {
        assert_eq!(Value::from("hi"), Value::String("hi".to_string()));
        assert_eq!(Value::from(String::from("hi")), Value::String("hi".to_string()));
        assert_eq!(Value::from(vec![1u8, 2]), Value::Bytes(vec![1, 2]));
        let slice: &[u8] = &[3, 4];
        assert_eq!(Value::from(slice), Value::Bytes(vec![3, 4]));
        assert_eq!(
            Value::from(set_of(&["x"])),
            Value::StringSet(set_of(&["x"]))
        );
    }

    #[test]
    fn test_from_option_none_is_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(5i32)), Value::Int(5));
        assert_eq!(Value::from(Some("s")), Value::String("s".to_string()));
    }

    #[test]
    fn test_as_wrong_variant_returns_none() {
        let v = Value::Int(42);
        assert!(v.as_bool().is_none());
        assert!(v.as_long().is_none());
        assert!(v.as_float().is_none());
        assert!(v.as_double().is_none());
        assert!(v.as_str().is_none());
        assert!(v.as_string_set().is_none());
        assert!(v.as_bytes().is_none());
        assert!(v.as_record().is_none());
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(Value::String(String::new()).as_str(), Some(""));
        assert_eq!(Value::Bytes(vec![]).as_bytes(), Some([].as_slice()));
        assert!(Value::StringSet(HashSet::new()).as_string_set().unwrap().is_empty());
    }
}
