//! Concrete literal values.
//!
//! Values are kept in a JSON-friendly shape: sets and tuples serialize as
//! arrays, maps as objects (integer keys become strings in JSON), and maps
//! preserve insertion order so the published example table is reproducible.

use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// A map key: inference only permits `integer` and `string` keys.
#[derive(Clone, Debug, PartialEq)]
pub enum MapKey {
    Int(i64),
    Str(String),
}

impl Serialize for MapKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MapKey::Int(i) => serializer.serialize_i64(*i),
            MapKey::Str(s) => serializer.serialize_str(s),
        }
    }
}

/// A concrete value parsed from one literal expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Set(Vec<Value>),
    Map(Vec<(MapKey, Value)>),
    Tuple(Vec<Value>),
}

impl Value {
    /// Truthiness in the source language's sense: zero, empty, and null
    /// values are false, everything else is true. Used by `not`.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(v) | Value::Set(v) | Value::Tuple(v) => !v.is_empty(),
            Value::Map(entries) => !entries.is_empty(),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(v) | Value::Set(v) | Value::Tuple(v) => {
                let mut seq = serializer.serialize_seq(Some(v.len()))?;
                for item in v {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::List(v) => write_seq(f, "[", v, "]"),
            Value::Set(v) => write_seq(f, "{", v, "}"),
            Value::Tuple(v) => write_seq(f, "(", v, ")"),
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match key {
                        MapKey::Int(k) => write!(f, "{}: {}", k, value)?,
                        MapKey::Str(k) => write!(f, "{:?}: {}", k, value)?,
                    }
                }
                write!(f, "}}")
            }
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: &str, items: &[Value], close: &str) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "{}", close)
}
