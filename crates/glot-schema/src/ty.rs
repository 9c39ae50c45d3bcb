//! Type representation for the schema algebra.
//!
//! Defines the core `Type` enum and its primitive kinds. These form the
//! foundation of literal inference and cross-example consolidation: every
//! argument and return slot of a question resolves to exactly one `Type`
//! tree before any language-specific rendering happens.

use std::fmt;

use serde::Serialize;

/// A primitive type kind. Exactly one kind per instance.
///
/// `Character` never arises from literal inference (a one-character string
/// is still a `String`) but exists in the algebra because the DSL and the
/// language renderer tables support it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Prim {
    Boolean,
    Integer,
    Long,
    Float,
    Double,
    Character,
    String,
}

impl Prim {
    /// The bare DSL word for this kind.
    pub fn name(self) -> &'static str {
        match self {
            Prim::Boolean => "boolean",
            Prim::Integer => "integer",
            Prim::Long => "long",
            Prim::Float => "float",
            Prim::Double => "double",
            Prim::Character => "character",
            Prim::String => "string",
        }
    }

    /// Look up a kind from its DSL word.
    pub fn from_name(name: &str) -> Option<Prim> {
        Some(match name {
            "boolean" => Prim::Boolean,
            "integer" => Prim::Integer,
            "long" => Prim::Long,
            "float" => Prim::Float,
            "double" => Prim::Double,
            "character" => Prim::Character,
            "string" => Prim::String,
            _ => return None,
        })
    }

    /// Whether this kind is numeric (participates in widening).
    pub fn is_numeric(self) -> bool {
        matches!(self, Prim::Integer | Prim::Long | Prim::Float | Prim::Double)
    }
}

impl fmt::Display for Prim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A generic type tree.
///
/// - `Prim`: a leaf primitive.
/// - `List`/`Set`: homogeneous containers with one element type.
/// - `Map`: a key type plus a value type; keys are restricted to
///   `integer`/`string` during inference.
/// - `Tuple`: fixed-length, each position individually typed. The only
///   container exempt from element homogeneity.
/// - `Null`: a placeholder leaf for empty-container evidence (`[]`, `{}`).
///   Never part of a published schema; consolidation must replace every
///   `Null` with concrete evidence or fail.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Prim(Prim),
    List(Box<Type>),
    Map(Box<Type>, Box<Type>),
    Set(Box<Type>),
    Tuple(Vec<Type>),
    Null,
}

impl Type {
    pub fn boolean() -> Type {
        Type::Prim(Prim::Boolean)
    }

    pub fn integer() -> Type {
        Type::Prim(Prim::Integer)
    }

    pub fn long() -> Type {
        Type::Prim(Prim::Long)
    }

    pub fn float() -> Type {
        Type::Prim(Prim::Float)
    }

    pub fn double() -> Type {
        Type::Prim(Prim::Double)
    }

    pub fn string() -> Type {
        Type::Prim(Prim::String)
    }

    pub fn character() -> Type {
        Type::Prim(Prim::Character)
    }

    pub fn list(element: Type) -> Type {
        Type::List(Box::new(element))
    }

    pub fn map(key: Type, value: Type) -> Type {
        Type::Map(Box::new(key), Box::new(value))
    }

    pub fn set(element: Type) -> Type {
        Type::Set(Box::new(element))
    }

    pub fn tuple(elements: Vec<Type>) -> Type {
        Type::Tuple(elements)
    }

    /// Whether this node is a leaf (primitive or `Null`).
    pub fn is_leaf(&self) -> bool {
        matches!(self, Type::Prim(_) | Type::Null)
    }

    /// Count of container wrappers before a primitive or `Null` is reached.
    ///
    /// Leaves have depth 0; `list<integer>` has depth 1;
    /// `list<list<integer>>` has depth 2. For maps and tuples the depth is
    /// the maximum over the subtrees plus one.
    pub fn depth(&self) -> usize {
        match self {
            Type::Prim(_) | Type::Null => 0,
            Type::List(e) | Type::Set(e) => e.depth() + 1,
            Type::Map(k, v) => k.depth().max(v.depth()) + 1,
            Type::Tuple(elems) => {
                elems.iter().map(Type::depth).max().unwrap_or(0) + 1
            }
        }
    }

    /// Whether every leaf of this tree is `Null`, meaning the type carries
    /// no concrete evidence at all (an empty-container observation).
    pub fn is_null_only(&self) -> bool {
        match self {
            Type::Null => true,
            Type::Prim(_) => false,
            Type::List(e) | Type::Set(e) => e.is_null_only(),
            Type::Map(k, v) => k.is_null_only() && v.is_null_only(),
            Type::Tuple(elems) => elems.iter().all(Type::is_null_only),
        }
    }

    /// Whether any leaf of this tree is still `Null`. An empty tuple counts
    /// as null evidence, since it renders as `tuple<null>`.
    ///
    /// A published schema must return false here for every slot.
    pub fn contains_null(&self) -> bool {
        match self {
            Type::Null => true,
            Type::Prim(_) => false,
            Type::List(e) | Type::Set(e) => e.contains_null(),
            Type::Map(k, v) => k.contains_null() || v.contains_null(),
            Type::Tuple(elems) => elems.is_empty() || elems.iter().any(Type::contains_null),
        }
    }
}

impl fmt::Display for Type {
    /// Renders the canonical DSL string: bare words for primitives,
    /// `list<T>`, `map<K;V>`, `set<T>`, `tuple<T1|T2|...>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Prim(p) => write!(f, "{}", p),
            Type::Null => write!(f, "null"),
            Type::List(e) => write!(f, "list<{}>", e),
            Type::Set(e) => write!(f, "set<{}>", e),
            Type::Map(k, v) => write!(f, "map<{};{}>", k, v),
            Type::Tuple(elems) => {
                write!(f, "tuple<")?;
                if elems.is_empty() {
                    write!(f, "null")?;
                } else {
                    for (i, e) in elems.iter().enumerate() {
                        if i > 0 {
                            write!(f, "|")?;
                        }
                        write!(f, "{}", e)?;
                    }
                }
                write!(f, ">")
            }
        }
    }
}

impl Serialize for Type {
    /// Types serialize as their DSL string, which is what the published
    /// schema carries.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_primitives() {
        assert_eq!(Type::integer().to_string(), "integer");
        assert_eq!(Type::boolean().to_string(), "boolean");
        assert_eq!(Type::Null.to_string(), "null");
    }

    #[test]
    fn display_nested_containers() {
        let ty = Type::list(Type::map(Type::string(), Type::list(Type::double())));
        assert_eq!(ty.to_string(), "list<map<string;list<double>>>");
    }

    #[test]
    fn display_tuple() {
        let ty = Type::tuple(vec![Type::integer(), Type::string()]);
        assert_eq!(ty.to_string(), "tuple<integer|string>");
        assert_eq!(Type::tuple(vec![]).to_string(), "tuple<null>");
    }

    #[test]
    fn depth_counts_container_wrappers() {
        assert_eq!(Type::integer().depth(), 0);
        assert_eq!(Type::list(Type::integer()).depth(), 1);
        assert_eq!(Type::list(Type::list(Type::integer())).depth(), 2);
        // Map depth is the deeper of key/value plus one.
        let ty = Type::map(Type::string(), Type::list(Type::integer()));
        assert_eq!(ty.depth(), 2);
    }

    #[test]
    fn null_only_detection() {
        assert!(Type::Null.is_null_only());
        assert!(Type::list(Type::Null).is_null_only());
        assert!(Type::map(Type::Null, Type::Null).is_null_only());
        assert!(!Type::list(Type::integer()).is_null_only());
        // Partially concrete is not null-only but still contains null.
        let partial = Type::map(Type::integer(), Type::Null);
        assert!(!partial.is_null_only());
        assert!(partial.contains_null());
        assert!(!Type::list(Type::integer()).contains_null());
    }
}
