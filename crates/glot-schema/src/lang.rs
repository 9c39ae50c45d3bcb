//! Per-language renderer specifications.
//!
//! Each target language supplies only a primitive-name table and formatting
//! functions for the four container kinds; that is the entire contract a
//! renderer has with the core. The built-in specs live in an immutable
//! [`LanguageSet`] constructed once at startup and passed by reference;
//! there is no global registry.

use rustc_hash::FxHashMap;

use crate::error::SchemaError;
use crate::ty::{Prim, Type};

/// A target language's schema specification.
///
/// `format_tuple` is `None` for languages without a structural tuple type;
/// rendering a heterogeneous tuple for such a language is an error. A
/// homogeneous tuple is collapsed to the language's list form before the
/// tuple formatter is consulted, so most schemas never need one.
pub struct LanguageSpec {
    pub name: &'static str,
    primitive: fn(Prim) -> &'static str,
    format_list: fn(&str) -> String,
    format_map: fn(&str, &str) -> String,
    format_set: fn(&str) -> String,
    format_tuple: Option<fn(&[String]) -> String>,
}

/// Render a resolved type into a language-specific type string.
///
/// The type must be fully concrete; any remaining `null` placeholder is an
/// error because no published schema may carry one.
pub fn translate(spec: &LanguageSpec, ty: &Type) -> Result<String, SchemaError> {
    match ty {
        Type::Null => Err(SchemaError::NullInPublishedType),
        Type::Prim(p) => Ok((spec.primitive)(*p).to_string()),
        Type::List(e) => Ok((spec.format_list)(&translate(spec, e)?)),
        Type::Set(e) => Ok((spec.format_set)(&translate(spec, e)?)),
        Type::Map(k, v) => {
            let key = translate(spec, k)?;
            let value = translate(spec, v)?;
            Ok((spec.format_map)(&key, &value))
        }
        Type::Tuple(elems) => {
            // A tuple whose positions all share one type is rendered as a
            // list so that languages without tuples can still run it.
            if let [first, rest @ ..] = elems.as_slice() {
                if rest.iter().all(|e| e == first) {
                    return Ok((spec.format_list)(&translate(spec, first)?));
                }
            }
            let formatted = elems
                .iter()
                .map(|e| translate(spec, e))
                .collect::<Result<Vec<_>, _>>()?;
            match spec.format_tuple {
                Some(format) if !formatted.is_empty() => Ok(format(&formatted)),
                _ => Err(SchemaError::UnsupportedByLanguage {
                    language: spec.name.to_string(),
                    ty: ty.to_string(),
                }),
            }
        }
    }
}

/// The immutable table of built-in language specs.
pub struct LanguageSet {
    specs: Vec<LanguageSpec>,
    by_name: FxHashMap<&'static str, usize>,
}

impl LanguageSet {
    /// Build the table of all built-in language specs.
    pub fn builtin() -> LanguageSet {
        let specs = vec![
            cpp_spec(),
            go_spec(),
            java_spec(),
            kotlin_spec(),
            rust_spec(),
            typescript_spec(),
        ];
        let by_name = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| (spec.name, i))
            .collect();
        LanguageSet { specs, by_name }
    }

    /// Look up a language spec by name.
    pub fn get(&self, name: &str) -> Option<&LanguageSpec> {
        self.by_name.get(name).map(|&i| &self.specs[i])
    }

    /// Names of all registered languages, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specs.iter().map(|s| s.name)
    }
}

// ── Built-in language specs ────────────────────────────────────────────

fn cpp_spec() -> LanguageSpec {
    LanguageSpec {
        name: "C++",
        primitive: |p| match p {
            Prim::Boolean => "bool",
            Prim::Integer => "int",
            Prim::Long => "long long",
            Prim::Float => "float",
            Prim::Double => "double",
            Prim::Character => "char",
            Prim::String => "string",
        },
        format_list: |t| format!("vector<{t}>"),
        format_map: |k, v| format!("map<{k},{v}>"),
        format_set: |t| format!("set<{t}>"),
        format_tuple: Some(|elems| format!("tuple<{}>", elems.join(","))),
    }
}

fn go_spec() -> LanguageSpec {
    LanguageSpec {
        name: "Go",
        primitive: |p| match p {
            Prim::Boolean => "bool",
            Prim::Integer => "int",
            Prim::Long => "int64",
            Prim::Float => "float64",
            Prim::Double => "float64",
            Prim::Character => "rune",
            Prim::String => "string",
        },
        format_list: |t| format!("[]{t}"),
        format_map: |k, v| format!("map[{k}]{v}"),
        format_set: |t| format!("map[{t}]bool"),
        format_tuple: None,
    }
}

fn java_spec() -> LanguageSpec {
    // Boxed primitives so they can appear as generic arguments.
    LanguageSpec {
        name: "Java",
        primitive: |p| match p {
            Prim::Boolean => "Boolean",
            Prim::Integer => "Integer",
            Prim::Long => "Long",
            Prim::Float => "Float",
            Prim::Double => "Double",
            Prim::Character => "Character",
            Prim::String => "String",
        },
        format_list: |t| format!("ArrayList<{t}>"),
        format_map: |k, v| format!("HashMap<{k}, {v}>"),
        format_set: |t| format!("HashSet<{t}>"),
        format_tuple: None,
    }
}

fn kotlin_spec() -> LanguageSpec {
    LanguageSpec {
        name: "Kotlin",
        primitive: |p| match p {
            Prim::Boolean => "Boolean",
            Prim::Integer => "Int",
            Prim::Long => "Long",
            Prim::Float => "Float",
            Prim::Double => "Double",
            Prim::Character => "Char",
            Prim::String => "String",
        },
        format_list: |t| format!("List<{t}>"),
        format_map: |k, v| format!("Map<{k}, {v}>"),
        format_set: |t| format!("Set<{t}>"),
        format_tuple: None,
    }
}

fn rust_spec() -> LanguageSpec {
    LanguageSpec {
        name: "Rust",
        primitive: |p| match p {
            Prim::Boolean => "bool",
            Prim::Integer => "i32",
            Prim::Long => "i64",
            Prim::Float => "f32",
            Prim::Double => "f64",
            Prim::Character => "char",
            Prim::String => "String",
        },
        format_list: |t| format!("Vec<{t}>"),
        format_map: |k, v| format!("HashMap<{k}, {v}>"),
        format_set: |t| format!("HashSet<{t}>"),
        format_tuple: Some(|elems| format!("({})", elems.join(", "))),
    }
}

fn typescript_spec() -> LanguageSpec {
    LanguageSpec {
        name: "TypeScript",
        primitive: |p| match p {
            Prim::Boolean => "boolean",
            Prim::Integer => "number",
            Prim::Long => "number",
            Prim::Float => "number",
            Prim::Double => "number",
            Prim::Character => "string",
            Prim::String => "string",
        },
        format_list: |t| format!("Array<{t}>"),
        format_map: |k, v| format!("Map<{k}, {v}>"),
        format_set: |t| format!("Set<{t}>"),
        format_tuple: Some(|elems| format!("[{}]", elems.join(", "))),
    }
}
