//! Parser for the canonical DSL type strings.
//!
//! The grammar is small: bare words for primitives and `null`, `list<T>`,
//! `set<T>`, `map<K;V>`, `tuple<T1|T2|...>`, arbitrarily nested, plus the
//! `T[]` array suffix as an alias for `list<T>`. Parsing a type's `Display`
//! output reproduces the same tree.

use crate::error::SchemaError;
use crate::ty::{Prim, Type};

impl Type {
    /// Parse a DSL type string into a `Type` tree.
    pub fn parse(type_str: &str) -> Result<Type, SchemaError> {
        parse_type(type_str.trim())
    }
}

fn parse_type(type_str: &str) -> Result<Type, SchemaError> {
    let open_count = type_str.matches('<').count();
    if open_count != type_str.matches('>').count() {
        return Err(SchemaError::UnbalancedAngles(type_str.to_string()));
    }

    // `T[]` array suffix: strip one suffix and wrap in a list.
    if let Some(inner) = type_str.strip_suffix("[]") {
        if open_count != 0 {
            return Err(SchemaError::MixedArraySyntax(type_str.to_string()));
        }
        return Ok(Type::list(parse_type(inner)?));
    }

    if open_count == 0 {
        return parse_leaf(type_str);
    }

    // TYPE_NAME<CHILDREN>: split on the first '<', the final character must
    // be the matching '>'.
    let (name, rest) = match type_str.split_once('<') {
        Some(pair) => pair,
        None => return Err(SchemaError::TrailingCharacters(type_str.to_string())),
    };
    let children = match rest.strip_suffix('>') {
        Some(children) => children,
        None => return Err(SchemaError::TrailingCharacters(type_str.to_string())),
    };

    match name {
        "list" => Ok(Type::list(parse_type(children)?)),
        "set" => Ok(Type::set(parse_type(children)?)),
        "map" => {
            let (key, value) = children
                .split_once(';')
                .ok_or_else(|| SchemaError::MalformedMap(type_str.to_string()))?;
            Ok(Type::map(parse_type(key)?, parse_type(value)?))
        }
        "tuple" => {
            let elements = split_tuple_children(children)?;
            // `tuple<null>` is the empty-tuple placeholder.
            if elements.len() == 1 && elements[0] == "null" {
                return Ok(Type::tuple(vec![]));
            }
            let parsed = elements
                .iter()
                .map(|e| parse_type(e))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Type::tuple(parsed))
        }
        _ if Prim::from_name(name).is_some() || name == "null" => {
            Err(SchemaError::LeafWithChildren(name.to_string()))
        }
        _ => Err(SchemaError::UnknownTypeName(name.to_string())),
    }
}

fn parse_leaf(word: &str) -> Result<Type, SchemaError> {
    if word == "null" {
        return Ok(Type::Null);
    }
    if let Some(prim) = Prim::from_name(word) {
        return Ok(Type::Prim(prim));
    }
    if matches!(word, "list" | "set" | "map" | "tuple") {
        return Err(SchemaError::BareContainer(word.to_string()));
    }
    Err(SchemaError::UnknownTypeName(word.to_string()))
}

/// Split the children of a tuple type on top-level `|` separators,
/// ignoring separators nested inside `<>`.
fn split_tuple_children(children: &str) -> Result<Vec<&str>, SchemaError> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut num_open = 0i32;
    for (i, c) in children.char_indices() {
        match c {
            '|' if num_open == 0 => {
                out.push(&children[start..i]);
                start = i + 1;
            }
            '<' => num_open += 1,
            '>' => {
                num_open -= 1;
                if num_open < 0 {
                    return Err(SchemaError::UnbalancedAngles(children.to_string()));
                }
            }
            _ => {}
        }
    }
    if num_open != 0 {
        return Err(SchemaError::UnbalancedAngles(children.to_string()));
    }
    if start < children.len() {
        out.push(&children[start..]);
    }
    Ok(out)
}
