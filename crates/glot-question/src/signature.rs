//! Entry-function signature extraction.
//!
//! Scans the solution text for `def <entry>(<params>) [-> <ret>]:` and
//! produces the ordered parameter list, optional annotation seed types, and
//! the return seed. Annotations that cannot be understood degrade to no
//! seed for that slot rather than failing the question; the signature shape
//! itself (defaults, starred parameters, zero parameters) is validated
//! strictly.

use glot_schema::Type;

use crate::error::ConvertError;

/// One declared parameter: its published name plus an optional annotation
/// seed type.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: String,
    pub seed: Option<Type>,
}

/// The extracted entry-function signature.
#[derive(Clone, Debug, PartialEq)]
pub struct Signature {
    pub params: Vec<Param>,
    pub return_seed: Option<Type>,
    /// True when at least one parameter annotation parsed into a seed.
    pub use_type_annotation: bool,
}

/// Cross-language reserved words, sorted for binary search. A parameter
/// whose name collides here is renamed so generated code in any target
/// language stays valid.
const RESERVED_KEYWORDS: &[&str] = &[
    "abstract", "and", "as", "assert", "async", "await", "bool", "boolean", "break", "byte",
    "case", "catch", "char", "class", "const", "continue", "def", "default", "del", "do",
    "double", "elif", "else", "enum", "except", "export", "extends", "false", "final",
    "finally", "float", "fn", "for", "from", "func", "function", "global", "goto", "if",
    "impl", "import", "in", "int", "interface", "is", "lambda", "let", "long", "loop",
    "match", "mod", "module", "mut", "new", "none", "not", "null", "object", "operator",
    "or", "override", "package", "pass", "private", "protected", "pub", "public", "raise",
    "ref", "return", "self", "short", "static", "string", "struct", "super", "switch",
    "this", "throw", "trait", "true", "try", "type", "typeof", "use", "val", "var", "void",
    "while", "with", "yield",
];

fn is_reserved(name: &str) -> bool {
    RESERVED_KEYWORDS
        .binary_search(&name.to_ascii_lowercase().as_str())
        .is_ok()
}

/// Find the entry function's header in the solution text and extract its
/// parameters and annotations.
pub fn extract_signature(solution: &str, entry_fn_name: &str) -> Result<Signature, ConvertError> {
    let header = find_header(solution, entry_fn_name).ok_or_else(|| {
        ConvertError::EntryFunctionNotFound {
            name: entry_fn_name.to_string(),
        }
    })?;

    let raw_params = split_top_level(&header.params, ',');
    let mut names = Vec::new();
    let mut seeds = Vec::new();
    for raw in raw_params {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let (name, seed) = parse_param(raw)?;
        names.push(name);
        seeds.push(seed);
    }
    if names.is_empty() {
        return Err(ConvertError::InvalidSignature {
            reason: "the entry function takes no parameters".to_string(),
        });
    }

    disambiguate(&mut names);

    let use_type_annotation = seeds.iter().any(Option::is_some);
    let params = names
        .into_iter()
        .zip(seeds)
        .map(|(name, seed)| Param { name, seed })
        .collect();
    let return_seed = header.return_annotation.as_deref().and_then(parse_annotation);

    Ok(Signature {
        params,
        return_seed,
        use_type_annotation,
    })
}

struct Header {
    params: String,
    return_annotation: Option<String>,
}

/// Locate `def <entry>(` in the solution and capture the parenthesized
/// parameter text plus the optional `-> <ret>` annotation. The header may
/// span several lines.
fn find_header(solution: &str, entry_fn_name: &str) -> Option<Header> {
    let mut search_from = 0;
    while let Some(found) = solution[search_from..].find("def ") {
        let def_start = search_from + found;
        search_from = def_start + 4;

        // Must start a line (possibly indented) to be a definition.
        let line_prefix = &solution[..def_start];
        if !line_prefix.is_empty()
            && !line_prefix.ends_with(|c: char| c == '\n' || c == ' ' || c == '\t')
        {
            continue;
        }

        // A match on a comment line is not a definition.
        let line_start = line_prefix.rfind('\n').map(|i| i + 1).unwrap_or(0);
        if solution[line_start..def_start].contains('#') {
            continue;
        }

        let after_def = &solution[def_start + 4..];
        let rest = after_def.trim_start();
        let Some(rest) = rest.strip_prefix(entry_fn_name) else {
            continue;
        };
        let rest = rest.trim_start();
        let Some(rest) = rest.strip_prefix('(') else {
            continue;
        };

        // Capture up to the matching close paren.
        let mut depth = 1usize;
        let mut params_end = None;
        for (i, c) in rest.char_indices() {
            match c {
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => {
                    depth -= 1;
                    if depth == 0 {
                        params_end = Some(i);
                        break;
                    }
                }
                _ => {}
            }
        }
        let params_end = params_end?;
        let params = rest[..params_end].to_string();

        let tail = rest[params_end + 1..].trim_start();
        let return_annotation = tail.strip_prefix("->").map(|after_arrow| {
            let end = after_arrow.find(':').unwrap_or(after_arrow.len());
            after_arrow[..end].trim().to_string()
        });

        return Some(Header {
            params,
            return_annotation,
        });
    }
    None
}

/// Split one raw parameter into its name and optional annotation seed.
fn parse_param(raw: &str) -> Result<(String, Option<Type>), ConvertError> {
    if raw.starts_with('*') {
        return Err(ConvertError::InvalidSignature {
            reason: format!("starred parameter '{}' is not supported", raw),
        });
    }
    if raw == "/" {
        return Err(ConvertError::InvalidSignature {
            reason: "positional-only markers are not supported".to_string(),
        });
    }
    if split_top_level(raw, '=').len() > 1 {
        return Err(ConvertError::InvalidSignature {
            reason: "default values are not supported".to_string(),
        });
    }

    let (name, annotation) = match raw.split_once(':') {
        Some((name, annotation)) => (name.trim(), Some(annotation.trim())),
        None => (raw, None),
    };
    if name.is_empty() || !is_identifier(name) {
        return Err(ConvertError::InvalidSignature {
            reason: format!("'{}' is not a valid parameter name", name),
        });
    }
    Ok((name.to_string(), annotation.and_then(parse_annotation)))
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Rewrite parameter names so none collide case-insensitively and none is a
/// reserved word. A later duplicate gets its positional index appended
/// (`(a, A)` becomes `a`, `A1`); a reserved name becomes `<name>_arg<idx>`.
fn disambiguate(names: &mut [String]) {
    let mut taken: Vec<String> = Vec::with_capacity(names.len());
    for i in 0..names.len() {
        let mut name = names[i].clone();
        while taken.contains(&name.to_ascii_lowercase()) {
            name = format!("{}{}", name, i);
        }
        if is_reserved(&name) {
            name = format!("{}_arg{}", name, i);
        }
        taken.push(name.to_ascii_lowercase());
        names[i] = name;
    }
}

/// Split `text` on `sep` occurrences that are outside any bracket pair.
fn split_top_level(text: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Parse a type annotation into a seed type.
///
/// Understands the typing-module spellings (`List[int]`, `Dict[str, int]`,
/// `Tuple[int, int]`, `Set[str]`) and their lowercase builtin forms.
/// Anything else, including `Optional`, yields no seed.
fn parse_annotation(text: &str) -> Option<Type> {
    let text = text.trim();
    match text {
        "int" => return Some(Type::integer()),
        "str" => return Some(Type::string()),
        "bool" => return Some(Type::boolean()),
        "float" => return Some(Type::float()),
        _ => {}
    }

    let (head, rest) = text.split_once('[')?;
    let inner = rest.strip_suffix(']')?;
    let children: Vec<Option<Type>> = split_top_level(inner, ',')
        .into_iter()
        .map(parse_annotation)
        .collect();
    let children: Option<Vec<Type>> = children.into_iter().collect();
    let mut children = children?;

    match head.trim() {
        "List" | "list" if children.len() == 1 => Some(Type::list(children.remove(0))),
        "Set" | "set" if children.len() == 1 => Some(Type::set(children.remove(0))),
        "Dict" | "dict" if children.len() == 2 => {
            let value = children.remove(1);
            let key = children.remove(0);
            Some(Type::map(key, value))
        }
        "Tuple" | "tuple" => Some(Type::tuple(children)),
        _ => None,
    }
}
