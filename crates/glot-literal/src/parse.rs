//! Recursive-descent parser for literal expressions.
//!
//! Converts one literal expression into a [`Parsed`] triple: the concrete
//! value, the inferred generic type, and the container nesting depth.
//! Container element types are folded with the same structural unification
//! the cross-example consolidator uses, so `[1, 2.5]` infers
//! `list<float>` and `[[], [1]]` infers `list<list<integer>>`.

use glot_schema::{unify, Prim, Type};

use crate::error::LiteralError;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use crate::value::{MapKey, Value};

/// Textual thresholds for widening numeric literals.
///
/// These are deliberately text-based heuristics, not bit-width boundaries:
/// an integer whose decimal form has more than `long_digits` digits becomes
/// a `long`, and a decimal whose formatted value contains a run of
/// `double_run` consecutive digits after its first character becomes a
/// `double`.
#[derive(Copy, Clone, Debug)]
pub struct NumericWidening {
    pub long_digits: usize,
    pub double_run: usize,
}

impl Default for NumericWidening {
    fn default() -> Self {
        NumericWidening {
            long_digits: 9,
            double_run: 7,
        }
    }
}

/// The result of parsing one literal expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Parsed {
    pub value: Value,
    pub ty: Type,
    /// Count of container wrappers around the deepest leaf.
    pub depth: usize,
}

/// Parse a complete literal expression from source text.
///
/// Fails if anything other than one literal (plus trailing whitespace or a
/// comment) is present.
pub fn parse_literal(source: &str, widening: NumericWidening) -> Result<Parsed, LiteralError> {
    let tokens = Lexer::tokenize(source);
    let mut parser = LiteralParser::new(source, &tokens).with_widening(widening);
    let parsed = parser.parse()?;
    if parser.peek() != TokenKind::Eof {
        return Err(LiteralError::Unsupported(format!(
            "trailing input '{}'",
            parser.peek_text()
        )));
    }
    Ok(parsed)
}

/// Parser over a token stream, positioned at the start of one literal.
///
/// The assertion scanner drives this parser directly at argument positions
/// inside a statement's token stream; [`parse_literal`] is the convenience
/// wrapper for a standalone expression.
pub struct LiteralParser<'a> {
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
    widening: NumericWidening,
}

impl<'a> LiteralParser<'a> {
    pub fn new(source: &'a str, tokens: &'a [Token]) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            widening: NumericWidening::default(),
        }
    }

    pub fn with_widening(mut self, widening: NumericWidening) -> Self {
        self.widening = widening;
        self
    }

    /// Reposition the parser at a token index.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Current token index.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Kind of the current token.
    pub fn peek(&self) -> TokenKind {
        self.tokens
            .get(self.pos)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn peek_text(&self) -> &'a str {
        match self.tokens.get(self.pos) {
            Some(t) => &self.source[t.start as usize..t.end as usize],
            None => "",
        }
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens.get(self.pos).copied().unwrap_or(Token::new(
            TokenKind::Eof,
            self.source.len() as u32,
            self.source.len() as u32,
        ));
        self.pos += 1;
        token
    }

    fn token_text(&self, token: Token) -> &'a str {
        &self.source[token.start as usize..token.end as usize]
    }

    // ── Literal grammar ──────────────────────────────────────────────────

    /// Parse one literal expression at the current position.
    pub fn parse(&mut self) -> Result<Parsed, LiteralError> {
        match self.peek() {
            TokenKind::Minus => {
                self.advance();
                let operand = self.parse()?;
                self.negate(operand)
            }
            TokenKind::Not => {
                self.advance();
                let operand = self.parse()?;
                Ok(Parsed {
                    value: Value::Bool(!operand.value.truthy()),
                    ty: Type::boolean(),
                    depth: operand.depth,
                })
            }
            TokenKind::True => {
                self.advance();
                Ok(leaf(Value::Bool(true), Type::boolean()))
            }
            TokenKind::False => {
                self.advance();
                Ok(leaf(Value::Bool(false), Type::boolean()))
            }
            TokenKind::None => {
                self.advance();
                Ok(leaf(Value::Null, Type::Null))
            }
            TokenKind::Int => {
                let token = self.advance();
                self.parse_int(self.token_text(token))
            }
            TokenKind::Float => {
                let token = self.advance();
                self.parse_float(self.token_text(token))
            }
            TokenKind::Str => {
                let token = self.advance();
                let text = self.token_text(token);
                Ok(leaf(Value::Str(unescape(text)), Type::string()))
            }
            TokenKind::BadStr => Err(LiteralError::UnterminatedString),
            TokenKind::LBracket => self.parse_list(),
            TokenKind::LBrace => self.parse_map_or_set(),
            TokenKind::LParen => self.parse_tuple(),
            TokenKind::Ident => Err(LiteralError::Unsupported(format!(
                "name '{}'",
                self.peek_text()
            ))),
            _ => Err(LiteralError::Unsupported(format!(
                "token '{}'",
                self.peek_text()
            ))),
        }
    }

    fn negate(&self, operand: Parsed) -> Result<Parsed, LiteralError> {
        let value = match operand.value {
            Value::Int(i) => Value::Int(-i),
            Value::Float(f) => Value::Float(-f),
            other => {
                return Err(LiteralError::Unsupported(format!(
                    "unary minus on {}",
                    other
                )))
            }
        };
        Ok(Parsed {
            value,
            ty: operand.ty,
            depth: operand.depth,
        })
    }

    fn parse_int(&self, text: &str) -> Result<Parsed, LiteralError> {
        let value: i64 = text
            .parse()
            .map_err(|_| LiteralError::InvalidNumber(text.to_string()))?;
        // The widening cutoff is judged on the canonical decimal form, so
        // leading zeros in the source do not count.
        let digits = value.to_string().trim_start_matches('-').len();
        let kind = if digits > self.widening.long_digits {
            Prim::Long
        } else {
            Prim::Integer
        };
        Ok(leaf(Value::Int(value), Type::Prim(kind)))
    }

    fn parse_float(&self, text: &str) -> Result<Parsed, LiteralError> {
        let value: f64 = text
            .parse()
            .map_err(|_| LiteralError::InvalidNumber(text.to_string()))?;
        let kind = if has_digit_run_after_first(&value.to_string(), self.widening.double_run) {
            Prim::Double
        } else {
            Prim::Float
        };
        Ok(leaf(Value::Float(value), Type::Prim(kind)))
    }

    fn parse_list(&mut self) -> Result<Parsed, LiteralError> {
        self.advance(); // '['
        let children = self.parse_elements(TokenKind::RBracket)?;
        let (values, element_ty, depth) = self.fold_sequence(children)?;
        Ok(Parsed {
            value: Value::List(values),
            ty: Type::list(element_ty),
            depth,
        })
    }

    fn parse_map_or_set(&mut self) -> Result<Parsed, LiteralError> {
        self.advance(); // '{'
        if self.peek() == TokenKind::RBrace {
            // `{}` is an empty mapping.
            self.advance();
            return Ok(Parsed {
                value: Value::Map(vec![]),
                ty: Type::map(Type::Null, Type::Null),
                depth: 1,
            });
        }

        let first = self.parse()?;
        if self.peek() == TokenKind::Colon {
            self.parse_map_entries(first)
        } else {
            // `{a, b}` with no colon is a set literal.
            let mut children = vec![first];
            match self.peek() {
                TokenKind::Comma => {
                    self.advance();
                    children.extend(self.parse_elements(TokenKind::RBrace)?);
                }
                TokenKind::RBrace => {
                    self.advance();
                }
                _ => {
                    return Err(LiteralError::Unsupported(format!(
                        "token '{}' in set literal",
                        self.peek_text()
                    )))
                }
            }
            let (values, element_ty, depth) = self.fold_sequence(children)?;
            Ok(Parsed {
                value: Value::Set(values),
                ty: Type::set(element_ty),
                depth,
            })
        }
    }

    fn parse_map_entries(&mut self, first_key: Parsed) -> Result<Parsed, LiteralError> {
        let mut keys = vec![first_key];
        let mut values = Vec::new();
        loop {
            if self.peek() != TokenKind::Colon {
                return Err(LiteralError::Unsupported(format!(
                    "token '{}' in map literal",
                    self.peek_text()
                )));
            }
            self.advance(); // ':'
            values.push(self.parse()?);
            match self.peek() {
                TokenKind::Comma => {
                    self.advance();
                    if self.peek() == TokenKind::RBrace {
                        self.advance();
                        break;
                    }
                    keys.push(self.parse()?);
                }
                TokenKind::RBrace => {
                    self.advance();
                    break;
                }
                _ => {
                    return Err(LiteralError::Unsupported(format!(
                        "token '{}' in map literal",
                        self.peek_text()
                    )))
                }
            }
        }

        let key_ty = fold_types(keys.iter().map(|k| k.ty.clone()).collect())?;
        if !matches!(key_ty, Type::Prim(Prim::Integer) | Type::Prim(Prim::String)) {
            return Err(LiteralError::BadMapKey(key_ty.to_string()));
        }
        let (value_values, value_ty, value_depth) = self.fold_sequence(values)?;

        let depth = keys
            .iter()
            .map(|k| k.depth + 1)
            .max()
            .unwrap_or(1)
            .max(value_depth);
        let entries = keys
            .into_iter()
            .zip(value_values)
            .map(|(key, value)| {
                let key = match key.value {
                    Value::Int(i) => MapKey::Int(i),
                    Value::Str(s) => MapKey::Str(s),
                    // The key-kind check above only lets integers and
                    // strings through.
                    other => {
                        return Err(LiteralError::BadMapKey(other.to_string()));
                    }
                };
                Ok((key, value))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Parsed {
            value: Value::Map(entries),
            ty: Type::map(key_ty, value_ty),
            depth,
        })
    }

    fn parse_tuple(&mut self) -> Result<Parsed, LiteralError> {
        self.advance(); // '('
        if self.peek() == TokenKind::RParen {
            self.advance();
            return Ok(Parsed {
                value: Value::Tuple(vec![]),
                ty: Type::tuple(vec![]),
                depth: 1,
            });
        }

        let mut children = Vec::new();
        let mut saw_comma = false;
        loop {
            children.push(self.parse()?);
            match self.peek() {
                TokenKind::Comma => {
                    self.advance();
                    saw_comma = true;
                    if self.peek() == TokenKind::RParen {
                        self.advance();
                        break;
                    }
                }
                TokenKind::RParen => {
                    self.advance();
                    break;
                }
                _ => {
                    return Err(LiteralError::Unsupported(format!(
                        "token '{}' in tuple literal",
                        self.peek_text()
                    )))
                }
            }
        }

        // `(x)` without a comma is just a parenthesized literal.
        if children.len() == 1 && !saw_comma {
            return Ok(children.remove(0));
        }

        let depth = children.iter().map(|c| c.depth).max().unwrap_or(0) + 1;
        let types = children.iter().map(|c| c.ty.clone()).collect();
        let values = children.into_iter().map(|c| c.value).collect();
        Ok(Parsed {
            value: Value::Tuple(values),
            ty: Type::tuple(types),
            depth,
        })
    }

    /// Parse comma-separated elements up to (and including) `close`.
    fn parse_elements(&mut self, close: TokenKind) -> Result<Vec<Parsed>, LiteralError> {
        let mut children = Vec::new();
        loop {
            if self.peek() == close {
                self.advance();
                break;
            }
            children.push(self.parse()?);
            match self.peek() {
                TokenKind::Comma => {
                    self.advance();
                }
                kind if kind == close => {
                    self.advance();
                    break;
                }
                _ => {
                    return Err(LiteralError::Unsupported(format!(
                        "token '{}' in sequence literal",
                        self.peek_text()
                    )))
                }
            }
        }
        Ok(children)
    }

    /// Fold a sequence's element observations into one element type, and
    /// normalize integer element values to floats when the folded kind is
    /// floating-point.
    fn fold_sequence(
        &self,
        children: Vec<Parsed>,
    ) -> Result<(Vec<Value>, Type, usize), LiteralError> {
        let element_ty = fold_types(children.iter().map(|c| c.ty.clone()).collect())?;
        let depth = children.iter().map(|c| c.depth).max().unwrap_or(0) + 1;
        let float_element = matches!(element_ty, Type::Prim(Prim::Float) | Type::Prim(Prim::Double));
        let values = children
            .into_iter()
            .map(|c| match c.value {
                Value::Int(i) if float_element => Value::Float(i as f64),
                other => other,
            })
            .collect();
        Ok((values, element_ty, depth))
    }
}

/// Fold element type observations into a single type.
///
/// Observations that unify (equal kinds, numeric widening, null absorption)
/// collapse into one; if more than one distinct type survives the fold, the
/// container is inconsistent. No surviving observation means the container
/// was empty, which folds to `null`.
fn fold_types(types: Vec<Type>) -> Result<Type, LiteralError> {
    let mut consolidated: Vec<Type> = Vec::new();
    for ty in types {
        let mut merged = ty;
        let mut kept = Vec::new();
        for existing in consolidated {
            match unify(&merged, &existing) {
                Ok(unified) => merged = unified,
                Err(_) => kept.push(existing),
            }
        }
        consolidated = kept;
        consolidated.push(merged);
    }
    match consolidated.len() {
        0 => Ok(Type::Null),
        1 => Ok(consolidated.remove(0)),
        _ => Err(LiteralError::InconsistentTypes(
            consolidated.iter().map(Type::to_string).collect(),
        )),
    }
}

fn leaf(value: Value, ty: Type) -> Parsed {
    Parsed {
        value,
        ty,
        depth: 0,
    }
}

/// Whether `s` contains a run of `n` consecutive ASCII digits starting at
/// any position after the first character. This is the textual heuristic
/// for `float` to `double` widening.
fn has_digit_run_after_first(s: &str, n: usize) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() < n + 1 {
        return false;
    }
    (1..=bytes.len() - n).any(|q| bytes[q..q + n].iter().all(u8::is_ascii_digit))
}

/// Strip the quotes from a string token and resolve backslash escapes.
/// Unknown escapes keep the backslash, as the source language does.
fn unescape(raw: &str) -> String {
    let inner = &raw[1..raw.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some('0') => out.push('\0'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<Parsed, LiteralError> {
        parse_literal(source, NumericWidening::default())
    }

    fn ty_of(source: &str) -> String {
        parse(source).unwrap().ty.to_string()
    }

    #[test]
    fn scalars() {
        assert_eq!(ty_of("1"), "integer");
        assert_eq!(ty_of("1.5"), "float");
        assert_eq!(ty_of("'abc'"), "string");
        assert_eq!(ty_of("True"), "boolean");
        assert_eq!(ty_of("None"), "null");
        assert_eq!(parse("42").unwrap().value, Value::Int(42));
    }

    #[test]
    fn long_threshold_is_textual() {
        assert_eq!(ty_of("999999999"), "integer"); // 9 digits
        assert_eq!(ty_of("1000000000"), "long"); // 10 digits
        // Leading zeros do not count toward the cutoff.
        assert_eq!(ty_of("0000000001"), "integer");
        // The sign does not count either.
        assert_eq!(ty_of("-999999999"), "integer");
        assert_eq!(ty_of("-1000000000"), "long");
    }

    #[test]
    fn double_threshold_is_textual() {
        assert_eq!(ty_of("0.123456"), "float");
        assert_eq!(ty_of("0.1234567"), "double");
        assert_eq!(ty_of("12345678.5"), "double");
        assert_eq!(ty_of("1234567.0"), "float");
    }

    #[test]
    fn unary_minus_preserves_kind() {
        let parsed = parse("-1.5").unwrap();
        assert_eq!(parsed.value, Value::Float(-1.5));
        assert_eq!(parsed.ty, Type::float());
        assert_eq!(parse("-0").unwrap().value, Value::Int(0));
        assert!(parse("-'a'").is_err());
    }

    #[test]
    fn not_negates_truthiness() {
        assert_eq!(parse("not True").unwrap().value, Value::Bool(false));
        assert_eq!(parse("not 0").unwrap().value, Value::Bool(true));
        assert_eq!(parse("not [1]").unwrap().ty, Type::boolean());
    }

    #[test]
    fn lists_and_depth() {
        let parsed = parse("[1, 2, 3]").unwrap();
        assert_eq!(parsed.ty, Type::list(Type::integer()));
        assert_eq!(parsed.depth, 1);

        let nested = parse("[[1], [2, 3]]").unwrap();
        assert_eq!(nested.ty.to_string(), "list<list<integer>>");
        assert_eq!(nested.depth, 2);
        assert_eq!(nested.depth, nested.ty.depth());
    }

    #[test]
    fn empty_containers() {
        assert_eq!(ty_of("[]"), "list<null>");
        assert_eq!(parse("[]").unwrap().depth, 1);
        assert_eq!(ty_of("{}"), "map<null;null>");
        assert_eq!(ty_of("()"), "tuple<null>");
    }

    #[test]
    fn mixed_numerics_widen_inside_a_container() {
        assert_eq!(ty_of("[1, 2.5]"), "list<float>");
        // Values are normalized to floats to match the element kind.
        assert_eq!(
            parse("[1, 2.5]").unwrap().value,
            Value::List(vec![Value::Float(1.0), Value::Float(2.5)])
        );
        assert_eq!(ty_of("[1, 0.1234567]"), "list<double>");
    }

    #[test]
    fn empty_and_concrete_siblings_unify_in_either_order() {
        assert_eq!(ty_of("[[], [1]]"), "list<list<integer>>");
        assert_eq!(ty_of("[[1], []]"), "list<list<integer>>");
    }

    #[test]
    fn inconsistent_elements_fail() {
        let err = parse("[1, 2, 'abc', 1.2]").unwrap_err();
        match err {
            LiteralError::InconsistentTypes(found) => {
                assert_eq!(found, vec!["string".to_string(), "float".to_string()]);
            }
            other => panic!("expected InconsistentTypes, got {:?}", other),
        }
        assert!(parse("[[1], 2]").is_err());
    }

    #[test]
    fn maps() {
        let parsed = parse("{'a': 1, 'b': 2}").unwrap();
        assert_eq!(parsed.ty.to_string(), "map<string;integer>");
        assert_eq!(
            parsed.value,
            Value::Map(vec![
                (MapKey::Str("a".into()), Value::Int(1)),
                (MapKey::Str("b".into()), Value::Int(2)),
            ])
        );
        assert_eq!(ty_of("{1: [2], 3: [4]}"), "map<integer;list<integer>>");
        assert_eq!(parse("{1: [2]}").unwrap().depth, 2);
    }

    #[test]
    fn map_key_kinds_are_restricted() {
        assert_eq!(
            parse("{1.5: 'x'}").unwrap_err(),
            LiteralError::BadMapKey("float".to_string())
        );
        assert!(parse("{True: 1}").is_err());
        assert!(parse("{(1,): 'x'}").is_err());
    }

    #[test]
    fn sets() {
        let parsed = parse("{1, 2}").unwrap();
        assert_eq!(parsed.ty, Type::set(Type::integer()));
        assert_eq!(parsed.value, Value::Set(vec![Value::Int(1), Value::Int(2)]));
        assert_eq!(ty_of("{'x'}"), "set<string>");
    }

    #[test]
    fn tuples_keep_heterogeneous_positions() {
        let parsed = parse("(1, 'a', True)").unwrap();
        assert_eq!(parsed.ty.to_string(), "tuple<integer|string|boolean>");
        assert_eq!(parsed.depth, 1);
        // Trailing comma makes a one-element tuple.
        assert_eq!(ty_of("(1,)"), "tuple<integer>");
        // Plain parentheses are just grouping.
        assert_eq!(ty_of("(1)"), "integer");
    }

    #[test]
    fn unsupported_forms() {
        assert!(matches!(
            parse("foo").unwrap_err(),
            LiteralError::Unsupported(_)
        ));
        assert!(matches!(
            parse("[x for x in y]").unwrap_err(),
            LiteralError::Unsupported(_)
        ));
        assert!(matches!(
            parse("f(1)").unwrap_err(),
            LiteralError::Unsupported(_)
        ));
        assert_eq!(
            parse("'open").unwrap_err(),
            LiteralError::UnterminatedString
        );
    }

    #[test]
    fn string_escapes() {
        assert_eq!(
            parse(r#"'a\'b\n'"#).unwrap().value,
            Value::Str("a'b\n".into())
        );
    }
}
