//! Assertion scanning over the supporting test code.
//!
//! The supporting code is split into statements and scanned for the
//! constrained shapes `assert <entry>(<args>) == <literal>`,
//! `assert <entry>(<args>)` (expected `True`), and
//! `assert not <entry>(<args>)` (expected `False`). Statements of any other
//! shape are skipped; only imports, argument-less entry calls, and
//! malformed literals inside a retained statement terminate the question.

use glot_literal::{
    Lexer, LiteralError, LiteralParser, NumericWidening, Parsed, Token, TokenKind, Value,
};
use glot_schema::Type;

use crate::error::ConvertError;

/// One retained example: the call arguments and the expected output, with
/// the sequential index assigned in scan order.
#[derive(Clone, Debug)]
pub struct Example {
    pub idx: usize,
    pub inputs: Vec<Parsed>,
    pub output: Parsed,
}

/// Scan the supporting code for retained examples of the entry function.
///
/// `param_names` are the already-disambiguated parameter names, used for
/// slot identity in diagnostics and for the arity check.
pub fn scan_test_cases(
    testing_code: &str,
    entry_fn_name: &str,
    param_names: &[String],
    widening: NumericWidening,
) -> Result<Vec<Example>, ConvertError> {
    let statements = split_statements(testing_code);

    // Imports anywhere poison the whole question, even when no retained
    // assertion depends on them. The check covers every token so compound
    // single-line forms (`if x: import m`) cannot slip through.
    for statement in &statements {
        let tokens = Lexer::tokenize(statement);
        if tokens
            .iter()
            .any(|t| matches!(t.kind, TokenKind::Import | TokenKind::From))
        {
            return Err(ConvertError::UnsupportedConstruct {
                reason: "Imports are not supported".to_string(),
            });
        }
    }

    let mut examples = Vec::new();
    for statement in &statements {
        let tokens = Lexer::tokenize(statement);
        let idx = examples.len();
        if let Some(example) =
            scan_statement(statement, &tokens, entry_fn_name, param_names, widening, idx)?
        {
            examples.push(example);
        }
    }
    Ok(examples)
}

/// Scan one statement. `Ok(None)` means the statement is skipped.
fn scan_statement(
    source: &str,
    tokens: &[Token],
    entry_fn_name: &str,
    param_names: &[String],
    widening: NumericWidening,
    idx: usize,
) -> Result<Option<Example>, ConvertError> {
    let mut pos = 0;
    if kind_at(tokens, pos) != TokenKind::Assert {
        return Ok(None);
    }
    pos += 1;

    let negated = kind_at(tokens, pos) == TokenKind::Not;
    if negated {
        pos += 1;
    }

    if kind_at(tokens, pos) != TokenKind::Ident || token_text(source, tokens, pos) != entry_fn_name
    {
        return Ok(None);
    }
    pos += 1;
    if kind_at(tokens, pos) != TokenKind::LParen {
        return Ok(None);
    }
    pos += 1;

    if kind_at(tokens, pos) == TokenKind::RParen {
        return Err(ConvertError::UnsupportedConstruct {
            reason: "Calls with no arguments are not supported".to_string(),
        });
    }

    let mut parser = LiteralParser::new(source, tokens).with_widening(widening);
    parser.seek(pos);
    let mut inputs = Vec::new();
    loop {
        let slot = param_names
            .get(inputs.len())
            .map(String::as_str)
            .unwrap_or("argument");
        match parser.parse() {
            Ok(parsed) => inputs.push(parsed),
            Err(err) => return terminal_or_skip(slot, err),
        }
        match parser.peek() {
            TokenKind::Comma => {
                parser.seek(parser.pos() + 1);
            }
            TokenKind::RParen => {
                parser.seek(parser.pos() + 1);
                break;
            }
            _ => return Ok(None),
        }
    }

    if inputs.len() != param_names.len() {
        return Err(ConvertError::UnsupportedConstruct {
            reason: format!(
                "example {} supplies {} arguments but the entry function takes {}",
                idx,
                inputs.len(),
                param_names.len()
            ),
        });
    }

    let output = if negated {
        // `assert not f(args)` pins the output to False.
        if parser.peek() != TokenKind::Eof {
            return Ok(None);
        }
        boolean_output(false)
    } else {
        match parser.peek() {
            TokenKind::Eof => boolean_output(true),
            TokenKind::EqEq => {
                parser.seek(parser.pos() + 1);
                let parsed = match parser.parse() {
                    Ok(parsed) => parsed,
                    Err(err) => return terminal_or_skip("return", err),
                };
                if parser.peek() != TokenKind::Eof {
                    return Ok(None);
                }
                parsed
            }
            _ => return Ok(None),
        }
    };

    Ok(Some(Example {
        idx,
        inputs,
        output,
    }))
}

/// Map a literal failure inside a retained-looking statement: unsupported
/// expression forms skip the statement, everything else terminates the
/// question.
fn terminal_or_skip(slot: &str, err: LiteralError) -> Result<Option<Example>, ConvertError> {
    match err {
        LiteralError::Unsupported(_) => Ok(None),
        LiteralError::InconsistentTypes(found) => Err(ConvertError::InconsistentTypes {
            slot: slot.to_string(),
            found,
        }),
        other => Err(ConvertError::UnsupportedConstruct {
            reason: other.to_string(),
        }),
    }
}

fn boolean_output(value: bool) -> Parsed {
    Parsed {
        value: Value::Bool(value),
        ty: Type::boolean(),
        depth: 0,
    }
}

fn kind_at(tokens: &[Token], pos: usize) -> TokenKind {
    tokens.get(pos).map(|t| t.kind).unwrap_or(TokenKind::Eof)
}

fn token_text<'a>(source: &'a str, tokens: &[Token], pos: usize) -> &'a str {
    match tokens.get(pos) {
        Some(t) => &source[t.start as usize..t.end as usize],
        None => "",
    }
}

/// Split source text into logical statements: one per line, joining
/// continuation lines while brackets are open or a trailing backslash is
/// present.
fn split_statements(code: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut depth = 0i64;
    for line in code.lines() {
        let trimmed_end = line.trim_end();
        let continues = trimmed_end.ends_with('\\');
        let piece = if continues {
            &trimmed_end[..trimmed_end.len() - 1]
        } else {
            line
        };
        if current.is_empty() && piece.trim().is_empty() {
            continue;
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(piece);
        depth += bracket_delta(piece);
        if depth <= 0 && !continues {
            statements.push(std::mem::take(&mut current));
            depth = 0;
        }
    }
    if !current.trim().is_empty() {
        statements.push(current);
    }
    statements
}

/// Net open-bracket count of one line, judged on tokens so brackets inside
/// strings and comments do not count.
fn bracket_delta(line: &str) -> i64 {
    Lexer::tokenize(line)
        .iter()
        .map(|t| match t.kind {
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => 1,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => -1,
            _ => 0,
        })
        .sum()
}
