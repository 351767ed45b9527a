// ABOUTME: Reader module for parsing a token stream into Lisp expressions

use crate::error::EvalError;
use crate::lexer::{self, Token};
use crate::value::Value;

struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}

/// Reads every top-level form from `tokens` in order.
pub fn read_all(tokens: &[Token]) -> Result<Vec<Value>, EvalError> {
    let mut cursor = Cursor { tokens, pos: 0 };
    let mut forms = Vec::new();
    while !cursor.at_end() {
        forms.push(read_form(&mut cursor)?);
    }
    Ok(forms)
}

fn read_form(cursor: &mut Cursor) -> Result<Value, EvalError> {
    let token = cursor
        .bump()
        .ok_or_else(|| EvalError::parser_error("unexpected end of input; form expected"))?
        .clone();

    match token {
        Token::LParen => read_sequence(cursor, Token::RParen).map(Value::List),
        Token::LBracket => {
            let mut items = read_sequence(cursor, Token::RBracket)?;
            let mut list = vec![Value::Symbol("list".to_string())];
            list.append(&mut items);
            Ok(Value::List(list))
        }
        Token::LBrace => {
            let mut items = read_sequence(cursor, Token::RBrace)?;
            let mut list = vec![Value::Symbol("tuple".to_string())];
            list.append(&mut items);
            Ok(Value::List(list))
        }
        Token::RParen | Token::RBracket | Token::RBrace => Err(EvalError::parser_error(
            "unexpected closing delimiter",
        )),
        Token::Quote => {
            let quoted = read_form(cursor)?;
            Ok(Value::List(vec![Value::Symbol("quote".to_string()), quoted]))
        }
        Token::StringLit(raw) => Ok(Value::String(decode_escapes(&raw))),
        Token::Atom(atom) => Ok(atom_to_value(&atom)),
    }
}

/// Reads forms until `closer` is consumed; raises on running out of input.
fn read_sequence(cursor: &mut Cursor, closer: Token) -> Result<Vec<Value>, EvalError> {
    let mut items = Vec::new();
    loop {
        match cursor.peek() {
            None => {
                return Err(EvalError::parser_error(format!(
                    "missing matching {}",
                    closer_name(&closer)
                )))
            }
            Some(tok) if *tok == closer => {
                cursor.bump();
                return Ok(items);
            }
            _ => items.push(read_form(cursor)?),
        }
    }
}

fn closer_name(token: &Token) -> &'static str {
    match token {
        Token::RParen => ")",
        Token::RBracket => "]",
        Token::RBrace => "}",
        _ => "closing delimiter",
    }
}

fn atom_to_value(atom: &str) -> Value {
    if is_numeric_atom(atom) {
        if let Ok(n) = atom.parse::<f64>() {
            return Value::Number(n);
        }
    }
    Value::Symbol(atom.to_string())
}

/// A token begins a number if it starts with a digit, or with `-`
/// followed by a digit.
fn is_numeric_atom(atom: &str) -> bool {
    let mut chars = atom.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('-') => matches!(chars.next(), Some(c) if c.is_ascii_digit()),
        _ => false,
    }
}

fn decode_escapes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('v') => out.push('\u{0B}'),
            Some('0') => out.push('\0'),
            Some('b') => out.push('\u{08}'),
            Some('f') => out.push('\u{0C}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// Lexes and reads `source` into every top-level form it contains.
pub fn read_source(source: &str) -> Result<Vec<Value>, EvalError> {
    let tokens = lexer::lex(source)?;
    read_all(&tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_application() {
        let forms = read_source("(+ 1 2)").unwrap();
        assert_eq!(forms.len(), 1);
        match &forms[0] {
            Value::List(items) => assert_eq!(items.len(), 3),
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_read_bracket_sugar_is_list_call() {
        let forms = read_source("[1 2]").unwrap();
        match &forms[0] {
            Value::List(items) => {
                assert!(matches!(&items[0], Value::Symbol(s) if s == "list"));
                assert_eq!(items.len(), 3);
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_read_brace_sugar_is_tuple_call() {
        let forms = read_source("{1 2}").unwrap();
        match &forms[0] {
            Value::List(items) => {
                assert!(matches!(&items[0], Value::Symbol(s) if s == "tuple"));
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_read_quote_prefix() {
        let forms = read_source("'foo").unwrap();
        match &forms[0] {
            Value::List(items) => {
                assert!(matches!(&items[0], Value::Symbol(s) if s == "quote"));
                assert!(matches!(&items[1], Value::Symbol(s) if s == "foo"));
            }
            _ => panic!("expected (quote foo)"),
        }
    }

    #[test]
    fn test_read_string_escapes() {
        let forms = read_source(r#""a\nb\"c""#).unwrap();
        assert_eq!(forms[0], Value::String("a\nb\"c".to_string()));
    }

    #[test]
    fn test_read_negative_number_vs_minus_symbol() {
        let forms = read_source("(-1 -)").unwrap();
        match &forms[0] {
            Value::List(items) => {
                assert_eq!(items[0], Value::Number(-1.0));
                assert_eq!(items[1], Value::Symbol("-".to_string()));
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_read_missing_closer_is_error() {
        assert!(read_source("(+ 1 2").is_err());
    }

    #[test]
    fn test_read_multiple_top_level_forms() {
        let forms = read_source("(define a 1) (define b 2)").unwrap();
        assert_eq!(forms.len(), 2);
    }

    #[test]
    fn test_read_empty_source_yields_no_forms() {
        let forms = read_source("  ;; just a comment\n").unwrap();
        assert!(forms.is_empty());
    }
}
