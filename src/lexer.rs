// ABOUTME: Lexer module for tokenizing Lisp source text

use crate::error::EvalError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Quote,
    /// Raw text between an opening and closing `"`, escapes not yet
    /// decoded — the reader owns escape processing.
    StringLit(String),
    /// Any other run of non-whitespace, non-separator characters.
    Atom(String),
}

/// Splits `input` into a token stream, skipping whitespace and `;;` line
/// comments. Raises `ParserError` if a string literal is never closed.
pub fn lex(input: &str) -> Result<Vec<Token>, EvalError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == ' ' || c == '\t' || c == '\r' || c == '\n' {
            i += 1;
            continue;
        }

        if c == ';' && chars.get(i + 1) == Some(&';') {
            while i < chars.len() && chars[i] != '\n' && chars[i] != '\r' {
                i += 1;
            }
            continue;
        }

        match c {
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '[' => {
                tokens.push(Token::LBracket);
                i += 1;
            }
            ']' => {
                tokens.push(Token::RBracket);
                i += 1;
            }
            '{' => {
                tokens.push(Token::LBrace);
                i += 1;
            }
            '}' => {
                tokens.push(Token::RBrace);
                i += 1;
            }
            '\'' => {
                tokens.push(Token::Quote);
                i += 1;
            }
            '"' => {
                i += 1;
                let mut content = String::new();
                let mut closed = false;
                while i < chars.len() {
                    match chars[i] {
                        '\\' if i + 1 < chars.len() => {
                            content.push('\\');
                            content.push(chars[i + 1]);
                            i += 2;
                        }
                        '"' => {
                            i += 1;
                            closed = true;
                            break;
                        }
                        other => {
                            content.push(other);
                            i += 1;
                        }
                    }
                }
                if !closed {
                    return Err(EvalError::parser_error(
                        "unterminated string literal",
                    ));
                }
                tokens.push(Token::StringLit(content));
            }
            _ => {
                let start = i;
                while i < chars.len() && !is_separator(chars[i]) {
                    i += 1;
                }
                let atom: String = chars[start..i].iter().collect();
                tokens.push(Token::Atom(atom));
            }
        }
    }

    Ok(tokens)
}

fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '(' | ')' | '[' | ']' | '{' | '}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_simple_application() {
        let tokens = lex("(+ 1 2)").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LParen,
                Token::Atom("+".to_string()),
                Token::Atom("1".to_string()),
                Token::Atom("2".to_string()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_lex_skips_comments_and_whitespace() {
        let tokens = lex(";; a comment\n(foo)  ;; trailing\n").unwrap();
        assert_eq!(
            tokens,
            vec![Token::LParen, Token::Atom("foo".to_string()), Token::RParen]
        );
    }

    #[test]
    fn test_lex_string_with_escapes_kept_raw() {
        let tokens = lex(r#""a\nb""#).unwrap();
        assert_eq!(tokens, vec![Token::StringLit("a\\nb".to_string())]);
    }

    #[test]
    fn test_lex_unterminated_string_is_error() {
        assert!(lex("\"abc").is_err());
    }

    #[test]
    fn test_lex_quote_always_splits() {
        let tokens = lex("'foo").unwrap();
        assert_eq!(tokens, vec![Token::Quote, Token::Atom("foo".to_string())]);

        let tokens = lex("'(1 2)").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Quote,
                Token::LParen,
                Token::Atom("1".to_string()),
                Token::Atom("2".to_string()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_lex_brackets_and_braces() {
        let tokens = lex("[1] {2}").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LBracket,
                Token::Atom("1".to_string()),
                Token::RBracket,
                Token::LBrace,
                Token::Atom("2".to_string()),
                Token::RBrace,
            ]
        );
    }
}
