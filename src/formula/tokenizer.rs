//! Tokenizer for the restricted rate-formula evaluator.
//!
//! Only the constructs the evaluator supports tokenize at all: numbers,
//! identifiers (cell references or the ROUND function), the four arithmetic
//! operators, parentheses, and commas. Anything else is a tokenize error,
//! which the evaluator collapses to 0.0.

use std::iter::Peekable;
use std::str::Chars;

/// A token in a rate formula.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A numeric literal (e.g. 123, 45.67)
    Number(f64),
    /// A cell reference or function name, `$` anchors included
    Identifier(String),
    /// One of + - * /
    Operator(char),
    OpenParen,
    CloseParen,
    Comma,
}

/// Error during tokenization
#[derive(Debug, Clone, PartialEq)]
pub struct TokenizeError {
    pub message: String,
    pub position: usize,
}

impl TokenizeError {
    fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

impl std::fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Tokenize error at position {}: {}",
            self.position, self.message
        )
    }
}

impl std::error::Error for TokenizeError {}

pub struct Tokenizer<'a> {
    chars: Peekable<Chars<'a>>,
    position: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(formula: &'a str) -> Self {
        // Strip leading '=' if present
        let formula = formula.strip_prefix('=').unwrap_or(formula);
        Self {
            chars: formula.chars().peekable(),
            position: 0,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, TokenizeError> {
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }

        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Option<Token>, TokenizeError> {
        self.skip_whitespace();

        match self.peek() {
            None => Ok(None),
            Some(c) => {
                let token = match c {
                    '(' => {
                        self.advance();
                        Token::OpenParen
                    }
                    ')' => {
                        self.advance();
                        Token::CloseParen
                    }
                    ',' => {
                        self.advance();
                        Token::Comma
                    }
                    '+' | '-' | '*' | '/' => {
                        let op = self.advance().unwrap();
                        Token::Operator(op)
                    }
                    c if c.is_ascii_digit() || c == '.' => self.read_number()?,
                    c if c.is_alphabetic() || c == '$' || c == '_' => self.read_identifier(),
                    c => {
                        return Err(TokenizeError::new(
                            format!("Unsupported character: '{}'", c),
                            self.position,
                        ));
                    }
                };
                Ok(Some(token))
            }
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c.is_some() {
            self.position += 1;
        }
        c
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> Result<Token, TokenizeError> {
        let start_pos = self.position;
        let mut num_str = String::new();

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '.' {
                num_str.push(self.advance().unwrap());
            } else {
                break;
            }
        }

        num_str
            .parse::<f64>()
            .map(Token::Number)
            .map_err(|_| TokenizeError::new(format!("Invalid number: {}", num_str), start_pos))
    }

    /// Read a cell reference or function name. `!` is included so that
    /// cross-sheet references surface as one identifier the parser can
    /// reject, rather than tokenizing into garbage.
    fn read_identifier(&mut self) -> Token {
        let mut ident = String::new();

        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '$' || c == '!' || c == '.' {
                ident.push(self.advance().unwrap());
            } else {
                break;
            }
        }

        Token::Identifier(ident)
    }
}

/// Convenience function to tokenize a formula string
pub fn tokenize(formula: &str) -> Result<Vec<Token>, TokenizeError> {
    Tokenizer::new(formula).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_number() {
        assert_eq!(tokenize("42").unwrap(), vec![Token::Number(42.0)]);
        assert_eq!(tokenize("3.567").unwrap(), vec![Token::Number(3.567)]);
    }

    #[test]
    fn test_tokenize_cell_ref() {
        assert_eq!(
            tokenize("=G148").unwrap(),
            vec![Token::Identifier("G148".to_string())]
        );
        assert_eq!(
            tokenize("$J$5").unwrap(),
            vec![Token::Identifier("$J$5".to_string())]
        );
    }

    #[test]
    fn test_tokenize_arithmetic() {
        assert_eq!(
            tokenize("=G148*I148+2").unwrap(),
            vec![
                Token::Identifier("G148".to_string()),
                Token::Operator('*'),
                Token::Identifier("I148".to_string()),
                Token::Operator('+'),
                Token::Number(2.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_round_call() {
        assert_eq!(
            tokenize("ROUND(J5/7, 2)").unwrap(),
            vec![
                Token::Identifier("ROUND".to_string()),
                Token::OpenParen,
                Token::Identifier("J5".to_string()),
                Token::Operator('/'),
                Token::Number(7.0),
                Token::Comma,
                Token::Number(2.0),
                Token::CloseParen,
            ]
        );
    }

    #[test]
    fn test_cross_sheet_ref_is_single_identifier() {
        assert_eq!(
            tokenize("Rates!B2").unwrap(),
            vec![Token::Identifier("Rates!B2".to_string())]
        );
    }

    #[test]
    fn test_unsupported_characters_error() {
        assert!(tokenize("=A1^2").is_err());
        assert!(tokenize("=A1&\"x\"").is_err());
        assert!(tokenize("=A1:B2").is_err());
        assert!(tokenize("='Sheet One'!A1").is_err());
        assert!(tokenize("=A1>2").is_err());
    }

    #[test]
    fn test_tokenize_empty() {
        assert_eq!(tokenize("").unwrap(), vec![]);
        assert_eq!(tokenize("   ").unwrap(), vec![]);
    }
}
