//! Whitespace-preserving tokenizer for text runs.

use regex::Regex;

/// One piece of a text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A maximal run of whitespace, kept verbatim
    Whitespace(String),
    /// A maximal run of non-whitespace characters
    Word(String),
}

impl Token {
    /// Get the token text.
    pub fn as_str(&self) -> &str {
        match self {
            Token::Whitespace(s) | Token::Word(s) => s,
        }
    }

    /// Check if this is a word token.
    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word(_))
    }
}

/// Splits text into alternating word and whitespace tokens.
///
/// Concatenating the tokens in order always reproduces the input. Empty
/// tokens are never produced, so a run that starts or ends with whitespace
/// begins or ends with a `Whitespace` token rather than an empty word.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    whitespace: Regex,
}

impl Tokenizer {
    /// Create a tokenizer splitting on Unicode whitespace.
    pub fn new() -> Self {
        Self {
            whitespace: Regex::new(r"\s+").expect("whitespace pattern is valid"),
        }
    }

    /// Split `text` into tokens.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut last = 0;

        for m in self.whitespace.find_iter(text) {
            if m.start() > last {
                tokens.push(Token::Word(text[last..m.start()].to_string()));
            }
            tokens.push(Token::Whitespace(m.as_str().to_string()));
            last = m.end();
        }

        if last < text.len() {
            tokens.push(Token::Word(text[last..].to_string()));
        }

        tokens
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Concatenate tokens back into a string.
pub fn join_tokens(tokens: &[Token]) -> String {
    tokens.iter().map(Token::as_str).collect()
}
