//! # Tokenizer
//!
//! Splits normalized filename stems into attribute tokens.

use crate::vocabulary::TOKEN_SEPARATOR;

/// A token extracted from a stem with positional information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token text content
    pub text: String,
    /// Start position in the tokenized string
    pub start: usize,
    /// End position in the tokenized string
    pub end: usize,
    /// Token index in the sequence
    pub index: usize,
}

/// Tokenizer for normalized stems.
///
/// Only the token separator splits; `-` and `+` are part of tokens
/// (`size-m`, `black+accent`).
#[derive(Debug, Clone, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a new tokenizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Tokenize a stem into a sequence of tokens, skipping empty segments.
    ///
    /// # Examples
    /// ```
    /// use logomark_core::parser::tokenizer::Tokenizer;
    ///
    /// let tokens = Tokenizer::new().tokenize("left__black_size-m");
    /// let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
    /// assert_eq!(texts, ["left", "black", "size-m"]);
    /// ```
    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut current_start = 0;

        for (idx, c) in input.char_indices() {
            if c == TOKEN_SEPARATOR {
                self.push(&mut tokens, input, current_start, idx);
                current_start = idx + c.len_utf8();
            }
        }
        self.push(&mut tokens, input, current_start, input.len());

        tokens
    }

    fn push(&self, tokens: &mut Vec<Token>, input: &str, start: usize, end: usize) {
        if end > start {
            tokens.push(Token {
                text: input[start..end].to_string(),
                start,
                end,
                index: tokens.len(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("left_bar_black+accent_size-m");

        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[2].text, "black+accent");
        assert_eq!(tokens[2].start, 9);
        assert_eq!(tokens[2].end, 21);
        assert_eq!(tokens[3].index, 3);
    }

    #[test]
    fn test_tokenize_leading_separator() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("_black");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "black");
        assert_eq!(tokens[0].index, 0);
    }

    #[test]
    fn test_tokenize_empty() {
        let tokenizer = Tokenizer::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("___").is_empty());
    }
}
