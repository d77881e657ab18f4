//! Whitespace tokenizer used as a simple upstream for the filter.
//!
//! Chinese text has no spaces between words, so callers are expected to
//! pass pre-segmented text ("北京 上海") or put a real segmenter upstream.

use std::io::{self, BufRead};
use std::str::CharIndices;
use std::vec;

use crate::token::Token;

pub struct WhitespaceTokenizer<'a> {
    text: &'a str,
    chars: CharIndices<'a>,
    /// Added to every offset, for text that is a slice of a larger document.
    base_offset: usize,
}

impl<'a> WhitespaceTokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::with_base_offset(text, 0)
    }

    pub fn with_base_offset(text: &'a str, base_offset: usize) -> Self {
        Self {
            text,
            chars: text.char_indices(),
            base_offset,
        }
    }
}

impl Iterator for WhitespaceTokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let start = loop {
            let (i, c) = self.chars.next()?;
            if !c.is_whitespace() {
                break i;
            }
        };
        let mut end = self.text.len();
        for (i, c) in self.chars.by_ref() {
            if c.is_whitespace() {
                end = i;
                break;
            }
        }
        Some(Token::new(
            &self.text[start..end],
            self.base_offset + start,
            self.base_offset + end,
        ))
    }
}

/// Whitespace tokens of a line-oriented reader.
///
/// Offsets count every byte read, line terminators included, so they stay
/// aligned with the raw input for both `\n` and `\r\n` endings.
pub struct LineTokenizer<R> {
    reader: R,
    line: String,
    base_offset: usize,
    pending: vec::IntoIter<Token>,
    done: bool,
}

impl<R: BufRead> LineTokenizer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            base_offset: 0,
            pending: Vec::new().into_iter(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for LineTokenizer<R> {
    type Item = io::Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.next() {
                return Some(Ok(token));
            }
            if self.done {
                return None;
            }
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => self.done = true,
                Ok(n) => {
                    let tokens: Vec<Token> =
                        WhitespaceTokenizer::with_base_offset(&self.line, self.base_offset).collect();
                    self.pending = tokens.into_iter();
                    self.base_offset += n;
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
