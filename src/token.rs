use serde::Serialize;

/// Type tag of tokens that come straight from a tokenizer.
pub const DEFAULT_TOKEN_TYPE: &str = "word";

/// Type tag of tokens produced by the pinyin filter.
pub const PINYIN_TOKEN_TYPE: &str = "pinyin";

/// One token of an analysis stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    /// Positions advanced relative to the previous token. `0` stacks this
    /// token on the previous one, as a synonym would.
    pub position_increment: u32,
    /// Byte offsets into the original text.
    pub start_offset: usize,
    pub end_offset: usize,
    pub token_type: String,
}

impl Token {
    pub fn new(text: impl Into<String>, start_offset: usize, end_offset: usize) -> Self {
        Self {
            text: text.into(),
            position_increment: 1,
            start_offset,
            end_offset,
            token_type: DEFAULT_TOKEN_TYPE.to_string(),
        }
    }

    pub fn with_position_increment(mut self, position_increment: u32) -> Self {
        self.position_increment = position_increment;
        self
    }

    pub fn with_type(mut self, token_type: impl Into<String>) -> Self {
        self.token_type = token_type.into();
        self
    }

    /// A pinyin token standing at the same offsets as `self`.
    pub(crate) fn derive(&self, text: String, position_increment: u32) -> Self {
        Self {
            text,
            position_increment,
            start_offset: self.start_offset,
            end_offset: self.end_offset,
            token_type: PINYIN_TOKEN_TYPE.to_string(),
        }
    }
}
