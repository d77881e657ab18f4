//! Character-to-pinyin lookup.
//!
//! `Romanizer` is the boundary the expander consults for each character.
//! Implementations return every candidate reading in preference order; an
//! empty list means the character has no reading and contributes nothing.

mod format;
mod hanyu;
mod layered;
mod table;

pub use format::{CaseType, PinyinFormat, ToneType, VCharType};
pub use hanyu::PinyinRomanizer;
pub use layered::LayeredRomanizer;
pub use table::{parse_table_toml, TableError, TableRomanizer};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RomanizeError {
    #[error("unsupported pinyin format combination: tone={tone:?}, v_char={v_char:?}")]
    UnsupportedFormatCombination { tone: ToneType, v_char: VCharType },
}

pub trait Romanizer: Send + Sync {
    /// Candidate readings for `c`, most preferred first.
    fn romanize(&self, c: char) -> Result<Vec<String>, RomanizeError>;
}
