//! Pinyin token filter for search indexing.
//!
//! [`filter::PinyinTransformFilter`] wraps a token stream and, after every
//! token containing Chinese, yields its pinyin spellings and/or first-letter
//! abbreviations stacked at the same position, so "北京", "beijing" and "bj"
//! all match the same document.

pub mod expand;
pub mod filter;
pub mod romanize;
pub mod settings;
pub mod token;
pub mod tokenizer;
pub mod trace_init;
pub mod unicode;

pub use filter::{FilterConfig, OutputKind, PinyinTransformExt, PinyinTransformFilter};
pub use romanize::{PinyinRomanizer, Romanizer};
pub use token::Token;
