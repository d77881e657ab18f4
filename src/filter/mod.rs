//! Pull-based token filter that adds pinyin tokens after Chinese tokens.
//!
//! For every upstream token the filter yields, in order: the token itself
//! (unless `emit_original` is off), then each derived pinyin form. Derived
//! tokens stack on the original (`position_increment == 0`); without the
//! original, the first derived token inherits its increment instead.
//!
//! Exactly one upstream token is buffered at a time, and it is drained
//! before the next one is pulled.

mod config;
#[cfg(test)]
mod tests;

use std::iter::FusedIterator;
use std::mem;
use std::sync::Arc;
use std::vec;

use tracing::debug_span;

use crate::expand::Expander;
use crate::romanize::Romanizer;
use crate::token::Token;
use crate::unicode::ideographic_count;

pub use config::{
    FilterConfig, OutputKind, DEFAULT_MAX_POLYPHONE_BRANCHES, DEFAULT_MIN_TERM_LENGTH,
    UNLIMITED_POLYPHONE_BRANCHES,
};

enum State {
    /// Nothing buffered; the next pull reads upstream.
    NeedInput,
    /// Buffered token whose original has not been emitted yet.
    EmitOriginal(Token),
    /// Buffered token awaiting expansion.
    Expand(Token),
    /// Draining the derived forms of the buffered token.
    EmitDerived {
        token: Token,
        derived: vec::IntoIter<String>,
        started: bool,
    },
    /// Upstream exhausted.
    Done,
}

pub struct PinyinTransformFilter<I> {
    input: I,
    romanizer: Arc<dyn Romanizer>,
    config: FilterConfig,
    state: State,
}

impl<I, E> PinyinTransformFilter<I>
where
    I: Iterator<Item = Result<Token, E>>,
{
    pub fn new(input: I, romanizer: Arc<dyn Romanizer>, config: FilterConfig) -> Self {
        Self {
            input,
            romanizer,
            config: config.normalized(),
            state: State::NeedInput,
        }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// State after the original of `token` has been dealt with.
    fn expand(&self, token: Token) -> State {
        let _span = debug_span!("pinyin_filter_expand", token = token.text.as_str()).entered();
        if ideographic_count(&token.text) < self.config.min_term_length {
            return State::NeedInput;
        }
        let expander = Expander::new(self.romanizer.as_ref(), self.config.max_polyphone_branches);
        let candidates = expander.candidates(&token.text, self.config.output);
        if candidates.is_empty() {
            return State::NeedInput;
        }
        State::EmitDerived {
            token,
            derived: candidates.into_derived().into_iter(),
            started: false,
        }
    }

    fn derived_increment(&self, token: &Token, started: bool) -> u32 {
        if self.config.emit_original || started {
            0
        } else {
            token.position_increment
        }
    }
}

impl<I, E> Iterator for PinyinTransformFilter<I>
where
    I: Iterator<Item = Result<Token, E>>,
{
    type Item = Result<Token, E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match mem::replace(&mut self.state, State::Done) {
                State::Done => return None,
                State::NeedInput => match self.input.next() {
                    None => return None,
                    Some(Err(e)) => {
                        self.state = State::NeedInput;
                        return Some(Err(e));
                    }
                    Some(Ok(token)) => {
                        self.state = if self.config.emit_original {
                            State::EmitOriginal(token)
                        } else {
                            State::Expand(token)
                        };
                    }
                },
                State::EmitOriginal(token) => {
                    let out = token.clone();
                    self.state = State::Expand(token);
                    return Some(Ok(out));
                }
                State::Expand(token) => {
                    self.state = self.expand(token);
                }
                State::EmitDerived {
                    token,
                    mut derived,
                    started,
                } => {
                    let Some(text) = derived.next() else {
                        self.state = State::NeedInput;
                        continue;
                    };
                    let out = token.derive(text, self.derived_increment(&token, started));
                    self.state = State::EmitDerived {
                        token,
                        derived,
                        started: true,
                    };
                    return Some(Ok(out));
                }
            }
        }
    }
}

impl<I, E> FusedIterator for PinyinTransformFilter<I> where I: Iterator<Item = Result<Token, E>> {}

/// Adapter to attach the filter to any token stream.
pub trait PinyinTransformExt<E>: Iterator<Item = Result<Token, E>> + Sized {
    fn pinyin_transform(
        self,
        romanizer: Arc<dyn Romanizer>,
        config: FilterConfig,
    ) -> PinyinTransformFilter<Self> {
        PinyinTransformFilter::new(self, romanizer, config)
    }
}

impl<I, E> PinyinTransformExt<E> for I where I: Iterator<Item = Result<Token, E>> {}
