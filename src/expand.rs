//! Combination expansion: every pinyin spelling of a multi-character token.
//!
//! A token's readings are the cross product of its characters' readings.
//! Polyphones make that product explode, so once `max_polyphone_branches`
//! characters have branched, every later character contributes only its
//! first reading.

use std::collections::BTreeSet;

use tracing::{debug, debug_span, warn};

use crate::filter::OutputKind;
use crate::romanize::{RomanizeError, Romanizer};

/// The derived forms of one token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PronunciationCandidates {
    pub full_forms: BTreeSet<String>,
    pub abbreviations: BTreeSet<String>,
}

impl PronunciationCandidates {
    pub fn is_empty(&self) -> bool {
        self.full_forms.is_empty() && self.abbreviations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.full_forms.len() + self.abbreviations.len()
    }

    /// Full forms first, then the abbreviations not already present.
    pub fn into_derived(self) -> Vec<String> {
        let Self {
            full_forms,
            abbreviations,
        } = self;
        let extra: Vec<String> = abbreviations
            .into_iter()
            .filter(|a| !full_forms.contains(a))
            .collect();
        let mut derived: Vec<String> = full_forms.into_iter().collect();
        derived.extend(extra);
        derived
    }
}

/// Partial combinations built so far, plus the number of characters that
/// have branched.
#[derive(Debug, Default)]
struct Frontier {
    partials: BTreeSet<String>,
    polyphone_branches: usize,
    collapsed: usize,
}

impl Frontier {
    /// Multiply the frontier by one character's readings. `column` is
    /// deduplicated and never empty.
    fn push(&mut self, column: &[String], max_polyphone_branches: usize) {
        if self.partials.is_empty() {
            self.partials.extend(column.iter().cloned());
        } else {
            let choices = if self.polyphone_branches >= max_polyphone_branches {
                if column.len() > 1 {
                    self.collapsed += 1;
                }
                &column[..1]
            } else {
                column
            };
            let prev = std::mem::take(&mut self.partials);
            for partial in &prev {
                for choice in choices {
                    let mut s = String::with_capacity(partial.len() + choice.len());
                    s.push_str(partial);
                    s.push_str(choice);
                    self.partials.insert(s);
                }
            }
        }
        // Counted after the collapse decision: the cap is a one-way latch
        // that applies from the next character on.
        if column.len() > 1 {
            self.polyphone_branches += 1;
        }
    }
}

/// Order-preserving dedup.
fn distinct(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

fn first_letter(reading: &str) -> Option<String> {
    reading.chars().next().map(String::from)
}

pub struct Expander<'a> {
    romanizer: &'a dyn Romanizer,
    max_polyphone_branches: usize,
}

impl<'a> Expander<'a> {
    /// `max_polyphone_branches == 0` means no cap.
    pub fn new(romanizer: &'a dyn Romanizer, max_polyphone_branches: usize) -> Self {
        let max_polyphone_branches = if max_polyphone_branches == 0 {
            usize::MAX
        } else {
            max_polyphone_branches
        };
        Self {
            romanizer,
            max_polyphone_branches,
        }
    }

    /// Deduplicated readings per character, skipping characters without any.
    fn columns(&self, text: &str, abbreviate: bool) -> Result<Vec<Vec<String>>, RomanizeError> {
        let mut columns = Vec::new();
        for c in text.chars() {
            let readings = self.romanizer.romanize(c)?;
            let column = if abbreviate {
                distinct(readings.iter().filter_map(|r| first_letter(r)))
            } else {
                distinct(readings.into_iter().filter(|r| !r.is_empty()))
            };
            if !column.is_empty() {
                columns.push(column);
            }
        }
        Ok(columns)
    }

    fn combine(&self, columns: &[Vec<String>]) -> BTreeSet<String> {
        let mut frontier = Frontier::default();
        for column in columns {
            frontier.push(column, self.max_polyphone_branches);
        }
        debug!(
            columns = columns.len(),
            branches = frontier.polyphone_branches,
            collapsed = frontier.collapsed,
            candidates = frontier.partials.len()
        );
        frontier.partials
    }

    /// All full pinyin spellings of `text`.
    pub fn full(&self, text: &str) -> Result<BTreeSet<String>, RomanizeError> {
        let _span = debug_span!("expand_full").entered();
        let columns = self.columns(text, false)?;
        Ok(self.combine(&columns))
    }

    /// All first-letter abbreviations of `text`.
    pub fn abbreviations(&self, text: &str) -> Result<BTreeSet<String>, RomanizeError> {
        let _span = debug_span!("expand_abbreviation").entered();
        let columns = self.columns(text, true)?;
        Ok(self.combine(&columns))
    }

    /// Expand `text` for the requested kinds.
    ///
    /// A lookup failure is logged and yields empty candidates; the token is
    /// then treated as if it had no Chinese at all.
    pub fn candidates(&self, text: &str, kind: OutputKind) -> PronunciationCandidates {
        match self.try_candidates(text, kind) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(token = text, "pinyin expansion skipped: {e}");
                PronunciationCandidates::default()
            }
        }
    }

    fn try_candidates(
        &self,
        text: &str,
        kind: OutputKind,
    ) -> Result<PronunciationCandidates, RomanizeError> {
        let mut candidates = PronunciationCandidates::default();
        if kind.includes_full() {
            candidates.full_forms = self.full(text)?;
        }
        if kind.includes_abbreviation() {
            candidates.abbreviations = self.abbreviations(text)?;
        }
        Ok(candidates)
    }
}
