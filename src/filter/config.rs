use serde::Deserialize;

pub const DEFAULT_MIN_TERM_LENGTH: usize = 2;
pub const DEFAULT_MAX_POLYPHONE_BRANCHES: usize = 10;
/// `max_polyphone_branches` value that disables the cap.
pub const UNLIMITED_POLYPHONE_BRANCHES: usize = 0;

/// Which derived forms to emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// Full pinyin: 北京 → beijing
    #[default]
    Pinyin,
    /// First letters: 北京 → bj
    Abbreviation,
    Both,
}

impl OutputKind {
    pub fn includes_full(self) -> bool {
        matches!(self, Self::Pinyin | Self::Both)
    }

    pub fn includes_abbreviation(self) -> bool {
        matches!(self, Self::Abbreviation | Self::Both)
    }
}

impl std::str::FromStr for OutputKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pinyin" => Ok(Self::Pinyin),
            "abbreviation" => Ok(Self::Abbreviation),
            "both" => Ok(Self::Both),
            other => Err(format!(
                "unknown output kind {other:?} (expected pinyin, abbreviation or both)"
            )),
        }
    }
}

/// Construction-time options of [`PinyinTransformFilter`](super::PinyinTransformFilter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    pub output: OutputKind,
    /// Minimum number of Chinese characters for a token to be expanded.
    pub min_term_length: usize,
    /// Polyphonic characters allowed to branch before the rest collapse to
    /// their first reading. `0` means no cap.
    pub max_polyphone_branches: usize,
    /// Also emit the original token.
    pub emit_original: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            output: OutputKind::Pinyin,
            min_term_length: DEFAULT_MIN_TERM_LENGTH,
            max_polyphone_branches: DEFAULT_MAX_POLYPHONE_BRANCHES,
            emit_original: true,
        }
    }
}

impl FilterConfig {
    pub fn with_output(mut self, output: OutputKind) -> Self {
        self.output = output;
        self
    }

    pub fn with_min_term_length(mut self, min_term_length: usize) -> Self {
        self.min_term_length = min_term_length;
        self
    }

    pub fn with_max_polyphone_branches(mut self, max_polyphone_branches: usize) -> Self {
        self.max_polyphone_branches = max_polyphone_branches;
        self
    }

    pub fn with_emit_original(mut self, emit_original: bool) -> Self {
        self.emit_original = emit_original;
        self
    }

    /// Raise `min_term_length` to at least 1 and turn the "no cap" sentinel
    /// into `usize::MAX`.
    pub fn normalized(mut self) -> Self {
        self.min_term_length = self.min_term_length.max(1);
        if self.max_polyphone_branches == UNLIMITED_POLYPHONE_BRANCHES {
            self.max_polyphone_branches = usize::MAX;
        }
        self
    }
}
