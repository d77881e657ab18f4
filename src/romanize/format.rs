use serde::Deserialize;

use super::RomanizeError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseType {
    #[default]
    Lowercase,
    Uppercase,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneType {
    /// "zhong"
    #[default]
    None,
    /// "zhong1"
    Number,
    /// "zhōng"
    Mark,
}

/// How ü is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VCharType {
    /// "lv"
    #[default]
    V,
    /// "lu:"
    UColon,
    /// "lü"
    UUnicode,
}

/// Output format of a pinyin reading.
///
/// The default is lowercase, toneless, with ü written as `v`, which is what
/// an index wants: plain ASCII that users can type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PinyinFormat {
    #[serde(default)]
    pub case: CaseType,
    #[serde(default)]
    pub tone: ToneType,
    #[serde(default)]
    pub v_char: VCharType,
}

impl PinyinFormat {
    /// Tone marks can only sit on a real ü, never on `v` or `u:`.
    pub fn validate(&self) -> Result<(), RomanizeError> {
        if self.tone == ToneType::Mark && self.v_char != VCharType::UUnicode {
            return Err(RomanizeError::UnsupportedFormatCombination {
                tone: self.tone,
                v_char: self.v_char,
            });
        }
        Ok(())
    }

    /// Apply the ü and case settings to a reading that spells ü as `ü`.
    pub fn render(&self, reading: &str) -> String {
        let s = match self.v_char {
            VCharType::V => reading.replace('ü', "v"),
            VCharType::UColon => reading.replace('ü', "u:"),
            VCharType::UUnicode => reading.to_string(),
        };
        match self.case {
            CaseType::Lowercase => s,
            CaseType::Uppercase => s.to_uppercase(),
        }
    }
}
