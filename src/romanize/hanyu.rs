use ::pinyin::{Pinyin, ToPinyinMulti};

use super::{PinyinFormat, RomanizeError, Romanizer, ToneType};

/// Lookup backed by the heteronym data of the `pinyin` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PinyinRomanizer {
    format: PinyinFormat,
}

impl PinyinRomanizer {
    pub fn new(format: PinyinFormat) -> Self {
        Self { format }
    }

    fn spell(&self, p: Pinyin) -> String {
        let raw = match self.format.tone {
            ToneType::None => p.plain(),
            ToneType::Number => p.with_tone_num_end(),
            ToneType::Mark => p.with_tone(),
        };
        self.format.render(raw)
    }
}

impl Romanizer for PinyinRomanizer {
    fn romanize(&self, c: char) -> Result<Vec<String>, RomanizeError> {
        self.format.validate()?;
        let Some(multi) = c.to_pinyin_multi() else {
            return Ok(Vec::new());
        };
        let mut readings: Vec<String> = Vec::new();
        for p in multi {
            let s = self.spell(p);
            // Readings that differ only by tone collapse when tones are dropped.
            if !readings.contains(&s) {
                readings.push(s);
            }
        }
        Ok(readings)
    }
}
