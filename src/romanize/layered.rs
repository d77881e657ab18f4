use std::sync::Arc;

use super::{RomanizeError, Romanizer};

/// A lookup that consults several layers in order.
///
/// The first layer with a non-empty answer wins, so a custom table placed
/// before `PinyinRomanizer` overrides its readings for the characters it
/// lists and falls through for everything else.
pub struct LayeredRomanizer {
    layers: Vec<Arc<dyn Romanizer>>,
}

impl LayeredRomanizer {
    pub fn new(layers: Vec<Arc<dyn Romanizer>>) -> Self {
        Self { layers }
    }
}

impl Romanizer for LayeredRomanizer {
    fn romanize(&self, c: char) -> Result<Vec<String>, RomanizeError> {
        for layer in &self.layers {
            let readings = layer.romanize(c)?;
            if !readings.is_empty() {
                return Ok(readings);
            }
        }
        Ok(Vec::new())
    }
}
