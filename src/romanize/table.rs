use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::{RomanizeError, Romanizer};

#[derive(Deserialize)]
struct ReadingTable {
    readings: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[readings] table is empty")]
    Empty,
    #[error("key is not a single character: {0}")]
    NotSingleChar(String),
    #[error("no readings for key: {0}")]
    NoReadings(String),
    #[error("empty reading for key: {0}")]
    EmptyReading(String),
}

/// Parse TOML text into a sorted `BTreeMap<char, readings>`.
pub fn parse_table_toml(toml_str: &str) -> Result<BTreeMap<char, Vec<String>>, TableError> {
    let table: ReadingTable =
        toml::from_str(toml_str).map_err(|e| TableError::Parse(e.to_string()))?;

    if table.readings.is_empty() {
        return Err(TableError::Empty);
    }

    let mut map = BTreeMap::new();
    for (key, readings) in table.readings {
        let mut chars = key.chars();
        let c = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(TableError::NotSingleChar(key)),
        };
        if readings.is_empty() {
            return Err(TableError::NoReadings(key));
        }
        if readings.iter().any(|r| r.is_empty()) {
            return Err(TableError::EmptyReading(key));
        }
        map.insert(c, readings);
    }

    Ok(map)
}

/// Fixed character → readings table.
///
/// Readings are returned exactly as written, in table order.
#[derive(Debug, Clone, Default)]
pub struct TableRomanizer {
    readings: BTreeMap<char, Vec<String>>,
}

impl TableRomanizer {
    pub fn new(readings: BTreeMap<char, Vec<String>>) -> Self {
        Self { readings }
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, TableError> {
        parse_table_toml(toml_str).map(Self::new)
    }

    pub fn open(path: &Path) -> Result<Self, TableError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(char, Vec<S>)> for TableRomanizer {
    fn from_iter<I: IntoIterator<Item = (char, Vec<S>)>>(iter: I) -> Self {
        let readings = iter
            .into_iter()
            .map(|(c, rs)| (c, rs.into_iter().map(Into::into).collect()))
            .collect();
        Self { readings }
    }
}

impl Romanizer for TableRomanizer {
    fn romanize(&self, c: char) -> Result<Vec<String>, RomanizeError> {
        Ok(self.readings.get(&c).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parse_valid_toml() {
        let toml = r#"
[readings]
"北" = ["bei"]
"行" = ["xing", "hang"]
"#;
        let map = parse_table_toml(toml).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&'北'], vec!["bei"]);
        assert_eq!(map[&'行'], vec!["xing", "hang"]);
    }

    #[test]
    fn lookup_preserves_order() {
        let table = TableRomanizer::from_toml("[readings]\n\"行\" = [\"xing\", \"hang\"]\n").unwrap();
        assert_eq!(table.romanize('行').unwrap(), vec!["xing", "hang"]);
        assert!(table.romanize('北').unwrap().is_empty());
    }

    #[test]
    fn from_iter() {
        let table: TableRomanizer = [('北', vec!["bei"]), ('京', vec!["jing"])]
            .into_iter()
            .collect();
        assert_eq!(table.len(), 2);
        assert_eq!(table.romanize('京').unwrap(), vec!["jing"]);
    }

    #[test]
    fn open_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[readings]\n\"重\" = [\"zhong\", \"chong\"]").unwrap();
        let table = TableRomanizer::open(file.path()).unwrap();
        assert_eq!(table.romanize('重').unwrap(), vec!["zhong", "chong"]);
    }

    #[test]
    fn open_missing_file() {
        let err = TableRomanizer::open(Path::new("/nonexistent/readings.toml")).unwrap_err();
        assert!(matches!(err, TableError::Io(_)));
    }

    #[test]
    fn error_empty_table() {
        let err = parse_table_toml("[readings]\n").unwrap_err();
        assert!(matches!(err, TableError::Empty));
    }

    #[test]
    fn error_multi_char_key() {
        let err = parse_table_toml("[readings]\n\"北京\" = [\"beijing\"]\n").unwrap_err();
        assert!(matches!(err, TableError::NotSingleChar(_)));
    }

    #[test]
    fn error_no_readings() {
        let err = parse_table_toml("[readings]\n\"北\" = []\n").unwrap_err();
        assert!(matches!(err, TableError::NoReadings(_)));
    }

    #[test]
    fn error_empty_reading() {
        let err = parse_table_toml("[readings]\n\"北\" = [\"\"]\n").unwrap_err();
        assert!(matches!(err, TableError::EmptyReading(_)));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_table_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, TableError::Parse(_)));
    }
}
