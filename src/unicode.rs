//! Character-level script classification for Chinese text.

/// CJK Unified Ideographs (U+4E00..U+9FFF).
pub fn is_cjk_unified(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// CJK Unified Ideographs Extension A (U+3400..U+4DBF).
pub fn is_cjk_extension_a(c: char) -> bool {
    ('\u{3400}'..='\u{4DBF}').contains(&c)
}

/// CJK Compatibility Ideographs (U+F900..U+FAFF).
pub fn is_cjk_compatibility(c: char) -> bool {
    ('\u{F900}'..='\u{FAFF}').contains(&c)
}

/// Punctuation blocks that commonly appear inside Chinese tokens: General
/// Punctuation (U+2000..U+206F), CJK Symbols and Punctuation (U+3000..U+303F)
/// and Halfwidth and Fullwidth Forms (U+FF00..U+FFEF).
pub fn is_cjk_punctuation(c: char) -> bool {
    ('\u{2000}'..='\u{206F}').contains(&c)
        || ('\u{3000}'..='\u{303F}').contains(&c)
        || ('\u{FF00}'..='\u{FFEF}').contains(&c)
}

/// Whether `c` counts toward a token's qualifying-character count.
///
/// Punctuation from the CJK-adjacent blocks qualifies too. Such characters
/// have no reading, so they raise the count without contributing to the
/// expansion: "北，" has two qualifying characters but only one reading.
pub fn is_ideographic(c: char) -> bool {
    is_cjk_unified(c) || is_cjk_extension_a(c) || is_cjk_compatibility(c) || is_cjk_punctuation(c)
}

/// Count the qualifying characters in `s`.
pub fn ideographic_count(s: &str) -> usize {
    s.chars().filter(|&c| is_ideographic(c)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_classification() {
        assert!(is_ideographic('北'));
        assert!(is_ideographic('京'));
        assert!(is_ideographic('\u{3400}'));
        assert!(is_ideographic('\u{F900}'));
        assert!(!is_ideographic('a'));
        assert!(!is_ideographic('1'));
        assert!(!is_ideographic('あ'));
        assert!(!is_ideographic('ア'));
    }

    #[test]
    fn test_punctuation_qualifies() {
        assert!(is_ideographic('。'));
        assert!(is_ideographic('，'));
        assert!(is_ideographic('\u{2014}'));
        assert!(!is_ideographic(','));
    }

    #[test]
    fn test_supplementary_planes_excluded() {
        // Extension B lives outside the blocks above.
        assert!(!is_ideographic('\u{20000}'));
    }

    #[test]
    fn test_ideographic_count() {
        assert_eq!(ideographic_count("北京"), 2);
        assert_eq!(ideographic_count("北京abc"), 2);
        assert_eq!(ideographic_count("abc"), 0);
        assert_eq!(ideographic_count(""), 0);
        assert_eq!(ideographic_count("北，"), 2);
    }
}
