use std::convert::Infallible;
use std::sync::Arc;

use proptest::prelude::*;

use super::*;
use crate::expand::Expander;
use crate::romanize::{PinyinFormat, PinyinRomanizer, TableRomanizer, ToneType};
use crate::token::{DEFAULT_TOKEN_TYPE, PINYIN_TOKEN_TYPE};
use crate::unicode::ideographic_count;

fn table() -> Arc<dyn Romanizer> {
    Arc::new(
        [
            ('北', vec!["bei"]),
            ('京', vec!["jing"]),
            ('重', vec!["zhong", "chong"]),
            ('庆', vec!["qing"]),
            ('上', vec!["shang"]),
            ('海', vec!["hai"]),
        ]
        .into_iter()
        .collect::<TableRomanizer>(),
    )
}

fn stream(tokens: Vec<Token>) -> impl Iterator<Item = Result<Token, Infallible>> {
    tokens.into_iter().map(Ok)
}

fn run(tokens: Vec<Token>, config: FilterConfig) -> Vec<(String, u32)> {
    PinyinTransformFilter::new(stream(tokens), table(), config)
        .map(|t| {
            let t = t.unwrap();
            (t.text, t.position_increment)
        })
        .collect()
}

fn pairs(items: &[(&str, u32)]) -> Vec<(String, u32)> {
    items.iter().map(|&(s, i)| (s.to_string(), i)).collect()
}

#[test]
fn beijing_full_with_original() {
    let out = run(vec![Token::new("北京", 0, 6)], FilterConfig::default());
    assert_eq!(out, pairs(&[("北京", 1), ("beijing", 0)]));
}

#[test]
fn beijing_abbreviation_with_original() {
    let config = FilterConfig::default().with_output(OutputKind::Abbreviation);
    let out = run(vec![Token::new("北京", 0, 6)], config);
    assert_eq!(out, pairs(&[("北京", 1), ("bj", 0)]));
}

#[test]
fn beijing_both() {
    let config = FilterConfig::default().with_output(OutputKind::Both);
    let out = run(vec![Token::new("北京", 0, 6)], config);
    assert_eq!(out, pairs(&[("北京", 1), ("beijing", 0), ("bj", 0)]));
}

#[test]
fn non_chinese_passes_through() {
    let out = run(vec![Token::new("a", 0, 1)], FilterConfig::default());
    assert_eq!(out, pairs(&[("a", 1)]));
}

#[test]
fn non_chinese_dropped_without_original() {
    let config = FilterConfig::default().with_emit_original(false);
    let out = run(vec![Token::new("a", 0, 1)], config);
    assert!(out.is_empty());
}

#[test]
fn below_min_term_length() {
    // One Chinese character is below the default minimum of 2.
    let out = run(vec![Token::new("北", 0, 3)], FilterConfig::default());
    assert_eq!(out, pairs(&[("北", 1)]));

    let config = FilterConfig::default().with_min_term_length(1);
    let out = run(vec![Token::new("北", 0, 3)], config);
    assert_eq!(out, pairs(&[("北", 1), ("bei", 0)]));
}

#[test]
fn min_term_length_zero_is_one() {
    let config = FilterConfig::default().with_min_term_length(0);
    let out = run(vec![Token::new("a", 0, 1), Token::new("北", 2, 5)], config);
    assert_eq!(out, pairs(&[("a", 1), ("北", 1), ("bei", 0)]));
}

#[test]
fn punctuation_counts_toward_length() {
    let out = run(vec![Token::new("北，", 0, 6)], FilterConfig::default());
    assert_eq!(out, pairs(&[("北，", 1), ("bei", 0)]));
}

#[test]
fn without_original_first_derived_keeps_increment() {
    let config = FilterConfig::default().with_emit_original(false);
    let tokens = vec![
        Token::new("的", 0, 3).with_position_increment(1),
        Token::new("重庆", 4, 10).with_position_increment(3),
    ];
    let out = run(tokens, config);
    assert_eq!(out, pairs(&[("chongqing", 3), ("zhongqing", 0)]));
}

#[test]
fn with_original_all_derived_stack() {
    let tokens = vec![Token::new("重庆", 0, 6).with_position_increment(2)];
    let out = run(tokens, FilterConfig::default());
    assert_eq!(
        out,
        pairs(&[("重庆", 2), ("chongqing", 0), ("zhongqing", 0)])
    );
}

#[test]
fn stream_of_tokens() {
    let tokens = vec![
        Token::new("北京", 0, 6),
        Token::new("and", 7, 10),
        Token::new("上海", 11, 17),
    ];
    let out = run(tokens, FilterConfig::default());
    assert_eq!(
        out,
        pairs(&[
            ("北京", 1),
            ("beijing", 0),
            ("and", 1),
            ("上海", 1),
            ("shanghai", 0),
        ])
    );
}

#[test]
fn derived_token_metadata() {
    let tokens = vec![Token::new("北京", 7, 13).with_type("cjk")];
    let out: Vec<Token> = PinyinTransformFilter::new(stream(tokens), table(), FilterConfig::default())
        .map(Result::unwrap)
        .collect();
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].token_type, "cjk");
    assert_eq!(out[1].token_type, PINYIN_TOKEN_TYPE);
    assert_eq!((out[1].start_offset, out[1].end_offset), (7, 13));
}

#[test]
fn lookup_failure_keeps_original_only() {
    let broken: Arc<dyn Romanizer> = Arc::new(PinyinRomanizer::new(PinyinFormat {
        tone: ToneType::Mark,
        ..Default::default()
    }));
    let tokens = vec![Token::new("北京", 0, 6), Token::new("上海", 7, 13)];
    let out: Vec<String> = PinyinTransformFilter::new(stream(tokens), broken, FilterConfig::default())
        .map(|t| t.unwrap().text)
        .collect();
    assert_eq!(out, vec!["北京", "上海"]);
}

#[test]
fn upstream_error_passes_through() {
    let input = vec![
        Ok(Token::new("北京", 0, 6)),
        Err("read failed"),
        Ok(Token::new("上海", 7, 13)),
    ];
    let out: Vec<Result<String, &str>> =
        PinyinTransformFilter::new(input.into_iter(), table(), FilterConfig::default())
            .map(|r| r.map(|t| t.text))
            .collect();
    assert_eq!(
        out,
        vec![
            Ok("北京".to_string()),
            Ok("beijing".to_string()),
            Err("read failed"),
            Ok("上海".to_string()),
            Ok("shanghai".to_string()),
        ]
    );
}

#[test]
fn empty_upstream() {
    let mut filter = PinyinTransformFilter::new(stream(Vec::new()), table(), FilterConfig::default());
    assert!(filter.next().is_none());
    assert!(filter.next().is_none());
}

/// Counts upstream pulls to check laziness and the single-exhaustion rule.
struct Counting<I> {
    inner: I,
    pulls: Arc<std::sync::atomic::AtomicUsize>,
}

impl<I: Iterator> Iterator for Counting<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        self.pulls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.inner.next()
    }
}

#[test]
fn pulls_upstream_lazily() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let pulls = Arc::new(AtomicUsize::new(0));
    let input = Counting {
        inner: stream(vec![Token::new("北京", 0, 6), Token::new("上海", 7, 13)]),
        pulls: Arc::clone(&pulls),
    };
    let mut filter = PinyinTransformFilter::new(input, table(), FilterConfig::default());

    assert_eq!(filter.next().unwrap().unwrap().text, "北京");
    assert_eq!(pulls.load(Ordering::SeqCst), 1);
    assert_eq!(filter.next().unwrap().unwrap().text, "beijing");
    assert_eq!(pulls.load(Ordering::SeqCst), 1);
    assert_eq!(filter.next().unwrap().unwrap().text, "上海");
    assert_eq!(pulls.load(Ordering::SeqCst), 2);
    assert_eq!(filter.next().unwrap().unwrap().text, "shanghai");
    assert!(filter.next().is_none());
    assert_eq!(pulls.load(Ordering::SeqCst), 3);
    // Fused: upstream is not pulled again.
    assert!(filter.next().is_none());
    assert_eq!(pulls.load(Ordering::SeqCst), 3);
}

#[test]
fn extension_trait() {
    let out: Vec<String> = stream(vec![Token::new("北京", 0, 6)])
        .pinyin_transform(table(), FilterConfig::default().with_emit_original(false))
        .map(|t| t.unwrap().text)
        .collect();
    assert_eq!(out, vec!["beijing"]);
}

#[test]
fn config_is_normalized() {
    let config = FilterConfig::default()
        .with_min_term_length(0)
        .with_max_polyphone_branches(0);
    let filter = PinyinTransformFilter::new(stream(Vec::new()), table(), config);
    assert_eq!(filter.config().min_term_length, 1);
    assert_eq!(filter.config().max_polyphone_branches, usize::MAX);
}

#[test]
fn real_lookup_end_to_end() {
    let romanizer: Arc<dyn Romanizer> = Arc::new(PinyinRomanizer::default());
    let out: Vec<Token> = PinyinTransformFilter::new(
        stream(vec![Token::new("北京", 0, 6)]),
        romanizer,
        FilterConfig::default().with_output(OutputKind::Both),
    )
    .map(Result::unwrap)
    .collect();
    assert_eq!(out[0].text, "北京");
    assert_eq!(out[0].token_type, DEFAULT_TOKEN_TYPE);
    let derived: Vec<&str> = out[1..].iter().map(|t| t.text.as_str()).collect();
    assert!(derived.contains(&"beijing"));
    assert!(derived.contains(&"bj"));
}

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!['北', '京', '重', '庆', '上', '海', 'a', '1', '，']),
        0..5,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn arb_tokens() -> impl Strategy<Value = Vec<Token>> {
    prop::collection::vec((arb_text(), 0u32..4), 0..8).prop_map(|items| {
        items
            .into_iter()
            .map(|(text, inc)| Token::new(text, 0, 0).with_position_increment(inc))
            .collect()
    })
}

proptest! {
    #[test]
    fn position_increment_law(tokens in arb_tokens(), emit_original in any::<bool>()) {
        let config = FilterConfig::default()
            .with_output(OutputKind::Both)
            .with_emit_original(emit_original);
        let out: Vec<Token> = PinyinTransformFilter::new(stream(tokens.clone()), table(), config)
            .map(Result::unwrap)
            .collect();

        // Walk the output, matching each group back to its input token.
        let lookup = table();
        let expander = Expander::new(lookup.as_ref(), DEFAULT_MAX_POLYPHONE_BRANCHES);
        let mut i = 0;
        for input in &tokens {
            if emit_original {
                prop_assert_eq!(&out[i], input);
                i += 1;
            }
            let derived = if ideographic_count(&input.text) >= DEFAULT_MIN_TERM_LENGTH {
                expander.candidates(&input.text, OutputKind::Both).into_derived().len()
            } else {
                0
            };
            for n in 0..derived {
                prop_assert_eq!(&out[i].token_type, PINYIN_TOKEN_TYPE);
                let expected = if !emit_original && n == 0 { input.position_increment } else { 0 };
                prop_assert_eq!(out[i].position_increment, expected);
                i += 1;
            }
        }
        prop_assert_eq!(i, out.len());
    }

    #[test]
    fn short_tokens_are_verbatim(tokens in arb_tokens()) {
        let config = FilterConfig::default().with_min_term_length(5);
        let out: Vec<Token> = PinyinTransformFilter::new(stream(tokens.clone()), table(), config)
            .map(Result::unwrap)
            .collect();
        prop_assert_eq!(out, tokens);
    }
}
