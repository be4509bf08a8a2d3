use proptest::prelude::*;
use tagqa_core::{Cascade, DictSegmenter, Lexicon, RuleId, TagPath, WordPair};

fn zh_cascade() -> Cascade {
    Cascade::new(Lexicon::zh(), DictSegmenter::with_words(&[("管理", "v"), ("概述", "n")]))
}

/// Tags the first char as a verb and the rest as a noun.
fn verb_first(text: &str) -> Vec<WordPair> {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) => {
            let mut out = vec![WordPair::new(c.to_string(), "v")];
            let rest: String = chars.collect();
            if !rest.is_empty() {
                out.push(WordPair::new(rest, "n"));
            }
            out
        }
        None => Vec::new(),
    }
}

fn segments() -> impl Strategy<Value = Vec<WordPair>> {
    prop::collection::vec((".{0,6}", "[a-z]{0,3}"), 0..5)
        .prop_map(|v| v.into_iter().map(|(w, p)| WordPair::new(w, p)).collect())
}

proptest! {
    #[test]
    fn evaluation_is_pure(tags in prop::collection::vec(".{0,12}", 0..6), seg in segments()) {
        let cascade = zh_cascade();
        let path = TagPath::new(tags);
        prop_assert_eq!(cascade.evaluate(&seg, &path), cascade.evaluate(&seg, &path));
        prop_assert_eq!(cascade.generate(&path), cascade.generate(&path));
    }

    #[test]
    fn arbitrary_input_never_panics(tags in prop::collection::vec(".{0,12}", 0..4), seg in segments()) {
        let cascade = zh_cascade();
        let path = TagPath::new(tags);
        let _ = cascade.evaluate(&seg, &path);
        let _ = cascade.trace(&seg, &path);
    }

    #[test]
    fn single_tag_is_what_is(leaf in "[a-z]{1,10}") {
        let seg = vec![WordPair::new(leaf.clone(), "n")];
        let out = zh_cascade().evaluate(&seg, &TagPath::new(vec![leaf])).unwrap();
        prop_assert_eq!(out.rule, RuleId::WhatIs);
        prop_assert!(out.question.starts_with("什么是"));
        prop_assert!(out.question.ends_with('?'));
    }

    #[test]
    fn intro_leaf_is_what(
        root in "[a-z]{1,6}",
        pre in "[a-z]{0,4}",
        post in "[a-z]{0,4}",
        seg in segments().prop_filter("not a single pair", |s| s.len() != 1)
    ) {
        let leaf = format!("{pre}简介{post}");
        let path = TagPath::new(vec![root, leaf.clone()]);
        let out = zh_cascade().evaluate(&seg, &path).unwrap();
        prop_assert_eq!(out.question, format!("{leaf}是什么?"));
    }

    #[test]
    fn question_mark_passes_leaf_through(
        root in "[a-z]{1,6}",
        leaf in "[a-z]{1,8}",
        mark in prop::sample::select(vec!["?", "？"])
    ) {
        let seg = vec![WordPair::new(mark, "x"), WordPair::new("tail", "n")];
        let path = TagPath::new(vec![root, leaf.clone()]);
        let out = zh_cascade().evaluate(&seg, &path).unwrap();
        prop_assert_eq!(out.rule, RuleId::Passthrough);
        prop_assert_eq!(out.question, leaf);
    }

    #[test]
    fn single_tag_question_mark_passes_through(
        leaf in "[a-z]{1,8}",
        mark in prop::sample::select(vec!["?", "？"])
    ) {
        let seg = vec![WordPair::new(mark, "x"), WordPair::new(leaf.clone(), "n")];
        let full = format!("{mark}{leaf}");
        let out = zh_cascade().evaluate(&seg, &TagPath::new(vec![full.clone()])).unwrap();
        prop_assert_eq!(out.rule, RuleId::Passthrough);
        prop_assert_eq!(out.question, full);
    }

    #[test]
    fn overview_on_one_tag_never_uses_overview(leaf in "[a-z]{0,8}") {
        let seg = vec![WordPair::new("概述", "n"), WordPair::new(leaf.clone(), "n")];
        let path = TagPath::new(vec![format!("概述{leaf}")]);
        let out = zh_cascade().evaluate(&seg, &path);
        prop_assert!(out.map_or(true, |g| g.rule != RuleId::Overview));
    }

    #[test]
    fn verb_question_contains_verb_and_root(root in "[a-z]{1,6}", leaf in "[a-z]{2,8}") {
        let cascade = Cascade::new(Lexicon::zh(), verb_first);
        let path = TagPath::new(vec![root.clone(), leaf.clone()]);
        let seg = verb_first(&leaf);
        let out = cascade.evaluate(&seg, &path).unwrap();
        prop_assert_eq!(out.rule, RuleId::VerbPrefix);
        prop_assert!(out.question.contains(&leaf[..1]));
        prop_assert!(out.question.contains(root.as_str()));
    }
}
