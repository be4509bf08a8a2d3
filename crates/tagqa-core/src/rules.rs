//! The question rules, one type per rule.
//!
//! Each rule is a pure function of the leaf segmentation, the tag path and
//! the lexicon. A rule either produces a question or declines with `None`;
//! it never panics on short paths or empty segmentations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lexicon::{Lexicon, TokenProbe};
use crate::path::{TagPath, WordPair};
use crate::segment::Segmenter;

/// Identifies the rule that produced a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    /// Single-word leaf or intro leaf.
    WhatIs,
    /// Leaf already phrased as a question.
    Passthrough,
    Overview,
    Manage,
    VerbPrefix,
    Relation,
}

impl RuleId {
    pub const ALL: [RuleId; 6] = [
        Self::WhatIs,
        Self::Passthrough,
        Self::Overview,
        Self::Manage,
        Self::VerbPrefix,
        Self::Relation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WhatIs => "what-is",
            Self::Passthrough => "passthrough",
            Self::Overview => "overview",
            Self::Manage => "manage",
            Self::VerbPrefix => "verb-prefix",
            Self::Relation => "relation",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a rule may look at.
pub struct RuleInput<'a> {
    /// Segmentation of the leaf tag, supplied by the caller.
    pub segments: &'a [WordPair],
    pub path: &'a TagPath,
    pub lexicon: &'a Lexicon,
    /// Only the verb-prefix rule calls back into the segmenter.
    pub segmenter: &'a dyn Segmenter,
}

impl RuleInput<'_> {
    /// The token the single-word triggers compare against.
    fn probed(&self) -> Option<&WordPair> {
        match self.lexicon.probe {
            TokenProbe::First => self.segments.first(),
            TokenProbe::Last => self.segments.last(),
        }
    }

    fn probed_is(&self, word: &str) -> bool {
        self.probed().is_some_and(|t| t.word == word)
    }
}

pub trait Rule: Send + Sync {
    fn id(&self) -> RuleId;

    fn apply(&self, input: &RuleInput<'_>) -> Option<String>;
}

/// Rules in evaluation order.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(WhatIs),
        Box::new(Passthrough),
        Box::new(Overview),
        Box::new(Manage),
        Box::new(VerbPrefix),
        Box::new(Relation),
    ]
}

/// "什么是X?" for single-word leaves, "X是什么?" for intro pages.
pub struct WhatIs;

impl Rule for WhatIs {
    fn id(&self) -> RuleId {
        RuleId::WhatIs
    }

    fn apply(&self, input: &RuleInput<'_>) -> Option<String> {
        let leaf = input.path.leaf()?;
        let t = &input.lexicon.templates;

        if let [only] = input.segments {
            return Some(t.what_is.render(&[("subject", only.word.as_str())]));
        }
        if leaf.contains(input.lexicon.intro_marker.as_str()) {
            return Some(t.is_what.render(&[("subject", leaf)]));
        }
        None
    }
}

/// Leaf returned verbatim when the probed token is a question mark.
///
/// Only the probed token is inspected (the first one by default), so a
/// multi-token leaf ending in `？` does not match unless the lexicon probes
/// the last token.
pub struct Passthrough;

impl Rule for Passthrough {
    fn id(&self) -> RuleId {
        RuleId::Passthrough
    }

    fn apply(&self, input: &RuleInput<'_>) -> Option<String> {
        let leaf = input.path.leaf()?;
        let token = input.probed()?;
        input
            .lexicon
            .is_question_mark(&token.word)
            .then(|| leaf.to_string())
    }
}

/// Root tag joined with the parent tag for overview pages.
pub struct Overview;

impl Rule for Overview {
    fn id(&self) -> RuleId {
        RuleId::Overview
    }

    fn apply(&self, input: &RuleInput<'_>) -> Option<String> {
        if !input.probed_is(&input.lexicon.overview_word) {
            return None;
        }
        let root = input.path.root()?;
        let parent = input.path.parent()?;
        Some(
            input
                .lexicon
                .templates
                .overview
                .render(&[("root", root), ("parent", parent)]),
        )
    }
}

/// "怎么管理<root>" for management pages.
pub struct Manage;

impl Rule for Manage {
    fn id(&self) -> RuleId {
        RuleId::Manage
    }

    fn apply(&self, input: &RuleInput<'_>) -> Option<String> {
        if !input.probed_is(&input.lexicon.management_word) {
            return None;
        }
        let root = input.path.root()?;
        Some(input.lexicon.templates.manage.render(&[("root", root)]))
    }
}

/// "怎样<verb><root>的<rest>" for leaves that start with a verb.
///
/// The leaf is segmented again here rather than reusing the caller's
/// segmentation. `rest` is the leaf minus as many chars as the verb has;
/// this is a char-count offset, so a verb whose surface differs from the
/// leaf prefix, or a grapheme spanning several chars, shifts the cut.
pub struct VerbPrefix;

impl Rule for VerbPrefix {
    fn id(&self) -> RuleId {
        RuleId::VerbPrefix
    }

    fn apply(&self, input: &RuleInput<'_>) -> Option<String> {
        let leaf = input.path.leaf()?;
        let first = input.segmenter.segment(leaf).into_iter().next()?;
        if first.pos != input.lexicon.verb_tag || first.word.is_empty() {
            return None;
        }
        let root = input.path.root()?;
        let rest: String = leaf.chars().skip(first.word.chars().count()).collect();
        Some(input.lexicon.templates.verb_action.render(&[
            ("verb", first.word.as_str()),
            ("root", root),
            ("rest", rest.as_str()),
        ]))
    }
}

/// Root tag joined with the leaf for "与…" relation pages.
pub struct Relation;

impl Rule for Relation {
    fn id(&self) -> RuleId {
        RuleId::Relation
    }

    fn apply(&self, input: &RuleInput<'_>) -> Option<String> {
        let leaf = input.path.leaf()?;
        if !leaf.starts_with(input.lexicon.relation_prefix.as_str()) {
            return None;
        }
        let root = input.path.root()?;
        Some(
            input
                .lexicon
                .templates
                .relation
                .render(&[("root", root), ("leaf", leaf)]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::pairs;
    use crate::segment::DictSegmenter;

    fn run(
        rule: &dyn Rule,
        segments: &[WordPair],
        path: &TagPath,
        lexicon: &Lexicon,
    ) -> Option<String> {
        let segmenter = DictSegmenter::with_words(&[("共享", "v"), ("创建", "v"), ("镜像", "n")]);
        let input = RuleInput {
            segments,
            path,
            lexicon,
            segmenter: &segmenter,
        };
        rule.apply(&input)
    }

    fn zh(rule: &dyn Rule, segments: &[(&str, &str)], tags: &[&str]) -> Option<String> {
        run(rule, &pairs(segments), &TagPath::from(tags), &Lexicon::zh())
    }

    #[test]
    fn default_order_matches_rule_ids() {
        let ids: Vec<RuleId> = default_rules().iter().map(|r| r.id()).collect();
        assert_eq!(ids, RuleId::ALL);
    }

    #[test]
    fn rule_id_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&RuleId::VerbPrefix).unwrap(), r#""verb-prefix""#);
        for id in RuleId::ALL {
            assert_eq!(serde_json::to_string(&id).unwrap(), format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn what_is_single_word() {
        let q = zh(&WhatIs, &[("机器学习服务", "n")], &["帮助中心", "机器学习服务"]);
        assert_eq!(q.as_deref(), Some("什么是机器学习服务?"));
    }

    #[test]
    fn what_is_intro_marker() {
        let q = zh(&WhatIs, &[("产品", "n"), ("简介", "n")], &["帮助中心", "镜像服务", "产品简介"]);
        assert_eq!(q.as_deref(), Some("产品简介是什么?"));
    }

    #[test]
    fn what_is_single_word_beats_intro_marker() {
        let q = zh(&WhatIs, &[("简介", "n")], &["帮助中心", "简介"]);
        assert_eq!(q.as_deref(), Some("什么是简介?"));
    }

    #[test]
    fn what_is_single_tag_path() {
        let q = zh(&WhatIs, &[("云容器", "n")], &["云容器"]);
        assert_eq!(q.as_deref(), Some("什么是云容器?"));
    }

    #[test]
    fn what_is_ignores_path_length() {
        assert_eq!(zh(&WhatIs, &[("云", "n"), ("容器", "n")], &["云容器"]), None);
    }

    #[test]
    fn what_is_declines_otherwise() {
        assert_eq!(zh(&WhatIs, &[("存储", "vn"), ("管理", "v")], &["A", "存储管理"]), None);
        assert_eq!(zh(&WhatIs, &[("x", "n")], &[]), None);
    }

    #[test]
    fn passthrough_checks_first_token() {
        let tags = ["帮助中心", "?如何计费"];
        assert_eq!(
            zh(&Passthrough, &[("?", "x"), ("如何", "r"), ("计费", "v")], &tags).as_deref(),
            Some("?如何计费")
        );
        let tags = ["帮助中心", "如何计费？"];
        assert_eq!(
            zh(&Passthrough, &[("如何", "r"), ("计费", "v"), ("？", "x")], &tags),
            None
        );
    }

    #[test]
    fn passthrough_with_last_probe() {
        let lex = Lexicon {
            probe: TokenProbe::Last,
            ..Lexicon::zh()
        };
        let path = TagPath::from(["帮助中心", "如何计费？"]);
        let seg = pairs(&[("如何", "r"), ("计费", "v"), ("？", "x")]);
        assert_eq!(run(&Passthrough, &seg, &path, &lex).as_deref(), Some("如何计费？"));
    }

    #[test]
    fn overview_joins_root_and_parent() {
        let q = zh(
            &Overview,
            &[("概述", "n"), ("说明", "n")],
            &["帮助中心", "机器学习服务", "产品介绍", "概述说明"],
        );
        assert_eq!(q.as_deref(), Some("帮助中心产品介绍"));
    }

    #[test]
    fn overview_needs_two_tags() {
        assert_eq!(zh(&Overview, &[("概述", "n"), ("页", "n")], &["概述页"]), None);
    }

    #[test]
    fn overview_ignores_other_words() {
        assert_eq!(zh(&Overview, &[("产品", "n"), ("概述", "n")], &["A", "B", "产品概述"]), None);
    }

    #[test]
    fn manage_uses_root() {
        let q = zh(&Manage, &[("管理", "v"), ("存储", "vn")], &["帮助中心", "云容器引擎", "管理存储"]);
        assert_eq!(q.as_deref(), Some("怎么管理帮助中心"));
    }

    #[test]
    fn verb_prefix_resegments_leaf() {
        // Caller's segmentation is ignored by this rule.
        let q = zh(
            &VerbPrefix,
            &[("共享镜像", "n")],
            &["帮助中心", "镜像服务", "用户指南", "管理", "共享镜像"],
        );
        assert_eq!(q.as_deref(), Some("怎样共享帮助中心的镜像"));
    }

    #[test]
    fn verb_prefix_declines_non_verbs() {
        assert_eq!(zh(&VerbPrefix, &[], &["帮助中心", "镜像共享"]), None);
        assert_eq!(zh(&VerbPrefix, &[], &["帮助中心", ""]), None);
    }

    #[test]
    fn verb_prefix_offset_is_char_count() {
        let segmenter = |_: &str| pairs(&[("创建", "v")]);
        let path = TagPath::from(["Root", "建立实例"]);
        let lex = Lexicon::zh();
        let input = RuleInput {
            segments: &[],
            path: &path,
            lexicon: &lex,
            segmenter: &segmenter,
        };
        // Surface differs from the leaf prefix; the cut still falls after two chars.
        assert_eq!(VerbPrefix.apply(&input).as_deref(), Some("怎样创建Root的实例"));
    }

    #[test]
    fn relation_prefix() {
        let q = zh(&Relation, &[], &["帮助中心", "镜像服务", "与容器的关系"]);
        assert_eq!(q.as_deref(), Some("帮助中心与容器的关系"));
        assert_eq!(zh(&Relation, &[], &["帮助中心", "容器与镜像"]), None);
    }

    #[test]
    fn english_templates() {
        let lex = Lexicon::en();
        let path = TagPath::from(["Help Center", "Container Service", "Storage Management"]);
        let seg = pairs(&[("Management", "n"), ("Storage", "n")]);
        assert_eq!(
            run(&Manage, &seg, &path, &lex).as_deref(),
            Some("How to manage Help Center?")
        );
    }
}
