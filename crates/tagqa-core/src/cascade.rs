//! Fixed-priority evaluation of the question rules.
//!
//! Rules are tried in order and the first one that yields a non-empty
//! question wins. Evaluation is pure: the cascade holds no mutable state and
//! is shared by reference across worker threads.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::lexicon::Lexicon;
use crate::path::{TagPath, WordPair};
use crate::rules::{Rule, RuleId, RuleInput, default_rules};
use crate::segment::Segmenter;

/// A question and the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generated {
    pub question: String,
    pub rule: RuleId,
}

/// Outcome of a single rule, as reported by [`Cascade::trace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub rule: RuleId,
    pub question: Option<String>,
}

pub struct Cascade {
    lexicon: Lexicon,
    segmenter: Box<dyn Segmenter>,
    rules: Vec<Box<dyn Rule>>,
}

impl Cascade {
    /// Cascade with the default rule order.
    pub fn new(lexicon: Lexicon, segmenter: impl Segmenter + 'static) -> Self {
        Self {
            lexicon,
            segmenter: Box::new(segmenter),
            rules: default_rules(),
        }
    }

    /// Replace the rule list. Rules are evaluated in the given order.
    pub fn with_rules(mut self, rules: Vec<Box<dyn Rule>>) -> Self {
        self.rules = rules;
        self
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Rule ids in evaluation order.
    pub fn rule_ids(&self) -> Vec<RuleId> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Segment the leaf tag with the configured segmenter.
    pub fn segment_leaf(&self, path: &TagPath) -> Vec<WordPair> {
        path.leaf()
            .map(|leaf| self.segmenter.segment(leaf))
            .unwrap_or_default()
    }

    /// Evaluate with a caller-supplied leaf segmentation.
    ///
    /// Returns `None` when no rule fires or the path is empty; the caller
    /// should skip the path or flag it for review.
    pub fn evaluate(&self, segments: &[WordPair], path: &TagPath) -> Option<Generated> {
        if path.is_empty() {
            return None;
        }
        let input = self.input(segments, path);
        for rule in &self.rules {
            match rule.apply(&input).filter(|q| !q.is_empty()) {
                Some(question) => {
                    debug!(rule = %rule.id(), path = %path, question = %question, "rule fired");
                    return Some(Generated {
                        question,
                        rule: rule.id(),
                    });
                }
                None => trace!(rule = %rule.id(), path = %path, "rule skipped"),
            }
        }
        None
    }

    /// Segment the leaf, then evaluate.
    pub fn generate(&self, path: &TagPath) -> Option<Generated> {
        let segments = self.segment_leaf(path);
        self.evaluate(&segments, path)
    }

    /// Run every rule without short-circuiting, in evaluation order.
    ///
    /// The first outcome carrying a question is the one [`evaluate`] returns.
    ///
    /// [`evaluate`]: Cascade::evaluate
    pub fn trace(&self, segments: &[WordPair], path: &TagPath) -> Vec<RuleOutcome> {
        let input = self.input(segments, path);
        self.rules
            .iter()
            .map(|rule| RuleOutcome {
                rule: rule.id(),
                question: if path.is_empty() {
                    None
                } else {
                    rule.apply(&input).filter(|q| !q.is_empty())
                },
            })
            .collect()
    }

    fn input<'a>(&'a self, segments: &'a [WordPair], path: &'a TagPath) -> RuleInput<'a> {
        RuleInput {
            segments,
            path,
            lexicon: &self.lexicon,
            segmenter: self.segmenter.as_ref(),
        }
    }
}

impl std::fmt::Debug for Cascade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cascade")
            .field("lexicon", &self.lexicon)
            .field("rules", &self.rule_ids())
            .finish_non_exhaustive()
    }
}
