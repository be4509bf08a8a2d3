//! Language-specific markers and question templates.
//!
//! Every word the rules match on and every sentence they produce lives
//! here, so the cascade itself carries no literals. The built-in Chinese
//! lexicon is the default; an English rendering is available for
//! demonstration and for corpora tagged in English.
//!
//! Templates use `{name}` placeholders. Each template accepts a fixed set
//! of names, most of them mandatory, and [`Lexicon::validate`] rejects
//! unknown or missing ones.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LexiconError;

/// Which segmented token the single-word triggers inspect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenProbe {
    /// First token of the leaf segmentation.
    #[default]
    First,
    /// Last token of the leaf segmentation.
    Last,
}

/// A question template with `{name}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template(String);

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitute placeholders. Names not present in `vars` are left as-is.
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.0.len() + 32);
        let mut rest = self.0.as_str();
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) => {
                    let name = &after[..close];
                    match vars.iter().find(|(k, _)| *k == name) {
                        Some((_, value)) => out.push_str(value),
                        None => {
                            out.push('{');
                            out.push_str(name);
                            out.push('}');
                        }
                    }
                    rest = &after[close + 1..];
                }
                None => {
                    out.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Placeholder names in order of appearance.
    fn placeholders(&self, template: &'static str) -> Result<Vec<&str>, LexiconError> {
        let mut names = Vec::new();
        let mut rest = self.0.as_str();
        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or(LexiconError::UnclosedPlaceholder { template })?;
            names.push(&after[..close]);
            rest = &after[close + 1..];
        }
        Ok(names)
    }

    /// Every placeholder must be in `allowed`, and every name in `required`
    /// must appear at least once.
    fn check(
        &self,
        template: &'static str,
        allowed: &[&str],
        required: &[&'static str],
    ) -> Result<(), LexiconError> {
        let names = self.placeholders(template)?;
        if let Some(name) = names.iter().find(|n| !allowed.contains(*n)) {
            return Err(LexiconError::UnknownPlaceholder {
                template,
                name: name.to_string(),
            });
        }
        if let Some(name) = required.iter().find(|r| !names.contains(*r)) {
            return Err(LexiconError::MissingPlaceholder {
                template,
                name: *name,
            });
        }
        Ok(())
    }
}

/// Output templates, one per rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Templates {
    /// `{subject}`: single-word leaf.
    pub what_is: Template,
    /// `{subject}`: leaf tag carrying the intro marker.
    pub is_what: Template,
    /// `{root}`, `{parent}`: overview leaves.
    pub overview: Template,
    /// `{root}`: management leaves.
    pub manage: Template,
    /// `{verb}`, `{root}`, `{rest}`: verb-initial leaves.
    pub verb_action: Template,
    /// `{root}`, `{leaf}`: relation leaves.
    pub relation: Template,
}

impl Templates {
    pub fn zh() -> Self {
        Self {
            what_is: Template::new("什么是{subject}?"),
            is_what: Template::new("{subject}是什么?"),
            overview: Template::new("{root}{parent}"),
            manage: Template::new("怎么管理{root}"),
            verb_action: Template::new("怎样{verb}{root}的{rest}"),
            relation: Template::new("{root}{leaf}"),
        }
    }

    pub fn en() -> Self {
        Self {
            what_is: Template::new("What is {subject}?"),
            is_what: Template::new("What is {subject}?"),
            overview: Template::new("{root} {parent}"),
            manage: Template::new("How to manage {root}?"),
            verb_action: Template::new("How is {verb} done at {root}'s {rest}?"),
            relation: Template::new("{root} {leaf}"),
        }
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::zh()
    }
}

/// Markers, tagger conventions and templates used by the rule cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Substring marking an introduction page (`简介`).
    pub intro_marker: String,
    /// Surface forms treated as a question mark.
    pub question_marks: Vec<String>,
    /// Token that marks an overview page (`概述`).
    pub overview_word: String,
    /// Token that marks a management page (`管理`).
    pub management_word: String,
    /// Prefix of relation leaves (`与`).
    pub relation_prefix: String,
    /// Part-of-speech tag the tagger uses for verbs.
    pub verb_tag: String,
    pub probe: TokenProbe,
    pub templates: Templates,
}

impl Lexicon {
    /// Built-in Chinese lexicon.
    pub fn zh() -> Self {
        Self {
            intro_marker: "简介".into(),
            question_marks: vec!["?".into(), "？".into()],
            overview_word: "概述".into(),
            management_word: "管理".into(),
            relation_prefix: "与".into(),
            verb_tag: "v".into(),
            probe: TokenProbe::First,
            templates: Templates::zh(),
        }
    }

    /// English rendering of the built-in lexicon.
    pub fn en() -> Self {
        Self {
            intro_marker: "Intro".into(),
            question_marks: vec!["?".into(), "？".into()],
            overview_word: "Overview".into(),
            management_word: "Management".into(),
            relation_prefix: "With".into(),
            verb_tag: "v".into(),
            probe: TokenProbe::First,
            templates: Templates::en(),
        }
    }

    /// Parse and validate a lexicon. Missing fields take the Chinese defaults.
    pub fn from_json_str(json: &str) -> Result<Self, LexiconError> {
        let lexicon: Self = serde_json::from_str(json)?;
        lexicon.validate()?;
        Ok(lexicon)
    }

    /// Read, parse and validate a lexicon file.
    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let json = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let lexicon = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), "loaded lexicon");
        Ok(lexicon)
    }

    pub fn validate(&self) -> Result<(), LexiconError> {
        let markers = [
            ("intro_marker", &self.intro_marker),
            ("overview_word", &self.overview_word),
            ("management_word", &self.management_word),
            ("relation_prefix", &self.relation_prefix),
            ("verb_tag", &self.verb_tag),
        ];
        for (field, value) in markers {
            if value.is_empty() {
                return Err(LexiconError::EmptyMarker(field));
            }
        }
        if self.question_marks.iter().all(String::is_empty) {
            return Err(LexiconError::EmptyMarker("question_marks"));
        }

        let t = &self.templates;
        t.what_is.check("what_is", &["subject"], &["subject"])?;
        t.is_what.check("is_what", &["subject"], &["subject"])?;
        t.overview.check("overview", &["root", "parent"], &["root", "parent"])?;
        t.manage.check("manage", &["root"], &["root"])?;
        t.verb_action
            .check("verb_action", &["verb", "root", "rest"], &["verb", "root"])?;
        t.relation.check("relation", &["root", "leaf"], &["root", "leaf"])?;
        Ok(())
    }

    pub fn is_question_mark(&self, surface: &str) -> bool {
        self.question_marks.iter().any(|m| m == surface)
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::zh()
    }
}
