//! Tag paths and the segmentation of their leaf label.
//!
//! A tag path is the breadcrumb a help-center page is filed under, root
//! first: `帮助中心 > 机器学习服务 > 产品介绍 > 产品概述`. Only the leaf
//! label is segmented; the rest of the path is used verbatim.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default breadcrumb separator used by [`TagPath::parse`].
pub const DEFAULT_SEPARATOR: &str = ">";

/// Ordered hierarchy of topic labels, root first and leaf last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagPath(Vec<String>);

impl TagPath {
    pub fn new(tags: Vec<String>) -> Self {
        Self(tags)
    }

    /// Split a breadcrumb line on `separator`.
    ///
    /// Labels are trimmed and empty labels are dropped, so `" A >> B > "`
    /// parses to `["A", "B"]`.
    pub fn parse(line: &str, separator: &str) -> Self {
        let tags = line
            .split(separator)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        Self(tags)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn tags(&self) -> &[String] {
        &self.0
    }

    /// First tag of the path.
    pub fn root(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Last tag of the path.
    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Second-to-last tag. `None` for paths shorter than two tags.
    pub fn parent(&self) -> Option<&str> {
        self.0.len().checked_sub(2).map(|i| self.0[i].as_str())
    }
}

impl From<Vec<String>> for TagPath {
    fn from(tags: Vec<String>) -> Self {
        Self(tags)
    }
}

impl From<&[&str]> for TagPath {
    fn from(tags: &[&str]) -> Self {
        Self(tags.iter().map(|t| t.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for TagPath {
    fn from(tags: [&str; N]) -> Self {
        Self(tags.iter().map(|t| t.to_string()).collect())
    }
}

impl fmt::Display for TagPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" > "))
    }
}

/// One token of a segmented label: surface form plus part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordPair {
    pub word: String,
    pub pos: String,
}

impl WordPair {
    pub fn new(word: impl Into<String>, pos: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            pos: pos.into(),
        }
    }
}

impl fmt::Display for WordPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.word, self.pos)
    }
}

/// Build a segmentation from `(word, pos)` tuples.
#[cfg(test)]
pub(crate) fn pairs(items: &[(&str, &str)]) -> Vec<WordPair> {
    items.iter().map(|(w, p)| WordPair::new(*w, *p)).collect()
}
