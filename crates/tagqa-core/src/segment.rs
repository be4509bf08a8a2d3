//! Part-of-speech segmentation collaborators.
//!
//! The cascade never tokenizes on its own; it asks a [`Segmenter`] for
//! `(word, pos)` pairs. [`DictSegmenter`] covers small, curated
//! vocabularies (help-center product names, test fixtures). The
//! `jieba` feature adds [`JiebaSegmenter`] for real Chinese text.

use std::collections::HashMap;
use std::io::BufRead;

use crate::error::SegmentError;
use crate::path::WordPair;

/// Tag for runs of ASCII letters and digits not found in the dictionary.
pub const ENGLISH_TAG: &str = "eng";
/// Tag for whitespace and unknown characters.
pub const UNKNOWN_TAG: &str = "x";

/// Splits text into `(word, pos)` pairs whose surfaces concatenate back to
/// the input.
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<WordPair>;
}

impl<F> Segmenter for F
where
    F: Fn(&str) -> Vec<WordPair> + Send + Sync,
{
    fn segment(&self, text: &str) -> Vec<WordPair> {
        self(text)
    }
}

/// Forward maximum-matching segmenter over a user dictionary.
#[derive(Debug, Clone, Default)]
pub struct DictSegmenter {
    words: HashMap<String, String>,
    /// Longest dictionary entry, in chars.
    max_len: usize,
}

impl DictSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a dictionary entry.
    pub fn insert(&mut self, word: impl Into<String>, pos: impl Into<String>) {
        let word = word.into();
        if word.is_empty() {
            return;
        }
        self.max_len = self.max_len.max(word.chars().count());
        self.words.insert(word, pos.into());
    }

    pub fn with_words(entries: &[(&str, &str)]) -> Self {
        let mut seg = Self::new();
        for (word, pos) in entries {
            seg.insert(*word, *pos);
        }
        seg
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Load a jieba-style dictionary: `word [freq] pos` per line.
    ///
    /// Blank lines and lines starting with `#` are skipped. The frequency
    /// column is accepted and ignored.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, SegmentError> {
        let mut seg = Self::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (word, pos) = parse_dict_line(line).map_err(|reason| SegmentError::Malformed {
                line: idx + 1,
                reason,
            })?;
            seg.insert(word, pos);
        }
        tracing::debug!(entries = seg.len(), "loaded segmentation dictionary");
        Ok(seg)
    }

    pub fn load(path: &std::path::Path) -> Result<Self, SegmentError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }
}

fn parse_dict_line(line: &str) -> Result<(&str, &str), String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        [word, pos] if pos.parse::<u64>().is_err() => Ok((*word, *pos)),
        [word, freq, pos] if freq.parse::<u64>().is_ok() => Ok((*word, *pos)),
        [_, _] => Err("missing part-of-speech tag".to_string()),
        [_, freq, _] => Err(format!("frequency `{freq}` is not a number")),
        _ => Err(format!("expected 2 or 3 fields, found {}", fields.len())),
    }
}

impl Segmenter for DictSegmenter {
    fn segment(&self, text: &str) -> Vec<WordPair> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let byte_at = |i: usize| chars.get(i).map_or(text.len(), |(b, _)| *b);

        let mut out = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            let start = chars[i].0;

            let longest = self.max_len.min(chars.len() - i);
            let hit = (1..=longest).rev().find_map(|n| {
                self.words
                    .get(&text[start..byte_at(i + n)])
                    .map(|pos| (n, pos.as_str()))
            });
            if let Some((n, pos)) = hit {
                out.push(WordPair::new(&text[start..byte_at(i + n)], pos));
                i += n;
                continue;
            }

            let c = chars[i].1;
            let (n, pos) = if c.is_ascii_alphanumeric() {
                (run_len(&chars[i..], |c| c.is_ascii_alphanumeric()), ENGLISH_TAG)
            } else if c.is_whitespace() {
                (run_len(&chars[i..], char::is_whitespace), UNKNOWN_TAG)
            } else {
                (1, UNKNOWN_TAG)
            };
            out.push(WordPair::new(&text[start..byte_at(i + n)], pos));
            i += n;
        }
        out
    }
}

fn run_len(chars: &[(usize, char)], pred: impl Fn(char) -> bool) -> usize {
    chars.iter().take_while(|(_, c)| pred(*c)).count()
}

/// jieba part-of-speech tagger with HMM enabled for unknown words.
#[cfg(feature = "jieba")]
pub struct JiebaSegmenter {
    inner: jieba_rs::Jieba,
}

#[cfg(feature = "jieba")]
impl JiebaSegmenter {
    pub fn new() -> Self {
        Self {
            inner: jieba_rs::Jieba::new(),
        }
    }
}

#[cfg(feature = "jieba")]
impl Default for JiebaSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "jieba")]
impl Segmenter for JiebaSegmenter {
    fn segment(&self, text: &str) -> Vec<WordPair> {
        self.inner
            .tag(text, true)
            .into_iter()
            .map(|t| WordPair::new(t.word, t.tag))
            .collect()
    }
}
