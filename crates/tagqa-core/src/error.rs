use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("lexicon file not readable: {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("lexicon JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("template `{template}` uses unknown placeholder {{{name}}}")]
    UnknownPlaceholder { template: &'static str, name: String },

    #[error("template `{template}` is missing required placeholder {{{name}}}")]
    MissingPlaceholder {
        template: &'static str,
        name: &'static str,
    },

    #[error("template `{template}` has an unclosed placeholder")]
    UnclosedPlaceholder { template: &'static str },

    #[error("lexicon field `{0}` must not be empty")]
    EmptyMarker(&'static str),
}

#[derive(Debug, Error)]
pub enum SegmentError {
    #[error("dictionary I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("dictionary line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}
