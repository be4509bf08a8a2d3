//! Rule-based question generation from help-center tag paths.
//!
//! A tag path such as `帮助中心 > 镜像服务 > 用户指南 > 共享镜像` is turned
//! into a training question (`怎样共享帮助中心的镜像`) by a fixed-priority
//! cascade of rules over the segmented leaf tag.

pub mod batch;
pub mod cascade;
pub mod error;
pub mod lexicon;
pub mod path;
pub mod rules;
pub mod segment;

pub use batch::{BatchReport, QaSeed, generate_batch};
pub use cascade::{Cascade, Generated, RuleOutcome};
pub use error::{LexiconError, SegmentError};
pub use lexicon::{Lexicon, Template, Templates, TokenProbe};
pub use path::{DEFAULT_SEPARATOR, TagPath, WordPair};
pub use rules::{Rule, RuleId, RuleInput};
#[cfg(feature = "jieba")]
pub use segment::JiebaSegmenter;
pub use segment::{DictSegmenter, Segmenter};
