//! Batch question generation over many tag paths.
//!
//! Each path is independent, so with the `parallel` feature the batch is
//! spread across the rayon pool. Output order always follows input order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cascade::{Cascade, Generated};
use crate::path::TagPath;
use crate::rules::RuleId;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A generated question paired with the tag path it came from.
///
/// Corpus assembly joins these with the page content to form QA pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaSeed {
    pub tags: TagPath,
    pub question: String,
    pub rule: RuleId,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub seeds: Vec<QaSeed>,
    /// Paths no rule matched; these need manual review.
    pub unmatched: Vec<TagPath>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.seeds.len() + self.unmatched.len()
    }

    /// Number of seeds produced by each rule, in rule order.
    pub fn rule_counts(&self) -> BTreeMap<RuleId, usize> {
        let mut counts = BTreeMap::new();
        for seed in &self.seeds {
            *counts.entry(seed.rule).or_insert(0) += 1;
        }
        counts
    }
}

/// Generate a question for every path.
pub fn generate_batch(cascade: &Cascade, paths: &[TagPath]) -> BatchReport {
    #[cfg(feature = "parallel")]
    let results: Vec<Option<Generated>> = paths.par_iter().map(|p| cascade.generate(p)).collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<Option<Generated>> = paths.iter().map(|p| cascade.generate(p)).collect();

    let mut report = BatchReport::default();
    for (path, result) in paths.iter().zip(results) {
        match result {
            Some(Generated { question, rule }) => report.seeds.push(QaSeed {
                tags: path.clone(),
                question,
                rule,
            }),
            None => {
                warn!(path = %path, "no rule matched; flag for manual review");
                report.unmatched.push(path.clone());
            }
        }
    }

    info!(
        total = report.total(),
        generated = report.seeds.len(),
        unmatched = report.unmatched.len(),
        "batch complete"
    );
    report
}
