//! Output rendering for generated seeds and rule traces.

use std::io::Write;

use clap::ValueEnum;
use tagqa_core::{BatchReport, QaSeed, RuleOutcome, TagPath, WordPair};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One JSON object per line: `{"tags": [...], "question": ..., "rule": ...}`.
    Jsonl,
    /// `breadcrumb<TAB>question<TAB>rule`.
    Tsv,
}

// ── Public API ──

/// Write one line per seed.
pub fn write_seeds(out: &mut dyn Write, seeds: &[QaSeed], format: Format) -> anyhow::Result<()> {
    for seed in seeds {
        match format {
            Format::Jsonl => writeln!(out, "{}", serde_json::to_string(seed)?)?,
            Format::Tsv => writeln!(
                out,
                "{}\t{}\t{}",
                tsv_field(&seed.tags.to_string()),
                tsv_field(&seed.question),
                seed.rule
            )?,
        }
    }
    Ok(())
}

/// Write unmatched paths back out as breadcrumb lines.
pub fn write_unmatched(out: &mut dyn Write, paths: &[TagPath]) -> anyhow::Result<()> {
    for path in paths {
        writeln!(out, "{path}")?;
    }
    Ok(())
}

/// Batch summary for stderr.
pub fn summary(report: &BatchReport) -> String {
    let mut s = format!(
        "  Generated {} of {} questions ({} unmatched)\n",
        report.seeds.len(),
        report.total(),
        report.unmatched.len()
    );
    for (rule, count) in report.rule_counts() {
        s.push_str(&format!("    {:<14} {count}\n", rule.as_str()));
    }
    s
}

/// Human-readable trace of every rule for one path.
pub fn explain(path: &TagPath, segments: &[WordPair], outcomes: &[RuleOutcome]) -> String {
    let mut s = format!("=== {path} ===\n");
    let seg: Vec<String> = segments.iter().map(|p| p.to_string()).collect();
    s.push_str(&format!("  {:<14} {}\n", "segments", seg.join(" ")));
    s.push('\n');

    let winner = outcomes.iter().position(|o| o.question.is_some());
    for (i, outcome) in outcomes.iter().enumerate() {
        let marker = if Some(i) == winner { "*" } else { " " };
        let text = outcome.question.as_deref().unwrap_or("-");
        s.push_str(&format!("{marker} {:<14} {text}\n", outcome.rule.as_str()));
    }

    s.push('\n');
    match winner.and_then(|i| outcomes[i].question.as_deref()) {
        Some(q) => s.push_str(&format!("  question: {q}\n")),
        None => s.push_str("  question: (none, flag for manual review)\n"),
    }
    s
}

// ── Helpers ──

fn tsv_field(s: &str) -> String {
    s.replace(['\t', '\n', '\r'], " ")
}
