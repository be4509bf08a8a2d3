mod display;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tagqa_core::{Cascade, DEFAULT_SEPARATOR, DictSegmenter, Lexicon, TagPath, generate_batch};
use tracing_subscriber::EnvFilter;

use display::Format;

#[derive(Parser)]
#[command(name = "tagqa", version, about = "Generate training questions from help-center tag paths")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate one question per breadcrumb line.
    Generate {
        /// Breadcrumb file, one path per line (`-` for stdin).
        #[arg(short, long, default_value = "-")]
        input: PathBuf,
        /// Destination for generated seeds (`-` for stdout).
        #[arg(short, long, default_value = "-")]
        output: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Jsonl)]
        format: Format,
        /// Write paths no rule matched to this file.
        #[arg(long)]
        unmatched: Option<PathBuf>,
        #[command(flatten)]
        setup: Setup,
    },
    /// Show how every rule handles a single breadcrumb.
    Explain {
        breadcrumb: String,
        #[command(flatten)]
        setup: Setup,
    },
    /// Print a built-in lexicon as JSON.
    Lexicon {
        #[arg(long)]
        english: bool,
    },
}

#[derive(Args)]
struct Setup {
    /// Breadcrumb separator.
    #[arg(long, default_value = DEFAULT_SEPARATOR)]
    separator: String,
    /// Lexicon JSON file; missing fields use the Chinese defaults.
    #[arg(long, env = "TAGQA_LEXICON")]
    lexicon: Option<PathBuf>,
    /// Use the built-in English lexicon.
    #[arg(long, conflicts_with = "lexicon")]
    english: bool,
    /// Segmentation dictionary (`word [freq] pos` per line).
    #[arg(long, env = "TAGQA_DICT")]
    dict: Option<PathBuf>,
    /// Segment with jieba (requires the `jieba` feature).
    #[arg(long, conflicts_with = "dict")]
    jieba: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate {
            input,
            output,
            format,
            unmatched,
            setup,
        } => {
            let cascade = build_cascade(&setup)?;
            let paths = read_paths(&input, &setup.separator)?;
            tracing::info!(paths = paths.len(), input = %input.display(), "read tag paths");

            let report = generate_batch(&cascade, &paths);

            let mut out = open_output(&output)?;
            display::write_seeds(out.as_mut(), &report.seeds, format)?;
            out.flush()?;

            if let Some(path) = unmatched {
                let mut file = BufWriter::new(
                    File::create(&path)
                        .with_context(|| format!("creating {}", path.display()))?,
                );
                display::write_unmatched(&mut file, &report.unmatched)?;
                file.flush()?;
            }
            eprint!("{}", display::summary(&report));
        }
        Command::Explain { breadcrumb, setup } => {
            let cascade = build_cascade(&setup)?;
            let path = TagPath::parse(&breadcrumb, &setup.separator);
            let segments = cascade.segment_leaf(&path);
            let outcomes = cascade.trace(&segments, &path);
            print!("{}", display::explain(&path, &segments, &outcomes));
        }
        Command::Lexicon { english } => {
            let lexicon = if english { Lexicon::en() } else { Lexicon::zh() };
            println!("{}", serde_json::to_string_pretty(&lexicon)?);
        }
    }
    Ok(())
}

fn build_cascade(setup: &Setup) -> anyhow::Result<Cascade> {
    let lexicon = match &setup.lexicon {
        Some(path) => {
            Lexicon::load(path).with_context(|| format!("loading lexicon {}", path.display()))?
        }
        None if setup.english => Lexicon::en(),
        None => Lexicon::zh(),
    };

    if setup.jieba {
        return jieba_cascade(lexicon);
    }

    let dict = match &setup.dict {
        Some(path) => DictSegmenter::load(path)
            .with_context(|| format!("loading dictionary {}", path.display()))?,
        None => DictSegmenter::new(),
    };
    Ok(Cascade::new(lexicon, dict))
}

#[cfg(feature = "jieba")]
fn jieba_cascade(lexicon: Lexicon) -> anyhow::Result<Cascade> {
    Ok(Cascade::new(lexicon, tagqa_core::JiebaSegmenter::new()))
}

#[cfg(not(feature = "jieba"))]
fn jieba_cascade(_lexicon: Lexicon) -> anyhow::Result<Cascade> {
    anyhow::bail!("--jieba requires tagqa to be built with the `jieba` feature")
}

/// Read breadcrumbs, skipping blank lines and `#` comments.
fn read_paths(input: &Path, separator: &str) -> anyhow::Result<Vec<TagPath>> {
    let reader: Box<dyn BufRead> = if input == Path::new("-") {
        Box::new(io::stdin().lock())
    } else {
        let file =
            File::open(input).with_context(|| format!("opening {}", input.display()))?;
        Box::new(BufReader::new(file))
    };
    parse_paths(reader, separator)
}

fn parse_paths(reader: impl BufRead, separator: &str) -> anyhow::Result<Vec<TagPath>> {
    let mut paths = Vec::new();
    for line in reader.lines() {
        let line = line.context("reading breadcrumb line")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        paths.push(TagPath::parse(trimmed, separator));
    }
    Ok(paths)
}

fn open_output(output: &Path) -> anyhow::Result<Box<dyn Write>> {
    if output == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    }
    let file = File::create(output).with_context(|| format!("creating {}", output.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}
