//! Logomark batch tool
//!
//! Reads file locators (one per line), classifies and groups them, and
//! writes the catalog, placement plan and rejection log as JSON, plus an
//! optional import spreadsheet as CSV.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use logomark_core::engine::DEFAULT_MAX_EXAMPLES;
use logomark_core::{
    BuiltinRule, CollisionPolicy, Engine, EngineConfig, RawFileRecord, RejectionEntry,
    RejectionSummary, Vocabulary,
};

/// Extensions the catalog accepts; everything else is skipped before classification.
const RECOGNIZED_EXTENSIONS: &[&str] = &["svg", "png", "jpg", "jpeg", "pdf", "zip"];

/// CLI arguments
#[derive(Parser)]
#[command(name = "logomark")]
#[command(about = "Build a brand-asset catalog from a list of file locators")]
#[command(version)]
struct Cli {
    /// File with one locator per line (default: stdin)
    #[arg(short, long, env = "LOGOMARK_INPUT")]
    input: Option<PathBuf>,

    /// JSON vocabulary replacing the built-in one
    #[arg(long, env = "LOGOMARK_VOCABULARY")]
    vocabulary: Option<PathBuf>,

    /// Which locator a variant slot keeps on collision
    #[arg(long, env = "LOGOMARK_ON_COLLISION", default_value = "last")]
    on_collision: CollisionPolicy,

    /// Retention rules to apply, comma separated
    #[arg(short, long, env = "LOGOMARK_RETENTION", value_delimiter = ',')]
    retention: Vec<BuiltinRule>,

    /// Catalog output path (default: stdout)
    #[arg(short, long, env = "LOGOMARK_OUTPUT")]
    output: Option<PathBuf>,

    /// Write the placement plan to this path
    #[arg(long, env = "LOGOMARK_PLACEMENTS")]
    placements: Option<PathBuf>,

    /// Write the rejection log to this path
    #[arg(long, env = "LOGOMARK_REJECTIONS")]
    rejections: Option<PathBuf>,

    /// Write the import spreadsheet (CSV, one row per variant) to this path
    #[arg(long, value_name = "FILE", env = "LOGOMARK_CSV")]
    csv: Option<PathBuf>,

    /// Example filenames listed per rejection reason
    #[arg(long, env = "LOGOMARK_MAX_EXAMPLES", default_value_t = DEFAULT_MAX_EXAMPLES)]
    max_examples: usize,

    /// Keep `jpeg` and `jpg` files in separate slots
    #[arg(long, env = "LOGOMARK_SEPARATE_JPEG")]
    separate_jpeg: bool,
}

#[derive(Serialize)]
struct RejectionLog<'a> {
    summary: &'a RejectionSummary,
    files: &'a [RejectionEntry],
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).with_target(false))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let listing = read_input(cli.input.as_deref())?;
    let records = parse_locators(&listing);
    if records.is_empty() {
        bail!("no locators with a recognized extension ({})", RECOGNIZED_EXTENSIONS.join(", "));
    }
    info!(locators = records.len(), "read input");

    let vocabulary = match &cli.vocabulary {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read vocabulary {}", path.display()))?;
            Vocabulary::from_json(&json)
                .with_context(|| format!("invalid vocabulary {}", path.display()))?
        }
        None => Vocabulary::korte_hoffmann()?,
    };

    let mut config = EngineConfig::new()
        .with_collision_policy(cli.on_collision)
        .with_max_examples(cli.max_examples)
        .with_unified_jpeg(!cli.separate_jpeg);
    for rule in &cli.retention {
        config = config.with_rule(*rule);
    }

    let engine = Engine::new(Arc::new(vocabulary), config)?;
    let run = engine.run(&records)?;

    write_json(cli.output.as_deref(), &run.export())?;

    if let Some(path) = &cli.placements {
        write_json(Some(path.as_path()), &run.placements)?;
    }

    if let Some(path) = &cli.rejections {
        let log = RejectionLog {
            summary: &run.summary,
            files: &run.rejections,
        };
        write_json(Some(path.as_path()), &log)?;
    }

    if let Some(path) = &cli.csv {
        let file = fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        engine
            .import_sheet(&run.variants)
            .write_csv(io::BufWriter::new(file))
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), rows = run.variants.len(), "wrote import sheet");
    }

    if !run.summary.is_empty() {
        warn!("{}", run.summary.to_string().trim_end());
    }
    info!(
        accepted = run.accepted.len(),
        rejected = run.rejections.len(),
        variants = run.variants.len(),
        "done"
    );

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read input {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// One record per non-blank, non-comment line with a recognized extension.
fn parse_locators(listing: &str) -> Vec<RawFileRecord> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(RawFileRecord::from_locator)
        .filter(|record| RECOGNIZED_EXTENSIONS.contains(&record.extension()))
        .collect()
}

fn write_json<T: Serialize + ?Sized>(path: Option<&Path>, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => fs::write(path, json + "\n")
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            let mut out = io::stdout().lock();
            writeln!(out, "{json}").context("failed to write stdout")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_comments_blanks_and_foreign_files() {
        let listing = "\
# exported 2024-05-01
logos/gruppe_left_black_size-m.svg

logos/notes.txt
logos/README
https://cdn.example.com/favicon_black.PNG?v=3
";
        let records = parse_locators(listing);
        let stems: Vec<_> = records.iter().map(|r| r.stem()).collect();
        assert_eq!(stems, ["gruppe_left_black_size-m", "favicon_black"]);
        assert_eq!(records[1].extension(), "png");
    }

    #[test]
    fn cli_parses_rule_list() {
        let cli = Cli::try_parse_from([
            "logomark",
            "--retention",
            "white-jpeg,accent-ban",
            "--on-collision",
            "first",
        ])
        .unwrap();
        assert_eq!(cli.retention, [BuiltinRule::WhiteJpeg, BuiltinRule::AccentBan]);
        assert_eq!(cli.on_collision, CollisionPolicy::KeepFirst);
        assert_eq!(cli.max_examples, DEFAULT_MAX_EXAMPLES);
        assert_eq!(cli.csv, None);
    }

    #[test]
    fn csv_export_writes_one_row_per_variant() {
        let cli = Cli::try_parse_from(["logomark", "--csv", "sheet.csv"]).unwrap();
        assert_eq!(cli.csv.as_deref(), Some(Path::new("sheet.csv")));

        let records = parse_locators(
            "logos/gruppe_left_white_size-m.jpg\n\
             logos/gruppe_left_white_size-m.png\n\
             logos/gruppe_left_black_size-m.jpg\n",
        );
        let engine = Engine::korte_hoffmann().unwrap();
        let run = engine.run(&records).unwrap();

        let mut out = Vec::new();
        engine.import_sheet(&run.variants).write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 1 + run.variants.len());
        assert!(lines[0].ends_with(",Image,Image:alt,JPG,PNG"));
        let white = lines.iter().find(|l| l.starts_with("gruppe_left_size-m_white,")).unwrap();
        assert!(white.ends_with(",,logos/gruppe_left_white_size-m.png"));
        let black = lines.iter().find(|l| l.starts_with("gruppe_left_size-m_black,")).unwrap();
        assert!(black.ends_with(",logos/gruppe_left_black_size-m.jpg,"));
    }
}
