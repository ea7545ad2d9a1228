//! patsplit CLI - patent PDF section classifier

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};

use patsplit::{
    AnalysisReport, ClassifierOptions, HeaderDump, JsonFormat, KeywordSet, MatchAlgorithm,
    PatentAnalyzer, Reconciler, SectionType,
};

#[derive(Parser)]
#[command(name = "patsplit")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Classify scanned patent PDF pages into sections", long_about = None)]
struct Cli {
    /// Header dump file (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify pages of one or more header dumps
    Classify {
        /// Header dump files (JSON)
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Write one report per input into this directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// Reconcile a raw label sequence (e.g. "front claims unknown claims")
    Reconcile {
        /// Raw labels, one per page
        #[arg(value_name = "LABEL", required = true)]
        labels: Vec<SectionType>,

        /// Only resolve unknown pages
        #[arg(long)]
        no_continuity: bool,
    },

    /// Show the keyword table
    Keywords {
        /// Options file (JSON) with custom keywords
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

/// Flags mirroring `ClassifierOptions`; they override the config file.
#[derive(Args, Default)]
struct OptionArgs {
    /// Options file (JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Match algorithm: v2 (positional) or v3 (fuzzy)
    #[arg(short, long, env = "PATSPLIT_ALGORITHM")]
    algorithm: Option<MatchAlgorithm>,

    /// Keep at most this many CJK characters per header (0 = unlimited)
    #[arg(long, env = "PATSPLIT_MAX_CJK_CHARS")]
    max_cjk_chars: Option<usize>,

    /// Share of the page height used as header region
    #[arg(long, env = "PATSPLIT_HEADER_RATIO")]
    header_ratio: Option<f32>,

    /// Minimum confidence to apply a continuity correction
    #[arg(long)]
    threshold: Option<f32>,

    /// Disable isolated-page correction
    #[arg(long)]
    no_continuity: bool,

    /// Classify pages in parallel
    #[arg(long)]
    parallel: bool,
}

impl OptionArgs {
    fn load(&self) -> Result<ClassifierOptions, Box<dyn std::error::Error>> {
        let mut options = match &self.config {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => ClassifierOptions::default(),
        };

        if let Some(algorithm) = self.algorithm {
            options = options.with_algorithm(algorithm);
        }
        if let Some(max) = self.max_cjk_chars {
            options = options.with_max_cjk_chars(max);
        }
        if let Some(ratio) = self.header_ratio {
            options = options.with_header_ratio(ratio);
        }
        if let Some(threshold) = self.threshold {
            options = options.with_correction_threshold(threshold);
        }
        if self.no_continuity {
            options = options.with_continuity(false);
        }
        if self.parallel {
            options = options.with_parallel(true);
        }

        options.validate()?;
        Ok(options)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Classify {
            inputs,
            output,
            json,
            compact,
            options,
        }) => cmd_classify(&inputs, output.as_deref(), json, compact, &options),
        Some(Commands::Reconcile {
            labels,
            no_continuity,
        }) => {
            cmd_reconcile(&labels, no_continuity);
            Ok(())
        }
        Some(Commands::Keywords { config }) => cmd_keywords(config.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: classify if input is provided
            if let Some(input) = cli.input {
                cmd_classify(&[input], None, false, false, &OptionArgs::default())
            } else {
                println!("{}", "Usage: patsplit <FILE>".yellow());
                println!("       patsplit --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_classify(
    inputs: &[PathBuf],
    output: Option<&Path>,
    json: bool,
    compact: bool,
    args: &OptionArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = PatentAnalyzer::new(args.load()?)?;
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let Some(output_dir) = output else {
        for input in inputs {
            let report = analyzer.analyze_dump(&HeaderDump::from_path(input)?)?;
            if json {
                println!("{}", report.to_json(format)?);
            } else {
                print_report(input, &report);
            }
        }
        return Ok(());
    };

    fs::create_dir_all(output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut written = Vec::new();
    let mut failed = Vec::new();
    for input in inputs {
        pb.set_message(input.display().to_string());
        match classify_to_file(&analyzer, input, output_dir, format) {
            Ok(path) => written.push(path),
            Err(e) => {
                log::warn!("{}: {}", input.display(), e);
                failed.push((input, e));
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, path) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), path.display());
    }
    for (input, e) in &failed {
        println!("  {} {}: {}", "✗".red(), input.display(), e);
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(format!("{} of {} inputs failed", failed.len(), inputs.len()).into())
    }
}

fn classify_to_file(
    analyzer: &PatentAnalyzer,
    input: &Path,
    output_dir: &Path,
    format: JsonFormat,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let report = analyzer.analyze_dump(&HeaderDump::from_path(input)?)?;
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let path = output_dir.join(format!("{}.sections.json", stem));
    fs::write(&path, report.to_json(format)?)?;
    Ok(path)
}

fn section_label(section: SectionType) -> ColoredString {
    let name = section.as_str();
    match section {
        SectionType::Front => name.cyan(),
        SectionType::Claims => name.green(),
        SectionType::Descriptions => name.blue(),
        SectionType::Drawings => name.magenta(),
        SectionType::Unknown => name.red(),
    }
}

fn print_report(input: &Path, report: &AnalysisReport) {
    println!("{}", "Page Classification".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), report.page_count);
    println!("{}: {}", "Algorithm".bold(), report.algorithm);
    println!();

    for (page, label) in report.pages.iter().zip(&report.labels) {
        let raw = page.section();
        let change = if raw == *label {
            String::new()
        } else {
            format!(" (raw {})", raw).yellow().to_string()
        };
        let keyword = if page.result.keyword.is_empty() {
            String::new()
        } else {
            format!(" [{}]", page.result.keyword).dimmed().to_string()
        };
        println!(
            "  {:>4}  {:<12}{}  '{}'{}",
            page.page.number(),
            section_label(*label),
            change,
            page.page.combined_text,
            keyword
        );
    }

    if !report.errors.is_empty() {
        println!();
        println!("{}", "Continuity".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for error in &report.errors {
            println!("  {}", error);
        }
    }

    println!();
    println!("{}", "Sections".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for target in report.split_plan() {
        println!("  {:<18} {:?}", target.file_name.bold(), target.page_numbers());
    }
    for missing in report.missing_sections() {
        println!("  {:<18} {}", missing.file_name().dimmed(), "not found".dimmed());
    }

    println!();
    println!(
        "{}: {} isolated, {} unknown",
        "Corrections".bold(),
        report.summary.isolated_page_corrections,
        report.summary.unknown_resolutions
    );
    let failures = report.ocr_failures();
    if !failures.is_empty() {
        println!("{}: {:?}", "OCR failures".yellow().bold(), failures);
    }
    if report.degenerate {
        println!("{}", "No page header was recognized".yellow());
    }
    println!();
}

fn cmd_reconcile(labels: &[SectionType], no_continuity: bool) {
    let options = ClassifierOptions::default().with_continuity(!no_continuity);
    let outcome = Reconciler::new((&options).into()).reconcile(labels);

    for correction in &outcome.corrections {
        println!("{} {}", "Corrected".yellow(), correction);
    }
    let line: Vec<String> = outcome
        .labels
        .iter()
        .map(|label| section_label(*label).to_string())
        .collect();
    println!("{}", line.join(" "));
}

fn cmd_keywords(config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let keywords: KeywordSet = match config {
        Some(path) => {
            let options: ClassifierOptions = serde_json::from_str(&fs::read_to_string(path)?)?;
            options.keywords
        }
        None => KeywordSet::default(),
    };

    for section in SectionType::SECTIONS {
        println!(
            "{:<14} {}",
            section_label(section),
            keywords.keywords(section).join(", ")
        );
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "patsplit".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Patent PDF section classifier");
    println!();
    println!(
        "Algorithms: {} (positional), {} (fuzzy, default)",
        MatchAlgorithm::Positional,
        MatchAlgorithm::Fuzzy
    );
    println!("License: MIT");
}
