use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use skein::pattern::char_class;
use skein::{Hit, Report, Source, find_all, find_backward, find_forward, parse};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pattern in skein notation, e.g. `"key" "=" *<digit>`
    #[arg(value_name = "PATTERN", required_unless_present = "classes")]
    pattern: Option<String>,

    /// File to search (standard input if omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// How to apply the pattern
    #[arg(short, long, value_enum, default_value_t = Mode::Find)]
    mode: Mode,

    /// Character offset to start at (backward searches default to the end)
    #[arg(short, long, value_name = "OFFSET")]
    start: Option<usize>,

    /// Colour the output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Log filter, e.g. `debug` (overrides RUST_LOG)
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,

    /// Print the parsed pattern before matching
    #[arg(long)]
    show: bool,

    /// List the character class names and exit
    #[arg(long)]
    classes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Consume at the start offset only
    Consume,
    /// Neglect at the start offset only
    Neglect,
    /// First match at or after the start offset
    Find,
    /// Last match at or before the start offset
    Backward,
    /// Every non-overlapping match
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => io::stdout().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(error) => {
            eprintln!("skein: {error:#}");
            ExitCode::from(2)
        }
    }
}

/// Returns whether anything matched.
fn run(args: &Args) -> Result<bool> {
    init_logging(args.log.as_deref())?;

    if args.classes {
        for name in char_class::names() {
            println!("{name}");
        }
        return Ok(true);
    }

    let notation = args
        .pattern
        .as_deref()
        .context("a pattern is required")?;
    let pattern = parse(notation).with_context(|| format!("invalid pattern {notation:?}"))?;
    if args.show {
        println!("{pattern}");
    }

    let text = read_input(args.file.as_deref())?;
    let report = Report::new(&text, args.color.enabled());
    let input = report.chars();
    debug!(mode = ?args.mode, start = ?args.start, chars = input.len(), "matching");

    let start = args.start.unwrap_or(0);
    match args.mode {
        Mode::Consume | Mode::Neglect => {
            let mut source = Source::at(&input, start);
            let start = source.position();
            let result = if args.mode == Mode::Consume {
                pattern.consume(&mut source)
            } else {
                pattern.neglect(&mut source)
            };
            match result.into_result() {
                Ok((length, captures)) => {
                    let hit = Hit {
                        start,
                        end: start + length,
                        captures,
                    };
                    println!("{}", report.hit(&hit));
                    Ok(true)
                }
                Err(error) => {
                    println!("{}", report.failure(start, &error));
                    Ok(false)
                }
            }
        }
        Mode::Find => Ok(print_hit(&report, find_forward(&pattern, &input, start))),
        Mode::Backward => {
            let start = args.start.unwrap_or(input.len());
            Ok(print_hit(&report, find_backward(&pattern, &input, start)))
        }
        Mode::All => {
            let hits = find_all(&pattern, &input, start);
            for hit in &hits {
                println!("{}", report.hit(hit));
            }
            Ok(!hits.is_empty())
        }
    }
}

fn print_hit(report: &Report, hit: Option<Hit>) -> bool {
    match hit {
        Some(hit) => {
            println!("{}", report.hit(&hit));
            true
        }
        None => false,
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn init_logging(directive: Option<&str>) -> Result<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log filter {directive:?}"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .try_init()
        .map_err(|error| anyhow!("failed to install log subscriber: {error}"))
}
