use std::fs::{self, File};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use rare_sats::{Classifier, ClassifierConfig, OutpointRanges, Satribute};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[clap(
    name = "rare-sats",
    about = "Find rare and exotic sats in UTXO sat ranges",
    version
)]
pub struct Opts {
    /// JSON document mapping outpoints to right-exclusive sat ranges, `-` for stdin
    #[clap(long, short, env = "RARE_SATS_INPUT", default_value = "-")]
    input: PathBuf,
    /// TOML file with a `[tables]` section overriding the historical ranges
    #[clap(long, env = "RARE_SATS_TABLES")]
    tables: Option<PathBuf>,
    /// Comma-separated satributes to look for, all of them by default
    #[clap(long, env = "RARE_SATS_SATRIBUTES", value_delimiter = ',')]
    satributes: Option<Vec<Satribute>>,
    /// Pretty-print the JSON result
    #[clap(long)]
    pretty: bool,
    /// Log more to stderr; repeat for more detail
    #[clap(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Opts {
    fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    };
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(
    tables: Option<&Path>,
    satributes: Option<Vec<Satribute>>,
) -> Result<ClassifierConfig> {
    let mut config = match tables {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read tables file {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("Invalid tables file {}", path.display()))?
        }
        None => ClassifierConfig::default(),
    };
    if satributes.is_some() {
        config.satributes = satributes;
    }
    Ok(config)
}

/// Classifies the document read from `input` and writes the result to `output`.
pub fn run<R: Read, W: Write>(opts: &Opts, input: R, mut output: W) -> Result<()> {
    let config = load_config(opts.tables.as_deref(), opts.satributes.clone())?;
    let classifier = Classifier::new(config);

    let outpoints: OutpointRanges =
        serde_json::from_reader(input).context("Failed to parse outpoint ranges")?;
    info!(outpoints = outpoints.len(), "Loaded outpoint ranges");

    let result = classifier.find(&outpoints)?;
    if opts.pretty {
        serde_json::to_writer_pretty(&mut output, &result)?;
    } else {
        serde_json::to_writer(&mut output, &result)?;
    }
    writeln!(output)?;
    Ok(())
}

pub fn entry(opts: Opts) -> Result<()> {
    let stdout = io::stdout().lock();
    if opts.reads_stdin() {
        run(&opts, io::stdin().lock(), stdout)
    } else {
        let file = File::open(&opts.input)
            .with_context(|| format!("Failed to open {}", opts.input.display()))?;
        run(&opts, BufReader::new(file), stdout)
    }
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    init_tracing(opts.verbose);
    entry(opts)
}
