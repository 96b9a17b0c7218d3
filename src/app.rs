use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use serde_json::Value;

use crate::components::history::HistoryReducer;
use crate::environment::storage::Store;
use crate::environment::types::HistoryConfig;
use crate::environment::Environment;

#[derive(Parser, Debug)]
#[command(name = "history-replay")]
#[command(about = "Replay a recorded log of chat history actions and print the resulting state")]
pub struct Cli {
    /// Path to a JSON config file. Defaults to the user's config directory.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Newline delimited JSON actions. Reads stdin if omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Pretty print the resulting state
    #[arg(short, long)]
    pub pretty: bool,

    /// Abort on the first malformed action instead of skipping it
    #[arg(long)]
    pub strict: bool,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => HistoryConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => HistoryConfig::load_default().context("failed to load default config")?,
    };
    init_logging(&config.log_filter);
    log::debug!("{config:?}");

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            std::fs::File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    let mut store = Store::<HistoryReducer>::new(Environment::new(config));
    let summary = replay(&mut store, reader, cli.strict)?;
    log::info!(
        "replayed {} actions ({} changed the history, {} skipped)",
        summary.applied,
        summary.changed,
        summary.skipped
    );

    let state = store.state();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if cli.pretty {
        serde_json::to_writer_pretty(&mut out, state.as_ref())?;
    } else {
        serde_json::to_writer(&mut out, state.as_ref())?;
    }
    writeln!(out)?;
    Ok(())
}

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct ReplaySummary {
    pub applied: usize,
    pub changed: usize,
    pub skipped: usize,
}

/// Feed every non-empty line of `reader` into `store`.
pub fn replay(
    store: &mut Store<HistoryReducer>,
    reader: impl BufRead,
    strict: bool,
) -> anyhow::Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();
    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line.with_context(|| format!("failed to read line {number}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let result = serde_json::from_str::<Value>(&line)
            .map_err(anyhow::Error::from)
            .and_then(|value| store.dispatch_value(&value).map_err(anyhow::Error::from));
        match result {
            Ok(changed) => {
                summary.applied += 1;
                if changed {
                    summary.changed += 1;
                }
            }
            Err(e) if strict => return Err(e.context(format!("invalid action on line {number}"))),
            Err(e) => {
                log::warn!("skipping line {number}: {e}");
                summary.skipped += 1;
            }
        }
    }
    Ok(summary)
}

fn init_logging(default_filter: &str) {
    use env_logger::Env;
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format(|buf, record| {
            writeln!(
                buf,
                "{}:{} {} [{}] - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Stderr)
        .init();
}
