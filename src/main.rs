use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use unistate::combine::CombinedState;
use unistate::config::Config;
use unistate::logging::init_tracing;
use unistate::replay::replay;
use unistate::todo::{
    todo_store, TodoActions, TodoSnapshot, TodoStore, VisibilityFilter, VISIBILITY_FILTER_SLICE,
};

/// Replay todo actions through a unidirectional state store.
#[derive(Debug, Parser)]
#[command(name = "unistate", version, about)]
struct Cli {
    /// Config file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Preload the visibility filter (SHOW_ALL, SHOW_ACTIVE, SHOW_COMPLETED).
    #[arg(long, value_name = "FILTER")]
    filter: Option<VisibilityFilter>,

    /// Print the state as one JSON line after every dispatch.
    #[arg(long)]
    each: bool,

    /// Action log to replay; reads stdin when omitted.
    input: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(filter) = cli.filter {
        config.replay.initial_filter = filter;
    }
    if cli.each {
        config.replay.print_each = true;
    }

    init_tracing(&config.logging);

    let preloaded =
        CombinedState::new().with(VISIBILITY_FILTER_SLICE, config.replay.initial_filter);
    let store = todo_store(Some(preloaded))?;

    let subscription = config.replay.print_each.then(|| {
        let observed = store.clone();
        store.subscribe(move || print_compact(&observed))
    });

    let input: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open '{}'", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let summary = replay(&store, input, &TodoActions::new())?;

    if let Some(subscription) = subscription {
        subscription.unsubscribe();
    }

    let snapshot = TodoSnapshot::from_state(&store.get_state())
        .context("Store state is missing a todo slice")?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    for rejected in &summary.rejected {
        eprintln!("line {}: {}", rejected.line, rejected.error);
    }
    if !summary.rejected.is_empty() {
        bail!(
            "{} line(s) rejected, {} dispatched",
            summary.rejected.len(),
            summary.dispatched
        );
    }

    Ok(())
}

fn print_compact(store: &TodoStore) {
    if let Some(snapshot) = TodoSnapshot::from_state(&store.get_state()) {
        match serde_json::to_string(&snapshot) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::error!(error = %e, "Failed to serialize state"),
        }
    }
}
