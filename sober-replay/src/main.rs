//! sober-replay - Replay tracker messages through a fresh store
//!
//! Reads one JSON message per line, dispatches each in order, and prints
//! the final state (or every intermediate state with `--trace`).

use std::cell::Cell;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use clap::Parser;
use libsobriety::{
    logging::LoggingConfig, Action, Clock, Result, SobrietyError, SobrietyState, Store,
};

#[derive(Parser, Debug)]
#[command(name = "sober-replay")]
#[command(version, about = "Replay tracker messages and print the resulting state")]
#[command(long_about = r#"Fold a stream of tracker messages through a fresh store and print the result.

Each input line is one JSON message:
    {"type": "ADD_RELAPSE_DATE", "payload": {"time": "1/1/2020"}}
    {"type": "UPDATE_TIME_SOBER", "payload": "2020-01-02T00:00:00Z"}

Unknown message types are accepted and leave the state unchanged.

EXAMPLES:
    # Replay a file
    sober-replay --input messages.jsonl

    # From stdin, reproducible relapse timestamps
    cat messages.jsonl | sober-replay --now 2020-01-01T12:00:00Z

    # Every intermediate state, one JSON object per line
    sober-replay --input messages.jsonl --trace | jq .relapses

OUTPUT FORMATS:
    json - Final state as pretty JSON (default)
    text - Human-readable summary

EXIT CODES:
    0 - Success
    1 - Error (file not found, unreadable input, unwritable output, etc.)
    3 - Invalid input (malformed JSON or payload)
"#)]
struct Args {
    /// Read messages from FILE instead of stdin
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "json", value_name = "FORMAT")]
    #[arg(value_parser = ["json", "text"])]
    format: String,

    /// Print the state after every message as JSON lines
    #[arg(long, conflicts_with = "format")]
    trace: bool,

    /// Pin "now" (RFC 3339) for relapse timestamps
    #[arg(long, value_name = "TIMESTAMP")]
    now: Option<String>,

    /// Debug logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy)]
struct PinnedClock(DateTime<Utc>);

impl Clock for PinnedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

fn parse_now(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| SobrietyError::InvalidInput(format!("--now '{}': {}", raw, e)))
}

/// Parse one message per non-blank line
fn read_messages(reader: impl BufRead) -> Result<Vec<Action>> {
    let mut messages = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let action: Action = serde_json::from_str(&line)
            .map_err(|e| SobrietyError::InvalidInput(format!("line {}: {}", index + 1, e)))?;

        if action == Action::Unknown {
            tracing::debug!(line = index + 1, "Unknown message type, will be ignored");
        }
        messages.push(action);
    }

    Ok(messages)
}

fn write_text(out: &mut impl Write, state: &SobrietyState) -> io::Result<()> {
    match state.time_sober {
        Some(ts) => writeln!(out, "Sober since: {}", ts.to_rfc3339())?,
        None => writeln!(out, "Sober since: not set")?,
    }
    writeln!(out, "Relapses: {}", state.relapses.len())?;
    for (n, relapse) in state.relapses.iter().enumerate() {
        writeln!(out, "  {}. {}", n + 1, relapse.time)?;
    }
    Ok(())
}

/// Serializing state only fails when stdout does, which is an I/O error
fn output_error(e: serde_json::Error) -> SobrietyError {
    SobrietyError::Io(e.into())
}

fn run(args: Args) -> Result<()> {
    let messages = match args.input {
        Some(ref path) => read_messages(BufReader::new(File::open(path)?))?,
        None => read_messages(io::stdin().lock())?,
    };

    let mut store = Store::new();
    if let Some(ref raw) = args.now {
        store = store.with_clock(PinnedClock(parse_now(raw)?));
    }

    // Store callbacks carry no payload, so flag the change and re-read after dispatch
    let changed = Rc::new(Cell::new(false));
    let flag = Rc::clone(&changed);
    let subscription = store.subscribe(move || flag.set(true));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let count = messages.len();

    for action in messages {
        store.dispatch(action);

        if args.trace && changed.replace(false) {
            serde_json::to_writer(&mut out, &*store.get_state()).map_err(output_error)?;
            writeln!(out)?;
        }
    }
    subscription.unsubscribe();

    tracing::info!(messages = count, "Replay complete");

    if !args.trace {
        let state = store.get_state();
        match args.format.as_str() {
            "text" => write_text(&mut out, &state)?,
            _ => {
                serde_json::to_writer_pretty(&mut out, &*state).map_err(output_error)?;
                writeln!(out)?;
            }
        }
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    let mut logging = LoggingConfig::from_env();
    logging.verbose = args.verbose;
    logging.init();

    tracing::debug!("sober-replay started with args: {:?}", args);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
