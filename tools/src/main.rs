//! sim-runner: headless Monty Hall simulator.
//!
//! Usage:
//!   sim-runner --trials 100000 --seed 12345
//!   sim-runner --trials 500 --show-details --max-rows 20 --csv-dir ./out
//!   sim-runner --session < commands.jsonl

use anyhow::{anyhow, bail, Result};
use montyhall_core::{
    config::SimConfig,
    projection::{csv_filename, render_table, table_rows, to_csv, write_csv},
    run_batch_with_progress, BatchResult, SimRng,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

const NO_DATA: &str = "No simulation data to export. Run a simulation first.";
const INVALID_TRIALS: &str = "Please enter a valid number of trials.";
const INVALID_ROWS: &str = "Please enter a valid number of rows.";
const INVALID_SEED: &str = "Please enter a valid seed.";

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum SessionCommand {
    Run { trials: i64 },
    Table { max_rows: i64 },
    Csv,
    Summary,
    Quit,
}

/// Holds the most recent batch. A new run replaces it.
struct Session {
    config:      SimConfig,
    master_seed: u64,
    runs:        u64,
    last:        Option<BatchResult>,
}

impl Session {
    fn new(config: SimConfig) -> Self {
        let master_seed = config.seed.unwrap_or_else(|| SimRng::from_entropy().seed());
        Self { config, master_seed, runs: 0, last: None }
    }

    fn run(&mut self, requested: i64) -> Result<&BatchResult> {
        let trials = validate_trials(&self.config, requested)?;
        let mut rng = SimRng::derived(self.master_seed, self.runs);
        self.runs += 1;
        let batch = run_batch_with_progress(trials, &mut rng, log_progress)?;
        let batch: &BatchResult = self.last.insert(batch);
        Ok(batch)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = match find_value(&args, "--config") {
        Some(path) => SimConfig::load(Path::new(path))?,
        None => SimConfig::default(),
    };
    if let Some(seed) = parse_opt_arg(&args, "--seed", INVALID_SEED)? {
        config.seed = Some(seed);
    }

    if args.iter().any(|a| a == "--session") {
        return run_session(Session::new(config));
    }

    let requested = parse_arg(&args, "--trials", config.default_trials as i64, INVALID_TRIALS)?;
    let show_details = config.show_details || args.iter().any(|a| a == "--show-details");
    let max_rows = parse_arg(&args, "--max-rows", config.default_rows as i64, INVALID_ROWS)?;
    let json = args.iter().any(|a| a == "--json");

    let trials = validate_trials(&config, requested)?;
    let mut rng = match config.seed {
        Some(seed) => SimRng::new(seed),
        None => SimRng::from_entropy(),
    };

    if !json {
        println!("Monty Hall sim-runner");
        println!("  seed:      {}", rng.seed());
        println!("  trials:    {trials}");
        println!();
    }

    let batch = run_batch_with_progress(trials, &mut rng, log_progress)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&batch.summary())?);
    } else {
        print_summary(&batch);
        if show_details {
            let rows = config.clamp_rows(non_negative(max_rows)).value;
            print_details(&batch, rows);
        }
    }

    let csv_path = find_value(&args, "--csv")
        .map(PathBuf::from)
        .or_else(|| {
            find_value(&args, "--csv-dir").map(|dir| Path::new(dir).join(csv_filename(batch.trials)))
        });
    if let Some(path) = csv_path {
        write_csv(&path, &batch.results)?;
        if !json {
            println!();
            println!("CSV written to {}", path.display());
        }
    }

    Ok(())
}

fn run_session(mut session: Session) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: SessionCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        match cmd {
            SessionCommand::Quit => break,
            SessionCommand::Run { trials } => match session.run(trials) {
                Ok(batch) => {
                    writeln!(stdout, "{}", serde_json::to_string(&batch.summary())?)?;
                }
                Err(e) => write_error(&mut stdout, &e.to_string())?,
            },
            SessionCommand::Summary => match &session.last {
                Some(batch) => writeln!(stdout, "{}", serde_json::to_string(&batch.summary())?)?,
                None => write_error(&mut stdout, NO_DATA)?,
            },
            SessionCommand::Table { max_rows } => match &session.last {
                Some(batch) => {
                    let rows = session.config.clamp_rows(non_negative(max_rows)).value;
                    let table = render_table(&table_rows(&batch.results, rows));
                    writeln!(stdout, "{}", serde_json::json!({ "table": table }))?;
                }
                None => write_error(&mut stdout, NO_DATA)?,
            },
            SessionCommand::Csv => match &session.last {
                Some(batch) => {
                    let payload = serde_json::json!({
                        "filename": csv_filename(batch.trials),
                        "csv": to_csv(&batch.results),
                    });
                    writeln!(stdout, "{payload}")?;
                }
                None => write_error(&mut stdout, NO_DATA)?,
            },
        }
        stdout.flush()?;
    }
    Ok(())
}

/// Reject non-positive counts, then bound to the configured maximum.
fn validate_trials(config: &SimConfig, requested: i64) -> Result<u64> {
    if requested <= 0 {
        bail!(INVALID_TRIALS);
    }
    Ok(config.clamp_trials(requested as u64).value)
}

fn print_summary(batch: &BatchResult) {
    let s = batch.summary();
    println!("=== RUN SUMMARY ===");
    println!("  total trials:   {}", s.total_trials);
    println!();
    println!("--- Always Switch ---");
    println!("  wins:           {}", s.switch_wins);
    println!("  win percentage: {:.2}%", s.switch_pct);
    println!();
    println!("--- Never Switch ---");
    println!("  wins:           {}", s.stay_wins);
    println!("  win percentage: {:.2}%", s.stay_pct);
}

fn print_details(batch: &BatchResult, max_rows: usize) {
    let rows = table_rows(&batch.results, max_rows);
    println!();
    println!("=== TRIALS (first {} of {}) ===", rows.len(), batch.trials);
    let table = render_table(&rows);
    if !table.is_empty() {
        println!("{table}");
    }
}

fn log_progress(done: u64, total: u64) {
    log::debug!("{done}/{total} trials");
}

fn write_error(out: &mut impl Write, message: &str) -> io::Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(out, "{err_json}")
}

fn non_negative(n: i64) -> usize {
    usize::try_from(n).unwrap_or(0)
}

fn find_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Absent flag gives `None`; a flag whose value is missing or does
/// not parse is an error carrying `invalid`.
fn parse_opt_arg<T: std::str::FromStr>(
    args: &[String],
    flag: &str,
    invalid: &str,
) -> Result<Option<T>> {
    if !args.iter().any(|a| a == flag) {
        return Ok(None);
    }
    find_value(args, flag)
        .and_then(|v| v.parse().ok())
        .map(Some)
        .ok_or_else(|| anyhow!("{invalid}"))
}

fn parse_arg<T: std::str::FromStr>(
    args: &[String],
    flag: &str,
    default: T,
    invalid: &str,
) -> Result<T> {
    Ok(parse_opt_arg(args, flag, invalid)?.unwrap_or(default))
}
