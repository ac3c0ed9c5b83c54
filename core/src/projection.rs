//! Presentation projector: table rows and CSV text from a batch.
//!
//! Both projections are pure and share no state. The CSV layout is an
//! external contract:
//!
//!   trial,car,player,monty,switchChoice,switchWin,stayWin
//!   1,2,2,3,1,0,1
//!   ...
//!
//! Rows are separated by `\n` with no terminator after the last row.
//! Every field is a small integer or a 0/1 flag, so no quoting exists.

use crate::{
    error::{SimError, SimResult},
    trial::Trial,
    types::{Door, TrialIndex},
};
use std::path::Path;

pub const CSV_HEADER: &str = "trial,car,player,monty,switchChoice,switchWin,stayWin";

const TABLE_HEADERS: [&str; 7] = [
    "#",
    "Car",
    "Player pick",
    "Monty opens",
    "Switch pick",
    "Switch win",
    "Stay win",
];
const WIN_MARK: &str = "✅";
const LOSS_MARK: &str = "❌";
/// Terminal columns taken by either marker.
const MARK_WIDTH: usize = 2;

/// One displayed row, columns in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRow {
    pub index:         TrialIndex,
    pub car:           Door,
    pub player:        Door,
    pub monty:         Door,
    pub switch_choice: Door,
    pub switch_win:    bool,
    pub stay_win:      bool,
}

impl From<&Trial> for TableRow {
    fn from(t: &Trial) -> Self {
        Self {
            index:         t.trial,
            car:           t.car,
            player:        t.player,
            monty:         t.monty,
            switch_choice: t.switch_choice,
            switch_win:    t.switch_win,
            stay_win:      t.stay_win,
        }
    }
}

/// The first `min(max_rows, trials.len())` trials as table rows.
pub fn table_rows(trials: &[Trial], max_rows: usize) -> Vec<TableRow> {
    trials.iter().take(max_rows).map(TableRow::from).collect()
}

/// Fixed-width text table. No rows renders as an empty string.
pub fn render_table(rows: &[TableRow]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let index_width = rows
        .iter()
        .map(|r| r.index.to_string().len())
        .max()
        .unwrap_or(1)
        .max(TABLE_HEADERS[0].len());

    let mut widths = TABLE_HEADERS.map(str::len);
    widths[0] = index_width;

    let mut out = String::new();
    let header: Vec<String> = TABLE_HEADERS
        .iter()
        .zip(widths)
        .map(|(h, w)| pad(h, h.len(), w))
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));

    for r in rows {
        let index = r.index.to_string();
        let doors = [r.car, r.player, r.monty, r.switch_choice].map(|d| d.to_string());
        let cells = [
            pad(&index, index.len(), widths[0]),
            pad(&doors[0], 1, widths[1]),
            pad(&doors[1], 1, widths[2]),
            pad(&doors[2], 1, widths[3]),
            pad(&doors[3], 1, widths[4]),
            pad(mark(r.switch_win), MARK_WIDTH, widths[5]),
            pad(mark(r.stay_win), MARK_WIDTH, widths[6]),
        ];
        out.push('\n');
        out.push_str(cells.join("  ").trim_end());
    }
    out
}

/// Serialize every trial, untruncated. An empty slice gives `""`.
pub fn to_csv(trials: &[Trial]) -> String {
    if trials.is_empty() {
        return String::new();
    }
    let mut lines = Vec::with_capacity(trials.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for t in trials {
        lines.push(format!(
            "{},{},{},{},{},{},{}",
            t.trial,
            t.car,
            t.player,
            t.monty,
            t.switch_choice,
            flag(t.switch_win),
            flag(t.stay_win),
        ));
    }
    lines.join("\n")
}

/// Read back text produced by `to_csv`.
///
/// Strict: the header must match exactly, and each row must describe
/// a legal trial whose switch door and flags agree with its doors.
/// A single trailing newline is tolerated.
pub fn parse_csv(text: &str) -> SimResult<Vec<Trial>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut lines = text.lines().enumerate();
    match lines.next() {
        Some((_, header)) if header == CSV_HEADER => {}
        Some((_, other)) => {
            return Err(csv_error(1, format!("unexpected header {other:?}")));
        }
        None => return Ok(Vec::new()),
    }

    let mut trials = Vec::new();
    for (i, line) in lines {
        trials.push(parse_row(i + 1, line)?);
    }
    Ok(trials)
}

/// Conventional export name, e.g. `monty_hall_trials_1000.csv`.
pub fn csv_filename(trial_count: u64) -> String {
    format!("monty_hall_trials_{trial_count}.csv")
}

/// Write the full CSV export to `path`.
pub fn write_csv(path: &Path, trials: &[Trial]) -> SimResult<()> {
    std::fs::write(path, to_csv(trials))?;
    log::info!("Wrote {} trials to {}", trials.len(), path.display());
    Ok(())
}

fn parse_row(line_no: usize, line: &str) -> SimResult<Trial> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 7 {
        return Err(csv_error(line_no, format!("expected 7 fields, got {}", fields.len())));
    }

    let index: TrialIndex = fields[0]
        .parse()
        .map_err(|_| csv_error(line_no, format!("bad trial index {:?}", fields[0])))?;
    let car = parse_door(line_no, "car", fields[1])?;
    let player = parse_door(line_no, "player", fields[2])?;
    let monty = parse_door(line_no, "monty", fields[3])?;
    let switch_choice = parse_door(line_no, "switchChoice", fields[4])?;
    let switch_win = parse_flag(line_no, "switchWin", fields[5])?;
    let stay_win = parse_flag(line_no, "stayWin", fields[6])?;

    let trial = Trial::from_doors(index, car, player, monty)
        .map_err(|e| csv_error(line_no, e.to_string()))?;

    if trial.switch_choice != switch_choice
        || trial.switch_win != switch_win
        || trial.stay_win != stay_win
    {
        return Err(csv_error(
            line_no,
            format!("derived columns do not match doors car={car} player={player} monty={monty}"),
        ));
    }
    Ok(trial)
}

fn parse_door(line_no: usize, column: &str, field: &str) -> SimResult<Door> {
    field
        .parse::<u8>()
        .ok()
        .and_then(|n| Door::from_number(n).ok())
        .ok_or_else(|| csv_error(line_no, format!("bad {column} door {field:?}")))
}

fn parse_flag(line_no: usize, column: &str, field: &str) -> SimResult<bool> {
    match field {
        "1" => Ok(true),
        "0" => Ok(false),
        other => Err(csv_error(line_no, format!("bad {column} flag {other:?}"))),
    }
}

fn csv_error(line: usize, reason: String) -> SimError {
    SimError::CsvFormat { line, reason }
}

fn flag(b: bool) -> &'static str {
    if b { "1" } else { "0" }
}

fn mark(b: bool) -> &'static str {
    if b { WIN_MARK } else { LOSS_MARK }
}

/// Left-align `cell` (occupying `cell_width` columns) in `width` columns.
fn pad(cell: &str, cell_width: usize, width: usize) -> String {
    format!("{cell}{}", " ".repeat(width.saturating_sub(cell_width)))
}
