//! Statistics aggregation command for round history analysis.
//!
//! Aggregates JSONL round history files into summary metrics: total rounds,
//! wins per seat, and a histogram of how rounds ended. Validates records as
//! it goes and reports corrupted or incomplete lines.

use crate::error::CliError;
use crate::io_utils::read_text_auto;
use crate::ui;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use tonk_engine::logger::RoundRecord;

/// Aggregates statistics from JSONL round history files.
///
/// Reads round histories (JSONL or .jsonl.zst, or a directory of them) and
/// computes summary statistics: rounds counted, win distribution by seat,
/// and win-condition frequencies.
///
/// # Validation
///
/// - Detects corrupted or incomplete records
/// - Verifies the winning seat indexes into the record's score vector
/// - Reports warnings for skipped records
pub fn handle_stats_command(
    input: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    run_stats(&input, out, err)
}

struct StatsState {
    rounds: u64,
    wins: BTreeMap<String, u64>,
    conditions: BTreeMap<String, u64>,
    total_pot: u64,
    skipped: u64,
    corrupted: u64,
    stats_ok: bool,
}

fn run_stats(input: &str, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    fn consume_stats_content(
        content: String,
        state: &mut StatsState,
        err: &mut dyn Write,
    ) -> Result<(), CliError> {
        let has_trailing_nl = content.ends_with('\n');
        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
        for (i, line) in lines.iter().enumerate() {
            let record: RoundRecord = match serde_json::from_str(line) {
                Ok(r) => r,
                Err(_) => {
                    // a missing trailing newline marks an interrupted write,
                    // not corruption
                    if i == lines.len() - 1 && !has_trailing_nl {
                        state.skipped += 1;
                    } else {
                        state.corrupted += 1;
                    }
                    continue;
                }
            };

            if let Some(winner) = record.winner {
                if !record.scores.is_empty() && winner >= record.scores.len() {
                    state.stats_ok = false;
                    ui::write_error(
                        err,
                        &format!("Invalid winner seat at round {}", record.round_id),
                    )?;
                    continue;
                }
                *state.wins.entry(format!("seat_{}", winner)).or_insert(0) += 1;
            }
            if let Some(condition) = record.condition {
                // use the serialized name ("knock", "initial_tonk", ...)
                let key = serde_json::to_value(condition)
                    .ok()
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_else(|| format!("{:?}", condition));
                *state.conditions.entry(key).or_insert(0) += 1;
            }
            state.total_pot += u64::from(record.pot);
            state.rounds += 1;
        }
        Ok(())
    }

    let path = Path::new(input);
    let mut state = StatsState {
        rounds: 0,
        wins: BTreeMap::new(),
        conditions: BTreeMap::new(),
        total_pot: 0,
        skipped: 0,
        corrupted: 0,
        stats_ok: true,
    };

    if path.is_dir() {
        let mut stack = vec![path.to_path_buf()];
        while let Some(d) = stack.pop() {
            let rd = match std::fs::read_dir(&d) {
                Ok(v) => v,
                Err(_) => continue,
            };
            for e in rd.filter_map(Result::ok) {
                let p = e.path();
                if p.is_dir() {
                    stack.push(p);
                } else if let Some(fname) = p.file_name().and_then(|f| f.to_str())
                    && (fname.ends_with(".jsonl") || fname.ends_with(".jsonl.zst"))
                {
                    match read_text_auto(&p.to_string_lossy()) {
                        Ok(content) => {
                            consume_stats_content(content, &mut state, err)?;
                        }
                        Err(_) => {
                            state.corrupted += 1;
                        }
                    }
                }
            }
        }
    } else {
        match read_text_auto(input) {
            Ok(s) => consume_stats_content(s, &mut state, err)?,
            Err(e) => {
                ui::write_error(err, &format!("Failed to read {}: {}", input, e))?;
                return Err(CliError::Config(format!("Failed to read {}: {}", input, e)));
            }
        }
    }

    if state.corrupted > 0 {
        ui::display_warning(
            err,
            &format!("Skipped {} corrupted record(s)", state.corrupted),
        )?;
    }
    if state.skipped > 0 {
        ui::display_warning(
            err,
            &format!("Discarded {} incomplete final line(s)", state.skipped),
        )?;
    }
    if !path.is_dir() && state.rounds == 0 && (state.corrupted > 0 || state.skipped > 0) {
        ui::write_error(err, "Invalid record")?;
        return Err(CliError::InvalidInput("Invalid record".to_string()));
    }

    let summary = serde_json::json!({
        "rounds": state.rounds,
        "winners": state.wins,
        "conditions": state.conditions,
        "total_pot": state.total_pot,
    });
    let json_output = serde_json::to_string_pretty(&summary)
        .map_err(|e| CliError::InvalidInput(format!("Failed to serialize stats: {}", e)))?;
    writeln!(out, "{}", json_output)?;
    if state.stats_ok {
        Ok(())
    } else {
        Err(CliError::InvalidInput(
            "Statistics validation failed".to_string(),
        ))
    }
}
