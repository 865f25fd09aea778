//! Plain-text result file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::solver::OracleResult;

use super::estimate_permutations;

/// Default result file name for a generated instance.
///
/// # Examples
///
/// ```
/// assert_eq!(
///     u_tsp_oracle::report::result_file_name(10, 42),
///     "tsp_result_n10_seed42.txt"
/// );
/// ```
pub fn result_file_name(n: usize, seed: u64) -> String {
    format!("tsp_result_n{n}_seed{seed}.txt")
}

/// Formats a vertex order as `[0 3 1 2]`.
pub fn format_path(order: &[usize]) -> String {
    let items: Vec<String> = order.iter().map(usize::to_string).collect();
    format!("[{}]", items.join(" "))
}

/// Writes the result summary: seed, points, both lengths, improvement,
/// both paths, timing and counts.
pub fn write_text_report<W: Write>(out: &mut W, result: &OracleResult) -> Result<()> {
    match result.seed {
        Some(seed) => writeln!(out, "SEED: {seed}")?,
        None => writeln!(out, "SEED: none")?,
    }
    writeln!(out, "Points:")?;
    for (i, p) in result.points.iter().enumerate() {
        writeln!(out, "{i}: ({:.6}, {:.6})", p.x(), p.y())?;
    }
    writeln!(out, "Heuristic: {:.6}", result.heuristic.distance())?;
    writeln!(out, "Optimal: {:.6}", result.best.distance())?;
    writeln!(
        out,
        "Improvement: {:.6} ({:.3}%)",
        result.improvement(),
        result.improvement_percent()
    )?;
    writeln!(out, "Heuristic path: {}", format_path(result.heuristic.order()))?;
    writeln!(out, "Optimal path: {}", format_path(result.best.order()))?;
    writeln!(out, "Time: {:.2} seconds", result.elapsed.as_secs_f64())?;
    writeln!(out, "Paths checked: {}", result.tours_evaluated)?;
    writeln!(
        out,
        "Total paths: {}",
        estimate_permutations(result.best.len())
    )?;
    if result.cancelled() {
        writeln!(out, "Status: cancelled before completion")?;
    }
    Ok(())
}

/// Writes [`write_text_report`] output to `path`, replacing any file there.
pub fn save_text_report(path: &Path, result: &OracleResult) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_text_report(&mut out, result)?;
    out.flush()?;
    Ok(())
}
