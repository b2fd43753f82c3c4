use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use crate::state::LeaderboardRow;

pub const EXPORT_COLUMNS: &[&str] = &[
    "Entrant",
    "Team",
    "TeamPlace",
    "TeamPts",
    "Forward1",
    "F1_Rank",
    "Forward2",
    "F2_Rank",
    "Defenceman",
    "D_Rank",
    "Total",
];

/// Write the current leaderboard to a timestamped CSV in the working
/// directory and return its path.
pub fn export_leaderboard(rows: &[LeaderboardRow]) -> Result<PathBuf> {
    let path = PathBuf::from(format!(
        "leaderboard_{}.csv",
        Local::now().format("%Y%m%d_%H%M%S")
    ));
    write_leaderboard_csv(rows, &path)?;
    Ok(path)
}

pub fn write_leaderboard_csv(rows: &[LeaderboardRow], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("couldn't create export file {}", path.display()))?;
    let mut out = BufWriter::new(file);

    write_row(&mut out, EXPORT_COLUMNS.iter().map(|c| c.to_string()))?;
    for row in rows {
        write_row(
            &mut out,
            [
                row.entrant.clone(),
                row.team.clone(),
                row.team_place.to_string(),
                row.team_pts.to_string(),
                row.forward1.clone(),
                row.f1_rank.to_string(),
                row.forward2.clone(),
                row.f2_rank.to_string(),
                row.defenceman.clone(),
                row.d_rank.to_string(),
                row.total.to_string(),
            ]
            .into_iter(),
        )?;
    }
    out.flush().context("couldn't flush export file")?;
    Ok(())
}

fn write_row<W: Write>(out: &mut W, cells: impl Iterator<Item = String>) -> Result<()> {
    let line = cells.map(|cell| escape(&cell)).collect::<Vec<_>>().join(",");
    writeln!(out, "{line}").context("couldn't write export row")?;
    Ok(())
}

fn escape(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
