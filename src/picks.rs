use std::fs;
use std::mem::take;
use std::path::Path;

use anyhow::{Context, Result};

use crate::normalize::normalize;
use crate::state::PickRow;

/// Load the picks file. Unlike the fetched data, a failure here is fatal:
/// without picks there is nothing to score.
pub fn load_picks_file(path: &Path) -> Result<Vec<PickRow>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("couldn't read picks file {}", path.display()))?;
    parse_picks_csv(&raw)
}

pub fn parse_picks_csv(raw: &str) -> Result<Vec<PickRow>> {
    let rows = parse_rows(raw);
    let Some((header, data)) = rows.split_first() else {
        return Err(anyhow::anyhow!("picks file has no header row"));
    };

    // Column index per canonical slot; the first matching header wins.
    let mut columns: [Option<usize>; 5] = [None; 5];
    for (i, cell) in header.iter().enumerate() {
        if let Some(slot) = canonical_column(cell) {
            let slot = slot as usize;
            if columns[slot].is_none() {
                columns[slot] = Some(i);
            }
        }
    }

    let cell = |row: &[String], slot: PickColumn| -> String {
        columns[slot as usize]
            .and_then(|i| row.get(i))
            .map(|raw| clean_cell(raw))
            .unwrap_or_default()
    };

    Ok(data
        .iter()
        .map(|row| PickRow {
            entrant: cell(row, PickColumn::Entrant),
            team: cell(row, PickColumn::Team),
            forward1: cell(row, PickColumn::Forward1),
            forward2: cell(row, PickColumn::Forward2),
            defenceman: cell(row, PickColumn::Defenceman),
        })
        .collect())
}

#[derive(Debug, Clone, Copy)]
enum PickColumn {
    Entrant = 0,
    Team,
    Forward1,
    Forward2,
    Defenceman,
}

/// Header synonym table. Sheets in the wild label the entrant column
/// "Picks", "Name" or nothing at all, and spell "Defenceman" both ways.
fn canonical_column(header: &str) -> Option<PickColumn> {
    match normalize(header).as_str() {
        "picks" | "name" | "" => Some(PickColumn::Entrant),
        "team" => Some(PickColumn::Team),
        "forward 1" => Some(PickColumn::Forward1),
        "forward 2" => Some(PickColumn::Forward2),
        "defenceman" | "defenseman" => Some(PickColumn::Defenceman),
        _ => None,
    }
}

fn clean_cell(raw: &str) -> String {
    let trimmed = raw.trim();
    // Spreadsheet exports leave these behind for blank cells.
    if trimmed == "nan" || trimmed == "None" {
        return String::new();
    }
    trimmed.to_string()
}

/// Minimal CSV parser: quoted fields, doubled-quote escapes, CRLF tolerant.
/// Blank lines are dropped.
fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    let mut flush_row = |row: &mut Vec<String>, field: &mut String| {
        row.push(take(field));
        if row.len() > 1 || !row[0].is_empty() {
            rows.push(take(row));
        } else {
            row.clear();
        }
    };

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => row.push(take(&mut field)),
            '\r' | '\n' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                flush_row(&mut row, &mut field);
            }
            _ => field.push(ch),
        }
    }
    flush_row(&mut row, &mut field);

    rows
}
