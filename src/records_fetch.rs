use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::http_client::http_client;
use crate::normalize::{collapse_ws, first_int};
use crate::state::SkaterStat;

pub const DEFAULT_SKATER_URL: &str = "https://records.nhl.com/site/api/international-skater-tournament-record?cayenneExp=gameType=9%20and%20season=20252026&sort=[{%22property%22:%20%22points%22,%20%22direction%22:%20%22DESC%22},%20{%22property%22:%22goals%22,%22direction%22:%22DESC%22},%20{%22property%22:%22gamesPlayed%22,%20%22direction%22:%20%22ASC%22},%20{%22property%22:%22lastName%22,%22direction%22:%22ASC%22}]";
pub const DEFAULT_WINNER_URL: &str = "https://records.nhl.com/site/api/international-tournament-winner?&sort=[{%22property%22:%20%22season%22,%20%22direction%22:%20%22DESC%22}]&cayenneExp=gameType=9";
pub const DEFAULT_SEASON: &str = "20252026";

const GOLD_KEYS: &[&str] = &[
    "gold",
    "goldTeam",
    "goldCountry",
    "champion",
    "winner",
    "firstPlace",
    "team1",
    "teamFirst",
    "winnerTeamAbbrev",
];
const SILVER_KEYS: &[&str] = &[
    "silver",
    "silverTeam",
    "silverCountry",
    "runnerUp",
    "secondPlace",
    "team2",
    "teamSecond",
    "runnerUpTeamAbbrev",
];
const BRONZE_KEYS: &[&str] = &[
    "bronze",
    "bronzeTeam",
    "bronzeCountry",
    "thirdPlace",
    "team3",
    "teamThird",
    "thirdPlaceTeamAbbrev",
];

// A medal value can itself be a record; these sub-keys identify the team.
const TEAM_OBJECT_KEYS: &[&str] = &["teamAbbrev", "team", "country", "nation", "name", "abbrev"];

pub fn fetch_skater_stats(url: &str) -> Result<Vec<SkaterStat>> {
    let body = get_text(url)?;
    parse_skater_stats_json(&body)
}

pub fn fetch_medal_placements(url: &str, season: &str) -> Result<HashMap<String, u32>> {
    let body = get_text(url)?;
    parse_medal_placements_json(&body, season)
}

fn get_text(url: &str) -> Result<String> {
    let client = http_client()?;
    let resp = client.get(url).send().context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {}: {}", status, body));
    }
    Ok(body)
}

/// The records API wraps rows in one of several container keys.
#[derive(Debug, Default, Deserialize)]
struct RecordsEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    results: Option<Value>,
    #[serde(default)]
    items: Option<Value>,
}

impl RecordsEnvelope {
    /// First container candidate holding a non-empty array wins.
    fn rows(self) -> Vec<Value> {
        for candidate in [self.data, self.results, self.items] {
            if let Some(Value::Array(rows)) = candidate {
                if !rows.is_empty() {
                    return rows;
                }
            }
        }
        Vec::new()
    }
}

pub fn parse_skater_stats_json(raw: &str) -> Result<Vec<SkaterStat>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let envelope: RecordsEnvelope =
        serde_json::from_str(trimmed).context("invalid skater stats json")?;

    let mut out = Vec::new();
    for row in envelope.rows() {
        if !row.is_object() {
            continue;
        }
        let first = text_at(&row, "firstName");
        let last = text_at(&row, "lastName");
        let mut name = collapse_ws(&format!("{first} {last}"));
        if name.is_empty() {
            name = text_at(&row, "playerName");
        }
        if name.is_empty() {
            continue;
        }
        out.push(SkaterStat {
            name,
            team: pick_text(&row, &["teamAbbrev", "team", "nation"]),
            position: pick_text(&row, &["positionCode", "position"]),
            points: int_at(&row, "points"),
            goals: int_at(&row, "goals"),
            assists: int_at(&row, "assists"),
        });
    }
    Ok(out)
}

/// Medal placements for one season: normalized-for-display team name to
/// 1 (gold), 2 (silver) or 3 (bronze). Missing season or medals yield an
/// empty or partial map, never an error.
pub fn parse_medal_placements_json(raw: &str, season: &str) -> Result<HashMap<String, u32>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(HashMap::new());
    }
    let envelope: RecordsEnvelope =
        serde_json::from_str(trimmed).context("invalid tournament winner json")?;

    let season = season.trim();
    let mut target = None;
    for row in envelope.rows() {
        if !row.is_object() {
            continue;
        }
        // Seasons are compared as strings; the API flips between "20252026"
        // and 20252026 across records.
        if pick_text(&row, &["season", "seasonId", "seasonID"]) == season {
            target = Some(row);
            break;
        }
    }
    let Some(target) = target else {
        return Ok(HashMap::new());
    };

    let mut out = HashMap::new();
    for (keys, place) in [(GOLD_KEYS, 1u32), (SILVER_KEYS, 2), (BRONZE_KEYS, 3)] {
        if let Some(team) = medal_team(&target, keys) {
            out.insert(team, place);
        }
    }
    Ok(out)
}

fn medal_team(row: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        let Some(value) = row.get(*key) else {
            continue;
        };
        if let Some(map) = value.as_object() {
            for sub in TEAM_OBJECT_KEYS {
                if let Some(team) = map.get(*sub).and_then(as_text) {
                    if !team.is_empty() {
                        return Some(team);
                    }
                }
            }
            continue;
        }
        if let Some(team) = as_text(value) {
            if !team.is_empty() {
                return Some(team);
            }
        }
    }
    None
}

fn pick_text(row: &Value, keys: &[&str]) -> String {
    for key in keys {
        let text = text_at(row, key);
        if !text.is_empty() {
            return text;
        }
    }
    String::new()
}

fn text_at(row: &Value, key: &str) -> String {
    row.get(key).and_then(as_text).unwrap_or_default()
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(collapse_ws(s)),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn int_at(row: &Value, key: &str) -> i64 {
    match row.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => first_int(s).unwrap_or(0),
        Some(Value::Bool(b)) => *b as i64,
        Some(other) => first_int(&other.to_string()).unwrap_or(0),
        None => 0,
    }
}
