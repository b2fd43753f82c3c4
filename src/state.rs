use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Local};

use crate::scoring;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkaterStat {
    pub name: String,
    pub team: String,
    pub position: String,
    pub points: i64,
    pub goals: i64,
    pub assists: i64,
}

/// One pool entry as read from the picks file. All slots may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickRow {
    pub entrant: String,
    pub team: String,
    pub forward1: String,
    pub forward2: String,
    pub defenceman: String,
}

/// One row of the editable placement grid. Free-form strings; validation
/// happens when the grid is folded into the placement map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementRow {
    pub team: String,
    pub placement: String,
}

/// Derived scoring output, recomputed on every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub entrant: String,
    pub team: String,
    pub team_place: u32,
    pub team_pts: u32,
    pub forward1: String,
    pub f1_rank: u32,
    pub forward2: String,
    pub f2_rank: u32,
    pub defenceman: String,
    pub d_rank: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Leaderboard,
    Placements,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementField {
    Team,
    Placement,
}

#[derive(Debug, Clone)]
pub struct PlacementEdit {
    pub field: PlacementField,
    pub buffer: String,
}

pub struct AppState {
    pub screen: Screen,
    pub picks: Vec<PickRow>,
    pub skater_stats: Vec<SkaterStat>,
    pub placement_rows: Vec<PlacementRow>,
    pub selected: usize,
    pub placement_selected: usize,
    pub placement_edit: Option<PlacementEdit>,
    pub help_overlay: bool,
    pub last_refresh: Option<DateTime<Local>>,
    pub logs: VecDeque<String>,
}

impl AppState {
    pub fn new(picks: Vec<PickRow>) -> Self {
        Self {
            screen: Screen::Leaderboard,
            picks,
            skater_stats: Vec::new(),
            placement_rows: vec![PlacementRow::default()],
            selected: 0,
            placement_selected: 0,
            placement_edit: None,
            help_overlay: false,
            last_refresh: None,
            logs: VecDeque::new(),
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    /// Replace the session-cached fetch results and rebuild the placement
    /// grid prefill. Manual placement edits do not survive a refresh; that
    /// is the invalidation trigger for the whole fetched dataset.
    pub fn apply_fetch(&mut self, stats: Vec<SkaterStat>, placements: HashMap<String, u32>) {
        self.skater_stats = stats;

        let mut rows: Vec<PlacementRow> = placements
            .into_iter()
            .map(|(team, place)| PlacementRow {
                team,
                placement: place.to_string(),
            })
            .collect();
        rows.sort_by(|a, b| {
            let pa = a.placement.parse::<u32>().unwrap_or(u32::MAX);
            let pb = b.placement.parse::<u32>().unwrap_or(u32::MAX);
            pa.cmp(&pb).then_with(|| a.team.cmp(&b.team))
        });
        if rows.is_empty() {
            rows.push(PlacementRow::default());
        }
        self.placement_rows = rows;
        self.placement_selected = 0;
        self.placement_edit = None;
        self.last_refresh = Some(Local::now());
    }

    /// Fold the editable grid into the placement mapping. Only rows with a
    /// non-empty team and an all-digit placement are accepted.
    pub fn placement_map(&self) -> HashMap<String, u32> {
        let mut out = HashMap::new();
        for row in &self.placement_rows {
            let team = row.team.trim();
            let placement = row.placement.trim();
            if team.is_empty() || placement.is_empty() {
                continue;
            }
            if !placement.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            let Ok(place) = placement.parse::<u32>() else {
                continue;
            };
            out.insert(team.to_string(), place);
        }
        out
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardRow> {
        scoring::build_leaderboard(&self.picks, &self.skater_stats, &self.placement_map())
    }

    pub fn select_next(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        let cursor = self.cursor_mut();
        *cursor = (*cursor + 1).min(len - 1);
    }

    pub fn select_prev(&mut self) {
        let cursor = self.cursor_mut();
        *cursor = cursor.saturating_sub(1);
    }

    fn visible_len(&self) -> usize {
        match self.screen {
            Screen::Leaderboard => self.picks.len(),
            Screen::Placements => self.placement_rows.len(),
        }
    }

    fn cursor_mut(&mut self) -> &mut usize {
        match self.screen {
            Screen::Leaderboard => &mut self.selected,
            Screen::Placements => &mut self.placement_selected,
        }
    }

    pub fn add_placement_row(&mut self) {
        self.placement_rows.push(PlacementRow::default());
        self.placement_selected = self.placement_rows.len() - 1;
    }

    pub fn delete_placement_row(&mut self) {
        if self.placement_selected < self.placement_rows.len() {
            self.placement_rows.remove(self.placement_selected);
        }
        if self.placement_rows.is_empty() {
            self.placement_rows.push(PlacementRow::default());
        }
        self.placement_selected = self.placement_selected.min(self.placement_rows.len() - 1);
    }

    pub fn start_placement_edit(&mut self, field: PlacementField) {
        let Some(row) = self.placement_rows.get(self.placement_selected) else {
            return;
        };
        let buffer = match field {
            PlacementField::Team => row.team.clone(),
            PlacementField::Placement => row.placement.clone(),
        };
        self.placement_edit = Some(PlacementEdit { field, buffer });
    }

    pub fn commit_placement_edit(&mut self) {
        let Some(edit) = self.placement_edit.take() else {
            return;
        };
        let Some(row) = self.placement_rows.get_mut(self.placement_selected) else {
            return;
        };
        match edit.field {
            PlacementField::Team => row.team = edit.buffer,
            PlacementField::Placement => row.placement = edit.buffer,
        }
    }

    pub fn cancel_placement_edit(&mut self) {
        self.placement_edit = None;
    }

    /// Commit the current cell and move the editor to the other one.
    pub fn switch_placement_edit_field(&mut self) {
        let Some(edit) = self.placement_edit.as_ref() else {
            return;
        };
        let next = match edit.field {
            PlacementField::Team => PlacementField::Placement,
            PlacementField::Placement => PlacementField::Team,
        };
        self.commit_placement_edit();
        self.start_placement_edit(next);
    }

    pub fn edit_push_char(&mut self, c: char) {
        if let Some(edit) = self.placement_edit.as_mut() {
            edit.buffer.push(c);
        }
    }

    pub fn edit_backspace(&mut self) {
        if let Some(edit) = self.placement_edit.as_mut() {
            edit.buffer.pop();
        }
    }
}
