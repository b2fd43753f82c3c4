use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use oly26_terminal::config::PoolConfig;
use oly26_terminal::export::export_leaderboard;
use oly26_terminal::picks::load_picks_file;
use oly26_terminal::records_fetch::{fetch_medal_placements, fetch_skater_stats};
use oly26_terminal::state::{AppState, PlacementField, Screen};

struct App {
    state: AppState,
    config: PoolConfig,
    should_quit: bool,
}

impl App {
    fn new(state: AppState, config: PoolConfig) -> Self {
        Self {
            state,
            config,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.placement_edit.is_some() {
            match key.code {
                KeyCode::Enter => self.state.commit_placement_edit(),
                KeyCode::Esc => self.state.cancel_placement_edit(),
                KeyCode::Tab => self.state.switch_placement_edit_field(),
                KeyCode::Backspace => self.state.edit_backspace(),
                KeyCode::Char(c) => self.state.edit_push_char(c),
                _ => {}
            }
            return;
        }

        let on_placements = self.state.screen == Screen::Placements;
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.screen = Screen::Leaderboard,
            KeyCode::Char('2') => self.state.screen = Screen::Placements,
            KeyCode::Char('r') | KeyCode::Char('R') => self.refresh(),
            KeyCode::Char('e') | KeyCode::Char('E') => self.export(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('a') if on_placements => self.state.add_placement_row(),
            KeyCode::Char('x') | KeyCode::Delete if on_placements => {
                self.state.delete_placement_row()
            }
            KeyCode::Enter | KeyCode::Char('i') if on_placements => {
                self.state.start_placement_edit(PlacementField::Team)
            }
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    /// One best-effort pass over both endpoints. Failures degrade to empty
    /// results so the leaderboard still renders with zeros.
    fn refresh(&mut self) {
        self.state.push_log("[INFO] Fetching skater stats and medal placements");

        let stats = match fetch_skater_stats(&self.config.skater_url) {
            Ok(stats) => stats,
            Err(err) => {
                self.state.push_log(format!("[WARN] Skater stats fetch failed: {err:#}"));
                Vec::new()
            }
        };
        let placements = match fetch_medal_placements(&self.config.winner_url, &self.config.season)
        {
            Ok(placements) => placements,
            Err(err) => {
                self.state.push_log(format!("[WARN] Placement fetch failed: {err:#}"));
                HashMap::new()
            }
        };

        self.state.push_log(format!(
            "[INFO] Loaded {} skater rows, {} medal teams",
            stats.len(),
            placements.len()
        ));
        self.state.apply_fetch(stats, placements);
    }

    fn export(&mut self) {
        let rows = self.state.leaderboard();
        match export_leaderboard(&rows) {
            Ok(path) => self
                .state
                .push_log(format!("[INFO] Exported leaderboard to {}", path.display())),
            Err(err) => self.state.push_log(format!("[WARN] Export failed: {err:#}")),
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = PoolConfig::from_env();
    // The picks file is the one input whose absence blocks everything;
    // fail here, before the terminal is taken over.
    let picks = load_picks_file(&config.picks_path).context("couldn't load picks CSV")?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(AppState::new(picks), config);
    app.refresh();
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(app)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Leaderboard => render_leaderboard(frame, chunks[1], &app.state),
        Screen::Placements => render_placements(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(app: &App) -> String {
    let refreshed = app
        .state
        .last_refresh
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());
    let screen = match app.state.screen {
        Screen::Leaderboard => "LEADERBOARD",
        Screen::Placements => "PLACEMENTS",
    };
    let title = format!(
        "OLY26 POOL | {} | Season {} | {} entrants | Refreshed {}",
        screen,
        app.config.season,
        app.state.picks.len(),
        refreshed
    );
    let line1 = format!("  ,-.  {title}");
    let line2 = " (   )".to_string();
    let line3 = "  `-'".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    if state.placement_edit.is_some() {
        return "Type to edit | Tab Switch cell | Enter Commit | Esc Cancel".to_string();
    }
    match state.screen {
        Screen::Leaderboard => {
            "1 Leaderboard | 2 Placements | j/k/↑/↓ Move | r Refresh | e Export | ? Help | q Quit"
                .to_string()
        }
        Screen::Placements => {
            "1 Leaderboard | 2 Placements | j/k Move | Enter/i Edit | a Add | x Delete | r Refresh | ? Help | q Quit"
                .to_string()
        }
    }
}

fn leaderboard_columns() -> [Constraint; 11] {
    [
        Constraint::Min(14),   // Entrant
        Constraint::Length(9), // Team
        Constraint::Length(6), // Place
        Constraint::Length(8), // TeamPts
        Constraint::Min(15),   // Forward 1
        Constraint::Length(6), // F1 Rk
        Constraint::Min(15),   // Forward 2
        Constraint::Length(6), // F2 Rk
        Constraint::Min(15),   // Defenceman
        Constraint::Length(6), // D Rk
        Constraint::Length(6), // Total
    ]
}

fn render_leaderboard(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = leaderboard_columns();
    let header_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(sections[0]);
    let header_style = Style::default().add_modifier(Modifier::BOLD);
    let titles = [
        "Entrant",
        "Team",
        "Place",
        "TeamPts",
        "Forward 1",
        "F1 Rk",
        "Forward 2",
        "F2 Rk",
        "Defenceman",
        "D Rk",
        "Total",
    ];
    for (i, title) in titles.iter().enumerate() {
        render_cell_text(frame, header_cols[i], title, header_style);
    }

    let list_area = sections[1];
    let rows = state.leaderboard();
    if rows.is_empty() {
        let empty =
            Paragraph::new("No picks loaded").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }
    if list_area.height == 0 {
        return;
    }

    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.selected.min(rows.len() - 1), rows.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };

        let selected = idx == state.selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let row = &rows[idx];
        render_cell_text(frame, cols[0], &row.entrant, row_style);
        render_cell_text(frame, cols[1], &row.team, row_style);
        render_cell_text(frame, cols[2], &row.team_place.to_string(), row_style);
        render_cell_text(frame, cols[3], &row.team_pts.to_string(), row_style);
        render_cell_text(frame, cols[4], &row.forward1, row_style);
        render_cell_text(frame, cols[5], &row.f1_rank.to_string(), row_style);
        render_cell_text(frame, cols[6], &row.forward2, row_style);
        render_cell_text(frame, cols[7], &row.f2_rank.to_string(), row_style);
        render_cell_text(frame, cols[8], &row.defenceman, row_style);
        render_cell_text(frame, cols[9], &row.d_rank.to_string(), row_style);
        render_cell_text(frame, cols[10], &row.total.to_string(), row_style);
    }
}

fn placement_columns() -> [Constraint; 2] {
    [Constraint::Min(24), Constraint::Length(12)]
}

fn render_placements(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = placement_columns();
    let header_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(sections[0]);
    let header_style = Style::default().add_modifier(Modifier::BOLD);
    render_cell_text(frame, header_cols[0], "Team", header_style);
    render_cell_text(frame, header_cols[1], "Placement", header_style);

    let list_area = sections[1];
    if list_area.height == 0 {
        return;
    }

    let visible = list_area.height as usize;
    let total = state.placement_rows.len();
    let (start, end) = visible_range(state.placement_selected.min(total.saturating_sub(1)), total, visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };

        let selected = idx == state.placement_selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let row = &state.placement_rows[idx];
        let edit = state
            .placement_edit
            .as_ref()
            .filter(|_| selected);
        let edit_style = row_style.fg(Color::Yellow);

        match edit {
            Some(e) if e.field == PlacementField::Team => {
                render_cell_text(frame, cols[0], &format!("{}_", e.buffer), edit_style);
                render_cell_text(frame, cols[1], &row.placement, row_style);
            }
            Some(e) => {
                render_cell_text(frame, cols[0], &row.team, row_style);
                render_cell_text(frame, cols[1], &format!("{}_", e.buffer), edit_style);
            }
            None => {
                render_cell_text(frame, cols[0], &row.team, row_style);
                render_cell_text(frame, cols[1], &row.placement, row_style);
            }
        }
    }
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, area);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "OLY26 Pool Terminal - Help",
        "",
        "Global:",
        "  1            Leaderboard",
        "  2            Placements",
        "  r            Refresh from NHL records",
        "  e            Export leaderboard CSV",
        "  j/k or ↑/↓   Move",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Placements:",
        "  Enter / i    Edit team cell",
        "  Tab          Switch cell while editing",
        "  a            Add row",
        "  x / Del      Delete row",
        "  Esc          Cancel edit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
