use std::io::Stdout;
use tui::backend::CrosstermBackend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::App;
use cfl_api::{Game, GameState};
use chrono::Local;

const LOG_PANE_HEIGHT: u16 = 8;
const HELP: &str = "q=quit  n=next game  r=refresh  l=logs";

pub fn draw(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &App) -> std::io::Result<()> {
    terminal.draw(|f| {
        let log_height = if app.show_logs { LOG_PANE_HEIGHT } else { 0 };
        let [header, main, logs, help] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(log_height),
            Constraint::Length(1),
        ])
        .areas(f.area());

        draw_header(f, header, app);
        draw_game(f, main, app);
        if app.show_logs {
            f.render_widget(
                TuiLoggerWidget::default().block(default_border(Color::DarkGray).title(" Log ")),
                logs,
            );
        }
        f.render_widget(
            Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray)),
            help,
        );
    })?;
    Ok(())
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let state = app.controller.state();
    let season = match state.season() {
        Some(s) if s.preseason => format!("{} Preseason · Week {}", s.year, s.week),
        Some(s) => format!("{} Season · Week {}", s.year, s.week),
        None => "Season unknown".to_owned(),
    };

    let mut spans = vec![
        Span::styled(" CFL Scoreboard ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(" {season}")),
    ];
    if !state.games().is_empty() {
        spans.push(Span::raw(format!(
            "  ·  Game {}/{}",
            state.current_game_index() + 1,
            state.games().len()
        )));
    }
    if state.network_issues() {
        spans.push(Span::styled(
            "  ! network issues",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).block(default_border(Color::White)),
        area,
    );
}

fn draw_game(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::Gray);
    let Some(game) = app.controller.current_game() else {
        let message = if app.controller.state().needs_refresh() {
            "Loading games..."
        } else {
            "No games this week."
        };
        f.render_widget(
            Paragraph::new(message).alignment(Alignment::Center).block(block),
            area,
        );
        return;
    };

    let preferred = &app.controller.config().preferred_teams;
    let team_line = |abbrev: &str, score: u16| {
        let style = if preferred.iter().any(|t| t == abbrev) {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let score = if game.state == GameState::Scheduled {
            String::new()
        } else {
            score.to_string()
        };
        Line::from(vec![
            Span::styled(format!("{abbrev:<5}"), style),
            Span::styled(format!("{score:>4}"), style),
        ])
    };

    let mut lines = vec![
        Line::raw(""),
        team_line(&game.away_team_abbrev, game.away_score),
        team_line(&game.home_team_abbrev, game.home_score),
        Line::raw(""),
        Line::styled(status_text(game), status_style(game)),
    ];
    if app.controller.showing_preferred_game() {
        lines.push(Line::styled(
            "Tracking preferred team",
            Style::default().fg(Color::Yellow),
        ));
    }

    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}

fn status_text(game: &Game) -> String {
    match game.state {
        GameState::InProgress if game.is_halftime() => "Halftime".to_owned(),
        GameState::InProgress => {
            format!("Q{} {}:{:02}", game.quarter, game.minutes, game.seconds)
        }
        GameState::Scheduled => game
            .date
            .map(|d| d.with_timezone(&Local).format("%a %b %-d, %-I:%M %p").to_string())
            .unwrap_or_else(|| "TBD".to_owned()),
        other => other.label().to_owned(),
    }
}

fn status_style(game: &Game) -> Style {
    match game.state {
        GameState::InProgress => Style::default().fg(Color::Green),
        GameState::Final => Style::default().fg(Color::Gray),
        GameState::Postponed | GameState::Cancelled => Style::default().fg(Color::Red),
        GameState::Scheduled => Style::default(),
    }
}
