//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Tabs},
    Frame,
};

use crate::core::{format_hms, Clock, TimeLogSink};
use crate::features::timer::TimerMode;
use crate::tui::app::App;
use crate::tui::event::HELP;

const MODES: [TimerMode; 3] = [
    TimerMode::Pomodoro,
    TimerMode::ShortBreak,
    TimerMode::LongBreak,
];

/// Accent color for a mode.
const fn mode_color(mode: TimerMode) -> Color {
    match mode {
        TimerMode::Pomodoro => Color::Red,
        TimerMode::ShortBreak => Color::Green,
        TimerMode::LongBreak => Color::Blue,
    }
}

/// Render the application UI.
pub fn render<C: Clock, S: TimeLogSink>(frame: &mut Frame<'_>, app: &App<C, S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Mode tabs
            Constraint::Length(5), // Countdown
            Constraint::Length(3), // Progress
            Constraint::Min(0),    // Session details
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0]);
    render_countdown(frame, app, chunks[1]);
    render_progress(frame, app, chunks[2]);
    render_details(frame, app, chunks[3]);
    render_status_bar(frame, app, chunks[4]);
}

fn render_tabs<C: Clock, S: TimeLogSink>(frame: &mut Frame<'_>, app: &App<C, S>, area: Rect) {
    let mode = app.session.mode();
    let selected = MODES.iter().position(|m| *m == mode).unwrap_or_default();

    let tabs = Tabs::new(MODES.iter().map(|m| m.display_name()))
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(mode_color(mode))
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .title(" quickdev ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(tabs, area);
}

fn render_countdown<C: Clock, S: TimeLogSink>(frame: &mut Frame<'_>, app: &App<C, S>, area: Rect) {
    let mode = app.session.mode();
    let state = if app.session.is_running() {
        Span::styled("running", Style::default().fg(Color::Green))
    } else {
        Span::styled("paused", Style::default().fg(Color::Yellow))
    };

    let lines = vec![
        Line::from(Span::styled(
            app.session.formatted_time_remaining(),
            Style::default()
                .fg(mode_color(mode))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(state),
    ];

    let countdown = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(countdown, area);
}

fn render_progress<C: Clock, S: TimeLogSink>(frame: &mut Frame<'_>, app: &App<C, S>, area: Rect) {
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(mode_color(app.session.mode())))
        .ratio(app.session.progress().clamp(0.0, 1.0));

    frame.render_widget(gauge, area);
}

fn render_details<C: Clock, S: TimeLogSink>(frame: &mut Frame<'_>, app: &App<C, S>, area: Rect) {
    let label = Style::default().fg(Color::DarkGray);
    let none = || Span::styled("none", Style::default().fg(Color::DarkGray));

    let project = app.selected_project().map_or_else(none, |p| {
        Span::styled(p.name.clone(), Style::default().add_modifier(Modifier::BOLD))
    });
    let task = app
        .selected_task()
        .map_or_else(none, |t| Span::raw(t.title.clone()));
    let logged: u64 = app
        .logged
        .iter()
        .map(|l| u64::from(l.duration_seconds))
        .sum();

    let mut lines = vec![
        Line::from(vec![Span::styled("Project:   ", label), project]),
        Line::from(vec![Span::styled("Task:      ", label), task]),
        Line::from(vec![
            Span::styled("Session:   ", label),
            Span::raw(app.session.formatted_elapsed()),
        ]),
        Line::from(vec![
            Span::styled("Pomodoros: ", label),
            Span::raw(app.session.completed_pomodoros().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Logged:    ", label),
            Span::raw(format!("{} ({} entries)", format_hms(logged), app.logged.len())),
        ]),
    ];

    let notes = &app.session.attribution().notes;
    if !notes.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Notes:     ", label),
            Span::raw(notes.clone()),
        ]));
    }

    let details = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(details, area);
}

fn render_status_bar<C: Clock, S: TimeLogSink>(frame: &mut Frame<'_>, app: &App<C, S>, area: Rect) {
    let status_text = app.status.as_deref().unwrap_or(HELP);
    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
