use crate::game::{GamePhase, GameSession, PinSet};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use super::{lane_widget, scoreboard};

/// Everything the game screen shows, borrowed from the app for one draw.
pub struct GameView<'a> {
    pub session: &'a GameSession,
    pub downed: PinSet,
    pub power: f32,
    pub max_power: f32,
    pub angle: f32,
    /// Roll progress in [0, 1] while the ball is rolling
    pub rolling: Option<f32>,
    pub message: Option<&'a str>,
}

pub fn render(frame: &mut Frame, view: &GameView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(16),   // Lane + side panel
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, view.session, chunks[0]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(30)])
        .split(chunks[1]);

    lane_widget::render(
        frame,
        &view.downed,
        view.session.ball_position(),
        view.rolling,
        main[0],
    );
    render_side_panel(frame, view, main[1]);
    render_message(frame, view.message, chunks[2]);
    render_controls(frame, view.session.phase(), chunks[3]);
}

fn render_header(frame: &mut Frame, session: &GameSession, area: Rect) {
    let phase = session.phase();
    let status = if phase.is_active_turn() {
        format!(
            "Frame {}/{}  |  Throw {}/{}  |  {}",
            session.current_frame_index() + 1,
            session.config().max_frames,
            session.throw_index() + 1,
            session.config().max_throws_per_frame,
            phase
        )
    } else {
        phase.to_string()
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Bowling Arcade"),
        );

    frame.render_widget(header, area);
}

fn render_side_panel(frame: &mut Frame, view: &GameView, area: Rect) {
    let phase = view.session.phase();
    if phase == GamePhase::StartScreen {
        render_start_screen(frame, view.session, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(6)])
        .split(area);

    scoreboard::render(frame, view.session, rows[0]);

    if phase == GamePhase::GameOver {
        render_game_over(frame, view.session, rows[1]);
    } else {
        render_throw_panel(frame, view, rows[1]);
    }
}

fn render_start_screen(frame: &mut Frame, session: &GameSession, area: Rect) {
    let config = session.config();
    let lines = vec![
        Line::from(Span::styled(
            "Ready to Roll?",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("* {} frames per game", config.max_frames)),
        Line::from(format!("* {} throws per frame", config.max_throws_per_frame)),
        Line::from(vec![
            Span::raw("* Clear all pins for "),
            Span::styled("+2 bonus points!", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
        Line::from("Press Enter to start"),
    ];

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Start"));
    frame.render_widget(widget, area);
}

fn render_game_over(frame: &mut Frame, session: &GameSession, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Game Over!",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Final Score"),
        Line::from(Span::styled(
            session.total_score().to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Press Enter or R to play again"),
    ];

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn render_throw_panel(frame: &mut Frame, view: &GameView, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Power gauge
            Constraint::Length(3), // Angle
            Constraint::Min(0),
        ])
        .split(area);

    let adjusting = view.session.phase() == GamePhase::PowerAngle;
    let accent = if adjusting { Color::Cyan } else { Color::DarkGray };

    let ratio = if view.max_power > 0.0 {
        (view.power / view.max_power).clamp(0.0, 1.0) as f64
    } else {
        0.0
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Power"))
        .gauge_style(Style::default().fg(accent))
        .ratio(ratio)
        .label(format!("{:.0}", view.power));
    frame.render_widget(gauge, rows[0]);

    let angle = Paragraph::new(format!("{:+.1}°", view.angle))
        .style(Style::default().fg(accent))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Angle"));
    frame.render_widget(angle, rows[1]);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn controls_hint(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::StartScreen => "Enter: Start  |  Q: Quit",
        GamePhase::Aiming => "←/→: Position  |  Enter: Confirm aim  |  R: Restart  |  Q: Quit",
        GamePhase::PowerAngle => "↑/↓: Power  |  ←/→: Angle  |  Space: Throw  |  R: Restart  |  Q: Quit",
        GamePhase::Rolling | GamePhase::TurnEnd => "Rolling...  |  R: Restart  |  Q: Quit",
        GamePhase::GameOver => "Enter/R: Play again  |  Q: Quit",
    }
}

fn render_controls(frame: &mut Frame, phase: GamePhase, area: Rect) {
    let controls = Paragraph::new(controls_hint(phase))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
