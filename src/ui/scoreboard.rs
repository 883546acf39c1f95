use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::game::{self, GamePhase, GameSession};

/// Throw marks for a committed frame: `X` for a strike, `n /` for a
/// two-throw clear, `-` for a zero.
pub fn throw_marks(frame: &game::Frame) -> String {
    if frame.is_strike() {
        "X".to_string()
    } else if frame.is_spare() {
        format!("{} /", pin_mark(frame.throw1))
    } else {
        format!("{} {}", pin_mark(frame.throw1), pin_mark(frame.throw2))
    }
}

fn pin_mark(count: u8) -> String {
    if count == 0 {
        "-".to_string()
    } else {
        count.to_string()
    }
}

/// Running totals per slot; None once an empty slot is reached.
pub fn running_totals(frames: &[Option<game::Frame>]) -> Vec<Option<u32>> {
    let mut total = 0;
    let mut open = false;
    frames
        .iter()
        .map(|slot| match slot {
            Some(frame) if !open => {
                total += frame.score;
                Some(total)
            }
            _ => {
                open = true;
                None
            }
        })
        .collect()
}

/// Render the scoreboard table for the session's frames.
pub fn render(frame: &mut Frame, session: &GameSession, area: Rect) {
    let frames = session.frames();
    let current = session.current_frame_index();
    let in_play = session.phase().is_active_turn();
    let totals = running_totals(frames);

    let highlight = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut header = vec![Cell::from("Frame")];
    let mut marks = vec![Cell::from("Throws")];
    let mut scores = vec![Cell::from("Total")];

    for (i, slot) in frames.iter().enumerate() {
        let style = if in_play && i == current {
            highlight
        } else {
            Style::default()
        };
        header.push(Cell::from((i + 1).to_string()).style(style));

        let mark = match slot {
            Some(f) => throw_marks(f),
            None if in_play && i == current && session.throw_index() == 1 => {
                format!("{} _", pin_mark(session.pins_after_first_throw().len() as u8))
            }
            None => String::new(),
        };
        marks.push(Cell::from(mark).style(style));

        let total = totals[i].map(|t| t.to_string()).unwrap_or_default();
        scores.push(Cell::from(total).style(style));
    }

    let mut widths = vec![Constraint::Length(7)];
    widths.extend(frames.iter().map(|_| Constraint::Length(6)));

    let score_style = if session.phase() == GamePhase::GameOver {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let table = Table::new(
        vec![Row::new(marks), Row::new(scores).style(score_style)],
        widths,
    )
    .header(Row::new(header).style(Style::default().add_modifier(Modifier::BOLD)))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Scoreboard  |  {} pts", session.total_score())),
    );

    frame.render_widget(table, area);
}
