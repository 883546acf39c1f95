use crate::game::PinSet;
use crate::lane::rack::{self, PIN_SPACING_X, RACK_ROWS};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Character cells across the play area in the ball track.
const TRACK_WIDTH: usize = 25;

/// Column (in pin slots from the left edge of the back row) of each pin.
fn pin_column(spot: &rack::PinSpot) -> usize {
    let back_row_left = rack::LANE_WIDTH / 2.0 - (RACK_ROWS - 1) as f32 / 2.0 * PIN_SPACING_X;
    ((spot.x - back_row_left) / (PIN_SPACING_X / 2.0)).round() as usize
}

/// Rack rows back to front as text, `●` standing and `·` down.
pub fn rack_lines(downed: &PinSet) -> Vec<Line<'static>> {
    let spots = rack::rack();
    let width = 2 * (RACK_ROWS - 1) + 1;

    (0..RACK_ROWS)
        .rev()
        .map(|row| {
            let mut cells = vec![Span::raw(" "); width];
            for spot in spots.iter().filter(|s| s.row == row) {
                let span = if downed.contains(spot.id) {
                    Span::styled("·", Style::default().fg(Color::DarkGray))
                } else {
                    Span::styled(
                        "●",
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    )
                };
                cells[pin_column(spot)] = span;
            }
            Line::from(cells)
        })
        .collect()
}

/// Ball start marker across the play area
fn track_line(ball_position: f32) -> Line<'static> {
    let slot = ((ball_position.clamp(0.0, 100.0) / 100.0) * (TRACK_WIDTH - 1) as f32).round() as usize;
    let mut spans = vec![Span::styled("|", Style::default().fg(Color::Red))];
    for i in 0..TRACK_WIDTH {
        if i == slot {
            spans.push(Span::styled("O", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)));
        } else {
            spans.push(Span::raw("-"));
        }
    }
    spans.push(Span::styled("|", Style::default().fg(Color::Red)));
    Line::from(spans)
}

/// Render the pin deck and the ball track.
pub fn render(
    frame: &mut Frame,
    downed: &PinSet,
    ball_position: f32,
    rolling: Option<f32>,
    area: Rect,
) {
    let mut lines = vec![Line::from("")];
    lines.extend(rack_lines(downed));
    lines.push(Line::from(""));

    let lane_rows = 6;
    let ball_row = rolling.map(|progress| ((1.0 - progress.clamp(0.0, 1.0)) * (lane_rows - 1) as f32) as usize);
    for row in 0..lane_rows {
        if ball_row == Some(row) {
            lines.push(Line::from(Span::styled("O", Style::default().fg(Color::Cyan))));
        } else {
            lines.push(Line::from(Span::styled(":", Style::default().fg(Color::DarkGray))));
        }
    }

    lines.push(track_line(ball_position));
    lines.push(Line::from(format!("{} / 10 down", downed.len())));

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Lane"));
    frame.render_widget(widget, area);
}
