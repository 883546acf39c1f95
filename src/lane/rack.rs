//! Geometry of the lane and the triangular ten-pin rack, in lane units
//! (a 400 x 700 board with the ball starting near the bottom edge).

use crate::game::PIN_COUNT;

pub const LANE_WIDTH: f32 = 400.0;
pub const BALL_RADIUS: f32 = 14.0;
pub const PIN_RADIUS: f32 = 9.5;

/// Ball must stay between these x coordinates, outside is the gutter.
pub const PLAY_AREA_MIN_X: f32 = 80.0;
pub const PLAY_AREA_MAX_X: f32 = 320.0;

pub const BALL_START_Y: f32 = 620.0;
pub const PIN_START_Y: f32 = 150.0;
pub const PIN_SPACING_X: f32 = 30.0;
pub const PIN_SPACING_Y: f32 = 26.0;

/// Number of rows in the rack; row 0 holds the head pin.
pub const RACK_ROWS: usize = 4;

/// Position of one pin in the rack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinSpot {
    pub id: u8,
    pub row: usize,
    /// Index within the row, left to right
    pub slot: usize,
    pub x: f32,
    pub y: f32,
}

/// First pin id of `row`
fn row_start(row: usize) -> usize {
    row * (row + 1) / 2
}

/// Id of the pin at `slot` in `row`, if any
pub fn pin_at(row: usize, slot: usize) -> Option<u8> {
    if row < RACK_ROWS && slot <= row {
        Some((row_start(row) + slot) as u8)
    } else {
        None
    }
}

/// All ten pins, head pin first, rows left to right
pub fn rack() -> [PinSpot; PIN_COUNT] {
    let mut spots = [PinSpot {
        id: 0,
        row: 0,
        slot: 0,
        x: 0.0,
        y: 0.0,
    }; PIN_COUNT];

    for row in 0..RACK_ROWS {
        for slot in 0..=row {
            let id = row_start(row) + slot;
            spots[id] = PinSpot {
                id: id as u8,
                row,
                slot,
                x: LANE_WIDTH / 2.0 + (slot as f32 - row as f32 / 2.0) * PIN_SPACING_X,
                y: PIN_START_Y + (RACK_ROWS - 1 - row) as f32 * PIN_SPACING_Y,
            };
        }
    }
    spots
}

/// Map a ball position in percent onto the play area
pub fn ball_start_x(position_percent: f32) -> f32 {
    let t = position_percent.clamp(0.0, 100.0) / 100.0;
    PLAY_AREA_MIN_X + t * (PLAY_AREA_MAX_X - PLAY_AREA_MIN_X)
}
