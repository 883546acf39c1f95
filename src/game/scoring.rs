//! Pure conversion of reported pinfall into frame results.
//!
//! The lane reports every pin that is currently down, so a second throw is
//! scored against the full lane state and the first throw's pins are
//! subtracted to recover the pins it felled on its own.

use super::pins::{PinSet, PIN_COUNT};
use crate::error::GameError;

/// Points added to a frame that ends with the whole rack down.
pub const CLEAR_BONUS: u32 = 2;

/// Committed values of a closed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameScore {
    pub throw1: u8,
    pub throw2: u8,
    pub score: u32,
}

/// Result of resolving a single throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrowOutcome {
    /// First throw left pins standing; the frame continues.
    Open { pins_down: PinSet },
    /// The frame is over and can be committed.
    Closed(FrameScore),
}

/// Score for a frame with `pins_down` total pins: the pin count, plus the
/// bonus when the rack is cleared.
pub fn frame_score(pins_down: usize) -> u32 {
    let base = pins_down as u32;
    if pins_down == PIN_COUNT {
        base + CLEAR_BONUS
    } else {
        base
    }
}

/// Resolve a throw.
///
/// `throw_index` is 0 or 1, `first_throw` is what was down after throw 0 and
/// `downed` is the full set of pins down on the lane now.
pub fn resolve_throw(
    throw_index: usize,
    first_throw: &PinSet,
    downed: &PinSet,
) -> Result<ThrowOutcome, GameError> {
    match throw_index {
        0 => {
            if downed.is_full_rack() {
                Ok(ThrowOutcome::Closed(FrameScore {
                    throw1: PIN_COUNT as u8,
                    throw2: 0,
                    score: frame_score(PIN_COUNT),
                }))
            } else {
                Ok(ThrowOutcome::Open { pins_down: *downed })
            }
        }
        1 => {
            if !downed.is_superset(first_throw) {
                return Err(GameError::invalid_input(format!(
                    "second-throw report {:?} is missing pins already down after the first throw {:?}",
                    downed.to_vec(),
                    first_throw.to_vec()
                )));
            }
            let total = downed.len();
            let throw1 = first_throw.len();
            Ok(ThrowOutcome::Closed(FrameScore {
                throw1: throw1 as u8,
                throw2: (total - throw1) as u8,
                score: frame_score(total),
            }))
        }
        other => Err(GameError::invalid_input(format!(
            "throw index {other} is outside a two-throw frame"
        ))),
    }
}
