//! The lane collaborator: re-racks on reset tokens and reports the pins that
//! are down after each roll. Reports are cumulative over a frame.

pub mod rack;
mod simple;

pub use simple::SimpleLane;

use crate::game::{PinSet, ResetToken, ThrowParams};

/// Interface the session expects from a lane.
pub trait Lane {
    /// Stand all ten pins back up.
    fn reset(&mut self, token: ResetToken);

    /// Roll a ball and return every pin now down on the lane, including pins
    /// felled by earlier rolls since the last reset. Ids are unique and sorted.
    fn roll(&mut self, ball_position: f32, params: ThrowParams) -> Vec<u8>;

    /// Pins currently down.
    fn downed(&self) -> PinSet;

    /// Token of the last reset applied.
    fn last_reset(&self) -> ResetToken;
}
