//! Core bowling game logic: pin sets, turn phases, frame tracking, scoring,
//! and the session that drives them.

mod frame;
mod phase;
mod pins;
pub mod scoring;
mod session;

#[cfg(test)]
mod tests_props;

pub use frame::{Frame, FrameTracker};
pub use phase::{GameEvent, GamePhase, PhaseController};
pub use pins::{PinSet, PIN_COUNT};
pub use scoring::{FrameScore, ThrowOutcome};
pub use session::{
    GameSession, ResetToken, SessionEvent, ThrowParams, ThrowResolution, DEFAULT_BALL_POSITION,
};
