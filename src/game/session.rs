use std::sync::mpsc;

use tracing::{debug, info, warn};

use super::frame::{Frame, FrameTracker};
use super::phase::{GameEvent, GamePhase, PhaseController};
use super::pins::PinSet;
use super::scoring::{self, ThrowOutcome};
use crate::config::GameConfig;
use crate::error::{ConfigError, GameError};

/// Ball start position (percent of the play area) until Controls move it.
pub const DEFAULT_BALL_POSITION: f32 = 50.0;

/// Token telling the lane to re-rack. Strictly increasing over a session's
/// lifetime, restarts included.
pub type ResetToken = u64;

/// Power and angle chosen for a throw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowParams {
    pub power: f32,
    /// Degrees, negative is left
    pub angle: f32,
}

/// Notifications pushed to subscribers (lane, scoreboard, controls).
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    LaneReset { token: ResetToken },
    ThrowLaunched { ball_position: f32, params: ThrowParams },
    FrameCommitted(Frame),
    GameOver { final_score: u32 },
    Rejected(GameError),
}

/// What a completed roll led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrowResolution {
    /// First throw left pins standing; aim again in the same frame.
    SecondThrow { pins_down: PinSet },
    /// Frame committed and the next frame has begun.
    NextFrame(Frame),
    /// Last frame committed.
    GameOver { frame: Frame, final_score: u32 },
}

/// The single authority over game progress.
///
/// Every input is a validated method call. A rejected call returns the error,
/// publishes [`SessionEvent::Rejected`] and leaves the session unchanged.
pub struct GameSession {
    config: GameConfig,
    phases: PhaseController,
    tracker: FrameTracker,
    ball_position: f32,
    reset_token: ResetToken,
    /// (frame number, throw number) of the last resolved throw, cleared by
    /// the next throw or a restart
    resolved_throw: Option<(usize, usize)>,
    subscribers: Vec<mpsc::Sender<SessionEvent>>,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(GameSession {
            tracker: FrameTracker::new(config.max_frames),
            config,
            phases: PhaseController::new(),
            ball_position: DEFAULT_BALL_POSITION,
            reset_token: 0,
            resolved_throw: None,
            subscribers: Vec::new(),
        })
    }

    /// Register an observer. Dropping the receiver unsubscribes it.
    pub fn subscribe(&mut self) -> mpsc::Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phases.phase()
    }

    pub fn frames(&self) -> &[Option<Frame>] {
        self.tracker.frames()
    }

    pub fn current_frame_index(&self) -> usize {
        self.tracker.current_frame_index()
    }

    pub fn throw_index(&self) -> usize {
        self.tracker.throw_index()
    }

    pub fn pins_after_first_throw(&self) -> PinSet {
        self.tracker.pins_after_first_throw()
    }

    pub fn ball_position(&self) -> f32 {
        self.ball_position
    }

    pub fn reset_token(&self) -> ResetToken {
        self.reset_token
    }

    /// Sum of committed frame scores
    pub fn total_score(&self) -> u32 {
        self.tracker.total_score()
    }

    pub fn is_game_over(&self) -> bool {
        self.phases.phase() == GamePhase::GameOver
    }

    /// Start a new game from any phase, GameOver included.
    pub fn start(&mut self) {
        let from = self.phases.phase();
        self.tracker.reset();
        self.resolved_throw = None;
        self.phases.start();
        self.reset_token += 1;

        info!(token = self.reset_token, max_frames = self.config.max_frames, "game started");
        self.publish(SessionEvent::PhaseChanged {
            from,
            to: GamePhase::Aiming,
        });
        self.publish(SessionEvent::LaneReset {
            token: self.reset_token,
        });
    }

    /// Move the ball's start position, in percent of the play area.
    pub fn set_ball_position(&mut self, x_percent: f32) -> Result<(), GameError> {
        match self.try_set_ball_position(x_percent) {
            Ok(()) => Ok(()),
            Err(err) => self.rejected(GameEvent::SetBallPosition, err),
        }
    }

    pub fn confirm_aim(&mut self) -> Result<(), GameError> {
        match self.phases.confirm_aim() {
            Ok(()) => {
                debug!(frame = self.current_frame_index() + 1, "aim confirmed");
                self.publish(SessionEvent::PhaseChanged {
                    from: GamePhase::Aiming,
                    to: GamePhase::PowerAngle,
                });
                Ok(())
            }
            Err(err) => self.rejected(GameEvent::ConfirmAim, err),
        }
    }

    /// Launch the ball. The parameters are forwarded to the lane through
    /// [`SessionEvent::ThrowLaunched`].
    pub fn throw(&mut self, power: f32, angle: f32) -> Result<(), GameError> {
        match self.try_throw(power, angle) {
            Ok(()) => Ok(()),
            Err(err) => self.rejected(GameEvent::Throw, err),
        }
    }

    /// Report the pins currently down on the lane once the roll has settled.
    ///
    /// `downed_pin_ids` must be the full cumulative lane state, not only the
    /// pins felled by this throw.
    pub fn rolling_complete(&mut self, downed_pin_ids: &[u8]) -> Result<ThrowResolution, GameError> {
        match self.try_rolling_complete(downed_pin_ids) {
            Ok(resolution) => Ok(resolution),
            Err(err) => self.rejected(GameEvent::RollingComplete, err),
        }
    }

    fn try_set_ball_position(&mut self, x_percent: f32) -> Result<(), GameError> {
        self.phases.ensure(GameEvent::SetBallPosition)?;
        if !x_percent.is_finite() || !(0.0..=100.0).contains(&x_percent) {
            return Err(GameError::invalid_input(format!(
                "ball position {x_percent} is outside 0..=100"
            )));
        }
        self.ball_position = x_percent;
        debug!(position = x_percent, "ball positioned");
        Ok(())
    }

    fn try_throw(&mut self, power: f32, angle: f32) -> Result<(), GameError> {
        self.phases.ensure(GameEvent::Throw)?;
        if !power.is_finite() || power < 0.0 {
            return Err(GameError::invalid_input(format!(
                "power must be a finite non-negative number, got {power}"
            )));
        }
        if !angle.is_finite() {
            return Err(GameError::invalid_input(format!(
                "angle must be finite, got {angle}"
            )));
        }

        self.phases.begin_roll()?;
        self.resolved_throw = None;
        let params = ThrowParams { power, angle };
        debug!(
            frame = self.current_frame_index() + 1,
            throw = self.throw_index() + 1,
            power,
            angle,
            position = self.ball_position,
            "ball launched"
        );
        self.publish(SessionEvent::PhaseChanged {
            from: GamePhase::PowerAngle,
            to: GamePhase::Rolling,
        });
        self.publish(SessionEvent::ThrowLaunched {
            ball_position: self.ball_position,
            params,
        });
        Ok(())
    }

    fn try_rolling_complete(&mut self, downed_pin_ids: &[u8]) -> Result<ThrowResolution, GameError> {
        if !self.phases.accepts(GameEvent::RollingComplete) {
            if let Some((frame, throw)) = self.resolved_throw {
                return Err(GameError::DuplicateCompletion { frame, throw });
            }
            self.phases.ensure(GameEvent::RollingComplete)?;
        }

        let downed = PinSet::from_ids(downed_pin_ids)?;
        let frame_index = self.tracker.current_frame_index();
        let throw_index = self.tracker.throw_index();
        let outcome = scoring::resolve_throw(
            throw_index,
            &self.tracker.pins_after_first_throw(),
            &downed,
        )?;

        let game_over = matches!(outcome, ThrowOutcome::Closed(_)) && self.tracker.is_last_frame();
        self.phases.complete_roll(game_over)?;
        self.resolved_throw = Some((frame_index + 1, throw_index + 1));
        let to = self.phases.phase();

        let resolution = match outcome {
            ThrowOutcome::Open { pins_down } => {
                self.tracker.record_first_throw(pins_down);
                debug!(frame = frame_index + 1, pins = pins_down.len(), "first throw resolved");
                self.publish(SessionEvent::PhaseChanged {
                    from: GamePhase::Rolling,
                    to,
                });
                ThrowResolution::SecondThrow { pins_down }
            }
            ThrowOutcome::Closed(result) => {
                let frame = self.tracker.commit(result);
                info!(
                    frame = frame.frame_number,
                    throw1 = frame.throw1,
                    throw2 = frame.throw2,
                    score = frame.score,
                    "frame committed"
                );
                self.publish(SessionEvent::FrameCommitted(frame));

                if game_over {
                    let final_score = self.tracker.total_score();
                    info!(final_score, "game over");
                    self.publish(SessionEvent::PhaseChanged {
                        from: GamePhase::Rolling,
                        to,
                    });
                    self.publish(SessionEvent::GameOver { final_score });
                    ThrowResolution::GameOver { frame, final_score }
                } else {
                    self.tracker.advance_frame();
                    self.reset_token += 1;
                    self.publish(SessionEvent::PhaseChanged {
                        from: GamePhase::Rolling,
                        to,
                    });
                    self.publish(SessionEvent::LaneReset {
                        token: self.reset_token,
                    });
                    ThrowResolution::NextFrame(frame)
                }
            }
        };
        Ok(resolution)
    }

    fn rejected<T>(&mut self, event: GameEvent, err: GameError) -> Result<T, GameError> {
        warn!(%event, phase = %self.phases.phase(), error = %err, "event rejected");
        self.publish(SessionEvent::Rejected(err.clone()));
        Err(err)
    }

    fn publish(&mut self, event: SessionEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
