use std::fmt;

use crate::error::GameError;

/// Turn phase of a bowling game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    StartScreen,
    /// Positioning the ball left/right
    Aiming,
    /// Choosing power and direction
    PowerAngle,
    /// Lane is resolving the throw
    Rolling,
    /// Reserved. No transition leads here.
    TurnEnd,
    GameOver,
}

impl GamePhase {
    /// Get phase name for display
    pub fn name(self) -> &'static str {
        match self {
            GamePhase::StartScreen => "Start Screen",
            GamePhase::Aiming => "Aiming",
            GamePhase::PowerAngle => "Power/Angle",
            GamePhase::Rolling => "Rolling",
            GamePhase::TurnEnd => "Turn End",
            GamePhase::GameOver => "Game Over",
        }
    }

    /// Whether the ball is in play (controls are shown)
    pub fn is_active_turn(self) -> bool {
        matches!(
            self,
            GamePhase::Aiming | GamePhase::PowerAngle | GamePhase::Rolling
        )
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// External events a session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    Start,
    SetBallPosition,
    ConfirmAim,
    Throw,
    RollingComplete,
}

impl GameEvent {
    pub fn name(self) -> &'static str {
        match self {
            GameEvent::Start => "start",
            GameEvent::SetBallPosition => "ball position",
            GameEvent::ConfirmAim => "aim confirmation",
            GameEvent::Throw => "throw",
            GameEvent::RollingComplete => "rolling completion",
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Owns the current phase and the rules for leaving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseController {
    phase: GamePhase,
}

impl PhaseController {
    pub fn new() -> Self {
        PhaseController {
            phase: GamePhase::StartScreen,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Whether `event` is accepted in the current phase
    pub fn accepts(&self, event: GameEvent) -> bool {
        match event {
            GameEvent::Start => true,
            GameEvent::SetBallPosition | GameEvent::ConfirmAim => self.phase == GamePhase::Aiming,
            GameEvent::Throw => self.phase == GamePhase::PowerAngle,
            GameEvent::RollingComplete => self.phase == GamePhase::Rolling,
        }
    }

    /// Fail with `InvalidTransition` unless `event` is accepted right now
    pub fn ensure(&self, event: GameEvent) -> Result<(), GameError> {
        if self.accepts(event) {
            Ok(())
        } else {
            Err(GameError::InvalidTransition {
                event,
                phase: self.phase,
            })
        }
    }

    /// Any phase -> Aiming
    pub fn start(&mut self) {
        self.phase = GamePhase::Aiming;
    }

    /// Aiming -> PowerAngle
    pub fn confirm_aim(&mut self) -> Result<(), GameError> {
        self.ensure(GameEvent::ConfirmAim)?;
        self.phase = GamePhase::PowerAngle;
        Ok(())
    }

    /// PowerAngle -> Rolling
    pub fn begin_roll(&mut self) -> Result<(), GameError> {
        self.ensure(GameEvent::Throw)?;
        self.phase = GamePhase::Rolling;
        Ok(())
    }

    /// Rolling -> Aiming, or Rolling -> GameOver when `game_over` is set
    pub fn complete_roll(&mut self, game_over: bool) -> Result<(), GameError> {
        self.ensure(GameEvent::RollingComplete)?;
        self.phase = if game_over {
            GamePhase::GameOver
        } else {
            GamePhase::Aiming
        };
        Ok(())
    }
}

impl Default for PhaseController {
    fn default() -> Self {
        Self::new()
    }
}
