use std::io;
use std::sync::mpsc;

use crate::config::{AppConfig, ControlsConfig};
use crate::error::{ConfigError, GameError};
use crate::game::{GamePhase, GameSession, PinSet, SessionEvent, ThrowResolution};
use crate::lane::{Lane, SimpleLane};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};

use super::game_view::{self, GameView};

/// A roll the lane has already settled, shown rolling for a few ticks
/// before it is reported back to the session.
struct PendingRoll {
    ticks_left: u32,
    downed: Vec<u8>,
    /// Rack as it stood when the ball was released
    before: PinSet,
    /// The session refused `downed`; waits for Enter to re-read the lane.
    rejected: bool,
}

pub struct App {
    session: GameSession,
    events: mpsc::Receiver<SessionEvent>,
    lane: Box<dyn Lane>,
    controls: ControlsConfig,
    power: f32,
    angle: f32,
    pending_roll: Option<PendingRoll>,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut session = GameSession::new(config.game.clone())?;
        let events = session.subscribe();
        let lane: Box<dyn Lane> = match config.lane.seed {
            Some(seed) => Box::new(SimpleLane::with_seed(seed)),
            None => Box::new(SimpleLane::new()),
        };

        Ok(App {
            session,
            events,
            lane,
            power: config.controls.max_power / 2.0,
            angle: 0.0,
            controls: config.controls.clone(),
            pending_roll: None,
            should_quit: false,
            message: None,
        })
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal.draw(|f| self.render(f)).map_err(Into::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
            self.tick();
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('r') => {
                self.start_game();
                return;
            }
            _ => {}
        }

        match self.session.phase() {
            GamePhase::StartScreen | GamePhase::GameOver => {
                if key.code == KeyCode::Enter {
                    self.start_game();
                }
            }
            GamePhase::Aiming => match key.code {
                KeyCode::Left => self.nudge_position(-self.controls.position_step),
                KeyCode::Right => self.nudge_position(self.controls.position_step),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    let result = self.session.confirm_aim();
                    self.report(result);
                }
                _ => {}
            },
            GamePhase::PowerAngle => match key.code {
                KeyCode::Up => {
                    self.power = (self.power + self.controls.power_step).min(self.controls.max_power);
                }
                KeyCode::Down => {
                    self.power = (self.power - self.controls.power_step).max(0.0);
                }
                KeyCode::Left => {
                    self.angle = (self.angle - self.controls.angle_step).max(-self.controls.max_angle);
                }
                KeyCode::Right => {
                    self.angle = (self.angle + self.controls.angle_step).min(self.controls.max_angle);
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    let result = self.session.throw(self.power, self.angle);
                    self.report(result);
                }
                _ => {}
            },
            GamePhase::Rolling => {
                if key.code == KeyCode::Enter {
                    self.retry_report();
                }
            }
            GamePhase::TurnEnd => {}
        }
        self.drain_events();
    }

    fn start_game(&mut self) {
        self.session.start();
        self.message = Some("New game started! Position the ball.".to_string());
        self.drain_events();
    }

    fn nudge_position(&mut self, delta: f32) {
        let target = (self.session.ball_position() + delta).clamp(0.0, 100.0);
        let result = self.session.set_ball_position(target);
        self.report(result);
    }

    fn report(&mut self, result: Result<(), GameError>) {
        if let Err(err) = result {
            self.message = Some(err.to_string());
        }
    }

    /// Advance the rolling animation and hand the result to the session
    /// once it finishes.
    fn tick(&mut self) {
        let finished = match self.pending_roll.as_mut() {
            Some(roll) if roll.rejected => false,
            Some(roll) if roll.ticks_left > 1 => {
                roll.ticks_left -= 1;
                false
            }
            Some(_) => true,
            None => false,
        };
        if !finished {
            return;
        }

        self.complete_roll();
    }

    /// Report the pending roll. A refused report stays pending so the phase
    /// can still be left without restarting the game.
    fn complete_roll(&mut self) {
        let Some(mut roll) = self.pending_roll.take() else {
            return;
        };
        match self.session.rolling_complete(&roll.downed) {
            Ok(resolution) => self.message = Some(describe(&resolution)),
            Err(err) => {
                self.message = Some(format!("{err}. Press Enter to re-read the lane."));
                roll.rejected = true;
                self.pending_roll = Some(roll);
            }
        }
        self.drain_events();
    }

    /// Replace a refused report with the lane's current state and send it again.
    fn retry_report(&mut self) {
        let downed = self.lane.downed().to_vec();
        match self.pending_roll.as_mut() {
            Some(roll) if roll.rejected => roll.downed = downed,
            _ => return,
        }
        self.complete_roll();
    }

    /// Pins drawn on the rack: the pre-roll rack until the roll is accepted.
    fn displayed_downed(&self) -> PinSet {
        self.pending_roll
            .as_ref()
            .map_or_else(|| self.lane.downed(), |roll| roll.before)
    }

    /// Apply session notifications to the lane.
    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                SessionEvent::LaneReset { token } => {
                    self.pending_roll = None;
                    self.lane.reset(token);
                }
                SessionEvent::ThrowLaunched {
                    ball_position,
                    params,
                } => {
                    let before = self.lane.downed();
                    let downed = self.lane.roll(ball_position, params);
                    self.pending_roll = Some(PendingRoll {
                        ticks_left: self.controls.roll_ticks,
                        downed,
                        before,
                        rejected: false,
                    });
                }
                // Rejections are already reported from the call's result.
                SessionEvent::PhaseChanged { .. }
                | SessionEvent::FrameCommitted(_)
                | SessionEvent::GameOver { .. }
                | SessionEvent::Rejected(_) => {}
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let rolling = self.pending_roll.as_ref().map(|roll| {
            1.0 - roll.ticks_left as f32 / self.controls.roll_ticks as f32
        });
        let view = GameView {
            session: &self.session,
            downed: self.displayed_downed(),
            power: self.power,
            max_power: self.controls.max_power,
            angle: self.angle,
            rolling,
            message: self.message.as_deref(),
        };
        game_view::render(frame, &view);
    }
}

/// Status line for a resolved throw
fn describe(resolution: &ThrowResolution) -> String {
    match resolution {
        ThrowResolution::SecondThrow { pins_down } => {
            format!("{} down. Aim for the rest!", pins_down.len())
        }
        ThrowResolution::NextFrame(frame) if frame.is_strike() => {
            format!("STRIKE! Frame {} scores {}.", frame.frame_number, frame.score)
        }
        ThrowResolution::NextFrame(frame) if frame.is_spare() => {
            format!("Cleared! Frame {} scores {}.", frame.frame_number, frame.score)
        }
        ThrowResolution::NextFrame(frame) => {
            format!("Frame {} scores {}.", frame.frame_number, frame.score)
        }
        ThrowResolution::GameOver { final_score, .. } => {
            format!("Game over! Final score: {final_score}. Press R to play again.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{ResetToken, ThrowParams};
    use crossterm::event::KeyModifiers;

    /// Fells pins in id order, two per roll, but reports only the pins
    /// felled by the latest roll instead of everything down.
    struct ForgetfulLane {
        downed: PinSet,
        last_reset: ResetToken,
    }

    impl Lane for ForgetfulLane {
        fn reset(&mut self, token: ResetToken) {
            self.downed = PinSet::empty();
            self.last_reset = token;
        }

        fn roll(&mut self, _ball_position: f32, _params: ThrowParams) -> Vec<u8> {
            let felled: Vec<u8> = (0..10u8)
                .filter(|id| !self.downed.contains(*id))
                .take(2)
                .collect();
            for &id in &felled {
                self.downed.insert(id);
            }
            felled
        }

        fn downed(&self) -> PinSet {
            self.downed
        }

        fn last_reset(&self) -> ResetToken {
            self.last_reset
        }
    }

    fn forgetful_app() -> App {
        let mut app = seeded_app();
        app.lane = Box::new(ForgetfulLane {
            downed: PinSet::empty(),
            last_reset: 0,
        });
        app
    }

    fn throw_and_settle(app: &mut App) {
        press(app, KeyCode::Enter);
        press(app, KeyCode::Enter);
        app.tick();
        app.tick();
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn seeded_app() -> App {
        let mut config = AppConfig::default();
        config.lane.seed = Some(5);
        config.controls.roll_ticks = 2;
        App::new(&config).unwrap()
    }

    #[test]
    fn test_enter_starts_game() {
        let mut app = seeded_app();
        assert_eq!(app.session.phase(), GamePhase::StartScreen);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.phase(), GamePhase::Aiming);
        assert_eq!(app.lane.last_reset(), 1);
    }

    #[test]
    fn test_arrows_move_ball_while_aiming() {
        let mut app = seeded_app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.session.ball_position(), 47.5);
    }

    #[test]
    fn test_throw_rolls_then_reports() {
        let mut app = seeded_app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.phase(), GamePhase::PowerAngle);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.session.phase(), GamePhase::Rolling);
        assert!(app.pending_roll.is_some());

        app.tick();
        assert_eq!(app.session.phase(), GamePhase::Rolling);
        app.tick();
        assert!(app.pending_roll.is_none());
        assert_eq!(app.session.phase(), GamePhase::Aiming);
    }

    #[test]
    fn test_keyboard_game_reaches_game_over() {
        let mut app = seeded_app();
        press(&mut app, KeyCode::Enter);
        for _ in 0..6 {
            if app.session.is_game_over() {
                break;
            }
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Enter);
            app.tick();
            app.tick();
        }
        assert!(app.session.is_game_over());
        assert!(app.message.as_deref().unwrap_or("").contains("Final score"));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.phase(), GamePhase::Aiming);
    }

    #[test]
    fn test_rack_shows_pre_roll_pins_until_reported() {
        let mut app = forgetful_app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.phase(), GamePhase::Rolling);
        assert_eq!(app.lane.downed().len(), 2);
        assert!(app.displayed_downed().is_empty());

        app.tick();
        assert!(app.displayed_downed().is_empty());
        app.tick();
        assert_eq!(app.displayed_downed(), PinSet::from_ids(&[0, 1]).unwrap());
    }

    #[test]
    fn test_refused_report_can_be_retried() {
        let mut app = forgetful_app();
        press(&mut app, KeyCode::Enter);
        throw_and_settle(&mut app);
        assert_eq!(app.session.throw_index(), 1);

        // Second report leaves out the first throw's pins.
        throw_and_settle(&mut app);
        assert_eq!(app.session.phase(), GamePhase::Rolling);
        assert!(app.pending_roll.as_ref().is_some_and(|roll| roll.rejected));
        assert!(app.message.as_deref().unwrap_or("").contains("re-read"));

        app.tick();
        assert_eq!(app.session.phase(), GamePhase::Rolling);

        press(&mut app, KeyCode::Enter);
        assert!(app.pending_roll.is_none());
        assert_eq!(app.session.phase(), GamePhase::Aiming);
        let frame = app.session.frames()[0].unwrap();
        assert_eq!((frame.throw1, frame.throw2, frame.score), (2, 2, 4));
    }

    #[test]
    fn test_describe_strike() {
        let frame = crate::game::Frame {
            frame_number: 2,
            throw1: 10,
            throw2: 0,
            score: 12,
            is_complete: true,
        };
        assert_eq!(
            describe(&ThrowResolution::NextFrame(frame)),
            "STRIKE! Frame 2 scores 12."
        );
    }
}
