//! # Bowling Arcade
//!
//! A three-frame, two-throw bowling game. The [`game`] module is the
//! authority over game progress: turn phases, frame tracking, and scoring
//! (including the +2 full-clear bonus). The lane, the controls, and the
//! scoreboard are collaborators that talk to it through method calls and
//! session events.
//!
//! ## Modules
//!
//! - [`game`] — Pin sets, phase state machine, frame tracker, scoring, session
//! - [`lane`] — Lane collaborator trait and a seeded random stand-in lane
//! - [`ui`] — Terminal UI: lane view, scoreboard, controls
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod lane;
pub mod ui;
