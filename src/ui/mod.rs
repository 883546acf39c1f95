//! Terminal UI: the game screen with lane, scoreboard, and throw controls.

mod app;
mod game_view;
pub mod lane_widget;
pub mod scoreboard;

pub use app::App;
