use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::rack::{self, PinSpot, BALL_RADIUS, BALL_START_Y, PIN_RADIUS, RACK_ROWS};
use super::Lane;
use crate::game::{PinSet, ResetToken, ThrowParams};

/// Below this power the ball stops before reaching the head pin.
const MIN_REACH_POWER: f32 = 5.0;

/// A lane that rolls the ball along a straight line and decides pinfall by
/// chance: pins on the ball's line fall with a power-weighted probability and
/// may topple the two pins behind them.
pub struct SimpleLane {
    rng: StdRng,
    downed: PinSet,
    last_reset: ResetToken,
}

impl SimpleLane {
    pub fn new() -> Self {
        SimpleLane {
            rng: StdRng::from_os_rng(),
            downed: PinSet::empty(),
            last_reset: 0,
        }
    }

    /// Deterministic lane for replays and tests
    pub fn with_seed(seed: u64) -> Self {
        SimpleLane {
            rng: StdRng::seed_from_u64(seed),
            downed: PinSet::empty(),
            last_reset: 0,
        }
    }

    /// Ball x coordinate when it reaches depth `y`, or None once it has left
    /// the play area.
    fn ball_x_at(start_x: f32, angle: f32, y: f32) -> Option<f32> {
        let x = start_x + (BALL_START_Y - y) * angle.to_radians().tan();
        (rack::PLAY_AREA_MIN_X..=rack::PLAY_AREA_MAX_X)
            .contains(&x)
            .then_some(x)
    }

    fn is_direct_hit(spot: &PinSpot, start_x: f32, angle: f32) -> bool {
        match Self::ball_x_at(start_x, angle, spot.y) {
            Some(x) => (x - spot.x).abs() < BALL_RADIUS + PIN_RADIUS,
            None => false,
        }
    }
}

impl Default for SimpleLane {
    fn default() -> Self {
        Self::new()
    }
}

impl Lane for SimpleLane {
    fn reset(&mut self, token: ResetToken) {
        self.downed = PinSet::empty();
        self.last_reset = token;
        debug!(token, "lane re-racked");
    }

    fn roll(&mut self, ball_position: f32, params: ThrowParams) -> Vec<u8> {
        if params.power < MIN_REACH_POWER {
            return self.downed.to_vec();
        }

        let hit_chance = (0.5 + params.power / 200.0).min(1.0) as f64;
        let scatter_chance = (0.2 + params.power / 250.0).min(0.9) as f64;
        let start_x = rack::ball_start_x(ball_position);
        let spots = rack::rack();

        let mut felled = PinSet::empty();
        for row in 0..RACK_ROWS {
            for spot in spots.iter().filter(|s| s.row == row) {
                if self.downed.contains(spot.id) || felled.contains(spot.id) {
                    continue;
                }
                if Self::is_direct_hit(spot, start_x, params.angle)
                    && self.rng.random_bool(hit_chance)
                {
                    felled.insert(spot.id);
                }
            }

            // Pins that fell in this row may knock over the two behind them.
            let fallen_in_row: Vec<&PinSpot> = spots
                .iter()
                .filter(|s| s.row == row && felled.contains(s.id))
                .collect();
            for spot in fallen_in_row {
                for slot in [spot.slot, spot.slot + 1] {
                    if let Some(behind) = rack::pin_at(row + 1, slot) {
                        if !self.downed.contains(behind) && self.rng.random_bool(scatter_chance) {
                            felled.insert(behind);
                        }
                    }
                }
            }
        }

        for id in felled.iter() {
            self.downed.insert(id);
        }
        debug!(
            position = ball_position,
            power = params.power,
            angle = params.angle,
            felled = felled.len(),
            down = self.downed.len(),
            "roll settled"
        );
        self.downed.to_vec()
    }

    fn downed(&self) -> PinSet {
        self.downed
    }

    fn last_reset(&self) -> ResetToken {
        self.last_reset
    }
}
