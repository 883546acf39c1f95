//! Property tests for frame scoring and game flow.
//!
//! - Every committed frame is well formed: throws within 0..=10, their sum at
//!   most 10, score = sum plus 2 exactly when the sum is 10
//! - The final score equals the sum of committed frame scores
//! - Committing the last frame always ends the game

use proptest::prelude::*;

use crate::config::GameConfig;
use crate::game::{GamePhase, GameSession, ThrowResolution};

/// Lane reports for one frame: the pins down after throw 1, and the extra
/// pins felled by throw 2.
fn frame_reports() -> impl Strategy<Value = (Vec<u8>, Vec<u8>)> {
    (prop::collection::vec(any::<bool>(), 10), prop::collection::vec(any::<bool>(), 10)).prop_map(
        |(first, second)| {
            let first_ids: Vec<u8> = (0..10u8).filter(|&i| first[i as usize]).collect();
            let cumulative: Vec<u8> = (0..10u8)
                .filter(|&i| first[i as usize] || second[i as usize])
                .collect();
            (first_ids, cumulative)
        },
    )
}

fn roll(session: &mut GameSession, downed: &[u8]) -> ThrowResolution {
    session.confirm_aim().unwrap();
    session.throw(50.0, 0.0).unwrap();
    session.rolling_complete(downed).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_committed_frames_are_well_formed(
        max_frames in 1usize..=6,
        reports in prop::collection::vec(frame_reports(), 6),
    ) {
        let config = GameConfig { max_frames, ..GameConfig::default() };
        let mut session = GameSession::new(config).unwrap();
        session.start();

        for (first, cumulative) in reports.iter().take(max_frames) {
            let frame_before = session.current_frame_index();
            if let ThrowResolution::SecondThrow { .. } = roll(&mut session, first) {
                roll(&mut session, cumulative);
            }
            prop_assert!(session.frames()[frame_before].is_some());
        }

        prop_assert_eq!(session.phase(), GamePhase::GameOver);

        let mut sum = 0;
        for frame in session.frames().iter().flatten() {
            let pins = frame.throw1 + frame.throw2;
            prop_assert!(frame.throw1 <= 10 && frame.throw2 <= 10);
            prop_assert!(pins <= 10);
            let bonus = if pins == 10 { 2 } else { 0 };
            prop_assert_eq!(frame.score, u32::from(pins) + bonus);
            prop_assert!(frame.is_complete);
            sum += frame.score;
        }
        prop_assert_eq!(session.total_score(), sum);
    }

    #[test]
    fn prop_total_score_counts_only_committed_frames(
        reports in prop::collection::vec(frame_reports(), 3),
        played in 0usize..3,
    ) {
        let mut session = GameSession::new(GameConfig::default()).unwrap();
        session.start();

        let mut expected = 0;
        for (first, cumulative) in reports.iter().take(played) {
            let resolution = match roll(&mut session, first) {
                ThrowResolution::SecondThrow { .. } => roll(&mut session, cumulative),
                other => other,
            };
            match resolution {
                ThrowResolution::NextFrame(frame) => expected += frame.score,
                other => prop_assert!(false, "unexpected resolution {:?}", other),
            }
        }

        prop_assert_eq!(session.total_score(), expected);
        prop_assert_eq!(session.frames().iter().filter(|f| f.is_none()).count(), 3 - played);
        prop_assert_eq!(session.phase(), GamePhase::Aiming);
    }
}
