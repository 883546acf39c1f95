use super::pins::PinSet;
use super::scoring::FrameScore;

/// A committed frame as shown on the scoreboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// 1-based
    pub frame_number: usize,
    pub throw1: u8,
    pub throw2: u8,
    pub score: u32,
    pub is_complete: bool,
}

impl Frame {
    pub fn is_strike(&self) -> bool {
        self.throw1 == 10
    }

    /// Cleared with two throws
    pub fn is_spare(&self) -> bool {
        !self.is_strike() && self.throw1 + self.throw2 == 10
    }
}

/// Fixed-length frame sequence plus the per-frame throw context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTracker {
    frames: Vec<Option<Frame>>,
    current_frame: usize,
    throw_index: usize,
    pins_after_first_throw: PinSet,
}

impl FrameTracker {
    /// Create a tracker with `max_frames` empty slots
    pub fn new(max_frames: usize) -> Self {
        FrameTracker {
            frames: vec![None; max_frames],
            current_frame: 0,
            throw_index: 0,
            pins_after_first_throw: PinSet::empty(),
        }
    }

    /// Clear every slot and go back to the first throw of frame 0
    pub fn reset(&mut self) {
        self.frames.iter_mut().for_each(|slot| *slot = None);
        self.current_frame = 0;
        self.clear_throw_context();
    }

    pub fn frames(&self) -> &[Option<Frame>] {
        &self.frames
    }

    pub fn current_frame_index(&self) -> usize {
        self.current_frame
    }

    pub fn throw_index(&self) -> usize {
        self.throw_index
    }

    pub fn pins_after_first_throw(&self) -> PinSet {
        self.pins_after_first_throw
    }

    /// Whether the current frame is the last configured one
    pub fn is_last_frame(&self) -> bool {
        self.current_frame + 1 >= self.frames.len()
    }

    /// Remember the first throw's pinfall and move on to the second throw
    pub fn record_first_throw(&mut self, pins_down: PinSet) {
        self.pins_after_first_throw = pins_down;
        self.throw_index = 1;
    }

    /// Write the current frame's slot. The slot must still be empty.
    pub fn commit(&mut self, result: FrameScore) -> Frame {
        debug_assert!(self.frames[self.current_frame].is_none(), "frame committed twice");
        let frame = Frame {
            frame_number: self.current_frame + 1,
            throw1: result.throw1,
            throw2: result.throw2,
            score: result.score,
            is_complete: true,
        };
        self.frames[self.current_frame] = Some(frame);
        frame
    }

    /// Move to the next frame with a fresh throw context.
    /// Does nothing past the last frame.
    pub fn advance_frame(&mut self) {
        if self.is_last_frame() {
            return;
        }
        self.current_frame += 1;
        self.clear_throw_context();
    }

    /// Sum of committed scores; empty slots count 0
    pub fn total_score(&self) -> u32 {
        self.frames.iter().flatten().map(|f| f.score).sum()
    }

    fn clear_throw_context(&mut self) {
        self.throw_index = 0;
        self.pins_after_first_throw = PinSet::empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(throw1: u8, throw2: u8, score: u32) -> FrameScore {
        FrameScore {
            throw1,
            throw2,
            score,
        }
    }

    #[test]
    fn test_new_tracker_is_empty() {
        let tracker = FrameTracker::new(3);
        assert_eq!(tracker.frames(), &[None, None, None]);
        assert_eq!(tracker.current_frame_index(), 0);
        assert_eq!(tracker.throw_index(), 0);
        assert_eq!(tracker.total_score(), 0);
    }

    #[test]
    fn test_commit_fills_current_slot() {
        let mut tracker = FrameTracker::new(3);
        let frame = tracker.commit(score(3, 4, 7));
        assert_eq!(frame.frame_number, 1);
        assert!(frame.is_complete);
        assert_eq!(tracker.frames()[0], Some(frame));
        assert_eq!(tracker.frames()[1], None);
    }

    #[test]
    fn test_first_throw_memo_cleared_on_advance() {
        let mut tracker = FrameTracker::new(3);
        tracker.record_first_throw(PinSet::from_ids(&[0, 1]).unwrap());
        assert_eq!(tracker.throw_index(), 1);
        assert_eq!(tracker.pins_after_first_throw().len(), 2);

        tracker.commit(score(2, 0, 2));
        tracker.advance_frame();
        assert_eq!(tracker.current_frame_index(), 1);
        assert_eq!(tracker.throw_index(), 0);
        assert!(tracker.pins_after_first_throw().is_empty());
    }

    #[test]
    fn test_advance_stops_at_last_frame() {
        let mut tracker = FrameTracker::new(2);
        assert!(!tracker.is_last_frame());
        tracker.advance_frame();
        assert!(tracker.is_last_frame());
        tracker.advance_frame();
        assert_eq!(tracker.current_frame_index(), 1);
    }

    #[test]
    fn test_total_score_ignores_empty_slots() {
        let mut tracker = FrameTracker::new(3);
        tracker.commit(score(10, 0, 12));
        tracker.advance_frame();
        tracker.commit(score(2, 2, 4));
        assert_eq!(tracker.total_score(), 16);
    }

    #[test]
    fn test_reset_clears_frames() {
        let mut tracker = FrameTracker::new(3);
        tracker.commit(score(1, 1, 2));
        tracker.advance_frame();
        tracker.record_first_throw(PinSet::from_ids(&[3]).unwrap());
        tracker.reset();
        assert_eq!(tracker, FrameTracker::new(3));
    }

    #[test]
    fn test_strike_and_spare_flags() {
        let strike = Frame {
            frame_number: 1,
            throw1: 10,
            throw2: 0,
            score: 12,
            is_complete: true,
        };
        let spare = Frame {
            throw1: 3,
            throw2: 7,
            ..strike
        };
        assert!(strike.is_strike() && !strike.is_spare());
        assert!(spare.is_spare() && !spare.is_strike());
    }
}
