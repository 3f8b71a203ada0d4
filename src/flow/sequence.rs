//! Timed reveal on the fireworks page
//!
//! Counts down one step per second, starts the show one step after reaching
//! zero, then offers the Next button after a further delay. Driven by the
//! host's frame clock so several steps can fire in one call after a stall.

const STEP_MS: f64 = 1_000.0;

/// Something the page should do now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealEvent {
    /// Display this countdown value
    Countdown(u32),
    /// Hide the countdown, start the fireworks and show the greeting
    ShowFireworks,
    /// Reveal the button leading to the next page
    ShowNextButton,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Counting { remaining: u32, next_at: f64 },
    Showing { button_at: f64 },
    Done,
}

#[derive(Debug, Clone)]
pub struct RevealSequence {
    countdown_secs: u32,
    next_button_delay_ms: f64,
    phase: Phase,
}

impl RevealSequence {
    pub fn new(countdown_secs: u32, next_button_delay_secs: u32) -> Self {
        Self {
            countdown_secs,
            next_button_delay_ms: next_button_delay_secs as f64 * STEP_MS,
            phase: Phase::Idle,
        }
    }

    /// Begin (or restart) the countdown at `now_ms`
    pub fn start(&mut self, now_ms: f64) -> RevealEvent {
        self.phase = Phase::Counting {
            remaining: self.countdown_secs,
            next_at: now_ms + STEP_MS,
        };
        RevealEvent::Countdown(self.countdown_secs)
    }

    /// Current countdown value, if still counting
    pub fn countdown(&self) -> Option<u32> {
        match self.phase {
            Phase::Counting { remaining, .. } => Some(remaining),
            _ => None,
        }
    }

    /// Whether the fireworks stage has been reached
    pub fn is_showing(&self) -> bool {
        matches!(self.phase, Phase::Showing { .. } | Phase::Done)
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Emit every event due by `now_ms`, in order
    pub fn advance(&mut self, now_ms: f64) -> Vec<RevealEvent> {
        let mut events = Vec::new();
        loop {
            match self.phase {
                Phase::Counting { remaining, next_at } if now_ms >= next_at => {
                    if remaining == 0 {
                        self.phase = Phase::Showing {
                            button_at: next_at + self.next_button_delay_ms,
                        };
                        events.push(RevealEvent::ShowFireworks);
                    } else {
                        self.phase = Phase::Counting {
                            remaining: remaining - 1,
                            next_at: next_at + STEP_MS,
                        };
                        events.push(RevealEvent::Countdown(remaining - 1));
                    }
                }
                Phase::Showing { button_at } if now_ms >= button_at => {
                    self.phase = Phase::Done;
                    events.push(RevealEvent::ShowNextButton);
                }
                _ => break,
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_sequence_emits_nothing() {
        let mut seq = RevealSequence::new(10, 30);
        assert!(seq.advance(1e9).is_empty());
        assert_eq!(seq.countdown(), None);
    }

    #[test]
    fn test_countdown_steps_once_per_second() {
        let mut seq = RevealSequence::new(10, 30);
        assert_eq!(seq.start(0.0), RevealEvent::Countdown(10));
        assert!(seq.advance(999.0).is_empty());
        assert_eq!(seq.advance(1_000.0), vec![RevealEvent::Countdown(9)]);
        assert_eq!(seq.countdown(), Some(9));
    }

    #[test]
    fn test_full_timeline() {
        let mut seq = RevealSequence::new(10, 30);
        seq.start(0.0);
        assert_eq!(seq.advance(10_000.0).last(), Some(&RevealEvent::Countdown(0)));
        assert!(!seq.is_showing());

        // Zero is displayed for one full step before the show
        assert_eq!(seq.advance(11_000.0), vec![RevealEvent::ShowFireworks]);
        assert!(seq.is_showing());

        assert!(seq.advance(40_999.0).is_empty());
        assert_eq!(seq.advance(41_000.0), vec![RevealEvent::ShowNextButton]);
        assert!(seq.is_done());
        assert!(seq.advance(100_000.0).is_empty());
    }

    #[test]
    fn test_catches_up_after_a_stall() {
        let mut seq = RevealSequence::new(3, 5);
        seq.start(0.0);
        assert_eq!(
            seq.advance(60_000.0),
            vec![
                RevealEvent::Countdown(2),
                RevealEvent::Countdown(1),
                RevealEvent::Countdown(0),
                RevealEvent::ShowFireworks,
                RevealEvent::ShowNextButton,
            ]
        );
    }

    #[test]
    fn test_restart_resets_countdown() {
        let mut seq = RevealSequence::new(10, 30);
        seq.start(0.0);
        seq.advance(5_000.0);
        assert_eq!(seq.start(5_000.0), RevealEvent::Countdown(10));
        assert_eq!(seq.countdown(), Some(10));
    }
}
