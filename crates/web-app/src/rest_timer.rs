/// Rest countdown between sets. Driven by a one-second tick from the UI.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RestTimer {
    #[default]
    Idle,
    CountingDown {
        remaining: u32,
    },
    Expired,
}

impl RestTimer {
    /// Start a countdown, cancelling any running one. Starting with zero
    /// seconds returns to idle instead.
    pub fn start(&mut self, rest_seconds: u32) {
        *self = if rest_seconds == 0 {
            RestTimer::Idle
        } else {
            RestTimer::CountingDown {
                remaining: rest_seconds,
            }
        };
    }

    /// Advance by one second. Returns true on the tick the countdown
    /// expires, so the caller can play the audible cue. A tick in the
    /// expired state clears it.
    pub fn tick(&mut self) -> bool {
        match *self {
            RestTimer::Idle => false,
            RestTimer::CountingDown { remaining } => {
                if remaining > 1 {
                    *self = RestTimer::CountingDown {
                        remaining: remaining - 1,
                    };
                    false
                } else {
                    *self = RestTimer::Expired;
                    true
                }
            }
            RestTimer::Expired => {
                *self = RestTimer::Idle;
                false
            }
        }
    }

    pub fn skip(&mut self) {
        *self = RestTimer::Idle;
    }

    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        match *self {
            RestTimer::CountingDown { remaining } => Some(remaining),
            RestTimer::Idle | RestTimer::Expired => None,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(*self, RestTimer::CountingDown { .. })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_countdown_expires_once() {
        let mut timer = RestTimer::default();
        timer.start(3);

        assert!(!timer.tick());
        assert_eq!(timer.remaining(), Some(2));
        assert!(!timer.tick());
        assert!(timer.tick());
        assert_eq!(timer, RestTimer::Expired);

        assert!(!timer.tick());
        assert_eq!(timer, RestTimer::Idle);
    }

    #[test]
    fn test_start_cancels_running_countdown() {
        let mut timer = RestTimer::default();
        timer.start(10);
        timer.tick();

        timer.start(5);

        assert_eq!(timer.remaining(), Some(5));

        let mut expirations = 0;
        for _ in 0..10 {
            if timer.tick() {
                expirations += 1;
            }
        }
        assert_eq!(expirations, 1);
    }

    #[test]
    fn test_start_with_zero_rest_stays_idle() {
        let mut timer = RestTimer::default();
        timer.start(0);

        assert_eq!(timer, RestTimer::Idle);
        assert!(!timer.tick());
    }

    #[test]
    fn test_skip() {
        let mut timer = RestTimer::default();
        timer.start(30);

        timer.skip();

        assert_eq!(timer, RestTimer::Idle);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_tick_when_idle() {
        let mut timer = RestTimer::default();
        assert!(!timer.tick());
        assert_eq!(timer, RestTimer::Idle);
    }
}
