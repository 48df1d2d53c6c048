use jiff::Timestamp;

/// Source of "now" for every timestamp the store writes.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

#[cfg(test)]
pub mod testing {
    use std::cell::Cell;

    use jiff::{SignedDuration, Timestamp};

    use super::Clock;

    /// Clock that advances by a fixed step on every read.
    pub struct StepClock {
        next: Cell<Timestamp>,
        step: SignedDuration,
    }

    impl StepClock {
        pub fn new(start: Timestamp, step: SignedDuration) -> Self {
            Self {
                next: Cell::new(start),
                step,
            }
        }

        pub fn seconds() -> Self {
            Self::new(
                Timestamp::from_second(1_700_000_000).unwrap(),
                SignedDuration::from_secs(1),
            )
        }

        /// Clock that never moves
        pub fn frozen() -> Self {
            Self::new(
                Timestamp::from_second(1_700_000_000).unwrap(),
                SignedDuration::ZERO,
            )
        }
    }

    impl Clock for StepClock {
        fn now(&self) -> Timestamp {
            let now = self.next.get();
            self.next.set(now.checked_add(self.step).unwrap());
            now
        }
    }
}
