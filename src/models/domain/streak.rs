/// Running count of consecutive correct answers within one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreakTracker {
    current: u32,
    max: u32,
}

impl StreakTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one answer and returns the streak built strictly from prior answers.
    pub fn record(&mut self, correct: bool) -> u32 {
        let before = self.current;
        self.current = if correct { self.current + 1 } else { 0 };
        self.max = self.max.max(self.current);
        before
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}
