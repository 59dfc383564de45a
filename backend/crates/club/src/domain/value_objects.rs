//! Domain Value Objects

use serde::Serialize;

use crate::domain::entities::PuzzleAttempt;

/// Scored attempts allowed per (user, puzzle)
pub const MAX_ATTEMPTS: u8 = 2;

/// Position of an attempt in a user's log for one puzzle, `1..=MAX_ATTEMPTS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AttemptNumber(u8);

impl AttemptNumber {
    pub const FIRST: AttemptNumber = AttemptNumber(1);

    /// The slot after `used` recorded attempts, if any remain
    pub fn after(used: usize) -> Option<Self> {
        let next = u8::try_from(used).ok()?.checked_add(1)?;
        (next <= MAX_ATTEMPTS).then_some(Self(next))
    }

    pub fn from_db(value: i16) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|n| (1..=MAX_ATTEMPTS).contains(n))
            .map(Self)
    }

    #[inline]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Attempts left once this one is recorded
    #[inline]
    pub const fn remaining_after(&self) -> u8 {
        MAX_ATTEMPTS - self.0
    }
}

/// Where a user stands on one puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleState {
    NoAttempt,
    OneAttempt,
    /// No slots left. There is no reset.
    Exhausted,
}

/// Progress reconstructed from the attempt log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PuzzleProgress {
    pub attempts_used: usize,
    pub has_solved: bool,
}

impl PuzzleProgress {
    pub fn from_attempts(attempts: &[PuzzleAttempt]) -> Self {
        Self {
            attempts_used: attempts.len(),
            has_solved: attempts.iter().any(|a| a.is_correct),
        }
    }

    pub fn attempts_remaining(&self) -> u8 {
        let used = u8::try_from(self.attempts_used).unwrap_or(u8::MAX);
        MAX_ATTEMPTS.saturating_sub(used)
    }

    pub fn state(&self) -> PuzzleState {
        match self.attempts_used {
            0 => PuzzleState::NoAttempt,
            1 => PuzzleState::OneAttempt,
            _ => PuzzleState::Exhausted,
        }
    }

    /// Slot for the next submission; `None` once exhausted
    pub fn next_attempt(&self) -> Option<AttemptNumber> {
        AttemptNumber::after(self.attempts_used)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::{PostId, UserId};

    fn attempt(number: u8, is_correct: bool) -> PuzzleAttempt {
        PuzzleAttempt::record(
            UserId::new(),
            PostId::new(),
            "e4".to_string(),
            is_correct,
            AttemptNumber::from_db(i16::from(number)).unwrap(),
        )
    }

    #[test]
    fn test_attempt_number_bounds() {
        assert_eq!(AttemptNumber::after(0), Some(AttemptNumber::FIRST));
        assert_eq!(AttemptNumber::after(1).map(|n| n.get()), Some(2));
        assert_eq!(AttemptNumber::after(2), None);
        assert_eq!(AttemptNumber::from_db(0), None);
        assert_eq!(AttemptNumber::from_db(3), None);
        assert_eq!(AttemptNumber::FIRST.remaining_after(), 1);
    }

    #[test]
    fn test_progress_states() {
        let none = PuzzleProgress::from_attempts(&[]);
        assert_eq!(none.state(), PuzzleState::NoAttempt);
        assert_eq!(none.attempts_remaining(), 2);

        // A correct first attempt still leaves a slot
        let one = PuzzleProgress::from_attempts(&[attempt(1, true)]);
        assert_eq!(one.state(), PuzzleState::OneAttempt);
        assert!(one.has_solved);
        assert_eq!(one.next_attempt().map(|n| n.get()), Some(2));

        let done = PuzzleProgress::from_attempts(&[attempt(1, false), attempt(2, false)]);
        assert_eq!(done.state(), PuzzleState::Exhausted);
        assert_eq!(done.attempts_remaining(), 0);
        assert!(!done.has_solved);
        assert_eq!(done.next_attempt(), None);
    }
}
