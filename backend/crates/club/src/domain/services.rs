//! Domain Services
//!
//! Pure puzzle logic: answer comparison and outcome messaging.

use crate::domain::entities::Puzzle;

pub const CORRECT_MESSAGE: &str = "Correct! Well done!";
pub const OUT_OF_ATTEMPTS_MESSAGE: &str = "Incorrect. No more attempts remaining.";
pub const EXHAUSTED_MESSAGE: &str = "You have used all your attempts for this puzzle";

/// Full-string match after trimming, ignoring case
pub fn answers_match(submitted: &str, expected: &str) -> bool {
    submitted.trim().to_lowercase() == expected.trim().to_lowercase()
}

/// Message for a recorded attempt
pub fn outcome_message(puzzle: &Puzzle, is_correct: bool, attempts_remaining: u8) -> String {
    if is_correct {
        return puzzle
            .success_message
            .clone()
            .unwrap_or_else(|| CORRECT_MESSAGE.to_string());
    }

    if attempts_remaining > 0 {
        format!("Incorrect. You have {attempts_remaining} attempt(s) remaining.")
    } else {
        puzzle
            .failure_message
            .clone()
            .unwrap_or_else(|| OUT_OF_ATTEMPTS_MESSAGE.to_string())
    }
}
