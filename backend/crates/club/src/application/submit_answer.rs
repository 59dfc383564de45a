//! Submit Answer Use Case
//!
//! The puzzle attempt engine. State per (user, puzzle) comes from the attempt
//! log; each submission claims the next numbered slot with a conditional
//! insert, so two concurrent submissions can never share a number.

use std::sync::Arc;

use kernel::id::PostId;
use membership::domain::entity::user::User;

use crate::domain::entities::PuzzleAttempt;
use crate::domain::repository::{AppendOutcome, ClubStore};
use crate::domain::services::{EXHAUSTED_MESSAGE, answers_match, outcome_message};
use crate::domain::value_objects::{MAX_ATTEMPTS, PuzzleProgress};
use crate::error::{ClubError, ClubResult};

/// Submission result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub success: bool,
    pub message: String,
    pub attempts_remaining: u8,
    pub is_correct: bool,
}

impl SubmissionOutcome {
    fn exhausted() -> Self {
        Self {
            success: false,
            message: EXHAUSTED_MESSAGE.to_string(),
            attempts_remaining: 0,
            is_correct: false,
        }
    }
}

pub struct SubmitAnswerUseCase<R>
where
    R: ClubStore,
{
    repo: Arc<R>,
}

impl<R> SubmitAnswerUseCase<R>
where
    R: ClubStore,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        caller: &User,
        post_id: &str,
        answer: String,
    ) -> ClubResult<SubmissionOutcome> {
        let post_id: PostId = post_id.parse().map_err(|_| ClubError::PostNotFound)?;
        let post = self
            .repo
            .find_post(&post_id)
            .await?
            .ok_or(ClubError::PostNotFound)?;
        let puzzle = post.puzzle.as_ref().ok_or(ClubError::NotAPuzzle)?;

        let is_correct = answers_match(&answer, &puzzle.answer);

        // Each lost race means another slot got filled, so the loop ends by
        // the cap at the latest.
        for _ in 0..=MAX_ATTEMPTS {
            let attempts = self.repo.attempts_for(&caller.user_id, &post_id).await?;
            let progress = PuzzleProgress::from_attempts(&attempts);

            let Some(number) = progress.next_attempt() else {
                tracing::debug!(
                    user_id = %caller.user_id,
                    post_id = %post_id,
                    "Submission after attempts exhausted"
                );
                return Ok(SubmissionOutcome::exhausted());
            };

            let attempt =
                PuzzleAttempt::record(caller.user_id, post_id, answer.clone(), is_correct, number);

            match self.repo.append_attempt(&attempt).await? {
                AppendOutcome::Appended => {
                    let attempts_remaining = number.remaining_after();
                    tracing::info!(
                        user_id = %caller.user_id,
                        post_id = %post_id,
                        attempt_number = number.get(),
                        is_correct = is_correct,
                        "Puzzle attempt recorded"
                    );

                    return Ok(SubmissionOutcome {
                        success: is_correct,
                        message: outcome_message(puzzle, is_correct, attempts_remaining),
                        attempts_remaining,
                        is_correct,
                    });
                }
                AppendOutcome::SlotTaken => {
                    tracing::debug!(
                        user_id = %caller.user_id,
                        post_id = %post_id,
                        attempt_number = number.get(),
                        "Attempt slot taken concurrently, recounting"
                    );
                }
            }
        }

        Err(ClubError::SubmissionConflict)
    }
}
