use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::quiz::{QuizId, QuizScore, SubmittedAnswers};
use crate::creators::CreatorHandle;

/// One graded submission, persisted by the caller exactly once per scored attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub creator_handle: CreatorHandle,
    pub quiz_id: QuizId,
    /// Rounded percentage shown to the creator.
    pub score: u32,
    pub correct_count: u32,
    pub passed: bool,
    pub answers: SubmittedAnswers,
    pub submitted_at: DateTime<Utc>,
}

impl QuizAttempt {
    pub fn record(
        creator_handle: CreatorHandle,
        quiz_id: QuizId,
        score: &QuizScore,
        answers: SubmittedAnswers,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            creator_handle,
            quiz_id,
            score: score.score_percentage,
            correct_count: score.correct_count,
            passed: score.passed,
            answers,
            submitted_at,
        }
    }
}

/// Best result so far across a creator's attempts at one quiz.
pub fn best_attempt(attempts: &[QuizAttempt]) -> Option<&QuizAttempt> {
    attempts
        .iter()
        .max_by(|left, right| {
            (left.passed, left.score, left.submitted_at)
                .cmp(&(right.passed, right.score, right.submitted_at))
        })
}
