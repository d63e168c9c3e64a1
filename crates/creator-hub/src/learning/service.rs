use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::attempt::{best_attempt, QuizAttempt};
use super::quiz::{QuizDefinitionError, QuizId, QuizOutcome, SubmittedAnswers};
use super::repository::{AttemptRepository, QuizRepository};
use crate::creators::CreatorHandle;
use crate::repository::RepositoryError;

/// What the caller gets back from a submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizSubmission {
    pub quiz_id: QuizId,
    pub creator_handle: CreatorHandle,
    pub result: QuizOutcome,
    /// Present only when the submission was scored and persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt: Option<QuizAttempt>,
}

/// Attempt history for one creator and quiz.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttemptHistory {
    pub attempts: Vec<QuizAttempt>,
    pub ever_passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_score: Option<u32>,
}

/// Service composing quiz lookup, grading, and attempt persistence.
pub struct QuizService<Q, A> {
    quizzes: Arc<Q>,
    attempts: Arc<A>,
}

impl<Q, A> QuizService<Q, A>
where
    Q: QuizRepository + 'static,
    A: AttemptRepository + 'static,
{
    pub fn new(quizzes: Arc<Q>, attempts: Arc<A>) -> Self {
        Self { quizzes, attempts }
    }

    /// Grade a submission and persist one attempt when it is complete.
    pub fn submit(
        &self,
        creator: &CreatorHandle,
        quiz_id: &QuizId,
        answers: SubmittedAnswers,
    ) -> Result<QuizSubmission, QuizServiceError> {
        let quiz = self
            .quizzes
            .fetch(quiz_id)?
            .ok_or_else(|| QuizServiceError::QuizNotFound(quiz_id.clone()))?;

        let outcome = quiz.score(&answers)?;

        let attempt = match &outcome {
            QuizOutcome::Incomplete { missing } => {
                warn!(
                    creator = %creator,
                    quiz = %quiz_id,
                    remaining = missing.len(),
                    "quiz submitted with unanswered questions"
                );
                None
            }
            QuizOutcome::Scored(score) => {
                let attempt = QuizAttempt::record(
                    creator.clone(),
                    quiz_id.clone(),
                    score,
                    answers,
                    Utc::now(),
                );
                self.attempts.record(attempt.clone())?;
                info!(
                    creator = %creator,
                    quiz = %quiz_id,
                    score = score.score_percentage,
                    passed = score.passed,
                    "quiz attempt recorded"
                );
                Some(attempt)
            }
        };

        Ok(QuizSubmission {
            quiz_id: quiz_id.clone(),
            creator_handle: creator.clone(),
            result: outcome,
            attempt,
        })
    }

    pub fn history(
        &self,
        creator: &CreatorHandle,
        quiz_id: &QuizId,
    ) -> Result<AttemptHistory, QuizServiceError> {
        let attempts = self.attempts.attempts_for(creator, quiz_id)?;
        let best_score = best_attempt(&attempts).map(|attempt| attempt.score);
        let ever_passed = attempts.iter().any(|attempt| attempt.passed);

        Ok(AttemptHistory {
            attempts,
            ever_passed,
            best_score,
        })
    }
}

/// Error raised by the quiz service.
#[derive(Debug, thiserror::Error)]
pub enum QuizServiceError {
    #[error("quiz `{0}` not found")]
    QuizNotFound(QuizId),
    #[error(transparent)]
    Definition(#[from] QuizDefinitionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
