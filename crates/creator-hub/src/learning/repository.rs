use super::attempt::QuizAttempt;
use super::quiz::{QuizDefinition, QuizId};
use crate::creators::CreatorHandle;
use crate::repository::RepositoryError;

/// Source of quiz definitions (questions with flagged answers).
pub trait QuizRepository: Send + Sync {
    fn fetch(&self, quiz_id: &QuizId) -> Result<Option<QuizDefinition>, RepositoryError>;
}

/// Sink for graded attempts.
pub trait AttemptRepository: Send + Sync {
    fn record(&self, attempt: QuizAttempt) -> Result<(), RepositoryError>;
    fn attempts_for(
        &self,
        creator: &CreatorHandle,
        quiz_id: &QuizId,
    ) -> Result<Vec<QuizAttempt>, RepositoryError>;
}
