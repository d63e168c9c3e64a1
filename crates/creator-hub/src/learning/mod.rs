//! Quizzes, attempt history, and learning progress (21-day challenge, course videos).

pub mod attempt;
pub mod progress;
pub mod quiz;
pub mod repository;
pub mod router;
pub mod service;

pub use attempt::{best_attempt, QuizAttempt};
pub use progress::{
    watch_percentage, ChallengeDayRecord, ChallengeProgress, CourseProgress, VideoProgressRecord,
    CHALLENGE_LENGTH_DAYS,
};
pub use quiz::{
    score, AnswerId, QuestionId, QuizAnswer, QuizAnswerKey, QuizDefinition, QuizDefinitionError,
    QuizId, QuizOutcome, QuizQuestion, QuizScore, SubmittedAnswers,
};
pub use repository::{AttemptRepository, QuizRepository};
pub use router::{quiz_router, AttemptRequest};
pub use service::{AttemptHistory, QuizService, QuizServiceError, QuizSubmission};
