use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for course quizzes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuizId(pub String);

impl fmt::Display for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnswerId(pub String);

/// The single correct answer for every question in a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizAnswerKey(BTreeMap<QuestionId, AnswerId>);

impl QuizAnswerKey {
    pub fn new(entries: BTreeMap<QuestionId, AnswerId>) -> Self {
        Self(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn correct_answer(&self, question: &QuestionId) -> Option<&AnswerId> {
        self.0.get(question)
    }

    pub fn questions(&self) -> impl Iterator<Item = &QuestionId> {
        self.0.keys()
    }
}

impl FromIterator<(QuestionId, AnswerId)> for QuizAnswerKey {
    fn from_iter<I: IntoIterator<Item = (QuestionId, AnswerId)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A creator's selections, keyed by question.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmittedAnswers(BTreeMap<QuestionId, AnswerId>);

impl SubmittedAnswers {
    pub fn new(entries: BTreeMap<QuestionId, AnswerId>) -> Self {
        Self(entries)
    }

    pub fn select(&mut self, question: QuestionId, answer: AnswerId) {
        self.0.insert(question, answer);
    }

    pub fn answer_for(&self, question: &QuestionId) -> Option<&AnswerId> {
        self.0.get(question)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(QuestionId, AnswerId)> for SubmittedAnswers {
    fn from_iter<I: IntoIterator<Item = (QuestionId, AnswerId)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Result of grading a complete submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizScore {
    pub correct_count: u32,
    pub total_questions: u32,
    pub score_percentage: u32,
    pub required_correct: u32,
    pub passed: bool,
}

/// Grading outcome. An incomplete submission is not a failing grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum QuizOutcome {
    Incomplete { missing: Vec<QuestionId> },
    Scored(QuizScore),
}

impl QuizOutcome {
    pub fn summary(&self) -> String {
        match self {
            QuizOutcome::Incomplete { missing } => {
                format!("{} question(s) remaining", missing.len())
            }
            QuizOutcome::Scored(score) if score.passed => format!(
                "passed with {}/{} correct ({}%)",
                score.correct_count, score.total_questions, score.score_percentage
            ),
            QuizOutcome::Scored(score) => format!(
                "not passed: {}/{} correct, {} required",
                score.correct_count, score.total_questions, score.required_correct
            ),
        }
    }
}

/// Grades `submitted` against `key`. Passing is decided by the absolute
/// `required_correct` count, never by the percentage.
pub fn score(
    submitted: &SubmittedAnswers,
    key: &QuizAnswerKey,
    required_correct: u32,
) -> QuizOutcome {
    let missing: Vec<QuestionId> = key
        .questions()
        .filter(|question| submitted.answer_for(question).is_none())
        .cloned()
        .collect();

    if !missing.is_empty() {
        return QuizOutcome::Incomplete { missing };
    }

    let correct_count = key
        .0
        .iter()
        .filter(|(question, answer)| submitted.answer_for(question) == Some(*answer))
        .count() as u32;
    let total_questions = key.len() as u32;

    QuizOutcome::Scored(QuizScore {
        correct_count,
        total_questions,
        score_percentage: rounded_percentage(correct_count, total_questions),
        required_correct,
        passed: correct_count >= required_correct,
    })
}

// Half-up rounding in integer space so 1/8 and friends never pick up float noise.
fn rounded_percentage(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (correct, total) = (u64::from(correct), u64::from(total));
    ((200 * correct + total) / (2 * total)) as u32
}

/// A quiz as stored by the backend, answers flagged with `is_correct`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDefinition {
    pub id: QuizId,
    pub title: String,
    #[serde(default)]
    pub required_correct_answers: u32,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: QuestionId,
    pub text: String,
    #[serde(default)]
    pub order_index: u32,
    pub answers: Vec<QuizAnswer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub id: AnswerId,
    pub text: String,
    pub is_correct: bool,
    #[serde(default)]
    pub order_index: u32,
}

impl QuizDefinition {
    /// Builds the answer key; every question must flag exactly one correct answer.
    pub fn answer_key(&self) -> Result<QuizAnswerKey, QuizDefinitionError> {
        let mut key = BTreeMap::new();

        for question in &self.questions {
            let mut correct = question.answers.iter().filter(|answer| answer.is_correct);
            let answer = correct
                .next()
                .ok_or_else(|| QuizDefinitionError::NoCorrectAnswer(question.id.clone()))?;
            if correct.next().is_some() {
                return Err(QuizDefinitionError::MultipleCorrectAnswers(
                    question.id.clone(),
                ));
            }
            if key.insert(question.id.clone(), answer.id.clone()).is_some() {
                return Err(QuizDefinitionError::DuplicateQuestion(question.id.clone()));
            }
        }

        Ok(QuizAnswerKey(key))
    }

    /// Questions in presentation order.
    pub fn ordered_questions(&self) -> Vec<&QuizQuestion> {
        let mut questions: Vec<&QuizQuestion> = self.questions.iter().collect();
        questions.sort_by_key(|question| question.order_index);
        questions
    }

    pub fn score(&self, submitted: &SubmittedAnswers) -> Result<QuizOutcome, QuizDefinitionError> {
        let key = self.answer_key()?;
        Ok(score(submitted, &key, self.required_correct_answers))
    }
}

/// Reasons a stored quiz cannot be graded.
#[derive(Debug, thiserror::Error)]
pub enum QuizDefinitionError {
    #[error("question {0:?} has no correct answer")]
    NoCorrectAnswer(QuestionId),
    #[error("question {0:?} flags more than one correct answer")]
    MultipleCorrectAnswers(QuestionId),
    #[error("question {0:?} appears more than once")]
    DuplicateQuestion(QuestionId),
}
