use creator_hub::creators::{
    CreatorHandle, CreatorId, CreatorRecord, CreatorRepository, ManagerId,
};
use creator_hub::learning::{
    AnswerId, AttemptRepository, QuestionId, QuizAnswer, QuizAttempt, QuizDefinition, QuizId,
    QuizQuestion, QuizRepository,
};
use creator_hub::RepositoryError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

pub(crate) const DEMO_MANAGER: &str = "mgr-demo";
pub(crate) const ONBOARDING_QUIZ: &str = "agency-onboarding";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("in-memory store poisoned".to_string()))
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCreatorRepository {
    records: Arc<Mutex<HashMap<CreatorHandle, CreatorRecord>>>,
}

impl InMemoryCreatorRepository {
    pub(crate) fn seeded() -> Self {
        let repository = Self::default();
        if let Ok(mut guard) = repository.records.lock() {
            for record in seed_creators() {
                guard.insert(record.creator_handle.clone(), record);
            }
        }
        repository
    }
}

impl CreatorRepository for InMemoryCreatorRepository {
    fn fetch_by_handle(
        &self,
        handle: &CreatorHandle,
    ) -> Result<Option<CreatorRecord>, RepositoryError> {
        let guard = lock(&self.records)?;
        Ok(guard.get(handle).cloned())
    }

    fn assigned_to(&self, manager_id: &ManagerId) -> Result<Vec<CreatorRecord>, RepositoryError> {
        let guard = lock(&self.records)?;
        Ok(guard
            .values()
            .filter(|record| record.assigned_manager_id.as_ref() == Some(manager_id))
            .cloned()
            .collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryQuizRepository {
    quizzes: Arc<Mutex<HashMap<QuizId, QuizDefinition>>>,
}

impl InMemoryQuizRepository {
    pub(crate) fn seeded() -> Self {
        let repository = Self::default();
        if let Ok(mut guard) = repository.quizzes.lock() {
            let quiz = onboarding_quiz();
            guard.insert(quiz.id.clone(), quiz);
        }
        repository
    }
}

impl QuizRepository for InMemoryQuizRepository {
    fn fetch(&self, quiz_id: &QuizId) -> Result<Option<QuizDefinition>, RepositoryError> {
        let guard = lock(&self.quizzes)?;
        Ok(guard.get(quiz_id).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAttemptRepository {
    attempts: Arc<Mutex<Vec<QuizAttempt>>>,
}

impl AttemptRepository for InMemoryAttemptRepository {
    fn record(&self, attempt: QuizAttempt) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.attempts)?;
        guard.push(attempt);
        Ok(())
    }

    fn attempts_for(
        &self,
        creator: &CreatorHandle,
        quiz_id: &QuizId,
    ) -> Result<Vec<QuizAttempt>, RepositoryError> {
        let guard = lock(&self.attempts)?;
        Ok(guard
            .iter()
            .filter(|attempt| &attempt.creator_handle == creator && &attempt.quiz_id == quiz_id)
            .cloned()
            .collect())
    }
}

fn creator(
    handle: &str,
    name: (&str, &str),
    status: Option<&str>,
    total_diamonds: i64,
    live_days: i64,
    live_hours: i64,
) -> CreatorRecord {
    CreatorRecord {
        id: CreatorId(format!("c-{handle}")),
        creator_handle: CreatorHandle(handle.to_string()),
        first_name: name.0.to_string(),
        last_name: name.1.to_string(),
        region: Some("USA / Canada".to_string()),
        diamonds_monthly: Some(total_diamonds / 3),
        total_diamonds: Some(total_diamonds),
        diamonds_30d: Some(total_diamonds / 3),
        live_days_30d: Some(live_days),
        live_duration_seconds_30d: Some(live_hours * 3600),
        graduation_status: status.map(str::to_string),
        silver_target: None,
        gold_target: None,
        assigned_manager_id: Some(ManagerId(DEMO_MANAGER.to_string())),
        is_active: true,
    }
}

/// Sample roster covering each tier plus a creator who misses every gate.
pub(crate) fn seed_creators() -> Vec<CreatorRecord> {
    vec![
        creator(
            "nova.streams",
            ("Nova", "Reyes"),
            Some("Gold"),
            2_400_000,
            24,
            118,
        ),
        creator(
            "kai.live",
            ("Kai", "Morgan"),
            Some("Silver"),
            640_000,
            21,
            72,
        ),
        creator("juniper", ("Juniper", "Lee"), None, 180_000, 16, 44),
        creator(
            "rookie.rae",
            ("Rae", "Okafor"),
            Some("Rookie (New)"),
            35_000,
            6,
            9,
        ),
    ]
}

/// Eight-question onboarding quiz; six correct answers pass.
pub(crate) fn onboarding_quiz() -> QuizDefinition {
    let questions = [
        (
            "How many valid live days does the Ascensus tier require?",
            ["15", "10", "22"],
        ),
        (
            "How many live hours does the Expert tier require?",
            ["60", "40", "100"],
        ),
        (
            "Which tier starts at 1.6M diamonds?",
            ["Elite", "Expert", "Ascensus"],
        ),
        (
            "Are partial hours counted toward the hours requirement?",
            ["No, only whole hours", "Yes, rounded up", "Yes, as fractions"],
        ),
        (
            "What is the default Silver graduation target?",
            ["200,000 diamonds", "100,000 diamonds", "500,000 diamonds"],
        ),
        (
            "What is the default Gold graduation target?",
            ["500,000 diamonds", "1,000,000 diamonds", "250,000 diamonds"],
        ),
        (
            "How long is the streaming challenge?",
            ["21 days", "14 days", "30 days"],
        ),
        (
            "Who should you contact about your tier payout?",
            ["Your agency manager", "Platform support", "Other creators"],
        ),
    ];

    let questions = questions
        .iter()
        .zip(1u32..)
        .map(|((text, answers), index)| QuizQuestion {
            id: QuestionId(format!("q{index}")),
            text: text.to_string(),
            order_index: index,
            answers: answers
                .iter()
                .zip(0u32..)
                .map(|(answer, position)| QuizAnswer {
                    id: AnswerId(format!("q{index}-{position}")),
                    text: answer.to_string(),
                    // First option is the correct one; clients shuffle for display.
                    is_correct: position == 0,
                    order_index: position,
                })
                .collect(),
        })
        .collect();

    QuizDefinition {
        id: QuizId(ONBOARDING_QUIZ.to_string()),
        title: "Agency onboarding".to_string(),
        required_correct_answers: 6,
        questions,
    }
}
