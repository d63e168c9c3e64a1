//! Quiz grading and attempt persistence through the service and HTTP router.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use creator_hub::creators::CreatorHandle;
    use creator_hub::learning::{
        AnswerId, AttemptRepository, QuestionId, QuizAnswer, QuizAttempt, QuizDefinition, QuizId,
        QuizQuestion, QuizRepository, QuizService, SubmittedAnswers,
    };
    use creator_hub::RepositoryError;

    #[derive(Default, Clone)]
    pub(super) struct MemoryQuizzes {
        quizzes: Arc<Mutex<HashMap<QuizId, QuizDefinition>>>,
    }

    impl MemoryQuizzes {
        pub(super) fn insert(&self, quiz: QuizDefinition) {
            let mut guard = self.quizzes.lock().expect("quiz mutex poisoned");
            guard.insert(quiz.id.clone(), quiz);
        }
    }

    impl QuizRepository for MemoryQuizzes {
        fn fetch(&self, quiz_id: &QuizId) -> Result<Option<QuizDefinition>, RepositoryError> {
            let guard = self.quizzes.lock().expect("quiz mutex poisoned");
            Ok(guard.get(quiz_id).cloned())
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryAttempts {
        attempts: Arc<Mutex<Vec<QuizAttempt>>>,
    }

    impl MemoryAttempts {
        pub(super) fn count(&self) -> usize {
            self.attempts.lock().expect("attempt mutex poisoned").len()
        }
    }

    impl AttemptRepository for MemoryAttempts {
        fn record(&self, attempt: QuizAttempt) -> Result<(), RepositoryError> {
            let mut guard = self.attempts.lock().expect("attempt mutex poisoned");
            guard.push(attempt);
            Ok(())
        }

        fn attempts_for(
            &self,
            creator: &CreatorHandle,
            quiz_id: &QuizId,
        ) -> Result<Vec<QuizAttempt>, RepositoryError> {
            let guard = self.attempts.lock().expect("attempt mutex poisoned");
            Ok(guard
                .iter()
                .filter(|attempt| &attempt.creator_handle == creator && &attempt.quiz_id == quiz_id)
                .cloned()
                .collect())
        }
    }

    /// Eight questions, answer `a` correct on each, six needed to pass.
    pub(super) fn onboarding_quiz() -> QuizDefinition {
        let questions = (1..=8)
            .map(|index| QuizQuestion {
                id: QuestionId(format!("q{index}")),
                text: format!("Question {index}"),
                order_index: index,
                answers: ["a", "b", "c"]
                    .iter()
                    .enumerate()
                    .map(|(position, label)| QuizAnswer {
                        id: AnswerId(format!("q{index}-{label}")),
                        text: label.to_string(),
                        is_correct: *label == "a",
                        order_index: position as u32,
                    })
                    .collect(),
            })
            .collect();

        QuizDefinition {
            id: QuizId("onboarding".to_string()),
            title: "Agency onboarding".to_string(),
            required_correct_answers: 6,
            questions,
        }
    }

    /// Answers the first `answered` questions, `correct` of them correctly.
    pub(super) fn answers(answered: u32, correct: u32) -> SubmittedAnswers {
        (1..=answered)
            .map(|index| {
                let label = if index <= correct { "a" } else { "b" };
                (
                    QuestionId(format!("q{index}")),
                    AnswerId(format!("q{index}-{label}")),
                )
            })
            .collect()
    }

    pub(super) fn harness() -> (
        Arc<QuizService<MemoryQuizzes, MemoryAttempts>>,
        MemoryAttempts,
    ) {
        let quizzes = MemoryQuizzes::default();
        quizzes.insert(onboarding_quiz());
        let attempts = MemoryAttempts::default();
        let service = QuizService::new(Arc::new(quizzes), Arc::new(attempts.clone()));
        (Arc::new(service), attempts)
    }
}

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use common::*;
use creator_hub::creators::CreatorHandle;
use creator_hub::learning::{quiz_router, QuizId, QuizOutcome, QuizServiceError};
use serde_json::{json, Value};
use tower::ServiceExt;

fn creator() -> CreatorHandle {
    CreatorHandle("luna.live".to_string())
}

fn quiz() -> QuizId {
    QuizId("onboarding".to_string())
}

async fn post_attempt(
    router: axum::Router,
    quiz_id: &str,
    body: Value,
) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::post(format!("/api/v1/quizzes/{quiz_id}/attempts"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

#[test]
fn passing_submission_is_recorded_once() {
    let (service, attempts) = harness();

    let submission = service
        .submit(&creator(), &quiz(), answers(8, 6))
        .expect("submission grades");

    match submission.result {
        QuizOutcome::Scored(score) => {
            assert_eq!(score.correct_count, 6);
            assert_eq!(score.total_questions, 8);
            assert_eq!(score.score_percentage, 75);
            assert!(score.passed);
        }
        other => panic!("expected a scored outcome, got {other:?}"),
    }
    assert!(submission.attempt.is_some());
    assert_eq!(attempts.count(), 1);
}

#[test]
fn failing_submission_is_still_recorded() {
    let (service, attempts) = harness();

    let submission = service
        .submit(&creator(), &quiz(), answers(8, 5))
        .expect("submission grades");

    match submission.result {
        QuizOutcome::Scored(score) => {
            // 5/8 = 62.5% rounds half-up.
            assert_eq!(score.score_percentage, 63);
            assert!(!score.passed);
        }
        other => panic!("expected a scored outcome, got {other:?}"),
    }
    assert_eq!(attempts.count(), 1);
}

#[test]
fn incomplete_submission_is_not_persisted() {
    let (service, attempts) = harness();

    let submission = service
        .submit(&creator(), &quiz(), answers(6, 6))
        .expect("submission grades");

    match submission.result {
        QuizOutcome::Incomplete { missing } => {
            let ids: Vec<_> = missing.iter().map(|question| question.0.as_str()).collect();
            assert_eq!(ids, ["q7", "q8"]);
        }
        other => panic!("expected an incomplete outcome, got {other:?}"),
    }
    assert!(submission.attempt.is_none());
    assert_eq!(attempts.count(), 0);
}

#[test]
fn history_tracks_best_score_and_pass() {
    let (service, _) = harness();
    service
        .submit(&creator(), &quiz(), answers(8, 4))
        .expect("first attempt");
    service
        .submit(&creator(), &quiz(), answers(8, 7))
        .expect("second attempt");

    let history = service.history(&creator(), &quiz()).expect("history loads");

    assert_eq!(history.attempts.len(), 2);
    assert!(history.ever_passed);
    assert_eq!(history.best_score, Some(88));

    let other = service
        .history(&CreatorHandle("someone.else".to_string()), &quiz())
        .expect("history loads");
    assert!(other.attempts.is_empty());
    assert_eq!(other.best_score, None);
}

#[test]
fn unknown_quiz_is_reported() {
    let (service, attempts) = harness();

    let result = service.submit(&creator(), &QuizId("missing".to_string()), answers(8, 8));

    assert!(matches!(result, Err(QuizServiceError::QuizNotFound(_))));
    assert_eq!(attempts.count(), 0);
}

#[tokio::test]
async fn attempt_route_maps_outcomes_to_status_codes() {
    let (service, attempts) = harness();
    let router = quiz_router(service);

    let full: Value = serde_json::to_value(answers(8, 8)).expect("answers serialize");
    let (status, body) = post_attempt(
        router.clone(),
        "onboarding",
        json!({ "creator_handle": "luna.live", "answers": full }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["outcome"], "scored");
    assert_eq!(body["result"]["score_percentage"], 100);
    assert_eq!(body["attempt"]["passed"], true);

    let partial: Value = serde_json::to_value(answers(3, 3)).expect("answers serialize");
    let (status, body) = post_attempt(
        router.clone(),
        "onboarding",
        json!({ "creator_handle": "luna.live", "answers": partial }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["result"]["outcome"], "incomplete");
    assert_eq!(body["result"]["missing"].as_array().map(Vec::len), Some(5));
    assert!(body.get("attempt").is_none());

    let (status, body) = post_attempt(
        router,
        "does-not-exist",
        json!({ "creator_handle": "luna.live", "answers": {} }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"]
        .as_str()
        .expect("error text")
        .contains("does-not-exist"));

    assert_eq!(attempts.count(), 1);
}
