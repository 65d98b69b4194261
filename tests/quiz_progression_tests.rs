use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use quizgen_server::errors::{AppError, AppResult};
use quizgen_server::models::domain::{
    KeywordWikidataLink, KnowledgeRecord, QuizSession, Video,
};
use quizgen_server::models::dto::QuizQuery;
use quizgen_server::services::{
    CompletionBackend, KnowledgeSource, QuizAdvance, QuizService, VideoService,
};

const QUIZ_JSON: &str = r#"{"question": "本能寺の変で織田信長を討ったのは誰？", "choices": ["明智光秀", "豊臣秀吉", "徳川家康", "武田信玄"], "answerIndex": 0}"#;

/// Records every prompt it sees and answers with fenced JSON, the way the
/// real backend often does despite instructions.
#[derive(Default)]
struct JsonBackend {
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl CompletionBackend for JsonBackend {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(format!("```json\n{}\n```", QUIZ_JSON))
    }
}

#[derive(Default)]
struct CountingBackend {
    calls: AtomicUsize,
}

#[async_trait]
impl CompletionBackend for CountingBackend {
    async fn complete(&self, _prompt: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(QUIZ_JSON.to_string())
    }
}

struct FailingBackend;

#[async_trait]
impl CompletionBackend for FailingBackend {
    async fn complete(&self, _prompt: &str) -> AppResult<String> {
        Err(AppError::BackendUnavailable("connection refused".into()))
    }
}

/// Serves a canned record and keeps the ids it was asked for.
#[derive(Default)]
struct StaticKnowledge {
    requested: Mutex<Vec<String>>,
}

#[async_trait]
impl KnowledgeSource for StaticKnowledge {
    async fn fetch(&self, entity_id: &str) -> Option<KnowledgeRecord> {
        self.requested.lock().unwrap().push(entity_id.to_string());
        Some(KnowledgeRecord::new(entity_id, "本能寺の変"))
    }
}

fn catalog() -> Vec<Video> {
    vec![Video::new(
        "戦国の世",
        "https://example.com/v1",
        "t1.jpg",
        "6",
        "本能寺の変 織田信長",
        vec![KeywordWikidataLink::new(
            "本能寺の変",
            "http://www.wikidata.org/entity/Q23718",
        )],
    )]
}

fn query(index: usize, is_correct: Option<bool>, counts: (u32, u32)) -> QuizQuery {
    QuizQuery {
        keyword: "本能寺の変 織田信長".to_string(),
        grade: "6".to_string(),
        index,
        is_correct,
        correct_count: counts.0,
        total_count: counts.1,
    }
}

#[actix_web::test]
async fn full_quiz_run_resets_scores_questions_and_finishes() {
    let knowledge = Arc::new(StaticKnowledge::default());
    let backend = Arc::new(JsonBackend::default());
    let service = QuizService::new(
        Arc::new(VideoService::new(catalog())),
        knowledge.clone(),
        backend.clone(),
        true,
    );

    // First request: stale counts from an earlier run must be reset.
    let (session, advance) = service.advance(&query(0, None, (4, 7))).await;
    assert_eq!(session, QuizSession::default());
    match advance {
        QuizAdvance::Question {
            quiz,
            knowledge,
            current_index,
            next_index,
            total_questions,
        } => {
            assert_eq!(quiz.choices.len(), 4);
            assert_eq!(current_index, 0);
            assert_eq!(next_index, 1);
            assert_eq!(total_questions, 2);
            assert_eq!(knowledge.unwrap().entity_id, "Q23718");
        }
        other => panic!("expected Question, got {:?}", other),
    }

    // Second request: previous answer was correct, keyword has no link.
    let (session, advance) = service.advance(&query(1, Some(true), (0, 0))).await;
    assert_eq!(session, QuizSession::new(1, 1));
    match advance {
        QuizAdvance::Question {
            knowledge,
            next_index,
            ..
        } => {
            assert!(knowledge.is_none());
            assert_eq!(next_index, 2);
        }
        other => panic!("expected Question, got {:?}", other),
    }

    // Past the end: finished, with or without the last correctness flag.
    let (session, advance) = service.advance(&query(2, None, (1, 1))).await;
    assert_eq!(session, QuizSession::new(1, 1));
    assert!(matches!(advance, QuizAdvance::Finished { .. }));

    let (session, _) = service.advance(&query(2, Some(false), (1, 1))).await;
    assert_eq!(session, QuizSession::new(1, 2));

    // Enrichment hit the knowledge source once, for the linked keyword only.
    assert_eq!(*knowledge.requested.lock().unwrap(), vec!["Q23718"]);

    // The first prompt carried the reference block, the second did not.
    let prompts = backend.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].contains("「本能寺の変」"));
    assert!(prompts[0].contains("参考情報"));
    assert!(prompts[1].contains("「織田信長」"));
    assert!(!prompts[1].contains("参考情報"));
}

#[actix_web::test]
async fn finished_position_performs_no_generation() {
    let backend = Arc::new(CountingBackend::default());
    let service = QuizService::new(
        Arc::new(VideoService::new(catalog())),
        Arc::new(StaticKnowledge::default()),
        backend.clone(),
        true,
    );

    let (session, advance) = service.advance(&query(5, Some(true), (1, 1))).await;

    assert_eq!(session, QuizSession::new(2, 2));
    match advance {
        QuizAdvance::Finished { grade } => assert_eq!(grade, "6"),
        other => panic!("expected Finished, got {:?}", other),
    }
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[actix_web::test]
async fn backend_failure_is_inline_and_scores_survive() {
    let service = QuizService::new(
        Arc::new(VideoService::new(catalog())),
        Arc::new(StaticKnowledge::default()),
        Arc::new(FailingBackend),
        false,
    );

    let (session, advance) = service.advance(&query(1, Some(true), (0, 0))).await;

    assert_eq!(session, QuizSession::new(1, 1));
    match advance {
        QuizAdvance::Unavailable { message } => {
            assert!(message.contains("connection refused"));
        }
        other => panic!("expected Unavailable, got {:?}", other),
    }

    // The same run can still finish afterwards.
    let (session, advance) = service.advance(&query(2, Some(false), (1, 1))).await;
    assert_eq!(session, QuizSession::new(1, 2));
    assert!(matches!(advance, QuizAdvance::Finished { .. }));
}
