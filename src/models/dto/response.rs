use serde::Serialize;

use crate::models::domain::{KnowledgeRecord, Quiz, QuizSession};
use crate::services::quiz_service::QuizAdvance;

/// Payload returned by the quiz-advancement endpoint. Exactly one of the
/// three shapes, tagged by `status`, always carrying the running counts.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum QuizStepResponse {
    #[serde(rename_all = "camelCase")]
    Question {
        quiz: Quiz,
        #[serde(skip_serializing_if = "Option::is_none")]
        knowledge_record: Option<KnowledgeRecord>,
        current_index: usize,
        next_index: usize,
        total_questions: usize,
        correct_count: u32,
        total_count: u32,
    },
    #[serde(rename_all = "camelCase")]
    Finished {
        grade: String,
        correct_count: u32,
        total_count: u32,
    },
    #[serde(rename_all = "camelCase")]
    Error {
        error: String,
        correct_count: u32,
        total_count: u32,
    },
}

impl QuizStepResponse {
    pub fn from_advance(session: QuizSession, advance: QuizAdvance) -> Self {
        match advance {
            QuizAdvance::Question {
                quiz,
                knowledge,
                current_index,
                next_index,
                total_questions,
            } => QuizStepResponse::Question {
                quiz,
                knowledge_record: knowledge,
                current_index,
                next_index,
                total_questions,
                correct_count: session.correct_count,
                total_count: session.total_count,
            },
            QuizAdvance::Finished { grade } => QuizStepResponse::Finished {
                grade,
                correct_count: session.correct_count,
                total_count: session.total_count,
            },
            QuizAdvance::Unavailable { message } => QuizStepResponse::Error {
                error: message,
                correct_count: session.correct_count,
                total_count: session.total_count,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::sample_quiz;

    #[test]
    fn finished_payload_is_tagged_and_camel_cased() {
        let response = QuizStepResponse::from_advance(
            QuizSession::new(1, 2),
            QuizAdvance::Finished {
                grade: "6".to_string(),
            },
        );

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "finished");
        assert_eq!(json["grade"], "6");
        assert_eq!(json["correctCount"], 1);
        assert_eq!(json["totalCount"], 2);
    }

    #[test]
    fn question_payload_omits_missing_knowledge_record() {
        let response = QuizStepResponse::from_advance(
            QuizSession::default(),
            QuizAdvance::Question {
                quiz: sample_quiz(),
                knowledge: None,
                current_index: 0,
                next_index: 1,
                total_questions: 2,
            },
        );

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "question");
        assert_eq!(json["nextIndex"], 1);
        assert!(json.get("knowledgeRecord").is_none());
    }
}
