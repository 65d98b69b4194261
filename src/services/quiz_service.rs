use std::sync::Arc;

use crate::errors::AppResult;
use crate::models::domain::{KnowledgeRecord, Quiz, QuizSession};
use crate::models::dto::QuizQuery;
use crate::services::openai_service::CompletionBackend;
use crate::services::prompt;
use crate::services::video_service::VideoService;
use crate::services::wikidata_service::{KnowledgeSource, WikidataService};

/// Outcome of one quiz-advancement request.
#[derive(Debug, Clone)]
pub enum QuizAdvance {
    Question {
        quiz: Quiz,
        knowledge: Option<KnowledgeRecord>,
        current_index: usize,
        next_index: usize,
        total_questions: usize,
    },
    Finished {
        grade: String,
    },
    Unavailable {
        message: String,
    },
}

/// Drives the per-question pipeline and the session state machine.
///
/// The remote collaborators sit behind trait objects so the progression
/// rules can be exercised without any network.
pub struct QuizService {
    video_service: Arc<VideoService>,
    knowledge: Arc<dyn KnowledgeSource>,
    backend: Arc<dyn CompletionBackend>,
    enrichment_enabled: bool,
}

impl QuizService {
    pub fn new(
        video_service: Arc<VideoService>,
        knowledge: Arc<dyn KnowledgeSource>,
        backend: Arc<dyn CompletionBackend>,
        enrichment_enabled: bool,
    ) -> Self {
        Self {
            video_service,
            knowledge,
            backend,
            enrichment_enabled,
        }
    }

    /// Advance one position through the keyword sequence.
    ///
    /// Score bookkeeping is applied first and survives any pipeline
    /// failure; a failed question becomes an inline `Unavailable` outcome
    /// so the caller can retry or move on without losing the run.
    pub async fn advance(&self, query: &QuizQuery) -> (QuizSession, QuizAdvance) {
        let session = query.session().progress(query.index, query.is_correct);

        let keywords: Vec<&str> = query.keyword.split_whitespace().collect();

        if query.index >= keywords.len() {
            log::info!(
                "quiz run finished for grade {}: {}/{}",
                query.grade,
                session.correct_count,
                session.total_count
            );
            return (
                session,
                QuizAdvance::Finished {
                    grade: query.grade.clone(),
                },
            );
        }

        let current = keywords[query.index];
        log::info!(
            "generating question {}/{} for keyword 「{}」",
            query.index + 1,
            keywords.len(),
            current
        );

        match self.generate_quiz(current, &query.grade).await {
            Ok((quiz, knowledge)) => (
                session,
                QuizAdvance::Question {
                    quiz,
                    knowledge,
                    current_index: query.index,
                    next_index: query.index + 1,
                    total_questions: keywords.len(),
                },
            ),
            Err(err) => {
                log::error!("quiz generation failed for 「{}」: {}", current, err);
                (
                    session,
                    QuizAdvance::Unavailable {
                        message: err.to_string(),
                    },
                )
            }
        }
    }

    /// Generate one question, enriching the prompt when a knowledge record
    /// can be resolved for the keyword. Enrichment failures degrade to an
    /// unenriched prompt; only backend and parse failures propagate.
    pub async fn generate_quiz(
        &self,
        keyword: &str,
        grade: &str,
    ) -> AppResult<(Quiz, Option<KnowledgeRecord>)> {
        let knowledge = if self.enrichment_enabled {
            self.knowledge_for_keyword(keyword, grade).await
        } else {
            log::debug!("enrichment disabled, generating unenriched question");
            None
        };

        let prompt_text = prompt::build_quiz_prompt(keyword, grade, knowledge.as_ref());

        let raw = self.backend.complete(&prompt_text).await?;
        let quiz = Quiz::from_response(&raw)?;

        Ok((quiz, knowledge))
    }

    async fn knowledge_for_keyword(
        &self,
        keyword: &str,
        grade: &str,
    ) -> Option<KnowledgeRecord> {
        let links = self.video_service.entity_links(keyword, grade);

        let entity_id = links
            .into_iter()
            .find_map(WikidataService::extract_entity_id)?;

        self.knowledge.fetch(&entity_id).await
    }
}
