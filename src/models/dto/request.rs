use serde::Deserialize;
use validator::Validate;

use crate::models::domain::QuizSession;

/// Query parameters for one quiz-advancement request.
///
/// `keyword` is the raw space-delimited keyword source text; `index` is the
/// 0-based position within it. The running counts ride along with every
/// request because no session state is kept server-side.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuery {
    #[validate(length(min = 1, message = "keyword must not be empty"))]
    pub keyword: String,

    #[validate(length(min = 1, message = "grade must not be empty"))]
    pub grade: String,

    #[serde(default)]
    pub index: usize,

    pub is_correct: Option<bool>,

    #[serde(default)]
    pub correct_count: u32,

    #[serde(default)]
    pub total_count: u32,
}

impl QuizQuery {
    pub fn session(&self) -> QuizSession {
        QuizSession::new(self.correct_count, self.total_count)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VideoQuery {
    pub grade: Option<String>,
}
