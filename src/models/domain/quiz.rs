use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

pub const CHOICE_COUNT: usize = 4;

/// A generated four-choice question. The same schema is handed to the
/// generation backend as its structured-output constraint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub question: String,
    #[schemars(length(min = 4, max = 4))]
    pub choices: Vec<String>,
    pub answer_index: usize,
}

impl Quiz {
    /// Decode the backend's raw answer text into a quiz.
    ///
    /// The model occasionally wraps its JSON in markdown fences despite
    /// being told not to; those are stripped as a separate pass so that a
    /// decode failure always means a genuine schema violation.
    pub fn from_response(raw: &str) -> AppResult<Quiz> {
        let text = strip_fences(raw);

        let quiz: Quiz = serde_json::from_str(text).map_err(|_| AppError::MalformedQuiz {
            raw: raw.to_string(),
        })?;

        if quiz.choices.len() != CHOICE_COUNT || quiz.answer_index >= CHOICE_COUNT {
            return Err(AppError::MalformedQuiz {
                raw: raw.to_string(),
            });
        }

        Ok(quiz)
    }
}

fn strip_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }

    text.trim()
}
