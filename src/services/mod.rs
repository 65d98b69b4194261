pub mod openai_service;
pub mod prompt;
pub mod quiz_service;
pub mod video_service;
pub mod wikidata_service;

pub use openai_service::{CompletionBackend, OpenAiService};
pub use quiz_service::{QuizAdvance, QuizService};
pub use video_service::VideoService;
pub use wikidata_service::{KnowledgeSource, WikidataService};
