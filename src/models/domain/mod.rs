pub mod knowledge;
pub mod quiz;
pub mod session;
pub mod video;
pub use knowledge::{KnowledgeFact, KnowledgeRecord};
pub use quiz::Quiz;
pub use session::QuizSession;
pub use video::{KeywordWikidataLink, Video};
