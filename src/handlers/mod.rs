pub mod quiz_handler;
pub mod video_handler;

pub use quiz_handler::get_quiz;
pub use video_handler::{health_check, list_videos};
