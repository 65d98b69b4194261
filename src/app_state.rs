use std::sync::Arc;

use crate::{
    catalog,
    config::Config,
    errors::AppResult,
    services::{
        openai_service::OpenAiService, quiz_service::QuizService, video_service::VideoService,
        wikidata_service::WikidataService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub video_service: Arc<VideoService>,
    pub quiz_service: Arc<QuizService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let videos = catalog::load_videos(&config.catalog_path)?;
        let video_service = Arc::new(VideoService::new(videos));

        let wikidata_service = Arc::new(WikidataService::new(&config)?);
        let openai_service = Arc::new(OpenAiService::new(&config)?);

        let quiz_service = Arc::new(QuizService::new(
            video_service.clone(),
            wikidata_service,
            openai_service,
            config.enable_wikidata,
        ));

        Ok(Self {
            video_service,
            quiz_service,
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
