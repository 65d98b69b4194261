use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, models::dto::VideoQuery};

#[get("/api/videos")]
pub async fn list_videos(
    state: web::Data<AppState>,
    query: web::Query<VideoQuery>,
) -> Result<HttpResponse, AppError> {
    let videos = match query.grade.as_deref().filter(|g| !g.is_empty()) {
        Some(grade) => state.video_service.videos_by_grade(grade),
        None => state.video_service.all().iter().collect(),
    };

    Ok(HttpResponse::Ok().json(videos))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
