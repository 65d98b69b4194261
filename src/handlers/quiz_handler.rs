use actix_web::{get, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{QuizQuery, QuizStepResponse},
};

/// Advance one position through a keyword-sequence quiz run.
///
/// The caller threads the running counts through every request; pipeline
/// failures come back as an inline error payload so the run stays
/// resumable.
#[get("/api/quiz")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    query: web::Query<QuizQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    query.validate()?;

    let (session, advance) = state.quiz_service.advance(&query).await;

    Ok(HttpResponse::Ok().json(QuizStepResponse::from_advance(session, advance)))
}
