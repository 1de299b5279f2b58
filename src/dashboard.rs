use crate::{AppState, Error, Result};
use actix_web::{get, web, Responder, Scope};

pub fn scope() -> Scope {
    web::scope("/dashboard").service(stats)
}

/// `[user_count, donation_count, post_count, donor_count]`
#[get("/stats")]
pub async fn stats(state: web::Data<AppState>) -> Result<impl Responder, Error> {
    Ok(web::Json(state.service.dashboard_stats().await?))
}
