//! user http api

use crate::{
    service::{UserFilter, UserPatch},
    AppState, Error, Result,
};
use actix_web::{delete, get, post, put, web, Responder, Scope};
use entity::Subject;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub fn scope() -> Scope {
    web::scope("/users")
        .service(list_users)
        .service(reported_users)
        .service(ranking)
        .service(get_user)
        .service(patch_user)
        .service(delete_user)
        .service(report_user)
}

/// filtered listing; all filters are optional query parameters
#[get("")]
pub async fn list_users(
    state: web::Data<AppState>,
    filter: web::Query<UserFilter>,
) -> Result<impl Responder, Error> {
    Ok(web::Json(
        state.service.list_users(filter.into_inner()).await?,
    ))
}

#[get("/{id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    Ok(web::Json(state.service.get_user(id.into_inner()).await?))
}

/// typed partial profile update; one endpoint instead of one per field
#[put("/{id}")]
pub async fn patch_user(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    data: web::Json<UserPatch>,
) -> Result<impl Responder, Error> {
    Ok(web::Json(
        state
            .service
            .patch_user(id.into_inner(), data.into_inner())
            .await?,
    ))
}

#[delete("/{id}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    state.service.delete_user(id.into_inner()).await?;
    Ok(web::Json(json!({ "message": "User deleted successfully" })))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportReq {
    user_id: i32,
    reason: String,
}

#[post("/{id}/report")]
pub async fn report_user(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    data: web::Json<ReportReq>,
) -> Result<impl Responder, Error> {
    let data = data.into_inner();
    let report = state
        .service
        .create_report(Subject::User, id.into_inner(), data.user_id, data.reason)
        .await?;
    Ok(web::Json(json!({
        "message": "Report created successfully",
        "report": report
    })))
}

#[get("/reported")]
pub async fn reported_users(state: web::Data<AppState>) -> Result<impl Responder, Error> {
    Ok(web::Json(state.service.reported_users().await?))
}

/// xp leaderboard
#[get("/ranking")]
pub async fn ranking(state: web::Data<AppState>) -> Result<impl Responder, Error> {
    Ok(web::Json(state.service.user_ranking().await?))
}
