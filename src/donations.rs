//! donation http api

use crate::{
    service::{DonationPatch, NewDonation},
    AppState, Error, Result,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder, Scope};
use entity::{donation, reaction, report, request, Subject};
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub fn scope() -> Scope {
    web::scope("/donations")
        .service(create_donation)
        .service(list_donations)
        .service(pending_reports)
        .service(by_status)
        .service(by_category)
        .service(by_donor)
        .service(get_donation)
        .service(update_donation)
        .service(delete_donation)
        .service(submit_request)
        .service(list_requests)
        .service(decide_request)
        .service(approve)
        .service(toggle_like)
        .service(toggle_save)
        .service(add_comment)
        .service(update_comment)
        .service(delete_comment)
        .service(create_report)
        .service(delete_report)
        .service(review_report)
        .service(resolve_report)
        .service(select_recipient)
        .service(attach_media)
        .service(list_media)
        .service(remove_media)
}

#[post("")]
pub async fn create_donation(
    state: web::Data<AppState>,
    data: web::Json<NewDonation>,
) -> Result<impl Responder, Error> {
    let donation = state.service.create_donation(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Donation created successfully",
        "donation": donation
    })))
}

#[get("")]
pub async fn list_donations(state: web::Data<AppState>) -> Result<impl Responder, Error> {
    Ok(web::Json(state.service.list_donations().await?))
}

#[get("/{id}")]
pub async fn get_donation(
    state: web::Data<AppState>,
    id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    Ok(web::Json(
        state.service.get_donation(id.into_inner()).await?,
    ))
}

#[put("/{id}")]
pub async fn update_donation(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    data: web::Json<DonationPatch>,
) -> Result<impl Responder, Error> {
    let donation = state
        .service
        .update_donation(id.into_inner(), data.into_inner())
        .await?;
    Ok(web::Json(json!({
        "message": "Donation updated successfully",
        "donation": donation
    })))
}

#[delete("/{id}")]
pub async fn delete_donation(
    state: web::Data<AppState>,
    id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    state.service.delete_donation(id.into_inner()).await?;
    Ok(web::Json(
        json!({ "message": "Donation deleted successfully" }),
    ))
}

#[get("/status/{status}")]
pub async fn by_status(
    state: web::Data<AppState>,
    status: web::Path<String>,
) -> Result<impl Responder, Error> {
    let status = donation::Status::try_from_value(&status.into_inner())
        .map_err(|e| Error::Validation(e.to_string()))?;
    Ok(web::Json(state.service.donations_by_status(status).await?))
}

#[get("/category/{category}")]
pub async fn by_category(
    state: web::Data<AppState>,
    category: web::Path<String>,
) -> Result<impl Responder, Error> {
    let category = donation::Category::try_from_value(&category.into_inner())
        .map_err(|e| Error::Validation(e.to_string()))?;
    Ok(web::Json(
        state.service.donations_by_category(category).await?,
    ))
}

#[get("/donor/{donor_id}")]
pub async fn by_donor(
    state: web::Data<AppState>,
    donor_id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    Ok(web::Json(
        state
            .service
            .donations_by_donor(donor_id.into_inner())
            .await?,
    ))
}

/// moderation feed
#[get("/reports/pending")]
pub async fn pending_reports(state: web::Data<AppState>) -> Result<impl Responder, Error> {
    Ok(web::Json(
        state.service.donations_with_pending_reports().await?,
    ))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdReq {
    user_id: i32,
}

#[post("/{id}/request")]
pub async fn submit_request(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    data: web::Json<UserIdReq>,
) -> Result<impl Responder, Error> {
    let request = state
        .service
        .submit_request(id.into_inner(), data.user_id)
        .await?;
    Ok(web::Json(json!({
        "message": "Request submitted successfully",
        "request": request
    })))
}

#[get("/{id}/requests")]
pub async fn list_requests(
    state: web::Data<AppState>,
    id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    Ok(web::Json(
        state.service.requests_for_donation(id.into_inner()).await?,
    ))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecideReq {
    status: request::Status,
}

#[put("/{donation_id}/requests/{request_id}/status")]
pub async fn decide_request(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
    data: web::Json<DecideReq>,
) -> Result<impl Responder, Error> {
    let (donation_id, request_id) = path.into_inner();
    let donation = state
        .service
        .decide_request(donation_id, request_id, data.status)
        .await?;
    Ok(web::Json(json!({
        "message": "Request status updated successfully",
        "donation": donation
    })))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveReq {
    request_id: i32,
}

/// alternate cascade entry point, same transactional accept
#[post("/{id}/approve")]
pub async fn approve(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    data: web::Json<ApproveReq>,
) -> Result<impl Responder, Error> {
    state
        .service
        .decide_request(id.into_inner(), data.request_id, request::Status::Accepted)
        .await?;
    Ok(web::Json(
        json!({ "message": "Request approved and donation completed" }),
    ))
}

#[post("/{id}/likes")]
pub async fn toggle_like(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    data: web::Json<UserIdReq>,
) -> Result<impl Responder, Error> {
    let likes = state
        .service
        .toggle_reaction(
            reaction::Kind::Like,
            Subject::Donation,
            id.into_inner(),
            data.user_id,
        )
        .await?;
    Ok(web::Json(json!({
        "message": "Donation like toggled",
        "likes": likes
    })))
}

#[post("/{id}/saves")]
pub async fn toggle_save(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    data: web::Json<UserIdReq>,
) -> Result<impl Responder, Error> {
    let saves = state
        .service
        .toggle_reaction(
            reaction::Kind::Save,
            Subject::Donation,
            id.into_inner(),
            data.user_id,
        )
        .await?;
    Ok(web::Json(json!({
        "message": "Donation save toggled",
        "saves": saves
    })))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentReq {
    user_id: i32,
    content: String,
}

#[post("/{id}/comments")]
pub async fn add_comment(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    data: web::Json<CommentReq>,
) -> Result<impl Responder, Error> {
    let data = data.into_inner();
    let comment = state
        .service
        .add_comment(Subject::Donation, id.into_inner(), data.user_id, data.content)
        .await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Comment added successfully",
        "comment": comment
    })))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentUpdateReq {
    content: String,
}

#[put("/{donation_id}/comments/{comment_id}")]
pub async fn update_comment(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
    data: web::Json<CommentUpdateReq>,
) -> Result<impl Responder, Error> {
    let (donation_id, comment_id) = path.into_inner();
    let comment = state
        .service
        .update_comment(
            Subject::Donation,
            donation_id,
            comment_id,
            data.into_inner().content,
        )
        .await?;
    Ok(web::Json(json!({
        "message": "Comment updated successfully",
        "comment": comment
    })))
}

#[delete("/{donation_id}/comments/{comment_id}")]
pub async fn delete_comment(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
) -> Result<impl Responder, Error> {
    let (donation_id, comment_id) = path.into_inner();
    state
        .service
        .delete_comment(Subject::Donation, donation_id, comment_id)
        .await?;
    Ok(web::Json(
        json!({ "message": "Comment deleted successfully" }),
    ))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportReq {
    user_id: i32,
    reason: String,
}

#[post("/{id}/reports")]
pub async fn create_report(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    data: web::Json<ReportReq>,
) -> Result<impl Responder, Error> {
    let data = data.into_inner();
    let report = state
        .service
        .create_report(Subject::Donation, id.into_inner(), data.user_id, data.reason)
        .await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Report created successfully",
        "report": report
    })))
}

#[delete("/{donation_id}/reports/{report_id}")]
pub async fn delete_report(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
) -> Result<impl Responder, Error> {
    let (donation_id, report_id) = path.into_inner();
    state
        .service
        .delete_report(Subject::Donation, donation_id, report_id)
        .await?;
    Ok(web::Json(
        json!({ "message": "Report deleted successfully" }),
    ))
}

#[put("/{donation_id}/reports/{report_id}/review")]
pub async fn review_report(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
) -> Result<impl Responder, Error> {
    let (donation_id, report_id) = path.into_inner();
    let report = state
        .service
        .set_report_status(
            Subject::Donation,
            donation_id,
            report_id,
            report::Status::Reviewed,
        )
        .await?;
    Ok(web::Json(json!({
        "message": "Report status changed to reviewed",
        "report": report
    })))
}

#[put("/{donation_id}/reports/{report_id}/resolve")]
pub async fn resolve_report(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
) -> Result<impl Responder, Error> {
    let (donation_id, report_id) = path.into_inner();
    let report = state
        .service
        .set_report_status(
            Subject::Donation,
            donation_id,
            report_id,
            report::Status::Resolved,
        )
        .await?;
    Ok(web::Json(json!({
        "message": "Report status changed to resolved",
        "report": report
    })))
}

#[put("/{id}/recipient")]
pub async fn select_recipient(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    data: web::Json<UserIdReq>,
) -> Result<impl Responder, Error> {
    let donation = state
        .service
        .select_recipient(id.into_inner(), data.user_id)
        .await?;
    Ok(web::Json(json!({
        "message": "Recipient selected successfully",
        "donation": donation
    })))
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MediaReq {
    urls: Vec<String>,
}

/// binaries are uploaded to the media host by the client; this only
/// records the resulting urls
#[post("/{id}/media")]
pub async fn attach_media(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    data: web::Json<MediaReq>,
) -> Result<impl Responder, Error> {
    let urls = data.into_inner().urls;
    if urls.is_empty() || urls.len() > state.setting.media.max_attachments {
        return Err(Error::Validation(format!(
            "Between 1 and {} media urls per upload",
            state.setting.media.max_attachments
        )));
    }
    let media = state
        .service
        .attach_donation_media(id.into_inner(), urls)
        .await?;
    Ok(web::Json(json!({
        "message": "Media uploaded successfully",
        "media": media
    })))
}

#[get("/{id}/media")]
pub async fn list_media(
    state: web::Data<AppState>,
    id: web::Path<i32>,
) -> Result<impl Responder, Error> {
    Ok(web::Json(
        state.service.donation_media(id.into_inner()).await?,
    ))
}

#[delete("/{id}/media/{index}")]
pub async fn remove_media(
    state: web::Data<AppState>,
    path: web::Path<(i32, usize)>,
) -> Result<impl Responder, Error> {
    let (donation_id, index) = path.into_inner();
    let media = state
        .service
        .remove_donation_media(donation_id, index)
        .await?;
    Ok(web::Json(json!({
        "message": "Media deleted successfully",
        "media": media
    })))
}
